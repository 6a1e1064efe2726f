//! Schema translator
//!
//! Projects the diagram to a plain-text relational schema approximation, one
//! table per entity. Best-effort and for teaching only: no keys, no foreign
//! keys, no association tables for many-to-many relationships.

use std::fmt;

use crate::core::models::Node;
use crate::core::store::DiagramStore;

/// One projected table: the entity name plus its collected column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSketch {
    /// Table name (entity name with whitespace runs collapsed to `_`)
    pub name: String,
    /// Column names in first-seen order, deduplicated
    pub columns: Vec<String>,
}

/// The full projection, one table per entity in creation order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SchemaReport {
    /// Projected tables
    pub tables: Vec<TableSketch>,
}

impl fmt::Display for SchemaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for table in &self.tables {
            writeln!(f, "{}({})", table.name, table.columns.join(", "))?;
        }
        Ok(())
    }
}

/// Collapse every whitespace run in an entity name to a single underscore
fn table_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push('_');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }
    out
}

/// Translate the diagram into a relational schema sketch
///
/// For each entity, in node creation order, columns are the names of
/// attributes reachable through an edge touching the entity, followed by
/// attributes whose owner reference is the entity, deduplicated preserving
/// first occurrence. Deterministic for an unchanged store.
#[must_use]
pub fn translate(store: &DiagramStore) -> SchemaReport {
    let tables = store
        .nodes()
        .iter()
        .filter_map(Node::as_entity)
        .map(|ent| {
            let mut columns: Vec<String> = Vec::new();
            let mut push_unique = |name: &str| {
                if !columns.iter().any(|c| c == name) {
                    columns.push(name.to_string());
                }
            };

            // Attributes wired to the entity by an edge.
            for edge in store.edges().iter().filter(|e| e.touches(&ent.id)) {
                let Some(other) = edge.other_end(&ent.id) else {
                    continue;
                };
                if let Some(attr) = store.node(other).and_then(Node::as_attribute) {
                    push_unique(&attr.name);
                }
            }

            // Attributes claiming the entity through their owner reference.
            for attr in store.nodes().iter().filter_map(Node::as_attribute) {
                if attr.owner == ent.id {
                    push_unique(&attr.name);
                }
            }

            TableSketch {
                name: table_name(&ent.name),
                columns,
            }
        })
        .collect();

    SchemaReport { tables }
}
