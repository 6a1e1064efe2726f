//! Diagram editing command handlers
//!
//! Each handler loads the diagram slot, applies one operation, and saves the
//! slot back. A rejected operation leaves the saved diagram unchanged.

use er_modeler::core::models::{shape_for, Node, NodeId, NodeKind};
use er_modeler::core::persist::{DiagramStorage, LoadError};
use er_modeler::core::store::DiagramStore;
use er_modeler::{error, info};

use crate::args::{AddSubcommand, RoleArg};

/// Load the slot, or start an empty diagram when it has not been saved yet
fn load_or_new(storage: &DiagramStorage, slot: &str) -> Result<DiagramStore, String> {
    match storage.load(slot) {
        Ok(store) => Ok(store),
        Err(LoadError::NotFound(_)) => {
            info!("No saved diagram \"{slot}\"; starting empty");
            Ok(DiagramStore::new())
        }
        Err(err) => Err(format!("✗ Failed to load diagram \"{slot}\": {err}")),
    }
}

fn save(storage: &DiagramStorage, slot: &str, store: &DiagramStore) -> Result<(), String> {
    storage
        .save(store, slot)
        .map_err(|err| format!("✗ Failed to save diagram \"{slot}\": {err}"))
}

fn report(result: Result<String, String>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(message) => {
            error!("{message}");
            eprintln!("{message}");
        }
    }
}

/// Run the add command
pub fn add(kind: &AddSubcommand, storage: &DiagramStorage, slot: &str) {
    report(run_add(kind, storage, slot));
}

fn run_add(kind: &AddSubcommand, storage: &DiagramStorage, slot: &str) -> Result<String, String> {
    let mut store = load_or_new(storage, slot)?;

    let message = match kind {
        AddSubcommand::Entity { name, weak } => {
            let label = name.clone().unwrap_or_else(|| {
                if *weak {
                    "Weak Entity".to_string()
                } else {
                    shape_for(NodeKind::Entity).label.to_string()
                }
            });
            let id = store.add_entity(label.as_str(), *weak);
            format!("✓ Added entity {id} (\"{label}\")")
        }
        AddSubcommand::Relationship { name, identifying } => {
            let label = name
                .clone()
                .unwrap_or_else(|| shape_for(NodeKind::Relationship).label.to_string());
            let id = store.add_relationship(label.as_str(), *identifying);
            format!("✓ Added relationship {id} (\"{label}\")")
        }
        AddSubcommand::Inheritance { name } => {
            let label = name
                .clone()
                .unwrap_or_else(|| shape_for(NodeKind::Inheritance).label.to_string());
            let id = store.add_inheritance(label.as_str());
            format!("✓ Added inheritance marker {id} (\"{label}\")")
        }
        AddSubcommand::Attribute { name, owner } => {
            let owner_id = NodeId::from(owner.as_str());
            let id = store
                .add_attribute(&owner_id, name.as_str())
                .map_err(|err| format!("✗ {err}"))?;
            format!("✓ Added attribute {id} (\"{name}\") to {owner}")
        }
    };

    save(storage, slot, &store)?;
    Ok(message)
}

/// Run the connect command
pub fn connect(a: &str, b: &str, role: Option<RoleArg>, storage: &DiagramStorage, slot: &str) {
    report(run_connect(a, b, role, storage, slot));
}

fn run_connect(
    a: &str,
    b: &str,
    role: Option<RoleArg>,
    storage: &DiagramStorage,
    slot: &str,
) -> Result<String, String> {
    let mut store = load_or_new(storage, slot)?;
    let (a, b) = (NodeId::from(a), NodeId::from(b));

    let edge_id = store
        .connect(&a, &b, role.map(Into::into))
        .map_err(|err| format!("✗ {err}"))?;

    let edge = store.edge(&edge_id).cloned();
    save(storage, slot, &store)?;

    Ok(edge.map_or_else(
        || format!("✓ Connected {a} to {b}"),
        |edge| {
            format!(
                "✓ Connected {} ({}) to {} ({}) [{}]",
                edge.from, edge.from_card, edge.to, edge.to_card, edge.id
            )
        },
    ))
}

/// Run the remove command
pub fn remove(id: &str, storage: &DiagramStorage, slot: &str) {
    report(run_remove(id, storage, slot));
}

fn run_remove(id: &str, storage: &DiagramStorage, slot: &str) -> Result<String, String> {
    let mut store = load_or_new(storage, slot)?;
    let id = NodeId::from(id);
    if store.node(&id).is_none() {
        return Err(format!("✗ No node with id {id}"));
    }

    let (nodes_before, edges_before) = (store.nodes().len(), store.edges().len());
    store.remove_node(&id);
    save(storage, slot, &store)?;

    Ok(format!(
        "✓ Removed {id} ({} nodes, {} edges dropped)",
        nodes_before - store.nodes().len(),
        edges_before - store.edges().len()
    ))
}

/// Run the rename command
pub fn rename(id: &str, name: &str, storage: &DiagramStorage, slot: &str) {
    report(run_rename(id, name, storage, slot));
}

fn run_rename(id: &str, name: &str, storage: &DiagramStorage, slot: &str) -> Result<String, String> {
    let mut store = load_or_new(storage, slot)?;
    let id = NodeId::from(id);
    if !store.rename_node(&id, name) {
        return Err(format!("✗ No node with id {id}"));
    }
    save(storage, slot, &store)?;
    Ok(format!("✓ Renamed {id} to \"{name}\""))
}

/// Run the move command
pub fn move_node(id: &str, x: f64, y: f64, storage: &DiagramStorage, slot: &str) {
    report(run_move(id, x, y, storage, slot));
}

fn run_move(id: &str, x: f64, y: f64, storage: &DiagramStorage, slot: &str) -> Result<String, String> {
    let mut store = load_or_new(storage, slot)?;
    let id = NodeId::from(id);
    if store.node(&id).is_none() {
        return Err(format!("✗ No node with id {id}"));
    }

    if store.move_node(&id, x, y) {
        save(storage, slot, &store)?;
        Ok(format!("✓ Moved {id} to ({x}, {y})"))
    } else {
        // The overlap rule makes this a no-op, not an error; the slot keeps
        // the last accepted position.
        Ok(format!("Move of {id} skipped: would overlap another node"))
    }
}

fn describe(node: &Node) -> String {
    let rect = node.rect();
    let flags = match node {
        Node::Entity(ent) if ent.weak => " [weak]".to_string(),
        Node::Relationship(rel) if rel.identifying => " [identifying]".to_string(),
        Node::Attribute(attr) => format!(" [owner: {}]", attr.owner),
        _ => String::new(),
    };
    format!(
        "  {} {} \"{}\" at ({}, {}) {}x{}{}",
        node.id(),
        node.kind(),
        node.name(),
        rect.x,
        rect.y,
        rect.width,
        rect.height,
        flags
    )
}

/// Run the show command
pub fn show(storage: &DiagramStorage, slot: &str) {
    let store = match load_or_new(storage, slot) {
        Ok(store) => store,
        Err(message) => {
            error!("{message}");
            eprintln!("{message}");
            return;
        }
    };

    if store.nodes().is_empty() {
        println!("Diagram \"{slot}\" is empty.");
        return;
    }

    println!("Diagram \"{slot}\":");
    println!("Nodes:");
    for node in store.nodes() {
        println!("{}", describe(node));
    }

    if store.edges().is_empty() {
        println!("No edges.");
    } else {
        println!("Edges:");
        for edge in store.edges() {
            println!(
                "  {}: {} ({}) <-> {} ({})",
                edge.id, edge.from, edge.from_card, edge.to, edge.to_card
            );
        }
    }
}
