//! Diagram node model
//!
//! Nodes form a tagged union: each kind carries only the fields that are
//! meaningful for it, so invalid combinations (an attribute without an owner,
//! a weak flag on a relationship) cannot be represented.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of a diagram node (e.g., "E1", "A3")
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Create a node id from a raw string
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the id as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Axis-aligned bounding box of a node on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width in canvas units
    pub width: f64,
    /// Height in canvas units
    pub height: f64,
}

impl Rect {
    /// Create a new rectangle
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle repositioned at `(x, y)`
    #[must_use]
    pub const fn at(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    /// Axis-aligned overlap test; rectangles that merely touch count as
    /// overlapping
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        !(self.x + self.width < other.x
            || self.x > other.x + other.width
            || self.y + self.height < other.y
            || self.y > other.y + other.height)
    }
}

/// Discriminant of the four node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Modeled real-world object type, optionally weak
    Entity,
    /// Relationship between entities, optionally identifying
    Relationship,
    /// Named property owned by exactly one entity
    Attribute,
    /// "is-a" marker linking a parent entity to child entities
    Inheritance,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let as_str = match self {
            Self::Entity => "entity",
            Self::Relationship => "relationship",
            Self::Attribute => "attribute",
            Self::Inheritance => "inheritance",
        };
        write!(f, "{as_str}")
    }
}

/// An entity node; `weak` entities are identified via an identifying
/// relationship to an owning entity and are drawn with a double border
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityNode {
    /// Unique node id
    pub id: NodeId,
    /// Display name (also the table name source for translation)
    pub name: String,
    /// Position and size on the canvas
    pub rect: Rect,
    /// Whether this entity has no independent primary key
    #[serde(default)]
    pub weak: bool,
}

/// A relationship node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipNode {
    /// Unique node id
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Position and size on the canvas
    pub rect: Rect,
    /// Whether this relationship supplies a weak entity's identification
    #[serde(default)]
    pub identifying: bool,
}

/// An attribute node; the `owner` back-reference (never an edge) ties it to
/// the entity it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributeNode {
    /// Unique node id
    pub id: NodeId,
    /// Display name (the column name source for translation)
    pub name: String,
    /// Position and size on the canvas
    pub rect: Rect,
    /// Id of the owning entity
    pub owner: NodeId,
}

/// An inheritance ("is-a") marker node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceNode {
    /// Unique node id
    pub id: NodeId,
    /// Display name
    pub name: String,
    /// Position and size on the canvas
    pub rect: Rect,
}

/// A diagram node, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "UPPERCASE")]
pub enum Node {
    /// Entity node
    Entity(EntityNode),
    /// Relationship node
    Relationship(RelationshipNode),
    /// Attribute node
    Attribute(AttributeNode),
    /// Inheritance marker node
    Inheritance(InheritanceNode),
}

impl Node {
    /// Get this node's id
    #[must_use]
    pub const fn id(&self) -> &NodeId {
        match self {
            Self::Entity(n) => &n.id,
            Self::Relationship(n) => &n.id,
            Self::Attribute(n) => &n.id,
            Self::Inheritance(n) => &n.id,
        }
    }

    /// Get this node's display name
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Entity(n) => &n.name,
            Self::Relationship(n) => &n.name,
            Self::Attribute(n) => &n.name,
            Self::Inheritance(n) => &n.name,
        }
    }

    /// Replace this node's display name
    pub fn set_name(&mut self, name: impl Into<String>) {
        let name = name.into();
        match self {
            Self::Entity(n) => n.name = name,
            Self::Relationship(n) => n.name = name,
            Self::Attribute(n) => n.name = name,
            Self::Inheritance(n) => n.name = name,
        }
    }

    /// Get this node's kind discriminant
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Entity(_) => NodeKind::Entity,
            Self::Relationship(_) => NodeKind::Relationship,
            Self::Attribute(_) => NodeKind::Attribute,
            Self::Inheritance(_) => NodeKind::Inheritance,
        }
    }

    /// Get this node's bounding box
    #[must_use]
    pub const fn rect(&self) -> &Rect {
        match self {
            Self::Entity(n) => &n.rect,
            Self::Relationship(n) => &n.rect,
            Self::Attribute(n) => &n.rect,
            Self::Inheritance(n) => &n.rect,
        }
    }

    /// Get a mutable reference to this node's bounding box
    pub fn rect_mut(&mut self) -> &mut Rect {
        match self {
            Self::Entity(n) => &mut n.rect,
            Self::Relationship(n) => &mut n.rect,
            Self::Attribute(n) => &mut n.rect,
            Self::Inheritance(n) => &mut n.rect,
        }
    }

    /// View this node as an entity, if it is one
    #[must_use]
    pub const fn as_entity(&self) -> Option<&EntityNode> {
        match self {
            Self::Entity(n) => Some(n),
            _ => None,
        }
    }

    /// View this node as a relationship, if it is one
    #[must_use]
    pub const fn as_relationship(&self) -> Option<&RelationshipNode> {
        match self {
            Self::Relationship(n) => Some(n),
            _ => None,
        }
    }

    /// View this node as an attribute, if it is one
    #[must_use]
    pub const fn as_attribute(&self) -> Option<&AttributeNode> {
        match self {
            Self::Attribute(n) => Some(n),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_overlap_detected() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(50.0, 25.0, 100.0, 50.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_rect_disjoint() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(200.0, 0.0, 100.0, 50.0);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn test_rect_touching_counts_as_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(100.0, 0.0, 100.0, 50.0);
        assert!(a.overlaps(&b));
    }

    #[test]
    fn test_node_accessors() {
        let mut node = Node::Entity(EntityNode {
            id: NodeId::from("E1"),
            name: "Student".to_string(),
            rect: Rect::new(60.0, 60.0, 100.0, 50.0),
            weak: false,
        });

        assert_eq!(node.id().as_str(), "E1");
        assert_eq!(node.name(), "Student");
        assert_eq!(node.kind(), NodeKind::Entity);
        assert!(node.as_entity().is_some());
        assert!(node.as_attribute().is_none());

        node.set_name("Person");
        assert_eq!(node.name(), "Person");
    }

    #[test]
    fn test_node_toml_round_trip() {
        let node = Node::Attribute(AttributeNode {
            id: NodeId::from("A1"),
            name: "id".to_string(),
            rect: Rect::new(200.0, 60.0, 40.0, 40.0),
            owner: NodeId::from("E1"),
        });

        let toml_str = toml::to_string(&node).expect("serialize");
        assert!(toml_str.contains("kind = \"ATTRIBUTE\""));

        let back: Node = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(back, node);
    }
}
