//! Data models for the diagram core

pub mod edge;
pub mod node;
pub mod shape;

pub use edge::{Cardinality, Edge, EdgeId};
pub use node::{
    AttributeNode, EntityNode, InheritanceNode, Node, NodeId, NodeKind, Rect, RelationshipNode,
};
pub use shape::{shape_for, Outline, ShapeSpec, ATTRIBUTE_GAP};
