//! Connection validator
//!
//! Decides whether an edge between two nodes is legal and computes the
//! cardinality pair. The store calls this before committing a new edge; a
//! rejection leaves the diagram untouched.

use thiserror::Error;

use crate::core::models::{Cardinality, Edge, Node, NodeId, NodeKind};

/// Role an entity plays when connected to an inheritance marker
///
/// The original editor asked for this interactively; in library form the
/// caller supplies it as an explicit parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InheritanceRole {
    /// The entity is the parent ("is-a" target) of the hierarchy
    Parent,
    /// The entity is a child (subtype) in the hierarchy
    Child,
}

/// Why a connection attempt was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    /// Both endpoints are the same node
    #[error("cannot connect a node to itself")]
    SameNode,
    /// One of the endpoints does not exist
    #[error("no node with id {0}")]
    UnknownNode(NodeId),
    /// The two kinds may not be connected directly
    #[error("cannot connect {0} to {1} directly")]
    InvalidKindPair(NodeKind, NodeKind),
    /// Entity-attribute attachment goes through the owner reference
    #[error("attributes attach to their entity via the owner reference, not an edge")]
    OwnerAttachmentRequired,
    /// An edge between the pair already exists (either orientation)
    #[error("an edge between these nodes already exists")]
    DuplicateEdge,
    /// An identifying relationship only connects to weak entities
    #[error("an identifying relationship must connect to a weak entity")]
    IdentifyingRelationshipRequiresWeakEntity,
    /// Inheritance-entity connections need an explicit role
    #[error("connecting an inheritance marker to an entity requires a parent or child role")]
    RoleRequired,
}

/// A validated connection that has not been inserted yet
///
/// Orientation matches the argument order of [`validate_connection`]; the
/// store turns the plan into an [`Edge`] by minting an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgePlan {
    /// First endpoint (the `a` argument)
    pub from: NodeId,
    /// Second endpoint (the `b` argument)
    pub to: NodeId,
    /// Cardinality at the `from` endpoint
    pub from_card: Cardinality,
    /// Cardinality at the `to` endpoint
    pub to_card: Cardinality,
}

fn find<'a>(nodes: &'a [Node], id: &NodeId) -> Option<&'a Node> {
    nodes.iter().find(|n| n.id() == id)
}

/// Validate a connection between nodes `a` and `b`
///
/// Rules, in order:
/// 1. The endpoints must differ and must both exist.
/// 2. Same-kind pairs are rejected.
/// 3. Entity-attribute pairs are rejected (the owner reference is the only
///    attachment path).
/// 4. At most one edge per unordered pair.
/// 5. An identifying relationship connects only to a weak entity; the
///    relationship side is many, the entity side one.
/// 6. Inheritance-entity connections require `role`; a parent entity gets
///    cardinality one, a child entity many (the marker side is the reverse).
/// 7. Everything else defaults to many/many.
///
/// # Errors
/// Returns a [`ConnectionError`] describing the first violated rule.
pub fn validate_connection(
    nodes: &[Node],
    edges: &[Edge],
    a: &NodeId,
    b: &NodeId,
    role: Option<InheritanceRole>,
) -> Result<EdgePlan, ConnectionError> {
    if a == b {
        return Err(ConnectionError::SameNode);
    }

    let n1 = find(nodes, a).ok_or_else(|| ConnectionError::UnknownNode(a.clone()))?;
    let n2 = find(nodes, b).ok_or_else(|| ConnectionError::UnknownNode(b.clone()))?;
    let (k1, k2) = (n1.kind(), n2.kind());

    if k1 == k2 {
        return Err(ConnectionError::InvalidKindPair(k1, k2));
    }

    if matches!(
        (k1, k2),
        (NodeKind::Entity, NodeKind::Attribute) | (NodeKind::Attribute, NodeKind::Entity)
    ) {
        return Err(ConnectionError::OwnerAttachmentRequired);
    }

    if edges.iter().any(|e| e.links(a, b)) {
        return Err(ConnectionError::DuplicateEdge);
    }

    let mut plan = EdgePlan {
        from: a.clone(),
        to: b.clone(),
        from_card: Cardinality::Many,
        to_card: Cardinality::Many,
    };

    // Identifying relationship <-> entity: the entity must be weak; the
    // relationship side is many, the weak entity side one.
    if let (Some(rel), Some(ent)) = (n1.as_relationship(), n2.as_entity()) {
        if rel.identifying {
            if !ent.weak {
                return Err(ConnectionError::IdentifyingRelationshipRequiresWeakEntity);
            }
            plan.from_card = Cardinality::Many;
            plan.to_card = Cardinality::One;
        }
    } else if let (Some(ent), Some(rel)) = (n1.as_entity(), n2.as_relationship()) {
        if rel.identifying {
            if !ent.weak {
                return Err(ConnectionError::IdentifyingRelationshipRequiresWeakEntity);
            }
            plan.from_card = Cardinality::One;
            plan.to_card = Cardinality::Many;
        }
    }

    // Inheritance marker <-> entity: the caller designates the entity's role.
    match (k1, k2) {
        (NodeKind::Inheritance, NodeKind::Entity) => {
            let role = role.ok_or(ConnectionError::RoleRequired)?;
            match role {
                InheritanceRole::Parent => {
                    plan.from_card = Cardinality::Many;
                    plan.to_card = Cardinality::One;
                }
                InheritanceRole::Child => {
                    plan.from_card = Cardinality::One;
                    plan.to_card = Cardinality::Many;
                }
            }
        }
        (NodeKind::Entity, NodeKind::Inheritance) => {
            let role = role.ok_or(ConnectionError::RoleRequired)?;
            match role {
                InheritanceRole::Parent => {
                    plan.from_card = Cardinality::One;
                    plan.to_card = Cardinality::Many;
                }
                InheritanceRole::Child => {
                    plan.from_card = Cardinality::Many;
                    plan.to_card = Cardinality::One;
                }
            }
        }
        _ => {}
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{
        shape_for, AttributeNode, EntityNode, InheritanceNode, RelationshipNode,
    };

    fn entity(id: &str, weak: bool) -> Node {
        Node::Entity(EntityNode {
            id: NodeId::from(id),
            name: id.to_string(),
            rect: shape_for(NodeKind::Entity).spawn_rect(),
            weak,
        })
    }

    fn relationship(id: &str, identifying: bool) -> Node {
        Node::Relationship(RelationshipNode {
            id: NodeId::from(id),
            name: "R".to_string(),
            rect: shape_for(NodeKind::Relationship).spawn_rect(),
            identifying,
        })
    }

    fn attribute(id: &str, owner: &str) -> Node {
        Node::Attribute(AttributeNode {
            id: NodeId::from(id),
            name: "attr".to_string(),
            rect: shape_for(NodeKind::Attribute).spawn_rect(),
            owner: NodeId::from(owner),
        })
    }

    fn inheritance(id: &str) -> Node {
        Node::Inheritance(InheritanceNode {
            id: NodeId::from(id),
            name: "is-a".to_string(),
            rect: shape_for(NodeKind::Inheritance).spawn_rect(),
        })
    }

    fn check(
        nodes: &[Node],
        a: &str,
        b: &str,
        role: Option<InheritanceRole>,
    ) -> Result<EdgePlan, ConnectionError> {
        validate_connection(nodes, &[], &NodeId::from(a), &NodeId::from(b), role)
    }

    #[test]
    fn test_same_node_rejected() {
        let nodes = vec![entity("E1", false)];
        assert_eq!(
            check(&nodes, "E1", "E1", None),
            Err(ConnectionError::SameNode)
        );
    }

    #[test]
    fn test_unknown_node_rejected() {
        let nodes = vec![entity("E1", false)];
        assert_eq!(
            check(&nodes, "E1", "E9", None),
            Err(ConnectionError::UnknownNode(NodeId::from("E9")))
        );
    }

    #[test]
    fn test_same_kind_pairs_rejected() {
        let nodes = vec![
            entity("E1", false),
            entity("E2", false),
            relationship("R1", false),
            relationship("R2", false),
            inheritance("I1"),
            inheritance("I2"),
        ];
        assert_eq!(
            check(&nodes, "E1", "E2", None),
            Err(ConnectionError::InvalidKindPair(
                NodeKind::Entity,
                NodeKind::Entity
            ))
        );
        assert!(matches!(
            check(&nodes, "R1", "R2", None),
            Err(ConnectionError::InvalidKindPair(_, _))
        ));
        assert!(matches!(
            check(&nodes, "I1", "I2", None),
            Err(ConnectionError::InvalidKindPair(_, _))
        ));
    }

    #[test]
    fn test_entity_attribute_rejected() {
        let nodes = vec![entity("E1", false), attribute("A1", "E1")];
        assert_eq!(
            check(&nodes, "E1", "A1", None),
            Err(ConnectionError::OwnerAttachmentRequired)
        );
        assert_eq!(
            check(&nodes, "A1", "E1", None),
            Err(ConnectionError::OwnerAttachmentRequired)
        );
    }

    #[test]
    fn test_duplicate_edge_rejected() {
        let nodes = vec![entity("E1", false), relationship("R1", false)];
        let edges = vec![Edge {
            id: crate::core::models::EdgeId::from("G1"),
            from: NodeId::from("R1"),
            to: NodeId::from("E1"),
            from_card: Cardinality::Many,
            to_card: Cardinality::Many,
        }];
        // Either orientation counts as a duplicate.
        assert_eq!(
            validate_connection(&nodes, &edges, &NodeId::from("E1"), &NodeId::from("R1"), None),
            Err(ConnectionError::DuplicateEdge)
        );
    }

    #[test]
    fn test_identifying_relationship_needs_weak_entity() {
        let nodes = vec![entity("E1", false), relationship("R1", true)];
        assert_eq!(
            check(&nodes, "R1", "E1", None),
            Err(ConnectionError::IdentifyingRelationshipRequiresWeakEntity)
        );
    }

    #[test]
    fn test_identifying_relationship_to_weak_entity() {
        let nodes = vec![entity("E2", true), relationship("R1", true)];
        let plan = check(&nodes, "R1", "E2", None).expect("accepted");
        assert_eq!(plan.from_card, Cardinality::Many);
        assert_eq!(plan.to_card, Cardinality::One);

        // Reversed argument order keeps the cardinalities on the right ends.
        let plan = check(&nodes, "E2", "R1", None).expect("accepted");
        assert_eq!(plan.from_card, Cardinality::One);
        assert_eq!(plan.to_card, Cardinality::Many);
    }

    #[test]
    fn test_inheritance_requires_role() {
        let nodes = vec![entity("E1", false), inheritance("I1")];
        assert_eq!(
            check(&nodes, "I1", "E1", None),
            Err(ConnectionError::RoleRequired)
        );
    }

    #[test]
    fn test_inheritance_parent_and_child_cardinalities() {
        let nodes = vec![entity("E1", false), inheritance("I1")];

        let plan = check(&nodes, "I1", "E1", Some(InheritanceRole::Parent)).expect("accepted");
        assert_eq!(plan.from_card, Cardinality::Many);
        assert_eq!(plan.to_card, Cardinality::One);

        let plan = check(&nodes, "E1", "I1", Some(InheritanceRole::Child)).expect("accepted");
        assert_eq!(plan.from_card, Cardinality::Many);
        assert_eq!(plan.to_card, Cardinality::One);
    }

    #[test]
    fn test_plain_relationship_defaults_to_many_many() {
        let nodes = vec![entity("E1", false), relationship("R1", false)];
        let plan = check(&nodes, "R1", "E1", None).expect("accepted");
        assert_eq!(plan.from_card, Cardinality::Many);
        assert_eq!(plan.to_card, Cardinality::Many);
    }
}
