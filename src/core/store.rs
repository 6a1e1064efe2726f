//! Diagram store
//!
//! Single source of truth for the node and edge lists. The store is an
//! explicit value owned by the caller; all mutation goes through it and every
//! rejected operation leaves both lists unchanged.

use std::collections::HashSet;

use thiserror::Error;

use crate::core::models::{
    shape_for, AttributeNode, Cardinality, Edge, EdgeId, EntityNode, InheritanceNode, Node,
    NodeId, NodeKind, Rect, RelationshipNode, ATTRIBUTE_GAP,
};
use crate::core::validate::{validate_connection, ConnectionError, InheritanceRole};

/// Why an attribute could not be created
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerError {
    /// The owner id does not name any node
    #[error("no node with id {0}")]
    NoSuchNode(NodeId),
    /// The owner id names a node that is not an entity
    #[error("node {0} is not an entity; attributes belong to entities")]
    NotAnEntity(NodeId),
}

/// A short-lived drag interaction
///
/// Captures the pointer-to-node offset at begin-drag so move events can
/// recompute the candidate position. Cleared by `end_drag`.
#[derive(Debug, Clone, PartialEq)]
struct DragSession {
    node: NodeId,
    offset_x: f64,
    offset_y: f64,
}

/// In-memory diagram: typed nodes, typed edges, and id sequences
#[derive(Debug, Clone, Default)]
pub struct DiagramStore {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    node_seq: u64,
    edge_seq: u64,
    drag: Option<DragSession>,
}

/// Numeric suffix of an id like "E12" or "G3", used to re-seed sequences
fn id_sequence(id: &str) -> Option<u64> {
    let digits: String = id.chars().skip_while(|c| !c.is_ascii_digit()).collect();
    digits.parse().ok()
}

impl DiagramStore {
    /// Create an empty diagram
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted node and edge lists
    ///
    /// Id sequences are re-seeded past the highest numeric suffix found so
    /// later additions never collide with loaded ids.
    #[must_use]
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
        let node_seq = nodes
            .iter()
            .filter_map(|n| id_sequence(n.id().as_str()))
            .max()
            .unwrap_or(0);
        let edge_seq = edges
            .iter()
            .filter_map(|e| id_sequence(e.id.as_str()))
            .max()
            .unwrap_or(0);

        Self {
            nodes,
            edges,
            node_seq,
            edge_seq,
            drag: None,
        }
    }

    /// All nodes in creation order
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// All edges in creation order
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a node by id
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Look up an edge by id
    #[must_use]
    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == *id)
    }

    fn mint_node_id(&mut self, kind: NodeKind) -> NodeId {
        self.node_seq += 1;
        let prefix = match kind {
            NodeKind::Entity => "E",
            NodeKind::Relationship => "R",
            NodeKind::Attribute => "A",
            NodeKind::Inheritance => "I",
        };
        NodeId::new(format!("{prefix}{}", self.node_seq))
    }

    fn mint_edge_id(&mut self) -> EdgeId {
        self.edge_seq += 1;
        EdgeId::new(format!("G{}", self.edge_seq))
    }

    /// Add an entity at the default spawn position; always succeeds
    pub fn add_entity(&mut self, name: impl Into<String>, weak: bool) -> NodeId {
        let id = self.mint_node_id(NodeKind::Entity);
        self.nodes.push(Node::Entity(EntityNode {
            id: id.clone(),
            name: name.into(),
            rect: shape_for(NodeKind::Entity).spawn_rect(),
            weak,
        }));
        id
    }

    /// Add a relationship at the default spawn position; always succeeds
    pub fn add_relationship(&mut self, name: impl Into<String>, identifying: bool) -> NodeId {
        let id = self.mint_node_id(NodeKind::Relationship);
        self.nodes.push(Node::Relationship(RelationshipNode {
            id: id.clone(),
            name: name.into(),
            rect: shape_for(NodeKind::Relationship).spawn_rect(),
            identifying,
        }));
        id
    }

    /// Add an inheritance marker at the default spawn position
    pub fn add_inheritance(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.mint_node_id(NodeKind::Inheritance);
        self.nodes.push(Node::Inheritance(InheritanceNode {
            id: id.clone(),
            name: name.into(),
            rect: shape_for(NodeKind::Inheritance).spawn_rect(),
        }));
        id
    }

    /// Add an attribute owned by `owner`
    ///
    /// The attribute spawns beside its owner and is wired to it with an edge
    /// carrying cardinality one on both ends.
    ///
    /// # Errors
    /// [`OwnerError::NoSuchNode`] when `owner` is unknown,
    /// [`OwnerError::NotAnEntity`] when it names a non-entity.
    pub fn add_attribute(
        &mut self,
        owner: &NodeId,
        name: impl Into<String>,
    ) -> Result<NodeId, OwnerError> {
        let owner_rect = match self.node(owner) {
            None => return Err(OwnerError::NoSuchNode(owner.clone())),
            Some(node) => match node.as_entity() {
                None => return Err(OwnerError::NotAnEntity(owner.clone())),
                Some(ent) => ent.rect,
            },
        };

        let shape = shape_for(NodeKind::Attribute);
        let id = self.mint_node_id(NodeKind::Attribute);
        self.nodes.push(Node::Attribute(AttributeNode {
            id: id.clone(),
            name: name.into(),
            rect: Rect::new(
                owner_rect.x + owner_rect.width + ATTRIBUTE_GAP,
                owner_rect.y,
                shape.width,
                shape.height,
            ),
            owner: owner.clone(),
        }));

        let edge_id = self.mint_edge_id();
        self.edges.push(Edge {
            id: edge_id,
            from: id.clone(),
            to: owner.clone(),
            from_card: Cardinality::One,
            to_card: Cardinality::One,
        });

        Ok(id)
    }

    /// Move a node to `(x, y)` unless the new bounding box overlaps another
    /// node
    ///
    /// An overlapping move is a deliberate silent no-op, not an error.
    /// Returns whether the move was applied.
    pub fn move_node(&mut self, id: &NodeId, x: f64, y: f64) -> bool {
        let Some(node) = self.nodes.iter().find(|n| n.id() == id) else {
            return false;
        };
        let candidate = node.rect().at(x, y);

        let blocked = self
            .nodes
            .iter()
            .filter(|other| other.id() != id)
            .any(|other| candidate.overlaps(other.rect()));
        if blocked {
            return false;
        }

        if let Some(node) = self.nodes.iter_mut().find(|n| n.id() == id) {
            let rect = node.rect_mut();
            rect.x = x;
            rect.y = y;
        }
        true
    }

    /// Rename a node; returns whether `id` named a node
    pub fn rename_node(&mut self, id: &NodeId, new_name: impl Into<String>) -> bool {
        self.nodes.iter_mut().find(|n| n.id() == id).is_some_and(|node| {
            node.set_name(new_name);
            true
        })
    }

    /// Remove a node, every edge touching it, and (for an entity) every
    /// attribute it owns plus their edges
    ///
    /// The cascade is computed up front and applied to both lists together,
    /// so the store is never observable in a half-deleted state. Removing an
    /// unknown id is a no-op.
    pub fn remove_node(&mut self, id: &NodeId) {
        let Some(node) = self.node(id) else { return };

        let mut doomed: HashSet<NodeId> = HashSet::new();
        doomed.insert(id.clone());
        if node.kind() == NodeKind::Entity {
            doomed.extend(
                self.nodes
                    .iter()
                    .filter_map(Node::as_attribute)
                    .filter(|attr| attr.owner == *id)
                    .map(|attr| attr.id.clone()),
            );
        }

        self.nodes.retain(|n| !doomed.contains(n.id()));
        self.edges
            .retain(|e| !doomed.contains(&e.from) && !doomed.contains(&e.to));
        if self
            .drag
            .as_ref()
            .is_some_and(|session| doomed.contains(&session.node))
        {
            self.drag = None;
        }
    }

    /// Connect two nodes, validating the pair and computing cardinalities
    ///
    /// `role` is required when one endpoint is an inheritance marker and the
    /// other an entity; it designates the entity's role in the hierarchy.
    ///
    /// # Errors
    /// Any [`ConnectionError`] from the validator; the edge list is unchanged
    /// on rejection.
    pub fn connect(
        &mut self,
        a: &NodeId,
        b: &NodeId,
        role: Option<InheritanceRole>,
    ) -> Result<EdgeId, ConnectionError> {
        let plan = validate_connection(&self.nodes, &self.edges, a, b, role)?;
        let id = self.mint_edge_id();
        self.edges.push(Edge {
            id: id.clone(),
            from: plan.from,
            to: plan.to,
            from_card: plan.from_card,
            to_card: plan.to_card,
        });
        Ok(id)
    }

    /// Begin dragging `id` from pointer position `(px, py)`
    ///
    /// Captures the pointer-to-node offset; returns whether a session
    /// started.
    pub fn begin_drag(&mut self, id: &NodeId, px: f64, py: f64) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let rect = node.rect();
        self.drag = Some(DragSession {
            node: id.clone(),
            offset_x: px - rect.x,
            offset_y: py - rect.y,
        });
        true
    }

    /// Apply a drag move event at pointer position `(px, py)`
    ///
    /// Recomputes the candidate position from the captured offset and applies
    /// the overlap rule; the node stays at the last legally accepted
    /// position. Returns whether the node moved.
    pub fn drag_to(&mut self, px: f64, py: f64) -> bool {
        let Some(session) = self.drag.clone() else {
            return false;
        };
        self.move_node(&session.node, px - session.offset_x, py - session.offset_y)
    }

    /// End the drag session, if any
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Whether a drag session is active
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_store() {
        let mut store = DiagramStore::new();
        let e1 = store.add_entity("Student", false);
        let r1 = store.add_relationship("enrolls", false);
        assert_eq!(e1.as_str(), "E1");
        assert_eq!(r1.as_str(), "R2");
    }

    #[test]
    fn test_add_attribute_creates_node_and_edge() {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Student", false);
        let attr = store.add_attribute(&ent, "id").expect("attribute");

        assert_eq!(store.nodes().len(), 2);
        assert_eq!(store.edges().len(), 1);

        let edge = &store.edges()[0];
        assert!(edge.links(&attr, &ent));
        assert_eq!(edge.from_card, Cardinality::One);
        assert_eq!(edge.to_card, Cardinality::One);

        let attr_node = store.node(&attr).and_then(Node::as_attribute).expect("attr");
        assert_eq!(attr_node.owner, ent);
        // Spawned beside its owner.
        let owner_rect = store.node(&ent).expect("owner").rect();
        assert!((attr_node.rect.x - (owner_rect.x + owner_rect.width + ATTRIBUTE_GAP)).abs()
            < f64::EPSILON);
    }

    #[test]
    fn test_add_attribute_owner_errors() {
        let mut store = DiagramStore::new();
        let rel = store.add_relationship("R", false);

        assert_eq!(
            store.add_attribute(&NodeId::from("E99"), "x"),
            Err(OwnerError::NoSuchNode(NodeId::from("E99")))
        );
        assert_eq!(
            store.add_attribute(&rel, "x"),
            Err(OwnerError::NotAnEntity(rel.clone()))
        );
        assert_eq!(store.nodes().len(), 1);
        assert_eq!(store.edges().len(), 0);
    }

    #[test]
    fn test_move_rejects_overlap() {
        let mut store = DiagramStore::new();
        let e1 = store.add_entity("A", false);
        let e2 = store.add_entity("B", false);
        assert!(store.move_node(&e2, 400.0, 60.0));

        let before = *store.node(&e1).expect("node").rect();
        // Moving E1 onto E2 must be silently rejected.
        assert!(!store.move_node(&e1, 400.0, 60.0));
        assert_eq!(store.node(&e1).expect("node").rect(), &before);

        // A clear position lands exactly where requested.
        assert!(store.move_node(&e1, 700.0, 300.0));
        let rect = store.node(&e1).expect("node").rect();
        assert!((rect.x - 700.0).abs() < f64::EPSILON);
        assert!((rect.y - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_remove_entity_cascades() {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Student", false);
        let _attr = store.add_attribute(&ent, "id").expect("attribute");
        let rel = store.add_relationship("enrolls", false);
        store.connect(&rel, &ent, None).expect("connect");

        store.remove_node(&ent);

        assert!(store.nodes().iter().all(|n| n.id() != &ent));
        assert!(
            store
                .nodes()
                .iter()
                .filter_map(Node::as_attribute)
                .all(|a| a.owner != ent),
            "owned attributes must be cascade-deleted"
        );
        assert!(store.edges().iter().all(|e| !e.touches(&ent)));
        // The relationship itself survives.
        assert!(store.node(&rel).is_some());
    }

    #[test]
    fn test_remove_relationship_keeps_entities() {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Student", false);
        let rel = store.add_relationship("enrolls", false);
        store.connect(&rel, &ent, None).expect("connect");

        store.remove_node(&rel);
        assert!(store.node(&ent).is_some());
        assert!(store.edges().is_empty());
    }

    #[test]
    fn test_rename() {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Entity", false);
        assert!(store.rename_node(&ent, "Student"));
        assert_eq!(store.node(&ent).expect("node").name(), "Student");
        assert!(!store.rename_node(&NodeId::from("E99"), "nope"));
    }

    #[test]
    fn test_connect_duplicate_rejected() {
        let mut store = DiagramStore::new();
        let ent = store.add_entity("Student", false);
        let rel = store.add_relationship("enrolls", false);

        store.connect(&ent, &rel, None).expect("first connect");
        assert_eq!(
            store.connect(&rel, &ent, None),
            Err(ConnectionError::DuplicateEdge)
        );
        assert_eq!(
            store
                .edges()
                .iter()
                .filter(|e| e.links(&ent, &rel))
                .count(),
            1
        );
    }

    #[test]
    fn test_drag_session() {
        let mut store = DiagramStore::new();
        let e1 = store.add_entity("A", false);
        let e2 = store.add_entity("B", false);
        assert!(store.move_node(&e2, 400.0, 60.0));

        // Grab E1 (at 60,60) with the pointer at (70, 70): offset (10, 10).
        assert!(store.begin_drag(&e1, 70.0, 70.0));
        assert!(store.is_dragging());

        assert!(store.drag_to(210.0, 310.0));
        let rect = *store.node(&e1).expect("node").rect();
        assert!((rect.x - 200.0).abs() < f64::EPSILON);
        assert!((rect.y - 300.0).abs() < f64::EPSILON);

        // Dragging onto E2 keeps the last accepted position.
        assert!(!store.drag_to(410.0, 70.0));
        assert_eq!(store.node(&e1).expect("node").rect(), &rect);

        store.end_drag();
        assert!(!store.is_dragging());
        assert!(!store.drag_to(500.0, 500.0));
    }

    #[test]
    fn test_from_parts_reseeds_sequences() {
        let mut store = DiagramStore::new();
        store.add_entity("A", false);
        store.add_entity("B", false);
        let mut restored =
            DiagramStore::from_parts(store.nodes().to_vec(), store.edges().to_vec());
        let next = restored.add_entity("C", false);
        assert_eq!(next.as_str(), "E3");
    }
}
