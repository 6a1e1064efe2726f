//! Integration tests for the diagram store, validator, and translator

use er_modeler::core::models::{Cardinality, Node, NodeId};
use er_modeler::core::schema::translate;
use er_modeler::core::store::DiagramStore;
use er_modeler::core::validate::{ConnectionError, InheritanceRole};

#[test]
fn test_remove_node_leaves_no_dangling_references() {
    let mut store = DiagramStore::new();
    let student = store.add_entity("Student", false);
    store.add_attribute(&student, "id").expect("attribute");
    store.add_attribute(&student, "name").expect("attribute");
    let course = store.add_entity("Course", false);
    assert!(store.move_node(&course, 500.0, 60.0));
    let enrolls = store.add_relationship("enrolls", false);
    store.connect(&student, &enrolls, None).expect("connect");
    store.connect(&enrolls, &course, None).expect("connect");

    store.remove_node(&student);

    // No edge references the removed entity and no owned attribute survives.
    assert!(store.edges().iter().all(|e| !e.touches(&student)));
    assert!(store
        .nodes()
        .iter()
        .filter_map(Node::as_attribute)
        .all(|attr| attr.owner != student));
    // Unrelated structure is untouched.
    assert!(store.node(&course).is_some());
    assert!(store
        .edges()
        .iter()
        .any(|e| e.links(&enrolls, &course)));
}

#[test]
fn test_connect_twice_yields_duplicate_edge() {
    let mut store = DiagramStore::new();
    let ent = store.add_entity("Student", false);
    let rel = store.add_relationship("enrolls", false);

    assert!(store.connect(&ent, &rel, None).is_ok());
    assert_eq!(
        store.connect(&ent, &rel, None),
        Err(ConnectionError::DuplicateEdge)
    );
    assert_eq!(
        store.edges().iter().filter(|e| e.links(&ent, &rel)).count(),
        1
    );
}

#[test]
fn test_connect_node_to_itself_fails() {
    let mut store = DiagramStore::new();
    let ent = store.add_entity("Student", false);
    assert_eq!(
        store.connect(&ent, &ent, None),
        Err(ConnectionError::SameNode)
    );
}

#[test]
fn test_connect_two_entities_fails_with_invalid_kind_pair() {
    let mut store = DiagramStore::new();
    let a = store.add_entity("A", false);
    let b = store.add_entity("B", false);
    assert!(matches!(
        store.connect(&a, &b, None),
        Err(ConnectionError::InvalidKindPair(_, _))
    ));
}

#[test]
fn test_identifying_relationship_to_weak_entity_cardinalities() {
    let mut store = DiagramStore::new();
    let rel = store.add_relationship("has", true);
    let weak = store.add_entity("Dependent", true);

    let edge_id = store.connect(&rel, &weak, None).expect("connect");
    let edge = store.edge(&edge_id).expect("edge");
    assert_eq!(edge.from, rel);
    assert_eq!(edge.from_card, Cardinality::Many);
    assert_eq!(edge.to, weak);
    assert_eq!(edge.to_card, Cardinality::One);
}

#[test]
fn test_identifying_relationship_to_strong_entity_rejected() {
    let mut store = DiagramStore::new();
    let rel = store.add_relationship("has", true);
    let strong = store.add_entity("Employee", false);
    assert_eq!(
        store.connect(&rel, &strong, None),
        Err(ConnectionError::IdentifyingRelationshipRequiresWeakEntity)
    );
    assert!(store.edges().is_empty());
}

#[test]
fn test_inheritance_connection_roles() {
    let mut store = DiagramStore::new();
    let marker = store.add_inheritance("is-a");
    let parent = store.add_entity("Person", false);
    assert!(store.move_node(&parent, 500.0, 60.0));
    let child = store.add_entity("Student", false);

    assert_eq!(
        store.connect(&marker, &parent, None),
        Err(ConnectionError::RoleRequired)
    );

    let up = store
        .connect(&marker, &parent, Some(InheritanceRole::Parent))
        .expect("parent edge");
    let edge = store.edge(&up).expect("edge");
    assert_eq!(edge.from_card, Cardinality::Many);
    assert_eq!(edge.to_card, Cardinality::One);

    let down = store
        .connect(&marker, &child, Some(InheritanceRole::Child))
        .expect("child edge");
    let edge = store.edge(&down).expect("edge");
    assert_eq!(edge.from_card, Cardinality::One);
    assert_eq!(edge.to_card, Cardinality::Many);
}

#[test]
fn test_move_overlap_is_a_silent_no_op() {
    let mut store = DiagramStore::new();
    let a = store.add_entity("A", false);
    let b = store.add_entity("B", false);
    assert!(store.move_node(&b, 400.0, 200.0));

    let before = *store.node(&a).expect("node").rect();
    assert!(!store.move_node(&a, 420.0, 210.0));
    assert_eq!(store.node(&a).expect("node").rect(), &before);

    assert!(store.move_node(&a, 700.0, 500.0));
    let rect = store.node(&a).expect("node").rect();
    assert!((rect.x - 700.0).abs() < f64::EPSILON);
    assert!((rect.y - 500.0).abs() < f64::EPSILON);
}

#[test]
fn test_translate_student_scenario() {
    let mut store = DiagramStore::new();
    let student = store.add_entity("Student", false);
    store.add_attribute(&student, "id").expect("attribute");

    let output = translate(&store).to_string();
    assert!(output.contains("Student(id)"));
}

#[test]
fn test_translate_twice_is_identical() {
    let mut store = DiagramStore::new();
    let student = store.add_entity("Student", false);
    store.add_attribute(&student, "id").expect("attribute");
    store.add_attribute(&student, "email").expect("attribute");
    let course = store.add_entity("Course Catalog", false);
    assert!(store.move_node(&course, 500.0, 60.0));
    store.add_attribute(&course, "code").expect("attribute");

    assert_eq!(translate(&store).to_string(), translate(&store).to_string());
}

#[test]
fn test_minted_ids_share_one_sequence_across_kinds() {
    let mut store = DiagramStore::new();
    let student = store.add_entity("Student", false);
    let id_attr = store.add_attribute(&student, "id").expect("attribute");
    let course = store.add_entity("Course", false);
    let enrolls = store.add_relationship("enrolls", false);

    // One sequence with per-kind prefixes, not a counter per kind.
    assert_eq!(student.as_str(), "E1");
    assert_eq!(id_attr.as_str(), "A2");
    assert_eq!(course.as_str(), "E3");
    assert_eq!(enrolls.as_str(), "R4");

    assert!(store.connect(&student, &enrolls, None).is_ok());
    // "R1" was never minted; kind-local numbering would have produced it.
    assert_eq!(
        store.connect(&student, &NodeId::from("R1"), None),
        Err(ConnectionError::UnknownNode(NodeId::from("R1")))
    );
}

#[test]
fn test_unknown_node_rejected() {
    let mut store = DiagramStore::new();
    let ent = store.add_entity("Student", false);
    assert_eq!(
        store.connect(&ent, &NodeId::from("R99"), None),
        Err(ConnectionError::UnknownNode(NodeId::from("R99")))
    );
}
