use chrono::{Duration, Utc};
use noema_core::model::{Edge, Node, NodeKind, Relation, Unit};

#[test]
fn node_kind_has_nine_members() {
    assert_eq!(NodeKind::COUNT, 9);
    assert_eq!(NodeKind::ALL.len(), 9);
}

#[test]
fn relation_has_nineteen_members() {
    assert_eq!(Relation::COUNT, 19);
    assert_eq!(Relation::ALL.len(), 19);
}

#[test]
fn fresh_node_passes_validation() {
    let node = Node::new("n1", NodeKind::Concept, "Gradient Descent");
    assert!(node.validate().is_ok());
}

#[test]
fn node_with_introduced_after_reinforced_fails_validation() {
    let mut node = Node::new("n1", NodeKind::Concept, "Attention");
    node.temporal.introduced_at = Utc::now() + Duration::days(1);
    node.temporal.last_reinforced_at = Utc::now();
    assert!(node.validate().is_err());
}

#[test]
fn unit_typed_fields_are_always_in_range() {
    let node = Node::new("n1", NodeKind::Algorithm, "Backprop");
    assert!(node.level.abstraction.value() >= 0.0 && node.level.abstraction.value() <= 1.0);
    assert!(node.cognitive_state.strength.value() >= 0.0);
    assert!(node.cognitive_state.confidence.value() <= 1.0);
}

#[test]
fn edge_rejects_empty_endpoints() {
    let edge = Edge::new("e1", "", "b", Relation::DependsOn);
    assert!(edge.validate().is_err());
}

#[test]
fn edge_with_valid_endpoints_passes() {
    let edge = Edge::new("e1", "a", "b", Relation::DependsOn);
    assert!(edge.validate().is_ok());
    assert_eq!(edge.relation, Relation::DependsOn);
}

#[test]
fn unit_new_clamps_out_of_range_inputs() {
    assert_eq!(Unit::new(2.0).value(), 1.0);
    assert_eq!(Unit::new(-1.0).value(), 0.0);
}
