//! Tests for instance tree construction and traversal.

use atelier_tree::{InstanceId, InstanceTree};

// ========== append_child ==========

#[test]
fn test_append_child_links_both_directions() {
    let mut tree = InstanceTree::new("Body");
    let child = tree.alloc("Box");

    assert!(tree.append_child(InstanceId::ROOT, child));

    assert_eq!(tree.children(InstanceId::ROOT), &[child]);
    assert_eq!(tree.parent(child), Some(InstanceId::ROOT));
}

#[test]
fn test_append_child_preserves_order() {
    let mut tree = InstanceTree::new("Body");
    let a = tree.alloc("Box");
    let b = tree.alloc("Heading");
    let c = tree.alloc("Paragraph");
    assert!(tree.append_child(InstanceId::ROOT, a));
    assert!(tree.append_child(InstanceId::ROOT, b));
    assert!(tree.append_child(InstanceId::ROOT, c));

    assert_eq!(tree.children(InstanceId::ROOT), &[a, b, c]);
}

#[test]
fn test_append_child_rejects_reattachment() {
    let mut tree = InstanceTree::new("Body");
    let a = tree.alloc("Box");
    let b = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, a));
    assert!(tree.append_child(InstanceId::ROOT, b));

    // b already has a parent
    assert!(!tree.append_child(a, b));
    assert_eq!(tree.parent(b), Some(InstanceId::ROOT));
}

#[test]
fn test_append_child_rejects_cycle() {
    let mut tree = InstanceTree::new("Body");
    let a = tree.alloc("Box");
    let b = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, a));
    assert!(tree.append_child(a, b));

    // Attaching an ancestor under its own descendant must fail
    assert!(!tree.append_child(b, a));
    assert!(!tree.append_child(a, a));
}

// ========== traversal ==========

#[test]
fn test_ancestors_from_leaf_to_root() {
    let mut tree = InstanceTree::new("Body");
    let section = tree.alloc("Box");
    let paragraph = tree.alloc("Paragraph");
    let span = tree.alloc("Text");
    assert!(tree.append_child(InstanceId::ROOT, section));
    assert!(tree.append_child(section, paragraph));
    assert!(tree.append_child(paragraph, span));

    let ancestors: Vec<_> = tree.ancestors(span).collect();
    assert_eq!(ancestors, vec![paragraph, section, InstanceId::ROOT]);
}

#[test]
fn test_selector_of_is_target_first() {
    let mut tree = InstanceTree::new("Body");
    let section = tree.alloc("Box");
    let paragraph = tree.alloc("Paragraph");
    assert!(tree.append_child(InstanceId::ROOT, section));
    assert!(tree.append_child(section, paragraph));

    assert_eq!(
        tree.selector_of(paragraph),
        vec![paragraph, section, InstanceId::ROOT]
    );
    assert_eq!(tree.selector_of(InstanceId::ROOT), vec![InstanceId::ROOT]);
}

#[test]
fn test_is_descendant_of() {
    let mut tree = InstanceTree::new("Body");
    let a = tree.alloc("Box");
    let b = tree.alloc("Box");
    assert!(tree.append_child(InstanceId::ROOT, a));
    assert!(tree.append_child(a, b));

    assert!(tree.is_descendant_of(b, InstanceId::ROOT));
    assert!(tree.is_descendant_of(b, a));
    assert!(!tree.is_descendant_of(a, b));
    assert!(!tree.is_descendant_of(a, a));
}

#[test]
fn test_component_lookup() {
    let mut tree = InstanceTree::new("Body");
    let heading = tree.alloc("Heading");
    assert!(tree.append_child(InstanceId::ROOT, heading));

    assert_eq!(tree.component(InstanceId::ROOT), Some("Body"));
    assert_eq!(tree.component(heading), Some("Heading"));
    assert_eq!(tree.component(InstanceId(99)), None);
}
