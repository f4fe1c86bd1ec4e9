use super::{move_item, same_content, same_identity, Entry, ItemKind, Node, Section};
use crate::support::{item, item_with, Item};

#[test]
fn test_identity_ignores_content() {
    let a = item_with("a", "one");
    let b = item_with("a", "two");

    assert!(same_identity(&a, &b));
    assert!(!same_content(&a, &b));
}

#[test]
fn test_content_is_reflexive() {
    let a = item_with("a", "one");
    assert!(same_content(&a, &a));
    assert!(same_content(&a, &a.clone()));
}

#[test]
fn test_section_and_node_never_share_content() {
    let header: Entry<Item, Item> = Entry::Section {
        header: item("x"),
        collapsed: false,
    };
    let node: Entry<Item, Item> = Entry::Node { node: item("x") };

    assert!(same_identity(&header, &node));
    assert!(!same_content(&header, &node));
    assert_eq!(header.kind(), ItemKind::Section);
    assert_eq!(node.kind(), ItemKind::Node);
}

#[test]
fn test_collapse_state_is_part_of_header_content() {
    let open: Entry<Item, Item> = Entry::Section {
        header: item("s"),
        collapsed: false,
    };
    let closed: Entry<Item, Item> = Entry::Section {
        header: item("s"),
        collapsed: true,
    };
    assert!(!same_content(&open, &closed));
}

#[test]
fn test_section_builder() {
    let section = Section::new(item("s"), vec![item("n")])
        .collapsible(true)
        .collapsed_by_default(true);

    assert_eq!(section.key(), "s");
    assert!(section.can_be_collapsed);
    assert!(section.is_collapsed());
    assert_eq!(section.nodes[0].key(), "n");
}

#[test]
fn test_move_item_forward_and_back() {
    assert_eq!(move_item(vec![1, 2, 3, 4], 0, 2), vec![2, 3, 1, 4]);
    assert_eq!(move_item(vec![1, 2, 3, 4], 3, 1), vec![1, 4, 2, 3]);
}
