//! Structural node operations: linking, cycle prevention, traversal and the
//! derived queries.

use rstest::{fixture, rstest};
use rstree::util::testing::init_test_setup;
use rstree::{NodeId, TraverseMethod, Tree, TreeError};

struct Network {
    tree: Tree,
    a: NodeId,
    b: NodeId,
    c: NodeId,
    d: NodeId,
    e: NodeId,
    f: NodeId,
}

// a
// ├── b
// │   └── d
// └── c
//     ├── e
//     └── f
#[fixture]
fn network() -> Network {
    init_test_setup();
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();
    let b = tree.node("b");
    let c = tree.node("c");
    let d = tree.node("d");
    let e = tree.node("e");
    let f = tree.node("f");
    tree.set_parent(b, Some(a), false).unwrap();
    tree.set_parent(c, Some(a), false).unwrap();
    tree.set_parent(d, Some(b), false).unwrap();
    tree.set_parent(e, Some(c), false).unwrap();
    tree.set_parent(f, Some(c), false).unwrap();
    Network {
        tree,
        a,
        b,
        c,
        d,
        e,
        f,
    }
}

fn names(tree: &Tree, ids: &[NodeId]) -> Vec<String> {
    ids.iter().map(|&id| tree[id].name.clone()).collect()
}

// ============================================================
// Linking
// ============================================================

#[test]
fn given_detached_node_when_setting_parent_then_both_links_are_updated() {
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();
    let b = tree.node("b");

    tree.set_parent(b, Some(a), false).unwrap();

    assert_eq!(tree[b].parent(), Some(a));
    assert!(tree[a].children().contains(&b));
}

#[test]
fn given_linked_node_when_setting_parent_to_none_then_both_links_are_cleared() {
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();
    let b = tree.node("b");
    tree.set_parent(b, Some(a), false).unwrap();

    tree.set_parent(b, None, false).unwrap();

    assert_eq!(tree[b].parent(), None);
    assert!(!tree[a].children().contains(&b));
}

#[test]
fn given_linked_node_when_reparenting_then_old_parent_loses_the_child() {
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();
    let b = tree.node("b");
    let c = tree.node("c");
    tree.set_parent(b, Some(a), false).unwrap();
    tree.set_parent(c, Some(a), false).unwrap();
    let d = tree.node("d");
    tree.set_parent(d, Some(b), false).unwrap();

    tree.set_parent(d, Some(c), false).unwrap();

    assert_eq!(tree[d].parent(), Some(c));
    assert!(!tree[b].children().contains(&d));
    assert!(tree[c].children().contains(&d));
}

#[test]
fn given_detached_node_when_unparenting_then_it_is_a_noop() {
    let mut tree: Tree = Tree::new("a");
    let b = tree.node("b");

    tree.unparent(b);
    tree.unparent(b);

    assert_eq!(tree[b].parent(), None);
}

// ============================================================
// Cycle prevention
// ============================================================

#[test]
fn given_any_node_when_parenting_to_itself_then_cycle_error() {
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();

    assert!(matches!(
        tree.set_parent(a, Some(a), false),
        Err(TreeError::Cycle { .. })
    ));
}

#[test]
fn given_parent_when_parenting_under_own_child_without_force_then_cycle_error() {
    let mut tree: Tree = Tree::new("a");
    let b = tree.node("b");
    let c = tree.node("c");
    tree.set_parent(c, Some(b), false).unwrap();

    assert!(matches!(
        tree.set_parent(b, Some(c), false),
        Err(TreeError::Cycle { .. })
    ));
    // the failed attempt leaves the structure untouched
    assert_eq!(tree[c].parent(), Some(b));
    assert!(tree[b].children().contains(&c));
}

#[test]
fn given_parent_when_parenting_under_own_child_with_force_then_relationship_reverses() {
    let mut tree: Tree = Tree::new("a");
    let a = tree.root();
    let b = tree.node("b");
    let c = tree.node("c");
    tree.set_parent(b, Some(a), false).unwrap();
    tree.set_parent(c, Some(b), false).unwrap();

    tree.set_parent(b, Some(c), true).unwrap();

    assert_eq!(tree[b].parent(), Some(c));
    assert!(tree[c].children().contains(&b));
    assert!(!tree[b].children().contains(&c));
    assert_eq!(tree[c].parent(), None);
}

// ============================================================
// Equality
// ============================================================

#[test]
fn given_two_nodes_when_comparing_then_payload_decides() {
    let mut tree: Tree = Tree::new("root");
    let n1 = tree.node("x");
    let n2 = tree.node("x");
    assert_eq!(tree[n1], tree[n2]);

    tree.get_node_mut(n2).unwrap().data = "y".to_string();
    assert_ne!(tree[n1], tree[n2]);

    tree.get_node_mut(n1).unwrap().data = "y".to_string();
    assert_eq!(tree[n1], tree[n2]);
}

// ============================================================
// Traversal
// ============================================================

#[rstest]
fn given_network_when_traversing_depth_first_then_preorder(network: Network) {
    let order: Vec<_> = network
        .tree
        .traverse(network.a, TraverseMethod::DepthFirst)
        .map(|(_, n)| n.name.clone())
        .collect();
    assert_eq!(order, ["a", "b", "d", "c", "e", "f"]);
}

#[rstest]
fn given_network_when_traversing_breadth_first_then_level_order(network: Network) {
    let order: Vec<_> = network
        .tree
        .traverse(network.a, TraverseMethod::BreadthFirst)
        .map(|(_, n)| n.name.clone())
        .collect();
    assert_eq!(order, ["a", "b", "c", "d", "e", "f"]);
}

#[rstest]
fn given_network_when_iterating_then_depth_first_from_root(network: Network) {
    let order: Vec<_> = (&network.tree)
        .into_iter()
        .map(|(id, _)| id)
        .collect();
    let expected = [
        network.a, network.b, network.d, network.c, network.e, network.f,
    ];
    assert_eq!(order, expected);
}

// ============================================================
// Derived queries
// ============================================================

#[rstest]
fn given_network_when_asking_root_of_then_topmost_ancestor(network: Network) {
    for id in [
        network.a, network.b, network.c, network.d, network.e, network.f,
    ] {
        assert_eq!(network.tree.root_of(id), Some(network.a));
    }
}

#[rstest]
fn given_network_when_asking_paths_then_slash_joined_names(network: Network) {
    let t = &network.tree;
    assert_eq!(t.path(network.a).as_deref(), Some("a"));
    assert_eq!(t.path(network.b).as_deref(), Some("a/b"));
    assert_eq!(t.path(network.c).as_deref(), Some("a/c"));
    assert_eq!(t.path(network.d).as_deref(), Some("a/b/d"));
    assert_eq!(t.path(network.e).as_deref(), Some("a/c/e"));
    assert_eq!(t.path(network.f).as_deref(), Some("a/c/f"));
}

#[rstest]
fn given_network_when_asking_siblings_then_self_excluded_in_order(network: Network) {
    let t = &network.tree;
    assert!(t.siblings(network.a).is_empty());
    assert_eq!(t.siblings(network.b), vec![network.c]);
    assert!(t.siblings(network.d).is_empty());
    assert_eq!(t.siblings(network.e), vec![network.f]);
    assert_eq!(t.siblings(network.f), vec![network.e]);
}

#[rstest]
fn given_network_when_asking_leaves_then_childless_in_depth_first_order(network: Network) {
    let t = &network.tree;
    assert_eq!(
        names(t, &t.leaves(network.a)),
        ["d", "e", "f"]
    );
    assert_eq!(names(t, &t.leaves(network.b)), ["d"]);
    assert_eq!(names(t, &t.leaves(network.d)), ["d"]);
    assert_eq!(names(t, &t.leaves(network.c)), ["e", "f"]);
}
