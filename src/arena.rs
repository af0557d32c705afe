//! Arena-backed tree engine.
//!
//! All nodes of a tree live in one generational arena and are addressed by
//! [`NodeId`] handles. Each node stores a non-owning parent handle and an
//! owned, ordered list of child handles, so parent link and child-list
//! membership can be kept mutually consistent by every mutation.

use generational_arena::Arena;
use itertools::Itertools;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};
use crate::node::{Node, NodeId};
use crate::render::Renderer;
use crate::util::path::PATH_SEP;

/// Arena-based tree with a designated root node.
///
/// The root is created together with the tree and cannot be removed. Because
/// nodes are arena slots, node-level operations are methods on the tree
/// taking a [`NodeId`].
///
/// `D` is the node payload type; see [`Tree::with_factory`] for injecting a
/// payload factory at construction instead of choosing `D` statically.
///
/// The tree is a plain shared mutable structure: traversal borrows `&self`
/// and mutation `&mut self`, so structural mutation during an in-progress
/// traversal is rejected at compile time rather than guarded at runtime.
#[derive(Debug, Clone)]
pub struct Tree<D = String> {
    /// Arena storage for all tree nodes
    pub(crate) arena: Arena<Node<D>>,
    /// Handle of the designated root node
    pub(crate) root: NodeId,
    /// Renderer used by default printing
    pub(crate) printer: Renderer<D>,
    /// Produces payloads for nodes synthesized from a bare name
    pub(crate) factory: fn(&str) -> D,
}

fn from_name<D: for<'s> From<&'s str>>(name: &str) -> D {
    D::from(name)
}

impl<D: for<'s> From<&'s str>> Tree<D> {
    /// Creates a tree whose root carries `name`, with the payload derived
    /// from the name via `D::from`.
    pub fn new(name: &str) -> Self {
        Self::with_factory(name, from_name::<D>)
    }
}

impl<D> Tree<D> {
    /// Creates a tree with an explicit payload factory.
    ///
    /// The factory is used wherever a node must be synthesized from a bare
    /// name: the root itself, [`Tree::node`], and the nodes created by
    /// forced path insertion. Two trees built with the same payload type
    /// share one concrete tree type regardless of the factory they carry.
    pub fn with_factory(name: &str, factory: fn(&str) -> D) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(Node::new(name, factory(name))));
        Self {
            arena,
            root,
            printer: Renderer::new(),
            factory,
        }
    }

    /// Handle of the root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes in the arena, detached nodes included.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// A tree always holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node<D>> {
        self.arena.get(id.0)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node<D>> {
        self.arena.get_mut(id.0)
    }

    /// Allocates a detached node, deriving its payload through the tree's
    /// factory. Attach it with [`Tree::set_parent`].
    #[instrument(level = "trace", skip(self))]
    pub fn node(&mut self, name: &str) -> NodeId {
        let data = (self.factory)(name);
        self.node_with_data(name, data)
    }

    /// Allocates a detached node with an explicit payload.
    #[instrument(level = "trace", skip(self, data))]
    pub fn node_with_data(&mut self, name: &str, data: D) -> NodeId {
        NodeId(self.arena.insert(Node::new(name, data)))
    }

    /// Attaches `node` under `parent`.
    ///
    /// Fails with [`TreeError::Cycle`] if `parent` is the node itself, or if
    /// `parent` lies in the node's own subtree and `force` is not set. With
    /// `force`, the offending descendant is first detached, then the new
    /// link is made. Passing `None` is equivalent to [`Tree::unparent`].
    ///
    /// A node attached elsewhere is detached from its current parent first,
    /// so parent link and child lists stay consistent.
    #[instrument(level = "trace", skip(self))]
    pub fn set_parent(
        &mut self,
        node: NodeId,
        parent: Option<NodeId>,
        force: bool,
    ) -> TreeResult<()> {
        let Some(parent_id) = parent else {
            self.unparent(node);
            return Ok(());
        };
        if self.get_node(node).is_none() || self.get_node(parent_id).is_none() {
            return Err(TreeError::StaleHandle);
        }
        if node == parent_id {
            return Err(self.cycle_error(node, parent_id));
        }
        if self.is_ancestor(node, parent_id) {
            if !force {
                return Err(self.cycle_error(node, parent_id));
            }
            self.unparent(parent_id);
        }
        self.unparent(node);
        self.link(node, parent_id);
        Ok(())
    }

    /// Removes the node from its parent's children and clears the parent
    /// link. No-op when the node is already detached or the handle is stale.
    #[instrument(level = "trace", skip(self))]
    pub fn unparent(&mut self, id: NodeId) {
        let Some(parent_id) = self.get_node(id).and_then(|n| n.parent) else {
            return;
        };
        if let Some(parent) = self.arena.get_mut(parent_id.0) {
            parent.children.retain(|&c| c != id);
        }
        if let Some(node) = self.arena.get_mut(id.0) {
            node.parent = None;
        }
    }

    /// Detaches the node and reclaims its whole subtree from the arena,
    /// returning the number of nodes removed. Handles into the removed
    /// subtree go stale. Removing the root is refused and returns 0.
    #[instrument(level = "debug", skip(self))]
    pub fn remove(&mut self, id: NodeId) -> usize {
        if id == self.root || self.get_node(id).is_none() {
            return 0;
        }
        self.unparent(id);
        let subtree: Vec<NodeId> = self
            .traverse(id, crate::traverse::TraverseMethod::DepthFirst)
            .map(|(i, _)| i)
            .collect();
        for i in &subtree {
            let _ = self.arena.remove(i.0);
        }
        subtree.len()
    }

    /// Walks parent links to the topmost ancestor; the node itself when
    /// detached.
    pub fn root_of(&self, id: NodeId) -> Option<NodeId> {
        let mut current = id;
        let mut node = self.get_node(current)?;
        while let Some(parent) = node.parent {
            current = parent;
            node = self.get_node(current)?;
        }
        Some(current)
    }

    /// Slash-joined names from the topmost ancestor to this node inclusive;
    /// a single segment for the root itself.
    #[instrument(level = "trace", skip(self))]
    pub fn path(&self, id: NodeId) -> Option<String> {
        let mut names = Vec::new();
        let mut node = self.get_node(id)?;
        names.push(node.name.as_str());
        while let Some(parent) = node.parent {
            node = self.get_node(parent)?;
            names.push(node.name.as_str());
        }
        Some(names.iter().rev().join(PATH_SEP))
    }

    /// The parent's children excluding this node, in child order; empty for
    /// detached nodes.
    pub fn siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent_id) = self.get_node(id).and_then(|n| n.parent) else {
            return Vec::new();
        };
        self.get_node(parent_id)
            .map(|p| p.children.iter().copied().filter(|&c| c != id).collect())
            .unwrap_or_default()
    }

    /// First child of `parent` named `name`, in child order.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.get_node(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.get_node(c).is_some_and(|n| n.name == name))
    }

    /// Height of the tree measured from the root (a lone root has depth 1).
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.calculate_depth(self.root)
    }

    fn calculate_depth(&self, id: NodeId) -> usize {
        if let Some(node) = self.get_node(id) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// True when `ancestor` lies strictly above `id` on the parent chain.
    fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut current = self.get_node(id).and_then(|n| n.parent);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.get_node(parent).and_then(|n| n.parent);
        }
        false
    }

    /// Raw link, no checks. Callers uphold the cycle and consistency
    /// invariants.
    pub(crate) fn link(&mut self, child: NodeId, parent: NodeId) {
        if let Some(node) = self.arena.get_mut(child.0) {
            node.parent = Some(parent);
        }
        if let Some(p) = self.arena.get_mut(parent.0) {
            p.children.push(child);
        }
    }

    fn cycle_error(&self, child: NodeId, parent: NodeId) -> TreeError {
        TreeError::Cycle {
            child: self
                .get_node(child)
                .map(|n| n.name.clone())
                .unwrap_or_default(),
            parent: self
                .get_node(parent)
                .map(|n| n.name.clone())
                .unwrap_or_default(),
        }
    }
}

impl<D> std::ops::Index<NodeId> for Tree<D> {
    type Output = Node<D>;

    /// Panics on a stale handle, like indexing into a std map.
    fn index(&self, id: NodeId) -> &Node<D> {
        self.get_node(id).expect("stale node handle")
    }
}

impl<D> std::ops::IndexMut<NodeId> for Tree<D> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<D> {
        self.get_node_mut(id).expect("stale node handle")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a
    // ├── b
    // │   └── d
    // └── c
    fn small_tree() -> (Tree, NodeId, NodeId, NodeId) {
        let mut tree: Tree = Tree::new("a");
        let b = tree.node("b");
        let c = tree.node("c");
        let d = tree.node("d");
        tree.set_parent(b, Some(tree.root()), false).unwrap();
        tree.set_parent(c, Some(tree.root()), false).unwrap();
        tree.set_parent(d, Some(b), false).unwrap();
        (tree, b, c, d)
    }

    #[test]
    fn test_set_parent_links_both_directions() {
        let (tree, b, _, _) = small_tree();
        assert_eq!(tree[b].parent(), Some(tree.root()));
        assert!(tree[tree.root()].children().contains(&b));
    }

    #[test]
    fn test_set_parent_rejects_self() {
        let mut tree: Tree = Tree::new("a");
        let root = tree.root();
        let err = tree.set_parent(root, Some(root), false);
        assert!(matches!(err, Err(TreeError::Cycle { .. })));
    }

    #[test]
    fn test_set_parent_rejects_descendant_without_force() {
        let (mut tree, b, _, d) = small_tree();
        let root = tree.root();
        // d sits two levels below the root
        assert!(matches!(
            tree.set_parent(root, Some(d), false),
            Err(TreeError::Cycle { .. })
        ));
        assert!(matches!(
            tree.set_parent(b, Some(d), false),
            Err(TreeError::Cycle { .. })
        ));
    }

    #[test]
    fn test_reparent_detaches_from_old_parent() {
        let (mut tree, b, c, d) = small_tree();
        tree.set_parent(d, Some(c), false).unwrap();
        assert_eq!(tree[d].parent(), Some(c));
        assert!(!tree[b].children().contains(&d));
        assert!(tree[c].children().contains(&d));
    }

    #[test]
    fn test_unparent_is_noop_when_detached() {
        let mut tree: Tree = Tree::new("a");
        let b = tree.node("b");
        tree.unparent(b);
        assert_eq!(tree[b].parent(), None);
        let root = tree.root();
        tree.unparent(root);
        assert_eq!(tree[root].parent(), None);
    }

    #[test]
    fn test_remove_reclaims_subtree_but_not_root() {
        let (mut tree, b, c, d) = small_tree();
        assert_eq!(tree.remove(tree.root()), 0);
        assert_eq!(tree.remove(b), 2);
        assert!(tree.get_node(b).is_none());
        assert!(tree.get_node(d).is_none());
        assert!(tree.get_node(c).is_some());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_depth_and_child_by_name() {
        let (tree, b, _, _) = small_tree();
        assert_eq!(tree.depth(), 3);
        assert_eq!(tree.child_by_name(tree.root(), "b"), Some(b));
        assert_eq!(tree.child_by_name(tree.root(), "x"), None);
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let (mut tree, b, c, _) = small_tree();
        tree.remove(b);
        assert!(matches!(
            tree.set_parent(b, Some(c), false),
            Err(TreeError::StaleHandle)
        ));
        assert!(matches!(
            tree.set_parent(c, Some(b), false),
            Err(TreeError::StaleHandle)
        ));
    }
}
