//! Node entity: identity handle, name, payload, and link state.

use std::fmt;

use generational_arena::Index;

/// Handle addressing a node inside a [`Tree`](crate::Tree)'s arena.
///
/// Handles are generational: once a node is removed, its handle goes stale
/// and no longer resolves, even if the arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// A node in the tree: a name, an arbitrary payload, a non-owning parent
/// back-reference and an ordered list of owned children.
///
/// Names are not required to be unique among siblings; name-based lookup
/// always returns the first match in child order.
#[derive(Debug, Clone)]
pub struct Node<D> {
    /// Node name, used as a path segment
    pub name: String,
    /// Payload; defaults to the name when synthesized by the tree's factory
    pub data: D,
    /// Parent handle, None for detached nodes and the root
    pub(crate) parent: Option<NodeId>,
    /// Child handles in insertion order
    pub(crate) children: Vec<NodeId>,
}

impl<D> Node<D> {
    pub(crate) fn new(name: &str, data: D) -> Self {
        Self {
            name: name.to_string(),
            data,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Nodes compare by payload, not by name or identity. This keeps
/// lookup-by-value working: a query node matches every tree node carrying
/// an equal payload.
impl<D: PartialEq> PartialEq for Node<D> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<D> fmt::Display for Node<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
