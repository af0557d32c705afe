//! Path-oriented tree API: insert, lookup, indexing, containment, printing.
//!
//! Everything here is built on the engine in [`crate::arena`] and the cursor
//! in [`crate::traverse`]. Path arguments use `/` as separator; leading and
//! trailing separators are stripped before segmentation. A path is only
//! accepted when its first segment equals the root's name — mismatches are
//! soft failures, never structural errors.

use std::fmt;

use tracing::instrument;

use crate::arena::Tree;
use crate::errors::{TreeError, TreeResult};
use crate::node::{Node, NodeId};
use crate::render::Renderer;
use crate::traverse::{Traverse, TraverseMethod};
use crate::util::path::{segments, PATH_SEP};

/// Lookup criterion for [`Tree::get_all`] and friends: match by name, or by
/// node-equality (payload comparison).
#[derive(Debug)]
pub enum Query<'a, D> {
    Name(&'a str),
    Data(&'a D),
}

impl<D> Clone for Query<'_, D> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<D> Copy for Query<'_, D> {}

impl<'a, D: PartialEq> Query<'a, D> {
    fn matches(&self, node: &Node<D>) -> bool {
        match self {
            Query::Name(name) => node.name == *name,
            Query::Data(data) => node.data == **data,
        }
    }
}

impl<'a, D> From<&'a str> for Query<'a, D> {
    fn from(name: &'a str) -> Self {
        Query::Name(name)
    }
}

impl<'a, D> From<&'a Node<D>> for Query<'a, D> {
    fn from(node: &'a Node<D>) -> Self {
        Query::Data(&node.data)
    }
}

/// Lazy matches of a [`Query`] over a subtree, in depth-first order.
pub struct GetAll<'a, D> {
    inner: Traverse<'a, D>,
    query: Query<'a, D>,
}

impl<'a, D: PartialEq> Iterator for GetAll<'a, D> {
    type Item = (NodeId, &'a Node<D>);

    fn next(&mut self) -> Option<Self::Item> {
        let query = self.query;
        self.inner.by_ref().find(|(_, node)| query.matches(node))
    }
}

impl<D> Tree<D> {
    /// Inserts along `path`, which must start with the root's name.
    ///
    /// Walks existing children segment by segment (first match wins among
    /// duplicate names). At the first unmatched segment: with `force`, nodes
    /// for every remaining segment are created through the tree's factory;
    /// without, the insert fails. An explicit `node` is attached under the
    /// final position regardless of `force`.
    ///
    /// Returns `false` instead of erroring on any unreachable path, and on
    /// a stale or cycling explicit `node`.
    #[instrument(level = "debug", skip(self))]
    pub fn insert(&mut self, path: &str, node: Option<NodeId>, force: bool) -> bool {
        let segs = segments(path);
        let Some((first, rest)) = segs.split_first() else {
            return false;
        };
        if self[self.root()].name != *first {
            return false;
        }
        let mut current = self.root();
        for seg in rest {
            match self.child_by_name(current, seg) {
                Some(child) => current = child,
                None if force => {
                    let created = self.node(seg);
                    self.link(created, current);
                    current = created;
                }
                None => return false,
            }
        }
        if let Some(explicit) = node {
            return self.set_parent(explicit, Some(current), false).is_ok();
        }
        true
    }

    /// All nodes in `start`'s subtree (default: the whole tree) matching the
    /// query, lazily, in depth-first order.
    pub fn get_all<'a>(
        &'a self,
        query: impl Into<Query<'a, D>>,
        start: Option<NodeId>,
    ) -> GetAll<'a, D> {
        GetAll {
            inner: self.traverse(start.unwrap_or(self.root()), TraverseMethod::DepthFirst),
            query: query.into(),
        }
    }

    /// First match of [`Tree::get_all`], or `None`.
    pub fn get<'a>(&'a self, query: impl Into<Query<'a, D>>, start: Option<NodeId>) -> Option<NodeId>
    where
        D: PartialEq,
    {
        self.get_all(query, start).next().map(|(id, _)| id)
    }

    /// Deterministic single-path walk: no traversal, just child matching
    /// per segment, first match wins. `None` when the path does not fully
    /// resolve or does not start with the root's name.
    #[instrument(level = "debug", skip(self))]
    pub fn get_by_path(&self, path: &str) -> Option<NodeId> {
        let segs = segments(path);
        let (first, rest) = segs.split_first()?;
        if self.get_node(self.root())?.name != *first {
            return None;
        }
        let mut current = self.root();
        for seg in rest {
            current = self.child_by_name(current, seg)?;
        }
        Some(current)
    }

    /// Resolves `key` as a full path first, then as a bare node name.
    ///
    /// This two-tier fallback backs the indexing operator; a miss on both
    /// tiers is the one lookup that surfaces as a hard error.
    pub fn find(&self, key: &str) -> TreeResult<NodeId>
    where
        D: PartialEq,
    {
        self.get_by_path(key)
            .or_else(|| self.get(key, None))
            .ok_or_else(|| TreeError::NotFound(key.to_string()))
    }

    /// Containment: a name containing the path separator resolves via
    /// [`Tree::get_by_path`], anything else via [`Tree::get`]. Never errors.
    pub fn contains<'a>(&'a self, query: impl Into<Query<'a, D>>) -> bool
    where
        D: PartialEq,
    {
        match query.into() {
            Query::Name(name) if name.contains(PATH_SEP) => self.get_by_path(name).is_some(),
            other => self.get(other, None).is_some(),
        }
    }

    /// Renders the subtree under `start` (default: the root) with the given
    /// renderer (default: the tree's configured one).
    pub fn printout(&self, start: Option<NodeId>, printer: Option<&Renderer<D>>) -> String {
        let start = start.unwrap_or(self.root());
        printer.unwrap_or(&self.printer).render(self, start)
    }

    /// The renderer used by default printing.
    pub fn printer(&self) -> &Renderer<D> {
        &self.printer
    }

    pub fn set_printer(&mut self, printer: Renderer<D>) {
        self.printer = printer;
    }
}

/// Indexing by path or bare name; panics on a miss, like a std map.
/// Use [`Tree::find`] for the non-panicking form.
impl<D: PartialEq> std::ops::Index<&str> for Tree<D> {
    type Output = Node<D>;

    fn index(&self, key: &str) -> &Node<D> {
        let id = self.find(key).unwrap_or_else(|e| panic!("{e}"));
        &self[id]
    }
}

impl<D> fmt::Display for Tree<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.printout(None, None))
    }
}
