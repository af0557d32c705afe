//! Bulk tree construction from nested mapping literals and path strings.

use tracing::instrument;

use crate::arena::Tree;
use crate::errors::{TreeError, TreeResult};
use crate::node::NodeId;
use crate::util::path::segments;

/// Nested construction literal: a bare name, or a name with children.
///
/// The [`mapping!`](crate::mapping) macro writes these in the shape of the
/// construction input, e.g.
/// `mapping!("a" => ["b" => ["c", "d"], "e" => ["i", "g"]])`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mapping {
    Name(String),
    Branch(String, Vec<Mapping>),
}

impl Mapping {
    pub fn name(&self) -> &str {
        match self {
            Mapping::Name(name) => name,
            Mapping::Branch(name, _) => name,
        }
    }
}

impl<D: for<'s> From<&'s str>> Tree<D> {
    /// Builds a tree from a document of top-level mapping entries.
    ///
    /// Exactly one top-level entry is required: it becomes the root, its
    /// nested entries become the subtree in document order. More than one
    /// entry fails with [`TreeError::MultipleRoots`], an empty document with
    /// [`TreeError::EmptyInput`].
    #[instrument(level = "debug")]
    pub fn from_mapping(doc: &[Mapping]) -> TreeResult<Self> {
        match doc {
            [] => Err(TreeError::EmptyInput),
            [root] => {
                let mut tree = Tree::new(root.name());
                if let Mapping::Branch(_, children) = root {
                    let root_id = tree.root();
                    for child in children {
                        tree.graft(root_id, child);
                    }
                }
                Ok(tree)
            }
            many => Err(TreeError::MultipleRoots(
                many.iter().map(|m| m.name().to_string()).collect(),
            )),
        }
    }

    /// Builds a straight-line chain tree from a slash-delimited path: the
    /// first segment is the root, each further segment the sole child of
    /// the previous one.
    #[instrument(level = "debug")]
    pub fn from_path(path: &str) -> TreeResult<Self> {
        let segs = segments(path);
        let Some((first, rest)) = segs.split_first() else {
            return Err(TreeError::EmptyInput);
        };
        let mut tree = Tree::new(first);
        let mut current = tree.root();
        for seg in rest {
            let child = tree.node(seg);
            tree.link(child, current);
            current = child;
        }
        Ok(tree)
    }
}

impl<D> Tree<D> {
    fn graft(&mut self, parent: NodeId, entry: &Mapping) {
        let id = self.node(entry.name());
        self.link(id, parent);
        if let Mapping::Branch(_, children) = entry {
            for child in children {
                self.graft(id, child);
            }
        }
    }
}
