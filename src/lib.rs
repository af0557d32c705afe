//! Path-addressable trees: arena-backed nodes, DFS/BFS traversal, and
//! box-drawing rendering.
//!
//! Nodes carry a name and an arbitrary payload and live in a generational
//! arena, addressed by [`NodeId`] handles. A [`Tree`] designates one node as
//! root and adds path-oriented construction, insertion and lookup on top of
//! the structural operations.
//!
//! ```
//! use rstree::{Tree, TraverseMethod};
//!
//! let mut tree: Tree = Tree::new("a");
//! tree.insert("a/b/c", None, true);
//! tree.insert("a/b/d", None, true);
//!
//! assert!(tree.contains("a/b/d"));
//! let c = tree.find("c").unwrap();
//! assert_eq!(tree.path(c).as_deref(), Some("a/b/c"));
//!
//! let names: Vec<_> = tree
//!     .traverse(tree.root(), TraverseMethod::BreadthFirst)
//!     .map(|(_, node)| node.name.clone())
//!     .collect();
//! assert_eq!(names, ["a", "b", "c", "d"]);
//!
//! println!("{}", tree.printout(None, None));
//! ```
//!
//! The tree provides no internal locking: traversal borrows the tree
//! shared, mutation exclusively, and callers serialize cross-thread use.

pub mod arena;
pub mod builder;
pub mod errors;
pub mod macros;
pub mod node;
pub mod render;
pub mod traverse;
pub mod tree;
pub mod util;

pub use arena::Tree;
pub use builder::Mapping;
pub use errors::{TreeError, TreeResult};
pub use node::{Node, NodeId};
pub use render::Renderer;
pub use traverse::{Traverse, TraverseMethod};
pub use tree::{GetAll, Query};
pub use util::path::PATH_SEP;
