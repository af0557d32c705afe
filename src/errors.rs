use thiserror::Error;

/// Structural errors: invariant violations and malformed construction input
/// are hard errors; ordinary "not found" conditions stay soft (`Option` /
/// `bool` returns) except for the indexing operator, which reports its miss
/// here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("cannot parent '{child}' to '{parent}': would create a cycle")]
    Cycle { child: String, parent: String },

    #[error("multiple roots are forbidden: {0:?}")]
    MultipleRoots(Vec<String>),

    #[error("cannot get the node '{0}' inside the tree")]
    NotFound(String),

    #[error("nothing to build a tree from")]
    EmptyInput,

    #[error("stale node handle")]
    StaleHandle,
}

pub type TreeResult<T> = Result<T, TreeError>;
