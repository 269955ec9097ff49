use crate::Depth;

pub type ForestResult<T> = Result<T, ForestError>;

#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    displaydoc::Display,
    thiserror::Error,
)]
pub enum ForestError {
    /// The ID sequence has {ids} entries but the depth sequence has {depths}.
    MismatchedLengths { ids: usize, depths: usize },
    /// Index {index} is out of range for a forest of {size} nodes.
    IndexOutOfRange { index: usize, size: usize },
    /// Depth {next} at position {index} cannot follow depth {prev}.
    DepthJump { index: usize, prev: Depth, next: Depth },
    /// A forest cannot start at depth {depth}.
    OrphanRoot { depth: Depth },
}
