//! This crate defines a compact, flattened encoding of ordered forests
//! in depth-first pre-order, together with structural filtering by node
//! predicate that preserves ancestor-descendant relationships.
#![forbid(unsafe_code)]

pub mod depth;
pub mod error;
pub mod filter;
pub mod forest;
pub mod node_id;

#[rustfmt::skip]
pub use crate::{
    depth::Depth,
    error::{ForestError, ForestResult},
    filter::{filter, try_filter},
    forest::Forest,
    node_id::NodeId,
};
