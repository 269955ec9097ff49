//! A [`Forest`] stores an arbitrary ordered forest (an ordered collection
//! of ordered trees) as a pair of arrays indexed by depth-first pre-order
//! traversal position.  A node is represented by a [`NodeId`]; parent-child
//! relationships are implied by array position and the associated [`Depth`]
//! rather than stored as pointers.

use crate::{
    depth::Depth,
    error::{ForestError, ForestResult},
    node_id::NodeId,
};
use itertools::Itertools;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;
use std::ops::Range;

#[macro_export]
/// Declaratively construct [`Forest`] instances, one parenthesized
/// `(id, child, child, ...)` group per tree; nesting mirrors tree shape.
macro_rules! forest {
    (
        $(
            ($id:expr $(, $($children:tt),+)?)
        ),*
        $(,)?
    ) => {{ #[allow(redundant_semicolons, unused)] {
        let mut node_ids: ::std::vec::Vec<$crate::NodeId> = ::std::vec::Vec::new();
        let mut depths: ::std::vec::Vec<$crate::Depth> = ::std::vec::Vec::new();
        $(
            $crate::forest_node! {
                [into node_ids, depths] 0u32; ($id $(, $($children),+)?)
            }
        )* ;
        $crate::Forest::new(node_ids, depths)
            .expect("forest! pushes one ID and one depth per node")
    }}};
}

pub use forest;

#[doc(hidden)]
#[macro_export]
// A "placement in" variant of the `forest!{}` macro: pushes a single node
// at `$depth` into the accumulator vectors, then recurses per child.
macro_rules! forest_node {
    (
        [into $node_ids:ident, $depths:ident]
        $depth:expr;
        ($id:expr $(, $($children:tt),+)?)
    ) => {{
        $node_ids.push($crate::NodeId::from($id));
        $depths.push($crate::Depth::from($depth));
        $(
            $(
                $crate::forest_node! {
                    [into $node_ids, $depths] $depth + 1; $children
                }
            )+
        )? ;
    }};
}

/// An immutable forest, flattened in depth-first pre-order.
///
/// Tree roots have depth 0, their immediate children depth 1, and so on.
/// If the depth of a node is `D`, the depth of the next node in the array
/// can be:
///
///   - `D + 1` if the next node is a child of this node;
///   - `D` if the next node is a sibling of this node;
///   - `d < D`, in which case the next node is not related to this node.
///
/// For example:
///
/// ```text
/// node_ids: 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11
/// depths:   0, 1, 2, 3, 1, 0, 1, 0, 1,  1,  2
/// ```
///
/// encodes the forest
///
/// ```text
/// 1
/// - 2
/// - - 3
/// - - - 4
/// - 5
/// 6
/// - 7
/// 8
/// - 9
/// - 10
/// - - 11
/// ```
///
/// where the depth of each node equals its number of hyphens.
///
/// A `Forest` is never mutated after construction; operations that derive
/// a new shape (see [`filter`](crate::filter())) allocate a new `Forest`
/// and leave the original untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Forest {
    node_ids: Vec<NodeId>,
    depths: Vec<Depth>,
}

impl Forest {
    /// Build a forest from an ID sequence and a depth sequence in
    /// depth-first pre-order.
    ///
    /// Fails with [`ForestError::MismatchedLengths`] when the two
    /// sequences differ in length.  The depth-adjacency invariant is
    /// deliberately *not* checked here; layering strictness on top is
    /// what [`Forest::validate`] is for.
    pub fn new<I, D>(node_ids: I, depths: D) -> ForestResult<Self>
    where
        I: IntoIterator,
        I::Item: Into<NodeId>,
        D: IntoIterator,
        D::Item: Into<Depth>,
    {
        let node_ids: Vec<NodeId> = node_ids.into_iter().map(Into::into).collect();
        let depths: Vec<Depth> = depths.into_iter().map(Into::into).collect();
        if node_ids.len() != depths.len() {
            return Err(ForestError::MismatchedLengths {
                ids: node_ids.len(),
                depths: depths.len(),
            });
        }
        Ok(Self { node_ids, depths })
    }

    // Infallible in-crate constructor for callers that produce the two
    // vectors in lockstep.
    pub(crate) fn from_parts(node_ids: Vec<NodeId>, depths: Vec<Depth>) -> Self {
        debug_assert_eq!(node_ids.len(), depths.len());
        Self { node_ids, depths }
    }

    /// The number of nodes; 0 for an empty forest.
    #[inline]
    pub fn size(&self) -> usize {
        self.depths.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }

    /// The ID of the node at pre-order position `index`.
    ///
    /// Fails with [`ForestError::IndexOutOfRange`] outside `[0, size())`.
    #[inline]
    pub fn node_id(&self, index: usize) -> ForestResult<NodeId> {
        self.node_ids
            .get(index)
            .copied()
            .ok_or(ForestError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// The depth of the node at pre-order position `index`.
    ///
    /// Fails with [`ForestError::IndexOutOfRange`] outside `[0, size())`.
    #[inline]
    pub fn depth(&self, index: usize) -> ForestResult<Depth> {
        self.depths
            .get(index)
            .copied()
            .ok_or(ForestError::IndexOutOfRange {
                index,
                size: self.size(),
            })
    }

    /// The ID sequence, in pre-order.
    #[inline]
    pub fn node_ids(&self) -> &[NodeId] {
        &self.node_ids
    }

    /// The depth sequence, in pre-order.
    #[inline]
    pub fn depths(&self) -> &[Depth] {
        &self.depths
    }

    #[inline(always)]
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NodeId, Depth)> + '_ {
        self.node_ids
            .iter()
            .copied()
            .zip(self.depths.iter().copied())
    }

    /// Check the structural invariant that construction leaves unchecked:
    /// the first node must be a tree root, and the depth may grow by at
    /// most 1 between adjacent positions.  A deeper jump has no valid
    /// parent and is reported as [`ForestError::DepthJump`].
    pub fn validate(&self) -> ForestResult<()> {
        if let Some(&first) = self.depths.first() {
            if first != Depth::ROOT {
                return Err(ForestError::OrphanRoot { depth: first });
            }
        }
        for (index, pair) in self.depths.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if next > prev + 1 {
                return Err(ForestError::DepthJump {
                    index: index + 1,
                    prev,
                    next,
                });
            }
        }
        Ok(())
    }

    /// One past the last position of the subtree rooted at `index`, i.e.
    /// the first subsequent position whose depth is `<=` the depth at
    /// `index`, or `size()` if the subtree runs to the end.
    ///
    /// Panics when `index >= size()`.
    pub fn subtree_end(&self, index: usize) -> usize {
        let depth = self.depths[index];
        match self.depths[index + 1..].iter().position(|&d| d <= depth) {
            Some(offset) => index + 1 + offset,
            None => self.size(),
        }
    }

    /// The position of the parent of the node at `index`, or `None` for
    /// a tree root.
    ///
    /// Panics when `index >= size()`.
    pub fn parent(&self, index: usize) -> Option<usize> {
        let depth = self.depths[index];
        if depth == Depth::ROOT {
            return None;
        }
        (0..index).rev().find(|&i| self.depths[i] < depth)
    }

    /// The positions of the immediate children of the node at `index`,
    /// in order.
    ///
    /// Panics when `index >= size()`.
    pub fn children(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        let child_depth = self.depths[index] + 1;
        (index + 1..self.subtree_end(index)).filter(move |&i| self.depths[i] == child_depth)
    }

    /// The positions of all descendants of the node at `index`: the
    /// subtree rooted there, minus the node itself.
    ///
    /// Panics when `index >= size()`.
    #[inline]
    pub fn descendants(&self, index: usize) -> Range<usize> {
        index + 1..self.subtree_end(index)
    }

    /// The positions of the tree roots, in order.
    pub fn roots(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.size()).filter(|&i| self.depths[i] == Depth::ROOT)
    }
}

/// Renders as `[id1:depth1, id2:depth2, ...]`.
///
/// The rendering is deterministic and covers the full observable state,
/// so two forests are equal by value iff their renderings are equal.
impl fmt::Display for Forest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let entries = self
            .iter()
            .map(|(node_id, depth)| format!("{node_id}:{depth}"))
            .join(", ");
        write!(f, "[{entries}]")
    }
}

// Manual impl so that deserialization re-runs the equal-length check
// instead of smuggling in a forest that `Forest::new` would reject.
impl<'de> Deserialize<'de> for Forest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            node_ids: Vec<NodeId>,
            depths: Vec<Depth>,
        }

        let Raw { node_ids, depths } = Raw::deserialize(deserializer)?;
        Forest::new(node_ids, depths).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rustfmt::skip]
    fn doc_example() -> ForestResult<Forest> {
        Forest::new(
            [1i64, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            [0u32, 1, 2, 3, 1, 0, 1, 0, 1, 1,  2],
        )
    }

    #[test]
    fn new_rejects_mismatched_lengths() {
        let result = Forest::new([1i64, 2, 3], [0u32, 1]);
        assert_eq!(
            result,
            Err(ForestError::MismatchedLengths { ids: 3, depths: 2 })
        );
    }

    #[test]
    fn empty_forest() -> ForestResult<()> {
        let forest = Forest::default();
        assert_eq!(forest.size(), 0);
        assert!(forest.is_empty());
        assert_eq!(forest.to_string(), "[]");
        assert_eq!(forest, Forest::new(Vec::<i64>::new(), Vec::<u32>::new())?);
        Ok(())
    }

    #[test]
    fn accessors() -> ForestResult<()> {
        let forest = doc_example()?;
        assert_eq!(forest.size(), 11);
        assert_eq!(forest.node_id(0)?, NodeId::from(1));
        assert_eq!(forest.node_id(10)?, NodeId::from(11));
        assert_eq!(forest.depth(3)?, Depth::from(3));
        assert_eq!(forest.depth(10)?, Depth::from(2));
        Ok(())
    }

    #[test]
    fn accessors_reject_out_of_range_index() -> ForestResult<()> {
        let forest = doc_example()?;
        let expected = ForestError::IndexOutOfRange {
            index: 11,
            size: 11,
        };
        assert_eq!(forest.node_id(11), Err(expected.clone()));
        assert_eq!(forest.depth(11), Err(expected));
        Ok(())
    }

    #[test]
    fn display_renders_ids_and_depths() -> ForestResult<()> {
        let forest = Forest::new([1i64, 2, 3], [0u32, 1, 1])?;
        assert_eq!(forest.to_string(), "[1:0, 2:1, 3:1]");
        Ok(())
    }

    #[test]
    fn validate_accepts_well_formed_forests() -> ForestResult<()> {
        doc_example()?.validate()?;
        Forest::default().validate()?;
        Ok(())
    }

    #[test]
    fn validate_rejects_depth_jump() -> ForestResult<()> {
        let forest = Forest::new([1i64, 2, 3], [0u32, 2, 0])?;
        assert_eq!(
            forest.validate(),
            Err(ForestError::DepthJump {
                index: 1,
                prev: Depth::from(0),
                next: Depth::from(2),
            })
        );
        Ok(())
    }

    #[test]
    fn validate_rejects_orphan_root() -> ForestResult<()> {
        let forest = Forest::new([1i64, 2], [1u32, 1])?;
        assert_eq!(
            forest.validate(),
            Err(ForestError::OrphanRoot {
                depth: Depth::from(1)
            })
        );
        Ok(())
    }

    #[test]
    fn subtree_end_covers_whole_subtrees() -> ForestResult<()> {
        let forest = doc_example()?;
        assert_eq!(forest.subtree_end(0), 5); // tree rooted at node 1
        assert_eq!(forest.subtree_end(1), 4); // node 2 and its chain
        assert_eq!(forest.subtree_end(4), 5); // leaf node 5
        assert_eq!(forest.subtree_end(7), 11); // last tree runs to the end
        assert_eq!(forest.subtree_end(10), 11); // trailing leaf
        Ok(())
    }

    #[test]
    fn parent_positions() -> ForestResult<()> {
        let forest = doc_example()?;
        assert_eq!(forest.parent(0), None);
        assert_eq!(forest.parent(3), Some(2));
        assert_eq!(forest.parent(4), Some(0));
        assert_eq!(forest.parent(7), None);
        assert_eq!(forest.parent(10), Some(9));
        Ok(())
    }

    #[test]
    fn child_positions() -> ForestResult<()> {
        let forest = doc_example()?;
        let children: Vec<_> = forest.children(0).collect();
        assert_eq!(children, [1, 4]);
        let children: Vec<_> = forest.children(7).collect();
        assert_eq!(children, [8, 9]);
        assert_eq!(forest.children(3).count(), 0);
        Ok(())
    }

    #[test]
    fn descendant_positions() -> ForestResult<()> {
        let forest = doc_example()?;
        assert_eq!(forest.descendants(0), 1..5);
        assert_eq!(forest.descendants(9), 10..11);
        assert!(forest.descendants(4).is_empty());
        Ok(())
    }

    #[test]
    fn root_positions() -> ForestResult<()> {
        let forest = doc_example()?;
        let roots: Vec<_> = forest.roots().collect();
        assert_eq!(roots, [0, 5, 7]);
        Ok(())
    }

    #[test]
    fn forest_macro_builds_the_doc_example() -> ForestResult<()> {
        let forest = forest![
            (1, (2, (3, (4))), (5)),
            (6, (7)),
            (8, (9), (10, (11))),
        ];
        assert_eq!(forest, doc_example()?);
        Ok(())
    }

    #[test]
    fn forest_macro_builds_the_empty_forest() {
        let forest = forest![];
        assert!(forest.is_empty());
    }

    #[test]
    fn serde_round_trip() -> ForestResult<()> {
        let forest = doc_example()?;
        let json = serde_json::to_string(&forest).unwrap();
        let back: Forest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, forest);
        Ok(())
    }

    #[test]
    fn deserialize_rejects_mismatched_lengths() {
        let json = r#"{"node_ids": [1, 2, 3], "depths": [0, 1]}"#;
        let result: Result<Forest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
