//! Error types for the partial-tree algorithm.

use std::fmt;

use crate::graph::VertexId;

/// Result type for partial-tree operations.
pub type MstResult<T> = Result<T, MstError>;

/// Errors raised by the tree list, the arc heap and the merge loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MstError {
    /// `remove_front` on a list holding no trees.
    EmptyList,

    /// No live tree has the root of `vertex`. Routine inside `execute`: the
    /// candidate arc is internal to the tree being grown.
    NotFound { vertex: VertexId },

    /// `delete_min` on an empty heap.
    EmptyQueue,

    /// A tree ran out of outgoing arcs while other trees were still waiting.
    DisconnectedGraph {
        /// Trees alive (including the exhausted one) when the loop gave up.
        components: usize,
        /// Arcs accepted before giving up.
        arcs_found: usize,
    },

    /// The tree's total weight does not fit the weight type.
    WeightOverflow { arcs: usize },
}

impl fmt::Display for MstError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyList => write!(f, "partial tree list is empty"),
            Self::NotFound { vertex } => {
                write!(f, "no partial tree contains vertex {}", vertex)
            }
            Self::EmptyQueue => write!(f, "arc queue is empty"),
            Self::DisconnectedGraph {
                components,
                arcs_found,
            } => {
                write!(
                    f,
                    "graph is disconnected: {} components still apart after {} arcs",
                    components, arcs_found
                )
            }
            Self::WeightOverflow { arcs } => {
                write!(f, "total weight of {} arcs overflows the weight type", arcs)
            }
        }
    }
}

impl std::error::Error for MstError {}
