// Library exports for partree
pub mod arc;
pub mod error;
pub mod graph;
pub mod min_heap;
pub mod mst;
pub mod partial_tree;
pub mod partial_tree_list;
pub mod union_find;

pub use error::{MstError, MstResult};
pub use graph::{Graph, GraphBuilder, VertexId, Weight};
pub use mst::{DisconnectPolicy, MinimumSpanningTree, MstConfig};
pub use partial_tree::PartialTree;
pub use partial_tree_list::PartialTreeList;
