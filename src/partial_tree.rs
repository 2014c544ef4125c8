use crate::arc::Arc;
use crate::graph::{Graph, VertexId, Weight};
use crate::min_heap::MinHeap;
use crate::union_find::Forest;
use std::fmt;

/// One connected component under construction: the root vertex that names
/// it in the forest, plus every arc seen leaving it so far.
///
/// Arcs whose far end has since been merged in stay queued; the merge loop
/// recognizes and drops them when they surface.
#[derive(Debug, Clone)]
pub struct PartialTree<W: Weight> {
    root: VertexId,
    arcs: MinHeap<Arc<W>>,
}

impl<W: Weight> PartialTree<W> {
    /// A singleton tree with nothing queued.
    pub fn new(root: VertexId) -> Self {
        PartialTree {
            root,
            arcs: MinHeap::new(),
        }
    }

    /// A singleton tree seeded with every arc incident to `root`.
    pub fn seeded(graph: &Graph<W>, root: VertexId) -> Self {
        let neighbors = graph.vertex(root).neighbors();
        let mut arcs = MinHeap::with_capacity(neighbors.len());
        arcs.extend(
            neighbors
                .iter()
                .map(|n| Arc::new(root, n.vertex, n.weight)),
        );
        PartialTree { root, arcs }
    }

    pub fn root(&self) -> VertexId {
        self.root
    }

    pub fn arcs(&self) -> &MinHeap<Arc<W>> {
        &self.arcs
    }

    pub fn arcs_mut(&mut self) -> &mut MinHeap<Arc<W>> {
        &mut self.arcs
    }

    /// Absorb `other`: its root is hung under ours and its arcs join our
    /// queue unfiltered.
    pub fn merge(&mut self, mut other: PartialTree<W>, forest: &mut Forest) {
        forest.union(other.root, self.root);
        self.arcs.append(&mut other.arcs);
    }
}

impl<W: Weight> fmt::Display for PartialTree<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root {} with {} queued arcs", self.root, self.arcs.len())?;
        if let Some(min) = self.arcs.peek_min() {
            write!(f, ", cheapest {}", min)?;
        }
        Ok(())
    }
}
