use crate::graph::{Graph, VertexId, Weight};
use std::cmp::Ordering;
use std::fmt;

/// A weighted edge `v1 -- v2`, as queued by a partial tree and as reported
/// in the final tree.
///
/// `v1` is the endpoint that was inside the queuing tree when the arc was
/// seeded; `v2` is the endpoint the merge loop tries to reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arc<W> {
    pub v1: VertexId,
    pub v2: VertexId,
    pub weight: W,
}

impl<W: Weight> Arc<W> {
    pub fn new(v1: VertexId, v2: VertexId, weight: W) -> Self {
        Arc { v1, v2, weight }
    }

    /// Render with vertex names from `graph`, e.g. `{A B 5}`.
    pub fn display<'a>(&'a self, graph: &'a Graph<W>) -> ArcDisplay<'a, W> {
        ArcDisplay { arc: self, graph }
    }
}

// Weight first so the heap pops the cheapest arc; endpoints only break ties.
impl<W: Weight> Ord for Arc<W> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.v1.cmp(&other.v1))
            .then_with(|| self.v2.cmp(&other.v2))
    }
}

impl<W: Weight> PartialOrd for Arc<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<W: Weight> fmt::Display for Arc<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{} {} {}}}", self.v1, self.v2, self.weight)
    }
}

pub struct ArcDisplay<'a, W> {
    arc: &'a Arc<W>,
    graph: &'a Graph<W>,
}

impl<W: Weight> fmt::Display for ArcDisplay<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{} {} {}}}",
            self.graph.name_of(self.arc.v1),
            self.graph.name_of(self.arc.v2),
            self.arc.weight
        )
    }
}
