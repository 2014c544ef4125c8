//! Configuration and output of the merge loop.

use crate::arc::Arc;
use crate::error::{MstError, MstResult};
use crate::graph::{Graph, Weight};
use std::fmt;
use std::str::FromStr;

/// What `execute` does when a tree runs out of outgoing arcs while other
/// trees are still waiting to be merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisconnectPolicy {
    /// Stop with `MstError::DisconnectedGraph`.
    #[default]
    Error,
    /// Drop the exhausted tree and keep merging the rest, yielding a
    /// spanning forest with fewer than `n - 1` arcs.
    Forest,
}

impl FromStr for DisconnectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "error" => Ok(DisconnectPolicy::Error),
            "forest" => Ok(DisconnectPolicy::Forest),
            _ => Err(format!(
                "Invalid disconnect policy '{}'. Use: error or forest",
                s
            )),
        }
    }
}

impl fmt::Display for DisconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisconnectPolicy::Error => write!(f, "error"),
            DisconnectPolicy::Forest => write!(f, "forest"),
        }
    }
}

/// Settings for a run of the merge loop.
#[derive(Debug, Clone, Default)]
pub struct MstConfig {
    pub disconnect_policy: DisconnectPolicy,
}

impl MstConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_disconnect_policy(mut self, policy: DisconnectPolicy) -> Self {
        self.disconnect_policy = policy;
        self
    }
}

/// Arcs accepted by the merge loop, in the order they were found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinimumSpanningTree<W> {
    arcs: Vec<Arc<W>>,
}

impl<W: Weight> MinimumSpanningTree<W> {
    pub fn new(arcs: Vec<Arc<W>>) -> Self {
        MinimumSpanningTree { arcs }
    }

    pub fn arcs(&self) -> &[Arc<W>] {
        &self.arcs
    }

    pub fn into_arcs(self) -> Vec<Arc<W>> {
        self.arcs
    }

    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// Sum of the arc weights, or `WeightOverflow` when it does not fit `W`.
    pub fn total_weight(&self) -> MstResult<W> {
        self.arcs
            .iter()
            .try_fold(W::default(), |acc, arc| acc.checked_add(arc.weight))
            .ok_or(MstError::WeightOverflow {
                arcs: self.arcs.len(),
            })
    }

    /// True when the arcs could span `vertex_count` vertices, i.e. nothing
    /// was dropped as disconnected.
    pub fn spans(&self, vertex_count: usize) -> bool {
        self.arcs.len() + 1 == vertex_count.max(1)
    }

    /// One named arc per line, then the total weight. Fails up front when
    /// the total overflows.
    pub fn report<'a>(&'a self, graph: &'a Graph<W>) -> MstResult<Report<'a, W>> {
        let total = self.total_weight()?;
        Ok(Report {
            mst: self,
            graph,
            total,
        })
    }
}

pub struct Report<'a, W> {
    mst: &'a MinimumSpanningTree<W>,
    graph: &'a Graph<W>,
    total: W,
}

impl<W: Weight> Report<'_, W> {
    pub fn total(&self) -> W {
        self.total
    }
}

impl<W: Weight> fmt::Display for Report<'_, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for arc in &self.mst.arcs {
            writeln!(f, "{}", arc.display(self.graph))?;
        }
        write!(f, "{}", self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::VertexId;

    #[test]
    fn test_total_weight_and_spans() {
        let mst = MinimumSpanningTree::new(vec![
            Arc::new(VertexId(0), VertexId(1), 1i64),
            Arc::new(VertexId(1), VertexId(2), 2i64),
        ]);
        assert_eq!(mst.total_weight(), Ok(3));
        assert!(mst.spans(3));
        assert!(!mst.spans(4));
    }

    #[test]
    fn test_total_weight_overflow() {
        let mst = MinimumSpanningTree::new(vec![
            Arc::new(VertexId(0), VertexId(1), i64::MAX),
            Arc::new(VertexId(1), VertexId(2), i64::MAX),
        ]);
        assert_eq!(
            mst.total_weight(),
            Err(MstError::WeightOverflow { arcs: 2 })
        );

        let mut b = crate::graph::GraphBuilder::new();
        for name in ["A", "B", "C"] {
            b.add_vertex(name).unwrap();
        }
        let g = b.build();
        assert!(mst.report(&g).is_err());
    }

    #[test]
    fn test_empty_tree() {
        let mst = MinimumSpanningTree::<i64>::new(Vec::new());
        assert_eq!(mst.total_weight(), Ok(0));
        assert!(mst.spans(0));
        assert!(mst.spans(1));
    }

    #[test]
    fn test_policy_parse() {
        assert_eq!("forest".parse::<DisconnectPolicy>(), Ok(DisconnectPolicy::Forest));
        assert_eq!("error".parse::<DisconnectPolicy>(), Ok(DisconnectPolicy::Error));
        assert!("maybe".parse::<DisconnectPolicy>().is_err());
        assert_eq!(
            MstConfig::new()
                .with_disconnect_policy(DisconnectPolicy::Forest)
                .disconnect_policy,
            DisconnectPolicy::Forest
        );
    }
}
