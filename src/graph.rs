//! Weighted undirected graphs and the text loader that builds them.
//!
//! A graph file lists the vertex count, then one vertex name per line, then
//! one `name name weight` line per undirected edge:
//!
//! ```text
//! # triangle
//! 3
//! A
//! B
//! C
//! A B 1
//! B C 2
//! A C 3
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. Files ending in `.gz`
//! are decompressed on the fly.

use anyhow::{anyhow, bail, Context, Result};
use flate2::read::MultiGzDecoder;
use indexmap::IndexMap;
use log::{debug, warn};
use ordered_float::OrderedFloat;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::ops::Add;
use std::path::Path;
use std::str::FromStr;

/// Arc weights: totally ordered, summable, and parseable from the graph file.
///
/// Plain integers qualify directly; floating point weights go through
/// `ordered_float::OrderedFloat`.
pub trait Weight:
    Copy + Ord + Default + Add<Output = Self> + fmt::Debug + fmt::Display + FromStr
{
    /// Sum that reports overflow (or a non-finite float) as `None`.
    fn checked_add(self, other: Self) -> Option<Self>;

    /// False for NaN and infinities; always true for integers.
    fn is_finite(self) -> bool;
}

macro_rules! integer_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for $t {
                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    <$t>::checked_add(self, other)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    true
                }
            }
        )*
    };
}

integer_weight!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! float_weight {
    ($($t:ty),*) => {
        $(
            impl Weight for OrderedFloat<$t> {
                #[inline]
                fn checked_add(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.0.is_finite().then_some(sum)
                }

                #[inline]
                fn is_finite(self) -> bool {
                    self.0.is_finite()
                }
            }
        )*
    };
}

float_weight!(f32, f64);

/// Index of a vertex in its graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub usize);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Adjacency entry: the vertex at the other end and the arc weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor<W> {
    pub vertex: VertexId,
    pub weight: W,
}

#[derive(Debug, Clone)]
pub struct Vertex<W> {
    id: VertexId,
    name: String,
    neighbors: Vec<Neighbor<W>>,
}

impl<W: Weight> Vertex<W> {
    pub fn id(&self) -> VertexId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Neighbors in the order their edges were added.
    pub fn neighbors(&self) -> &[Neighbor<W>] {
        &self.neighbors
    }
}

/// A finalized graph. Adjacency lists never change once built.
#[derive(Debug, Clone)]
pub struct Graph<W> {
    vertices: Vec<Vertex<W>>,
    by_name: IndexMap<String, VertexId>,
    edge_count: usize,
}

impl<W: Weight> Graph<W> {
    pub fn vertices(&self) -> &[Vertex<W>] {
        &self.vertices
    }

    pub fn vertex(&self, id: VertexId) -> &Vertex<W> {
        &self.vertices[id.0]
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of undirected edges (each one shows up in two adjacency lists).
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn id_of(&self, name: &str) -> Option<VertexId> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, id: VertexId) -> &str {
        &self.vertices[id.0].name
    }

    /// Parse a graph description from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self>
    where
        <W as FromStr>::Err: fmt::Display,
    {
        let mut builder = GraphBuilder::new();
        let mut expected: Option<usize> = None;

        for (idx, line) in reader.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context(|| format!("Failed to read line {line_no}"))?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some(count) = expected else {
                let count = line
                    .parse::<usize>()
                    .with_context(|| format!("Line {line_no}: expected vertex count, got '{line}'"))?;
                expected = Some(count);
                continue;
            };

            if builder.len() < count {
                if line.split_whitespace().count() != 1 {
                    bail!("Line {line_no}: vertex name '{line}' must be a single word");
                }
                builder
                    .add_vertex(line)
                    .with_context(|| format!("Line {line_no}"))?;
                continue;
            }

            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() != 3 {
                bail!(
                    "Line {line_no}: edge needs 3 fields (name name weight), got {}",
                    fields.len()
                );
            }
            let weight = fields[2].parse::<W>().map_err(|e| {
                anyhow!("Line {line_no}: invalid weight '{}': {e}", fields[2])
            })?;
            builder
                .add_edge_by_name(fields[0], fields[1], weight)
                .with_context(|| format!("Line {line_no}"))?;
        }

        let count = expected.ok_or_else(|| anyhow!("Empty graph description: no vertex count"))?;
        if builder.len() < count {
            bail!(
                "Graph declares {count} vertices but only {} names were given",
                builder.len()
            );
        }

        let graph = builder.build();
        debug!(
            "Loaded graph with {} vertices and {} edges",
            graph.len(),
            graph.edge_count()
        );
        Ok(graph)
    }

    /// Load a graph from a file path, or from stdin when the path is `-`.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        <W as FromStr>::Err: fmt::Display,
    {
        let path = path.as_ref();
        let reader = open_graph_input(path)?;
        Self::from_reader(reader)
            .with_context(|| format!("Failed to load graph from {}", path.display()))
    }
}

/// Open a graph file, transparently decompressing `.gz` inputs.
pub fn open_graph_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }

    let file =
        File::open(path).with_context(|| format!("Failed to open graph file {}", path.display()))?;

    let is_compressed = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    if is_compressed {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Incremental graph construction for loaders and tests.
#[derive(Debug, Clone)]
pub struct GraphBuilder<W> {
    vertices: Vec<Vertex<W>>,
    by_name: IndexMap<String, VertexId>,
    edge_count: usize,
}

impl<W: Weight> Default for GraphBuilder<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Weight> GraphBuilder<W> {
    pub fn new() -> Self {
        GraphBuilder {
            vertices: Vec::new(),
            by_name: IndexMap::new(),
            edge_count: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn add_vertex(&mut self, name: &str) -> Result<VertexId> {
        if self.by_name.contains_key(name) {
            bail!("Duplicate vertex name '{name}'");
        }
        let id = VertexId(self.vertices.len());
        self.vertices.push(Vertex {
            id,
            name: name.to_string(),
            neighbors: Vec::new(),
        });
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    /// Add an undirected edge; it lands in both adjacency lists.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId, weight: W) -> Result<()> {
        let n = self.vertices.len();
        if a.0 >= n || b.0 >= n {
            bail!("Edge {a}-{b} refers to a vertex outside 0..{n}");
        }
        if !weight.is_finite() {
            bail!("Non-finite weight {weight} on edge {a}-{b}");
        }
        if weight < W::default() {
            bail!("Negative weight {weight} on edge {a}-{b}");
        }
        if a == b {
            warn!(
                "Self-loop on vertex '{}' will never be part of the tree",
                self.vertices[a.0].name
            );
        }

        self.vertices[a.0].neighbors.push(Neighbor { vertex: b, weight });
        self.vertices[b.0].neighbors.push(Neighbor { vertex: a, weight });
        self.edge_count += 1;
        Ok(())
    }

    pub fn add_edge_by_name(&mut self, a: &str, b: &str, weight: W) -> Result<()> {
        let ida = self
            .by_name
            .get(a)
            .copied()
            .ok_or_else(|| anyhow!("Unknown vertex '{a}'"))?;
        let idb = self
            .by_name
            .get(b)
            .copied()
            .ok_or_else(|| anyhow!("Unknown vertex '{b}'"))?;
        self.add_edge(ida, idb, weight)
    }

    pub fn build(self) -> Graph<W> {
        Graph {
            vertices: self.vertices,
            by_name: self.by_name,
            edge_count: self.edge_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const TRIANGLE: &str = "3\nA\nB\nC\nA B 1\nB C 2\nA C 3\n";

    #[test]
    fn test_parse_triangle() {
        let g: Graph<i64> = Graph::from_reader(Cursor::new(TRIANGLE)).unwrap();
        assert_eq!(g.len(), 3);
        assert_eq!(g.edge_count(), 3);

        let a = g.id_of("A").unwrap();
        let names: Vec<&str> = g
            .vertex(a)
            .neighbors()
            .iter()
            .map(|n| g.name_of(n.vertex))
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# header\n\n2\n# names\nX\nY\n\nX Y 7\n";
        let g: Graph<i64> = Graph::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(g.len(), 2);
        assert_eq!(g.vertex(VertexId(1)).neighbors()[0].weight, 7);
    }

    #[test]
    fn test_float_weights() {
        let text = "2\nP\nQ\nP Q 0.25\n";
        let g: Graph<OrderedFloat<f64>> = Graph::from_reader(Cursor::new(text)).unwrap();
        assert_eq!(g.vertex(VertexId(0)).neighbors()[0].weight, OrderedFloat(0.25));
    }

    #[test]
    fn test_rejects_bad_input() {
        let cases = [
            ("", "no vertex count"),
            ("x\n", "expected vertex count"),
            ("3\nA\nB\n", "only 2 names"),
            ("2\nA\nA\n", "Duplicate vertex name"),
            ("2\nA\nB\nA Z 1\n", "Unknown vertex 'Z'"),
            ("2\nA\nB\nA B\n", "edge needs 3 fields"),
            ("2\nA\nB\nA B heavy\n", "invalid weight"),
            ("2\nA\nB\nA B -4\n", "Negative weight"),
        ];
        for (text, needle) in cases {
            let err = Graph::<i64>::from_reader(Cursor::new(text)).unwrap_err();
            let msg = format!("{err:#}");
            assert!(msg.contains(needle), "expected '{needle}' in '{msg}'");
        }
    }

    #[test]
    fn test_rejects_non_finite_float_weights() {
        for token in ["NaN", "inf", "-inf"] {
            let text = format!("2\nP\nQ\nP Q {token}\n");
            let err = Graph::<OrderedFloat<f64>>::from_reader(Cursor::new(text)).unwrap_err();
            let msg = format!("{err:#}");
            assert!(msg.contains("Non-finite weight"), "{token}: '{msg}'");
        }
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(Weight::checked_add(2i64, 3), Some(5));
        assert_eq!(Weight::checked_add(i64::MAX, 1), None);
        assert_eq!(
            Weight::checked_add(OrderedFloat(0.5f64), OrderedFloat(0.25)),
            Some(OrderedFloat(0.75))
        );
        assert_eq!(
            Weight::checked_add(OrderedFloat(f64::MAX), OrderedFloat(f64::MAX)),
            None
        );
    }

    #[test]
    fn test_self_loop_is_kept() {
        let mut b = GraphBuilder::<i64>::new();
        let a = b.add_vertex("A").unwrap();
        b.add_edge(a, a, 2).unwrap();
        let g = b.build();
        assert_eq!(g.vertex(a).neighbors().len(), 2);
    }
}
