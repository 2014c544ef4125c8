use crate::graph::VertexId;
use indexmap::IndexMap;

/// Union-Find forest identifying which partial tree owns each vertex.
///
/// Plain parent links: no path compression, no union by rank. Chains only
/// grow when two trees merge, so the root of every component is the root of
/// the tree that absorbed it.
#[derive(Debug, Clone)]
pub struct Forest {
    parent: Vec<VertexId>,
}

impl Forest {
    /// Create a forest of n singleton components
    pub fn new(n: usize) -> Self {
        let parent = (0..n).map(VertexId).collect();
        Forest { parent }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Whether `v` is one of the vertices this forest was built for
    pub fn contains(&self, v: VertexId) -> bool {
        v.0 < self.parent.len()
    }

    pub fn is_root(&self, v: VertexId) -> bool {
        self.parent[v.0] == v
    }

    /// Follow parent links from v until reaching a vertex that is its own parent
    ///
    /// # Panics
    ///
    /// Panics if `v` is not in the forest; see [`Forest::contains`].
    pub fn find_root(&self, v: VertexId) -> VertexId {
        let mut cur = v;
        while self.parent[cur.0] != cur {
            cur = self.parent[cur.0];
        }
        cur
    }

    /// Hang the component rooted at `child` under the root `parent`
    pub fn union(&mut self, child: VertexId, parent: VertexId) {
        debug_assert!(self.is_root(child), "{child} is not a root");
        debug_assert!(self.is_root(parent), "{parent} is not a root");
        if child != parent {
            self.parent[child.0] = parent;
        }
    }

    /// Check if two vertices are in the same component
    pub fn connected(&self, a: VertexId, b: VertexId) -> bool {
        self.find_root(a) == self.find_root(b)
    }

    /// Number of parent links between v and its root
    pub fn depth(&self, v: VertexId) -> usize {
        let mut depth = 0;
        let mut cur = v;
        while self.parent[cur.0] != cur {
            cur = self.parent[cur.0];
            depth += 1;
        }
        depth
    }

    /// Group all vertices by component, components ordered by their first vertex
    pub fn components(&self) -> Vec<Vec<VertexId>> {
        let mut root_to_group: IndexMap<VertexId, Vec<VertexId>> = IndexMap::new();

        for i in 0..self.parent.len() {
            let v = VertexId(i);
            root_to_group.entry(self.find_root(v)).or_default().push(v);
        }

        root_to_group.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singletons() {
        let f = Forest::new(3);
        for i in 0..3 {
            assert!(f.is_root(VertexId(i)));
            assert_eq!(f.find_root(VertexId(i)), VertexId(i));
        }
        assert!(!f.connected(VertexId(0), VertexId(2)));
    }

    #[test]
    fn test_union_chains_without_compression() {
        let mut f = Forest::new(4);
        f.union(VertexId(3), VertexId(2));
        f.union(VertexId(2), VertexId(1));
        f.union(VertexId(1), VertexId(0));

        assert_eq!(f.find_root(VertexId(3)), VertexId(0));
        assert_eq!(f.depth(VertexId(3)), 3);
        // Lookup is read-only, so repeating it changes nothing
        assert_eq!(f.find_root(VertexId(3)), f.find_root(VertexId(3)));
        assert_eq!(f.depth(VertexId(3)), 3);
    }

    #[test]
    fn test_exactly_one_root_after_union() {
        let mut f = Forest::new(2);
        f.union(VertexId(1), VertexId(0));
        assert!(f.is_root(VertexId(0)));
        assert!(!f.is_root(VertexId(1)));
    }

    #[test]
    fn test_components() {
        let mut f = Forest::new(5);
        f.union(VertexId(4), VertexId(1));
        f.union(VertexId(2), VertexId(0));
        assert_eq!(
            f.components(),
            vec![
                vec![VertexId(0), VertexId(2)],
                vec![VertexId(1), VertexId(4)],
                vec![VertexId(3)],
            ]
        );
    }
}
