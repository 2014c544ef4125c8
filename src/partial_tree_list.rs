//! The partial tree list and the merge loop that turns it into a minimum
//! spanning tree.
//!
//! Trees live in a circular singly-linked list laid out as an index ring:
//! each slot stores its successor's index and `rear` anchors the ring, so
//! the front (oldest tree) is always `rear`'s successor. Freed slots are
//! recycled through a free list.
//!
//! `execute` keeps taking the front tree, pops its cheapest arc and looks
//! for the live tree owning the far endpoint. A hit merges the two trees
//! and re-queues the result at the rear; a miss means the arc is internal
//! and is thrown away.

use crate::arc::Arc;
use crate::error::{MstError, MstResult};
use crate::graph::{Graph, VertexId, Weight};
use crate::mst::{DisconnectPolicy, MinimumSpanningTree, MstConfig};
use crate::partial_tree::PartialTree;
use crate::union_find::Forest;
use log::{debug, trace, warn};

#[derive(Debug, Clone)]
enum Slot<W: Weight> {
    Linked { tree: PartialTree<W>, next: usize },
    Vacant,
}

/// Circular list of the live partial trees, together with the forest that
/// maps every vertex to the tree owning it.
#[derive(Debug, Clone)]
pub struct PartialTreeList<W: Weight> {
    slots: Vec<Slot<W>>,
    free: Vec<usize>,
    rear: Option<usize>,
    size: usize,
    forest: Forest,
}

impl<W: Weight> PartialTreeList<W> {
    /// An empty list over a forest of `vertex_count` singleton components.
    pub fn new(vertex_count: usize) -> Self {
        PartialTreeList {
            slots: Vec::new(),
            free: Vec::new(),
            rear: None,
            size: 0,
            forest: Forest::new(vertex_count),
        }
    }

    /// One singleton tree per vertex, in graph order, each seeded with the
    /// arcs incident to its vertex.
    pub fn initialize(graph: &Graph<W>) -> Self {
        let mut list = Self::new(graph.len());
        let mut queued = 0;

        for vertex in graph.vertices() {
            let tree = PartialTree::seeded(graph, vertex.id());
            trace!("Initial tree '{}': {}", vertex.name(), tree);
            queued += tree.arcs().len();
            list.append(tree);
        }

        debug!(
            "Initialized {} partial trees with {} queued arcs",
            list.size(),
            queued
        );
        list
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn forest(&self) -> &Forest {
        &self.forest
    }

    /// Root of the tree owning `vertex`, or `NotFound` for a vertex outside
    /// the graph.
    pub fn find_root(&self, vertex: VertexId) -> MstResult<VertexId> {
        if !self.forest.contains(vertex) {
            return Err(MstError::NotFound { vertex });
        }
        Ok(self.forest.find_root(vertex))
    }

    /// Add `tree` behind the current rear; it becomes the new rear.
    ///
    /// The tree's root must be a vertex of the list's forest.
    pub fn append(&mut self, tree: PartialTree<W>) {
        debug_assert!(self.forest.contains(tree.root()), "{} out of range", tree.root());
        let slot = self.occupy(tree);
        if let Some(rear) = self.rear {
            let front = self.next_of(rear);
            self.set_next(slot, front);
            self.set_next(rear, slot);
        }
        self.rear = Some(slot);
        self.size += 1;
    }

    /// Remove and return the front tree.
    pub fn remove_front(&mut self) -> MstResult<PartialTree<W>> {
        let rear = self.rear.ok_or(MstError::EmptyList)?;
        let front = self.next_of(rear);
        self.unlink(rear, front);
        Ok(self.vacate(front))
    }

    /// Remove and return the tree whose root is the root of `vertex`.
    ///
    /// Every node is visited at most once. `NotFound` means no live tree
    /// owns `vertex`, which includes the case of a tree already taken out
    /// of the list by the caller.
    pub fn remove_tree_containing(&mut self, vertex: VertexId) -> MstResult<PartialTree<W>> {
        let rear = self.rear.ok_or(MstError::NotFound { vertex })?;
        let root = self.find_root(vertex)?;

        let mut prev = rear;
        for _ in 0..self.size {
            let cur = self.next_of(prev);
            if self.tree_at(cur).root() == root {
                self.unlink(prev, cur);
                return Ok(self.vacate(cur));
            }
            prev = cur;
        }

        Err(MstError::NotFound { vertex })
    }

    /// Trees from front to rear.
    pub fn iter(&self) -> Iter<'_, W> {
        Iter {
            list: self,
            cur: self.rear.map(|rear| self.next_of(rear)),
            rest: self.size,
        }
    }

    /// Count nodes by walking successors from the rear until it comes back
    /// around, bounded by the number of slots.
    pub fn ring_len(&self) -> usize {
        let Some(rear) = self.rear else {
            return 0;
        };
        let mut steps = 1;
        let mut cur = self.next_of(rear);
        while cur != rear && steps <= self.slots.len() {
            cur = self.next_of(cur);
            steps += 1;
        }
        steps
    }

    /// Run the merge loop with the default configuration.
    pub fn execute(self) -> MstResult<MinimumSpanningTree<W>> {
        self.execute_with(&MstConfig::default())
    }

    /// Merge trees until one is left, returning the connecting arcs in the
    /// order they were accepted.
    pub fn execute_with(mut self, config: &MstConfig) -> MstResult<MinimumSpanningTree<W>> {
        let mut mst: Vec<Arc<W>> = Vec::with_capacity(self.size.saturating_sub(1));
        let mut discarded = 0usize;

        while self.size > 1 {
            let mut temp = self.remove_front()?;

            let mut link = None;
            while !temp.arcs().is_empty() {
                let candidate = temp.arcs_mut().delete_min()?;
                match self.remove_tree_containing(candidate.v2) {
                    Ok(other) => {
                        link = Some((candidate, other));
                        break;
                    }
                    Err(MstError::NotFound { .. }) => {
                        trace!("Discarding internal arc {}", candidate);
                        discarded += 1;
                    }
                    Err(e) => return Err(e),
                }
            }

            match link {
                Some((candidate, other)) => {
                    trace!("Merging tree {} into tree {} via {}", other.root(), temp.root(), candidate);
                    temp.merge(other, &mut self.forest);
                    mst.push(candidate);
                    self.append(temp);
                }
                None => match config.disconnect_policy {
                    DisconnectPolicy::Error => {
                        debug!(
                            "Tree {} ran out of arcs; forest has {} components",
                            temp.root(),
                            self.forest.components().len()
                        );
                        return Err(MstError::DisconnectedGraph {
                            components: self.size + 1,
                            arcs_found: mst.len(),
                        });
                    }
                    DisconnectPolicy::Forest => {
                        warn!(
                            "Tree {} ran out of arcs with {} trees left; dropping it",
                            temp.root(),
                            self.size
                        );
                    }
                },
            }
        }

        debug!(
            "Merge loop finished: {} arcs accepted, {} internal arcs discarded",
            mst.len(),
            discarded
        );
        Ok(MinimumSpanningTree::new(mst))
    }

    fn occupy(&mut self, tree: PartialTree<W>) -> usize {
        match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Slot::Linked { tree, next: slot };
                slot
            }
            None => {
                let slot = self.slots.len();
                self.slots.push(Slot::Linked { tree, next: slot });
                slot
            }
        }
    }

    fn vacate(&mut self, slot: usize) -> PartialTree<W> {
        self.free.push(slot);
        match std::mem::replace(&mut self.slots[slot], Slot::Vacant) {
            Slot::Linked { tree, .. } => tree,
            Slot::Vacant => unreachable!("slot {slot} vacated twice"),
        }
    }

    /// Splice `cur` out of the ring given its predecessor `prev`.
    fn unlink(&mut self, prev: usize, cur: usize) {
        if prev == cur {
            self.rear = None;
        } else {
            let next = self.next_of(cur);
            self.set_next(prev, next);
            if self.rear == Some(cur) {
                self.rear = Some(prev);
            }
        }
        self.size -= 1;
    }

    fn next_of(&self, slot: usize) -> usize {
        match &self.slots[slot] {
            Slot::Linked { next, .. } => *next,
            Slot::Vacant => unreachable!("vacant slot {slot} is linked into the ring"),
        }
    }

    fn set_next(&mut self, slot: usize, to: usize) {
        match &mut self.slots[slot] {
            Slot::Linked { next, .. } => *next = to,
            Slot::Vacant => unreachable!("vacant slot {slot} is linked into the ring"),
        }
    }

    fn tree_at(&self, slot: usize) -> &PartialTree<W> {
        match &self.slots[slot] {
            Slot::Linked { tree, .. } => tree,
            Slot::Vacant => unreachable!("vacant slot {slot} is linked into the ring"),
        }
    }
}

/// Read-only walk over the trees, front to rear.
#[derive(Debug, Clone)]
pub struct Iter<'a, W: Weight> {
    list: &'a PartialTreeList<W>,
    cur: Option<usize>,
    rest: usize,
}

impl<'a, W: Weight> Iterator for Iter<'a, W> {
    type Item = &'a PartialTree<W>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest == 0 {
            return None;
        }
        let slot = self.cur?;
        self.rest -= 1;
        self.cur = Some(self.list.next_of(slot));
        Some(self.list.tree_at(slot))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.rest, Some(self.rest))
    }
}

impl<W: Weight> ExactSizeIterator for Iter<'_, W> {}

impl<'a, W: Weight> IntoIterator for &'a PartialTreeList<W> {
    type Item = &'a PartialTree<W>;
    type IntoIter = Iter<'a, W>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
