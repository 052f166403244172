//! Indexed binary min-heap over [`NodeId`]s.
//!
//! Unlike `BinaryHeap`, every queued node has a known heap slot, so its
//! priority can be lowered in place instead of pushing a duplicate entry.

use std::cmp::Ordering;

use crate::pathnode::NodeId;

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: NodeId,
    cost: f64,
    /// Insertion sequence; among equal costs, earlier entries pop first.
    seq: u64,
}

impl Entry {
    fn before(&self, other: &Entry) -> bool {
        self.cost
            .total_cmp(&other.cost)
            .then(self.seq.cmp(&other.seq))
            == Ordering::Less
    }
}

#[derive(Debug, Default)]
pub(crate) struct Frontier {
    heap: Vec<Entry>,
    /// Heap slot of each node, indexed by `NodeId`.
    slots: Vec<Option<usize>>,
    seq: u64,
}

impl Frontier {
    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.slots.clear();
        self.seq = 0;
    }

    pub(crate) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.slot(id).is_some()
    }

    fn slot(&self, id: NodeId) -> Option<usize> {
        self.slots.get(id.index()).copied().flatten()
    }

    fn next_seq(&mut self) -> u64 {
        self.seq += 1;
        self.seq
    }

    /// Queue `id` with the given cost. An already queued node is
    /// re-prioritized instead.
    pub(crate) fn push(&mut self, id: NodeId, cost: f64) {
        if self.contains(id) {
            self.decrease(id, cost);
            return;
        }
        if self.slots.len() <= id.index() {
            self.slots.resize(id.index() + 1, None);
        }
        let seq = self.next_seq();
        let at = self.heap.len();
        self.heap.push(Entry { id, cost, seq });
        self.slots[id.index()] = Some(at);
        self.sift_up(at);
    }

    /// Lower the cost of a queued node. Does nothing if `id` is not queued
    /// or `cost` is not lower than its current cost.
    pub(crate) fn decrease(&mut self, id: NodeId, cost: f64) {
        let Some(at) = self.slot(id) else {
            return;
        };
        if cost >= self.heap[at].cost {
            return;
        }
        let seq = self.next_seq();
        self.heap[at].cost = cost;
        self.heap[at].seq = seq;
        self.sift_up(at);
    }

    /// Remove and return the cheapest node with its cost.
    pub(crate) fn pop(&mut self) -> Option<(NodeId, f64)> {
        if self.heap.is_empty() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap(0, last);
        let top = self.heap.pop()?;
        self.slots[top.id.index()] = None;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some((top.id, top.cost))
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.slots[self.heap[a].id.index()] = Some(a);
        self.slots[self.heap[b].id.index()] = Some(b);
    }

    fn sift_up(&mut self, mut at: usize) {
        while at > 0 {
            let parent = (at - 1) / 2;
            if !self.heap[at].before(&self.heap[parent]) {
                break;
            }
            self.swap(at, parent);
            at = parent;
        }
    }

    fn sift_down(&mut self, mut at: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * at + 1;
            let right = left + 1;
            let mut best = at;
            if left < len && self.heap[left].before(&self.heap[best]) {
                best = left;
            }
            if right < len && self.heap[right].before(&self.heap[best]) {
                best = right;
            }
            if best == at {
                break;
            }
            self.swap(at, best);
            at = best;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(f: &mut Frontier) -> Vec<(usize, f64)> {
        std::iter::from_fn(|| f.pop())
            .map(|(id, c)| (id.index(), c))
            .collect()
    }

    #[test]
    fn pops_in_cost_order() {
        let mut f = Frontier::default();
        for (i, c) in [5.0, 1.0, 3.0, 4.0, 2.0].into_iter().enumerate() {
            f.push(NodeId(i), c);
        }
        assert_eq!(f.len(), 5);
        let costs: Vec<f64> = drain(&mut f).into_iter().map(|(_, c)| c).collect();
        assert_eq!(costs, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(f.len(), 0);
    }

    #[test]
    fn equal_costs_pop_in_insertion_order() {
        let mut f = Frontier::default();
        for i in 0..6 {
            f.push(NodeId(i), 1.0);
        }
        let ids: Vec<usize> = drain(&mut f).into_iter().map(|(i, _)| i).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn decrease_key_reorders() {
        let mut f = Frontier::default();
        f.push(NodeId(0), 1.0);
        f.push(NodeId(1), 2.0);
        f.push(NodeId(2), 3.0);
        f.decrease(NodeId(2), 0.5);
        // Raising is ignored.
        f.decrease(NodeId(0), 9.0);
        assert_eq!(drain(&mut f), vec![(2, 0.5), (0, 1.0), (1, 2.0)]);
    }

    #[test]
    fn popped_nodes_are_not_contained() {
        let mut f = Frontier::default();
        f.push(NodeId(3), 1.0);
        assert!(f.contains(NodeId(3)));
        assert!(!f.contains(NodeId(0)));
        f.pop();
        assert!(!f.contains(NodeId(3)));
        f.decrease(NodeId(3), 0.0);
        assert!(f.pop().is_none());
    }
}
