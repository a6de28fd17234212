//! Frontier: the nodes discovered but not yet tested.
//!
//! Every search strategy shares the same admission rules and loop; they differ
//! only in the order this container hands nodes back.

use rand::rngs::SmallRng;
use rand::Rng;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, VecDeque};

use crate::heuristics::Heuristic;
use crate::node::{NodeId, SearchNode};

/// How a priority frontier scores a node. Higher priority pops first.
#[derive(Clone, Copy, Debug)]
pub enum PriorityRule {
    /// `-h(board)`
    Greedy(Heuristic),
    /// `-(h(board) + depth)`
    AStar(Heuristic),
}

impl PriorityRule {
    pub fn priority(&self, node: &SearchNode) -> i64 {
        match self {
            PriorityRule::Greedy(h) => -i64::from(h.estimate(node.board())),
            PriorityRule::AStar(h) => {
                -(i64::from(h.estimate(node.board())) + i64::from(node.depth()))
            }
        }
    }
}

/// A heap entry ordered by `(priority, sequence)`.
///
/// `BinaryHeap` is a max-heap, so the highest priority pops first and, among
/// equal priorities, the most recently pushed entry.
#[derive(Debug)]
pub struct PriorityEntry {
    priority: i64,
    sequence: u64,
    id: NodeId,
}

impl PartialEq for PriorityEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PriorityEntry {}

impl PartialOrd for PriorityEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PriorityEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// Ordered container of untested node ids.
#[derive(Debug)]
pub enum Frontier {
    /// Pops a uniformly random element.
    Random { nodes: Vec<NodeId>, rng: SmallRng },
    /// Pops the earliest-pushed element.
    Fifo(VecDeque<NodeId>),
    /// Pops the most-recently-pushed element.
    Lifo(Vec<NodeId>),
    /// Pops the highest-priority element.
    Priority {
        heap: BinaryHeap<PriorityEntry>,
        rule: PriorityRule,
        next_sequence: u64,
    },
}

impl Frontier {
    pub fn random(rng: SmallRng) -> Self {
        Frontier::Random {
            nodes: Vec::new(),
            rng,
        }
    }

    pub fn fifo() -> Self {
        Frontier::Fifo(VecDeque::new())
    }

    pub fn lifo() -> Self {
        Frontier::Lifo(Vec::new())
    }

    pub fn priority(rule: PriorityRule) -> Self {
        Frontier::Priority {
            heap: BinaryHeap::new(),
            rule,
            next_sequence: 0,
        }
    }

    /// Adds `node`, stored in the tree under `id`.
    ///
    /// The node itself is only consulted by priority frontiers.
    pub fn push(&mut self, id: NodeId, node: &SearchNode) {
        match self {
            Frontier::Random { nodes, .. } => nodes.push(id),
            Frontier::Fifo(queue) => queue.push_back(id),
            Frontier::Lifo(stack) => stack.push(id),
            Frontier::Priority {
                heap,
                rule,
                next_sequence,
            } => {
                heap.push(PriorityEntry {
                    priority: rule.priority(node),
                    sequence: *next_sequence,
                    id,
                });
                *next_sequence += 1;
            }
        }
    }

    /// Removes and returns the next node to test, or `None` when empty.
    pub fn pop(&mut self) -> Option<NodeId> {
        match self {
            Frontier::Random { nodes, rng } => {
                if nodes.is_empty() {
                    None
                } else {
                    let index = rng.gen_range(0..nodes.len());
                    Some(nodes.swap_remove(index))
                }
            }
            Frontier::Fifo(queue) => queue.pop_front(),
            Frontier::Lifo(stack) => stack.pop(),
            Frontier::Priority { heap, .. } => heap.pop().map(|entry| entry.id),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Frontier::Random { nodes, .. } => nodes.len(),
            Frontier::Fifo(queue) => queue.len(),
            Frontier::Lifo(stack) => stack.len(),
            Frontier::Priority { heap, .. } => heap.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
