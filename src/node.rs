//! Search-tree nodes and the arena that owns them.
//!
//! Nodes refer to their predecessor by [`NodeId`], an index into the
//! [`SearchTree`] that created them, so lineage walks are plain loops and the
//! tree has no ownership cycles. Only nodes that pass admission are stored.

use crate::engine::{Board, Move};

/// Index of a node inside its [`SearchTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// A board together with how the search reached it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchNode {
    board: Board,
    predecessor: Option<NodeId>,
    last_move: Option<Move>,
    depth: u32,
}

impl SearchNode {
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The node this one was expanded from; `None` for the root.
    pub fn predecessor(&self) -> Option<NodeId> {
        self.predecessor
    }

    /// The move that produced this node; `None` for the root.
    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Number of moves from the root.
    pub fn depth(&self) -> u32 {
        self.depth
    }
}

/// Arena of search nodes for one search run.
#[derive(Clone, Debug)]
pub struct SearchTree {
    nodes: Vec<SearchNode>,
}

impl SearchTree {
    /// Creates a tree holding only the root node for `root`.
    ///
    /// # Examples
    /// ```
    /// use eight_puzzle_solver::engine::GOAL;
    /// use eight_puzzle_solver::node::SearchTree;
    ///
    /// let tree = SearchTree::new(GOAL);
    /// let root = tree.get(tree.root());
    /// assert_eq!(root.depth(), 0);
    /// assert!(root.predecessor().is_none());
    /// ```
    pub fn new(root: Board) -> Self {
        SearchTree {
            nodes: vec![SearchNode {
                board: root,
                predecessor: None,
                last_move: None,
                depth: 0,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the node with the given id.
    ///
    /// # Panics
    /// Panics if `id` was not issued by this tree.
    pub fn get(&self, id: NodeId) -> &SearchNode {
        &self.nodes[id.0]
    }

    /// Number of stored nodes. Never zero: the root is always present.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Builds a candidate successor of `parent`, not yet attached to the tree.
    ///
    /// The depth is derived from the parent rather than supplied.
    pub fn child(&self, parent: NodeId, last_move: Move, board: Board) -> SearchNode {
        SearchNode {
            board,
            predecessor: Some(parent),
            last_move: Some(last_move),
            depth: self.get(parent).depth + 1,
        }
    }

    /// Attaches an admitted node and returns its id.
    pub fn insert(&mut self, node: SearchNode) -> NodeId {
        debug_assert!(node.predecessor.map_or(true, |p| p.0 < self.nodes.len()));
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Iterates over the predecessor chain of `id`, nearest first, excluding `id` itself.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.get(id).predecessor,
        }
    }

    /// True if any ancestor of `node` holds the same board as `node`.
    ///
    /// Walks the chain iteratively, so the cost is O(depth) with constant stack use.
    pub fn creates_cycle(&self, node: &SearchNode) -> bool {
        let mut current = node.predecessor;
        while let Some(id) = current {
            let ancestor = self.get(id);
            if ancestor.board == node.board {
                return true;
            }
            current = ancestor.predecessor;
        }
        false
    }

    /// The path from the root to `id` as `(move, board)` pairs, root first.
    ///
    /// The root's entry carries no move.
    pub fn moves_to_root(&self, id: NodeId) -> Vec<(Option<Move>, Board)> {
        let mut path = Vec::with_capacity(self.get(id).depth as usize + 1);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push((node.last_move, node.board));
            current = node.predecessor;
        }
        path.reverse();
        path
    }

    /// Ids of every stored node, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Iterator returned by [`SearchTree::ancestors`].
pub struct Ancestors<'a> {
    tree: &'a SearchTree,
    next: Option<NodeId>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = (NodeId, &'a SearchNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.tree.get(id);
        self.next = node.predecessor;
        Some((id, node))
    }
}
