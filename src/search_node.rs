use crate::moves::Move;
use ego_tree::{NodeId, Tree};

/// Record of one node explored while the searching side is still making its turn.
///
/// A node is created for the start of the turn and for every square a capturing
/// piece lands on. `next` links to the node where the best continuation goes on
/// capturing; `None` means the turn ends after `best_move`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChainNode {
    /// The best move found from this node. `None` while unexplored, or when no move exists.
    pub best_move: Option<Move>,
    /// Node where the turn continues after `best_move`.
    pub next: Option<NodeId>,
}

/// Arena of [`ChainNode`] records used to rebuild the best turn after a search.
///
/// Nodes are stored in creation order and referenced by [`NodeId`]. The table
/// lives for a single best-turn search.
pub struct TurnTable {
    tree: Tree<ChainNode>,
}

impl TurnTable {
    pub fn new() -> Self {
        Self {
            tree: Tree::new(ChainNode::default()),
        }
    }

    /// The node for the start of the turn.
    pub fn root(&self) -> NodeId {
        self.tree.root().id()
    }

    /// Creates a node continuing the turn from `parent` and returns its id.
    pub fn add_continuation(&mut self, parent: NodeId) -> NodeId {
        if let Some(mut node) = self.tree.get_mut(parent) {
            return node.append(ChainNode::default()).id();
        }
        self.tree.orphan(ChainNode::default()).id()
    }

    /// Records `best_move` as the best move from `node`, continuing at `next`.
    pub fn set_best(&mut self, node: NodeId, best_move: Move, next: Option<NodeId>) {
        if let Some(mut node) = self.tree.get_mut(node) {
            let record = node.value();
            record.best_move = Some(best_move);
            record.next = next;
        }
    }

    /// Number of nodes created so far.
    pub fn len(&self) -> usize {
        self.tree.nodes().count()
    }

    /// Follows the `next` links from the root and collects the best moves.
    ///
    /// Stops at the first node without a move, so an unexplored root yields an
    /// empty turn.
    pub fn best_turn(&self) -> Vec<Move> {
        let mut turn = Vec::new();
        let mut current = Some(self.root());
        while let Some(id) = current {
            let Some(node) = self.tree.get(id) else {
                break;
            };
            let record = node.value();
            let Some(best_move) = record.best_move else {
                break;
            };
            turn.push(best_move);
            current = record.next;
        }
        turn
    }
}

impl Default for TurnTable {
    fn default() -> Self {
        TurnTable::new()
    }
}
