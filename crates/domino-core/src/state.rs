//! Game-state snapshot published by the game server.
//!
//! The server is the source of truth for the board, the hands, and which
//! moves are legal.  The client polls it and receives a JSON document like:
//!
//! ```json
//! {
//!   "game_id": "8f7e3d4a-2c1b-4a5e-9f6d-0b1c2d3e4f50",
//!   "board": { "sides": [3, 3], "children": [ { "sides": [3, 4] } ] },
//!   "hands": { "mine": [[4, 5], [0, 1]], "opponent_count": 6 },
//!   "pool_count": 14,
//!   "legal_moves": [ { "origin_sides": [3, 4], "piece_sides": [4, 5] } ],
//!   "my_turn": true
//! }
//! ```
//!
//! The board arrives nested; [`TileNode::to_tree`] converts it into the
//! arena-backed [`BoardTree`] the layout engine works on.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::resolve::LegalMove;
use crate::domain::tile::{BoardError, BoardTree, Sides, TileId};

/// Errors raised while reading a snapshot.
#[derive(Debug, Error)]
pub enum StateError {
    /// The document is not valid JSON or does not match the schema.
    #[error("malformed game state: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The nested board violates the slot rules of the tree.
    #[error("invalid board: {0}")]
    InvalidBoard(#[from] BoardError),
}

/// A played tile in the nested wire representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileNode {
    pub sides: Sides,
    #[serde(default)]
    pub closed: bool,
    #[serde(default)]
    pub children: Vec<TileNode>,
}

impl TileNode {
    /// Converts the nested board into an arena tree.
    ///
    /// Children keep their order, which decides the slot each one occupies.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::SlotsExhausted`] if a tile carries more children
    /// than it has slots.
    pub fn to_tree(&self) -> Result<BoardTree, BoardError> {
        let mut tree = BoardTree::new(self.sides);
        tree.set_root_closed(self.closed);

        // Work stack of (wire node, arena id) pairs still to expand.
        let mut pending: Vec<(&TileNode, TileId)> = vec![(self, TileId::ROOT)];
        while let Some((node, id)) = pending.pop() {
            for child in &node.children {
                let child_id = tree.attach_tile(id, child.sides, child.closed)?;
                pending.push((child, child_id));
            }
        }
        Ok(tree)
    }
}

/// Hand contents visible to this player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandState {
    /// Tiles in this player's hand.
    #[serde(default)]
    pub mine: Vec<Sides>,
    /// Number of face-down tiles the opponent holds.
    #[serde(default)]
    pub opponent_count: usize,
}

impl HandState {
    /// Returns `true` if `sides` (in either order) is in this player's hand.
    pub fn holds(&self, sides: Sides) -> bool {
        self.mine.iter().any(|s| s.key() == sides.key())
    }
}

/// One snapshot of the game as seen by this player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: Uuid,
    /// Tile tree rooted at the origin tile; `None` before the first play.
    #[serde(default)]
    pub board: Option<TileNode>,
    #[serde(default)]
    pub hands: HandState,
    /// Tiles left in the draw pool.
    #[serde(default)]
    pub pool_count: usize,
    /// Moves this player may make right now, in server order.
    #[serde(default)]
    pub legal_moves: Vec<LegalMove>,
    #[serde(default)]
    pub my_turn: bool,
}

impl GameState {
    /// Parses a snapshot from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::Malformed`] if the text does not match the schema.
    pub fn from_json(text: &str) -> Result<Self, StateError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Converts the board into an arena tree, or `None` for an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::InvalidBoard`] if the board breaks slot rules.
    pub fn board_tree(&self) -> Result<Option<BoardTree>, StateError> {
        match &self.board {
            Some(node) => Ok(Some(node.to_tree()?)),
            None => Ok(None),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
