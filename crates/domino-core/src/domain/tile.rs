//! Pip pairs, tile identity, and the arena-backed board tree.
//!
//! # How the board is stored (for beginners)
//!
//! Every tile on the board except the first one is attached to exactly one
//! parent tile.  That makes the board a *tree*.  Rather than giving each tile
//! an owning pointer to its children (which gets awkward in Rust as soon as
//! something needs to walk the tree and look things up), all tiles live in
//! one `Vec` (an *arena*) and refer to each other by index ([`TileId`]).
//!
//! New tiles can only be appended and attached to a tile that already exists,
//! so the tree can never contain a cycle.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest pip count on a double-six set.
pub const MAX_PIP: u8 = 6;

/// Children a double can carry: east, west, south, north.
const DOUBLE_SLOTS: usize = 4;

/// Children the origin tile can carry when it is not a double: one per open end.
const ROOT_SLOTS: usize = 2;

/// Children any other non-double can carry: its single far end.
const CHAIN_SLOTS: usize = 1;

/// Index of a tile inside a [`BoardTree`].
///
/// `TileId(0)` is always the origin tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub usize);

impl TileId {
    /// The origin tile of every board.
    pub const ROOT: TileId = TileId(0);
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Order-independent tile identity.
///
/// `[3|5]` and `[5|3]` are the same physical domino, so both map to the key
/// `(3, 5)`.  The smaller pip always comes first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileKey {
    pub low: u8,
    pub high: u8,
}

impl fmt::Display for TileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.low, self.high)
    }
}

/// The two pip values of a domino, in the order they are currently drawn.
///
/// The order matters for rendering (which half faces which neighbour) but not
/// for identity; see [`Sides::key`].  Values are stored unchecked because they
/// arrive from server snapshots; call [`Sides::validate`] before trusting them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sides(pub [u8; 2]);

impl Sides {
    /// Creates a pip pair without range checking.
    pub const fn new(first: u8, second: u8) -> Self {
        Self([first, second])
    }

    /// Pip value drawn on the first half.
    pub fn first(&self) -> u8 {
        self.0[0]
    }

    /// Pip value drawn on the second half.
    pub fn second(&self) -> u8 {
        self.0[1]
    }

    /// Returns `true` when both halves carry the same pip count.
    pub fn is_double(&self) -> bool {
        self.0[0] == self.0[1]
    }

    /// Returns `true` if either half shows `pip`.
    pub fn contains(&self, pip: u8) -> bool {
        self.0[0] == pip || self.0[1] == pip
    }

    /// Returns the same domino with its halves swapped.
    pub fn flipped(&self) -> Self {
        Self([self.0[1], self.0[0]])
    }

    /// Order-independent identity of this domino.
    pub fn key(&self) -> TileKey {
        TileKey {
            low: self.0[0].min(self.0[1]),
            high: self.0[0].max(self.0[1]),
        }
    }

    /// Returns the first pip outside `0..=MAX_PIP`, if any.
    pub fn validate(&self) -> Result<(), u8> {
        match self.0.iter().find(|&&pip| pip > MAX_PIP) {
            Some(&pip) => Err(pip),
            None => Ok(()),
        }
    }
}

impl From<[u8; 2]> for Sides {
    fn from(pair: [u8; 2]) -> Self {
        Self(pair)
    }
}

impl fmt::Display for Sides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}|{}]", self.0[0], self.0[1])
    }
}

/// Errors raised while building a [`BoardTree`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// The parent tile does not exist in this tree.
    #[error("tile not found: {0}")]
    UnknownTile(TileId),

    /// The parent tile has no open attachment slot left.
    #[error("tile {parent} already has {capacity} attached tile(s)")]
    SlotsExhausted { parent: TileId, capacity: usize },
}

/// One played domino and the tiles attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    /// Pip values as recorded by the server.
    pub sides: Sides,
    /// Rendered face-down when `true`.
    pub closed: bool,
    /// Attached tiles in slot order.
    pub children: Vec<TileId>,
}

/// The tree of played tiles, rooted at the origin tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardTree {
    tiles: Vec<Tile>,
}

impl BoardTree {
    /// Creates a board holding only the origin tile.
    pub fn new(origin: Sides) -> Self {
        Self {
            tiles: vec![Tile {
                sides: origin,
                closed: false,
                children: Vec::new(),
            }],
        }
    }

    /// Attaches a face-up tile to `parent` in its next free slot.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::UnknownTile`] if `parent` is not in this tree and
    /// [`BoardError::SlotsExhausted`] if every slot of `parent` is taken.
    pub fn attach(&mut self, parent: TileId, sides: Sides) -> Result<TileId, BoardError> {
        self.attach_tile(parent, sides, false)
    }

    /// Attaches a tile with an explicit face-down flag.
    ///
    /// # Errors
    ///
    /// Same as [`BoardTree::attach`].
    pub fn attach_tile(
        &mut self,
        parent: TileId,
        sides: Sides,
        closed: bool,
    ) -> Result<TileId, BoardError> {
        let capacity = self.capacity(parent)?;
        let parent_tile = &self.tiles[parent.0];
        if parent_tile.children.len() >= capacity {
            return Err(BoardError::SlotsExhausted { parent, capacity });
        }

        let id = TileId(self.tiles.len());
        self.tiles.push(Tile {
            sides,
            closed,
            children: Vec::new(),
        });
        self.tiles[parent.0].children.push(id);
        Ok(id)
    }

    /// Marks the origin tile as face-down or face-up.
    pub fn set_root_closed(&mut self, closed: bool) {
        self.tiles[TileId::ROOT.0].closed = closed;
    }

    /// Returns the tile with the given id.
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// Returns the origin tile.
    pub fn root(&self) -> &Tile {
        &self.tiles[TileId::ROOT.0]
    }

    /// Number of tiles on the board.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always `false`: a tree holds at least its origin tile.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates over all tiles with their ids, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &Tile)> {
        self.tiles.iter().enumerate().map(|(i, t)| (TileId(i), t))
    }

    /// Maximum number of children `id` may carry.
    fn capacity(&self, id: TileId) -> Result<usize, BoardError> {
        let tile = self.tiles.get(id.0).ok_or(BoardError::UnknownTile(id))?;
        Ok(if tile.sides.is_double() {
            DOUBLE_SLOTS
        } else if id == TileId::ROOT {
            ROOT_SLOTS
        } else {
            CHAIN_SLOTS
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Sides ─────────────────────────────────────────────────────────────────

    #[test]
    fn test_sides_is_double_when_halves_match() {
        assert!(Sides::new(4, 4).is_double());
        assert!(!Sides::new(4, 5).is_double());
    }

    #[test]
    fn test_key_is_order_independent() {
        assert_eq!(Sides::new(5, 2).key(), Sides::new(2, 5).key());
        assert_eq!(Sides::new(5, 2).key(), TileKey { low: 2, high: 5 });
    }

    #[test]
    fn test_flipped_preserves_identity() {
        let sides = Sides::new(1, 6);
        assert_eq!(sides.flipped(), Sides::new(6, 1));
        assert_eq!(sides.flipped().key(), sides.key());
    }

    #[test]
    fn test_validate_accepts_full_range() {
        assert_eq!(Sides::new(0, 6).validate(), Ok(()));
    }

    #[test]
    fn test_validate_reports_out_of_range_pip() {
        assert_eq!(Sides::new(2, 7).validate(), Err(7));
        assert_eq!(Sides::new(9, 1).validate(), Err(9));
    }

    #[test]
    fn test_sides_display() {
        assert_eq!(Sides::new(3, 4).to_string(), "[3|4]");
        assert_eq!(Sides::new(4, 3).key().to_string(), "[3|4]");
    }

    #[test]
    fn test_sides_deserialize_from_json_array() {
        let sides: Sides = serde_json::from_str("[2, 5]").unwrap();
        assert_eq!(sides, Sides::new(2, 5));
    }

    // ── BoardTree ─────────────────────────────────────────────────────────────

    #[test]
    fn test_new_tree_holds_only_origin() {
        let tree = BoardTree::new(Sides::new(6, 6));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.root().sides, Sides::new(6, 6));
        assert!(tree.root().children.is_empty());
    }

    #[test]
    fn test_attach_records_child_in_slot_order() {
        let mut tree = BoardTree::new(Sides::new(3, 3));
        let east = tree.attach(TileId::ROOT, Sides::new(3, 4)).unwrap();
        let west = tree.attach(TileId::ROOT, Sides::new(3, 1)).unwrap();

        assert_eq!(tree.root().children, vec![east, west]);
        assert_eq!(tree.get(west).unwrap().sides, Sides::new(3, 1));
    }

    #[test]
    fn test_double_accepts_four_children() {
        let mut tree = BoardTree::new(Sides::new(2, 2));
        for other in [0, 1, 3, 4] {
            tree.attach(TileId::ROOT, Sides::new(2, other)).unwrap();
        }
        assert_eq!(
            tree.attach(TileId::ROOT, Sides::new(2, 5)),
            Err(BoardError::SlotsExhausted { parent: TileId::ROOT, capacity: 4 })
        );
    }

    #[test]
    fn test_non_double_root_accepts_two_children() {
        let mut tree = BoardTree::new(Sides::new(1, 2));
        tree.attach(TileId::ROOT, Sides::new(2, 5)).unwrap();
        tree.attach(TileId::ROOT, Sides::new(1, 4)).unwrap();
        assert!(matches!(
            tree.attach(TileId::ROOT, Sides::new(1, 6)),
            Err(BoardError::SlotsExhausted { capacity: 2, .. })
        ));
    }

    #[test]
    fn test_chain_tile_accepts_one_child() {
        let mut tree = BoardTree::new(Sides::new(1, 2));
        let chain = tree.attach(TileId::ROOT, Sides::new(2, 5)).unwrap();
        tree.attach(chain, Sides::new(5, 0)).unwrap();
        assert_eq!(
            tree.attach(chain, Sides::new(5, 6)),
            Err(BoardError::SlotsExhausted { parent: chain, capacity: 1 })
        );
    }

    #[test]
    fn test_attach_to_unknown_parent_fails() {
        let mut tree = BoardTree::new(Sides::new(1, 2));
        assert_eq!(
            tree.attach(TileId(7), Sides::new(2, 2)),
            Err(BoardError::UnknownTile(TileId(7)))
        );
    }

    #[test]
    fn test_attach_tile_keeps_closed_flag() {
        let mut tree = BoardTree::new(Sides::new(1, 2));
        let id = tree.attach_tile(TileId::ROOT, Sides::new(2, 2), true).unwrap();
        assert!(tree.get(id).unwrap().closed);
    }

    #[test]
    fn test_iter_yields_ids_in_insertion_order() {
        let mut tree = BoardTree::new(Sides::new(1, 2));
        tree.attach(TileId::ROOT, Sides::new(2, 3)).unwrap();
        let ids: Vec<TileId> = tree.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![TileId(0), TileId(1)]);
    }
}
