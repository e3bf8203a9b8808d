//! # domino-core
//!
//! Shared library for the domino client containing the board tree, the
//! layout engine, the move resolver, and the game-state snapshot types.
//!
//! It has zero dependencies on rendering surfaces, network sockets, or the
//! file system.
//!
//! # Architecture overview (for beginners)
//!
//! A domino board is a tree: the first tile played (the *origin*) sits in the
//! middle, and every later tile is attached to exactly one tile that is
//! already on the board.  Doubles (tiles like `[3|3]`) are special because
//! they open up to four attachment slots instead of two.
//!
//! This crate (`domino-core`) is the pure foundation.  It defines:
//!
//! - **`domain::tile`** – Pip pairs, order-independent tile identity, and the
//!   arena-backed [`BoardTree`].
//!
//! - **`domain::layout`** – The [`LayoutEngine`]: turns a [`BoardTree`] into a
//!   [`PositionRegistry`] of screen-space positions and rotations.
//!
//! - **`domain::resolve`** – The [`MoveResolver`]: turns a pointer click plus
//!   the selected hand tile into the index of a server-declared legal move.
//!
//! - **`state`** – Serde types for the game-state snapshot published by the
//!   game server.

// Declare the top-level modules.
pub mod domain;
pub mod state;

// Re-export the most-used types at the crate root so callers can write
// `domino_core::LayoutEngine` instead of `domino_core::domain::layout::LayoutEngine`.
pub use domain::geometry::{Point, Rotation, Viewport};
pub use domain::layout::{
    LayoutEngine, LayoutError, LayoutSettings, PlacedTile, PositionRegistry, RenderBudget,
};
pub use domain::resolve::{Hit, LegalMove, MoveResolver};
pub use domain::tile::{BoardError, BoardTree, Sides, Tile, TileId, TileKey, MAX_PIP};
pub use state::{GameState, HandState, StateError, TileNode};
