//! Application layer use cases for the domino client.
//!
//! Use cases in this layer orchestrate `domino-core` domain objects to fulfil
//! a player goal, depend on traits rather than concrete infrastructure, and
//! perform no I/O of their own.
//!
//! # Sub-modules
//!
//! - **`selection`**    – Which hand tile, if any, the player has picked.
//! - **`play_session`** – Lays out each new snapshot, resolves board clicks
//!   into legal moves, and hands them to a [`play_session::MoveSink`].

pub mod play_session;
pub mod selection;
