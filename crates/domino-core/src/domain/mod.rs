//! Domain entities for the domino client.
//!
//! This module contains pure game-board logic with no infrastructure
//! dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain**.  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from rendering toolkits, network libraries, or the
//!   file system.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the domain is the geometry of a domino board: where each played tile
//! sits, which way it faces, and which tile a click lands on.

/// 2-D points, cardinal rotations, and the pan viewport.
pub mod geometry;

/// Recursive placement of the board tree into board coordinates.
///
/// See [`layout::LayoutEngine`] for the main type.
pub mod layout;

/// Nearest-tile hit-testing and legal-move matching.
pub mod resolve;

/// Pip pairs, tile identity, and the arena-backed board tree.
pub mod tile;
