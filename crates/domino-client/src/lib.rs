//! domino-client library crate.
//!
//! Re-exports all public modules so that integration tests in `tests/` and
//! the binary entry point in `main.rs` share the same module tree.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! Game server (JSON snapshots, move submissions)
//!         ↕
//! [domino-client]
//!   ├── application/      Play session: selection, layout-then-resolve, submit
//!   └── infrastructure/
//!         ├── config/     TOML configuration file
//!         ├── source/     Game-state snapshot loading
//!         ├── sink/       Move submission output
//!         └── render/     Text presentation of the laid-out board
//!         ↕
//! [domino-core]  Board tree, layout engine, move resolver
//! ```

/// Application layer: the play session use case.
pub mod application;

/// Infrastructure layer: configuration, snapshot source, sink, presentation.
pub mod infrastructure;
