//! Infrastructure layer for the domino client.
//!
//! Everything that touches the outside world lives here: the TOML config
//! file, snapshot files, the move output stream, and text presentation.

pub mod config;
pub mod render;
pub mod sink;
pub mod source;
