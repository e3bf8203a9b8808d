//! Domino client: command-line entry point.
//!
//! Loads a game-state snapshot, lays out the board, prints it, and optionally
//! replays one "select a hand tile, click the board" gesture.  A resolved move
//! is written to standard output as `move <index>` for the process that talks
//! to the game server.
//!
//! # Usage
//!
//! ```text
//! domino-client --state <PATH> [OPTIONS]
//!
//! Options:
//!   --config     <PATH>  TOML config file [default: domino-client.toml]
//!   --state      <PATH>  Game-state snapshot (JSON)
//!   --select     <A,B>   Hand tile to select, e.g. 4,5
//!   --click      <X,Y>   Screen position of the click
//!   --pan        <DX,DY> Current board pan offset [default: 0,0]
//!   --tile-width <PX>    Override the configured tile width
//!   --save-config        Write the effective config back to --config
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable             | Description               |
//! |----------------------|---------------------------|
//! | `DOMINO_CONFIG`      | Config file path          |
//! | `DOMINO_STATE`       | Snapshot file path        |
//! | `RUST_LOG`           | Log filter (wins over the config's `log_level`) |

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use domino_client::application::play_session::{ClickOutcome, PlaySession};
use domino_client::infrastructure::config::{load_config, save_config};
use domino_client::infrastructure::render::{render_board_text, render_hand_text};
use domino_client::infrastructure::sink::LineMoveSink;
use domino_client::infrastructure::source::load_state;
use domino_core::{Point, Sides};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Domino board client.
///
/// Lays out the board from a game-state snapshot and resolves a click into a
/// legal move.
#[derive(Debug, Parser)]
#[command(
    name = "domino-client",
    about = "Lay out a domino board and resolve clicks into legal moves",
    version
)]
struct Cli {
    /// Path to the TOML configuration file.  A missing file means defaults.
    #[arg(long, default_value = "domino-client.toml", env = "DOMINO_CONFIG")]
    config: PathBuf,

    /// Path to the game-state snapshot JSON.
    #[arg(long, env = "DOMINO_STATE")]
    state: PathBuf,

    /// Hand tile to select before clicking, as `a,b`.
    #[arg(long, value_parser = parse_sides)]
    select: Option<Sides>,

    /// Screen position of the click, as `x,y`.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    click: Option<Point>,

    /// Current board pan offset, as `dx,dy`.
    #[arg(long, value_parser = parse_point, default_value = "0,0", allow_hyphen_values = true)]
    pan: Point,

    /// Overrides `layout.tile_width` from the config file.
    #[arg(long)]
    tile_width: Option<f64>,

    /// Writes the effective configuration (overrides applied) to `--config`.
    #[arg(long)]
    save_config: bool,
}

/// Splits `text` at a single comma into two trimmed halves.
fn split_pair(text: &str) -> Result<(&str, &str), String> {
    text.split_once(',')
        .map(|(a, b)| (a.trim(), b.trim()))
        .ok_or_else(|| format!("expected two comma-separated values, got '{text}'"))
}

fn parse_sides(text: &str) -> Result<Sides, String> {
    let (a, b) = split_pair(text)?;
    let a: u8 = a.parse().map_err(|e| format!("invalid pip '{a}': {e}"))?;
    let b: u8 = b.parse().map_err(|e| format!("invalid pip '{b}': {e}"))?;
    Ok(Sides::new(a, b))
}

fn parse_point(text: &str) -> Result<Point, String> {
    let (x, y) = split_pair(text)?;
    let x: f64 = x.parse().map_err(|e| format!("invalid coordinate '{x}': {e}"))?;
    let y: f64 = y.parse().map_err(|e| format!("invalid coordinate '{y}': {e}"))?;
    Ok(Point::new(x, y))
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Program entry point.
///
/// 1. CLI arguments are parsed with `clap`.
/// 2. The config file is loaded (defaults if absent) and `tracing_subscriber`
///    is initialised; `RUST_LOG` wins over the configured level.
/// 3. The snapshot is loaded and laid out by a [`PlaySession`].
/// 4. If `--select` and `--click` are given, the gesture is replayed and any
///    resolved move is written to standard output.
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)
        .with_context(|| format!("failed to load config from {}", cli.config.display()))?;
    if let Some(width) = cli.tile_width {
        config.layout.tile_width = width;
        config
            .validate()
            .context("invalid --tile-width override")?;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.client.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if cli.save_config {
        save_config(&cli.config, &config)
            .with_context(|| format!("failed to save config to {}", cli.config.display()))?;
        info!("configuration written to {}", cli.config.display());
    }

    let state = load_state(&cli.state)
        .with_context(|| format!("failed to load game state from {}", cli.state.display()))?;
    info!("loaded game {} from {}", state.game_id, cli.state.display());

    let mut session = PlaySession::new(config.session_settings(), LineMoveSink::stdout());
    session.refresh(state).context("failed to lay out board")?;
    session.pan_by(cli.pan.x, cli.pan.y);
    debug!("board pan offset {}", session.viewport().pan);

    if let Some(sides) = cli.select {
        session
            .tap_hand_tile(sides)
            .with_context(|| format!("cannot select {sides}"))?;
    }

    eprint!("{}", render_board_text(session.registry()));
    if let Some(state) = session.state() {
        eprint!("{}", render_hand_text(state, session.selection()));
    }

    if let Some(pointer) = cli.click {
        match session.click(pointer).context("failed to submit move")? {
            ClickOutcome::Submitted(index) => info!("move {index} submitted"),
            ClickOutcome::Missed => info!("click at {pointer} matched no legal move"),
            ClickOutcome::NoSelection => info!("click ignored: no hand tile selected"),
        }
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
