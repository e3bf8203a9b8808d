//! PlaySession: turns snapshots and pointer gestures into submitted moves.
//!
//! The session is the only owner of the [`PositionRegistry`].  Every call to
//! [`PlaySession::refresh`] runs a full layout pass and replaces the registry
//! only if the pass succeeded, so a click is always resolved against the
//! positions of the board the player is looking at.
//!
//! # Lifecycle
//!
//! ```text
//! refresh(state)   ── layout ──▶ registry replaced, legal moves armed
//! tap_hand_tile()  ── selection toggled / replaced
//! click(pointer)   ── resolve ──▶ sink.submit(index), selection cleared,
//!                                 legal moves disarmed until next refresh
//! ```
//!
//! # Architecture
//!
//! The session depends only on the [`MoveSink`] trait and `domino-core`
//! domain types.  The real sink is injected at construction time, making the
//! use case fully unit-testable.

use domino_core::{
    GameState, LayoutEngine, LayoutError, LayoutSettings, LegalMove, MoveResolver, Point,
    PositionRegistry, Sides, StateError, Viewport,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::application::selection::Selection;

/// Error returned by a [`MoveSink`].
#[derive(Debug, Error)]
pub enum SinkError {
    /// The receiving side refused the move.
    #[error("move {index} rejected: {reason}")]
    Rejected { index: usize, reason: String },

    #[error("move submission failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Error type for the play-session use case.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No snapshot has been received yet.
    #[error("no game state loaded")]
    NoState,

    /// The tapped tile is not in this player's hand.
    #[error("tile {0} is not in hand")]
    NotInHand(Sides),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Receives the index of the legal move the player chose.
///
/// The infrastructure implementation forwards it to the game server; test
/// implementations record calls.
#[cfg_attr(test, mockall::automock)]
pub trait MoveSink {
    /// Requests that the legal move at `move_index` be played.
    fn submit(&mut self, move_index: usize) -> Result<(), SinkError>;
}

/// What a board click led to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// No hand tile is selected; the click was ignored.
    NoSelection,
    /// No legal move matches; the selection is kept for another try.
    Missed,
    /// The move at this index was submitted.
    Submitted(usize),
}

/// Layout and hit-testing parameters for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    pub layout: LayoutSettings,
    /// Board-space centre of the origin tile.
    pub origin: Point,
    /// Maximum click distance from a tile centre.
    pub tolerance: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        let layout = LayoutSettings::default();
        Self {
            layout,
            origin: Point::new(500.0, 500.0),
            tolerance: layout.tile_width,
        }
    }
}

/// The play-session use case.
pub struct PlaySession<S: MoveSink> {
    engine: LayoutEngine,
    resolver: MoveResolver,
    origin: Point,
    viewport: Viewport,
    selection: Selection,
    state: Option<GameState>,
    registry: PositionRegistry,
    /// Cleared once a move from the current snapshot has been submitted.
    moves_armed: bool,
    sink: S,
}

impl<S: MoveSink> PlaySession<S> {
    /// Creates a session with no snapshot loaded.
    pub fn new(settings: SessionSettings, sink: S) -> Self {
        Self {
            engine: LayoutEngine::new(settings.layout),
            resolver: MoveResolver::new(settings.tolerance),
            origin: settings.origin,
            viewport: Viewport::default(),
            selection: Selection::default(),
            state: None,
            registry: PositionRegistry::default(),
            moves_armed: false,
            sink,
        }
    }

    /// Applies a new snapshot from the game server.
    ///
    /// On failure the previous snapshot and registry stay in place.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::State`] if the board breaks slot rules and
    /// [`SessionError::Layout`] if the layout pass fails.
    pub fn refresh(&mut self, state: GameState) -> Result<(), SessionError> {
        let registry = match state.board_tree()? {
            Some(tree) => self.engine.layout(&tree, self.origin)?,
            None => PositionRegistry::default(),
        };

        let hand = &state.hands;
        self.selection.retain(|selected| hand.holds(selected));
        debug!(
            "snapshot for game {} applied: {} tile(s) on board, {} legal move(s)",
            state.game_id,
            registry.len(),
            state.legal_moves.len()
        );

        self.registry = registry;
        self.state = Some(state);
        self.moves_armed = true;
        Ok(())
    }

    /// Handles a tap on a tile in the player's hand.
    ///
    /// Returns the selection after the tap.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoState`] before the first snapshot and
    /// [`SessionError::NotInHand`] if `sides` is not in the hand.
    pub fn tap_hand_tile(&mut self, sides: Sides) -> Result<Option<Sides>, SessionError> {
        let state = self.state.as_ref().ok_or(SessionError::NoState)?;
        if !state.hands.holds(sides) {
            return Err(SessionError::NotInHand(sides));
        }
        Ok(self.selection.tap(sides))
    }

    /// Handles a click on the board at screen position `pointer`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoState`] before the first snapshot and
    /// [`SessionError::Sink`] if submission fails; the selection is kept in
    /// that case.
    pub fn click(&mut self, pointer: Point) -> Result<ClickOutcome, SessionError> {
        if self.state.is_none() {
            return Err(SessionError::NoState);
        }
        let Some(selected) = self.selection.current() else {
            return Ok(ClickOutcome::NoSelection);
        };

        let resolved = self.resolver.resolve(
            pointer,
            &self.viewport,
            &self.registry,
            Some(selected),
            self.legal_moves(),
        );
        let Some(index) = resolved else {
            debug!("click at {pointer} matched no legal move for {selected}");
            return Ok(ClickOutcome::Missed);
        };

        if let Err(e) = self.sink.submit(index) {
            warn!("submitting move {index} failed: {e}");
            return Err(e.into());
        }
        info!("submitted move {index}: {selected}");
        self.selection.clear();
        self.moves_armed = false;
        Ok(ClickOutcome::Submitted(index))
    }

    /// Legal moves that can still be submitted from the current snapshot.
    pub fn legal_moves(&self) -> &[LegalMove] {
        match &self.state {
            Some(state) if self.moves_armed => &state.legal_moves,
            _ => &[],
        }
    }

    /// Shifts the board on screen by `(dx, dy)`.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.viewport.pan_by(dx, dy);
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Positions from the most recent successful layout pass.
    pub fn registry(&self) -> &PositionRegistry {
        &self.registry
    }

    pub fn selection(&self) -> Option<Sides> {
        self.selection.current()
    }

    pub fn state(&self) -> Option<&GameState> {
        self.state.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
