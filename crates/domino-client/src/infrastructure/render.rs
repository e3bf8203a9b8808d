//! Plain-text presentation of the board and hand.
//!
//! Drawing is driven entirely from a finished [`PositionRegistry`]; nothing
//! here computes geometry.

use std::fmt::Write;

use domino_core::{GameState, PlacedTile, PositionRegistry, Sides};

/// The area the board covers, then one line per placed tile in placement
/// order.  An empty board renders as an empty string.
///
/// ```text
/// board spans (480.0, 460.0) to (600.0, 540.0)
/// [3|3] at (500.0, 500.0) rot 90°
/// [3|4] at (560.0, 500.0) rot 0°
/// ```
pub fn render_board_text(registry: &PositionRegistry) -> String {
    let mut out = String::new();
    if let Some((min, max)) = registry.bounds() {
        let _ = writeln!(out, "board spans {min} to {max}");
    }
    for tile in registry.placed() {
        let _ = writeln!(
            out,
            "{} at {} rot {}°",
            face(tile),
            tile.position,
            tile.display_rotation().degrees()
        );
    }
    out
}

/// Summary of the hands and pool, marking the selected tile with `*`.
pub fn render_hand_text(state: &GameState, selected: Option<Sides>) -> String {
    let tiles: Vec<String> = state
        .hands
        .mine
        .iter()
        .map(|&sides| {
            let marker = match selected {
                Some(s) if s.key() == sides.key() => "*",
                _ => "",
            };
            format!("{marker}{sides}")
        })
        .collect();

    format!(
        "hand: {}\nopponent: {} tile(s), pool: {}, {}\n",
        if tiles.is_empty() {
            "(empty)".to_string()
        } else {
            tiles.join(" ")
        },
        state.hands.opponent_count,
        state.pool_count,
        if state.my_turn { "your turn" } else { "waiting" }
    )
}

fn face(tile: &PlacedTile) -> String {
    if tile.closed {
        "[#|#]".to_string()
    } else {
        tile.sides.to_string()
    }
}
