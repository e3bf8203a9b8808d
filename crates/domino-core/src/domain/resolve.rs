//! Move resolution: turning a click on the board into a legal move.
//!
//! The player first picks a tile from their hand, then clicks next to the
//! board tile they want to play it on.  The resolver finds the board tile
//! closest to the click (using the positions from the last layout pass) and
//! looks for a server-declared [`LegalMove`] that attaches the selected hand
//! tile to it.
//!
//! Resolution misses are not errors: clicking empty space, or next to a tile
//! the selected piece cannot be played on, simply yields `None`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::domain::geometry::{Point, Viewport};
use crate::domain::layout::{PositionRegistry, DEFAULT_TILE_WIDTH};
use crate::domain::tile::{Sides, TileKey};

/// A move the server currently allows: attach `piece_sides` from the hand to
/// the board tile `origin_sides`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalMove {
    /// The tile already on the board.
    #[serde(alias = "originSides")]
    pub origin_sides: Sides,
    /// The hand tile to attach.
    #[serde(alias = "pieceSides")]
    pub piece_sides: Sides,
}

impl LegalMove {
    pub fn new(origin_sides: Sides, piece_sides: Sides) -> Self {
        Self {
            origin_sides,
            piece_sides,
        }
    }

    /// Returns `true` if this move attaches `piece` to `origin`, ignoring the
    /// order of pips on either tile.
    pub fn matches(&self, origin: TileKey, piece: TileKey) -> bool {
        self.origin_sides.key() == origin && self.piece_sides.key() == piece
    }
}

/// The registered tile nearest to a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub key: TileKey,
    pub position: Point,
    pub distance: f64,
}

/// Nearest-tile hit tester.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolver {
    tolerance: f64,
}

impl MoveResolver {
    /// Creates a resolver accepting tiles within `tolerance` board pixels.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Maximum accepted distance from a tile centre.
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Finds the registered tile closest to `point` within tolerance.
    ///
    /// Ties go to the tile placed first.
    pub fn closest_tile(&self, point: Point, registry: &PositionRegistry) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for (key, position) in registry.entries() {
            let distance = point.distance(position);
            if distance > self.tolerance {
                continue;
            }
            if best.map_or(true, |b| distance < b.distance) {
                best = Some(Hit {
                    key,
                    position,
                    distance,
                });
            }
        }
        best
    }

    /// Resolves a click to the index of a legal move.
    ///
    /// `pointer` is in screen coordinates; `viewport` undoes the current pan.
    /// Returns `None` when nothing is selected, when no tile lies within
    /// tolerance, or when no legal move attaches `selected` to the nearest
    /// tile.
    pub fn resolve(
        &self,
        pointer: Point,
        viewport: &Viewport,
        registry: &PositionRegistry,
        selected: Option<Sides>,
        legal_moves: &[LegalMove],
    ) -> Option<usize> {
        let selected = selected?.key();
        let board_point = viewport.to_board(pointer);

        let hit = self.closest_tile(board_point, registry)?;
        trace!(
            "click at {board_point} is {:.1}px from {}",
            hit.distance,
            hit.key
        );

        legal_moves
            .iter()
            .position(|m| m.matches(hit.key, selected))
    }
}

impl Default for MoveResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TILE_WIDTH)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::layout::LayoutEngine;
    use crate::domain::tile::{BoardTree, TileId};

    const W: f64 = DEFAULT_TILE_WIDTH;

    fn single_tile_at(x: f64, y: f64) -> PositionRegistry {
        let tree = BoardTree::new(Sides::new(2, 5));
        LayoutEngine::default()
            .layout(&tree, Point::new(x, y))
            .unwrap()
    }

    /// `[3|3]` at (500, 500) with `[3|4]` in slot 0.
    fn scenario() -> PositionRegistry {
        let mut tree = BoardTree::new(Sides::new(3, 3));
        tree.attach(TileId::ROOT, Sides::new(3, 4)).unwrap();
        LayoutEngine::default()
            .layout(&tree, Point::new(500.0, 500.0))
            .unwrap()
    }

    fn moves() -> Vec<LegalMove> {
        vec![LegalMove::new(Sides::new(3, 4), Sides::new(4, 5))]
    }

    // ── closest_tile ──────────────────────────────────────────────────────────

    #[test]
    fn test_closest_tile_within_tolerance() {
        let registry = single_tile_at(100.0, 100.0);
        let hit = MoveResolver::default()
            .closest_tile(Point::new(100.0 + W - 1.0, 100.0), &registry)
            .unwrap();
        assert_eq!(hit.key, Sides::new(2, 5).key());
        assert_eq!(hit.distance, W - 1.0);
    }

    #[test]
    fn test_closest_tile_beyond_tolerance_is_none() {
        let registry = single_tile_at(100.0, 100.0);
        let hit = MoveResolver::default().closest_tile(Point::new(100.0, 100.0 + W + 1.0), &registry);
        assert!(hit.is_none());
    }

    #[test]
    fn test_closest_tile_picks_minimum_distance() {
        let registry = scenario();
        let hit = MoveResolver::default()
            .closest_tile(Point::new(500.0 + 1.2 * W, 500.0), &registry)
            .unwrap();
        assert_eq!(hit.key, Sides::new(3, 4).key());
    }

    #[test]
    fn test_closest_tile_tie_goes_to_first_placed() {
        let registry = scenario();
        let midpoint = Point::new(500.0 + 0.75 * W, 500.0);
        let hit = MoveResolver::default().closest_tile(midpoint, &registry).unwrap();
        assert_eq!(hit.key, Sides::new(3, 3).key());
    }

    #[test]
    fn test_coincident_centres_always_hit_first_placed() {
        // [3|4] root with [3|0] west; [0|2] folds back onto the root's centre.
        let mut tree = BoardTree::new(Sides::new(3, 4));
        tree.attach(TileId::ROOT, Sides::new(4, 6)).unwrap();
        let west = tree.attach(TileId::ROOT, Sides::new(3, 0)).unwrap();
        tree.attach(west, Sides::new(0, 2)).unwrap();
        let registry = LayoutEngine::default()
            .layout(&tree, Point::new(500.0, 500.0))
            .unwrap();
        let resolver = MoveResolver::default();
        let moves = vec![LegalMove::new(Sides::new(0, 2), Sides::new(2, 5))];

        for dx in [-10.0, 0.0, 10.0] {
            let pointer = Point::new(500.0 + dx, 500.0);
            let hit = resolver.closest_tile(pointer, &registry).unwrap();
            assert_eq!(hit.key, Sides::new(3, 4).key());
            assert_eq!(
                resolver.resolve(
                    pointer,
                    &Viewport::default(),
                    &registry,
                    Some(Sides::new(2, 5)),
                    &moves,
                ),
                None
            );
        }
    }

    // ── resolve ───────────────────────────────────────────────────────────────

    #[test]
    fn test_resolve_without_selection_is_none() {
        let registry = scenario();
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W, 500.0),
            &Viewport::default(),
            &registry,
            None,
            &moves(),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_resolve_matches_legal_move_index() {
        let registry = scenario();
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W + 3.0, 502.0),
            &Viewport::default(),
            &registry,
            Some(Sides::new(4, 5)),
            &moves(),
        );
        assert_eq!(result, Some(0));
    }

    #[test]
    fn test_resolve_is_order_insensitive_for_selection_and_moves() {
        let registry = scenario();
        let moves = vec![
            LegalMove::new(Sides::new(3, 3), Sides::new(5, 4)),
            LegalMove::new(Sides::new(4, 3), Sides::new(5, 4)),
        ];
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W, 500.0),
            &Viewport::default(),
            &registry,
            Some(Sides::new(4, 5)),
            &moves,
        );
        assert_eq!(result, Some(1));
    }

    #[test]
    fn test_resolve_far_click_is_none() {
        let registry = scenario();
        let result = MoveResolver::default().resolve(
            Point::new(0.0, 0.0),
            &Viewport::default(),
            &registry,
            Some(Sides::new(4, 5)),
            &moves(),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_resolve_wrong_piece_is_none() {
        let registry = scenario();
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W, 500.0),
            &Viewport::default(),
            &registry,
            Some(Sides::new(4, 6)),
            &moves(),
        );
        assert_eq!(result, None);
    }

    #[test]
    fn test_resolve_subtracts_pan() {
        let registry = scenario();
        let viewport = Viewport::new(Point::new(-200.0, 50.0));
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W - 200.0, 550.0),
            &viewport,
            &registry,
            Some(Sides::new(4, 5)),
            &moves(),
        );
        assert_eq!(result, Some(0));
    }

    #[test]
    fn test_resolve_returns_first_matching_move() {
        let registry = scenario();
        let moves = vec![
            LegalMove::new(Sides::new(3, 4), Sides::new(4, 5)),
            LegalMove::new(Sides::new(3, 4), Sides::new(5, 4)),
        ];
        let result = MoveResolver::default().resolve(
            Point::new(500.0 + 1.5 * W, 500.0),
            &Viewport::default(),
            &registry,
            Some(Sides::new(4, 5)),
            &moves,
        );
        assert_eq!(result, Some(0));
    }

    #[test]
    fn test_legal_move_accepts_camel_case_fields() {
        let m: LegalMove =
            serde_json::from_str(r#"{"originSides":[3,4],"pieceSides":[4,5]}"#).unwrap();
        assert_eq!(m, LegalMove::new(Sides::new(3, 4), Sides::new(4, 5)));
    }
}
