//! The player's current hand-tile selection.

use domino_core::Sides;

/// At most one selected hand tile.
///
/// Tapping an unselected tile selects it, tapping the selected tile again
/// deselects it, and tapping a different tile replaces the selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<Sides>,
}

impl Selection {
    /// The selected tile, if any.
    pub fn current(&self) -> Option<Sides> {
        self.current
    }

    /// Applies a tap on `sides` and returns the resulting selection.
    pub fn tap(&mut self, sides: Sides) -> Option<Sides> {
        self.current = match self.current {
            Some(selected) if selected.key() == sides.key() => None,
            _ => Some(sides),
        };
        self.current
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Drops the selection unless `keep` accepts it.
    pub fn retain(&mut self, keep: impl FnOnce(Sides) -> bool) {
        if let Some(selected) = self.current {
            if !keep(selected) {
                self.current = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tap_selects_when_empty() {
        let mut selection = Selection::default();
        assert_eq!(selection.tap(Sides::new(4, 5)), Some(Sides::new(4, 5)));
    }

    #[test]
    fn test_tap_same_tile_deselects() {
        let mut selection = Selection::default();
        selection.tap(Sides::new(4, 5));
        // Same domino, pips given in the other order.
        assert_eq!(selection.tap(Sides::new(5, 4)), None);
    }

    #[test]
    fn test_tap_other_tile_replaces() {
        let mut selection = Selection::default();
        selection.tap(Sides::new(4, 5));
        assert_eq!(selection.tap(Sides::new(0, 1)), Some(Sides::new(0, 1)));
    }

    #[test]
    fn test_retain_drops_rejected_selection() {
        let mut selection = Selection::default();
        selection.tap(Sides::new(4, 5));
        selection.retain(|_| false);
        assert_eq!(selection.current(), None);
    }

    #[test]
    fn test_clear() {
        let mut selection = Selection::default();
        selection.tap(Sides::new(2, 2));
        selection.clear();
        assert_eq!(selection.current(), None);
    }
}
