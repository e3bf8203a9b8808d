//! Board layout engine.
//!
//! The layout engine places every tile of a [`BoardTree`] into a unified 2-D
//! coordinate space ("board space").  The origin tile is anchored at a point
//! chosen by the caller; every other tile is positioned relative to its parent.
//!
//! # Coordinate frames (for beginners)
//!
//! Each tile carries a [`Rotation`].  A child's offset is first expressed in
//! its parent's *local* frame (e.g. "one and a half tile widths to the right")
//! and then rotated by the parent's rotation to get the offset on the board.
//! Because rotations accumulate down the tree, a chain that turns a corner at
//! a double keeps running in the new direction.
//!
//! Tiles are `tile_width` wide and twice as long.  Doubles are drawn across
//! the line of play (a fixed 90° visual twist), but the directions of their
//! four slots are computed in the untwisted frame.
//!
//! # Traversal
//!
//! The tree is walked depth-first with an explicit stack, never native
//! recursion, so deep boards cannot exhaust the thread stack.  A
//! [`RenderBudget`] bounds the number of tiles placed per pass.

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, error, warn};

use crate::domain::geometry::{Point, Rotation};
use crate::domain::tile::{BoardTree, Sides, Tile, TileId, TileKey};

/// Default tile width in board pixels.
pub const DEFAULT_TILE_WIDTH: f64 = 40.0;

/// Default maximum number of tiles placed in one layout pass.
///
/// A double-six set has 28 tiles, so a correct board never comes close.
pub const DEFAULT_RENDER_BUDGET: usize = 64;

/// Errors that abort a layout pass.
///
/// A failed pass never yields a partial [`PositionRegistry`].
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A pip value outside `0..=6` was found on the board.
    #[error("pip value {pip} out of range on tile {tile}")]
    PipOutOfRange { tile: TileId, pip: u8 },

    /// A computed rotation is not a multiple of 90°.
    #[error("unsupported rotation: {0} degrees")]
    UnsupportedRotation(i32),

    /// A tile occupies a slot its parent does not have.
    ///
    /// [`BoardTree::attach`] caps doubles at four children, so only a tree
    /// assembled some other way can produce this.
    #[error("tile {tile} attached in unsupported slot {slot}")]
    UnexpectedSlot { tile: TileId, slot: usize },

    /// More tiles than the render budget allows; the tree is oversized or
    /// malformed.
    #[error("layout aborted: render budget of {limit} tiles exceeded")]
    BudgetExceeded { limit: usize },
}

/// Upper bound on tiles placed in a single pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderBudget {
    pub max_tiles: usize,
}

impl Default for RenderBudget {
    fn default() -> Self {
        Self {
            max_tiles: DEFAULT_RENDER_BUDGET,
        }
    }
}

/// Tunables for the [`LayoutEngine`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSettings {
    /// Width of one tile in board pixels.  Tiles are twice as long.
    pub tile_width: f64,
    /// Per-pass placement cap.
    pub budget: RenderBudget,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            tile_width: DEFAULT_TILE_WIDTH,
            budget: RenderBudget::default(),
        }
    }
}

/// A tile after layout: where it sits and which way it faces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedTile {
    /// Arena index of the tile in the source tree.
    pub id: TileId,
    /// Pip values, flipped if needed so the correct half faces the parent.
    pub sides: Sides,
    pub closed: bool,
    /// Centre of the tile in board space.
    pub position: Point,
    /// Frame rotation that children are laid out in.
    pub rotation: Rotation,
}

impl PlacedTile {
    /// Rotation to draw the tile with.
    ///
    /// Doubles are drawn across the line of play, i.e. a quarter turn past
    /// their frame rotation.
    pub fn display_rotation(&self) -> Rotation {
        if self.sides.is_double() {
            Rotation::from_degrees(self.rotation.degrees() + 90).unwrap_or(self.rotation)
        } else {
            self.rotation
        }
    }

    /// Order-independent identity of the placed tile.
    pub fn key(&self) -> TileKey {
        self.sides.key()
    }

    /// Half width and half height of the drawn tile for a given tile width.
    pub fn half_extents(&self, tile_width: f64) -> Point {
        match self.display_rotation() {
            Rotation::Deg0 | Rotation::Deg180 => Point::new(tile_width, tile_width / 2.0),
            Rotation::Deg90 | Rotation::Deg270 => Point::new(tile_width / 2.0, tile_width),
        }
    }
}

/// Tile positions produced by one layout pass.
///
/// Keyed by [`TileKey`], so lookups do not depend on which way a tile was
/// flipped.  Entries are kept in placement order; that order decides ties
/// during hit-testing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionRegistry {
    placed: Vec<PlacedTile>,
    index: HashMap<TileKey, usize>,
    tile_width: f64,
}

impl PositionRegistry {
    /// Position of the tile with the given identity.
    pub fn position(&self, key: TileKey) -> Option<Point> {
        self.index.get(&key).map(|&i| self.placed[i].position)
    }

    /// Placed tile with the given identity.
    pub fn get(&self, key: TileKey) -> Option<&PlacedTile> {
        self.index.get(&key).map(|&i| &self.placed[i])
    }

    /// Every tile drawn during the pass, in placement order.
    pub fn placed(&self) -> &[PlacedTile] {
        &self.placed
    }

    /// Registered identities with their positions, in placement order.
    ///
    /// When a key was placed twice only the later placement is yielded.
    pub fn entries(&self) -> impl Iterator<Item = (TileKey, Point)> + '_ {
        self.placed.iter().enumerate().filter_map(|(i, tile)| {
            let key = tile.key();
            (self.index.get(&key) == Some(&i)).then_some((key, tile.position))
        })
    }

    /// Number of distinct tile identities registered.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Tile width the pass was laid out with.
    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Top-left and bottom-right corners of the box covering every drawn
    /// tile, or `None` when empty.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = self.placed.first()?.position;
        let init = (first, first);
        Some(self.placed.iter().fold(init, |(min, max), tile| {
            let half = tile.half_extents(self.tile_width);
            let lo = tile.position - half;
            let hi = tile.position + half;
            (
                Point::new(min.x.min(lo.x), min.y.min(lo.y)),
                Point::new(max.x.max(hi.x), max.y.max(hi.y)),
            )
        }))
    }

    fn record(&mut self, tile: PlacedTile) {
        let key = tile.key();
        if self.index.contains_key(&key) {
            warn!("tile {key} placed more than once; keeping the later position");
        }
        self.index.insert(key, self.placed.len());
        self.placed.push(tile);
    }
}

/// One pending placement on the traversal stack.
struct Frame {
    tile: TileId,
    slot: usize,
    parent: PlacedTile,
}

/// Places board trees into board space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    settings: LayoutSettings,
}

impl LayoutEngine {
    pub fn new(settings: LayoutSettings) -> Self {
        Self { settings }
    }

    /// Width of one tile in board pixels.
    pub fn tile_width(&self) -> f64 {
        self.settings.tile_width
    }

    /// Lays out `tree` with the origin tile centred on `origin`.
    ///
    /// Returns a fresh registry; the caller replaces any previous one with it.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::PipOutOfRange`] if any tile carries a pip above 6.
    /// - [`LayoutError::UnsupportedRotation`] if a rotation leaves the four
    ///   cardinal directions.
    /// - [`LayoutError::UnexpectedSlot`] if a double carries more than four
    ///   children.
    /// - [`LayoutError::BudgetExceeded`] if the tree has more tiles than the
    ///   render budget.
    pub fn layout(&self, tree: &BoardTree, origin: Point) -> Result<PositionRegistry, LayoutError> {
        // Validate everything up front so no pass fails halfway through.
        for (id, tile) in tree.iter() {
            tile.sides
                .validate()
                .map_err(|pip| LayoutError::PipOutOfRange { tile: id, pip })?;
        }

        let mut registry = PositionRegistry {
            tile_width: self.settings.tile_width,
            ..PositionRegistry::default()
        };
        let root = tree.root();
        let placed_root = PlacedTile {
            id: TileId::ROOT,
            sides: root.sides,
            closed: root.closed,
            position: origin,
            rotation: Rotation::Deg0,
        };
        self.record(&mut registry, placed_root)?;

        let mut stack: Vec<Frame> = Vec::with_capacity(tree.len());
        push_children(&mut stack, root, placed_root);

        while let Some(frame) = stack.pop() {
            let Some(tile) = tree.get(frame.tile) else {
                continue;
            };
            let placed = self.place_child(&frame, tile)?;
            self.record(&mut registry, placed)?;
            push_children(&mut stack, tile, placed);
        }

        debug!(
            "layout pass placed {} tile(s) from origin {}",
            registry.placed.len(),
            origin
        );
        Ok(registry)
    }

    /// Computes position, rotation, and orientation of one child tile.
    fn place_child(&self, frame: &Frame, tile: &Tile) -> Result<PlacedTile, LayoutError> {
        let parent = &frame.parent;

        let (sides, local, delta) = if parent.sides.is_double() {
            let (local, delta) = match frame.slot {
                0 => (Point::new(1.5, 0.0), 0),
                1 => (Point::new(-1.5, 0.0), 180),
                2 => (Point::new(0.0, 2.0), 90),
                3 => (Point::new(0.0, -2.0), -90),
                slot => {
                    return Err(LayoutError::UnexpectedSlot {
                        tile: frame.tile,
                        slot,
                    })
                }
            };
            (align_sides(parent.sides, tile.sides, delta), local, delta)
        } else {
            let sides = align_sides(parent.sides, tile.sides, 0);
            // Past the far end unless the child shares the parent's first pip.
            let direction = if sides.contains(parent.sides.first()) {
                -1.0
            } else {
                1.0
            };
            let magnitude = if sides.is_double() { 1.5 } else { 2.0 };
            (sides, Point::new(direction * magnitude, 0.0), 0)
        };

        let degrees = parent.rotation.degrees() + delta;
        let rotation =
            Rotation::from_degrees(degrees).ok_or(LayoutError::UnsupportedRotation(degrees))?;
        let offset = parent.rotation.apply(local.scale(self.settings.tile_width));

        Ok(PlacedTile {
            id: frame.tile,
            sides,
            closed: tile.closed,
            position: parent.position + offset,
            rotation,
        })
    }

    fn record(&self, registry: &mut PositionRegistry, tile: PlacedTile) -> Result<(), LayoutError> {
        let limit = self.settings.budget.max_tiles;
        if registry.placed.len() >= limit {
            error!("layout aborted after {limit} tiles; board tree is oversized or malformed");
            return Err(LayoutError::BudgetExceeded { limit });
        }
        registry.record(tile);
        Ok(())
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(LayoutSettings::default())
    }
}

/// Index of the half that touches the parent for a given relative rotation.
pub fn joint_side_index(relative_degrees: i32) -> usize {
    if relative_degrees.rem_euclid(360) == 180 {
        1
    } else {
        0
    }
}

/// Orders `child` so that its joint half shows one of the parent's pips.
///
/// The pair is swapped when the current order does not satisfy the rule,
/// even if the swapped order does not satisfy it either.
fn align_sides(parent: Sides, child: Sides, relative_degrees: i32) -> Sides {
    let joint = child.0[joint_side_index(relative_degrees)];
    if parent.contains(joint) {
        return child;
    }
    let flipped = child.flipped();
    if !parent.contains(flipped.0[joint_side_index(relative_degrees)]) {
        warn!("tile {child} shares no pip with its parent {parent}");
    }
    flipped
}

/// Pushes children in reverse so they pop in slot order.
fn push_children(stack: &mut Vec<Frame>, tile: &Tile, placed: PlacedTile) {
    for (slot, &child) in tile.children.iter().enumerate().rev() {
        stack.push(Frame {
            tile: child,
            slot,
            parent: placed,
        });
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
