//! Stack tiles and their derived geometry

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{SAFE_AREA_WIDTH, TILE_WIDTH};

/// Which side of a tile can be passed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Pick a side uniformly at random
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        if rng.random_bool(0.5) {
            Side::Right
        } else {
            Side::Left
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Horizontal span inside a tile, relative to the tile's left edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub offset: f32,
    pub width: f32,
}

/// One segment of the stack.
///
/// The safe side is the only stored fact; zones are computed from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    safe_side: Side,
}

impl Tile {
    pub const fn new(safe_side: Side) -> Self {
        Self { safe_side }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::new(Side::random(rng))
    }

    pub fn safe_side(&self) -> Side {
        self.safe_side
    }

    /// Passable (water) part of the tile
    pub fn safe_zone(&self) -> Span {
        safe_zone(self.safe_side)
    }

    /// Blocked (log) part of the tile
    pub fn danger_zone(&self) -> Span {
        danger_zone(self.safe_side)
    }
}

pub fn safe_zone(side: Side) -> Span {
    let offset = match side {
        Side::Left => 0.0,
        Side::Right => TILE_WIDTH - SAFE_AREA_WIDTH,
    };
    Span {
        offset,
        width: SAFE_AREA_WIDTH,
    }
}

pub fn danger_zone(side: Side) -> Span {
    let offset = match side {
        Side::Left => SAFE_AREA_WIDTH,
        Side::Right => 0.0,
    };
    Span {
        offset,
        width: TILE_WIDTH - SAFE_AREA_WIDTH,
    }
}
