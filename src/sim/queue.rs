//! Fixed-length queue of upcoming tiles
//!
//! Index 0 is the tile the player must react to next.

use std::collections::VecDeque;
use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::tile::{Side, Tile};
use crate::consts::TILE_COUNT;

/// Tile queue failures. These are invariant violations, never gameplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds no tiles
    Empty,
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "tile queue is empty"),
        }
    }
}

impl std::error::Error for QueueError {}

#[derive(Debug, Clone)]
pub struct TileQueue {
    tiles: VecDeque<Tile>,
    len: usize,
    rng: Pcg32,
}

impl TileQueue {
    /// Full-height queue seeded for reproducible runs
    pub fn new(seed: u64) -> Self {
        Self::with_len(TILE_COUNT, seed)
    }

    pub fn with_len(len: usize, seed: u64) -> Self {
        let mut queue = Self {
            tiles: VecDeque::with_capacity(len),
            len,
            rng: Pcg32::seed_from_u64(seed),
        };
        queue.initialize();
        queue
    }

    /// Replace every tile with a freshly randomized one
    pub fn initialize(&mut self) {
        self.tiles.clear();
        for _ in 0..self.len {
            self.tiles.push_back(Tile::random(&mut self.rng));
        }
    }

    pub fn peek_front(&self) -> Result<&Tile, QueueError> {
        self.tiles.front().ok_or(QueueError::Empty)
    }

    /// Drop the front tile and append a new one at the back
    pub fn advance(&mut self) {
        if self.tiles.pop_front().is_some() {
            self.tiles.push_back(Tile::random(&mut self.rng));
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Tiles from nearest to farthest
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn sides(&self) -> Vec<Side> {
        self.tiles.iter().map(Tile::safe_side).collect()
    }
}
