//! Dodge the Log - a one-button-per-side reflex game
//!
//! Core modules:
//! - `sim`: Deterministic round logic (tile queue, countdown, input rules)
//! - `renderer`: WebGPU rendering pipeline

pub mod renderer;
pub mod sim;

pub use sim::{KeyInput, KeyOutcome, QueueError, Round, Side, Tile, TickOutcome, TileQueue};

/// Game configuration constants
pub mod consts {
    /// Canvas dimensions in pixels
    pub const CANVAS_WIDTH: f32 = 500.0;
    pub const CANVAS_HEIGHT: f32 = 500.0;

    /// Stack tile dimensions
    pub const TILE_WIDTH: f32 = 100.0;
    pub const TILE_HEIGHT: f32 = 50.0;
    /// Width of the passable (water) part of a tile
    pub const SAFE_AREA_WIDTH: f32 = 80.0;

    /// Number of tiles visible in the stack (fills the canvas height)
    pub const TILE_COUNT: usize = (CANVAS_HEIGHT / TILE_HEIGHT) as usize;

    /// Simulation ticks per second
    pub const FRAMERATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / FRAMERATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Countdown units in one full timer (20 seconds of ticks)
    pub const TIMER_UNITS: u32 = FRAMERATE * 20;
    /// Units added every tick
    pub const TICK_INCREMENT: u32 = 1;
    /// Units taken back by a correct move
    pub const MOVE_REWARD: u32 = 5;
}
