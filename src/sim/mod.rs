//! Deterministic round logic
//!
//! All gameplay lives here. This module must stay free of rendering and
//! platform code:
//! - Fixed timestep only
//! - Seeded RNG only
//! - State changes only through the round's event handlers

pub mod autoplay;
pub mod clock;
pub mod input;
pub mod queue;
pub mod round;
pub mod tile;

pub use autoplay::Autoplay;
pub use clock::FixedStep;
pub use input::KeyInput;
pub use queue::{QueueError, TileQueue};
pub use round::{KeyOutcome, Round, RoundSnapshot, TickOutcome};
pub use tile::{Side, Span, Tile};
