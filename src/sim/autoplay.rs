//! Demo player
//!
//! Drives a round through the same handlers a keyboard would, with a fixed
//! reaction delay and an occasional deliberate mistake.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::input::KeyInput;
use super::queue::QueueError;
use super::round::{KeyOutcome, Round};

/// Default ticks between key presses (0.25 s at 60 Hz)
pub const DEFAULT_REACTION_TICKS: u32 = 15;
/// Default chance of pressing the wrong side
pub const DEFAULT_MISTAKE_CHANCE: f64 = 0.02;

#[derive(Debug, Clone)]
pub struct Autoplay {
    rng: Pcg32,
    reaction_ticks: u32,
    mistake_chance: f64,
    wait: u32,
    holding: bool,
}

impl Autoplay {
    pub fn new(seed: u64) -> Self {
        Self::with_profile(seed, DEFAULT_REACTION_TICKS, DEFAULT_MISTAKE_CHANCE)
    }

    pub fn with_profile(seed: u64, reaction_ticks: u32, mistake_chance: f64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            reaction_ticks,
            mistake_chance: mistake_chance.clamp(0.0, 1.0),
            wait: reaction_ticks,
            holding: false,
        }
    }

    /// Call once per tick. Returns the outcome when a key was pressed.
    pub fn step(&mut self, round: &mut Round) -> Result<Option<KeyOutcome>, QueueError> {
        if self.holding {
            round.on_key_release();
            self.holding = false;
            self.wait = self.reaction_ticks;
            return Ok(None);
        }

        if self.wait > 0 {
            self.wait -= 1;
            return Ok(None);
        }

        let safe = round.queue().peek_front()?.safe_side();
        let side = if self.rng.random_bool(self.mistake_chance) {
            safe.opposite()
        } else {
            safe
        };

        self.holding = true;
        round.on_key_press(KeyInput::from(side)).map(Some)
    }
}
