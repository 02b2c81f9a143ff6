//! Round controller
//!
//! Owns the score, the countdown and the tile queue. All mutation goes
//! through the event handlers below; a loss is a normal transition that
//! resets the round and raises the failure flag for presentation.

use serde::{Deserialize, Serialize};

use super::input::KeyInput;
use super::queue::{QueueError, TileQueue};
use super::tile::Side;
use crate::consts::{MOVE_REWARD, TIMER_UNITS};

/// Result of a single timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The countdown ran out and the round was reset
    TimedOut,
}

/// Result of a key-down
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key is still held from an earlier press
    Ignored,
    Correct,
    /// Wrong side or unrelated key; the round was reset
    Wrong,
}

/// Read-only view of a round for logs and hosts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub score: u32,
    pub best_score: u32,
    pub losses: u32,
    pub timer: f32,
    pub failure_flash: bool,
    /// Safe sides from nearest to farthest
    pub tiles: Vec<Side>,
}

#[derive(Debug, Clone)]
pub struct Round {
    queue: TileQueue,
    score: u32,
    /// Best score this session (not persisted)
    best_score: u32,
    /// Number of resets so far
    losses: u32,
    /// Elapsed countdown units, always below TIMER_UNITS between events
    elapsed: u32,
    /// Set on key-down, cleared on key-up
    key_locked: bool,
    /// Set on loss, cleared when presentation finishes its effect
    failure_flash: bool,
}

impl Round {
    pub fn new(seed: u64) -> Self {
        Self::with_queue(TileQueue::new(seed))
    }

    pub fn with_queue(queue: TileQueue) -> Self {
        Self {
            queue,
            score: 0,
            best_score: 0,
            losses: 0,
            elapsed: 0,
            key_locked: false,
            failure_flash: false,
        }
    }

    /// Advance the countdown by `increment` units
    pub fn on_tick(&mut self, increment: u32) -> TickOutcome {
        self.elapsed = self.elapsed.saturating_add(increment);
        if self.elapsed >= TIMER_UNITS {
            log::info!("Timer ran out");
            self.reset();
            TickOutcome::TimedOut
        } else {
            TickOutcome::Running
        }
    }

    pub fn on_key_press(&mut self, key: KeyInput) -> Result<KeyOutcome, QueueError> {
        if self.key_locked {
            return Ok(KeyOutcome::Ignored);
        }
        self.key_locked = true;

        let front = self.queue.peek_front()?;
        if key.matches(front.safe_side()) {
            self.score += 1;
            self.best_score = self.best_score.max(self.score);
            self.elapsed = self.elapsed.saturating_sub(MOVE_REWARD);
            self.queue.advance();
            log::debug!("Cleared tile, score {}", self.score);
            Ok(KeyOutcome::Correct)
        } else {
            log::info!("Wrong key {:?}", key);
            self.reset();
            Ok(KeyOutcome::Wrong)
        }
    }

    pub fn on_key_release(&mut self) {
        self.key_locked = false;
    }

    /// Start over with a fresh stack and signal the loss.
    ///
    /// Also clears the input lock, so a key still held after the loss counts
    /// again on its next key-down.
    pub fn reset(&mut self) {
        log::info!("Round lost at score {}", self.score);
        self.score = 0;
        self.elapsed = 0;
        self.key_locked = false;
        self.failure_flash = true;
        self.losses += 1;
        self.queue.initialize();
    }

    /// Presentation finished its loss animation
    pub fn acknowledge_failure_effect_ended(&mut self) {
        self.failure_flash = false;
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Fraction of the countdown elapsed, in [0, 1)
    pub fn timer(&self) -> f32 {
        self.elapsed as f32 / TIMER_UNITS as f32
    }

    pub fn is_key_locked(&self) -> bool {
        self.key_locked
    }

    pub fn failure_flash(&self) -> bool {
        self.failure_flash
    }

    pub fn queue(&self) -> &TileQueue {
        &self.queue
    }

    pub fn snapshot(&self) -> RoundSnapshot {
        RoundSnapshot {
            score: self.score,
            best_score: self.best_score,
            losses: self.losses,
            timer: self.timer(),
            failure_flash: self.failure_flash,
            tiles: self.queue.sides(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{TICK_INCREMENT, TILE_COUNT};
    use crate::sim::tile::Tile;
    use proptest::prelude::*;

    fn front_side(round: &Round) -> Side {
        round.queue().peek_front().unwrap().safe_side()
    }

    /// Press and release the correct key for the current front tile
    fn press_correct(round: &mut Round) -> KeyOutcome {
        let key = KeyInput::from(front_side(round));
        let outcome = round.on_key_press(key).unwrap();
        round.on_key_release();
        outcome
    }

    #[test]
    fn test_correct_press_scores_and_advances() {
        let mut round = Round::new(12345);
        round.elapsed = 100;
        let before = round.queue().sides();

        let outcome = press_correct(&mut round);

        assert_eq!(outcome, KeyOutcome::Correct);
        assert_eq!(round.score(), 1);
        assert_eq!(round.elapsed, 100 - MOVE_REWARD);
        assert_eq!(&round.queue().sides()[..TILE_COUNT - 1], &before[1..]);
        assert!(!round.failure_flash());
    }

    #[test]
    fn test_left_front_pressed_left() {
        let mut queue = TileQueue::new(8);
        while queue.peek_front().unwrap().safe_side() != Side::Left {
            queue.advance();
        }
        let mut round = Round::with_queue(queue);
        round.elapsed = 50;
        let second: Tile = *round.queue().get(1).unwrap();

        assert_eq!(round.on_key_press(KeyInput::Left).unwrap(), KeyOutcome::Correct);
        assert_eq!(round.score(), 1);
        assert_eq!(round.elapsed, 50 - MOVE_REWARD);
        assert_eq!(*round.queue().peek_front().unwrap(), second);
    }

    #[test]
    fn test_left_front_pressed_right_resets() {
        let mut queue = TileQueue::new(8);
        while queue.peek_front().unwrap().safe_side() != Side::Left {
            queue.advance();
        }
        let mut round = Round::with_queue(queue);
        press_correct(&mut round);
        while front_side(&round) != Side::Left {
            press_correct(&mut round);
        }
        assert!(round.score() > 0);
        let mut regenerated = round.queue().clone();
        regenerated.initialize();

        assert_eq!(round.on_key_press(KeyInput::Right).unwrap(), KeyOutcome::Wrong);
        assert_eq!(round.queue().sides(), regenerated.sides());
        assert_eq!(round.score(), 0);
        assert_eq!(round.timer(), 0.0);
        assert!(round.failure_flash());
        assert!(!round.is_key_locked());
        assert_eq!(round.queue().len(), TILE_COUNT);
        assert_eq!(round.losses(), 1);
    }

    #[test]
    fn test_other_key_is_a_loss() {
        let mut round = Round::new(3);
        press_correct(&mut round);
        assert_eq!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Wrong);
        assert_eq!(round.score(), 0);
        assert!(round.failure_flash());
    }

    #[test]
    fn test_reward_clamps_at_zero() {
        let mut round = Round::new(4);
        round.elapsed = MOVE_REWARD - 2;
        press_correct(&mut round);
        assert_eq!(round.elapsed, 0);
        press_correct(&mut round);
        assert_eq!(round.timer(), 0.0);
    }

    #[test]
    fn test_held_key_is_debounced() {
        let mut round = Round::new(21);
        let key = KeyInput::from(front_side(&round));

        assert_eq!(round.on_key_press(key).unwrap(), KeyOutcome::Correct);
        assert!(round.is_key_locked());
        // Even a wrong key is ignored while locked
        assert_eq!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Ignored);
        assert_eq!(round.score(), 1);

        round.on_key_release();
        assert!(!round.is_key_locked());
        assert_ne!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Ignored);
    }

    #[test]
    fn test_held_key_after_wrong_press_counts_again() {
        let mut round = Round::new(3);

        assert_eq!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Wrong);
        assert!(!round.is_key_locked());
        // No release in between: the loss cleared the lock
        assert_eq!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Wrong);
        assert_eq!(round.losses(), 2);
        assert!(round.is_key_locked());
    }

    #[test]
    fn test_held_key_after_timeout_counts_again() {
        let mut round = Round::new(12);
        let key = KeyInput::from(front_side(&round));
        assert_eq!(round.on_key_press(key).unwrap(), KeyOutcome::Correct);
        assert!(round.is_key_locked());

        let mut outcome = TickOutcome::Running;
        while outcome == TickOutcome::Running {
            outcome = round.on_tick(TICK_INCREMENT);
        }
        assert_eq!(round.losses(), 1);
        assert!(!round.is_key_locked());

        let key = KeyInput::from(front_side(&round));
        assert_eq!(round.on_key_press(key).unwrap(), KeyOutcome::Correct);
        assert_eq!(round.score(), 1);
        assert_eq!(round.losses(), 1);
    }

    #[test]
    fn test_timeout_regenerates_queue() {
        let mut round = Round::new(31);
        round.elapsed = TIMER_UNITS - 1;
        let mut regenerated = round.queue().clone();
        regenerated.initialize();

        assert_eq!(round.on_tick(TICK_INCREMENT), TickOutcome::TimedOut);
        assert_eq!(round.queue().sides(), regenerated.sides());
    }

    #[test]
    fn test_direct_reset_ends_round() {
        let mut round = Round::new(14);
        press_correct(&mut round);
        press_correct(&mut round);

        round.reset();
        assert_eq!(round.score(), 0);
        assert_eq!(round.best_score(), 2);
        assert_eq!(round.losses(), 1);
        assert!(round.failure_flash());
    }

    #[test]
    fn test_release_without_press() {
        let mut round = Round::new(1);
        round.on_key_release();
        assert!(!round.is_key_locked());
        assert_eq!(round.score(), 0);
    }

    #[test]
    fn test_timeout_from_097_after_36_ticks() {
        let mut round = Round::new(77);
        // 0.97 of the countdown
        round.elapsed = TIMER_UNITS * 97 / 100;
        press_correct(&mut round);
        round.elapsed = TIMER_UNITS * 97 / 100;

        let mut resets = 0;
        for i in 0..36 {
            if round.on_tick(TICK_INCREMENT) == TickOutcome::TimedOut {
                resets += 1;
                assert_eq!(i, 35);
            }
        }
        assert_eq!(resets, 1);
        assert_eq!(round.timer(), 0.0);
        assert_eq!(round.score(), 0);
        assert!(round.failure_flash());
    }

    #[test]
    fn test_acknowledge_clears_flash_only() {
        let mut round = Round::new(5);
        round.reset();
        press_correct(&mut round);
        assert!(round.failure_flash());

        round.acknowledge_failure_effect_ended();
        assert!(!round.failure_flash());
        assert_eq!(round.score(), 1);
    }

    #[test]
    fn test_best_score_survives_reset() {
        let mut round = Round::new(6);
        for _ in 0..4 {
            press_correct(&mut round);
        }
        round.reset();
        press_correct(&mut round);
        assert_eq!(round.score(), 1);
        assert_eq!(round.best_score(), 4);
    }

    #[test]
    fn test_snapshot_serializes() {
        let round = Round::new(10);
        let snapshot = round.snapshot();
        assert_eq!(snapshot.tiles.len(), TILE_COUNT);

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RoundSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_empty_queue_error_propagates() {
        let mut round = Round::with_queue(TileQueue::with_len(0, 1));
        assert_eq!(round.on_key_press(KeyInput::Left), Err(QueueError::Empty));
        assert_eq!(round.score(), 0);
        assert!(!round.failure_flash());
    }

    proptest! {
        #[test]
        fn prop_ticks_monotonic_until_single_reset(seed in any::<u64>(), start in 0u32..TIMER_UNITS) {
            let mut round = Round::new(seed);
            round.elapsed = start;
            let mut last = round.timer();
            let mut resets = 0;
            for _ in 0..(TIMER_UNITS - start) {
                match round.on_tick(TICK_INCREMENT) {
                    TickOutcome::Running => {
                        prop_assert!(round.timer() >= last);
                        prop_assert!(round.timer() < 1.0);
                        last = round.timer();
                    }
                    TickOutcome::TimedOut => resets += 1,
                }
            }
            prop_assert_eq!(resets, 1);
            prop_assert_eq!(round.timer(), 0.0);
        }

        #[test]
        fn prop_key_press_rules(seed in any::<u64>(), start in 0u32..TIMER_UNITS, keys in proptest::collection::vec(0u8..3, 1..40)) {
            let mut round = Round::new(seed);
            round.elapsed = start;
            for k in keys {
                let key = match k {
                    0 => KeyInput::Left,
                    1 => KeyInput::Right,
                    _ => KeyInput::Other,
                };
                let score = round.score();
                let elapsed = round.elapsed;
                let expected = key.matches(front_side(&round));
                let mut regenerated = round.queue().clone();
                regenerated.initialize();

                let outcome = round.on_key_press(key).unwrap();
                round.on_key_release();

                if expected {
                    prop_assert_eq!(outcome, KeyOutcome::Correct);
                    prop_assert_eq!(round.score(), score + 1);
                    prop_assert_eq!(round.elapsed, elapsed.saturating_sub(MOVE_REWARD));
                } else {
                    prop_assert_eq!(outcome, KeyOutcome::Wrong);
                    prop_assert_eq!(round.score(), 0);
                    prop_assert_eq!(round.elapsed, 0);
                    prop_assert_eq!(round.queue().sides(), regenerated.sides());
                }
                prop_assert!(round.timer() >= 0.0);
                prop_assert_eq!(round.queue().len(), TILE_COUNT);
            }
        }

        #[test]
        fn prop_debounce_single_evaluation(seed in any::<u64>(), presses in 2usize..10) {
            let mut round = Round::new(seed);
            let first = round.on_key_press(KeyInput::from(front_side(&round))).unwrap();
            prop_assert_eq!(first, KeyOutcome::Correct);
            for _ in 1..presses {
                prop_assert_eq!(round.on_key_press(KeyInput::Other).unwrap(), KeyOutcome::Ignored);
            }
            prop_assert_eq!(round.score(), 1);
        }
    }
}
