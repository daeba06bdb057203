//! Finger-placement drill: one key at a time, with a streak counter and a
//! short pause on a hit before the next key appears.

use rand::seq::SliceRandom;
use std::time::Duration;
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::schedule::DelayedTask;

pub const ADVANCE_DELAY_MS: u64 = 300;

#[derive(Debug)]
pub struct PositionDrill<C: Clock = SystemClock> {
    keys: Vec<char>,
    current: Option<char>,
    /// `Some(true)` after a hit, `Some(false)` after a miss
    feedback: Option<bool>,
    streak: u32,
    total_correct: u32,
    total_attempts: u32,
    advance: DelayedTask,
    clock: C,
}

impl PositionDrill<SystemClock> {
    pub fn with_system_clock(keys: Vec<char>) -> Self {
        Self::new(keys, SystemClock, Duration::from_millis(ADVANCE_DELAY_MS))
    }
}

impl<C: Clock> PositionDrill<C> {
    pub fn new(keys: Vec<char>, clock: C, advance_delay: Duration) -> Self {
        let mut drill = Self {
            keys,
            current: None,
            feedback: None,
            streak: 0,
            total_correct: 0,
            total_attempts: 0,
            advance: DelayedTask::new(advance_delay),
            clock,
        };
        drill.next_key();
        drill
    }

    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn feedback(&self) -> Option<bool> {
        self.feedback
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn total_correct(&self) -> u32 {
        self.total_correct
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn is_advancing(&self) -> bool {
        self.advance.is_pending()
    }

    /// Hit rate in percent; 100 before the first attempt
    pub fn accuracy(&self) -> u32 {
        if self.total_attempts == 0 {
            return 100;
        }
        (self.total_correct as f64 / self.total_attempts as f64 * 100.0).round() as u32
    }

    fn next_key(&mut self) {
        self.current = self.keys.choose(&mut rand::thread_rng()).copied();
        self.feedback = None;
    }

    /// A key press as reported by the terminal, e.g. "a", "A", "ㅁ" or "Tab".
    /// Matching ignores case; named keys are neither hits nor misses.
    pub fn press(&mut self, key: &str) {
        let Some(current) = self.current else {
            return;
        };
        // the hit is already counted; wait for the next key
        if self.advance.is_pending() {
            return;
        }

        let expected = current.to_string();
        let is_match = key.to_lowercase() == expected.to_lowercase() || key == expected;

        if is_match {
            self.feedback = Some(true);
            self.streak += 1;
            self.total_correct += 1;
            self.total_attempts += 1;
            self.advance.schedule(self.clock.now());
        } else if key.chars().count() == 1 {
            self.feedback = Some(false);
            self.streak = 0;
            self.total_attempts += 1;
        }
    }

    /// Moves on to a different key without scoring
    pub fn skip(&mut self) {
        self.advance.cancel();
        self.next_key();
    }

    /// Switches to another key set, e.g. on a level change
    pub fn set_keys(&mut self, keys: Vec<char>) {
        self.keys = keys;
        self.streak = 0;
        self.advance.cancel();
        self.next_key();
        debug!(keys = self.keys.len(), "drill keys changed");
    }

    /// Shows the next key once the pause after a hit is over
    pub fn on_tick(&mut self) -> bool {
        if self.advance.poll(self.clock.now()) {
            self.next_key();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn drill(keys: &[char]) -> (PositionDrill<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let drill = PositionDrill::new(keys.to_vec(), clock.clone(), Duration::from_millis(300));
        (drill, clock)
    }

    #[test]
    fn test_new_drill_picks_a_key() {
        let (drill, _) = drill(&['a', 's', 'd']);
        assert!(['a', 's', 'd'].contains(&drill.current().unwrap()));
        assert_eq!(drill.accuracy(), 100);
        assert_eq!(drill.feedback(), None);
    }

    #[test]
    fn test_empty_key_set() {
        let (mut drill, _) = drill(&[]);
        assert_eq!(drill.current(), None);
        drill.press("a");
        assert_eq!(drill.total_attempts(), 0);
    }

    #[test]
    fn test_hit_builds_streak_and_schedules_advance() {
        let (mut drill, clock) = drill(&['a']);

        drill.press("a");
        assert_eq!(drill.feedback(), Some(true));
        assert_eq!(drill.streak(), 1);
        assert!(drill.is_advancing());

        clock.advance_millis(299);
        assert!(!drill.on_tick());
        clock.advance_millis(1);
        assert!(drill.on_tick());
        assert_eq!(drill.feedback(), None);

        drill.press("a");
        assert_eq!(drill.streak(), 2);
        assert_eq!(drill.accuracy(), 100);
    }

    #[test]
    fn test_match_ignores_case() {
        let (mut drill, _) = drill(&['a']);
        drill.press("A");
        assert_eq!(drill.feedback(), Some(true));
    }

    #[test]
    fn test_miss_resets_streak() {
        let (mut drill, clock) = drill(&['ㅁ']);

        drill.press("ㅁ");
        clock.advance_millis(300);
        drill.on_tick();
        drill.press("ㄴ");

        assert_eq!(drill.feedback(), Some(false));
        assert_eq!(drill.streak(), 0);
        assert_eq!(drill.total_attempts(), 2);
        assert_eq!(drill.accuracy(), 50);
        assert!(!drill.is_advancing());
    }

    #[test]
    fn test_named_keys_are_ignored() {
        let (mut drill, _) = drill(&['a']);
        drill.press("Tab");
        assert_eq!(drill.total_attempts(), 0);
        assert_eq!(drill.feedback(), None);
    }

    #[test]
    fn test_presses_during_pause_are_ignored() {
        let (mut drill, _) = drill(&['a']);
        drill.press("a");
        drill.press("a");
        drill.press("x");
        assert_eq!(drill.total_attempts(), 1);
        assert_eq!(drill.streak(), 1);
    }

    #[test]
    fn test_skip_cancels_pending_advance() {
        let (mut drill, clock) = drill(&['a']);
        drill.press("a");
        drill.skip();

        assert!(!drill.is_advancing());
        clock.advance_secs(1);
        assert!(!drill.on_tick());
    }

    #[test]
    fn test_set_keys_resets_streak() {
        let (mut drill, clock) = drill(&['a']);
        drill.press("a");
        drill.set_keys(vec!['1']);

        assert_eq!(drill.streak(), 0);
        assert_eq!(drill.current(), Some('1'));
        assert_eq!(drill.total_correct(), 1);
        clock.advance_secs(1);
        assert!(!drill.on_tick());
    }
}
