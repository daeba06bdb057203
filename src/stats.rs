use crate::clock::{Clock, SystemClock};
use crate::strokes::stroke_count;
use std::time::{Duration, SystemTime};

/// Standard word length used to derive WPM from CPM
pub const CHARS_PER_WORD: f64 = 5.0;

/// Final numbers for a finished (or inspected) attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingResult {
    pub wpm: u32,
    pub cpm: u32,
    pub accuracy: u32,
    pub error_rate: u32,
    /// seconds
    pub total_time: u64,
}

/// Numbers shown while an attempt is still running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveStats {
    pub wpm: u32,
    pub cpm: u32,
    pub accuracy: u32,
    pub error_rate: u32,
}

impl Default for LiveStats {
    /// Nothing typed yet: no speed, and accuracy starts out perfect
    fn default() -> Self {
        Self {
            wpm: 0,
            cpm: 0,
            accuracy: 100,
            error_rate: 0,
        }
    }
}

impl From<TypingResult> for LiveStats {
    fn from(r: TypingResult) -> Self {
        Self {
            wpm: r.wpm,
            cpm: r.cpm,
            accuracy: r.accuracy,
            error_rate: r.error_rate,
        }
    }
}

/// The text typed so far paired with the text it should match
#[derive(Debug, Clone, Copy)]
pub struct LiveText<'a> {
    pub typed: &'a str,
    pub target: &'a str,
}

impl<'a> LiveText<'a> {
    pub fn new(typed: &'a str, target: &'a str) -> Self {
        Self { typed, target }
    }
}

/// Correct/incorrect counts plus the strokes credited for correct characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    total: usize,
    correct: usize,
    incorrect: usize,
    correct_strokes: u32,
}

impl Tally {
    /// Authoritative strategy: compare the live text to the target index by
    /// index, so a corrected position is judged by what it holds now.
    fn by_position(live: LiveText<'_>) -> Self {
        let mut target = live.target.chars();
        let mut tally = Tally::default();

        for typed in live.typed.chars() {
            tally.total += 1;
            if target.next() == Some(typed) {
                tally.correct += 1;
                tally.correct_strokes += stroke_count(typed);
            } else {
                tally.incorrect += 1;
            }
        }

        tally
    }

    /// Compatibility strategy: the per-keystroke counters fed through
    /// `record_correct`/`record_incorrect`. Every keystroke ever made is
    /// counted, even ones later erased, and one correct char is one stroke.
    /// This duplicates the position-wise path with different semantics and is
    /// kept only for callers that never hand over the live text.
    fn from_counters(total: usize, correct: usize, incorrect: usize) -> Self {
        Tally {
            total,
            correct,
            incorrect,
            correct_strokes: correct as u32,
        }
    }

    fn percent(&self, part: usize) -> u32 {
        round_u32(part as f64 / self.total as f64 * 100.0)
    }

    fn rates(&self, elapsed: Duration) -> LiveStats {
        let minutes = elapsed.as_secs_f64() / 60.0;
        let cpm = if minutes > 0.0 {
            round_u32(self.correct_strokes as f64 / minutes)
        } else {
            0
        };

        LiveStats {
            wpm: round_u32(cpm as f64 / CHARS_PER_WORD),
            cpm,
            accuracy: self.percent(self.correct),
            error_rate: self.percent(self.incorrect),
        }
    }
}

fn round_u32(value: f64) -> u32 {
    if value.is_finite() && value > 0.0 {
        value.round() as u32
    } else {
        0
    }
}

/// Accumulates one attempt: when it started and ended, plus the legacy
/// keystroke counters.
#[derive(Debug, Clone)]
pub struct SessionStats<C: Clock = SystemClock> {
    pub total_chars: usize,
    pub correct_chars: usize,
    pub incorrect_chars: usize,
    pub start_time: Option<SystemTime>,
    pub end_time: Option<SystemTime>,
    clock: C,
}

impl Default for SessionStats<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl<C: Clock> SessionStats<C> {
    pub fn new(clock: C) -> Self {
        Self {
            total_chars: 0,
            correct_chars: 0,
            incorrect_chars: 0,
            start_time: None,
            end_time: None,
            clock,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn has_started(&self) -> bool {
        self.start_time.is_some()
    }

    /// Marks the beginning of an attempt. Callers guard this with their own
    /// "started" flag; calling it again restarts the timer.
    pub fn start_typing(&mut self) {
        self.start_time = Some(self.clock.now());
        self.end_time = None;
    }

    pub fn end_typing(&mut self) {
        self.end_time = Some(self.clock.now());
    }

    pub fn record_correct(&mut self) {
        self.total_chars += 1;
        self.correct_chars += 1;
    }

    pub fn record_incorrect(&mut self) {
        self.total_chars += 1;
        self.incorrect_chars += 1;
    }

    pub fn reset_stats(&mut self) {
        self.total_chars = 0;
        self.correct_chars = 0;
        self.incorrect_chars = 0;
        self.start_time = None;
        self.end_time = None;
    }

    fn elapsed_until(&self, start: SystemTime, end: SystemTime) -> Duration {
        end.duration_since(start).unwrap_or_default()
    }

    fn tally(&self, live: Option<LiveText<'_>>) -> Tally {
        match live {
            Some(live) => Tally::by_position(live),
            None => Tally::from_counters(self.total_chars, self.correct_chars, self.incorrect_chars),
        }
    }

    /// Result of the attempt, measured up to `end_time` (or now if the
    /// attempt has not ended). `None` means there is nothing to show yet:
    /// typing never started or nothing has been typed.
    pub fn calculate_result(&self, live: Option<LiveText<'_>>) -> Option<TypingResult> {
        let start = self.start_time?;
        let tally = self.tally(live);
        if tally.total == 0 {
            return None;
        }

        let end = self.end_time.unwrap_or_else(|| self.clock.now());
        let elapsed = self.elapsed_until(start, end);
        let rates = tally.rates(elapsed);

        Some(TypingResult {
            wpm: rates.wpm,
            cpm: rates.cpm,
            accuracy: rates.accuracy,
            error_rate: rates.error_rate,
            total_time: elapsed.as_secs_f64().round() as u64,
        })
    }

    /// Running estimate for an attempt in progress, always measured against
    /// now. Never fails: before the first keystroke or with nothing typed it
    /// is the optimistic baseline.
    pub fn current_stats(&self, live: Option<LiveText<'_>>) -> LiveStats {
        let Some(start) = self.start_time else {
            return LiveStats::default();
        };

        let tally = self.tally(live);
        if tally.total == 0 {
            return LiveStats::default();
        }

        let elapsed = self.elapsed_until(start, self.clock.now());
        tally.rates(elapsed)
    }
}
