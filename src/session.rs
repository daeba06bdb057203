use std::time::Duration;

use tracing::{debug, info};

use crate::clock::{Clock, SystemClock};
use crate::compose::Composer;
use crate::content::PracticeMode;
use crate::paragraph::current_line_end;
use crate::schedule::RepeatingTask;
use crate::stats::{LiveStats, LiveText, SessionStats, TypingResult};
use crate::TICK_RATE_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

/// One attempt at typing a fixed target text
#[derive(Debug)]
pub struct PracticeSession<C: Clock = SystemClock> {
    target: String,
    target_len: usize,
    mode: PracticeMode,
    typed: String,
    typed_len: usize,
    composer: Composer,
    started: bool,
    completed: bool,
    stats: SessionStats<C>,
    live: LiveStats,
    live_refresh: RepeatingTask,
    result: Option<TypingResult>,
}

impl PracticeSession<SystemClock> {
    pub fn with_system_clock(target: String, mode: PracticeMode) -> Self {
        Self::new(
            target,
            mode,
            SystemClock,
            Duration::from_millis(TICK_RATE_MS),
        )
    }
}

impl<C: Clock> PracticeSession<C> {
    pub fn new(target: String, mode: PracticeMode, clock: C, refresh_interval: Duration) -> Self {
        let target_len = target.chars().count();
        Self {
            target,
            target_len,
            mode,
            typed: String::new(),
            typed_len: 0,
            composer: Composer::new(),
            started: false,
            completed: false,
            stats: SessionStats::new(clock),
            live: LiveStats::default(),
            live_refresh: RepeatingTask::new(refresh_interval),
            result: None,
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn mode(&self) -> PracticeMode {
        self.mode
    }

    /// Committed text; a syllable still being composed is not part of it
    pub fn typed(&self) -> &str {
        &self.typed
    }

    pub fn typed_len(&self) -> usize {
        self.typed_len
    }

    pub fn preedit(&self) -> &str {
        self.composer.preedit()
    }

    pub fn is_composing(&self) -> bool {
        self.composer.is_composing()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_refreshing(&self) -> bool {
        self.live_refresh.is_armed()
    }

    pub fn live_stats(&self) -> LiveStats {
        self.live
    }

    /// Final numbers, available once the attempt is complete
    pub fn result(&self) -> Option<TypingResult> {
        self.result
    }

    pub fn stats(&self) -> &SessionStats<C> {
        &self.stats
    }

    /// Correctness of every committed position, for display
    pub fn outcomes(&self) -> Vec<Outcome> {
        let mut target = self.target.chars();
        self.typed
            .chars()
            .map(|c| {
                if target.next() == Some(c) {
                    Outcome::Correct
                } else {
                    Outcome::Incorrect
                }
            })
            .collect()
    }

    pub fn expected_char(&self, idx: usize) -> Option<char> {
        self.target.chars().nth(idx)
    }

    fn live_text(&self) -> LiveText<'_> {
        LiveText::new(&self.typed, &self.target)
    }

    fn begin_if_needed(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.stats.start_typing();
        let now = self.stats.clock().now();
        self.live_refresh.arm(now);
        debug!(target_len = self.target_len, mode = %self.mode, "attempt started");
    }

    /// A plain committed keystroke
    pub fn type_char(&mut self, c: char) {
        let mut buf = [0; 4];
        self.commit(c.encode_utf8(&mut buf));
    }

    /// The input method's current preedit. Starts the clock on the first
    /// keystroke but scores nothing until the syllable is committed.
    pub fn compose(&mut self, preedit: &str) {
        if self.completed || self.target_len == 0 {
            return;
        }
        if !preedit.is_empty() {
            self.begin_if_needed();
        }
        self.composer.update(preedit);
    }

    /// Final characters from the input method, each scored exactly once in
    /// arrival order.
    pub fn commit(&mut self, text: &str) {
        if self.completed {
            return;
        }
        let committed = self.composer.commit(text);
        for c in committed.chars() {
            self.push_char(c);
            if self.completed {
                break;
            }
        }
    }

    fn push_char(&mut self, c: char) {
        // nothing to type against
        if self.typed_len >= self.target_len {
            return;
        }
        self.begin_if_needed();

        if self.expected_char(self.typed_len) == Some(c) {
            self.stats.record_correct();
        } else {
            self.stats.record_incorrect();
        }
        self.typed.push(c);
        self.typed_len += 1;

        if self.typed_len == self.target_len {
            self.complete();
        }
    }

    pub fn backspace(&mut self) {
        if self.completed || self.composer.backspace() {
            return;
        }
        if self.typed.pop().is_some() {
            self.typed_len -= 1;
        }
    }

    /// Paragraph mode moves to the next sentence by pressing Enter at the end
    /// of a line, which types the separating space.
    pub fn enter(&mut self) {
        if self.completed || self.mode != PracticeMode::Paragraph || self.composer.is_composing() {
            return;
        }

        let line_end = current_line_end(&self.target, self.mode, self.typed_len);
        if self.typed_len == line_end
            && self.typed_len < self.target_len
            && self.expected_char(self.typed_len) == Some(' ')
        {
            self.push_char(' ');
        }
    }

    fn complete(&mut self) {
        self.completed = true;
        self.stats.end_typing();
        self.live_refresh.cancel();
        self.result = self.stats.calculate_result(Some(self.live_text()));
        if let Some(result) = self.result {
            self.live = result.into();
            info!(
                cpm = result.cpm,
                wpm = result.wpm,
                accuracy = result.accuracy,
                error_rate = result.error_rate,
                total_time = result.total_time,
                "attempt completed"
            );
        }
    }

    /// Refreshes the live numbers when the refresh task is due. Returns true
    /// when they were recomputed.
    pub fn on_tick(&mut self) -> bool {
        let now = self.stats.clock().now();
        if !self.live_refresh.poll(now) {
            return false;
        }
        self.live = self.stats.current_stats(Some(self.live_text()));
        true
    }

    /// Throws the attempt away and starts over on `target`
    pub fn restart(&mut self, target: String) {
        self.live_refresh.cancel();
        self.stats.reset_stats();
        self.composer.cancel();
        self.target_len = target.chars().count();
        self.target = target;
        self.typed.clear();
        self.typed_len = 0;
        self.started = false;
        self.completed = false;
        self.live = LiveStats::default();
        self.result = None;
        debug!(target_len = self.target_len, "attempt reset");
    }
}
