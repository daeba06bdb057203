//! Event plumbing between the terminal and the tutor. Terminal keys are
//! translated to [`KeyInput`] on the reader thread, so everything past this
//! module works without crossterm types and can be driven headless.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::debug;

use crate::TICK_RATE_MS;

/// A key press as the tutor understands it
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum KeyInput {
    /// A committed character, Hangul syllables included
    Char(char),
    Backspace,
    Enter,
    Escape,
    Tab,
    /// Ctrl plus a letter, lowercased
    Control(char),
}

impl KeyInput {
    /// `None` for key releases and keys the tutor has no use for
    pub fn from_key(key: KeyEvent) -> Option<Self> {
        // terminals that report releases would otherwise score a keystroke twice
        if key.kind == KeyEventKind::Release {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let input = match key.code {
            KeyCode::Char(c) if ctrl => KeyInput::Control(c.to_ascii_lowercase()),
            KeyCode::Char(c) => KeyInput::Char(c),
            KeyCode::Backspace => KeyInput::Backspace,
            KeyCode::Enter => KeyInput::Enter,
            KeyCode::Esc => KeyInput::Escape,
            KeyCode::Tab => KeyInput::Tab,
            _ => return None,
        };
        Some(input)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TutorEvent {
    Key(KeyInput),
    Resize,
    Tick,
}

pub trait TutorEventSource: Send + 'static {
    /// Next event, or `Err(Timeout)` when none arrives within `timeout`
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError>;
}

/// Reads crossterm events on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<TutorEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                Ok(CtEvent::Key(key)) => KeyInput::from_key(key).map(TutorEvent::Key),
                Ok(CtEvent::Resize(_, _)) => Some(TutorEvent::Resize),
                Ok(_) => None,
                Err(err) => {
                    debug!(error = %err, "terminal event reader stopped");
                    break;
                }
            };

            let Some(evt) = evt else { continue };
            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    /// Ticks at the live-stats refresh cadence
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Channel-fed source for headless runs
pub struct TestEventSource {
    rx: Receiver<TutorEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TutorEvent>) -> Self {
        Self { rx }
    }
}

impl TutorEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TutorEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Hands out one event per call, with a tick whenever the source is quiet
/// for a whole interval. Timers in sessions and drills are driven by those
/// ticks, so a silent terminal still advances them.
pub struct Runner<E: TutorEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: TutorEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    pub fn step(&self) -> TutorEvent {
        // a closed source keeps ticking so pending timers still fire
        self.event_source
            .recv_timeout(self.ticker.interval())
            .unwrap_or(TutorEvent::Tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_step_returns_tick_on_timeout() {
        let (_tx, rx) = mpsc::channel();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(1)),
        );

        assert_matches!(runner.step(), TutorEvent::Tick);
    }

    #[test]
    fn test_step_passes_through_events() {
        let (tx, rx) = mpsc::channel();
        tx.send(TutorEvent::Key(KeyInput::Char('가'))).unwrap();
        let runner = Runner::new(
            TestEventSource::new(rx),
            FixedTicker::new(Duration::from_millis(10)),
        );

        assert_eq!(runner.step(), TutorEvent::Key(KeyInput::Char('가')));
    }

    #[test]
    fn test_step_ticks_when_source_disconnected() {
        let (tx, rx) = mpsc::channel::<TutorEvent>();
        drop(tx);
        let runner = Runner::new(TestEventSource::new(rx), FixedTicker::default());

        assert_matches!(runner.step(), TutorEvent::Tick);
    }

    #[test]
    fn test_default_ticker_matches_refresh_cadence() {
        assert_eq!(
            FixedTicker::default().interval(),
            Duration::from_millis(TICK_RATE_MS)
        );
    }

    #[test]
    fn test_characters_and_editing_keys() {
        assert_eq!(
            KeyInput::from_key(key(KeyCode::Char('ㅁ'), KeyModifiers::NONE)),
            Some(KeyInput::Char('ㅁ'))
        );
        assert_eq!(
            KeyInput::from_key(key(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(KeyInput::Char('A'))
        );
        assert_eq!(
            KeyInput::from_key(key(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(KeyInput::Backspace)
        );
        assert_eq!(
            KeyInput::from_key(key(KeyCode::Esc, KeyModifiers::NONE)),
            Some(KeyInput::Escape)
        );
    }

    #[test]
    fn test_control_chords_are_lowercased() {
        assert_eq!(
            KeyInput::from_key(key(KeyCode::Char('R'), KeyModifiers::CONTROL | KeyModifiers::SHIFT)),
            Some(KeyInput::Control('r'))
        );
    }

    #[test]
    fn test_releases_and_unused_keys_are_dropped() {
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('a'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );
        assert_eq!(KeyInput::from_key(release), None);
        assert_eq!(KeyInput::from_key(key(KeyCode::F(5), KeyModifiers::NONE)), None);
        assert_eq!(KeyInput::from_key(key(KeyCode::Left, KeyModifiers::NONE)), None);
    }
}
