// Library surface for the metrics engine, headless/integration tests and reuse.
// Terminal rendering stays in the binary.
pub mod app_dirs;
pub mod clock;
pub mod compose;
pub mod config;
pub mod content;
pub mod drill;
pub mod error;
pub mod logging;
pub mod paragraph;
pub mod runtime;
pub mod schedule;
pub mod session;
pub mod stats;
pub mod strokes;

/// Live stats refresh and runner tick cadence
pub const TICK_RATE_MS: u64 = 100;

pub use stats::{LiveStats, LiveText, SessionStats, TypingResult};
pub use strokes::{stroke_count, total_strokes};
