pub mod pack;
pub mod picker;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// Re-export the main types for convenience
pub use pack::ContentPack;
pub use picker::TextPicker;

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Language {
    Korean,
    English,
}

impl Language {
    pub fn toggle(self) -> Self {
        match self {
            Language::Korean => Language::English,
            Language::English => Language::Korean,
        }
    }
}

#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, ValueEnum, Serialize, Deserialize, strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum PracticeMode {
    /// single-key finger placement drill
    Position,
    Word,
    Sentence,
    Paragraph,
}

impl PracticeMode {
    pub fn next(self) -> Self {
        match self {
            PracticeMode::Position => PracticeMode::Word,
            PracticeMode::Word => PracticeMode::Sentence,
            PracticeMode::Sentence => PracticeMode::Paragraph,
            PracticeMode::Paragraph => PracticeMode::Position,
        }
    }

    /// Paragraphs come from one pool; the other typing modes are tiered
    pub fn uses_difficulty(self) -> bool {
        matches!(self, PracticeMode::Word | PracticeMode::Sentence)
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn next(self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }
}

#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    ValueEnum,
    Serialize,
    Deserialize,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DrillLevel {
    HomeRow,
    TopRow,
    BottomRow,
    NumberRow,
    Symbols,
    #[default]
    All,
}

impl DrillLevel {
    pub fn next(self) -> Self {
        match self {
            DrillLevel::HomeRow => DrillLevel::TopRow,
            DrillLevel::TopRow => DrillLevel::BottomRow,
            DrillLevel::BottomRow => DrillLevel::NumberRow,
            DrillLevel::NumberRow => DrillLevel::Symbols,
            DrillLevel::Symbols => DrillLevel::All,
            DrillLevel::All => DrillLevel::HomeRow,
        }
    }
}
