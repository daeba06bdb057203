use include_dir::{include_dir, Dir};
use serde::Deserialize;
use tracing::debug;

use super::{Difficulty, DrillLevel, Language, PracticeMode};
use crate::error::{Error, Result};

static CONTENT_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/content/data");

/// Texts grouped by difficulty
#[derive(Deserialize, Clone, Debug)]
pub struct Tiered {
    pub easy: Vec<String>,
    pub medium: Vec<String>,
    pub hard: Vec<String>,
}

impl Tiered {
    pub fn get(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }
}

/// Keys practised at each drill level
#[derive(Deserialize, Clone, Debug)]
pub struct DrillKeys {
    pub home_row: Vec<char>,
    pub top_row: Vec<char>,
    pub bottom_row: Vec<char>,
    pub number_row: Vec<char>,
    pub symbols: Vec<char>,
    pub all: Vec<char>,
}

/// Everything one language offers for practice
#[derive(Deserialize, Clone, Debug)]
pub struct ContentPack {
    pub name: String,
    pub position: DrillKeys,
    pub words: Tiered,
    pub sentences: Tiered,
    pub paragraphs: Vec<String>,
}

impl ContentPack {
    pub fn load(language: Language) -> Result<Self> {
        read_pack(&format!("{language}.json"))
    }

    /// Candidate targets for a typing mode. Position drills have no texts.
    pub fn pool(&self, mode: PracticeMode, difficulty: Difficulty) -> &[String] {
        match mode {
            PracticeMode::Position => &[],
            PracticeMode::Word => self.words.get(difficulty),
            PracticeMode::Sentence => self.sentences.get(difficulty),
            PracticeMode::Paragraph => &self.paragraphs,
        }
    }

    pub fn drill_keys(&self, level: DrillLevel) -> &[char] {
        let keys = &self.position;
        match level {
            DrillLevel::HomeRow => &keys.home_row,
            DrillLevel::TopRow => &keys.top_row,
            DrillLevel::BottomRow => &keys.bottom_row,
            DrillLevel::NumberRow => &keys.number_row,
            DrillLevel::Symbols => &keys.symbols,
            DrillLevel::All => &keys.all,
        }
    }
}

fn read_pack(file_name: &str) -> Result<ContentPack> {
    let contents = CONTENT_DIR
        .get_file(file_name)
        .and_then(|file| file.contents_utf8())
        .ok_or_else(|| Error::ContentNotFound {
            name: file_name.to_string(),
        })?;

    let pack: ContentPack =
        serde_json::from_str(contents).map_err(|source| Error::InvalidContent {
            name: file_name.to_string(),
            source,
        })?;
    debug!(pack = %pack.name, paragraphs = pack.paragraphs.len(), "content pack loaded");
    Ok(pack)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strokes::Syllable;
    use assert_matches::assert_matches;

    #[test]
    fn test_load_english() {
        let pack = ContentPack::load(Language::English).unwrap();

        assert_eq!(pack.name, "english");
        assert!(!pack.words.easy.is_empty());
        assert!(!pack.paragraphs.is_empty());
        assert_eq!(pack.drill_keys(DrillLevel::HomeRow)[0], 'a');
    }

    #[test]
    fn test_load_korean() {
        let pack = ContentPack::load(Language::Korean).unwrap();

        assert_eq!(pack.name, "korean");
        assert!(pack
            .pool(PracticeMode::Word, Difficulty::Easy)
            .iter()
            .all(|w| w.chars().all(|c| Syllable::from_char(c).is_some())));
        assert!(pack.drill_keys(DrillLevel::HomeRow).contains(&'ㅁ'));
    }

    #[test]
    fn test_every_level_and_tier_is_populated() {
        for language in [Language::Korean, Language::English] {
            let pack = ContentPack::load(language).unwrap();
            let mut level = DrillLevel::HomeRow;
            for _ in 0..6 {
                assert!(!pack.drill_keys(level).is_empty(), "{language} {level}");
                level = level.next();
            }
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                assert!(!pack.pool(PracticeMode::Word, difficulty).is_empty());
                assert!(!pack.pool(PracticeMode::Sentence, difficulty).is_empty());
            }
        }
    }

    #[test]
    fn test_position_mode_has_no_texts() {
        let pack = ContentPack::load(Language::English).unwrap();
        assert!(pack.pool(PracticeMode::Position, Difficulty::Hard).is_empty());
    }

    #[test]
    fn test_paragraphs_ignore_difficulty() {
        let pack = ContentPack::load(Language::English).unwrap();
        assert_eq!(
            pack.pool(PracticeMode::Paragraph, Difficulty::Easy),
            pack.pool(PracticeMode::Paragraph, Difficulty::Hard)
        );
    }

    #[test]
    fn test_missing_pack() {
        assert_matches!(read_pack("klingon.json"), Err(Error::ContentNotFound { .. }));
    }

    #[test]
    fn test_pack_deserialization() {
        let json_data = r#"
        {
            "name": "test",
            "position": {
                "home_row": ["a"], "top_row": ["q"], "bottom_row": ["z"],
                "number_row": ["1"], "symbols": ["!"], "all": ["a", "q"]
            },
            "words": { "easy": ["hi"], "medium": ["hello"], "hard": ["salutations"] },
            "sentences": { "easy": ["Hi."], "medium": ["Hello there."], "hard": ["Well met."] },
            "paragraphs": ["One. Two."]
        }
        "#;

        let pack: ContentPack = serde_json::from_str(json_data).unwrap();
        assert_eq!(pack.pool(PracticeMode::Word, Difficulty::Medium), ["hello"]);
        assert_eq!(pack.drill_keys(DrillLevel::All), ['a', 'q']);
    }
}
