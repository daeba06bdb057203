use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use super::{ContentPack, Difficulty, PracticeMode};

/// Picks practice texts, steering away from ones already shown
#[derive(Debug, Default, Clone)]
pub struct TextPicker {
    used: HashSet<String>,
}

impl TextPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pick(
        &mut self,
        pack: &ContentPack,
        mode: PracticeMode,
        difficulty: Difficulty,
    ) -> Option<String> {
        self.pick_with_rng(pack.pool(mode, difficulty), &mut rand::thread_rng())
    }

    /// Random unused text from `pool`; once everything has been seen the
    /// whole pool is eligible again.
    pub fn pick_with_rng<R: Rng + ?Sized>(&mut self, pool: &[String], rng: &mut R) -> Option<String> {
        let available: Vec<&String> = pool.iter().filter(|t| !self.used.contains(*t)).collect();
        let text = if available.is_empty() {
            pool.choose(rng)?
        } else {
            *available.choose(rng)?
        };

        self.used.insert(text.clone());
        Some(text.clone())
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Language;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pool(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_pool_yields_none() {
        let mut picker = TextPicker::new();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(picker.pick_with_rng(&[], &mut rng), None);
    }

    #[test]
    fn test_no_repeats_until_pool_exhausted() {
        let texts = pool(&["one", "two", "three", "four"]);
        let mut picker = TextPicker::new();
        let mut rng = StdRng::seed_from_u64(42);

        let mut seen = HashSet::new();
        for _ in 0..texts.len() {
            let text = picker.pick_with_rng(&texts, &mut rng).unwrap();
            assert!(seen.insert(text), "picked a repeat before exhausting pool");
        }
        assert_eq!(picker.used_count(), 4);

        // everything used: falls back to the full pool
        let again = picker.pick_with_rng(&texts, &mut rng).unwrap();
        assert!(texts.contains(&again));
    }

    #[test]
    fn test_pick_from_pack() {
        let pack = ContentPack::load(Language::English).unwrap();
        let mut picker = TextPicker::new();

        let text = picker
            .pick(&pack, PracticeMode::Sentence, Difficulty::Easy)
            .unwrap();
        assert!(pack.sentences.easy.contains(&text));
        assert_eq!(picker.pick(&pack, PracticeMode::Position, Difficulty::Easy), None);
    }
}
