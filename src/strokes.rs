/// First code point of the precomposed Hangul syllable block (가)
pub const SYLLABLE_FIRST: u32 = 0xAC00;
/// Last code point of the precomposed Hangul syllable block (힣)
pub const SYLLABLE_LAST: u32 = 0xD7A3;

const VOWEL_COUNT: u32 = 21;
const TAIL_COUNT: u32 = 28; // includes the "no trailing consonant" slot

/// A precomposed Hangul syllable split into its jamo slot indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub lead: u32,
    pub vowel: u32,
    pub tail: u32,
}

impl Syllable {
    pub fn from_char(c: char) -> Option<Self> {
        let code = c as u32;
        if !(SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
            return None;
        }

        let offset = code - SYLLABLE_FIRST;
        Some(Self {
            lead: offset / (VOWEL_COUNT * TAIL_COUNT),
            vowel: (offset % (VOWEL_COUNT * TAIL_COUNT)) / TAIL_COUNT,
            tail: offset % TAIL_COUNT,
        })
    }

    pub fn has_tail(&self) -> bool {
        self.tail != 0
    }

    /// Keys pressed on a two-set keyboard: lead, vowel and an optional tail
    pub fn strokes(&self) -> u32 {
        if self.has_tail() {
            3
        } else {
            2
        }
    }
}

/// Standalone jamo, either compatibility (ㄱ..ㅣ) or conjoining (U+1100..U+11FF)
pub fn is_jamo(c: char) -> bool {
    matches!(c as u32, 0x3131..=0x3163 | 0x1100..=0x11FF)
}

/// Number of physical keystrokes a touch-typist needs to produce `c`
pub fn stroke_count(c: char) -> u32 {
    match Syllable::from_char(c) {
        Some(syllable) => syllable.strokes(),
        // a lone jamo, latin letter, digit, space or symbol is a single key
        None => 1,
    }
}

/// Sum of `stroke_count` over every character of `text`
pub fn total_strokes(text: &str) -> u32 {
    text.chars().map(stroke_count).sum()
}
