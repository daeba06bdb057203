use crate::content::PracticeMode;

/// One sentence of a paragraph target; `start` is a char index into the target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentenceLine {
    pub start: usize,
    pub text: String,
}

impl SentenceLine {
    /// Char index just past the sentence, excluding the separating space
    pub fn end(&self) -> usize {
        self.start + self.text.chars().count()
    }
}

/// Splits at every space that directly follows a period. The separating
/// space belongs to no sentence; the next line starts after it.
pub fn sentence_lines(target: &str) -> Vec<SentenceLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut start = 0;
    let mut prev = None;

    for (idx, c) in target.chars().enumerate() {
        if c == ' ' && prev == Some('.') {
            lines.push(SentenceLine {
                start,
                text: std::mem::take(&mut current),
            });
            start = idx + 1;
        } else {
            current.push(c);
        }
        prev = Some(c);
    }

    lines.push(SentenceLine {
        start,
        text: current,
    });
    lines
}

/// End index of the line the cursor is on. Outside paragraph mode the whole
/// target is a single line.
pub fn current_line_end(target: &str, mode: PracticeMode, typed_len: usize) -> usize {
    let target_len = target.chars().count();
    if mode != PracticeMode::Paragraph {
        return target_len;
    }

    sentence_lines(target)
        .iter()
        .map(SentenceLine::end)
        .find(|&end| typed_len <= end)
        .unwrap_or(target_len)
}
