/// Whether the input method is still assembling a character
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputState {
    #[default]
    Committed,
    /// The IME holds keystrokes that have not become a final character yet
    Composing { preedit: String },
}

/// Tracks composition so a syllable is only scored once it is final
#[derive(Debug, Clone, Default)]
pub struct Composer {
    state: InputState,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn is_composing(&self) -> bool {
        matches!(self.state, InputState::Composing { .. })
    }

    pub fn preedit(&self) -> &str {
        match &self.state {
            InputState::Composing { preedit } => preedit,
            InputState::Committed => "",
        }
    }

    /// New preedit from the input method. An empty preedit ends composition
    /// without committing anything.
    pub fn update(&mut self, preedit: &str) {
        self.state = if preedit.is_empty() {
            InputState::Committed
        } else {
            InputState::Composing {
                preedit: preedit.to_string(),
            }
        };
    }

    /// Ends composition and hands back the characters that are now final
    pub fn commit(&mut self, text: &str) -> String {
        self.state = InputState::Committed;
        text.to_string()
    }

    pub fn cancel(&mut self) {
        self.state = InputState::Committed;
    }

    /// Removes the last preedit character. Returns false when there was no
    /// composition to edit.
    pub fn backspace(&mut self) -> bool {
        match &mut self.state {
            InputState::Composing { preedit } => {
                preedit.pop();
                if preedit.is_empty() {
                    self.state = InputState::Committed;
                }
                true
            }
            InputState::Committed => false,
        }
    }
}
