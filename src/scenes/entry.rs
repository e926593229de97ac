//! High score name entry

use super::FrameInput;
use crate::highscores::DEFAULT_NAME;
use crate::session::Session;

/// Initials are at most this many characters
pub const NAME_LENGTH: usize = 3;

/// Clean raw text field contents into initials
pub fn normalize_name(raw: &str) -> String {
    raw.trim_start()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_control())
        .take(NAME_LENGTH)
        .collect()
}

#[derive(Debug, Clone)]
pub struct EntryScene {
    name: String,
    submitted: bool,
}

impl Default for EntryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryScene {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            submitted: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&mut self, session: &mut Session, input: &FrameInput) {
        if self.submitted {
            return;
        }

        if input.backspace {
            self.name.pop();
        }
        if !input.text.is_empty() {
            let raw = format!("{}{}", self.name, input.text);
            self.name = normalize_name(&raw);
        }

        if input.enter {
            self.submitted = true;
            log::info!("High score entry submitted as {}", self.name);
            session.set_player_name(&self.name);
        }
    }
}
