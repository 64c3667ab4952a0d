use inquire::{InquireError, Text};
use sift_core::{ActionError, NamePrompt};

/// Asks for configuration names in the terminal, unless one was given up front.
pub struct TerminalNamePrompt {
    preset: Option<String>,
}

impl TerminalNamePrompt {
    pub fn new(preset: Option<String>) -> Self {
        Self { preset }
    }
}

impl NamePrompt for TerminalNamePrompt {
    fn prompt_name(&mut self, caption: &str) -> Result<Option<String>, ActionError> {
        if let Some(name) = self.preset.take() {
            return Ok(Some(name));
        }

        match Text::new(&format!("{}:", caption)).prompt() {
            Ok(name) => Ok(Some(name)),
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(ActionError::Prompt(e.to_string())),
        }
    }
}
