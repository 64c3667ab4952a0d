//! Caption lookup by message key

use std::collections::HashMap;

/// Resolves user-facing captions.
pub trait Messages {
    /// The message for `key`, or the key itself when there is none.
    fn message(&self, key: &str) -> String;
}

const BUILT_IN: &[(&str, &str)] = &[
    ("actions.Filter.Save", "Save"),
    ("actions.Filter.SaveAs", "Save as..."),
    ("filter.emptyConfiguration", "Empty filter"),
    ("filter.saveAs.prompt", "Configuration name"),
];

/// Built-in English messages with per-key overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticMessages {
    overrides: HashMap<String, String>,
}

impl StaticMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.overrides.insert(key.into(), message.into());
        self
    }
}

impl Messages for StaticMessages {
    fn message(&self, key: &str) -> String {
        if let Some(message) = self.overrides.get(key) {
            return message.clone();
        }
        BUILT_IN
            .iter()
            .find(|(built_in, _)| *built_in == key)
            .map(|(_, message)| message.to_string())
            .unwrap_or_else(|| key.to_string())
    }
}
