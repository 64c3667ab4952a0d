//! Actions that persist the current configuration of a filter
//!
//! - [`FilterSaveAsAction`] stores a copy of the current configuration under a new name
//! - [`FilterSaveAction`] updates the stored model of the current configuration, falling
//!   back to save-as when there is nothing stored to update

mod action_errors;
mod save;
mod save_as;

pub use action_errors::ActionError;
pub use save::FilterSaveAction;
pub use save_as::FilterSaveAsAction;

use convert_case::{Case, Casing};

use crate::filter::{DataLoader, Filter, FilterError};

/// Asks the user for a configuration name.
pub trait NamePrompt {
    /// Returns `None` when the user cancels.
    fn prompt_name(&mut self, caption: &str) -> Result<Option<String>, ActionError>;
}

/// What a save action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The stored model of an existing configuration was updated
    Updated { id: String },
    /// A new configuration was stored and made current
    SavedAs { id: String },
    /// The user cancelled the name prompt
    Cancelled,
}

/// Turns a configuration name into an id: only alphanumerics, underscores, dashes and
/// whitespace are kept, and the result is snake_case.
pub fn sanitize_configuration_id(name: &str) -> String {
    name.chars()
        .filter(|&c| c == ' ' || c == '_' || c == '-' || c.is_alphanumeric())
        .collect::<String>()
        .to_case(Case::Snake)
}

/// Derives an id from a name that no configuration of the filter uses yet.
///
/// Taken ids get a numeric suffix, counting up to `_999`. When every candidate is taken
/// the last one is reported as a duplicate.
pub fn unique_configuration_id<L: DataLoader>(
    filter: &Filter<L>,
    name: &str,
) -> Result<String, FilterError> {
    let mut sanitized = sanitize_configuration_id(name);
    if sanitized.is_empty() {
        sanitized = "configuration".to_string();
    }

    let mut id = sanitized.clone();
    let mut counter = 1;
    while filter.configuration(&id).is_some() {
        if counter >= 1000 {
            return Err(FilterError::DuplicateConfiguration(id));
        }
        id = format!("{}_{}", sanitized, counter);
        counter += 1;
    }
    Ok(id)
}
