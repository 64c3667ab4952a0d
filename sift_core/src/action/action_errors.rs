use std::fmt;

use crate::filter::FilterError;
use crate::support::PersistenceError;

/// Errors raised by filter actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// The action can't run against the filter's current state
    NotApplicable { action: &'static str, reason: String },
    /// The entered configuration name was blank
    EmptyName,
    /// The name prompt failed for a reason other than being cancelled
    Prompt(String),
    Persistence(PersistenceError),
    Filter(FilterError),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::NotApplicable { action, reason } => {
                write!(f, "Action '{}' is not applicable: {}", action, reason)
            }
            ActionError::EmptyName => write!(f, "Configuration name cannot be empty"),
            ActionError::Prompt(message) => write!(f, "Could not read configuration name: {}", message),
            ActionError::Persistence(e) => write!(f, "{}", e),
            ActionError::Filter(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ActionError {}

impl From<PersistenceError> for ActionError {
    fn from(error: PersistenceError) -> Self {
        ActionError::Persistence(error)
    }
}

impl From<FilterError> for ActionError {
    fn from(error: FilterError) -> Self {
        ActionError::Filter(error)
    }
}
