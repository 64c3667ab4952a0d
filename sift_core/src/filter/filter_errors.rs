use std::fmt;

use crate::component::{ComponentError, ComponentId};
use crate::condition::MatchError;
use crate::configuration::ConfigurationError;

/// Errors raised by a data loader.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// A record couldn't be evaluated against the condition
    Match { record: String, error: MatchError },
    /// The underlying data source failed
    Source(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Match { record, error } => {
                write!(f, "Could not evaluate record '{}': {}", record, error)
            }
            LoadError::Source(message) => write!(f, "Data source error: {}", message),
        }
    }
}

impl std::error::Error for LoadError {}

/// Errors raised by [`Filter`](super::Filter) operations.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterError {
    /// A configuration with this id is already registered
    DuplicateConfiguration(String),
    /// No configuration with this id is registered
    UnknownConfiguration(String),
    /// The empty configuration can't be removed or replaced
    EmptyConfiguration,
    /// The operation needs a run-time configuration
    DesignTimeConfiguration(String),
    /// The component isn't part of the current configuration
    UnknownComponent(ComponentId),
    /// No loose condition with this id
    UnknownCondition(ComponentId),
    Component(ComponentError),
    Configuration(ConfigurationError),
    Load(LoadError),
}

impl fmt::Display for FilterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterError::DuplicateConfiguration(id) => {
                write!(f, "A configuration with id '{}' already exists", id)
            }
            FilterError::UnknownConfiguration(id) => {
                write!(f, "No configuration with id '{}'", id)
            }
            FilterError::EmptyConfiguration => {
                write!(f, "The empty configuration cannot be removed")
            }
            FilterError::DesignTimeConfiguration(id) => write!(
                f,
                "Configuration '{}' is declared at design time and cannot be changed",
                id
            ),
            FilterError::UnknownComponent(id) => {
                write!(f, "Component {} is not part of the current configuration", id)
            }
            FilterError::UnknownCondition(id) => write!(f, "No condition with id {}", id),
            FilterError::Component(e) => write!(f, "{}", e),
            FilterError::Configuration(e) => write!(f, "{}", e),
            FilterError::Load(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for FilterError {}

impl From<ComponentError> for FilterError {
    fn from(error: ComponentError) -> Self {
        FilterError::Component(error)
    }
}

impl From<ConfigurationError> for FilterError {
    fn from(error: ConfigurationError) -> Self {
        FilterError::Configuration(error)
    }
}

impl From<LoadError> for FilterError {
    fn from(error: LoadError) -> Self {
        FilterError::Load(error)
    }
}
