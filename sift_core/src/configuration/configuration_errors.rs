use std::fmt;

use crate::component::ComponentId;

/// Errors raised by configuration bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    /// The component is not part of the configuration's tree
    UnknownComponent {
        configuration: String,
        component: ComponentId,
    },
}

impl fmt::Display for ConfigurationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationError::UnknownComponent {
                configuration,
                component,
            } => write!(
                f,
                "Component {} is not part of configuration '{}'",
                component, configuration
            ),
        }
    }
}

impl std::error::Error for ConfigurationError {}
