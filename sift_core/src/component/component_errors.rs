use std::fmt;

use crate::operation::Operation;

use super::ComponentId;

/// Errors raised when editing filter components.
#[derive(Debug, Clone, PartialEq)]
pub enum ComponentError {
    /// The value doesn't have the shape the operation expects
    ValueNotAccepted {
        operation: Operation,
        value_type: String,
    },
    /// The component exists but isn't a property filter
    NotAPropertyFilter(ComponentId),
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComponentError::ValueNotAccepted {
                operation,
                value_type,
            } => write!(
                f,
                "Operation '{}' takes {} input and cannot use a {} value",
                operation,
                operation.operation_type(),
                value_type
            ),
            ComponentError::NotAPropertyFilter(id) => {
                write!(f, "Component {} is not a property filter", id)
            }
        }
    }
}

impl std::error::Error for ComponentError {}
