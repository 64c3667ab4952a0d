//! Why a condition couldn't be evaluated against a record

use std::fmt;

use crate::condition::ConditionValue;
use crate::operation::Operation;
use crate::record::{FieldValue, PropertyPath};

/// Errors that can occur while matching a condition against a record.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchError {
    /// The operation has no meaning for fields of this kind
    UnsupportedOperation {
        field_type: &'static str,
        operation: Operation,
        supported: &'static [Operation],
    },
    /// The entered value can't be compared with the field
    TypeMismatch {
        field_type: &'static str,
        value_type: &'static str,
    },
    /// Evaluating the condition on one property failed
    Property {
        property: PropertyPath,
        error: Box<MatchError>,
    },
}

impl MatchError {
    pub(crate) fn unsupported(
        field_value: &FieldValue,
        operation: Operation,
        supported: &'static [Operation],
    ) -> Self {
        MatchError::UnsupportedOperation {
            field_type: field_value.type_name(),
            operation,
            supported,
        }
    }

    pub(crate) fn mismatch(field_value: &FieldValue, condition_value: &ConditionValue) -> Self {
        MatchError::TypeMismatch {
            field_type: field_value.type_name(),
            value_type: condition_value.type_name(),
        }
    }

    /// Attaches the property being evaluated. Errors that already name one keep it.
    pub(crate) fn at_property(self, property: &PropertyPath) -> Self {
        match self {
            MatchError::Property { .. } => self,
            error => MatchError::Property {
                property: property.clone(),
                error: Box::new(error),
            },
        }
    }

    /// The property whose condition failed, if known.
    pub fn property(&self) -> Option<&PropertyPath> {
        match self {
            MatchError::Property { property, .. } => Some(property),
            _ => None,
        }
    }

    /// The failure itself, without property context.
    pub fn root_cause(&self) -> &MatchError {
        match self {
            MatchError::Property { error, .. } => error.root_cause(),
            error => error,
        }
    }
}

impl fmt::Display for MatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchError::UnsupportedOperation {
                field_type,
                operation,
                supported,
            } => {
                let names: Vec<&str> = supported.iter().map(Operation::name).collect();
                write!(
                    f,
                    "'{}' doesn't apply to {} fields (use one of: {})",
                    operation,
                    field_type,
                    names.join(", ")
                )
            }
            MatchError::TypeMismatch {
                field_type,
                value_type,
            } => write!(f, "{} field can't be compared with a {} value", field_type, value_type),
            MatchError::Property { property, error } => write!(f, "'{}': {}", property, error),
        }
    }
}

impl std::error::Error for MatchError {}
