//! Comparison operations offered by property filters

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::condition::ConditionValue;

/// The kind of input an operation takes.
///
/// Renderers use this to decide which editor to show next to a property filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    /// A single comparison value
    Value,
    /// No value at all
    Unary,
    /// A list of values
    List,
    /// A `from..to` pair
    Interval,
}

impl OperationType {
    /// Checks whether a value has the shape this operation type expects.
    pub fn accepts(&self, value: &ConditionValue) -> bool {
        match self {
            OperationType::Value => value.is_scalar(),
            OperationType::Unary => false,
            OperationType::List => matches!(value, ConditionValue::List(_)),
            OperationType::Interval => matches!(value, ConditionValue::Interval { .. }),
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationType::Value => "value",
            OperationType::Unary => "unary",
            OperationType::List => "list",
            OperationType::Interval => "interval",
        };
        write!(f, "{}", name)
    }
}

/// A filtering comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Equal,
    NotEqual,
    Greater,
    GreaterOrEqual,
    Less,
    LessOrEqual,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
    IsSet,
    IsNotSet,
    InList,
    NotInList,
    InInterval,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::Equal,
        Operation::NotEqual,
        Operation::Greater,
        Operation::GreaterOrEqual,
        Operation::Less,
        Operation::LessOrEqual,
        Operation::Contains,
        Operation::NotContains,
        Operation::StartsWith,
        Operation::EndsWith,
        Operation::IsSet,
        Operation::IsNotSet,
        Operation::InList,
        Operation::NotInList,
        Operation::InInterval,
    ];

    pub fn operation_type(&self) -> OperationType {
        match self {
            Operation::IsSet | Operation::IsNotSet => OperationType::Unary,
            Operation::InList | Operation::NotInList => OperationType::List,
            Operation::InInterval => OperationType::Interval,
            _ => OperationType::Value,
        }
    }

    pub fn is_unary(&self) -> bool {
        self.operation_type() == OperationType::Unary
    }

    /// The snake_case name used in definition files and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Equal => "equal",
            Operation::NotEqual => "not_equal",
            Operation::Greater => "greater",
            Operation::GreaterOrEqual => "greater_or_equal",
            Operation::Less => "less",
            Operation::LessOrEqual => "less_or_equal",
            Operation::Contains => "contains",
            Operation::NotContains => "not_contains",
            Operation::StartsWith => "starts_with",
            Operation::EndsWith => "ends_with",
            Operation::IsSet => "is_set",
            Operation::IsNotSet => "is_not_set",
            Operation::InList => "in_list",
            Operation::NotInList => "not_in_list",
            Operation::InInterval => "in_interval",
        }
    }

    /// Short symbol for compact output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Equal => "==",
            Operation::NotEqual => "!=",
            Operation::Greater => ">",
            Operation::GreaterOrEqual => ">=",
            Operation::Less => "<",
            Operation::LessOrEqual => "<=",
            Operation::Contains => "contains",
            Operation::NotContains => "not contains",
            Operation::StartsWith => "starts with",
            Operation::EndsWith => "ends with",
            Operation::IsSet => "is set",
            Operation::IsNotSet => "is not set",
            Operation::InList => "in",
            Operation::NotInList => "not in",
            Operation::InInterval => "between",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .iter()
            .find(|operation| operation.name() == s || operation.symbol() == s)
            .copied()
            .ok_or_else(|| format!("Unknown operation '{}'", s))
    }
}
