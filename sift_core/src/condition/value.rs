//! Values entered into property filters

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::operation::OperationType;

/// Values used in property conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ConditionValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(NaiveDate),
    List(Vec<ConditionValue>),
    Interval {
        from: Box<ConditionValue>,
        to: Box<ConditionValue>,
    },
}

impl ConditionValue {
    /// Returns the type name of this value for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            ConditionValue::Text(_) => "Text",
            ConditionValue::Integer(_) => "Integer",
            ConditionValue::Float(_) => "Float",
            ConditionValue::Boolean(_) => "Boolean",
            ConditionValue::Date(_) => "Date",
            ConditionValue::List(_) => "List",
            ConditionValue::Interval { .. } => "Interval",
        }
    }

    pub fn is_scalar(&self) -> bool {
        !matches!(self, ConditionValue::List(_) | ConditionValue::Interval { .. })
    }

    pub fn interval(from: ConditionValue, to: ConditionValue) -> Self {
        ConditionValue::Interval {
            from: Box::new(from),
            to: Box::new(to),
        }
    }

    /// Parses a single value, trying integer, float, boolean and date before falling back to text.
    pub fn parse_scalar(input: &str) -> Self {
        let trimmed = input.trim();
        if let Ok(i) = trimmed.parse::<i64>() {
            return ConditionValue::Integer(i);
        }
        if let Ok(f) = trimmed.parse::<f64>() {
            return ConditionValue::Float(f);
        }
        match trimmed {
            "true" => return ConditionValue::Boolean(true),
            "false" => return ConditionValue::Boolean(false),
            _ => {}
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return ConditionValue::Date(date);
        }
        ConditionValue::Text(trimmed.to_string())
    }

    /// Parses user input into a value of the shape an operation type expects.
    ///
    /// Lists are comma separated, intervals are written `from..to`.
    pub fn parse_for(operation_type: OperationType, input: &str) -> Result<Self, String> {
        match operation_type {
            OperationType::Value => Ok(Self::parse_scalar(input)),
            OperationType::Unary => Err("This operation does not take a value".to_string()),
            OperationType::List => {
                let items: Vec<ConditionValue> = input
                    .split(',')
                    .filter(|item| !item.trim().is_empty())
                    .map(Self::parse_scalar)
                    .collect();
                if items.is_empty() {
                    return Err("A list needs at least one item".to_string());
                }
                Ok(ConditionValue::List(items))
            }
            OperationType::Interval => {
                let (from, to) = input
                    .split_once("..")
                    .ok_or_else(|| format!("Expected an interval like 'from..to', got '{}'", input))?;
                Ok(Self::interval(Self::parse_scalar(from), Self::parse_scalar(to)))
            }
        }
    }
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Text(s) => write!(f, "\"{}\"", s),
            ConditionValue::Integer(i) => write!(f, "{}", i),
            ConditionValue::Float(x) => write!(f, "{}", x),
            ConditionValue::Boolean(b) => write!(f, "{}", b),
            ConditionValue::Date(d) => write!(f, "{}", d),
            ConditionValue::List(items) => {
                let rendered: Vec<String> = items.iter().map(|item| item.to_string()).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
            ConditionValue::Interval { from, to } => write!(f, "{}..{}", from, to),
        }
    }
}

impl From<&str> for ConditionValue {
    fn from(value: &str) -> Self {
        ConditionValue::Text(value.to_string())
    }
}

impl From<i64> for ConditionValue {
    fn from(value: i64) -> Self {
        ConditionValue::Integer(value)
    }
}

impl From<bool> for ConditionValue {
    fn from(value: bool) -> Self {
        ConditionValue::Boolean(value)
    }
}
