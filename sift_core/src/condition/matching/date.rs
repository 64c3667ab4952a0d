//! Date comparison logic for conditions

use chrono::NaiveDate;

use super::super::{ConditionValue, MatchError};
use crate::operation::Operation;
use crate::record::FieldValue;

static SUPPORTED_OPS: [Operation; 6] = [
    Operation::Equal,
    Operation::NotEqual,
    Operation::Greater,
    Operation::Less,
    Operation::GreaterOrEqual,
    Operation::LessOrEqual,
];

/// Compare a date field value against a condition value.
///
/// Text values are accepted when they hold an ISO date.
pub fn compare_date(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    let value = match field_value {
        FieldValue::Date(d) => *d,
        _ => return Err(MatchError::mismatch(field_value, condition_value)),
    };

    let expected = match condition_value {
        ConditionValue::Date(d) => *d,
        ConditionValue::Text(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| MatchError::mismatch(field_value, condition_value))?,
        _ => return Err(MatchError::mismatch(field_value, condition_value)),
    };

    match operation {
        Operation::Equal => Ok(value == expected),
        Operation::NotEqual => Ok(value != expected),
        Operation::Greater => Ok(value > expected),
        Operation::Less => Ok(value < expected),
        Operation::GreaterOrEqual => Ok(value >= expected),
        Operation::LessOrEqual => Ok(value <= expected),
        _ => Err(MatchError::unsupported(field_value, operation, &SUPPORTED_OPS)),
    }
}
