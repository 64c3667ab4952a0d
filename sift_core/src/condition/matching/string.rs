//! Text comparison logic for conditions

use super::super::{ConditionValue, MatchError};
use crate::operation::Operation;
use crate::record::FieldValue;

static SUPPORTED_OPS: [Operation; 6] = [
    Operation::Equal,
    Operation::NotEqual,
    Operation::Contains,
    Operation::NotContains,
    Operation::StartsWith,
    Operation::EndsWith,
];

/// Compare a text field value against a condition value.
///
/// All comparisons ignore case.
pub fn compare_text(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    let value = match field_value {
        FieldValue::Text(s) => s.as_str(),
        _ => {
            return Err(MatchError::mismatch(field_value, condition_value));
        }
    };

    let expected = match condition_value {
        ConditionValue::Text(s) => s,
        _ => {
            return Err(MatchError::mismatch(field_value, condition_value));
        }
    };

    match operation {
        Operation::Equal => Ok(value.eq_ignore_ascii_case(expected)),
        Operation::NotEqual => Ok(!value.eq_ignore_ascii_case(expected)),
        Operation::Contains => Ok(value.to_lowercase().contains(&expected.to_lowercase())),
        Operation::NotContains => Ok(!value.to_lowercase().contains(&expected.to_lowercase())),
        Operation::StartsWith => Ok(value.to_lowercase().starts_with(&expected.to_lowercase())),
        Operation::EndsWith => Ok(value.to_lowercase().ends_with(&expected.to_lowercase())),
        _ => Err(MatchError::unsupported(field_value, operation, &SUPPORTED_OPS)),
    }
}
