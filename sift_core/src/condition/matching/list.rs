//! List membership and interval logic for conditions

use super::super::{ConditionValue, MatchError};
use super::compare_scalar;
use crate::operation::Operation;
use crate::record::FieldValue;

static LIST_OPS: [Operation; 2] = [Operation::InList, Operation::NotInList];

/// Check whether a field value equals any item of a list condition value.
pub fn compare_in_list(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    let items = match condition_value {
        ConditionValue::List(items) => items,
        _ => {
            return Err(MatchError::mismatch(field_value, condition_value));
        }
    };

    // Items of a different type never match instead of failing the whole list
    let mut found = false;
    for item in items {
        match compare_scalar(field_value, Operation::Equal, item) {
            Ok(true) => {
                found = true;
                break;
            }
            Ok(false) | Err(MatchError::TypeMismatch { .. }) => {}
            Err(e) => return Err(e),
        }
    }

    match operation {
        Operation::InList => Ok(found),
        Operation::NotInList => Ok(!found),
        _ => Err(MatchError::unsupported(field_value, operation, &LIST_OPS)),
    }
}

/// Check whether a field value lies within an inclusive interval.
pub fn compare_interval(
    field_value: &FieldValue,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    match condition_value {
        ConditionValue::Interval { from, to } => {
            Ok(compare_scalar(field_value, Operation::GreaterOrEqual, from)?
                && compare_scalar(field_value, Operation::LessOrEqual, to)?)
        }
        _ => Err(MatchError::mismatch(field_value, condition_value)),
    }
}
