//! Matching of condition values against record fields

mod boolean;
mod date;
mod list;
mod numeric;
mod string;

use super::{ConditionValue, MatchError};
use crate::operation::Operation;
use crate::record::FieldValue;

/// Match a (possibly missing) field against an operation and its value.
///
/// Missing fields behave like nulls: they are "not set" and fail every comparison.
pub fn matches_field(
    field_value: Option<&FieldValue>,
    operation: Operation,
    condition_value: Option<&ConditionValue>,
) -> Result<bool, MatchError> {
    let field_value = field_value.filter(|value| !value.is_null());

    match operation {
        Operation::IsSet => return Ok(field_value.is_some()),
        Operation::IsNotSet => return Ok(field_value.is_none()),
        _ => {}
    }

    // Conditions without a value don't restrict anything
    let Some(condition_value) = condition_value else {
        return Ok(true);
    };

    let Some(field_value) = field_value else {
        return Ok(false);
    };

    match operation {
        Operation::InList | Operation::NotInList => {
            list::compare_in_list(field_value, operation, condition_value)
        }
        Operation::InInterval => list::compare_interval(field_value, condition_value),
        _ => compare_scalar(field_value, operation, condition_value),
    }
}

/// Compare a single field value by delegating to type-specific comparators
fn compare_scalar(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    match field_value {
        FieldValue::Text(_) => string::compare_text(field_value, operation, condition_value),
        FieldValue::Integer(_) => numeric::compare_integer(field_value, operation, condition_value),
        FieldValue::Float(_) => numeric::compare_float(field_value, operation, condition_value),
        FieldValue::Boolean(b) => Ok(boolean::compare_boolean(*b, operation, condition_value)),
        FieldValue::Date(_) => date::compare_date(field_value, operation, condition_value),
        FieldValue::Null => Ok(false),
        FieldValue::Nested(_) => Err(MatchError::mismatch(field_value, condition_value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_set_on_missing_and_null() {
        assert!(!matches_field(None, Operation::IsSet, None).unwrap());
        assert!(!matches_field(Some(&FieldValue::Null), Operation::IsSet, None).unwrap());
        assert!(matches_field(Some(&FieldValue::Null), Operation::IsNotSet, None).unwrap());
        assert!(matches_field(Some(&FieldValue::Integer(0)), Operation::IsSet, None).unwrap());
    }

    #[test]
    fn test_missing_value_matches_everything() {
        assert!(matches_field(Some(&FieldValue::Integer(1)), Operation::Greater, None).unwrap());
    }

    #[test]
    fn test_missing_field_fails_comparison() {
        let value = ConditionValue::Integer(1);
        assert!(!matches_field(None, Operation::NotEqual, Some(&value)).unwrap());
    }

    #[test]
    fn test_nested_field_is_mismatch() {
        let nested = FieldValue::Nested(Default::default());
        let value = ConditionValue::Integer(1);
        let result = matches_field(Some(&nested), Operation::Equal, Some(&value));
        assert!(matches!(result, Err(MatchError::TypeMismatch { .. })));
    }
}
