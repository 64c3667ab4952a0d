//! Numeric comparison logic for conditions (integer and float)

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

/// Compare an integer field value against a condition value
pub fn compare_integer(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    let value = match field_value {
        FieldValue::Integer(i) => *i,
        _ => return Err(MatchError::mismatch(field_value, condition_value)),
    };

    match condition_value {
        ConditionValue::Integer(expected) => match operation {
            Operation::Equal => Ok(value == *expected),
            Operation::NotEqual => Ok(value != *expected),
            Operation::Greater => Ok(value > *expected),
            Operation::Less => Ok(value < *expected),
            Operation::GreaterOrEqual => Ok(value >= *expected),
            Operation::LessOrEqual => Ok(value <= *expected),
            _ => Err(MatchError::unsupported(field_value, operation, &SUPPORTED_OPS)),
        },
        ConditionValue::Float(expected) => compare_floats(value as f64, *expected, field_value, operation),
        _ => Err(MatchError::mismatch(field_value, condition_value)),
    }
}

/// Compare a float field value against a condition value
pub fn compare_float(
    field_value: &FieldValue,
    operation: Operation,
    condition_value: &ConditionValue,
) -> Result<bool, MatchError> {
    let value = match field_value {
        FieldValue::Float(f) => *f,
        _ => return Err(MatchError::mismatch(field_value, condition_value)),
    };

    match condition_value {
        ConditionValue::Float(expected) => compare_floats(value, *expected, field_value, operation),
        ConditionValue::Integer(expected) => {
            compare_floats(value, *expected as f64, field_value, operation)
        }
        _ => Err(MatchError::mismatch(field_value, condition_value)),
    }
}

fn compare_floats(
    value: f64,
    expected: f64,
    field_value: &FieldValue,
    operation: Operation,
) -> Result<bool, MatchError> {
    match operation {
        Operation::Equal => Ok((value - expected).abs() < f64::EPSILON),
        Operation::NotEqual => Ok((value - expected).abs() >= f64::EPSILON),
        Operation::Greater => Ok(value > expected),
        Operation::Less => Ok(value < expected),
        Operation::GreaterOrEqual => Ok(value >= expected),
        Operation::LessOrEqual => Ok(value <= expected),
        _ => Err(MatchError::unsupported(field_value, operation, &SUPPORTED_OPS)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int_field(i: i64) -> FieldValue {
        FieldValue::Integer(i)
    }

    fn float_field(f: f64) -> FieldValue {
        FieldValue::Float(f)
    }

    // ===== Integer Tests =====

    #[test]
    fn test_integer_equal_integer() {
        assert!(compare_integer(&int_field(42), Operation::Equal, &ConditionValue::Integer(42)).unwrap());
        assert!(!compare_integer(&int_field(42), Operation::Equal, &ConditionValue::Integer(7)).unwrap());
    }

    #[test]
    fn test_integer_ordering() {
        assert!(compare_integer(&int_field(100), Operation::Greater, &ConditionValue::Integer(50)).unwrap());
        assert!(compare_integer(&int_field(50), Operation::Less, &ConditionValue::Integer(100)).unwrap());
        assert!(compare_integer(&int_field(100), Operation::GreaterOrEqual, &ConditionValue::Integer(100)).unwrap());
        assert!(compare_integer(&int_field(100), Operation::LessOrEqual, &ConditionValue::Integer(100)).unwrap());
    }

    #[test]
    fn test_integer_against_float() {
        assert!(compare_integer(&int_field(3), Operation::Greater, &ConditionValue::Float(2.5)).unwrap());
    }

    #[test]
    fn test_integer_contains_unsupported() {
        let result = compare_integer(&int_field(3), Operation::Contains, &ConditionValue::Integer(3));
        assert!(matches!(result, Err(MatchError::UnsupportedOperation { .. })));
    }

    #[test]
    fn test_integer_against_text_mismatch() {
        let result = compare_integer(&int_field(3), Operation::Equal, &ConditionValue::from("3"));
        assert!(matches!(result, Err(MatchError::TypeMismatch { .. })));
    }

    // ===== Float Tests =====

    #[test]
    fn test_float_equal() {
        assert!(compare_float(&float_field(1.5), Operation::Equal, &ConditionValue::Float(1.5)).unwrap());
        assert!(compare_float(&float_field(2.0), Operation::Equal, &ConditionValue::Integer(2)).unwrap());
    }

    #[test]
    fn test_float_ordering() {
        assert!(compare_float(&float_field(1.5), Operation::Less, &ConditionValue::Integer(2)).unwrap());
        assert!(!compare_float(&float_field(1.5), Operation::Greater, &ConditionValue::Float(1.5)).unwrap());
    }
}
