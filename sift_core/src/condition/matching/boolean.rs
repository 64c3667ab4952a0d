//! Boolean comparison logic for conditions

use super::super::ConditionValue;
use crate::operation::Operation;

/// Compare a boolean value against a condition value
pub fn compare_boolean(value: bool, operation: Operation, condition_value: &ConditionValue) -> bool {
    match condition_value {
        ConditionValue::Boolean(expected) => match operation {
            Operation::Equal => value == *expected,
            Operation::NotEqual => value != *expected,
            _ => false,
        },
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_true_equals_true() {
        assert!(compare_boolean(true, Operation::Equal, &ConditionValue::Boolean(true)));
    }

    #[test]
    fn test_true_not_equals_false() {
        assert!(!compare_boolean(true, Operation::Equal, &ConditionValue::Boolean(false)));
        assert!(compare_boolean(true, Operation::NotEqual, &ConditionValue::Boolean(false)));
    }

    #[test]
    fn test_unsupported_operation() {
        assert!(!compare_boolean(true, Operation::Greater, &ConditionValue::Boolean(false)));
        assert!(!compare_boolean(true, Operation::Contains, &ConditionValue::Boolean(true)));
    }

    #[test]
    fn test_wrong_value_type() {
        assert!(!compare_boolean(true, Operation::Equal, &ConditionValue::from("true")));
        assert!(!compare_boolean(true, Operation::Equal, &ConditionValue::Integer(1)));
    }
}
