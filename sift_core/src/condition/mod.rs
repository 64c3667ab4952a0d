//! Query conditions produced by filter components
//!
//! Filter components don't query anything themselves. They produce a tree of
//! conditions that a data loader evaluates:
//! - [`PropertyCondition`] compares one property with a parameter value
//! - [`LogicalCondition`] combines conditions with AND/OR

mod condition_errors;
mod matching;
mod value;

pub use condition_errors::MatchError;
pub use value::ConditionValue;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operation::Operation;
use crate::record::{PropertyPath, Record};

/// Logical operator for combining multiple conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    #[default]
    And,
    Or,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::And => write!(f, "AND"),
            Combinator::Or => write!(f, "OR"),
        }
    }
}

/// A node of a condition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Condition {
    Property(PropertyCondition),
    Logical(LogicalCondition),
}

impl Condition {
    pub fn matches(&self, record: &Record) -> Result<bool, MatchError> {
        match self {
            Condition::Property(condition) => condition.matches(record),
            Condition::Logical(condition) => condition.matches(record),
        }
    }

    /// Drops inactive leaves, returning `None` when nothing is left.
    fn actualized(&self) -> Option<Condition> {
        match self {
            Condition::Property(condition) if condition.is_active() => {
                Some(Condition::Property(condition.clone()))
            }
            Condition::Property(_) => None,
            Condition::Logical(condition) => {
                let actualized = condition.actualized();
                (!actualized.is_empty()).then_some(Condition::Logical(actualized))
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Property(condition) => write!(f, "{}", condition),
            Condition::Logical(condition) => write!(f, "{}", condition),
        }
    }
}

/// Compares one property of a record with a named parameter value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyCondition {
    pub property: PropertyPath,
    pub operation: Operation,
    #[serde(default)]
    pub parameter_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
}

impl PropertyCondition {
    pub fn new(
        property: PropertyPath,
        operation: Operation,
        parameter_name: impl Into<String>,
        value: Option<ConditionValue>,
    ) -> Self {
        Self {
            property,
            operation,
            parameter_name: parameter_name.into(),
            value,
        }
    }

    /// A condition is active when it can restrict results: unary operations always
    /// are, others only once a value has been entered.
    pub fn is_active(&self) -> bool {
        self.operation.is_unary() || self.value.is_some()
    }

    pub fn matches(&self, record: &Record) -> Result<bool, MatchError> {
        matching::matches_field(
            record.get(&self.property),
            self.operation,
            self.value.as_ref(),
        )
        .map_err(|e| e.at_property(&self.property))
    }
}

impl fmt::Display for PropertyCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.value, self.operation.is_unary()) {
            (_, true) => write!(f, "{} {}", self.property, self.operation.symbol()),
            (Some(value), false) => {
                write!(f, "{} {} {}", self.property, self.operation.symbol(), value)
            }
            (None, false) => write!(
                f,
                "{} {} :{}",
                self.property,
                self.operation.symbol(),
                self.parameter_name
            ),
        }
    }
}

/// Combines conditions with a [`Combinator`].
///
/// An empty logical condition matches every record.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalCondition {
    #[serde(default)]
    pub combinator: Combinator,
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl LogicalCondition {
    pub fn new(combinator: Combinator) -> Self {
        Self {
            combinator,
            conditions: Vec::new(),
        }
    }

    pub fn and() -> Self {
        Self::new(Combinator::And)
    }

    pub fn or() -> Self {
        Self::new(Combinator::Or)
    }

    /// Add a condition to this group
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn add(&mut self, condition: Condition) {
        self.conditions.push(condition);
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Returns a copy without inactive property conditions and without groups they left empty.
    pub fn actualized(&self) -> LogicalCondition {
        LogicalCondition {
            combinator: self.combinator,
            conditions: self
                .conditions
                .iter()
                .filter_map(Condition::actualized)
                .collect(),
        }
    }

    pub fn matches(&self, record: &Record) -> Result<bool, MatchError> {
        if self.conditions.is_empty() {
            return Ok(true);
        }

        match self.combinator {
            Combinator::And => {
                for condition in &self.conditions {
                    if !condition.matches(record)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Combinator::Or => {
                for condition in &self.conditions {
                    if condition.matches(record)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}

impl fmt::Display for LogicalCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.conditions.is_empty() {
            return write!(f, "(all)");
        }
        let parts: Vec<String> = self.conditions.iter().map(|c| c.to_string()).collect();
        write!(f, "({})", parts.join(&format!(" {} ", self.combinator)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(age: i64, city: &str) -> Record {
        Record::new("c")
            .with_field("age", age)
            .with_field("city", city)
    }

    fn age_over(age: Option<i64>) -> Condition {
        Condition::Property(PropertyCondition::new(
            "age".into(),
            Operation::Greater,
            "age_param",
            age.map(ConditionValue::Integer),
        ))
    }

    fn city_is(city: &str) -> Condition {
        Condition::Property(PropertyCondition::new(
            "city".into(),
            Operation::Equal,
            "city_param",
            Some(ConditionValue::from(city)),
        ))
    }

    #[test]
    fn test_and_requires_all() {
        let condition = LogicalCondition::and()
            .with_condition(age_over(Some(30)))
            .with_condition(city_is("Lyon"));

        assert!(condition.matches(&customer(40, "lyon")).unwrap());
        assert!(!condition.matches(&customer(40, "Paris")).unwrap());
    }

    #[test]
    fn test_or_requires_any() {
        let condition = LogicalCondition::or()
            .with_condition(age_over(Some(30)))
            .with_condition(city_is("Lyon"));

        assert!(condition.matches(&customer(20, "Lyon")).unwrap());
        assert!(!condition.matches(&customer(20, "Paris")).unwrap());
    }

    #[test]
    fn test_match_error_names_the_property() {
        let error = city_is("Lyon")
            .matches(&Record::new("c").with_field("city", 7i64))
            .unwrap_err();

        assert_eq!(error.property(), Some(&PropertyPath::from("city")));
        assert!(matches!(error.root_cause(), MatchError::TypeMismatch { .. }));
    }

    #[test]
    fn test_empty_matches_everything() {
        assert!(LogicalCondition::or().matches(&customer(1, "x")).unwrap());
    }

    #[test]
    fn test_actualized_drops_inactive_conditions() {
        let condition = LogicalCondition::and()
            .with_condition(age_over(None))
            .with_condition(Condition::Logical(
                LogicalCondition::or().with_condition(age_over(None)),
            ))
            .with_condition(city_is("Lyon"));

        let actualized = condition.actualized();
        assert_eq!(actualized.conditions, vec![city_is("Lyon")]);
    }

    #[test]
    fn test_actualized_keeps_unary_conditions() {
        let is_set = Condition::Property(PropertyCondition::new(
            "email".into(),
            Operation::IsSet,
            "email_param",
            None,
        ));
        let condition = LogicalCondition::and().with_condition(is_set.clone());
        assert_eq!(condition.actualized().conditions, vec![is_set]);
    }

    #[test]
    fn test_display() {
        let condition = LogicalCondition::and()
            .with_condition(age_over(Some(30)))
            .with_condition(age_over(None));
        assert_eq!(condition.to_string(), "(age > 30 AND age > :age_param)");
    }
}
