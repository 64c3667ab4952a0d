//! Persistence capability used by the save actions, and the value map helpers around it
//!
//! Saving stores a configuration with its default values in place of whatever the user
//! has entered. The entered values are captured before the save and put back after it,
//! so the live configuration looks the same afterwards.

use std::collections::HashMap;
use std::fmt;

use crate::component::ComponentId;
use crate::condition::ConditionValue;
use crate::configuration::Configuration;
use crate::model::FilterConfigurationModel;

/// Errors reported by a persistence backend.
#[derive(Debug, Clone, PartialEq)]
pub enum PersistenceError {
    /// The backend couldn't be read or written
    Unavailable(String),
    /// Stored data couldn't be decoded or encoded
    Corrupt(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Unavailable(message) => {
                write!(f, "Configuration storage unavailable: {}", message)
            }
            PersistenceError::Corrupt(message) => {
                write!(f, "Stored configuration is invalid: {}", message)
            }
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Loads and stores [`FilterConfigurationModel`]s.
pub trait ConfigurationPersistence {
    /// Finds the stored model of a configuration, if there is one.
    fn load_configuration_model(
        &self,
        filter_id: &str,
        configuration_id: &str,
    ) -> Result<Option<FilterConfigurationModel>, PersistenceError>;

    /// Stores a configuration. With `existing` set, that model is updated in place;
    /// otherwise a new model is created. Returns what was stored.
    fn save_configuration_model(
        &mut self,
        filter_id: &str,
        configuration: &Configuration,
        existing: Option<FilterConfigurationModel>,
    ) -> Result<FilterConfigurationModel, PersistenceError>;
}

/// Entered values keyed by the property filter they were taken from.
///
/// Parameter names aren't guaranteed unique within a tree, component ids are.
pub type ValuesMap = HashMap<ComponentId, Option<ConditionValue>>;

/// Captures the entered value of every property filter and replaces it with the
/// configuration's default value for that parameter.
pub fn init_configuration_values_map(configuration: &mut Configuration) -> ValuesMap {
    let defaults = configuration.default_values().clone();
    let mut values = ValuesMap::new();

    for filter in configuration
        .root_logical_filter_component_mut()
        .property_filters_mut()
    {
        let parameter_name = filter.parameter_name().to_string();
        values.insert(filter.id(), filter.value().cloned());

        let default_value = defaults.get(&parameter_name).cloned();
        if let Err(e) = filter.set_value(default_value) {
            log::warn!(
                "Default value for '{}' doesn't fit its operation, saving without a value: {}",
                parameter_name,
                e
            );
            let _ = filter.set_value(None);
        }
    }
    values
}

/// Puts back values captured by [`init_configuration_values_map`].
pub fn reset_configuration_values_map(configuration: &mut Configuration, values: ValuesMap) {
    for filter in configuration
        .root_logical_filter_component_mut()
        .property_filters_mut()
    {
        if let Some(value) = values.get(&filter.id()) {
            if let Err(e) = filter.set_value(value.clone()) {
                log::warn!(
                    "Could not restore value of '{}': {}",
                    filter.parameter_name(),
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::{LogicalFilterComponent, PropertyFilter};
    use crate::operation::Operation;

    fn configuration() -> (Configuration, ComponentId, ComponentId) {
        let age = PropertyFilter::new("age", Operation::Greater)
            .with_parameter_name("age")
            .with_value(ConditionValue::Integer(40));
        let city = PropertyFilter::new("city", Operation::Equal)
            .with_parameter_name("city")
            .with_value(ConditionValue::from("Lyon"));
        let (age_id, city_id) = (age.id(), city.id());
        let root = LogicalFilterComponent::default().with_child(age).with_child(city);
        let mut configuration = Configuration::run_time("c", None, root);
        configuration.set_default_value("age", Some(ConditionValue::Integer(18)));
        (configuration, age_id, city_id)
    }

    fn values(configuration: &Configuration) -> Vec<Option<ConditionValue>> {
        configuration
            .root_logical_filter_component()
            .property_filters()
            .iter()
            .map(|f| f.value().cloned())
            .collect()
    }

    #[test]
    fn test_init_replaces_values_with_defaults() {
        let (mut configuration, age, city) = configuration();
        let captured = init_configuration_values_map(&mut configuration);

        assert_eq!(captured.get(&age), Some(&Some(ConditionValue::Integer(40))));
        assert_eq!(captured.get(&city), Some(&Some(ConditionValue::from("Lyon"))));
        assert_eq!(values(&configuration), vec![Some(ConditionValue::Integer(18)), None]);
    }

    #[test]
    fn test_reset_restores_captured_values() {
        let (mut configuration, _, _) = configuration();
        let before = values(&configuration);

        let captured = init_configuration_values_map(&mut configuration);
        reset_configuration_values_map(&mut configuration, captured);

        assert_eq!(values(&configuration), before);
    }

    #[test]
    fn test_shared_parameter_name_keeps_each_value() {
        let root = LogicalFilterComponent::default()
            .with_child(
                PropertyFilter::new("age", Operation::Greater)
                    .with_parameter_name("age")
                    .with_value(ConditionValue::Integer(10)),
            )
            .with_child(
                PropertyFilter::new("age", Operation::Less)
                    .with_parameter_name("age")
                    .with_value(ConditionValue::Integer(90)),
            );
        let mut configuration = Configuration::run_time("c", None, root);

        let captured = init_configuration_values_map(&mut configuration);
        assert_eq!(values(&configuration), vec![None, None]);
        reset_configuration_values_map(&mut configuration, captured);

        assert_eq!(
            values(&configuration),
            vec![Some(ConditionValue::Integer(10)), Some(ConditionValue::Integer(90))]
        );
    }
}
