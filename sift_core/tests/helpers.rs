//! Shared test helpers for sift_core tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use sift_core::action::ActionError;
use sift_core::component::LogicalFilterComponent;
use sift_core::{
    Configuration, ConfigurationPersistence, ConditionValue, Filter, FilterConfigurationModel,
    FilterLayout, InMemoryDataLoader, NamePrompt, PersistenceError, Record,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn customers() -> Vec<Record> {
    vec![
        Record::new("ada").with_field("name", "Ada").with_field("age", 36_i64).with_field("city", "London"),
        Record::new("blaise").with_field("name", "Blaise").with_field("age", 17_i64).with_field("city", "Paris"),
        Record::new("grace").with_field("name", "Grace").with_field("age", 85_i64),
    ]
}

pub fn customer_filter() -> Filter {
    init_logging();
    Filter::new("customers", InMemoryDataLoader::new(customers()))
}

/// What a recording layout saw, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCall {
    Attach(String),
    Detach(String),
}

#[derive(Clone, Default)]
pub struct RecordingLayout {
    pub calls: Rc<RefCell<Vec<LayoutCall>>>,
}

impl FilterLayout for RecordingLayout {
    fn attach(&mut self, configuration_id: &str, _root: &LogicalFilterComponent) {
        self.calls
            .borrow_mut()
            .push(LayoutCall::Attach(configuration_id.to_string()));
    }

    fn detach(&mut self, configuration_id: &str, _root: &LogicalFilterComponent) {
        self.calls
            .borrow_mut()
            .push(LayoutCall::Detach(configuration_id.to_string()));
    }
}

/// A save call as seen by [`MockPersistence`].
#[derive(Debug, Clone)]
pub struct SaveCall {
    pub configuration_id: String,
    pub updated_existing: bool,
    /// Parameter values of the configuration at the moment it was saved
    pub values: HashMap<String, Option<ConditionValue>>,
}

/// Persistence double keeping models in memory and recording every call.
#[derive(Default)]
pub struct MockPersistence {
    pub models: HashMap<(String, String), FilterConfigurationModel>,
    pub loads: RefCell<Vec<String>>,
    pub saves: Vec<SaveCall>,
}

impl MockPersistence {
    pub fn with_model(mut self, filter_id: &str, configuration: &Configuration) -> Self {
        let model = FilterConfigurationModel::from_configuration(filter_id, configuration);
        self.models
            .insert((filter_id.to_string(), configuration.id().to_string()), model);
        self
    }
}

impl ConfigurationPersistence for MockPersistence {
    fn load_configuration_model(
        &self,
        filter_id: &str,
        configuration_id: &str,
    ) -> Result<Option<FilterConfigurationModel>, PersistenceError> {
        self.loads.borrow_mut().push(configuration_id.to_string());
        Ok(self
            .models
            .get(&(filter_id.to_string(), configuration_id.to_string()))
            .cloned())
    }

    fn save_configuration_model(
        &mut self,
        filter_id: &str,
        configuration: &Configuration,
        existing: Option<FilterConfigurationModel>,
    ) -> Result<FilterConfigurationModel, PersistenceError> {
        let values = configuration
            .root_logical_filter_component()
            .property_filters()
            .iter()
            .map(|f| (f.parameter_name().to_string(), f.value().cloned()))
            .collect();
        self.saves.push(SaveCall {
            configuration_id: configuration.id().to_string(),
            updated_existing: existing.is_some(),
            values,
        });

        let mut model = FilterConfigurationModel::from_configuration(filter_id, configuration);
        if let Some(existing) = existing {
            model.default_for_filter = existing.default_for_filter;
        }
        self.models
            .insert((filter_id.to_string(), model.id.clone()), model.clone());
        Ok(model)
    }
}

/// Persistence double that refuses every write.
pub struct FailingPersistence;

impl ConfigurationPersistence for FailingPersistence {
    fn load_configuration_model(
        &self,
        _filter_id: &str,
        _configuration_id: &str,
    ) -> Result<Option<FilterConfigurationModel>, PersistenceError> {
        Ok(None)
    }

    fn save_configuration_model(
        &mut self,
        _filter_id: &str,
        _configuration: &Configuration,
        _existing: Option<FilterConfigurationModel>,
    ) -> Result<FilterConfigurationModel, PersistenceError> {
        Err(PersistenceError::Unavailable("disk full".to_string()))
    }
}

/// Name prompt answering from a script. An exhausted script cancels.
#[derive(Default)]
pub struct ScriptedPrompt {
    pub answers: Vec<Option<String>>,
    pub asked: usize,
}

impl ScriptedPrompt {
    pub fn answering(answer: &str) -> Self {
        Self {
            answers: vec![Some(answer.to_string())],
            asked: 0,
        }
    }

    pub fn cancelling() -> Self {
        Self {
            answers: vec![None],
            asked: 0,
        }
    }
}

impl NamePrompt for ScriptedPrompt {
    fn prompt_name(&mut self, _caption: &str) -> Result<Option<String>, ActionError> {
        let answer = self.answers.get(self.asked).cloned().flatten();
        self.asked += 1;
        Ok(answer)
    }
}
