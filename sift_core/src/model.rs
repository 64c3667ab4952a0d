//! Persisted form of filter configurations
//!
//! Models are plain serde data. Turning a model back into components always creates
//! fresh component ids; ids never leave the process.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::component::{CustomFilter, FilterComponent, LogicalFilterComponent, PropertyFilter};
use crate::condition::{Combinator, Condition, ConditionValue};
use crate::configuration::{Configuration, RunTimeConfiguration};
use crate::operation::Operation;
use crate::record::PropertyPath;

fn default_true() -> bool {
    true
}

/// Persisted form of a [`PropertyFilter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyModel {
    pub property: PropertyPath,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter_name: Option<String>,
    #[serde(default = "default_true")]
    pub operation_editable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ConditionValue>,
}

/// Persisted form of a [`LogicalFilterComponent`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogicalModel {
    #[serde(default)]
    pub operation: Combinator,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default)]
    pub children: Vec<ComponentModel>,
}

/// Persisted form of any [`FilterComponent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentModel {
    Property(PropertyModel),
    Logical(LogicalModel),
    Custom { caption: String, condition: Condition },
}

impl From<&PropertyFilter> for PropertyModel {
    fn from(filter: &PropertyFilter) -> Self {
        Self {
            property: filter.property().clone(),
            operation: filter.operation(),
            parameter_name: Some(filter.parameter_name().to_string()),
            operation_editable: filter.is_operation_editable(),
            caption: filter.explicit_caption().map(str::to_string),
            value: filter.value().cloned(),
        }
    }
}

impl From<&LogicalFilterComponent> for LogicalModel {
    fn from(group: &LogicalFilterComponent) -> Self {
        Self {
            operation: group.operation(),
            caption: group.caption().map(str::to_string),
            children: group.children().iter().map(ComponentModel::from).collect(),
        }
    }
}

impl From<&FilterComponent> for ComponentModel {
    fn from(component: &FilterComponent) -> Self {
        match component {
            FilterComponent::Property(filter) => ComponentModel::Property(filter.into()),
            FilterComponent::Logical(group) => ComponentModel::Logical(group.into()),
            FilterComponent::Custom(custom) => ComponentModel::Custom {
                caption: custom.caption().to_string(),
                condition: custom.condition().clone(),
            },
        }
    }
}

impl PropertyModel {
    pub fn to_filter(&self) -> PropertyFilter {
        let mut filter = PropertyFilter::new(self.property.clone(), self.operation)
            .with_operation_editable(self.operation_editable);
        if let Some(parameter_name) = &self.parameter_name {
            filter = filter.with_parameter_name(parameter_name.clone());
        }
        if let Some(caption) = &self.caption {
            filter = filter.with_caption(caption.clone());
        }
        if let Some(value) = &self.value {
            filter = filter.with_value(value.clone());
        }
        filter
    }
}

impl LogicalModel {
    pub fn to_component(&self) -> LogicalFilterComponent {
        let mut group = LogicalFilterComponent::new(self.operation);
        if let Some(caption) = &self.caption {
            group = group.with_caption(caption.clone());
        }
        for child in &self.children {
            group.add(child.to_component());
        }
        group
    }
}

impl ComponentModel {
    /// Builds the component tree under fresh ids.
    pub fn to_component(&self) -> FilterComponent {
        match self {
            ComponentModel::Property(model) => FilterComponent::Property(model.to_filter()),
            ComponentModel::Logical(model) => FilterComponent::Logical(model.to_component()),
            ComponentModel::Custom { caption, condition } => {
                FilterComponent::Custom(CustomFilter::new(caption.clone(), condition.clone()))
            }
        }
    }
}

/// A configuration as stored by a persistence backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfigurationModel {
    pub id: String,
    pub filter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub root: LogicalModel,
    #[serde(default)]
    pub default_values: BTreeMap<String, ConditionValue>,
    /// Shown when the filter opens
    #[serde(default)]
    pub default_for_filter: bool,
}

impl FilterConfigurationModel {
    pub fn from_configuration(filter_id: &str, configuration: &Configuration) -> Self {
        Self {
            id: configuration.id().to_string(),
            filter_id: filter_id.to_string(),
            name: configuration.name().map(str::to_string),
            root: configuration.root_logical_filter_component().into(),
            default_values: configuration.default_values().clone(),
            default_for_filter: false,
        }
    }

    /// Rebuilds the stored configuration. Stored configurations are always run-time ones.
    pub fn to_run_time_configuration(&self) -> RunTimeConfiguration {
        let mut configuration =
            RunTimeConfiguration::new(self.id.clone(), self.name.clone(), self.root.to_component());
        for (parameter_name, value) in &self.default_values {
            configuration.set_default_value(parameter_name, Some(value.clone()));
        }
        configuration
    }
}
