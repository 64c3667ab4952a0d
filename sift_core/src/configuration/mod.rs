//! Saved filter configurations
//!
//! A configuration is a named set of filter components. It doesn't keep a list of
//! every component, only the root [`LogicalFilterComponent`] from which the rest can
//! be reached.
//!
//! Configurations come in two kinds:
//! - [`DesignTimeConfiguration`]s are declared up front; their name and tree shape are fixed
//! - [`RunTimeConfiguration`]s are created by users and can be renamed or rebuilt

mod configuration_errors;

pub use configuration_errors::ConfigurationError;

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::ops::{Deref, DerefMut};

use crate::component::{ComponentId, LogicalFilterComponent};
use crate::condition::{ConditionValue, LogicalCondition};

/// Id of the configuration a filter shows when the user hasn't picked one.
pub const EMPTY_CONFIGURATION_ID: &str = "empty_configuration";

/// State shared by both configuration kinds.
#[derive(Debug)]
pub struct ConfigurationState {
    id: String,
    root: LogicalFilterComponent,
    modified: bool,
    component_modified: HashMap<ComponentId, bool>,
    default_values: BTreeMap<String, ConditionValue>,
}

impl ConfigurationState {
    fn new(id: String, root: LogicalFilterComponent) -> Self {
        Self {
            id,
            root,
            modified: false,
            component_modified: HashMap::new(),
            default_values: BTreeMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn root_logical_filter_component(&self) -> &LogicalFilterComponent {
        &self.root
    }

    /// Mutable access for editing values and operations. Adding or removing components
    /// is allowed too, but only run-time configurations can swap the root itself.
    pub fn root_logical_filter_component_mut(&mut self) -> &mut LogicalFilterComponent {
        &mut self.root
    }

    pub fn query_condition(&self) -> LogicalCondition {
        self.root.query_condition()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    /// Whether a component of this configuration is flagged as modified.
    ///
    /// Unknown components are never modified.
    pub fn is_component_modified(&self, component: ComponentId) -> bool {
        self.component_modified
            .get(&component)
            .copied()
            .unwrap_or(false)
    }

    /// Flags a component of this configuration. The component must be in the tree.
    pub fn set_component_modified(
        &mut self,
        component: ComponentId,
        modified: bool,
    ) -> Result<(), ConfigurationError> {
        if !self.root.contains(component) {
            return Err(ConfigurationError::UnknownComponent {
                configuration: self.id.clone(),
                component,
            });
        }

        if modified {
            self.component_modified.insert(component, true);
        } else {
            self.component_modified.remove(&component);
        }
        Ok(())
    }

    /// Ids of components currently flagged as modified, sorted.
    pub fn modified_components(&self) -> Vec<ComponentId> {
        let mut ids: Vec<ComponentId> = self
            .component_modified
            .iter()
            .filter(|(_, modified)| **modified)
            .map(|(id, _)| *id)
            .collect();
        ids.sort();
        ids
    }

    /// Clears the configuration flag and every component flag.
    pub fn clear_modified(&mut self) {
        self.modified = false;
        self.component_modified.clear();
    }

    /// Sets the default value of a parameter. `None` removes it.
    pub fn set_default_value(&mut self, parameter_name: &str, default_value: Option<ConditionValue>) {
        match default_value {
            Some(value) => {
                self.default_values.insert(parameter_name.to_string(), value);
            }
            None => {
                self.default_values.remove(parameter_name);
            }
        }
    }

    pub fn remove_default_value(&mut self, parameter_name: &str) {
        self.default_values.remove(parameter_name);
    }

    pub fn default_value(&self, parameter_name: &str) -> Option<&ConditionValue> {
        self.default_values.get(parameter_name)
    }

    pub fn remove_all_default_values(&mut self) {
        self.default_values.clear();
    }

    pub fn default_values(&self) -> &BTreeMap<String, ConditionValue> {
        &self.default_values
    }

    /// Forgets flags of components that are no longer in the tree.
    fn prune_component_flags(&mut self) {
        let root = &self.root;
        self.component_modified.retain(|id, _| root.contains(*id));
    }
}

/// A configuration declared up front. Its name can't change.
#[derive(Debug)]
pub struct DesignTimeConfiguration {
    state: ConfigurationState,
    name: Option<String>,
}

impl DesignTimeConfiguration {
    pub fn new(id: impl Into<String>, name: Option<String>, root: LogicalFilterComponent) -> Self {
        Self {
            state: ConfigurationState::new(id.into(), root),
            name,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl Deref for DesignTimeConfiguration {
    type Target = ConfigurationState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for DesignTimeConfiguration {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

/// A configuration created by a user at run time.
#[derive(Debug)]
pub struct RunTimeConfiguration {
    state: ConfigurationState,
    name: Option<String>,
}

impl RunTimeConfiguration {
    pub fn new(id: impl Into<String>, name: Option<String>, root: LogicalFilterComponent) -> Self {
        Self {
            state: ConfigurationState::new(id.into(), root),
            name,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) {
        self.name = name;
    }

    /// Replaces the whole component tree, returning the old root.
    pub fn set_root_logical_filter_component(
        &mut self,
        root: LogicalFilterComponent,
    ) -> LogicalFilterComponent {
        let previous = std::mem::replace(&mut self.state.root, root);
        self.state.prune_component_flags();
        previous
    }
}

impl Deref for RunTimeConfiguration {
    type Target = ConfigurationState;

    fn deref(&self) -> &Self::Target {
        &self.state
    }
}

impl DerefMut for RunTimeConfiguration {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.state
    }
}

/// A configuration of either kind.
#[derive(Debug)]
pub enum Configuration {
    DesignTime(DesignTimeConfiguration),
    RunTime(RunTimeConfiguration),
}

impl Configuration {
    pub fn design_time(id: impl Into<String>, name: Option<String>, root: LogicalFilterComponent) -> Self {
        Configuration::DesignTime(DesignTimeConfiguration::new(id, name, root))
    }

    pub fn run_time(id: impl Into<String>, name: Option<String>, root: LogicalFilterComponent) -> Self {
        Configuration::RunTime(RunTimeConfiguration::new(id, name, root))
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Configuration::DesignTime(configuration) => configuration.name(),
            Configuration::RunTime(configuration) => configuration.name(),
        }
    }

    /// The name, or the id for unnamed configurations.
    pub fn display_name(&self) -> &str {
        self.name().unwrap_or_else(|| self.id())
    }

    pub fn is_run_time(&self) -> bool {
        matches!(self, Configuration::RunTime(_))
    }

    pub fn as_run_time(&self) -> Option<&RunTimeConfiguration> {
        match self {
            Configuration::RunTime(configuration) => Some(configuration),
            Configuration::DesignTime(_) => None,
        }
    }

    pub fn as_run_time_mut(&mut self) -> Option<&mut RunTimeConfiguration> {
        match self {
            Configuration::RunTime(configuration) => Some(configuration),
            Configuration::DesignTime(_) => None,
        }
    }

    /// Orders configurations for display: by name, unnamed ones last, ties broken by id.
    pub fn compare_by_name(&self, other: &Configuration) -> Ordering {
        match (self.name(), other.name()) {
            (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| self.id().cmp(other.id()))
    }
}

impl Deref for Configuration {
    type Target = ConfigurationState;

    fn deref(&self) -> &Self::Target {
        match self {
            Configuration::DesignTime(configuration) => configuration,
            Configuration::RunTime(configuration) => configuration,
        }
    }
}

impl DerefMut for Configuration {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Configuration::DesignTime(configuration) => configuration,
            Configuration::RunTime(configuration) => configuration,
        }
    }
}

impl From<DesignTimeConfiguration> for Configuration {
    fn from(configuration: DesignTimeConfiguration) -> Self {
        Configuration::DesignTime(configuration)
    }
}

impl From<RunTimeConfiguration> for Configuration {
    fn from(configuration: RunTimeConfiguration) -> Self {
        Configuration::RunTime(configuration)
    }
}
