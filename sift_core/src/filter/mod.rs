//! The filter: a set of configurations, one of which is current
//!
//! A [`Filter`] always shows exactly one configuration. Until the user picks one it
//! shows the empty configuration, a run-time configuration that can't be removed.
//! Switching configurations detaches the old component tree from the layout, attaches
//! the new one and notifies configuration change listeners.

mod filter_errors;
mod layout;
mod loader;

pub use filter_errors::{FilterError, LoadError};
pub use layout::{FilterLayout, NoLayout};
pub use loader::{DataLoader, InMemoryDataLoader};

use std::collections::HashSet;
use std::rc::Rc;

use crate::component::{ComponentError, ComponentId, FilterComponent, LogicalFilterComponent, PropertyFilter};
use crate::condition::{Combinator, ConditionValue, LogicalCondition};
use crate::configuration::{Configuration, EMPTY_CONFIGURATION_ID};
use crate::event::{EventEmitter, Subscription};
use crate::operation::Operation;
use crate::record::PropertyPath;

/// Decides which properties may be offered for new conditions.
pub type PropertiesFilterPredicate = Rc<dyn Fn(&PropertyPath) -> bool>;

/// Event sent when the current configuration of a filter changes.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationChangeEvent {
    pub new_configuration: String,
    pub previous_configuration: String,
}

pub struct Filter<L: DataLoader = InMemoryDataLoader> {
    id: String,
    data_loader: L,
    configurations: Vec<Configuration>,
    /// `None` while the empty configuration is shown
    current: Option<String>,
    empty_configuration: Configuration,
    conditions: Vec<FilterComponent>,
    properties_filter_predicate: Option<PropertiesFilterPredicate>,
    auto_apply: bool,
    layout: Box<dyn FilterLayout>,
    configuration_change: EventEmitter<ConfigurationChangeEvent>,
}

impl<L: DataLoader> Filter<L> {
    pub fn new(id: impl Into<String>, data_loader: L) -> Self {
        Self {
            id: id.into(),
            data_loader,
            configurations: Vec::new(),
            current: None,
            empty_configuration: Configuration::run_time(
                EMPTY_CONFIGURATION_ID,
                None,
                LogicalFilterComponent::new(Combinator::And),
            ),
            conditions: Vec::new(),
            properties_filter_predicate: None,
            auto_apply: false,
            layout: Box::new(NoLayout),
            configuration_change: EventEmitter::new(),
        }
    }

    /// Installs a layout and attaches the current configuration to it.
    pub fn with_layout(mut self, layout: impl FilterLayout + 'static) -> Self {
        self.layout = Box::new(layout);
        let current = resolve_current(&self.current, &self.configurations, &self.empty_configuration);
        self.layout
            .attach(current.id(), current.root_logical_filter_component());
        self
    }

    pub fn with_auto_apply(mut self, auto_apply: bool) -> Self {
        self.auto_apply = auto_apply;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    // ---- configurations ----

    /// Registers a design-time configuration with an empty AND root. It doesn't become current.
    pub fn add_configuration(
        &mut self,
        id: impl Into<String>,
        name: Option<String>,
    ) -> Result<&mut Configuration, FilterError> {
        self.add_configuration_with_operation(id, name, Combinator::And)
    }

    pub fn add_configuration_with_operation(
        &mut self,
        id: impl Into<String>,
        name: Option<String>,
        operation: Combinator,
    ) -> Result<&mut Configuration, FilterError> {
        let configuration =
            Configuration::design_time(id, name, LogicalFilterComponent::new(operation));
        self.add_existing_configuration(configuration)
    }

    /// Registers a caller-built configuration. It doesn't become current.
    pub fn add_existing_configuration(
        &mut self,
        configuration: Configuration,
    ) -> Result<&mut Configuration, FilterError> {
        let id = configuration.id().to_string();
        if id == EMPTY_CONFIGURATION_ID || self.position(&id).is_some() {
            return Err(FilterError::DuplicateConfiguration(id));
        }

        log::debug!("Filter '{}': added configuration '{}'", self.id, id);
        self.configurations.push(configuration);
        let index = self.configurations.len() - 1;
        Ok(&mut self.configurations[index])
    }

    /// Unregisters a configuration and hands it back.
    ///
    /// Removing the current configuration switches the filter to the empty configuration.
    pub fn remove_configuration(&mut self, id: &str) -> Result<Configuration, FilterError> {
        if id == EMPTY_CONFIGURATION_ID {
            return Err(FilterError::EmptyConfiguration);
        }
        let index = self
            .position(id)
            .ok_or_else(|| FilterError::UnknownConfiguration(id.to_string()))?;

        if self.current.as_deref() == Some(id) {
            log::debug!(
                "Filter '{}': current configuration '{}' removed, showing the empty configuration",
                self.id,
                id
            );
            self.switch_to(None);
        }

        log::debug!("Filter '{}': removed configuration '{}'", self.id, id);
        Ok(self.configurations.remove(index))
    }

    /// Makes a registered configuration (or the empty configuration) current.
    ///
    /// Fires one [`ConfigurationChangeEvent`] even when the configuration was already current.
    pub fn set_current_configuration(&mut self, id: &str) -> Result<(), FilterError> {
        if id == EMPTY_CONFIGURATION_ID {
            self.switch_to(None);
            return Ok(());
        }
        if self.position(id).is_none() {
            return Err(FilterError::UnknownConfiguration(id.to_string()));
        }
        self.switch_to(Some(id.to_string()));
        Ok(())
    }

    fn switch_to(&mut self, next: Option<String>) {
        let previous = resolve_current(&self.current, &self.configurations, &self.empty_configuration);
        let previous_configuration = previous.id().to_string();
        self.layout
            .detach(previous.id(), previous.root_logical_filter_component());

        self.current = next;

        let current = resolve_current(&self.current, &self.configurations, &self.empty_configuration);
        let new_configuration = current.id().to_string();
        self.layout
            .attach(current.id(), current.root_logical_filter_component());

        log::debug!(
            "Filter '{}': current configuration '{}' -> '{}'",
            self.id,
            previous_configuration,
            new_configuration
        );
        self.configuration_change.fire(&ConfigurationChangeEvent {
            new_configuration,
            previous_configuration,
        });
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.configurations.iter().position(|c| c.id() == id)
    }

    pub fn current_configuration(&self) -> &Configuration {
        resolve_current(&self.current, &self.configurations, &self.empty_configuration)
    }

    pub fn current_configuration_mut(&mut self) -> &mut Configuration {
        match self.current.as_deref().and_then(|id| self.position(id)) {
            Some(index) => &mut self.configurations[index],
            None => &mut self.empty_configuration,
        }
    }

    pub fn is_empty_configuration_current(&self) -> bool {
        self.current.is_none()
    }

    /// Looks up a registered configuration, or the empty configuration by its id.
    pub fn configuration(&self, id: &str) -> Option<&Configuration> {
        if id == EMPTY_CONFIGURATION_ID {
            return Some(&self.empty_configuration);
        }
        self.configurations.iter().find(|c| c.id() == id)
    }

    pub fn configuration_mut(&mut self, id: &str) -> Option<&mut Configuration> {
        if id == EMPTY_CONFIGURATION_ID {
            return Some(&mut self.empty_configuration);
        }
        self.configurations.iter_mut().find(|c| c.id() == id)
    }

    pub fn empty_configuration(&self) -> &Configuration {
        &self.empty_configuration
    }

    /// Registered configurations in insertion order. The empty configuration isn't included.
    pub fn configurations(&self) -> &[Configuration] {
        &self.configurations
    }

    /// Registered configurations in display order.
    pub fn configurations_by_name(&self) -> Vec<&Configuration> {
        let mut configurations: Vec<&Configuration> = self.configurations.iter().collect();
        configurations.sort_by(|a, b| a.compare_by_name(b));
        configurations
    }

    pub fn add_configuration_change_listener(
        &mut self,
        listener: impl FnMut(&ConfigurationChangeEvent) + 'static,
    ) -> Subscription {
        self.configuration_change.subscribe(listener)
    }

    // ---- loose conditions ----

    /// Adds a condition the user can pick from outside any configuration.
    pub fn add_condition(&mut self, condition: impl Into<FilterComponent>) -> ComponentId {
        let condition = condition.into();
        let id = condition.id();
        self.conditions.push(condition);
        id
    }

    pub fn conditions(&self) -> &[FilterComponent] {
        &self.conditions
    }

    pub fn remove_condition(&mut self, id: ComponentId) -> Option<FilterComponent> {
        let index = self.conditions.iter().position(|c| c.id() == id)?;
        Some(self.conditions.remove(index))
    }

    /// Copies a loose condition into the current configuration and returns the copy's id.
    ///
    /// The current configuration must be a run-time one. The copy and the configuration
    /// are both flagged as modified. Copied property filters whose parameter name is
    /// already used in the configuration get a name derived from their own id.
    pub fn use_condition(&mut self, id: ComponentId) -> Result<ComponentId, FilterError> {
        let mut copy = self
            .conditions
            .iter()
            .find(|c| c.id() == id)
            .map(FilterComponent::duplicate)
            .ok_or(FilterError::UnknownCondition(id))?;

        let filter_id = self.id.clone();
        let configuration = self.current_configuration_mut();
        let configuration_id = configuration.id().to_string();
        let run_time = configuration
            .as_run_time_mut()
            .ok_or(FilterError::DesignTimeConfiguration(configuration_id.clone()))?;

        let mut taken: HashSet<String> = run_time
            .root_logical_filter_component()
            .property_filters()
            .iter()
            .map(|filter| filter.parameter_name().to_string())
            .collect();
        for filter in copy.property_filters_mut() {
            if taken.contains(filter.parameter_name()) {
                filter.use_derived_parameter_name();
            }
            taken.insert(filter.parameter_name().to_string());
        }

        let copy_id = run_time.root_logical_filter_component_mut().add(copy);
        run_time.set_component_modified(copy_id, true)?;
        run_time.set_modified(true);

        log::debug!(
            "Filter '{}': condition {} added to configuration '{}' as {}",
            filter_id,
            id,
            configuration_id,
            copy_id
        );
        Ok(copy_id)
    }

    // ---- available properties ----

    pub fn set_properties_filter_predicate(
        &mut self,
        predicate: Option<PropertiesFilterPredicate>,
    ) {
        self.properties_filter_predicate = predicate;
    }

    /// Narrows the available properties: the new predicate is combined with any existing one using AND.
    pub fn add_properties_filter_predicate(
        &mut self,
        predicate: impl Fn(&PropertyPath) -> bool + 'static,
    ) {
        let combined: PropertiesFilterPredicate = match self.properties_filter_predicate.take() {
            Some(existing) => Rc::new(move |path| existing(path) && predicate(path)),
            None => Rc::new(predicate),
        };
        self.properties_filter_predicate = Some(combined);
    }

    pub fn properties_filter_predicate(&self) -> Option<&PropertiesFilterPredicate> {
        self.properties_filter_predicate.as_ref()
    }

    pub fn is_property_available(&self, path: &PropertyPath) -> bool {
        self.properties_filter_predicate
            .as_ref()
            .is_none_or(|predicate| predicate(path))
    }

    pub fn available_properties(&self, paths: &[PropertyPath]) -> Vec<PropertyPath> {
        paths
            .iter()
            .filter(|path| self.is_property_available(path))
            .cloned()
            .collect()
    }

    // ---- editing ----

    /// Finds a property filter of the current configuration by its parameter name.
    pub fn find_by_parameter(&self, parameter_name: &str) -> Option<ComponentId> {
        self.current_configuration()
            .root_logical_filter_component()
            .property_filters()
            .into_iter()
            .find(|filter| filter.parameter_name() == parameter_name)
            .map(PropertyFilter::id)
    }

    fn property_filter_mut(&mut self, component: ComponentId) -> Result<&mut PropertyFilter, FilterError> {
        let found = self
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .find_mut(component)
            .ok_or(FilterError::UnknownComponent(component))?;
        match found {
            FilterComponent::Property(filter) => Ok(filter),
            _ => Err(FilterError::Component(ComponentError::NotAPropertyFilter(component))),
        }
    }

    /// Enters a value into a property filter of the current configuration.
    pub fn set_value(
        &mut self,
        component: ComponentId,
        value: Option<ConditionValue>,
    ) -> Result<(), FilterError> {
        self.property_filter_mut(component)?.set_value(value)?;
        if self.auto_apply {
            self.apply()?;
        }
        Ok(())
    }

    /// Changes the operation of a property filter of the current configuration.
    ///
    /// A changed operation flags the component and the configuration as modified.
    pub fn set_operation(
        &mut self,
        component: ComponentId,
        operation: Operation,
    ) -> Result<(), FilterError> {
        let filter = self.property_filter_mut(component)?;
        if filter.operation() == operation {
            return Ok(());
        }
        filter.set_operation(operation);

        let configuration = self.current_configuration_mut();
        configuration.set_component_modified(component, true)?;
        configuration.set_modified(true);

        if self.auto_apply {
            self.apply()?;
        }
        Ok(())
    }

    // ---- applying ----

    /// Pushes the current configuration's active conditions to the data loader and loads.
    pub fn apply(&mut self) -> Result<(), FilterError> {
        let condition: LogicalCondition = self.current_configuration().query_condition().actualized();
        log::debug!("Filter '{}': applying {}", self.id, condition);
        self.data_loader.set_condition(condition);
        self.data_loader.load()?;
        Ok(())
    }

    pub fn is_auto_apply(&self) -> bool {
        self.auto_apply
    }

    pub fn set_auto_apply(&mut self, auto_apply: bool) {
        self.auto_apply = auto_apply;
    }

    pub fn data_loader(&self) -> &L {
        &self.data_loader
    }

    pub fn data_loader_mut(&mut self) -> &mut L {
        &mut self.data_loader
    }

    /// Swaps the data loader, returning the previous one.
    pub fn set_data_loader(&mut self, data_loader: L) -> L {
        std::mem::replace(&mut self.data_loader, data_loader)
    }
}

/// Field-level lookup of the current configuration, so callers can borrow the layout alongside it.
fn resolve_current<'a>(
    current: &Option<String>,
    configurations: &'a [Configuration],
    empty_configuration: &'a Configuration,
) -> &'a Configuration {
    current
        .as_deref()
        .and_then(|id| configurations.iter().find(|c| c.id() == id))
        .unwrap_or(empty_configuration)
}

impl<L: DataLoader> std::fmt::Debug for Filter<L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("id", &self.id)
            .field("configurations", &self.configurations.len())
            .field("current", &self.current_configuration().id())
            .field("conditions", &self.conditions.len())
            .field("auto_apply", &self.auto_apply)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use assert_matches::assert_matches;

    fn filter() -> Filter {
        Filter::new(
            "customers",
            InMemoryDataLoader::new(vec![
                Record::new("1").with_field("age", 17_i64),
                Record::new("2").with_field("age", 42_i64),
            ]),
        )
    }

    #[test]
    fn test_new_filter_shows_empty_configuration() {
        let filter = filter();
        assert!(filter.is_empty_configuration_current());
        assert_eq!(filter.current_configuration().id(), EMPTY_CONFIGURATION_ID);
        assert!(filter.current_configuration().is_run_time());
        assert_eq!(
            filter
                .current_configuration()
                .root_logical_filter_component()
                .operation(),
            Combinator::And
        );
    }

    #[test]
    fn test_empty_configuration_id_is_reserved() {
        let mut filter = filter();
        let result = filter.add_configuration(EMPTY_CONFIGURATION_ID, None);
        assert_matches!(result, Err(FilterError::DuplicateConfiguration(_)));
        assert_matches!(
            filter.remove_configuration(EMPTY_CONFIGURATION_ID),
            Err(FilterError::EmptyConfiguration)
        );
    }

    #[test]
    fn test_set_value_on_unknown_component() {
        let mut filter = filter();
        let stray = PropertyFilter::new("age", Operation::Equal);
        assert_matches!(
            filter.set_value(stray.id(), None),
            Err(FilterError::UnknownComponent(_))
        );
    }

    #[test]
    fn test_set_value_on_logical_component() {
        let mut filter = filter();
        let group = LogicalFilterComponent::new(Combinator::Or);
        let group_id = filter
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .add(group);

        assert_matches!(
            filter.set_value(group_id, None),
            Err(FilterError::Component(_))
        );
    }

    #[test]
    fn test_find_by_parameter() {
        let mut filter = filter();
        let age = PropertyFilter::new("age", Operation::Greater).with_parameter_name("min_age");
        let age_id = filter
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .add(age);

        assert_eq!(filter.find_by_parameter("min_age"), Some(age_id));
        assert_eq!(filter.find_by_parameter("max_age"), None);
    }

    #[test]
    fn test_apply_without_conditions_loads_everything() {
        let mut filter = filter();
        filter.apply().unwrap();
        assert_eq!(filter.data_loader().loaded().len(), 2);
        assert_eq!(filter.data_loader().condition(), Some(&LogicalCondition::and()));
    }
}
