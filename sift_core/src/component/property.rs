use convert_case::{Case, Casing};

use crate::condition::{ConditionValue, PropertyCondition};
use crate::event::{EventEmitter, Subscription};
use crate::operation::Operation;
use crate::record::PropertyPath;

use super::{ComponentError, ComponentId, next_component_id};

/// Event sent when the operation of a [`PropertyFilter`] changes.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationChangeEvent {
    pub source: ComponentId,
    pub new_operation: Operation,
    pub previous_operation: Operation,
}

/// A filter component comparing one property with a single value.
#[derive(Debug)]
pub struct PropertyFilter {
    id: ComponentId,
    property: PropertyPath,
    operation: Operation,
    operation_editable: bool,
    parameter_name: String,
    value: Option<ConditionValue>,
    caption: Option<String>,
    operation_change: EventEmitter<OperationChangeEvent>,
}

impl PropertyFilter {
    /// Creates a filter with no value and a parameter name derived from the property.
    pub fn new(property: impl Into<PropertyPath>, operation: Operation) -> Self {
        let id = next_component_id();
        let property = property.into();
        let parameter_name = derived_parameter_name(&property, id);

        Self {
            id,
            property,
            operation,
            operation_editable: true,
            parameter_name,
            value: None,
            caption: None,
            operation_change: EventEmitter::new(),
        }
    }

    /// Builder-style value setter. Values the operation can't take are dropped.
    pub fn with_value(mut self, value: ConditionValue) -> Self {
        if let Err(e) = self.set_value(Some(value)) {
            log::warn!("Ignoring value for property filter '{}': {}", self.property, e);
        }
        self
    }

    pub fn with_parameter_name(mut self, parameter_name: impl Into<String>) -> Self {
        self.parameter_name = parameter_name.into();
        self
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    pub fn with_operation_editable(mut self, operation_editable: bool) -> Self {
        self.operation_editable = operation_editable;
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn property(&self) -> &PropertyPath {
        &self.property
    }

    /// Rebinds the filter to another property. The entered value no longer applies and is cleared.
    pub fn set_property(&mut self, property: impl Into<PropertyPath>) {
        self.property = property.into();
        self.value = None;
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// Changes the operation and notifies operation change listeners.
    ///
    /// When the new operation takes a different kind of input, the current value is cleared.
    pub fn set_operation(&mut self, operation: Operation) {
        let previous = self.operation;
        if previous == operation {
            return;
        }

        self.operation = operation;
        if previous.operation_type() != operation.operation_type() {
            self.value = None;
        }

        log::debug!(
            "Property filter {} ('{}') operation changed: {} -> {}",
            self.id,
            self.property,
            previous,
            operation
        );
        self.operation_change.fire(&OperationChangeEvent {
            source: self.id,
            new_operation: operation,
            previous_operation: previous,
        });
    }

    pub fn is_operation_editable(&self) -> bool {
        self.operation_editable
    }

    pub fn set_operation_editable(&mut self, operation_editable: bool) {
        self.operation_editable = operation_editable;
    }

    pub fn parameter_name(&self) -> &str {
        &self.parameter_name
    }

    pub fn set_parameter_name(&mut self, parameter_name: impl Into<String>) {
        self.parameter_name = parameter_name.into();
    }

    /// Switches back to the name derived from the property leaf and this filter's id.
    pub fn use_derived_parameter_name(&mut self) {
        self.parameter_name = derived_parameter_name(&self.property, self.id);
    }

    pub fn value(&self) -> Option<&ConditionValue> {
        self.value.as_ref()
    }

    /// Sets the entered value, checking it against the operation's input kind.
    pub fn set_value(&mut self, value: Option<ConditionValue>) -> Result<(), ComponentError> {
        if let Some(value) = &value {
            if !self.operation.operation_type().accepts(value) {
                return Err(ComponentError::ValueNotAccepted {
                    operation: self.operation,
                    value_type: value.type_name().to_string(),
                });
            }
        }
        self.value = value;
        Ok(())
    }

    /// The caption shown next to the value editor.
    pub fn caption(&self) -> String {
        match &self.caption {
            Some(caption) => caption.clone(),
            None => self.property.leaf().to_case(Case::Title),
        }
    }

    pub fn explicit_caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn query_condition(&self) -> PropertyCondition {
        PropertyCondition::new(
            self.property.clone(),
            self.operation,
            self.parameter_name.clone(),
            self.value.clone(),
        )
    }

    pub fn add_operation_change_listener(
        &mut self,
        listener: impl FnMut(&OperationChangeEvent) + 'static,
    ) -> Subscription {
        self.operation_change.subscribe(listener)
    }

    /// Copies the filter under a fresh id. Listeners are not copied.
    pub fn duplicate(&self) -> PropertyFilter {
        PropertyFilter {
            id: next_component_id(),
            property: self.property.clone(),
            operation: self.operation,
            operation_editable: self.operation_editable,
            parameter_name: self.parameter_name.clone(),
            value: self.value.clone(),
            caption: self.caption.clone(),
            operation_change: EventEmitter::new(),
        }
    }
}

fn derived_parameter_name(property: &PropertyPath, id: ComponentId) -> String {
    format!("{}_{}", property.leaf().to_case(Case::Snake), id.value())
}
