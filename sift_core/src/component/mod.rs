//! Filter components: the nodes of a configuration's condition tree
//!
//! - [`PropertyFilter`] compares one property with a value
//! - [`LogicalFilterComponent`] groups children under AND/OR
//! - [`CustomFilter`] contributes a fixed condition

mod component_errors;
mod logical;
mod property;

pub use component_errors::ComponentError;
pub use logical::LogicalFilterComponent;
pub use property::{OperationChangeEvent, PropertyFilter};

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::condition::Condition;

/// Global counter for assigning unique component ids
static NEXT_COMPONENT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a filter component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(u64);

impl ComponentId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub(crate) fn next_component_id() -> ComponentId {
    ComponentId(NEXT_COMPONENT_ID.fetch_add(1, Ordering::Relaxed))
}

/// A component contributing a caller-supplied condition.
#[derive(Debug)]
pub struct CustomFilter {
    id: ComponentId,
    caption: String,
    condition: Condition,
}

impl CustomFilter {
    pub fn new(caption: impl Into<String>, condition: Condition) -> Self {
        Self {
            id: next_component_id(),
            caption: caption.into(),
            condition,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn condition(&self) -> &Condition {
        &self.condition
    }
}

/// Anything that contributes to a filter's condition tree.
#[derive(Debug)]
pub enum FilterComponent {
    Property(PropertyFilter),
    Logical(LogicalFilterComponent),
    Custom(CustomFilter),
}

impl FilterComponent {
    pub fn id(&self) -> ComponentId {
        match self {
            FilterComponent::Property(filter) => filter.id(),
            FilterComponent::Logical(group) => group.id(),
            FilterComponent::Custom(custom) => custom.id(),
        }
    }

    pub fn caption(&self) -> String {
        match self {
            FilterComponent::Property(filter) => filter.caption(),
            FilterComponent::Logical(group) => group
                .caption()
                .map(str::to_string)
                .unwrap_or_else(|| group.operation().to_string()),
            FilterComponent::Custom(custom) => custom.caption().to_string(),
        }
    }

    pub fn query_condition(&self) -> Condition {
        match self {
            FilterComponent::Property(filter) => Condition::Property(filter.query_condition()),
            FilterComponent::Logical(group) => Condition::Logical(group.query_condition()),
            FilterComponent::Custom(custom) => custom.condition().clone(),
        }
    }

    /// Copies the component (and any children) under fresh ids.
    pub fn duplicate(&self) -> FilterComponent {
        match self {
            FilterComponent::Property(filter) => FilterComponent::Property(filter.duplicate()),
            FilterComponent::Logical(group) => FilterComponent::Logical(group.duplicate()),
            FilterComponent::Custom(custom) => FilterComponent::Custom(CustomFilter::new(
                custom.caption(),
                custom.condition().clone(),
            )),
        }
    }

    /// Property filters of this component and its descendants, depth first.
    pub fn property_filters_mut(&mut self) -> Vec<&mut PropertyFilter> {
        match self {
            FilterComponent::Property(filter) => vec![filter],
            FilterComponent::Logical(group) => group.property_filters_mut(),
            FilterComponent::Custom(_) => Vec::new(),
        }
    }

    pub fn as_property(&self) -> Option<&PropertyFilter> {
        match self {
            FilterComponent::Property(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut PropertyFilter> {
        match self {
            FilterComponent::Property(filter) => Some(filter),
            _ => None,
        }
    }

    pub fn as_logical(&self) -> Option<&LogicalFilterComponent> {
        match self {
            FilterComponent::Logical(group) => Some(group),
            _ => None,
        }
    }

    pub fn as_logical_mut(&mut self) -> Option<&mut LogicalFilterComponent> {
        match self {
            FilterComponent::Logical(group) => Some(group),
            _ => None,
        }
    }
}

impl From<PropertyFilter> for FilterComponent {
    fn from(filter: PropertyFilter) -> Self {
        FilterComponent::Property(filter)
    }
}

impl From<LogicalFilterComponent> for FilterComponent {
    fn from(group: LogicalFilterComponent) -> Self {
        FilterComponent::Logical(group)
    }
}

impl From<CustomFilter> for FilterComponent {
    fn from(custom: CustomFilter) -> Self {
        FilterComponent::Custom(custom)
    }
}
