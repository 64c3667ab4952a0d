//! Core data structures for Sift filters.
//!
//! A [`Filter`] owns a set of saved [`Configuration`]s, each of which is a tree of
//! [`FilterComponent`]s rooted at a [`LogicalFilterComponent`]. Applying a filter turns
//! the current configuration's tree into a [`LogicalCondition`] and hands it to a
//! [`DataLoader`].

pub mod action;
pub mod component;
pub mod condition;
pub mod configuration;
pub mod event;
pub mod filter;
pub mod messages;
pub mod model;
pub mod operation;
pub mod record;
pub mod support;

pub use action::{
    ActionError, FilterSaveAction, FilterSaveAsAction, NamePrompt, SaveOutcome,
};
pub use component::{
    ComponentError, ComponentId, CustomFilter, FilterComponent, LogicalFilterComponent,
    OperationChangeEvent, PropertyFilter,
};
pub use condition::{
    Combinator, Condition, ConditionValue, LogicalCondition, MatchError, PropertyCondition,
};
pub use configuration::{
    Configuration, ConfigurationError, ConfigurationState, DesignTimeConfiguration,
    EMPTY_CONFIGURATION_ID, RunTimeConfiguration,
};
pub use event::{EventEmitter, Subscription};
pub use filter::{
    ConfigurationChangeEvent, DataLoader, Filter, FilterError, FilterLayout, InMemoryDataLoader,
    LoadError, NoLayout, PropertiesFilterPredicate,
};
pub use messages::{Messages, StaticMessages};
pub use model::{ComponentModel, FilterConfigurationModel, LogicalModel, PropertyModel};
pub use operation::{Operation, OperationType};
pub use record::{FieldValue, PropertyPath, Record};
pub use support::{ConfigurationPersistence, PersistenceError, ValuesMap};
