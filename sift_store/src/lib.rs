//! File persistence for saved Sift filter configurations.
//!
//! [`JsonConfigurationStore`] implements [`sift_core::ConfigurationPersistence`], so it
//! can be handed straight to the save actions.

mod store;
mod store_errors;

pub use store::{JsonConfigurationStore, STORE_VERSION};
pub use store_errors::StoreError;
