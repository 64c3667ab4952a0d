mod apply;
mod conditions;
mod edits;
mod list;
mod remove;
mod save;
mod show;

pub use apply::apply_configuration;
pub use conditions::{list_conditions, list_properties};
pub use list::list_configurations;
pub use remove::{remove_configuration, set_default_configuration};
pub use save::{save_configuration, save_configuration_as};
pub use show::show_configuration;

use std::path::Path;

use sift_core::Filter;
use sift_store::JsonConfigurationStore;

use crate::errors::CliError;
use crate::files::{build_filter, load_definitions, open_store, select_filter};
use crate::ui;

/// A filter loaded from the workspace, together with the store its saved configurations live in.
pub struct Session {
    pub filter: Filter,
    pub store: JsonConfigurationStore,
}

/// Loads the filter and makes a configuration current: the one asked for, the filter's
/// saved default, or else the empty configuration.
pub fn open_session(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
) -> Result<Session, CliError> {
    let definitions = load_definitions(workspace_path)?;
    let definition = select_filter(definitions, filter_id)?;
    let store = open_store(workspace_path)?;
    let mut filter = build_filter(definition, &store)?;

    let configuration = configuration
        .map(str::to_string)
        .or_else(|| store.default_model(filter.id()).map(|model| model.id.clone()));

    if let Some(id) = configuration {
        filter.set_current_configuration(&id).map_err(|e| {
            ui::error(&e.to_string());
            CliError::InputError
        })?;
    }

    ui::debug(&format!(
        "Current configuration: '{}'",
        filter.current_configuration().id()
    ));
    Ok(Session { filter, store })
}
