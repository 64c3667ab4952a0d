//! Workspace files: filter definitions in `sift.json` and the configuration store.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use sift_core::{
    ComponentModel, ConditionValue, Configuration, DesignTimeConfiguration, Filter,
    InMemoryDataLoader, LogicalModel, PropertyPath, Record,
};
use sift_store::JsonConfigurationStore;

use crate::errors::CliError;
use crate::ui;

pub const DEFINITIONS_FILE: &str = "sift.json";
pub const STORE_FILE: &str = ".sift/configurations.json";

/// Contents of `sift.json`.
#[derive(Debug, Deserialize)]
pub struct WorkspaceDefinition {
    pub filters: Vec<FilterDefinition>,
}

/// A filter over one data set, with its design-time configurations.
#[derive(Debug, Deserialize)]
pub struct FilterDefinition {
    pub id: String,
    #[serde(default)]
    pub auto_apply: bool,
    /// Properties never offered for new conditions
    #[serde(default)]
    pub hidden_properties: Vec<String>,
    #[serde(default)]
    pub records: Vec<Record>,
    #[serde(default)]
    pub configurations: Vec<ConfigurationDefinition>,
    /// Loose conditions users can add to run-time configurations
    #[serde(default)]
    pub conditions: Vec<ComponentModel>,
}

#[derive(Debug, Deserialize)]
pub struct ConfigurationDefinition {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub root: LogicalModel,
    #[serde(default)]
    pub default_values: BTreeMap<String, ConditionValue>,
}

/// Reads `sift.json` from the workspace.
pub fn load_definitions(workspace_path: &Path) -> Result<WorkspaceDefinition, CliError> {
    let path = workspace_path.join(DEFINITIONS_FILE);
    let contents = fs::read_to_string(&path).map_err(|e| {
        ui::error_with_details(
            &format!("Couldn't read filter definitions at {}", path.display()),
            &e.to_string(),
        );
        CliError::FileError
    })?;

    serde_json::from_str(&contents).map_err(|e| {
        ui::error_with_details(
            &format!("Filter definitions at {} are invalid", path.display()),
            &e.to_string(),
        );
        CliError::BuildError
    })
}

pub fn store_path(workspace_path: &Path) -> PathBuf {
    workspace_path.join(STORE_FILE)
}

pub fn open_store(workspace_path: &Path) -> Result<JsonConfigurationStore, CliError> {
    JsonConfigurationStore::open(store_path(workspace_path)).map_err(|e| {
        ui::error_with_details("Couldn't open the configuration store", &e.to_string());
        CliError::BuildError
    })
}

/// Picks the filter to work with: the one named, or the only one defined.
pub fn select_filter(
    definition: WorkspaceDefinition,
    filter_id: Option<&str>,
) -> Result<FilterDefinition, CliError> {
    let mut filters = definition.filters;
    match filter_id {
        Some(id) => match filters.iter().position(|f| f.id == id) {
            Some(index) => Ok(filters.swap_remove(index)),
            None => {
                ui::error(&format!("No filter '{}' in {}", id, DEFINITIONS_FILE));
                Err(CliError::InputError)
            }
        },
        None if filters.len() == 1 => Ok(filters.remove(0)),
        None => {
            let ids: Vec<&str> = filters.iter().map(|f| f.id.as_str()).collect();
            ui::error(&format!(
                "Choose a filter with --filter (defined: {})",
                ids.join(", ")
            ));
            Err(CliError::InputError)
        }
    }
}

/// Builds the filter from its definition and the configurations saved in the store.
///
/// The returned filter shows the empty configuration.
pub fn build_filter(
    definition: FilterDefinition,
    store: &JsonConfigurationStore,
) -> Result<Filter, CliError> {
    let mut filter = Filter::new(&definition.id, InMemoryDataLoader::new(definition.records))
        .with_auto_apply(definition.auto_apply);

    for configuration in definition.configurations {
        let mut design_time = DesignTimeConfiguration::new(
            configuration.id,
            configuration.name,
            configuration.root.to_component(),
        );
        for (parameter_name, value) in configuration.default_values {
            design_time.set_default_value(&parameter_name, Some(value));
        }
        filter
            .add_existing_configuration(Configuration::DesignTime(design_time))
            .map_err(|e| {
                ui::error_with_details("Invalid configuration definition", &e.to_string());
                CliError::BuildError
            })?;
    }

    for model in store.models_for_filter(&definition.id) {
        if let Err(e) = filter.add_existing_configuration(model.to_run_time_configuration().into()) {
            log::warn!("Skipping saved configuration '{}': {}", model.id, e);
        }
    }

    for condition in &definition.conditions {
        filter.add_condition(condition.to_component());
    }

    if !definition.hidden_properties.is_empty() {
        let hidden: BTreeSet<String> = definition.hidden_properties.into_iter().collect();
        filter.add_properties_filter_predicate(move |path: &PropertyPath| !hidden.contains(path.as_str()));
    }

    log::debug!(
        "Built filter '{}' with {} configurations",
        filter.id(),
        filter.configurations().len()
    );
    Ok(filter)
}
