use std::path::Path;

use super::open_session;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Removes a saved configuration from the store.
///
/// Built-in configurations come from `sift.json` and can't be removed here.
pub fn remove_configuration(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: &str,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Removing configuration");
    let mut session = open_session(workspace_path, filter_id, None)?;

    if let Some(found) = session.filter.configuration(configuration) {
        if !found.is_run_time() {
            ui::error(&format!(
                "'{}' is a built-in configuration, edit sift.json to remove it",
                configuration
            ));
            return Err(CliError::InputError);
        }
    }

    let removed = session
        .store
        .remove_model(session.filter.id(), configuration)
        .map_err(|e| {
            ui::error_with_details("Failed to update the configuration store", &e.to_string());
            CliError::FileError
        })?;

    let Some(model) = removed else {
        ui::error(&format!("No saved configuration '{}'", configuration));
        return Err(CliError::InputError);
    };
    ui::success(&format!("Removed configuration '{}'", model.id));

    if output_format == OutputFormat::Json {
        ui::json_output(&model);
    }
    Ok(())
}

/// Marks a saved configuration as the one shown when the filter opens, or clears the mark.
pub fn set_default_configuration(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Setting default configuration");
    let mut session = open_session(workspace_path, filter_id, None)?;

    session
        .store
        .set_default_for_filter(session.filter.id(), configuration)
        .map_err(|e| {
            ui::error_with_details("Failed to set the default configuration", &e.to_string());
            CliError::InputError
        })?;

    match configuration {
        Some(id) => ui::success(&format!("'{}' is now the default configuration", id)),
        None => ui::success("Cleared the default configuration"),
    }

    if output_format == OutputFormat::Json {
        ui::json_output(&serde_json::json!({ "default": configuration }));
    }
    Ok(())
}
