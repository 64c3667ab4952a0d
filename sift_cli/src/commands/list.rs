use std::path::Path;

use super::open_session;
use crate::errors::CliError;
use crate::ui::{self, ConfigurationRow, OutputFormat};

/// Lists the filter's configurations sorted by name, the empty configuration first.
pub fn list_configurations(
    workspace_path: &Path,
    filter_id: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Listing configurations");
    let session = open_session(workspace_path, filter_id, None)?;
    let filter = &session.filter;
    let current_id = filter.current_configuration().id();
    let default_id = session
        .store
        .default_model(filter.id())
        .map(|model| model.id.as_str());

    let rows: Vec<ConfigurationRow> = std::iter::once(filter.empty_configuration())
        .chain(filter.configurations_by_name())
        .map(|configuration| ConfigurationRow {
            id: configuration.id().to_string(),
            name: configuration.name().map(str::to_string),
            kind: if configuration.is_run_time() { "saved" } else { "built-in" },
            current: configuration.id() == current_id,
            default: Some(configuration.id()) == default_id,
        })
        .collect();

    ui::success(&format!(
        "Found {} configurations for filter '{}'",
        rows.len(),
        filter.id()
    ));

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_configuration_list(&rows),
        OutputFormat::Json => ui::json_output(&rows),
    }

    Ok(())
}
