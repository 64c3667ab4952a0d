use std::path::Path;

use serde::Serialize;
use sift_core::{DataLoader, LogicalCondition, Record};

use super::edits::apply_edits;
use super::open_session;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Serialize)]
struct ApplyOutput<'a> {
    configuration: &'a str,
    condition: Option<&'a LogicalCondition>,
    records: &'a [Record],
}

/// Applies a configuration, with optional edits, and prints the records it matches.
pub fn apply_configuration(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
    edits: &EditArgs,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Applying configuration");
    let mut session = open_session(workspace_path, filter_id, configuration)?;
    let filter = &mut session.filter;
    apply_edits(filter, edits)?;

    let spinner = ui::spinner("Loading records");
    let result = filter.apply();
    spinner.finish_and_clear();
    result.map_err(|e| {
        ui::error_with_details("Failed to apply the filter", &e.to_string());
        CliError::FilterError
    })?;

    let loader = filter.data_loader();
    if let Some(condition) = loader.condition() {
        ui::info(&format!("Condition: {}", condition));
    }
    ui::success(&format!(
        "{} of {} records match '{}'",
        loader.loaded().len(),
        loader.records().len(),
        filter.current_configuration().display_name()
    ));
    if filter.current_configuration().is_modified() {
        ui::warning("The configuration has unsaved changes, see `sift save`");
    }

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_records(loader.loaded()),
        OutputFormat::Json => ui::json_output(&ApplyOutput {
            configuration: filter.current_configuration().id(),
            condition: loader.condition(),
            records: loader.loaded(),
        }),
    }

    Ok(())
}
