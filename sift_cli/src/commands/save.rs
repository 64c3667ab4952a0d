use std::path::Path;

use sift_core::{ActionError, FilterSaveAction, FilterSaveAsAction, SaveOutcome, StaticMessages};

use super::edits::apply_edits;
use super::open_session;
use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::prompt::TerminalNamePrompt;
use crate::ui::{self, OutputFormat};

/// Saves the changes made to a configuration back to the store.
///
/// Configurations that aren't stored yet, the empty one included, are saved under a new name.
pub fn save_configuration(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
    name: Option<String>,
    edits: &EditArgs,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Saving configuration");
    let session = open_session(workspace_path, filter_id, configuration)?;
    let mut filter = session.filter;
    apply_edits(&mut filter, edits)?;

    let mut action = FilterSaveAction::new(
        Box::new(StaticMessages::new()),
        session.store,
        TerminalNamePrompt::new(name),
    );
    ui::debug(&format!("Running '{}'", action.caption()));

    let outcome = action.execute(&mut filter).map_err(report_action_error)?;
    report_outcome(&outcome, output_format);
    Ok(())
}

/// Saves a configuration as a new stored configuration, leaving the original untouched.
pub fn save_configuration_as(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
    name: Option<String>,
    edits: &EditArgs,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Saving configuration as");
    let session = open_session(workspace_path, filter_id, configuration)?;
    let mut filter = session.filter;
    apply_edits(&mut filter, edits)?;

    let mut action = FilterSaveAsAction::new(
        Box::new(StaticMessages::new()),
        session.store,
        TerminalNamePrompt::new(name),
    );
    ui::debug(&format!("Running '{}'", action.caption()));

    let outcome = action.execute(&mut filter).map_err(report_action_error)?;
    report_outcome(&outcome, output_format);
    Ok(())
}

fn report_action_error(error: ActionError) -> CliError {
    match error {
        ActionError::NotApplicable { reason, .. } => {
            ui::warning(&reason);
            CliError::SaveError
        }
        ActionError::EmptyName => {
            ui::error("A configuration name is required");
            CliError::InputError
        }
        e => {
            ui::error_with_details("Failed to save the configuration", &e.to_string());
            CliError::SaveError
        }
    }
}

fn report_outcome(outcome: &SaveOutcome, output_format: OutputFormat) {
    match outcome {
        SaveOutcome::Updated { id } => ui::success(&format!("Saved configuration '{}'", id)),
        SaveOutcome::SavedAs { id } => ui::success(&format!("Saved new configuration '{}'", id)),
        SaveOutcome::Cancelled => ui::info("Cancelled, nothing was saved"),
    }

    if output_format == OutputFormat::Json {
        let (status, id) = match outcome {
            SaveOutcome::Updated { id } => ("updated", Some(id.as_str())),
            SaveOutcome::SavedAs { id } => ("saved_as", Some(id.as_str())),
            SaveOutcome::Cancelled => ("cancelled", None),
        };
        ui::json_output(&serde_json::json!({ "status": status, "id": id }));
    }
}
