use std::path::Path;

use sift_core::FilterConfigurationModel;

use super::open_session;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

/// Shows the condition tree and default values of a configuration.
pub fn show_configuration(
    workspace_path: &Path,
    filter_id: Option<&str>,
    configuration: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Showing configuration");
    let session = open_session(workspace_path, filter_id, configuration)?;
    let current = session.filter.current_configuration();

    match output_format {
        OutputFormat::Pretty => ui::pretty_output_configuration(current),
        OutputFormat::Json => ui::json_output(&FilterConfigurationModel::from_configuration(
            session.filter.id(),
            current,
        )),
    }

    Ok(())
}
