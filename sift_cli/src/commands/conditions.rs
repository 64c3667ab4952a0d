use std::collections::BTreeSet;
use std::path::Path;

use serde::Serialize;
use sift_core::{Condition, PropertyPath};

use super::open_session;
use crate::errors::CliError;
use crate::ui::{self, OutputFormat};

#[derive(Serialize)]
struct ConditionRow {
    number: usize,
    caption: String,
    condition: Condition,
}

/// Lists the loose conditions, numbered the way `--condition` expects.
pub fn list_conditions(
    workspace_path: &Path,
    filter_id: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Listing conditions");
    let session = open_session(workspace_path, filter_id, None)?;

    let rows: Vec<ConditionRow> = session
        .filter
        .conditions()
        .iter()
        .enumerate()
        .map(|(index, component)| ConditionRow {
            number: index + 1,
            caption: component.caption(),
            condition: component.query_condition(),
        })
        .collect();

    ui::success(&format!("Found {} conditions", rows.len()));

    match output_format {
        OutputFormat::Pretty => {
            for row in &rows {
                ui::raw_output(&format!("{:>3}. {}: {}", row.number, row.caption, row.condition));
            }
        }
        OutputFormat::Json => ui::json_output(&rows),
    }

    Ok(())
}

/// Lists the record properties offered for new conditions.
pub fn list_properties(
    workspace_path: &Path,
    filter_id: Option<&str>,
    output_format: OutputFormat,
) -> Result<(), CliError> {
    ui::header("Listing properties");
    let session = open_session(workspace_path, filter_id, None)?;
    let filter = &session.filter;

    let paths: Vec<PropertyPath> = filter
        .data_loader()
        .records()
        .iter()
        .flat_map(|record| record.property_paths())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let available = filter.available_properties(&paths);

    ui::success(&format!(
        "{} of {} properties are available",
        available.len(),
        paths.len()
    ));

    match output_format {
        OutputFormat::Pretty => {
            for path in &available {
                ui::raw_output(path.as_str());
            }
        }
        OutputFormat::Json => ui::json_output(&available),
    }

    Ok(())
}
