mod cli;
mod commands;
mod errors;
mod files;
mod prompt;
mod ui;

use clap::Parser;
use log::LevelFilter;
use std::path::PathBuf;
use std::process::ExitCode;

use cli::{SiftCli, SiftCliCommand};
use errors::CliError;

fn main() -> ExitCode {
    let cli = SiftCli::parse();
    initialize_logging(cli.verbose);

    let workspace_path = cli.workspace.unwrap_or_else(|| PathBuf::from("."));
    let filter_id = cli.filter.as_deref();
    let output_format = cli.format;

    let result: Result<(), CliError> = match &cli.command {
        SiftCliCommand::List => {
            commands::list_configurations(&workspace_path, filter_id, output_format)
        }
        SiftCliCommand::Show { configuration } => commands::show_configuration(
            &workspace_path,
            filter_id,
            configuration.as_deref(),
            output_format,
        ),
        SiftCliCommand::Apply {
            configuration,
            edits,
        } => commands::apply_configuration(
            &workspace_path,
            filter_id,
            configuration.as_deref(),
            edits,
            output_format,
        ),
        SiftCliCommand::Save {
            configuration,
            name,
            edits,
        } => commands::save_configuration(
            &workspace_path,
            filter_id,
            configuration.as_deref(),
            name.clone(),
            edits,
            output_format,
        ),
        SiftCliCommand::SaveAs {
            configuration,
            name,
            edits,
        } => commands::save_configuration_as(
            &workspace_path,
            filter_id,
            configuration.as_deref(),
            name.clone(),
            edits,
            output_format,
        ),
        SiftCliCommand::Remove { configuration } => commands::remove_configuration(
            &workspace_path,
            filter_id,
            configuration,
            output_format,
        ),
        SiftCliCommand::Default { configuration } => commands::set_default_configuration(
            &workspace_path,
            filter_id,
            configuration.as_deref(),
            output_format,
        ),
        SiftCliCommand::Conditions => {
            commands::list_conditions(&workspace_path, filter_id, output_format)
        }
        SiftCliCommand::Properties => {
            commands::list_properties(&workspace_path, filter_id, output_format)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::debug(&format!("Command failed: {}", e));
            ExitCode::FAILURE
        }
    }
}

/// Routes `log` output through the progress area. `RUST_LOG` overrides the verbosity flag.
fn initialize_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    let logger = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .build();
    let max_level = logger.filter();

    if indicatif_log_bridge::LogWrapper::new(ui::progress().clone(), logger)
        .try_init()
        .is_ok()
    {
        log::set_max_level(max_level);
    }
}
