use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::ui::OutputFormat;

/// Defines the top-level interface for the Sift CLI with clap.
#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(version, about = "Sift CLI: Saved filter configurations in the terminal.")]
pub struct SiftCli {
    /// Path to sift workspace directory.
    #[arg(short, long, global = true, env = "SIFT_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Filter to work with (optional when the workspace defines only one).
    #[arg(long, global = true, env = "SIFT_FILTER")]
    pub filter: Option<String>,

    /// Enable verbose output?
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value_t = OutputFormat::default())]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: SiftCliCommand,
}

/// Changes made to the current configuration before a command runs.
#[derive(Args, Debug, Clone, Default, PartialEq)]
pub struct EditArgs {
    /// Copy a loose condition into the configuration (can be repeated). Numbers as shown by `sift conditions`.
    #[arg(long = "condition", value_name = "NUMBER")]
    pub conditions: Vec<usize>,
    /// Change the operation of a parameter (can be repeated). Format: --op <parameter>=<operation>
    #[arg(long = "op", value_name = "PARAMETER=OPERATION")]
    pub operations: Vec<String>,
    /// Enter a parameter value (can be repeated). Format: --set <parameter>=<value>
    #[arg(long = "set", value_name = "PARAMETER=VALUE")]
    pub values: Vec<String>,
    /// Set a parameter's default value (can be repeated). Format: --default <parameter>=<value>
    #[arg(long = "default", value_name = "PARAMETER=VALUE")]
    pub defaults: Vec<String>,
}

/// Defines the available subcommands of the Sift CLI.
#[derive(Subcommand, Debug, PartialEq)]
pub enum SiftCliCommand {
    /// List the configurations of the filter.
    List,
    /// Show the conditions of a configuration.
    Show {
        /// Configuration ID (the filter's default configuration if not specified)
        configuration: Option<String>,
    },
    /// Apply a configuration and print the matching records.
    Apply {
        /// Configuration ID (the filter's default configuration if not specified)
        configuration: Option<String>,
        #[command(flatten)]
        edits: EditArgs,
    },
    /// Save changes to a configuration. Unsaved configurations are saved under a new name.
    Save {
        /// Configuration ID (the filter's default configuration if not specified)
        configuration: Option<String>,
        /// Name to use if a new configuration is created (prompted for otherwise)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        edits: EditArgs,
    },
    /// Save a configuration under a new name.
    SaveAs {
        /// Configuration ID (the filter's default configuration if not specified)
        configuration: Option<String>,
        /// Name of the new configuration (prompted for if not specified)
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        edits: EditArgs,
    },
    /// Remove a saved configuration.
    Remove {
        /// Configuration ID
        configuration: String,
    },
    /// Choose the configuration shown when the filter opens.
    Default {
        /// Configuration ID (clears the default if not specified)
        configuration: Option<String>,
    },
    /// List the loose conditions that can be added to a configuration.
    Conditions,
    /// List the properties available for new conditions.
    Properties,
}
