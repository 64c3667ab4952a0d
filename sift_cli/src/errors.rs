use std::fmt;

/// Errors a CLI command can end with. Details are reported to the user where they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliError {
    /// The command line or an interactive answer was invalid
    InputError,
    /// A workspace file couldn't be read or written
    FileError,
    /// The workspace definitions or the store are invalid
    BuildError,
    /// Applying the filter failed
    FilterError,
    /// A save action failed or wasn't applicable
    SaveError,
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::InputError => write!(f, "Invalid input"),
            CliError::FileError => write!(f, "File access failed"),
            CliError::BuildError => write!(f, "Could not load the workspace"),
            CliError::FilterError => write!(f, "Could not apply the filter"),
            CliError::SaveError => write!(f, "Could not save the configuration"),
        }
    }
}

impl std::error::Error for CliError {}
