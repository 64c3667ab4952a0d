use std::{fmt, io, path::PathBuf};

use sift_core::PersistenceError;

/// Defines the errors you might encounter using a configuration store.
#[derive(Debug)]
pub enum StoreError {
    IoError(PathBuf, io::Error),
    ParseError(PathBuf, String),
    UnsupportedVersion(PathBuf, u32),
    UnknownModel { filter_id: String, id: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::IoError(path, error) => write!(
                f,
                "There was a problem accessing the configuration store at {}: {}",
                path.display(),
                error
            ),
            StoreError::ParseError(path, error) => write!(
                f,
                "Configuration store at {} could not be parsed: {}",
                path.display(),
                error
            ),
            StoreError::UnsupportedVersion(path, version) => write!(
                f,
                "Configuration store at {} has version {}, expected {}",
                path.display(),
                version,
                crate::store::STORE_VERSION
            ),
            StoreError::UnknownModel { filter_id, id } => write!(
                f,
                "No stored configuration '{}' for filter '{}'",
                id, filter_id
            ),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<StoreError> for PersistenceError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::ParseError(..) | StoreError::UnsupportedVersion(..) => {
                PersistenceError::Corrupt(error.to_string())
            }
            StoreError::IoError(..) | StoreError::UnknownModel { .. } => {
                PersistenceError::Unavailable(error.to_string())
            }
        }
    }
}
