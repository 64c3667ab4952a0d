use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sift_core::{
    Configuration, ConfigurationPersistence, FilterConfigurationModel, PersistenceError,
};

use crate::StoreError;

/// Version written to, and expected in, store files.
pub const STORE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct StoreDocument {
    version: u32,
    #[serde(default)]
    configurations: Vec<FilterConfigurationModel>,
}

impl Default for StoreDocument {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            configurations: Vec::new(),
        }
    }
}

/// Saved configuration models of any number of filters, kept in one JSON file.
///
/// Every change is written through to disk straight away.
#[derive(Debug)]
pub struct JsonConfigurationStore {
    path: PathBuf,
    document: StoreDocument,
}

impl JsonConfigurationStore {
    /// Opens the store at `path`. A missing file is an empty store; nothing is written
    /// until the first change.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let document = if path.exists() {
            let contents =
                fs::read_to_string(&path).map_err(|e| StoreError::IoError(path.clone(), e))?;
            let document: StoreDocument = serde_json::from_str(&contents)
                .map_err(|e| StoreError::ParseError(path.clone(), e.to_string()))?;
            if document.version != STORE_VERSION {
                return Err(StoreError::UnsupportedVersion(path, document.version));
            }
            log::debug!(
                "Opened configuration store at {} ({} configurations)",
                path.display(),
                document.configurations.len()
            );
            document
        } else {
            log::debug!(
                "No configuration store at {}, starting empty",
                path.display()
            );
            StoreDocument::default()
        };

        Ok(Self { path, document })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored models of one filter, in the order they were first saved.
    pub fn models_for_filter(&self, filter_id: &str) -> Vec<&FilterConfigurationModel> {
        self.document
            .configurations
            .iter()
            .filter(|model| model.filter_id == filter_id)
            .collect()
    }

    pub fn model(&self, filter_id: &str, id: &str) -> Option<&FilterConfigurationModel> {
        self.document
            .configurations
            .iter()
            .find(|model| model.filter_id == filter_id && model.id == id)
    }

    /// The model marked to be shown when the filter opens.
    pub fn default_model(&self, filter_id: &str) -> Option<&FilterConfigurationModel> {
        self.models_for_filter(filter_id)
            .into_iter()
            .find(|model| model.default_for_filter)
    }

    pub fn remove_model(
        &mut self,
        filter_id: &str,
        id: &str,
    ) -> Result<Option<FilterConfigurationModel>, StoreError> {
        let Some(index) = self.position(filter_id, id) else {
            return Ok(None);
        };
        let removed = self.document.configurations.remove(index);
        self.write()?;

        log::info!("Removed stored configuration '{}' of filter '{}'", id, filter_id);
        Ok(Some(removed))
    }

    /// Marks one model as the filter's default, or clears the mark with `None`.
    pub fn set_default_for_filter(
        &mut self,
        filter_id: &str,
        id: Option<&str>,
    ) -> Result<(), StoreError> {
        if let Some(id) = id {
            if self.position(filter_id, id).is_none() {
                return Err(StoreError::UnknownModel {
                    filter_id: filter_id.to_string(),
                    id: id.to_string(),
                });
            }
        }

        for model in self
            .document
            .configurations
            .iter_mut()
            .filter(|model| model.filter_id == filter_id)
        {
            model.default_for_filter = Some(model.id.as_str()) == id;
        }
        self.write()
    }

    /// Inserts the model, replacing any stored model with the same filter and id.
    pub fn upsert(&mut self, model: FilterConfigurationModel) -> Result<(), StoreError> {
        match self.position(&model.filter_id, &model.id) {
            Some(index) => self.document.configurations[index] = model,
            None => self.document.configurations.push(model),
        }
        self.write()
    }

    fn position(&self, filter_id: &str, id: &str) -> Option<usize> {
        self.document
            .configurations
            .iter()
            .position(|model| model.filter_id == filter_id && model.id == id)
    }

    /// Writes to a temporary file next to the store, then renames it over the store.
    fn write(&self) -> Result<(), StoreError> {
        let io_error = |e: std::io::Error| StoreError::IoError(self.path.clone(), e);

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_error)?;
            }
        }

        let contents = serde_json::to_string_pretty(&self.document)
            .map_err(|e| StoreError::ParseError(self.path.clone(), e.to_string()))?;
        let temporary = self.path.with_extension("json.tmp");
        fs::write(&temporary, contents).map_err(io_error)?;
        fs::rename(&temporary, &self.path).map_err(io_error)?;

        log::debug!("Wrote configuration store to {}", self.path.display());
        Ok(())
    }
}

impl ConfigurationPersistence for JsonConfigurationStore {
    fn load_configuration_model(
        &self,
        filter_id: &str,
        configuration_id: &str,
    ) -> Result<Option<FilterConfigurationModel>, PersistenceError> {
        Ok(self.model(filter_id, configuration_id).cloned())
    }

    fn save_configuration_model(
        &mut self,
        filter_id: &str,
        configuration: &Configuration,
        existing: Option<FilterConfigurationModel>,
    ) -> Result<FilterConfigurationModel, PersistenceError> {
        let mut model = FilterConfigurationModel::from_configuration(filter_id, configuration);
        if let Some(existing) = &existing {
            model.default_for_filter = existing.default_for_filter;
        }

        self.upsert(model.clone())?;
        log::info!(
            "{} configuration '{}' of filter '{}' in {}",
            if existing.is_some() { "Updated" } else { "Stored" },
            model.id,
            filter_id,
            self.path.display()
        );
        Ok(model)
    }
}
