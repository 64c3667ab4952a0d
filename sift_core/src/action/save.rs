use crate::filter::{DataLoader, Filter};
use crate::messages::Messages;
use crate::support::{
    ConfigurationPersistence, init_configuration_values_map, reset_configuration_values_map,
};

use super::{ActionError, FilterSaveAsAction, NamePrompt, SaveOutcome};

const CAPTION_KEY: &str = "actions.Filter.Save";

/// Updates the stored model of the current configuration.
///
/// The empty configuration has never been stored, and a configuration's stored model may
/// have been deleted behind the filter's back. Both cases go through save-as instead.
pub struct FilterSaveAction<P, N> {
    save_as: FilterSaveAsAction<P, N>,
}

impl<P: ConfigurationPersistence, N: NamePrompt> FilterSaveAction<P, N> {
    pub const ID: &'static str = "filter_save";

    pub fn new(messages: Box<dyn Messages>, persistence: P, prompt: N) -> Self {
        Self {
            save_as: FilterSaveAsAction::new(messages, persistence, prompt),
        }
    }

    pub fn id(&self) -> &'static str {
        Self::ID
    }

    pub fn caption(&self) -> String {
        self.save_as.message(CAPTION_KEY)
    }

    pub fn save_as_action(&self) -> &FilterSaveAsAction<P, N> {
        &self.save_as
    }

    pub fn persistence(&self) -> &P {
        self.save_as.persistence()
    }

    pub fn prompt(&self) -> &N {
        self.save_as.prompt()
    }

    pub fn into_parts(self) -> (P, N) {
        self.save_as.into_parts()
    }

    /// Save-as applicability, narrowed to modified configurations.
    pub fn is_applicable<L: DataLoader>(&self, filter: &Filter<L>) -> bool {
        self.save_as.is_applicable(filter) && filter.current_configuration().is_modified()
    }

    /// Updates the stored model of the current configuration.
    ///
    /// The empty configuration is never stored, so saving it always goes to save-as.
    pub fn execute<L: DataLoader>(&mut self, filter: &mut Filter<L>) -> Result<SaveOutcome, ActionError> {
        if filter.is_empty_configuration_current() {
            return self.save_as.save_as(filter);
        }

        if !self.is_applicable(filter) {
            let reason = if self.save_as.is_applicable(filter) {
                "the current configuration has no unsaved changes"
            } else {
                "the current configuration has no conditions"
            };
            return Err(ActionError::NotApplicable {
                action: Self::ID,
                reason: reason.to_string(),
            });
        }

        let filter_id = filter.id().to_string();
        let id = filter.current_configuration().id().to_string();
        let Some(model) = self
            .save_as
            .persistence()
            .load_configuration_model(&filter_id, &id)?
        else {
            log::warn!(
                "No stored model for configuration '{}' of filter '{}', saving as a new configuration",
                id,
                filter_id
            );
            return self.save_as.save_as(filter);
        };

        let configuration = filter.current_configuration_mut();
        let values = init_configuration_values_map(configuration);
        let saved = self
            .save_as
            .persistence_mut()
            .save_configuration_model(&filter_id, configuration, Some(model));
        reset_configuration_values_map(configuration, values);
        saved?;

        log::info!("Updated configuration '{}' of filter '{}'", id, filter_id);
        filter.set_current_configuration(&id)?;
        filter.current_configuration_mut().clear_modified();

        Ok(SaveOutcome::Updated { id })
    }
}
