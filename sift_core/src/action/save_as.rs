use crate::configuration::Configuration;
use crate::filter::{DataLoader, Filter};
use crate::messages::Messages;
use crate::support::{
    ConfigurationPersistence, init_configuration_values_map, reset_configuration_values_map,
};

use super::{ActionError, NamePrompt, SaveOutcome, unique_configuration_id};

const CAPTION_KEY: &str = "actions.Filter.SaveAs";
const PROMPT_KEY: &str = "filter.saveAs.prompt";

/// Stores a copy of the current configuration under a name the user enters.
pub struct FilterSaveAsAction<P, N> {
    messages: Box<dyn Messages>,
    persistence: P,
    prompt: N,
}

impl<P: ConfigurationPersistence, N: NamePrompt> FilterSaveAsAction<P, N> {
    pub const ID: &'static str = "filter_save_as";

    pub fn new(messages: Box<dyn Messages>, persistence: P, prompt: N) -> Self {
        Self {
            messages,
            persistence,
            prompt,
        }
    }

    pub fn id(&self) -> &'static str {
        Self::ID
    }

    pub fn caption(&self) -> String {
        self.messages.message(CAPTION_KEY)
    }

    pub(super) fn message(&self, key: &str) -> String {
        self.messages.message(key)
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    pub fn persistence_mut(&mut self) -> &mut P {
        &mut self.persistence
    }

    pub fn prompt(&self) -> &N {
        &self.prompt
    }

    pub fn into_parts(self) -> (P, N) {
        (self.persistence, self.prompt)
    }

    /// There has to be something to save: the current configuration has at least one component.
    pub fn is_applicable<L: DataLoader>(&self, filter: &Filter<L>) -> bool {
        !filter
            .current_configuration()
            .root_logical_filter_component()
            .is_empty()
    }

    pub fn execute<L: DataLoader>(&mut self, filter: &mut Filter<L>) -> Result<SaveOutcome, ActionError> {
        if !self.is_applicable(filter) {
            return Err(ActionError::NotApplicable {
                action: Self::ID,
                reason: "the current configuration has no conditions".to_string(),
            });
        }
        self.save_as(filter)
    }

    /// Prompts for a name and stores the current configuration as a new run-time configuration.
    pub(super) fn save_as<L: DataLoader>(&mut self, filter: &mut Filter<L>) -> Result<SaveOutcome, ActionError> {
        let caption = self.messages.message(PROMPT_KEY);
        let Some(name) = self.prompt.prompt_name(&caption)? else {
            log::debug!("Save as cancelled for filter '{}'", filter.id());
            return Ok(SaveOutcome::Cancelled);
        };
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::EmptyName);
        }

        let id = unique_configuration_id(filter, name)?;
        let mut configuration = {
            let current = filter.current_configuration();
            let mut copy = Configuration::run_time(
                id.clone(),
                Some(name.to_string()),
                current.root_logical_filter_component().duplicate(),
            );
            for (parameter_name, value) in current.default_values() {
                copy.set_default_value(parameter_name, Some(value.clone()));
            }
            copy
        };

        let values = init_configuration_values_map(&mut configuration);
        let saved = self
            .persistence
            .save_configuration_model(filter.id(), &configuration, None);
        reset_configuration_values_map(&mut configuration, values);
        saved?;

        log::info!(
            "Saved configuration '{}' ({}) of filter '{}'",
            name,
            id,
            filter.id()
        );
        filter.add_existing_configuration(configuration)?;
        filter.set_current_configuration(&id)?;
        filter.current_configuration_mut().clear_modified();

        Ok(SaveOutcome::SavedAs { id })
    }
}
