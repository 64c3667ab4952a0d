mod helpers;

use assert_matches::assert_matches;
use helpers::{FailingPersistence, MockPersistence, ScriptedPrompt, customer_filter};
use sift_core::action::{ActionError, FilterSaveAction, FilterSaveAsAction, SaveOutcome};
use sift_core::{
    ComponentId, ConditionValue, Configuration, Filter, FilterConfigurationModel, FilterError, LogicalFilterComponent,
    Operation, PersistenceError, PropertyFilter, StaticMessages,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn save_action(
        persistence: MockPersistence,
        prompt: ScriptedPrompt,
    ) -> FilterSaveAction<MockPersistence, ScriptedPrompt> {
        FilterSaveAction::new(Box::new(StaticMessages::new()), persistence, prompt)
    }

    /// A run-time configuration "cfg1" with an age filter (default 18, entered 40).
    fn stored_configuration() -> (Configuration, ComponentId) {
        let age = PropertyFilter::new("age", Operation::Greater)
            .with_parameter_name("min_age")
            .with_value(ConditionValue::Integer(40));
        let age_id = age.id();
        let mut configuration = Configuration::run_time(
            "cfg1",
            Some("Older".to_string()),
            LogicalFilterComponent::default().with_child(age),
        );
        configuration.set_default_value("min_age", Some(ConditionValue::Integer(18)));
        (configuration, age_id)
    }

    fn value_of(filter: &Filter, component: ComponentId) -> Option<ConditionValue> {
        filter
            .current_configuration()
            .root_logical_filter_component()
            .find(component)
            .and_then(|c| c.as_property())
            .and_then(|f| f.value().cloned())
    }

    fn filter_with_current(configuration: Configuration) -> Filter {
        let mut filter = customer_filter();
        let id = configuration.id().to_string();
        filter.add_existing_configuration(configuration).unwrap();
        filter.set_current_configuration(&id).unwrap();
        filter.current_configuration_mut().set_modified(true);
        filter
    }

    #[test]
    fn test_save_from_empty_configuration_always_saves_as() {
        let mut filter = customer_filter();
        filter
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .add(PropertyFilter::new("city", Operation::Equal).with_value(ConditionValue::from("Paris")));
        filter.current_configuration_mut().set_modified(true);

        let mut action = save_action(MockPersistence::default(), ScriptedPrompt::answering("Parisians"));
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "parisians".to_string() });
        assert!(action.persistence().loads.borrow().is_empty());
        assert_eq!(action.prompt().asked, 1);

        let saves = &action.persistence().saves;
        assert_eq!(saves.len(), 1);
        assert!(!saves[0].updated_existing);
        assert_eq!(saves[0].configuration_id, "parisians");

        let current = filter.current_configuration();
        assert_eq!(current.id(), "parisians");
        assert_eq!(current.name(), Some("Parisians"));
        assert!(current.is_run_time());
        assert!(!current.is_modified());
    }

    #[test]
    fn test_save_updates_existing_model_and_keeps_values() {
        let (configuration, age) = stored_configuration();
        let persistence = MockPersistence::default().with_model("customers", &configuration);
        let mut filter = filter_with_current(configuration);

        let mut action = save_action(persistence, ScriptedPrompt::default());
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::Updated { id: "cfg1".to_string() });
        assert_eq!(*action.persistence().loads.borrow(), vec!["cfg1".to_string()]);
        assert_eq!(action.prompt().asked, 0);

        let saves = &action.persistence().saves;
        assert_eq!(saves.len(), 1);
        assert!(saves[0].updated_existing);
        // Stored with the default, not the entered value
        assert_eq!(
            saves[0].values.get("min_age"),
            Some(&Some(ConditionValue::Integer(18)))
        );

        assert_eq!(value_of(&filter, age), Some(ConditionValue::Integer(40)));
        assert_eq!(filter.current_configuration().id(), "cfg1");
        assert!(!filter.current_configuration().is_modified());
    }

    #[test]
    fn test_save_falls_back_to_save_as_for_stale_configuration() {
        let (configuration, _) = stored_configuration();
        let configuration = rename(configuration, "cfg2");
        let mut filter = filter_with_current(configuration);

        let mut action = save_action(MockPersistence::default(), ScriptedPrompt::answering("Recovered"));
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "recovered".to_string() });
        assert_eq!(*action.persistence().loads.borrow(), vec!["cfg2".to_string()]);
        assert_eq!(action.persistence().saves.len(), 1);
        assert!(!action.persistence().saves[0].updated_existing);
        assert!(filter.configuration("cfg2").is_some());
        assert_eq!(filter.current_configuration().id(), "recovered");
    }

    /// Rebuilds a configuration under another id.
    fn rename(configuration: Configuration, id: &str) -> Configuration {
        let mut model = FilterConfigurationModel::from_configuration("customers", &configuration);
        model.id = id.to_string();
        Configuration::from(model.to_run_time_configuration())
    }

    #[test]
    fn test_save_is_not_applicable_without_changes() {
        let (configuration, _) = stored_configuration();
        let mut filter = filter_with_current(configuration);
        filter.current_configuration_mut().set_modified(false);

        let mut action = save_action(MockPersistence::default(), ScriptedPrompt::default());
        assert!(!action.is_applicable(&filter));
        assert!(action.save_as_action().is_applicable(&filter));
        assert_matches!(
            action.execute(&mut filter),
            Err(ActionError::NotApplicable { action: "filter_save", .. })
        );
        assert!(action.persistence().saves.is_empty());
    }

    #[test]
    fn test_save_as_needs_conditions() {
        let mut filter = customer_filter();
        filter.current_configuration_mut().set_modified(true);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            MockPersistence::default(),
            ScriptedPrompt::answering("Nothing"),
        );
        assert!(!action.is_applicable(&filter));
        assert_matches!(
            action.execute(&mut filter),
            Err(ActionError::NotApplicable { action: "filter_save_as", .. })
        );
    }

    #[test]
    fn test_save_as_copies_tree_and_defaults() {
        let (configuration, age) = stored_configuration();
        let mut filter = filter_with_current(configuration);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            MockPersistence::default(),
            ScriptedPrompt::answering("  Older copy "),
        );
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "older_copy".to_string() });
        let copy = filter.current_configuration();
        assert_eq!(copy.name(), Some("Older copy"));
        assert_eq!(copy.default_value("min_age"), Some(&ConditionValue::Integer(18)));
        assert!(!copy.root_logical_filter_component().contains(age));

        let copied_filter = copy.root_logical_filter_component().property_filters()[0];
        assert_eq!(copied_filter.parameter_name(), "min_age");
        assert_eq!(copied_filter.value(), Some(&ConditionValue::Integer(40)));

        // The original stays registered and untouched
        assert_eq!(filter.configurations().len(), 2);
        assert!(filter.configuration("cfg1").unwrap().is_modified());
    }

    #[test]
    fn test_save_as_picks_free_id() {
        let (configuration, _) = stored_configuration();
        let mut filter = filter_with_current(configuration);
        filter.add_configuration("older", None).unwrap();

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            MockPersistence::default(),
            ScriptedPrompt::answering("Older"),
        );
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "older_1".to_string() });
    }

    #[test]
    fn test_cancelled_prompt_changes_nothing() {
        let (configuration, _) = stored_configuration();
        let mut filter = filter_with_current(configuration);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            MockPersistence::default(),
            ScriptedPrompt::cancelling(),
        );
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert!(action.persistence().saves.is_empty());
        assert_eq!(filter.current_configuration().id(), "cfg1");
        assert_eq!(filter.configurations().len(), 1);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let (configuration, _) = stored_configuration();
        let mut filter = filter_with_current(configuration);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            MockPersistence::default(),
            ScriptedPrompt::answering("   "),
        );
        assert_matches!(action.execute(&mut filter), Err(ActionError::EmptyName));
    }

    #[test]
    fn test_failed_save_restores_values_and_registers_nothing() {
        let (configuration, age) = stored_configuration();
        let mut filter = filter_with_current(configuration);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            FailingPersistence,
            ScriptedPrompt::answering("Doomed"),
        );
        let result = action.execute(&mut filter);

        assert_matches!(
            result,
            Err(ActionError::Persistence(PersistenceError::Unavailable(_)))
        );
        assert_eq!(filter.configurations().len(), 1);
        assert_eq!(filter.current_configuration().id(), "cfg1");
        assert_eq!(value_of(&filter, age), Some(ConditionValue::Integer(40)));
    }

    fn entered_values(filter: &Filter) -> Vec<Option<ConditionValue>> {
        filter
            .current_configuration()
            .root_logical_filter_component()
            .property_filters()
            .iter()
            .map(|f| f.value().cloned())
            .collect()
    }

    #[test]
    fn test_save_as_keeps_values_of_repeated_condition() {
        let mut filter = customer_filter();
        let loose = filter.add_condition(PropertyFilter::new("age", Operation::Greater));
        let first = filter.use_condition(loose).unwrap();
        let second = filter.use_condition(loose).unwrap();
        filter.set_value(first, Some(ConditionValue::Integer(10))).unwrap();
        filter.set_value(second, Some(ConditionValue::Integer(20))).unwrap();

        let mut action = save_action(MockPersistence::default(), ScriptedPrompt::answering("Two ages"));
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "two_ages".to_string() });
        assert_eq!(
            entered_values(&filter),
            vec![Some(ConditionValue::Integer(10)), Some(ConditionValue::Integer(20))]
        );
        assert_eq!(action.persistence().saves[0].values.len(), 2);
    }

    #[test]
    fn test_update_keeps_values_of_filters_sharing_a_parameter_name() {
        let root = LogicalFilterComponent::default()
            .with_child(
                PropertyFilter::new("age", Operation::Greater)
                    .with_parameter_name("age")
                    .with_value(ConditionValue::Integer(10)),
            )
            .with_child(
                PropertyFilter::new("age", Operation::Less)
                    .with_parameter_name("age")
                    .with_value(ConditionValue::Integer(90)),
            );
        let configuration = Configuration::run_time("range", None, root);
        let persistence = MockPersistence::default().with_model("customers", &configuration);
        let mut filter = filter_with_current(configuration);

        let mut action = save_action(persistence, ScriptedPrompt::default());
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::Updated { id: "range".to_string() });
        assert_eq!(
            entered_values(&filter),
            vec![Some(ConditionValue::Integer(10)), Some(ConditionValue::Integer(90))]
        );
    }

    #[test]
    fn test_save_as_without_free_id_writes_nothing() {
        let (configuration, _) = stored_configuration();
        let mut filter = filter_with_current(configuration);
        filter.add_configuration("x", None).unwrap();
        for counter in 1..1000 {
            filter.add_configuration(format!("x_{}", counter), None).unwrap();
        }
        let taken = Configuration::run_time("x_999", Some("Taken".to_string()), Default::default());
        let persistence = MockPersistence::default().with_model("customers", &taken);

        let mut action = FilterSaveAsAction::new(
            Box::new(StaticMessages::new()),
            persistence,
            ScriptedPrompt::answering("X"),
        );

        assert_matches!(
            action.execute(&mut filter),
            Err(ActionError::Filter(FilterError::DuplicateConfiguration(id))) if id == "x_999"
        );
        assert!(action.persistence().saves.is_empty());
        let stored = &action.persistence().models[&("customers".to_string(), "x_999".to_string())];
        assert_eq!(stored.name.as_deref(), Some("Taken"));
        assert_eq!(filter.current_configuration().id(), "cfg1");
    }

    #[test]
    fn test_save_from_unmodified_empty_configuration_saves_as() {
        let mut filter = customer_filter();
        filter
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .add(PropertyFilter::new("city", Operation::IsSet));
        assert!(!filter.current_configuration().is_modified());

        let mut action = save_action(MockPersistence::default(), ScriptedPrompt::answering("With city"));
        let outcome = action.execute(&mut filter).unwrap();

        assert_eq!(outcome, SaveOutcome::SavedAs { id: "with_city".to_string() });
        assert!(action.persistence().loads.borrow().is_empty());
    }

    #[test]
    fn test_captions() {
        let action = save_action(MockPersistence::default(), ScriptedPrompt::default());
        assert_eq!(action.id(), "filter_save");
        assert_eq!(action.caption(), "Save");
        assert_eq!(action.save_as_action().caption(), "Save as...");
    }
}
