use sift_core::{ComponentId, ConditionValue, Filter, Operation};

use crate::cli::EditArgs;
use crate::errors::CliError;
use crate::ui;

/// Applies command line edits to the current configuration.
///
/// Conditions are added first so later edits can address their parameters; operations
/// change before values are entered, since switching input kinds clears a value.
pub fn apply_edits(filter: &mut Filter, edits: &EditArgs) -> Result<(), CliError> {
    let loose: Vec<ComponentId> = filter.conditions().iter().map(|c| c.id()).collect();
    for number in &edits.conditions {
        let Some(id) = number.checked_sub(1).and_then(|index| loose.get(index)) else {
            ui::error(&format!("No condition number {}, see `sift conditions`", number));
            return Err(CliError::InputError);
        };
        filter.use_condition(*id).map_err(|e| {
            ui::error(&e.to_string());
            CliError::InputError
        })?;
    }

    for assignment in &edits.operations {
        let (parameter_name, input) = parse_assignment(assignment)?;
        let component = find_parameter(filter, parameter_name)?;
        let operation: Operation = input.parse().map_err(|e: String| {
            ui::error(&e);
            CliError::InputError
        })?;
        filter.set_operation(component, operation).map_err(|e| {
            ui::error(&e.to_string());
            CliError::FilterError
        })?;
    }

    for assignment in &edits.values {
        let (parameter_name, input) = parse_assignment(assignment)?;
        let component = find_parameter(filter, parameter_name)?;
        let value = parse_value(filter, component, input)?;
        filter.set_value(component, Some(value)).map_err(|e| {
            ui::error(&e.to_string());
            CliError::InputError
        })?;
    }

    for assignment in &edits.defaults {
        let (parameter_name, input) = parse_assignment(assignment)?;
        let component = find_parameter(filter, parameter_name)?;
        let value = parse_value(filter, component, input)?;
        let configuration = filter.current_configuration_mut();
        configuration.set_default_value(parameter_name, Some(value));
        configuration.set_modified(true);
    }

    Ok(())
}

/// Splits `name=value`.
pub fn parse_assignment(assignment: &str) -> Result<(&str, &str), CliError> {
    match assignment.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
        _ => {
            ui::error(&format!(
                "Expected <parameter>=<value>, got '{}'",
                assignment
            ));
            Err(CliError::InputError)
        }
    }
}

fn find_parameter(filter: &Filter, parameter_name: &str) -> Result<ComponentId, CliError> {
    filter.find_by_parameter(parameter_name).ok_or_else(|| {
        ui::error(&format!(
            "Configuration '{}' has no parameter '{}', see `sift show`",
            filter.current_configuration().id(),
            parameter_name
        ));
        CliError::InputError
    })
}

/// Parses a value in the shape the component's operation expects.
fn parse_value(filter: &Filter, component: ComponentId, input: &str) -> Result<ConditionValue, CliError> {
    let operation_type = filter
        .current_configuration()
        .root_logical_filter_component()
        .find(component)
        .and_then(|c| c.as_property())
        .map(|f| f.operation().operation_type())
        .ok_or(CliError::InputError)?;

    ConditionValue::parse_for(operation_type, input).map_err(|e| {
        ui::error(&e);
        CliError::InputError
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sift_core::{InMemoryDataLoader, PropertyFilter};

    fn filter() -> (Filter, ComponentId) {
        let mut filter = Filter::new("customers", InMemoryDataLoader::default());
        let age = filter
            .current_configuration_mut()
            .root_logical_filter_component_mut()
            .add(PropertyFilter::new("age", Operation::Equal).with_parameter_name("age"));
        filter.add_condition(PropertyFilter::new("city", Operation::Equal).with_parameter_name("city"));
        (filter, age)
    }

    fn value_of(filter: &Filter, parameter_name: &str) -> Option<ConditionValue> {
        let id = filter.find_by_parameter(parameter_name)?;
        filter
            .current_configuration()
            .root_logical_filter_component()
            .find(id)
            .and_then(|c| c.as_property())
            .and_then(|f| f.value().cloned())
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("age = 5").unwrap(), ("age", "5"));
        assert_eq!(parse_assignment("range=1..5").unwrap(), ("range", "1..5"));
        assert!(parse_assignment("age").is_err());
        assert!(parse_assignment("=5").is_err());
    }

    #[test]
    fn test_operation_then_value() {
        let (mut filter, _) = filter();
        let edits = EditArgs {
            operations: vec!["age=in_list".to_string()],
            values: vec!["age=18,21".to_string()],
            ..Default::default()
        };

        apply_edits(&mut filter, &edits).unwrap();

        assert_eq!(
            value_of(&filter, "age"),
            Some(ConditionValue::List(vec![
                ConditionValue::Integer(18),
                ConditionValue::Integer(21)
            ]))
        );
        assert!(filter.current_configuration().is_modified());
    }

    #[test]
    fn test_condition_then_value() {
        let (mut filter, _) = filter();
        let edits = EditArgs {
            conditions: vec![1],
            values: vec!["city=Lyon".to_string()],
            ..Default::default()
        };

        apply_edits(&mut filter, &edits).unwrap();

        assert_eq!(value_of(&filter, "city"), Some(ConditionValue::from("Lyon")));
    }

    #[test]
    fn test_default_marks_configuration_modified() {
        let (mut filter, _) = filter();
        let edits = EditArgs {
            defaults: vec!["age=30".to_string()],
            ..Default::default()
        };

        apply_edits(&mut filter, &edits).unwrap();

        let configuration = filter.current_configuration();
        assert_eq!(configuration.default_value("age"), Some(&ConditionValue::Integer(30)));
        assert!(configuration.is_modified());
    }

    #[test]
    fn test_unknown_parameter_and_condition() {
        let (mut filter, _) = filter();
        let unknown_parameter = EditArgs {
            values: vec!["height=2".to_string()],
            ..Default::default()
        };
        assert_eq!(apply_edits(&mut filter, &unknown_parameter), Err(CliError::InputError));

        let unknown_condition = EditArgs {
            conditions: vec![0],
            ..Default::default()
        };
        assert_eq!(apply_edits(&mut filter, &unknown_condition), Err(CliError::InputError));
    }
}
