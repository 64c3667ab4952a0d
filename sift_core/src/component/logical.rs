use crate::condition::{Combinator, LogicalCondition};

use super::{ComponentId, FilterComponent, PropertyFilter, next_component_id};

/// A filter component grouping its children under AND or OR.
///
/// Children are owned: a component tree never shares subtrees.
#[derive(Debug)]
pub struct LogicalFilterComponent {
    id: ComponentId,
    operation: Combinator,
    caption: Option<String>,
    children: Vec<FilterComponent>,
}

impl LogicalFilterComponent {
    pub fn new(operation: Combinator) -> Self {
        Self {
            id: next_component_id(),
            operation,
            caption: None,
            children: Vec::new(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    /// Builder-style child adder
    pub fn with_child(mut self, child: impl Into<FilterComponent>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn operation(&self) -> Combinator {
        self.operation
    }

    pub fn set_operation(&mut self, operation: Combinator) {
        self.operation = operation;
    }

    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    pub fn children(&self) -> &[FilterComponent] {
        &self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Appends a child and returns its id.
    pub fn add(&mut self, child: impl Into<FilterComponent>) -> ComponentId {
        let child = child.into();
        let id = child.id();
        self.children.push(child);
        id
    }

    /// Removes a component anywhere below this one.
    pub fn remove(&mut self, id: ComponentId) -> Option<FilterComponent> {
        if let Some(index) = self.children.iter().position(|child| child.id() == id) {
            return Some(self.children.remove(index));
        }
        self.children
            .iter_mut()
            .filter_map(FilterComponent::as_logical_mut)
            .find_map(|group| group.remove(id))
    }

    pub fn find(&self, id: ComponentId) -> Option<&FilterComponent> {
        for child in &self.children {
            if child.id() == id {
                return Some(child);
            }
            if let FilterComponent::Logical(group) = child {
                if let Some(found) = group.find(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    pub fn find_mut(&mut self, id: ComponentId) -> Option<&mut FilterComponent> {
        for child in self.children.iter_mut() {
            if child.id() == id {
                return Some(child);
            }
            if let FilterComponent::Logical(group) = child {
                if let Some(found) = group.find_mut(id) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Whether `id` is this component or one of its descendants.
    pub fn contains(&self, id: ComponentId) -> bool {
        self.id == id || self.find(id).is_some()
    }

    /// Ids of all descendants in depth-first order.
    pub fn component_ids(&self) -> Vec<ComponentId> {
        let mut ids = Vec::new();
        for child in &self.children {
            ids.push(child.id());
            if let FilterComponent::Logical(group) = child {
                ids.extend(group.component_ids());
            }
        }
        ids
    }

    /// All property filters below this component in depth-first order.
    pub fn property_filters(&self) -> Vec<&PropertyFilter> {
        let mut filters = Vec::new();
        for child in &self.children {
            match child {
                FilterComponent::Property(filter) => filters.push(filter),
                FilterComponent::Logical(group) => filters.extend(group.property_filters()),
                FilterComponent::Custom(_) => {}
            }
        }
        filters
    }

    pub fn property_filters_mut(&mut self) -> Vec<&mut PropertyFilter> {
        let mut filters = Vec::new();
        collect_property_filters_mut(&mut self.children, &mut filters);
        filters
    }

    pub fn query_condition(&self) -> LogicalCondition {
        LogicalCondition {
            combinator: self.operation,
            conditions: self
                .children
                .iter()
                .map(FilterComponent::query_condition)
                .collect(),
        }
    }

    /// Deep copy of the tree with fresh ids throughout.
    pub fn duplicate(&self) -> LogicalFilterComponent {
        LogicalFilterComponent {
            id: next_component_id(),
            operation: self.operation,
            caption: self.caption.clone(),
            children: self.children.iter().map(FilterComponent::duplicate).collect(),
        }
    }
}

fn collect_property_filters_mut<'a>(
    children: &'a mut [FilterComponent],
    filters: &mut Vec<&'a mut PropertyFilter>,
) {
    for child in children {
        match child {
            FilterComponent::Property(filter) => filters.push(filter),
            FilterComponent::Logical(group) => collect_property_filters_mut(&mut group.children, filters),
            FilterComponent::Custom(_) => {}
        }
    }
}

impl Default for LogicalFilterComponent {
    fn default() -> Self {
        Self::new(Combinator::And)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::condition::{Condition, ConditionValue};
    use crate::operation::Operation;

    fn tree() -> (LogicalFilterComponent, ComponentId, ComponentId) {
        let age = PropertyFilter::new("age", Operation::Greater).with_value(ConditionValue::Integer(18));
        let age_id = age.id();
        let city = PropertyFilter::new("city", Operation::Equal);
        let city_id = city.id();

        let root = LogicalFilterComponent::new(Combinator::And)
            .with_child(age)
            .with_child(LogicalFilterComponent::new(Combinator::Or).with_child(city));
        (root, age_id, city_id)
    }

    #[test]
    fn test_find_nested() {
        let (root, _, city_id) = tree();
        let found = root.find(city_id).unwrap();
        assert_eq!(found.id(), city_id);
        assert!(root.contains(city_id));
        assert!(root.contains(root.id()));
    }

    #[test]
    fn test_component_ids_depth_first() {
        let (root, age_id, city_id) = tree();
        let ids = root.component_ids();
        assert_eq!(ids.len(), 3);
        assert_eq!(ids[0], age_id);
        assert_eq!(ids[2], city_id);
    }

    #[test]
    fn test_remove_nested() {
        let (mut root, _, city_id) = tree();
        let removed = root.remove(city_id).unwrap();
        assert_eq!(removed.id(), city_id);
        assert!(!root.contains(city_id));
        assert!(root.remove(city_id).is_none());
    }

    #[test]
    fn test_query_condition_mirrors_tree() {
        let (root, _, _) = tree();
        let condition = root.query_condition();

        assert_eq!(condition.combinator, Combinator::And);
        assert_eq!(condition.conditions.len(), 2);
        assert!(matches!(condition.conditions[1], Condition::Logical(_)));
    }

    #[test]
    fn test_property_filters_mut_reaches_nested() {
        let (mut root, _, city_id) = tree();
        for filter in root.property_filters_mut() {
            if filter.id() == city_id {
                filter.set_value(Some(ConditionValue::from("Lyon"))).unwrap();
            }
        }
        let city = root.find(city_id).and_then(FilterComponent::as_property).unwrap();
        assert_eq!(city.value(), Some(&ConditionValue::from("Lyon")));
    }

    #[test]
    fn test_duplicate_renews_every_id() {
        let (root, age_id, city_id) = tree();
        let copy = root.duplicate();

        assert_eq!(copy.component_ids().len(), 3);
        assert!(!copy.contains(age_id));
        assert!(!copy.contains(city_id));
        assert_eq!(copy.query_condition(), root.query_condition());
    }
}
