use crate::component::LogicalFilterComponent;

/// Renders the component tree of the current configuration.
///
/// The filter detaches the old tree before attaching the new one whenever the
/// current configuration changes.
pub trait FilterLayout {
    fn attach(&mut self, configuration_id: &str, root: &LogicalFilterComponent);

    fn detach(&mut self, configuration_id: &str, root: &LogicalFilterComponent);
}

/// A layout that renders nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLayout;

impl FilterLayout for NoLayout {
    fn attach(&mut self, _configuration_id: &str, _root: &LogicalFilterComponent) {}

    fn detach(&mut self, _configuration_id: &str, _root: &LogicalFilterComponent) {}
}
