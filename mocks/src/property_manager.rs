//! Delegating double for the `PropertyManager` trait
//!
//! Provides:
//! - The trait and a plain in-memory implementation
//! - A mock that forwards every member to a shared [`TestDouble`]
//! - A consumer that depends on the trait

use std::sync::Arc;

use standin_core::{Behavior, CallMatcher, PropertyMode, TestDouble, Value};

use crate::fixtures::property_manager_contract;

/// Manages a person's names
pub trait PropertyManager {
    fn first_name(&self) -> String;
    fn set_first_name(&mut self, name: &str);
    fn last_name(&self) -> String;
    fn set_last_name(&mut self, name: &str);
    fn mutate_first_name(&mut self, name: &str);
}

#[derive(Debug, Default, Clone)]
pub struct SimplePropertyManager {
    first_name: String,
    last_name: String,
}

impl PropertyManager for SimplePropertyManager {
    fn first_name(&self) -> String {
        self.first_name.clone()
    }

    fn set_first_name(&mut self, name: &str) {
        self.first_name = name.to_string();
    }

    fn last_name(&self) -> String {
        self.last_name.clone()
    }

    fn set_last_name(&mut self, name: &str) {
        self.last_name = name.to_string();
    }

    fn mutate_first_name(&mut self, name: &str) {
        self.first_name = name.to_string();
    }
}

/// Mock implementation of PropertyManager for testing
///
/// Clones share the same double, so a test can hand one clone to the
/// consumer and keep another for configuration and verification.
#[derive(Debug, Clone)]
pub struct MockPropertyManager {
    double: Arc<TestDouble>,
}

impl Default for MockPropertyManager {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPropertyManager {
    pub fn new() -> Self {
        Self::from_double(crate::expect_ok(TestDouble::new(property_manager_contract())))
    }

    pub fn from_double(double: TestDouble) -> Self {
        Self {
            double: Arc::new(double),
        }
    }

    /// Create a mock whose names remember what was set
    pub fn with_tracked_names() -> Self {
        let mock = Self::new();
        crate::expect_ok(mock.double.configure_property("first_name", PropertyMode::Tracked));
        crate::expect_ok(mock.double.configure_property("last_name", PropertyMode::Tracked));
        crate::expect_ok(mock.double.configure_method(
            "mutate_first_name",
            CallMatcher::AnyArgs,
            Behavior::Default,
        ));
        mock
    }

    pub fn double(&self) -> &TestDouble {
        &self.double
    }
}

impl PropertyManager for MockPropertyManager {
    fn first_name(&self) -> String {
        crate::expect_ok(self.double.get_as("first_name"))
    }

    fn set_first_name(&mut self, name: &str) {
        crate::expect_ok(self.double.set("first_name", name));
    }

    fn last_name(&self) -> String {
        crate::expect_ok(self.double.get_as("last_name"))
    }

    fn set_last_name(&mut self, name: &str) {
        crate::expect_ok(self.double.set("last_name", name));
    }

    fn mutate_first_name(&mut self, name: &str) {
        crate::expect_ok(
            self.double
                .call::<()>("mutate_first_name", vec![Value::from(name)]),
        );
    }
}

/// Renames people through a [`PropertyManager`]
pub struct PropertyManagerConsumer<P> {
    manager: P,
}

impl<P: PropertyManager> PropertyManagerConsumer<P> {
    pub fn new(manager: P) -> Self {
        Self { manager }
    }

    pub fn change_name(&mut self, name: &str) {
        self.manager.set_first_name(name);
    }

    pub fn get_name(&self) -> String {
        self.manager.first_name()
    }

    pub fn change_remote_name(&mut self, name: &str) {
        self.manager.mutate_first_name(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consumer_with_real_manager() {
        let mut consumer = PropertyManagerConsumer::new(SimplePropertyManager::default());
        consumer.change_name("Arthur");
        assert_eq!(consumer.get_name(), "Arthur");
        consumer.change_remote_name("Patsy");
        assert_eq!(consumer.get_name(), "Patsy");
    }

    #[test]
    fn test_mock_clones_share_one_double() {
        let mock = MockPropertyManager::with_tracked_names();
        let mut consumer = PropertyManagerConsumer::new(mock.clone());

        consumer.change_name("Ni!");

        assert_eq!(mock.first_name(), "Ni!");
        assert_eq!(mock.double().invocation_count(), 2);
    }

    #[test]
    #[should_panic(expected = "PropertyManager.first_name expected a value of type")]
    fn test_mock_panics_on_engine_error() {
        // Contract declares the name as an integer, so the String accessor cannot convert it
        let contract = standin_core::ContractBuilder::new("PropertyManager")
            .property("first_name", standin_core::ValueType::Int)
            .build();
        let mock = MockPropertyManager::from_double(TestDouble::new(contract).unwrap());
        mock.first_name();
    }
}
