//! Typed test doubles and test utilities built on `standin-core`
//!
//! This crate provides testing infrastructure including:
//! - Delegating mocks for example traits (each forwards to a `TestDouble`)
//! - Standard contract fixtures
//! - Custom assertion helpers
//! - Random data generators and property-based testing strategies
//! - A reusable contract test suite
//! - Test logging setup

pub mod assertions;
pub mod calculator;
pub mod contracts;
pub mod email_gateway;
pub mod fixtures;
pub mod generators;
pub mod property_manager;
pub mod telemetry;

pub use assertions::*;
pub use calculator::{BasicCalculator, Calculator, MockCalculator};
pub use contracts::*;
pub use email_gateway::{EmailGateway, GatewayError, GreetingNotifier, MockEmailGateway};
pub use fixtures::*;
pub use generators::*;
pub use property_manager::{
    MockPropertyManager, PropertyManager, PropertyManagerConsumer, SimplePropertyManager,
};
pub use telemetry::init_test_tracing;

/// Unwrap an engine result inside an infallible trait method
///
/// Engine errors in a typed mock mean the test misconfigured the double,
/// so they abort the test with the error's report.
pub(crate) fn expect_ok<T>(result: standin_core::Result<T>) -> T {
    result.unwrap_or_else(|err| panic!("{err}"))
}
