//! Delegating double for the asynchronous `EmailGateway` trait
//!
//! Members resolve immediately; a member configured to raise surfaces as
//! the trait's own [`GatewayError`].

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use standin_core::{DoubleError, FromValue, TestDouble};

use crate::fixtures::email_gateway_contract;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Email delivery failed: {0}")]
    Delivery(String),
}

#[async_trait]
pub trait EmailGateway: Send + Sync {
    async fn send_greetings_email(&self) -> Result<(), GatewayError>;
    async fn get_number(&self) -> Result<i64, GatewayError>;
}

/// Mock implementation of EmailGateway for testing
#[derive(Debug, Clone)]
pub struct MockEmailGateway {
    double: Arc<TestDouble>,
}

impl Default for MockEmailGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmailGateway {
    pub fn new() -> Self {
        Self::from_double(crate::expect_ok(TestDouble::new(email_gateway_contract())))
    }

    pub fn from_double(double: TestDouble) -> Self {
        Self {
            double: Arc::new(double),
        }
    }

    pub fn double(&self) -> &TestDouble {
        &self.double
    }

    fn map_error(error: DoubleError) -> GatewayError {
        match error {
            DoubleError::Raised { message, .. } => GatewayError::Delivery(message),
            other => panic!("{other}"),
        }
    }
}

#[async_trait]
impl EmailGateway for MockEmailGateway {
    async fn send_greetings_email(&self) -> Result<(), GatewayError> {
        self.double
            .invoke_async("send_greetings_email", vec![])
            .await
            .map(|_| ())
            .map_err(Self::map_error)
    }

    async fn get_number(&self) -> Result<i64, GatewayError> {
        let value = self
            .double
            .invoke_async("get_number", vec![])
            .await
            .map_err(Self::map_error)?;
        let kind = value.kind();
        i64::from_value(value).ok_or_else(|| {
            Self::map_error(DoubleError::type_mismatch(
                "EmailGateway.get_number",
                "i64",
                kind,
            ))
        })
    }
}

/// Greets new users through an [`EmailGateway`]
pub struct GreetingNotifier<G> {
    gateway: G,
}

impl<G: EmailGateway> GreetingNotifier<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }

    /// Send a greeting and report how many greetings the gateway has queued
    pub async fn welcome(&self) -> Result<i64, GatewayError> {
        self.gateway.send_greetings_email().await?;
        self.gateway.get_number().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use standin_core::{Behavior, CallMatcher, ContractBuilder, ValueType};

    #[tokio::test]
    async fn test_get_number_returns_configured_value() {
        let gateway = MockEmailGateway::new();
        gateway
            .double()
            .configure_method("get_number", CallMatcher::none(), Behavior::returns(42))
            .unwrap();

        assert_eq!(gateway.get_number().await.unwrap(), 42);
    }

    #[tokio::test]
    #[should_panic(expected = "EmailGateway.get_number expected a value of type i64")]
    async fn test_non_integer_number_is_not_coerced() {
        let contract = ContractBuilder::new("EmailGateway")
            .async_method("send_greetings_email", &[], ValueType::Unit)
            .async_method("get_number", &[], ValueType::Str)
            .build();
        let gateway = MockEmailGateway::from_double(TestDouble::new(contract).unwrap());
        gateway
            .double()
            .configure_method("get_number", CallMatcher::none(), Behavior::returns("seven"))
            .unwrap();

        let _ = gateway.get_number().await;
    }
}
