//! Delegating double for the `Calculator` trait

use std::sync::Arc;

use standin_core::TestDouble;

use crate::fixtures::calculator_contract;

pub trait Calculator {
    fn sum(&self, a: f64, b: f64) -> f64;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct BasicCalculator;

impl Calculator for BasicCalculator {
    fn sum(&self, a: f64, b: f64) -> f64 {
        a + b
    }
}

/// Mock implementation of Calculator; returns whatever the double is configured with
#[derive(Debug, Clone)]
pub struct MockCalculator {
    double: Arc<TestDouble>,
}

impl Default for MockCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockCalculator {
    pub fn new() -> Self {
        Self {
            double: Arc::new(crate::expect_ok(TestDouble::new(calculator_contract()))),
        }
    }

    pub fn double(&self) -> &TestDouble {
        &self.double
    }
}

impl Calculator for MockCalculator {
    fn sum(&self, a: f64, b: f64) -> f64 {
        crate::expect_ok(self.double.call("sum", vec![a.into(), b.into()]))
    }
}
