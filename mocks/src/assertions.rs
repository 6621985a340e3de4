//! Custom assertion helpers for testing
//!
//! Wraps the engine's verification queries in panicking assertions that
//! print the full verification report on failure.

use standin_core::{
    ArgMatcher, CallMatcher, DoubleError, Result, TestDouble, Times, Value, VerificationFailure,
};

/// Assert a method was called the expected number of times
pub fn assert_called(double: &TestDouble, method: &str, matcher: impl Into<CallMatcher>, times: Times) {
    if let Err(err) = double.verify(method, matcher, times) {
        panic!("{err}");
    }
}

/// Assert a method was never called, whatever the arguments
pub fn assert_not_called(double: &TestDouble, method: &str) {
    assert_called(double, method, CallMatcher::AnyArgs, Times::never());
}

/// Assert a property was assigned exactly this value at least once
pub fn assert_property_set(double: &TestDouble, property: &str, value: impl Into<Value>) {
    if let Err(err) = double.verify_set(property, ArgMatcher::eq(value), Times::at_least_once()) {
        panic!("{err}");
    }
}

/// Assert a property reads back the expected value
pub fn assert_property_equals(double: &TestDouble, property: &str, expected: impl Into<Value>) {
    let expected = expected.into();
    match double.get(property) {
        Ok(actual) => assert_eq!(
            actual, expected,
            "Property '{property}' holds {actual}, expected {expected}"
        ),
        Err(err) => panic!("{err}"),
    }
}

/// Assert every setter expectation and verifiable method was satisfied
pub fn assert_all_verified(double: &TestDouble) {
    if let Err(err) = double.verify_all() {
        panic!("{err}");
    }
}

/// Assert a verification result failed with the given counts, returning the failure
pub fn assert_verification_failure(result: Result<()>, expected: Times, actual: usize) -> VerificationFailure {
    match result {
        Err(DoubleError::VerificationFailed(failure)) => {
            assert_eq!(failure.expected, expected, "Unexpected expectation in failure");
            assert_eq!(failure.actual, actual, "Unexpected actual count in failure");
            *failure
        }
        Err(other) => panic!("Expected a verification failure, got: {other}"),
        Ok(()) => panic!("Expected verification to fail ({expected}), but it passed"),
    }
}

/// Assert an invocation failed with a configured raise carrying this message
pub fn assert_raised<T: std::fmt::Debug>(result: Result<T>, message: &str) {
    match result {
        Err(DoubleError::Raised { message: actual, .. }) => assert_eq!(
            actual, message,
            "Raised failure carries an unexpected message"
        ),
        other => panic!("Expected a raised failure '{message}', got: {other:?}"),
    }
}

/// Assert the double saw exactly these members, in this order
pub fn assert_invocation_order(double: &TestDouble, members: &[&str]) {
    let actual: Vec<String> = double.invocations().into_iter().map(|i| i.member).collect();
    assert_eq!(
        actual, members,
        "Invocations were not observed in the expected order"
    );
}
