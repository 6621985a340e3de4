//! Contract test helpers for validating test doubles
//!
//! Provides a standard suite that a double built from any supported
//! contract should pass, ensuring consistent engine behaviour regardless of
//! the contract's shape.

use standin_core::{
    Behavior, CallMatcher, Contract, DoubleError, PropertyMode, TestDouble, Times,
};

use crate::generators::{sample_args, sample_value};

const MISSING_MEMBER: &str = "__absent_member__";

/// Run the full suite against doubles of `contract`
///
/// Every helper creates its own double so the checks stay independent.
pub fn test_double_contract(contract: &Contract) {
    test_unconfigured_defaults_contract(contract);
    test_configured_returns_contract(contract);
    test_call_count_contract(contract);
    test_raise_contract(contract);
    test_property_round_trip_contract(contract);
    test_unknown_member_contract(contract);
}

fn new_double(contract: &Contract) -> TestDouble {
    TestDouble::new(contract.clone()).expect("Contract should be supported")
}

/// Unconfigured members answer with their declared defaults
pub fn test_unconfigured_defaults_contract(contract: &Contract) {
    let double = new_double(contract);

    for method in contract.methods() {
        let value = double
            .invoke(&method.name, sample_args(&method.params))
            .expect("Unconfigured call should succeed");
        assert_eq!(
            value,
            method.returns.default_value(),
            "Unconfigured {method} should return the type default"
        );
    }

    for property in contract.properties().filter(|p| p.access.can_read()) {
        let value = double.get(&property.name).expect("Unconfigured read should succeed");
        assert_eq!(
            value,
            property.ty.default_value(),
            "Unconfigured {property} should read the type default"
        );
    }
}

/// Configured returns come back unchanged on every call
pub fn test_configured_returns_contract(contract: &Contract) {
    let double = new_double(contract);

    for method in contract.methods() {
        let expected = sample_value(&method.returns);
        double
            .configure_method(
                &method.name,
                CallMatcher::Args(vec![standin_core::ArgMatcher::any(); method.arity()]),
                Behavior::Return(expected.clone()),
            )
            .expect("Configuration should succeed");

        for _ in 0..3 {
            let value = double
                .invoke(&method.name, sample_args(&method.params))
                .expect("Configured call should succeed");
            assert_eq!(value, expected, "{method} should return its configured value");
        }
    }
}

/// N calls verify as exactly N and fail as N + 1 with the actual count
pub fn test_call_count_contract(contract: &Contract) {
    let double = new_double(contract);

    for method in contract.methods() {
        let matcher = CallMatcher::Args(vec![standin_core::ArgMatcher::any(); method.arity()]);
        for _ in 0..3 {
            double
                .invoke(&method.name, sample_args(&method.params))
                .expect("Call should succeed");
        }

        double
            .verify(&method.name, matcher.clone(), Times::exactly(3))
            .expect("Three calls should verify as exactly three");

        match double.verify(&method.name, matcher, Times::exactly(4)) {
            Err(DoubleError::VerificationFailed(failure)) => {
                assert_eq!(failure.actual, 3, "Failure should report the actual count");
                assert_eq!(failure.expected, Times::exactly(4));
            }
            other => panic!("Expected VerificationFailed for {method}, got: {other:?}"),
        }
    }
}

/// Raising members fail every matching call and are still recorded
pub fn test_raise_contract(contract: &Contract) {
    let double = new_double(contract);

    for method in contract.methods() {
        double
            .configure_method(&method.name, CallMatcher::AnyArgs, Behavior::raises("injected"))
            .expect("Configuration should succeed");
        let result = double.invoke(&method.name, sample_args(&method.params));
        assert!(
            matches!(result, Err(DoubleError::Raised { ref message, .. }) if message == "injected"),
            "{method} should raise the configured failure, got: {result:?}"
        );
    }

    assert_eq!(
        double.invocation_count(),
        contract.methods().count(),
        "Raised calls should still be recorded"
    );
}

/// Tracked properties read back the last value written
pub fn test_property_round_trip_contract(contract: &Contract) {
    let double = new_double(contract);

    for property in contract
        .properties()
        .filter(|p| p.access.can_read() && p.access.can_write())
    {
        double
            .configure_property(&property.name, PropertyMode::Tracked)
            .expect("Tracking should succeed");

        let first = sample_value(&property.ty);
        double.set(&property.name, first.clone()).expect("Set should succeed");
        assert_eq!(double.get(&property.name).expect("Get should succeed"), first);

        let second = property.ty.default_value();
        double.set(&property.name, second.clone()).expect("Set should succeed");
        assert_eq!(
            double.get(&property.name).expect("Get should succeed"),
            second,
            "Last write should win for {property}"
        );
    }
}

/// Members absent from the contract are rejected, not silently counted
pub fn test_unknown_member_contract(contract: &Contract) {
    assert!(
        !contract.has_member(MISSING_MEMBER),
        "Contract unexpectedly declares {MISSING_MEMBER}"
    );
    let double = new_double(contract);

    let result = double.verify(MISSING_MEMBER, CallMatcher::AnyArgs, Times::never());
    assert!(
        matches!(result, Err(DoubleError::UnknownMember { .. })),
        "Verifying an absent member should fail with UnknownMember, got: {result:?}"
    );

    let result = double.configure_property(MISSING_MEMBER, PropertyMode::Tracked);
    assert!(matches!(result, Err(DoubleError::UnknownMember { .. })));

    let result = double.invoke(MISSING_MEMBER, Vec::new());
    assert!(matches!(result, Err(DoubleError::UnknownMember { .. })));
}
