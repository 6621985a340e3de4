//! Integration tests for the mocks crate
//!
//! Drives consumers through the typed mocks and checks that the underlying
//! doubles record, answer and verify as expected.

use mocks::*;
use proptest::prelude::*;
use standin_core::prelude::*;

#[test]
fn test_consumer_change_name_sets_expected_value() {
    init_test_tracing();
    let mock = MockPropertyManager::new();
    mock.double()
        .expect_set("first_name", ArgMatcher::eq("Knights Of Ni!"))
        .unwrap();
    let mut consumer = PropertyManagerConsumer::new(mock.clone());

    consumer.change_name("Knights Of Ni!");

    mock.double().verify_all_configured_setters_called().unwrap();
    assert_all_verified(mock.double());
}

#[test]
fn test_consumer_change_name_verified_with_verify_set() {
    let mock = MockPropertyManager::new();
    let mut consumer = PropertyManagerConsumer::new(mock.clone());

    consumer.change_name("No Shrubbery!");

    assert_property_set(mock.double(), "first_name", "No Shrubbery!");
}

#[test]
fn test_consumer_change_remote_name_calls_mutate_once() {
    let mock = MockPropertyManager::new();
    let mut consumer = PropertyManagerConsumer::new(mock.clone());

    consumer.change_remote_name("My dear old wig");

    let is_wig = ArgMatcher::is("a == \"My dear old wig\"", |a| {
        a.as_str() == Some("My dear old wig")
    });
    assert_called(mock.double(), "mutate_first_name", [is_wig.clone()], Times::once());
    assert_verification_failure(
        mock.double()
            .verify("mutate_first_name", [is_wig], Times::exactly(2)),
        Times::exactly(2),
        1,
    );
}

#[test]
fn test_mutate_does_not_run_real_logic() {
    let mock = MockPropertyManager::with_tracked_names();
    let mut consumer = PropertyManagerConsumer::new(mock.clone());

    consumer.change_remote_name("Sir Robin");

    // A real manager would have renamed; the double only records the call
    assert_eq!(consumer.get_name(), "");
    assert_invocation_order(mock.double(), &["mutate_first_name", "first_name"]);
}

#[test]
fn test_tracked_property_round_trip_through_trait() {
    let mut mock = MockPropertyManager::with_tracked_names();

    mock.set_first_name("Ni!");
    assert_eq!(mock.first_name(), "Ni!");

    // Comparing against the wrong value is a failed assertion, not an engine error
    let outcome = std::panic::catch_unwind(|| assert_eq!("Ni!", "Ni"));
    assert!(outcome.is_err());

    mock.set_first_name("der wechselnden");
    assert_eq!(mock.first_name(), "der wechselnden");
}

#[test]
fn test_stubbed_last_name_is_fixed() {
    let mut mock = MockPropertyManager::new();
    mock.double()
        .configure_property("last_name", PropertyMode::fixed("of Camelot"))
        .unwrap();

    mock.set_last_name("the Brave");

    assert_eq!(mock.last_name(), "of Camelot");
    assert_property_set(mock.double(), "last_name", "the Brave");
}

#[test]
fn test_mock_calculator_sum_is_zero() {
    let calc = MockCalculator::new();
    assert_eq!(calc.sum(10.0, 20.0), 0.0);
    assert_eq!(BasicCalculator.sum(10.0, 20.0), 30.0);
}

#[test]
fn test_mock_calculator_computes_from_arguments() {
    let calc = MockCalculator::new();
    calc.double()
        .configure_method(
            "sum",
            CallMatcher::AnyArgs,
            Behavior::computes(|args| match (&args[0], &args[1]) {
                (Value::Float(a), Value::Float(b)) => Value::Float(a * b),
                _ => Value::Float(f64::NAN),
            }),
        )
        .unwrap();

    assert_eq!(calc.sum(3.0, 4.0), 12.0);
}

#[tokio::test]
async fn test_greeting_notifier_sends_once() {
    let gateway = MockEmailGateway::new();
    gateway
        .double()
        .configure_method("get_number", CallMatcher::none(), Behavior::returns(3))
        .unwrap();
    let notifier = GreetingNotifier::new(gateway.clone());

    let number = notifier.welcome().await.unwrap();

    assert_eq!(number, 3);
    assert_called(gateway.double(), "send_greetings_email", CallMatcher::none(), Times::once());
}

#[tokio::test]
async fn test_greeting_notifier_surfaces_gateway_failure() {
    let gateway = MockEmailGateway::new();
    gateway
        .double()
        .configure_method(
            "send_greetings_email",
            CallMatcher::none(),
            Behavior::raises("mailbox full"),
        )
        .unwrap();
    let notifier = GreetingNotifier::new(gateway.clone());

    let err = notifier.welcome().await.unwrap_err();

    assert_eq!(err, GatewayError::Delivery("mailbox full".to_string()));
    assert_not_called(gateway.double(), "get_number");
}

#[test]
fn test_gateway_mock_without_runtime() {
    let gateway = MockEmailGateway::new();
    let number = tokio_test::block_on(gateway.get_number()).unwrap();
    assert_eq!(number, 0);
}

#[test]
fn test_contract_suite_passes_for_supported_contracts() {
    for contract in supported_contracts() {
        test_double_contract(&contract);
    }
}

#[test]
fn test_sealed_contract_cannot_be_doubled() {
    let err = TestDouble::new(sealed_converter_contract()).unwrap_err();
    assert!(err.is_unsupported_contract());
    assert!(err.to_string().contains("convert_back"));
}

#[test]
fn test_foo_overloads_and_optional_returns() {
    let double = TestDouble::new(foo_contract()).unwrap();
    double
        .configure_method(
            "do_something",
            [ArgMatcher::any(), ArgMatcher::eq("go")],
            Behavior::returns(true),
        )
        .unwrap();
    double
        .configure_method("find", [ArgMatcher::eq("grail")], Behavior::returns(Some("Castle Aaargh")))
        .unwrap();

    assert!(double.call::<bool>("do_something", vec![7.into(), "go".into()]).unwrap());
    assert!(!double.call::<bool>("do_something", vec!["go".into()]).unwrap());
    assert_eq!(
        double.call::<Option<String>>("find", vec!["grail".into()]).unwrap(),
        Some("Castle Aaargh".to_string())
    );
    assert_eq!(double.call::<Option<String>>("find", vec!["cup".into()]).unwrap(), None);
    assert_eq!(double.get_as::<Vec<String>>("tags").unwrap(), Vec::<String>::new());
}

#[test]
fn test_generated_names_round_trip_through_tracked_property() {
    let mut mock = MockPropertyManager::with_tracked_names();
    for _ in 0..generate_call_count() {
        let first = generate_first_name();
        let last = generate_last_name();
        mock.set_first_name(&first);
        mock.set_last_name(&last);
        assert_eq!(mock.first_name(), first);
        assert_eq!(mock.last_name(), last);
    }
}

proptest! {
    #[test]
    fn prop_tracked_property_last_write_wins(
        (ty, values) in value_type_strategy().prop_flat_map(|ty| {
            let values = prop::collection::vec(value_strategy(&ty), 1..6);
            (Just(ty), values)
        })
    ) {
        let contract = ContractBuilder::new("Holder").property("held", ty).build();
        let double = TestDouble::new(contract).unwrap();
        double.configure_property("held", PropertyMode::Tracked).unwrap();

        for value in &values {
            double.set("held", value.clone()).unwrap();
            prop_assert_eq!(&double.get("held").unwrap(), value);
        }
        double.verify_set("held", ArgMatcher::any(), Times::exactly(values.len())).unwrap();
    }

    #[test]
    fn prop_n_calls_verify_exactly_n(n in 0usize..20) {
        let double = TestDouble::new(calculator_contract()).unwrap();
        for i in 0..n {
            double.invoke("sum", vec![(i as f64).into(), 1.0.into()]).unwrap();
        }

        prop_assert!(double.verify("sum", CallMatcher::AnyArgs, Times::exactly(n)).is_ok());
        let failure = assert_verification_failure(
            double.verify("sum", CallMatcher::AnyArgs, Times::exactly(n + 1)),
            Times::exactly(n + 1),
            n,
        );
        prop_assert_eq!(failure.recorded.len(), n);
    }

    #[test]
    fn prop_configured_return_is_idempotent((ty, value) in typed_value_strategy(), calls in 1usize..5) {
        let contract = ContractBuilder::new("Source").method("next", &[], ty).build();
        let double = TestDouble::new(contract).unwrap();
        double.configure_method("next", CallMatcher::none(), Behavior::Return(value.clone())).unwrap();

        for _ in 0..calls {
            prop_assert_eq!(double.invoke("next", vec![]).unwrap(), value.clone());
        }
    }

    #[test]
    fn prop_identifiers_are_valid_member_names(name in identifier_strategy()) {
        let contract = ContractBuilder::new("Named").method(name.clone(), &[], ValueType::Unit).build();
        prop_assert!(TestDouble::new(contract).is_ok());
    }
}
