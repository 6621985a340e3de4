//! Test data generators
//!
//! Provides:
//! - Deterministic sample values for any declared type
//! - Realistic random names via the fake crate
//! - Property-based testing strategies for types, values and identifiers

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;
use proptest::prelude::*;
use rand::Rng;
use standin_core::{Value, ValueType};

/// A fixed value of `ty` that differs from the type default, where the type allows one
pub fn sample_value(ty: &ValueType) -> Value {
    match ty {
        ValueType::Unit => Value::Unit,
        ValueType::Bool => Value::Bool(true),
        ValueType::Int => Value::Int(42),
        ValueType::Float => Value::Float(1.5),
        ValueType::Str => Value::from("sample"),
        ValueType::List(item) => Value::List(vec![sample_value(item)]),
        ValueType::Optional(inner) => Value::Optional(Some(Box::new(sample_value(inner)))),
    }
}

/// Arguments built from each parameter's sample value
pub fn sample_args(params: &[standin_core::Param]) -> Vec<Value> {
    params.iter().map(|p| sample_value(&p.ty)).collect()
}

/// Generate a realistic first name
pub fn generate_first_name() -> String {
    FirstName().fake()
}

/// Generate a realistic last name
pub fn generate_last_name() -> String {
    LastName().fake()
}

/// Generate a call count for repetition tests
pub fn generate_call_count() -> usize {
    rand::thread_rng().gen_range(1..=10)
}

/// Proptest strategy for scalar value types
pub fn scalar_type_strategy() -> impl Strategy<Value = ValueType> {
    prop_oneof![
        Just(ValueType::Unit),
        Just(ValueType::Bool),
        Just(ValueType::Int),
        Just(ValueType::Float),
        Just(ValueType::Str),
    ]
}

/// Proptest strategy for value types, nesting lists and optionals two levels deep
pub fn value_type_strategy() -> impl Strategy<Value = ValueType> {
    scalar_type_strategy().prop_recursive(2, 8, 1, |inner| {
        prop_oneof![
            inner.clone().prop_map(ValueType::list),
            inner.prop_map(ValueType::optional),
        ]
    })
}

/// Proptest strategy for values inhabiting `ty`
pub fn value_strategy(ty: &ValueType) -> BoxedStrategy<Value> {
    match ty {
        ValueType::Unit => Just(Value::Unit).boxed(),
        ValueType::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        ValueType::Int => any::<i64>().prop_map(Value::Int).boxed(),
        ValueType::Float => (-1.0e9f64..1.0e9).prop_map(Value::Float).boxed(),
        ValueType::Str => "[ -~]{0,24}".prop_map(Value::Str).boxed(),
        ValueType::List(item) => prop::collection::vec(value_strategy(item), 0..4)
            .prop_map(Value::List)
            .boxed(),
        ValueType::Optional(inner) => prop::option::of(value_strategy(inner))
            .prop_map(|v| Value::Optional(v.map(Box::new)))
            .boxed(),
    }
}

/// Proptest strategy for a type together with one of its values
pub fn typed_value_strategy() -> impl Strategy<Value = (ValueType, Value)> {
    value_type_strategy().prop_flat_map(|ty| {
        let values = value_strategy(&ty);
        (Just(ty), values)
    })
}

/// Proptest strategy for member identifiers
pub fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,15}"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_values_inhabit_their_type() {
        let types = [
            ValueType::Unit,
            ValueType::Bool,
            ValueType::Int,
            ValueType::Float,
            ValueType::Str,
            ValueType::list(ValueType::optional(ValueType::Int)),
        ];
        for ty in types {
            let sample = sample_value(&ty);
            assert!(ty.accepts(&sample), "{sample} should be a {ty}");
            if ty != ValueType::Unit {
                assert_ne!(sample, ty.default_value(), "{ty} sample should not be the default");
            }
        }
    }

    #[test]
    fn test_generated_names_look_realistic() {
        assert!(!generate_first_name().is_empty());
        assert!(!generate_last_name().is_empty());
        assert!((1..=10).contains(&generate_call_count()));
    }

    proptest! {
        #[test]
        fn prop_generated_values_inhabit_type((ty, value) in typed_value_strategy()) {
            prop_assert!(ty.accepts(&value));
        }
    }
}
