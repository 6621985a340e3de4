//! Standard contracts used across tests
//!
//! Provides pre-built contracts for:
//! - The name-managing interface doubled by [`crate::MockPropertyManager`]
//! - A calculator and an email gateway
//! - A wide interface exercising overloads, async members and properties
//! - A contract with a sealed member that cannot be doubled

use standin_core::{Contract, ContractBuilder, ValueType};

/// Contract of [`crate::PropertyManager`]
pub fn property_manager_contract() -> Contract {
    ContractBuilder::new("PropertyManager")
        .property("first_name", ValueType::Str)
        .property("last_name", ValueType::Str)
        .method("mutate_first_name", &[("name", ValueType::Str)], ValueType::Unit)
        .build()
}

/// Contract of [`crate::Calculator`]
pub fn calculator_contract() -> Contract {
    ContractBuilder::new("Calculator")
        .method(
            "sum",
            &[("a", ValueType::Float), ("b", ValueType::Float)],
            ValueType::Float,
        )
        .build()
}

/// Contract of [`crate::EmailGateway`]
pub fn email_gateway_contract() -> Contract {
    ContractBuilder::new("EmailGateway")
        .async_method("send_greetings_email", &[], ValueType::Unit)
        .async_method("get_number", &[], ValueType::Int)
        .build()
}

/// Interface with one member of nearly every supported shape
pub fn foo_contract() -> Contract {
    ContractBuilder::new("Foo")
        .property("name", ValueType::Str)
        .property("value", ValueType::Int)
        .read_only_property("tags", ValueType::list(ValueType::Str))
        .method("do_something", &[("value", ValueType::Str)], ValueType::Bool)
        .method(
            "do_something",
            &[("number", ValueType::Int), ("value", ValueType::Str)],
            ValueType::Bool,
        )
        .async_method("do_something_async", &[], ValueType::Bool)
        .method("do_something_stringy", &[("value", ValueType::Str)], ValueType::Str)
        .method("get_count", &[], ValueType::Int)
        .method("add", &[("value", ValueType::Int)], ValueType::Bool)
        .method(
            "find",
            &[("key", ValueType::Str)],
            ValueType::optional(ValueType::Str),
        )
        .build()
}

/// Contract whose `convert_back` is concrete and cannot be intercepted
pub fn sealed_converter_contract() -> Contract {
    ContractBuilder::new("Converter")
        .method("convert", &[], ValueType::Int)
        .sealed_method("convert_back", &[], ValueType::Int)
        .build()
}

/// Every contract above that a double can implement
pub fn supported_contracts() -> Vec<Contract> {
    vec![
        property_manager_contract(),
        calculator_contract(),
        email_gateway_contract(),
        foo_contract(),
    ]
}
