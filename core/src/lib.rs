//! Standin Core Library
//!
//! A test double engine. Given a structural description of an interface (a
//! [`Contract`]), it builds a [`TestDouble`] whose members are driven by a
//! dispatch table the test configures, records every interaction, and
//! verifies those interactions afterward.
//!
//! # Architecture
//!
//! - [`contract`] - Contract model and builder
//! - [`value`] - Dynamic argument and return values
//! - [`matcher`] - Argument matchers (exact, predicate, wildcard)
//! - [`behavior`] - Method behaviours and property modes
//! - [`times`] - Expected call counts
//! - [`invocation`] - Append-only invocation log
//! - [`verification`] - Structured verification failures
//! - [`double`] - The test double itself
//! - [`settings`] - Strictness and logging settings
//! - [`error`] - Error types and result handling
//!
//! # Example
//!
//! ```rust
//! use standin_core::prelude::*;
//!
//! let contract = ContractBuilder::new("PropertyManager")
//!     .property("FirstName", ValueType::Str)
//!     .method("MutateFirstName", &[("name", ValueType::Str)], ValueType::Unit)
//!     .build();
//! let double = TestDouble::new(contract).unwrap();
//!
//! double.configure_property("FirstName", PropertyMode::Tracked).unwrap();
//! double.set("FirstName", "Ni!").unwrap();
//! assert_eq!(double.get("FirstName").unwrap(), Value::from("Ni!"));
//!
//! double.invoke("MutateFirstName", vec!["wig".into()]).unwrap();
//! double
//!     .verify("MutateFirstName", [ArgMatcher::eq("wig")], Times::once())
//!     .unwrap();
//! ```

pub mod behavior;
pub mod contract;
pub mod double;
pub mod error;
pub mod invocation;
pub mod matcher;
pub mod settings;
pub mod times;
pub mod validation;
pub mod value;
pub mod verification;

// Re-export commonly used types at the crate root for convenience
pub use behavior::{Behavior, PropertyMode};
pub use contract::{
    Contract, ContractBuilder, Dispatch, Member, MethodSignature, Param, PropertyAccess,
    PropertySignature,
};
pub use double::TestDouble;
pub use error::{DoubleError, Result};
pub use invocation::{AccessKind, Invocation, InvocationLog};
pub use matcher::{ArgMatcher, CallMatcher};
pub use settings::{DoubleSettings, Strictness};
pub use times::Times;
pub use validation::ContractValidator;
pub use value::{FromValue, Value, ValueType};
pub use verification::VerificationFailure;

/// Everything a test needs to build, drive and verify a double
pub mod prelude {
    pub use crate::{
        ArgMatcher, Behavior, CallMatcher, Contract, ContractBuilder, DoubleError, PropertyMode,
        TestDouble, Times, Value, ValueType,
    };
}

/// Current version of the core crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Current crate name
pub const CRATE_NAME: &str = env!("CARGO_PKG_NAME");
