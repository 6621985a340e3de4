use thiserror::Error;

use crate::verification::VerificationFailure;

/// Result type alias for test double operations
pub type Result<T> = std::result::Result<T, DoubleError>;

/// Errors raised by the test double engine.
///
/// None of these are recovered internally. A verification failure is the
/// normal way a test learns that the consumer under test misbehaved, and it
/// carries enough detail to render a readable report.
///
/// # Examples
///
/// ```rust
/// use standin_core::error::DoubleError;
///
/// let error = DoubleError::unknown_member("PropertyManager", "MiddleName");
/// assert!(error.is_unknown_member());
/// assert_eq!(
///     error.to_string(),
///     "Member 'MiddleName' does not exist on contract 'PropertyManager'"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DoubleError {
    /// Contract member cannot be substituted by a double
    #[error("Contract '{contract}' cannot be doubled: member '{member}' {reason}")]
    UnsupportedContract {
        contract: String,
        member: String,
        reason: String,
    },

    /// Configuration or verification referenced a member absent from the contract
    #[error("Member '{member}' does not exist on contract '{contract}'")]
    UnknownMember { contract: String, member: String },

    /// Recorded invocations did not meet the expectation
    #[error("{0}")]
    VerificationFailed(Box<VerificationFailure>),

    /// Failure raised by a member configured to raise
    #[error("{member} raised: {message}")]
    Raised { member: String, message: String },

    /// Strict double invoked on a member with no matching configuration
    #[error("{member} was invoked but has no matching configuration on a strict double")]
    UnconfiguredInvocation { member: String },

    /// Value does not inhabit the declared type
    #[error("{member} expected a value of type {expected}, got {actual}")]
    TypeMismatch {
        member: String,
        expected: String,
        actual: String,
    },

    /// Property accessor not exposed by the contract
    #[error("Property '{member}' does not support {access}")]
    InvalidAccess { member: String, access: String },

    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl DoubleError {
    pub fn unsupported(contract: &str, member: &str, reason: impl Into<String>) -> Self {
        Self::UnsupportedContract {
            contract: contract.to_string(),
            member: member.to_string(),
            reason: reason.into(),
        }
    }

    pub fn unknown_member(contract: &str, member: &str) -> Self {
        Self::UnknownMember {
            contract: contract.to_string(),
            member: member.to_string(),
        }
    }

    pub fn type_mismatch(member: &str, expected: impl ToString, actual: impl ToString) -> Self {
        Self::TypeMismatch {
            member: member.to_string(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    pub fn is_unsupported_contract(&self) -> bool {
        matches!(self, DoubleError::UnsupportedContract { .. })
    }

    pub fn is_unknown_member(&self) -> bool {
        matches!(self, DoubleError::UnknownMember { .. })
    }

    pub fn is_verification_failure(&self) -> bool {
        matches!(self, DoubleError::VerificationFailed(_))
    }

    pub fn is_raised(&self) -> bool {
        matches!(self, DoubleError::Raised { .. })
    }

    /// Structured details of a failed verification
    pub fn verification_failure(&self) -> Option<&VerificationFailure> {
        match self {
            DoubleError::VerificationFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

impl From<VerificationFailure> for DoubleError {
    fn from(failure: VerificationFailure) -> Self {
        DoubleError::VerificationFailed(Box::new(failure))
    }
}

impl From<config::ConfigError> for DoubleError {
    fn from(error: config::ConfigError) -> Self {
        DoubleError::Configuration(error.to_string())
    }
}
