//! Behaviour configurations installed on doubled members

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

type Rule = Arc<dyn Fn(&[Value]) -> Value + Send + Sync>;

/// What a configured method does when invoked
#[derive(Clone)]
pub enum Behavior {
    /// Return the declared type's default value
    Default,
    /// Return a fixed value on every matching call
    Return(Value),
    /// Compute the return value from the call's arguments
    Compute(Rule),
    /// Fail with the given message
    Raise(String),
}

impl Behavior {
    pub fn returns(value: impl Into<Value>) -> Self {
        Behavior::Return(value.into())
    }

    pub fn computes<F>(rule: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Behavior::Compute(Arc::new(rule))
    }

    pub fn raises(message: impl Into<String>) -> Self {
        Behavior::Raise(message.into())
    }
}

impl fmt::Debug for Behavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Behavior::Default => write!(f, "Default"),
            Behavior::Return(value) => write!(f, "Return({value})"),
            Behavior::Compute(_) => write!(f, "Compute(..)"),
            Behavior::Raise(message) => write!(f, "Raise({message:?})"),
        }
    }
}

/// How a configured property answers reads
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyMode {
    /// Always read back this value; sets are recorded but ignored
    Fixed(Value),
    /// Store whatever is set, starting from the type default
    Tracked,
    /// Store whatever is set, starting from the given value
    TrackedWith(Value),
}

impl PropertyMode {
    pub fn fixed(value: impl Into<Value>) -> Self {
        PropertyMode::Fixed(value.into())
    }

    pub fn tracked_with(initial: impl Into<Value>) -> Self {
        PropertyMode::TrackedWith(initial.into())
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, PropertyMode::Fixed(_))
    }

    /// Value a freshly configured property of this mode holds
    pub fn initial_value(&self) -> Option<&Value> {
        match self {
            PropertyMode::Fixed(value) | PropertyMode::TrackedWith(value) => Some(value),
            PropertyMode::Tracked => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_mode_initial_values() {
        assert_eq!(PropertyMode::Tracked.initial_value(), None);
        assert_eq!(
            PropertyMode::tracked_with("Arthur").initial_value(),
            Some(&Value::from("Arthur"))
        );
        assert!(PropertyMode::Tracked.is_tracked());
        assert!(!PropertyMode::fixed(1).is_tracked());
    }

    #[test]
    fn test_behavior_debug() {
        assert_eq!(format!("{:?}", Behavior::returns(3)), "Return(3)");
        assert_eq!(format!("{:?}", Behavior::raises("boom")), "Raise(\"boom\")");
        assert_eq!(format!("{:?}", Behavior::computes(|_| Value::Unit)), "Compute(..)");
    }
}
