//! Argument matchers used by configuration and verification

use std::fmt;
use std::sync::Arc;

use crate::value::Value;

type Predicate = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Matches a single argument
#[derive(Clone)]
pub enum ArgMatcher {
    /// Any value
    Any,
    /// A value equal to the given one
    Eq(Value),
    /// A value accepted by a predicate; the description names it in reports
    Predicate { description: String, test: Predicate },
}

impl ArgMatcher {
    pub fn any() -> Self {
        ArgMatcher::Any
    }

    pub fn eq(value: impl Into<Value>) -> Self {
        ArgMatcher::Eq(value.into())
    }

    pub fn is<F>(description: impl Into<String>, test: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        ArgMatcher::Predicate {
            description: description.into(),
            test: Arc::new(test),
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            ArgMatcher::Any => true,
            ArgMatcher::Eq(expected) => expected == value,
            ArgMatcher::Predicate { test, .. } => test(value),
        }
    }
}

impl fmt::Display for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgMatcher::Any => write!(f, "_"),
            ArgMatcher::Eq(value) => write!(f, "{value}"),
            ArgMatcher::Predicate { description, .. } => write!(f, "<{description}>"),
        }
    }
}

impl fmt::Debug for ArgMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArgMatcher({self})")
    }
}

/// Matches the whole argument list of a call
#[derive(Clone, Debug)]
pub enum CallMatcher {
    /// Any arguments, resolving the method by name alone
    AnyArgs,
    /// One matcher per parameter
    Args(Vec<ArgMatcher>),
}

impl CallMatcher {
    pub fn args(matchers: impl IntoIterator<Item = ArgMatcher>) -> Self {
        CallMatcher::Args(matchers.into_iter().collect())
    }

    /// Matcher for a parameterless call
    pub fn none() -> Self {
        CallMatcher::Args(Vec::new())
    }

    /// Number of parameters this matcher pins, if any
    pub fn arity(&self) -> Option<usize> {
        match self {
            CallMatcher::AnyArgs => None,
            CallMatcher::Args(matchers) => Some(matchers.len()),
        }
    }

    pub fn matches(&self, args: &[Value]) -> bool {
        match self {
            CallMatcher::AnyArgs => true,
            CallMatcher::Args(matchers) => {
                matchers.len() == args.len()
                    && matchers.iter().zip(args).all(|(m, a)| m.matches(a))
            }
        }
    }

    /// Identity used to decide whether a configuration replaces another
    pub fn describe(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for CallMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallMatcher::AnyArgs => write!(f, "(..)"),
            CallMatcher::Args(matchers) => {
                write!(f, "(")?;
                for (i, m) in matchers.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{m}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl From<Vec<ArgMatcher>> for CallMatcher {
    fn from(matchers: Vec<ArgMatcher>) -> Self {
        CallMatcher::Args(matchers)
    }
}

impl<const N: usize> From<[ArgMatcher; N]> for CallMatcher {
    fn from(matchers: [ArgMatcher; N]) -> Self {
        CallMatcher::Args(matchers.into_iter().collect())
    }
}
