use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected number of matching invocations
///
/// # Examples
///
/// ```rust
/// use standin_core::times::Times;
///
/// assert!(Times::once().matches(1));
/// assert!(!Times::once().matches(2));
/// assert!(Times::at_least_once().matches(7));
/// assert_eq!(Times::exactly(2).to_string(), "exactly 2 times");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Times {
    Exactly { count: usize },
    AtLeast { count: usize },
    AtMost { count: usize },
    /// Inclusive range
    Between { min: usize, max: usize },
}

impl Times {
    pub fn exactly(count: usize) -> Self {
        Times::Exactly { count }
    }

    pub fn once() -> Self {
        Times::exactly(1)
    }

    pub fn never() -> Self {
        Times::exactly(0)
    }

    pub fn at_least(count: usize) -> Self {
        Times::AtLeast { count }
    }

    pub fn at_least_once() -> Self {
        Times::at_least(1)
    }

    pub fn at_most(count: usize) -> Self {
        Times::AtMost { count }
    }

    pub fn between(min: usize, max: usize) -> Self {
        Times::Between { min, max }
    }

    pub fn matches(&self, actual: usize) -> bool {
        match *self {
            Times::Exactly { count } => actual == count,
            Times::AtLeast { count } => actual >= count,
            Times::AtMost { count } => actual <= count,
            Times::Between { min, max } => (min..=max).contains(&actual),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "time"
    } else {
        "times"
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Times::Exactly { count: 0 } => write!(f, "never"),
            Times::Exactly { count } => write!(f, "exactly {count} {}", plural(count)),
            Times::AtLeast { count } => write!(f, "at least {count} {}", plural(count)),
            Times::AtMost { count } => write!(f, "at most {count} {}", plural(count)),
            Times::Between { min, max } => write!(f, "between {min} and {max} times"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches() {
        assert!(Times::never().matches(0));
        assert!(!Times::never().matches(1));
        assert!(Times::at_most(2).matches(0));
        assert!(!Times::at_most(2).matches(3));
        assert!(Times::between(1, 3).matches(3));
        assert!(!Times::between(1, 3).matches(0));
        assert!(!Times::at_least(2).matches(1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Times::never().to_string(), "never");
        assert_eq!(Times::once().to_string(), "exactly 1 time");
        assert_eq!(Times::at_least_once().to_string(), "at least 1 time");
        assert_eq!(Times::between(2, 4).to_string(), "between 2 and 4 times");
    }
}
