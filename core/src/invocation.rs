use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::Value;

/// How a member was reached
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessKind {
    Call,
    Get,
    Set,
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessKind::Call => write!(f, "call"),
            AccessKind::Get => write!(f, "get"),
            AccessKind::Set => write!(f, "set"),
        }
    }
}

/// One observed interaction with a test double
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invocation {
    /// Position in the double's total order, starting at 1
    pub sequence: u64,
    pub member: String,
    pub access: AccessKind,
    pub args: Vec<Value>,
    pub at: DateTime<Utc>,
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} ", self.sequence)?;
        match self.access {
            AccessKind::Get => write!(f, "get {}", self.member),
            AccessKind::Set => match self.args.first() {
                Some(value) => write!(f, "set {} = {value}", self.member),
                None => write!(f, "set {}", self.member),
            },
            AccessKind::Call => {
                write!(f, "{}(", self.member)?;
                for (i, arg) in self.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

/// Append-only, totally ordered record of invocations
#[derive(Debug, Default, Clone)]
pub struct InvocationLog {
    entries: Vec<Invocation>,
}

impl InvocationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an invocation and return its sequence number
    pub fn record(&mut self, member: &str, access: AccessKind, args: Vec<Value>) -> u64 {
        let sequence = self.entries.len() as u64 + 1;
        self.entries.push(Invocation {
            sequence,
            member: member.to_string(),
            access,
            args,
            at: Utc::now(),
        });
        sequence
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Invocation> {
        self.entries.iter()
    }

    /// Invocations of one member through one accessor, in order
    pub fn of<'a>(&'a self, member: &'a str, access: AccessKind) -> impl Iterator<Item = &'a Invocation> + 'a {
        self.entries
            .iter()
            .filter(move |inv| inv.access == access && inv.member == member)
    }

    pub fn snapshot(&self) -> Vec<Invocation> {
        self.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_strictly_increasing() {
        let mut log = InvocationLog::new();
        assert!(log.is_empty());

        let first = log.record("FirstName", AccessKind::Set, vec![Value::from("Ni!")]);
        let second = log.record("FirstName", AccessKind::Get, Vec::new());
        let third = log.record("MutateFirstName", AccessKind::Call, vec![Value::from("wig")]);

        assert_eq!((first, second, third), (1, 2, 3));
        assert_eq!(log.len(), 3);
        assert!(log.iter().zip(log.iter().skip(1)).all(|(a, b)| a.at <= b.at));
    }

    #[test]
    fn test_filter_by_member_and_access() {
        let mut log = InvocationLog::new();
        log.record("FirstName", AccessKind::Set, vec![Value::from("a")]);
        log.record("FirstName", AccessKind::Get, Vec::new());
        log.record("FirstName", AccessKind::Set, vec![Value::from("b")]);

        let sets: Vec<_> = log.of("FirstName", AccessKind::Set).map(|i| i.sequence).collect();
        assert_eq!(sets, vec![1, 3]);
        assert_eq!(log.of("LastName", AccessKind::Set).count(), 0);
    }

    #[test]
    fn test_display() {
        let mut log = InvocationLog::new();
        log.record("Sum", AccessKind::Call, vec![Value::from(10), Value::from(20)]);
        log.record("FirstName", AccessKind::Set, vec![Value::from("Ni!")]);
        log.record("FirstName", AccessKind::Get, Vec::new());

        let rendered: Vec<String> = log.iter().map(ToString::to_string).collect();
        assert_eq!(
            rendered,
            vec!["#1 Sum(10, 20)", "#2 set FirstName = \"Ni!\"", "#3 get FirstName"]
        );
    }
}
