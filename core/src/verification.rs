use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{invocation::AccessKind, times::Times};

/// Structured details of a failed verification, ready for a test reporter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationFailure {
    pub contract: String,
    pub member: String,
    pub access: AccessKind,
    /// Description of the argument matcher that was checked
    pub matcher: String,
    pub expected: Times,
    pub actual: usize,
    /// Every recorded invocation of the member through the same accessor
    pub recorded: Vec<String>,
}

impl VerificationFailure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn expectation(&self) -> String {
        match self.access {
            AccessKind::Call => format!("{}.{}{}", self.contract, self.member, self.matcher),
            AccessKind::Get => format!("get {}.{}", self.contract, self.member),
            AccessKind::Set => format!("set {}.{} = {}", self.contract, self.member, self.matcher),
        }
    }
}

impl fmt::Display for VerificationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let noun = if self.actual == 1 { "time" } else { "times" };
        write!(
            f,
            "Expected {} {}, but it was performed {} {noun}",
            self.expectation(),
            self.expected,
            self.actual
        )?;
        if self.recorded.is_empty() {
            write!(f, "\nNo recorded invocations of {}", self.member)
        } else {
            write!(f, "\nRecorded invocations:")?;
            for line in &self.recorded {
                write!(f, "\n  {line}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failure() -> VerificationFailure {
        VerificationFailure {
            contract: "PropertyManager".to_string(),
            member: "MutateFirstName".to_string(),
            access: AccessKind::Call,
            matcher: "(\"wig\")".to_string(),
            expected: Times::exactly(2),
            actual: 1,
            recorded: vec!["#1 MutateFirstName(\"wig\")".to_string()],
        }
    }

    #[test]
    fn test_display_report() {
        let report = failure().to_string();
        assert_eq!(
            report,
            "Expected PropertyManager.MutateFirstName(\"wig\") exactly 2 times, but it was performed 1 time\n\
             Recorded invocations:\n  #1 MutateFirstName(\"wig\")"
        );
    }

    #[test]
    fn test_display_without_invocations() {
        let mut failure = failure();
        failure.access = AccessKind::Set;
        failure.member = "FirstName".to_string();
        failure.matcher = "\"Knights Of Ni!\"".to_string();
        failure.expected = Times::at_least_once();
        failure.actual = 0;
        failure.recorded.clear();

        assert_eq!(
            failure.to_string(),
            "Expected set PropertyManager.FirstName = \"Knights Of Ni!\" at least 1 time, but it was performed 0 times\n\
             No recorded invocations of FirstName"
        );
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&failure().to_json().unwrap()).unwrap();
        assert_eq!(json["member"], "MutateFirstName");
        assert_eq!(json["expected"]["kind"], "exactly");
        assert_eq!(json["expected"]["count"], 2);
        assert_eq!(json["actual"], 1);
        assert_eq!(json["access"], "call");
    }
}
