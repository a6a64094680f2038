//! Core-count expectations and their evaluation against a resolved topology.
//!
//! Every expectation is evaluated, in input order, even after an earlier one
//! has failed, so a single run reports all mismatches at once.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{CheckerError, Result};
use crate::topology::CpuTopology;

/// Which core count an expectation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CoreKind {
    Physical,
    Logical,
}

impl CoreKind {
    /// Select the matching count from a topology.
    pub fn actual_count(self, topology: &CpuTopology) -> u32 {
        match self {
            CoreKind::Physical => topology.physical_cores(),
            CoreKind::Logical => topology.logical_cores(),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoreKind::Physical => "Physical",
            CoreKind::Logical => "Logical",
        }
    }
}

impl fmt::Display for CoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CoreKind {
    type Err = CheckerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "physical" | "p" => Ok(CoreKind::Physical),
            "logical" | "l" => Ok(CoreKind::Logical),
            other => Err(CheckerError::InvalidExpectation(format!(
                "unknown core kind '{}', expected 'physical' or 'logical'",
                other
            ))),
        }
    }
}

/// A request that the host has exactly `expected_count` cores of `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CoreExpectation {
    pub kind: CoreKind,
    pub expected_count: u32,
}

impl CoreExpectation {
    pub fn new(kind: CoreKind, expected_count: u32) -> Self {
        Self {
            kind,
            expected_count,
        }
    }

    /// Build an expectation from a textual kind, rejecting unknown kinds.
    pub fn parse(kind: &str, expected_count: u32) -> Result<Self> {
        Ok(Self::new(kind.parse()?, expected_count))
    }

    pub fn check(&self, topology: &CpuTopology) -> Verdict {
        let actual_count = self.kind.actual_count(topology);
        Verdict {
            kind: self.kind,
            expected_count: self.expected_count,
            actual_count,
            matched: actual_count == self.expected_count,
        }
    }
}

/// Result of checking one expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub kind: CoreKind,
    pub expected_count: u32,
    pub actual_count: u32,
    pub matched: bool,
}

/// Evaluate every expectation against `topology`, preserving input order.
pub fn evaluate(topology: &CpuTopology, expectations: &[CoreExpectation]) -> Vec<Verdict> {
    expectations.iter().map(|e| e.check(topology)).collect()
}

/// Aggregate result of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// No expectations were supplied.
    NoCheck,
    Passed,
    Failed,
}

impl Outcome {
    pub fn from_verdicts(verdicts: &[Verdict]) -> Self {
        if verdicts.is_empty() {
            Outcome::NoCheck
        } else if verdicts.iter().all(|v| v.matched) {
            Outcome::Passed
        } else {
            Outcome::Failed
        }
    }

    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::NoCheck | Outcome::Passed => 0,
            Outcome::Failed => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Outcome::NoCheck => "no-check",
            Outcome::Passed => "passed",
            Outcome::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop() -> CpuTopology {
        CpuTopology::new(
            "GenuineIntel",
            "Intel(R) Core(TM) i5-6300U CPU @ 2.40GHz",
            2,
            4,
        )
        .unwrap()
    }

    #[test]
    fn test_physical_match() {
        let verdicts = evaluate(&laptop(), &[CoreExpectation::new(CoreKind::Physical, 2)]);
        assert_eq!(verdicts.len(), 1);
        assert!(verdicts[0].matched);
        assert_eq!(verdicts[0].actual_count, 2);
        assert_eq!(Outcome::from_verdicts(&verdicts).exit_code(), 0);
    }

    #[test]
    fn test_logical_mismatch() {
        let verdicts = evaluate(&laptop(), &[CoreExpectation::new(CoreKind::Logical, 8)]);
        assert!(!verdicts[0].matched);
        assert_eq!(verdicts[0].expected_count, 8);
        assert_eq!(verdicts[0].actual_count, 4);
        assert_eq!(Outcome::from_verdicts(&verdicts), Outcome::Failed);
        assert_eq!(Outcome::from_verdicts(&verdicts).exit_code(), 1);
    }

    #[test]
    fn test_no_expectations_is_no_check() {
        let verdicts = evaluate(&laptop(), &[]);
        assert!(verdicts.is_empty());
        let outcome = Outcome::from_verdicts(&verdicts);
        assert_eq!(outcome, Outcome::NoCheck);
        assert_ne!(outcome, Outcome::Passed);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_does_not_short_circuit() {
        let expectations = [
            CoreExpectation::new(CoreKind::Physical, 16),
            CoreExpectation::new(CoreKind::Logical, 4),
        ];
        let verdicts = evaluate(&laptop(), &expectations);

        assert_eq!(verdicts.len(), 2);
        assert_eq!(verdicts[0].kind, CoreKind::Physical);
        assert!(!verdicts[0].matched);
        assert_eq!(verdicts[1].kind, CoreKind::Logical);
        assert!(verdicts[1].matched);
        assert_eq!(Outcome::from_verdicts(&verdicts), Outcome::Failed);
    }

    #[test]
    fn test_exact_equality_only() {
        // More cores than expected is still a mismatch
        let verdicts = evaluate(&laptop(), &[CoreExpectation::new(CoreKind::Logical, 3)]);
        assert!(!verdicts[0].matched);
    }

    #[test]
    fn test_all_matching_passes() {
        let expectations = [
            CoreExpectation::new(CoreKind::Physical, 2),
            CoreExpectation::new(CoreKind::Logical, 4),
        ];
        let verdicts = evaluate(&laptop(), &expectations);
        assert_eq!(Outcome::from_verdicts(&verdicts), Outcome::Passed);
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("physical".parse::<CoreKind>().unwrap(), CoreKind::Physical);
        assert_eq!("LOGICAL".parse::<CoreKind>().unwrap(), CoreKind::Logical);
        assert_eq!("p".parse::<CoreKind>().unwrap(), CoreKind::Physical);
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let err = CoreExpectation::parse("hyperthreads", 4).unwrap_err();
        assert!(matches!(err, CheckerError::InvalidExpectation(_)));
        assert!(err.to_string().contains("hyperthreads"));
    }

    #[test]
    fn test_outcome_serializes_kebab_case() {
        let json = serde_json::to_string(&Outcome::NoCheck).unwrap();
        assert_eq!(json, "\"no-check\"");
    }
}
