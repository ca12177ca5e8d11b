//! Case outcomes and run reports

use crate::error::{Error, ErrorKind};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a test case failed
#[derive(Error, Debug)]
pub enum CaseFailure {
    /// Framework output has a different shape than the oracle's
    #[error("output shape {got:?} differs from expected {expected:?}")]
    ShapeMismatch {
        /// Oracle shape
        expected: Vec<usize>,
        /// Framework shape
        got: Vec<usize>,
    },

    /// First element where framework and oracle disagree
    #[error("value mismatch at flat index {index}: got {got}, expected {expected}")]
    ValueMismatch {
        /// Row-major index of the element
        index: usize,
        /// Framework value
        got: bool,
        /// Oracle value
        expected: bool,
    },

    /// A call that must fail with a type error succeeded
    #[error("{call}: expected a type error, but the call succeeded")]
    MissingTypeError {
        /// Description of the call
        call: String,
    },

    /// A call failed, but not with a type error
    #[error("{call}: expected a type error, got {kind:?} error: {source}")]
    WrongErrorKind {
        /// Description of the call
        call: String,
        /// Category of the actual error
        kind: ErrorKind,
        /// The actual error
        source: Error,
    },

    /// A call raised a type error where none is allowed
    #[error("{call}: unexpected type error: {source}")]
    UnexpectedTypeError {
        /// Description of the call
        call: String,
        /// The raised error
        source: Error,
    },

    /// Output variable name lacks the requested name
    #[error("output name '{got}' does not contain '{expected}'")]
    NameMismatch {
        /// Requested name
        expected: String,
        /// Actual variable name
        got: String,
    },

    /// Any other framework error
    #[error(transparent)]
    Framework(#[from] Error),
}

/// Result of one test case
#[derive(Debug)]
pub enum CaseOutcome {
    /// The case passed
    Passed,
    /// The case failed
    Failed(CaseFailure),
}

impl CaseOutcome {
    /// True if the case passed
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}

impl From<Result<(), CaseFailure>> for CaseOutcome {
    fn from(result: Result<(), CaseFailure>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(failure) => Self::Failed(failure),
        }
    }
}

/// Outcome of one case within a group
#[derive(Debug)]
pub struct CaseReport {
    /// Case name (e.g. `test_output`)
    pub case: &'static str,
    /// Pass or failure
    pub outcome: CaseOutcome,
    /// Wall time of the case
    pub elapsed: Duration,
}

/// Outcomes of every case of one group
#[derive(Debug)]
pub struct GroupReport {
    /// Group name (e.g. `less_than_int32`)
    pub name: String,
    /// Case reports in execution order
    pub cases: Vec<CaseReport>,
}

impl GroupReport {
    /// Number of passed cases
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.outcome.is_passed()).count()
    }

    /// Number of failed cases
    pub fn failed(&self) -> usize {
        self.cases.len() - self.passed()
    }

    /// True if every case passed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Failed cases with their reasons
    pub fn failures(&self) -> impl Iterator<Item = (&'static str, &CaseFailure)> {
        self.cases.iter().filter_map(|c| match &c.outcome {
            CaseOutcome::Failed(f) => Some((c.case, f)),
            CaseOutcome::Passed => None,
        })
    }

    /// Total wall time of the group
    pub fn elapsed(&self) -> Duration {
        self.cases.iter().map(|c| c.elapsed).sum()
    }
}

impl fmt::Display for GroupReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} passed, {} failed ({:.2?})",
            self.name,
            self.passed(),
            self.failed(),
            self.elapsed()
        )?;
        for (case, failure) in self.failures() {
            write!(f, "\n  {case}: {failure}")?;
        }
        Ok(())
    }
}

/// Reports of a whole run
#[derive(Debug)]
pub struct SuiteReport {
    /// Fixture seed used for the run
    pub seed: u64,
    /// Group reports in registration order
    pub groups: Vec<GroupReport>,
}

impl SuiteReport {
    /// Number of passed cases across all groups
    pub fn passed(&self) -> usize {
        self.groups.iter().map(GroupReport::passed).sum()
    }

    /// Number of failed cases across all groups
    pub fn failed(&self) -> usize {
        self.groups.iter().map(GroupReport::failed).sum()
    }

    /// True if every case of every group passed
    pub fn is_success(&self) -> bool {
        self.groups.iter().all(GroupReport::is_success)
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} groups, {} cases passed, {} failed (seed {})",
            self.groups.len(),
            self.passed(),
            self.failed(),
            self.seed
        )?;
        for group in self.groups.iter().filter(|g| !g.is_success()) {
            writeln!(f, "{group}")?;
        }
        Ok(())
    }
}
