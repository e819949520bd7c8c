//! Validation Configuration Model
//!
//! The validated, runtime form of a validator file: an ordered list of steps,
//! each holding an ordered list of checks. Built by the config loader; never
//! mutated after load. The raw serde document lives in [`crate::config`].

use regex::Regex;

/// Default per-check timeout in seconds (one polling attempt per second)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// A validator file after load-time validation
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Ordered validation steps
    pub steps: Vec<Step>,
}

impl ValidationConfig {
    /// Total number of checks across all steps
    pub fn check_count(&self) -> usize {
        self.steps.iter().map(|s| s.checks.len()).sum()
    }
}

/// A named, ordered group of related checks
#[derive(Debug, Clone)]
pub struct Step {
    /// Step ordinal as declared in the validator file
    pub ordinal: u32,

    /// Display title
    pub title: String,

    /// Ordered checks within this step
    pub checks: Vec<Check>,
}

/// One unit of validation: a command plus an expectation about its output
#[derive(Debug, Clone)]
pub struct Check {
    /// Check name shown in the report
    pub name: String,

    /// Shell command executed on the target (before the privilege-switch wrap)
    pub command: String,

    /// Polling attempt budget in seconds
    pub timeout: u64,

    /// What the trimmed output must look like for this check to pass
    pub expectation: Expectation,

    /// Message reported when the check passes
    pub success_message: String,

    /// Message reported when the check fails
    pub failure_message: String,
}

/// Expectation against the captured, trimmed command output
///
/// A check declares at most one of the two comparison kinds. `None` is the
/// loaded form of a check that declared neither; it always fails without a
/// comparison being performed.
#[derive(Debug, Clone)]
pub enum Expectation {
    /// Exact string equality, case-sensitive
    Literal(String),

    /// Unanchored regular expression search
    Pattern(Regex),

    /// No expectation declared; unconditional failure
    None,
}

impl Expectation {
    /// Evaluate this expectation against already-trimmed output
    pub fn matches(&self, output: &str) -> bool {
        match self {
            Expectation::Literal(expected) => output == expected,
            Expectation::Pattern(pattern) => pattern.is_match(output),
            Expectation::None => false,
        }
    }

    /// Short kind label used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Expectation::Literal(_) => "literal",
            Expectation::Pattern(_) => "pattern",
            Expectation::None => "none",
        }
    }
}
