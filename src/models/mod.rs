//! Data structures for stepcheck
//!
//! Contains the validated runtime configuration model (steps, checks,
//! expectations) and the immutable result records produced by a run.

pub mod config;
pub mod report;

pub use config::{Check, Expectation, Step, ValidationConfig, DEFAULT_TIMEOUT_SECS};
pub use report::{CheckResult, CheckStatus, StepResult};
