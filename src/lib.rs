//! stepcheck - remote step validation runner
//!
//! Drives shell commands on a remote target through a managed
//! remote-execution API, compares the captured output of each command
//! against declarative expectations loaded from a validator file, and
//! produces a grouped pass/fail report.
//!
//! ## Module Organization
//!
//! - [`config`] - Validator file loading and structural validation
//! - [`models`] - Data structures (ValidationConfig, Check, CheckResult)
//! - [`dispatch`] - Command submission and the fixed-cadence poll loop
//! - [`remote`] - The remote-execution trait boundary and its backends
//! - [`runner`] - Sequential step/check execution
//! - [`report`] - Text report rendering and summary counts
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use stepcheck::remote::LocalProcessExec;
//! use stepcheck::ValidationRunner;
//!
//! # async fn run() -> stepcheck::Result<()> {
//! let runner = ValidationRunner::new(Arc::new(LocalProcessExec::new()));
//! let results = runner
//!     .run_file(Path::new("validator.yml"), "i-0a1b2c3d", "app")
//!     .await?;
//! println!("{}", stepcheck::report::render(&results));
//! # Ok(())
//! # }
//! ```
//!
//! ## Execution Model
//!
//! Fully sequential: one check at a time, each blocking on the dispatcher's
//! once-per-second poll loop until a terminal state appears or the check's
//! attempt budget runs out. A timed-out check is a FAIL, never an error;
//! configuration and transport failures are fatal and abort the run.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod remote;
pub mod report;
pub mod runner;

// Re-exports for core functionality
pub use config::ConfigLoader;
pub use dispatch::{CommandDispatcher, DispatchOutcome};
pub use error::{Error, Result};
pub use models::{
    Check, CheckResult, CheckStatus, Expectation, Step, StepResult, ValidationConfig,
};
pub use remote::RemoteExec;
pub use runner::ValidationRunner;

// Version information
/// The current version of stepcheck from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// The application description from Cargo.toml
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
