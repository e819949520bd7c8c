//! Remote Execution Boundary
//!
//! The dispatcher talks to the managed remote-execution API through the
//! [`RemoteExec`] trait so the transport stays swappable: the binary wires in
//! [`LocalProcessExec`], tests use [`MockRemote`], and a vendor-backed client
//! can slot in without touching the dispatcher or runner.

use std::collections::HashMap;
use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

pub mod local;
pub mod mock;

pub use local::LocalProcessExec;
pub use mock::MockRemote;

/// Document name for plain shell execution, the only document stepcheck uses
pub const SHELL_DOCUMENT: &str = "RunShellScript";

/// Parameters map for a command submission
///
/// The dispatcher populates the `"commands"` key with the command list, the
/// same shape the managed API's shell document expects.
pub type Parameters = HashMap<String, Vec<String>>;

/// Correlation identifier for a submitted invocation
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InvocationId(String);

impl InvocationId {
    pub fn new(id: impl Into<String>) -> Self {
        InvocationId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Terminal invocation states reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    Success,
    Failed,
    Cancelled,
    TimedOut,
}

impl fmt::Display for InvocationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvocationStatus::Success => write!(f, "Success"),
            InvocationStatus::Failed => write!(f, "Failed"),
            InvocationStatus::Cancelled => write!(f, "Cancelled"),
            InvocationStatus::TimedOut => write!(f, "TimedOut"),
        }
    }
}

/// A finished invocation as reported by the API
#[derive(Debug, Clone)]
pub struct InvocationRecord {
    /// Terminal status
    pub status: InvocationStatus,

    /// Process exit code, -1 when unknown
    pub exit_code: i32,

    /// Captured standard output, untrimmed
    pub stdout: String,
}

/// One poll observation for a submitted invocation
#[derive(Debug, Clone)]
pub enum PollState {
    /// The invocation record has not propagated yet; transient, retried
    NotFound,

    /// The invocation exists but has not reached a terminal state
    Pending,

    /// The invocation finished
    Finished(InvocationRecord),
}

/// Remote command execution API
///
/// Submit-then-poll, matching the managed systems-manager shape: `submit`
/// returns a correlation id, `invocation` reports the current state of that
/// id on the given target. Implementations must treat a not-yet-propagated
/// invocation as [`PollState::NotFound`] rather than an error; everything
/// else that goes wrong on the wire is an error and aborts the run.
#[async_trait]
pub trait RemoteExec: Send + Sync {
    /// Submit a command document for asynchronous execution on `target`
    async fn submit(
        &self,
        target: &str,
        document: &str,
        parameters: &Parameters,
    ) -> Result<InvocationId>;

    /// Report the current state of a submitted invocation
    async fn invocation(&self, id: &InvocationId, target: &str) -> Result<PollState>;
}

/// Build the parameters map for a single shell command
pub fn shell_parameters(command: &str) -> Parameters {
    let mut parameters = Parameters::new();
    parameters.insert("commands".to_string(), vec![command.to_string()]);
    parameters
}
