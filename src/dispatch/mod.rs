//! Command Dispatcher
//!
//! Submits one shell command at a time to the remote-execution API, wrapped
//! so it runs as the requested local user, then polls once per second until
//! a terminal state appears or the per-check attempt budget runs out. A
//! timeout is a normal, representable outcome whose output text is the
//! literal `"timeout"`; downstream comparison treats it like any other
//! captured output. Progress lines go to stdout for the operator.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, trace};

use crate::error::Result;
use crate::remote::{shell_parameters, PollState, RemoteExec, SHELL_DOCUMENT};

pub mod poll;

pub use poll::Poller;

/// Pause between polling attempts; couples attempts to seconds 1:1
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Output text reported when no terminal state arrives within the budget
pub const TIMEOUT_TEXT: &str = "timeout";

/// What a dispatched command resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Terminal state observed; trimmed captured stdout
    Output(String),

    /// Attempt budget exhausted before any terminal state
    TimedOut,
}

impl DispatchOutcome {
    /// The text downstream comparison runs against
    pub fn text(&self) -> &str {
        match self {
            DispatchOutcome::Output(output) => output,
            DispatchOutcome::TimedOut => TIMEOUT_TEXT,
        }
    }

    pub fn timed_out(&self) -> bool {
        matches!(self, DispatchOutcome::TimedOut)
    }
}

/// Submits commands and polls them to completion
pub struct CommandDispatcher {
    backend: Arc<dyn RemoteExec>,
    interval: Duration,
}

impl CommandDispatcher {
    /// Create a dispatcher over an explicitly constructed backend
    pub fn new(backend: Arc<dyn RemoteExec>) -> Self {
        CommandDispatcher {
            backend,
            interval: POLL_INTERVAL,
        }
    }

    /// Override the polling cadence (tests run in milliseconds)
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Execute `command` on `target` as `user`, polling up to `timeout_secs` attempts
    pub async fn execute(
        &self,
        target: &str,
        command: &str,
        user: &str,
        timeout_secs: u64,
    ) -> Result<DispatchOutcome> {
        self.execute_cancellable(target, command, user, timeout_secs, None)
            .await
    }

    /// Like [`execute`](Self::execute), resolving early with the timeout
    /// outcome if the cancellation signal fires mid-poll
    pub async fn execute_cancellable(
        &self,
        target: &str,
        command: &str,
        user: &str,
        timeout_secs: u64,
        cancel: Option<watch::Receiver<bool>>,
    ) -> Result<DispatchOutcome> {
        let full_cmd = format!("su - {} -c \"{}\"", user, command);

        println!(
            "\n[stepcheck] Running on {} as {}:\n> {}\n",
            target, user, full_cmd
        );

        let parameters = shell_parameters(&full_cmd);
        let invocation_id = self
            .backend
            .submit(target, SHELL_DOCUMENT, &parameters)
            .await?;
        debug!(
            "Submitted invocation {} to {} ({} attempt budget)",
            invocation_id, target, timeout_secs
        );

        let poller = Poller::new(self.interval, timeout_secs);
        let finished = poller
            .run(cancel, || {
                let backend = Arc::clone(&self.backend);
                let id = invocation_id.clone();
                let target = target.to_string();
                async move {
                    match backend.invocation(&id, &target).await? {
                        PollState::Finished(record) => Ok(Some(record)),
                        PollState::Pending => Ok(None),
                        PollState::NotFound => {
                            // Not yet propagated in the API; retried, never surfaced.
                            trace!("Invocation {} not visible yet", id);
                            Ok(None)
                        }
                    }
                }
            })
            .await?;

        match finished {
            Some(record) => {
                println!("[stepcheck] Command Status: {}", record.status);
                println!("[stepcheck] Exit Code: {}", record.exit_code);
                Ok(DispatchOutcome::Output(record.stdout.trim().to_string()))
            }
            None => {
                println!("[stepcheck] Command timed out");
                Ok(DispatchOutcome::TimedOut)
            }
        }
    }
}
