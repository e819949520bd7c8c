//! Scripted Mock Backend
//!
//! In-memory [`RemoteExec`] implementation for tests. Each submission is
//! assigned the next queued poll script; successive `invocation` calls walk
//! the script and the final state repeats, so a one-element script models a
//! stable answer and an empty script models an invocation that never reaches
//! a terminal state. No network, no processes, no sleeping.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::remote::{
    InvocationId, InvocationRecord, InvocationStatus, Parameters, PollState, RemoteExec,
};

/// A recorded `submit` call, for assertions
#[derive(Debug, Clone)]
pub struct Submission {
    pub target: String,
    pub document: String,
    pub commands: Vec<String>,
}

#[derive(Default)]
struct MockState {
    scripts: VecDeque<Vec<PollState>>,
    active: HashMap<InvocationId, VecDeque<PollState>>,
    submissions: Vec<Submission>,
    next_id: u64,
    submit_error: Option<String>,
    poll_error: Option<String>,
}

/// Scripted remote-execution backend for tests
#[derive(Default)]
pub struct MockRemote {
    state: Mutex<MockState>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a poll script for the next submission
    pub fn with_invocation(self, polls: Vec<PollState>) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .scripts
            .push_back(polls);
        self
    }

    /// Queue a submission that finishes immediately with the given stdout
    pub fn with_output(self, stdout: &str) -> Self {
        self.with_invocation(vec![finished(stdout)])
    }

    /// Make every `submit` call fail with the given reason
    pub fn with_submit_error(self, reason: &str) -> Self {
        self.state
            .lock()
            .expect("mock state poisoned")
            .submit_error = Some(reason.to_string());
        self
    }

    /// Make every `invocation` call fail with the given reason
    pub fn with_poll_error(self, reason: &str) -> Self {
        self.state.lock().expect("mock state poisoned").poll_error = Some(reason.to_string());
        self
    }

    /// All submissions recorded so far, in order
    pub fn submissions(&self) -> Vec<Submission> {
        self.state
            .lock()
            .expect("mock state poisoned")
            .submissions
            .clone()
    }
}

#[async_trait]
impl RemoteExec for MockRemote {
    async fn submit(
        &self,
        target: &str,
        document: &str,
        parameters: &Parameters,
    ) -> Result<InvocationId> {
        let mut state = self.state.lock().expect("mock state poisoned");

        if let Some(reason) = &state.submit_error {
            return Err(Error::SubmitFailed {
                target: target.to_string(),
                reason: reason.clone(),
            });
        }

        state.submissions.push(Submission {
            target: target.to_string(),
            document: document.to_string(),
            commands: parameters.get("commands").cloned().unwrap_or_default(),
        });

        state.next_id += 1;
        let id = InvocationId::new(format!("mock-{}", state.next_id));

        let script = state.scripts.pop_front().unwrap_or_else(|| vec![finished("")]);
        state.active.insert(id.clone(), script.into());

        Ok(id)
    }

    async fn invocation(&self, id: &InvocationId, _target: &str) -> Result<PollState> {
        let mut state = self.state.lock().expect("mock state poisoned");

        if let Some(reason) = &state.poll_error {
            return Err(Error::PollFailed {
                invocation: id.to_string(),
                reason: reason.clone(),
            });
        }

        let Some(script) = state.active.get_mut(id) else {
            return Ok(PollState::NotFound);
        };

        // Walk the script; the final state repeats, an empty script pends forever.
        if script.len() > 1 {
            Ok(script.pop_front().expect("non-empty script"))
        } else {
            Ok(script.front().cloned().unwrap_or(PollState::Pending))
        }
    }
}

/// A successful terminal poll state with the given stdout
pub fn finished(stdout: &str) -> PollState {
    finished_with(InvocationStatus::Success, 0, stdout)
}

/// A terminal poll state with explicit status and exit code
pub fn finished_with(status: InvocationStatus, exit_code: i32, stdout: &str) -> PollState {
    PollState::Finished(InvocationRecord {
        status,
        exit_code,
        stdout: stdout.to_string(),
    })
}
