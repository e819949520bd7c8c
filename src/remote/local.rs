//! Local Process Backend
//!
//! Runs submitted commands on the local host through the same submit/poll
//! shape the managed API exposes. This is the binary's default collaborator:
//! it keeps the tool usable with no vendor SDK linked, and it exercises the
//! full dispatcher path including the propagation window (a spawned command
//! is visible as Pending until its process exits).

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::Result;
use crate::remote::{
    InvocationId, InvocationRecord, InvocationStatus, Parameters, PollState, RemoteExec,
};

/// Remote-execution backend that spawns commands locally
#[derive(Default)]
pub struct LocalProcessExec {
    invocations: Arc<Mutex<HashMap<InvocationId, PollState>>>,
}

impl LocalProcessExec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run the submitted script to completion and record the outcome
    async fn run_script(script: String) -> InvocationRecord {
        match Command::new("sh").arg("-c").arg(&script).output().await {
            Ok(output) => {
                let status = if output.status.success() {
                    InvocationStatus::Success
                } else {
                    InvocationStatus::Failed
                };
                InvocationRecord {
                    status,
                    exit_code: output.status.code().unwrap_or(-1),
                    stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                }
            }
            Err(e) => {
                warn!("Failed to spawn local command: {}", e);
                InvocationRecord {
                    status: InvocationStatus::Failed,
                    exit_code: -1,
                    stdout: String::new(),
                }
            }
        }
    }
}

#[async_trait]
impl RemoteExec for LocalProcessExec {
    async fn submit(
        &self,
        target: &str,
        document: &str,
        parameters: &Parameters,
    ) -> Result<InvocationId> {
        let script = parameters
            .get("commands")
            .map(|commands| commands.join("\n"))
            .unwrap_or_default();

        let id = InvocationId::new(Uuid::new_v4().to_string());
        debug!(
            "Local submit for target '{}' (document '{}') as invocation {}",
            target, document, id
        );

        self.invocations
            .lock()
            .expect("invocation map poisoned")
            .insert(id.clone(), PollState::Pending);

        let invocations = Arc::clone(&self.invocations);
        let task_id = id.clone();
        tokio::spawn(async move {
            let record = Self::run_script(script).await;
            invocations
                .lock()
                .expect("invocation map poisoned")
                .insert(task_id, PollState::Finished(record));
        });

        Ok(id)
    }

    async fn invocation(&self, id: &InvocationId, _target: &str) -> Result<PollState> {
        let state = self
            .invocations
            .lock()
            .expect("invocation map poisoned")
            .get(id)
            .cloned();
        Ok(state.unwrap_or(PollState::NotFound))
    }
}
