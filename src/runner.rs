//! Validation Runner
//!
//! Walks the loaded configuration in order, one check at a time: dispatch the
//! check's command, trim the captured output, evaluate the expectation, and
//! record a pass/fail result. Checks never retry beyond the dispatcher's own
//! polling and a dispatcher timeout is just failing output, not an error.
//! Overall pass/fail aggregation is left to the presentation layer.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::ConfigLoader;
use crate::dispatch::CommandDispatcher;
use crate::error::Result;
use crate::models::{Check, CheckResult, CheckStatus, StepResult, ValidationConfig};
use crate::remote::RemoteExec;

/// Runs every step and check of a validation configuration sequentially
pub struct ValidationRunner {
    dispatcher: CommandDispatcher,
}

impl ValidationRunner {
    /// Create a runner over an explicitly constructed backend
    pub fn new(backend: Arc<dyn RemoteExec>) -> Self {
        ValidationRunner {
            dispatcher: CommandDispatcher::new(backend),
        }
    }

    /// Create a runner over a pre-configured dispatcher
    pub fn with_dispatcher(dispatcher: CommandDispatcher) -> Self {
        ValidationRunner { dispatcher }
    }

    /// Load a validator file and run it
    ///
    /// Configuration errors are fatal and produce no partial results.
    pub async fn run_file(
        &self,
        config_path: &Path,
        target: &str,
        user: &str,
    ) -> Result<Vec<StepResult>> {
        let config = ConfigLoader::load(config_path)?;
        self.run(&config, target, user).await
    }

    /// Run every check of every step, in declaration order
    pub async fn run(
        &self,
        config: &ValidationConfig,
        target: &str,
        user: &str,
    ) -> Result<Vec<StepResult>> {
        let mut results = Vec::with_capacity(config.steps.len());

        for step in &config.steps {
            info!("Step {}: {}", step.ordinal, step.title);

            let mut step_result = StepResult {
                ordinal: step.ordinal,
                title: step.title.clone(),
                results: Vec::with_capacity(step.checks.len()),
            };

            for check in &step.checks {
                let result = self.run_check(check, target, user).await?;
                step_result.results.push(result);
            }

            results.push(step_result);
        }

        Ok(results)
    }

    async fn run_check(&self, check: &Check, target: &str, user: &str) -> Result<CheckResult> {
        let outcome = self
            .dispatcher
            .execute(target, &check.command, user, check.timeout)
            .await?;

        let output = outcome.text().trim().to_string();
        let passed = check.expectation.matches(&output);
        debug!(
            "Check '{}' ({} expectation) -> {}",
            check.name,
            check.expectation.kind(),
            if passed { "PASS" } else { "FAIL" }
        );

        let (status, message) = if passed {
            (CheckStatus::Pass, check.success_message.clone())
        } else {
            (CheckStatus::Fail, check.failure_message.clone())
        };

        Ok(CheckResult {
            name: check.name.clone(),
            status,
            message,
            output,
        })
    }
}
