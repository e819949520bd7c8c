//! Report Rendering
//!
//! Turns accumulated step results into the operator-facing text report:
//! a header naming the target and user, one block per step with its checks,
//! and a closing summary line. Human-readable only; the runner never decides
//! an overall verdict and neither does the process exit code.

use std::fmt::Write as _;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::models::StepResult;

const DIVIDER: &str =
    "--------------------------------------------------------------------------------";

/// Run metadata shown in the report header
#[derive(Debug, Clone)]
pub struct ReportMeta {
    pub target: String,
    pub user: String,
    pub started: DateTime<Local>,
}

impl ReportMeta {
    /// Capture metadata at the start of a run
    pub fn begin(target: &str, user: &str) -> Self {
        ReportMeta {
            target: target.to_string(),
            user: user.to_string(),
            started: Local::now(),
        }
    }
}

/// Aggregate pass/fail counts, for display only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
}

impl RunSummary {
    pub fn from_results(results: &[StepResult]) -> Self {
        let mut summary = RunSummary::default();
        for step in results {
            for result in &step.results {
                summary.total += 1;
                if result.passed() {
                    summary.passed += 1;
                } else {
                    summary.failed += 1;
                }
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Render the step-by-step body of the report
pub fn render(results: &[StepResult]) -> String {
    let mut out = String::new();
    for step in results {
        let _ = writeln!(out, "Step {}: {}", step.ordinal, step.title);
        for result in &step.results {
            let _ = writeln!(out, "  - {}: {}", result.name, result.status);
            let _ = writeln!(out, "    Message: {}", result.message);
            let _ = writeln!(out, "    Output: {}", result.output);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Render the complete report: header, body, summary
pub fn render_report(meta: &ReportMeta, results: &[StepResult], elapsed: Duration) -> String {
    let summary = RunSummary::from_results(results);

    let mut out = String::new();
    let _ = writeln!(out, "{}", DIVIDER);
    let _ = writeln!(out, "stepcheck validation report");
    let _ = writeln!(out, "Target: {}", meta.target);
    let _ = writeln!(out, "User: {}", meta.user);
    let _ = writeln!(out, "Started: {}", meta.started.format("%Y-%m-%d %H:%M:%S"));
    let _ = writeln!(out, "{}", DIVIDER);
    out.push('\n');

    out.push_str(&render(results));

    let _ = writeln!(out, "{}", DIVIDER);
    let _ = writeln!(
        out,
        "{} passed, {} failed, {} total ({:.1}s)",
        summary.passed,
        summary.failed,
        summary.total,
        elapsed.as_secs_f64()
    );
    out
}
