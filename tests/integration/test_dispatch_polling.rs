//! Integration Tests for Dispatch over the Local Backend
//!
//! Drives the dispatcher against the local-process backend, so the full
//! submit / propagate / poll / terminal-state path runs with real processes.
//! The privilege-switch wrapper may or may not succeed on the test host;
//! these tests only assert facts that hold either way.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::watch;

use stepcheck::dispatch::{CommandDispatcher, DispatchOutcome, TIMEOUT_TEXT};
use stepcheck::remote::LocalProcessExec;

#[tokio::test]
async fn test_spawned_command_reaches_a_terminal_state() {
    let dispatcher = CommandDispatcher::new(Arc::new(LocalProcessExec::new()))
        .with_interval(Duration::from_millis(20));

    // Generous budget: whether the su wrapper runs the echo or fails outright,
    // the invocation terminates well within it.
    let outcome = dispatcher
        .execute("local", "echo wrapped", "nobody", 500)
        .await
        .expect("execute");

    assert!(!outcome.timed_out());
    match outcome {
        DispatchOutcome::Output(ref output) => assert_eq!(output, output.trim()),
        DispatchOutcome::TimedOut => unreachable!(),
    }
}

#[tokio::test]
async fn test_single_attempt_budget_times_out() {
    let dispatcher = CommandDispatcher::new(Arc::new(LocalProcessExec::new()))
        .with_interval(Duration::from_millis(20));

    // The first poll lands before the just-spawned process can possibly have
    // exited, so a one-attempt budget always exhausts.
    let outcome = dispatcher
        .execute("local", "sleep 10", "nobody", 1)
        .await
        .expect("execute");

    assert!(outcome.timed_out());
    assert_eq!(outcome.text(), TIMEOUT_TEXT);
}

#[tokio::test]
async fn test_cancellation_resolves_to_timeout() {
    let dispatcher = CommandDispatcher::new(Arc::new(LocalProcessExec::new()))
        .with_interval(Duration::from_secs(5));
    let (tx, rx) = watch::channel(false);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(30)).await;
        let _ = tx.send(true);
    });

    let started = Instant::now();
    let outcome = dispatcher
        .execute_cancellable("local", "sleep 10", "nobody", 1000, Some(rx))
        .await
        .expect("execute");

    assert!(outcome.timed_out());
    assert!(started.elapsed() < Duration::from_secs(5));
}
