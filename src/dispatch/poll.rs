//! Fixed-Cadence Polling
//!
//! Reusable "poll until the probe answers or the attempt budget runs out"
//! loop. One probe per attempt, a fixed pause between attempts, and an
//! optional cancellation signal that resolves the wait early. The dispatcher
//! drives it with a one-second cadence so attempts and seconds stay coupled
//! 1:1; tests drive it in milliseconds.

use std::future::Future;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::sleep;

use crate::error::Result;

/// Poll loop with a fixed pause and a bounded attempt budget
#[derive(Debug, Clone, Copy)]
pub struct Poller {
    interval: Duration,
    max_attempts: u64,
}

impl Poller {
    /// Create a poller; the attempt budget is clamped to at least one
    pub fn new(interval: Duration, max_attempts: u64) -> Self {
        Poller {
            interval,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Run `probe` once per attempt until it yields a value
    ///
    /// Returns `Ok(Some(value))` on the first attempt where the probe yields
    /// one, `Ok(None)` when the budget is exhausted or the cancellation
    /// signal fires between attempts. Probe errors propagate immediately.
    pub async fn run<T, F, Fut>(
        &self,
        mut cancel: Option<watch::Receiver<bool>>,
        mut probe: F,
    ) -> Result<Option<T>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<Option<T>>>,
    {
        if let Some(rx) = &cancel {
            if *rx.borrow() {
                return Ok(None);
            }
        }

        for attempt in 1..=self.max_attempts {
            if let Some(value) = probe().await? {
                return Ok(Some(value));
            }
            if attempt == self.max_attempts {
                break;
            }
            if self.pause(cancel.as_mut()).await {
                return Ok(None);
            }
        }

        Ok(None)
    }

    /// Wait one interval; true means the cancellation signal fired
    async fn pause(&self, cancel: Option<&mut watch::Receiver<bool>>) -> bool {
        let Some(rx) = cancel else {
            sleep(self.interval).await;
            return false;
        };

        tokio::select! {
            _ = sleep(self.interval) => false,
            changed = rx.changed() => match changed {
                Ok(()) if *rx.borrow() => true,
                // A non-cancelling send or a dropped sender; finish the pause.
                _ => {
                    sleep(self.interval).await;
                    false
                }
            },
        }
    }
}
