//! Awaitable countdown timer with cooperative cancellation.
//!
//! The countdown runs on a background tokio task that sleeps in one-second
//! ticks, decrementing a shared counter. Stopping is a signal observed
//! between ticks, never a forced kill; completion is a value the caller
//! awaits.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::sleep;

use crate::utils::constants::TICK_MILLIS;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TimerError {
    #[error("timer has not been started")]
    NotStarted,
    #[error("timer is already running")]
    AlreadyRunning,
    #[error("countdown task failed: {0}")]
    TaskFailed(String),
}

pub type Result<T> = std::result::Result<T, TimerError>;

/// How a countdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownOutcome {
    /// Ticked all the way down to zero.
    Completed,
    /// Stopped with seconds still on the counter.
    Cancelled { remaining: u32 },
}

/// Clonable handle that can stop a running countdown from another task.
#[derive(Clone)]
pub struct StopHandle {
    cancel: Arc<watch::Sender<bool>>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.cancel.send(true);
    }
}

pub struct CountdownTimer {
    remaining: Arc<AtomicU32>,
    cancel: Option<Arc<watch::Sender<bool>>>,
    task: Option<JoinHandle<CountdownOutcome>>,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self {
            remaining: Arc::new(AtomicU32::new(0)),
            cancel: None,
            task: None,
        }
    }

    /// Launch the countdown on a background task.
    ///
    /// A previous countdown must be collected with [`wait`](Self::wait)
    /// before starting another.
    pub fn start(&mut self, seconds: u32) -> Result<()> {
        if self.task.is_some() {
            return Err(TimerError::AlreadyRunning);
        }

        let (cancel_tx, mut cancel_rx) = watch::channel(false);
        self.remaining.store(seconds, Ordering::SeqCst);
        let remaining = self.remaining.clone();

        let task = tokio::spawn(async move {
            while remaining.load(Ordering::SeqCst) > 0 {
                tokio::select! {
                    _ = sleep(Duration::from_millis(TICK_MILLIS)) => {
                        remaining.fetch_sub(1, Ordering::SeqCst);
                    }
                    // Fires on stop(); a dropped timer counts as a stop too.
                    _ = cancel_rx.changed() => {
                        return CountdownOutcome::Cancelled {
                            remaining: remaining.load(Ordering::SeqCst),
                        };
                    }
                }
            }
            CountdownOutcome::Completed
        });

        self.cancel = Some(Arc::new(cancel_tx));
        self.task = Some(task);
        Ok(())
    }

    /// Await the running countdown and clear the timer for reuse.
    pub async fn wait(&mut self) -> Result<CountdownOutcome> {
        let task = self.task.take().ok_or(TimerError::NotStarted)?;
        let outcome = task
            .await
            .map_err(|e| TimerError::TaskFailed(e.to_string()))?;
        // The cancel channel outlives the task; dropping it earlier would
        // read as a stop signal mid-countdown.
        self.cancel = None;
        Ok(outcome)
    }

    /// Signal the countdown to stop between ticks.
    pub fn stop(&self) -> Result<()> {
        match &self.cancel {
            Some(cancel) => {
                let _ = cancel.send(true);
                Ok(())
            }
            None => Err(TimerError::NotStarted),
        }
    }

    /// Handle for stopping the countdown from elsewhere.
    pub fn stop_handle(&self) -> Result<StopHandle> {
        self.cancel
            .as_ref()
            .map(|cancel| StopHandle {
                cancel: cancel.clone(),
            })
            .ok_or(TimerError::NotStarted)
    }

    /// Seconds left on the live counter.
    pub fn remaining(&self) -> u32 {
        self.remaining.load(Ordering::SeqCst)
    }
}

impl Default for CountdownTimer {
    fn default() -> Self {
        Self::new()
    }
}
