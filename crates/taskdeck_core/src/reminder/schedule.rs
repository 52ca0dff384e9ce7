//! Periodic reminder scheduling.
//!
//! Two drivers share one contract (run once at start, then every
//! `interval` until stopped):
//! - `ReminderSchedule` is polled by a host event loop and owns no thread.
//! - `ReminderLoop` runs the tick on a background thread and stops on
//!   `cancel` or drop.

use log::{debug, warn};
use std::io;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

const REMINDER_THREAD_NAME: &str = "taskdeck-reminders";

/// Poll-driven interval for single-threaded hosts.
#[derive(Debug, Clone)]
pub struct ReminderSchedule {
    interval: Duration,
    next_due: Option<Instant>,
}

impl ReminderSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns true when a scan should run at `now`. The first poll always
    /// fires; later polls fire once `interval` has elapsed since the last
    /// firing.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now < due => false,
            _ => {
                self.next_due = Some(now + self.interval);
                true
            }
        }
    }
}

/// Background reminder thread; stops when cancelled or dropped.
pub struct ReminderLoop {
    stop_tx: Option<Sender<()>>,
    worker: Option<JoinHandle<()>>,
}

impl ReminderLoop {
    /// Runs `tick` immediately, then after every `interval`.
    ///
    /// # Errors
    /// - Returns an error when the OS refuses to spawn the thread.
    pub fn spawn<F>(interval: Duration, mut tick: F) -> io::Result<Self>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let worker = thread::Builder::new()
            .name(REMINDER_THREAD_NAME.to_string())
            .spawn(move || loop {
                tick();
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            })?;

        debug!(
            "event=reminder_loop module=reminder status=start interval_ms={}",
            interval.as_millis()
        );
        Ok(Self {
            stop_tx: Some(stop_tx),
            worker: Some(worker),
        })
    }

    /// Stops the loop and waits for an in-flight tick to finish.
    pub fn cancel(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                warn!("event=reminder_loop module=reminder status=error error_code=tick_panicked");
            } else {
                debug!("event=reminder_loop module=reminder status=stopped");
            }
        }
    }
}

impl Drop for ReminderLoop {
    fn drop(&mut self) {
        self.shutdown();
    }
}
