//! # ConfinedScheduler: a single thread that owns UI-confined work.
//!
//! ```text
//! caller thread                      confined thread (current-thread runtime)
//! ─────────────                      ────────────────────────────────────────
//! schedule(job) ──► mpsc ──► loop { select! { stop, rx.recv() } }
//!                                        └─► spawn(run_job)
//!                                              ├─ token cancelled ─► skip
//!                                              ├─ sleep(delay)    (cancellable)
//!                                              └─ job()           (panic caught)
//! ```
//!
//! ## Rules
//! - Jobs run one at a time, in the order they become due, on [`thread_id`](ConfinedScheduler::thread_id).
//! - The returned [`Subscription`] cancels a job that has not started yet.
//!   It reads as unsubscribed once the job has run.
//! - After [`shutdown`](ConfinedScheduler::shutdown) every post fails with
//!   [`SchedulerError::Closed`]; jobs still queued or sleeping are dropped
//!   and their handles read as unsubscribed.

use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc as std_mpsc;
use std::thread::{self, JoinHandle, ThreadId};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::error::SchedulerError;
use crate::subscription::Subscription;

type Work = Box<dyn FnOnce() + Send + 'static>;

struct Job {
    token: CancellationToken,
    delay: Option<Duration>,
    work: Work,
}

/// Runs closures on one dedicated thread, like a UI main loop.
///
/// Build a [`LifecycleScope`](crate::LifecycleScope) inside a scheduled job to
/// confine it to this thread.
pub struct ConfinedScheduler {
    name: String,
    thread_id: ThreadId,
    tx: mpsc::UnboundedSender<Job>,
    stop: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ConfinedScheduler {
    /// Starts the confined thread.
    pub fn new(name: impl Into<String>) -> Result<Self, SchedulerError> {
        let name = name.into();
        let (tx, rx) = mpsc::unbounded_channel::<Job>();
        let stop = CancellationToken::new();
        let (ready_tx, ready_rx) = std_mpsc::sync_channel::<Result<(), String>>(1);

        let loop_stop = stop.clone();
        let loop_name = name.clone();
        let handle = thread::Builder::new()
            .name(name.clone())
            .spawn(move || {
                let rt = match tokio::runtime::Builder::new_current_thread()
                    .enable_time()
                    .build()
                {
                    Ok(rt) => rt,
                    Err(e) => {
                        let _ = ready_tx.send(Err(e.to_string()));
                        return;
                    }
                };
                let _ = ready_tx.send(Ok(()));
                rt.block_on(run_loop(loop_name, rx, loop_stop));
            })
            .map_err(|e| SchedulerError::Spawn {
                error: e.to_string(),
            })?;

        match ready_rx.recv() {
            Ok(Ok(())) => {}
            Ok(Err(error)) => return Err(SchedulerError::Spawn { error }),
            Err(_) => {
                return Err(SchedulerError::Spawn {
                    error: "scheduler thread exited during startup".into(),
                })
            }
        }

        let thread_id = handle.thread().id();
        tracing::debug!(scheduler = %name, "confined scheduler started");
        Ok(Self {
            name,
            thread_id,
            tx,
            stop,
            handle: Some(handle),
        })
    }

    /// Scheduler name (also the thread name).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Identity of the confined thread.
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    /// True once shutdown has been requested.
    pub fn is_closed(&self) -> bool {
        self.stop.is_cancelled() || self.tx.is_closed()
    }

    /// Queues `job` to run as soon as possible.
    pub fn schedule<F>(&self, job: F) -> Result<Subscription, SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post(None, Box::new(job))
    }

    /// Queues `job` to run after `delay`.
    pub fn schedule_after<F>(&self, delay: Duration, job: F) -> Result<Subscription, SchedulerError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.post(Some(delay), Box::new(job))
    }

    /// Stops the loop and waits for the thread to exit.
    ///
    /// Called from the confined thread itself it only stops the loop.
    pub fn shutdown(mut self) {
        self.stop.cancel();
        self.join();
    }

    fn post(&self, delay: Option<Duration>, work: Work) -> Result<Subscription, SchedulerError> {
        if self.stop.is_cancelled() {
            return Err(self.closed());
        }
        let sub = Subscription::with_token(self.stop.child_token(), None);
        let job = Job {
            token: sub.token().clone(),
            delay: delay.filter(|d| !d.is_zero()),
            work,
        };
        self.tx.send(job).map_err(|_| self.closed())?;
        Ok(sub)
    }

    fn closed(&self) -> SchedulerError {
        SchedulerError::Closed {
            name: self.name.clone(),
        }
    }

    fn join(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        if thread::current().id() == self.thread_id {
            return;
        }
        if handle.join().is_err() {
            tracing::warn!(scheduler = %self.name, "confined scheduler thread panicked");
        }
    }
}

impl Drop for ConfinedScheduler {
    fn drop(&mut self) {
        self.stop.cancel();
        self.join();
    }
}

impl std::fmt::Debug for ConfinedScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfinedScheduler")
            .field("name", &self.name)
            .field("thread_id", &self.thread_id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

async fn run_loop(name: String, mut rx: mpsc::UnboundedReceiver<Job>, stop: CancellationToken) {
    loop {
        tokio::select! {
            biased;
            _ = stop.cancelled() => break,
            job = rx.recv() => match job {
                Some(job) => {
                    tokio::spawn(run_job(name.clone(), job));
                }
                None => break,
            },
        }
    }
    rx.close();
    let mut dropped = 0usize;
    while let Ok(job) = rx.try_recv() {
        job.token.cancel();
        dropped += 1;
    }
    stop.cancel();
    if dropped > 0 {
        tracing::debug!(scheduler = %name, dropped, "queued jobs dropped at shutdown");
    }
    tracing::debug!(scheduler = %name, "confined scheduler stopped");
}

async fn run_job(name: String, job: Job) {
    let Job { token, delay, work } = job;
    if let Some(delay) = delay {
        tokio::select! {
            _ = token.cancelled() => return,
            _ = tokio::time::sleep(delay) => {}
        }
    }
    if token.is_cancelled() {
        return;
    }
    if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(work)) {
        let info = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic".to_string()
        };
        tracing::warn!(scheduler = %name, panic = %info, "scheduled job panicked");
    }
    token.cancel();
}
