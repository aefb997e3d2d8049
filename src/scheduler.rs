//! Deferred task scheduling
//!
//! The reply latency is injected through this trait so hosts can use real
//! timers while tests run replies on demand.

use crate::error::AssistantError;
use crate::Result;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::debug;

/// Work to run once the delay has elapsed
pub type DeferredTask = Box<dyn FnOnce() + Send + 'static>;

/// Trait for anything that can run a task after a delay
pub trait Scheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: DeferredTask);
}

/// Runs tasks on a tokio runtime after sleeping for the delay
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    handle: Handle,
}

impl TokioScheduler {
    /// Bind to the runtime the caller is running on
    pub fn current() -> Result<Self> {
        let handle = Handle::try_current().map_err(|e| AssistantError::NoRuntime(e.to_string()))?;
        Ok(Self { handle })
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        debug!(delay_ms = delay.as_millis() as u64, "Scheduling deferred task");
        self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}

/// Runs every task inline, ignoring the delay
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, _delay: Duration, task: DeferredTask) {
        task();
    }
}

/// Holds tasks until `run_pending` is called
#[derive(Default)]
pub struct ManualScheduler {
    queue: Mutex<VecDeque<(Duration, DeferredTask)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tasks waiting to run
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Delays of the queued tasks, oldest first
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(delay, _)| *delay)
            .collect()
    }

    /// Run queued tasks in FIFO order, including tasks they schedule.
    /// Returns how many ran.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Lock is released before the task runs so it may schedule more work.
            let next = self
                .queue
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .pop_front();

            match next {
                Some((_, task)) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: DeferredTask) {
        self.queue
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back((delay, task));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn counter_task(counter: &Arc<AtomicUsize>) -> DeferredTask {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn test_immediate_runs_inline() {
        let counter = Arc::new(AtomicUsize::new(0));
        ImmediateScheduler.schedule(Duration::from_millis(600), counter_task(&counter));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_manual_waits_for_run() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = ManualScheduler::new();

        scheduler.schedule(Duration::from_millis(600), counter_task(&counter));
        scheduler.schedule(Duration::from_millis(600), counter_task(&counter));
        assert_eq!(scheduler.pending(), 2);
        assert_eq!(scheduler.pending_delays(), vec![Duration::from_millis(600); 2]);
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        assert_eq!(scheduler.run_pending(), 2);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn test_tokio_scheduler_needs_runtime() {
        assert!(matches!(
            TokioScheduler::current(),
            Err(AssistantError::NoRuntime(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_scheduler_honours_delay() {
        let counter = Arc::new(AtomicUsize::new(0));
        let scheduler = TokioScheduler::current().unwrap();

        scheduler.schedule(Duration::from_millis(600), counter_task(&counter));

        tokio::time::sleep(Duration::from_millis(599)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }
}
