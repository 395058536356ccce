//! Cancellable repeating tasks
//!
//! Every timer-driven loop in the dashboard (value interpolation, reveal
//! frames, auto-refresh) runs as a tokio task behind a [`TaskHandle`]. The
//! handle is owned by the view that started the loop; cancelling it or
//! dropping it aborts the task, so no loop outlives its owner.
//!
//! Tasks must be spawned from inside a tokio runtime.

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Returned by a tick callback to keep or end the loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Stop,
}

/// Owning handle to a repeating task
#[derive(Debug)]
pub struct TaskHandle {
    name: String,
    handle: JoinHandle<()>,
}

impl TaskHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Abort the task; further ticks never run
    pub fn cancel(&self) {
        if !self.handle.is_finished() {
            tracing::trace!(task = %self.name, "Cancelling task");
        }
        self.handle.abort();
    }

    /// True once the loop stopped itself or was cancelled
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for TaskHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run `tick` every `period`, first after one full period.
///
/// The loop ends when `tick` returns [`TickControl::Stop`] or when the
/// returned handle is cancelled or dropped. Missed ticks are skipped rather
/// than burst, a stalled view must not replay a backlog of frames.
pub fn spawn_repeating<F, Fut>(name: impl Into<String>, period: Duration, mut tick: F) -> TaskHandle
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = TickControl> + Send + 'static,
{
    let name = name.into();
    let period = period.max(Duration::from_millis(1));
    let task_name = name.clone();

    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            ticker.tick().await;
            if tick().await == TickControl::Stop {
                tracing::trace!(task = %task_name, "Task finished");
                break;
            }
        }
    });

    TaskHandle { name, handle }
}

/// Holds at most one live task, cancelling the previous one on replace
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Option<TaskHandle>,
}

impl TaskSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever runs in the slot, then store `task`
    pub fn replace(&mut self, task: TaskHandle) {
        self.cancel();
        self.current = Some(task);
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.current.take() {
            task.cancel();
        }
    }

    /// True while a task is stored and still running
    pub fn is_active(&self) -> bool {
        self.current
            .as_ref()
            .map(|task| !task.is_finished())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    async fn settle() {
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let _task = spawn_repeating("count", Duration::from_millis(50), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                TickControl::Continue
            }
        });

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert_eq!(count.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(120)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_ends_loop() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let task = spawn_repeating("stop", Duration::from_millis(10), move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) + 1 >= 3 {
                    TickControl::Stop
                } else {
                    TickControl::Continue
                }
            }
        });

        tokio::time::sleep(Duration::from_millis(200)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), 3);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels() {
        let count = Arc::new(AtomicUsize::new(0));
        let counter = count.clone();
        let task = spawn_repeating("drop", Duration::from_millis(10), move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                TickControl::Continue
            }
        });

        tokio::time::sleep(Duration::from_millis(25)).await;
        settle().await;
        drop(task);
        let seen = count.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(100)).await;
        settle().await;
        assert_eq!(count.load(Ordering::SeqCst), seen);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slot_replaces_previous_task() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));
        let mut slot = TaskSlot::new();

        let c = first.clone();
        slot.replace(spawn_repeating("first", Duration::from_millis(10), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                TickControl::Continue
            }
        }));
        tokio::time::sleep(Duration::from_millis(15)).await;
        settle().await;

        let c = second.clone();
        slot.replace(spawn_repeating("second", Duration::from_millis(10), move || {
            let c = c.clone();
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                TickControl::Continue
            }
        }));
        let frozen = first.load(Ordering::SeqCst);

        tokio::time::sleep(Duration::from_millis(50)).await;
        settle().await;
        assert_eq!(first.load(Ordering::SeqCst), frozen);
        assert!(second.load(Ordering::SeqCst) >= 4);
        assert!(slot.is_active());

        slot.cancel();
        settle().await;
        assert!(!slot.is_active());
    }
}
