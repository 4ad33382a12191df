//! Background loads keyed by purpose. Starting a load under a key aborts the
//! one still in flight under that key, so a stale response never lands after
//! a newer one.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskKey {
    Stats,
    Students,
    Attendance,
    Reports,
}

impl TaskKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stats => "stats-reload",
            Self::Students => "students-reload",
            Self::Attendance => "attendance-reload",
            Self::Reports => "reports-reload",
        }
    }
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Decrements the in-flight count when the task completes or is aborted.
struct InFlight(Arc<watch::Sender<usize>>);

impl InFlight {
    fn enter(counter: &Arc<watch::Sender<usize>>) -> Self {
        counter.send_modify(|count| *count += 1);
        Self(Arc::clone(counter))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.send_modify(|count| *count = count.saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct TaskRegistry {
    slots: Mutex<HashMap<TaskKey, Slot>>,
    in_flight: Arc<watch::Sender<usize>>,
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskRegistry {
    pub fn new() -> Self {
        let (in_flight, _) = watch::channel(0);
        Self {
            slots: Mutex::new(HashMap::new()),
            in_flight: Arc::new(in_flight),
        }
    }

    /// Runs `task` under `key`, superseding any earlier task with that key.
    /// Returns the generation of the new task.
    pub fn spawn<F>(&self, key: TaskKey, task: F) -> u64
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.spawn_after(key, Duration::ZERO, task)
    }

    /// Like [`spawn`](Self::spawn) but waits `delay` first. A newer task
    /// under the same key cancels the wait, which is what debounces input.
    pub fn spawn_after<F>(&self, key: TaskKey, delay: Duration, task: F) -> u64
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        let generation = match slots.get(&key) {
            Some(previous) => {
                if !previous.handle.is_finished() {
                    debug!(
                        task = key.as_str(),
                        generation = previous.generation,
                        "superseding in-flight task"
                    );
                    previous.handle.abort();
                }
                previous.generation + 1
            }
            None => 1,
        };

        let guard = InFlight::enter(&self.in_flight);
        let handle = tokio::spawn(async move {
            let _guard = guard;
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            task.await;
        });
        slots.insert(key, Slot { generation, handle });
        generation
    }

    #[cfg(test)]
    fn generation(&self, key: TaskKey) -> u64 {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.get(&key).map_or(0, |slot| slot.generation)
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        *self.in_flight.borrow()
    }

    /// Waits until no task is pending, including debounced ones still asleep.
    pub async fn settle(&self) {
        let mut rx = self.in_flight.subscribe();
        // The sender lives as long as `self`, so this only ends once idle.
        let _ = rx.wait_for(|count| *count == 0).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test(start_paused = true)]
    async fn newer_task_supersedes_stale_one() {
        let registry = TaskRegistry::new();
        let finished = Arc::new(Mutex::new(Vec::new()));

        let log = Arc::clone(&finished);
        registry.spawn(TaskKey::Students, async move {
            tokio::time::sleep(Duration::from_secs(1)).await;
            log.lock().unwrap().push("stale");
        });
        let log = Arc::clone(&finished);
        let generation = registry.spawn(TaskKey::Students, async move {
            log.lock().unwrap().push("fresh");
        });

        registry.settle().await;
        assert_eq!(generation, 2);
        assert_eq!(*finished.lock().unwrap(), vec!["fresh"]);
        assert_eq!(registry.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn different_keys_run_side_by_side() {
        let registry = TaskRegistry::new();
        let runs = Arc::new(AtomicUsize::new(0));

        for key in [TaskKey::Stats, TaskKey::Reports] {
            let runs = Arc::clone(&runs);
            registry.spawn(key, async move {
                tokio::time::sleep(Duration::from_millis(50)).await;
                runs.fetch_add(1, Ordering::SeqCst);
            });
        }

        registry.settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn delayed_tasks_collapse_into_the_last_one() {
        let registry = TaskRegistry::new();
        let runs = Arc::new(AtomicUsize::new(0));
        let started = tokio::time::Instant::now();

        for _ in 0..3 {
            let runs = Arc::clone(&runs);
            registry.spawn_after(TaskKey::Students, Duration::from_millis(300), async move {
                runs.fetch_add(1, Ordering::SeqCst);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        registry.settle().await;
        assert_eq!(runs.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test]
    async fn settle_returns_immediately_when_idle() {
        let registry = TaskRegistry::new();
        registry.settle().await;
        assert_eq!(registry.generation(TaskKey::Attendance), 0);
    }
}
