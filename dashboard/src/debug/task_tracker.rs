//! Background task lifecycle tracking

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::task::JoinHandle;

/// Tasks currently running
static ACTIVE_TASKS: AtomicU64 = AtomicU64::new(0);
/// Monotonic id source
static NEXT_TASK_ID: AtomicU64 = AtomicU64::new(0);

/// Get current number of active tasks
pub fn active_task_count() -> u64 {
    ACTIVE_TASKS.load(Ordering::Relaxed)
}

/// Decrements the active count however the task ends (completion or abort).
struct ActiveTask {
    name: &'static str,
    task_id: u64,
    start: Instant,
}

impl Drop for ActiveTask {
    fn drop(&mut self) {
        ACTIVE_TASKS.fetch_sub(1, Ordering::Relaxed);
        tracing::debug!(
            task = %self.name,
            task_id = self.task_id,
            duration_ms = self.start.elapsed().as_millis(),
            "Task finished"
        );
    }
}

/// Spawn an instrumented async task with lifecycle tracking
///
/// # Example
///
/// ```rust,no_run
/// # use dashboard::debug::spawn_tracked;
/// # async fn refresh() {}
/// spawn_tracked("dashboard_refresh", async move { refresh().await });
/// ```
pub fn spawn_tracked<F>(name: &'static str, future: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let task_id = NEXT_TASK_ID.fetch_add(1, Ordering::Relaxed);
    ACTIVE_TASKS.fetch_add(1, Ordering::Relaxed);

    tracing::debug!(task = %name, task_id, "Task spawned");

    let guard = ActiveTask {
        name,
        task_id,
        start: Instant::now(),
    };

    tokio::spawn(async move {
        let _guard = guard;
        future.await
    })
}
