use std::time::Duration;

pub type Task = Box<dyn FnOnce() + 'static>;

/// Runs a task once after a delay, on the caller's thread.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Task);
}

/// Schedules onto the current tokio `LocalSet`.
///
/// Must be used from inside `LocalSet::run_until` or `LocalSet::block_on`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            task();
        });
    }
}
