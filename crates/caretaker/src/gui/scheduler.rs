use rota::scheduler::{Scheduler, Task};
use std::time::Duration;

/// Runs spin completions on the GTK main loop.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlibScheduler;

impl Scheduler for GlibScheduler {
    fn schedule(&self, delay: Duration, task: Task) {
        glib::timeout_add_local_once(delay, task);
    }
}
