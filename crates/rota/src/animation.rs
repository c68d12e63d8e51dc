use crate::selector::SpinTicket;
use std::time::Duration;

/// Displayed rotation of a spin in progress.
///
/// Eases out from `from` to `to` and holds `to` once `duration` has passed, so
/// the drawn wheel stops on the angle the winner was resolved from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinAnimation {
    pub from: f64,
    pub to: f64,
    pub duration: Duration,
}

impl SpinAnimation {
    pub fn new(ticket: &SpinTicket) -> Self {
        Self {
            from: ticket.from,
            to: ticket.target,
            duration: ticket.duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    pub fn angle_at(&self, elapsed: Duration) -> f64 {
        let t = self.progress(elapsed);
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

fn ease_out_cubic(t: f64) -> f64 {
    1.0 - (1.0 - t).powi(3)
}
