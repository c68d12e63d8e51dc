use crate::partition::FULL_TURN;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_with::{DurationMilliSeconds, serde_as};
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_MIN_TURNS: u32 = 3;
pub const DEFAULT_MAX_TURNS: u32 = 5;
pub const DEFAULT_SPIN_DURATION: Duration = Duration::from_millis(4000);
/// Top of the wheel, in clockwise screen degrees measured from 3 o'clock.
pub const DEFAULT_POINTER_ANGLE: f64 = 270.0;

#[derive(Error, Debug, PartialEq)]
pub enum PolicyError {
    #[error("min_turns must be at least 1")]
    NoTurns,
    #[error("min_turns ({min}) is greater than max_turns ({max})")]
    TurnRange { min: u32, max: u32 },
    #[error("pointer_angle must be a finite number, got {0}")]
    PointerAngle(f64),
}

/// How far and how long a spin goes.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinPolicy {
    pub min_turns: u32,
    pub max_turns: u32,
    #[serde_as(as = "DurationMilliSeconds<u64>")]
    #[serde(rename = "duration_ms")]
    pub duration: Duration,
    pub pointer_angle: f64,
}

impl Default for SpinPolicy {
    fn default() -> Self {
        Self {
            min_turns: DEFAULT_MIN_TURNS,
            max_turns: DEFAULT_MAX_TURNS,
            duration: DEFAULT_SPIN_DURATION,
            pointer_angle: DEFAULT_POINTER_ANGLE,
        }
    }
}

impl SpinPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.min_turns == 0 {
            return Err(PolicyError::NoTurns);
        }
        if self.min_turns > self.max_turns {
            return Err(PolicyError::TurnRange {
                min: self.min_turns,
                max: self.max_turns,
            });
        }
        if !self.pointer_angle.is_finite() {
            return Err(PolicyError::PointerAngle(self.pointer_angle));
        }
        Ok(())
    }

    /// Both the whole turns and the fractional remainder are random. The
    /// remainder alone is what makes the resting angle uniform over the circle.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SpinDelta {
        let turns = rng.gen_range(self.min_turns..=self.max_turns);
        let fraction = rng.r#gen::<f64>();
        SpinDelta::new(turns, fraction)
    }
}

/// Rotation added by a single spin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinDelta {
    pub turns: u32,
    /// Uniform in `[0, 1)`.
    pub fraction: f64,
}

impl SpinDelta {
    pub fn new(turns: u32, fraction: f64) -> Self {
        Self { turns, fraction }
    }

    pub fn degrees(&self) -> f64 {
        self.turns as f64 * FULL_TURN + self.fraction * FULL_TURN
    }
}
