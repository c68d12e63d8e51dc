use super::{MIN_RADIUS, REFERENCE_SIZE, WHEEL_MARGIN};
use rota::SpinTicket;
use rota::animation::SpinAnimation;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at `angle_deg` (clockwise from 3 o'clock) and `distance` from `self`.
    pub fn polar(&self, angle_deg: f64, distance: f64) -> Self {
        let rad = angle_deg.to_radians();
        Self::new(self.x + distance * rad.cos(), self.y + distance * rad.sin())
    }
}

/// Where the wheel sits on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WheelGeometry {
    pub center: Point,
    pub radius: f64,
    pub scale: f64,
}

impl WheelGeometry {
    /// Largest wheel that fits the surface, or `None` when the surface is too
    /// small to draw on (not yet allocated, collapsed).
    pub fn fit(width: f64, height: f64) -> Option<Self> {
        let radius = width.min(height) / 2.0 - WHEEL_MARGIN;
        if !radius.is_finite() || radius < MIN_RADIUS {
            return None;
        }
        Some(Self {
            center: Point::new(width / 2.0, height / 2.0),
            radius,
            scale: (radius * 2.0) / REFERENCE_SIZE,
        })
    }

    pub fn scaled(&self, size: f64) -> f64 {
        size * self.scale
    }
}

/// Tracks the spin animation so the draw callback knows what angle to show.
#[derive(Debug, Default)]
pub struct Motion {
    current: Option<(SpinAnimation, Instant)>,
}

impl Motion {
    pub fn start(&mut self, ticket: &SpinTicket, now: Instant) {
        self.current = Some((SpinAnimation::new(ticket), now));
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.current
            .as_ref()
            .is_some_and(|(anim, started)| !anim.is_finished(now.saturating_duration_since(*started)))
    }

    /// Angle to draw at `now`; `resting` is used when no spin is animating.
    pub fn rotation_at(&self, now: Instant, resting: f64) -> f64 {
        match &self.current {
            Some((anim, started)) => {
                let elapsed = now.saturating_duration_since(*started);
                if anim.is_finished(elapsed) {
                    resting
                } else {
                    anim.angle_at(elapsed)
                }
            }
            None => resting,
        }
    }

    pub fn stop(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_fit_centers_wheel() {
        let geometry = WheelGeometry::fit(600.0, 500.0).unwrap();
        assert_eq!(geometry.center, Point::new(300.0, 250.0));
        assert_eq!(geometry.radius, 250.0 - WHEEL_MARGIN);
        assert!(geometry.scale < 1.0);
    }

    #[test]
    fn test_fit_rejects_tiny_surface() {
        assert!(WheelGeometry::fit(0.0, 0.0).is_none());
        assert!(WheelGeometry::fit(40.0, 800.0).is_none());
    }

    #[test]
    fn test_polar_points() {
        let center = Point::new(100.0, 100.0);
        let top = center.polar(270.0, 50.0);
        assert!((top.x - 100.0).abs() < 1e-9);
        assert!((top.y - 50.0).abs() < 1e-9);

        let right = center.polar(0.0, 50.0);
        assert_eq!(right, Point::new(150.0, 100.0));
    }

    #[test]
    fn test_motion_runs_then_rests() {
        let ticket = SpinTicket {
            id: 1,
            from: 0.0,
            target: 1170.0,
            duration: Duration::from_secs(4),
        };
        let start = Instant::now();
        let mut motion = Motion::default();
        assert_eq!(motion.rotation_at(start, 0.0), 0.0);

        motion.start(&ticket, start);
        assert!(motion.is_animating(start));
        assert_eq!(motion.rotation_at(start, 1170.0), 0.0);

        let midway = motion.rotation_at(start + Duration::from_secs(2), 1170.0);
        assert!(midway > 0.0 && midway < 1170.0);

        let done = start + Duration::from_secs(5);
        assert!(!motion.is_animating(done));
        assert_eq!(motion.rotation_at(done, 1170.0), 1170.0);

        motion.stop();
        assert_eq!(motion.rotation_at(start, 42.0), 42.0);
    }
}
