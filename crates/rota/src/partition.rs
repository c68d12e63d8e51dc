use crate::candidate::CandidateName;
use crate::color::{HexColor, Palette};

/// Degrees in one revolution.
pub const FULL_TURN: f64 = 360.0;

/// Maps any angle into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let normalized = degrees.rem_euclid(FULL_TURN);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= FULL_TURN {
        0.0
    } else {
        normalized
    }
}

/// One angular wedge of the wheel.
///
/// Angles are in degrees, clockwise in screen coordinates, with 0 at 3 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub index: usize,
    pub start: f64,
    pub end: f64,
    pub center: f64,
    pub color: HexColor,
    pub label: CandidateName,
}

impl Slice {
    pub fn width(&self) -> f64 {
        self.end - self.start
    }

    pub fn contains(&self, angle: f64) -> bool {
        (self.start..self.end).contains(&normalize_degrees(angle))
    }
}

/// Equal-width partition of the circle, one slice per candidate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    slices: Vec<Slice>,
}

impl Partition {
    /// Slice `i` spans `[i * w, (i + 1) * w)` with `w = 360 / n`. The last slice is
    /// pinned to end at exactly 360 so the wheel is closed without a float gap.
    pub fn build(candidates: &[CandidateName], palette: &Palette) -> Self {
        let count = candidates.len();
        if count == 0 {
            return Self::default();
        }

        let width = FULL_TURN / count as f64;
        let slices = candidates
            .iter()
            .enumerate()
            .map(|(i, label)| {
                let start = i as f64 * width;
                let end = if i + 1 == count {
                    FULL_TURN
                } else {
                    (i + 1) as f64 * width
                };
                Slice {
                    index: i,
                    start,
                    end,
                    center: start + width / 2.0,
                    color: palette.color(i),
                    label: label.clone(),
                }
            })
            .collect();

        Self { slices }
    }

    /// False for an empty wheel; renderers skip drawing entirely.
    pub fn is_drawable(&self) -> bool {
        !self.slices.is_empty()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    pub fn slice(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    pub fn slice_width(&self) -> Option<f64> {
        (!self.slices.is_empty()).then(|| FULL_TURN / self.slices.len() as f64)
    }

    /// Index of the slice sitting under a fixed pointer once the wheel has been
    /// rotated clockwise by `rotation` degrees.
    ///
    /// The wheel moves and the pointer does not, so the pointer is turned back by
    /// the same amount to find the wheel-local angle it now reads.
    pub fn slice_under_pointer(&self, pointer_angle: f64, rotation: f64) -> Option<usize> {
        let width = self.slice_width()?;
        let adjusted = normalize_degrees(pointer_angle - normalize_degrees(rotation) + FULL_TURN);
        Some((adjusted / width).floor() as usize % self.slices.len())
    }
}
