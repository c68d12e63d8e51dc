pub mod model;
pub mod view;

pub use model::{Motion, Point, WheelGeometry};
pub use view::draw;

pub const REFERENCE_SIZE: f64 = 500.0; // canvas edge the sizes below are tuned for
pub const MIN_RADIUS: f64 = 24.0; // below this the wheel is not drawn
pub const WHEEL_MARGIN: f64 = 12.0;
pub const LABEL_INSET: f64 = 20.0; // gap between rim and label end
pub const LABEL_BASELINE: f64 = 10.0;
pub const FONT_SIZE: f64 = 24.0;
pub const STROKE_WIDTH: f64 = 2.0;
pub const HUB_RADIUS: f64 = 28.0;
pub const POINTER_WIDTH: f64 = 28.0;
pub const POINTER_LENGTH: f64 = 34.0;
