use super::model::{Point, WheelGeometry};
use super::{
    FONT_SIZE, HUB_RADIUS, LABEL_BASELINE, LABEL_INSET, POINTER_LENGTH, POINTER_WIDTH,
    STROKE_WIDTH,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use rota::{Selector, Slice, SpinError};

fn set_color(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct SliceRenderer<'a> {
    slice: &'a Slice,
    geometry: &'a WheelGeometry,
}

impl<'a> SliceRenderer<'a> {
    fn new(slice: &'a Slice, geometry: &'a WheelGeometry) -> Self {
        Self { slice, geometry }
    }

    /// Expects the context to be translated to the wheel center and rotated.
    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_wedge(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn draw_wedge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let (r, g, b) = self.slice.color.to_unit_rgb();
        cr.new_path();
        cr.move_to(0.0, 0.0);
        cr.arc(
            0.0,
            0.0,
            self.geometry.radius,
            self.slice.start.to_radians(),
            self.slice.end.to_radians(),
        );
        cr.close_path();
        cr.set_source_rgb(r, g, b);
        cr.fill_preserve()?;

        set_color(cr, colors.stroke);
        cr.set_line_width(STROKE_WIDTH);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = self.slice.label.as_str();
        cr.save()?;
        cr.rotate(self.slice.center.to_radians());
        set_color(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(self.geometry.scaled(FONT_SIZE));

        // right-aligned against the rim
        if let Ok(ext) = cr.text_extents(text) {
            let end = self.geometry.radius - self.geometry.scaled(LABEL_INSET);
            cr.move_to(
                end - ext.width() - ext.x_bearing(),
                self.geometry.scaled(LABEL_BASELINE),
            );
            cr.show_text(text)?;
        }
        cr.restore()
    }
}

/// Draws the wheel turned clockwise by `rotation` degrees, with the fixed pointer
/// at the selector's pointer angle. An empty wheel draws only a hint.
pub fn draw(
    cr: &Context,
    selector: &Selector,
    rotation: f64,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let partition = selector.partition();
    if !partition.is_drawable() {
        return draw_empty_hint(cr, geometry, colors);
    }

    cr.save()?;
    cr.translate(geometry.center.x, geometry.center.y);
    cr.rotate(rotation.to_radians());
    for slice in partition.slices() {
        SliceRenderer::new(slice, geometry).draw(cr, colors)?;
    }
    cr.restore()?;

    draw_hub(cr, geometry, colors)?;
    draw_pointer(cr, geometry, selector.policy().pointer_angle, colors)
}

fn draw_hub(cr: &Context, geometry: &WheelGeometry, colors: &ThemeColors) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(
        geometry.center.x,
        geometry.center.y,
        geometry.scaled(HUB_RADIUS),
        0.0,
        2.0 * std::f64::consts::PI,
    );
    set_color(cr, colors.hub);
    cr.fill_preserve()?;
    set_color(cr, colors.stroke);
    cr.set_line_width(STROKE_WIDTH);
    cr.stroke()
}

/// Triangle sitting on the rim, pointing inwards at `angle`.
fn draw_pointer(
    cr: &Context,
    geometry: &WheelGeometry,
    angle: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let tip = geometry
        .center
        .polar(angle, geometry.radius - geometry.scaled(POINTER_LENGTH));
    let base = geometry.center.polar(angle, geometry.radius);
    let half = geometry.scaled(POINTER_WIDTH) / 2.0;
    let (left, right) = (
        base.polar(angle - 90.0, half),
        base.polar(angle + 90.0, half),
    );

    cr.new_path();
    for (i, Point { x, y }) in [tip, left, right].into_iter().enumerate() {
        if i == 0 {
            cr.move_to(x, y);
        } else {
            cr.line_to(x, y);
        }
    }
    cr.close_path();
    set_color(cr, colors.pointer);
    cr.fill()
}

fn draw_empty_hint(
    cr: &Context,
    geometry: &WheelGeometry,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let text = SpinError::NoCandidates.to_string();
    set_color(cr, colors.hint);
    cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Normal);
    cr.set_font_size(geometry.scaled(FONT_SIZE));
    if let Ok(ext) = cr.text_extents(&text) {
        cr.move_to(
            geometry.center.x - ext.width() / 2.0 - ext.x_bearing(),
            geometry.center.y + ext.height() / 2.0,
        );
        cr.show_text(&text)?;
    }
    Ok(())
}
