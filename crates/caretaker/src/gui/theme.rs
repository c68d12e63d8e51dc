use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use rota::HexColor;

pub struct ThemeColors {
    pub stroke: Srgba<f64>,
    pub label: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub hint: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            // slice borders keep the wheel's soft pink regardless of theme
            stroke: Srgba::new(1.0, 0.757, 0.765, 1.0),
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
            pointer: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 1.0),
                Some(1.0),
            ),
            hub: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                Some(1.0),
            ),
            hint: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.5, 0.5, 0.5, 0.8),
                Some(0.8),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

const BASE_CSS: &str = "
.caretaker-title {
    font-size: 22px;
    font-weight: bold;
}
.caretaker-spin-button {
    font-weight: bold;
    min-height: 44px;
}
.caretaker-notice {
    font-size: 18px;
}
";

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    provider.load_from_data(BASE_CSS);
    add_provider(&provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION);
}

fn add_provider(provider: &gtk::CssProvider, priority: u32) {
    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(&display, provider, priority);
    }
}

/// Tints the title and spin button with the latest winner's slice color.
pub struct AccentStyle {
    provider: gtk::CssProvider,
}

impl AccentStyle {
    pub fn new() -> Self {
        let provider = gtk::CssProvider::new();
        add_provider(&provider, gtk::STYLE_PROVIDER_PRIORITY_APPLICATION + 1);
        Self { provider }
    }

    pub fn apply(&self, color: HexColor) {
        self.provider.load_from_data(&accent_css(color));
    }
}

impl Default for AccentStyle {
    fn default() -> Self {
        Self::new()
    }
}

pub fn accent_css(color: HexColor) -> String {
    format!(
        ".caretaker-title {{ color: {color}; }}\n\
         .caretaker-spin-button {{ background: {color}; color: white; }}\n"
    )
}
