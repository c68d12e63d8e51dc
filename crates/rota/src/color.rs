use palette::Srgb;
use palette::rgb::FromHexError;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ColorError {
    #[error("Invalid color '{input}': {source}")]
    Hex {
        input: String,
        #[source]
        source: FromHexError,
    },
    #[error("Palette must contain at least one color")]
    EmptyPalette,
}

/// An sRGB color written as `#RRGGBB` in config files.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct HexColor(Srgb<u8>);

impl HexColor {
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(Srgb::new(r, g, b))
    }

    /// Channels scaled to `0.0..=1.0`, as cairo expects them.
    pub fn to_unit_rgb(&self) -> (f64, f64, f64) {
        self.0.into_format::<f64>().into_components()
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Srgb::<u8>::from_str(s.trim())
            .map(Self)
            .map_err(|source| ColorError::Hex {
                input: s.to_string(),
                source,
            })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.0.into_components();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}

// pinks, purples, a coral and a green
const DEFAULT_COLORS: [(u8, u8, u8); 10] = [
    (0xFC, 0x91, 0xDD),
    (0xD3, 0x6C, 0xFC),
    (0xFC, 0x6D, 0x71),
    (0x6A, 0xE4, 0x9B),
    (0x76, 0x6C, 0xFC),
    (0x89, 0x57, 0xF7),
    (0x17, 0x0A, 0xC2),
    (0xFB, 0xA6, 0x6D),
    (0xFA, 0x54, 0x54),
    (0x66, 0xCC, 0x00),
];

/// Slice colors, handed out cyclically when there are more slices than colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HexColor>", into = "Vec<HexColor>")]
pub struct Palette(Vec<HexColor>);

impl Palette {
    pub fn new(colors: Vec<HexColor>) -> Result<Self, ColorError> {
        if colors.is_empty() {
            return Err(ColorError::EmptyPalette);
        }
        Ok(Self(colors))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn color(&self, index: usize) -> HexColor {
        self.0[index % self.0.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(
            DEFAULT_COLORS
                .iter()
                .map(|&(r, g, b)| HexColor::rgb(r, g, b))
                .collect(),
        )
    }
}

impl TryFrom<Vec<HexColor>> for Palette {
    type Error = ColorError;

    fn try_from(colors: Vec<HexColor>) -> Result<Self, Self::Error> {
        Self::new(colors)
    }
}

impl From<Palette> for Vec<HexColor> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        let cases = vec![
            ("#FC91DD", HexColor::rgb(0xFC, 0x91, 0xDD)),
            ("fc91dd", HexColor::rgb(0xFC, 0x91, 0xDD)),
            (" #66cc00 ", HexColor::rgb(0x66, 0xCC, 0x00)),
        ];

        for (input, expected) in cases {
            assert_eq!(input.parse::<HexColor>().unwrap(), expected);
        }
        assert!("#GGGGGG".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_displays_uppercase() {
        assert_eq!(HexColor::rgb(0x17, 0x0A, 0xC2).to_string(), "#170AC2");
    }

    #[test]
    fn test_palette_repeats_cyclically() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 10);
        assert_eq!(palette.color(0), palette.color(10));
        assert_eq!(palette.color(3), palette.color(23));
    }

    #[test]
    fn test_palette_rejects_empty_list() {
        assert!(matches!(Palette::new(Vec::new()), Err(ColorError::EmptyPalette)));
        assert!(serde_json::from_str::<Palette>("[]").is_err());
    }

    #[test]
    fn test_palette_deserializes_from_hex_strings() {
        let palette: Palette = serde_json::from_str(r##"["#000000", "#FFFFFF"]"##).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.color(1), HexColor::rgb(0xFF, 0xFF, 0xFF));
    }

    #[test]
    fn test_unit_rgb_scales_channels() {
        let (r, g, b) = HexColor::rgb(0xFF, 0x00, 0xFF).to_unit_rgb();
        assert_eq!((r, g, b), (1.0, 0.0, 1.0));
    }
}
