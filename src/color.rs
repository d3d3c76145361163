use anyhow::{bail, Result};
use palette::{FromColor, Hsl, IntoColor, Lab, Srgb};

/// Brightness above which text on a color should be black.
const TEXT_BRIGHTNESS_THRESHOLD: f64 = 150.0;

/// Core color type used throughout the pipeline.
/// Wraps sRGB u8 components, so every channel is already clamped to [0, 255].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from arbitrary float channels, rounding and clamping each
    /// to [0, 255].
    pub fn from_f64_clamped(r: f64, g: f64, b: f64) -> Self {
        fn channel(v: f64) -> u8 {
            if v.is_nan() {
                0
            } else {
                v.round().clamp(0.0, 255.0) as u8
            }
        }
        Self::new(channel(r), channel(g), channel(b))
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            bail!(
                "invalid hex color: expected 6 hex digits, got {}",
                hex.len()
            );
        }
        if !hex.is_ascii() {
            bail!("invalid hex color: non-ASCII characters in {hex:?}");
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_channels([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }

    /// Euclidean distance over the three sRGB channels.
    ///
    /// Range is [0, ~441.67]. Only used for thresholding, not as a perceptual
    /// metric.
    pub fn distance(self, other: Color) -> f64 {
        self.channels()
            .iter()
            .zip(other.channels())
            .map(|(&a, b)| {
                let d = f64::from(a) - f64::from(b);
                d * d
            })
            .sum::<f64>()
            .sqrt()
    }

    /// Weighted perceived brightness: `sqrt(0.299 r² + 0.587 g² + 0.114 b²)`.
    pub fn brightness(self) -> f64 {
        let r = f64::from(self.r);
        let g = f64::from(self.g);
        let b = f64::from(self.b);
        (0.299 * r * r + 0.587 * g * g + 0.114 * b * b).sqrt()
    }

    /// Convert to `palette::Srgb<f32>` in [0, 1].
    fn to_srgb_f32(self) -> Srgb<f32> {
        Srgb::new(self.r, self.g, self.b).into_format()
    }

    /// Convert to CIELAB (for K-means clustering).
    pub fn to_lab(self) -> Lab {
        self.to_srgb_f32().into_color()
    }

    /// Create from CIELAB.
    pub fn from_lab(lab: Lab) -> Self {
        let srgb: Srgb<f32> = Srgb::from_color(lab);
        Self::from_f64_clamped(
            f64::from(srgb.red) * 255.0,
            f64::from(srgb.green) * 255.0,
            f64::from(srgb.blue) * 255.0,
        )
    }

    /// Convert to HSL (for slot scoring by saturation and lightness).
    pub fn to_hsl(self) -> Hsl {
        self.to_srgb_f32().into_color()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Readable text color on top of a theme's primary color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    pub fn as_hex(self) -> &'static str {
        match self {
            TextColor::Black => "#000000",
            TextColor::White => "#FFFFFF",
        }
    }

    /// Black above the brightness threshold (strictly), white otherwise.
    pub fn for_brightness(brightness: f64) -> Self {
        if brightness > TEXT_BRIGHTNESS_THRESHOLD {
            TextColor::Black
        } else {
            TextColor::White
        }
    }
}

/// Pick black or white text for the given background.
pub fn text_color_for(background: Color) -> TextColor {
    TextColor::for_brightness(background.brightness())
}
