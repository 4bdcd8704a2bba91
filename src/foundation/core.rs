use crate::foundation::error::{TintError, TintResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Pixel dimensions of a frame or canvas.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl FrameSize {
    /// Size of `width` x `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either side is zero.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// `width * height`, saturating.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Bytes in an RGBA8 buffer of this size.
    pub fn byte_len(self) -> usize {
        self.pixel_count().saturating_mul(4)
    }

    /// Per-axis factors mapping coordinates in `self` onto `to`.
    pub fn scale_to(self, to: FrameSize) -> Vec2 {
        if self.is_empty() {
            return Vec2::new(1.0, 1.0);
        }
        Vec2::new(
            f64::from(to.width) / f64::from(self.width),
            f64::from(to.height) / f64::from(self.height),
        )
    }
}

/// Straight (non-premultiplied) color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    /// Red.
    pub r: f32,
    /// Green.
    pub g: f32,
    /// Blue.
    pub b: f32,
}

impl Rgb {
    /// Color from channels in `[0, 1]`.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Reject non-finite or out-of-range channels.
    pub fn validate(self) -> TintResult<Self> {
        for c in [self.r, self.g, self.b] {
            if !c.is_finite() || !(0.0..=1.0).contains(&c) {
                return Err(TintError::validation(
                    "color channels must be finite and within [0, 1]",
                ));
            }
        }
        Ok(self)
    }

    /// Quantize to 8-bit channels, clamping first.
    pub fn to_rgb8(self) -> [u8; 3] {
        fn q(c: f32) -> u8 {
            (c.clamp(0.0, 1.0) * 255.0).round() as u8
        }
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Parse `#rrggbb` (leading `#` optional).
    pub fn from_hex(s: &str) -> TintResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(TintError::validation(format!(
                "expected a #rrggbb color, got '{s}'"
            )));
        }
        let channel = |i: usize| -> TintResult<f32> {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| f32::from(v) / 255.0)
                .map_err(|_| TintError::validation(format!("invalid hex color '{s}'")))
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Color strength used for compositing, always within `[MIN, MAX]`.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f32", into = "f32")]
pub struct Intensity(f32);

impl Intensity {
    /// Weakest allowed tint.
    pub const MIN: f32 = 0.1;
    /// Full-strength tint.
    pub const MAX: f32 = 1.0;

    /// Clamp `value` into range. NaN maps to [`Intensity::MIN`].
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    /// The clamped value.
    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self(0.7)
    }
}

impl From<f32> for Intensity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

impl From<Intensity> for f32 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

/// The user's current recolor choice. `color == None` means "natural" (no recolor).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorSelection {
    /// Tint color, or `None` for no recolor.
    pub color: Option<Rgb>,
    /// Tint strength.
    pub intensity: Intensity,
}

impl ColorSelection {
    /// Selection with `intensity` clamped into range.
    pub fn new(color: Option<Rgb>, intensity: f32) -> Self {
        Self {
            color,
            intensity: Intensity::new(intensity),
        }
    }

    /// No recolor at the default intensity.
    pub fn natural() -> Self {
        Self::default()
    }

    /// Whether nothing will be drawn.
    pub fn is_natural(&self) -> bool {
        self.color.is_none()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
