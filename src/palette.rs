//! Preset hair colors offered by the try-on.

use crate::foundation::core::{ColorSelection, Rgb};

/// One palette entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HairColor {
    /// Stable id, e.g. `platinum_blonde`.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// `None` keeps the natural hair color.
    pub rgb: Option<Rgb>,
}

impl HairColor {
    const fn new(id: &'static str, name: &'static str, rgb: Option<Rgb>) -> Self {
        Self { id, name, rgb }
    }

    /// This color at `intensity`.
    pub fn selection(&self, intensity: f32) -> ColorSelection {
        ColorSelection::new(self.rgb, intensity)
    }
}

/// Id selected when nothing else is configured.
pub const DEFAULT_HAIR_COLOR: &str = "blonde";

/// Every preset, in display order.
pub const HAIR_COLORS: [HairColor; 12] = [
    HairColor::new("natural", "Natural", None),
    HairColor::new("black", "Black", Some(Rgb::new(0.1, 0.1, 0.1))),
    HairColor::new("brown", "Brown", Some(Rgb::new(0.3, 0.15, 0.05))),
    HairColor::new("ginger", "Ginger", Some(Rgb::new(0.7, 0.3, 0.1))),
    HairColor::new("blonde", "Blonde", Some(Rgb::new(0.9, 0.8, 0.6))),
    HairColor::new("platinum_blonde", "Platinum Blonde", Some(Rgb::new(0.95, 0.95, 0.85))),
    HairColor::new("red", "Red", Some(Rgb::new(0.85, 0.1, 0.05))),
    HairColor::new("pink", "Pink", Some(Rgb::new(0.9, 0.5, 0.6))),
    HairColor::new("royal_purple", "Royal Purple", Some(Rgb::new(0.5, 0.2, 0.8))),
    HairColor::new("emerald_green", "Emerald Green", Some(Rgb::new(0.1, 0.6, 0.4))),
    HairColor::new("blue", "Blue", Some(Rgb::new(0.2, 0.4, 0.9))),
    HairColor::new("sunset_orange", "Sunset Orange", Some(Rgb::new(1.0, 0.4, 0.1))),
];

/// Look up a preset by id, ignoring ASCII case and treating `-`/space as `_`.
pub fn find_hair_color(id: &str) -> Option<&'static HairColor> {
    let wanted = id.trim().replace(['-', ' '], "_");
    HAIR_COLORS
        .iter()
        .find(|c| c.id.eq_ignore_ascii_case(&wanted))
}

/// The [`DEFAULT_HAIR_COLOR`] entry.
pub fn default_hair_color() -> &'static HairColor {
    &HAIR_COLORS[4]
}

#[cfg(test)]
#[path = "../tests/unit/palette.rs"]
mod tests;
