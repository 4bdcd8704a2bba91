use crate::foundation::{
    error::{TintError, TintResult},
    math::mul_div255_u8,
};

/// How the tint is mixed with the video underneath.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Paint the tint over the video.
    Normal,
    /// Darken: tint times video.
    Multiply,
    /// Lighten: inverse of multiplying the inverses.
    Screen,
    /// Keep the video's highlights and shadows, take the tint's hue.
    #[default]
    Overlay,
    /// Gentler overlay.
    SoftLight,
    /// Overlay keyed on the tint instead of the video.
    HardLight,
}

impl BlendMode {
    fn apply(self, s: f32, d: f32) -> f32 {
        match self {
            BlendMode::Normal => s,
            BlendMode::Multiply => s * d,
            BlendMode::Screen => s + d - s * d,
            // Overlay is hard-light with the layers swapped.
            BlendMode::Overlay => hard_light(d, s),
            BlendMode::SoftLight => {
                if s <= 0.5 {
                    d - (1.0 - 2.0 * s) * d * (1.0 - d)
                } else {
                    let g = if d <= 0.25 {
                        ((16.0 * d - 12.0) * d + 4.0) * d
                    } else {
                        d.sqrt()
                    };
                    d + (2.0 * s - 1.0) * (g - d)
                }
            }
            BlendMode::HardLight => hard_light(s, d),
        }
    }
}

fn hard_light(s: f32, d: f32) -> f32 {
    if s <= 0.5 {
        2.0 * s * d
    } else {
        1.0 - 2.0 * (1.0 - s) * (1.0 - d)
    }
}

/// Premultiplied RGBA8 tint layer: `rgb` at `intensity`, masked by
/// `head * (1 - face)` coverage.
pub(crate) fn tint_layer(head: &[u8], face: &[u8], rgb: [u8; 3], intensity: f32) -> Vec<u8> {
    let strength = (intensity.clamp(0.0, 1.0) * 255.0).round() as u16;
    let mut out = vec![0u8; head.len() * 4];
    for ((px, &h), &f) in out.chunks_exact_mut(4).zip(head).zip(face) {
        let coverage = mul_div255_u8(u16::from(h), 255 - u16::from(f));
        let a = mul_div255_u8(u16::from(coverage), strength);
        if a == 0 {
            continue;
        }
        px[0] = mul_div255_u8(u16::from(rgb[0]), u16::from(a));
        px[1] = mul_div255_u8(u16::from(rgb[1]), u16::from(a));
        px[2] = mul_div255_u8(u16::from(rgb[2]), u16::from(a));
        px[3] = a;
    }
    out
}

/// Source-over with `mode` applied to unpremultiplied channels:
/// `out_p = sp * (1 - da) + dp * (1 - sa) + B(sc, dc) * sa * da`.
pub(crate) fn composite_in_place(dst: &mut [u8], src: &[u8], mode: BlendMode) -> TintResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TintError::render(
            "blend expects equal-length rgba8 buffers",
        ));
    }

    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let sa = f32::from(s[3]) / 255.0;
        let da = f32::from(d[3]) / 255.0;
        let inv_sa = 1.0 - sa;

        for c in 0..3 {
            let sp = f32::from(s[c]) / 255.0;
            let dp = f32::from(d[c]) / 255.0;
            let sc = (sp / sa).clamp(0.0, 1.0);
            let dc = if da > 0.0 { (dp / da).clamp(0.0, 1.0) } else { 0.0 };
            let b = mode.apply(sc, dc).clamp(0.0, 1.0);
            let out = (sp * (1.0 - da) + dp * inv_sa + b * sa * da).clamp(0.0, 1.0);
            d[c] = (out * 255.0).round() as u8;
        }
        let out_a = (sa + da * inv_sa).clamp(0.0, 1.0);
        d[3] = (out_a * 255.0).round() as u8;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/blend.rs"]
mod tests;
