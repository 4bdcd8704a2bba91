use crate::{
    foundation::{core::ColorSelection, error::TintResult},
    frame::buffer::FrameRGBA,
    landmarks::model::LandmarkSet,
    overlay::{
        blend::{BlendMode, composite_in_place, tint_layer},
        geometry::{HeadProportions, OverlayGeometry},
        raster::{rasterize_coverage, shape_coverage},
    },
};

/// Recolors the head region of a canvas, leaving the face untouched.
///
/// Stateless: the same canvas, landmarks and selection always produce the
/// same pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OverlayCompositor {
    proportions: HeadProportions,
    blend: BlendMode,
}

impl OverlayCompositor {
    /// Compositor with the given head shape and blend mode.
    pub fn new(proportions: HeadProportions, blend: BlendMode) -> Self {
        Self { proportions, blend }
    }

    /// Head proportions in use.
    pub fn proportions(&self) -> &HeadProportions {
        &self.proportions
    }

    /// Blend mode in use.
    pub fn blend(&self) -> BlendMode {
        self.blend
    }

    /// Draw the tint over `canvas`. Landmarks are in canvas coordinates.
    ///
    /// Returns `Ok(false)` without touching the canvas when there is nothing
    /// to draw: natural color, empty canvas, or unusable landmarks.
    #[tracing::instrument(level = "trace", skip_all, fields(w = canvas.width, h = canvas.height))]
    pub fn composite(
        &self,
        canvas: &mut FrameRGBA,
        landmarks: &LandmarkSet,
        selection: ColorSelection,
    ) -> TintResult<bool> {
        let Some(color) = selection.color else {
            return Ok(false);
        };
        let size = canvas.size();
        if size.is_empty() {
            return Ok(false);
        }
        let Some(geometry) = OverlayGeometry::from_landmarks(landmarks, &self.proportions) else {
            tracing::debug!("landmarks unusable for overlay, skipping");
            return Ok(false);
        };

        let head = shape_coverage(&geometry.head, size)?;
        let face = rasterize_coverage(&geometry.face, size)?;
        let layer = tint_layer(&head, &face, color.to_rgb8(), selection.intensity.get());
        composite_in_place(&mut canvas.data, &layer, self.blend)?;
        Ok(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/compositor.rs"]
mod tests;
