use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::{core::FrameSize, error::TintResult},
    frame::buffer::FrameRGBA,
};

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> TintResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameRGBA::from_straight_bytes(FrameSize::new(width, height), rgba.into_raw())
}

/// Read and decode an image file.
pub fn load_image(path: &Path) -> TintResult<FrameRGBA> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/decode.rs"]
mod tests;
