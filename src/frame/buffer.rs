use crate::foundation::{
    core::FrameSize,
    error::{TintError, TintResult},
    math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

/// An RGBA8 raster. Camera frames and the output canvas are both stored
/// premultiplied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// A fully transparent frame.
    pub fn new(size: FrameSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
            data: vec![0; size.byte_len()],
            premultiplied: true,
        }
    }

    /// A frame filled with one straight-alpha color.
    pub fn filled(size: FrameSize, rgba: [u8; 4]) -> Self {
        let mut px = rgba;
        premultiply_rgba8_in_place(&mut px);
        Self {
            width: size.width,
            height: size.height,
            data: px.repeat(size.pixel_count()),
            premultiplied: true,
        }
    }

    /// Wrap premultiplied RGBA8 pixels. Fails on a length mismatch.
    pub fn from_premul_bytes(size: FrameSize, data: Vec<u8>) -> TintResult<Self> {
        if data.len() != size.byte_len() {
            return Err(TintError::validation(format!(
                "frame byte length {} does not match {}x{}",
                data.len(),
                size.width,
                size.height
            )));
        }
        Ok(Self {
            width: size.width,
            height: size.height,
            data,
            premultiplied: true,
        })
    }

    /// Wrap straight RGBA8 pixels, premultiplying them.
    pub fn from_straight_bytes(size: FrameSize, mut data: Vec<u8>) -> TintResult<Self> {
        premultiply_rgba8_in_place(&mut data);
        Self::from_premul_bytes(size, data)
    }

    /// Dimensions.
    pub fn size(&self) -> FrameSize {
        FrameSize::new(self.width, self.height)
    }

    /// Raw pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Make every pixel transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Reallocate to `size` if it differs. Returns true when the frame was resized.
    pub fn resize_to(&mut self, size: FrameSize) -> bool {
        if self.size() == size {
            return false;
        }
        *self = Self::new(size);
        true
    }

    /// Replace the contents with `src` flipped horizontally, resampled
    /// (nearest neighbour) to this frame's size.
    pub fn draw_mirrored(&mut self, src: &FrameRGBA) -> TintResult<()> {
        if src.data.len() != src.size().byte_len() {
            return Err(TintError::render("source frame buffer size mismatch"));
        }
        self.clear();
        if src.size().is_empty() || self.size().is_empty() {
            return Ok(());
        }

        let (dw, dh) = (self.width as usize, self.height as usize);
        let (sw, sh) = (src.width as usize, src.height as usize);
        for y in 0..dh {
            let sy = (y * sh) / dh;
            let src_row = sy * sw;
            let dst_row = y * dw;
            for x in 0..dw {
                let sx = sw - 1 - (x * sw) / dw;
                let si = (src_row + sx) * 4;
                let di = (dst_row + x) * 4;
                self.data[di..di + 4].copy_from_slice(&src.data[si..si + 4]);
            }
        }
        Ok(())
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> TintResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| TintError::render("frame buffer does not match its dimensions"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/frame/buffer.rs"]
mod tests;
