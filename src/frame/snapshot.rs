//! JPEG data-URL snapshots of the output canvas.

use anyhow::Context;
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};

use crate::{
    foundation::error::{TintError, TintResult},
    frame::{buffer::FrameRGBA, decode::decode_image},
};

const JPEG_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// A still image of the composited canvas, stored as a data URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CapturedLook {
    data_url: String,
}

impl CapturedLook {
    /// Snapshot `frame` as a JPEG. Alpha is flattened onto black.
    pub fn capture(frame: &FrameRGBA, quality: u8) -> TintResult<Self> {
        Ok(Self {
            data_url: encode_jpeg_data_url(frame, quality)?,
        })
    }

    /// Wrap an existing data URL. Only base64 JPEG URLs are accepted.
    pub fn from_data_url(data_url: impl Into<String>) -> TintResult<Self> {
        let data_url = data_url.into();
        if !data_url.starts_with(JPEG_DATA_URL_PREFIX) {
            return Err(TintError::validation(
                "captured look must be a base64 JPEG data URL",
            ));
        }
        Ok(Self { data_url })
    }

    /// The `data:image/jpeg;base64,...` string.
    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// Decode back into a frame.
    pub fn decode(&self) -> TintResult<FrameRGBA> {
        decode_data_url(&self.data_url)
    }
}

impl TryFrom<String> for CapturedLook {
    type Error = TintError;

    fn try_from(data_url: String) -> TintResult<Self> {
        Self::from_data_url(data_url)
    }
}

impl From<CapturedLook> for String {
    fn from(look: CapturedLook) -> Self {
        look.data_url
    }
}

/// Encode `frame` as a JPEG data URL. Alpha is flattened onto black.
pub fn encode_jpeg_data_url(frame: &FrameRGBA, quality: u8) -> TintResult<String> {
    if frame.width == 0 || frame.height == 0 {
        return Err(TintError::render("cannot snapshot an empty canvas"));
    }
    if frame.data.len() != frame.size().byte_len() {
        return Err(TintError::render("snapshot frame buffer size mismatch"));
    }

    // Premultiplied over opaque black is the premultiplied color itself.
    let mut rgb = Vec::with_capacity(frame.size().pixel_count() * 3);
    if frame.premultiplied {
        for px in frame.data.chunks_exact(4) {
            rgb.extend_from_slice(&px[..3]);
        }
    } else {
        for px in frame.data.chunks_exact(4) {
            let a = u16::from(px[3]);
            for &c in &px[..3] {
                rgb.push(crate::foundation::math::mul_div255_u8(u16::from(c), a));
            }
        }
    }

    let mut jpeg = Vec::new();
    let quality = quality.clamp(1, 100);
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, quality)
        .encode(&rgb, frame.width, frame.height, image::ExtendedColorType::Rgb8)
        .context("encode jpeg snapshot")?;

    let mut out = String::with_capacity(JPEG_DATA_URL_PREFIX.len() + jpeg.len() * 4 / 3 + 4);
    out.push_str(JPEG_DATA_URL_PREFIX);
    BASE64_STANDARD.encode_string(&jpeg, &mut out);
    Ok(out)
}

/// Decode any base64 `data:image/...` URL into a frame.
pub fn decode_data_url(data_url: &str) -> TintResult<FrameRGBA> {
    let (header, payload) = data_url
        .split_once(',')
        .ok_or_else(|| TintError::validation("data URL is missing its payload"))?;
    if !header.starts_with("data:image/") || !header.ends_with(";base64") {
        return Err(TintError::validation(format!(
            "unsupported data URL header '{header}'"
        )));
    }
    let bytes = BASE64_STANDARD
        .decode(payload)
        .map_err(|e| TintError::validation(format!("invalid base64 payload: {e}")))?;
    decode_image(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/frame/snapshot.rs"]
mod tests;
