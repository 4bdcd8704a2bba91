//! Coverage masks rasterized with `vello_cpu`.

use kurbo::{BezPath, PathEl, Shape};

use crate::foundation::{
    core::FrameSize,
    error::{TintError, TintResult},
};

const ELLIPSE_TOLERANCE: f64 = 0.1;

/// Per-pixel coverage (0..=255) of `path` filled with the non-zero rule.
pub(crate) fn rasterize_coverage(path: &BezPath, size: FrameSize) -> TintResult<Vec<u8>> {
    let (width, height) = surface_dims(size)?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    ctx.fill_path(&bezpath_to_cpu(path));
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);

    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

pub(crate) fn shape_coverage(shape: &impl Shape, size: FrameSize) -> TintResult<Vec<u8>> {
    rasterize_coverage(&shape.to_path(ELLIPSE_TOLERANCE), size)
}

fn surface_dims(size: FrameSize) -> TintResult<(u16, u16)> {
    if size.is_empty() {
        return Err(TintError::render("cannot rasterize onto an empty canvas"));
    }
    let w: u16 = size
        .width
        .try_into()
        .map_err(|_| TintError::render("canvas width exceeds u16"))?;
    let h: u16 = size
        .height
        .try_into()
        .map_err(|_| TintError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/overlay/raster.rs"]
mod tests;
