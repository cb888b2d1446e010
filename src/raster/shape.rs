use image::GrayImage;
use kurbo::{BezPath, Ellipse, Rect, Shape};

use crate::foundation::core::Vec2i;
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::foundation::math::mul_div255_u8;
use crate::layout::panel::ShapeKind;

const TOLERANCE: f64 = 0.1;

/// Outline of a panel shape: filled paths, plus paths cut out of them.
#[derive(Clone, Debug, Default)]
pub(crate) struct Outline {
    pub(crate) fill: Vec<BezPath>,
    pub(crate) cut: Vec<BezPath>,
}

/// Build the outline of `shape` on a canvas of `size`.
///
/// `cutin` is the thumb cutout width of a [`ShapeKind::Back`] panel.
pub(crate) fn outline(shape: ShapeKind, size: Vec2i, cutin: i32) -> Outline {
    let w = f64::from(size.x);
    let h = f64::from(size.y);
    let full = Rect::new(0.0, 0.0, w, h).to_path(TOLERANCE);

    match shape {
        ShapeKind::Pane | ShapeKind::GlueTab => Outline {
            fill: vec![full],
            cut: Vec::new(),
        },
        ShapeKind::SideTab => {
            let mut p = BezPath::new();
            p.move_to((0.0, h));
            p.line_to((0.0, h / 2.0));
            p.line_to((w / 4.0, 0.0));
            p.line_to((w, 0.0));
            p.line_to((w, h));
            p.close_path();
            Outline {
                fill: vec![p],
                cut: Vec::new(),
            }
        }
        ShapeKind::TuckTab => {
            // Rectangle over the top half, unioned with an ellipse centered on the midline.
            let half = f64::from(size.y / 2);
            let rect = Rect::new(0.0, 0.0, w, half).to_path(TOLERANCE);
            let ellipse = Ellipse::new((w / 2.0, half), (w / 2.0, half), 0.0).to_path(TOLERANCE);
            Outline {
                fill: vec![rect, ellipse],
                cut: Vec::new(),
            }
        }
        ShapeKind::Back => {
            let cw = f64::from(cutin);
            let ch = f64::from(cutin / 2);
            let x = (w / 2.0 - cw / 2.0).trunc();
            let y = (-cw / 4.0).trunc();
            let hole = Ellipse::from_rect(Rect::new(x, y, x + cw, y + ch)).to_path(TOLERANCE);
            Outline {
                fill: vec![full],
                cut: vec![hole],
            }
        }
    }
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn surface_dim(v: i32, axis: &str) -> TuckboxResult<u16> {
    u16::try_from(v).map_err(|_| {
        TuckboxError::render(format!("shape {axis} {v} px is outside the raster surface range"))
    })
}

/// Anti-aliased coverage of the union of `paths`.
fn coverage(paths: &[BezPath], size: Vec2i) -> TuckboxResult<GrayImage> {
    let (w, h) = size.extent();
    if w == 0 || h == 0 || paths.is_empty() {
        return Ok(GrayImage::new(w, h));
    }
    let w16 = surface_dim(size.x, "width")?;
    let h16 = surface_dim(size.y, "height")?;

    let mut ctx = vello_cpu::RenderContext::new(w16, h16);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    for p in paths {
        ctx.fill_path(&bezpath_to_cpu(p));
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
    ctx.render_to_pixmap(&mut pixmap);

    let alpha: Vec<u8> = pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect();
    GrayImage::from_raw(w, h, alpha)
        .ok_or_else(|| TuckboxError::render("coverage buffer size mismatch"))
}

/// Coverage mask of `shape` at `size`: 255 inside, 0 outside.
pub(crate) fn shape_mask(shape: ShapeKind, size: Vec2i, cutin: i32) -> TuckboxResult<GrayImage> {
    let o = outline(shape, size, cutin);
    let mut mask = coverage(&o.fill, size)?;
    if !o.cut.is_empty() {
        let cut = coverage(&o.cut, size)?;
        for (m, c) in mask.pixels_mut().zip(cut.pixels()) {
            m.0[0] = mul_div255_u8(u16::from(m.0[0]), 255 - u16::from(c.0[0]));
        }
    }
    Ok(mask)
}

#[cfg(test)]
#[path = "../../tests/unit/raster/shape.rs"]
mod tests;
