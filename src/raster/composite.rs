use image::{GrayImage, RgbaImage};

use crate::foundation::core::{Rgba8Premul, Vec2i};
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::foundation::math::{add_sat_u8, mul_div255_u8};

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = add_sat_u8(src[i], mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

/// Scale every channel by `coverage / 255`.
pub(crate) fn scale(px: PremulRgba8, coverage: u8) -> PremulRgba8 {
    match coverage {
        0 => [0; 4],
        255 => px,
        c => {
            let c = u16::from(c);
            px.map(|v| mul_div255_u8(u16::from(v), c))
        }
    }
}

/// Canvas filled with one premultiplied color.
pub(crate) fn solid(size: Vec2i, color: Rgba8Premul) -> RgbaImage {
    let (w, h) = size.extent();
    RgbaImage::from_pixel(w, h, image::Rgba(color.to_array()))
}

/// Fully transparent canvas.
pub(crate) fn transparent(size: Vec2i) -> RgbaImage {
    let (w, h) = size.extent();
    RgbaImage::new(w, h)
}

/// Overlap of a `src` placed at `at` with a `dst` of the given extent, as
/// `(dst_x0, dst_y0, src_x0, src_y0, w, h)`.
fn clip(dst: (u32, u32), src: (u32, u32), at: Vec2i) -> Option<(u32, u32, u32, u32, u32, u32)> {
    let (dw, dh) = (i64::from(dst.0), i64::from(dst.1));
    let (sw, sh) = (i64::from(src.0), i64::from(src.1));
    let (ax, ay) = (i64::from(at.x), i64::from(at.y));

    let x0 = ax.max(0);
    let y0 = ay.max(0);
    let x1 = (ax + sw).min(dw);
    let y1 = (ay + sh).min(dh);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some((
        x0 as u32,
        y0 as u32,
        (x0 - ax) as u32,
        (y0 - ay) as u32,
        (x1 - x0) as u32,
        (y1 - y0) as u32,
    ))
}

/// Source-over `src` onto `dst` with its top-left at `at`; parts outside `dst` are dropped.
pub(crate) fn over_at(dst: &mut RgbaImage, src: &RgbaImage, at: Vec2i) {
    let Some((dx, dy, sx, sy, w, h)) = clip(dst.dimensions(), src.dimensions(), at) else {
        return;
    };
    for y in 0..h {
        for x in 0..w {
            let s = src.get_pixel(sx + x, sy + y).0;
            let d = dst.get_pixel_mut(dx + x, dy + y);
            d.0 = over(d.0, s);
        }
    }
}

/// Union `src` coverage into `dst` at `at` (per-pixel maximum).
pub(crate) fn union_mask_at(dst: &mut GrayImage, src: &GrayImage, at: Vec2i) {
    let Some((dx, dy, sx, sy, w, h)) = clip(dst.dimensions(), src.dimensions(), at) else {
        return;
    };
    for y in 0..h {
        for x in 0..w {
            let s = src.get_pixel(sx + x, sy + y).0[0];
            let d = dst.get_pixel_mut(dx + x, dy + y);
            d.0[0] = d.0[0].max(s);
        }
    }
}

fn check_same_size(img: &RgbaImage, mask: &GrayImage, op: &str) -> TuckboxResult<()> {
    if img.dimensions() != mask.dimensions() {
        return Err(TuckboxError::render(format!(
            "{op}: image {:?} and mask {:?} differ in size",
            img.dimensions(),
            mask.dimensions()
        )));
    }
    Ok(())
}

/// Keep `img` only where `mask` has coverage.
pub(crate) fn apply_mask(img: &mut RgbaImage, mask: &GrayImage) -> TuckboxResult<()> {
    check_same_size(img, mask, "apply_mask")?;
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0 = scale(px.0, m.0[0]);
    }
    Ok(())
}

/// Keep `img` only where `mask` has no coverage.
pub(crate) fn apply_inverted_mask(img: &mut RgbaImage, mask: &GrayImage) -> TuckboxResult<()> {
    check_same_size(img, mask, "apply_inverted_mask")?;
    for (px, m) in img.pixels_mut().zip(mask.pixels()) {
        px.0 = scale(px.0, 255 - m.0[0]);
    }
    Ok(())
}

/// Source-over two equally sized images, writing into `dst`.
pub(crate) fn over_in_place(dst: &mut RgbaImage, src: &RgbaImage) -> TuckboxResult<()> {
    if dst.dimensions() != src.dimensions() {
        return Err(TuckboxError::render(format!(
            "over_in_place: {:?} vs {:?}",
            dst.dimensions(),
            src.dimensions()
        )));
    }
    for (d, s) in dst.pixels_mut().zip(src.pixels()) {
        d.0 = over(d.0, s.0);
    }
    Ok(())
}

/// Convert straight-alpha pixels to premultiplied, in place.
pub(crate) fn premultiply(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let [r, g, b, a] = px.0;
        px.0 = Rgba8Premul::from_straight_rgba(r, g, b, a).to_array();
    }
}

/// Convert premultiplied pixels back to straight alpha, in place.
pub(crate) fn unpremultiply(img: &mut RgbaImage) {
    for px in img.pixels_mut() {
        let a = px.0[3];
        match a {
            0 => px.0 = [0; 4],
            255 => {}
            _ => {
                let a16 = u32::from(a);
                for c in &mut px.0[..3] {
                    *c = ((u32::from(*c) * 255 + a16 / 2) / a16).min(255) as u8;
                }
            }
        }
    }
}
