use image::RgbaImage;

use crate::assets::image::{load_image, resize};
use crate::config::BackgroundConfig;
use crate::foundation::core::Vec2i;
use crate::foundation::error::TuckboxResult;
use crate::raster::composite::{solid, transparent};

/// Fill `bounds` with the configured background.
///
/// Images are scaled to cover `bounds` with their aspect ratio kept, then center-cropped. A color
/// fills the whole area. With neither, the result is transparent.
pub(crate) fn render_background(cfg: &BackgroundConfig, bounds: Vec2i) -> TuckboxResult<RgbaImage> {
    if let Some(path) = &cfg.image {
        let img = load_image(path)?;
        return Ok(cover(&img, bounds));
    }
    Ok(match cfg.color {
        Some(color) => solid(bounds, color),
        None => transparent(bounds),
    })
}

fn cover(img: &RgbaImage, bounds: Vec2i) -> RgbaImage {
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || bounds.x <= 0 || bounds.y <= 0 {
        return transparent(bounds);
    }
    let img_ratio = f64::from(iw) / f64::from(ih);
    let bounds_ratio = f64::from(bounds.x) / f64::from(bounds.y);

    let scaled = if img_ratio < bounds_ratio {
        Vec2i::new(bounds.x, (f64::from(bounds.x) / img_ratio) as i32)
    } else {
        Vec2i::new((f64::from(bounds.y) * img_ratio) as i32, bounds.y)
    };
    let scaled = Vec2i::new(scaled.x.max(bounds.x), scaled.y.max(bounds.y));
    let resized = resize(img, scaled);

    let crop = Vec2i::new((scaled.x - bounds.x) / 2, (scaled.y - bounds.y) / 2);
    let (cx, cy) = crop.extent();
    let (bw, bh) = bounds.extent();
    image::imageops::crop_imm(&resized, cx, cy, bw, bh).to_image()
}
