use std::path::Path;

use image::RgbaImage;

use crate::foundation::core::Vec2i;
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::raster::composite::premultiply;

/// Read and decode an image file into premultiplied RGBA8.
pub(crate) fn load_image(path: &Path) -> TuckboxResult<RgbaImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| TuckboxError::asset(format!("read image '{}': {e}", path.display())))?;
    decode_image(&bytes)
        .map_err(|e| TuckboxError::asset(format!("decode image '{}': {e}", path.display())))
}

/// Decode encoded image bytes into premultiplied RGBA8.
pub(crate) fn decode_image(bytes: &[u8]) -> Result<RgbaImage, image::ImageError> {
    let mut rgba = image::load_from_memory(bytes)?.to_rgba8();
    premultiply(&mut rgba);
    Ok(rgba)
}

/// Resample to exactly `size`; zero-sized targets yield an empty image.
pub(crate) fn resize(img: &RgbaImage, size: Vec2i) -> RgbaImage {
    let (w, h) = size.extent();
    if w == 0 || h == 0 || img.width() == 0 || img.height() == 0 {
        return RgbaImage::new(w, h);
    }
    if img.dimensions() == (w, h) {
        return img.clone();
    }
    image::imageops::resize(img, w, h, image::imageops::FilterType::CatmullRom)
}
