use image::RgbaImage;

use crate::assets::text::{TextRasterizer, TextStyle};
use crate::foundation::core::Vec2i;
use crate::foundation::error::TuckboxResult;
use crate::raster::composite::{over_at, solid};

/// Monospace stand-in for a font: every glyph is `size / 2` wide and every line `size` tall.
/// Drawing paints the measured block in the fill color.
pub(crate) struct BlockText;

impl TextRasterizer for BlockText {
    fn measure(&self, text: &str, style: &TextStyle<'_>) -> TuckboxResult<Vec2i> {
        let lines: Vec<&str> = text.split('\n').collect();
        let cols = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let s = style.size as i32;
        let pad = 2 * style.stroke_width as i32;
        Ok(Vec2i::new(cols * s / 2 + pad, lines.len() as i32 * s + pad))
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        origin: Vec2i,
        text: &str,
        style: &TextStyle<'_>,
    ) -> TuckboxResult<()> {
        let block = solid(self.measure(text, style)?, style.fill);
        over_at(canvas, &block, origin);
        Ok(())
    }
}

/// Write a solid PNG under the temp dir and return its path.
pub(crate) fn temp_png(name: &str, w: u32, h: u32, rgba: [u8; 4]) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("tuckbox-unit-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    RgbaImage::from_pixel(w, h, image::Rgba(rgba)).save(&path).unwrap();
    path
}
