#![allow(dead_code)]

use std::path::PathBuf;

use image::RgbaImage;
use tuckbox::{TextRasterizer, TextStyle, TuckboxResult, Vec2i};

/// Fixed-advance stand-in for a font so page tests do not depend on font files.
pub struct BlockText;

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
        let size = self.measure(text, style)?;
        let (cw, ch) = canvas.dimensions();
        for y in origin.y.max(0)..(origin.y + size.y).min(ch as i32) {
            for x in origin.x.max(0)..(origin.x + size.x).min(cw as i32) {
                canvas.put_pixel(x as u32, y as u32, image::Rgba(style.fill.to_array()));
            }
        }
        Ok(())
    }
}

/// Fresh scratch directory under `target/`.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("tuckbox-tests").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

pub fn write_solid_png(path: &std::path::Path, w: u32, h: u32, rgba: [u8; 4]) {
    RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save(path)
        .unwrap();
}

pub fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter().zip(b).all(|(x, y)| x.abs_diff(y) <= 2)
}
