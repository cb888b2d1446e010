use std::path::PathBuf;

use image::RgbaImage;

use crate::assets::image::{load_image, resize};
use crate::assets::text::{TextRasterizer, TextStyle};
use crate::config::{FeatureConfig, FeatureKind, PanelOptions, TextOptions};
use crate::foundation::core::Vec2i;
use crate::foundation::diag::{Diagnostics, WarningKind};
use crate::foundation::error::TuckboxResult;
use crate::raster::composite::solid;

/// Smallest font size text is shrunk to before giving up on fitting.
pub const MIN_FONT_SIZE: u32 = 8;

/// Collaborators a feature needs while rendering.
pub(crate) struct RenderEnv<'a> {
    pub(crate) text: &'a dyn TextRasterizer,
    pub(crate) diagnostics: &'a mut Diagnostics,
}

/// One decorative element, rendered to a premultiplied raster no larger than `bounds`.
pub(crate) trait FeatureRender: Send + Sync {
    fn render(&self, bounds: Vec2i, env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage>;
}

/// Pick the renderer for a feature's variant.
pub(crate) fn feature_renderer(cfg: &FeatureConfig) -> Box<dyn FeatureRender> {
    match &cfg.kind {
        FeatureKind::Panel(opts) => Box::new(PanelFeature { opts: *opts }),
        FeatureKind::Text(opts) => Box::new(TextFeature {
            opts: opts.clone(),
            anchor: cfg.anchor,
        }),
        FeatureKind::Image(opts) => Box::new(ImageFeature {
            path: opts.path.clone(),
            stretch: cfg.width.is_some() && cfg.height.is_some(),
        }),
    }
}

struct PanelFeature {
    opts: PanelOptions,
}

impl FeatureRender for PanelFeature {
    fn render(&self, bounds: Vec2i, _env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage> {
        let bw = self.opts.border_width as i32;
        if bw == 0 {
            return Ok(solid(bounds, self.opts.color));
        }
        let mut out = solid(bounds, self.opts.border);
        let inner = bounds - Vec2i::new(2 * bw, 2 * bw);
        if inner.x > 0 && inner.y > 0 {
            let fill = solid(inner, self.opts.color);
            image::imageops::replace(&mut out, &fill, i64::from(bw), i64::from(bw));
        }
        Ok(out)
    }
}

struct ImageFeature {
    path: PathBuf,
    stretch: bool,
}

impl FeatureRender for ImageFeature {
    fn render(&self, bounds: Vec2i, _env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage> {
        let img = load_image(&self.path)?;
        if self.stretch {
            return Ok(resize(&img, bounds));
        }
        Ok(resize(&img, fit_within(img.dimensions(), bounds)))
    }
}

/// Largest size with the image's aspect ratio that fits inside `bounds`.
fn fit_within((iw, ih): (u32, u32), bounds: Vec2i) -> Vec2i {
    if iw == 0 || ih == 0 || bounds.x <= 0 || bounds.y <= 0 {
        return Vec2i::new(0, 0);
    }
    let img_ratio = f64::from(iw) / f64::from(ih);
    let bounds_ratio = f64::from(bounds.x) / f64::from(bounds.y);
    if img_ratio < bounds_ratio {
        Vec2i::new((f64::from(bounds.y) * img_ratio) as i32, bounds.y)
    } else {
        Vec2i::new(bounds.x, (f64::from(bounds.x) / img_ratio) as i32)
    }
}

struct TextFeature {
    opts: TextOptions,
    anchor: Vec2i,
}

impl TextFeature {
    fn style(&self, size: u32) -> TextStyle<'_> {
        let font = &self.opts.font;
        TextStyle {
            font: &font.path,
            size,
            align: self.opts.align,
            fill: font.color,
            stroke: font.stroke,
            stroke_width: font.stroke_width,
        }
    }
}

impl FeatureRender for TextFeature {
    fn render(&self, bounds: Vec2i, env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage> {
        let fits = |m: Vec2i| m.x < bounds.x && m.y < bounds.y;

        let mut size = self.opts.font.size;
        let mut measured = env.text.measure(&self.opts.text, &self.style(size))?;
        while size > MIN_FONT_SIZE && !fits(measured) {
            size -= 1;
            measured = env.text.measure(&self.opts.text, &self.style(size))?;
        }
        if !fits(measured) {
            env.diagnostics.warn(
                WarningKind::TextOverflow,
                format!(
                    "text \"{}\" needs {}x{} px at size {size} but only {}x{} px are available",
                    self.opts.text, measured.x, measured.y, bounds.x, bounds.y
                ),
            );
        }
        tracing::debug!(size, w = measured.x, h = measured.y, "text sized");

        // Anchor point inside the canvas, then the block's corner relative to it.
        let point = Vec2i::new(self.anchor.x * (bounds.x / 2), self.anchor.y * (bounds.y / 2));
        let origin = Vec2i::new(
            point.x - self.anchor.x * (measured.x / 2),
            point.y - self.anchor.y * (measured.y / 2),
        );

        let (w, h) = bounds.extent();
        let mut canvas = RgbaImage::new(w, h);
        env.text
            .draw(&mut canvas, origin, &self.opts.text, &self.style(size))?;
        Ok(canvas)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/feature.rs"]
mod tests;
