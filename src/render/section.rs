use std::sync::Arc;

use image::{GrayImage, RgbaImage};

use crate::assets::text::TextRasterizer;
use crate::config::{BorderConfig, FeatureConfig, SectionConfig};
use crate::foundation::core::Vec2i;
use crate::foundation::diag::{Diagnostics, WarningKind};
use crate::foundation::error::TuckboxResult;
use crate::layout::grid::FeatureGrid;
use crate::layout::panel::PanelSpec;
use crate::raster::composite::{apply_mask, over_at, over_in_place, solid, transparent};
use crate::raster::orient::orient;
use crate::raster::shape::shape_mask;
use crate::render::background::render_background;
use crate::render::feature::{FeatureRender, RenderEnv, feature_renderer};

/// Usable interior kept free on the smaller axis when shrinking the margin.
const MIN_INTERIOR: i32 = 10;

/// The three page-oriented rasters of one panel.
pub(crate) struct SectionLayers {
    pub(crate) content: RgbaImage,
    pub(crate) mask: GrayImage,
    pub(crate) border: RgbaImage,
    pub(crate) diagnostics: Diagnostics,
}

/// One panel ready to render: placement, effective configuration and feature renderers.
pub(crate) struct Section {
    spec: PanelSpec,
    config: Arc<SectionConfig>,
    features: Vec<Box<dyn FeatureRender>>,
}

impl Section {
    pub(crate) fn new(spec: PanelSpec, config: Arc<SectionConfig>) -> Self {
        let features = config.features.iter().map(feature_renderer).collect();
        Self {
            spec,
            config,
            features,
        }
    }

    pub(crate) fn spec(&self) -> &PanelSpec {
        &self.spec
    }

    /// Margin in pixels, shrunk one pixel at a time until at least [`MIN_INTERIOR`] pixels
    /// remain on both axes, or it reaches zero.
    pub(crate) fn effective_margin(&self) -> i32 {
        let size = self.spec.size;
        let mut margin = (self.config.margin * f64::from(self.config.resolution)).floor() as i32;
        while margin > 0 && 2 * margin + MIN_INTERIOR > size.min_axis() {
            margin -= 1;
        }
        margin.max(0)
    }

    /// Interior rectangle features may occupy.
    pub(crate) fn hard_bounds(&self, margin: i32) -> Vec2i {
        self.spec.size - Vec2i::new(2 * margin, 2 * margin)
    }

    /// Render rectangle for `feature` inside `hard`.
    ///
    /// With both axes requested the request keeps its aspect ratio and shrinks to fit. With one
    /// axis requested that axis is used if strictly smaller than the interior, else the full
    /// interior with a warning.
    pub(crate) fn feature_bounds(
        &self,
        feature: &FeatureConfig,
        hard: Vec2i,
        diagnostics: &mut Diagnostics,
    ) -> Vec2i {
        let res = f64::from(self.config.resolution);
        let px = |v: f64| (v * res).floor() as i32;

        match (feature.width.map(px), feature.height.map(px)) {
            (Some(rw), Some(rh)) => {
                if rw <= hard.x && rh <= hard.y {
                    return Vec2i::new(rw, rh);
                }
                if rh <= 0 || hard.y <= 0 {
                    return hard;
                }
                let feature_ratio = f64::from(rw) / f64::from(rh);
                let bounds_ratio = f64::from(hard.x) / f64::from(hard.y);
                if feature_ratio < bounds_ratio {
                    Vec2i::new((f64::from(hard.y) * feature_ratio) as i32, hard.y)
                } else {
                    Vec2i::new(hard.x, (f64::from(hard.x) / feature_ratio) as i32)
                }
            }
            (Some(rw), None) => {
                if rw < hard.x {
                    Vec2i::new(rw, hard.y)
                } else {
                    self.overflow(feature, "width", rw, hard.x, diagnostics);
                    hard
                }
            }
            (None, Some(rh)) => {
                if rh < hard.y {
                    Vec2i::new(hard.x, rh)
                } else {
                    self.overflow(feature, "height", rh, hard.y, diagnostics);
                    hard
                }
            }
            (None, None) => hard,
        }
    }

    fn overflow(
        &self,
        feature: &FeatureConfig,
        axis: &str,
        requested: i32,
        available: i32,
        diagnostics: &mut Diagnostics,
    ) {
        diagnostics.warn(
            WarningKind::FeatureOverflow,
            format!(
                "{} feature on {}: requested {axis} {requested} px exceeds the {available} px interior",
                feature.kind.name(),
                self.spec.name
            ),
        );
    }

    fn shape(&self, size: Vec2i) -> TuckboxResult<GrayImage> {
        shape_mask(self.spec.shape, size, self.spec.cutin)
    }

    /// Features composited on a transparent panel-sized layer, unmasked and unoriented.
    pub(crate) fn render_features(&self, env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage> {
        let size = self.spec.size;
        let mut layer = transparent(size);

        let margin = self.effective_margin();
        let hard = self.hard_bounds(margin);
        let grid = FeatureGrid::new(self.config.grid, size, margin)?;

        for (cfg, renderer) in self.config.features.iter().zip(&self.features) {
            let point = grid.get_pos(cfg.place)?;
            let bounds = self.feature_bounds(cfg, hard, env.diagnostics);
            let img = renderer.render(bounds, env)?;
            let (fw, fh) = img.dimensions();
            let at = Vec2i::new(
                point.x - cfg.anchor.x * (fw as i32 / 2),
                point.y - cfg.anchor.y * (fh as i32 / 2),
            );
            over_at(&mut layer, &img, at);
        }
        Ok(layer)
    }

    /// Background and features cut to the panel shape, oriented for the page.
    pub(crate) fn render(&self, env: &mut RenderEnv<'_>) -> TuckboxResult<RgbaImage> {
        let size = self.spec.size;
        let mask = self.shape(size)?;

        let mut content = render_background(&self.config.background, size)?;
        apply_mask(&mut content, &mask)?;

        if !self.features.is_empty() {
            let mut features = self.render_features(env)?;
            apply_mask(&mut features, &mask)?;
            over_in_place(&mut content, &features)?;
        }
        Ok(orient(content, &self.spec))
    }

    /// Shape coverage, oriented for the page.
    pub(crate) fn render_mask(&self) -> TuckboxResult<GrayImage> {
        Ok(orient(self.shape(self.spec.size)?, &self.spec))
    }

    /// Shape grown by `width` on every side and filled with `color`, oriented for the page.
    pub(crate) fn render_border(&self, border: &BorderConfig) -> TuckboxResult<RgbaImage> {
        let w = border.width as i32;
        let size = self.spec.size + Vec2i::new(2 * w, 2 * w);
        let mut ring = solid(size, border.color);
        apply_mask(&mut ring, &self.shape(size)?)?;
        Ok(orient(ring, &self.spec))
    }

    /// All three layers plus the warnings raised while rendering them.
    pub(crate) fn render_layers(
        &self,
        text: &dyn TextRasterizer,
        border: &BorderConfig,
    ) -> TuckboxResult<SectionLayers> {
        let _span = tracing::debug_span!("panel", name = %self.spec.name).entered();
        let mut diagnostics = Diagnostics::new();
        let content = {
            let mut env = RenderEnv {
                text,
                diagnostics: &mut diagnostics,
            };
            self.render(&mut env)?
        };
        let mask = self.render_mask()?;
        let border = self.render_border(border)?;
        Ok(SectionLayers {
            content,
            mask,
            border,
            diagnostics,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/section.rs"]
mod tests;
