use std::path::Path;

use image::{GrayImage, RgbaImage};
use rayon::prelude::*;

use crate::assets::text::TextRasterizer;
use crate::config::BoxConfig;
use crate::foundation::core::Vec2i;
use crate::foundation::diag::Diagnostics;
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::layout::geometry::BoxGeometry;
use crate::layout::panel::PanelSpec;
use crate::raster::composite::{
    apply_inverted_mask, apply_mask, over_at, over_in_place, transparent, union_mask_at,
    unpremultiply,
};
use crate::render::background::render_background;
use crate::render::section::{Section, SectionLayers};

/// Glue tab width kept free of the page background, in pixels.
const GLUE_TAB_BLEED: i32 = 50;

/// A finished page: straight-alpha RGBA8 plus the warnings raised while producing it.
#[derive(Debug)]
pub struct RenderedPage {
    /// Page raster, printable-area sized.
    pub image: RgbaImage,
    /// Soft constraint violations, configuration warnings first, then per panel in layout order.
    pub diagnostics: Diagnostics,
}

impl RenderedPage {
    /// Encode the page as PNG.
    pub fn save_png(&self, path: impl AsRef<Path>) -> TuckboxResult<()> {
        let path = path.as_ref();
        let (w, h) = self.image.dimensions();
        image::save_buffer_with_format(
            path,
            self.image.as_raw(),
            w,
            h,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| TuckboxError::Other(anyhow::anyhow!("write '{}': {e}", path.display())))
    }
}

/// A tuck box whose geometry has been derived, checked against the page and laid out.
pub struct TuckBox {
    config: BoxConfig,
    geometry: BoxGeometry,
    sections: Vec<Section>,
}

impl TuckBox {
    /// Derive geometry, check that the template fits the page, and place every panel.
    ///
    /// Fails with [`TuckboxError::Layout`] before any raster work if the template is too large.
    pub fn new(config: BoxConfig) -> TuckboxResult<Self> {
        let geometry = BoxGeometry::derive(&config);
        geometry.validate_fit()?;
        tracing::info!(
            page_w = geometry.page.x,
            page_h = geometry.page.y,
            size_w = geometry.size.x,
            size_h = geometry.size.y,
            "template fits page"
        );

        let sections = geometry
            .layout_panels(&config)
            .into_iter()
            .map(|spec| Section::new(spec, config.section(spec.name).clone()))
            .collect();

        Ok(Self {
            config,
            geometry,
            sections,
        })
    }

    /// Derived pixel geometry.
    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    /// Resolved configuration.
    pub fn config(&self) -> &BoxConfig {
        &self.config
    }

    /// Panels in layout order.
    pub fn panels(&self) -> impl Iterator<Item = &PanelSpec> + '_ {
        self.sections.iter().map(Section::spec)
    }

    /// Render every panel and composite the page.
    ///
    /// Panels render in parallel; their layers are composited in layout order.
    #[tracing::instrument(skip_all)]
    pub fn generate(&self, text: &dyn TextRasterizer) -> TuckboxResult<RenderedPage> {
        let border = self.config.border;
        let layers: Vec<TuckboxResult<SectionLayers>> = self
            .sections
            .par_iter()
            .map(|s| s.render_layers(text, &border))
            .collect();
        let layers = layers.into_iter().collect::<TuckboxResult<Vec<_>>>()?;

        let mut diagnostics = self.config.diagnostics().clone();
        let mut image = self.compose_page(&layers)?;
        for l in layers {
            diagnostics.extend(l.diagnostics);
        }
        unpremultiply(&mut image);
        Ok(RenderedPage { image, diagnostics })
    }

    fn origin(&self, spec: &PanelSpec) -> Vec2i {
        self.geometry.pos + spec.pos
    }

    /// Merge panel layers into one premultiplied page.
    ///
    /// Background under the union mask, content over it, then the border ring with the
    /// interior removed.
    fn compose_page(&self, layers: &[SectionLayers]) -> TuckboxResult<RgbaImage> {
        let g = &self.geometry;
        let (pw, ph) = g.page.extent();

        let mut mask = GrayImage::new(pw, ph);
        for (s, l) in self.sections.iter().zip(layers) {
            union_mask_at(&mut mask, &l.mask, self.origin(s.spec()));
        }

        let mut page = transparent(g.page);
        if self.config.background.is_set() {
            let inset = (g.tabs.x - GLUE_TAB_BLEED).max(0);
            let bg = render_background(&self.config.background, Vec2i::new(g.size.x - inset, g.size.y))?;
            over_at(&mut page, &bg, g.pos + Vec2i::new(inset, 0));
            apply_mask(&mut page, &mask)?;
        }

        let mut content = transparent(g.page);
        for (s, l) in self.sections.iter().zip(layers) {
            over_at(&mut content, &l.content, self.origin(s.spec()));
        }
        over_in_place(&mut page, &content)?;

        let w = self.config.border.width as i32;
        let mut border = transparent(g.page);
        for (s, l) in self.sections.iter().zip(layers) {
            over_at(&mut border, &l.border, self.origin(s.spec()) - Vec2i::new(w, w));
        }
        apply_inverted_mask(&mut border, &mask)?;
        over_in_place(&mut page, &border)?;

        Ok(page)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tuck_box.rs"]
mod tests;
