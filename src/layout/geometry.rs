use crate::config::{BoxConfig, PageConfig};
use crate::foundation::core::{Dim3, Vec2i};
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::foundation::math::floor_div;
use crate::layout::panel::{Orientation, PanelName, PanelSpec, ShapeKind};

/// Width lost from the glue tab relative to the box depth, in pixels.
pub const GLUE_TAB_INSET: i32 = 20;

/// Pixel geometry of the unfolded box, derived from physical measurements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoxGeometry {
    /// Printable page area.
    pub page: Vec2i,
    /// Face dimensions including the thickness allowance.
    pub dim: Dim3<i32>,
    /// `x`: glue tab width, `y`: tuck tab height.
    pub tabs: Vec2i,
    /// Total unfolded template size.
    pub size: Vec2i,
    /// Offset that centers the template on the page.
    pub pos: Vec2i,
    /// Thickness allowance in pixels.
    pub thickness: i32,
}

/// Printable area: `floor((page - margin) * resolution)` per axis.
pub fn derive_page_geometry(page: &PageConfig, resolution: u32) -> Vec2i {
    let res = f64::from(resolution);
    Vec2i::new(
        ((page.width - page.margin) * res).floor() as i32,
        ((page.height - page.margin) * res).floor() as i32,
    )
}

/// Face dimensions and tab sizes.
pub fn derive_box_geometry(
    dimensions: Dim3<f64>,
    resolution: u32,
    thickness: u32,
) -> (Dim3<i32>, Vec2i) {
    let res = f64::from(resolution);
    let t = thickness as i32;
    let dim = dimensions.scaled(res).floor_i32().map(|v| v + t);
    let tabs = Vec2i::new(
        dim.depth - GLUE_TAB_INSET,
        (res * 0.75).floor() as i32,
    );
    (dim, tabs)
}

/// Unfolded size and the offset centering it on `page`.
pub fn derive_size_and_position(page: Vec2i, dim: Dim3<i32>, tabs: Vec2i) -> (Vec2i, Vec2i) {
    let size = Vec2i::new(
        tabs.x + 2 * dim.depth + 2 * dim.width,
        2 * tabs.y + 2 * dim.depth + dim.height,
    );
    let pos = Vec2i::new(floor_div(page.x - size.x, 2), floor_div(page.y - size.y, 2));
    (size, pos)
}

impl BoxGeometry {
    /// Derive all pixel geometry for `cfg`. Does not check the fit.
    pub fn derive(cfg: &BoxConfig) -> Self {
        let page = derive_page_geometry(&cfg.page, cfg.resolution);
        let (dim, tabs) = derive_box_geometry(cfg.dimensions, cfg.resolution, cfg.page.thickness);
        let (size, pos) = derive_size_and_position(page, dim, tabs);
        Self {
            page,
            dim,
            tabs,
            size,
            pos,
            thickness: cfg.page.thickness as i32,
        }
    }

    /// Fails when the template does not fit strictly inside the page, or when a panel would
    /// collapse to zero size.
    pub fn validate_fit(&self) -> TuckboxResult<()> {
        if self.size.x >= self.page.x || self.size.y >= self.page.y {
            return Err(TuckboxError::layout(format!(
                "template {}x{} px does not fit the printable page {}x{} px; reduce the box dimensions or resolution",
                self.size.x, self.size.y, self.page.x, self.page.y
            )));
        }
        let o = self.thickness;
        let checks = [
            ("glue tab width", self.tabs.x),
            ("tuck tab height", self.tabs.y),
            ("tuck tab width", self.dim.width - 2 * o),
            ("side tab width", self.dim.depth - 2 * o),
        ];
        for (what, v) in checks {
            if v <= 0 {
                return Err(TuckboxError::layout(format!(
                    "{what} is {v} px; increase the box depth or resolution"
                )));
            }
        }
        Ok(())
    }

    /// Place every panel, applying per-panel `rotated`/`orientation` overrides from `cfg`.
    pub fn layout_panels(&self, cfg: &BoxConfig) -> Vec<PanelSpec> {
        let tab = self.tabs;
        let d = self.dim;
        let o = self.thickness;
        let (dx, dy, dz) = (d.width, d.height, d.depth);
        let land = Orientation::Landscape;

        let at = |name, x, y, w, h| PanelSpec::new(name, Vec2i::new(x, y), Vec2i::new(w, h));
        let side_tab = |name, x, y, flip_h, flip_v| PanelSpec {
            shape: ShapeKind::SideTab,
            flip_h,
            flip_v,
            ..at(name, x, y, dz - 2 * o, dz)
        };

        let panels = [
            PanelSpec {
                shape: ShapeKind::GlueTab,
                ..at(PanelName::GlueTab, 0, tab.y + dz, tab.x, dy)
            },
            PanelSpec {
                shape: ShapeKind::Back,
                cutin: tab.y,
                ..at(PanelName::Back, tab.x, tab.y + dz, dx, dy)
            },
            PanelSpec {
                rotated: true,
                orientation: land,
                ..at(PanelName::Left, tab.x + dx, tab.y + dz, dy, dz)
            },
            at(PanelName::Front, tab.x + dx + dz, tab.y + dz, dx, dy),
            PanelSpec {
                orientation: land,
                ..at(PanelName::Right, tab.x + 2 * dx + dz, tab.y + dz, dy, dz)
            },
            PanelSpec {
                rotated: true,
                orientation: land,
                print_orientation: land,
                ..at(PanelName::Bottom, tab.x, tab.y + dz + dy, dx, dz)
            },
            PanelSpec {
                shape: ShapeKind::TuckTab,
                orientation: land,
                print_orientation: land,
                ..at(PanelName::BottomTab, tab.x + o, tab.y + 2 * dz + dy, dx - 2 * o, tab.y)
            },
            PanelSpec {
                rotated: true,
                orientation: land,
                print_orientation: land,
                ..at(PanelName::Top, tab.x + dx + dz, tab.y, dx, dz)
            },
            PanelSpec {
                shape: ShapeKind::TuckTab,
                rotated: true,
                orientation: land,
                print_orientation: land,
                ..at(PanelName::TopTab, tab.x + dx + dz + o, 0, dx - 2 * o, tab.y)
            },
            side_tab(PanelName::LtTab, tab.x + dx + o, tab.y, false, false),
            side_tab(PanelName::RtTab, tab.x + 2 * dx + dz + o, tab.y, true, false),
            side_tab(PanelName::LbTab, tab.x + dx + o, tab.y + dz + dy, false, true),
            side_tab(PanelName::RbTab, tab.x + 2 * dx + dz + o, tab.y + dz + dy, true, true),
        ];

        panels
            .into_iter()
            .map(|mut spec| {
                let section = cfg.section(spec.name);
                if let Some(rotated) = section.rotated {
                    spec.rotated = rotated;
                }
                if let Some(orientation) = section.orientation {
                    spec.orientation = orientation;
                }
                spec.size = spec.orientation.normalize(spec.size);
                tracing::debug!(
                    panel = %spec.name,
                    x = spec.pos.x,
                    y = spec.pos.y,
                    w = spec.size.x,
                    h = spec.size.y,
                    "panel placed"
                );
                spec
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/geometry.rs"]
mod tests;
