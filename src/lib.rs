//! Tuckbox turns a box description (outer dimensions, page, margins, material thickness and
//! print resolution) into a printable template for an unfolded tuck box.
//!
//! - Load a [`BoxConfig`] from JSON
//! - Build a [`TuckBox`], which derives pixel geometry and fails early if the template does
//!   not fit the page
//! - [`TuckBox::generate`] renders every panel and composites the page
//!
//! Text is drawn through the [`TextRasterizer`] trait; [`ParleyText`] is the bundled
//! implementation.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod layout;
mod raster;
mod render;

pub use crate::assets::text::{ParleyText, TextAlign, TextRasterizer, TextStyle};
pub use crate::config::sample::SAMPLE_CONFIG;
pub use crate::config::{
    BackgroundConfig, BorderConfig, BoxConfig, FeatureConfig, FeatureKind, FontConfig,
    ImageOptions, PageConfig, PanelOptions, SectionConfig, TextOptions,
};
pub use crate::foundation::core::{Dim3, Rgba8Premul, Vec2i};
pub use crate::foundation::diag::{Diagnostics, Warning, WarningKind};
pub use crate::foundation::error::{TuckboxError, TuckboxResult};
pub use crate::layout::{
    BoxGeometry, FeatureGrid, GLUE_TAB_INSET, Orientation, PanelName, PanelSpec, ShapeKind,
    derive_box_geometry, derive_page_geometry, derive_size_and_position,
};
pub use crate::render::{MIN_FONT_SIZE, RenderedPage, TuckBox};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
pub(crate) mod test_support;
