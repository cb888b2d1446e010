//! Pixel geometry of the unfolded box, panel placement and feature grids.

pub(crate) mod geometry;
pub(crate) mod grid;
pub(crate) mod panel;

pub use geometry::{
    BoxGeometry, GLUE_TAB_INSET, derive_box_geometry, derive_page_geometry,
    derive_size_and_position,
};
pub use grid::FeatureGrid;
pub use panel::{Orientation, PanelName, PanelSpec, ShapeKind};
