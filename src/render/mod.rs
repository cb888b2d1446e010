//! Panel and page rendering.

pub(crate) mod background;
pub(crate) mod feature;
pub(crate) mod section;
pub(crate) mod tuck_box;

pub use feature::MIN_FONT_SIZE;
pub use tuck_box::{RenderedPage, TuckBox};
