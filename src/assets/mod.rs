//! External resources: raster images and fonts.

pub(crate) mod image;
pub(crate) mod text;
