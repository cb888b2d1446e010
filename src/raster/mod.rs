//! Premultiplied RGBA8 compositing, shape coverage masks and panel orientation transforms.

pub(crate) mod composite;
pub(crate) mod orient;
pub(crate) mod shape;
