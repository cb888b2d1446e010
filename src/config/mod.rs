//! JSON configuration: boundary `*Def` structs and their resolution into immutable snapshots.

pub(crate) mod color;
pub(crate) mod model;
pub(crate) mod resolve;
pub(crate) mod sample;

pub use resolve::{
    BackgroundConfig, BorderConfig, BoxConfig, FeatureConfig, FeatureKind, FontConfig,
    ImageOptions, PageConfig, PanelOptions, SectionConfig, TextOptions,
};
