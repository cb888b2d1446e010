use crate::config::color::ColorDef;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BoxDef {
    pub(crate) dimensions: DimensionsDef,
    #[serde(default)]
    pub(crate) page: PageDef,
    #[serde(default)]
    pub(crate) common: CommonDef,
    #[serde(default)]
    pub(crate) background: Option<BackgroundDef>,
    #[serde(default)]
    pub(crate) border: Option<BorderDef>,
    #[serde(default)]
    pub(crate) basic: Option<BasicDef>,
    #[serde(default)]
    pub(crate) detail: BTreeMap<DetailKey, SectionDef>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct DimensionsDef {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) depth: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct PageDef {
    pub(crate) width: f64,
    pub(crate) height: f64,
    pub(crate) margin: f64,
    pub(crate) thickness: u32,
}

impl Default for PageDef {
    fn default() -> Self {
        Self {
            width: 11.0,
            height: 8.5,
            margin: 0.25,
            thickness: 4,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CommonDef {
    #[serde(default)]
    pub(crate) font: Option<FontDef>,
    #[serde(default)]
    pub(crate) margin: Option<f64>,
    #[serde(default)]
    pub(crate) image_source: Option<String>,
    #[serde(default)]
    pub(crate) font_source: Option<String>,
    #[serde(default)]
    pub(crate) resolution: Option<u32>,
}

/// Partial font settings; unset fields inherit from the enclosing block.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FontDef {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) size: Option<u32>,
    #[serde(default)]
    pub(crate) color: Option<ColorDef>,
    #[serde(default)]
    pub(crate) stroke: Option<ColorDef>,
    #[serde(default)]
    pub(crate) width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BackgroundDef {
    #[serde(default)]
    pub(crate) color: Option<ColorDef>,
    #[serde(default)]
    pub(crate) image: Option<String>,
    #[serde(default)]
    pub(crate) image_source: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct BorderDef {
    #[serde(default)]
    pub(crate) color: Option<ColorDef>,
    #[serde(default)]
    pub(crate) width: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub(crate) struct BasicDef {
    pub(crate) title: String,
    pub(crate) subtitle: String,
    pub(crate) extra: String,
}

impl BasicDef {
    pub(crate) fn is_set(&self) -> bool {
        !self.title.is_empty() || !self.extra.is_empty()
    }
}

/// Keys accepted under `detail`: one panel, or a group of panels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub(crate) enum DetailKey {
    GlueTab,
    Back,
    Left,
    Front,
    Right,
    Bottom,
    BottomTab,
    Top,
    TopTab,
    LtTab,
    RtTab,
    LbTab,
    RbTab,
    Sides,
    Ends,
    Faces,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct SectionDef {
    #[serde(default)]
    pub(crate) background: Option<BackgroundDef>,
    #[serde(default)]
    pub(crate) rotated: Option<bool>,
    #[serde(default)]
    pub(crate) orientation: Option<String>,
    #[serde(default)]
    pub(crate) margin: Option<f64>,
    #[serde(default)]
    pub(crate) grid: Option<[u32; 2]>,
    #[serde(default)]
    pub(crate) features: Vec<FeatureDef>,
}

/// Feature entry. `options` is decoded once `type` is known.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct FeatureDef {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) options: Option<serde_json::Value>,
    #[serde(default)]
    pub(crate) width: Option<f64>,
    #[serde(default)]
    pub(crate) height: Option<f64>,
    #[serde(default)]
    pub(crate) place: Option<[u32; 2]>,
    #[serde(default)]
    pub(crate) anchor: Option<[u32; 2]>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct PanelOptionsDef {
    #[serde(default)]
    pub(crate) color: Option<ColorDef>,
    #[serde(default)]
    pub(crate) border: Option<ColorDef>,
    #[serde(default)]
    pub(crate) border_width: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum TextDef {
    Line(String),
    Lines(Vec<String>),
}

impl TextDef {
    pub(crate) fn joined(&self) -> String {
        match self {
            Self::Line(s) => s.clone(),
            Self::Lines(lines) => lines.join("\n"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct TextOptionsDef {
    pub(crate) text: TextDef,
    #[serde(default)]
    pub(crate) align: Option<String>,
    #[serde(default)]
    pub(crate) font: Option<FontDef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct ImageOptionsDef {
    pub(crate) image: String,
    #[serde(default)]
    pub(crate) image_source: Option<String>,
}
