use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::text::TextAlign;
use crate::config::color::ColorDef;
use crate::config::model::{
    BackgroundDef, BasicDef, BoxDef, DetailKey, FeatureDef, FontDef, ImageOptionsDef,
    PanelOptionsDef, SectionDef, TextOptionsDef,
};
use crate::foundation::core::{Dim3, Rgba8Premul, Vec2i};
use crate::foundation::diag::{Diagnostics, Warning, WarningKind};
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::layout::panel::{Orientation, PanelName};

/// Physical page settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageConfig {
    /// Page width in physical units (always the longer side after resolution).
    pub width: f64,
    /// Page height in physical units.
    pub height: f64,
    /// Unprintable margin in physical units.
    pub margin: f64,
    /// Material thickness allowance in pixels.
    pub thickness: u32,
}

/// Font settings after inheritance has been applied.
#[derive(Clone, Debug, PartialEq)]
pub struct FontConfig {
    /// Resolved font file path.
    pub path: PathBuf,
    /// Starting size in pixels; text shrinks from here to fit.
    pub size: u32,
    /// Fill color.
    pub color: Rgba8Premul,
    /// Outline color.
    pub stroke: Rgba8Premul,
    /// Outline width in pixels.
    pub stroke_width: u32,
}

/// Background fill for the page or a single panel.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BackgroundConfig {
    /// Solid color, used when no image is configured.
    pub color: Option<Rgba8Premul>,
    /// Resolved image path; takes precedence over `color`.
    pub image: Option<PathBuf>,
}

impl BackgroundConfig {
    /// Whether either a color or an image is configured.
    pub fn is_set(&self) -> bool {
        self.color.is_some() || self.image.is_some()
    }
}

/// Outline ring drawn around every panel on the page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderConfig {
    /// Ring color.
    pub color: Rgba8Premul,
    /// Ring width in pixels.
    pub width: u32,
}

/// Options for a flat color panel feature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelOptions {
    /// Fill color.
    pub color: Rgba8Premul,
    /// Outline color.
    pub border: Rgba8Premul,
    /// Outline width in pixels, drawn inside the feature rectangle.
    pub border_width: u32,
}

/// Options for a text feature.
#[derive(Clone, Debug, PartialEq)]
pub struct TextOptions {
    /// Text to render; lines separated by `\n`.
    pub text: String,
    /// Horizontal line alignment.
    pub align: TextAlign,
    /// Effective font.
    pub font: FontConfig,
}

/// Options for an image feature.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageOptions {
    /// Resolved image path.
    pub path: PathBuf,
}

/// Feature variant with its options.
#[derive(Clone, Debug, PartialEq)]
pub enum FeatureKind {
    /// Flat color rectangle.
    Panel(PanelOptions),
    /// Auto-sized text.
    Text(TextOptions),
    /// Raster image.
    Image(ImageOptions),
}

impl FeatureKind {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Panel(_) => "panel",
            Self::Text(_) => "text",
            Self::Image(_) => "image",
        }
    }
}

/// One decorative element placed on a panel grid.
#[derive(Clone, Debug, PartialEq)]
pub struct FeatureConfig {
    /// Variant and options.
    pub kind: FeatureKind,
    /// Requested width in physical units.
    pub width: Option<f64>,
    /// Requested height in physical units.
    pub height: Option<f64>,
    /// Grid coordinate.
    pub place: Vec2i,
    /// Anchor per axis: 0 start, 1 center, 2 end.
    pub anchor: Vec2i,
}

impl FeatureConfig {
    /// Feature with default placement `(1, 1)` and centered anchor.
    pub fn new(kind: FeatureKind) -> Self {
        Self {
            kind,
            width: None,
            height: None,
            place: Vec2i::new(1, 1),
            anchor: Vec2i::new(1, 1),
        }
    }
}

/// Effective configuration of one panel.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionConfig {
    /// Panel background; unset means transparent.
    pub background: BackgroundConfig,
    /// Overrides the layout's 180° rotation when set.
    pub rotated: Option<bool>,
    /// Overrides the layout's working orientation when set.
    pub orientation: Option<Orientation>,
    /// Margin in physical units.
    pub margin: f64,
    /// Pixels per physical unit.
    pub resolution: u32,
    /// Grid cell counts per axis.
    pub grid: Vec2i,
    /// Features in declaration order.
    pub features: Vec<FeatureConfig>,
}

impl SectionConfig {
    fn with_common(common: &Common) -> Self {
        Self {
            background: BackgroundConfig::default(),
            rotated: None,
            orientation: None,
            margin: common.margin,
            resolution: common.resolution,
            grid: Vec2i::new(2, 2),
            features: Vec::new(),
        }
    }
}

/// Fully resolved and validated box configuration.
///
/// Built once from a JSON document; every panel reads an immutable [`SectionConfig`] snapshot.
#[derive(Clone, Debug)]
pub struct BoxConfig {
    /// Outer box dimensions in physical units.
    pub dimensions: Dim3<f64>,
    /// Page settings.
    pub page: PageConfig,
    /// Pixels per physical unit.
    pub resolution: u32,
    /// Page-level background shown inside panel shapes.
    pub background: BackgroundConfig,
    /// Panel outline ring.
    pub border: BorderConfig,
    sections: Vec<Arc<SectionConfig>>,
    diagnostics: Diagnostics,
}

impl BoxConfig {
    /// Parse and resolve a configuration file. Relative asset directories are resolved against
    /// the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> TuckboxResult<Self> {
        let path = path.as_ref();
        let f = std::fs::File::open(path).map_err(|e| {
            TuckboxError::validation(format!("open config '{}': {e}", path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader(f, base)
    }

    /// Parse and resolve a configuration from any reader.
    pub fn from_reader(reader: impl Read, base_dir: impl AsRef<Path>) -> TuckboxResult<Self> {
        let def: BoxDef = serde_json::from_reader(reader)
            .map_err(|e| TuckboxError::validation(format!("parse config: {e}")))?;
        Self::resolve(def, base_dir.as_ref())
    }

    /// Parse and resolve a configuration held in memory.
    pub fn from_json_str(json: &str, base_dir: impl AsRef<Path>) -> TuckboxResult<Self> {
        let def: BoxDef = serde_json::from_str(json)
            .map_err(|e| TuckboxError::validation(format!("parse config: {e}")))?;
        Self::resolve(def, base_dir.as_ref())
    }

    /// Effective configuration for a panel.
    pub fn section(&self, name: PanelName) -> &Arc<SectionConfig> {
        &self.sections[name.index()]
    }

    /// Warnings raised while resolving (e.g. page orientation corrections).
    pub fn warnings(&self) -> &[Warning] {
        self.diagnostics.warnings()
    }

    pub(crate) fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    #[tracing::instrument(skip_all)]
    fn resolve(def: BoxDef, base_dir: &Path) -> TuckboxResult<Self> {
        let mut diagnostics = Diagnostics::new();

        let d = def.dimensions;
        for (name, v) in [("width", d.width), ("height", d.height), ("depth", d.depth)] {
            require_positive(&format!("dimensions.{name}"), v)?;
        }
        let dimensions = Dim3::new(d.width, d.height, d.depth);

        let page = resolve_page(&def, &mut diagnostics)?;
        let common = Common::resolve(&def, base_dir)?;

        let background = match &def.background {
            Some(bg) => resolve_background(bg, &common, "background")?,
            None => BackgroundConfig::default(),
        };

        let border_def = def.border.unwrap_or_default();
        let border = BorderConfig {
            color: border_def
                .color
                .map(ColorDef::to_rgba8_premul)
                .unwrap_or(Rgba8Premul::opaque(0, 0, 0)),
            width: border_def.width.unwrap_or(4),
        };

        let mut resolved: HashMap<DetailKey, SectionConfig> = HashMap::new();
        for (key, section) in &def.detail {
            resolved.insert(*key, resolve_section(section, &common, *key)?);
        }
        let defaults = SectionConfig::with_common(&common);

        let basic = def.basic.as_ref().filter(|b| b.is_set());
        let mut shared: HashMap<(Option<DetailKey>, BasicRole), Arc<SectionConfig>> =
            HashMap::new();
        let mut sections = Vec::with_capacity(PanelName::ALL.len());
        for name in PanelName::ALL {
            let source = lookup_key(name, &resolved);
            let role = match basic {
                Some(_) => BasicRole::of(name),
                None => BasicRole::None,
            };
            let section = shared
                .entry((source, role))
                .or_insert_with(|| {
                    let mut cfg = source
                        .and_then(|k| resolved.get(&k))
                        .cloned()
                        .unwrap_or_else(|| defaults.clone());
                    if let Some(basic) = basic {
                        add_basic_features(&mut cfg, role, basic, &common);
                    }
                    Arc::new(cfg)
                })
                .clone();
            sections.push(section);
        }

        tracing::debug!(
            resolution = common.resolution,
            panels = sections.len(),
            "configuration resolved"
        );

        Ok(Self {
            dimensions,
            page,
            resolution: common.resolution,
            background,
            border,
            sections,
            diagnostics,
        })
    }
}

/// Inherited settings shared by every section and feature.
#[derive(Clone, Debug)]
struct Common {
    base_dir: PathBuf,
    font: FontConfig,
    margin: f64,
    image_source: PathBuf,
    font_source: PathBuf,
    resolution: u32,
}

impl Common {
    fn resolve(def: &BoxDef, base_dir: &Path) -> TuckboxResult<Self> {
        let c = &def.common;
        let margin = c.margin.unwrap_or(0.1);
        if !margin.is_finite() || margin <= 0.0 {
            return Err(TuckboxError::validation(format!(
                "common.margin must be > 0, got {margin}"
            )));
        }
        let resolution = c.resolution.unwrap_or(300);
        if resolution == 0 {
            return Err(TuckboxError::validation("common.resolution must be > 0"));
        }
        let image_source = base_dir.join(c.image_source.as_deref().unwrap_or("."));
        let font_source = base_dir.join(c.font_source.as_deref().unwrap_or("."));

        let base_font = FontConfig {
            path: font_source.join("Arial.ttf"),
            size: 90,
            color: Rgba8Premul::opaque(0, 0, 0),
            stroke: Rgba8Premul::opaque(255, 255, 255),
            stroke_width: 1,
        };
        let font = match &c.font {
            Some(f) => merge_font(&base_font, f, &font_source, "common.font")?,
            None => base_font,
        };

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            font,
            margin,
            image_source,
            font_source,
            resolution,
        })
    }
}

impl Common {
    /// Image directory for a block: its own `image_source` replaces the common one.
    fn image_dir(&self, own: Option<&str>) -> PathBuf {
        match own {
            Some(dir) => self.base_dir.join(dir),
            None => self.image_source.clone(),
        }
    }
}

fn require_positive(what: &str, v: f64) -> TuckboxResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(TuckboxError::validation(format!(
            "{what} must be > 0, got {v}"
        )))
    }
}

fn resolve_page(def: &BoxDef, diag: &mut Diagnostics) -> TuckboxResult<PageConfig> {
    let p = def.page;
    require_positive("page.width", p.width)?;
    require_positive("page.height", p.height)?;
    if !p.margin.is_finite() || p.margin < 0.0 {
        return Err(TuckboxError::validation(format!(
            "page.margin must be >= 0, got {}",
            p.margin
        )));
    }

    let (width, height) = if p.height > p.width {
        diag.warn(
            WarningKind::PageOrientation,
            format!(
                "page {}x{} is portrait; using landscape {}x{}",
                p.width, p.height, p.height, p.width
            ),
        );
        (p.height, p.width)
    } else {
        (p.width, p.height)
    };

    if p.margin >= height {
        return Err(TuckboxError::validation(format!(
            "page.margin {} leaves no printable area",
            p.margin
        )));
    }

    Ok(PageConfig {
        width,
        height,
        margin: p.margin,
        thickness: p.thickness,
    })
}

fn merge_font(
    parent: &FontConfig,
    def: &FontDef,
    font_source: &Path,
    ctx: &str,
) -> TuckboxResult<FontConfig> {
    let path = match &def.name {
        Some(name) => {
            let lower = name.to_ascii_lowercase();
            if !(lower.ends_with(".ttf") || lower.ends_with(".otf")) {
                return Err(TuckboxError::validation(format!(
                    "{ctx}.name must be a .ttf or .otf file, got \"{name}\""
                )));
            }
            font_source.join(name)
        }
        None => parent.path.clone(),
    };
    let size = def.size.unwrap_or(parent.size);
    if size == 0 {
        return Err(TuckboxError::validation(format!("{ctx}.size must be > 0")));
    }

    Ok(FontConfig {
        path,
        size,
        color: def.color.map_or(parent.color, ColorDef::to_rgba8_premul),
        stroke: def.stroke.map_or(parent.stroke, ColorDef::to_rgba8_premul),
        stroke_width: def.width.unwrap_or(parent.stroke_width),
    })
}

fn resolve_background(
    def: &BackgroundDef,
    common: &Common,
    ctx: &str,
) -> TuckboxResult<BackgroundConfig> {
    let source = common.image_dir(def.image_source.as_deref());
    let image = match &def.image {
        Some(name) if name.trim().is_empty() => {
            return Err(TuckboxError::validation(format!(
                "{ctx}.image must not be empty"
            )));
        }
        Some(name) => Some(source.join(name)),
        None => None,
    };
    Ok(BackgroundConfig {
        color: def.color.map(ColorDef::to_rgba8_premul),
        image,
    })
}

fn resolve_section(def: &SectionDef, common: &Common, key: DetailKey) -> TuckboxResult<SectionConfig> {
    let ctx = format!("detail.{}", detail_key_name(key));
    let mut cfg = SectionConfig::with_common(common);

    if let Some(bg) = &def.background {
        cfg.background = resolve_background(bg, common, &format!("{ctx}.background"))?;
    }
    cfg.rotated = def.rotated;
    if let Some(o) = &def.orientation {
        cfg.orientation = Some(Orientation::parse(o).ok_or_else(|| {
            TuckboxError::validation(format!(
                "{ctx}.orientation must be portrait or landscape, got \"{o}\""
            ))
        })?);
    }
    if let Some(m) = def.margin {
        if !m.is_finite() || m < 0.0 {
            return Err(TuckboxError::validation(format!(
                "{ctx}.margin must be >= 0, got {m}"
            )));
        }
        cfg.margin = m;
    }
    if let Some([x, y]) = def.grid {
        if x == 0 || y == 0 {
            return Err(TuckboxError::validation(format!(
                "{ctx}.grid must be at least [1, 1], got [{x}, {y}]"
            )));
        }
        cfg.grid = grid_vec(x, y, &ctx)?;
    }
    for (i, f) in def.features.iter().enumerate() {
        cfg.features
            .push(resolve_feature(f, common, &format!("{ctx}.features[{i}]"))?);
    }
    Ok(cfg)
}

fn grid_vec(x: u32, y: u32, ctx: &str) -> TuckboxResult<Vec2i> {
    let conv = |v: u32| {
        i32::try_from(v).map_err(|_| TuckboxError::validation(format!("{ctx}: {v} is too large")))
    };
    Ok(Vec2i::new(conv(x)?, conv(y)?))
}

fn resolve_feature(def: &FeatureDef, common: &Common, ctx: &str) -> TuckboxResult<FeatureConfig> {
    let kind = match def.kind.to_ascii_lowercase().as_str() {
        "panel" => {
            let o: PanelOptionsDef = decode_options(def.options.as_ref(), ctx)?.unwrap_or_default();
            let gray = Rgba8Premul::opaque(128, 128, 128);
            FeatureKind::Panel(PanelOptions {
                color: o.color.map_or(gray, ColorDef::to_rgba8_premul),
                border: o.border.map_or(gray, ColorDef::to_rgba8_premul),
                border_width: o.border_width.unwrap_or(0).max(0) as u32,
            })
        }
        "text" => {
            let o: TextOptionsDef = decode_options(def.options.as_ref(), ctx)?.ok_or_else(|| {
                TuckboxError::validation(format!("{ctx}: text feature requires options.text"))
            })?;
            let align = match &o.align {
                Some(a) => TextAlign::parse(a).ok_or_else(|| {
                    TuckboxError::validation(format!(
                        "{ctx}.options.align must be left, center, right or justified, got \"{a}\""
                    ))
                })?,
                None => TextAlign::Center,
            };
            let font = match &o.font {
                Some(f) => merge_font(&common.font, f, &common.font_source, &format!("{ctx}.options.font"))?,
                None => common.font.clone(),
            };
            FeatureKind::Text(TextOptions {
                text: o.text.joined(),
                align,
                font,
            })
        }
        "image" => {
            let o: ImageOptionsDef = decode_options(def.options.as_ref(), ctx)?.ok_or_else(|| {
                TuckboxError::validation(format!("{ctx}: image feature requires options.image"))
            })?;
            let source = common.image_dir(o.image_source.as_deref());
            FeatureKind::Image(ImageOptions {
                path: source.join(&o.image),
            })
        }
        other => {
            return Err(TuckboxError::validation(format!(
                "{ctx}.type must be panel, text or image, got \"{other}\""
            )));
        }
    };

    for (name, v) in [("width", def.width), ("height", def.height)] {
        if let Some(v) = v {
            require_positive(&format!("{ctx}.{name}"), v)?;
        }
    }

    let mut feature = FeatureConfig::new(kind);
    feature.width = def.width;
    feature.height = def.height;
    if let Some([x, y]) = def.place {
        feature.place = grid_vec(x, y, ctx)?;
    }
    if let Some([x, y]) = def.anchor {
        if x > 2 || y > 2 {
            return Err(TuckboxError::validation(format!(
                "{ctx}.anchor components must be 0, 1 or 2, got [{x}, {y}]"
            )));
        }
        feature.anchor = Vec2i::new(x as i32, y as i32);
    }
    Ok(feature)
}

fn decode_options<T: serde::de::DeserializeOwned>(
    options: Option<&serde_json::Value>,
    ctx: &str,
) -> TuckboxResult<Option<T>> {
    options
        .map(|v| {
            T::deserialize(v)
                .map_err(|e| TuckboxError::validation(format!("{ctx}.options: {e}")))
        })
        .transpose()
}

/// Specific panel entry first, then its group, else none (defaults).
fn lookup_key(name: PanelName, detail: &HashMap<DetailKey, SectionConfig>) -> Option<DetailKey> {
    let own = panel_detail_key(name);
    if detail.contains_key(&own) {
        return Some(own);
    }
    let group = match name {
        PanelName::Left | PanelName::Right => DetailKey::Sides,
        PanelName::Top | PanelName::Bottom => DetailKey::Ends,
        PanelName::Front | PanelName::Back => DetailKey::Faces,
        _ => return None,
    };
    detail.contains_key(&group).then_some(group)
}

fn panel_detail_key(name: PanelName) -> DetailKey {
    match name {
        PanelName::GlueTab => DetailKey::GlueTab,
        PanelName::Back => DetailKey::Back,
        PanelName::Left => DetailKey::Left,
        PanelName::Front => DetailKey::Front,
        PanelName::Right => DetailKey::Right,
        PanelName::Bottom => DetailKey::Bottom,
        PanelName::BottomTab => DetailKey::BottomTab,
        PanelName::Top => DetailKey::Top,
        PanelName::TopTab => DetailKey::TopTab,
        PanelName::LtTab => DetailKey::LtTab,
        PanelName::RtTab => DetailKey::RtTab,
        PanelName::LbTab => DetailKey::LbTab,
        PanelName::RbTab => DetailKey::RbTab,
    }
}

fn detail_key_name(key: DetailKey) -> &'static str {
    match key {
        DetailKey::Sides => "sides",
        DetailKey::Ends => "ends",
        DetailKey::Faces => "faces",
        other => PanelName::ALL
            .into_iter()
            .find(|n| panel_detail_key(*n) == other)
            .map_or("?", PanelName::as_str),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum BasicRole {
    None,
    Front,
    Side,
}

impl BasicRole {
    fn of(name: PanelName) -> Self {
        match name {
            PanelName::Front => Self::Front,
            PanelName::Left | PanelName::Right | PanelName::Top | PanelName::Bottom => Self::Side,
            _ => Self::None,
        }
    }
}

fn basic_text(text: &str, size: u32, common: &Common) -> TextOptions {
    TextOptions {
        text: text.to_owned(),
        align: TextAlign::Center,
        font: FontConfig {
            size,
            ..common.font.clone()
        },
    }
}

fn add_basic_features(cfg: &mut SectionConfig, role: BasicRole, basic: &BasicDef, common: &Common) {
    if role == BasicRole::None || !cfg.features.is_empty() {
        return;
    }
    match role {
        BasicRole::Front => {
            let div = if !basic.title.is_empty() && !basic.subtitle.is_empty() {
                7
            } else {
                4
            };
            cfg.grid = Vec2i::new(2, div);

            if !basic.title.is_empty() {
                let t = basic_text(&basic.title, common.font.size, common);
                cfg.features.push(FeatureConfig::new(FeatureKind::Text(t)));
            }
            if !basic.subtitle.is_empty() {
                let t = basic_text(&basic.subtitle, 70, common);
                let mut f = FeatureConfig::new(FeatureKind::Text(t));
                f.place = Vec2i::new(1, 2);
                cfg.features.push(f);
            }
            if !basic.extra.is_empty() {
                let t = basic_text(&basic.extra, 50, common);
                let mut f = FeatureConfig::new(FeatureKind::Text(t));
                f.place = Vec2i::new(1, div);
                f.anchor = Vec2i::new(1, 2);
                cfg.features.push(f);
            }
        }
        BasicRole::Side => {
            if basic.title.is_empty() {
                return;
            }
            let text = if basic.subtitle.is_empty() {
                basic.title.clone()
            } else {
                format!("{}: {}", basic.title, basic.subtitle)
            };
            let mut t = basic_text(&text, 50, common);
            t.align = TextAlign::Left;
            cfg.features.push(FeatureConfig::new(FeatureKind::Text(t)));
        }
        BasicRole::None => {}
    }
    tracing::debug!(?role, features = cfg.features.len(), "generated basic features");
}

#[cfg(test)]
#[path = "../../tests/unit/config/resolve.rs"]
mod tests;
