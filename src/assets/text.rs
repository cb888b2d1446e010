use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use image::RgbaImage;

use crate::foundation::core::{Rgba8Premul, Vec2i};
use crate::foundation::error::{TuckboxError, TuckboxResult};
use crate::raster::composite::over;

/// Horizontal alignment of lines within a text block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAlign {
    /// Flush left.
    Left,
    /// Centered.
    #[default]
    Center,
    /// Flush right.
    Right,
    /// Treated as flush left; single lines are never stretched.
    Justified,
}

impl TextAlign {
    /// Case-insensitive parse of `left`, `center`, `right` or `justified`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" => Some(Self::Right),
            "justified" | "justify" => Some(Self::Justified),
            _ => None,
        }
    }

    /// Offset of a line of width `line` inside a block of width `block`.
    pub fn line_offset(self, block: f32, line: f32) -> f32 {
        match self {
            Self::Left | Self::Justified => 0.0,
            Self::Center => ((block - line) / 2.0).max(0.0),
            Self::Right => (block - line).max(0.0),
        }
    }
}

/// Everything needed to shape and paint a text block.
#[derive(Clone, Copy, Debug)]
pub struct TextStyle<'a> {
    /// Font file.
    pub font: &'a Path,
    /// Font size in pixels.
    pub size: u32,
    /// Line alignment.
    pub align: TextAlign,
    /// Fill color.
    pub fill: Rgba8Premul,
    /// Outline color.
    pub stroke: Rgba8Premul,
    /// Outline width in pixels, added on every side of the block.
    pub stroke_width: u32,
}

/// Measures and paints multi-line text.
///
/// Implementations are shared across panel render threads.
pub trait TextRasterizer: Sync {
    /// Size of the block `text` occupies, outline included.
    fn measure(&self, text: &str, style: &TextStyle<'_>) -> TuckboxResult<Vec2i>;

    /// Paint `text` over a premultiplied `canvas` with the block's top-left corner at `origin`.
    fn draw(
        &self,
        canvas: &mut RgbaImage,
        origin: Vec2i,
        text: &str,
        style: &TextStyle<'_>,
    ) -> TuckboxResult<()>;
}

type Layout = parley::Layout<[u8; 4]>;

/// Stateful helper for building Parley layouts from raw font bytes.
///
/// Each font file is registered once; later layouts reuse its family name.
struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<[u8; 4]>,
    families: HashMap<PathBuf, String>,
}

impl TextLayoutEngine {
    fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family(&mut self, path: &Path, font_bytes: &[u8]) -> TuckboxResult<String> {
        if let Some(name) = self.families.get(path) {
            return Ok(name.clone());
        }
        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| TuckboxError::asset("no font families registered from font bytes"))?;
        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| TuckboxError::asset("registered font family has no name"))?
            .to_string();
        self.families
            .insert(path.to_path_buf(), family_name.clone());
        Ok(family_name)
    }

    fn layout(
        &mut self,
        text: &str,
        path: &Path,
        font_bytes: &[u8],
        size_px: f32,
    ) -> TuckboxResult<Layout> {
        let family_name = self.family(path, font_bytes)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: Layout = builder.build(text);
        layout.break_all_lines(None);
        layout.align(
            None,
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );
        Ok(layout)
    }
}

thread_local! {
    static LAYOUT_ENGINE: RefCell<TextLayoutEngine> = RefCell::new(TextLayoutEngine::new());
}

/// [`TextRasterizer`] backed by Parley shaping and `vello_cpu` glyph rendering.
///
/// Font files are read once per path and kept for the lifetime of the value.
#[derive(Default)]
pub struct ParleyText {
    fonts: Mutex<HashMap<PathBuf, Arc<Vec<u8>>>>,
}

impl ParleyText {
    /// Empty font cache.
    pub fn new() -> Self {
        Self::default()
    }

    fn font_bytes(&self, path: &Path) -> TuckboxResult<Arc<Vec<u8>>> {
        let mut fonts = self
            .fonts
            .lock()
            .map_err(|_| TuckboxError::asset("font cache lock poisoned"))?;
        if let Some(bytes) = fonts.get(path) {
            return Ok(bytes.clone());
        }
        let bytes = std::fs::read(path)
            .map_err(|e| TuckboxError::asset(format!("read font '{}': {e}", path.display())))?;
        let bytes = Arc::new(bytes);
        fonts.insert(path.to_path_buf(), bytes.clone());
        tracing::debug!(font = %path.display(), "font loaded");
        Ok(bytes)
    }

    fn layout(&self, text: &str, style: &TextStyle<'_>) -> TuckboxResult<(Layout, Arc<Vec<u8>>)> {
        if style.size == 0 {
            return Err(TuckboxError::validation("font size must be > 0"));
        }
        let bytes = self.font_bytes(style.font)?;
        let layout = LAYOUT_ENGINE.with(|engine| {
            engine
                .borrow_mut()
                .layout(text, style.font, &bytes, style.size as f32)
        })?;
        Ok((layout, bytes))
    }
}

impl TextRasterizer for ParleyText {
    fn measure(&self, text: &str, style: &TextStyle<'_>) -> TuckboxResult<Vec2i> {
        let (layout, _) = self.layout(text, style)?;
        let pad = 2 * style.stroke_width as i32;
        Ok(Vec2i::new(
            layout.width().ceil() as i32 + pad,
            layout.height().ceil() as i32 + pad,
        ))
    }

    fn draw(
        &self,
        canvas: &mut RgbaImage,
        origin: Vec2i,
        text: &str,
        style: &TextStyle<'_>,
    ) -> TuckboxResult<()> {
        let (cw, ch) = canvas.dimensions();
        if cw == 0 || ch == 0 || text.is_empty() {
            return Ok(());
        }
        let w16: u16 = cw
            .try_into()
            .map_err(|_| TuckboxError::render("text canvas width exceeds u16"))?;
        let h16: u16 = ch
            .try_into()
            .map_err(|_| TuckboxError::render("text canvas height exceeds u16"))?;

        let (layout, bytes) = self.layout(text, style)?;
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        let block_w = layout.width();
        let inset = style.stroke_width as f64;

        let mut ctx = vello_cpu::RenderContext::new(w16, h16);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            f64::from(origin.x) + inset,
            f64::from(origin.y) + inset,
        )));

        let passes: &[(Rgba8Premul, bool)] = if style.stroke_width > 0 {
            &[(style.stroke, true), (style.fill, false)]
        } else {
            &[(style.fill, false)]
        };
        for &(color, stroke) in passes {
            let [r, g, b, a] = color.to_array();
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
            if stroke {
                ctx.set_stroke(vello_cpu::kurbo::Stroke::new(2.0 * inset));
            }
            for line in layout.lines() {
                let dx = style.align.line_offset(block_w, line.metrics().advance);
                for item in line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x + dx,
                        y: g.y,
                    });
                    let builder = ctx.glyph_run(&font).font_size(run.run().font_size());
                    if stroke {
                        builder.stroke_glyphs(glyphs);
                    } else {
                        builder.fill_glyphs(glyphs);
                    }
                }
            }
        }
        ctx.flush();

        let mut pixmap = vello_cpu::Pixmap::new(w16, h16);
        ctx.render_to_pixmap(&mut pixmap);
        for (dst, src) in canvas
            .pixels_mut()
            .zip(pixmap.data_as_u8_slice().chunks_exact(4))
        {
            dst.0 = over(dst.0, [src[0], src[1], src[2], src[3]]);
        }
        Ok(())
    }
}
