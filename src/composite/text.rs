use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use vello_cpu::peniko::{Blob, FontData};

use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};

/// Caption font size in pixels.
pub const CAPTION_FONT_SIZE: f32 = 24.0;
/// Gap between the caption's bottom edge and the canvas bottom, in pixels.
pub const CAPTION_BOTTOM_MARGIN: f64 = 15.0;
/// Outline width used to embolden a face that has no bold weight.
const SYNTHETIC_BOLD_STROKE: f64 = CAPTION_FONT_SIZE as f64 / 24.0;

static BUNDLED_CAPTION_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// Font used for captions, loaded from raw TrueType/OpenType bytes.
///
/// Captions are set bold. A face without a bold weight is emboldened synthetically.
#[derive(Clone)]
pub struct CaptionFont {
    blob: Blob<u8>,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptionFont")
            .field("len", &self.blob.len())
            .finish()
    }
}

impl Default for CaptionFont {
    fn default() -> Self {
        Self::bundled()
    }
}

impl CaptionFont {
    /// DejaVu Sans Bold, compiled into the crate.
    pub fn bundled() -> Self {
        Self {
            blob: Blob::new(Arc::new(BUNDLED_CAPTION_FONT)),
        }
    }

    /// Wrap font bytes. The data is parsed when the first caption is laid out.
    pub fn from_bytes(bytes: Vec<u8>) -> BoothResult<Self> {
        if bytes.is_empty() {
            return Err(BoothError::validation("caption font data is empty"));
        }
        Ok(Self {
            blob: Blob::from(bytes),
        })
    }

    /// Read a font file.
    pub fn load(path: &Path) -> BoothResult<Self> {
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    fn same_face(&self, other: &Self) -> bool {
        self.blob.id() == other.blob.id()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

struct RegisteredFace {
    source: CaptionFont,
    family: String,
    data: FontData,
}

/// Stateful helper for shaping single-line captions with Parley.
///
/// The caption face is registered with the font collection once and reused until a different
/// font is passed in.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    face: Option<RegisteredFace>,
    registrations: usize,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            face: None,
            registrations: 0,
        }
    }

    /// Number of times a font has been added to the collection.
    pub(crate) fn registrations(&self) -> usize {
        self.registrations
    }

    fn face(&mut self, font: &CaptionFont) -> BoothResult<&RegisteredFace> {
        let stale = self
            .face
            .as_ref()
            .is_none_or(|face| !face.source.same_face(font));
        if stale {
            let families = self
                .font_ctx
                .collection
                .register_fonts(font.blob.clone(), None);
            self.registrations += 1;
            let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                BoothError::render("no font families registered from caption font")
            })?;
            let family = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| BoothError::render("registered font family has no name"))?
                .to_string();
            tracing::debug!(family = %family, "caption font registered");
            self.face = Some(RegisteredFace {
                source: font.clone(),
                family,
                data: FontData::new(font.blob.clone(), 0),
            });
        }
        self.face
            .as_ref()
            .ok_or_else(|| BoothError::render("caption font not registered"))
    }

    /// Shape `text` bold at `size_px` on a single unwrapped line.
    pub(crate) fn layout_bold_line(
        &mut self,
        text: &str,
        font: &CaptionFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> BoothResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BoothError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let family = self.face(font)?.family.clone();
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::BOLD,
        ));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Top-left corner for a caption box of `text_width` x `text_height`: centered horizontally,
/// bottom edge [`CAPTION_BOTTOM_MARGIN`] above the canvas bottom.
pub(crate) fn caption_origin(canvas: PixelSize, text_width: f64, text_height: f64) -> (f64, f64) {
    let x = f64::from(canvas.width) / 2.0 - text_width / 2.0;
    let y = f64::from(canvas.height) - CAPTION_BOTTOM_MARGIN - text_height;
    (x, y)
}

/// Rasterize `text` into a transparent canvas-sized premultiplied RGBA8 layer.
///
/// Glyphs falling outside the canvas are dropped; long captions are not wrapped or shrunk.
pub(crate) fn rasterize_caption(
    engine: &mut TextLayoutEngine,
    font: &CaptionFont,
    text: &str,
    color: Rgba8,
    canvas: PixelSize,
) -> BoothResult<Vec<u8>> {
    let width: u16 = canvas
        .width
        .try_into()
        .map_err(|_| BoothError::render("canvas width exceeds u16"))?;
    let height: u16 = canvas
        .height
        .try_into()
        .map_err(|_| BoothError::render("canvas height exceeds u16"))?;

    let layout = engine.layout_bold_line(text, font, CAPTION_FONT_SIZE, color.into())?;
    let (x, y) = caption_origin(
        canvas,
        f64::from(layout.width()),
        f64::from(layout.height()),
    );
    tracing::debug!(
        x,
        y,
        width = layout.width(),
        height = layout.height(),
        "caption placed"
    );
    let font_data = &engine.face(font)?.data;

    let mut ctx = vello_cpu::RenderContext::new(width, height);
    ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
    ctx.set_stroke(vello_cpu::kurbo::Stroke::new(SYNTHETIC_BOLD_STROKE));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let brush = run.style().brush;
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                brush.r, brush.g, brush.b, brush.a,
            ));
            let synthesis = run.run().synthesis();
            let skew = synthesis.skew().map_or(vello_cpu::kurbo::Affine::IDENTITY, |deg| {
                vello_cpu::kurbo::Affine::skew(f64::from(deg).to_radians().tan(), 0.0)
            });
            let glyphs: Vec<vello_cpu::Glyph> = run
                .positioned_glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();
            ctx.glyph_run(font_data)
                .font_size(run.run().font_size())
                .glyph_transform(skew)
                .fill_glyphs(glyphs.iter().copied());
            if synthesis.embolden() {
                ctx.glyph_run(font_data)
                    .font_size(run.run().font_size())
                    .glyph_transform(skew)
                    .stroke_glyphs(glyphs.iter().copied());
            }
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap.data_as_u8_slice().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/text.rs"]
mod tests;
