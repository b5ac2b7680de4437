use tracing::{info, warn};

use crate::capture::Snapshot;
use crate::catalog::{Layout, Theme};
use crate::composite::filter::grayscale_in_place;
use crate::composite::grid::{PixelRect, cell_rects};
use crate::composite::raster::{Canvas, PremulRgba8};
use crate::composite::text::{CaptionFont, TextLayoutEngine, rasterize_caption};
use crate::foundation::core::PixelSize;
use crate::foundation::error::BoothResult;

/// Maximum caption length, in characters.
pub const MAX_CAPTION_CHARS: usize = 100;
/// Line width of the stroke around the whole strip.
pub const OUTER_BORDER_WIDTH: f64 = 3.0;
/// Line width of the stroke around each photo cell.
pub const CELL_BORDER_WIDTH: f64 = 2.0;

/// Truncate `text` to at most [`MAX_CAPTION_CHARS`] characters.
pub fn clamp_caption(text: &str) -> String {
    text.chars().take(MAX_CAPTION_CHARS).collect()
}

/// Everything needed to render one strip.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositeSpec {
    /// Grid and canvas geometry.
    pub layout: Layout,
    /// Colors.
    pub theme: Theme,
    /// Caption (at most [`MAX_CAPTION_CHARS`] characters). Empty means no caption.
    pub caption: String,
    /// Convert photos to BT.601 grayscale.
    pub grayscale: bool,
    /// Photos in cell order.
    pub images: Vec<Snapshot>,
}

impl CompositeSpec {
    /// Spec with no caption, color photos, and no images.
    pub fn new(layout: Layout, theme: Theme) -> Self {
        Self {
            layout,
            theme,
            caption: String::new(),
            grayscale: false,
            images: Vec::new(),
        }
    }

    /// Set the caption, truncated to [`MAX_CAPTION_CHARS`].
    pub fn with_caption(mut self, caption: &str) -> Self {
        self.caption = clamp_caption(caption);
        self
    }

    /// Set the grayscale flag.
    pub fn with_grayscale(mut self, grayscale: bool) -> Self {
        self.grayscale = grayscale;
        self
    }

    /// Set the photos.
    pub fn with_images(mut self, images: Vec<Snapshot>) -> Self {
        self.images = images;
        self
    }
}

/// A rendered strip: exactly `layout.width x layout.height` pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripImage {
    canvas: Canvas,
}

impl StripImage {
    /// Output size.
    pub fn size(&self) -> PixelSize {
        self.canvas.size()
    }

    /// Premultiplied RGBA8 pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        self.canvas.pixel(x, y)
    }

    /// Borrow the underlying canvas.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Flattened RGB image, as written to lossy formats.
    pub fn to_rgb_image(&self) -> BoothResult<image::RgbImage> {
        self.canvas.to_rgb_image()
    }
}

/// Renders [`CompositeSpec`]s onto fixed-size canvases.
///
/// Rendering is lenient about photo count: missing photos leave their cells as background and
/// photos beyond the grid capacity are ignored. Captions use the bundled bold face unless another
/// font is supplied.
pub struct CompositeRenderer {
    font: CaptionFont,
    text: TextLayoutEngine,
}

impl Default for CompositeRenderer {
    fn default() -> Self {
        Self::new(CaptionFont::bundled())
    }
}

impl CompositeRenderer {
    /// Create a renderer drawing captions with `font`.
    pub fn new(font: CaptionFont) -> Self {
        Self {
            font,
            text: TextLayoutEngine::new(),
        }
    }

    /// Font used for captions.
    pub fn caption_font(&self) -> &CaptionFont {
        &self.font
    }

    /// Render `spec` into a new strip image.
    #[tracing::instrument(
        skip(self, spec),
        fields(layout = %spec.layout.id, theme = %spec.theme.id, images = spec.images.len())
    )]
    pub fn render(&mut self, spec: &CompositeSpec) -> BoothResult<StripImage> {
        let layout = &spec.layout;
        let theme = &spec.theme;
        let size = layout.size();

        let mut canvas = Canvas::new(size)?;
        canvas.fill(theme.background_color);
        canvas.stroke_rect(
            PixelRect {
                x: 0,
                y: 0,
                width: size.width,
                height: size.height,
            },
            OUTER_BORDER_WIDTH,
            theme.border_color,
        );

        let cells = cell_rects(layout);
        if spec.images.len() != layout.required_count() {
            warn!(
                supplied = spec.images.len(),
                required = layout.count,
                "photo count does not match layout; rendering what fits"
            );
        }

        let mut drawn = 0usize;
        for (cell, snap) in cells.iter().zip(spec.images.iter()) {
            if cell.width == 0 || cell.height == 0 {
                continue;
            }
            let mut scaled = image::imageops::resize(
                snap.image(),
                cell.width,
                cell.height,
                image::imageops::FilterType::Triangle,
            );
            if spec.grayscale {
                grayscale_in_place(&mut scaled);
            }
            canvas.draw_image(cell.x, cell.y, &scaled);
            canvas.stroke_rect(*cell, CELL_BORDER_WIDTH, theme.border_color);
            drawn += 1;
        }

        if !spec.caption.is_empty() {
            let layer = rasterize_caption(
                &mut self.text,
                &self.font,
                &spec.caption,
                theme.text_color,
                size,
            )?;
            canvas.composite_layer(&layer)?;
        }

        info!(
            width = size.width,
            height = size.height,
            cells = cells.len(),
            drawn,
            "strip rendered"
        );
        Ok(StripImage { canvas })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/renderer.rs"]
mod tests;
