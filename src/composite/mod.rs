//! Strip composition: grid layout, filters, borders, caption.

mod filter;
mod grid;
mod raster;
mod renderer;
mod text;

pub use filter::grayscale_in_place;
pub use grid::{PixelRect, cell_rects};
pub use raster::{Canvas, PremulRgba8, over};
pub use renderer::{
    CELL_BORDER_WIDTH, CompositeRenderer, CompositeSpec, MAX_CAPTION_CHARS, OUTER_BORDER_WIDTH,
    StripImage, clamp_caption,
};
pub use text::{CAPTION_BOTTOM_MARGIN, CAPTION_FONT_SIZE, CaptionFont};
