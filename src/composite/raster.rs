use crate::composite::grid::PixelRect;
use crate::foundation::core::{PixelSize, Rgba8};
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::mul_div255;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over blend of premultiplied `src` onto `dst`.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Fixed-size drawing surface holding premultiplied RGBA8 pixels, initially transparent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Canvas {
    size: PixelSize,
    data: Vec<u8>,
}

impl Canvas {
    /// Allocate a transparent canvas.
    pub fn new(size: PixelSize) -> BoothResult<Self> {
        let len = size
            .area()
            .checked_mul(4)
            .ok_or_else(|| BoothError::render("canvas size overflow"))?;
        if len == 0 {
            return Err(BoothError::render("canvas must not be empty"));
        }
        Ok(Self {
            size,
            data: vec![0; len],
        })
    }

    /// Canvas size.
    pub fn size(&self) -> PixelSize {
        self.size
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PremulRgba8> {
        let i = self.index(x, y)?;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Raw premultiplied bytes, row-major.
    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        Some((y as usize * self.size.width as usize + x as usize) * 4)
    }

    fn blend_at(&mut self, x: u32, y: u32, src: PremulRgba8) {
        if let Some(i) = self.index(x, y) {
            let dst = [
                self.data[i],
                self.data[i + 1],
                self.data[i + 2],
                self.data[i + 3],
            ];
            self.data[i..i + 4].copy_from_slice(&over(dst, src));
        }
    }

    /// Fill the whole canvas.
    pub fn fill(&mut self, color: Rgba8) {
        let rect = PixelRect {
            x: 0,
            y: 0,
            width: self.size.width,
            height: self.size.height,
        };
        self.fill_rect(rect, color);
    }

    /// Fill a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Rgba8) {
        let src = color.to_premul();
        let x1 = rect.right().min(self.size.width);
        let y1 = rect.bottom().min(self.size.height);
        for y in rect.y..y1 {
            for x in rect.x..x1 {
                self.blend_at(x, y, src);
            }
        }
    }

    /// Stroke the outline of `rect` with a line of `line_width` centered on its edges.
    ///
    /// A pixel is painted when its center lies within `line_width / 2` of an edge (inclusive),
    /// with square corners. Each pixel is blended at most once per call.
    pub fn stroke_rect(&mut self, rect: PixelRect, line_width: f64, color: Rgba8) {
        if !line_width.is_finite() || line_width <= 0.0 {
            return;
        }
        let src = color.to_premul();
        let hw = line_width / 2.0;

        let left = f64::from(rect.x);
        let top = f64::from(rect.y);
        let right = f64::from(rect.right());
        let bottom = f64::from(rect.bottom());

        let first = |edge: f64| (edge - hw - 0.5).ceil().max(0.0) as u32;
        let x_start = first(left);
        let y_start = first(top);
        let x_end = ((right + hw - 0.5).floor() + 1.0).clamp(0.0, f64::from(self.size.width)) as u32;
        let y_end =
            ((bottom + hw - 0.5).floor() + 1.0).clamp(0.0, f64::from(self.size.height)) as u32;

        for y in y_start..y_end {
            let cy = f64::from(y) + 0.5;
            let inner_y = cy > top + hw && cy < bottom - hw;
            for x in x_start..x_end {
                let cx = f64::from(x) + 0.5;
                let inner = inner_y && cx > left + hw && cx < right - hw;
                if !inner {
                    self.blend_at(x, y, src);
                }
            }
        }
    }

    /// Draw a straight-alpha RGBA image with its top-left corner at `(x, y)`, clipped.
    pub fn draw_image(&mut self, x: u32, y: u32, image: &image::RgbaImage) {
        for (ix, iy, px) in image.enumerate_pixels() {
            let src = Rgba8::rgba(px[0], px[1], px[2], px[3]).to_premul();
            self.blend_at(x + ix, y + iy, src);
        }
    }

    /// Composite a full-canvas premultiplied layer over this canvas.
    pub fn composite_layer(&mut self, layer: &[u8]) -> BoothResult<()> {
        if layer.len() != self.data.len() {
            return Err(BoothError::render(
                "layer must match canvas width*height*4",
            ));
        }
        for (d, s) in self.data.chunks_exact_mut(4).zip(layer.chunks_exact(4)) {
            let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
            d.copy_from_slice(&out);
        }
        Ok(())
    }

    /// Flatten onto black and drop alpha, as lossy encoders expect.
    pub fn to_rgb_image(&self) -> BoothResult<image::RgbImage> {
        let rgb: Vec<u8> = self
            .data
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();
        image::RgbImage::from_raw(self.size.width, self.size.height, rgb)
            .ok_or_else(|| BoothError::render("canvas buffer does not match its size"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composite/raster.rs"]
mod tests;
