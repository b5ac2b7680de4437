use anyhow::Context as _;

use crate::encode::encode_rgb_jpeg;
use crate::foundation::core::PixelSize;
use crate::foundation::error::BoothResult;

/// A captured still image held in memory as straight RGBA8.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    image: image::RgbaImage,
}

impl Snapshot {
    /// Build a snapshot from a raw camera frame, mirrored horizontally to match the preview.
    pub fn from_frame(frame: image::RgbaImage) -> Self {
        Self {
            image: image::imageops::flip_horizontal(&frame),
        }
    }

    /// Wrap an already-oriented image without mirroring.
    pub fn from_image(image: image::RgbaImage) -> Self {
        Self { image }
    }

    /// Decode an encoded image (PNG, JPEG, ...) without mirroring.
    pub fn decode(bytes: &[u8]) -> BoothResult<Self> {
        let img = image::load_from_memory(bytes).context("decode snapshot from memory")?;
        Ok(Self {
            image: img.to_rgba8(),
        })
    }

    /// Load an image file without mirroring.
    pub fn open(path: &std::path::Path) -> BoothResult<Self> {
        let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
        Ok(Self {
            image: img.to_rgba8(),
        })
    }

    /// Pixel size of the snapshot.
    pub fn size(&self) -> PixelSize {
        let (width, height) = self.image.dimensions();
        PixelSize { width, height }
    }

    /// Borrow the pixel buffer.
    pub fn image(&self) -> &image::RgbaImage {
        &self.image
    }

    /// Encode as baseline JPEG at the given quality (1..=100). Alpha is dropped.
    pub fn encode_jpeg(&self, quality: u8) -> BoothResult<Vec<u8>> {
        let rgb = image::DynamicImage::ImageRgba8(self.image.clone()).to_rgb8();
        encode_rgb_jpeg(&rgb, quality)
    }
}
