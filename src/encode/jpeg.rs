use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::composite::StripImage;
use crate::foundation::error::{BoothError, BoothResult};

/// Quality used for the final strip.
pub const STRIP_JPEG_QUALITY: u8 = 95;

/// Encode an RGB8 image as baseline JPEG.
pub fn encode_rgb_jpeg(rgb: &image::RgbImage, quality: u8) -> BoothResult<Vec<u8>> {
    if !(1..=100).contains(&quality) {
        return Err(BoothError::encode("jpeg quality must be within 1..=100"));
    }
    let mut buf = Vec::new();
    let mut encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(Cursor::new(&mut buf), quality);
    encoder
        .encode(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| BoothError::encode(format!("jpeg encoding failed: {e}")))?;
    Ok(buf)
}

/// `photobooth-<epoch millis>.jpg`
pub fn artifact_file_name(epoch_millis: i64) -> String {
    format!("photobooth-{epoch_millis}.jpg")
}

/// An encoded strip with its suggested download name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StripArtifact {
    /// Suggested file name.
    pub file_name: String,
    /// JPEG bytes.
    pub bytes: Vec<u8>,
}

impl StripArtifact {
    /// Encode `strip`, naming it after the current time.
    pub fn encode(strip: &StripImage, quality: u8) -> BoothResult<Self> {
        Self::encode_at(strip, quality, chrono::Utc::now().timestamp_millis())
    }

    /// Encode `strip`, naming it after `epoch_millis`.
    #[tracing::instrument(skip(strip), fields(width = strip.size().width, height = strip.size().height))]
    pub fn encode_at(strip: &StripImage, quality: u8, epoch_millis: i64) -> BoothResult<Self> {
        let rgb = strip.to_rgb_image()?;
        let bytes = encode_rgb_jpeg(&rgb, quality)?;
        tracing::debug!(bytes = bytes.len(), "strip encoded");
        Ok(Self {
            file_name: artifact_file_name(epoch_millis),
            bytes,
        })
    }

    /// Write the artifact into `dir` (created if missing) and return the full path.
    pub fn save_to(&self, dir: &Path) -> BoothResult<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("create output dir '{}'", dir.display()))?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("write strip '{}'", path.display()))?;
        tracing::info!(path = %path.display(), "strip saved");
        Ok(path)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/jpeg.rs"]
mod tests;
