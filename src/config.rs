use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capture::{CaptureSettings, DEFAULT_COUNTDOWN_TICKS, HANDOFF_DELAY};
use crate::catalog::{Catalog, Layout, Theme};
use crate::composite::CaptionFont;
use crate::encode::STRIP_JPEG_QUALITY;
use crate::foundation::error::{BoothError, BoothResult};

/// Booth settings, usually read from a JSON file.
///
/// Every field is optional in JSON; unknown fields are rejected.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoothConfig {
    /// Caption font file. Defaults to the bundled bold face.
    pub font_path: Option<PathBuf>,
    /// Directory strips are written to.
    pub output_dir: PathBuf,
    /// Countdown length before each capture.
    pub countdown_seconds: u32,
    /// Delay between the last capture and the hand-off to the editor.
    pub handoff_delay_ms: u64,
    /// JPEG quality for written strips (1..=100).
    pub jpeg_quality: u8,
    /// Extra layouts, merged over the built-ins by id.
    pub layouts: Vec<Layout>,
    /// Extra themes, merged over the built-ins by id.
    pub themes: Vec<Theme>,
}

impl Default for BoothConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            output_dir: PathBuf::from("."),
            countdown_seconds: DEFAULT_COUNTDOWN_TICKS,
            handoff_delay_ms: HANDOFF_DELAY.as_millis() as u64,
            jpeg_quality: STRIP_JPEG_QUALITY,
            layouts: Vec::new(),
            themes: Vec::new(),
        }
    }
}

impl BoothConfig {
    /// Parse and validate a config from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> BoothResult<Self> {
        let cfg: Self = serde_json::from_reader(r)
            .map_err(|e| BoothError::config(format!("parse config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load a config file. A relative `font_path` is resolved against the file's directory.
    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            BoothError::config(format!("open config '{}': {e}", path.display()))
        })?;
        let mut cfg = Self::from_reader(BufReader::new(f))?;
        if let (Some(font), Some(dir)) = (cfg.font_path.as_mut(), path.parent())
            && font.is_relative()
        {
            *font = dir.join(&*font);
        }
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    /// Check value ranges and catalog entries.
    pub fn validate(&self) -> BoothResult<()> {
        if self.countdown_seconds == 0 {
            return Err(BoothError::config("countdown_seconds must be >= 1"));
        }
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(BoothError::config("jpeg_quality must be within 1..=100"));
        }
        for layout in &self.layouts {
            layout
                .validate()
                .map_err(|e| BoothError::config(format!("layouts: {e}")))?;
        }
        for theme in &self.themes {
            theme
                .validate()
                .map_err(|e| BoothError::config(format!("themes: {e}")))?;
        }
        Ok(())
    }

    /// Built-in catalog with this config's entries merged in.
    pub fn catalog(&self) -> BoothResult<Catalog> {
        let mut catalog = Catalog::builtin();
        for layout in &self.layouts {
            catalog.insert_layout(layout.clone())?;
        }
        for theme in &self.themes {
            catalog.insert_theme(theme.clone())?;
        }
        Ok(catalog)
    }

    /// Capture timing derived from this config.
    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            countdown_ticks: self.countdown_seconds,
            handoff_delay: Duration::from_millis(self.handoff_delay_ms),
            ..CaptureSettings::default()
        }
    }

    /// Load the configured caption font, or the bundled one when none is set.
    pub fn caption_font(&self) -> BoothResult<CaptionFont> {
        match self.font_path.as_deref() {
            Some(path) => CaptionFont::load(path),
            None => Ok(CaptionFont::bundled()),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
