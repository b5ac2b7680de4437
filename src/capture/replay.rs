use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::Context as _;

use crate::capture::device::{CameraDevice, DeviceError, StreamRequest, VideoStream};
use crate::foundation::core::PixelSize;
use crate::foundation::error::BoothResult;

/// A [`CameraDevice`] that replays a fixed list of frames.
///
/// Each grab returns the next frame, wrapping around at the end. Only one stream may be open at a
/// time; a second `open` while a stream is live reports [`DeviceError::Busy`].
#[derive(Clone, Debug)]
pub struct ReplayCamera {
    frames: Arc<Vec<image::RgbaImage>>,
    in_use: Arc<AtomicBool>,
}

impl ReplayCamera {
    /// Replay in-memory frames.
    pub fn new(frames: Vec<image::RgbaImage>) -> Self {
        Self {
            frames: Arc::new(frames),
            in_use: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Decode frames from image files, in the given order.
    pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> BoothResult<Self> {
        let mut frames = Vec::with_capacity(paths.len());
        for p in paths {
            let p = p.as_ref();
            let img = image::open(p).with_context(|| format!("open frame '{}'", p.display()))?;
            frames.push(img.to_rgba8());
        }
        Ok(Self::new(frames))
    }

    /// Whether a stream from this camera is currently open.
    pub fn is_streaming(&self) -> bool {
        self.in_use.load(Ordering::SeqCst)
    }
}

impl CameraDevice for ReplayCamera {
    fn open(&mut self, _request: &StreamRequest) -> Result<Box<dyn VideoStream>, DeviceError> {
        if self.frames.is_empty() {
            return Err(DeviceError::NotFound);
        }
        if self.in_use.swap(true, Ordering::SeqCst) {
            return Err(DeviceError::Busy);
        }
        Ok(Box::new(ReplayStream {
            frames: self.frames.clone(),
            in_use: self.in_use.clone(),
            cursor: 0,
            live: true,
        }))
    }
}

struct ReplayStream {
    frames: Arc<Vec<image::RgbaImage>>,
    in_use: Arc<AtomicBool>,
    cursor: usize,
    live: bool,
}

impl VideoStream for ReplayStream {
    fn has_frame(&self) -> bool {
        self.live && !self.frames.is_empty()
    }

    fn native_size(&self) -> Option<PixelSize> {
        let frame = self.frames.get(self.cursor % self.frames.len().max(1))?;
        Some(PixelSize {
            width: frame.width(),
            height: frame.height(),
        })
    }

    fn grab_frame(&mut self) -> Option<image::RgbaImage> {
        if !self.live || self.frames.is_empty() {
            return None;
        }
        let frame = self.frames[self.cursor % self.frames.len()].clone();
        self.cursor += 1;
        Some(frame)
    }

    fn stop(&mut self) {
        if self.live {
            self.live = false;
            self.in_use.store(false, Ordering::SeqCst);
        }
    }
}

impl Drop for ReplayStream {
    fn drop(&mut self) {
        self.stop();
    }
}
