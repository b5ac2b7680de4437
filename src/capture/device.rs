use crate::foundation::core::PixelSize;

/// Ideal capture width requested from the device.
pub const IDEAL_CAPTURE_WIDTH: u32 = 1280;
/// Ideal capture height requested from the device.
pub const IDEAL_CAPTURE_HEIGHT: u32 = 720;

/// Which way the requested camera should face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FacingMode {
    /// Front-facing (selfie) camera.
    #[default]
    User,
    /// Rear-facing camera.
    Environment,
}

/// Parameters for acquiring a live video stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StreamRequest {
    /// Preferred resolution. Devices may deliver a different native size.
    pub ideal: PixelSize,
    /// Preferred facing direction, honored when the device has a choice.
    pub facing: FacingMode,
    /// Whether an audio track is requested. Always `false` for strips.
    pub audio: bool,
}

impl Default for StreamRequest {
    fn default() -> Self {
        Self {
            ideal: PixelSize {
                width: IDEAL_CAPTURE_WIDTH,
                height: IDEAL_CAPTURE_HEIGHT,
            },
            facing: FacingMode::User,
            audio: false,
        }
    }
}

/// Classified camera acquisition failure.
///
/// The `Display` text is the message shown to the user next to the retry action.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum DeviceError {
    /// The user or platform refused camera access.
    #[error("Camera permission denied. Please allow camera access in your settings.")]
    PermissionDenied,
    /// No video capture device exists.
    #[error("No camera found on this device.")]
    NotFound,
    /// The device exists but another application holds it.
    #[error("Camera is already in use by another application.")]
    Busy,
    /// Anything else, with the device's own description.
    #[error("Camera error: {0}")]
    Unknown(String),
}

impl DeviceError {
    /// Short machine-readable cause name (`permission-denied`, `device-not-found`, ...).
    pub fn cause(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "permission-denied",
            Self::NotFound => "device-not-found",
            Self::Busy => "device-busy",
            Self::Unknown(_) => "unknown",
        }
    }
}

/// A camera that can hand out one exclusive live stream at a time.
pub trait CameraDevice {
    /// Request a stream. Failures must be classified, never panic.
    fn open(&mut self, request: &StreamRequest) -> Result<Box<dyn VideoStream>, DeviceError>;
}

/// A live stream acquired from a [`CameraDevice`].
pub trait VideoStream {
    /// Whether the stream has delivered at least one frame.
    fn has_frame(&self) -> bool;

    /// Native frame size, once known.
    fn native_size(&self) -> Option<PixelSize>;

    /// Read the current frame at native resolution as straight RGBA8.
    ///
    /// Returns `None` when no frame is available (stream stalled or stopped).
    fn grab_frame(&mut self) -> Option<image::RgbaImage>;

    /// Stop all tracks and release the device.
    fn stop(&mut self);
}
