//! Photostrip captures a fixed number of photos from a camera and composites them into a single
//! themed strip image.
//!
//! The crate has two cores and a thin flow layer around them:
//!
//! - [`CaptureController`] owns the camera stream and runs the countdown/capture state machine.
//!   It never sleeps: delays are returned as [`Schedule`]s for the host to deliver back.
//! - [`CompositeRenderer`] turns a [`CompositeSpec`] into a [`StripImage`] of exactly the layout's
//!   size, and [`StripArtifact`] encodes it as `photobooth-<millis>.jpg`.
//! - [`PhotoBoothState`] is the step-transition function tying layout, theme, caption, capture,
//!   and editor screens together.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Booth flow state.
pub mod booth;
/// Camera lifecycle and capture.
pub mod capture;
/// Layout and theme catalogs.
pub mod catalog;
/// Strip composition.
pub mod composite;
/// Booth configuration.
pub mod config;
/// JPEG output.
pub mod encode;

pub use crate::booth::{BoothEvent, BoothStep, PhotoBoothState, enters_capture, leaves_capture};
pub use crate::capture::{
    CameraDevice, CameraState, CaptureController, CaptureRejection, CaptureSettings, DeviceError,
    ReplayCamera, Schedule, Snapshot, StreamRequest, Timer, TimerKind, TimerOutcome, VideoStream,
};
pub use crate::catalog::{Arrangement, Catalog, Layout, Theme};
pub use crate::composite::{CaptionFont, CompositeRenderer, CompositeSpec, StripImage};
pub use crate::config::BoothConfig;
pub use crate::encode::{STRIP_JPEG_QUALITY, StripArtifact};
pub use crate::foundation::core::{PixelSize, Rgba8};
pub use crate::foundation::error::{BoothError, BoothResult};
pub use crate::foundation::math::luma_bt601;
