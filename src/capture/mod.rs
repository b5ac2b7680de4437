//! Camera lifecycle and the countdown/capture state machine.

mod controller;
mod device;
mod replay;
mod snapshot;

pub use controller::{
    COUNTDOWN_TICK, CameraState, CaptureController, CaptureRejection, CaptureSettings,
    DEFAULT_COUNTDOWN_TICKS, HANDOFF_DELAY, Schedule, Timer, TimerKind, TimerOutcome,
};
pub use device::{
    CameraDevice, DeviceError, FacingMode, IDEAL_CAPTURE_HEIGHT, IDEAL_CAPTURE_WIDTH,
    StreamRequest, VideoStream,
};
pub use replay::ReplayCamera;
pub use snapshot::Snapshot;
