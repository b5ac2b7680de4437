use std::time::Duration;

use tracing::{debug, info, warn};

use crate::capture::device::{CameraDevice, DeviceError, StreamRequest, VideoStream};
use crate::capture::snapshot::Snapshot;
use crate::foundation::error::{BoothError, BoothResult};

/// Countdown length before each capture, in ticks.
pub const DEFAULT_COUNTDOWN_TICKS: u32 = 3;
/// Interval between countdown ticks.
pub const COUNTDOWN_TICK: Duration = Duration::from_secs(1);
/// Delay between the final capture and the completion hand-off.
pub const HANDOFF_DELAY: Duration = Duration::from_millis(500);

/// Camera lifecycle state of a [`CaptureController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraState {
    /// No stream held.
    Uninitialized,
    /// Stream requested or acquired, waiting for the first frame.
    Initializing,
    /// Stream is live; captures are accepted.
    Ready,
    /// Acquisition failed; see [`CaptureController::last_error`]. Retry with `initialize`.
    Error,
    /// All photos captured and handed off. Terminal.
    Done,
}

/// Timing knobs for a capture session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaptureSettings {
    /// Stream parameters passed to the device.
    pub request: StreamRequest,
    /// Countdown ticks before each capture (>= 1).
    pub countdown_ticks: u32,
    /// Interval between ticks.
    pub tick_interval: Duration,
    /// Delay between the last capture and completion.
    pub handoff_delay: Duration,
}

impl Default for CaptureSettings {
    fn default() -> Self {
        Self {
            request: StreamRequest::default(),
            countdown_ticks: DEFAULT_COUNTDOWN_TICKS,
            tick_interval: COUNTDOWN_TICK,
            handoff_delay: HANDOFF_DELAY,
        }
    }
}

/// What a scheduled timer does when it fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerKind {
    /// Advance the countdown by one tick.
    CountdownTick,
    /// Complete the session after the final capture.
    Handoff,
}

/// Single-shot timer token. Deliver it back through [`CaptureController::on_timer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    /// Timer purpose.
    pub kind: TimerKind,
    generation: u64,
}

/// Request to fire `timer` after `delay`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Schedule {
    /// How long the host should wait.
    pub delay: Duration,
    /// Token to deliver when the delay elapses.
    pub timer: Timer,
}

/// Result of delivering a timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerOutcome {
    /// Countdown advanced; `remaining` ticks left.
    Tick {
        /// Ticks left before capture.
        remaining: u32,
        /// Next tick to schedule.
        next: Schedule,
    },
    /// A frame was captured and appended at `index`.
    Captured {
        /// Position of the new photo.
        index: usize,
        /// Completion timer, present when this capture filled the session.
        handoff: Option<Schedule>,
    },
    /// The countdown ended but the stream had no frame; nothing was appended.
    FrameUnavailable,
    /// The session reached [`CameraState::Done`].
    Completed,
    /// Timer was cancelled or belongs to an earlier countdown.
    Ignored,
}

/// Why a capture command was refused. Refused commands never change state.
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum CaptureRejection {
    /// The camera is not in the state the command needs.
    #[error("camera is not ready (state: {0:?})")]
    NotReady(CameraState),
    /// A countdown is already running.
    #[error("a countdown is already running")]
    CountdownActive,
    /// All required photos are already captured.
    #[error("all photos have already been captured")]
    AlreadyComplete,
    /// Retake index does not name a captured photo.
    #[error("photo index {index} out of range ({len} captured)")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of captured photos.
        len: usize,
    },
    /// Proceeding needs every photo captured first.
    #[error("only {captured} of {required} photos captured")]
    Incomplete {
        /// Photos captured so far.
        captured: usize,
        /// Photos required.
        required: usize,
    },
}

/// Owns the camera stream and runs the countdown/capture state machine.
///
/// Timers are explicit: commands that need a delay return a [`Schedule`], and the host hands the
/// timer back via [`on_timer`](Self::on_timer). Cancelling a countdown is simply not honoring its
/// outstanding timer, which the generation counter enforces.
///
/// Dropping the controller releases the stream.
pub struct CaptureController {
    device: Box<dyn CameraDevice>,
    settings: CaptureSettings,
    required: usize,
    stream: Option<Box<dyn VideoStream>>,
    state: CameraState,
    last_error: Option<DeviceError>,
    photos: Vec<Snapshot>,
    countdown_remaining: u32,
    handoff_pending: bool,
    generation: u64,
}

impl std::fmt::Debug for CaptureController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureController")
            .field("state", &self.state)
            .field("required", &self.required)
            .field("captured", &self.photos.len())
            .field("countdown_remaining", &self.countdown_remaining)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}

impl CaptureController {
    /// Create a controller for a session needing `required` photos.
    pub fn new(
        device: Box<dyn CameraDevice>,
        required: usize,
        settings: CaptureSettings,
    ) -> BoothResult<Self> {
        if required == 0 {
            return Err(BoothError::validation(
                "capture session must require at least one photo",
            ));
        }
        if settings.countdown_ticks == 0 {
            return Err(BoothError::validation("countdown must be at least one tick"));
        }
        Ok(Self {
            device,
            settings,
            required,
            stream: None,
            state: CameraState::Uninitialized,
            last_error: None,
            photos: Vec::with_capacity(required),
            countdown_remaining: 0,
            handoff_pending: false,
            generation: 0,
        })
    }

    /// Current camera state.
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Cause of the most recent acquisition failure, while in [`CameraState::Error`].
    pub fn last_error(&self) -> Option<&DeviceError> {
        self.last_error.as_ref()
    }

    /// Photos captured so far, in capture order.
    pub fn photos(&self) -> &[Snapshot] {
        &self.photos
    }

    /// Number of photos the session needs.
    pub fn required_count(&self) -> usize {
        self.required
    }

    /// `(captured, required)`.
    pub fn progress(&self) -> (usize, usize) {
        (self.photos.len(), self.required)
    }

    /// 1-based number of the photo the next countdown would take.
    pub fn next_photo_number(&self) -> usize {
        (self.photos.len() + 1).min(self.required)
    }

    /// Ticks left in the running countdown (0 when idle).
    pub fn countdown_remaining(&self) -> u32 {
        self.countdown_remaining
    }

    /// Whether a countdown is running.
    pub fn is_counting_down(&self) -> bool {
        self.countdown_remaining > 0
    }

    /// Whether every required photo has been captured.
    pub fn is_full(&self) -> bool {
        self.photos.len() >= self.required
    }

    /// Acquire the camera stream.
    ///
    /// Valid from `Uninitialized` and `Error`; any other state is left untouched. The controller
    /// reaches `Ready` once the stream reports a frame, either immediately or later through
    /// [`on_first_frame`](Self::on_first_frame). Failures become `Error` with a classified cause.
    pub fn initialize(&mut self) -> CameraState {
        if !matches!(self.state, CameraState::Uninitialized | CameraState::Error) {
            debug!(state = ?self.state, "initialize ignored");
            return self.state;
        }

        self.last_error = None;
        self.state = CameraState::Initializing;
        info!(
            width = self.settings.request.ideal.width,
            height = self.settings.request.ideal.height,
            facing = ?self.settings.request.facing,
            "requesting camera stream"
        );

        match self.device.open(&self.settings.request) {
            Ok(stream) => {
                let has_frame = stream.has_frame();
                self.stream = Some(stream);
                if has_frame {
                    self.on_first_frame();
                }
            }
            Err(err) => {
                warn!(cause = err.cause(), %err, "camera acquisition failed");
                self.last_error = Some(err);
                self.state = CameraState::Error;
            }
        }
        self.state
    }

    /// The stream delivered its first frame.
    pub fn on_first_frame(&mut self) {
        if self.state != CameraState::Initializing || self.stream.is_none() {
            return;
        }
        let size = self.stream.as_ref().and_then(|s| s.native_size());
        info!(?size, "camera ready");
        self.state = CameraState::Ready;
    }

    /// The preview surface failed to start playback.
    ///
    /// Frame grabs read from the stream itself, so this is logged and otherwise ignored.
    pub fn on_playback_failed(&mut self, reason: &str) {
        warn!(reason, "preview playback failed; continuing with live stream");
        self.on_first_frame();
    }

    /// Start a countdown toward the next capture.
    pub fn begin_capture(&mut self) -> Result<Schedule, CaptureRejection> {
        if self.state == CameraState::Done {
            return Err(CaptureRejection::AlreadyComplete);
        }
        if self.state != CameraState::Ready {
            return Err(CaptureRejection::NotReady(self.state));
        }
        if self.is_counting_down() {
            return Err(CaptureRejection::CountdownActive);
        }
        if self.is_full() {
            return Err(CaptureRejection::AlreadyComplete);
        }

        self.generation += 1;
        self.countdown_remaining = self.settings.countdown_ticks;
        info!(
            seconds = self.countdown_remaining,
            photo = self.next_photo_number(),
            "starting capture countdown"
        );
        Ok(self.schedule(TimerKind::CountdownTick, self.settings.tick_interval))
    }

    /// Stop a running countdown without capturing. Returns whether one was running.
    pub fn cancel_countdown(&mut self) -> bool {
        if !self.is_counting_down() {
            return false;
        }
        info!("capture countdown aborted");
        self.countdown_remaining = 0;
        self.generation += 1;
        true
    }

    /// Deliver a timer previously returned in a [`Schedule`].
    pub fn on_timer(&mut self, timer: Timer) -> TimerOutcome {
        if timer.generation != self.generation || self.state != CameraState::Ready {
            debug!(?timer, current = self.generation, "stale timer ignored");
            return TimerOutcome::Ignored;
        }
        match timer.kind {
            TimerKind::CountdownTick => self.countdown_tick(),
            TimerKind::Handoff => {
                if !self.handoff_pending || !self.is_full() {
                    return TimerOutcome::Ignored;
                }
                self.complete();
                TimerOutcome::Completed
            }
        }
    }

    fn countdown_tick(&mut self) -> TimerOutcome {
        if self.countdown_remaining == 0 {
            return TimerOutcome::Ignored;
        }
        if self.countdown_remaining > 1 {
            self.countdown_remaining -= 1;
            debug!(remaining = self.countdown_remaining, "countdown tick");
            return TimerOutcome::Tick {
                remaining: self.countdown_remaining,
                next: self.schedule(TimerKind::CountdownTick, self.settings.tick_interval),
            };
        }

        self.countdown_remaining = 0;
        let frame = self.stream.as_mut().and_then(|s| s.grab_frame());
        let Some(frame) = frame else {
            warn!("countdown finished but no video frame was available");
            return TimerOutcome::FrameUnavailable;
        };

        self.photos.push(Snapshot::from_frame(frame));
        let index = self.photos.len() - 1;
        info!(photo = index + 1, of = self.required, "photo captured");

        let handoff = if self.is_full() {
            self.handoff_pending = true;
            Some(self.schedule(TimerKind::Handoff, self.settings.handoff_delay))
        } else {
            None
        };
        TimerOutcome::Captured { index, handoff }
    }

    /// Remove the photo at `index`, shifting later photos left.
    pub fn retake(&mut self, index: usize) -> Result<Snapshot, CaptureRejection> {
        if self.state == CameraState::Done {
            return Err(CaptureRejection::AlreadyComplete);
        }
        if self.state != CameraState::Ready {
            return Err(CaptureRejection::NotReady(self.state));
        }
        if self.is_counting_down() {
            return Err(CaptureRejection::CountdownActive);
        }
        if index >= self.photos.len() {
            return Err(CaptureRejection::IndexOutOfRange {
                index,
                len: self.photos.len(),
            });
        }

        if self.handoff_pending {
            self.handoff_pending = false;
            self.generation += 1;
        }
        info!(photo = index + 1, "retaking photo");
        Ok(self.photos.remove(index))
    }

    /// Complete immediately once every photo is captured, without waiting for the hand-off timer.
    pub fn proceed(&mut self) -> Result<(), CaptureRejection> {
        if self.state == CameraState::Done {
            return Ok(());
        }
        if self.state != CameraState::Ready {
            return Err(CaptureRejection::NotReady(self.state));
        }
        if !self.is_full() {
            return Err(CaptureRejection::Incomplete {
                captured: self.photos.len(),
                required: self.required,
            });
        }
        self.complete();
        Ok(())
    }

    fn complete(&mut self) {
        self.handoff_pending = false;
        self.generation += 1;
        self.state = CameraState::Done;
        info!(photos = self.photos.len(), "capture session complete");
    }

    /// Stop the device stream and return to `Uninitialized`.
    ///
    /// Idempotent: the stream is stopped at most once, and calling this without a stream has no
    /// side effects. Captured photos are kept.
    pub fn release(&mut self) {
        self.countdown_remaining = 0;
        self.handoff_pending = false;
        self.generation += 1;
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            info!("camera stream released");
        }
        self.state = CameraState::Uninitialized;
    }

    /// Release the stream and take ownership of the captured photos.
    pub fn into_photos(mut self) -> Vec<Snapshot> {
        self.release();
        std::mem::take(&mut self.photos)
    }

    fn schedule(&self, kind: TimerKind, delay: Duration) -> Schedule {
        Schedule {
            delay,
            timer: Timer {
                kind,
                generation: self.generation,
            },
        }
    }
}

impl Drop for CaptureController {
    fn drop(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.stop();
            debug!("camera stream released on drop");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/controller.rs"]
mod tests;
