//! Face capture flow as an explicit state machine.
//!
//! Models the client camera lifecycle used during signup and face login:
//! ask for camera permission, stream, take a still, optionally retake. Every
//! state that holds a live stream reports it through
//! [`CaptureState::needs_release`], so callers know when the device must be
//! stopped.

use std::fmt;

/// Camera capture state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No camera activity.
    #[default]
    Idle,
    /// Waiting for the user to grant camera access.
    Requesting,
    /// Camera is live.
    Streaming,
    /// A frame has been captured. The stream stays open, and a retake drops
    /// the frame and returns to [`CaptureState::Streaming`].
    Captured { frame: String },
    /// Access was denied or the device failed.
    Failed { reason: String },
}

/// Input driving the capture state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    Start,
    Granted,
    Denied { reason: String },
    Capture { frame: String },
    Retake,
    Stop,
    Reset,
}

/// Event not accepted in the current state. The state is left unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply {event} while {state}")]
pub struct InvalidTransition {
    pub state: &'static str,
    pub event: &'static str,
}

impl CaptureState {
    fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Requesting => "requesting",
            Self::Streaming => "streaming",
            Self::Captured { .. } => "captured",
            Self::Failed { .. } => "failed",
        }
    }

    /// Whether a live camera stream is held and must be released.
    #[must_use]
    pub fn needs_release(&self) -> bool {
        matches!(self, Self::Streaming | Self::Captured { .. })
    }

    /// The captured frame, if any.
    #[must_use]
    pub fn frame(&self) -> Option<&str> {
        match self {
            Self::Captured { frame } => Some(frame.as_str()),
            _ => None,
        }
    }

    /// Compute the state after `event`.
    ///
    /// # Examples
    /// ```
    /// use bankdesk::domain::{CaptureEvent, CaptureState};
    ///
    /// let state = CaptureState::Idle
    ///     .apply(CaptureEvent::Start)
    ///     .and_then(|s| s.apply(CaptureEvent::Granted))
    ///     .expect("valid flow");
    /// assert!(state.needs_release());
    /// ```
    pub fn apply(&self, event: CaptureEvent) -> Result<Self, InvalidTransition> {
        match (self, event) {
            (_, CaptureEvent::Stop | CaptureEvent::Reset) => Ok(Self::Idle),
            (Self::Idle | Self::Failed { .. }, CaptureEvent::Start) => Ok(Self::Requesting),
            (Self::Requesting, CaptureEvent::Granted)
            | (Self::Captured { .. }, CaptureEvent::Retake) => Ok(Self::Streaming),
            (Self::Requesting, CaptureEvent::Denied { reason }) => Ok(Self::Failed { reason }),
            (Self::Streaming, CaptureEvent::Capture { frame }) => Ok(Self::Captured { frame }),
            (state, event) => Err(InvalidTransition {
                state: state.label(),
                event: event.label(),
            }),
        }
    }
}

impl CaptureEvent {
    fn label(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Granted => "granted",
            Self::Denied { .. } => "denied",
            Self::Capture { .. } => "capture",
            Self::Retake => "retake",
            Self::Stop => "stop",
            Self::Reset => "reset",
        }
    }
}

impl fmt::Display for CaptureState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Owns a capture state and applies events in place.
#[derive(Debug, Default)]
pub struct CaptureSession {
    state: CaptureState,
}

impl CaptureSession {
    /// Current state.
    #[must_use]
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// Apply `event`, keeping the previous state when it is rejected.
    ///
    /// Returns whether a stream held before the event must now be released.
    pub fn handle(&mut self, event: CaptureEvent) -> Result<bool, InvalidTransition> {
        let next = self.state.apply(event)?;
        let release = self.state.needs_release() && !next.needs_release();
        if release {
            tracing::debug!(from = %self.state, to = %next, "releasing camera stream");
        }
        self.state = next;
        Ok(release)
    }
}
