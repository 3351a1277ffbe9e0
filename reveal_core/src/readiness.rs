//! Camera / model readiness as an explicit state machine.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Readiness {
    #[default]
    Uninitialized,
    CameraReady,
    ModelReady,
}

/// Signals raised by a pose source while it starts up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessEvent {
    CameraReady,
    ModelReady,
}

impl Readiness {
    /// Apply an event.  Readiness only ever moves forward; returns `true`
    /// when the state changed.
    pub fn advance(&mut self, event: ReadinessEvent) -> bool {
        let target = match event {
            ReadinessEvent::CameraReady => Readiness::CameraReady,
            ReadinessEvent::ModelReady  => Readiness::ModelReady,
        };
        if target > *self {
            *self = target;
            true
        } else {
            false
        }
    }

    /// The scanning graphic replaces the loading one as soon as the camera
    /// is up, even before the model has loaded.
    pub fn shows_scanning(self) -> bool { self != Readiness::Uninitialized }

    pub fn label(self) -> &'static str {
        match self {
            Readiness::Uninitialized => "waiting for camera",
            Readiness::CameraReady   => "camera ready, loading model",
            Readiness::ModelReady    => "tracking",
        }
    }
}
