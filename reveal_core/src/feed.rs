//! JSON-lines pose feed.
//!
//! An external detector process writes one message per line:
//!
//! ```text
//! {"type":"camera_ready"}
//! {"type":"model_ready"}
//! {"type":"poses","video":[640,480],"normalized":false,
//!  "poses":[{"keypoints":[{"x":320,"y":200,"confidence":0.9}, …]}]}
//! ```
//!
//! `t_ms` on a `poses` message is optional and only used by the replay tool.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::landmark::Pose;
use crate::readiness::ReadinessEvent;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("empty line")]
    EmptyLine,

    #[error("malformed feed message: {0}")]
    Json(#[from] serde_json::Error),
}

/// One detector result batch.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseBatch {
    /// Size of the analysed frame, `[width, height]`.  Absent means "use
    /// the configured video size".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<[f32; 2]>,
    /// Keypoint coordinates are 0–1 rather than video pixels.
    #[serde(default)]
    pub normalized: bool,
    #[serde(default)]
    pub poses: Vec<Pose>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_ms: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeedMessage {
    CameraReady,
    ModelReady,
    Poses(PoseBatch),
}

impl FeedMessage {
    pub fn readiness(&self) -> Option<ReadinessEvent> {
        match self {
            FeedMessage::CameraReady => Some(ReadinessEvent::CameraReady),
            FeedMessage::ModelReady  => Some(ReadinessEvent::ModelReady),
            FeedMessage::Poses(_)    => None,
        }
    }
}

/// Parse one line of the feed.
pub fn parse_line(line: &str) -> Result<FeedMessage, FeedError> {
    let line = line.trim();
    if line.is_empty() {
        return Err(FeedError::EmptyLine);
    }
    Ok(serde_json::from_str(line)?)
}
