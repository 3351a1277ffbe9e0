//! Body landmarks, keypoints and poses.
//!
//! Landmarks follow the 33-point BlazePose schema.  A [`Pose`] is the
//! ordered keypoint list the detector produces for one person; index `i`
//! of the list is landmark `i`.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════
// Landmark
// ════════════════════════════════════════════════════════════════════════════

/// BlazePose body landmark indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Landmark {
    Nose            = 0,
    LeftEyeInner    = 1,
    LeftEye         = 2,
    LeftEyeOuter    = 3,
    RightEyeInner   = 4,
    RightEye        = 5,
    RightEyeOuter   = 6,
    LeftEar         = 7,
    RightEar        = 8,
    MouthLeft       = 9,
    MouthRight      = 10,
    LeftShoulder    = 11,
    RightShoulder   = 12,
    LeftElbow       = 13,
    RightElbow      = 14,
    LeftWrist       = 15,
    RightWrist      = 16,
    LeftPinky       = 17,
    RightPinky      = 18,
    LeftIndex       = 19,
    RightIndex      = 20,
    LeftThumb       = 21,
    RightThumb      = 22,
    LeftHip         = 23,
    RightHip        = 24,
    LeftKnee        = 25,
    RightKnee       = 26,
    LeftAnkle       = 27,
    RightAnkle      = 28,
    LeftHeel        = 29,
    RightHeel       = 30,
    LeftFootIndex   = 31,
    RightFootIndex  = 32,
}

impl Landmark {
    pub const COUNT: usize = 33;

    pub const ALL: [Landmark; Landmark::COUNT] = [
        Landmark::Nose,          Landmark::LeftEyeInner,  Landmark::LeftEye,
        Landmark::LeftEyeOuter,  Landmark::RightEyeInner, Landmark::RightEye,
        Landmark::RightEyeOuter, Landmark::LeftEar,       Landmark::RightEar,
        Landmark::MouthLeft,     Landmark::MouthRight,    Landmark::LeftShoulder,
        Landmark::RightShoulder, Landmark::LeftElbow,     Landmark::RightElbow,
        Landmark::LeftWrist,     Landmark::RightWrist,    Landmark::LeftPinky,
        Landmark::RightPinky,    Landmark::LeftIndex,     Landmark::RightIndex,
        Landmark::LeftThumb,     Landmark::RightThumb,    Landmark::LeftHip,
        Landmark::RightHip,      Landmark::LeftKnee,      Landmark::RightKnee,
        Landmark::LeftAnkle,     Landmark::RightAnkle,    Landmark::LeftHeel,
        Landmark::RightHeel,     Landmark::LeftFootIndex, Landmark::RightFootIndex,
    ];

    pub fn index(self) -> usize { self as usize }

    pub fn from_index(i: usize) -> Option<Landmark> {
        Landmark::ALL.get(i).copied()
    }

    /// Human-readable name, lower case with spaces.
    pub fn name(self) -> &'static str {
        match self {
            Landmark::Nose           => "nose",
            Landmark::LeftEyeInner   => "left eye inner",
            Landmark::LeftEye        => "left eye",
            Landmark::LeftEyeOuter   => "left eye outer",
            Landmark::RightEyeInner  => "right eye inner",
            Landmark::RightEye       => "right eye",
            Landmark::RightEyeOuter  => "right eye outer",
            Landmark::LeftEar        => "left ear",
            Landmark::RightEar       => "right ear",
            Landmark::MouthLeft      => "mouth left",
            Landmark::MouthRight     => "mouth right",
            Landmark::LeftShoulder   => "left shoulder",
            Landmark::RightShoulder  => "right shoulder",
            Landmark::LeftElbow      => "left elbow",
            Landmark::RightElbow     => "right elbow",
            Landmark::LeftWrist      => "left wrist",
            Landmark::RightWrist     => "right wrist",
            Landmark::LeftPinky      => "left pinky",
            Landmark::RightPinky     => "right pinky",
            Landmark::LeftIndex      => "left index",
            Landmark::RightIndex     => "right index",
            Landmark::LeftThumb      => "left thumb",
            Landmark::RightThumb     => "right thumb",
            Landmark::LeftHip        => "left hip",
            Landmark::RightHip       => "right hip",
            Landmark::LeftKnee       => "left knee",
            Landmark::RightKnee      => "right knee",
            Landmark::LeftAnkle      => "left ankle",
            Landmark::RightAnkle     => "right ankle",
            Landmark::LeftHeel       => "left heel",
            Landmark::RightHeel      => "right heel",
            Landmark::LeftFootIndex  => "left foot index",
            Landmark::RightFootIndex => "right foot index",
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Point
// ════════════════════════════════════════════════════════════════════════════

/// A screen-space position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self { Point { x, y } }
}

// ════════════════════════════════════════════════════════════════════════════
// Keypoint / Pose
// ════════════════════════════════════════════════════════════════════════════

/// One detected landmark.  Coordinates are in whatever space the producer
/// used; after mapping they are screen pixels.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub x: f32,
    pub y: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z: Option<f32>,
    #[serde(default = "full_confidence", alias = "score")]
    pub confidence: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

fn full_confidence() -> f32 { 1.0 }

impl Keypoint {
    pub fn new(x: f32, y: f32, confidence: f32) -> Self {
        Keypoint { x, y, z: None, confidence, name: None }
    }

    pub fn point(&self) -> Point { Point::new(self.x, self.y) }

    /// A keypoint is usable when it has finite coordinates and meets the
    /// confidence floor.
    pub fn is_usable(&self, min_confidence: f32) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.confidence >= min_confidence
    }
}

/// All keypoints for one detected person in one frame.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub keypoints: Vec<Keypoint>,
}

impl Pose {
    pub fn new(keypoints: Vec<Keypoint>) -> Self { Pose { keypoints } }

    /// The keypoint for `landmark`, if the detector produced it and it
    /// clears `min_confidence`.
    pub fn keypoint(&self, landmark: Landmark, min_confidence: f32) -> Option<&Keypoint> {
        self.keypoints
            .get(landmark.index())
            .filter(|k| k.is_usable(min_confidence))
    }

    /// Screen position of `landmark`, or `None` when absent.
    pub fn point_of(&self, landmark: Landmark, min_confidence: f32) -> Option<Point> {
        self.keypoint(landmark, min_confidence).map(Keypoint::point)
    }

    /// True when every landmark in `required` is present.
    pub fn has_all(&self, required: &[Landmark], min_confidence: f32) -> bool {
        required.iter().all(|&l| self.keypoint(l, min_confidence).is_some())
    }

    /// A pose with only `landmark` set; every other slot is a zero-confidence
    /// placeholder.  Used by the mouse simulator and tests.
    pub fn single(landmark: Landmark, at: Point) -> Self {
        let mut keypoints = vec![Keypoint::new(0.0, 0.0, 0.0); Landmark::COUNT];
        keypoints[landmark.index()] = Keypoint::new(at.x, at.y, 1.0);
        Pose { keypoints }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
