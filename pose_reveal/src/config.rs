//! Sketch configuration.
//!
//! Everything here is fixed at build time; [`SketchConfig::default`] is the
//! nose-driven layout and [`SketchConfig::left_hand`] the wrist-driven one.

use std::path::PathBuf;

use reveal_core::{CameraMapper, FitMode, HitZone, Landmark, DEFAULT_ZONES, REVEAL_DURATION_MS};

/// Pink.
pub const BACKGROUND: u32 = 0xFFFFC0CB;

/// Configuration for the full application.
#[derive(Clone, Debug)]
pub struct SketchConfig {
    /// Keypoint that drives the cursor.
    pub tracked:            Landmark,
    /// Keypoints that must all be present before a frame counts as
    /// "pose detected".  Always includes `tracked`.
    pub required:           Vec<Landmark>,
    /// Keypoints below this confidence are treated as absent.
    pub min_confidence:     f32,

    pub cursor_size:        f32,
    pub cursor_color:       [u8; 3],
    pub keypoint_size:      f32,
    pub show_all_keypoints: bool,

    pub zones:              Vec<HitZone>,
    pub reveal_duration_ms: u64,

    /// Status graphic box, centred on the tracked point.
    pub status_size:        (usize, usize),
    pub instructions:       String,
    /// Integer scale for the 3×5 font; 6 gives 30 px caps.
    pub text_scale:         usize,
    pub text_top:           usize,
    pub background:         u32,

    pub mapper:             CameraMapper,
    pub window_size:        (usize, usize),

    pub asset_dir:          PathBuf,
    pub loading_image:      &'static str,
    pub scanning_image:     &'static str,
    pub cue_clip:           &'static str,
}

impl Default for SketchConfig {
    fn default() -> Self {
        SketchConfig::tracking(Landmark::Nose)
    }
}

impl SketchConfig {
    /// Default layout driven by an arbitrary landmark.
    pub fn tracking(landmark: Landmark) -> Self {
        SketchConfig {
            tracked:            landmark,
            required:           vec![landmark],
            min_confidence:     0.25,
            cursor_size:        30.0,
            cursor_color:       [255, 50, 50],
            keypoint_size:      5.0,
            show_all_keypoints: true,
            zones:              DEFAULT_ZONES.to_vec(),
            reveal_duration_ms: REVEAL_DURATION_MS,
            status_size:        (150, 260),
            instructions:       format!(
                "MOVE YOUR {}!    FIND THE CATS!!!!",
                landmark.name().to_uppercase()
            ),
            text_scale:         6,
            text_top:           100,
            background:         BACKGROUND,
            mapper:             CameraMapper::new(640.0, 480.0, FitMode::FitHeight, true),
            window_size:        (1280, 1080),
            asset_dir:          PathBuf::from("assets"),
            loading_image:      "idle.gif",
            scanning_image:     "scan.gif",
            cue_clip:           "kids cheering.mp3",
        }
    }

    /// Left wrist drives the cursor, and a frame only counts when both
    /// wrists are visible.
    pub fn left_hand() -> Self {
        SketchConfig {
            required:     vec![Landmark::LeftWrist, Landmark::RightWrist],
            instructions: "MOVE YOUR LEFT HAND!    FIND THE CATS!!!!".to_string(),
            ..SketchConfig::tracking(Landmark::LeftWrist)
        }
    }

    /// Cursor colour packed as ARGB.
    pub fn cursor_argb(&self) -> u32 {
        let [r, g, b] = self.cursor_color;
        0xFF000000 | (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}
