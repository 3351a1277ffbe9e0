//! Camera → screen coordinate mapping.
//!
//! The detector reports keypoints in the pixel space of the video frame it
//! analysed.  [`CameraMapper`] places that frame on the canvas (mirrored for
//! a front camera) and maps each keypoint through the same transform.

use crate::landmark::{Keypoint, Point, Pose};

/// How the video frame is fitted into the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FitMode {
    /// Scale to the canvas height, centre horizontally.
    FitHeight,
    /// Scale to the canvas width, centre vertically.
    FitWidth,
    /// Scale each axis independently.
    Stretch,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraMapper {
    pub video_w: f32,
    pub video_h: f32,
    pub mode:    FitMode,
    pub mirror:  bool,
}

impl Default for CameraMapper {
    fn default() -> Self {
        CameraMapper { video_w: 640.0, video_h: 480.0, mode: FitMode::FitHeight, mirror: true }
    }
}

impl CameraMapper {
    pub fn new(video_w: f32, video_h: f32, mode: FitMode, mirror: bool) -> Self {
        CameraMapper { video_w, video_h, mode, mirror }
    }

    /// Same transform for a different frame size.
    pub fn with_video_size(self, video_w: f32, video_h: f32) -> Self {
        CameraMapper { video_w, video_h, ..self }
    }

    /// (scale_x, scale_y, offset_x, offset_y) for the given canvas.
    fn transform(&self, canvas_w: f32, canvas_h: f32) -> (f32, f32, f32, f32) {
        let vw = self.video_w.max(1.0);
        let vh = self.video_h.max(1.0);
        match self.mode {
            FitMode::FitHeight => {
                let s = canvas_h / vh;
                (s, s, (canvas_w - vw * s) / 2.0, 0.0)
            }
            FitMode::FitWidth => {
                let s = canvas_w / vw;
                (s, s, 0.0, (canvas_h - vh * s) / 2.0)
            }
            FitMode::Stretch => (canvas_w / vw, canvas_h / vh, 0.0, 0.0),
        }
    }

    /// Map a video-space point to canvas pixels.
    pub fn map_point(&self, p: Point, canvas_w: f32, canvas_h: f32) -> Point {
        let (sx, sy, ox, oy) = self.transform(canvas_w, canvas_h);
        let x = if self.mirror { self.video_w - p.x } else { p.x };
        Point::new(x * sx + ox, p.y * sy + oy)
    }

    /// Map every keypoint of `pose`.  `normalized` inputs (0–1) are first
    /// scaled up to video pixels.  Confidence, depth and names are kept.
    pub fn map_pose(&self, pose: &Pose, normalized: bool, canvas_w: f32, canvas_h: f32) -> Pose {
        let keypoints = pose.keypoints.iter().map(|k| {
            let src = if normalized {
                Point::new(k.x * self.video_w, k.y * self.video_h)
            } else {
                k.point()
            };
            let p = self.map_point(src, canvas_w, canvas_h);
            Keypoint { x: p.x, y: p.y, ..k.clone() }
        }).collect();
        Pose { keypoints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmark::Landmark;

    #[test]
    fn fit_height_centres_and_mirrors() {
        // 640×480 into 1280×960: scale 2, frame exactly fills width.
        let m = CameraMapper::new(640.0, 480.0, FitMode::FitHeight, true);
        assert_eq!(m.map_point(Point::new(0.0, 0.0), 1280.0, 960.0), Point::new(1280.0, 0.0));
        assert_eq!(m.map_point(Point::new(640.0, 480.0), 1280.0, 960.0), Point::new(0.0, 960.0));
    }

    #[test]
    fn fit_height_letterboxes_wide_canvas() {
        // 640×480 into 1000×480: scale 1, 180 px bars either side.
        let m = CameraMapper::new(640.0, 480.0, FitMode::FitHeight, false);
        assert_eq!(m.map_point(Point::new(0.0, 10.0), 1000.0, 480.0), Point::new(180.0, 10.0));
    }

    #[test]
    fn fit_width_offsets_vertically() {
        let m = CameraMapper::new(100.0, 100.0, FitMode::FitWidth, false);
        assert_eq!(m.map_point(Point::new(50.0, 0.0), 200.0, 400.0), Point::new(100.0, 100.0));
    }

    #[test]
    fn stretch_scales_axes_independently() {
        let m = CameraMapper::new(100.0, 50.0, FitMode::Stretch, false);
        assert_eq!(m.map_point(Point::new(10.0, 10.0), 200.0, 500.0), Point::new(20.0, 100.0));
    }

    #[test]
    fn normalized_pose_is_scaled_first() {
        let m = CameraMapper::new(640.0, 480.0, FitMode::Stretch, false);
        let pose = Pose::single(Landmark::Nose, Point::new(0.5, 0.25));
        let mapped = m.map_pose(&pose, true, 640.0, 480.0);
        assert_eq!(mapped.point_of(Landmark::Nose, 0.5), Some(Point::new(320.0, 120.0)));
        // Placeholder slots keep their zero confidence.
        assert!(mapped.keypoint(Landmark::LeftWrist, 0.5).is_none());
    }
}
