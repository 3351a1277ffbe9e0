//! Software-rendered visualizer using `minifb`.
//!
//! Layering, back to front:
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │  pink background                                 │
//! │        MOVE YOUR NOSE!    FIND THE CATS!!!!      │  ← only while a pose
//! │                                                  │    is detected
//! │  [revealed images, full window, zone order]      │
//! │              ┌──────┐                            │
//! │              │status│  ← idle / scan graphic,    │
//! │              │  ●   │    centred on the cursor   │
//! │              └──────┘                            │
//! └──────────────────────────────────────────────────┘
//! ```

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseMode, Window, WindowOptions};

use crate::app::{FramePlan, StatusGraphic};
use crate::assets::AssetSet;
use crate::canvas::Canvas;
use crate::config::SketchConfig;
use crate::error::AppResult;
use crate::source::SimInput;

const TEXT_COLOR:     u32 = 0xFF000000;
const KEYPOINT_COLOR: u32 = 0xFF2E7D32;

// ════════════════════════════════════════════════════════════════════════════
// Visualizer
// ════════════════════════════════════════════════════════════════════════════

pub struct Visualizer {
    window:     Window,
    canvas:     Canvas,
    /// Pointer forwarding for the mouse simulator; `None` with a real feed.
    sim_tx:     Option<Sender<SimInput>>,
    last_mouse: Option<(f32, f32)>,
}

impl Visualizer {
    pub fn new(
        title:  &str,
        size:   (usize, usize),
        sim_tx: Option<Sender<SimInput>>,
    ) -> AppResult<Self> {
        let (w, h) = size;
        let mut window = Window::new(
            title,
            w, h,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )?;

        window.set_target_fps(60);

        Ok(Visualizer {
            window,
            canvas: Canvas::new(w, h),
            sim_tx,
            last_mouse: None,
        })
    }

    /// Returns false when the window should close.
    pub fn is_open(&self) -> bool { self.window.is_open() }

    /// Current client size, never zero in either axis.
    pub fn size(&self) -> (usize, usize) {
        let (w, h) = self.window.get_size();
        (w.max(1), h.max(1))
    }

    /// Poll keys and the pointer.  Returns false when the user quits.
    pub fn poll_input(&mut self) -> bool {
        if !self.window.is_open() { return false; }

        if self.window.is_key_pressed(Key::Escape, KeyRepeat::No)
            || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
        {
            if let Some(tx) = &self.sim_tx {
                let _ = tx.send(SimInput::Quit);
            }
            return false;
        }

        if let Some(tx) = &self.sim_tx {
            let mouse = self.window.get_mouse_pos(MouseMode::Discard);
            if mouse != self.last_mouse {
                self.last_mouse = mouse;
                let _ = tx.send(SimInput::Pointer(mouse));
            }
        }

        true
    }

    /// Paint `plan` and push it to the window.
    pub fn render(
        &mut self,
        plan:       &FramePlan,
        assets:     &AssetSet,
        cfg:        &SketchConfig,
        elapsed_ms: u64,
    ) -> AppResult<()> {
        let (w, h) = self.size();
        self.canvas.resize(w, h);
        paint(&mut self.canvas, plan, assets, cfg, elapsed_ms);
        self.window.update_with_buffer(self.canvas.buffer(), w, h)?;
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// paint: window-free so it can be tested
// ════════════════════════════════════════════════════════════════════════════

pub fn paint(
    canvas:     &mut Canvas,
    plan:       &FramePlan,
    assets:     &AssetSet,
    cfg:        &SketchConfig,
    elapsed_ms: u64,
) {
    canvas.clear(cfg.background);

    // ── Status graphic ────────────────────────────────────────────────────
    let status = match plan.status {
        StatusGraphic::Loading  => assets.loading.as_ref(),
        StatusGraphic::Scanning => assets.scanning.as_ref(),
    };
    if let Some(sprite) = status {
        let (sw, sh) = cfg.status_size;
        let x = clamp_centre(plan.status_at.x, sw, canvas.width()) - sw as isize / 2;
        let y = clamp_centre(plan.status_at.y, sh, canvas.height()) - sh as isize / 2;
        canvas.blit_scaled(sprite.frame_at(elapsed_ms), x, y, sw, sh);
    }

    // ── Instructions and reveals (pose detected) ──────────────────────────
    if plan.tracked.is_some() {
        let cx = canvas.width() as isize / 2;
        canvas.draw_text_centered(
            &cfg.instructions, cx, cfg.text_top as isize, cfg.text_scale, TEXT_COLOR,
        );
        let (w, h) = (canvas.width(), canvas.height());
        for &z in &plan.draw_zones {
            if let Some(sprite) = assets.reveal(z) {
                canvas.blit_scaled(sprite.frame_at(elapsed_ms), 0, 0, w, h);
            }
        }
    }

    // ── Keypoints and cursor ──────────────────────────────────────────────
    if !cfg.show_all_keypoints { return; }
    if let Some(pose) = &plan.pose {
        for kp in pose.keypoints.iter().filter(|k| k.is_usable(cfg.min_confidence)) {
            canvas.disc(kp.x, kp.y, cfg.keypoint_size, KEYPOINT_COLOR);
        }
    }
    if let Some(p) = plan.tracked {
        canvas.disc(p.x, p.y, cfg.cursor_size, cfg.cursor_argb());
    }
}

/// Pin a box centre to within one box size of the canvas before the cast,
/// so detector outliers keep the box arithmetic in range.
fn clamp_centre(c: f32, size: usize, extent: usize) -> isize {
    let margin = size as f32;
    c.clamp(-margin, extent as f32 + margin) as isize
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{Sprite, SpriteFrame};
    use reveal_core::{Landmark, Point, Pose};

    const STATUS: u32 = 0xFF0000FF;
    const REVEAL: u32 = 0xFF00FF00;

    fn solid(color: u32) -> Option<Sprite> {
        Sprite::new(vec![SpriteFrame { width: 2, height: 2, pixels: vec![color; 4], delay_ms: 0 }])
    }

    fn assets() -> AssetSet {
        AssetSet {
            reveals:  vec![solid(REVEAL), None, None, None],
            loading:  solid(STATUS),
            scanning: solid(STATUS),
        }
    }

    fn plan(tracked: Option<Point>, draw_zones: Vec<usize>) -> FramePlan {
        FramePlan {
            status:    StatusGraphic::Loading,
            status_at: Point::new(200.0, 200.0),
            pose:      tracked.map(|p| Pose::single(Landmark::Nose, p)),
            tracked,
            draw_zones,
            start_cue: false,
        }
    }

    #[test]
    fn idle_frame_is_background_and_status() {
        let cfg = SketchConfig::default();
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(None, Vec::new()), &assets(), &cfg, 0);
        assert_eq!(canvas.pixel(0, 0), Some(cfg.background));
        assert_eq!(canvas.pixel(200, 200), Some(STATUS));
        // 150×260 box centred on (200, 200).
        assert_eq!(canvas.pixel(125, 70), Some(STATUS));
        assert_eq!(canvas.pixel(124, 200), Some(cfg.background));
    }

    #[test]
    fn outlying_status_centre_is_off_canvas() {
        let cfg = SketchConfig::default();
        let mut canvas = Canvas::new(400, 400);
        for at in [Point::new(-1e30, 10.0), Point::new(1e30, 1e30), Point::new(10.0, -1e30)] {
            let p = FramePlan { status_at: at, ..plan(None, Vec::new()) };
            paint(&mut canvas, &p, &assets(), &cfg, 0);
            assert!(canvas.buffer().iter().all(|&px| px == cfg.background));
        }
    }

    #[test]
    fn revealed_image_covers_window() {
        let cfg = SketchConfig { show_all_keypoints: false, ..SketchConfig::default() };
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(Some(Point::new(50.0, 50.0)), vec![0]), &assets(), &cfg, 0);
        assert_eq!(canvas.pixel(399, 399), Some(REVEAL));
        assert_eq!(canvas.pixel(50, 50), Some(REVEAL));
    }

    #[test]
    fn cursor_drawn_over_reveal() {
        let cfg = SketchConfig::default();
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(Some(Point::new(50.0, 50.0)), vec![0]), &assets(), &cfg, 0);
        assert_eq!(canvas.pixel(50, 50), Some(cfg.cursor_argb()));
        assert_eq!(canvas.pixel(200, 200), Some(REVEAL));
    }

    #[test]
    fn missing_image_draws_nothing() {
        let cfg = SketchConfig::default();
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(Some(Point::new(50.0, 50.0)), vec![1]), &assets(), &cfg, 0);
        assert_eq!(canvas.pixel(399, 399), Some(cfg.background));
    }

    #[test]
    fn no_pose_hides_text_and_cursor() {
        let cfg = SketchConfig { text_top: 10, ..SketchConfig::default() };
        let empty = AssetSet::default();
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(None, vec![0]), &empty, &cfg, 0);
        assert!(canvas.buffer().iter().all(|&p| p == cfg.background));
    }

    #[test]
    fn instructions_drawn_when_tracked() {
        let cfg = SketchConfig { text_top: 10, text_scale: 2, ..SketchConfig::default() };
        let empty = AssetSet::default();
        let mut canvas = Canvas::new(400, 400);
        paint(&mut canvas, &plan(Some(Point::new(300.0, 300.0)), Vec::new()), &empty, &cfg, 0);
        let text_rows = &canvas.buffer()[10 * 400..20 * 400];
        assert!(text_rows.contains(&TEXT_COLOR));
    }
}
