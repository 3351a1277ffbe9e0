//! Top-level application state and the frame loop.
//!
//! `AppState` owns the reveal state, readiness and the latest pose batch.
//! It turns [`SourceEvent`]s and the clock into a [`FramePlan`] each frame;
//! the visualizer paints the plan and the cue output plays when asked.

use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Instant;

use reveal_core::{Point, Pose, PoseBatch, Readiness, RevealState};
use tracing::{debug, info};

use crate::assets::AssetSet;
use crate::audio::open_cue_output;
use crate::config::SketchConfig;
use crate::error::AppResult;
use crate::source::{spawn_pose_source, FeedPoseSource, SimPoseSource, SourceEvent};
use crate::visualizer::Visualizer;

// ════════════════════════════════════════════════════════════════════════════
// FramePlan
// ════════════════════════════════════════════════════════════════════════════

/// Which status graphic sits under the cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusGraphic { Loading, Scanning }

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePlan {
    pub status:     StatusGraphic,
    /// Centre of the status graphic: the last tracked point, or the canvas
    /// centre before anything was tracked.
    pub status_at:  Point,
    /// First detected pose in canvas pixels.
    pub pose:       Option<Pose>,
    /// Tracked point this frame.  `Some` means "pose detected": show the
    /// instructions and the revealed images.
    pub tracked:    Option<Point>,
    pub draw_zones: Vec<usize>,
    pub start_cue:  bool,
}

// ════════════════════════════════════════════════════════════════════════════
// AppState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
enum LatestPoses {
    Model(PoseBatch),
    Screen(Vec<Pose>),
}

pub struct AppState {
    cfg:        SketchConfig,
    reveal:     RevealState,
    readiness:  Readiness,
    /// Most recent completed detection; replaced wholesale by each batch.
    latest:     Option<LatestPoses>,
    last_point: Option<Point>,
}

impl AppState {
    pub fn new(cfg: SketchConfig) -> Self {
        let reveal = RevealState::new(cfg.zones.clone(), cfg.reveal_duration_ms);
        AppState {
            cfg,
            reveal,
            readiness:  Readiness::default(),
            latest:     None,
            last_point: None,
        }
    }

    // ── process one SourceEvent ──────────────────────────────────────────

    pub fn handle_event(&mut self, event: SourceEvent) {
        match event {
            SourceEvent::Ready(ev) => {
                if self.readiness.advance(ev) {
                    info!(state = self.readiness.label(), "readiness changed");
                }
            }
            SourceEvent::Poses(batch)       => self.latest = Some(LatestPoses::Model(batch)),
            SourceEvent::ScreenPoses(poses) => self.latest = Some(LatestPoses::Screen(poses)),
            SourceEvent::Ended => info!("pose source ended; keeping last detection"),
        }
    }

    /// First pose of the latest batch, mapped to a `canvas_w × canvas_h`
    /// canvas.
    fn first_pose(&self, canvas_w: f32, canvas_h: f32) -> Option<Pose> {
        match self.latest.as_ref()? {
            LatestPoses::Screen(poses) => poses.first().cloned(),
            LatestPoses::Model(batch) => {
                let mapper = match batch.video {
                    Some([w, h]) => self.cfg.mapper.with_video_size(w, h),
                    None         => self.cfg.mapper,
                };
                batch.poses.first()
                    .map(|p| mapper.map_pose(p, batch.normalized, canvas_w, canvas_h))
            }
        }
    }

    // ── Per-frame tick ────────────────────────────────────────────────────

    pub fn frame(&mut self, now_ms: u64, canvas_w: f32, canvas_h: f32) -> FramePlan {
        let min_conf = self.cfg.min_confidence;
        let pose = self.first_pose(canvas_w, canvas_h);
        let tracked = pose.as_ref()
            .filter(|p| p.has_all(&self.cfg.required, min_conf))
            .and_then(|p| p.point_of(self.cfg.tracked, min_conf));

        if tracked.is_some() {
            self.last_point = tracked;
        }

        let out = self.reveal.step(now_ms, tracked);
        if out.timer_reset {
            info!(now_ms, "reveal timer elapsed, zones hidden");
        }
        for &z in &out.newly_revealed {
            let zone = &self.reveal.zones()[z];
            info!(zone = zone.label, image = zone.image, "zone revealed");
        }
        if out.start_cue {
            debug!("cue start");
        }

        FramePlan {
            status:     if self.readiness.shows_scanning() {
                StatusGraphic::Scanning
            } else {
                StatusGraphic::Loading
            },
            status_at:  self.last_point
                .unwrap_or(Point::new(canvas_w / 2.0, canvas_h / 2.0)),
            pose,
            tracked,
            draw_zones: out.draw,
            start_cue:  out.start_cue,
        }
    }

    // ── Accessors for the render loop ─────────────────────────────────────

    pub fn config(&self)    -> &SketchConfig { &self.cfg }
    pub fn readiness(&self) -> Readiness     { self.readiness }
    pub fn reveal(&self)    -> &RevealState  { &self.reveal }
}

// ════════════════════════════════════════════════════════════════════════════
// run(): the main application loop
// ════════════════════════════════════════════════════════════════════════════

/// Where poses come from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputMode {
    /// The mouse pointer stands in for the tracked keypoint.
    Simulated,
    /// JSON lines on stdin from an external detector.
    Feed,
}

/// Run the full application.
///
/// This is the entry point called from `main.rs`.  It loads assets, opens
/// the cue output, starts the pose source and drives the render loop at
/// ~60 fps until the window closes.
pub fn run(cfg: SketchConfig, input: InputMode) -> AppResult<()> {
    let assets  = AssetSet::load(&cfg);
    let mut cue = open_cue_output(&cfg.asset_dir.join(cfg.cue_clip));

    let (sim_tx, source_rx): (_, Receiver<SourceEvent>) = match input {
        InputMode::Simulated => {
            let (tx, rx) = mpsc::channel();
            let mut landmarks = vec![cfg.tracked];
            landmarks.extend(cfg.required.iter().filter(|&&l| l != cfg.tracked));
            (Some(tx), spawn_pose_source(SimPoseSource::new(rx, landmarks)))
        }
        InputMode::Feed => (None, spawn_pose_source(FeedPoseSource::stdin())),
    };

    let mut vis = Visualizer::new("Pose Reveal", cfg.window_size, sim_tx)?;
    let mut app = AppState::new(cfg);
    let clock   = Instant::now();
    let mut source_open = true;

    while vis.is_open() {
        // 1. Window input (and pointer → sim source)
        if !vis.poll_input() { break; }

        // 2. Drain source events; the last batch wins
        while source_open {
            match source_rx.try_recv() {
                Ok(ev) => app.handle_event(ev),
                Err(TryRecvError::Empty)        => break,
                Err(TryRecvError::Disconnected) => source_open = false,
            }
        }

        // 3. Per-frame logic
        let now = clock.elapsed().as_millis() as u64;
        let (w, h) = vis.size();
        let plan = app.frame(now, w as f32, h as f32);
        if plan.start_cue {
            cue.play();
        }

        // 4. Render
        vis.render(&plan, &assets, app.config(), now)?;
    }

    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
