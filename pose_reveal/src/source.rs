//! Pose sources: a JSON-lines feed from an external detector, or the mouse
//! standing in for the tracked keypoint.
//!
//! The public interface is [`SourceEvent`] delivered over a `mpsc` channel.
//! The frame loop doesn't need to know which source is running.

use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use reveal_core::{parse_line, FeedError, FeedMessage, Landmark, Point, Pose, PoseBatch, ReadinessEvent};
use tracing::{debug, info, warn};

// ════════════════════════════════════════════════════════════════════════════
// SourceEvent
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub enum SourceEvent {
    /// Camera or model finished starting.
    Ready(ReadinessEvent),
    /// Detector output in model space; the frame loop maps it to the canvas.
    Poses(PoseBatch),
    /// Poses already in canvas pixels.
    ScreenPoses(Vec<Pose>),
    /// The source has nothing more to say.
    Ended,
}

// ════════════════════════════════════════════════════════════════════════════
// PoseSource trait
// ════════════════════════════════════════════════════════════════════════════

/// Anything that can deliver [`SourceEvent`]s over a channel.
pub trait PoseSource: Send + 'static {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>);
}

/// Spawn a pose source on its own thread and return the receiving end.
pub fn spawn_pose_source<S: PoseSource>(source: S) -> Receiver<SourceEvent> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || Box::new(source).run(tx));
    rx
}

// ════════════════════════════════════════════════════════════════════════════
// FeedPoseSource: external detector over stdin
// ════════════════════════════════════════════════════════════════════════════

/// Reads the JSON-lines feed (see [`reveal_core::feed`]) from any reader,
/// stdin by default.  Malformed lines are logged and skipped.
pub struct FeedPoseSource<R = io::BufReader<io::Stdin>> {
    reader: R,
}

impl FeedPoseSource {
    pub fn stdin() -> Self {
        FeedPoseSource { reader: io::BufReader::new(io::stdin()) }
    }
}

impl<R: BufRead> FeedPoseSource<R> {
    pub fn from_reader(reader: R) -> Self { FeedPoseSource { reader } }
}

impl<R: BufRead + Send + 'static> PoseSource for FeedPoseSource<R> {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        for (n, line) in self.reader.lines().enumerate() {
            let line = match line {
                Ok(l)  => l,
                Err(e) => { warn!("pose feed read failed: {}", e); break; }
            };
            let event = match parse_line(&line) {
                Ok(FeedMessage::Poses(batch)) => {
                    debug!(poses = batch.poses.len(), "feed batch");
                    SourceEvent::Poses(batch)
                }
                Ok(msg) => match msg.readiness() {
                    Some(ev) => SourceEvent::Ready(ev),
                    None     => continue,
                },
                Err(FeedError::EmptyLine) => continue,
                Err(e) => { warn!(line = n + 1, "skipping feed line: {}", e); continue; }
            };
            if tx.send(event).is_err() { return; }
        }
        info!("pose feed closed");
        let _ = tx.send(SourceEvent::Ended);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// SimPoseSource: mouse simulation (always available)
// ════════════════════════════════════════════════════════════════════════════

/// Raw input from the simulation window.
#[derive(Clone, Debug, PartialEq)]
pub enum SimInput {
    /// Pointer position in canvas pixels; `None` when it left the window.
    Pointer(Option<(f32, f32)>),
    Quit,
}

/// Gesture-free stand-in for a detector: every landmark in `landmarks` is
/// placed at the pointer.
///
/// The visualizer sends [`SimInput`]s here; this translator turns them into
/// [`SourceEvent`]s, so the window loop stays decoupled from pose logic.
pub struct SimPoseSource {
    pub rx:         Receiver<SimInput>,
    pub landmarks:  Vec<Landmark>,
    /// Pretend model start-up time between camera and model readiness.
    pub load_delay: Duration,
}

impl SimPoseSource {
    pub fn new(rx: Receiver<SimInput>, landmarks: Vec<Landmark>) -> Self {
        SimPoseSource { rx, landmarks, load_delay: Duration::from_millis(1200) }
    }

    fn pose_at(&self, p: Point) -> Pose {
        let mut pose = Pose::single(self.landmarks[0], p);
        for &l in &self.landmarks[1..] {
            pose.keypoints[l.index()] = pose.keypoints[self.landmarks[0].index()].clone();
        }
        pose
    }
}

impl PoseSource for SimPoseSource {
    fn run(self: Box<Self>, tx: Sender<SourceEvent>) {
        if tx.send(SourceEvent::Ready(ReadinessEvent::CameraReady)).is_err() { return; }
        thread::sleep(self.load_delay);
        if tx.send(SourceEvent::Ready(ReadinessEvent::ModelReady)).is_err() { return; }

        if self.landmarks.is_empty() { return; }

        for input in self.rx.iter() {
            let event = match input {
                SimInput::Pointer(Some((x, y))) =>
                    SourceEvent::ScreenPoses(vec![self.pose_at(Point::new(x, y))]),
                SimInput::Pointer(None) => SourceEvent::ScreenPoses(Vec::new()),
                SimInput::Quit => break,
            };
            if tx.send(event).is_err() { return; }
        }
        let _ = tx.send(SourceEvent::Ended);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
