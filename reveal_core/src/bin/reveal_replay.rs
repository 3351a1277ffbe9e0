//! Replay a recorded pose feed through the reveal logic, headless.
//!
//! ```text
//! reveal_replay [FILE] [--landmark N] [--canvas WxH]
//! ```
//!
//! Reads JSON lines from FILE (or stdin) and prints one line per reveal,
//! cue start and timer reset.  Batches without `t_ms` are spaced 16 ms apart.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};

use reveal_core::{
    parse_line, CameraMapper, FeedError, FeedMessage, Landmark, Readiness, RevealState,
};
use tracing::warn;

const FRAME_MS: u64 = 16;
const MIN_CONFIDENCE: f32 = 0.25;

#[derive(Debug, PartialEq)]
struct ReplayArgs {
    path:     Option<String>,
    landmark: Landmark,
    canvas:   (f32, f32),
}

impl Default for ReplayArgs {
    fn default() -> Self {
        ReplayArgs { path: None, landmark: Landmark::Nose, canvas: (1280.0, 1080.0) }
    }
}

/// Unknown or malformed option values leave the default in place.
fn parse_args<I: IntoIterator<Item = String>>(argv: I) -> ReplayArgs {
    let mut args = ReplayArgs::default();
    let mut it = argv.into_iter();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--landmark" => {
                if let Some(l) = it.next().and_then(|s| s.parse().ok()).and_then(Landmark::from_index) {
                    args.landmark = l;
                }
            }
            "--canvas" => {
                if let Some((w, h)) = it.next().as_deref().and_then(|s| s.split_once('x'))
                    .and_then(|(w, h)| Some((w.parse::<f32>().ok()?, h.parse::<f32>().ok()?)))
                {
                    args.canvas = (w, h);
                }
            }
            _ => args.path = Some(a),
        }
    }
    args
}

// ════════════════════════════════════════════════════════════════════════════
// Replay
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
enum ReplayEvent {
    Readiness { at_ms: u64, state: &'static str },
    TimerReset { at_ms: u64 },
    Revealed { at_ms: u64, zone: usize, label: &'static str, image: &'static str },
    Cue { at_ms: u64 },
}

impl fmt::Display for ReplayEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayEvent::Readiness { at_ms, state } =>
                write!(f, "  [{:>7} ms] readiness → {}", at_ms, state),
            ReplayEvent::TimerReset { at_ms } =>
                write!(f, "  [{:>7} ms] timer reset, all zones hidden", at_ms),
            ReplayEvent::Revealed { at_ms, zone, label, image } =>
                write!(f, "  [{:>7} ms] zone {} ({}) revealed → {}", at_ms, zone + 1, label, image),
            ReplayEvent::Cue { at_ms } =>
                write!(f, "  [{:>7} ms] cue ♪", at_ms),
        }
    }
}

/// Run every line of `reader` through the reveal logic.  Batches without
/// `t_ms` advance the clock by one frame.  A read error ends the replay.
fn replay<R: BufRead>(reader: R, args: &ReplayArgs) -> Vec<ReplayEvent> {
    let (cw, ch) = args.canvas;
    let mapper = CameraMapper::default();
    let mut state = RevealState::default();
    let mut readiness = Readiness::default();
    let mut clock = 0u64;
    let mut events = Vec::new();

    for (n, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(l)  => l,
            Err(e) => { warn!("read failed: {}", e); break; }
        };
        let msg = match parse_line(&line) {
            Ok(m) => m,
            Err(FeedError::EmptyLine) => continue,
            Err(e) => { warn!(line = n + 1, "{}", e); continue; }
        };

        let batch = match msg {
            FeedMessage::Poses(b) => b,
            other => {
                if let Some(ev) = other.readiness() {
                    if readiness.advance(ev) {
                        events.push(ReplayEvent::Readiness { at_ms: clock, state: readiness.label() });
                    }
                }
                continue;
            }
        };

        clock = batch.t_ms.unwrap_or(clock + FRAME_MS);
        let m = match batch.video {
            Some([w, h]) => mapper.with_video_size(w, h),
            None         => mapper,
        };
        let point = batch.poses.first()
            .map(|p| m.map_pose(p, batch.normalized, cw, ch))
            .and_then(|p| p.point_of(args.landmark, MIN_CONFIDENCE));

        let out = state.step(clock, point);
        if out.timer_reset {
            events.push(ReplayEvent::TimerReset { at_ms: clock });
        }
        for &z in &out.newly_revealed {
            let zone = &state.zones()[z];
            events.push(ReplayEvent::Revealed { at_ms: clock, zone: z, label: zone.label, image: zone.image });
        }
        if out.start_cue {
            events.push(ReplayEvent::Cue { at_ms: clock });
        }
    }
    events
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let args = parse_args(std::env::args().skip(1));
    let reader: Box<dyn BufRead> = match &args.path {
        Some(p) => match File::open(p) {
            Ok(f)  => Box::new(BufReader::new(f)),
            Err(e) => {
                eprintln!("Error: cannot open {}: {}", p, e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (cw, ch) = args.canvas;
    println!("  Tracking {} on a {}×{} canvas", args.landmark.name(), cw, ch);

    for event in replay(reader, &args) {
        println!("{}", event);
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn argv(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    /// Default mapper on a 640×480 canvas: scale 1, mirrored, so video
    /// x = 640 - canvas x.
    fn small_canvas() -> ReplayArgs {
        ReplayArgs { canvas: (640.0, 480.0), ..ReplayArgs::default() }
    }

    #[test]
    fn parses_canvas_landmark_and_path() {
        let args = parse_args(argv(&["--canvas", "800x600", "run.jsonl", "--landmark", "15"]));
        assert_eq!(args, ReplayArgs {
            path:     Some("run.jsonl".into()),
            landmark: Landmark::LeftWrist,
            canvas:   (800.0, 600.0),
        });
    }

    #[test]
    fn malformed_options_keep_defaults() {
        let args = parse_args(argv(&["--canvas", "800by600", "--landmark", "99"]));
        assert_eq!(args, ReplayArgs::default());
        assert_eq!(parse_args(argv(&["--canvas"])), ReplayArgs::default());
    }

    #[test]
    fn clock_uses_t_ms_or_one_frame() {
        // Canvas (400, 300) is inside the happy-cat zone.
        let feed = concat!(
            "{\"type\":\"poses\",\"poses\":[]}\n",
            "{\"type\":\"poses\",\"poses\":[]}\n",
            "{\"type\":\"poses\",\"poses\":[{\"keypoints\":[{\"x\":240,\"y\":300,\"confidence\":0.9}]}]}\n",
        );
        let events = replay(Cursor::new(feed), &small_canvas());
        assert_eq!(events, vec![
            ReplayEvent::Revealed { at_ms: 48, zone: 2, label: "happy", image: "happycat.png" },
            ReplayEvent::Cue { at_ms: 48 },
        ]);
    }

    #[test]
    fn replay_reports_readiness_and_reset() {
        let feed = concat!(
            "{\"type\":\"camera_ready\"}\n",
            "not json\n",
            "\n",
            "{\"type\":\"poses\",\"t_ms\":1000,\"poses\":[{\"keypoints\":[{\"x\":240,\"y\":300,\"confidence\":0.9}]}]}\n",
            "{\"type\":\"poses\",\"t_ms\":6001,\"poses\":[]}\n",
        );
        let events = replay(Cursor::new(feed), &small_canvas());
        assert_eq!(events, vec![
            ReplayEvent::Readiness { at_ms: 0, state: Readiness::CameraReady.label() },
            ReplayEvent::Revealed { at_ms: 1000, zone: 2, label: "happy", image: "happycat.png" },
            ReplayEvent::Cue { at_ms: 1000 },
            ReplayEvent::TimerReset { at_ms: 6001 },
        ]);
    }

    #[test]
    fn events_print_one_based_zone() {
        let ev = ReplayEvent::Revealed { at_ms: 16, zone: 0, label: "cinema", image: "angrycat.jpg" };
        assert_eq!(ev.to_string(), "  [     16 ms] zone 1 (cinema) revealed → angrycat.jpg");
    }
}
