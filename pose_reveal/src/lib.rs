//! # pose_reveal
//!
//! A full-window sketch where a tracked body keypoint acts as a cursor.
//! Moving it into one of four hidden zones reveals a picture and starts a
//! cheering clip; five seconds after the first reveal everything hides
//! again and the hunt starts over.
//!
//! ## Zones
//!
//! | Zone | Image | Hit region (canvas px) |
//! |---|---|---|
//! | 0 | `angrycat.jpg`  | x 390–432, y 678–732 |
//! | 1 | `spookycat.jpg` | x 720–800, y 900–1000 |
//! | 2 | `happycat.png`  | x 300–500, y 230–363 |
//! | 3 | `secretdog.jpg` | x exactly 820 |
//!
//! ## Pose sources
//!
//! * (default): **Simulation mode**: the mouse pointer stands in for the
//!   tracked keypoint.
//! * `--feed`: **Detector mode**: JSON lines on stdin, one per detection
//!   (see `reveal_core::feed`).
//!
//! ## Command line
//!
//! | Flag | Effect |
//! |---|---|
//! | `--left-hand` | Track the left wrist; both wrists must be visible |
//! | `--feed` | Read poses from stdin instead of the mouse |
//! | `--assets <dir>` | Image and audio directory (default `assets/`) |
//!
//! ### Keys
//!
//! | Key | Action |
//! |---|---|
//! | `Escape` / `Q` | Quit |
//!
//! Logging goes through `tracing`; set `RUST_LOG=debug` for per-frame
//! detail.

pub mod config;
pub mod error;
pub mod source;
pub mod assets;
pub mod audio;
pub mod canvas;
pub mod visualizer;
pub mod app;
