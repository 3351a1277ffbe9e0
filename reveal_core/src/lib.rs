//! # reveal_core
//!
//! The frame-independent half of the pose reveal sketch: a tracked body
//! keypoint acts as a cursor, and four fixed hit zones each reveal a
//! full-screen image (plus a cheer) when the cursor enters them.
//!
//! Nothing here touches a window, a camera or a sound card.  The app crate
//! feeds [`RevealState::step`] one tracked point per frame and acts on the
//! returned [`FrameOutcome`].
//!
//! ## Default zones
//!
//! | # | Label | Image | Test |
//! |---|---|---|---|
//! | 1 | cinema | `angrycat.jpg`  | 390 ≤ x ≤ 432, 678 ≤ y ≤ 732 |
//! | 2 | spooky | `spookycat.jpg` | 720 ≤ x ≤ 800, 900 ≤ y ≤ 1000 |
//! | 3 | happy  | `happycat.png`  | 300 ≤ x ≤ 500, 230 ≤ y ≤ 363 |
//! | 4 | secret | `secretdog.jpg` | x == 820 |
//!
//! Revealed zones stay revealed until the shared [`RevealTimer`] runs past
//! five seconds, at which point every zone and the cue guard reset together.
//!
//! ## Quick start
//!
//! ```rust
//! use reveal_core::{RevealState, Point};
//!
//! let mut state = RevealState::default();
//! let out = state.step(0, Some(Point::new(410.0, 700.0)));
//! assert_eq!(out.newly_revealed, vec![0]);
//! assert!(out.start_cue);
//! ```

pub mod landmark;
pub mod zone;
pub mod timer;
pub mod cue;
pub mod readiness;
pub mod mapper;
pub mod feed;
pub mod reveal;

pub use landmark::{Keypoint, Landmark, Point, Pose};
pub use zone::{HitZone, Visibility, ZoneShape, DEFAULT_ZONES};
pub use timer::{RevealTimer, REVEAL_DURATION_MS};
pub use cue::CueGuard;
pub use readiness::{Readiness, ReadinessEvent};
pub use mapper::{CameraMapper, FitMode};
pub use feed::{parse_line, FeedError, FeedMessage, PoseBatch};
pub use reveal::{hit_test, FrameOutcome, RevealState};
