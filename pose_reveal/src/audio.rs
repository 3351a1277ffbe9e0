//! Cue playback.
//!
//! The clip is read into memory once; each start decodes it afresh on a
//! detached `rodio` sink so overlapping episodes never cut each other off.
//! Whether to start at all is decided by `reveal_core::CueGuard`.

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use tracing::{info, warn};

use crate::error::{AppError, AppResult};

// ════════════════════════════════════════════════════════════════════════════
// CueOut: abstraction over rodio / null (for testing)
// ════════════════════════════════════════════════════════════════════════════

pub trait CueOut {
    fn play(&mut self);
}

// ── rodio backend ─────────────────────────────────────────────────────────

struct RodioOut {
    _stream: OutputStream,
    handle:  OutputStreamHandle,
    clip:    Arc<[u8]>,
}

impl RodioOut {
    fn open(path: &Path) -> AppResult<Self> {
        let clip: Arc<[u8]> = fs::read(path)?.into();
        // Decode once up front so a bad file is reported at start-up.
        Decoder::new(Cursor::new(clip.clone()))
            .map_err(|e| AppError::Audio(format!("{}: {}", path.display(), e)))?;
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| AppError::Audio(e.to_string()))?;
        Ok(RodioOut { _stream: stream, handle, clip })
    }
}

impl CueOut for RodioOut {
    fn play(&mut self) {
        let sink = match Sink::try_new(&self.handle) {
            Ok(s)  => s,
            Err(e) => { warn!("cue sink unavailable: {}", e); return; }
        };
        match Decoder::new(Cursor::new(self.clip.clone())) {
            Ok(source) => {
                sink.append(source);
                sink.detach();
            }
            Err(e) => warn!("cue decode failed: {}", e),
        }
    }
}

// ── null backend (used when no device or clip is available) ──────────────

#[derive(Debug, Default)]
pub struct NullOut {
    pub plays: usize,
}

impl CueOut for NullOut {
    fn play(&mut self) { self.plays += 1; }
}

// ════════════════════════════════════════════════════════════════════════════
// open_cue_output
// ════════════════════════════════════════════════════════════════════════════

/// Open the default audio device with `clip` loaded.
/// Falls back to [`NullOut`] with a warning if either is unavailable.
pub fn open_cue_output(clip: &Path) -> Box<dyn CueOut> {
    match RodioOut::open(clip) {
        Ok(out) => {
            info!(clip = %clip.display(), "cue ready");
            Box::new(out)
        }
        Err(e) => {
            warn!("{}; cue will be silent", e);
            Box::new(NullOut::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_out_counts_plays() {
        let mut out = NullOut::default();
        out.play();
        out.play();
        assert_eq!(out.plays, 2);
    }

    #[test]
    fn missing_clip_is_an_error() {
        assert!(RodioOut::open(Path::new("/definitely/not/here.mp3")).is_err());
    }
}
