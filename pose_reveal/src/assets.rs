//! Image assets: the four reveal images and the two looping status graphics.
//!
//! Everything is decoded once at start-up into packed ARGB so drawing is a
//! plain copy.  A file that fails to load is logged and left out; the frame
//! loop simply draws nothing in its place.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageError, RgbaImage};
use tracing::{error, info};

use crate::config::SketchConfig;
use crate::error::{AppError, AppResult};

// ════════════════════════════════════════════════════════════════════════════
// Sprite
// ════════════════════════════════════════════════════════════════════════════

/// One decoded frame, row-major ARGB.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteFrame {
    pub width:    usize,
    pub height:   usize,
    pub pixels:   Vec<u32>,
    pub delay_ms: u64,
}

impl SpriteFrame {
    pub fn from_rgba(img: &RgbaImage, delay_ms: u64) -> Self {
        let pixels = img.pixels()
            .map(|p| {
                let [r, g, b, a] = p.0;
                (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32
            })
            .collect();
        SpriteFrame {
            width:  img.width() as usize,
            height: img.height() as usize,
            pixels,
            delay_ms,
        }
    }
}

/// A still image or a looping animation.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    frames:   Vec<SpriteFrame>,
    cycle_ms: u64,
}

impl Sprite {
    /// Build from frames.  Returns `None` for an empty list.
    pub fn new(frames: Vec<SpriteFrame>) -> Option<Self> {
        if frames.is_empty() {
            return None;
        }
        let cycle_ms = frames.iter().map(|f| f.delay_ms).sum();
        Some(Sprite { frames, cycle_ms })
    }

    /// Decode a file.  GIFs keep every frame; everything else is a still.
    pub fn load(path: &Path) -> AppResult<Self> {
        let asset_err = |source: ImageError| AppError::Asset { path: path.to_path_buf(), source };

        let is_gif = path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("gif"));

        let frames = if is_gif {
            let file = File::open(path).map_err(|e| asset_err(ImageError::IoError(e)))?;
            let decoder = GifDecoder::new(BufReader::new(file)).map_err(asset_err)?;
            decoder.into_frames()
                .collect_frames()
                .map_err(asset_err)?
                .iter()
                .map(|f| {
                    let (num, den) = f.delay().numer_denom_ms();
                    // Browsers treat tiny GIF delays as 100 ms.
                    let ms = num as u64 / den.max(1) as u64;
                    SpriteFrame::from_rgba(f.buffer(), if ms <= 10 { 100 } else { ms })
                })
                .collect()
        } else {
            let img = image::open(path).map_err(asset_err)?;
            vec![SpriteFrame::from_rgba(&img.to_rgba8(), 0)]
        };

        Sprite::new(frames).ok_or_else(|| asset_err(ImageError::IoError(
            std::io::Error::new(std::io::ErrorKind::InvalidData, "no frames"),
        )))
    }

    pub fn frame_count(&self) -> usize { self.frames.len() }

    /// The frame to show `elapsed_ms` after start-up.
    pub fn frame_at(&self, elapsed_ms: u64) -> &SpriteFrame {
        if self.frames.len() == 1 || self.cycle_ms == 0 {
            return &self.frames[0];
        }
        let mut t = elapsed_ms % self.cycle_ms;
        for f in &self.frames {
            if t < f.delay_ms {
                return f;
            }
            t -= f.delay_ms;
        }
        &self.frames[self.frames.len() - 1]
    }
}

// ════════════════════════════════════════════════════════════════════════════
// AssetSet
// ════════════════════════════════════════════════════════════════════════════

/// Everything the renderer draws.  `reveals[i]` belongs to zone `i`.
#[derive(Debug, Default)]
pub struct AssetSet {
    pub reveals:  Vec<Option<Sprite>>,
    pub loading:  Option<Sprite>,
    pub scanning: Option<Sprite>,
}

impl AssetSet {
    /// Load every image named by `cfg`, logging failures instead of
    /// returning them.
    pub fn load(cfg: &SketchConfig) -> Self {
        let dir = &cfg.asset_dir;
        AssetSet {
            reveals:  cfg.zones.iter().map(|z| load_logged(dir, z.image)).collect(),
            loading:  load_logged(dir, cfg.loading_image),
            scanning: load_logged(dir, cfg.scanning_image),
        }
    }

    pub fn reveal(&self, zone: usize) -> Option<&Sprite> {
        self.reveals.get(zone).and_then(Option::as_ref)
    }
}

fn load_logged(dir: &Path, name: &str) -> Option<Sprite> {
    match Sprite::load(&dir.join(name)) {
        Ok(s) => {
            info!(asset = name, frames = s.frame_count(), "loaded");
            Some(s)
        }
        Err(e) => {
            error!("{}", e);
            None
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
