//! Software framebuffer and drawing primitives.
//!
//! All coordinates are signed so shapes centred near an edge clip cleanly.
//! Colours are packed ARGB (`0xAARRGGBB`).

use crate::assets::SpriteFrame;

pub struct Canvas {
    width:  usize,
    height: usize,
    buf:    Vec<u32>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas { width, height, buf: vec![0xFF000000; width * height] }
    }

    pub fn width(&self)  -> usize { self.width }
    pub fn height(&self) -> usize { self.height }
    pub fn buffer(&self) -> &[u32] { &self.buf }

    /// Match a new window size.  Returns true if the buffer was reallocated.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if width == self.width && height == self.height {
            return false;
        }
        self.width  = width;
        self.height = height;
        self.buf    = vec![0xFF000000; width * height];
        true
    }

    pub fn clear(&mut self, color: u32) { self.buf.fill(color); }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.buf[y * self.width + x])
    }

    fn set_pixel(&mut self, x: isize, y: isize, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.buf[y as usize * self.width + x as usize] = color;
        }
    }

    pub fn fill_rect(&mut self, x: isize, y: isize, w: usize, h: usize, color: u32) {
        let x0 = x.clamp(0, self.width as isize) as usize;
        let y0 = y.clamp(0, self.height as isize) as usize;
        let x1 = x.saturating_add(w as isize).clamp(0, self.width as isize) as usize;
        let y1 = y.saturating_add(h as isize).clamp(0, self.height as isize) as usize;
        if x1 <= x0 {
            return;
        }
        for row in y0..y1 {
            self.buf[row * self.width + x0..row * self.width + x1].fill(color);
        }
    }

    /// Filled circle of the given diameter centred on (cx, cy).
    pub fn disc(&mut self, cx: f32, cy: f32, diameter: f32, color: u32) {
        let r = diameter / 2.0;
        let r2 = r * r;
        // Float-to-int casts saturate; clipping to the canvas keeps the
        // loops short however far off-screen the centre is.
        let y0 = ((cy - r).floor() as isize).max(0);
        let x0 = ((cx - r).floor() as isize).max(0);
        let y1 = ((cy + r).ceil() as isize).min(self.height as isize - 1);
        let x1 = ((cx + r).ceil() as isize).min(self.width as isize - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - cx;
                let dy = y as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r2 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draw `frame` scaled (nearest neighbour) into the box at (x, y).
    /// Pixels with alpha below half are skipped, others are blended.
    pub fn blit_scaled(&mut self, frame: &SpriteFrame, x: isize, y: isize, w: usize, h: usize) {
        if frame.width == 0 || frame.height == 0 || w == 0 || h == 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = x.saturating_add(w as isize).min(self.width as isize);
        let y1 = y.saturating_add(h as isize).min(self.height as isize);
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        for dy in y0..y1 {
            let sy = ((dy - y) as usize * frame.height / h).min(frame.height - 1);
            let src_row = &frame.pixels[sy * frame.width..(sy + 1) * frame.width];
            let dst_row = dy as usize * self.width;
            for dx in x0..x1 {
                let sx = ((dx - x) as usize * frame.width / w).min(frame.width - 1);
                let src = src_row[sx];
                let alpha = src >> 24;
                if alpha == 0xFF {
                    self.buf[dst_row + dx as usize] = src;
                } else if alpha >= 0x80 {
                    let dst = &mut self.buf[dst_row + dx as usize];
                    *dst = over(*dst, src, alpha);
                }
            }
        }
    }

    /// Width in pixels of `text` at `scale`.
    pub fn text_width(text: &str, scale: usize) -> usize {
        let n = text.chars().count();
        if n == 0 { 0 } else { (n * 4 - 1) * scale }
    }

    /// Draw with the 3×5 font, each glyph pixel a
    /// `scale`×`scale` block.
    pub fn draw_text(&mut self, text: &str, x: isize, y: isize, scale: usize, color: u32) {
        let s = scale.max(1) as isize;
        let mut cx = x;
        for ch in text.chars() {
            let bits = glyph(ch);
            for row in 0..5 {
                for col in 0..3 {
                    if glyph_bit(bits, row, col) {
                        self.fill_rect(cx + col as isize * s, y + row as isize * s, s as usize, s as usize, color);
                    }
                }
            }
            cx += 4 * s; // 3 wide + 1 gap
            if cx >= self.width as isize { break; }
        }
    }

    /// Text centred horizontally on `cx`, top edge at `y`.
    pub fn draw_text_centered(&mut self, text: &str, cx: isize, y: isize, scale: usize, color: u32) {
        let w = Canvas::text_width(text, scale) as isize;
        self.draw_text(text, cx - w / 2, y, scale, color);
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 font and compositing
// ────────────────────────────────────────────────────────────────────────────

/// Uppercase glyphs packed 15 bits each, top row in the high bits.
/// Lowercase input is folded to uppercase before lookup.
const GLYPHS: [(char, u16); 44] = [
    ('0', 0x7B6F), ('1', 0x2C97), ('2', 0x73E7), ('3', 0x73CF),
    ('4', 0x5BC9), ('5', 0x79CF), ('6', 0x79EF), ('7', 0x7249),
    ('8', 0x7BEF), ('9', 0x7BCF), ('A', 0x7BED), ('B', 0x6BAE),
    ('C', 0x7927), ('D', 0x6B6E), ('E', 0x79E7), ('F', 0x79E4),
    ('G', 0x796F), ('H', 0x5BED), ('I', 0x7497), ('J', 0x126F),
    ('K', 0x5BAD), ('L', 0x4927), ('M', 0x5F6D), ('N', 0x7B6D),
    ('O', 0x7B6F), ('P', 0x7BE4), ('Q', 0x7B79), ('R', 0x6BAD),
    ('S', 0x79CF), ('T', 0x7492), ('U', 0x5B6F), ('V', 0x5B52),
    ('W', 0x5B7D), ('X', 0x5AAD), ('Y', 0x5BD2), ('Z', 0x72A7),
    ('!', 0x2482), ('?', 0x7282), ('/', 0x12A4), ('-', 0x01C0),
    ('.', 0x0002), (',', 0x0014), (':', 0x0410), (' ', 0x0000),
];

/// Centre dot for anything the table lacks.
const MISSING_GLYPH: u16 = 0x0080;

fn glyph(c: char) -> u16 {
    let c = c.to_ascii_uppercase();
    GLYPHS.iter()
        .find(|(g, _)| *g == c)
        .map_or(MISSING_GLYPH, |&(_, bits)| bits)
}

fn glyph_bit(bits: u16, row: usize, col: usize) -> bool {
    (bits >> (14 - (row * 3 + col))) & 1 == 1
}

/// Composite opaque `src` over `dst` with coverage `alpha` (0–255).
fn over(dst: u32, src: u32, alpha: u32) -> u32 {
    let inv = 255 - alpha;
    let channel = |shift: u32| {
        let s = (src >> shift) & 0xFF;
        let d = (dst >> shift) & 0xFF;
        ((s * alpha + d * inv + 127) / 255) << shift
    };
    0xFF000000 | channel(16) | channel(8) | channel(0)
}
