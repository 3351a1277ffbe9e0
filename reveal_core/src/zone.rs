//! Hit zones: fixed screen regions that reveal an image when the tracked
//! point enters them.

use crate::landmark::Point;

// ════════════════════════════════════════════════════════════════════════════
// ZoneShape
// ════════════════════════════════════════════════════════════════════════════

/// The region a zone tests against.  Bounds are inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoneShape {
    Rect { x_min: f32, x_max: f32, y_min: f32, y_max: f32 },
    /// Matches only when `x` equals the value exactly, for any `y`.
    ///
    /// The secret zone has always been tested this way.  It almost never
    /// fires with live tracking data; keep it until someone decides what
    /// the range was meant to be.
    ExactX(f32),
}

impl ZoneShape {
    pub const fn rect(x_min: f32, x_max: f32, y_min: f32, y_max: f32) -> Self {
        ZoneShape::Rect { x_min, x_max, y_min, y_max }
    }

    #[allow(clippy::float_cmp)]
    pub fn contains(&self, p: Point) -> bool {
        match *self {
            ZoneShape::Rect { x_min, x_max, y_min, y_max } =>
                p.x >= x_min && p.x <= x_max && p.y >= y_min && p.y <= y_max,
            ZoneShape::ExactX(x) => p.x == x,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HitZone
// ════════════════════════════════════════════════════════════════════════════

/// A zone and the asset it reveals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitZone {
    /// Short name used in logs ("cinema", "spooky", …).
    pub label: &'static str,
    /// File name of the full-screen image, relative to the asset directory.
    pub image: &'static str,
    pub shape: ZoneShape,
}

impl HitZone {
    pub const fn new(label: &'static str, image: &'static str, shape: ZoneShape) -> Self {
        HitZone { label, image, shape }
    }

    pub fn contains(&self, p: Point) -> bool { self.shape.contains(p) }
}

/// Per-zone reveal flag.  `Revealed` is sticky until the reveal timer
/// clears every zone at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Visibility {
    #[default]
    Hidden,
    Revealed,
}

impl Visibility {
    pub fn is_revealed(self) -> bool { self == Visibility::Revealed }
}

/// The four zones of the cat-hunt layout, in draw order.
pub const DEFAULT_ZONES: [HitZone; 4] = [
    HitZone::new("cinema", "angrycat.jpg",  ZoneShape::rect(390.0, 432.0, 678.0, 732.0)),
    HitZone::new("spooky", "spookycat.jpg", ZoneShape::rect(720.0, 800.0, 900.0, 1000.0)),
    HitZone::new("happy",  "happycat.png",  ZoneShape::rect(300.0, 500.0, 230.0, 363.0)),
    HitZone::new("secret", "secretdog.jpg", ZoneShape::ExactX(820.0)),
];

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_bounds_inclusive() {
        let z = ZoneShape::rect(390.0, 432.0, 678.0, 732.0);
        assert!(z.contains(Point::new(390.0, 678.0)));
        assert!(z.contains(Point::new(432.0, 732.0)));
        assert!(!z.contains(Point::new(389.9, 700.0)));
        assert!(!z.contains(Point::new(410.0, 732.1)));
    }

    #[test]
    fn exact_x_ignores_y() {
        let z = ZoneShape::ExactX(820.0);
        assert!(z.contains(Point::new(820.0, -5.0)));
        assert!(z.contains(Point::new(820.0, 5000.0)));
        assert!(!z.contains(Point::new(820.01, 0.0)));
        assert!(!z.contains(Point::new(819.99, 0.0)));
    }

    #[test]
    fn default_layout_scenario_points() {
        let hits = |p: Point| -> Vec<&str> {
            DEFAULT_ZONES.iter().filter(|z| z.contains(p)).map(|z| z.label).collect()
        };
        assert_eq!(hits(Point::new(410.0, 700.0)), ["cinema"]);
        assert_eq!(hits(Point::new(760.0, 950.0)), ["spooky"]);
        assert_eq!(hits(Point::new(400.0, 300.0)), ["happy"]);
        assert_eq!(hits(Point::new(820.0, 123.0)), ["secret"]);
        assert!(hits(Point::new(10.0, 10.0)).is_empty());
    }

    #[test]
    fn visibility_defaults_hidden() {
        assert_eq!(Visibility::default(), Visibility::Hidden);
        assert!(Visibility::Revealed.is_revealed());
    }
}
