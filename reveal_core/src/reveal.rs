//! Per-frame reveal logic.
//!
//! [`RevealState`] owns the zone flags, the shared [`RevealTimer`] and the
//! [`CueGuard`].  [`RevealState::step`] is the whole per-frame update: it
//! takes the frame time and the tracked point (if any) and reports what the
//! renderer and the audio output should do.  No I/O happens here.

use crate::cue::CueGuard;
use crate::landmark::Point;
use crate::timer::{RevealTimer, REVEAL_DURATION_MS};
use crate::zone::{HitZone, Visibility, DEFAULT_ZONES};

// ════════════════════════════════════════════════════════════════════════════
// FrameOutcome
// ════════════════════════════════════════════════════════════════════════════

/// What one call to [`RevealState::step`] decided.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameOutcome {
    /// Zones to draw this frame, in zone order.  Only filled when a point
    /// was tracked; sticky zones are not drawn on frames without a pose.
    pub draw: Vec<usize>,
    /// Zones that went Hidden → Revealed this frame.
    pub newly_revealed: Vec<usize>,
    /// The timer cleared every zone (and the cue guard) this frame.
    pub timer_reset: bool,
    /// Start the cue sound now.
    pub start_cue: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Pure hit test
// ════════════════════════════════════════════════════════════════════════════

/// Next visibility for each zone: a zone is revealed if it already was or
/// if `point` lies inside it.
pub fn hit_test(zones: &[HitZone], current: &[Visibility], point: Point) -> Vec<Visibility> {
    zones.iter().zip(current).map(|(zone, &vis)| {
        if vis.is_revealed() || zone.contains(point) {
            Visibility::Revealed
        } else {
            Visibility::Hidden
        }
    }).collect()
}

// ════════════════════════════════════════════════════════════════════════════
// RevealState
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug)]
pub struct RevealState {
    zones:      Vec<HitZone>,
    visibility: Vec<Visibility>,
    timer:      RevealTimer,
    cue:        CueGuard,
}

impl Default for RevealState {
    fn default() -> Self { RevealState::new(DEFAULT_ZONES.to_vec(), REVEAL_DURATION_MS) }
}

impl RevealState {
    pub fn new(zones: Vec<HitZone>, duration_ms: u64) -> Self {
        let visibility = vec![Visibility::Hidden; zones.len()];
        RevealState {
            zones,
            visibility,
            timer: RevealTimer::new(duration_ms),
            cue:   CueGuard::default(),
        }
    }

    /// Advance one frame.
    ///
    /// Order matters: the timer is checked first, so a point still sitting
    /// inside a zone re-reveals it on the very frame the reset happens and a
    /// new episode begins.
    pub fn step(&mut self, now_ms: u64, point: Option<Point>) -> FrameOutcome {
        let mut out = FrameOutcome::default();

        if self.any_revealed() && self.timer.expired(now_ms) {
            self.visibility.fill(Visibility::Hidden);
            self.cue.reset();
            self.timer.restart(now_ms);
            out.timer_reset = true;
        }

        let Some(point) = point else { return out };

        let was_any = self.any_revealed();
        let next = hit_test(&self.zones, &self.visibility, point);
        for (i, (&before, &after)) in self.visibility.iter().zip(&next).enumerate() {
            if !after.is_revealed() {
                continue;
            }
            if !before.is_revealed() {
                out.newly_revealed.push(i);
            }
            out.draw.push(i);
            out.start_cue |= self.cue.trigger();
        }
        self.visibility = next;

        if !was_any && !out.newly_revealed.is_empty() {
            self.timer.restart(now_ms);
        }
        out
    }

    pub fn zones(&self) -> &[HitZone] { &self.zones }
    pub fn visibility(&self) -> &[Visibility] { &self.visibility }
    pub fn timer(&self) -> &RevealTimer { &self.timer }
    pub fn cue_playing(&self) -> bool { self.cue.is_playing() }

    pub fn any_revealed(&self) -> bool {
        self.visibility.iter().any(|v| v.is_revealed())
    }

    pub fn is_revealed(&self, zone: usize) -> bool {
        self.visibility.get(zone).is_some_and(|v| v.is_revealed())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::ZoneShape;
    use proptest::prelude::*;

    const CINEMA: usize = 0;
    const SPOOKY: usize = 1;
    const HAPPY:  usize = 2;
    const SECRET: usize = 3;

    fn p(x: f32, y: f32) -> Option<Point> { Some(Point::new(x, y)) }

    #[test]
    fn scenario_each_zone_reveals() {
        for (pt, zone) in [
            (p(410.0, 700.0), CINEMA),
            (p(760.0, 950.0), SPOOKY),
            (p(400.0, 300.0), HAPPY),
            (p(820.0, 42.0),  SECRET),
        ] {
            let mut s = RevealState::default();
            let out = s.step(100, pt);
            assert_eq!(out.newly_revealed, vec![zone]);
            assert_eq!(out.draw, vec![zone]);
            assert!(out.start_cue);
            assert!(s.is_revealed(zone));
        }
    }

    #[test]
    fn reveal_is_sticky_across_frames() {
        let mut s = RevealState::default();
        s.step(0, p(410.0, 700.0));
        let out = s.step(16, p(5.0, 5.0));
        assert!(s.is_revealed(CINEMA));
        assert_eq!(out.draw, vec![CINEMA]);
        assert!(out.newly_revealed.is_empty());
    }

    #[test]
    fn no_point_no_new_reveal_and_no_draw() {
        let mut s = RevealState::default();
        s.step(0, p(410.0, 700.0));
        let out = s.step(16, None);
        assert!(out.draw.is_empty());
        assert!(out.newly_revealed.is_empty());
        assert!(!out.start_cue);
        // Flag survives the empty frame.
        assert!(s.is_revealed(CINEMA));
        assert!(!s.is_revealed(SPOOKY));
    }

    #[test]
    fn cue_starts_once_per_episode() {
        let mut s = RevealState::default();
        let starts = (0..30u64)
            .map(|i| s.step(i * 16, p(410.0, 700.0)))
            .filter(|o| o.start_cue)
            .count();
        assert_eq!(starts, 1);
        assert!(s.cue_playing());
    }

    #[test]
    fn second_zone_in_same_episode_does_not_restart_cue_or_timer() {
        let mut s = RevealState::default();
        s.step(1_000, p(410.0, 700.0));
        let out = s.step(2_000, p(760.0, 950.0));
        assert_eq!(out.newly_revealed, vec![SPOOKY]);
        assert_eq!(out.draw, vec![CINEMA, SPOOKY]);
        assert!(!out.start_cue);
        assert_eq!(s.timer().start_ms, 1_000);
    }

    #[test]
    fn timer_clears_everything_after_duration() {
        let mut s = RevealState::default();
        s.step(10_000, p(410.0, 700.0));
        s.step(11_000, p(760.0, 950.0));
        let out = s.step(15_000, None);
        assert!(!out.timer_reset);
        let out = s.step(15_001, None);
        assert!(out.timer_reset);
        assert!(!s.any_revealed());
        assert!(!s.cue_playing());
        assert_eq!(s.timer().start_ms, 15_001);
    }

    #[test]
    fn point_still_inside_starts_a_new_episode_on_reset_frame() {
        let mut s = RevealState::default();
        s.step(0, p(410.0, 700.0));
        let out = s.step(5_001, p(410.0, 700.0));
        assert!(out.timer_reset);
        assert_eq!(out.newly_revealed, vec![CINEMA]);
        assert!(out.start_cue);
        assert_eq!(s.timer().start_ms, 5_001);
    }

    #[test]
    fn repeating_cadence() {
        let mut s = RevealState::default();
        let resets = (0..=20_000u64).step_by(10)
            .map(|t| s.step(t, p(400.0, 300.0)))
            .filter(|o| o.timer_reset)
            .count();
        // Resets at ~5010, ~10020, ~15030.
        assert_eq!(resets, 3);
    }

    #[test]
    fn timer_idle_while_nothing_revealed() {
        let mut s = RevealState::default();
        let out = s.step(60_000, p(0.0, 0.0));
        assert!(!out.timer_reset);
        assert_eq!(s.timer().start_ms, 0);
    }

    #[test]
    fn hit_test_is_pure() {
        let zones = [HitZone::new("a", "a.png", ZoneShape::rect(0.0, 10.0, 0.0, 10.0))];
        let before = [Visibility::Hidden];
        let after = hit_test(&zones, &before, Point::new(5.0, 5.0));
        assert_eq!(before, [Visibility::Hidden]);
        assert_eq!(after, vec![Visibility::Revealed]);
    }

    // ── properties ───────────────────────────────────────────────────────

    fn inside_rect(zone: usize) -> impl Strategy<Value = Point> {
        let ZoneShape::Rect { x_min, x_max, y_min, y_max } = DEFAULT_ZONES[zone].shape else {
            unreachable!("zone {zone} is not a rectangle")
        };
        // Strictly inside.
        (x_min + 0.01..x_max - 0.01, y_min + 0.01..y_max - 0.01)
            .prop_map(|(x, y)| Point::new(x, y))
    }

    proptest! {
        #[test]
        fn strictly_inside_reveals_within_one_frame(
            (zone, pt) in (0usize..3).prop_flat_map(|z| (Just(z), inside_rect(z))),
            now in 0u64..1_000_000,
        ) {
            let mut s = RevealState::default();
            let out = s.step(now, Some(pt));
            prop_assert!(s.is_revealed(zone));
            prop_assert!(out.newly_revealed.contains(&zone));
        }

        #[test]
        fn revealed_stays_until_reset(
            points in proptest::collection::vec(
                proptest::option::of((-2000.0f32..2000.0, -2000.0f32..2000.0)), 1..60),
        ) {
            let mut s = RevealState::default();
            s.step(0, Some(Point::new(410.0, 700.0)));
            for (i, pt) in points.iter().enumerate() {
                let now = 1 + i as u64 * 16; // stays under the duration
                s.step(now, pt.map(|(x, y)| Point::new(x, y)));
                prop_assert!(s.is_revealed(CINEMA));
            }
        }

        #[test]
        fn absent_point_never_reveals(now in 0u64..100_000, frames in 1usize..50) {
            let mut s = RevealState::default();
            for i in 0..frames {
                let out = s.step(now + i as u64, None);
                prop_assert!(out.newly_revealed.is_empty());
            }
            prop_assert!(!s.any_revealed());
        }

        #[test]
        fn everything_clears_once_duration_has_passed(
            start in 0u64..1_000_000,
            extra in 1u64..10_000,
        ) {
            let mut s = RevealState::default();
            s.step(start, Some(Point::new(760.0, 950.0)));
            let out = s.step(start + REVEAL_DURATION_MS + extra, None);
            prop_assert!(out.timer_reset);
            prop_assert!(!s.any_revealed());
            prop_assert!(!s.cue_playing());
            prop_assert_eq!(s.timer().start_ms, start + REVEAL_DURATION_MS + extra);
        }
    }
}
