//! The shared reveal timer.
//!
//! One baseline timestamp serves every zone.  Once any zone is revealed the
//! frame loop asks [`RevealTimer::expired`] each frame; past the duration
//! everything is cleared and the baseline moves to "now".

/// Default reveal duration.
pub const REVEAL_DURATION_MS: u64 = 5_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTimer {
    /// Baseline of the current episode, in ms since sketch start.
    pub start_ms:    u64,
    pub duration_ms: u64,
}

impl Default for RevealTimer {
    fn default() -> Self { RevealTimer::new(REVEAL_DURATION_MS) }
}

impl RevealTimer {
    pub fn new(duration_ms: u64) -> Self {
        RevealTimer { start_ms: 0, duration_ms }
    }

    /// Move the baseline to `now_ms`.
    pub fn restart(&mut self, now_ms: u64) { self.start_ms = now_ms; }

    pub fn elapsed(&self, now_ms: u64) -> u64 { now_ms.saturating_sub(self.start_ms) }

    /// Strictly past the duration.
    pub fn expired(&self, now_ms: u64) -> bool { self.elapsed(now_ms) > self.duration_ms }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_strictly_after_duration() {
        let mut t = RevealTimer::default();
        t.restart(1_000);
        assert!(!t.expired(1_000));
        assert!(!t.expired(6_000));
        assert!(t.expired(6_001));
    }

    #[test]
    fn clock_going_backwards_never_expires() {
        let mut t = RevealTimer::new(10);
        t.restart(500);
        assert_eq!(t.elapsed(100), 0);
        assert!(!t.expired(100));
    }
}
