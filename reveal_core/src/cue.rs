//! "Play once per episode" guard for the reveal sound.

/// Guards playback of the cue.  [`CueGuard::trigger`] only says "start" the
/// first time it is called after a reset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CueGuard {
    playing: bool,
}

impl CueGuard {
    /// Returns `true` when the caller should start playback now.
    pub fn trigger(&mut self) -> bool {
        if self.playing {
            return false;
        }
        self.playing = true;
        true
    }

    pub fn is_playing(&self) -> bool { self.playing }

    /// Only the reveal timer calls this.
    pub fn reset(&mut self) { self.playing = false; }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_trigger_starts() {
        let mut g = CueGuard::default();
        assert!(g.trigger());
        assert!(g.is_playing());
    }

    #[test]
    fn repeated_triggers_start_once() {
        let mut g = CueGuard::default();
        let starts = (0..50).filter(|_| g.trigger()).count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn reset_rearms() {
        let mut g = CueGuard::default();
        g.trigger();
        g.reset();
        assert!(!g.is_playing());
        assert!(g.trigger());
    }
}
