//! Reveal progress
//!
//! Per-frame scalar in `[0, 1]` that gates how much of a drawn path is
//! visible. Runs independently of the value animation.

/// Default progress added per animation frame
pub const DEFAULT_REVEAL_STEP: f64 = 0.02;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealProgress {
    progress: f64,
    step: f64,
}

impl RevealProgress {
    /// Start hidden (progress 0)
    pub fn new(step: f64) -> Self {
        Self {
            progress: 0.0,
            step: step.max(f64::EPSILON),
        }
    }

    /// Fully revealed, for charts drawn without animation
    pub fn complete() -> Self {
        Self {
            progress: 1.0,
            step: DEFAULT_REVEAL_STEP,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance one frame; returns `true` while more frames are needed
    pub fn advance(&mut self) -> bool {
        self.progress = (self.progress + self.step).min(1.0);
        !self.is_complete()
    }

    pub fn reset(&mut self) {
        self.progress = 0.0;
    }

    /// Number of the first `total` points currently connected by the path.
    ///
    /// Always at least one point so a path can start, and all points once
    /// the reveal completes.
    pub fn revealed_len(&self, total: usize) -> usize {
        if total == 0 {
            return 0;
        }
        let n = (total as f64 * self.progress).ceil() as usize;
        n.clamp(1, total)
    }

    /// Number of points that get a marker drawn
    pub fn marker_len(&self, total: usize) -> usize {
        ((total as f64 * self.progress).floor() as usize).min(total)
    }
}

impl Default for RevealProgress {
    fn default() -> Self {
        Self::new(DEFAULT_REVEAL_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_caps_at_one() {
        let mut reveal = RevealProgress::new(0.3);
        assert!(reveal.advance());
        assert!(reveal.advance());
        assert!(reveal.advance());
        assert!(!reveal.advance());
        assert_eq!(reveal.progress(), 1.0);
        assert!(!reveal.advance());
        assert_eq!(reveal.progress(), 1.0);
    }

    #[test]
    fn test_default_step_completes_in_fifty_frames() {
        let mut reveal = RevealProgress::default();
        let mut frames = 0;
        while reveal.advance() {
            frames += 1;
            assert!(frames < 100);
        }
        assert!(reveal.is_complete());
        assert!((49..=51).contains(&(frames + 1)));
    }

    #[test]
    fn test_revealed_lengths() {
        let mut reveal = RevealProgress::new(0.5);
        assert_eq!(reveal.revealed_len(8), 1);
        assert_eq!(reveal.marker_len(8), 0);

        reveal.advance();
        assert_eq!(reveal.revealed_len(8), 4);
        assert_eq!(reveal.marker_len(8), 4);

        reveal.advance();
        assert_eq!(reveal.revealed_len(8), 8);
        assert_eq!(reveal.marker_len(8), 8);
        assert_eq!(reveal.revealed_len(0), 0);
    }

    #[test]
    fn test_reset_restarts() {
        let mut reveal = RevealProgress::complete();
        assert!(reveal.is_complete());
        reveal.reset();
        assert_eq!(reveal.progress(), 0.0);
    }
}
