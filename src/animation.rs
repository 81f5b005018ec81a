//! Enter/fill animation for newly entered characters.

use std::time::{Duration, Instant};

/// Length of the one-shot enter tween.
pub(crate) const ENTER_DURATION: Duration = Duration::from_millis(150);

const ENTER_START_SCALE: f32 = 0.5;

/// Decelerating ease-out mapping.
/// Input: linear progress in [0.0, 1.0].
/// Output: eased progress in [0.0, 1.0].
pub(crate) fn decelerate(progress: f32) -> f32 {
    let t = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// Scale and opacity applied to one glyph's paint mid-tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphTween {
    /// Uniform scale around the glyph center, 0.5 -> 1.0.
    pub scale: f32,
    /// Opacity multiplier, 0.0 -> 1.0.
    pub alpha: f32,
}

/// A one-shot tween targeting the most recently filled segment.
///
/// Restarted on every net character addition; removals never trigger it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EnterAnimation {
    target: usize,
    started: Instant,
}

impl EnterAnimation {
    pub(crate) fn start(target: usize, now: Instant) -> Self {
        Self { target, started: now }
    }

    /// Samples the tween for segment `index`.
    ///
    /// Returns `None` for non-target segments and once the tween has run its
    /// course, meaning the glyph paints at full scale and opacity.
    pub(crate) fn sample(&self, index: usize, now: Instant) -> Option<GlyphTween> {
        if index != self.target {
            return None;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= ENTER_DURATION {
            return None;
        }
        let progress = decelerate(elapsed.as_secs_f32() / ENTER_DURATION.as_secs_f32());
        Some(GlyphTween {
            scale: ENTER_START_SCALE + (1.0 - ENTER_START_SCALE) * progress,
            alpha: progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decelerate_endpoints_and_monotonicity() {
        assert_eq!(decelerate(0.0), 0.0);
        assert_eq!(decelerate(1.0), 1.0);
        let mut last = 0.0;
        for i in 1..=10 {
            let v = decelerate(i as f32 / 10.0);
            assert!(v >= last);
            last = v;
        }
        // Decelerating: the first half covers more than half the distance.
        assert!(decelerate(0.5) > 0.5);
    }

    #[test]
    fn sample_starts_small_and_transparent() {
        let now = Instant::now();
        let anim = EnterAnimation::start(2, now);
        let tween = anim.sample(2, now).unwrap();
        assert_eq!(tween.scale, 0.5);
        assert_eq!(tween.alpha, 0.0);
    }

    #[test]
    fn sample_ignores_other_segments_and_finishes() {
        let now = Instant::now();
        let anim = EnterAnimation::start(2, now);
        assert_eq!(anim.sample(1, now), None);
        assert_eq!(anim.sample(2, now + ENTER_DURATION), None);
    }
}
