/// A small tween helper for adapter-driven smooth scrolling.
///
/// The engine consumes signed per-frame deltas rather than absolute offsets,
/// so the tween tracks how much of its total delta has been handed out and
/// [`ScrollTween::step`] returns the increment due at each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollTween {
    pub total: i32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub easing: Easing,
    applied: i32,
}

impl ScrollTween {
    pub fn new(total: i32, start_ms: u64, duration_ms: u64, easing: Easing) -> Self {
        Self {
            total,
            start_ms,
            duration_ms: duration_ms.max(1),
            easing,
            applied: 0,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Total delta that should have been applied by `now_ms`.
    pub fn target(&self, now_ms: u64) -> i32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        (self.total as f32 * self.easing.sample(t)) as i32
    }

    /// Delta due at this tick; advances the tween's applied amount.
    pub fn step(&mut self, now_ms: u64) -> i32 {
        let target = self.target(now_ms);
        let step = target - self.applied;
        self.applied = target;
        step
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    Linear,
    SmoothStep,
    EaseInOutCubic,
}

impl Easing {
    pub fn sample(self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - (u * u * u) / 2.0
                }
            }
        }
    }
}
