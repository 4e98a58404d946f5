//! Time-based tweening of a single scalar attribute.

use std::time::{Duration, Instant};

/// Cubic in-out easing, the default curve for chart transitions.
pub fn ease_cubic_in_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// An attribute animating from `from` to `to` over `duration`.
///
/// Retargeting starts from whatever value is displayed at that moment, so a
/// new target supersedes an in-flight animation without a visual jump.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transition {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
}

impl Transition {
    /// A value that is already at rest.
    pub fn settled(value: f32, now: Instant) -> Self {
        Self {
            from: value,
            to: value,
            started: now,
            duration: Duration::ZERO,
        }
    }

    pub fn value_at(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= self.duration {
            return self.to;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        self.from + (self.to - self.from) * ease_cubic_in_out(t)
    }

    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration) {
        let current = self.value_at(now);
        self.from = current;
        self.to = to;
        self.started = now;
        self.duration = if current == to { Duration::ZERO } else { duration };
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn is_running(&self, now: Instant) -> bool {
        !self.duration.is_zero() && now.saturating_duration_since(self.started) < self.duration
    }
}
