//! Eased progress bar animation

use std::time::{Duration, Instant};

/// Smooths jumps of the pipeline's progress value for display
#[derive(Debug, Clone)]
pub struct ProgressBar {
    /// Value the animation started from
    from: f32,
    /// Value the animation is heading to
    target: f32,
    /// When the current animation started
    started: Instant,
}

impl ProgressBar {
    /// Duration of one easing transition (300ms)
    const TRANSITION: Duration = Duration::from_millis(300);

    pub fn new() -> Self {
        Self {
            from: 0.0,
            target: 0.0,
            started: Instant::now(),
        }
    }

    /// Aim at a new value, starting from wherever the bar is drawn now
    pub fn set_target_at(&mut self, target: u8, now: Instant) {
        let target = f32::from(target.min(100));
        if (target - self.target).abs() < f32::EPSILON {
            return;
        }
        self.from = self.displayed_at(now);
        self.target = target;
        self.started = now;
    }

    pub fn set_target(&mut self, target: u8) {
        self.set_target_at(target, Instant::now());
    }

    /// Jump to zero without animating
    pub fn reset(&mut self) {
        self.from = 0.0;
        self.target = 0.0;
    }

    /// Displayed percentage at `now`
    pub fn displayed_at(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.started);
        if elapsed >= Self::TRANSITION {
            return self.target;
        }
        let progress = elapsed.as_secs_f32() / Self::TRANSITION.as_secs_f32();
        // cubic ease-out for smooth deceleration
        let eased = simple_easing::cubic_out(progress);
        self.from + (self.target - self.from) * eased
    }

    /// Displayed ratio in 0.0..=1.0 for gauges
    pub fn ratio(&self) -> f64 {
        f64::from(self.displayed_at(Instant::now()) / 100.0).clamp(0.0, 1.0)
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}
