//! Viewport offset animation.
//!
//! Tracks one scalar offset (rows or columns) and eases it towards the
//! target the core last asked for. `update` is called once per frame with
//! the current time; passing the time in keeps the math testable.

use std::time::{Duration, Instant};

use pageflow_core::ScrollBehavior;

use super::easing::ease_out;

const SMOOTH_DURATION: Duration = Duration::from_millis(300);

#[derive(Debug, Clone)]
struct ActiveAnimation {
    start: Instant,
    from: u16,
    to: u16,
    duration: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct ViewportAnimator {
    animation: Option<ActiveAnimation>,
    current: u16,
}

impl ViewportAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> u16 {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Move towards `to`, smoothly or instantly per the behavior. A new
    /// target replaces any animation in flight, starting from the current
    /// interpolated position.
    pub fn animate_to(&mut self, to: u16, behavior: ScrollBehavior, now: Instant) {
        match behavior {
            ScrollBehavior::Instant => {
                self.animation = None;
                self.current = to;
            }
            ScrollBehavior::Smooth => {
                if to == self.current {
                    self.animation = None;
                    return;
                }
                self.animation = Some(ActiveAnimation {
                    start: now,
                    from: self.current,
                    to,
                    duration: SMOOTH_DURATION,
                });
            }
        }
    }

    /// Advance the animation and return the current offset.
    pub fn update(&mut self, now: Instant) -> u16 {
        if let Some(anim) = &self.animation {
            if now.duration_since(anim.start) >= anim.duration {
                self.current = anim.to;
                self.animation = None;
            } else {
                let t = progress(anim.start, anim.duration, now);
                self.current = lerp_u16(anim.from, anim.to, ease_out(t));
            }
        }
        self.current
    }
}

#[inline]
fn progress(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.duration_since(start);
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[inline]
fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u16
}
