// animation/tween.rs - Sampled tweens and cancellable countdowns

use std::time::Duration;
use super::{lerp, CameraTransform, PlaybackState, Vec3};

// ============================================================================
// EASING FUNCTIONS
// ============================================================================

/// Easing curves available to navigation tweens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    Linear,
    QuadOut,
    #[default]
    CubicOut,
    CubicInOut,
    QuartOut,
    SineOut,
    ExpoOut,
}

impl Easing {
    /// Apply easing function to normalized time value
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::QuadOut => t * (2.0 - t),
            Easing::CubicOut => {
                let t = t - 1.0;
                t * t * t + 1.0
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let t = 2.0 * t - 2.0;
                    1.0 + t * t * t / 2.0
                }
            }
            Easing::QuartOut => {
                let t = t - 1.0;
                1.0 - t * t * t * t
            }
            Easing::SineOut => (t * std::f32::consts::FRAC_PI_2).sin(),
            Easing::ExpoOut => {
                if t == 1.0 { 1.0 } else { 1.0 - 2.0_f32.powf(-10.0 * t) }
            }
        }
    }

    /// True for curves that decelerate into the end value
    pub fn is_ease_out(self) -> bool {
        !matches!(self, Easing::Linear | Easing::CubicInOut)
    }
}

// ============================================================================
// INTERPOLATABLE TRAIT
// ============================================================================

/// Trait for types that can be interpolated
pub trait Interpolate: Clone {
    fn interpolate(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        lerp(*self, *other, t)
    }
}

impl Interpolate for Vec3 {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

impl Interpolate for CameraTransform {
    #[inline]
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        self.lerp(*other, t)
    }
}

// ============================================================================
// TWEEN IMPLEMENTATION
// ============================================================================

/// Time-driven interpolation sampled once per tick.
///
/// There are no callbacks: the owner calls [`Tween::update`] with the frame
/// delta and reads [`Tween::current`] plus [`Tween::state`]. Replacing the
/// tween is how an in-flight animation is cancelled.
#[derive(Debug, Clone)]
pub struct Tween<T: Interpolate> {
    start: T,
    end: T,
    current: T,
    duration: Duration,
    elapsed: Duration,
    easing: Easing,
    state: PlaybackState,
}

impl<T: Interpolate> Tween<T> {
    /// Create new tween
    pub fn new(start: T, end: T, duration: Duration) -> Self {
        Self {
            start: start.clone(),
            end,
            current: start,
            duration,
            elapsed: Duration::ZERO,
            easing: Easing::Linear,
            state: PlaybackState::Playing,
        }
    }

    /// Set easing function
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Get current interpolated value
    pub fn current(&self) -> &T {
        &self.current
    }

    pub fn end(&self) -> &T {
        &self.end
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Linear time fraction in [0, 1]
    pub fn time_fraction(&self) -> f32 {
        if self.duration.is_zero() || self.elapsed >= self.duration {
            1.0
        } else {
            (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.state == PlaybackState::Finished
    }

    /// Stop without touching the current value
    pub fn stop(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Stopped;
        }
    }

    /// Update tween and return true if still active
    pub fn update(&mut self, dt: Duration) -> bool {
        if self.state != PlaybackState::Playing {
            return false;
        }

        self.elapsed = self.elapsed.saturating_add(dt);

        let t = self.easing.apply(self.time_fraction());
        self.current = self.start.interpolate(&self.end, t);

        if self.elapsed >= self.duration {
            // Land exactly on the end value regardless of float drift
            self.current = self.end.clone();
            self.state = PlaybackState::Finished;
            return false;
        }

        true
    }
}

// ============================================================================
// COUNTDOWN
// ============================================================================

/// One-shot timer advanced by frame deltas.
///
/// Fires exactly once, on the update that reaches the deadline. A cancelled
/// countdown never fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: Duration,
    pending: bool,
}

impl Countdown {
    pub fn new(duration: Duration) -> Self {
        Self { remaining: duration, pending: true }
    }

    /// A countdown that will never fire
    pub fn idle() -> Self {
        Self { remaining: Duration::ZERO, pending: false }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn cancel(&mut self) {
        self.pending = false;
        self.remaining = Duration::ZERO;
    }

    /// Advance the timer; returns true on the update where it fires
    pub fn update(&mut self, dt: Duration) -> bool {
        if !self.pending {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(dt);
        if self.remaining.is_zero() {
            self.pending = false;
            return true;
        }
        false
    }
}

impl Default for Countdown {
    fn default() -> Self {
        Self::idle()
    }
}

// ============================================================================
// TESTS
// ============================================================================
