// animation/transition.rs - Smoothed camera transitions with latest-wins retargeting

use std::time::Duration;
use super::{CameraTransform, Easing, Tween};

/// Driver state as seen by the idle behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    /// Live transform rests on the last resolved target
    Idle,
    /// A tween is moving the live transform toward a target
    Transitioning,
}

/// Moves the live camera toward the most recently requested target.
///
/// Only one tween exists at a time. A new request replaces it and starts
/// from wherever the camera currently is, so an abandoned target is never
/// visited.
pub struct TransitionDriver {
    live: CameraTransform,
    tween: Option<Tween<CameraTransform>>,
    smoothing: Duration,
    easing: Easing,
    epsilon: f32,
}

impl TransitionDriver {
    pub fn new(initial: CameraTransform, smoothing: Duration) -> Self {
        Self {
            live: initial,
            tween: None,
            smoothing,
            easing: Easing::CubicOut,
            epsilon: 1e-3,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f32) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Request a move to `target`.
    ///
    /// Returns true when a new tween was started.
    pub fn retarget(&mut self, target: CameraTransform) -> bool {
        if self.live.max_distance(target) <= self.epsilon {
            if self.tween.take().is_some() {
                log::debug!("transition cancelled: camera already at requested target");
            }
            return false;
        }

        if let Some(previous) = self.tween.take() {
            log::debug!(
                "transition superseded at {:.0}% of {:?}",
                previous.time_fraction() * 100.0,
                previous.duration()
            );
        }

        self.tween = Some(Tween::new(self.live, target, self.smoothing).with_easing(self.easing));
        log::debug!(
            "transition started: {:?} -> {:?} over {:?}",
            self.live.position,
            target.position,
            self.smoothing
        );
        true
    }

    /// Advance the in-flight tween, if any
    pub fn update(&mut self, dt: Duration) {
        let Some(tween) = self.tween.as_mut() else {
            return;
        };

        let active = tween.update(dt);
        self.live = *tween.current();

        if !active {
            self.tween = None;
            log::debug!("transition settled at {:?}", self.live.position);
        }
    }

    /// Write the live transform directly. Ignored while a tween owns it.
    pub fn snap_to(&mut self, transform: CameraTransform) -> bool {
        if self.tween.is_some() {
            return false;
        }
        self.live = transform;
        true
    }

    /// Drop the in-flight tween, leaving the camera where it is
    pub fn cancel(&mut self) {
        if let Some(mut tween) = self.tween.take() {
            tween.stop();
        }
    }

    pub fn state(&self) -> DriverState {
        if self.tween.is_some() {
            DriverState::Transitioning
        } else {
            DriverState::Idle
        }
    }

    pub fn is_transitioning(&self) -> bool {
        self.state() == DriverState::Transitioning
    }

    pub fn live(&self) -> CameraTransform {
        self.live
    }

    /// Target of the in-flight tween
    pub fn destination(&self) -> Option<CameraTransform> {
        self.tween.as_ref().map(|t| *t.end())
    }

    /// Linear time fraction of the in-flight tween
    pub fn progress(&self) -> Option<f32> {
        self.tween.as_ref().map(|t| t.time_fraction())
    }
}
