// animation/path_reveal.rs - Route "being drawn" progress and arrival marker

use std::time::Duration;
use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;
use super::{Countdown, Easing, Tween, Vec3};
use crate::path::RoutePath;

/// Uniform block read by the route shader: fragments beyond `progress`
/// along the route are discarded.
#[repr(C, align(16))]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct RevealUniforms {
    pub progress: f32,
    pub marker_visible: u32,
    pub point_count: u32,
    pub _pad: u32,
}

const_assert_eq!(std::mem::size_of::<RevealUniforms>(), 16);

/// Per-frame snapshot of the reveal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathRevealState {
    pub progress: f32,
    pub marker_visible: bool,
    /// Leading point of the drawn portion, when a route is active
    pub head: Option<Vec3>,
}

/// Drives the reveal of at most one route at a time.
///
/// Every restart cancels both the running tween and the pending marker
/// flip before anything new is scheduled.
pub struct PathReveal {
    route: Option<RoutePath>,
    tween: Option<Tween<f32>>,
    marker_timer: Countdown,
    progress: f32,
    marker_visible: bool,
    duration: Duration,
    easing: Easing,
}

impl PathReveal {
    pub fn new(duration: Duration) -> Self {
        Self {
            route: None,
            tween: None,
            marker_timer: Countdown::idle(),
            progress: 0.0,
            marker_visible: false,
            duration,
            easing: Easing::CubicOut,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Reset and, for a drawable route, start revealing it.
    ///
    /// Returns true when a reveal was started.
    pub fn restart(&mut self, route: Option<RoutePath>) -> bool {
        self.cancel();

        match route {
            Some(route) if route.is_revealable() => {
                log::debug!(
                    "reveal started: {} points, {:.1} units over {:?}",
                    route.len(),
                    route.length(),
                    self.duration
                );
                self.tween = Some(Tween::new(0.0, 1.0, self.duration).with_easing(self.easing));
                self.marker_timer = Countdown::new(self.duration);
                self.route = Some(route);
                true
            }
            Some(route) => {
                log::debug!("reveal skipped: route has {} point(s)", route.len());
                false
            }
            None => false,
        }
    }

    /// Stop everything and hide the route
    pub fn cancel(&mut self) {
        self.tween = None;
        self.marker_timer.cancel();
        self.route = None;
        self.progress = 0.0;
        self.marker_visible = false;
    }

    pub fn update(&mut self, dt: Duration) {
        if let Some(tween) = self.tween.as_mut() {
            let active = tween.update(dt);
            // Monotonic guard against easing curves that overshoot
            self.progress = (*tween.current()).clamp(self.progress, 1.0);
            if !active {
                self.tween = None;
            }
        }

        if self.marker_timer.update(dt) {
            self.marker_visible = true;
            log::debug!("route marker shown");
        }
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn marker_visible(&self) -> bool {
        self.marker_visible
    }

    pub fn is_running(&self) -> bool {
        self.tween.is_some()
    }

    pub fn route(&self) -> Option<&RoutePath> {
        self.route.as_ref()
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn state(&self) -> PathRevealState {
        PathRevealState {
            progress: self.progress,
            marker_visible: self.marker_visible,
            head: self.route.as_ref().and_then(|r| r.point_at(self.progress)),
        }
    }

    pub fn uniforms(&self) -> RevealUniforms {
        RevealUniforms {
            progress: self.progress,
            marker_visible: self.marker_visible as u32,
            point_count: self.route.as_ref().map_or(0, |r| r.len() as u32),
            _pad: 0,
        }
    }
}

impl Default for PathReveal {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}
