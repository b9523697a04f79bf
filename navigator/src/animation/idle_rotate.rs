// animation/idle_rotate.rs - Background orbit shown while nothing is selected

use std::f32::consts::TAU;
use std::time::Duration;
use super::CameraTransform;

/// Continuous azimuth rotation with drag suspension.
///
/// The accumulated angle survives suspension, so the orbit always picks up
/// where it stopped.
#[derive(Debug, Clone)]
pub struct IdleRotate {
    azimuth: f32,
    speed: f32,
    dragging: bool,
}

impl IdleRotate {
    /// `speed` is in radians per second; the azimuth only ever increases,
    /// so negative or NaN speeds become zero.
    pub fn new(speed: f32) -> Self {
        Self { azimuth: 0.0, speed: speed.max(0.0), dragging: false }
    }

    pub fn azimuth(&self) -> f32 {
        self.azimuth
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn begin_drag(&mut self) {
        if !self.dragging {
            log::debug!("idle rotation suspended at {:.3} rad", self.azimuth);
        }
        self.dragging = true;
    }

    pub fn end_drag(&mut self) {
        if self.dragging {
            log::debug!("idle rotation resumes from {:.3} rad", self.azimuth);
        }
        self.dragging = false;
    }

    /// Whether the orbit may own the camera this tick
    pub fn can_run(&self, selection_empty: bool, driver_idle: bool) -> bool {
        selection_empty && driver_idle && !self.dragging
    }

    /// Accumulate rotation for one tick. No-op while a drag is active.
    pub fn advance(&mut self, dt: Duration) {
        if self.dragging {
            return;
        }
        self.azimuth = (self.azimuth + self.speed * dt.as_secs_f32()).rem_euclid(TAU);
    }

    /// Home view turned by the current azimuth
    pub fn apply(&self, home: CameraTransform) -> CameraTransform {
        home.orbit(self.azimuth)
    }
}

impl Default for IdleRotate {
    fn default() -> Self {
        Self::new(0.1)
    }
}
