// animation/parallax.rs - Pointer-driven look-at offset

use super::Vec3;

/// Exponentially smoothed pointer offset.
///
/// Pointer coordinates are normalized to [-1, 1] on both axes. The offset
/// is added to the rendered look-at point and is never part of a tween.
#[derive(Debug, Clone)]
pub struct Parallax {
    raw: (f32, f32),
    smoothed: (f32, f32),
    smoothing: f32,
    strength: (f32, f32),
}

impl Parallax {
    pub fn new(smoothing: f32, strength: (f32, f32)) -> Self {
        Self {
            raw: (0.0, 0.0),
            smoothed: (0.0, 0.0),
            smoothing: smoothing.clamp(0.0, 1.0),
            strength,
        }
    }

    /// Record the latest pointer sample
    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.raw = (x.clamp(-1.0, 1.0), y.clamp(-1.0, 1.0));
    }

    /// One smoothing step per rendered frame
    pub fn update(&mut self) {
        self.smoothed.0 += (self.raw.0 - self.smoothed.0) * self.smoothing;
        self.smoothed.1 += (self.raw.1 - self.smoothed.1) * self.smoothing;
    }

    pub fn smoothed(&self) -> (f32, f32) {
        self.smoothed
    }

    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.smoothed.0 * self.strength.0,
            self.smoothed.1 * self.strength.1,
            0.0,
        )
    }
}

impl Default for Parallax {
    fn default() -> Self {
        Self::new(0.05, (2.0, 1.0))
    }
}
