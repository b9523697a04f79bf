// animation/mod.rs - Frame-driven animation primitives for the navigation controller

pub mod tween;
pub mod transition;
pub mod idle_rotate;
pub mod parallax;
pub mod path_reveal;

pub use tween::*;
pub use transition::*;
pub use idle_rotate::*;
pub use parallax::*;
pub use path_reveal::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// PLAYBACK STATE
// ============================================================================

/// Tween playback control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Playing,
    Stopped,
    Finished,
}

// ============================================================================
// CORE MATH TYPES
// ============================================================================

/// 3D vector, serialized as `[x, y, z]`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 3]", into = "[f32; 3]")]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    #[inline]
    pub fn lerp(self, other: Vec3, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        Vec3::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
            self.z + (other.z - self.z) * t,
        )
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        (other - self).length()
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate around the vertical axis passing through `pivot`.
    ///
    /// Positive angles turn counter-clockwise when seen from above (+Y).
    #[inline]
    pub fn rotate_y_around(self, pivot: Vec3, angle: f32) -> Vec3 {
        let (sin, cos) = angle.sin_cos();
        let dx = self.x - pivot.x;
        let dz = self.z - pivot.z;
        Vec3::new(
            pivot.x + dx * cos + dz * sin,
            self.y,
            pivot.z - dx * sin + dz * cos,
        )
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Vec3;
    #[inline]
    fn mul(self, scalar: f32) -> Vec3 {
        Vec3::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl From<[f32; 3]> for Vec3 {
    #[inline]
    fn from(arr: [f32; 3]) -> Self {
        Vec3::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vec3> for [f32; 3] {
    #[inline]
    fn from(v: Vec3) -> [f32; 3] {
        [v.x, v.y, v.z]
    }
}

// ============================================================================
// CAMERA TRANSFORM
// ============================================================================

/// Where the camera sits and what it looks at.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraTransform {
    pub position: Vec3,
    pub target: Vec3,
}

impl CameraTransform {
    #[inline]
    pub const fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    #[inline]
    pub fn lerp(self, other: CameraTransform, t: f32) -> CameraTransform {
        CameraTransform::new(
            self.position.lerp(other.position, t),
            self.target.lerp(other.target, t),
        )
    }

    /// Largest distance between matching components of the two transforms
    #[inline]
    pub fn max_distance(self, other: CameraTransform) -> f32 {
        self.position
            .distance(other.position)
            .max(self.target.distance(other.target))
    }

    /// Orbit the position around the look-at point by an azimuth angle
    #[inline]
    pub fn orbit(self, azimuth: f32) -> CameraTransform {
        CameraTransform::new(self.position.rotate_y_around(self.target, azimuth), self.target)
    }

    /// Shift only the look-at point
    #[inline]
    pub fn with_target_offset(self, offset: Vec3) -> CameraTransform {
        CameraTransform::new(self.position, self.target + offset)
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.position.is_finite() && self.target.is_finite()
    }
}

// ============================================================================
// UTILITY FUNCTIONS
// ============================================================================

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}
