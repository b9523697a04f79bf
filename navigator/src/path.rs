// path.rs - Route polylines between an origin and a point of interest

use crate::animation::Vec3;

/// Polyline with arc-length lookup.
///
/// `point_at(f)` walks `f` of the total length, so a reveal driven by a
/// 0..1 progress value advances at constant speed along the route.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePath {
    points: Vec<Vec3>,
    cumulative: Vec<f32>,
}

impl RoutePath {
    pub fn new(points: Vec<Vec3>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(*p);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fewer than two points means there is nothing to draw
    pub fn is_revealable(&self) -> bool {
        self.points.len() >= 2
    }

    pub fn length(&self) -> f32 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn start(&self) -> Option<Vec3> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Point at `fraction` of the arc length (clamped to [0, 1])
    pub fn point_at(&self, fraction: f32) -> Option<Vec3> {
        let first = *self.points.first()?;
        let total = self.length();
        if self.points.len() == 1 || total <= f32::EPSILON {
            return Some(first);
        }

        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        if fraction >= 1.0 {
            return self.end();
        }

        let distance = fraction * total;
        // First vertex strictly beyond `distance`; the segment ends there
        let idx = self
            .cumulative
            .partition_point(|&c| c <= distance)
            .clamp(1, self.points.len() - 1);

        let seg_start = self.cumulative[idx - 1];
        let seg_len = self.cumulative[idx] - seg_start;
        let local = if seg_len > 0.0 { (distance - seg_start) / seg_len } else { 0.0 };
        Some(self.points[idx - 1].lerp(self.points[idx], local))
    }

    /// Catmull-Rom resampling through every control point.
    ///
    /// Each span between consecutive points is divided into `segments`
    /// pieces; end spans reuse their endpoint as the missing neighbour.
    pub fn smoothed(&self, segments: usize) -> RoutePath {
        if self.points.len() < 3 || segments < 2 {
            return self.clone();
        }

        let n = self.points.len();
        let mut out = Vec::with_capacity((n - 1) * segments + 1);
        for i in 0..n - 1 {
            let p0 = self.points[i.saturating_sub(1)];
            let p1 = self.points[i];
            let p2 = self.points[i + 1];
            let p3 = self.points[(i + 2).min(n - 1)];
            for s in 0..segments {
                let t = s as f32 / segments as f32;
                out.push(catmull_rom(p0, p1, p2, p3, t));
            }
        }
        out.push(self.points[n - 1]);
        RoutePath::new(out)
    }
}

#[inline]
fn catmull_rom(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let axis = |a: f32, b: f32, c: f32, d: f32| {
        0.5 * ((2.0 * b)
            + (-a + c) * t
            + (2.0 * a - 5.0 * b + 4.0 * c - d) * t2
            + (-a + 3.0 * b - 3.0 * c + d) * t3)
    };
    Vec3::new(
        axis(p0.x, p1.x, p2.x, p3.x),
        axis(p0.y, p1.y, p2.y, p3.y),
        axis(p0.z, p1.z, p2.z, p3.z),
    )
}

impl From<Vec<Vec3>> for RoutePath {
    fn from(points: Vec<Vec3>) -> Self {
        RoutePath::new(points)
    }
}
