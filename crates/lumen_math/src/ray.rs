use crate::Vec3;

/// A ray in 3D space with origin, direction, and time.
///
/// Rays represent a half-line starting at `origin` and traveling in
/// `direction`. The `time` field selects the instant at which moving
/// primitives are sampled (motion blur) and defaults to `0.0`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Not necessarily normalized.
    pub direction: Vec3,
    pub time: f32,
}

impl Ray {
    /// Create a new ray at time `0.0`.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction,
            time: 0.0,
        }
    }

    /// Returns the same ray sampled at `time`.
    #[inline]
    pub fn with_time(self, time: f32) -> Self {
        Self { time, ..self }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

impl Default for Ray {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}
