//! Lumen math - value types shared by every Lumen crate.
//!
//! Vector arithmetic comes from `glam`; this crate adds the ray tracing
//! specific pieces on top: [`Interval`], [`Aabb`], [`Axis`] and [`Ray`].

// Re-export glam for convenience
pub use glam::*;

mod aabb;
mod error;
mod interval;
mod ray;

pub use aabb::{Aabb, Axis, PAD_DELTA};
pub use error::MathError;
pub use interval::Interval;
pub use ray::Ray;

/// Linear RGB color, components nominally in `[0, 1]`.
pub type Color = Vec3;

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with normal `n`.
///
/// `etai_over_etat` is the ratio of refractive indices across the surface.
#[inline]
pub fn refract(uv: Vec3, n: Vec3, etai_over_etat: f32) -> Vec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// True if every component is within `1e-8` of zero.
#[inline]
pub fn near_zero(v: Vec3) -> bool {
    v.abs().max_element() < 1e-8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reflect() {
        let v = Vec3::new(1.0, -1.0, 0.0);
        assert_eq!(reflect(v, Vec3::Y), Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_refract_straight_through() {
        let out = refract(-Vec3::Y, Vec3::Y, 1.0 / 1.5);
        assert!((out - -Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_refract_bends_towards_normal() {
        let incoming = Vec3::new(1.0, -1.0, 0.0).normalize();
        let out = refract(incoming, Vec3::Y, 1.0 / 1.5);

        assert!((out.length() - 1.0).abs() < 1e-5);
        assert!(out.x > 0.0 && out.x < incoming.x);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(Vec3::splat(1e-9)));
        assert!(!near_zero(Vec3::new(0.0, 1e-3, 0.0)));
    }
}
