//! Planar primitives: quads, triangles and ellipses.
//!
//! All three share one intersection routine. The ray is intersected with the
//! plane spanned by the edge vectors `u` and `v` from the corner `q`, the hit
//! point is expressed in that frame as `(alpha, beta)`, and a [`Boundary`]
//! decides whether those coordinates lie inside the shape.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// Rays closer to parallel than this never hit the plane.
const PARALLEL_EPSILON: f32 = 1e-8;

/// Interior test applied in the plane's `(alpha, beta)` coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The parallelogram `q + alpha*u + beta*v` for `alpha, beta` in `[0, 1]`.
    Parallelogram,
    /// The triangle with corners `q`, `q + u`, `q + v`.
    Triangle,
    /// The ellipse centered at `q` with semi-axes `u` and `v`.
    Ellipse,
}

impl Boundary {
    /// Surface coordinates for a point inside the boundary, `None` outside.
    fn interior(self, alpha: f32, beta: f32) -> Option<(f32, f32)> {
        let unit = Interval::new(0.0, 1.0);
        match self {
            Boundary::Parallelogram => {
                (unit.contains(alpha) && unit.contains(beta)).then_some((alpha, beta))
            }
            Boundary::Triangle => {
                (alpha > 0.0 && beta > 0.0 && alpha + beta < 1.0).then_some((alpha, beta))
            }
            Boundary::Ellipse => (alpha.hypot(beta) < 1.0)
                .then_some((alpha / 2.0 + 0.5, beta / 2.0 + 0.5)),
        }
    }
}

/// A flat primitive lying in the plane through `q` spanned by `u` and `v`.
pub struct Planar {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// `n / (n . n)` with `n = u x v`, used to project into `(alpha, beta)`
    w: Vec3,
    normal: Vec3,
    /// Plane constant: `normal . x = d` for points on the plane
    d: f32,
    boundary: Boundary,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Planar {
    /// General constructor; see [`Boundary`] for how `q`, `u`, `v` are read.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, boundary: Boundary, material: Arc<dyn Material>) -> Self {
        let n = u.cross(v);
        let normal = n.normalize();
        let bbox = match boundary {
            Boundary::Parallelogram | Boundary::Triangle => Aabb::surrounding(
                &Aabb::from_points(q, q + u + v),
                &Aabb::from_points(q + u, q + v),
            ),
            Boundary::Ellipse => Aabb::surrounding(
                &Aabb::from_points(q - u - v, q + u + v),
                &Aabb::from_points(q - u + v, q + u - v),
            ),
        };

        Self {
            q,
            u,
            v,
            w: n / n.dot(n),
            normal,
            d: normal.dot(q),
            boundary,
            material,
            bbox,
        }
    }

    /// Parallelogram with corner `q` and edges `u`, `v`.
    pub fn quad(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::new(q, u, v, Boundary::Parallelogram, material)
    }

    /// Triangle with corners `q`, `q + u` and `q + v`.
    pub fn triangle(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::new(q, u, v, Boundary::Triangle, material)
    }

    /// Ellipse (a disk when `u` and `v` are orthogonal and equally long).
    pub fn ellipse(center: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        Self::new(center, u, v, Boundary::Ellipse, material)
    }

    /// Plane coordinates `(alpha, beta)` of a point on the plane.
    pub fn plane_coordinates(&self, p: Vec3) -> (f32, f32) {
        let planar_hit = p - self.q;
        let alpha = self.w.dot(planar_hit.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hit));
        (alpha, beta)
    }
}

impl Hittable for Planar {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction);

        if denom.abs() < PARALLEL_EPSILON {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin)) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let (alpha, beta) = self.plane_coordinates(intersection);
        let Some((u, v)) = self.boundary.interior(alpha, beta) else {
            return false;
        };

        rec.t = t;
        rec.p = intersection;
        rec.u = u;
        rec.v = v;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use lumen_math::{Color, PAD_DELTA};

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::splat(0.5)))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    /// Ray from `z = 5` straight down -Z through `target`.
    fn ray_through(target: Vec3) -> Ray {
        Ray::new(Vec3::new(target.x, target.y, 5.0), -Vec3::Z)
    }

    fn unit_quad() -> (Planar, Vec3, Vec3, Vec3) {
        let q = Vec3::new(-1.0, -1.0, 0.0);
        let u = Vec3::new(2.0, 0.0, 0.0);
        let v = Vec3::new(0.0, 2.0, 0.0);
        (Planar::quad(q, u, v, grey()), q, u, v)
    }

    #[test]
    fn test_quad_center_hit() {
        let (quad, q, u, v) = unit_quad();
        let center = q + 0.5 * u + 0.5 * v;

        let mut rec = HitRecord::default();
        assert!(quad.hit(&ray_through(center), forward(), &mut rec));
        assert!((rec.u - 0.5).abs() < 1e-6);
        assert!((rec.v - 0.5).abs() < 1e-6);
        assert!((rec.t - 5.0).abs() < 1e-6);
        assert_eq!(rec.normal, Vec3::Z);
        assert!(rec.front_face);
    }

    #[test]
    fn test_quad_outside_misses() {
        let (quad, q, u, _) = unit_quad();

        let mut rec = HitRecord::default();
        assert!(!quad.hit(&ray_through(q - u), forward(), &mut rec));
    }

    #[test]
    fn test_quad_back_face() {
        let (quad, _, _, _) = unit_quad();
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z);

        let mut rec = HitRecord::default();
        assert!(quad.hit(&ray, forward(), &mut rec));
        assert!(!rec.front_face);
        assert_eq!(rec.normal, -Vec3::Z);
    }

    #[test]
    fn test_quad_parallel_ray_misses() {
        let (quad, _, _, _) = unit_quad();
        let ray = Ray::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::X);

        let mut rec = HitRecord::default();
        assert!(!quad.hit(&ray, Interval::UNIVERSE, &mut rec));
    }

    #[test]
    fn test_quad_outside_interval_misses() {
        let (quad, _, _, _) = unit_quad();

        let mut rec = HitRecord::default();
        assert!(!quad.hit(&ray_through(Vec3::ZERO), Interval::new(0.0, 4.0), &mut rec));
    }

    #[test]
    fn test_skewed_quad_coordinates() {
        let q = Vec3::new(1.0, 2.0, 3.0);
        let u = Vec3::new(1.0, 1.0, 0.0);
        let v = Vec3::new(-1.0, 2.0, 0.0);
        let quad = Planar::quad(q, u, v, grey());

        let (alpha, beta) = quad.plane_coordinates(q + 0.25 * u + 0.75 * v);
        assert!((alpha - 0.25).abs() < 1e-5);
        assert!((beta - 0.75).abs() < 1e-5);
    }

    #[test]
    fn test_quad_bbox_is_padded_and_covers_corners() {
        let q = Vec3::ZERO;
        let u = Vec3::new(1.0, 0.0, 0.0);
        let v = Vec3::new(-1.0, 1.0, 0.0);
        let quad = Planar::quad(q, u, v, grey());
        let bbox = quad.bounding_box();

        assert!(bbox.z.size() >= PAD_DELTA);
        for corner in [q, q + u, q + v, q + u + v] {
            assert!(bbox.x.contains(corner.x));
            assert!(bbox.y.contains(corner.y));
            assert!(bbox.z.contains(corner.z));
        }
    }

    #[test]
    fn test_triangle_interior() {
        let tri = Planar::triangle(Vec3::ZERO, Vec3::X, Vec3::Y, grey());

        let mut rec = HitRecord::default();
        assert!(tri.hit(&ray_through(Vec3::new(0.2, 0.2, 0.0)), forward(), &mut rec));
        assert!(!tri.hit(&ray_through(Vec3::new(0.6, 0.6, 0.0)), forward(), &mut rec));
    }

    #[test]
    fn test_ellipse_interior() {
        let disk = Planar::ellipse(Vec3::ZERO, Vec3::X, Vec3::Y, grey());

        let mut rec = HitRecord::default();
        assert!(disk.hit(&ray_through(Vec3::ZERO), forward(), &mut rec));
        assert!((rec.u - 0.5).abs() < 1e-6);
        assert!((rec.v - 0.5).abs() < 1e-6);
        assert!(disk.hit(&ray_through(Vec3::new(-0.6, 0.6, 0.0)), forward(), &mut rec));
        assert!(!disk.hit(&ray_through(Vec3::new(0.8, 0.8, 0.0)), forward(), &mut rec));
        assert!(disk.bounding_box().x.contains(-1.0));
    }
}
