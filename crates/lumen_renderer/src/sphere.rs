//! Sphere primitive, optionally moving for motion blur.

use std::f32::consts::PI;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Aabb, Interval, Ray, Vec3};

/// A sphere, stationary or moving linearly between two centers while the
/// ray time goes from 0 to 1.
pub struct Sphere {
    /// Center at time 0
    center: Vec3,
    /// Displacement from the time 0 to the time 1 center
    motion: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Sphere {
    /// Create a stationary sphere. Negative radii are clamped to zero.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);

        Self {
            center,
            motion: Vec3::ZERO,
            radius,
            material,
            bbox: Aabb::from_points(center - rvec, center + rvec),
        }
    }

    /// Create a sphere moving from `center1` (time 0) to `center2` (time 1).
    pub fn moving(center1: Vec3, center2: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        let radius = radius.max(0.0);
        let rvec = Vec3::splat(radius);
        let box1 = Aabb::from_points(center1 - rvec, center1 + rvec);
        let box2 = Aabb::from_points(center2 - rvec, center2 + rvec);

        Self {
            center: center1,
            motion: center2 - center1,
            radius,
            material,
            bbox: Aabb::surrounding(&box1, &box2),
        }
    }

    /// Center of the sphere at `time`.
    #[inline]
    pub fn center_at(&self, time: f32) -> Vec3 {
        self.center + time * self.motion
    }

    /// UV coordinates of a point on the unit sphere centered at the origin.
    ///
    /// `u` is the angle around Y from X=-1, `v` the angle from Y=-1 to Y=+1,
    /// both mapped to `[0, 1]`.
    fn sphere_uv(p: Vec3) -> (f32, f32) {
        let theta = (-p.y).acos();
        let phi = (-p.z).atan2(p.x) + PI;

        (phi / (2.0 * PI), theta / PI)
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let center = self.center_at(ray.time);
        let oc = center - ray.origin;
        let a = ray.direction.length_squared();
        // h is -half_b of the usual quadratic
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return false;
            }
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - center) / self.radius;
        rec.set_face_normal(ray, outward_normal);
        (rec.u, rec.v) = Self::sphere_uv(outward_normal);
        rec.material = self.material.as_ref();

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }
}
