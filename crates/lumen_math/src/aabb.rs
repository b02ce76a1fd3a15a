use crate::{Interval, MathError, Ray, Vec3};

/// Minimum thickness of every axis of a padded box.
pub const PAD_DELTA: f32 = 0.0001;

/// One of the three coordinate axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

impl TryFrom<usize> for Axis {
    type Error = MathError;

    fn try_from(n: usize) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Axis::X),
            1 => Ok(Axis::Y),
            2 => Ok(Axis::Z),
            _ => Err(MathError::InvalidAxis(n)),
        }
    }
}

/// Axis-Aligned Bounding Box for spatial acceleration structures (BVH).
///
/// An AABB is defined by three intervals (one per axis) that bound a 3D volume.
/// Boxes built with [`Aabb::new`] or [`Aabb::from_points`] are padded so no
/// axis is thinner than [`PAD_DELTA`]; flat geometry such as quads would
/// otherwise produce zero-volume slabs.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// The empty box; the identity of [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Create a new AABB from three intervals.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }.pad()
    }

    /// Create an AABB from two opposite corner points, in any order.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        Self::new(
            Interval::new(a.x.min(b.x), a.x.max(b.x)),
            Interval::new(a.y.min(b.y), a.y.max(b.y)),
            Interval::new(a.z.min(b.z), a.z.max(b.z)),
        )
    }

    /// Create the union box of two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Get the interval for a specific axis.
    #[inline]
    pub fn axis_interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    /// True if any axis is empty, i.e. the box holds no point at all.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty() || self.y.is_empty() || self.z.is_empty()
    }

    /// Test if a ray intersects this AABB within the given interval.
    ///
    /// Uses the slab method. A zero direction component divides to ±inf,
    /// which the comparisons below handle without special casing.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin;
        let dir = r.direction;

        slab(self.x, origin.x, dir.x, &mut ray_t)
            && slab(self.y, origin.y, dir.y, &mut ray_t)
            && slab(self.z, origin.z, dir.z, &mut ray_t)
    }

    /// Returns a copy with every axis at least [`PAD_DELTA`] thick.
    pub fn pad(&self) -> Aabb {
        let pad_axis = |i: Interval| if i.size() >= PAD_DELTA { i } else { i.expand(PAD_DELTA) };
        Aabb {
            x: pad_axis(self.x),
            y: pad_axis(self.y),
            z: pad_axis(self.z),
        }
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Clips `ray_t` against one slab. Returns false once the window is empty.
#[inline(always)]
fn slab(bounds: Interval, origin: f32, dir: f32, ray_t: &mut Interval) -> bool {
    let adinv = 1.0 / dir;
    let mut t0 = (bounds.min - origin) * adinv;
    let mut t1 = (bounds.max - origin) * adinv;
    if adinv < 0.0 {
        std::mem::swap(&mut t0, &mut t1);
    }
    ray_t.min = t0.max(ray_t.min);
    ray_t.max = t1.min(ray_t.max);
    ray_t.max > ray_t.min
}
