//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over the scene's primitives. Nodes live in one arena and
//! refer to their children by index, either another node or a primitive.
//! Each split sorts its sub-range along a randomly chosen axis and cuts it
//! at the median.

use std::cmp::Ordering;

use crate::{
    error::{RenderError, RenderResult},
    hittable::{HitRecord, Hittable, HittableList},
};
use lumen_math::{Aabb, Axis, Interval, Ray};
use rand::{Rng, RngCore};

/// Either side of a BVH node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Child {
    /// Index into `Bvh::nodes`
    Node(usize),
    /// Index into `Bvh::primitives`
    Primitive(usize),
}

/// Internal node. A node over a single primitive has `left == right`.
#[derive(Debug, Clone, Copy)]
struct Node {
    left: Child,
    right: Child,
    bbox: Aabb,
}

/// BVH over an owned set of primitives.
pub struct Bvh {
    primitives: Vec<Box<dyn Hittable>>,
    nodes: Vec<Node>,
    root: usize,
}

impl Bvh {
    /// Build a BVH over `primitives`, drawing split axes from `rng`.
    ///
    /// Fails with [`RenderError::EmptyScene`] when there is nothing to
    /// build over and [`RenderError::Unbounded`] when a primitive reports an
    /// empty bounding box.
    pub fn new(mut primitives: Vec<Box<dyn Hittable>>, rng: &mut dyn RngCore) -> RenderResult<Self> {
        if primitives.is_empty() {
            return Err(RenderError::EmptyScene);
        }

        if let Some(index) = primitives.iter().position(|p| p.bounding_box().is_empty()) {
            return Err(RenderError::Unbounded { index });
        }

        let count = primitives.len();
        let mut nodes = Vec::with_capacity(count);
        let root = build(&mut primitives, 0, count, &mut nodes, rng);

        let bvh = Self {
            primitives,
            nodes,
            root,
        };

        log::debug!(
            "Built BVH over {} primitives: {} nodes, depth {}",
            count,
            bvh.node_count(),
            bvh.depth()
        );

        Ok(bvh)
    }

    /// Build a BVH over the contents of a list.
    pub fn from_list(list: HittableList, rng: &mut dyn RngCore) -> RenderResult<Self> {
        Self::new(list.into_objects(), rng)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.node_depth(self.root)
    }

    fn node_depth(&self, index: usize) -> usize {
        let node = &self.nodes[index];
        let child_depth = |child: Child| match child {
            Child::Node(i) => self.node_depth(i),
            Child::Primitive(_) => 0,
        };
        1 + child_depth(node.left).max(child_depth(node.right))
    }

    fn hit_child<'a>(
        &'a self,
        child: Child,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        match child {
            Child::Node(i) => self.hit_node(i, ray, ray_t, rec),
            Child::Primitive(i) => self.primitives[i].hit(ray, ray_t, rec),
        }
    }

    fn hit_node<'a>(
        &'a self,
        index: usize,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord<'a>,
    ) -> bool {
        let node = &self.nodes[index];
        if !node.bbox.hit(ray, ray_t) {
            return false;
        }

        let hit_left = self.hit_child(node.left, ray, ray_t, rec);
        if node.right == node.left {
            return hit_left;
        }

        // Only check right up to closest hit
        let right_max = if hit_left { rec.t } else { ray_t.max };
        let hit_right = self.hit_child(node.right, ray, Interval::new(ray_t.min, right_max), rec);

        hit_left || hit_right
    }
}

/// Lower edge of a primitive's box along `axis`.
#[inline]
fn box_min(primitive: &dyn Hittable, axis: Axis) -> f32 {
    primitive.bounding_box().axis_interval(axis).min
}

fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: Axis) -> Ordering {
    box_min(a, axis).total_cmp(&box_min(b, axis))
}

/// Build the subtree over `primitives[start..end]` and return its node index.
///
/// Children are pushed before their parent, so the root ends up last.
fn build(
    primitives: &mut [Box<dyn Hittable>],
    start: usize,
    end: usize,
    nodes: &mut Vec<Node>,
    rng: &mut dyn RngCore,
) -> usize {
    let axis = Axis::ALL[rng.gen_range(0..Axis::ALL.len())];
    let span = end - start;

    let (left, right) = match span {
        1 => (Child::Primitive(start), Child::Primitive(start)),
        2 => {
            let a = primitives[start].as_ref();
            let b = primitives[start + 1].as_ref();
            if box_compare(a, b, axis) == Ordering::Less {
                (Child::Primitive(start), Child::Primitive(start + 1))
            } else {
                (Child::Primitive(start + 1), Child::Primitive(start))
            }
        }
        _ => {
            primitives[start..end]
                .sort_unstable_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

            let mid = start + span / 2;
            let left = build(primitives, start, mid, nodes, rng);
            let right = build(primitives, mid, end, nodes, rng);
            (Child::Node(left), Child::Node(right))
        }
    };

    let bbox_of = |child: Child| match child {
        Child::Node(i) => nodes[i].bbox,
        Child::Primitive(i) => primitives[i].bounding_box(),
    };
    let bbox = Aabb::surrounding(&bbox_of(left), &bbox_of(right));

    nodes.push(Node { left, right, bbox });
    nodes.len() - 1
}

impl Hittable for Bvh {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        self.hit_node(self.root, ray, ray_t, rec)
    }

    fn bounding_box(&self) -> Aabb {
        self.nodes[self.root].bbox
    }
}
