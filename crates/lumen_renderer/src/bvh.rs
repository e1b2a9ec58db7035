//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! A binary tree over primitive ids, built by median split on the longest
//! centroid axis. Primitives without a finite bounding box (planes) cannot
//! be placed in the tree and are tested linearly beside it.

use crate::accelerator::{hit_primitive, Primitives};
use crate::hittable::{HitRecord, PrimitiveId};
use crate::Ray;
use lumen_math::{Aabb, Interval};

/// Maximum primitives per leaf node before splitting.
const LEAF_MAX_SIZE: usize = 4;

/// BVH node - either a branch with two children or a leaf with primitives.
#[derive(Debug)]
enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Box<BvhNode>,
        right: Box<BvhNode>,
        bbox: Aabb,
    },
    /// Leaf node with a small number of primitives.
    Leaf {
        primitives: Vec<PrimitiveId>,
        bbox: Aabb,
    },
    /// Empty node (no bounded primitives).
    Empty,
}

/// A BVH over the bounded primitives of a scene plus the list of unbounded
/// ones.
#[derive(Debug)]
pub struct Bvh {
    root: BvhNode,
    unbounded: Vec<PrimitiveId>,
    depth: usize,
}

impl Bvh {
    /// Build a BVH over `primitives`.
    pub fn new(primitives: &Primitives) -> Self {
        let (bounded, unbounded): (Vec<_>, Vec<_>) = primitives
            .iter()
            .enumerate()
            .map(|(index, primitive)| (PrimitiveId(index), primitive.bounding_box()))
            .partition(|(_, bbox)| bbox.is_bounded());

        let unbounded = unbounded.into_iter().map(|(id, _)| id).collect();
        let (root, depth) = if bounded.is_empty() {
            (BvhNode::Empty, 0)
        } else {
            BvhNode::build(bounded)
        };

        Self {
            root,
            unbounded,
            depth,
        }
    }

    /// Number of levels in the tree (0 for an empty tree).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Number of primitives tested outside the tree.
    pub fn unbounded_count(&self) -> usize {
        self.unbounded.len()
    }

    /// Nearest hit inside `ray_t`.
    pub fn nearest(
        &self,
        primitives: &Primitives,
        ray: &Ray,
        ray_t: Interval,
    ) -> Option<(PrimitiveId, HitRecord)> {
        let mut rec = HitRecord::default();
        let mut closest = None;
        let mut range = ray_t;

        for &id in &self.unbounded {
            if hit_primitive(primitives, id, ray, range, &mut rec) {
                range = range.clip_max(rec.t);
                closest = Some((id, rec));
            }
        }

        if let Some(found) = self.root.nearest(primitives, ray, range, &mut rec) {
            closest = Some((found, rec));
        }
        closest
    }

    /// Returns true as soon as anything is hit inside `ray_t`.
    pub fn any_hit(&self, primitives: &Primitives, ray: &Ray, ray_t: Interval) -> bool {
        let mut rec = HitRecord::default();

        self.unbounded
            .iter()
            .any(|&id| hit_primitive(primitives, id, ray, ray_t, &mut rec))
            || self.root.any_hit(primitives, ray, ray_t, &mut rec)
    }
}

impl BvhNode {
    /// Recursive construction; returns the node and its depth.
    ///
    /// Simple median-split approach: sort by centroid on the longest axis of
    /// the centroid bounds, split in half, recurse.
    fn build(mut items: Vec<(PrimitiveId, Aabb)>) -> (Self, usize) {
        let bounds = items
            .iter()
            .fold(Aabb::EMPTY, |acc, (_, b)| Aabb::surrounding(&acc, b));

        if items.len() <= LEAF_MAX_SIZE {
            let primitives = items.into_iter().map(|(id, _)| id).collect();
            return (
                BvhNode::Leaf {
                    primitives,
                    bbox: bounds,
                },
                1,
            );
        }

        let centroid_bounds = items.iter().fold(Aabb::EMPTY, |acc, (_, b)| {
            let c = b.centroid();
            Aabb::surrounding(&acc, &Aabb { min: c, max: c })
        });
        let axis = centroid_bounds.longest_axis();

        items.sort_unstable_by(|(_, a), (_, b)| {
            a.centroid()[axis]
                .partial_cmp(&b.centroid()[axis])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid);

        let (left, left_depth) = Self::build(items);
        let (right, right_depth) = Self::build(right_items);

        (
            BvhNode::Branch {
                left: Box::new(left),
                right: Box::new(right),
                bbox: bounds,
            },
            1 + left_depth.max(right_depth),
        )
    }

    fn nearest(
        &self,
        primitives: &Primitives,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord,
    ) -> Option<PrimitiveId> {
        match self {
            BvhNode::Empty => None,

            BvhNode::Leaf { primitives: ids, bbox } => {
                if !bbox.hit(ray.origin(), ray.inv_direction(), ray_t) {
                    return None;
                }

                let mut closest = None;
                let mut range = ray_t;
                for &id in ids {
                    if hit_primitive(primitives, id, ray, range, rec) {
                        range = range.clip_max(rec.t);
                        closest = Some(id);
                    }
                }
                closest
            }

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray.origin(), ray.inv_direction(), ray_t) {
                    return None;
                }

                let hit_left = left.nearest(primitives, ray, ray_t, rec);

                // Only check right up to closest hit
                let right_t = match hit_left {
                    Some(_) => ray_t.clip_max(rec.t),
                    None => ray_t,
                };
                right.nearest(primitives, ray, right_t, rec).or(hit_left)
            }
        }
    }

    fn any_hit(
        &self,
        primitives: &Primitives,
        ray: &Ray,
        ray_t: Interval,
        rec: &mut HitRecord,
    ) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Leaf { primitives: ids, bbox } => {
                bbox.hit(ray.origin(), ray.inv_direction(), ray_t)
                    && ids
                        .iter()
                        .any(|&id| hit_primitive(primitives, id, ray, ray_t, rec))
            }

            BvhNode::Branch { left, right, bbox } => {
                bbox.hit(ray.origin(), ray.inv_direction(), ray_t)
                    && (left.any_hit(primitives, ray, ray_t, rec)
                        || right.any_hit(primitives, ray, ray_t, rec))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::Hittable;
    use crate::material::MaterialId;
    use crate::{Plane, Sphere};
    use lumen_math::Vec3;

    fn row_of_spheres(count: usize) -> Vec<Box<dyn Hittable>> {
        (0..count)
            .map(|i| {
                let sphere =
                    Sphere::new(Vec3::new(i as f32, 0.0, -5.0), 0.4, MaterialId(0)).unwrap();
                Box::new(sphere) as Box<dyn Hittable>
            })
            .collect()
    }

    fn forward() -> Interval {
        Interval::new(1e-4, f32::INFINITY)
    }

    #[test]
    fn test_bvh_empty() {
        let bvh = Bvh::new(&[]);
        assert!(matches!(bvh.root, BvhNode::Empty));
        assert_eq!(bvh.depth(), 0);

        let ray = Ray::primary(Vec3::ZERO, Vec3::NEG_Z);
        assert!(bvh.nearest(&[], &ray, forward()).is_none());
    }

    #[test]
    fn test_bvh_single_sphere_is_leaf() {
        let primitives = row_of_spheres(1);
        let bvh = Bvh::new(&primitives);
        assert!(matches!(bvh.root, BvhNode::Leaf { .. }));

        let ray = Ray::primary(Vec3::ZERO, Vec3::NEG_Z);
        let (id, rec) = bvh.nearest(&primitives, &ray, forward()).unwrap();
        assert_eq!(id, PrimitiveId(0));
        assert!((rec.p.z - (-4.6)).abs() < 1e-4);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let primitives = row_of_spheres(10);
        let bvh = Bvh::new(&primitives);
        assert!(bvh.depth() > 1);

        let ray = Ray::primary(Vec3::new(5.0, 0.0, 0.0), Vec3::NEG_Z);
        let (id, rec) = bvh.nearest(&primitives, &ray, forward()).unwrap();
        assert_eq!(id, PrimitiveId(5));
        assert!((rec.p.z - (-4.6)).abs() < 0.01);

        let miss = Ray::primary(Vec3::new(5.5, 0.0, 0.0), Vec3::NEG_Z);
        assert!(bvh.nearest(&primitives, &miss, forward()).is_none());
    }

    #[test]
    fn test_bvh_picks_nearest_across_plane_and_tree() {
        let mut primitives = row_of_spheres(6);
        primitives.push(Box::new(
            Plane::new(Vec3::new(0.0, 0.0, -3.0), Vec3::Z, MaterialId(0)).unwrap(),
        ));
        let bvh = Bvh::new(&primitives);
        assert_eq!(bvh.unbounded_count(), 1);

        let ray = Ray::primary(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        let (id, rec) = bvh.nearest(&primitives, &ray, forward()).unwrap();
        assert_eq!(id, PrimitiveId(6));
        assert!((rec.t - 3.0).abs() < 1e-4);

        // Tree hit closer than the plane when looking the other way round.
        let back = Ray::primary(Vec3::new(2.0, 0.0, -10.0), Vec3::Z);
        let (id, _) = bvh.nearest(&primitives, &back, forward()).unwrap();
        assert_eq!(id, PrimitiveId(2));
    }

    #[test]
    fn test_bvh_any_hit_respects_distance() {
        let primitives = row_of_spheres(8);
        let bvh = Bvh::new(&primitives);
        let ray = Ray::primary(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z);

        assert!(bvh.any_hit(&primitives, &ray, forward()));
        assert!(!bvh.any_hit(&primitives, &ray, Interval::new(1e-4, 4.0)));
    }

    #[test]
    fn test_bvh_skips_origin_primitive() {
        let primitives = row_of_spheres(8);
        let bvh = Bvh::new(&primitives);
        let ray = Ray::new(Vec3::new(3.0, 0.0, 0.0), Vec3::NEG_Z, 1, true, Some(PrimitiveId(3)));

        assert!(!bvh.any_hit(&primitives, &ray, forward()));
        assert!(bvh.nearest(&primitives, &ray, forward()).is_none());
    }
}
