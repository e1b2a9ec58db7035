use crate::{Interval, Vec3};

/// Axis-Aligned Bounding Box used by the BVH.
///
/// Stored as two corners; an empty box has `min > max` on every axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from two corner points in any order.
    ///
    /// Thin axes are padded so planar primitives still get a volume.
    pub fn from_points(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self {
            min: a.min(b),
            max: a.max(b),
        };
        aabb.pad_to_minimums();
        aabb
    }

    /// Create an AABB that surrounds two other AABBs.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            min: box0.min.min(box1.min),
            max: box0.max.max(box1.max),
        }
    }

    /// Returns true if every extent is finite.
    pub fn is_bounded(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Slab test against a ray given its origin and componentwise inverse
    /// direction.
    pub fn hit(&self, origin: Vec3, inv_direction: Vec3, ray_t: Interval) -> bool {
        self.clip_ray(origin, inv_direction, ray_t).is_some()
    }

    /// The part of `ray_t` during which the ray is inside the box, if any.
    pub fn clip_ray(&self, origin: Vec3, inv_direction: Vec3, ray_t: Interval) -> Option<Interval> {
        let t0 = (self.min - origin) * inv_direction;
        let t1 = (self.max - origin) * inv_direction;

        let near = t0.min(t1).max_element().max(ray_t.min);
        let far = t0.max(t1).min_element().min(ray_t.max);

        (near <= far).then(|| Interval::new(near, far))
    }

    fn pad_to_minimums(&mut self) {
        let delta = 0.0001;
        let padding = Vec3::select(
            (self.max - self.min).cmplt(Vec3::splat(delta)),
            Vec3::splat(delta / 2.0),
            Vec3::ZERO,
        );
        self.min -= padding;
        self.max += padding;
    }

    /// Returns the index (0=X, 1=Y, 2=Z) of the axis with the longest extent.
    pub fn longest_axis(&self) -> usize {
        let size = self.max - self.min;

        if size.x > size.y && size.x > size.z {
            0
        } else if size.y > size.z {
            1
        } else {
            2
        }
    }

    /// Returns the center point of the bounding box.
    pub fn centroid(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub const EMPTY: Aabb = Aabb {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub const UNIVERSE: Aabb = Aabb {
        min: Vec3::NEG_INFINITY,
        max: Vec3::INFINITY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inverse(direction: Vec3) -> Vec3 {
        direction.recip()
    }

    #[test]
    fn test_aabb_from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.max, Vec3::splat(10.0));
    }

    #[test]
    fn test_aabb_pads_flat_axis() {
        let aabb = Aabb::from_points(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0));

        assert!(aabb.max.z > aabb.min.z);
        assert!(aabb.min.z < 1.0 && aabb.max.z > 1.0);
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.min, Vec3::ZERO);
        assert_eq!(surrounding.max, Vec3::splat(10.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_hit() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let range = Interval::new(0.0, 100.0);

        let origin = Vec3::new(0.0, 0.0, -5.0);
        assert!(aabb.hit(origin, inverse(Vec3::Z), range));
        assert!(!aabb.hit(origin, inverse(Vec3::NEG_Z), range));

        let beside = Vec3::new(10.0, 0.0, 0.0);
        assert!(!aabb.hit(beside, inverse(Vec3::Z), range));
    }

    #[test]
    fn test_aabb_clip_ray() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let origin = Vec3::new(0.0, 0.0, -5.0);

        let inside = aabb
            .clip_ray(origin, inverse(Vec3::Z), Interval::new(0.0, 100.0))
            .unwrap();
        assert_eq!(inside, Interval::new(4.0, 6.0));

        let clipped = aabb
            .clip_ray(origin, inverse(Vec3::Z), Interval::new(5.0, 5.5))
            .unwrap();
        assert_eq!(clipped, Interval::new(5.0, 5.5));

        assert!(aabb
            .clip_ray(origin, inverse(Vec3::NEG_Z), Interval::new(0.0, 100.0))
            .is_none());
    }

    #[test]
    fn test_aabb_hit_respects_max_distance() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let origin = Vec3::new(0.0, 0.0, -5.0);

        assert!(!aabb.hit(origin, inverse(Vec3::Z), Interval::new(0.0, 3.0)));
    }

    #[test]
    fn test_aabb_longest_axis_and_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 10.0, 1.0));

        assert_eq!(aabb.longest_axis(), 1);
        assert_eq!(aabb.centroid(), Vec3::new(0.5, 5.0, 0.5));
    }

    #[test]
    fn test_aabb_bounded() {
        assert!(Aabb::from_points(Vec3::ZERO, Vec3::ONE).is_bounded());
        assert!(!Aabb::UNIVERSE.is_bounded());
    }
}
