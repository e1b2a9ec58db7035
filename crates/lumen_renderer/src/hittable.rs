//! Hittable trait and HitRecord for ray-primitive intersection.

use crate::material::MaterialId;
use crate::Ray;
use lumen_math::{Aabb, Interval, Vec3};

/// Index of a primitive inside its [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(pub usize);

/// Record of a ray-primitive intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal at intersection (always points against ray)
    pub normal: Vec3,
    /// Material of the primitive that was hit
    pub material: MaterialId,
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl Default for HitRecord {
    fn default() -> Self {
        Self {
            p: Vec3::ZERO,
            normal: Vec3::ZERO,
            material: MaterialId(0),
            t: f32::INFINITY,
            front_face: false,
        }
    }
}

impl HitRecord {
    /// Set the face normal based on ray direction and outward normal.
    ///
    /// The normal is always stored pointing against the ray direction,
    /// so shading sees it on the side the ray arrived from.
    pub fn set_face_normal(&mut self, ray: &Ray, outward_normal: Vec3) {
        self.front_face = ray.direction().dot(outward_normal) < 0.0;

        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for primitives that can be hit by rays.
pub trait Hittable: Send + Sync {
    /// Test if a ray hits this primitive strictly inside `ray_t`.
    ///
    /// Returns true if hit, and fills in the hit record.
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool;

    /// Get the axis-aligned bounding box of this primitive.
    ///
    /// Unbounded primitives return [`Aabb::UNIVERSE`].
    fn bounding_box(&self) -> Aabb;

    /// Material the primitive is shaded with.
    fn material(&self) -> MaterialId;
}
