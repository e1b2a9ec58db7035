//! Infinite plane primitive.

use crate::{
    hittable::{HitRecord, Hittable},
    material::MaterialId,
    scene::SceneError,
    Ray,
};
use lumen_math::{Aabb, Interval, Vec3};

/// An infinite plane through `point` with outward `normal`.
#[derive(Debug, Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    material: MaterialId,
}

impl Plane {
    /// Create a new plane. The normal is normalized and must be nonzero.
    pub fn new(point: Vec3, normal: Vec3, material: MaterialId) -> Result<Self, SceneError> {
        match normal.try_normalize() {
            Some(normal) if point.is_finite() => Ok(Self {
                point,
                normal,
                material,
            }),
            _ => Err(SceneError::DegeneratePrimitive("plane")),
        }
    }
}

impl Hittable for Plane {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = self.normal.dot(self.point - ray.origin()) / denom;
        if !ray_t.surrounds(t) {
            return false;
        }

        rec.t = t;
        rec.p = ray.at(t);
        rec.set_face_normal(ray, self.normal);
        rec.material = self.material;

        true
    }

    fn bounding_box(&self) -> Aabb {
        Aabb::UNIVERSE
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}
