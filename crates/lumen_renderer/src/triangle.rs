//! Triangle primitive for ray tracing.
//!
//! Uses the Möller-Trumbore algorithm for ray-triangle intersection.

use crate::{
    hittable::{HitRecord, Hittable},
    material::MaterialId,
    scene::SceneError,
    Ray,
};
use lumen_math::{Aabb, Interval, Vec3};

/// A triangle primitive.
#[derive(Debug, Clone)]
pub struct Triangle {
    v0: Vec3,
    /// Edges from `v0`
    edge1: Vec3,
    edge2: Vec3,
    /// Pre-computed face normal (unit length)
    normal: Vec3,
    material: MaterialId,
    bbox: Aabb,
}

impl Triangle {
    /// Create a new triangle from three vertices. Zero-area triangles are
    /// rejected.
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3, material: MaterialId) -> Result<Self, SceneError> {
        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        let normal = edge1.cross(edge2).try_normalize();
        let normal = match normal {
            Some(n) if v0.is_finite() && v1.is_finite() && v2.is_finite() => n,
            _ => return Err(SceneError::DegeneratePrimitive("triangle")),
        };

        let bbox = Aabb::from_points(v0.min(v1).min(v2), v0.max(v1).max(v2));

        Ok(Self {
            v0,
            edge1,
            edge2,
            normal,
            material,
            bbox,
        })
    }
}

impl Hittable for Triangle {
    fn hit(&self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord) -> bool {
        let h = ray.direction().cross(self.edge2);
        let a = self.edge1.dot(h);

        // Ray is parallel to triangle
        if a.abs() < 1e-8 {
            return false;
        }

        let f = 1.0 / a;
        let s = ray.origin() - self.v0;
        let u = f * s.dot(h);
        if !(0.0..=1.0).contains(&u) {
            return false;
        }

        let q = s.cross(self.edge1);
        let v = f * ray.direction().dot(q);
        if v < 0.0 || u + v > 1.0 {
            return false;
        }

        let t = f * self.edge2.dot(q);
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
        self.bbox
    }

    fn material(&self) -> MaterialId {
        self.material
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_at_z(z: f32) -> Triangle {
        Triangle::new(
            Vec3::new(-1.0, -1.0, z),
            Vec3::new(1.0, -1.0, z),
            Vec3::new(0.0, 1.0, z),
            MaterialId(0),
        )
        .unwrap()
    }

    #[test]
    fn test_triangle_hit() {
        let tri = triangle_at_z(-1.0);
        let ray = Ray::primary(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!((rec.t - 1.0).abs() < 0.001);
        assert!(rec.normal.abs_diff_eq(Vec3::Z, 1e-6));
    }

    #[test]
    fn test_triangle_miss() {
        let tri = triangle_at_z(-1.0);
        let ray = Ray::primary(Vec3::ZERO, Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
    }

    #[test]
    fn test_triangle_back_face_normal_flipped() {
        let tri = triangle_at_z(-1.0);
        let ray = Ray::primary(Vec3::new(0.0, 0.0, -2.0), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(tri.hit(&ray, Interval::new(0.001, f32::INFINITY), &mut rec));
        assert!(!rec.front_face);
        assert!(rec.normal.abs_diff_eq(Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_degenerate_triangle_rejected() {
        let collinear = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::X * 2.0, MaterialId(0));
        assert_eq!(
            collinear.unwrap_err(),
            SceneError::DegeneratePrimitive("triangle")
        );
    }
}
