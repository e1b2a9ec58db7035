//! Nearest-hit result handed to the shaders.

use crate::hittable::PrimitiveId;
use crate::material::Material;
use crate::Ray;
use lumen_math::Vec3;

/// A resolved ray-scene intersection.
///
/// Borrows the hit material from the scene and the ray that produced it;
/// lives only for the duration of one `shade` call.
#[derive(Debug, Clone, Copy)]
pub struct Intersection<'a> {
    /// Point of intersection
    pub point: Vec3,
    /// Unit shading normal, facing the side the ray arrived from
    pub normal: Vec3,
    /// Material of the hit primitive
    pub material: &'a Material,
    /// The ray that produced this hit
    pub ray: &'a Ray,
    /// The primitive that was hit
    pub primitive: PrimitiveId,
    /// Distance along the ray
    pub distance: f32,
}

impl<'a> Intersection<'a> {
    /// Spawn a secondary ray leaving this intersection.
    ///
    /// The new ray is one bounce deeper than the incoming ray and ignores the
    /// primitive it leaves.
    #[inline]
    pub fn spawn(&self, direction: Vec3, shadow: bool) -> Ray {
        Ray::new(
            self.point,
            direction,
            self.ray.depth() + 1,
            shadow,
            Some(self.primitive),
        )
    }

    /// Depth of the incoming ray.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.ray.depth()
    }
}
