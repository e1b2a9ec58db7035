//! Ray type for path tracing.
//!
//! Besides origin and direction a ray carries its bounce depth, whether it
//! is a shadow probe, and the primitive it left so that primitive can be
//! skipped when searching for the next hit.

use crate::hittable::PrimitiveId;
use lumen_math::Vec3;

/// Paths at or below this depth always spawn an indirect diffuse bounce;
/// deeper ones go through Russian roulette.
pub const RAY_DEPTH_MIN: u32 = 4;

/// Rays deeper than this are not shaded at all.
pub const RAY_DEPTH_MAX: u32 = 8;

/// Smallest hit distance accepted by intersection queries.
pub const EPSILON: f32 = 1e-4;

/// A ray with origin, unit direction and bounce bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray
    origin: Vec3,
    /// Unit direction
    direction: Vec3,
    /// Componentwise inverse of the direction, for slab tests
    inv_direction: Vec3,
    /// Number of bounces since the camera
    depth: u32,
    /// Whether this ray only tests occlusion
    shadow: bool,
    /// Primitive the ray was spawned from
    primitive: Option<PrimitiveId>,
}

impl Ray {
    /// Create a new ray. The direction is normalized.
    #[inline]
    pub fn new(
        origin: Vec3,
        direction: Vec3,
        depth: u32,
        shadow: bool,
        primitive: Option<PrimitiveId>,
    ) -> Self {
        let direction = direction.normalize();
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
            depth,
            shadow,
            primitive,
        }
    }

    /// Create a camera ray: depth 0, not a shadow probe, no origin primitive.
    #[inline]
    pub fn primary(origin: Vec3, direction: Vec3) -> Self {
        Self::new(origin, direction, 0, false, None)
    }

    /// Get the ray's origin point.
    #[inline]
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Get the ray's unit direction.
    #[inline]
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    #[inline]
    pub fn inv_direction(&self) -> Vec3 {
        self.inv_direction
    }

    /// Number of bounces since the camera.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn is_shadow(&self) -> bool {
        self.shadow
    }

    /// The primitive this ray left, if any.
    #[inline]
    pub fn primitive(&self) -> Option<PrimitiveId> {
        self.primitive
    }

    /// Compute a point along the ray at parameter t.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }
}
