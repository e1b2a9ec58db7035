//! Depth map: grey level from the hit distance.
//!
//! The distance is normalised against the distance from the ray origin to
//! the far corner of the scene bounds. Closer hits are brighter; hits at or
//! beyond that distance are black.

use crate::config::{ConfigError, ShaderConfig};
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::RAY_DEPTH_MAX;
use crate::scene::Scene;
use crate::shader::{Shader, ShaderBase};
use lumen_math::Vec3;

pub struct DepthMap {
    base: ShaderBase,
    max_point: Vec3,
}

impl DepthMap {
    pub fn new(scene: Scene, config: &ShaderConfig) -> Result<Self, ConfigError> {
        let base = ShaderBase::new(scene, config)?;
        let bounds = base.scene().bounds();
        let max_point = if bounds.is_bounded() {
            bounds.max
        } else {
            log::warn!("Depth map over a scene without bounded primitives, using the origin");
            Vec3::ZERO
        };
        log::debug!("Depth map far corner at {max_point}");

        Ok(Self { base, max_point })
    }

    pub fn fork(&self, seed: u64) -> Self {
        Self {
            base: self.base.fork(seed),
            max_point: self.max_point,
        }
    }

    /// The far corner hit distances are normalised against.
    pub fn max_point(&self) -> Vec3 {
        self.max_point
    }
}

impl Shader for DepthMap {
    fn base(&self) -> &ShaderBase {
        &self.base
    }

    /// Overwrites `rgb` with the depth value. Never reports an emitter.
    fn shade(&self, rgb: &mut Color, hit: &Intersection<'_>) -> bool {
        if hit.depth() > RAY_DEPTH_MAX {
            return false;
        }

        let max_distance = (self.max_point - hit.ray.origin()).length();
        let depth = if hit.distance >= max_distance {
            0.0
        } else {
            (max_distance - hit.distance) / max_distance
        };
        *rgb = Color::splat(depth);
        false
    }

    fn reset_sampling(&mut self) {
        self.base.reset_sampling();
    }
}
