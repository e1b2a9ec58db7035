//! Plain diffuse shading: `kd` times the unshadowed light from every point
//! light. No shadow rays and no secondary rays, so it is deterministic.

use crate::config::{ConfigError, ShaderConfig};
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::RAY_DEPTH_MAX;
use crate::scene::Scene;
use crate::shader::{Shader, ShaderBase};
use lumen_math::has_positive_value;

pub struct Diffuse {
    base: ShaderBase,
}

impl Diffuse {
    pub fn new(scene: Scene, config: &ShaderConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base: ShaderBase::new(scene, config)?,
        })
    }

    pub fn fork(&self, seed: u64) -> Self {
        Self {
            base: self.base.fork(seed),
        }
    }
}

impl Shader for Diffuse {
    fn base(&self) -> &ShaderBase {
        &self.base
    }

    fn shade(&self, rgb: &mut Color, hit: &Intersection<'_>) -> bool {
        if hit.depth() > RAY_DEPTH_MAX {
            return false;
        }

        let material = hit.material;
        if has_positive_value(material.le()) {
            *rgb = material.le();
            return true;
        }

        let lights = self.base.lights();
        if lights.is_empty() || !has_positive_value(material.kd()) {
            return false;
        }

        let ld: Color = lights
            .iter()
            .filter_map(|light| {
                let (to_light, _) = light.direction_from(hit.point);
                let cos_normal_light = hit.normal.dot(to_light);
                (cos_normal_light > 0.0).then(|| light.radiance() * cos_normal_light)
            })
            .sum();
        *rgb += ld * material.kd() / lights.len() as f32;
        false
    }

    fn reset_sampling(&mut self) {
        self.base.reset_sampling();
    }
}
