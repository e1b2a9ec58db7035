//! Direct lighting without shadow probes or secondary bounces.

use crate::config::{ConfigError, ShaderConfig};
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::RAY_DEPTH_MAX;
use crate::scene::Scene;
use crate::shader::{Shader, ShaderBase};
use lumen_math::has_positive_value;

/// Fast preview shader: every light is assumed visible.
pub struct NoShadows {
    base: ShaderBase,
}

impl NoShadows {
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

impl Shader for NoShadows {
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

        if has_positive_value(material.kd()) {
            *rgb += self.base.sample_direct_light(hit, false);
        }
        false
    }

    fn reset_sampling(&mut self) {
        self.base.reset_sampling();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accelerator::Accelerator;
    use crate::material::Material;
    use crate::shader::tests::lit_floor;
    use crate::{Plane, Ray, Sphere};
    use lumen_math::Vec3;

    fn no_shadows(scene: Scene) -> NoShadows {
        let config = ShaderConfig {
            accelerator: Accelerator::Bvh,
            samples_light: 2,
            ..ShaderConfig::default()
        };
        NoShadows::new(scene, &config).unwrap()
    }

    #[test]
    fn test_blocker_casts_no_shadow() {
        let mut scene = lit_floor(Color::splat(0.5), Color::ONE, 4.0);
        let blocker = scene.add_material(Material::diffuse(Color::ONE).unwrap());
        scene
            .add_primitive(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5, blocker).unwrap())
            .unwrap();
        let shader = no_shadows(scene);

        let ray = Ray::primary(Vec3::new(1.0, 1.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        let (rgb, hit_light) = shader.ray_trace(&ray);
        assert!(!hit_light);
        assert!((rgb - Color::splat(0.5)).abs().max_element() < 1e-5);
    }

    #[test]
    fn test_light_on_hit_point_adds_nothing() {
        let shader = no_shadows(lit_floor(Color::splat(0.8), Color::ONE, 0.0));

        let (rgb, _) = shader.ray_trace(&Ray::primary(Vec3::Y, Vec3::NEG_Y));
        assert_eq!(rgb, Color::ZERO);
    }

    #[test]
    fn test_mirror_is_not_followed() {
        let mut scene = Scene::new();
        let mirror = scene.add_material(Material::mirror(Color::ONE).unwrap());
        let glow = scene.add_material(Material::emissive(Color::ONE).unwrap());
        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y, mirror).unwrap())
            .unwrap();
        scene
            .add_primitive(Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, glow).unwrap())
            .unwrap();
        let shader = no_shadows(scene);

        assert_eq!(
            shader.ray_trace(&Ray::primary(Vec3::Y, Vec3::NEG_Y)),
            (Color::ZERO, false)
        );
    }
}
