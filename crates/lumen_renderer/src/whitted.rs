//! Whitted-style ray tracing.
//!
//! Direct light from every point light with hard shadows, plus perfect
//! mirror reflection and refraction. No indirect diffuse light, so the
//! result is deterministic.

use crate::config::{ConfigError, ShaderConfig};
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::RAY_DEPTH_MAX;
use crate::scene::Scene;
use crate::shader::{Shader, ShaderBase};
use lumen_math::has_positive_value;

pub struct Whitted {
    base: ShaderBase,
}

impl Whitted {
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

    /// Direct light from all lights, averaged by light count.
    fn direct_light(&self, hit: &Intersection<'_>) -> Color {
        let lights = self.base.lights();
        if lights.is_empty() {
            return Color::ZERO;
        }

        let mut ld = Color::ZERO;
        for light in lights {
            let (to_light, distance) = light.direction_from(hit.point);
            let cos_normal_light = hit.normal.dot(to_light);
            if cos_normal_light > 0.0 && !self.shadow_trace(&hit.spawn(to_light, true), distance) {
                ld += light.radiance() * cos_normal_light;
            }
        }
        ld * hit.material.kd() / lights.len() as f32
    }
}

impl Shader for Whitted {
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
            *rgb += self.direct_light(hit);
        }
        *rgb += self.reflected_radiance(hit);
        *rgb += self.transmitted_radiance(hit);
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
    use crate::light::Light;
    use crate::material::Material;
    use crate::shader::tests::lit_floor;
    use crate::{Plane, Ray, Sphere};
    use lumen_math::Vec3;

    fn whitted(scene: Scene) -> Whitted {
        let config = ShaderConfig {
            accelerator: Accelerator::Naive,
            ..ShaderConfig::default()
        };
        Whitted::new(scene, &config).unwrap()
    }

    #[test]
    fn test_every_light_is_sampled() {
        let mut scene = lit_floor(Color::ONE, Color::ONE, 2.0);
        scene.add_light(Light::new(Vec3::new(2.0, 2.0, 0.0), Color::splat(2.0)).unwrap());
        let shader = whitted(scene);
        let expected = 0.5 * (1.0 + 2.0 * std::f32::consts::FRAC_1_SQRT_2);

        let ray = Ray::primary(Vec3::Y, Vec3::NEG_Y);
        for _ in 0..4 {
            let (rgb, hit_light) = shader.ray_trace(&ray);
            assert!(!hit_light);
            assert!((rgb - Color::splat(expected)).abs().max_element() < 1e-5);
        }
    }

    #[test]
    fn test_hard_shadow() {
        let mut scene = lit_floor(Color::ONE, Color::ONE, 4.0);
        let blocker = scene.add_material(Material::diffuse(Color::ONE).unwrap());
        scene
            .add_primitive(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 0.5, blocker).unwrap())
            .unwrap();
        let shader = whitted(scene);

        let ray = Ray::primary(Vec3::new(1.0, 1.0, 0.0), Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(shader.ray_trace(&ray), (Color::ZERO, false));
    }

    #[test]
    fn test_mirror_sees_emitter() {
        let mut scene = Scene::new();
        let mirror = scene.add_material(Material::mirror(Color::splat(0.5)).unwrap());
        let glow = scene.add_material(Material::emissive(Color::ONE).unwrap());
        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y, mirror).unwrap())
            .unwrap();
        scene
            .add_primitive(Plane::new(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Y, glow).unwrap())
            .unwrap();
        let shader = whitted(scene);

        let (rgb, hit_light) = shader.ray_trace(&Ray::primary(Vec3::Y, Vec3::NEG_Y));
        assert!(!hit_light);
        assert_eq!(rgb, Color::splat(0.5));
    }

    #[test]
    fn test_no_indirect_diffuse() {
        let mut scene = Scene::new();
        let floor = scene.add_material(Material::diffuse(Color::splat(0.5)).unwrap());
        let glow = scene.add_material(Material::emissive(Color::ONE).unwrap());
        scene
            .add_primitive(Plane::new(Vec3::ZERO, Vec3::Y, floor).unwrap())
            .unwrap();
        scene
            .add_primitive(Sphere::new(Vec3::ZERO, 10.0, glow).unwrap())
            .unwrap();
        let shader = whitted(scene);

        let (rgb, _) = shader.ray_trace(&Ray::primary(Vec3::Y, Vec3::NEG_Y));
        assert_eq!(rgb, Color::ZERO);
    }

    #[test]
    fn test_depth_cutoff() {
        let shader = whitted(lit_floor(Color::ONE, Color::ONE, 2.0));
        let ray = Ray::new(Vec3::Y, Vec3::NEG_Y, RAY_DEPTH_MAX + 1, false, None);
        let hit = shader.base().scene().trace(&ray).unwrap();

        let mut rgb = Color::splat(0.3);
        assert!(!shader.shade(&mut rgb, &hit));
        assert_eq!(rgb, Color::splat(0.3));
    }
}
