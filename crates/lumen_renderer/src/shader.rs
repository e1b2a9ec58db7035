//! Shading interface and the state every shader shares.
//!
//! A shader answers "how much radiance leaves this intersection back along
//! the incoming ray". Shaders recurse through [`Shader::ray_trace`], which
//! finds the next hit in the scene and shades it with the same shader.

use std::cell::RefCell;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, UnitDisc};

use crate::config::{ConfigError, ShaderConfig, ShaderKind};
use crate::depth_map::DepthMap;
use crate::diffuse::Diffuse;
use crate::intersection::Intersection;
use crate::light::Light;
use crate::material::Color;
use crate::no_shadows::NoShadows;
use crate::path_tracer::PathTracer;
use crate::sampler::{RandomSampler, Sampler};
use crate::scene::Scene;
use crate::whitted::Whitted;
use crate::Ray;
use lumen_math::{has_positive_value, reflect, refract, Vec3};

/// A shading algorithm.
///
/// Shaders hold their random state behind interior mutability, so a shader
/// instance is `Send` but not `Sync`: every worker lane owns its own
/// instance, created with the concrete type's `fork`.
pub trait Shader {
    /// Shared scene and sampling state.
    fn base(&self) -> &ShaderBase;

    /// Add the radiance leaving `hit` towards the ray origin into `rgb`.
    ///
    /// Returns true if the shaded point (or, for the path tracer, the
    /// indirect bounce leaving it) is a light emitter. `rgb` is not cleared
    /// first; an emitter overwrites it.
    fn shade(&self, rgb: &mut Color, hit: &Intersection<'_>) -> bool;

    /// Rewind all per-pass sampling state to its initial value.
    fn reset_sampling(&mut self);

    /// Trace `ray` into the scene and shade the nearest hit.
    ///
    /// Returns black and `false` when nothing is hit.
    fn ray_trace(&self, ray: &Ray) -> (Color, bool) {
        let mut rgb = Color::ZERO;
        let hit_light = match self.base().scene().trace(ray) {
            Some(hit) => self.shade(&mut rgb, &hit),
            None => false,
        };
        (rgb, hit_light)
    }

    /// Returns true if anything blocks `ray` before `max_distance`.
    fn shadow_trace(&self, ray: &Ray, max_distance: f32) -> bool {
        self.base().scene().occluded(ray, max_distance)
    }

    /// Radiance arriving along the mirror direction, weighted by `ks`.
    fn reflected_radiance(&self, hit: &Intersection<'_>) -> Color {
        let ks = hit.material.ks();
        if !has_positive_value(ks) {
            return Color::ZERO;
        }
        let direction = reflect(hit.ray.direction(), hit.normal);
        let (li, _) = self.ray_trace(&hit.spawn(direction, false));
        ks * li
    }

    /// Radiance arriving along the refracted direction, weighted by `kt`.
    /// Zero under total internal reflection.
    fn transmitted_radiance(&self, hit: &Intersection<'_>) -> Color {
        let kt = hit.material.kt();
        if !has_positive_value(kt) {
            return Color::ZERO;
        }
        let eta = 1.0 / hit.material.refractive_index();
        match refract(hit.ray.direction(), hit.normal, eta) {
            Some(direction) => {
                let (li, _) = self.ray_trace(&hit.spawn(direction, false));
                kt * li
            }
            None => Color::ZERO,
        }
    }
}

/// Scene and sampling state shared by every shader.
pub struct ShaderBase {
    scene: Arc<Scene>,
    samples_light: u32,
    seed: u64,
    rng: RefCell<StdRng>,
}

impl ShaderBase {
    /// Validate `config`, build the scene's acceleration structure and take
    /// ownership of the scene.
    pub fn new(mut scene: Scene, config: &ShaderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        scene.prepare(config.accelerator);

        if scene.lights().is_empty()
            && scene.materials().iter().any(|m| has_positive_value(m.kd()))
        {
            log::warn!("Scene has diffuse materials but no point lights");
        }

        Ok(Self {
            scene: Arc::new(scene),
            samples_light: config.samples_light,
            seed: config.seed,
            rng: RefCell::new(StdRng::seed_from_u64(config.seed)),
        })
    }

    /// A new base sharing the scene, with its own random state.
    pub fn fork(&self, seed: u64) -> Self {
        Self {
            scene: Arc::clone(&self.scene),
            samples_light: self.samples_light,
            seed,
            rng: RefCell::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn lights(&self) -> &[Light] {
        self.scene.lights()
    }

    pub fn samples_light(&self) -> u32 {
        self.samples_light
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniformly chosen light index, or `None` when the scene has no lights.
    pub fn choose_light_index(&self) -> Option<usize> {
        let count = self.lights().len();
        (count > 0).then(|| self.rng.borrow_mut().gen_range(0..count))
    }

    /// Cosine-weighted direction in the hemisphere around the unit `normal`.
    ///
    /// Uniform disc sample lifted onto the hemisphere (Malley's method).
    pub fn cosine_sample_hemisphere(&self, normal: Vec3) -> Vec3 {
        let [x, y]: [f32; 2] = UnitDisc.sample(&mut *self.rng.borrow_mut());
        let z = (1.0 - x * x - y * y).max(0.0).sqrt();
        let (tangent, bitangent) = normal.any_orthonormal_pair();
        (tangent * x + bitangent * y + normal * z).normalize()
    }

    /// Monte Carlo estimate of direct diffuse light at `hit`, one random
    /// light per sample. Already weighted by `kd`.
    ///
    /// With `shadows` off no occlusion probes are cast.
    pub fn sample_direct_light(&self, hit: &Intersection<'_>, shadows: bool) -> Color {
        let mut ld = Color::ZERO;
        for _ in 0..self.samples_light {
            let Some(index) = self.choose_light_index() else {
                break;
            };
            let light = &self.lights()[index];
            let (to_light, distance) = light.direction_from(hit.point);
            let cos_normal_light = hit.normal.dot(to_light);
            // Also rejects NaN from a light sitting on the hit point.
            let facing = cos_normal_light > 0.0;
            if facing
                && !(shadows && self.scene.occluded(&hit.spawn(to_light, true), distance))
            {
                ld += light.radiance() * cos_normal_light;
            }
        }

        ld * hit.material.kd() / self.samples_light as f32
    }

    /// Rewind the random state to the configured seed.
    pub fn reset_sampling(&mut self) {
        *self.rng.get_mut() = StdRng::seed_from_u64(self.seed);
    }
}

/// A shader chosen at runtime from [`ShaderKind`].
pub enum ShaderVariant<S: Sampler = RandomSampler> {
    NoShadows(NoShadows),
    Whitted(Whitted),
    PathTracer(PathTracer<S>),
    DepthMap(DepthMap),
    Diffuse(Diffuse),
}

impl<S: Sampler> ShaderVariant<S> {
    /// Build the shader `config.shader` names. Only the path tracer uses
    /// `sampler`.
    pub fn new(scene: Scene, sampler: S, config: &ShaderConfig) -> Result<Self, ConfigError> {
        Ok(match config.shader {
            ShaderKind::NoShadows => ShaderVariant::NoShadows(NoShadows::new(scene, config)?),
            ShaderKind::Whitted => ShaderVariant::Whitted(Whitted::new(scene, config)?),
            ShaderKind::PathTracer => {
                ShaderVariant::PathTracer(PathTracer::new(scene, sampler, config)?)
            }
            ShaderKind::DepthMap => ShaderVariant::DepthMap(DepthMap::new(scene, config)?),
            ShaderKind::Diffuse => ShaderVariant::Diffuse(Diffuse::new(scene, config)?),
        })
    }

    pub fn kind(&self) -> ShaderKind {
        match self {
            ShaderVariant::NoShadows(_) => ShaderKind::NoShadows,
            ShaderVariant::Whitted(_) => ShaderKind::Whitted,
            ShaderVariant::PathTracer(_) => ShaderKind::PathTracer,
            ShaderVariant::DepthMap(_) => ShaderKind::DepthMap,
            ShaderVariant::Diffuse(_) => ShaderKind::Diffuse,
        }
    }

    /// A new instance of the same shader for another worker lane.
    pub fn fork(&self, sampler: S, seed: u64) -> Self {
        match self {
            ShaderVariant::NoShadows(shader) => ShaderVariant::NoShadows(shader.fork(seed)),
            ShaderVariant::Whitted(shader) => ShaderVariant::Whitted(shader.fork(seed)),
            ShaderVariant::PathTracer(shader) => {
                ShaderVariant::PathTracer(shader.fork(sampler, seed))
            }
            ShaderVariant::DepthMap(shader) => ShaderVariant::DepthMap(shader.fork(seed)),
            ShaderVariant::Diffuse(shader) => ShaderVariant::Diffuse(shader.fork(seed)),
        }
    }
}

impl<S: Sampler> Shader for ShaderVariant<S> {
    fn base(&self) -> &ShaderBase {
        match self {
            ShaderVariant::NoShadows(shader) => shader.base(),
            ShaderVariant::Whitted(shader) => shader.base(),
            ShaderVariant::PathTracer(shader) => shader.base(),
            ShaderVariant::DepthMap(shader) => shader.base(),
            ShaderVariant::Diffuse(shader) => shader.base(),
        }
    }

    fn shade(&self, rgb: &mut Color, hit: &Intersection<'_>) -> bool {
        match self {
            ShaderVariant::NoShadows(shader) => shader.shade(rgb, hit),
            ShaderVariant::Whitted(shader) => shader.shade(rgb, hit),
            ShaderVariant::PathTracer(shader) => shader.shade(rgb, hit),
            ShaderVariant::DepthMap(shader) => shader.shade(rgb, hit),
            ShaderVariant::Diffuse(shader) => shader.shade(rgb, hit),
        }
    }

    fn reset_sampling(&mut self) {
        match self {
            ShaderVariant::NoShadows(shader) => shader.reset_sampling(),
            ShaderVariant::Whitted(shader) => shader.reset_sampling(),
            ShaderVariant::PathTracer(shader) => shader.reset_sampling(),
            ShaderVariant::DepthMap(shader) => shader.reset_sampling(),
            ShaderVariant::Diffuse(shader) => shader.reset_sampling(),
        }
    }
}
