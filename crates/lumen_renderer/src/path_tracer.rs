//! Monte Carlo path tracing shader.
//!
//! Estimates the radiance leaving a hit point as the sum of four terms:
//! - Ld: direct diffuse light from randomly chosen point lights
//! - LiD: indirect diffuse light along one cosine-weighted bounce
//! - LiS: perfect specular reflection
//! - LiT: perfect specular transmission
//!
//! Paths deeper than [`RAY_DEPTH_MIN`] only continue the diffuse bounce when
//! they survive Russian roulette.

use std::cell::RefCell;

use crate::config::{ConfigError, ShaderConfig};
use crate::intersection::Intersection;
use crate::material::Color;
use crate::ray::{RAY_DEPTH_MAX, RAY_DEPTH_MIN};
use crate::sampler::{RandomSampler, Sampler};
use crate::scene::Scene;
use crate::shader::{Shader, ShaderBase};
use lumen_math::has_positive_value;

/// Probability that Russian roulette ends a path.
const FINISH_PROBABILITY: f32 = 0.5;
const CONTINUE_PROBABILITY: f32 = 1.0 - FINISH_PROBABILITY;

/// Recursive Monte Carlo path tracer.
pub struct PathTracer<S: Sampler = RandomSampler> {
    base: ShaderBase,
    russian_roulette: RefCell<S>,
}

impl<S: Sampler> PathTracer<S> {
    /// Create a path tracer over `scene`, drawing Russian roulette decisions
    /// from `sampler`.
    pub fn new(scene: Scene, sampler: S, config: &ShaderConfig) -> Result<Self, ConfigError> {
        let base = ShaderBase::new(scene, config)?;
        log::debug!("samples_light = {}", base.samples_light());

        Ok(Self {
            base,
            russian_roulette: RefCell::new(sampler),
        })
    }

    /// A path tracer for another worker lane: same scene, its own samplers.
    pub fn fork<T: Sampler>(&self, sampler: T, seed: u64) -> PathTracer<T> {
        PathTracer {
            base: self.base.fork(seed),
            russian_roulette: RefCell::new(sampler),
        }
    }

    pub fn scene(&self) -> &Scene {
        self.base.scene()
    }

    fn roulette_survives(&self) -> bool {
        self.russian_roulette.borrow_mut().sample() > FINISH_PROBABILITY
    }
}

impl<S: Sampler> Shader for PathTracer<S> {
    fn base(&self) -> &ShaderBase {
        &self.base
    }

    fn shade(&self, rgb: &mut Color, hit: &Intersection<'_>) -> bool {
        let depth = hit.depth();
        if depth > RAY_DEPTH_MAX {
            return false;
        }

        let material = hit.material;
        if has_positive_value(material.le()) {
            *rgb = material.le();
            return true;
        }

        let kd = material.kd();
        let mut ld = Color::ZERO;
        let mut li_d = Color::ZERO;
        let mut intersected_light = false;

        if has_positive_value(kd) {
            ld = self.base.sample_direct_light(hit, true);

            if depth <= RAY_DEPTH_MIN || self.roulette_survives() {
                let direction = self.base.cosine_sample_hemisphere(hit.normal);
                let (li, hit_light) = self.ray_trace(&hit.spawn(direction, false));
                intersected_light = hit_light;

                // The cosine-weighted pdf cancels the cosine and 1/pi terms.
                li_d = kd * li;
                if depth > RAY_DEPTH_MIN {
                    li_d /= CONTINUE_PROBABILITY * 0.5;
                }

                // Light reached by the bounce is already counted in Ld.
                if has_positive_value(ld) && intersected_light {
                    li_d = Color::ZERO;
                }
            }
        }

        let li_s = self.reflected_radiance(hit);
        let li_t = self.transmitted_radiance(hit);

        *rgb += ld;
        *rgb += li_d;
        *rgb += li_s;
        *rgb += li_t;
        intersected_light
    }

    fn reset_sampling(&mut self) {
        self.base.reset_sampling();
        self.russian_roulette.get_mut().reset();
    }
}
