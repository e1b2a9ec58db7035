//! Lumen renderer - CPU path tracing shading core
//!
//! Given a ray-scene intersection, estimates the radiance travelling back
//! along the ray: Monte Carlo path tracing with direct light sampling,
//! cosine-weighted diffuse bounces, Russian roulette and perfect specular
//! reflection and transmission. Whitted, shadowless direct-light, plain
//! diffuse and depth-map shaders share the same interface.
//!
//! The render loop driving the shaders (cameras, pixel accumulation, image
//! output) lives outside this crate.

mod accelerator;
mod bvh;
mod config;
mod depth_map;
mod diffuse;
mod grid;
mod hittable;
mod intersection;
mod light;
mod material;
mod no_shadows;
mod path_tracer;
mod plane;
mod ray;
mod sampler;
mod scene;
mod shader;
mod sphere;
mod triangle;
mod whitted;

pub use accelerator::{Accelerator, Primitives};
pub use bvh::Bvh;
pub use config::{ConfigError, ShaderConfig, ShaderKind};
pub use depth_map::DepthMap;
pub use diffuse::Diffuse;
pub use grid::RegularGrid;
pub use hittable::{HitRecord, Hittable, PrimitiveId};
pub use intersection::Intersection;
pub use light::Light;
pub use material::{Color, Material, MaterialId};
pub use no_shadows::NoShadows;
pub use path_tracer::PathTracer;
pub use plane::Plane;
pub use ray::{Ray, EPSILON, RAY_DEPTH_MAX, RAY_DEPTH_MIN};
pub use sampler::{ConstantSampler, HaltonSampler, RandomSampler, Sampler};
pub use scene::{Scene, SceneError};
pub use shader::{Shader, ShaderBase, ShaderVariant};
pub use sphere::Sphere;
pub use triangle::Triangle;
pub use whitted::Whitted;

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Aabb, Interval, Vec3};
