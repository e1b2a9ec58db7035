//! Shader setup options.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::accelerator::Accelerator;

/// Errors raised while validating shader configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("samples_light must be at least 1")]
    ZeroLightSamples,

    #[error("unknown accelerator: {0}")]
    UnknownAccelerator(String),

    #[error("unknown shader: {0}")]
    UnknownShader(String),

    #[error("invalid shader config: {0}")]
    Json(#[from] serde_json::Error),
}

/// The shading algorithms that can be selected at setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ShaderKind {
    /// Direct light only, no shadow probes.
    NoShadows,
    /// Deterministic direct light plus perfect reflection and refraction.
    Whitted,
    /// Monte Carlo path tracing.
    #[default]
    PathTracer,
    /// Grey level from hit distance, brighter when closer.
    DepthMap,
    /// Diffuse direct light from every light, no shadows or bounces.
    Diffuse,
}

impl ShaderKind {
    pub const ALL: [ShaderKind; 5] = [
        ShaderKind::NoShadows,
        ShaderKind::Whitted,
        ShaderKind::PathTracer,
        ShaderKind::DepthMap,
        ShaderKind::Diffuse,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShaderKind::NoShadows => "NoShadows",
            ShaderKind::Whitted => "Whitted",
            ShaderKind::PathTracer => "PathTracer",
            ShaderKind::DepthMap => "DepthMap",
            ShaderKind::Diffuse => "Diffuse",
        }
    }
}

impl fmt::Display for ShaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShaderKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnknownShader(s.to_owned()))
    }
}

/// Shader configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Which shading algorithm to build
    pub shader: ShaderKind,
    /// Light samples taken per diffuse hit
    pub samples_light: u32,
    /// Acceleration structure for scene queries
    pub accelerator: Accelerator,
    /// Seed for light choice and hemisphere sampling
    pub seed: u64,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            shader: ShaderKind::PathTracer,
            samples_light: 1,
            accelerator: Accelerator::Bvh,
            seed: 0,
        }
    }
}

impl ShaderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.samples_light == 0 {
            return Err(ConfigError::ZeroLightSamples);
        }
        Ok(())
    }

    /// Parse and validate a JSON document. Missing fields take their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
