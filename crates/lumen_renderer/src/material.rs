//! Surface materials.
//!
//! A material is a bundle of independent coefficients: diffuse `kd`,
//! specular `ks`, transmissive `kt` and emitted radiance `le`. Any subset may
//! be lit at once; the shaders evaluate each branch separately.

use crate::scene::SceneError;
use lumen_math::Vec3;

/// Color type alias (linear RGB radiance or reflectance)
pub type Color = Vec3;

/// Index of a material inside its [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub usize);

/// Validated surface description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    kd: Color,
    ks: Color,
    kt: Color,
    le: Color,
    refractive_index: f32,
}

impl Material {
    /// Create a material, rejecting negative or non-finite channels and a
    /// refractive index that is not strictly positive.
    pub fn new(
        kd: Color,
        ks: Color,
        kt: Color,
        le: Color,
        refractive_index: f32,
    ) -> Result<Self, SceneError> {
        check_channels("kd", kd)?;
        check_channels("ks", ks)?;
        check_channels("kt", kt)?;
        check_channels("le", le)?;
        if !(refractive_index.is_finite() && refractive_index > 0.0) {
            return Err(SceneError::InvalidRefractiveIndex(refractive_index));
        }

        Ok(Self {
            kd,
            ks,
            kt,
            le,
            refractive_index,
        })
    }

    /// Lambertian surface.
    pub fn diffuse(kd: Color) -> Result<Self, SceneError> {
        Self::new(kd, Color::ZERO, Color::ZERO, Color::ZERO, 1.0)
    }

    /// Perfect mirror.
    pub fn mirror(ks: Color) -> Result<Self, SceneError> {
        Self::new(Color::ZERO, ks, Color::ZERO, Color::ZERO, 1.0)
    }

    /// Perfectly transmissive surface, e.g. glass at `refractive_index` 1.5.
    pub fn transparent(kt: Color, refractive_index: f32) -> Result<Self, SceneError> {
        Self::new(Color::ZERO, Color::ZERO, kt, Color::ZERO, refractive_index)
    }

    /// Area emitter.
    pub fn emissive(le: Color) -> Result<Self, SceneError> {
        Self::new(Color::ZERO, Color::ZERO, Color::ZERO, le, 1.0)
    }

    #[inline]
    pub fn kd(&self) -> Color {
        self.kd
    }

    #[inline]
    pub fn ks(&self) -> Color {
        self.ks
    }

    #[inline]
    pub fn kt(&self) -> Color {
        self.kt
    }

    #[inline]
    pub fn le(&self) -> Color {
        self.le
    }

    #[inline]
    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }
}

/// Reject negative or non-finite RGB channels.
pub(crate) fn check_channels(field: &'static str, value: Color) -> Result<(), SceneError> {
    if value.is_finite() && value.cmpge(Color::ZERO).all() {
        Ok(())
    } else {
        Err(SceneError::InvalidChannel { field, value })
    }
}
