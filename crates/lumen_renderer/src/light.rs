//! Point lights sampled for direct illumination.

use crate::material::{check_channels, Color};
use crate::scene::SceneError;
use lumen_math::Vec3;

/// A point light with a position and constant radiance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    position: Vec3,
    radiance: Color,
}

impl Light {
    /// Create a new light. Radiance channels must be finite and nonnegative.
    pub fn new(position: Vec3, radiance: Color) -> Result<Self, SceneError> {
        if !position.is_finite() {
            return Err(SceneError::InvalidLightPosition(position));
        }
        check_channels("radiance", radiance)?;
        Ok(Self { position, radiance })
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn radiance(&self) -> Color {
        self.radiance
    }

    /// Unit direction from `point` towards the light and the distance
    /// between them.
    #[inline]
    pub fn direction_from(&self, point: Vec3) -> (Vec3, f32) {
        let to_light = self.position - point;
        let distance = to_light.length();
        (to_light / distance, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from() {
        let light = Light::new(Vec3::new(0.0, 3.0, 4.0), Color::ONE).unwrap();
        let (direction, distance) = light.direction_from(Vec3::ZERO);

        assert!((distance - 5.0).abs() < 1e-6);
        assert!(direction.abs_diff_eq(Vec3::new(0.0, 0.6, 0.8), 1e-6));
    }

    #[test]
    fn test_light_validation() {
        assert!(Light::new(Vec3::ZERO, Color::new(1.0, -1.0, 1.0)).is_err());
        assert!(matches!(
            Light::new(Vec3::new(0.0, f32::INFINITY, 0.0), Color::ONE),
            Err(SceneError::InvalidLightPosition(_))
        ));
    }
}
