// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod aabb;
mod interval;
mod optics;

pub use aabb::Aabb;
pub use interval::Interval;
pub use optics::{has_positive_value, reflect, refract};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_componentwise_product() {
        let kd = Vec3::new(0.5, 0.25, 1.0);
        let radiance = Vec3::new(2.0, 4.0, 3.0);
        assert_eq!(kd * radiance, Vec3::new(1.0, 1.0, 3.0));
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
    }
}
