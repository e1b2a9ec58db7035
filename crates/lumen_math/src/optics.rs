//! Vector helpers for shading: mirror reflection, Snell refraction and the
//! "any channel lit" test used to gate material branches.

use crate::Vec3;

/// Reflect `incident` about `normal`.
#[inline]
pub fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * incident.dot(normal) * normal
}

/// Refract `incident` through a surface with the given `normal` and ratio of
/// refractive indices `eta` (incoming over outgoing).
///
/// Both vectors must be unit length. Returns `None` on total internal
/// reflection.
#[inline]
pub fn refract(incident: Vec3, normal: Vec3, eta: f32) -> Option<Vec3> {
    let cos_i = normal.dot(incident);
    let k = 1.0 - eta * eta * (1.0 - cos_i * cos_i);
    if k < 0.0 {
        return None;
    }
    Some(eta * incident - (eta * cos_i + k.sqrt()) * normal)
}

/// Returns true if any channel of an RGB value is strictly positive.
#[inline]
pub fn has_positive_value(rgb: Vec3) -> bool {
    rgb.cmpgt(Vec3::ZERO).any()
}
