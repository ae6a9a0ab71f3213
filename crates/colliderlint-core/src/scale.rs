//! Scale heuristics for mesh collider safety.

use glam::Vec3;

/// Tolerance for comparing scale components for uniformity.
pub const SCALE_EPSILON: f32 = 0.01;

/// Check whether a local scale distorts mesh collision geometry.
///
/// Mesh colliders are defined in local mesh space; a negative or non-uniform
/// scale on the owning transform produces hit volumes that no longer match
/// the rendered geometry. Uniform positive scale is safe; everything else is
/// flagged for manual review.
///
/// A scale of `(-1,-1,-1)` is uniform by magnitude but still flagged, since
/// the negative-component check runs first.
pub fn is_conflictive_scale(scale: Vec3) -> bool {
    let (x, y, z) = (scale.x, scale.y, scale.z);
    x < 0.0
        || y < 0.0
        || z < 0.0
        || (x - y).abs() > SCALE_EPSILON
        || (x - z).abs() > SCALE_EPSILON
        || (y - z).abs() > SCALE_EPSILON
}
