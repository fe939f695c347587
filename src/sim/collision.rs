//! Contact tests between ship, projectiles, hazards and pickups
//!
//! Every test is two-stage: a cheap one-axis depth gate first, then the
//! full 3D distance only for candidates that pass it.

use glam::Vec3;

/// True if `a` and `b` are within `window` of each other along z
#[inline]
pub fn depth_gate(a: Vec3, b: Vec3, window: f32) -> bool {
    (a.z - b.z).abs() < window
}

/// True if the points are strictly closer than `radius`
#[inline]
pub fn within_radius(a: Vec3, b: Vec3, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}

/// Depth gate followed by a sphere test
#[inline]
pub fn gated_contact(a: Vec3, b: Vec3, window: f32, radius: f32) -> bool {
    depth_gate(a, b, window) && within_radius(a, b, radius)
}

/// Radius a projectile must get within to hit a hazard of `scale`
///
/// Scales with the hazard, unlike the fixed ship contact radius.
#[inline]
pub fn hazard_hit_radius(scale: f32, base_radius: f32, margin: f32) -> f32 {
    base_radius * scale + margin
}
