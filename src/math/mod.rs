pub type Vec3 = na::Vector3<f64>;

/// below this, two positions are considered the same point
pub const POSITION_EPSILON: f64 = 1e-9;

/// linear interpolation between `a` and `b`, `t` isn't clamped
pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    a + (b - a) * t
}
