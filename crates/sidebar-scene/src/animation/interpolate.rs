//! Interpolation for animatable endpoint values.

use super::vector::Vector3;

/// Trait for types that can be interpolated between two values.
///
/// # Arguments
/// * `to` - Target value to interpolate towards
/// * `t` - Interpolation factor (0.0 = self, 1.0 = to)
///
/// `t` is an eased progress and may leave `[0, 1]` for overshooting curves;
/// implementations extrapolate linearly in that case.
pub trait Interpolate: Sized {
    fn interpolate(&self, to: &Self, t: f32) -> Self;
}

#[inline]
fn lerp_f32(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

impl Interpolate for f32 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        lerp_f32(*self, *to, t)
    }
}

impl Interpolate for Vector3 {
    fn interpolate(&self, to: &Self, t: f32) -> Self {
        Vector3::new(
            lerp_f32(self.x, to.x, t),
            lerp_f32(self.y, to.y, t),
            lerp_f32(self.z, to.z, t),
        )
    }
}
