//! Three-component value used as the endpoint of every driver.
//!
//! A `Vector3` carries either a position offset (`x`, `y`, `z`) or, for
//! transparency drivers, an opacity in `z`. Scale drivers read `x`.

use serde::{Deserialize, Serialize};

/// Immutable 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vector3 {
    pub const ZERO: Vector3 = Vector3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// A 2D offset (`z = 0`).
    pub const fn offset(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// An opacity endpoint for `AnimatableProperty::Transparent`.
    pub const fn alpha(alpha: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: alpha,
        }
    }

    /// A uniform scale endpoint for `AnimatableProperty::Scale`.
    pub const fn scale(scale: f32) -> Self {
        Self {
            x: scale,
            y: scale,
            z: scale,
        }
    }

    /// Component-wise minimum.
    pub fn min(self, other: Self) -> Self {
        Self::new(self.x.min(other.x), self.y.min(other.y), self.z.min(other.z))
    }

    /// Component-wise maximum.
    pub fn max(self, other: Self) -> Self {
        Self::new(self.x.max(other.x), self.y.max(other.y), self.z.max(other.z))
    }

    /// Check if two vectors are approximately equal.
    pub fn approx_eq(&self, other: &Self, epsilon: f32) -> bool {
        (self.x - other.x).abs() < epsilon
            && (self.y - other.y).abs() < epsilon
            && (self.z - other.z).abs() < epsilon
    }
}

impl From<(f32, f32, f32)> for Vector3 {
    fn from((x, y, z): (f32, f32, f32)) -> Self {
        Self::new(x, y, z)
    }
}
