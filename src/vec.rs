//! Three-component vector used for positions, velocities and forces.

use crate::float::Float;
use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// Lengths below this are treated as degenerate when normalizing.
pub const NORMALIZE_EPSILON: f32 = 1e-10;

/// 3D vector over a [`Float`] scalar.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3<F: Float> {
    pub x: F,
    pub y: F,
    pub z: F,
}

impl<F: Float> Vec3<F> {
    /// Create a new 3D vector.
    pub fn new(x: F, y: F, z: F) -> Self { Vec3 { x, y, z } }

    /// Zero vector.
    pub fn zero() -> Self { Vec3 { x: F::zero(), y: F::zero(), z: F::zero() } }

    /// Vector with all components set to the same value.
    pub fn splat(value: F) -> Self { Vec3 { x: value, y: value, z: value } }

    /// Unit vector along +X.
    pub fn unit_x() -> Self { Vec3::new(F::one(), F::zero(), F::zero()) }

    /// Unit vector along +Y.
    pub fn unit_y() -> Self { Vec3::new(F::zero(), F::one(), F::zero()) }

    /// Unit vector along +Z.
    pub fn unit_z() -> Self { Vec3::new(F::zero(), F::zero(), F::one()) }

    pub fn dot(self, other: Self) -> F {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Vec3 {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn scale(self, s: F) -> Self {
        Vec3 { x: self.x * s, y: self.y * s, z: self.z * s }
    }

    pub fn length_sq(self) -> F {
        self.dot(self)
    }

    pub fn length(self) -> F {
        self.length_sq().sqrt()
    }

    /// Normalize to unit length. Returns the zero vector if the length is
    /// near zero, so coincident points never produce NaN.
    pub fn normalize(self) -> Self {
        self.try_normalize().unwrap_or_else(Self::zero)
    }

    /// Normalize to unit length, or `None` if the length is near zero.
    pub fn try_normalize(self) -> Option<Self> {
        let len = self.length();
        if len.is_near_zero(F::from_f32(NORMALIZE_EPSILON)) {
            None
        } else {
            Some(self.scale(F::one() / len))
        }
    }

    pub fn distance(self, other: Self) -> F {
        (self - other).length()
    }

    pub fn distance_sq(self, other: Self) -> F {
        (self - other).length_sq()
    }

    /// Component by axis index (0 = x, 1 = y, 2 = z).
    pub fn axis(self, axis: usize) -> F {
        match axis {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Copy of `self` with one axis replaced.
    pub fn with_axis(mut self, axis: usize, value: F) -> Self {
        match axis {
            0 => self.x = value,
            1 => self.y = value,
            _ => self.z = value,
        }
        self
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl<F: Float> Add for Vec3<F> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3 { x: self.x + rhs.x, y: self.y + rhs.y, z: self.z + rhs.z }
    }
}

impl<F: Float> AddAssign for Vec3<F> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<F: Float> Sub for Vec3<F> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3 { x: self.x - rhs.x, y: self.y - rhs.y, z: self.z - rhs.z }
    }
}

impl<F: Float> SubAssign for Vec3<F> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<F: Float> Neg for Vec3<F> {
    type Output = Self;
    fn neg(self) -> Self { Vec3 { x: -self.x, y: -self.y, z: -self.z } }
}

impl<F: Float> Mul<F> for Vec3<F> {
    type Output = Self;
    fn mul(self, s: F) -> Self { self.scale(s) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec3_length() {
        let v = Vec3::new(3.0f32, 4.0, 12.0);
        assert!((v.length() - 13.0).abs() < 1e-6);
    }

    #[test]
    fn vec3_cross() {
        let k = Vec3::<f32>::unit_x().cross(Vec3::unit_y());
        assert!((k.x - 0.0).abs() < 1e-6);
        assert!((k.y - 0.0).abs() < 1e-6);
        assert!((k.z - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_zero_vector() {
        let n = Vec3::<f32>::zero().normalize();
        assert_eq!(n, Vec3::zero());
        assert!(Vec3::<f64>::zero().try_normalize().is_none());
    }

    #[test]
    fn axis_access_round_trips() {
        let v = Vec3::new(1.0f32, 2.0, 3.0).with_axis(1, 7.0);
        assert_eq!(v.axis(0), 1.0);
        assert_eq!(v.axis(1), 7.0);
        assert_eq!(v.axis(2), 3.0);
    }

    #[test]
    fn distance_calculation() {
        let a = Vec3::new(1.0f32, 1.0, 1.0);
        let b = Vec3::new(4.0f32, 5.0, 1.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }
}
