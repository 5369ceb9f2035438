//! Floating-point abstraction so the kernel runs on `f32` or `f64`.

use core::cmp::PartialOrd;
use core::ops::{Add, Div, Mul, Neg, Sub};

/// Scalar operations needed by the lattice kernel.
///
/// Implemented for `f32` and `f64` on top of `libm`, so the crate stays
/// `no_std`.
pub trait Float:
    Copy
    + Clone
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + Default
    + core::fmt::Debug
{
    /// The additive identity (0.0).
    fn zero() -> Self;
    /// The multiplicative identity (1.0).
    fn one() -> Self;
    /// Half (0.5).
    fn half() -> Self;
    /// Two (2.0).
    fn two() -> Self;
    /// Pi (~3.14159).
    fn pi() -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
    /// Sine.
    fn sin(self) -> Self;
    /// Cosine.
    fn cos(self) -> Self;
    /// Arc cosine. Input outside [-1, 1] yields NaN, so clamp first.
    fn acos(self) -> Self;
    /// Absolute value.
    fn abs(self) -> Self;
    /// Minimum of two values.
    fn min(self, other: Self) -> Self;
    /// Maximum of two values.
    fn max(self, other: Self) -> Self;
    /// Neither NaN nor infinite.
    fn is_finite(self) -> bool;
    /// Convert from f32 (for constants and configuration).
    fn from_f32(v: f32) -> Self;
    /// Convert from f64. Use for fractional constants so `f64` callers get
    /// the exact literal.
    fn from_f64(v: f64) -> Self;

    /// Convert a grid index or count.
    fn from_usize(v: usize) -> Self {
        Self::from_f32(v as f32)
    }

    /// Clamp self to [min, max].
    fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }

    /// Check if approximately zero within epsilon.
    fn is_near_zero(self, epsilon: Self) -> bool {
        self.abs() < epsilon
    }
}

impl Float for f32 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f32::consts::PI }
    fn sqrt(self) -> Self { libm::sqrtf(self) }
    fn sin(self) -> Self { libm::sinf(self) }
    fn cos(self) -> Self { libm::cosf(self) }
    fn acos(self) -> Self { libm::acosf(self) }
    fn abs(self) -> Self { libm::fabsf(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn is_finite(self) -> bool { f32::is_finite(self) }
    fn from_f32(v: f32) -> Self { v }
    fn from_f64(v: f64) -> Self { v as f32 }
}

impl Float for f64 {
    fn zero() -> Self { 0.0 }
    fn one() -> Self { 1.0 }
    fn half() -> Self { 0.5 }
    fn two() -> Self { 2.0 }
    fn pi() -> Self { core::f64::consts::PI }
    fn sqrt(self) -> Self { libm::sqrt(self) }
    fn sin(self) -> Self { libm::sin(self) }
    fn cos(self) -> Self { libm::cos(self) }
    fn acos(self) -> Self { libm::acos(self) }
    fn abs(self) -> Self { libm::fabs(self) }
    fn min(self, other: Self) -> Self { if self < other { self } else { other } }
    fn max(self, other: Self) -> Self { if self > other { self } else { other } }
    fn is_finite(self) -> bool { f64::is_finite(self) }
    fn from_f32(v: f32) -> Self { v as f64 }
    fn from_f64(v: f64) -> Self { v }
    fn from_usize(v: usize) -> Self { v as f64 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acos_of_zero_is_right_angle() {
        let a = 0.0f64.acos();
        assert!((a - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(5.0f32.clamp(-4.0, 4.0), 4.0);
        assert_eq!((-5.0f32).clamp(-4.0, 4.0), -4.0);
        assert_eq!(1.5f32.clamp(-4.0, 4.0), 1.5);
    }

    #[test]
    fn fractional_constants_are_exact_in_f64() {
        assert_eq!(<f64 as Float>::from_f64(0.2), 0.2);
        assert_eq!(<f64 as Float>::from_f64(-9.8), -9.8);
        assert_eq!(<f32 as Float>::from_f64(0.2), 0.2f32);
    }

    #[test]
    fn non_finite_detected() {
        assert!(!f32::NAN.is_finite());
        assert!(!<f64 as Float>::is_finite(f64::INFINITY));
        assert!(<f32 as Float>::is_finite(1.0));
    }
}
