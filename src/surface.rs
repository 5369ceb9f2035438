//! Static collision surfaces and the penalty response against them.
//!
//! Every surface answers one question: is this point in violation, and if
//! so where is the nearest contact point, which way is out, and how deep
//! is the point? The world turns each [`Contact`] into a penalty force,
//! an imaginary zero-length spring anchored at the contact point.

use crate::error::SimError;
use crate::float::Float;
use crate::vec::{Vec3, NORMALIZE_EPSILON};

/// Result of a violated probe.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Contact<F: Float> {
    /// Closest point on the surface.
    pub point: Vec3<F>,
    /// Unit direction that leads out of the surface. Zero when undefined.
    pub normal: Vec3<F>,
    /// Distance from the probed point to `point`.
    pub depth: F,
}

impl<F: Float> Contact<F> {
    /// Penalty force for this contact.
    ///
    /// `damping` only resists motion into the surface, never separation.
    pub fn penalty_force(&self, stiffness: F, damping: F, velocity: Vec3<F>) -> Vec3<F> {
        let approach = velocity.dot(self.normal).min(F::zero());
        self.normal.scale(stiffness * self.depth - damping * approach)
    }
}

/// Half-space bounded by a plane. Points behind the normal are violating.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plane<F: Float> {
    point: Vec3<F>,
    normal: Vec3<F>,
}

impl<F: Float> Plane<F> {
    /// Plane through `point` facing `normal`. The normal is normalized.
    pub fn new(point: Vec3<F>, normal: Vec3<F>) -> Result<Self, SimError> {
        if !point.is_finite() || !normal.is_finite() {
            return Err(SimError::InvalidNormal);
        }
        let normal = normal.try_normalize().ok_or(SimError::InvalidNormal)?;
        Ok(Plane { point, normal })
    }

    pub fn point(&self) -> Vec3<F> { self.point }
    pub fn normal(&self) -> Vec3<F> { self.normal }

    pub fn signed_distance(&self, p: Vec3<F>) -> F {
        (p - self.point).dot(self.normal)
    }

    pub fn probe(&self, p: Vec3<F>) -> Option<Contact<F>> {
        let s = self.signed_distance(p);
        if s >= F::zero() {
            return None;
        }
        let point = p - self.normal.scale(s);
        Some(Contact { point, normal: self.normal, depth: p.distance(point) })
    }
}

/// Solid ball. Points strictly inside are violating.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sphere<F: Float> {
    center: Vec3<F>,
    radius: F,
}

impl<F: Float> Sphere<F> {
    pub fn new(center: Vec3<F>, radius: F) -> Result<Self, SimError> {
        if !radius.is_finite() || radius <= F::zero() || !center.is_finite() {
            return Err(SimError::InvalidRadius);
        }
        Ok(Sphere { center, radius })
    }

    pub fn center(&self) -> Vec3<F> { self.center }
    pub fn radius(&self) -> F { self.radius }

    pub fn probe(&self, p: Vec3<F>) -> Option<Contact<F>> {
        let offset = p - self.center;
        let distance = offset.length();
        if distance >= self.radius {
            return None;
        }
        // A point at the exact center has no outward direction; the zero
        // normal makes its penalty force vanish instead of going NaN.
        let normal = if distance.is_near_zero(F::from_f32(NORMALIZE_EPSILON)) {
            Vec3::zero()
        } else {
            offset.scale(F::one() / distance)
        };
        Some(Contact {
            point: self.center + normal.scale(self.radius),
            normal,
            depth: self.radius - distance,
        })
    }
}

/// Solid axis-aligned box. Points inside on all three axes are violating.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb<F: Float> {
    min: Vec3<F>,
    max: Vec3<F>,
}

impl<F: Float> Aabb<F> {
    pub fn new(min: Vec3<F>, max: Vec3<F>) -> Result<Self, SimError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SimError::InvalidBounds);
        }
        if (0..3).any(|axis| min.axis(axis) >= max.axis(axis)) {
            return Err(SimError::InvalidBounds);
        }
        Ok(Aabb { min, max })
    }

    /// Box centered on `center` with the given half extents.
    pub fn from_center(center: Vec3<F>, half_extents: Vec3<F>) -> Result<Self, SimError> {
        Aabb::new(center - half_extents, center + half_extents)
    }

    pub fn min(&self) -> Vec3<F> { self.min }
    pub fn max(&self) -> Vec3<F> { self.max }

    pub fn contains(&self, p: Vec3<F>) -> bool {
        (0..3).all(|axis| {
            let v = p.axis(axis);
            v >= self.min.axis(axis) && v <= self.max.axis(axis)
        })
    }

    /// Pushes the point out through the nearest face. Ties go to the
    /// earlier face in the order -x, +x, -y, +y, -z, +z.
    pub fn probe(&self, p: Vec3<F>) -> Option<Contact<F>> {
        if !self.contains(p) {
            return None;
        }
        let mut best_axis = 0;
        let mut best_face = self.min.x;
        let mut best_sign = -F::one();
        let mut best_depth = p.x - self.min.x;
        for axis in 0..3 {
            let v = p.axis(axis);
            let faces = [
                (self.min.axis(axis), -F::one(), v - self.min.axis(axis)),
                (self.max.axis(axis), F::one(), self.max.axis(axis) - v),
            ];
            for (face, sign, depth) in faces {
                if depth < best_depth {
                    best_axis = axis;
                    best_face = face;
                    best_sign = sign;
                    best_depth = depth;
                }
            }
        }
        Some(Contact {
            point: p.with_axis(best_axis, best_face),
            normal: Vec3::zero().with_axis(best_axis, best_sign),
            depth: best_depth,
        })
    }
}

/// Any static collision surface a world can hold.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface<F: Float> {
    Plane(Plane<F>),
    Sphere(Sphere<F>),
    Box(Aabb<F>),
}

impl<F: Float> Surface<F> {
    pub fn probe(&self, p: Vec3<F>) -> Option<Contact<F>> {
        match self {
            Surface::Plane(s) => s.probe(p),
            Surface::Sphere(s) => s.probe(p),
            Surface::Box(s) => s.probe(p),
        }
    }
}

impl<F: Float> From<Plane<F>> for Surface<F> {
    fn from(plane: Plane<F>) -> Self { Surface::Plane(plane) }
}

impl<F: Float> From<Sphere<F>> for Surface<F> {
    fn from(sphere: Sphere<F>) -> Self { Surface::Sphere(sphere) }
}

impl<F: Float> From<Aabb<F>> for Surface<F> {
    fn from(aabb: Aabb<F>) -> Self { Surface::Box(aabb) }
}
