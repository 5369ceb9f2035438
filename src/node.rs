//! Point masses integrated with semi-implicit Euler.

use crate::float::Float;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// A point mass in a lattice.
///
/// `force` is only meaningful inside one step: it is zeroed at the start of
/// every step, accumulated by the force phases and consumed by
/// [`Node::integrate`].
#[derive(Clone, Debug)]
pub struct Node<F: Float> {
    pub position: Vec3<F>,
    pub velocity: Vec3<F>,
    pub force: Vec3<F>,
    mass: F,
    inv_mass: F,
    /// Indices of incident linear springs in the owning lattice.
    pub springs: AllocVec<usize>,
    /// Indices of angle springs centered on or touching this node.
    pub angle_springs: AllocVec<usize>,
}

impl<F: Float> Node<F> {
    /// Create a node at rest. `mass` is validated by the lattice builder.
    pub fn new(position: Vec3<F>, mass: F) -> Self {
        Node {
            position,
            velocity: Vec3::zero(),
            force: Vec3::zero(),
            mass,
            inv_mass: F::one() / mass,
            springs: AllocVec::new(),
            angle_springs: AllocVec::new(),
        }
    }

    pub fn mass(&self) -> F { self.mass }
    pub fn inv_mass(&self) -> F { self.inv_mass }

    pub fn reset_force(&mut self) {
        self.force = Vec3::zero();
    }

    pub fn apply_force(&mut self, force: Vec3<F>) {
        self.force += force;
    }

    /// Add a force that produces `accel` on this node.
    pub fn apply_acceleration(&mut self, accel: Vec3<F>) {
        self.force += accel.scale(self.mass);
    }

    /// Change velocity directly, as an impulse of `impulse` would.
    pub fn apply_impulse(&mut self, impulse: Vec3<F>) {
        self.velocity += impulse.scale(self.inv_mass);
    }

    /// Semi-implicit Euler: velocity from the current force, then position
    /// from the new velocity.
    pub fn integrate(&mut self, dt: F) {
        self.velocity += self.force.scale(self.inv_mass * dt);
        self.position += self.velocity.scale(dt);
    }

    pub fn momentum(&self) -> Vec3<F> {
        self.velocity.scale(self.mass)
    }

    /// Put the node back at `position` with no motion.
    pub fn place(&mut self, position: Vec3<F>) {
        self.position = position;
        self.velocity = Vec3::zero();
        self.force = Vec3::zero();
    }
}
