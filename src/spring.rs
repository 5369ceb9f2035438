//! Force-based linear and angular springs between lattice nodes.

use crate::float::Float;
use crate::node::Node;
use crate::vec::{Vec3, NORMALIZE_EPSILON};

/// Which neighbour class a lattice spring belongs to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SpringKind {
    /// Immediate neighbour along one axis.
    Structural,
    /// Second neighbour along one axis.
    Bend,
    /// Face diagonal in the XY, XZ or YZ plane.
    Shear,
    /// Body diagonal of a grid cell.
    Torsion,
}

/// A two-node spring with a fixed rest length.
///
/// Endpoints are indices into the owning lattice's node array.
#[derive(Clone, Debug)]
pub struct Spring<F: Float> {
    pub a: usize,
    pub b: usize,
    pub rest_length: F,
    pub stiffness: F,
    /// Saturation bound on the force magnitude.
    pub max_force: Option<F>,
    pub kind: SpringKind,
}

impl<F: Float> Spring<F> {
    pub fn new(a: usize, b: usize, rest_length: F, stiffness: F, kind: SpringKind) -> Self {
        Spring { a, b, rest_length, stiffness, max_force: None, kind }
    }

    /// Spring whose rest length is the current separation of its endpoints.
    pub fn from_nodes(a: usize, b: usize, nodes: &[Node<F>], stiffness: F, kind: SpringKind) -> Self {
        let rest_length = nodes[a].position.distance(nodes[b].position);
        Spring::new(a, b, rest_length, stiffness, kind)
    }

    pub fn with_max_force(mut self, max_force: F) -> Self {
        self.max_force = Some(max_force);
        self
    }

    /// Force this spring exerts on endpoint B; A receives the negation.
    pub fn force_between(&self, pos_a: Vec3<F>, pos_b: Vec3<F>) -> Vec3<F> {
        linear_force(pos_a, pos_b, self.rest_length, self.stiffness, self.max_force)
    }

    pub fn current_length(&self, nodes: &[Node<F>]) -> F {
        nodes[self.a].position.distance(nodes[self.b].position)
    }

    /// Accumulate equal and opposite forces on both endpoints.
    pub fn apply(&self, nodes: &mut [Node<F>]) {
        let force = self.force_between(nodes[self.a].position, nodes[self.b].position);
        nodes[self.b].apply_force(force);
        nodes[self.a].apply_force(-force);
    }
}

/// Hooke force on B for a spring from A to B, clamped to `max_force`.
///
/// Returns zero when the endpoints coincide, since no direction exists.
pub fn linear_force<F: Float>(
    pos_a: Vec3<F>,
    pos_b: Vec3<F>,
    rest_length: F,
    stiffness: F,
    max_force: Option<F>,
) -> Vec3<F> {
    let delta = pos_b - pos_a;
    let len = delta.length();
    if len.is_near_zero(F::from_f32(NORMALIZE_EPSILON)) {
        return Vec3::zero();
    }
    let mut magnitude = (rest_length - len) * stiffness;
    if let Some(limit) = max_force {
        magnitude = magnitude.clamp(-limit, limit);
    }
    delta.scale(magnitude / len)
}

/// A three-node spring holding the angle at `center` between two arms.
#[derive(Clone, Debug)]
pub struct AngleSpring<F: Float> {
    pub center: usize,
    pub arm_a: usize,
    pub arm_b: usize,
    pub target_angle: F,
    pub stiffness: F,
}

impl<F: Float> AngleSpring<F> {
    pub fn new(center: usize, arm_a: usize, arm_b: usize, target_angle: F, stiffness: F) -> Self {
        AngleSpring { center, arm_a, arm_b, target_angle, stiffness }
    }

    /// Right-angle spring, the canonical case for an orthogonal lattice.
    pub fn right_angle(center: usize, arm_a: usize, arm_b: usize, stiffness: F) -> Self {
        AngleSpring::new(center, arm_a, arm_b, F::pi() * F::half(), stiffness)
    }

    /// Current angle at the center, or `None` if an arm has collapsed.
    pub fn current_angle(&self, nodes: &[Node<F>]) -> Option<F> {
        let c = nodes[self.center].position;
        let v1 = (nodes[self.arm_a].position - c).try_normalize()?;
        let v2 = (nodes[self.arm_b].position - c).try_normalize()?;
        Some(v1.dot(v2).clamp(-F::one(), F::one()).acos())
    }

    /// Forces on (arm A, arm B). The center takes the negated sum.
    ///
    /// Each arm is pushed perpendicular to itself within the plane of the
    /// angle. Collinear or collapsed arms have no defined plane and yield
    /// no force.
    pub fn arm_forces(&self, center: Vec3<F>, arm_a: Vec3<F>, arm_b: Vec3<F>) -> Option<(Vec3<F>, Vec3<F>)> {
        let v1 = (arm_a - center).try_normalize()?;
        let v2 = (arm_b - center).try_normalize()?;
        let normal = v1.cross(v2).try_normalize()?;

        let angle = v1.dot(v2).clamp(-F::one(), F::one()).acos();
        let error = angle - self.target_angle;

        // toward_b rotates arm A toward arm B; toward_a rotates B toward A.
        let toward_b = normal.cross(v1);
        let toward_a = v2.cross(normal);

        // Too wide: close the arms. Too narrow: open them.
        let magnitude = self.stiffness * error;
        Some((toward_b.scale(magnitude), toward_a.scale(magnitude)))
    }

    pub fn apply(&self, nodes: &mut [Node<F>]) {
        let forces = self.arm_forces(
            nodes[self.center].position,
            nodes[self.arm_a].position,
            nodes[self.arm_b].position,
        );
        if let Some((fa, fb)) = forces {
            nodes[self.arm_a].apply_force(fa);
            nodes[self.arm_b].apply_force(fb);
            nodes[self.center].apply_force(-(fa + fb));
        }
    }
}
