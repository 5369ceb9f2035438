//! Configuration for lattices and worlds.

use crate::error::SimError;
use crate::float::Float;
use crate::vec::Vec3;

/// Shape and material of one lattice.
///
/// # Builder Pattern
/// ```
/// use jiggle::config::LatticeConfig;
/// use jiggle::vec::Vec3;
///
/// let config: LatticeConfig<f32> = LatticeConfig::new()
///     .with_extents(Vec3::splat(2.5))
///     .with_resolution(4, 4, 4)
///     .with_origin(Vec3::new(0.0, 2.0, 0.0))
///     .with_stiffness(50.0)
///     .with_angle_springs(10.0);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatticeConfig<F: Float> {
    /// Size of the block along each axis. Default: 2.5 on every axis.
    pub extents: Vec3<F>,
    /// Node count along each axis, at least 2. Default: 4x4x4.
    pub resolution: (usize, usize, usize),
    /// Center of the block. Default: origin.
    pub origin: Vec3<F>,
    /// Mass of every node. Default: 1.0.
    pub node_mass: F,
    /// Structural spring stiffness. Bend springs use 0.2x, shear and
    /// torsion springs 2x. Default: 50.0.
    pub stiffness: F,
    /// Saturation bound on any spring's force magnitude. Default: 40.0.
    pub max_force: F,
    /// Linear drag applied as `-damping * velocity`. Default: 2.0.
    pub damping: F,
    /// Right-angle springs along the lattice axes. Default: off.
    pub angle_springs: bool,
    /// Stiffness of the angle springs when enabled. Default: 10.0.
    pub angle_stiffness: F,
    /// Impulse handed to the center of a disturbed block. Default: 6.0.
    pub disturb_impulse: F,
    /// Seed for the disturb direction. Default: 0.
    pub seed: u64,
}

impl<F: Float> LatticeConfig<F> {
    /// Create a new config with default values.
    pub fn new() -> Self {
        LatticeConfig {
            extents: Vec3::splat(F::from_f32(2.5)),
            resolution: (4, 4, 4),
            origin: Vec3::zero(),
            node_mass: F::one(),
            stiffness: F::from_f32(50.0),
            max_force: F::from_f32(40.0),
            damping: F::two(),
            angle_springs: false,
            angle_stiffness: F::from_f32(10.0),
            disturb_impulse: F::from_f32(6.0),
            seed: 0,
        }
    }

    pub fn with_extents(mut self, extents: Vec3<F>) -> Self {
        self.extents = extents;
        self
    }

    pub fn with_resolution(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.resolution = (nx, ny, nz);
        self
    }

    pub fn with_origin(mut self, origin: Vec3<F>) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_node_mass(mut self, mass: F) -> Self {
        self.node_mass = mass;
        self
    }

    pub fn with_stiffness(mut self, stiffness: F) -> Self {
        self.stiffness = stiffness;
        self
    }

    pub fn with_max_force(mut self, max_force: F) -> Self {
        self.max_force = max_force;
        self
    }

    pub fn with_damping(mut self, damping: F) -> Self {
        self.damping = damping;
        self
    }

    /// Enable right-angle springs with the given stiffness.
    pub fn with_angle_springs(mut self, stiffness: F) -> Self {
        self.angle_springs = true;
        self.angle_stiffness = stiffness;
        self
    }

    pub fn with_disturb_impulse(mut self, impulse: F) -> Self {
        self.disturb_impulse = impulse;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Grid spacing along each axis.
    pub fn spacing(&self) -> Vec3<F> {
        let (nx, ny, nz) = self.resolution;
        Vec3::new(
            self.extents.x / F::from_usize(nx.saturating_sub(1).max(1)),
            self.extents.y / F::from_usize(ny.saturating_sub(1).max(1)),
            self.extents.z / F::from_usize(nz.saturating_sub(1).max(1)),
        )
    }

    /// Check every field a lattice build depends on.
    pub fn validate(&self) -> Result<(), SimError> {
        let (nx, ny, nz) = self.resolution;
        for (axis, value) in [('x', nx), ('y', ny), ('z', nz)] {
            if value < 2 {
                return Err(SimError::InvalidResolution { axis, value });
            }
        }
        if !self.extents.is_finite()
            || (0..3).any(|axis| self.extents.axis(axis) <= F::zero())
            || !self.origin.is_finite()
        {
            return Err(SimError::InvalidExtent);
        }
        if !self.node_mass.is_finite() || self.node_mass <= F::zero() {
            return Err(SimError::InvalidMass);
        }
        if !self.stiffness.is_finite() || self.stiffness <= F::zero() {
            return Err(SimError::InvalidStiffness);
        }
        if self.angle_springs
            && (!self.angle_stiffness.is_finite() || self.angle_stiffness <= F::zero())
        {
            return Err(SimError::InvalidStiffness);
        }
        if !(self.max_force > F::zero()) {
            return Err(SimError::InvalidForceLimit);
        }
        if !self.damping.is_finite() || self.damping < F::zero() {
            return Err(SimError::InvalidDamping);
        }
        Ok(())
    }
}

impl<F: Float> Default for LatticeConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Global forces and contact response shared by every body in a world.
///
/// Collision stiffness is tuned against the sub-step count: changing
/// `sub_steps` changes the effective timestep and may need a retune.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldConfig<F: Float> {
    /// Gravity acceleration. Default: (0, -9.8, 0).
    pub gravity: Vec3<F>,
    /// Wind acceleration. Default: zero.
    pub wind: Vec3<F>,
    /// Penalty stiffness per unit of penetration. Default: 1000.0.
    pub collision_stiffness: F,
    /// Resistance to velocity into a surface. Default: 20.0.
    pub collision_damping: F,
    /// Number of physics steps per [`World::advance`](crate::world::World::advance)
    /// call. Default: 10.
    pub sub_steps: usize,
}

impl<F: Float> WorldConfig<F> {
    pub fn new() -> Self {
        WorldConfig {
            gravity: Vec3::new(F::zero(), F::from_f64(-9.8), F::zero()),
            wind: Vec3::zero(),
            collision_stiffness: F::from_f32(1000.0),
            collision_damping: F::from_f32(20.0),
            sub_steps: 10,
        }
    }

    pub fn with_gravity(mut self, gravity: Vec3<F>) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_wind(mut self, wind: Vec3<F>) -> Self {
        self.wind = wind;
        self
    }

    pub fn with_collision_stiffness(mut self, stiffness: F) -> Self {
        self.collision_stiffness = stiffness;
        self
    }

    pub fn with_collision_damping(mut self, damping: F) -> Self {
        self.collision_damping = damping;
        self
    }

    pub fn with_sub_steps(mut self, sub_steps: usize) -> Self {
        self.sub_steps = sub_steps.max(1);
        self
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.collision_stiffness.is_finite() || self.collision_stiffness < F::zero() {
            return Err(SimError::InvalidStiffness);
        }
        if !self.collision_damping.is_finite() || self.collision_damping < F::zero() {
            return Err(SimError::InvalidDamping);
        }
        Ok(())
    }
}

impl<F: Float> Default for WorldConfig<F> {
    fn default() -> Self {
        Self::new()
    }
}
