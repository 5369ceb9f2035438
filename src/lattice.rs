//! Volumetric mass-spring lattice (a block of jelly).
//!
//! Nodes sit on a regular `nx * ny * nz` grid and are tied together by four
//! classes of linear springs plus optional right-angle springs:
//!
//! - Structural: ±1 along each axis (rest = axis spacing)
//! - Bend: ±2 along each axis, resisting folds (0.2x stiffness)
//! - Shear: face diagonals in XY, XZ and YZ (2x stiffness)
//! - Torsion: body diagonals of each cell (2x stiffness)
//!
//! Springs only join nodes that both exist; boundary nodes simply have
//! fewer of them.

use crate::config::LatticeConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::mesh::SurfaceMesh;
use crate::node::Node;
use crate::spring::{AngleSpring, Spring, SpringKind};
use crate::surface::Surface;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

type Offset = (isize, isize, isize);

/// One representative per unordered neighbour pair, so each spring is
/// created exactly once.
const STRUCTURAL: [Offset; 3] = [(1, 0, 0), (0, 1, 0), (0, 0, 1)];
const BEND: [Offset; 3] = [(2, 0, 0), (0, 2, 0), (0, 0, 2)];
const SHEAR: [Offset; 6] = [
    (1, 1, 0), (1, -1, 0), // XY
    (1, 0, 1), (1, 0, -1), // XZ
    (0, 1, 1), (0, 1, -1), // YZ
];
const TORSION: [Offset; 4] = [(1, 1, 1), (1, 1, -1), (1, -1, 1), (1, -1, -1)];

const NEG_X: Offset = (-1, 0, 0);
const POS_X: Offset = (1, 0, 0);
const NEG_Y: Offset = (0, -1, 0);
const POS_Y: Offset = (0, 1, 0);
const NEG_Z: Offset = (0, 0, -1);
const POS_Z: Offset = (0, 0, 1);

/// Walks around each axis plane; consecutive entries form a right angle.
const ANGLE_PATHS: [[Offset; 4]; 3] = [
    [NEG_X, POS_Y, POS_X, NEG_Y],
    [NEG_X, POS_Z, POS_X, NEG_Z],
    [NEG_Z, POS_Y, POS_Z, NEG_Y],
];

/// A soft body made of a dense 3D grid of nodes and the springs between them.
#[derive(Clone, Debug)]
pub struct Lattice<F: Float> {
    nodes: AllocVec<Node<F>>,
    springs: AllocVec<Spring<F>>,
    angle_springs: AllocVec<AngleSpring<F>>,
    rest_pose: AllocVec<Vec3<F>>,
    nx: usize,
    ny: usize,
    nz: usize,
    spacing: Vec3<F>,
    damping: F,
    disturb_impulse: F,
    mesh: SurfaceMesh,
    rng: SmallRng,
}

impl<F: Float> Lattice<F> {
    /// Build a lattice centered on `config.origin`.
    ///
    /// Node `(i, j, k)` has flat index `(i * ny + j) * nz + k`, which is also
    /// the order of [`Lattice::positions`]. Invalid configurations are
    /// rejected before any node is created.
    pub fn new(config: &LatticeConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        let (nx, ny, nz) = config.resolution;
        let spacing = config.spacing();
        let start = config.origin - config.extents.scale(F::half());

        let mut nodes = AllocVec::with_capacity(nx * ny * nz);
        for i in 0..nx {
            for j in 0..ny {
                for k in 0..nz {
                    let pos = Vec3::new(
                        start.x + F::from_usize(i) * spacing.x,
                        start.y + F::from_usize(j) * spacing.y,
                        start.z + F::from_usize(k) * spacing.z,
                    );
                    nodes.push(Node::new(pos, config.node_mass));
                }
            }
        }
        let rest_pose = nodes.iter().map(|n| n.position).collect();

        let mut lattice = Lattice {
            nodes,
            springs: AllocVec::new(),
            angle_springs: AllocVec::new(),
            rest_pose,
            nx,
            ny,
            nz,
            spacing,
            damping: config.damping,
            disturb_impulse: config.disturb_impulse,
            mesh: SurfaceMesh::new(nx, ny, nz),
            rng: SmallRng::seed_from_u64(config.seed),
        };

        let k = config.stiffness;
        let classes: [(&[Offset], F, SpringKind); 4] = [
            (&STRUCTURAL, k, SpringKind::Structural),
            (&BEND, k * F::from_f64(0.2), SpringKind::Bend),
            (&SHEAR, k * F::two(), SpringKind::Shear),
            (&TORSION, k * F::two(), SpringKind::Torsion),
        ];
        for (offsets, stiffness, kind) in classes {
            lattice.connect(offsets, stiffness, config.max_force, kind);
        }
        if config.angle_springs {
            lattice.connect_angles(config.angle_stiffness);
        }

        log::debug!(
            "built {}x{}x{} lattice: {} nodes, {} springs, {} angle springs",
            nx,
            ny,
            nz,
            lattice.nodes.len(),
            lattice.springs.len(),
            lattice.angle_springs.len(),
        );
        Ok(lattice)
    }

    fn connect(&mut self, offsets: &[Offset], stiffness: F, max_force: F, kind: SpringKind) {
        for a in 0..self.nodes.len() {
            for &offset in offsets {
                if let Some(b) = self.neighbor(a, offset) {
                    let spring = Spring::from_nodes(a, b, &self.nodes, stiffness, kind)
                        .with_max_force(max_force);
                    self.push_spring(spring);
                }
            }
        }
    }

    fn connect_angles(&mut self, stiffness: F) {
        for center in 0..self.nodes.len() {
            for path in &ANGLE_PATHS {
                for pair in path.windows(2) {
                    let arms = (self.neighbor(center, pair[0]), self.neighbor(center, pair[1]));
                    if let (Some(arm_a), Some(arm_b)) = arms {
                        let idx = self.angle_springs.len();
                        self.angle_springs
                            .push(AngleSpring::right_angle(center, arm_a, arm_b, stiffness));
                        for n in [center, arm_a, arm_b] {
                            self.nodes[n].angle_springs.push(idx);
                        }
                    }
                }
            }
        }
    }

    fn push_spring(&mut self, spring: Spring<F>) {
        let idx = self.springs.len();
        self.nodes[spring.a].springs.push(idx);
        self.nodes[spring.b].springs.push(idx);
        self.springs.push(spring);
    }

    // ---- indexing ----

    /// Flat index of node `(i, j, k)`. Panics if out of range.
    pub fn index(&self, i: usize, j: usize, k: usize) -> usize {
        assert!(i < self.nx && j < self.ny && k < self.nz, "node ({}, {}, {}) out of range", i, j, k);
        (i * self.ny + j) * self.nz + k
    }

    /// Grid coordinates of a flat index.
    pub fn coords(&self, index: usize) -> (usize, usize, usize) {
        let k = index % self.nz;
        let j = (index / self.nz) % self.ny;
        let i = index / (self.ny * self.nz);
        (i, j, k)
    }

    /// Node at `offset` grid steps from `index`, if it exists.
    pub fn neighbor(&self, index: usize, offset: (isize, isize, isize)) -> Option<usize> {
        let (i, j, k) = self.coords(index);
        let i = i.checked_add_signed(offset.0).filter(|&v| v < self.nx)?;
        let j = j.checked_add_signed(offset.1).filter(|&v| v < self.ny)?;
        let k = k.checked_add_signed(offset.2).filter(|&v| v < self.nz)?;
        Some((i * self.ny + j) * self.nz + k)
    }

    /// Nodes on one boundary face, ordered by the two remaining axes
    /// (outer loop on the lower axis). Panics if `axis` is not 0, 1 or 2.
    pub fn face_nodes(&self, axis: usize, max_side: bool) -> AllocVec<usize> {
        assert!(axis < 3, "axis {} out of range", axis);
        let dims = [self.nx, self.ny, self.nz];
        let fixed = if max_side { dims[axis] - 1 } else { 0 };
        let (u_axis, v_axis) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        let mut out = AllocVec::with_capacity(dims[u_axis] * dims[v_axis]);
        for u in 0..dims[u_axis] {
            for v in 0..dims[v_axis] {
                let mut ijk = [0usize; 3];
                ijk[axis] = fixed;
                ijk[u_axis] = u;
                ijk[v_axis] = v;
                out.push(self.index(ijk[0], ijk[1], ijk[2]));
            }
        }
        out
    }

    // ---- per-step phases ----

    /// Zero every node's accumulated force.
    pub fn reset_forces(&mut self) {
        for n in self.nodes.iter_mut() {
            n.reset_force();
        }
    }

    /// Add `accel * mass` and linear drag to every node.
    pub fn apply_external(&mut self, accel: Vec3<F>) {
        let damping = self.damping;
        for n in self.nodes.iter_mut() {
            n.apply_acceleration(accel);
            let drag = n.velocity.scale(-damping);
            n.apply_force(drag);
        }
    }

    /// Add the same force to every node.
    pub fn apply_force(&mut self, force: Vec3<F>) {
        for n in self.nodes.iter_mut() {
            n.apply_force(force);
        }
    }

    /// Accumulate every linear and angle spring, in build order.
    pub fn apply_spring_forces(&mut self) {
        for s in self.springs.iter() {
            s.apply(&mut self.nodes);
        }
        for s in self.angle_springs.iter() {
            s.apply(&mut self.nodes);
        }
    }

    /// Probe every node against every surface and add penalty forces.
    /// Returns the number of violated contacts.
    pub fn resolve_collisions(&mut self, surfaces: &[Surface<F>], stiffness: F, damping: F) -> usize {
        let mut contacts = 0;
        for n in self.nodes.iter_mut() {
            for surface in surfaces {
                if let Some(contact) = surface.probe(n.position) {
                    let force = contact.penalty_force(stiffness, damping, n.velocity);
                    n.apply_force(force);
                    contacts += 1;
                }
            }
        }
        contacts
    }

    pub fn integrate(&mut self, dt: F) {
        for n in self.nodes.iter_mut() {
            n.integrate(dt);
        }
    }

    // ---- commands ----

    /// Restore the rest pose and stop all motion.
    pub fn reset(&mut self) {
        for (n, &pos) in self.nodes.iter_mut().zip(self.rest_pose.iter()) {
            n.place(pos);
        }
        log::debug!("lattice reset to rest pose");
    }

    /// Shove the middle of the block in a random direction drawn from the
    /// lattice's own seeded generator.
    pub fn disturb(&mut self) {
        let direction = random_direction(&mut self.rng);
        self.disturb_along(direction);
    }

    /// Like [`Lattice::disturb`], drawing the direction from `rng`.
    pub fn disturb_with<R: Rng>(&mut self, rng: &mut R) {
        let direction = random_direction(rng);
        self.disturb_along(direction);
    }

    /// Apply an impulse along `direction` to the central sub-block.
    ///
    /// The block spans `[n/4, n-1-n/4]` on each axis. The weight falls off
    /// linearly from the block center to zero one cell past the block's
    /// outermost nodes, then is rescaled so the node(s) nearest the center
    /// get the full `disturb_impulse`. On even grids the center lies between
    /// nodes, so several nodes share the peak.
    pub fn disturb_along(&mut self, direction: Vec3<F>) {
        let direction = direction.normalize();
        let dims = [self.nx, self.ny, self.nz];
        let lo = dims.map(|n| n / 4);
        let hi = dims.map(|n| n - 1 - n / 4);
        let center: [F; 3] = core::array::from_fn(|a| F::from_usize(lo[a] + hi[a]) * F::half());
        let reach: [F; 3] =
            core::array::from_fn(|a| F::from_usize(hi[a] - lo[a]) * F::half() + F::one());

        let mut weighted = AllocVec::new();
        for i in lo[0]..=hi[0] {
            for j in lo[1]..=hi[1] {
                for k in lo[2]..=hi[2] {
                    let ijk = [i, j, k];
                    let mut dist_sq = F::zero();
                    for a in 0..3 {
                        let d = (F::from_usize(ijk[a]) - center[a]) / reach[a];
                        dist_sq = dist_sq + d * d;
                    }
                    let weight = (F::one() - dist_sq.sqrt()).max(F::zero());
                    if weight > F::zero() {
                        weighted.push(((i * self.ny + j) * self.nz + k, weight));
                    }
                }
            }
        }

        let peak = weighted.iter().fold(F::zero(), |m, &(_, w)| m.max(w));
        if peak <= F::zero() {
            return;
        }
        let touched = weighted.len();
        for (idx, weight) in weighted {
            let impulse = direction.scale(self.disturb_impulse * weight / peak);
            self.nodes[idx].apply_impulse(impulse);
        }
        log::debug!("disturbed {} nodes along {:?}", touched, direction);
    }

    // ---- queries ----

    pub fn node(&self, index: usize) -> &Node<F> { &self.nodes[index] }
    pub fn node_mut(&mut self, index: usize) -> &mut Node<F> { &mut self.nodes[index] }
    pub fn nodes(&self) -> &[Node<F>] { &self.nodes }
    pub fn springs(&self) -> &[Spring<F>] { &self.springs }
    pub fn angle_springs(&self) -> &[AngleSpring<F>] { &self.angle_springs }
    pub fn node_count(&self) -> usize { self.nodes.len() }
    pub fn spring_count(&self) -> usize { self.springs.len() }
    pub fn angle_spring_count(&self) -> usize { self.angle_springs.len() }
    pub fn resolution(&self) -> (usize, usize, usize) { (self.nx, self.ny, self.nz) }
    pub fn spacing(&self) -> Vec3<F> { self.spacing }
    pub fn rest_pose(&self) -> &[Vec3<F>] { &self.rest_pose }
    pub fn surface_mesh(&self) -> &SurfaceMesh { &self.mesh }

    pub fn count_springs(&self, kind: SpringKind) -> usize {
        self.springs.iter().filter(|s| s.kind == kind).count()
    }

    /// Node positions in flat index order.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.nodes.iter().map(|n| n.position).collect()
    }

    /// Rewrite `out` with flat xyz positions in flat index order.
    pub fn write_positions(&self, out: &mut AllocVec<F>) {
        out.clear();
        out.reserve(self.nodes.len() * 3);
        for n in &self.nodes {
            out.extend_from_slice(&[n.position.x, n.position.y, n.position.z]);
        }
    }

    /// Rewrite `out` with the surface mesh's vertex buffer.
    pub fn write_surface_vertices(&self, out: &mut AllocVec<F>) {
        let positions = self.positions();
        self.mesh.write_vertices(&positions, out);
    }

    /// Endpoints of every structural spring, for line drawing.
    pub fn structural_pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.springs
            .iter()
            .filter(|s| s.kind == SpringKind::Structural)
            .map(|s| (s.a, s.b))
    }

    pub fn total_mass(&self) -> F {
        self.nodes.iter().fold(F::zero(), |acc, n| acc + n.mass())
    }

    /// Mass-weighted mean position.
    pub fn centroid(&self) -> Vec3<F> {
        let sum = self.nodes.iter().fold(Vec3::zero(), |acc, n| acc + n.position.scale(n.mass()));
        sum.scale(F::one() / self.total_mass())
    }

    /// Velocity of the center of mass.
    pub fn centroid_velocity(&self) -> Vec3<F> {
        self.momentum().scale(F::one() / self.total_mass())
    }

    pub fn momentum(&self) -> Vec3<F> {
        self.nodes.iter().fold(Vec3::zero(), |acc, n| acc + n.momentum())
    }

    pub fn kinetic_energy(&self) -> F {
        self.nodes.iter().fold(F::zero(), |acc, n| {
            acc + F::half() * n.mass() * n.velocity.length_sq()
        })
    }

    /// Largest node speed, handy for stability checks.
    pub fn max_speed(&self) -> F {
        self.nodes.iter().fold(F::zero(), |acc, n| acc.max(n.velocity.length()))
    }
}

/// Uniformly distributed unit vector.
pub(crate) fn random_direction<F: Float, R: Rng>(rng: &mut R) -> Vec3<F> {
    let z = F::from_f32(rng.random::<f32>()) * F::two() - F::one();
    let phi = F::from_f32(rng.random::<f32>()) * F::two() * F::pi();
    let r = (F::one() - z * z).max(F::zero()).sqrt();
    Vec3::new(r * phi.cos(), r * phi.sin(), z)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(n: usize) -> Lattice<f64> {
        let config = LatticeConfig::new()
            .with_resolution(n, n, n)
            .with_extents(Vec3::splat(2.0));
        Lattice::new(&config).unwrap()
    }

    #[test]
    fn correct_node_count() {
        let config = LatticeConfig::<f32>::new().with_resolution(4, 3, 2);
        let lattice = Lattice::new(&config).unwrap();
        assert_eq!(lattice.node_count(), 24);
    }

    #[test]
    fn spring_counts_per_class() {
        let config = LatticeConfig::<f32>::new().with_resolution(4, 3, 2);
        let lattice = Lattice::new(&config).unwrap();
        // Structural: 3*3*2 + 4*2*2 + 4*3*1 = 18 + 16 + 12
        assert_eq!(lattice.count_springs(SpringKind::Structural), 46);
        // Bend: 2*3*2 + 4*1*2 + 0 = 12 + 8
        assert_eq!(lattice.count_springs(SpringKind::Bend), 20);
        // Shear: XY 2*(3*2*2) + XZ 2*(3*3*1) + YZ 2*(4*2*1) = 24 + 18 + 16
        assert_eq!(lattice.count_springs(SpringKind::Shear), 58);
        // Torsion: 4 per cell, 3*2*1 cells
        assert_eq!(lattice.count_springs(SpringKind::Torsion), 24);
        assert_eq!(lattice.spring_count(), 46 + 20 + 58 + 24);
    }

    #[test]
    fn bend_stiffness_is_exact_in_f64() {
        let lattice = Lattice::new(&LatticeConfig::<f64>::new().with_stiffness(50.0)).unwrap();
        let bend = lattice.springs().iter().find(|s| s.kind == SpringKind::Bend).unwrap();
        assert!((bend.stiffness - 10.0).abs() < 1e-12, "bend stiffness {}", bend.stiffness);
    }

    #[test]
    fn stiffness_ratios() {
        let config = LatticeConfig::<f64>::new().with_stiffness(50.0);
        let lattice = Lattice::new(&config).unwrap();
        for s in lattice.springs() {
            let expected = match s.kind {
                SpringKind::Structural => 50.0,
                SpringKind::Bend => 10.0,
                SpringKind::Shear | SpringKind::Torsion => 100.0,
            };
            assert!((s.stiffness - expected).abs() < 1e-9, "{:?}", s.kind);
        }
    }

    #[test]
    fn rest_lengths_match_geometry() {
        let config = LatticeConfig::<f64>::new()
            .with_extents(Vec3::new(3.0, 2.0, 1.0))
            .with_resolution(4, 3, 2);
        let lattice = Lattice::new(&config).unwrap();
        let sqrt2 = 2.0f64.sqrt();
        let sqrt3 = 3.0f64.sqrt();
        for s in lattice.springs() {
            let ok = match s.kind {
                SpringKind::Structural => (s.rest_length - 1.0).abs() < 1e-9,
                SpringKind::Bend => (s.rest_length - 2.0).abs() < 1e-9,
                SpringKind::Shear => (s.rest_length - sqrt2).abs() < 1e-9,
                SpringKind::Torsion => (s.rest_length - sqrt3).abs() < 1e-9,
            };
            assert!(ok, "{:?} rest length {}", s.kind, s.rest_length);
        }
    }

    #[test]
    fn interior_node_has_full_neighbourhood() {
        let lattice = cube(5);
        let center = lattice.index(2, 2, 2);
        // 6 structural + 6 bend + 12 shear + 8 torsion
        assert_eq!(lattice.node(center).springs.len(), 32);
        let corner = lattice.index(0, 0, 0);
        // 3 structural + 3 bend + 3 shear + 1 torsion
        assert_eq!(lattice.node(corner).springs.len(), 10);
    }

    #[test]
    fn springs_registered_on_both_endpoints() {
        let lattice = cube(3);
        for (idx, s) in lattice.springs().iter().enumerate() {
            assert!(lattice.node(s.a).springs.contains(&idx));
            assert!(lattice.node(s.b).springs.contains(&idx));
        }
    }

    #[test]
    fn angle_springs_follow_paths() {
        let config = LatticeConfig::<f64>::new()
            .with_resolution(3, 3, 3)
            .with_angle_springs(10.0);
        let lattice = Lattice::new(&config).unwrap();
        // Interior node: three paths of three right angles each.
        let center = lattice.index(1, 1, 1);
        let centered = lattice
            .angle_springs()
            .iter()
            .filter(|a| a.center == center)
            .count();
        assert_eq!(centered, 9);
        for a in lattice.angle_springs() {
            let angle = a.current_angle(lattice.nodes()).unwrap();
            assert!((angle - core::f64::consts::FRAC_PI_2).abs() < 1e-9);
        }
    }

    #[test]
    fn angle_springs_off_by_default() {
        assert_eq!(cube(3).angle_spring_count(), 0);
    }

    #[test]
    fn origin_is_block_center() {
        let config = LatticeConfig::<f64>::new()
            .with_extents(Vec3::splat(2.5))
            .with_origin(Vec3::new(0.0, 2.0, 0.0));
        let lattice = Lattice::new(&config).unwrap();
        let c = lattice.centroid();
        assert!(c.distance(Vec3::new(0.0, 2.0, 0.0)) < 1e-9);
        let first = lattice.node(0).position;
        assert!(first.distance(Vec3::new(-1.25, 0.75, -1.25)) < 1e-9);
    }

    #[test]
    fn coords_round_trip() {
        let config = LatticeConfig::<f32>::new().with_resolution(4, 3, 5);
        let lattice = Lattice::new(&config).unwrap();
        for idx in 0..lattice.node_count() {
            let (i, j, k) = lattice.coords(idx);
            assert_eq!(lattice.index(i, j, k), idx);
        }
    }

    #[test]
    fn neighbor_respects_edges() {
        let lattice = cube(3);
        let corner = lattice.index(0, 0, 0);
        assert_eq!(lattice.neighbor(corner, (-1, 0, 0)), None);
        assert_eq!(lattice.neighbor(corner, (1, 1, 1)), Some(lattice.index(1, 1, 1)));
        assert_eq!(lattice.neighbor(corner, (3, 0, 0)), None);
    }

    #[test]
    fn face_nodes_lie_on_face() {
        let lattice = cube(4);
        let top = lattice.face_nodes(1, true);
        assert_eq!(top.len(), 16);
        for idx in top {
            assert_eq!(lattice.coords(idx).1, 3);
        }
    }

    #[test]
    fn disturb_moves_only_central_block() {
        let mut lattice = cube(8);
        lattice.disturb_along(Vec3::unit_x());
        let corner = lattice.index(0, 0, 0);
        assert_eq!(lattice.node(corner).velocity, Vec3::zero());
        // Block is [2, 5]; node (3, 3, 3) is near its center.
        let inner = lattice.index(3, 3, 3);
        assert!(lattice.node(inner).velocity.x > 0.0);
        assert!(lattice.max_speed() <= 6.0 + 1e-9);
    }

    #[test]
    fn disturb_peaks_at_full_impulse_on_even_grid() {
        let mut lattice = cube(4);
        lattice.disturb_along(Vec3::unit_y());
        // Block is [1, 2]; all eight nodes are equidistant from its center.
        for (i, j, k) in [(1, 1, 1), (2, 2, 2), (1, 2, 1)] {
            let v = lattice.node(lattice.index(i, j, k)).velocity;
            assert!((v.y - 6.0).abs() < 1e-9, "v = {:?}", v);
        }
        assert_eq!(lattice.node(0).velocity, Vec3::zero());
        assert!((lattice.max_speed() - 6.0).abs() < 1e-9);
    }

    #[test]
    fn disturb_falls_off_from_center() {
        let mut lattice = cube(7);
        lattice.disturb_along(Vec3::unit_x());
        // Block is [1, 5] with center node (3, 3, 3).
        let center = lattice.node(lattice.index(3, 3, 3)).velocity.x;
        let edge = lattice.node(lattice.index(1, 3, 3)).velocity.x;
        assert!((center - 6.0).abs() < 1e-9);
        assert!(edge > 0.0 && edge < center);
    }

    #[test]
    fn disturb_is_seeded() {
        let config = LatticeConfig::<f64>::new().with_seed(7);
        let mut a = Lattice::new(&config).unwrap();
        let mut b = Lattice::new(&config).unwrap();
        a.disturb();
        b.disturb();
        for (na, nb) in a.nodes().iter().zip(b.nodes()) {
            assert_eq!(na.velocity, nb.velocity);
        }
    }

    #[test]
    fn random_direction_is_unit() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..100 {
            let d: Vec3<f64> = random_direction(&mut rng);
            assert!((d.length() - 1.0).abs() < 1e-6);
        }
    }

    #[test]
    fn invalid_config_rejected() {
        let config = LatticeConfig::<f32>::new().with_resolution(1, 4, 4);
        assert!(matches!(
            Lattice::new(&config),
            Err(SimError::InvalidResolution { axis: 'x', value: 1 })
        ));
    }
}
