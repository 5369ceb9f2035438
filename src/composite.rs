//! Bodies assembled from several lattices joined by connector springs.
//!
//! A composite owns its parts outright; connectors address nodes by
//! `(part, node)` pairs and are accumulated after the parts' own springs.

use crate::config::LatticeConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::lattice::{random_direction, Lattice};
use crate::spring::linear_force;
use crate::surface::Surface;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;
use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A node inside one part of a composite body.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub part: usize,
    pub node: usize,
}

impl NodeRef {
    pub fn new(part: usize, node: usize) -> Self {
        NodeRef { part, node }
    }
}

/// A linear spring between nodes of two (possibly identical) parts.
#[derive(Clone, Debug)]
pub struct Connector<F: Float> {
    pub a: NodeRef,
    pub b: NodeRef,
    pub rest_length: F,
    pub stiffness: F,
    pub max_force: Option<F>,
}

/// Several lattices acting as one soft body.
#[derive(Clone, Debug)]
pub struct CompositeBody<F: Float> {
    parts: AllocVec<Lattice<F>>,
    connectors: AllocVec<Connector<F>>,
    rng: SmallRng,
}

impl<F: Float> CompositeBody<F> {
    pub fn new(seed: u64) -> Self {
        CompositeBody {
            parts: AllocVec::new(),
            connectors: AllocVec::new(),
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Four cubes in a T: three in a row along X with a fourth on top of
    /// the middle one. Each cube uses `config`; `config.origin` is the
    /// middle cube's center. Neighbouring cubes sit one grid spacing apart
    /// and are stitched face to face.
    pub fn t_tetromino(config: &LatticeConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        let spacing = config.spacing();
        let step_x = config.extents.x + spacing.x;
        let step_y = config.extents.y + spacing.y;
        let offsets = [
            Vec3::new(-step_x, F::zero(), F::zero()),
            Vec3::zero(),
            Vec3::new(step_x, F::zero(), F::zero()),
            Vec3::new(F::zero(), step_y, F::zero()),
        ];

        let mut body = CompositeBody::new(config.seed);
        for (n, offset) in offsets.iter().enumerate() {
            let part_config = config
                .clone()
                .with_origin(config.origin + *offset)
                .with_seed(config.seed.wrapping_add(n as u64 + 1));
            body.add_part(Lattice::new(&part_config)?);
        }

        let k = config.stiffness;
        body.stitch_faces(0, 1, 0, k, config.max_force)?;
        body.stitch_faces(1, 2, 0, k, config.max_force)?;
        body.stitch_faces(1, 3, 1, k, config.max_force)?;
        log::debug!(
            "built T tetromino: {} parts, {} connectors",
            body.parts.len(),
            body.connectors.len()
        );
        Ok(body)
    }

    pub fn add_part(&mut self, lattice: Lattice<F>) -> usize {
        self.parts.push(lattice);
        self.parts.len() - 1
    }

    fn check(&self, r: NodeRef) -> Result<(), SimError> {
        let part = self.parts.get(r.part).ok_or(SimError::BodyOutOfBounds {
            index: r.part,
            count: self.parts.len(),
        })?;
        if r.node >= part.node_count() {
            return Err(SimError::NodeOutOfBounds { index: r.node, count: part.node_count() });
        }
        Ok(())
    }

    fn position(&self, r: NodeRef) -> Vec3<F> {
        self.parts[r.part].node(r.node).position
    }

    /// Join two nodes with a spring at their current separation.
    pub fn connect(&mut self, a: NodeRef, b: NodeRef, stiffness: F, max_force: F) -> Result<(), SimError> {
        self.check(a)?;
        self.check(b)?;
        if !stiffness.is_finite() || stiffness <= F::zero() {
            return Err(SimError::InvalidStiffness);
        }
        if !(max_force > F::zero()) {
            return Err(SimError::InvalidForceLimit);
        }
        let rest_length = self.position(a).distance(self.position(b));
        self.connectors.push(Connector { a, b, rest_length, stiffness, max_force: Some(max_force) });
        Ok(())
    }

    /// Stitch the max face of `part_a` to the min face of `part_b` along
    /// `axis`: straight connectors between matching nodes, plus diagonal
    /// connectors (twice as stiff) to their in-face neighbours.
    pub fn stitch_faces(
        &mut self,
        part_a: usize,
        part_b: usize,
        axis: usize,
        stiffness: F,
        max_force: F,
    ) -> Result<(), SimError> {
        let count = self.parts.len();
        if part_a >= count || part_b >= count {
            return Err(SimError::BodyOutOfBounds { index: part_a.max(part_b), count });
        }
        if axis > 2 {
            return Err(SimError::InvalidAxis { axis });
        }
        let dims_a = dims(&self.parts[part_a]);
        let dims_b = dims(&self.parts[part_b]);
        let (u_axis, v_axis) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };
        if dims_a[u_axis] != dims_b[u_axis] || dims_a[v_axis] != dims_b[v_axis] {
            return Err(SimError::MismatchedFaces);
        }
        let (nu, nv) = (dims_a[u_axis], dims_a[v_axis]);
        let face_a = self.parts[part_a].face_nodes(axis, true);
        let face_b = self.parts[part_b].face_nodes(axis, false);

        for u in 0..nu {
            for v in 0..nv {
                let a = NodeRef::new(part_a, face_a[u * nv + v]);
                self.connect(a, NodeRef::new(part_b, face_b[u * nv + v]), stiffness, max_force)?;
                for (du, dv) in [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)] {
                    let (Some(bu), Some(bv)) = (u.checked_add_signed(du), v.checked_add_signed(dv)) else {
                        continue;
                    };
                    if bu < nu && bv < nv {
                        let b = NodeRef::new(part_b, face_b[bu * nv + bv]);
                        self.connect(a, b, stiffness * F::two(), max_force)?;
                    }
                }
            }
        }
        Ok(())
    }

    // ---- per-step phases ----

    pub fn reset_forces(&mut self) {
        for p in self.parts.iter_mut() {
            p.reset_forces();
        }
    }

    pub fn apply_external(&mut self, accel: Vec3<F>) {
        for p in self.parts.iter_mut() {
            p.apply_external(accel);
        }
    }

    /// Parts' own springs first, then connectors in insertion order.
    pub fn apply_spring_forces(&mut self) {
        for p in self.parts.iter_mut() {
            p.apply_spring_forces();
        }
        for c in &self.connectors {
            let pa = self.parts[c.a.part].node(c.a.node).position;
            let pb = self.parts[c.b.part].node(c.b.node).position;
            let force = linear_force(pa, pb, c.rest_length, c.stiffness, c.max_force);
            self.parts[c.b.part].node_mut(c.b.node).apply_force(force);
            self.parts[c.a.part].node_mut(c.a.node).apply_force(-force);
        }
    }

    pub fn resolve_collisions(&mut self, surfaces: &[Surface<F>], stiffness: F, damping: F) -> usize {
        self.parts
            .iter_mut()
            .map(|p| p.resolve_collisions(surfaces, stiffness, damping))
            .sum()
    }

    pub fn integrate(&mut self, dt: F) {
        for p in self.parts.iter_mut() {
            p.integrate(dt);
        }
    }

    // ---- commands ----

    pub fn reset(&mut self) {
        for p in self.parts.iter_mut() {
            p.reset();
        }
    }

    /// Disturb every part along one shared random direction.
    pub fn disturb(&mut self) {
        let direction = random_direction(&mut self.rng);
        for p in self.parts.iter_mut() {
            p.disturb_along(direction);
        }
    }

    // ---- queries ----

    pub fn parts(&self) -> &[Lattice<F>] { &self.parts }
    pub fn part(&self, index: usize) -> &Lattice<F> { &self.parts[index] }
    pub fn part_mut(&mut self, index: usize) -> &mut Lattice<F> { &mut self.parts[index] }
    pub fn connectors(&self) -> &[Connector<F>] { &self.connectors }

    pub fn node_count(&self) -> usize {
        self.parts.iter().map(|p| p.node_count()).sum()
    }

    /// Positions of all parts, concatenated in part order.
    pub fn positions(&self) -> AllocVec<Vec3<F>> {
        self.parts.iter().flat_map(|p| p.nodes().iter().map(|n| n.position)).collect()
    }

    pub fn momentum(&self) -> Vec3<F> {
        self.parts.iter().fold(Vec3::zero(), |acc, p| acc + p.momentum())
    }

    pub fn centroid(&self) -> Vec3<F> {
        let mut weighted = Vec3::zero();
        let mut mass = F::zero();
        for p in &self.parts {
            let m = p.total_mass();
            weighted += p.centroid().scale(m);
            mass = mass + m;
        }
        weighted.scale(F::one() / mass)
    }
}

fn dims<F: Float>(lattice: &Lattice<F>) -> [usize; 3] {
    let (nx, ny, nz) = lattice.resolution();
    [nx, ny, nz]
}
