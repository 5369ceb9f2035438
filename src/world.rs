//! A world of soft bodies sharing gravity, wind and collision surfaces.

use crate::composite::CompositeBody;
use crate::config::WorldConfig;
use crate::error::SimError;
use crate::float::Float;
use crate::lattice::Lattice;
use crate::observer::{NoOpStepObserver, StepObserver};
use crate::surface::Surface;
use crate::vec::Vec3;
use alloc::vec::Vec as AllocVec;

/// The per-step phases a world drives on each body.
pub trait Body<F: Float> {
    fn reset_forces(&mut self);
    fn apply_external(&mut self, accel: Vec3<F>);
    fn apply_spring_forces(&mut self);
    fn resolve_collisions(&mut self, surfaces: &[Surface<F>], stiffness: F, damping: F) -> usize;
    fn integrate(&mut self, dt: F);
}

impl<F: Float> Body<F> for Lattice<F> {
    fn reset_forces(&mut self) { Lattice::reset_forces(self) }
    fn apply_external(&mut self, accel: Vec3<F>) { Lattice::apply_external(self, accel) }
    fn apply_spring_forces(&mut self) { Lattice::apply_spring_forces(self) }
    fn resolve_collisions(&mut self, surfaces: &[Surface<F>], stiffness: F, damping: F) -> usize {
        Lattice::resolve_collisions(self, surfaces, stiffness, damping)
    }
    fn integrate(&mut self, dt: F) { Lattice::integrate(self, dt) }
}

impl<F: Float> Body<F> for CompositeBody<F> {
    fn reset_forces(&mut self) { CompositeBody::reset_forces(self) }
    fn apply_external(&mut self, accel: Vec3<F>) { CompositeBody::apply_external(self, accel) }
    fn apply_spring_forces(&mut self) { CompositeBody::apply_spring_forces(self) }
    fn resolve_collisions(&mut self, surfaces: &[Surface<F>], stiffness: F, damping: F) -> usize {
        CompositeBody::resolve_collisions(self, surfaces, stiffness, damping)
    }
    fn integrate(&mut self, dt: F) { CompositeBody::integrate(self, dt) }
}

/// Owns bodies and surfaces and advances them in lockstep.
///
/// Each step runs, per body: force reset, gravity and wind, spring forces,
/// collision penalties, then integration. Lattices step first in insertion
/// order, then composites.
#[derive(Clone, Debug)]
pub struct World<F: Float> {
    config: WorldConfig<F>,
    lattices: AllocVec<Lattice<F>>,
    composites: AllocVec<CompositeBody<F>>,
    surfaces: AllocVec<Surface<F>>,
    time: F,
}

impl<F: Float> World<F> {
    pub fn new(config: WorldConfig<F>) -> Result<Self, SimError> {
        config.validate()?;
        Ok(World {
            config,
            lattices: AllocVec::new(),
            composites: AllocVec::new(),
            surfaces: AllocVec::new(),
            time: F::zero(),
        })
    }

    pub fn add_lattice(&mut self, lattice: Lattice<F>) -> usize {
        self.lattices.push(lattice);
        self.lattices.len() - 1
    }

    pub fn add_composite(&mut self, body: CompositeBody<F>) -> usize {
        self.composites.push(body);
        self.composites.len() - 1
    }

    pub fn add_surface(&mut self, surface: impl Into<Surface<F>>) -> usize {
        self.surfaces.push(surface.into());
        self.surfaces.len() - 1
    }

    pub fn remove_surface(&mut self, index: usize) -> Result<Surface<F>, SimError> {
        if index >= self.surfaces.len() {
            return Err(SimError::SurfaceOutOfBounds { index, count: self.surfaces.len() });
        }
        Ok(self.surfaces.remove(index))
    }

    pub fn clear_surfaces(&mut self) {
        self.surfaces.clear();
    }

    /// Advance every body by one step of `dt`.
    pub fn step(&mut self, dt: F) {
        self.step_with(dt, &mut NoOpStepObserver);
    }

    /// Like [`World::step`], reporting each phase to `observer`.
    ///
    /// A non-positive or non-finite `dt` leaves the world untouched.
    pub fn step_with<O: StepObserver>(&mut self, dt: F, observer: &mut O) {
        if !dt.is_finite() || dt <= F::zero() {
            log::warn!("ignoring step with invalid dt {:?}", dt);
            return;
        }
        let accel = self.config.gravity + self.config.wind;
        let stiffness = self.config.collision_stiffness;
        let damping = self.config.collision_damping;
        let surfaces = &self.surfaces;

        let mut id = 0;
        for body in self.lattices.iter_mut() {
            step_body(body, id, dt, accel, surfaces, stiffness, damping, observer);
            id += 1;
        }
        for body in self.composites.iter_mut() {
            step_body(body, id, dt, accel, surfaces, stiffness, damping, observer);
            id += 1;
        }

        self.time = self.time + dt;
        observer.on_step_complete();
    }

    /// Advance one frame of `frame_dt`, split into the configured number
    /// of sub-steps.
    pub fn advance(&mut self, frame_dt: F) {
        let sub_steps = self.config.sub_steps.max(1);
        let sub_dt = frame_dt / F::from_usize(sub_steps);
        for _ in 0..sub_steps {
            self.step(sub_dt);
        }
    }

    /// Restore every body to its rest pose.
    pub fn reset(&mut self) {
        for l in self.lattices.iter_mut() {
            l.reset();
        }
        for c in self.composites.iter_mut() {
            c.reset();
        }
        self.time = F::zero();
    }

    pub fn set_gravity(&mut self, gravity: Vec3<F>) {
        self.config.gravity = gravity;
    }

    pub fn set_wind(&mut self, wind: Vec3<F>) {
        self.config.wind = wind;
    }

    pub fn config(&self) -> &WorldConfig<F> { &self.config }
    pub fn time(&self) -> F { self.time }
    pub fn surfaces(&self) -> &[Surface<F>] { &self.surfaces }
    pub fn lattices(&self) -> &[Lattice<F>] { &self.lattices }
    pub fn composites(&self) -> &[CompositeBody<F>] { &self.composites }
    pub fn lattice(&self, index: usize) -> &Lattice<F> { &self.lattices[index] }
    pub fn lattice_mut(&mut self, index: usize) -> &mut Lattice<F> { &mut self.lattices[index] }
    pub fn composite(&self, index: usize) -> &CompositeBody<F> { &self.composites[index] }
    pub fn composite_mut(&mut self, index: usize) -> &mut CompositeBody<F> { &mut self.composites[index] }
    pub fn body_count(&self) -> usize { self.lattices.len() + self.composites.len() }
}

#[allow(clippy::too_many_arguments)]
fn step_body<F: Float, B: Body<F>, O: StepObserver>(
    body: &mut B,
    id: usize,
    dt: F,
    accel: Vec3<F>,
    surfaces: &[Surface<F>],
    stiffness: F,
    damping: F,
    observer: &mut O,
) {
    body.reset_forces();
    body.apply_external(accel);
    observer.on_external(id);
    body.apply_spring_forces();
    observer.on_internal(id);
    let contacts = body.resolve_collisions(surfaces, stiffness, damping);
    observer.on_collisions(id, contacts);
    body.integrate(dt);
    observer.on_integrate(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LatticeConfig;
    use crate::surface::Plane;

    #[derive(Default)]
    struct Counter {
        externals: usize,
        integrates: usize,
        contacts: usize,
        steps: usize,
    }

    impl StepObserver for Counter {
        fn on_external(&mut self, _body: usize) { self.externals += 1; }
        fn on_collisions(&mut self, _body: usize, contacts: usize) { self.contacts += contacts; }
        fn on_integrate(&mut self, _body: usize) { self.integrates += 1; }
        fn on_step_complete(&mut self) { self.steps += 1; }
    }

    fn world_with_cube() -> World<f64> {
        let mut world = World::new(WorldConfig::new()).unwrap();
        world.add_lattice(Lattice::new(&LatticeConfig::new()).unwrap());
        world
    }

    #[test]
    fn invalid_dt_is_ignored() {
        let mut world = world_with_cube();
        let before = world.lattice(0).positions();
        for dt in [0.0, -0.01, f64::NAN, f64::INFINITY] {
            world.step(dt);
        }
        assert_eq!(world.lattice(0).positions(), before);
        assert_eq!(world.time(), 0.0);
    }

    #[test]
    fn gravity_pulls_down() {
        let mut world = world_with_cube();
        let y0 = world.lattice(0).centroid().y;
        world.advance(1.0 / 60.0);
        assert!(world.lattice(0).centroid().y < y0);
        assert!(world.lattice(0).centroid_velocity().y < 0.0);
    }

    #[test]
    fn wind_pushes_sideways() {
        let mut world = world_with_cube();
        world.set_gravity(Vec3::zero());
        world.set_wind(Vec3::new(2.0, 0.0, 0.0));
        world.advance(1.0 / 60.0);
        let v = world.lattice(0).centroid_velocity();
        assert!(v.x > 0.0);
        assert!(v.y.abs() < 1e-12);
    }

    #[test]
    fn observer_sees_every_phase() {
        let mut world = world_with_cube();
        world.add_surface(Plane::new(Vec3::new(0.0, 0.0, 0.0), Vec3::unit_y()).unwrap());
        world.add_composite(CompositeBody::t_tetromino(&LatticeConfig::new().with_resolution(2, 2, 2)).unwrap());
        let mut counter = Counter::default();
        world.step_with(0.001, &mut counter);
        assert_eq!(counter.externals, 2);
        assert_eq!(counter.integrates, 2);
        assert_eq!(counter.steps, 1);
        // The default cube straddles y = 0, so the bottom half is below the floor.
        assert!(counter.contacts > 0);
    }

    #[test]
    fn advance_runs_sub_steps() {
        let mut world = World::new(WorldConfig::new().with_sub_steps(4)).unwrap();
        world.advance(0.04);
        assert!((world.time() - 0.04).abs() < 1e-12);
    }

    #[test]
    fn reset_restores_rest_pose() {
        let mut world = world_with_cube();
        let rest = world.lattice(0).rest_pose().to_vec();
        for _ in 0..10 {
            world.advance(1.0 / 60.0);
        }
        world.reset();
        assert_eq!(world.lattice(0).positions(), rest);
        assert_eq!(world.time(), 0.0);
    }

    #[test]
    fn remove_surface_out_of_range() {
        let mut world = world_with_cube();
        assert_eq!(
            world.remove_surface(0),
            Err(SimError::SurfaceOutOfBounds { index: 0, count: 0 })
        );
    }
}
