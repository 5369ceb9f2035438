//! Mass-spring jelly simulation.
//!
//! `jiggle` models a block of jelly as a dense 3D lattice of point masses
//! tied together by clamped linear springs, with optional right-angle
//! springs for extra shape retention. Bodies are stepped with semi-implicit
//! Euler and pushed out of planes, spheres and boxes by penalty forces.
//!
//! # Features
//!
//! - **Lattices**: structural, bend, shear and torsion springs built from a
//!   resolution and extents
//! - **Angle springs**: optional torque-like springs holding axis pairs at 90°
//! - **Surfaces**: planes, spheres and axis-aligned boxes with damped penalty contact
//! - **Composite bodies**: lattices stitched together with connector springs
//! - **Disturb and reset**: random seeded shoves and a restorable rest pose
//! - **Render helpers**: flat position buffers and a stable boundary triangle mesh
//! - **Observable**: Monitor physics steps via the `StepObserver` trait
//! - **`no_std` compatible**: Works in embedded and WASM environments
//!
//! # Example
//! ```
//! use jiggle::{Lattice, LatticeConfig, Plane, Vec3, World, WorldConfig};
//!
//! let mut world: World<f32> = World::new(WorldConfig::new()).unwrap();
//! let cube = Lattice::new(&LatticeConfig::new().with_origin(Vec3::new(0.0, 2.0, 0.0))).unwrap();
//! let id = world.add_lattice(cube);
//! world.add_surface(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::unit_y()).unwrap());
//! world.advance(1.0 / 60.0);
//! assert!(world.lattice(id).centroid().y < 2.0);
//! ```

#![no_std]

extern crate alloc;

pub mod float;
pub mod vec;
pub mod node;
pub mod spring;
pub mod lattice;
pub mod mesh;
pub mod surface;
pub mod composite;
pub mod world;
pub mod observer;
pub mod config;
pub mod error;

// Re-export primary API
pub use float::Float;
pub use vec::Vec3;
pub use node::Node;
pub use spring::{AngleSpring, Spring, SpringKind};
pub use lattice::Lattice;
pub use mesh::SurfaceMesh;
pub use surface::{Aabb, Contact, Plane, Sphere, Surface};
pub use composite::{CompositeBody, Connector, NodeRef};
pub use world::{Body, World};
pub use config::{LatticeConfig, WorldConfig};
pub use observer::{NoOpStepObserver, StepObserver};
pub use error::SimError;
