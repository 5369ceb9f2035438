use jiggle::{Aabb, Lattice, LatticeConfig, Plane, Sphere, Vec3, World, WorldConfig};

const FRAME: f64 = 1.0 / 60.0;

fn dropped_cube() -> (World<f64>, usize) {
    let mut world = World::new(WorldConfig::new()).unwrap();
    let config = LatticeConfig::new().with_origin(Vec3::new(0.0, 2.0, 0.0));
    let id = world.add_lattice(Lattice::new(&config).unwrap());
    (world, id)
}

#[test]
fn cube_settles_on_floor() {
    let (mut world, id) = dropped_cube();
    world.add_surface(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::unit_y()).unwrap());

    for _ in 0..300 {
        world.advance(FRAME);
    }

    let lattice = world.lattice(id);
    for n in lattice.nodes() {
        assert!(n.position.y >= -2.1, "node sank to {:?}", n.position);
    }
    let v = lattice.centroid_velocity().length();
    assert!(v < 0.25, "still moving at {}", v);
    // Resting, not collapsed: the block keeps most of its height.
    let height = lattice.nodes().iter().map(|n| n.position.y).fold(f64::MIN, f64::max) + 2.0;
    assert!(height > 1.5, "block flattened to height {}", height);
}

#[test]
fn tilted_floor_is_respected() {
    let (mut world, id) = dropped_cube();
    let normal = Vec3::new(0.3, 1.0, 0.0);
    let floor = Plane::new(Vec3::new(0.0, -2.0, 0.0), normal).unwrap();
    world.add_surface(floor);

    for _ in 0..240 {
        world.advance(FRAME);
        for n in world.lattice(id).nodes() {
            assert!(floor.signed_distance(n.position) > -0.5);
        }
    }
    for n in world.lattice(id).nodes() {
        assert!(floor.signed_distance(n.position) > -0.15);
    }
}

#[test]
fn sphere_keeps_nodes_out() {
    let (mut world, id) = dropped_cube();
    let ball = Sphere::new(Vec3::new(0.0, -2.5, 0.0), 2.0).unwrap();
    world.add_surface(ball);

    for _ in 0..240 {
        world.advance(FRAME);
        for n in world.lattice(id).nodes() {
            let depth = ball.radius() - n.position.distance(ball.center());
            assert!(depth < 0.5, "node {:?} is {} inside the sphere", n.position, depth);
        }
    }
}

#[test]
fn box_top_acts_as_table() {
    let (mut world, id) = dropped_cube();
    let table = Aabb::new(Vec3::new(-4.0, -3.0, -4.0), Vec3::new(4.0, -1.0, 4.0)).unwrap();
    world.add_surface(table);

    for _ in 0..300 {
        world.advance(FRAME);
    }

    let lattice = world.lattice(id);
    for n in lattice.nodes() {
        assert!(n.position.y >= -1.1, "node sank to {:?}", n.position);
    }
    assert!(lattice.centroid().y > -1.0);
}

#[test]
fn repeated_disturbs_stay_bounded() {
    let mut world = World::new(WorldConfig::new()).unwrap();
    let config = LatticeConfig::new()
        .with_origin(Vec3::new(0.0, 2.0, 0.0))
        .with_angle_springs(10.0)
        .with_seed(5);
    let id = world.add_lattice(Lattice::new(&config).unwrap());
    world.add_surface(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::unit_y()).unwrap());

    for frame in 0..600 {
        if frame % 30 == 0 {
            world.lattice_mut(id).disturb();
        }
        world.advance(FRAME);
        let lattice = world.lattice(id);
        assert!(lattice.nodes().iter().all(|n| n.position.is_finite()));
        assert!(lattice.max_speed() < 50.0, "speed {}", lattice.max_speed());
    }
}

#[test]
fn wind_drifts_the_block() {
    let (mut world, id) = dropped_cube();
    world.add_surface(Plane::new(Vec3::new(0.0, -2.0, 0.0), Vec3::unit_y()).unwrap());
    world.set_wind(Vec3::new(1.5, 0.0, 0.0));
    for _ in 0..120 {
        world.advance(FRAME);
    }
    assert!(world.lattice(id).centroid().x > 0.1);
}
