use jiggle::{CompositeBody, LatticeConfig, Plane, Vec3, World, WorldConfig};

#[test]
fn tetromino_lands_in_one_piece() {
    let config = LatticeConfig::new()
        .with_resolution(3, 3, 3)
        .with_extents(Vec3::splat(1.0))
        .with_origin(Vec3::new(0.0, 1.0, 0.0));
    let mut world = World::new(WorldConfig::new()).unwrap();
    let id = world.add_composite(CompositeBody::t_tetromino(&config).unwrap());
    world.add_surface(Plane::new(Vec3::new(0.0, -1.0, 0.0), Vec3::unit_y()).unwrap());

    for _ in 0..240 {
        world.advance(1.0 / 60.0);
    }

    let body = world.composite(id);
    for p in body.positions() {
        assert!(p.is_finite());
        assert!(p.y >= -1.1, "node sank to {:?}", p);
    }
    for c in body.connectors() {
        let a = body.part(c.a.part).node(c.a.node).position;
        let b = body.part(c.b.part).node(c.b.node).position;
        let stretch = a.distance(b) / c.rest_length;
        assert!(stretch < 1.5 && stretch > 0.5, "connector stretched to {}", stretch);
    }
}

#[test]
fn disturb_moves_every_part() {
    let mut body: CompositeBody<f32> = CompositeBody::t_tetromino(&LatticeConfig::new()).unwrap();
    body.disturb();
    for part in body.parts() {
        assert!(part.max_speed() > 0.0);
    }
    body.reset();
    assert!(body.parts().iter().all(|p| p.max_speed() == 0.0));
}
