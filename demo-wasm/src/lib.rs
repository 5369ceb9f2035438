use jiggle::{
    Aabb, CompositeBody, Lattice, LatticeConfig, Plane, Sphere, Surface, Vec3, World, WorldConfig,
};
use wasm_bindgen::prelude::*;

const FLOOR_Y: f32 = -2.0;

fn js_err(e: jiggle::SimError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Surface presets selectable from the page: 0 floor, 1 ball, 2 table.
fn collider(kind: u32) -> Result<Surface<f32>, JsValue> {
    let surface: Surface<f32> = match kind {
        1 => Sphere::new(Vec3::new(0.0, -3.0, 0.0), 2.0).map_err(js_err)?.into(),
        2 => Aabb::new(Vec3::new(-2.0, -4.0, -2.0), Vec3::new(2.0, -1.0, 2.0))
            .map_err(js_err)?
            .into(),
        _ => Plane::new(Vec3::new(0.0, FLOOR_Y, 0.0), Vec3::unit_y()).map_err(js_err)?.into(),
    };
    Ok(surface)
}

fn flatten(positions: &[Vec3<f32>]) -> Vec<f32> {
    let mut out = Vec::with_capacity(positions.len() * 3);
    for p in positions {
        out.extend_from_slice(&[p.x, p.y, p.z]);
    }
    out
}

// ---- Jelly Cube Demo ----

#[wasm_bindgen]
pub struct JellyDemo {
    world: World<f32>,
    body: usize,
    vertices: Vec<f32>,
}

#[wasm_bindgen]
impl JellyDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: usize, angle_springs: bool, seed: u64) -> Result<JellyDemo, JsValue> {
        let mut config = LatticeConfig::new()
            .with_resolution(resolution, resolution, resolution)
            .with_origin(Vec3::new(0.0, 2.0, 0.0))
            .with_seed(seed);
        if angle_springs {
            config = config.with_angle_springs(10.0);
        }
        let mut world = World::new(WorldConfig::new()).map_err(js_err)?;
        let body = world.add_lattice(Lattice::new(&config).map_err(js_err)?);
        world.add_surface(collider(0)?);
        Ok(JellyDemo { world, body, vertices: Vec::new() })
    }

    /// Advance one rendered frame.
    pub fn update(&mut self, frame_dt: f32) {
        self.world.advance(frame_dt);
    }

    pub fn reset(&mut self) {
        self.world.lattice_mut(self.body).reset();
    }

    pub fn disturb(&mut self) {
        self.world.lattice_mut(self.body).disturb();
    }

    pub fn set_wind(&mut self, x: f32, y: f32, z: f32) {
        self.world.set_wind(Vec3::new(x, y, z));
    }

    pub fn set_collider(&mut self, kind: u32) -> Result<(), JsValue> {
        self.world.clear_surfaces();
        self.world.add_surface(collider(kind)?);
        Ok(())
    }

    /// Returns flat [x0, y0, z0, x1, ...] node positions
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::new();
        self.world.lattice(self.body).write_positions(&mut out);
        out
    }

    /// Unshared surface vertices, matching `triangle_indices`.
    pub fn surface_vertices(&mut self) -> Vec<f32> {
        self.world.lattice(self.body).write_surface_vertices(&mut self.vertices);
        self.vertices.clone()
    }

    pub fn triangle_indices(&self) -> Vec<u32> {
        self.world.lattice(self.body).surface_mesh().triangle_indices()
    }

    /// Returns flat [a0, b0, a1, b1, ...] node indices of structural springs
    pub fn structural_lines(&self) -> Vec<u32> {
        let mut out = Vec::new();
        for (a, b) in self.world.lattice(self.body).structural_pairs() {
            out.push(a as u32);
            out.push(b as u32);
        }
        out
    }

    pub fn node_count(&self) -> usize {
        self.world.lattice(self.body).node_count()
    }
}

// ---- Tetromino Demo ----

#[wasm_bindgen]
pub struct TetrominoDemo {
    world: World<f32>,
    body: usize,
}

#[wasm_bindgen]
impl TetrominoDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(resolution: usize) -> Result<TetrominoDemo, JsValue> {
        let config = LatticeConfig::new()
            .with_resolution(resolution, resolution, resolution)
            .with_extents(Vec3::splat(1.0))
            .with_origin(Vec3::new(0.0, 1.0, 0.0));
        let mut world = World::new(WorldConfig::new()).map_err(js_err)?;
        let body = world.add_composite(CompositeBody::t_tetromino(&config).map_err(js_err)?);
        world.add_surface(collider(0)?);
        Ok(TetrominoDemo { world, body })
    }

    pub fn update(&mut self, frame_dt: f32) {
        self.world.advance(frame_dt);
    }

    pub fn reset(&mut self) {
        self.world.composite_mut(self.body).reset();
    }

    pub fn disturb(&mut self) {
        self.world.composite_mut(self.body).disturb();
    }

    /// Returns flat xyz positions of every part, in part order
    pub fn positions(&self) -> Vec<f32> {
        flatten(&self.world.composite(self.body).positions())
    }

    pub fn part_count(&self) -> usize {
        self.world.composite(self.body).parts().len()
    }
}
