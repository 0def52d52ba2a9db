//! Procedural level for the demo walk
//!
//! Rolling terrain with a slab wall standing on it, both in model space.
//! The scene applies the world scale.

use sky_engine::foundation::math::{Transform, Vec3};
use sky_engine::physics::WorldMesh;

/// Half the terrain width
pub const TERRAIN_HALF_EXTENT: f32 = 20.0;

const TERRAIN_CELLS: u32 = 20;
const HILL_HEIGHT: f32 = 0.3;

/// Every mesh of the level
pub fn build() -> Vec<WorldMesh> {
    vec![terrain(), wall()]
}

/// Square heightfield centered on the origin
fn terrain() -> WorldMesh {
    let stride = TERRAIN_CELLS + 1;
    let cell = 2.0 * TERRAIN_HALF_EXTENT / TERRAIN_CELLS as f32;

    let positions = (0..stride)
        .flat_map(|j| (0..stride).map(move |i| (i, j)))
        .map(|(i, j)| {
            let x = -TERRAIN_HALF_EXTENT + i as f32 * cell;
            let z = -TERRAIN_HALF_EXTENT + j as f32 * cell;
            Vec3::new(x, height(x, z), z)
        })
        .collect();

    let indices = (0..TERRAIN_CELLS)
        .flat_map(|j| (0..TERRAIN_CELLS).map(move |i| (i, j)))
        .flat_map(|(i, j)| {
            let a = i + j * stride;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            [a, c, b, b, c, d]
        })
        .collect();

    WorldMesh::new("terrain", positions).with_indices(indices)
}

/// Gentle hills, flat around the spawn point
fn height(x: f32, z: f32) -> f32 {
    let falloff = ((x * x + z * z).sqrt() / 6.0).min(1.0);
    HILL_HEIGHT * falloff * (x * 0.3).sin() * (z * 0.3).cos()
}

/// Slab across the path ahead of the spawn point
fn wall() -> WorldMesh {
    let min = Vec3::new(-5.0, -0.5, -0.25);
    let max = Vec3::new(5.0, 3.0, 0.25);

    let positions = (0..8)
        .map(|corner: u32| {
            Vec3::new(
                if corner & 1 == 0 { min.x } else { max.x },
                if corner & 2 == 0 { min.y } else { max.y },
                if corner & 4 == 0 { min.z } else { max.z },
            )
        })
        .collect();

    // Two outward-facing triangles per side
    let indices = vec![
        0, 4, 6, 0, 6, 2, // -X
        1, 3, 7, 1, 7, 5, // +X
        0, 1, 5, 0, 5, 4, // -Y
        2, 6, 7, 2, 7, 3, // +Y
        0, 2, 3, 0, 3, 1, // -Z
        4, 5, 7, 4, 7, 6, // +Z
    ];

    WorldMesh::new("wall", positions)
        .with_indices(indices)
        .with_transform(Transform::from_position(Vec3::new(0.0, 0.0, -10.25)))
}
