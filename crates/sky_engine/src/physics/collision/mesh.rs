//! World mesh ingestion
//!
//! Converts renderable level meshes handed over by the scene layer into the
//! world-space triangle soup the octree is built from.

use super::{GeometryError, Triangle};
use crate::foundation::math::{Point3, Transform, Vec3};

/// Triangle mesh of the static world, in model space
#[derive(Debug, Clone, Default)]
pub struct WorldMesh {
    /// Human-readable name used in diagnostics
    pub name: String,
    /// Vertex positions in model space
    pub positions: Vec<Vec3>,
    /// Optional triangle list indices; without them every three positions form a triangle
    pub indices: Option<Vec<u32>>,
    /// Model-to-world transform
    pub transform: Transform,
}

impl WorldMesh {
    /// Create a non-indexed mesh at the origin
    pub fn new(name: impl Into<String>, positions: Vec<Vec3>) -> Self {
        Self {
            name: name.into(),
            positions,
            indices: None,
            transform: Transform::identity(),
        }
    }

    /// Use an index buffer
    #[must_use]
    pub fn with_indices(mut self, indices: Vec<u32>) -> Self {
        self.indices = Some(indices);
        self
    }

    /// Place the mesh in the world
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// World-space triangles of this mesh
    pub fn triangles(&self) -> Result<Vec<Triangle>, GeometryError> {
        let matrix = self.transform.to_matrix();
        let world = |p: Vec3| matrix.transform_point(&Point3::from(p)).coords;

        match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::IndexCount {
                        mesh: self.name.clone(),
                        count: indices.len(),
                    });
                }

                indices
                    .chunks_exact(3)
                    .map(|tri| {
                        let vertex = |i: u32| {
                            self.positions
                                .get(i as usize)
                                .copied()
                                .map(world)
                                .ok_or_else(|| GeometryError::IndexOutOfRange {
                                    mesh: self.name.clone(),
                                    index: i,
                                    vertex_count: self.positions.len(),
                                })
                        };
                        Ok(Triangle::new(vertex(tri[0])?, vertex(tri[1])?, vertex(tri[2])?))
                    })
                    .collect()
            }
            None => {
                if self.positions.len() % 3 != 0 {
                    return Err(GeometryError::VertexCount {
                        mesh: self.name.clone(),
                        count: self.positions.len(),
                    });
                }

                Ok(self
                    .positions
                    .chunks_exact(3)
                    .map(|tri| Triangle::new(world(tri[0]), world(tri[1]), world(tri[2])))
                    .collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad_positions() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn test_indexed_mesh_with_transform() {
        let mesh = WorldMesh::new("quad", quad_positions())
            .with_indices(vec![0, 1, 2, 0, 2, 3])
            .with_transform(Transform {
                position: Vec3::new(0.0, 5.0, 0.0),
                ..Transform::from_uniform_scale(2.0)
            });

        let triangles = mesh.triangles().unwrap();
        assert_eq!(triangles.len(), 2);
        assert_relative_eq!(triangles[0].v2, Vec3::new(2.0, 5.0, 2.0), epsilon = 1e-6);
        assert_relative_eq!(triangles[1].v2, Vec3::new(2.0, 5.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_non_indexed_mesh() {
        let mut positions = quad_positions();
        positions.truncate(3);
        let triangles = WorldMesh::new("tri", positions).triangles().unwrap();
        assert_eq!(triangles.len(), 1);
    }

    #[test]
    fn test_malformed_meshes() {
        let err = WorldMesh::new("bad", quad_positions()).triangles().unwrap_err();
        assert!(matches!(err, GeometryError::VertexCount { count: 4, .. }));

        let err = WorldMesh::new("bad", quad_positions())
            .with_indices(vec![0, 1])
            .triangles()
            .unwrap_err();
        assert!(matches!(err, GeometryError::IndexCount { count: 2, .. }));

        let err = WorldMesh::new("bad", quad_positions())
            .with_indices(vec![0, 1, 9])
            .triangles()
            .unwrap_err();
        assert!(matches!(err, GeometryError::IndexOutOfRange { index: 9, vertex_count: 4, .. }));
    }

    #[test]
    fn test_empty_mesh_is_valid() {
        assert!(WorldMesh::new("empty", Vec::new()).triangles().unwrap().is_empty());
    }
}
