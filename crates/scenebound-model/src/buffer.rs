use glam::{Mat4, Vec3};

use crate::geometry::FaceGeometry;

/// Append-only accumulation of canonical geometry from any number of meshes.
///
/// Vertices are never deduplicated, so the vertex count is the sum over all appended meshes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryBuffer {
    positions: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
}

impl GeometryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(vertices: usize, triangles: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            triangles: Vec::with_capacity(triangles),
        }
    }

    /// Appends `geometry`, offsetting its triangle indices past the vertices already stored.
    pub fn append(&mut self, geometry: &FaceGeometry) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&geometry.vertices);
        self.push_faces(base, &geometry.faces);
    }

    pub fn append_transformed(&mut self, geometry: &FaceGeometry, transform: Mat4) {
        let base = self.positions.len() as u32;
        self.positions.extend(
            geometry
                .vertices
                .iter()
                .map(|vertex| transform.transform_point3(*vertex)),
        );
        self.push_faces(base, &geometry.faces);
    }

    fn push_faces(&mut self, base: u32, faces: &[[u32; 3]]) {
        self.triangles
            .extend(faces.iter().map(|face| face.map(|index| index + base)));
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Positions as `[x0, y0, z0, x1, ...]`.
    pub fn flat_positions(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn flat_indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.triangles.clear();
    }
}
