use std::borrow::Cow;

use glam::Vec3;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("Unsupported geometry representation ({kind})")]
    UnsupportedRepresentation { kind: String },

    #[error("Vertex index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Malformed vertex buffer: {reason}")]
    MalformedBuffer { reason: String },
}

/// Canonical per-mesh geometry: vertex positions and triangles indexing into them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaceGeometry {
    pub vertices: Vec<Vec3>,
    pub faces: Vec<[u32; 3]>,
}

impl FaceGeometry {
    pub fn new(vertices: Vec<Vec3>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn validate(&self) -> Result<(), GeometryError> {
        let vertex_count = self.vertices.len();
        match self
            .faces
            .iter()
            .flatten()
            .find(|index| **index as usize >= vertex_count)
        {
            Some(index) => Err(GeometryError::IndexOutOfRange {
                index: *index,
                vertex_count,
            }),
            None => Ok(()),
        }
    }
}

/// Interleaved vertex attribute buffer with an optional triangle index list.
///
/// Every vertex occupies `stride` floats, its position being the three floats starting at
/// `position_offset`. Without indices, consecutive vertex triplets form the triangles.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedGeometry {
    pub attributes: Vec<f32>,
    pub stride: usize,
    pub position_offset: usize,
    pub indices: Option<Vec<u32>>,
}

impl IndexedGeometry {
    /// Tightly packed `xyz` positions.
    pub fn from_positions(positions: Vec<f32>, indices: Option<Vec<u32>>) -> Self {
        Self {
            attributes: positions,
            stride: 3,
            position_offset: 0,
            indices,
        }
    }

    pub fn interleaved(
        attributes: Vec<f32>,
        stride: usize,
        position_offset: usize,
        indices: Option<Vec<u32>>,
    ) -> Self {
        Self {
            attributes,
            stride,
            position_offset,
            indices,
        }
    }

    pub fn vertex_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.attributes.len() / self.stride
        }
    }

    /// Resolves the buffer into explicit triangles. Normals, uvs and other attributes are dropped.
    pub fn to_faces(&self) -> Result<FaceGeometry, GeometryError> {
        if self.stride < self.position_offset + 3 {
            return Err(GeometryError::MalformedBuffer {
                reason: format!(
                    "stride {} cannot hold a position at offset {}",
                    self.stride, self.position_offset
                ),
            });
        }
        if self.attributes.len() % self.stride != 0 {
            return Err(GeometryError::MalformedBuffer {
                reason: format!(
                    "{} floats is not a multiple of the stride {}",
                    self.attributes.len(),
                    self.stride
                ),
            });
        }

        let vertices: Vec<Vec3> = self
            .attributes
            .chunks_exact(self.stride)
            .map(|vertex| Vec3::from_slice(&vertex[self.position_offset..self.position_offset + 3]))
            .collect();

        let faces = match &self.indices {
            Some(indices) => {
                if indices.len() % 3 != 0 {
                    return Err(GeometryError::MalformedBuffer {
                        reason: format!("{} indices do not form whole triangles", indices.len()),
                    });
                }
                indices
                    .chunks_exact(3)
                    .map(|triangle| [triangle[0], triangle[1], triangle[2]])
                    .collect()
            }
            None => {
                if vertices.len() % 3 != 0 {
                    return Err(GeometryError::MalformedBuffer {
                        reason: format!(
                            "{} unindexed vertices do not form whole triangles",
                            vertices.len()
                        ),
                    });
                }
                (0..vertices.len() as u32 / 3)
                    .map(|triangle| [triangle * 3, triangle * 3 + 1, triangle * 3 + 2])
                    .collect()
            }
        };

        let faces = FaceGeometry { vertices, faces };
        faces.validate()?;
        Ok(faces)
    }
}

/// Geometry payload of a scene node, in whichever representation the source provided.
#[derive(Debug, Clone, PartialEq)]
pub enum MeshGeometry {
    Faces(FaceGeometry),
    Indexed(IndexedGeometry),
    /// Geometry the loader could read but not express as triangles (points, lines, unknown kinds).
    Unsupported { kind: String },
}

impl From<FaceGeometry> for MeshGeometry {
    fn from(value: FaceGeometry) -> Self {
        Self::Faces(value)
    }
}

impl From<IndexedGeometry> for MeshGeometry {
    fn from(value: IndexedGeometry) -> Self {
        Self::Indexed(value)
    }
}

impl MeshGeometry {
    pub fn unsupported(kind: impl Into<String>) -> Self {
        Self::Unsupported { kind: kind.into() }
    }

    pub fn vertex_count(&self) -> usize {
        match self {
            Self::Faces(faces) => faces.vertex_count(),
            Self::Indexed(indexed) => indexed.vertex_count(),
            Self::Unsupported { .. } => 0,
        }
    }

    /// Canonical form of this geometry, borrowed when it already is canonical.
    pub fn to_faces(&self) -> Result<Cow<'_, FaceGeometry>, GeometryError> {
        match self {
            Self::Faces(faces) => {
                faces.validate()?;
                Ok(Cow::Borrowed(faces))
            }
            Self::Indexed(indexed) => indexed.to_faces().map(Cow::Owned),
            Self::Unsupported { kind } => Err(GeometryError::UnsupportedRepresentation {
                kind: kind.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::X, Vec3::Y]
    }

    #[test]
    fn indexed_triangle_matches_faces() {
        let indexed = IndexedGeometry::from_positions(
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            Some(vec![0, 1, 2]),
        );
        let faces = indexed.to_faces().unwrap();

        assert_eq!(faces, FaceGeometry::new(triangle(), vec![[0, 1, 2]]));
    }

    #[test]
    fn unindexed_buffer_uses_vertex_triplets() {
        let positions = (0..6).flat_map(|i| [i as f32, 0.0, 0.0]).collect();
        let faces = IndexedGeometry::from_positions(positions, None)
            .to_faces()
            .unwrap();

        assert_eq!(faces.vertex_count(), 6);
        assert_eq!(faces.faces, vec![[0, 1, 2], [3, 4, 5]]);
    }

    #[test]
    fn interleaved_positions_are_extracted() {
        // uv, position, normal
        let attributes = vec![
            0.0, 0.0, 1.0, 2.0, 3.0, 0.0, 0.0, 1.0, //
            1.0, 0.0, 4.0, 5.0, 6.0, 0.0, 0.0, 1.0, //
            0.0, 1.0, 7.0, 8.0, 9.0, 0.0, 0.0, 1.0,
        ];
        let faces = IndexedGeometry::interleaved(attributes, 8, 2, Some(vec![2, 1, 0]))
            .to_faces()
            .unwrap();

        assert_eq!(
            faces.vertices,
            vec![
                Vec3::new(1.0, 2.0, 3.0),
                Vec3::new(4.0, 5.0, 6.0),
                Vec3::new(7.0, 8.0, 9.0)
            ]
        );
        assert_eq!(faces.faces, vec![[2, 1, 0]]);
    }

    #[test]
    fn malformed_buffers_are_rejected() {
        let short_stride = IndexedGeometry::interleaved(vec![0.0; 6], 2, 0, None);
        assert!(matches!(
            short_stride.to_faces(),
            Err(GeometryError::MalformedBuffer { .. })
        ));

        let ragged = IndexedGeometry::from_positions(vec![0.0; 7], None);
        assert!(matches!(
            ragged.to_faces(),
            Err(GeometryError::MalformedBuffer { .. })
        ));

        let partial_triangle = IndexedGeometry::from_positions(vec![0.0; 9], Some(vec![0, 1]));
        assert!(matches!(
            partial_triangle.to_faces(),
            Err(GeometryError::MalformedBuffer { .. })
        ));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let indexed = IndexedGeometry::from_positions(vec![0.0; 9], Some(vec![0, 1, 3]));
        assert_eq!(
            indexed.to_faces(),
            Err(GeometryError::IndexOutOfRange {
                index: 3,
                vertex_count: 3
            })
        );

        let faces = MeshGeometry::Faces(FaceGeometry::new(triangle(), vec![[0, 7, 1]]));
        assert!(faces.to_faces().is_err());
    }

    #[test]
    fn canonical_geometry_is_borrowed() {
        let mesh = MeshGeometry::from(FaceGeometry::new(triangle(), vec![[0, 1, 2]]));
        assert!(matches!(mesh.to_faces(), Ok(Cow::Borrowed(_))));
        assert!(matches!(
            MeshGeometry::unsupported("points").to_faces(),
            Err(GeometryError::UnsupportedRepresentation { kind }) if kind == "points"
        ));
    }
}
