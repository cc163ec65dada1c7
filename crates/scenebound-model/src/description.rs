//! Minimal JSON scene description.
//!
//! ```json
//! {
//!     "name": "root",
//!     "transform": { "translation": [0, 1, 0], "rotation": [0, 0, 0, 1], "scale": [1, 1, 1] },
//!     "children": [
//!         {
//!             "name": "triangle",
//!             "geometry": { "type": "faces", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "faces": [[0, 1, 2]] }
//!         },
//!         {
//!             "name": "quad",
//!             "transform": { "matrix": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 2, 0, 0, 1] },
//!             "geometry": { "type": "indexed", "positions": [0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0], "indices": [0, 1, 2, 2, 1, 3] }
//!         }
//!     ]
//! }
//! ```
//!
//! Matrices are column-major and rotations are `[x, y, z, w]` quaternions, as in glTF.

use std::sync::Arc;

use glam::{Mat4, Quat, Vec3};
use scenebound_transform::Transform;
use serde::Deserialize;

use crate::{
    geometry::{FaceGeometry, IndexedGeometry, MeshGeometry},
    node::SceneNode,
    parser::{ParseError, SceneParser},
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NodeDescription {
    pub name: Option<String>,
    pub transform: Option<TransformDescription>,
    pub geometry: Option<GeometryDescription>,
    pub children: Vec<NodeDescription>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransformDescription {
    pub matrix: Option<[f32; 16]>,
    pub translation: Option<[f32; 3]>,
    pub rotation: Option<[f32; 4]>,
    pub scale: Option<[f32; 3]>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDescription {
    Faces {
        vertices: Vec<[f32; 3]>,
        faces: Vec<[u32; 3]>,
    },
    Indexed {
        positions: Vec<f32>,
        #[serde(default = "default_stride")]
        stride: usize,
        #[serde(default)]
        position_offset: usize,
        #[serde(default)]
        indices: Option<Vec<u32>>,
    },
    #[serde(other)]
    Unknown,
}

fn default_stride() -> usize {
    3
}

impl TransformDescription {
    fn to_transform(&self) -> Result<Transform, ParseError> {
        if let Some(matrix) = &self.matrix {
            return Ok(Transform::from(Mat4::from_cols_array(matrix)));
        }

        let rotation = match self.rotation {
            Some(rotation) => {
                let rotation = Quat::from_array(rotation);
                if rotation.length_squared() <= f32::EPSILON {
                    return Err(ParseError::Invalid(
                        "rotation quaternion has zero length".to_owned(),
                    ));
                }
                rotation.normalize()
            }
            None => Quat::IDENTITY,
        };

        Ok(Transform::new(
            self.translation.map_or(Vec3::ZERO, Vec3::from),
            rotation,
            self.scale.map_or(Vec3::ONE, Vec3::from),
        ))
    }
}

impl From<&GeometryDescription> for MeshGeometry {
    fn from(value: &GeometryDescription) -> Self {
        match value {
            GeometryDescription::Faces { vertices, faces } => MeshGeometry::Faces(
                FaceGeometry::new(vertices.iter().copied().map(Vec3::from).collect(), faces.clone()),
            ),
            GeometryDescription::Indexed {
                positions,
                stride,
                position_offset,
                indices,
            } => MeshGeometry::Indexed(IndexedGeometry::interleaved(
                positions.clone(),
                *stride,
                *position_offset,
                indices.clone(),
            )),
            GeometryDescription::Unknown => MeshGeometry::unsupported("unknown geometry type"),
        }
    }
}

impl NodeDescription {
    pub fn to_scene_node(&self) -> Result<SceneNode, ParseError> {
        let transform = match &self.transform {
            Some(transform) => transform.to_transform()?,
            None => Transform::default(),
        };

        Ok(SceneNode {
            name: self.name.clone().unwrap_or_else(|| "Unnamed".to_owned()),
            transform,
            children: self
                .children
                .iter()
                .map(NodeDescription::to_scene_node)
                .collect::<Result<_, _>>()?,
            mesh: self
                .geometry
                .as_ref()
                .map(|geometry| Arc::new(MeshGeometry::from(geometry))),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSceneParser;

impl SceneParser for JsonSceneParser {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError> {
        scenebound_profiling::profile_function!();

        let description: NodeDescription = serde_json::from_slice(data)?;
        description.to_scene_node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENE: &str = r#"{
        "name": "root",
        "transform": { "translation": [0, 1, 0] },
        "children": [
            {
                "name": "triangle",
                "geometry": { "type": "faces", "vertices": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "faces": [[0, 1, 2]] }
            },
            {
                "name": "quad",
                "transform": { "matrix": [1, 0, 0, 0, 0, 1, 0, 0, 0, 0, 1, 0, 2, 0, 0, 1] },
                "geometry": { "type": "indexed", "positions": [0, 0, 0, 1, 0, 0, 0, 1, 0, 1, 1, 0], "indices": [0, 1, 2, 2, 1, 3] }
            },
            { "geometry": { "type": "points", "positions": [0, 0, 0] } }
        ]
    }"#;

    #[test]
    fn parses_nodes_geometry_and_transforms() {
        let root = JsonSceneParser.parse(SCENE.as_bytes()).unwrap();

        assert_eq!(root.name, "root");
        assert_eq!(root.transform.get_translation(), Vec3::Y);
        assert_eq!(root.children.len(), 3);

        let triangle = root.find("triangle").unwrap();
        assert!(matches!(triangle.mesh.as_deref(), Some(MeshGeometry::Faces(faces)) if faces.face_count() == 1));

        let quad = root.find("quad").unwrap();
        assert!(quad.transform.get_translation().abs_diff_eq(Vec3::X * 2.0, 1e-6));
        assert!(matches!(quad.mesh.as_deref(), Some(MeshGeometry::Indexed(indexed)) if indexed.vertex_count() == 4));

        let unknown = &root.children[2];
        assert_eq!(unknown.name, "Unnamed");
        assert!(matches!(unknown.mesh.as_deref(), Some(MeshGeometry::Unsupported { .. })));
    }

    #[test]
    fn rejects_degenerate_rotations() {
        let err = JsonSceneParser
            .parse(br#"{ "transform": { "rotation": [0, 0, 0, 0] } }"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            JsonSceneParser.parse(b"{ \"children\": [ }"),
            Err(ParseError::Json(_))
        ));
    }
}
