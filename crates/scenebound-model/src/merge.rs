use glam::Mat4;

use crate::{
    buffer::GeometryBuffer,
    geometry::MeshGeometry,
    node::SceneNode,
    options::TransformSpace,
    traverse::{walk_meshes, MeshVisitor},
};

/// Folds every mesh it is shown into one [`GeometryBuffer`].
///
/// Meshes that cannot be normalized to triangles are logged and skipped, the merge itself never fails.
#[derive(Debug, Default)]
pub struct GeometryMerger {
    buffer: GeometryBuffer,
    space: TransformSpace,
    merged_meshes: usize,
    skipped_meshes: usize,
}

impl GeometryMerger {
    pub fn new(space: TransformSpace) -> Self {
        Self {
            space,
            ..Default::default()
        }
    }

    /// Walks `root` and merges all of its meshes.
    pub fn merge_scene(root: &SceneNode, space: TransformSpace) -> Self {
        let mut merger = Self::new(space);
        walk_meshes(root, &mut merger);
        merger
    }

    pub fn merge(&mut self, node_name: &str, mesh: &MeshGeometry, world: Mat4) {
        scenebound_profiling::profile_function!();

        match mesh.to_faces() {
            Ok(faces) => {
                match self.space {
                    TransformSpace::Local => self.buffer.append(&faces),
                    TransformSpace::Scene => self.buffer.append_transformed(&faces, world),
                }
                self.merged_meshes += 1;
            }
            Err(err) => {
                log::warn!("Skipping mesh of node \"{}\": {}.", node_name, err);
                self.skipped_meshes += 1;
            }
        }
    }

    pub fn buffer(&self) -> &GeometryBuffer {
        &self.buffer
    }

    pub fn merged_meshes(&self) -> usize {
        self.merged_meshes
    }

    pub fn skipped_meshes(&self) -> usize {
        self.skipped_meshes
    }

    pub fn into_buffer(self) -> GeometryBuffer {
        self.buffer
    }
}

impl MeshVisitor for GeometryMerger {
    fn visit_mesh(&mut self, node: &SceneNode, mesh: &MeshGeometry, world: Mat4) {
        self.merge(&node.name, mesh, world);
    }
}
