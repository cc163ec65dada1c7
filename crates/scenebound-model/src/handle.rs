use scenebound_transform::Transform;
use uuid::Uuid;

use crate::{
    bounds::{fit_volumes, BoundingBox, BoundingSphere},
    buffer::GeometryBuffer,
    merge::GeometryMerger,
    node::SceneNode,
    options::BoundsOptions,
};

pub const PIVOT_NODE_NAME: &str = "Pivot";

/// A loaded scene together with its merged geometry and bounding volumes.
///
/// The volumes are fitted once, when the handle is built, and only change through [`ModelHandle::recompute`].
/// The loaded root hangs below a synthetic pivot node whose transform callers may freely adjust.
#[derive(Debug, Clone)]
pub struct ModelHandle {
    uuid: Uuid,
    pivot: SceneNode,
    options: BoundsOptions,

    geometry: GeometryBuffer,
    bounding_box: BoundingBox,
    bounding_sphere: BoundingSphere,

    mesh_count: usize,
    skipped_mesh_count: usize,
}

impl Default for ModelHandle {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<SceneNode> for ModelHandle {
    fn from(root: SceneNode) -> Self {
        Self::new(Some(root))
    }
}

impl ModelHandle {
    /// Builds a handle around `root`. An absent or mesh-less root gives an empty handle.
    pub fn new(root: Option<SceneNode>) -> Self {
        Self::with_options(root, BoundsOptions::default())
    }

    pub fn with_options(root: Option<SceneNode>, options: BoundsOptions) -> Self {
        scenebound_profiling::profile_function!();

        let mut pivot = SceneNode::new(PIVOT_NODE_NAME);
        pivot.children.extend(root);

        let mut handle = Self {
            uuid: Uuid::new_v4(),
            pivot,
            options,
            geometry: GeometryBuffer::default(),
            bounding_box: BoundingBox::EMPTY,
            bounding_sphere: BoundingSphere::EMPTY,
            mesh_count: 0,
            skipped_mesh_count: 0,
        };
        handle.recompute();
        handle
    }

    pub fn empty() -> Self {
        Self::new(None)
    }

    /// Re-merges the scene and fits fresh volumes.
    pub fn recompute(&mut self) {
        let merger = match self.root() {
            Some(root) => GeometryMerger::merge_scene(root, self.options.transform_space),
            None => GeometryMerger::new(self.options.transform_space),
        };

        self.mesh_count = merger.merged_meshes();
        self.skipped_mesh_count = merger.skipped_meshes();
        self.geometry = merger.into_buffer();
        (self.bounding_box, self.bounding_sphere) =
            fit_volumes(&self.geometry, self.options.sphere_center);

        log::debug!(
            "Fitted bounds over {} vertices from {} meshes ({} skipped).",
            self.geometry.vertex_count(),
            self.mesh_count,
            self.skipped_mesh_count
        );
    }

    pub fn recompute_with(&mut self, options: BoundsOptions) {
        self.options = options;
        self.recompute();
    }

    pub fn uuid(&self) -> Uuid {
        self.uuid
    }

    pub fn root(&self) -> Option<&SceneNode> {
        self.pivot.children.first()
    }

    pub fn pivot(&self) -> &SceneNode {
        &self.pivot
    }

    /// Transform of the pivot. Changing it does not affect the fitted volumes.
    pub fn pivot_transform_mut(&mut self) -> &mut Transform {
        &mut self.pivot.transform
    }

    pub fn options(&self) -> &BoundsOptions {
        &self.options
    }

    pub fn geometry(&self) -> &GeometryBuffer {
        &self.geometry
    }

    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    pub fn bounding_sphere(&self) -> &BoundingSphere {
        &self.bounding_sphere
    }

    /// True when no mesh contributed any vertex, volumes are then in their sentinel state.
    pub fn is_empty(&self) -> bool {
        self.geometry.is_empty()
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_count
    }

    pub fn skipped_mesh_count(&self) -> usize {
        self.skipped_mesh_count
    }

    pub fn into_root(mut self) -> Option<SceneNode> {
        self.pivot.children.pop()
    }
}
