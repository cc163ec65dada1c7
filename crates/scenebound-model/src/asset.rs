use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use glam::{Quat, Vec3};
use scenebound_transform::Transform;

use crate::{
    geometry::{IndexedGeometry, MeshGeometry},
    node::SceneNode,
    parser::{ParseError, SceneParser},
};

/// Reads glTF 2.0 (`.gltf` and `.glb`) into a scene hierarchy.
///
/// The nodes of the default scene (or the first scene when none is marked default) become children
/// of a synthetic root named after the scene. Only geometry is read, materials and images are ignored.
#[derive(Debug, Clone, Default)]
pub struct GltfParser {
    base_dir: Option<PathBuf>,
}

impl GltfParser {
    /// External `.bin` buffers are resolved relative to `base_dir`.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: Some(base_dir.into()),
        }
    }

    pub fn base_dir(&self) -> Option<&Path> {
        self.base_dir.as_deref()
    }
}

impl SceneParser for GltfParser {
    fn parse(&self, data: &[u8]) -> Result<SceneNode, ParseError> {
        scenebound_profiling::profile_function!();

        let gltf::Gltf { document, blob } = gltf::Gltf::from_slice(data)?;
        let buffers = gltf::import_buffers(&document, self.base_dir.as_deref(), blob)?;

        let scene = document
            .default_scene()
            .or_else(|| document.scenes().next());

        let mut meshes = vec![None; document.meshes().len()];
        let mut root = SceneNode::new(
            scene
                .as_ref()
                .and_then(|scene| scene.name())
                .unwrap_or("Scene"),
        );

        if let Some(scene) = scene {
            for node in scene.nodes() {
                root.children
                    .push(process_node_tree(&node, &buffers, &mut meshes)?);
            }
        } else {
            log::warn!("glTF document contains no scenes.");
        }

        Ok(root)
    }
}

/// Builds the subtree below `node` with an explicit stack of ancestors.
/// A node listed below itself makes the document invalid.
fn process_node_tree<'a>(
    node: &gltf::Node<'a>,
    buffers: &[gltf::buffer::Data],
    meshes: &mut [Option<Arc<MeshGeometry>>],
) -> Result<SceneNode, ParseError> {
    let mut root = process_node(node, buffers, meshes)?;
    let mut root_children = node.children();
    let mut path: Vec<(usize, gltf::scene::iter::Children<'a>, SceneNode)> = Vec::new();

    loop {
        let next = match path.last_mut() {
            Some((_, children, _)) => children.next(),
            None => root_children.next(),
        };

        match next {
            Some(child) => {
                if child.index() == node.index()
                    || path.iter().any(|(index, _, _)| *index == child.index())
                {
                    return Err(ParseError::Invalid(format!(
                        "node {} is its own ancestor",
                        child.index()
                    )));
                }

                let scene_node = process_node(&child, buffers, meshes)?;
                path.push((child.index(), child.children(), scene_node));
            }
            None => match path.pop() {
                Some((_, _, finished)) => match path.last_mut() {
                    Some((_, _, parent)) => parent.children.push(finished),
                    None => root.children.push(finished),
                },
                None => return Ok(root),
            },
        }
    }
}

fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    meshes: &mut [Option<Arc<MeshGeometry>>],
) -> Result<SceneNode, ParseError> {
    scenebound_profiling::profile_function!();

    let (translation, rotation, scale) = node.transform().decomposed();
    let transform = Transform::new(
        Vec3::from(translation),
        Quat::from_array(rotation),
        Vec3::from(scale),
    );

    let mesh = match node.mesh() {
        Some(mesh) => {
            let slot = meshes
                .get_mut(mesh.index())
                .ok_or_else(|| ParseError::Invalid(format!("mesh {} out of range", mesh.index())))?;
            Some(slot.get_or_insert_with(|| Arc::new(process_mesh(&mesh, buffers))).clone())
        }
        None => None,
    };

    Ok(SceneNode {
        name: node.name().unwrap_or("Unnamed").to_owned(),
        transform,
        children: vec![],
        mesh,
    })
}

/// Concatenates the triangle primitives of `mesh` into one indexed buffer.
fn process_mesh(mesh: &gltf::Mesh, buffers: &[gltf::buffer::Data]) -> MeshGeometry {
    scenebound_profiling::profile_function!();

    let mesh_name = mesh.name().unwrap_or("Unnamed");

    let mut mesh_positions: Vec<f32> = vec![];
    let mut mesh_indices: Vec<u32> = vec![];
    let mut any_indexed = false;
    let mut unsupported_mode = None;

    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!(
                "Ignoring {:?} primitive of mesh \"{}\", only triangles are supported.",
                primitive.mode(),
                mesh_name
            );
            unsupported_mode = Some(primitive.mode());
            continue;
        }

        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| &data[..]));

        let Some(positions) = reader.read_positions() else {
            log::warn!(
                "Ignoring primitive {} of mesh \"{}\" without positions.",
                primitive.index(),
                mesh_name
            );
            continue;
        };

        let base = (mesh_positions.len() / 3) as u32;
        let mut vertex_count = 0u32;
        for position in positions {
            mesh_positions.extend_from_slice(&position);
            vertex_count += 1;
        }

        match reader.read_indices() {
            Some(indices) => {
                any_indexed = true;
                mesh_indices.extend(indices.into_u32().map(|index| index + base));
            }
            None => mesh_indices.extend(base..base + vertex_count),
        }
    }

    if mesh_positions.is_empty() {
        if let Some(mode) = unsupported_mode {
            return MeshGeometry::unsupported(format!("{:?} primitives", mode));
        }
    }

    MeshGeometry::Indexed(IndexedGeometry::from_positions(
        mesh_positions,
        any_indexed.then_some(mesh_indices),
    ))
}
