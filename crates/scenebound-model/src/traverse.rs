use glam::Mat4;

use crate::{geometry::MeshGeometry, node::SceneNode};

/// Receives every mesh found while walking a scene.
///
/// `world` is the product of the node transforms from the walked root down to and including `node`.
pub trait MeshVisitor {
    fn visit_mesh(&mut self, node: &SceneNode, mesh: &MeshGeometry, world: Mat4);
}

/// Depth-first pre-order walk over `root` and all of its descendants, siblings in stored order.
///
/// Uses an explicit stack so arbitrarily deep hierarchies cannot overflow the call stack.
pub fn traverse_nodes<'a>(root: &'a SceneNode, mut visit: impl FnMut(&'a SceneNode, Mat4)) {
    let mut stack = vec![(root, Mat4::IDENTITY)];

    while let Some((node, parent_world)) = stack.pop() {
        let world = parent_world * node.transform.get_matrix();
        visit(node, world);

        stack.extend(node.children.iter().rev().map(|child| (child, world)));
    }
}

pub fn traverse_meshes(
    root: &SceneNode,
    mut visit: impl FnMut(&SceneNode, &MeshGeometry, Mat4),
) {
    traverse_nodes(root, |node, world| {
        if let Some(mesh) = &node.mesh {
            visit(node, mesh, world);
        }
    });
}

pub fn walk_meshes<V: MeshVisitor + ?Sized>(root: &SceneNode, visitor: &mut V) {
    scenebound_profiling::profile_function!();

    traverse_meshes(root, |node, mesh, world| visitor.visit_mesh(node, mesh, world));
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use scenebound_transform::Transform;

    use super::*;
    use crate::geometry::FaceGeometry;

    fn mesh() -> MeshGeometry {
        FaceGeometry::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], vec![[0, 1, 2]]).into()
    }

    fn sample_tree() -> SceneNode {
        SceneNode::new("root")
            .with_child(
                SceneNode::new("a")
                    .with_mesh(mesh())
                    .with_child(SceneNode::new("a0"))
                    .with_child(SceneNode::new("a1").with_mesh(mesh())),
            )
            .with_child(SceneNode::new("b").with_child(SceneNode::new("b0").with_mesh(mesh())))
    }

    #[test]
    fn visits_every_node_once_in_pre_order() {
        let mut names = Vec::new();
        traverse_nodes(&sample_tree(), |node, _| names.push(node.name.clone()));

        assert_eq!(names, ["root", "a", "a0", "a1", "b", "b0"]);
    }

    #[test]
    fn only_meshes_reach_the_visitor() {
        struct Collect(Vec<String>);
        impl MeshVisitor for Collect {
            fn visit_mesh(&mut self, node: &SceneNode, _mesh: &MeshGeometry, _world: Mat4) {
                self.0.push(node.name.clone());
            }
        }

        let mut collect = Collect(Vec::new());
        walk_meshes(&sample_tree(), &mut collect);

        assert_eq!(collect.0, ["a", "a1", "b0"]);
        assert_eq!(sample_tree().mesh_count(), 3);
        assert_eq!(sample_tree().node_count(), 6);
    }

    #[test]
    fn world_transforms_accumulate() {
        let root = SceneNode::new("root")
            .with_transform(Transform::from_translation(Vec3::X))
            .with_child(
                SceneNode::new("child")
                    .with_transform(Transform::from_scale(Vec3::splat(2.0)))
                    .with_mesh(mesh()),
            );

        let mut worlds = Vec::new();
        traverse_meshes(&root, |_, _, world| worlds.push(world));

        assert_eq!(worlds.len(), 1);
        assert!(worlds[0]
            .transform_point3(Vec3::ONE)
            .abs_diff_eq(Vec3::new(3.0, 2.0, 2.0), 1e-6));
    }

    #[test]
    fn deep_hierarchies_do_not_recurse() {
        let mut node = SceneNode::new("leaf").with_mesh(mesh());
        for depth in 0..10_000 {
            node = SceneNode::new(&depth.to_string()).with_child(node);
        }

        let mut meshes = 0;
        traverse_meshes(&node, |_, _, _| meshes += 1);
        assert_eq!(meshes, 1);
    }
}
