use std::sync::Arc;

use scenebound_transform::Transform;

use crate::geometry::MeshGeometry;

/// Node of a loaded scene hierarchy. Children are owned, so the hierarchy is always a tree.
///
/// Geometry is reference counted because scene formats let several nodes instance one mesh.
/// Cloning and dropping walk the subtree with an explicit stack, any depth is fine.
#[derive(Debug, Default)]
pub struct SceneNode {
    pub name: String,

    pub transform: Transform,
    pub children: Vec<SceneNode>,

    pub mesh: Option<Arc<MeshGeometry>>,
}

impl SceneNode {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            transform: Transform::default(),
            children: vec![],
            mesh: None,
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_mesh(mut self, mesh: impl Into<Arc<MeshGeometry>>) -> Self {
        self.mesh = Some(mesh.into());
        self
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = SceneNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn has_mesh(&self) -> bool {
        self.mesh.is_some()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        crate::traverse::traverse_nodes(self, |_, _| count += 1);
        count
    }

    /// Number of nodes in this subtree carrying geometry.
    pub fn mesh_count(&self) -> usize {
        let mut count = 0;
        crate::traverse::traverse_meshes(self, |_, _, _| count += 1);
        count
    }

    /// First node named `name` in depth-first pre-order.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        let mut found = None;
        crate::traverse::traverse_nodes(self, |node, _| {
            if found.is_none() && node.name == name {
                found = Some(node);
            }
        });
        found
    }

    fn clone_without_children(&self) -> Self {
        Self {
            name: self.name.clone(),
            transform: self.transform.clone(),
            children: Vec::with_capacity(self.children.len()),
            mesh: self.mesh.clone(),
        }
    }
}

impl Clone for SceneNode {
    fn clone(&self) -> Self {
        let mut root = self.clone_without_children();
        let mut root_children = self.children.iter();
        let mut path: Vec<(std::slice::Iter<'_, SceneNode>, SceneNode)> = Vec::new();

        loop {
            let next = match path.last_mut() {
                Some((children, _)) => children.next(),
                None => root_children.next(),
            };

            match next {
                Some(child) => path.push((child.children.iter(), child.clone_without_children())),
                None => match path.pop() {
                    Some((_, finished)) => match path.last_mut() {
                        Some((_, parent)) => parent.children.push(finished),
                        None => root.children.push(finished),
                    },
                    None => return root,
                },
            }
        }
    }
}

impl Drop for SceneNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::geometry::FaceGeometry;

    fn chain(depth: usize) -> SceneNode {
        let mut node = SceneNode::new("leaf").with_mesh(MeshGeometry::from(FaceGeometry::new(
            vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            vec![[0, 1, 2]],
        )));
        for level in 0..depth {
            node = SceneNode::new(&level.to_string()).with_child(node);
        }
        node
    }

    #[test]
    fn find_returns_first_in_pre_order() {
        let root = SceneNode::new("root")
            .with_child(SceneNode::new("a").with_child(SceneNode::new("twin").with_mesh(
                MeshGeometry::from(FaceGeometry::default()),
            )))
            .with_child(SceneNode::new("twin"));

        assert!(root.find("twin").is_some_and(|node| node.has_mesh()));
        assert_eq!(root.find("root").map(|node| node.children.len()), Some(2));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn clone_keeps_shape_and_shares_meshes() {
        let root = SceneNode::new("root")
            .with_child(SceneNode::new("a").with_child(SceneNode::new("a0")))
            .with_child(chain(2));
        let copy = root.clone();

        assert_eq!(copy.node_count(), root.node_count());
        assert_eq!(copy.children[0].children[0].name, "a0");
        assert_eq!(copy.children[1].name, "1");
        assert!(Arc::ptr_eq(
            copy.find("leaf").and_then(|node| node.mesh.as_ref()).unwrap(),
            root.find("leaf").and_then(|node| node.mesh.as_ref()).unwrap()
        ));
    }

    #[test]
    fn deep_chains_clone_and_drop() {
        let root = chain(100_000);
        let copy = root.clone();

        assert_eq!(copy.mesh_count(), 1);
        assert_eq!(copy.find("leaf").map(|node| node.name.as_str()), Some("leaf"));
        drop(root);
        drop(copy);
    }
}
