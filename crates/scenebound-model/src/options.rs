/// Where the bounding sphere is centered before its radius is fitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SphereCenter {
    /// Midpoint of the bounding box.
    #[default]
    BoxMidpoint,
    /// Average of all vertex positions.
    Centroid,
}

/// Coordinate space merged vertices are expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransformSpace {
    /// Vertices as stored in each mesh, node transforms ignored.
    #[default]
    Local,
    /// Vertices moved by the accumulated node transforms of the loaded scene. The pivot is not applied.
    Scene,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundsOptions {
    pub sphere_center: SphereCenter,
    pub transform_space: TransformSpace,
}

impl BoundsOptions {
    pub fn with_sphere_center(mut self, sphere_center: SphereCenter) -> Self {
        self.sphere_center = sphere_center;
        self
    }

    pub fn with_transform_space(mut self, transform_space: TransformSpace) -> Self {
        self.transform_space = transform_space;
        self
    }
}
