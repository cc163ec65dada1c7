use glam::Vec3;

use crate::{buffer::GeometryBuffer, options::SphereCenter};

/// Axis-aligned box. [`BoundingBox::EMPTY`] (min at +inf, max at -inf) stands for "no geometry".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Vec3,
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingBox {
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut bounds = Self::EMPTY;
        for point in points {
            bounds.extend(*point);
        }
        bounds
    }

    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }

    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Sphere enclosing a set of points, not necessarily the smallest one.
/// A negative radius ([`BoundingSphere::EMPTY`]) stands for "no geometry".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl Default for BoundingSphere {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl BoundingSphere {
    pub const EMPTY: Self = Self {
        center: Vec3::ZERO,
        radius: -1.0,
    };

    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Radius is the largest distance from `center` to any point.
    pub fn from_points<'a>(center: Vec3, points: impl IntoIterator<Item = &'a Vec3>) -> Self {
        let mut points = points.into_iter().peekable();
        if points.peek().is_none() {
            return Self::EMPTY;
        }

        let radius_squared = points.fold(0.0f32, |radius_squared, point| {
            radius_squared.max(center.distance_squared(*point))
        });

        Self {
            center,
            radius: radius_squared.sqrt(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.radius >= 0.0
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.is_valid() && self.center.distance(point) <= self.radius
    }
}

pub fn fit_box(buffer: &GeometryBuffer) -> BoundingBox {
    scenebound_profiling::profile_function!();

    BoundingBox::from_points(buffer.positions())
}

pub fn fit_sphere(
    buffer: &GeometryBuffer,
    bounding_box: &BoundingBox,
    center: SphereCenter,
) -> BoundingSphere {
    scenebound_profiling::profile_function!();

    if buffer.is_empty() {
        return BoundingSphere::EMPTY;
    }

    let center = match center {
        SphereCenter::BoxMidpoint => bounding_box.center(),
        SphereCenter::Centroid => {
            let sum = buffer
                .positions()
                .iter()
                .fold(glam::DVec3::ZERO, |sum, position| sum + position.as_dvec3());
            (sum / buffer.vertex_count() as f64).as_vec3()
        }
    };

    BoundingSphere::from_points(center, buffer.positions())
}

/// Box and sphere of a buffer, in that order.
pub fn fit_volumes(buffer: &GeometryBuffer, center: SphereCenter) -> (BoundingBox, BoundingSphere) {
    let bounding_box = fit_box(buffer);
    let bounding_sphere = fit_sphere(buffer, &bounding_box, center);
    (bounding_box, bounding_sphere)
}
