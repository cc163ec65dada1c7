use glam::{Mat4, Quat, Vec3};
use parking_lot::Mutex;

/// Local translation, rotation and scale of a scene node.
///
/// The composed matrix is rebuilt lazily the first time it is requested after a change.
#[derive(Debug)]
pub struct Transform {
    translation: Vec3,
    rotation: Quat,
    scale: Vec3,
    // (matrix, dirty)
    matrix: Mutex<(Mat4, bool)>,
}

impl Clone for Transform {
    fn clone(&self) -> Self {
        Self {
            translation: self.translation,
            rotation: self.rotation,
            scale: self.scale,
            matrix: Mutex::new(*self.matrix.lock()),
        }
    }
}

impl PartialEq for Transform {
    fn eq(&self, other: &Self) -> bool {
        self.translation == other.translation
            && self.rotation == other.rotation
            && self.scale == other.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl From<Mat4> for Transform {
    fn from(value: Mat4) -> Self {
        let (scale, rotation, translation) = value.to_scale_rotation_translation();
        Self {
            translation,
            rotation,
            scale,
            matrix: Mutex::new((value, false)),
        }
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE)
    }

    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
            matrix: Mutex::new((
                Mat4::from_scale_rotation_translation(scale, rotation, translation),
                false,
            )),
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::IDENTITY, Vec3::ONE)
    }

    pub fn from_scale(scale: Vec3) -> Self {
        Self::new(Vec3::ZERO, Quat::IDENTITY, scale)
    }

    pub fn get_translation(&self) -> Vec3 {
        self.translation
    }

    pub fn get_rotation(&self) -> Quat {
        self.rotation
    }

    pub fn get_scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_translation(&mut self, translation: Vec3) {
        self.translation = translation;
        self.mark_dirty();
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
        self.mark_dirty();
    }

    pub fn set_scale(&mut self, scale: Vec3) {
        self.scale = scale;
        self.mark_dirty();
    }

    pub fn get_matrix(&self) -> Mat4 {
        let mut matrix = self.matrix.lock();

        if matrix.1 {
            matrix.0 =
                Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation);
            matrix.1 = false;
        }

        matrix.0
    }

    fn mark_dirty(&mut self) {
        self.matrix.get_mut().1 = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matrix() {
        let t = Transform::default();
        assert_eq!(t, Transform::new(Vec3::ZERO, Quat::IDENTITY, Vec3::ONE));
        assert!(t.get_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn matrix_follows_setters() {
        let mut t = Transform::from_translation(Vec3::new(1.0, 2.0, 3.0));
        assert!(t
            .get_matrix()
            .transform_point3(Vec3::ZERO)
            .abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-6));

        t.set_scale(Vec3::splat(2.0));
        t.set_translation(Vec3::new(2.0, 2.0, 3.0));
        assert!(t
            .get_matrix()
            .transform_point3(Vec3::ONE)
            .abs_diff_eq(Vec3::new(4.0, 4.0, 5.0), 1e-6));
    }

    #[test]
    fn from_matrix_decomposes() {
        let rotation = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let t = Transform::from(Mat4::from_rotation_translation(rotation, Vec3::Z));

        assert!(t.get_translation().abs_diff_eq(Vec3::Z, 1e-6));
        assert!(t.get_rotation().abs_diff_eq(rotation, 1e-6));
        assert!(t.get_scale().abs_diff_eq(Vec3::ONE, 1e-6));
        assert!((t.get_rotation() * Vec3::Z).abs_diff_eq(Vec3::X, 1e-6));
    }
}
