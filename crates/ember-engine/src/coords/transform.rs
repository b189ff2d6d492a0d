use super::mat4::Mat4;
use super::vec3::Vec3;

/// Model transform for a single piece of 2D geometry.
///
/// Composed as `translate * rotate * scale`: the geometry is scaled about its
/// origin, rotated around +Z, then moved.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub scale: [f32; 2],
    pub rotate_deg: f32,
    pub translate: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0],
            rotate_deg: 0.0,
            translate: Vec3::zero(),
        }
    }
}

impl Transform {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::translation(self.translate)
            * Mat4::rotation_z(self.rotate_deg)
            * Mat4::scale(Vec3::new(self.scale[0], self.scale[1], 1.0))
    }
}
