use super::mat4::Mat4;
use super::vec3::Vec3;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Free-flying camera.
///
/// `rotation` holds Euler angles in degrees, applied X then Y then Z.
/// At zero rotation the camera looks down -Z with +Y up.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    pub rotation: Vec3,
    pub projection: ProjectionMode,

    /// Vertical field of view for perspective mode, in degrees.
    pub fov_y_deg: f32,
    /// Half-height of the view volume for orthographic mode.
    pub ortho_half_height: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 1.0),
            rotation: Vec3::zero(),
            projection: ProjectionMode::Perspective,
            fov_y_deg: 60.0,
            ortho_half_height: 1.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl Camera {
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::rotation_z(self.rotation.z)
            * Mat4::rotation_y(self.rotation.y)
            * Mat4::rotation_x(self.rotation.x)
    }

    /// World-to-camera transform: inverse of the camera's placement.
    pub fn view_matrix(&self) -> Mat4 {
        self.rotation_matrix().transpose() * Mat4::translation(-self.position)
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        match self.projection {
            ProjectionMode::Perspective => Mat4::perspective(self.fov_y_deg, aspect, self.near, self.far),
            ProjectionMode::Orthographic => {
                let h = self.ortho_half_height;
                Mat4::orthographic(-h * aspect, h * aspect, -h, h, self.near, self.far)
            }
        }
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Camera-local forward (-Z) in world space.
    pub fn forward(&self) -> Vec3 {
        self.rotation_matrix().transform_vector(Vec3::new(0.0, 0.0, -1.0))
    }

    /// Camera-local right (+X) in world space.
    pub fn right(&self) -> Vec3 {
        self.rotation_matrix().transform_vector(Vec3::new(1.0, 0.0, 0.0))
    }

    /// Camera-local up (+Y) in world space.
    pub fn up(&self) -> Vec3 {
        self.rotation_matrix().transform_vector(Vec3::new(0.0, 1.0, 0.0))
    }

    /// Moves along the camera's own axes: `delta.x` right, `delta.y` up, `delta.z` forward.
    pub fn move_local(&mut self, delta: Vec3) {
        self.position += self.right() * delta.x + self.up() * delta.y + self.forward() * delta.z;
    }

    pub fn rotate(&mut self, delta_deg: Vec3) {
        self.rotation += delta_deg;
    }
}
