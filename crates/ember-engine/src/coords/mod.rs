//! Math types for the sandbox renderer.
//!
//! World space is right-handed, +Y up; cameras look down -Z. Matrices are
//! column-major and multiply column vectors (`M * v`), so `A * B` applies `B` first.

mod camera;
mod mat4;
mod transform;
mod vec3;
mod viewport;

pub use camera::{Camera, ProjectionMode};
pub use mat4::Mat4;
pub use transform::Transform;
pub use vec3::Vec3;
pub use viewport::Viewport;
