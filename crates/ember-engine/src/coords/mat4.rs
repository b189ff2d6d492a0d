use std::ops::Mul;

use super::vec3::Vec3;

/// Column-major 4x4 matrix, laid out as WGSL `mat4x4<f32>` expects.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    pub cols: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4 {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    #[inline]
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        Self { cols }
    }

    pub fn scale(s: Vec3) -> Self {
        Self::from_cols([
            [s.x, 0.0, 0.0, 0.0],
            [0.0, s.y, 0.0, 0.0],
            [0.0, 0.0, s.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(t: Vec3) -> Self {
        Self::from_cols([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +X, in degrees.
    pub fn rotation_x(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_cols([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, s, 0.0],
            [0.0, -s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Y, in degrees.
    pub fn rotation_y(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_cols([
            [c, 0.0, -s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Z, in degrees.
    pub fn rotation_z(degrees: f32) -> Self {
        let (s, c) = degrees.to_radians().sin_cos();
        Self::from_cols([
            [c, s, 0.0, 0.0],
            [-s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection with a `[0, 1]` depth range.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        let h = 1.0 / (fov_y_degrees.to_radians() * 0.5).tan();
        let w = h / aspect;
        let r = far / (near - far);
        Self::from_cols([
            [w, 0.0, 0.0, 0.0],
            [0.0, h, 0.0, 0.0],
            [0.0, 0.0, r, -1.0],
            [0.0, 0.0, r * near, 0.0],
        ])
    }

    /// Right-handed orthographic projection with a `[0, 1]` depth range.
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        let rw = 1.0 / (right - left);
        let rh = 1.0 / (top - bottom);
        let r = 1.0 / (near - far);
        Self::from_cols([
            [2.0 * rw, 0.0, 0.0, 0.0],
            [0.0, 2.0 * rh, 0.0, 0.0],
            [0.0, 0.0, r, 0.0],
            [-(left + right) * rw, -(top + bottom) * rh, r * near, 1.0],
        ])
    }

    pub fn transpose(self) -> Self {
        let c = self.cols;
        let mut out = [[0.0; 4]; 4];
        for (i, col) in out.iter_mut().enumerate() {
            for (j, v) in col.iter_mut().enumerate() {
                *v = c[j][i];
            }
        }
        Self::from_cols(out)
    }

    /// Transforms a point (`w = 1`), without perspective divide.
    pub fn transform_point(self, p: Vec3) -> Vec3 {
        let c = self.cols;
        Vec3::new(
            c[0][0] * p.x + c[1][0] * p.y + c[2][0] * p.z + c[3][0],
            c[0][1] * p.x + c[1][1] * p.y + c[2][1] * p.z + c[3][1],
            c[0][2] * p.x + c[1][2] * p.y + c[2][2] * p.z + c[3][2],
        )
    }

    /// Transforms a direction (`w = 0`).
    pub fn transform_vector(self, v: Vec3) -> Vec3 {
        let c = self.cols;
        Vec3::new(
            c[0][0] * v.x + c[1][0] * v.y + c[2][0] * v.z,
            c[0][1] * v.x + c[1][1] * v.y + c[2][1] * v.z,
            c[0][2] * v.x + c[1][2] * v.y + c[2][2] * v.z,
        )
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let a = self.cols;
        let b = rhs.cols;
        let mut out = [[0.0; 4]; 4];
        for (col, out_col) in out.iter_mut().enumerate() {
            for (row, v) in out_col.iter_mut().enumerate() {
                *v = (0..4).map(|k| a[k][row] * b[col][k]).sum();
            }
        }
        Mat4::from_cols(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn identity_is_neutral() {
        let m = Mat4::translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::rotation_z(30.0);
        assert_eq!(Mat4::IDENTITY * m, m);
        assert_eq!(m * Mat4::IDENTITY, m);
    }

    #[test]
    fn translation_moves_points_not_vectors() {
        let m = Mat4::translation(Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(m.transform_point(Vec3::zero()), Vec3::new(1.0, -2.0, 0.5));
        assert_eq!(m.transform_vector(Vec3::new(1.0, 0.0, 0.0)), Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rotation_z_quarter_turn() {
        let p = Mat4::rotation_z(90.0).transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn rotation_y_quarter_turn() {
        let p = Mat4::rotation_y(90.0).transform_point(Vec3::new(0.0, 0.0, -1.0));
        assert!(approx(p, Vec3::new(-1.0, 0.0, 0.0)));
    }

    #[test]
    fn multiplication_applies_right_first() {
        let t = Mat4::translation(Vec3::new(1.0, 0.0, 0.0));
        let s = Mat4::scale(Vec3::new(2.0, 2.0, 2.0));
        let p = Vec3::new(1.0, 1.0, 0.0);
        assert_eq!((t * s).transform_point(p), Vec3::new(3.0, 2.0, 0.0));
        assert_eq!((s * t).transform_point(p), Vec3::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn rotation_transpose_is_inverse() {
        let r = Mat4::rotation_x(20.0) * Mat4::rotation_y(-35.0) * Mat4::rotation_z(50.0);
        let p = Vec3::new(0.3, -1.2, 2.0);
        assert!(approx((r.transpose() * r).transform_point(p), p));
    }

    #[test]
    fn orthographic_maps_near_far_to_unit_depth() {
        let m = Mat4::orthographic(-1.0, 1.0, -1.0, 1.0, 0.1, 100.0);
        let near = m.transform_point(Vec3::new(0.0, 0.0, -0.1));
        let far = m.transform_point(Vec3::new(0.0, 0.0, -100.0));
        assert!(near.z.abs() < 1e-5);
        assert!((far.z - 1.0).abs() < 1e-5);
    }
}
