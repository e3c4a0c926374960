use std::f32::consts::PI;
use std::ops::Mul;

/// 4x4 float matrix laid out as GL expects: `m[col][row]`, translation in
/// `m[3]`. Operations post-multiply in place, so the last one applied acts
/// first on a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
    pub m: [[f32; 4]; 4],
}

impl Default for Matrix {
    fn default() -> Self {
        Matrix::identity()
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, rhs: Matrix) -> Matrix {
        Matrix::multiply(&self, &rhs)
    }
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length == 0.0 {
        v
    } else {
        [v[0] / length, v[1] / length, v[2] / length]
    }
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

impl Matrix {
    pub fn identity() -> Self {
        let mut m = [[0.0; 4]; 4];
        for (i, row) in m.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Matrix { m }
    }

    pub fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
        let mut m = [[0.0; 4]; 4];
        for i in 0..4 {
            for j in 0..4 {
                m[i][j] = (0..4).map(|k| a.m[i][k] * b.m[k][j]).sum();
            }
        }
        Matrix { m }
    }

    pub fn translate(&mut self, tx: f32, ty: f32, tz: f32) -> &mut Self {
        for j in 0..4 {
            self.m[3][j] += self.m[0][j] * tx + self.m[1][j] * ty + self.m[2][j] * tz;
        }
        self
    }

    pub fn scale(&mut self, sx: f32, sy: f32, sz: f32) -> &mut Self {
        for (row, s) in self.m.iter_mut().zip([sx, sy, sz].iter()) {
            for v in row.iter_mut() {
                *v *= s;
            }
        }
        self
    }

    /// Rotates by `angle` degrees around `(x, y, z)`. A zero axis is ignored.
    pub fn rotate(&mut self, angle: f32, x: f32, y: f32, z: f32) -> &mut Self {
        let mag = (x * x + y * y + z * z).sqrt();
        if mag <= 0.0 {
            return self;
        }
        let (sin, cos) = (angle * PI / 180.0).sin_cos();
        let (x, y, z) = (x / mag, y / mag, z / mag);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, yz, zx) = (x * y, y * z, z * x);
        let (xs, ys, zs) = (x * sin, y * sin, z * sin);
        let one_minus_cos = 1.0 - cos;

        let rot = Matrix {
            m: [
                [one_minus_cos * xx + cos, one_minus_cos * xy - zs, one_minus_cos * zx + ys, 0.0],
                [one_minus_cos * xy + zs, one_minus_cos * yy + cos, one_minus_cos * yz - xs, 0.0],
                [one_minus_cos * zx - ys, one_minus_cos * yz + xs, one_minus_cos * zz + cos, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        };
        *self = rot * *self;
        self
    }

    /// Applies a symmetric frustum with half extents `w` by `h`. Invalid
    /// planes leave the matrix untouched.
    pub fn frustum(&mut self, w: f32, h: f32, near: f32, far: f32) -> &mut Self {
        let (left, right, bottom, top) = (-w, w, -h, h);
        let dx = right - left;
        let dy = top - bottom;
        let dz = far - near;
        if near <= 0.0 || far <= 0.0 || dx <= 0.0 || dy <= 0.0 || dz <= 0.0 {
            return self;
        }
        let frust = Matrix {
            m: [
                [2.0 * near / dx, 0.0, 0.0, 0.0],
                [0.0, 2.0 * near / dy, 0.0, 0.0],
                [(right + left) / dx, (top + bottom) / dy, -(near + far) / dz, -1.0],
                [0.0, 0.0, -2.0 * near * far / dz, 0.0],
            ],
        };
        *self = frust * *self;
        self
    }

    /// `fovy` is in degrees.
    pub fn perspective(&mut self, fovy: f32, aspect: f32, near: f32, far: f32) -> &mut Self {
        let h = (fovy / 360.0 * PI).tan() * near;
        let w = h * aspect;
        self.frustum(w, h, near, far)
    }

    pub fn ortho(
        &mut self,
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> &mut Self {
        let dx = right - left;
        let dy = top - bottom;
        let dz = far - near;
        if dx == 0.0 || dy == 0.0 || dz == 0.0 {
            return self;
        }
        let mut ortho = Matrix::identity();
        ortho.m[0][0] = 2.0 / dx;
        ortho.m[3][0] = -(right + left) / dx;
        ortho.m[1][1] = 2.0 / dy;
        ortho.m[3][1] = -(top + bottom) / dy;
        ortho.m[2][2] = -2.0 / dz;
        ortho.m[3][2] = -(near + far) / dz;
        *self = ortho * *self;
        self
    }

    /// View matrix for an eye at `eye` looking at `target`.
    pub fn look_at(eye: [f32; 3], target: [f32; 3], up: [f32; 3]) -> Matrix {
        let axis_z = normalize([target[0] - eye[0], target[1] - eye[1], target[2] - eye[2]]);
        let axis_x = normalize(cross(up, axis_z));
        let axis_y = normalize(cross(axis_z, axis_x));
        let dot = |a: [f32; 3]| a[0] * eye[0] + a[1] * eye[1] + a[2] * eye[2];

        let mut result = Matrix { m: [[0.0; 4]; 4] };
        for i in 0..3 {
            result.m[i][0] = -axis_x[i];
            result.m[i][1] = axis_y[i];
            result.m[i][2] = -axis_z[i];
        }
        result.m[3] = [dot(axis_x), -dot(axis_y), dot(axis_z), 1.0];
        result
    }

    /// Columns flattened in upload order for `glUniformMatrix4fv`.
    pub fn to_columns(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        for (i, row) in self.m.iter().enumerate() {
            out[i * 4..i * 4 + 4].copy_from_slice(row);
        }
        out
    }

    pub fn transform_point(&self, p: [f32; 3]) -> [f32; 4] {
        let v = [p[0], p[1], p[2], 1.0];
        let mut out = [0.0; 4];
        for (j, o) in out.iter_mut().enumerate() {
            *o = (0..4).map(|i| v[i] * self.m[i][j]).sum();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{} != {}", a, b);
    }

    #[test]
    fn identity_is_neutral() {
        let mut t = Matrix::identity();
        t.translate(1.0, 2.0, 3.0).rotate(30.0, 0.0, 1.0, 0.0);
        assert_eq!(Matrix::identity() * t, t);
        assert_eq!(t * Matrix::identity(), t);
    }

    #[test]
    fn translate_moves_origin() {
        let mut t = Matrix::identity();
        t.translate(1.0, -2.0, 3.0);
        assert_eq!(t.transform_point([0.0, 0.0, 0.0]), [1.0, -2.0, 3.0, 1.0]);
    }

    #[test]
    fn rotate_quarter_turn_about_z() {
        let mut r = Matrix::identity();
        r.rotate(90.0, 0.0, 0.0, 1.0);
        let p = r.transform_point([1.0, 0.0, 0.0]);
        assert_close(p[0], 0.0);
        assert_close(p[1].abs(), 1.0);
        assert_close(p[3], 1.0);
    }

    #[test]
    fn full_turn_returns_to_start() {
        let mut r = Matrix::identity();
        r.rotate(360.0, 1.0, 1.0, 0.0);
        let p = r.transform_point([0.3, -0.7, 2.0]);
        assert_close(p[0], 0.3);
        assert_close(p[1], -0.7);
        assert_close(p[2], 2.0);
    }

    #[test]
    fn rotate_with_zero_axis_is_ignored() {
        let mut r = Matrix::identity();
        r.rotate(45.0, 0.0, 0.0, 0.0);
        assert_eq!(r, Matrix::identity());
    }

    #[test]
    fn invalid_frustum_leaves_matrix() {
        let mut f = Matrix::identity();
        f.frustum(1.0, 1.0, 0.0, 10.0);
        assert_eq!(f, Matrix::identity());
        f.frustum(1.0, 1.0, 5.0, 1.0);
        assert_eq!(f, Matrix::identity());
    }

    #[test]
    fn perspective_maps_near_plane_to_minus_one() {
        let mut p = Matrix::identity();
        p.perspective(60.0, 1.5, 1.0, 20.0);
        let clip = p.transform_point([0.0, 0.0, -1.0]);
        assert_close(clip[2] / clip[3], -1.0);
        let clip = p.transform_point([0.0, 0.0, -20.0]);
        assert_close(clip[2] / clip[3], 1.0);
    }

    #[test]
    fn ortho_maps_box_to_unit_cube() {
        let mut o = Matrix::identity();
        o.ortho(0.0, 4.0, 0.0, 2.0, -1.0, 1.0);
        let p = o.transform_point([4.0, 2.0, 0.0]);
        assert_close(p[0], 1.0);
        assert_close(p[1], 1.0);

        let mut degenerate = Matrix::identity();
        degenerate.ortho(1.0, 1.0, 0.0, 2.0, -1.0, 1.0);
        assert_eq!(degenerate, Matrix::identity());
    }

    #[test]
    fn look_at_places_target_in_front() {
        let view = Matrix::look_at([0.0, 0.0, 5.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]);
        let p = view.transform_point([0.0, 0.0, 0.0]);
        assert_close(p[2], -5.0);
    }

    #[test]
    fn columns_follow_storage_order() {
        let mut t = Matrix::identity();
        t.translate(7.0, 8.0, 9.0);
        let cols = t.to_columns();
        assert_eq!(&cols[12..15], &[7.0, 8.0, 9.0]);
    }
}
