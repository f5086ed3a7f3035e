//! Dense `f32` matrices.
//!
//! Points are row vectors: a homogeneous point `p` is transformed as `p × M`, so translations
//! live in the bottom row of a 4×4 matrix.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::{
    foundation::error::{WireError, WireResult},
    foundation::math::DEG2RAD,
    linalg::vector::Vector3F,
};

#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    width: usize,
    height: usize,
    data: Vec<f32>, // row-major
}

impl Matrix {
    /// Zero matrix with `width` columns and `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn identity(n: usize) -> Self {
        let mut m = Self::new(n, n);
        for i in 0..n {
            m[(i, i)] = 1.0;
        }
        m
    }

    pub fn from_rows<const W: usize>(rows: &[[f32; W]]) -> Self {
        Self {
            width: W,
            height: rows.len(),
            data: rows.iter().flatten().copied().collect(),
        }
    }

    /// Single-row matrix holding a homogeneous point.
    pub fn row_vector(v: [f32; 4]) -> Self {
        Self::from_rows(&[v])
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_square(&self, n: usize) -> bool {
        self.width == n && self.height == n
    }

    pub fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.width..(r + 1) * self.width]
    }

    /// `self × rhs`; requires `self.width == rhs.height`.
    pub fn multiply(&self, rhs: &Matrix) -> WireResult<Matrix> {
        if self.width != rhs.height {
            return Err(WireError::dimension(format!(
                "cannot multiply {}x{} by {}x{}: left column count must equal right row count",
                self.height, self.width, rhs.height, rhs.width
            )));
        }

        let mut out = Matrix::new(rhs.width, self.height);
        for r in 0..self.height {
            for c in 0..rhs.width {
                let mut sum = 0.0;
                for k in 0..self.width {
                    sum += self[(r, k)] * rhs[(k, c)];
                }
                out[(r, c)] = sum;
            }
        }
        Ok(out)
    }

    /// `v × self` for a homogeneous row vector; requires a 4×4 matrix.
    pub fn transform_row4(&self, v: [f32; 4]) -> WireResult<[f32; 4]> {
        if !self.is_square(4) {
            return Err(WireError::dimension(format!(
                "row transform needs a 4x4 matrix, got {}x{}",
                self.height, self.width
            )));
        }
        let mut out = [0.0f32; 4];
        for (c, slot) in out.iter_mut().enumerate() {
            let mut sum = 0.0;
            for (k, vk) in v.iter().enumerate() {
                sum += vk * self[(k, c)];
            }
            *slot = sum;
        }
        Ok(out)
    }

    /// Closed-form adjugate inverse of a 4×4 matrix.
    ///
    /// Returns `Ok(None)` when the determinant is exactly zero and a dimension error when the
    /// matrix is not 4×4.
    pub fn inverse4x4(&self) -> WireResult<Option<Matrix>> {
        if !self.is_square(4) {
            return Err(WireError::dimension(format!(
                "inverse4x4 needs a 4x4 matrix, got {}x{}",
                self.height, self.width
            )));
        }

        let mut cofactors = [[0.0f32; 4]; 4];
        for (r, row) in cofactors.iter_mut().enumerate() {
            for (c, slot) in row.iter_mut().enumerate() {
                let sign = if (r + c) % 2 == 0 { 1.0 } else { -1.0 };
                *slot = sign * self.minor3(r, c);
            }
        }

        let det: f32 = (0..4).map(|c| self[(0, c)] * cofactors[0][c]).sum();
        if det == 0.0 {
            return Ok(None);
        }

        let inv_det = 1.0 / det;
        let mut inv = Matrix::new(4, 4);
        for r in 0..4 {
            for c in 0..4 {
                // adjugate = transposed cofactor matrix
                inv[(r, c)] = cofactors[c][r] * inv_det;
            }
        }
        Ok(Some(inv))
    }

    /// Determinant of the 3×3 matrix left after deleting row `skip_r` and column `skip_c`.
    fn minor3(&self, skip_r: usize, skip_c: usize) -> f32 {
        let mut m = [[0.0f32; 3]; 3];
        let rows = (0..4).filter(|&r| r != skip_r);
        for (dst_r, r) in rows.enumerate() {
            let cols = (0..4).filter(|&c| c != skip_c);
            for (dst_c, c) in cols.enumerate() {
                m[dst_r][dst_c] = self[(r, c)];
            }
        }
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Homogeneous translation by `offset` (bottom-row convention).
    pub fn translation4x4(offset: Vector3F) -> Self {
        let mut m = Self::identity(4);
        m[(3, 0)] = offset.x;
        m[(3, 1)] = offset.y;
        m[(3, 2)] = offset.z;
        m
    }

    /// Rotation from Euler angles in degrees, composed X, then Y, then Z.
    pub fn rotation4x4(euler_deg: Vector3F) -> Self {
        let (sx, cx) = (euler_deg.x * DEG2RAD).sin_cos();
        let (sy, cy) = (euler_deg.y * DEG2RAD).sin_cos();
        let (sz, cz) = (euler_deg.z * DEG2RAD).sin_cos();

        Self::from_rows(&[
            [cy * cz, -cy * sz, sy, 0.0],
            [cz * sx * sy + cx * sz, cx * cz - sx * sy * sz, -cy * sx, 0.0],
            [-cx * cz * sy + sx * sz, cz * sx + cx * sy * sz, cx * cy, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Element-wise comparison within `eps`; shapes must match.
    pub fn approx_eq(&self, other: &Matrix, eps: f32) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| (a - b).abs() <= eps)
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f32;

    /// `(row, column)`
    fn index(&self, (r, c): (usize, usize)) -> &f32 {
        &self.data[r * self.width + c]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (r, c): (usize, usize)) -> &mut f32 {
        &mut self.data[r * self.width + c]
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Matrix[")?;
        for r in 0..self.height {
            let cells: Vec<String> = self.row(r).iter().map(f32::to_string).collect();
            writeln!(f, "{}", cells.join(", "))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/linalg/matrix.rs"]
mod tests;
