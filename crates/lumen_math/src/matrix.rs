//! General-size matrices with 4x4 transform builders.
//!
//! `Matrix` is the checked, arbitrary-size form used for building and
//! inspecting transforms (cofactor expansion, submatrices, inverses). Once a
//! 4x4 is final it is converted into a [`Transform`](crate::Transform),
//! which caches its inverse as a `glam::DMat4` for the tracing hot path.

use glam::DMat4;

use crate::{approx_eq, MathError, MathResult, Tuple};

/// A row-major `rows x cols` matrix of doubles.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Zero-filled matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Build from row-major values. The slice length must be `rows * cols`.
    pub fn from_rows(rows: usize, cols: usize, values: &[f64]) -> MathResult<Self> {
        if values.len() != rows * cols {
            return Err(MathError::DimensionMismatch {
                expected: rows * cols,
                actual: values.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            data: values.to_vec(),
        })
    }

    pub fn identity(size: usize) -> Self {
        let mut m = Self::new(size, size);
        for i in 0..size {
            m.data[i * size + i] = 1.0;
        }
        m
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> MathResult<f64> {
        self.check_coordinate(row, col)?;
        Ok(self.at(row, col))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> MathResult<()> {
        self.check_coordinate(row, col)?;
        self.data[row * self.cols + col] = value;
        Ok(())
    }

    #[inline]
    fn at(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    fn check_coordinate(&self, row: usize, col: usize) -> MathResult<()> {
        if row >= self.rows || col >= self.cols {
            return Err(MathError::CoordinateOutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn require_square(&self) -> MathResult<()> {
        if self.rows != self.cols {
            return Err(MathError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    fn require_transform(&self) -> MathResult<()> {
        if self.rows != 4 || self.cols != 4 {
            return Err(MathError::NotTransform {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::new(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                out.data[c * self.rows + r] = self.at(r, c);
            }
        }
        out
    }

    pub fn add(&self, rhs: &Matrix) -> MathResult<Matrix> {
        self.zip_with(rhs, |a, b| a + b)
    }

    pub fn sub(&self, rhs: &Matrix) -> MathResult<Matrix> {
        self.zip_with(rhs, |a, b| a - b)
    }

    fn zip_with(&self, rhs: &Matrix, f: impl Fn(f64, f64) -> f64) -> MathResult<Matrix> {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            return Err(MathError::DimensionMismatch {
                expected: self.data.len(),
                actual: rhs.data.len(),
            });
        }
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().zip(&rhs.data).map(|(&a, &b)| f(a, b)).collect(),
        })
    }

    pub fn scale_by(&self, factor: f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|v| v * factor).collect(),
        }
    }

    /// Matrix product `self * rhs`.
    pub fn multiply(&self, rhs: &Matrix) -> MathResult<Matrix> {
        if self.cols != rhs.rows {
            return Err(MathError::DimensionMismatch {
                expected: self.cols,
                actual: rhs.rows,
            });
        }
        let mut out = Matrix::new(self.rows, rhs.cols);
        for r in 0..self.rows {
            for c in 0..rhs.cols {
                out.data[r * rhs.cols + c] =
                    (0..self.cols).map(|k| self.at(r, k) * rhs.at(k, c)).sum();
            }
        }
        Ok(out)
    }

    /// Multiply a 4x4 matrix by a homogeneous tuple.
    pub fn multiply_tuple(&self, t: Tuple) -> MathResult<Tuple> {
        self.require_transform()?;
        let v = [t.x, t.y, t.z, t.w];
        let row = |r: usize| (0..4).map(|k| self.at(r, k) * v[k]).sum::<f64>();
        Tuple::new(row(0), row(1), row(2), row(3)).validated()
    }

    /// Copy of this matrix with `row` and `col` removed.
    pub fn submatrix(&self, row: usize, col: usize) -> MathResult<Matrix> {
        self.check_coordinate(row, col)?;
        let mut data = Vec::with_capacity((self.rows - 1) * (self.cols - 1));
        for r in (0..self.rows).filter(|&r| r != row) {
            for c in (0..self.cols).filter(|&c| c != col) {
                data.push(self.at(r, c));
            }
        }
        Ok(Matrix {
            rows: self.rows - 1,
            cols: self.cols - 1,
            data,
        })
    }

    pub fn minor(&self, row: usize, col: usize) -> MathResult<f64> {
        self.submatrix(row, col)?.determinant()
    }

    pub fn cofactor(&self, row: usize, col: usize) -> MathResult<f64> {
        let minor = self.minor(row, col)?;
        Ok(if (row + col) % 2 == 0 { minor } else { -minor })
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> MathResult<f64> {
        self.require_square()?;
        match self.rows {
            0 => Ok(1.0),
            1 => Ok(self.data[0]),
            2 => Ok(self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0)),
            _ => {
                let mut det = 0.0;
                for c in 0..self.cols {
                    det += self.at(0, c) * self.cofactor(0, c)?;
                }
                Ok(det)
            }
        }
    }

    pub fn is_invertible(&self) -> MathResult<bool> {
        Ok(self.determinant()? != 0.0)
    }

    pub fn inverse(&self) -> MathResult<Matrix> {
        let det = self.determinant()?;
        if det == 0.0 {
            return Err(MathError::Singular);
        }
        let mut out = Matrix::new(self.rows, self.cols);
        for r in 0..self.rows {
            for c in 0..self.cols {
                // transposed on write
                out.data[c * self.rows + r] = self.cofactor(r, c)? / det;
            }
        }
        Ok(out)
    }

    pub fn approx_eq(&self, other: &Matrix) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self.data.iter().zip(&other.data).all(|(&a, &b)| approx_eq(a, b))
    }

    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        Matrix::from(DMat4::from_cols_array_2d(&[
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [x, y, z, 1.0],
        ]))
    }

    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut m = Matrix::identity(4);
        m.data[0] = x;
        m.data[5] = y;
        m.data[10] = z;
        m
    }

    pub fn rotation_x(radians: f64) -> Matrix {
        Matrix::from(DMat4::from_rotation_x(radians))
    }

    pub fn rotation_y(radians: f64) -> Matrix {
        Matrix::from(DMat4::from_rotation_y(radians))
    }

    pub fn rotation_z(radians: f64) -> Matrix {
        Matrix::from(DMat4::from_rotation_z(radians))
    }

    /// Shear where each argument moves one axis in proportion to another,
    /// e.g. `xy` moves x in proportion to y.
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Matrix {
        let mut m = Matrix::identity(4);
        m.data[1] = xy;
        m.data[2] = xz;
        m.data[4] = yx;
        m.data[6] = yz;
        m.data[8] = zx;
        m.data[9] = zy;
        m
    }

    // Chaining builders apply the new operation after `self`.

    pub fn translate(&self, x: f64, y: f64, z: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::translation(x, y, z).multiply(self)
    }

    pub fn scale(&self, x: f64, y: f64, z: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::scaling(x, y, z).multiply(self)
    }

    pub fn rotate_x(&self, radians: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::rotation_x(radians).multiply(self)
    }

    pub fn rotate_y(&self, radians: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::rotation_y(radians).multiply(self)
    }

    pub fn rotate_z(&self, radians: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::rotation_z(radians).multiply(self)
    }

    pub fn shear(&self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> MathResult<Matrix> {
        self.require_transform()?;
        Matrix::shearing(xy, xz, yx, yz, zx, zy).multiply(self)
    }

    /// Convert a 4x4 matrix to glam's column-major `DMat4`.
    pub fn to_dmat4(&self) -> MathResult<DMat4> {
        self.require_transform()?;
        Ok(DMat4::from_cols_array(&self.transpose().data.try_into().map_err(
            |v: Vec<f64>| MathError::DimensionMismatch {
                expected: 16,
                actual: v.len(),
            },
        )?))
    }
}

impl From<DMat4> for Matrix {
    fn from(m: DMat4) -> Self {
        // glam is column-major; transposing yields row-major storage
        Matrix {
            rows: 4,
            cols: 4,
            data: m.transpose().to_cols_array().to_vec(),
        }
    }
}
