//! Core data types for element formulation.
//!
//! This module defines the value types shared by every kernel:
//! - Geometric primitives (points, vectors)
//! - The dense matrix type returned by all kernel operations
//! - Generalized 6-component force and displacement vectors

use crate::error::{Error, Result};
use nalgebra::{DMatrix, Vector3, Vector6};
use std::ops::{Add, Mul, Neg, Sub};

/// A point in 3D space.
pub type Point3 = Vector3<f64>;

/// A 3D vector (direction, translation, etc.).
pub type Vec3 = Vector3<f64>;

/// Dense matrix of fixed shape.
///
/// Element access, scalar multiplication and determinant come from nalgebra.
/// Kernels always hand back a freshly owned matrix.
pub type Matrix = DMatrix<f64>;

/// Overwrite row `row` of `m` with `values`.
///
/// # Errors
///
/// Returns [`Error::ShapeMismatch`] if the row does not exist or the number of
/// values differs from the column count.
pub fn fill_row(m: &mut Matrix, row: usize, values: &[f64]) -> Result<()> {
    if row >= m.nrows() || values.len() != m.ncols() {
        return Err(Error::ShapeMismatch(format!(
            "cannot fill row {} of a {}x{} matrix with {} values",
            row,
            m.nrows(),
            m.ncols(),
            values.len()
        )));
    }
    for (j, &v) in values.iter().enumerate() {
        m[(row, j)] = v;
    }
    Ok(())
}

/// Build a single-row matrix from `values`.
pub fn row_matrix(values: &[f64]) -> Matrix {
    Matrix::from_row_slice(1, values.len(), values)
}

/// Build a 1x1 matrix holding `value`.
pub fn scalar_matrix(value: f64) -> Matrix {
    Matrix::from_element(1, 1, value)
}

/// Generalized nodal force.
///
/// Components are ordered as: [Fx, Fy, Fz, Mx, My, Mz]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Force(pub Vector6<f64>);

impl Force {
    /// Create a force from its six components.
    pub fn new(fx: f64, fy: f64, fz: f64, mx: f64, my: f64, mz: f64) -> Self {
        Self(Vector6::new(fx, fy, fz, mx, my, mz))
    }

    /// Zero force.
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Force with translational part `f` and moment part `m`.
    pub fn from_parts(f: Vec3, m: Vec3) -> Self {
        Self::new(f.x, f.y, f.z, m.x, m.y, m.z)
    }

    pub fn fx(&self) -> f64 {
        self.0[0]
    }

    pub fn fy(&self) -> f64 {
        self.0[1]
    }

    pub fn fz(&self) -> f64 {
        self.0[2]
    }

    pub fn mx(&self) -> f64 {
        self.0[3]
    }

    pub fn my(&self) -> f64 {
        self.0[4]
    }

    pub fn mz(&self) -> f64 {
        self.0[5]
    }

    /// Translational part [Fx, Fy, Fz].
    pub fn forces(&self) -> Vec3 {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Rotational part [Mx, My, Mz].
    pub fn moments(&self) -> Vec3 {
        self.0.fixed_rows::<3>(3).into_owned()
    }
}

impl Add for Force {
    type Output = Force;

    fn add(self, rhs: Force) -> Force {
        Force(self.0 + rhs.0)
    }
}

impl Sub for Force {
    type Output = Force;

    fn sub(self, rhs: Force) -> Force {
        Force(self.0 - rhs.0)
    }
}

impl Neg for Force {
    type Output = Force;

    fn neg(self) -> Force {
        Force(-self.0)
    }
}

impl Mul<f64> for Force {
    type Output = Force;

    fn mul(self, rhs: f64) -> Force {
        Force(self.0 * rhs)
    }
}

/// Generalized nodal displacement.
///
/// Components are ordered as: [Dx, Dy, Dz, Rx, Ry, Rz]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Displacement(pub Vector6<f64>);

impl Displacement {
    /// Create a displacement from its six components.
    pub fn new(dx: f64, dy: f64, dz: f64, rx: f64, ry: f64, rz: f64) -> Self {
        Self(Vector6::new(dx, dy, dz, rx, ry, rz))
    }

    /// Zero displacement.
    pub fn zero() -> Self {
        Self(Vector6::zeros())
    }

    /// Displacement with translational part `d` and rotational part `r`.
    pub fn from_parts(d: Vec3, r: Vec3) -> Self {
        Self::new(d.x, d.y, d.z, r.x, r.y, r.z)
    }

    pub fn dx(&self) -> f64 {
        self.0[0]
    }

    pub fn dy(&self) -> f64 {
        self.0[1]
    }

    pub fn dz(&self) -> f64 {
        self.0[2]
    }

    pub fn rx(&self) -> f64 {
        self.0[3]
    }

    pub fn ry(&self) -> f64 {
        self.0[4]
    }

    pub fn rz(&self) -> f64 {
        self.0[5]
    }

    /// Translational part [Dx, Dy, Dz].
    pub fn translations(&self) -> Vec3 {
        self.0.fixed_rows::<3>(0).into_owned()
    }

    /// Rotational part [Rx, Ry, Rz].
    pub fn rotations(&self) -> Vec3 {
        self.0.fixed_rows::<3>(3).into_owned()
    }
}

impl Add for Displacement {
    type Output = Displacement;

    fn add(self, rhs: Displacement) -> Displacement {
        Displacement(self.0 + rhs.0)
    }
}

impl Mul<f64> for Displacement {
    type Output = Displacement;

    fn mul(self, rhs: f64) -> Displacement {
        Displacement(self.0 * rhs)
    }
}
