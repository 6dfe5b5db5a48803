//! 2-node axial bar (truss) kernel.
//!
//! The bar carries axial force only:
//! - 2 nodes, 1 DOF per node (axial translation Dx in the local frame)
//! - Linear shape functions, constant strain
//! - Straight geometry, so the Jacobian is constant
//!
//! # Shape Functions
//!
//! ```text
//! N1 = (1 - ξ) / 2
//! N2 = (1 + ξ) / 2
//! ```
//!
//! With x(ξ) = x1·N1 + x2·N2 the Jacobian is dx/dξ = L/2 and
//! B = dN/dx = [-1/L, 1/L].
//!
//! # Limitations
//!
//! - No bending, shear or torsion
//! - Load-induced internal force/displacement recovery is not provided

use crate::dof::{DofKind, LocalDof};
use crate::error::{Error, Result};
use crate::kernel::{check_natural_coordinate, ElementKernel};
use crate::load::Load;
use crate::model::{Element, ElementKind};
use crate::order::{OrderKind, PolynomialOrder};
use crate::types::{fill_row, row_matrix, scalar_matrix, Displacement, Force, Matrix};

/// Axial bar kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrussKernel;

impl TrussKernel {
    /// Create a new bar kernel.
    pub fn new() -> Self {
        Self
    }

    /// Axial nodal displacements [u1, u2] from local nodal displacements.
    fn axial_displacements(local_displacements: &[Displacement]) -> Result<[f64; 2]> {
        match local_displacements {
            [start, end] => Ok([start.dx(), end.dx()]),
            other => Err(Error::ShapeMismatch(format!(
                "bar needs 2 nodal displacements, got {}",
                other.len()
            ))),
        }
    }
}

impl ElementKernel for TrussKernel {
    fn kind(&self) -> ElementKind {
        ElementKind::Bar
    }

    fn shape_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;

        let n1 = 0.5 - xi / 2.0;
        let n2 = 0.5 + xi / 2.0;

        let mut n = Matrix::zeros(1, 2);
        fill_row(&mut n, 0, &[n1, n2])?;
        Ok(n)
    }

    fn strain_displacement_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        let l = element.length()?;
        check_natural_coordinate("xi", xi)?;

        Ok(row_matrix(&[-1.0 / l, 1.0 / l]))
    }

    fn strain_displacement_row(&self, element: &Element, row: usize, xi: f64) -> Result<Matrix> {
        let b = self.strain_displacement_matrix(element, xi)?;
        if row >= b.nrows() {
            return Err(Error::InvalidRow {
                row,
                rows: b.nrows(),
            });
        }
        let values: Vec<f64> = b.row(row).iter().copied().collect();
        Ok(row_matrix(&values))
    }

    fn constitutive_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;

        let geo = element.section().properties_at(xi);
        let mech = element.material().properties_at(xi);
        Ok(scalar_matrix(geo.a * mech.ex))
    }

    fn mass_density_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;

        let geo = element.section().properties_at(xi);
        let mech = element.material().properties_at(xi);
        Ok(scalar_matrix(geo.a * mech.rho))
    }

    fn damping_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;

        let geo = element.section().properties_at(xi);
        let mech = element.material().properties_at(xi);
        Ok(scalar_matrix(geo.a * mech.mu))
    }

    fn jacobian_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
        let l = element.length()?;
        check_natural_coordinate("xi", xi)?;

        Ok(scalar_matrix(l / 2.0))
    }

    fn dof_order(&self, element: &Element) -> Result<Vec<LocalDof>> {
        element.length()?;
        Ok(vec![
            LocalDof::new(0, DofKind::Dx),
            LocalDof::new(1, DofKind::Dx),
        ])
    }

    fn max_order(&self, element: &Element, kind: OrderKind) -> Result<PolynomialOrder> {
        element.length()?;
        Ok(match kind {
            OrderKind::Shape => PolynomialOrder::line(1),
            OrderKind::StrainDisplacement => PolynomialOrder::line(0),
            OrderKind::JacobianDeterminant => PolynomialOrder::line(0),
        })
    }

    /// Axial force N = D·B·u, positive in tension, returned in `fx`.
    fn local_internal_force_at(
        &self,
        element: &Element,
        local_displacements: &[Displacement],
        xi: f64,
    ) -> Result<Force> {
        element.length()?;
        let [u1, u2] = Self::axial_displacements(local_displacements)?;
        let b = self.strain_displacement_matrix(element, xi)?;
        let d = self.constitutive_matrix(element, xi)?;

        let u = Matrix::from_column_slice(2, 1, &[u1, u2]);
        let n = d * b * u;
        Ok(Force::new(n[(0, 0)], 0.0, 0.0, 0.0, 0.0, 0.0))
    }

    /// Axial displacement N·u at ξ, returned in `dx`.
    fn local_displacement_at(
        &self,
        element: &Element,
        local_displacements: &[Displacement],
        xi: f64,
    ) -> Result<Displacement> {
        element.length()?;
        let [u1, u2] = Self::axial_displacements(local_displacements)?;
        let n = self.shape_matrix(element, xi)?;

        let u = n[(0, 0)] * u1 + n[(0, 1)] * u2;
        Ok(Displacement::new(u, 0.0, 0.0, 0.0, 0.0, 0.0))
    }

    fn load_internal_force_at(&self, element: &Element, _load: &Load, xi: f64) -> Result<Force> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;
        Err(Error::unsupported("load internal force recovery", "Bar elements"))
    }

    fn load_displacement_at(
        &self,
        element: &Element,
        _load: &Load,
        xi: f64,
    ) -> Result<Displacement> {
        element.length()?;
        check_natural_coordinate("xi", xi)?;
        Err(Error::unsupported("load displacement recovery", "Bar elements"))
    }
}
