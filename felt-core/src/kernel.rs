//! Element field kernels.
//!
//! The [`ElementKernel`] trait is the per-element-type contract. A kernel
//! evaluates the N, B, D, Rho, Mu and J matrices at a natural coordinate and
//! declares its DOF ordering and polynomial orders. The generic assembler and
//! nodal load integrator are written against this trait only, so a new element
//! type needs nothing more than a new implementation.
//!
//! # Submodules
//!
//! - [`truss`] - 2-node axial bar

use crate::dof::LocalDof;
use crate::error::{Error, Result};
use crate::load::Load;
use crate::model::{Element, ElementKind};
use crate::order::{OrderKind, PolynomialOrder};
use crate::transform::TransformManager;
use crate::types::{Displacement, Force, Matrix};

pub mod truss;

pub use truss::TrussKernel;

/// Finite element field kernel.
///
/// Every `*_at`/`*_matrix` operation takes the element and a natural
/// coordinate ξ ∈ [-1, 1]. Kernels hold no state between calls and must be
/// thread-safe (Send + Sync) so elements can be evaluated in parallel.
pub trait ElementKernel: Send + Sync + std::fmt::Debug {
    /// Element kind this kernel evaluates.
    fn kind(&self) -> ElementKind;

    /// Shape function matrix N.
    fn shape_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Strain-displacement matrix B.
    fn strain_displacement_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Row `row` of the strain-displacement matrix.
    fn strain_displacement_row(&self, element: &Element, row: usize, xi: f64) -> Result<Matrix>;

    /// Constitutive matrix D.
    fn constitutive_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Mass density matrix Rho.
    fn mass_density_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Damping matrix Mu.
    fn damping_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Jacobian matrix J of the natural-to-physical map.
    fn jacobian_matrix(&self, element: &Element, xi: f64) -> Result<Matrix>;

    /// Meaning of each local matrix row/column.
    fn dof_order(&self, element: &Element) -> Result<Vec<LocalDof>>;

    /// Upper bound on the polynomial degree of N, B or det(J).
    fn max_order(&self, element: &Element, kind: OrderKind) -> Result<PolynomialOrder>;

    /// Internal force at ξ from nodal displacements in the local frame.
    fn local_internal_force_at(
        &self,
        element: &Element,
        local_displacements: &[Displacement],
        xi: f64,
    ) -> Result<Force>;

    /// Displacement at ξ interpolated from nodal displacements in the local frame.
    fn local_displacement_at(
        &self,
        element: &Element,
        local_displacements: &[Displacement],
        xi: f64,
    ) -> Result<Displacement>;

    /// Internal force at ξ caused by a load on an otherwise fixed element.
    fn load_internal_force_at(&self, _element: &Element, _load: &Load, _xi: f64) -> Result<Force> {
        Err(Error::unsupported(
            "load internal force recovery",
            format!("{:?} elements", self.kind()),
        ))
    }

    /// Displacement at ξ caused by a load on an otherwise fixed element.
    fn load_displacement_at(
        &self,
        _element: &Element,
        _load: &Load,
        _xi: f64,
    ) -> Result<Displacement> {
        Err(Error::unsupported(
            "load displacement recovery",
            format!("{:?} elements", self.kind()),
        ))
    }

    /// Whether the kernel supplies a closed-form stiffness instead of the
    /// generic B^T·D·B integration.
    fn overrides_stiffness_assembly(&self, _element: &Element) -> bool {
        false
    }

    /// Closed-form local stiffness, used when
    /// [`overrides_stiffness_assembly`](Self::overrides_stiffness_assembly) is true.
    fn local_stiffness_override(&self, _element: &Element) -> Result<Matrix> {
        Err(Error::unsupported(
            "closed-form stiffness",
            format!("{:?} elements", self.kind()),
        ))
    }

    /// Number of local degrees of freedom.
    fn n_dofs(&self, element: &Element) -> Result<usize> {
        Ok(self.dof_order(element)?.len())
    }
}

/// Kernel for an element kind.
///
/// # Errors
///
/// Returns [`Error::Unsupported`] for kinds without a kernel.
pub fn kernel_for(kind: ElementKind) -> Result<Box<dyn ElementKernel>> {
    match kind {
        ElementKind::Bar => Ok(Box::new(TrussKernel::new())),
        other => Err(Error::unsupported(
            "element formulation",
            format!(
                "{:?} elements ({}-D natural domain)",
                other,
                other.natural_dimension()
            ),
        )),
    }
}

/// Internal force at ξ from nodal displacements given in the global frame.
///
/// The displacements are rotated into the element's local frame before the
/// kernel recovers the force, so the result is in the local frame.
pub fn internal_force_from_global(
    kernel: &dyn ElementKernel,
    element: &Element,
    global_displacements: &[Displacement],
    xi: f64,
) -> Result<Force> {
    let transform = TransformManager::for_element(element)?;
    let local: Vec<Displacement> = global_displacements
        .iter()
        .map(|d| transform.global_to_local_displacement(d))
        .collect();
    kernel.local_internal_force_at(element, &local, xi)
}

/// Check that a natural coordinate lies in [-1, 1].
pub fn check_natural_coordinate(coordinate: &'static str, value: f64) -> Result<()> {
    if (-1.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(Error::OutOfDomain { coordinate, value })
    }
}
