//! Generic local matrix assembly.
//!
//! Integrates the local stiffness, mass and damping matrices of any element
//! kernel over its natural domain [-1, 1]:
//!
//! ```text
//! K = ∫ Bᵀ·D·B·det(J) dξ
//! M = ∫ Nᵀ·Rho·N·det(J) dξ
//! C = ∫ Nᵀ·Mu·N·det(J) dξ
//! ```
//!
//! The Gauss point count comes from the kernel's polynomial order bounds, so
//! polynomial integrands are integrated exactly without per-element tuning.
//! Many elements can be evaluated at once in parallel using Rayon.

use crate::error::{Error, Result};
use crate::kernel::{kernel_for, ElementKernel};
use crate::model::Element;
use crate::order::OrderKind;
use crate::quadrature::{integrate, points_for_degree};
use crate::types::Matrix;
use log::{debug, trace};
use rayon::prelude::*;

/// Assembly options.
#[derive(Debug, Clone, Default)]
pub struct AssemblyOptions {
    /// Force this Gauss point count for every integral (None = derive from
    /// the kernel's polynomial orders).
    pub quadrature_points: Option<usize>,
}

/// Local stiffness, mass and damping of one element.
#[derive(Debug, Clone, PartialEq)]
pub struct LocalMatrices {
    pub stiffness: Matrix,
    pub mass: Matrix,
    pub damping: Matrix,
}

/// Degree bound along ξ of Fᵀ·P·F·det(J), where F is the `field` matrix.
///
/// The assembler only integrates line elements, so the summed order must have
/// no η or ζ terms.
fn integrand_degree(
    kernel: &dyn ElementKernel,
    element: &Element,
    field: OrderKind,
) -> Result<usize> {
    let f = kernel.max_order(element, field)?;
    let j = kernel.max_order(element, OrderKind::JacobianDeterminant)?;
    let order = f + f + j;
    if !order.is_line() {
        return Err(Error::unsupported(
            "line integration of a multi-axis polynomial order",
            format!("{:?} elements ({:?})", kernel.kind(), order),
        ));
    }
    Ok(order.xi)
}

fn point_count(degree: usize, options: &AssemblyOptions) -> usize {
    options
        .quadrature_points
        .unwrap_or_else(|| points_for_degree(degree))
}

/// Reject results that do not match the kernel's DOF count.
fn check_square(m: Matrix, n_dofs: usize, what: &str) -> Result<Matrix> {
    if m.shape() != (n_dofs, n_dofs) {
        return Err(Error::ShapeMismatch(format!(
            "{} is {:?}, expected {}x{}",
            what,
            m.shape(),
            n_dofs,
            n_dofs
        )));
    }
    Ok(m)
}

/// Integrate Nᵀ·P·N·det(J) where P is sampled by `property`.
fn integrate_shape_product<F>(
    kernel: &dyn ElementKernel,
    element: &Element,
    options: &AssemblyOptions,
    property: F,
) -> Result<Matrix>
where
    F: Fn(f64) -> Result<Matrix>,
{
    let degree = integrand_degree(kernel, element, OrderKind::Shape)?;
    let points = point_count(degree, options);
    debug!(
        "{:?}: integrating Nᵀ·P·N with {} points (degree {})",
        kernel.kind(),
        points,
        degree
    );

    integrate(
        |xi| {
            let n = kernel.shape_matrix(element, xi)?;
            let p = property(xi)?;
            let det_j = kernel.jacobian_matrix(element, xi)?.determinant();
            Ok(n.transpose() * p * n * det_j)
        },
        -1.0,
        1.0,
        points,
    )
}

/// Local stiffness matrix K = ∫ Bᵀ·D·B·det(J) dξ.
///
/// Kernels that override stiffness assembly supply K directly.
///
/// # Errors
///
/// Propagates kernel errors (wrong element kind, degenerate geometry).
pub fn local_stiffness(
    kernel: &dyn ElementKernel,
    element: &Element,
    options: &AssemblyOptions,
) -> Result<Matrix> {
    let n_dofs = kernel.n_dofs(element)?;
    if kernel.overrides_stiffness_assembly(element) {
        return check_square(kernel.local_stiffness_override(element)?, n_dofs, "stiffness");
    }

    let degree = integrand_degree(kernel, element, OrderKind::StrainDisplacement)?;
    let points = point_count(degree, options);
    debug!(
        "{:?}: integrating Bᵀ·D·B with {} points (degree {})",
        kernel.kind(),
        points,
        degree
    );

    let k = integrate(
        |xi| {
            let b = kernel.strain_displacement_matrix(element, xi)?;
            let d = kernel.constitutive_matrix(element, xi)?;
            let det_j = kernel.jacobian_matrix(element, xi)?.determinant();
            Ok(b.transpose() * d * b * det_j)
        },
        -1.0,
        1.0,
        points,
    )?;
    check_square(k, n_dofs, "stiffness")
}

/// Local consistent mass matrix M = ∫ Nᵀ·Rho·N·det(J) dξ.
pub fn local_mass(
    kernel: &dyn ElementKernel,
    element: &Element,
    options: &AssemblyOptions,
) -> Result<Matrix> {
    let n_dofs = kernel.n_dofs(element)?;
    let m = integrate_shape_product(kernel, element, options, |xi| {
        kernel.mass_density_matrix(element, xi)
    })?;
    check_square(m, n_dofs, "mass")
}

/// Local damping matrix C = ∫ Nᵀ·Mu·N·det(J) dξ.
pub fn local_damping(
    kernel: &dyn ElementKernel,
    element: &Element,
    options: &AssemblyOptions,
) -> Result<Matrix> {
    let n_dofs = kernel.n_dofs(element)?;
    let c = integrate_shape_product(kernel, element, options, |xi| {
        kernel.damping_matrix(element, xi)
    })?;
    check_square(c, n_dofs, "damping")
}

/// Stiffness, mass and damping of one element.
pub fn local_matrices(
    kernel: &dyn ElementKernel,
    element: &Element,
    options: &AssemblyOptions,
) -> Result<LocalMatrices> {
    Ok(LocalMatrices {
        stiffness: local_stiffness(kernel, element, options)?,
        mass: local_mass(kernel, element, options)?,
        damping: local_damping(kernel, element, options)?,
    })
}

/// Evaluate the local matrices of many elements in parallel.
///
/// Each element is dispatched to the kernel for its kind. Results are
/// returned in input order; a failing element does not affect the others.
///
/// # Example
///
/// ```ignore
/// let results = local_matrices_batch(&elements, &AssemblyOptions::default());
/// for (element, result) in elements.iter().zip(&results) {
///     let k = &result.as_ref()?.stiffness;
///     // scatter k into the global matrix using the kernel's dof_order
/// }
/// ```
pub fn local_matrices_batch(
    elements: &[Element],
    options: &AssemblyOptions,
) -> Vec<Result<LocalMatrices>> {
    elements
        .par_iter()
        .enumerate()
        .map(|(idx, element)| {
            trace!("evaluating local matrices of element {}", idx);
            let kernel = kernel_for(element.kind())?;
            local_matrices(kernel.as_ref(), element, options)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dof::{DofKind, LocalDof};
    use crate::kernel::TrussKernel;
    use crate::material::Material;
    use crate::model::{ElementKind, Node};
    use crate::order::PolynomialOrder;
    use crate::section::{TaperedSection, UniformSection};
    use crate::types::{row_matrix, scalar_matrix, Displacement, Force};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    const A: f64 = 0.003;
    const E: f64 = 70e9;
    const RHO: f64 = 2700.0;
    const MU: f64 = 15.0;

    fn material() -> Material {
        Material::new(E, 0.33)
            .unwrap()
            .with_density(RHO)
            .unwrap()
            .with_damping(MU)
            .unwrap()
    }

    fn bar(end: [f64; 3]) -> Element {
        Element::bar(
            Node::at(0, 0.0, 0.0, 0.0),
            Node::at(1, end[0], end[1], end[2]),
            Arc::new(UniformSection::new(A).unwrap()),
            Arc::new(material()),
        )
    }

    fn assert_matrix_eq(actual: &Matrix, expected: &Matrix, tol: f64) {
        assert_eq!(actual.shape(), expected.shape());
        for i in 0..expected.nrows() {
            for j in 0..expected.ncols() {
                assert_relative_eq!(actual[(i, j)], expected[(i, j)], max_relative = tol);
            }
        }
    }

    #[test]
    fn test_stiffness_matches_closed_form() {
        let element = bar([2.0, 1.0, 2.0]); // L = 3
        let k = local_stiffness(&TrussKernel::new(), &element, &AssemblyOptions::default()).unwrap();

        let ea_l = A * E / 3.0;
        let expected = Matrix::from_row_slice(2, 2, &[ea_l, -ea_l, -ea_l, ea_l]);
        assert_matrix_eq(&k, &expected, 1e-12);
    }

    #[test]
    fn test_stiffness_independent_of_point_count() {
        let element = bar([4.0, 0.0, 0.0]);
        let kernel = TrussKernel::new();
        let reference = local_stiffness(&kernel, &element, &AssemblyOptions::default()).unwrap();
        for points in 1..=6 {
            let options = AssemblyOptions {
                quadrature_points: Some(points),
            };
            let k = local_stiffness(&kernel, &element, &options).unwrap();
            assert_matrix_eq(&k, &reference, 1e-12);
        }
    }

    #[test]
    fn test_consistent_mass_matrix() {
        let element = bar([0.0, 6.0, 0.0]); // L = 6
        let m = local_mass(&TrussKernel::new(), &element, &AssemblyOptions::default()).unwrap();

        let c = A * RHO * 6.0 / 6.0;
        let expected = Matrix::from_row_slice(2, 2, &[2.0 * c, c, c, 2.0 * c]);
        assert_matrix_eq(&m, &expected, 1e-12);

        // Total mass is preserved
        assert_relative_eq!(m.sum(), A * RHO * 6.0, max_relative = 1e-12);
    }

    #[test]
    fn test_damping_matrix() {
        let element = bar([0.0, 0.0, 3.0]);
        let c = local_damping(&TrussKernel::new(), &element, &AssemblyOptions::default()).unwrap();

        let f = A * MU * 3.0 / 6.0;
        let expected = Matrix::from_row_slice(2, 2, &[2.0 * f, f, f, 2.0 * f]);
        assert_matrix_eq(&c, &expected, 1e-12);
    }

    #[test]
    fn test_one_point_rule_underintegrates_mass() {
        // NᵀN is quadratic: a forced 1-point rule gives the lumped-like [1 1; 1 1]/2
        let element = bar([1.0, 0.0, 0.0]);
        let options = AssemblyOptions {
            quadrature_points: Some(1),
        };
        let m = local_mass(&TrussKernel::new(), &element, &options).unwrap();
        assert_relative_eq!(m[(0, 0)], A * RHO / 4.0, max_relative = 1e-12);
        assert_relative_eq!(m[(0, 1)], A * RHO / 4.0, max_relative = 1e-12);
    }

    #[test]
    fn test_tapered_bar_stiffness() {
        // Linear area: K = E·(A0 + A1)/(2L) · [1 -1; -1 1]
        let element = Element::bar(
            Node::at(0, 0.0, 0.0, 0.0),
            Node::at(1, 2.0, 0.0, 0.0),
            Arc::new(TaperedSection::new(1.0, 3.0).unwrap()),
            Arc::new(Material::new(5.0, 0.0).unwrap()),
        );
        let k = local_stiffness(&TrussKernel::new(), &element, &AssemblyOptions::default()).unwrap();
        assert_relative_eq!(k[(0, 0)], 5.0 * 2.0 / 2.0, max_relative = 1e-12);
        assert_relative_eq!(k[(0, 1)], -5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_stiffness_is_symmetric_with_rigid_body_mode() {
        let element = bar([1.0, 2.0, 3.0]);
        let k = local_stiffness(&TrussKernel::new(), &element, &AssemblyOptions::default()).unwrap();
        assert_relative_eq!(k[(0, 1)], k[(1, 0)]);
        let translation = nalgebra::DVector::from_vec(vec![1.0, 1.0]);
        assert_relative_eq!((&k * translation).norm(), 0.0, epsilon = 1e-3);
    }

    #[test]
    fn test_wrong_element_kind_is_rejected() {
        let tri = Element::new(
            ElementKind::Triangle,
            vec![
                Node::at(0, 0.0, 0.0, 0.0),
                Node::at(1, 1.0, 0.0, 0.0),
                Node::at(2, 0.0, 1.0, 0.0),
            ],
            Arc::new(UniformSection::new(1.0).unwrap()),
            Arc::new(material()),
        )
        .unwrap();
        let err = local_stiffness(&TrussKernel::new(), &tri, &AssemblyOptions::default()).unwrap_err();
        assert!(matches!(err, Error::ElementKindMismatch { .. }));
    }

    #[test]
    fn test_batch_matches_serial() {
        let elements = vec![
            bar([1.0, 0.0, 0.0]),
            bar([0.0, 2.0, 0.0]),
            bar([3.0, 4.0, 0.0]),
            bar([0.0, 0.0, 0.0]),
        ];
        let options = AssemblyOptions::default();
        let results = local_matrices_batch(&elements, &options);
        assert_eq!(results.len(), elements.len());

        for (element, result) in elements.iter().take(3).zip(&results) {
            let serial = local_matrices(&TrussKernel::new(), element, &options).unwrap();
            assert_eq!(result.as_ref().unwrap(), &serial);
        }
        assert!(matches!(results[3], Err(Error::DegenerateGeometry(_))));
    }

    #[test]
    fn test_batch_reports_missing_kernel() {
        let tet = Element::new(
            ElementKind::Tetrahedron,
            vec![
                Node::at(0, 0.0, 0.0, 0.0),
                Node::at(1, 1.0, 0.0, 0.0),
                Node::at(2, 0.0, 1.0, 0.0),
                Node::at(3, 0.0, 0.0, 1.0),
            ],
            Arc::new(UniformSection::new(1.0).unwrap()),
            Arc::new(material()),
        )
        .unwrap();
        let results = local_matrices_batch(&[tet], &AssemblyOptions::default());
        assert!(results[0].as_ref().unwrap_err().is_unsupported());
    }

    /// Kernel with a closed-form stiffness, to exercise the override path.
    #[derive(Debug)]
    struct ClosedFormBar;

    impl ElementKernel for ClosedFormBar {
        fn kind(&self) -> ElementKind {
            ElementKind::Bar
        }
        fn shape_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
            TrussKernel.shape_matrix(element, xi)
        }
        fn strain_displacement_matrix(&self, _element: &Element, _xi: f64) -> Result<Matrix> {
            Err(Error::unsupported("B matrix", "closed-form test kernel"))
        }
        fn strain_displacement_row(&self, _: &Element, _: usize, _: f64) -> Result<Matrix> {
            Err(Error::unsupported("B matrix", "closed-form test kernel"))
        }
        fn constitutive_matrix(&self, _element: &Element, _xi: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn mass_density_matrix(&self, _element: &Element, _xi: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn damping_matrix(&self, _element: &Element, _xi: f64) -> Result<Matrix> {
            Ok(scalar_matrix(0.0))
        }
        fn jacobian_matrix(&self, element: &Element, xi: f64) -> Result<Matrix> {
            TrussKernel.jacobian_matrix(element, xi)
        }
        fn dof_order(&self, _element: &Element) -> Result<Vec<LocalDof>> {
            Ok(vec![LocalDof::new(0, DofKind::Dx), LocalDof::new(1, DofKind::Dx)])
        }
        fn max_order(&self, _element: &Element, kind: OrderKind) -> Result<PolynomialOrder> {
            Ok(match kind {
                OrderKind::Shape => PolynomialOrder::line(1),
                _ => PolynomialOrder::line(0),
            })
        }
        fn local_internal_force_at(&self, _: &Element, _: &[Displacement], _: f64) -> Result<Force> {
            Err(Error::unsupported("internal force", "closed-form test kernel"))
        }
        fn local_displacement_at(
            &self,
            _: &Element,
            _: &[Displacement],
            _: f64,
        ) -> Result<Displacement> {
            Err(Error::unsupported("displacement", "closed-form test kernel"))
        }
        fn overrides_stiffness_assembly(&self, _element: &Element) -> bool {
            true
        }
        fn local_stiffness_override(&self, _element: &Element) -> Result<Matrix> {
            Ok(Matrix::from_row_slice(2, 2, &[7.0, -7.0, -7.0, 7.0]))
        }
    }

    #[test]
    fn test_override_bypasses_integration() {
        let element = bar([1.0, 0.0, 0.0]);
        let k = local_stiffness(&ClosedFormBar, &element, &AssemblyOptions::default()).unwrap();
        assert_relative_eq!(k[(0, 0)], 7.0);
        assert_relative_eq!(k[(1, 0)], -7.0);
    }

    #[derive(Debug)]
    struct PlateLikeOrders;

    impl ElementKernel for PlateLikeOrders {
        fn kind(&self) -> ElementKind {
            ElementKind::Triangle
        }
        fn shape_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(row_matrix(&[1.0]))
        }
        fn strain_displacement_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(row_matrix(&[1.0]))
        }
        fn strain_displacement_row(&self, _: &Element, _: usize, _: f64) -> Result<Matrix> {
            Ok(row_matrix(&[1.0]))
        }
        fn constitutive_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn mass_density_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn damping_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn jacobian_matrix(&self, _: &Element, _: f64) -> Result<Matrix> {
            Ok(scalar_matrix(1.0))
        }
        fn dof_order(&self, _: &Element) -> Result<Vec<LocalDof>> {
            Ok(vec![LocalDof::new(0, DofKind::Dz)])
        }
        fn max_order(&self, _: &Element, _: OrderKind) -> Result<PolynomialOrder> {
            Ok(PolynomialOrder::new(1, 1, 0))
        }
        fn local_internal_force_at(&self, _: &Element, _: &[Displacement], _: f64) -> Result<Force> {
            Ok(Force::zero())
        }
        fn local_displacement_at(
            &self,
            _: &Element,
            _: &[Displacement],
            _: f64,
        ) -> Result<Displacement> {
            Ok(Displacement::zero())
        }
    }

    #[test]
    fn test_multi_axis_orders_are_unsupported() {
        let element = bar([1.0, 0.0, 0.0]);
        let err = local_stiffness(&PlateLikeOrders, &element, &AssemblyOptions::default()).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_integrand_degree_sums_orders() {
        let element = bar([1.0, 0.0, 0.0]);
        let kernel = TrussKernel::new();
        // 2·deg(N) + deg(J) = 2·1 + 0
        assert_eq!(integrand_degree(&kernel, &element, OrderKind::Shape).unwrap(), 2);
        // 2·deg(B) + deg(J) = 2·0 + 0
        assert_eq!(
            integrand_degree(&kernel, &element, OrderKind::StrainDisplacement).unwrap(),
            0
        );
        assert!(integrand_degree(&PlateLikeOrders, &element, OrderKind::Shape)
            .unwrap_err()
            .is_unsupported());
    }
}
