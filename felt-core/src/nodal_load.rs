//! Equivalent nodal loads for distributed element loads.
//!
//! A distributed load q(ξ) acting along a unit direction is replaced by the
//! consistent nodal forces
//!
//! ```text
//! f_i = ∫ N_i(ξ) · det(J(ξ)) · q(ξ) · dir[kind_i] dξ   over [ξ0, ξ1]
//! ```
//!
//! where `kind_i` is the DOF kind of local column i. For the axial bar both
//! columns are Dx, so only the axial component of the load contributes;
//! transverse components drop out without any explicit projection.

use crate::error::{Error, Result};
use crate::kernel::ElementKernel;
use crate::load::{CoordinateSystem, Load};
use crate::model::Element;
use crate::order::OrderKind;
use crate::quadrature::integrate;
use crate::transform::TransformManager;
use crate::types::{Force, Vec3};
use log::debug;

/// Magnitude profile and span of a distributed load, resolved for integration.
struct Distribution<'a> {
    direction: Vec3,
    coordinate_system: CoordinateSystem,
    span: (f64, f64),
    /// Polynomial degree of the magnitude function.
    degree: usize,
    magnitude: Box<dyn Fn(f64) -> Result<f64> + 'a>,
}

fn distribution<'a>(load: &'a Load, element: &Element) -> Result<Distribution<'a>> {
    match load {
        Load::Uniform(uniform) => Ok(Distribution {
            direction: uniform.direction,
            coordinate_system: uniform.coordinate_system,
            span: (-1.0, 1.0),
            degree: 0,
            magnitude: Box::new(move |_: f64| -> Result<f64> { Ok(uniform.magnitude) }),
        }),
        Load::Trapezoidal(trapezoid) => Ok(Distribution {
            direction: trapezoid.direction,
            coordinate_system: trapezoid.coordinate_system,
            span: trapezoid.span()?,
            degree: 1,
            magnitude: Box::new(move |xi: f64| trapezoid.magnitude_at(xi)),
        }),
        other => Err(Error::unsupported(
            "equivalent nodal loads",
            format!("{} on {:?} elements", other.name(), element.kind()),
        )),
    }
}

/// Unit load direction in the element's local frame.
fn local_direction(
    direction: Vec3,
    coordinate_system: CoordinateSystem,
    element: &Element,
) -> Result<Vec3> {
    let norm = direction.norm();
    if !(norm > 0.0) || !norm.is_finite() {
        return Err(Error::InvalidLoad(format!(
            "load direction {:?} cannot be normalized",
            direction
        )));
    }
    let unit = direction / norm;
    match coordinate_system {
        CoordinateSystem::Local => Ok(unit),
        CoordinateSystem::Global => {
            Ok(TransformManager::for_element(element)?.global_to_local(&unit))
        }
    }
}

/// Equivalent nodal forces in the element's local frame, one per node.
///
/// # Errors
///
/// - [`Error::Unsupported`] for load kinds other than uniform/trapezoidal, or
///   kernels with rotational DOFs or multi-row shape matrices
/// - [`Error::InvalidLoad`] for zero directions or empty trapezoid spans
/// - Kernel errors (wrong element kind, degenerate geometry)
pub fn local_equivalent_nodal_loads(
    kernel: &dyn ElementKernel,
    element: &Element,
    load: &Load,
) -> Result<Vec<Force>> {
    let dist = distribution(load, element)?;
    let dir = local_direction(dist.direction, dist.coordinate_system, element)?;

    let dofs = kernel.dof_order(element)?;
    if let Some(rotational) = dofs.iter().find(|dof| !dof.kind.is_translation()) {
        return Err(Error::unsupported(
            "equivalent nodal moments",
            format!("{:?} elements ({:?} DOF)", kernel.kind(), rotational.kind),
        ));
    }

    let mut dropped = dir;
    for dof in &dofs {
        dropped[dof.kind.component()] = 0.0;
    }
    if dropped.norm() > 0.0 {
        debug!(
            "{:?}: {} component {:?} has no matching DOF and is dropped",
            kernel.kind(),
            load.name(),
            dropped
        );
    }

    let n_order = kernel.max_order(element, OrderKind::Shape)?.max();
    let points = (n_order + dist.degree) / 2 + 1;
    let (xi0, xi1) = dist.span;
    debug!(
        "{:?}: integrating {} over [{}, {}] with {} points",
        kernel.kind(),
        load.name(),
        xi0,
        xi1,
        points
    );

    let res = integrate(
        |xi| {
            let mut shp = kernel.shape_matrix(element, xi)?;
            if shp.nrows() != 1 || shp.ncols() != dofs.len() {
                return Err(Error::unsupported(
                    "equivalent nodal loads",
                    format!(
                        "{:?} elements with a {}x{} shape matrix",
                        kernel.kind(),
                        shp.nrows(),
                        shp.ncols()
                    ),
                ));
            }
            let det_j = kernel.jacobian_matrix(element, xi)?.determinant();
            let q = (dist.magnitude)(xi)?;
            for (i, dof) in dofs.iter().enumerate() {
                shp[(0, i)] *= det_j * q * dir[dof.kind.component()];
            }
            Ok(shp)
        },
        xi0,
        xi1,
        points,
    )?;

    let mut forces = vec![Force::zero(); element.nodes().len()];
    for (i, dof) in dofs.iter().enumerate() {
        let force = forces.get_mut(dof.node).ok_or_else(|| {
            Error::ShapeMismatch(format!(
                "DOF {} refers to node {} of a {}-node element",
                i,
                dof.node,
                element.nodes().len()
            ))
        })?;
        force.0[dof.kind.component()] += res[(0, i)];
    }
    Ok(forces)
}

/// Equivalent nodal forces re-expressed in the global frame.
pub fn global_equivalent_nodal_loads(
    kernel: &dyn ElementKernel,
    element: &Element,
    load: &Load,
) -> Result<Vec<Force>> {
    let local = local_equivalent_nodal_loads(kernel, element, load)?;
    let transform = TransformManager::for_element(element)?;
    Ok(local
        .iter()
        .map(|f| transform.local_to_global_force(f))
        .collect())
}
