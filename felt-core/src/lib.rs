//! felt core - Finite Element Local formulation Toolkit
//!
//! Element formulation kernel of a structural finite element engine. For a
//! single element it produces:
//! - Shape function, strain-displacement, constitutive, density, damping and
//!   Jacobian matrices at a natural coordinate
//! - Local stiffness, mass and damping matrices by exact Gauss quadrature
//! - Equivalent nodal loads for uniform and trapezoidal distributed loads
//!
//! # Architecture
//!
//! The crate is designed around these core abstractions:
//!
//! - [`ElementKernel`] trait: per-element-type field matrices, DOF ordering
//!   and polynomial order bounds
//! - [`assembly`]: generic integration of local matrices for any kernel
//! - [`nodal_load`]: consistent nodal forces for distributed loads
//! - [`CrossSection`] / [`MaterialModel`]: property providers sampled along
//!   the element
//!
//! Global assembly, solvers and model construction live outside this crate.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use felt_core::{assembly, Element, Material, Node, TrussKernel, UniformSection};
//!
//! let bar = Element::bar(
//!     Node::at(0, 0.0, 0.0, 0.0),
//!     Node::at(1, 2.0, 0.0, 0.0),
//!     Arc::new(UniformSection::new(1e-4).unwrap()),
//!     Arc::new(Material::steel()),
//! );
//! let k = assembly::local_stiffness(&TrussKernel::new(), &bar, &Default::default()).unwrap();
//! assert!((k[(0, 0)] - 200e9 * 1e-4 / 2.0).abs() < 1e-3);
//! ```

pub mod types;
pub mod dof;
pub mod order;
pub mod model;
pub mod section;
pub mod material;
pub mod transform;
pub mod quadrature;
pub mod load;
pub mod kernel;
pub mod assembly;
pub mod nodal_load;
pub mod error;

pub use types::{Displacement, Force, Matrix, Point3, Vec3};
pub use dof::{DofKind, LocalDof};
pub use order::{OrderKind, PolynomialOrder};
pub use model::{Element, ElementKind, Node};
pub use section::{CrossSection, CrossSectionProperties, TaperedSection, UniformSection};
pub use material::{Material, MaterialModel, MaterialProperties};
pub use transform::TransformManager;
pub use load::{ConcentratedLoad, CoordinateSystem, Load, TrapezoidalLoad, UniformLoad};
pub use kernel::{internal_force_from_global, kernel_for, ElementKernel, TrussKernel};
pub use assembly::{AssemblyOptions, LocalMatrices};
pub use error::{Error, Result};
