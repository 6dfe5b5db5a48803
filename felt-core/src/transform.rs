//! Local ↔ global frame transformation for line elements.
//!
//! The local frame of a 2-node element is:
//! - x: from the start node towards the end node
//! - y: global Z × x (global Y when x is vertical)
//! - z: x × y
//!
//! The rotation is orthonormal, so the inverse transform is the transpose.

use crate::error::Result;
use crate::model::Element;
use crate::types::{Displacement, Force, Vec3};
use nalgebra::Matrix3;

/// Cosine above which the element axis is treated as parallel to global Z.
const VERTICAL_TOLERANCE: f64 = 1.0 - 1e-10;

/// Orthonormal frame change keyed to an element's orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformManager {
    /// Rows are the local x, y, z axes in global coordinates.
    rotation: Matrix3<f64>,
}

impl TransformManager {
    /// Build the local frame of a 2-node element.
    ///
    /// # Errors
    ///
    /// Propagates the kind and degeneracy checks of [`Element::length`].
    pub fn for_element(element: &Element) -> Result<Self> {
        let length = element.length()?;
        let (start, end) = element.end_nodes()?;
        Ok(Self::from_axis((end.location - start.location) / length))
    }

    /// Frame whose local x is the unit vector `x`.
    fn from_axis(x: Vec3) -> Self {
        let y = if x.z.abs() > VERTICAL_TOLERANCE {
            Vec3::y()
        } else {
            Vec3::z().cross(&x).normalize()
        };
        let z = x.cross(&y);
        Self {
            rotation: Matrix3::from_rows(&[x.transpose(), y.transpose(), z.transpose()]),
        }
    }

    /// Rotation matrix; rows are the local axes in global coordinates.
    pub fn rotation(&self) -> &Matrix3<f64> {
        &self.rotation
    }

    pub fn global_to_local(&self, v: &Vec3) -> Vec3 {
        self.rotation * v
    }

    pub fn local_to_global(&self, v: &Vec3) -> Vec3 {
        self.rotation.transpose() * v
    }

    pub fn global_to_local_force(&self, f: &Force) -> Force {
        Force::from_parts(
            self.global_to_local(&f.forces()),
            self.global_to_local(&f.moments()),
        )
    }

    pub fn local_to_global_force(&self, f: &Force) -> Force {
        Force::from_parts(
            self.local_to_global(&f.forces()),
            self.local_to_global(&f.moments()),
        )
    }

    pub fn global_to_local_displacement(&self, d: &Displacement) -> Displacement {
        Displacement::from_parts(
            self.global_to_local(&d.translations()),
            self.global_to_local(&d.rotations()),
        )
    }
}
