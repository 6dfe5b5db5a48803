//! Cross-section property providers.
//!
//! Line elements sample their section at a natural coordinate through the
//! [`CrossSection`] trait, so non-prismatic members need no special casing in
//! the kernels.

use crate::error::{Error, Result};

/// Geometric section constants at one natural coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CrossSectionProperties {
    /// Cross-sectional area.
    pub a: f64,
    /// Second moment of area about local y.
    pub iy: f64,
    /// Second moment of area about local z.
    pub iz: f64,
    /// Torsion constant.
    pub j: f64,
}

/// Cross-section property provider.
///
/// Implementations must be side-effect free and safe to sample concurrently.
pub trait CrossSection: Send + Sync + std::fmt::Debug {
    /// Properties at natural coordinate `xi` ∈ [-1, 1].
    fn properties_at(&self, xi: f64) -> CrossSectionProperties;
}

/// Prismatic section: constant properties along the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSection {
    properties: CrossSectionProperties,
}

impl UniformSection {
    /// Section with area `a` and no bending/torsion constants.
    pub fn new(a: f64) -> Result<Self> {
        if !(a > 0.0) {
            return Err(Error::InvalidSection("area must be positive".into()));
        }
        Ok(Self {
            properties: CrossSectionProperties {
                a,
                ..Default::default()
            },
        })
    }

    /// Set the bending and torsion constants.
    pub fn with_moments(mut self, iy: f64, iz: f64, j: f64) -> Result<Self> {
        if iy < 0.0 || iz < 0.0 || j < 0.0 {
            return Err(Error::InvalidSection(
                "second moments and torsion constant must be non-negative".into(),
            ));
        }
        self.properties.iy = iy;
        self.properties.iz = iz;
        self.properties.j = j;
        Ok(self)
    }
}

impl CrossSection for UniformSection {
    fn properties_at(&self, _xi: f64) -> CrossSectionProperties {
        self.properties
    }
}

/// Tapered section: area varies linearly from the start node to the end node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaperedSection {
    pub start_area: f64,
    pub end_area: f64,
}

impl TaperedSection {
    pub fn new(start_area: f64, end_area: f64) -> Result<Self> {
        if !(start_area > 0.0 && end_area > 0.0) {
            return Err(Error::InvalidSection(
                "tapered section areas must be positive".into(),
            ));
        }
        Ok(Self {
            start_area,
            end_area,
        })
    }
}

impl CrossSection for TaperedSection {
    fn properties_at(&self, xi: f64) -> CrossSectionProperties {
        let a = 0.5 * (1.0 - xi) * self.start_area + 0.5 * (1.0 + xi) * self.end_area;
        CrossSectionProperties {
            a,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_section() {
        let s = UniformSection::new(0.01).unwrap();
        assert_relative_eq!(s.properties_at(-1.0).a, 0.01);
        assert_relative_eq!(s.properties_at(0.3).a, 0.01);
        assert!(UniformSection::new(0.0).is_err());
        assert!(UniformSection::new(-2.0).is_err());
    }

    #[test]
    fn test_section_moments() {
        let s = UniformSection::new(0.01).unwrap().with_moments(2e-5, 3e-5, 4e-5).unwrap();
        let p = s.properties_at(0.0);
        assert_relative_eq!(p.a, 0.01);
        assert_relative_eq!(p.iy, 2e-5);
        assert_relative_eq!(p.iz, 3e-5);
        assert_relative_eq!(p.j, 4e-5);
    }

    #[test]
    fn test_tapered_section_interpolates() {
        let s = TaperedSection::new(2.0, 4.0).unwrap();
        assert_relative_eq!(s.properties_at(-1.0).a, 2.0);
        assert_relative_eq!(s.properties_at(0.0).a, 3.0);
        assert_relative_eq!(s.properties_at(1.0).a, 4.0);
        assert!(TaperedSection::new(1.0, 0.0).is_err());
    }
}
