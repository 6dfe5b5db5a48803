//! Element load definitions.
//!
//! Loads are immutable inputs. Distributed loads carry a direction and the
//! frame that direction is expressed in; the nodal load integrator resolves
//! both into the element's local frame.

use crate::error::{Error, Result};
use crate::types::{Force, Vec3};

/// Frame a load direction is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CoordinateSystem {
    /// Element local frame (x along the element).
    Local,
    /// Model global frame.
    Global,
}

/// Constant-magnitude load over the whole element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformLoad {
    pub magnitude: f64,
    pub direction: Vec3,
    pub coordinate_system: CoordinateSystem,
}

impl UniformLoad {
    pub fn new(magnitude: f64, direction: Vec3, coordinate_system: CoordinateSystem) -> Self {
        Self {
            magnitude,
            direction,
            coordinate_system,
        }
    }
}

/// Linearly varying load over a sub-span of the element.
///
/// The loaded span starts `start_offset` natural units after the start node
/// and ends `end_offset` natural units before the end node, i.e. it covers
/// `[-1 + start_offset, 1 - end_offset]`. The magnitude goes linearly from
/// `start_magnitude` to `end_magnitude` over that span and is zero elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidalLoad {
    pub start_offset: f64,
    pub end_offset: f64,
    pub start_magnitude: f64,
    pub end_magnitude: f64,
    pub direction: Vec3,
    pub coordinate_system: CoordinateSystem,
}

impl TrapezoidalLoad {
    /// Load varying from `start_magnitude` to `end_magnitude` over the full element.
    pub fn full_span(
        start_magnitude: f64,
        end_magnitude: f64,
        direction: Vec3,
        coordinate_system: CoordinateSystem,
    ) -> Self {
        Self {
            start_offset: 0.0,
            end_offset: 0.0,
            start_magnitude,
            end_magnitude,
            direction,
            coordinate_system,
        }
    }

    /// Restrict the loaded span by natural-coordinate offsets from each end.
    pub fn with_offsets(mut self, start_offset: f64, end_offset: f64) -> Self {
        self.start_offset = start_offset;
        self.end_offset = end_offset;
        self
    }

    /// Natural coordinates `(ξ0, ξ1)` bounding the loaded span.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLoad`] for negative offsets or an empty span.
    pub fn span(&self) -> Result<(f64, f64)> {
        if !(self.start_offset >= 0.0 && self.end_offset >= 0.0) {
            return Err(Error::InvalidLoad(format!(
                "trapezoidal offsets must be non-negative, got {} and {}",
                self.start_offset, self.end_offset
            )));
        }
        let xi0 = -1.0 + self.start_offset;
        let xi1 = 1.0 - self.end_offset;
        if !(xi0 < xi1) {
            return Err(Error::InvalidLoad(format!(
                "trapezoidal span [{}, {}] is empty",
                xi0, xi1
            )));
        }
        Ok((xi0, xi1))
    }

    /// Magnitude at natural coordinate `xi`; zero outside the loaded span.
    pub fn magnitude_at(&self, xi: f64) -> Result<f64> {
        let (xi0, xi1) = self.span()?;
        if xi < xi0 || xi > xi1 {
            return Ok(0.0);
        }
        let t = (xi - xi0) / (xi1 - xi0);
        Ok(self.start_magnitude + t * (self.end_magnitude - self.start_magnitude))
    }
}

/// Point force at a natural location along the element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConcentratedLoad {
    pub force: Force,
    pub xi: f64,
    pub coordinate_system: CoordinateSystem,
}

/// Load applied to an element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Load {
    Uniform(UniformLoad),
    Trapezoidal(TrapezoidalLoad),
    Concentrated(ConcentratedLoad),
}

impl Load {
    /// Short name used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Load::Uniform(_) => "uniform load",
            Load::Trapezoidal(_) => "trapezoidal load",
            Load::Concentrated(_) => "concentrated load",
        }
    }
}

impl From<UniformLoad> for Load {
    fn from(load: UniformLoad) -> Self {
        Load::Uniform(load)
    }
}

impl From<TrapezoidalLoad> for Load {
    fn from(load: TrapezoidalLoad) -> Self {
        Load::Trapezoidal(load)
    }
}

impl From<ConcentratedLoad> for Load {
    fn from(load: ConcentratedLoad) -> Self {
        Load::Concentrated(load)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_trapezoidal_full_span() {
        let load = TrapezoidalLoad::full_span(2.0, 6.0, Vec3::x(), CoordinateSystem::Local);
        assert_eq!(load.span().unwrap(), (-1.0, 1.0));
        assert_relative_eq!(load.magnitude_at(-1.0).unwrap(), 2.0);
        assert_relative_eq!(load.magnitude_at(0.0).unwrap(), 4.0);
        assert_relative_eq!(load.magnitude_at(1.0).unwrap(), 6.0);
    }

    #[test]
    fn test_trapezoidal_partial_span() {
        let load = TrapezoidalLoad::full_span(1.0, 3.0, Vec3::x(), CoordinateSystem::Local)
            .with_offsets(0.5, 0.5);
        let (xi0, xi1) = load.span().unwrap();
        assert_relative_eq!(xi0, -0.5);
        assert_relative_eq!(xi1, 0.5);
        assert_relative_eq!(load.magnitude_at(-0.9).unwrap(), 0.0);
        assert_relative_eq!(load.magnitude_at(0.0).unwrap(), 2.0);
        assert_relative_eq!(load.magnitude_at(0.9).unwrap(), 0.0);
    }

    #[test]
    fn test_trapezoidal_invalid_span() {
        let negative = TrapezoidalLoad::full_span(1.0, 1.0, Vec3::x(), CoordinateSystem::Local)
            .with_offsets(-0.1, 0.0);
        assert!(matches!(negative.span(), Err(Error::InvalidLoad(_))));

        let empty = TrapezoidalLoad::full_span(1.0, 1.0, Vec3::x(), CoordinateSystem::Local)
            .with_offsets(1.0, 1.0);
        assert!(matches!(empty.span(), Err(Error::InvalidLoad(_))));
    }

    #[test]
    fn test_load_names() {
        let uniform: Load = UniformLoad::new(1.0, Vec3::x(), CoordinateSystem::Global).into();
        assert_eq!(uniform.name(), "uniform load");
        let point: Load = ConcentratedLoad {
            force: Force::zero(),
            xi: 0.0,
            coordinate_system: CoordinateSystem::Local,
        }
        .into();
        assert_eq!(point.name(), "concentrated load");
    }
}
