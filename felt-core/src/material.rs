//! Material property providers.
//!
//! Kernels sample material properties at a natural coordinate through the
//! [`MaterialModel`] trait. The only provider shipped here is the isotropic
//! linear elastic [`Material`], constant along the element.

use crate::error::{Error, Result};

/// Mechanical properties sampled at one natural coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MaterialProperties {
    /// Elastic (Young's) modulus along the element axis (Pa).
    pub ex: f64,
    /// Poisson's ratio (dimensionless).
    pub nu: f64,
    /// Mass density (kg/m³).
    pub rho: f64,
    /// Viscous damping coefficient per unit volume.
    pub mu: f64,
}

/// Material property provider.
///
/// Implementations must be side-effect free: kernels sample them concurrently
/// at different natural coordinates.
pub trait MaterialModel: Send + Sync + std::fmt::Debug {
    /// Properties at natural coordinate `xi` ∈ [-1, 1].
    fn properties_at(&self, xi: f64) -> MaterialProperties;
}

/// Isotropic linear elastic material, uniform along the element.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Young's modulus (Pa).
    pub youngs_modulus: f64,
    /// Poisson's ratio (dimensionless).
    pub poissons_ratio: f64,
    /// Mass density (kg/m³), optional for static analysis.
    pub density: Option<f64>,
    /// Viscous damping coefficient, optional for undamped analysis.
    pub damping: Option<f64>,
}

impl Material {
    /// Create a new isotropic linear elastic material.
    ///
    /// # Arguments
    ///
    /// * `youngs_modulus` - Young's modulus E (Pa)
    /// * `poissons_ratio` - Poisson's ratio ν (dimensionless, -1 < ν < 0.5)
    ///
    /// # Errors
    ///
    /// Returns error if material properties are physically invalid.
    pub fn new(youngs_modulus: f64, poissons_ratio: f64) -> Result<Self> {
        if !(youngs_modulus > 0.0) {
            return Err(Error::InvalidMaterial(
                "Young's modulus must be positive".into(),
            ));
        }
        if poissons_ratio <= -1.0 || poissons_ratio >= 0.5 {
            return Err(Error::InvalidMaterial(
                "Poisson's ratio must be in range (-1, 0.5)".into(),
            ));
        }
        Ok(Self {
            youngs_modulus,
            poissons_ratio,
            density: None,
            damping: None,
        })
    }

    /// Create a material with density specified.
    pub fn with_density(mut self, density: f64) -> Result<Self> {
        if !(density > 0.0) {
            return Err(Error::InvalidMaterial("Density must be positive".into()));
        }
        self.density = Some(density);
        Ok(self)
    }

    /// Create a material with a viscous damping coefficient.
    pub fn with_damping(mut self, damping: f64) -> Result<Self> {
        if !(damping >= 0.0) {
            return Err(Error::InvalidMaterial(
                "Damping coefficient must be non-negative".into(),
            ));
        }
        self.damping = Some(damping);
        Ok(self)
    }

    /// Shear modulus G = E / (2(1 + ν)).
    pub fn shear_modulus(&self) -> f64 {
        self.youngs_modulus / (2.0 * (1.0 + self.poissons_ratio))
    }
}

impl MaterialModel for Material {
    fn properties_at(&self, _xi: f64) -> MaterialProperties {
        MaterialProperties {
            ex: self.youngs_modulus,
            nu: self.poissons_ratio,
            rho: self.density.unwrap_or(0.0),
            mu: self.damping.unwrap_or(0.0),
        }
    }
}

/// Common material presets.
impl Material {
    /// Structural steel (E = 200 GPa, ν = 0.3, ρ = 7850 kg/m³).
    pub fn steel() -> Self {
        Self {
            youngs_modulus: 200e9,
            poissons_ratio: 0.3,
            density: Some(7850.0),
            damping: None,
        }
    }

    /// Aluminum 6061-T6 (E = 68.9 GPa, ν = 0.33, ρ = 2700 kg/m³).
    pub fn aluminum() -> Self {
        Self {
            youngs_modulus: 68.9e9,
            poissons_ratio: 0.33,
            density: Some(2700.0),
            damping: None,
        }
    }

    /// Titanium Ti-6Al-4V (E = 113.8 GPa, ν = 0.342, ρ = 4430 kg/m³).
    pub fn titanium() -> Self {
        Self {
            youngs_modulus: 113.8e9,
            poissons_ratio: 0.342,
            density: Some(4430.0),
            damping: None,
        }
    }
}
