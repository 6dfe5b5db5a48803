//! Polynomial order bookkeeping for exact numerical integration.
//!
//! Kernels report an upper bound on the polynomial degree of N, B and det(J)
//! along each natural axis. The assembler adds these bounds for each integrand
//! and picks the smallest Gauss rule that integrates the sum exactly. Bounds may
//! over-state the true degree (costs extra points) but must never under-state it.

use std::ops::Add;

/// Which kernel quantity an order bound refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderKind {
    /// Shape function matrix N.
    Shape,
    /// Strain-displacement matrix B.
    StrainDisplacement,
    /// Determinant of the Jacobian.
    JacobianDeterminant,
}

/// Maximum polynomial degree along (ξ, η, ζ).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PolynomialOrder {
    pub xi: usize,
    pub eta: usize,
    pub zeta: usize,
}

impl PolynomialOrder {
    pub const fn new(xi: usize, eta: usize, zeta: usize) -> Self {
        Self { xi, eta, zeta }
    }

    /// Degree along ξ only; the element has no extent along η, ζ.
    pub const fn line(xi: usize) -> Self {
        Self::new(xi, 0, 0)
    }

    /// Largest degree over all three axes.
    pub fn max(&self) -> usize {
        self.xi.max(self.eta).max(self.zeta)
    }

    /// Whether the bound only involves the ξ axis.
    pub fn is_line(&self) -> bool {
        self.eta == 0 && self.zeta == 0
    }
}

impl Add for PolynomialOrder {
    type Output = PolynomialOrder;

    /// Degree of a product of polynomials: degrees add per axis.
    fn add(self, rhs: PolynomialOrder) -> PolynomialOrder {
        PolynomialOrder::new(self.xi + rhs.xi, self.eta + rhs.eta, self.zeta + rhs.zeta)
    }
}
