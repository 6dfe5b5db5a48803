//! Gauss-Legendre quadrature for line integrals.
//!
//! This module provides:
//! - 1D Gauss-Legendre rules of any point count on [-1, 1]
//! - The minimal point count for exact integration of a polynomial degree
//! - A matrix-valued integrator over an arbitrary interval [a, b]
//!
//! # Usage
//!
//! ```
//! use felt_core::quadrature::{gauss_1d, integrate};
//! use felt_core::types::scalar_matrix;
//!
//! // 2-point rule
//! for (xi, w) in gauss_1d(2).unwrap() {
//!     // integrate at point xi with weight w
//! }
//!
//! // ∫_0^2 x dx = 2
//! let m = integrate(|x| Ok(scalar_matrix(x)), 0.0, 2.0, 1).unwrap();
//! assert!((m[(0, 0)] - 2.0).abs() < 1e-14);
//! ```

use crate::error::{Error, Result};
use crate::types::Matrix;

/// 1D Gauss-Legendre quadrature points and weights.
///
/// Returns (point, weight) pairs for integration on [-1, 1], ordered by
/// increasing point. An `n`-point rule integrates polynomials up to degree
/// `2n - 1` exactly.
///
/// # Errors
///
/// Returns [`Error::InvalidQuadrature`] if `n` is zero.
pub fn gauss_1d(n: usize) -> Result<Vec<(f64, f64)>> {
    let rule = match n {
        0 => {
            return Err(Error::InvalidQuadrature(
                "gauss_1d: n must be at least 1".into(),
            ))
        }
        1 => vec![(0.0, 2.0)],
        2 => {
            let p = 1.0 / 3.0_f64.sqrt();
            vec![(-p, 1.0), (p, 1.0)]
        }
        3 => {
            let p = (3.0 / 5.0_f64).sqrt();
            vec![(-p, 5.0 / 9.0), (0.0, 8.0 / 9.0), (p, 5.0 / 9.0)]
        }
        4 => {
            // Points: ±√((3 ∓ 2√(6/5))/7)
            let sqrt_6_5 = (6.0 / 5.0_f64).sqrt();
            let p1 = ((3.0 - 2.0 * sqrt_6_5) / 7.0).sqrt();
            let p2 = ((3.0 + 2.0 * sqrt_6_5) / 7.0).sqrt();
            // Weights: (18 ± √30) / 36
            let sqrt_30 = 30.0_f64.sqrt();
            let w1 = (18.0 + sqrt_30) / 36.0;
            let w2 = (18.0 - sqrt_30) / 36.0;
            vec![(-p2, w2), (-p1, w1), (p1, w1), (p2, w2)]
        }
        _ => gauss_legendre(n)?,
    };
    Ok(rule)
}

/// General `n`-point rule from `gauss_quad`, sorted by increasing point.
fn gauss_legendre(n: usize) -> Result<Vec<(f64, f64)>> {
    let rule = gauss_quad::GaussLegendre::new(n).map_err(|err| {
        Error::InvalidQuadrature(format!("gauss_1d: {}-point rule: {:?}", n, err))
    })?;
    let mut pairs = rule.into_node_weight_pairs();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    Ok(pairs)
}

/// Smallest Gauss-Legendre point count that integrates a polynomial of
/// `degree` exactly: ⌈(degree + 1) / 2⌉, at least 1.
pub fn points_for_degree(degree: usize) -> usize {
    ((degree + 2) / 2).max(1)
}

/// Integrate a matrix-valued function over [a, b] entrywise.
///
/// The `n`-point rule on [-1, 1] is mapped affinely onto [a, b].
///
/// # Errors
///
/// Propagates errors from `f`, rejects `n == 0`, and returns
/// [`Error::ShapeMismatch`] if `f` changes shape between sample points.
pub fn integrate<F>(f: F, a: f64, b: f64, n: usize) -> Result<Matrix>
where
    F: Fn(f64) -> Result<Matrix>,
{
    let rule = gauss_1d(n)?;
    let half = 0.5 * (b - a);
    let mid = 0.5 * (a + b);

    let mut sum: Option<Matrix> = None;
    for (t, w) in rule {
        let value = f(mid + half * t)?;
        sum = Some(match sum {
            None => value * w,
            Some(acc) => {
                if acc.shape() != value.shape() {
                    return Err(Error::ShapeMismatch(format!(
                        "integrand changed shape from {:?} to {:?}",
                        acc.shape(),
                        value.shape()
                    )));
                }
                acc + value * w
            }
        });
    }

    // gauss_1d never returns an empty rule
    let sum = sum.ok_or_else(|| Error::InvalidQuadrature("empty rule".into()))?;
    Ok(sum * half)
}
