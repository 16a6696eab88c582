// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Source Formulas
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shape functions and renormalization shared by the formula sources.

use fusion_types::error::{FusionError, FusionResult};
use ndarray::Array1;

/// Minimum shape integral for renormalization.
const MIN_SHAPE_INTEGRAL: f64 = 1e-30;

/// Minimum Gaussian / decay width in normalized radius.
const MIN_WIDTH: f64 = 1e-6;

/// Unnormalized Gaussian exp(-(ρ - center)² / (2 width²)).
pub fn gaussian(rho: &Array1<f64>, center: f64, width: f64) -> Array1<f64> {
    let w = width.abs().max(MIN_WIDTH);
    rho.mapv(|r| (-(r - center).powi(2) / (2.0 * w * w)).exp())
}

/// Exponential decaying inward from the edge: exp(-(1 - ρ) / decay_length).
pub fn edge_exponential(rho: &Array1<f64>, decay_length: f64) -> Array1<f64> {
    let l = decay_length.abs().max(MIN_WIDTH);
    rho.mapv(|r| (-(1.0 - r) / l).exp())
}

/// Scale `shape` so that Σ shape · element · dρ equals `total`.
///
/// `element` is the area or volume element per unit normalized radius.
pub fn renormalize(
    shape: Array1<f64>,
    element: &Array1<f64>,
    drho: f64,
    total: f64,
    what: &str,
) -> FusionResult<Array1<f64>> {
    if !total.is_finite() {
        return Err(FusionError::PhysicsViolation(format!(
            "{what}: target total must be finite, got {total}"
        )));
    }
    let integral = (&shape * element).sum() * drho;
    if !integral.is_finite() || integral.abs() < MIN_SHAPE_INTEGRAL {
        return Err(FusionError::PhysicsViolation(format!(
            "{what}: shape integral {integral} cannot be renormalized"
        )));
    }
    let scale = total / integral;
    Ok(shape.mapv(|v| v * scale))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gaussian_peak_at_center() {
        let rho = Array1::linspace(0.0, 1.0, 11);
        let g = gaussian(&rho, 0.5, 0.1);
        assert!((g[5] - 1.0).abs() < 1e-15);
        assert!(g[0] < g[5] && g[10] < g[5]);
    }

    #[test]
    fn test_edge_exponential_peaks_at_edge() {
        let rho = Array1::linspace(0.0, 1.0, 11);
        let e = edge_exponential(&rho, 0.05);
        assert!((e[10] - 1.0).abs() < 1e-15);
        assert!(e[0] < 1e-8);
    }

    #[test]
    fn test_renormalize_hits_total() {
        let rho = Array1::from_shape_fn(50, |i| (i as f64 + 0.5) / 50.0);
        let element = rho.mapv(|r| 2.0 * r);
        let shape = gaussian(&rho, 0.3, 0.1);
        let out = renormalize(shape, &element, 0.02, 7.5e6, "test").unwrap();
        let integral = (&out * &element).sum() * 0.02;
        assert!((integral - 7.5e6).abs() / 7.5e6 < 1e-12);
    }

    #[test]
    fn test_renormalize_rejects_zero_shape() {
        let element = Array1::from_elem(10, 1.0);
        let err = renormalize(Array1::zeros(10), &element, 0.1, 1.0, "zero").unwrap_err();
        assert!(matches!(err, FusionError::PhysicsViolation(_)));
    }
}
