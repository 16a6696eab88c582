// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Interp
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! 1D piecewise-linear interpolation with edge clamping.
//!
//! All functions expect `xp` sorted strictly ascending. Queries below the
//! first knot return the first value and queries above the last knot return
//! the last value: nothing is extrapolated.

use ndarray::Array1;

/// Position of a query relative to a sorted knot vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket {
    /// On a knot, or clamped to an end knot.
    At(usize),
    /// Strictly between knots `lo` and `lo + 1`.
    Between(usize),
}

/// Locate `x` in `xp` by binary search.
///
/// A NaN query lands on the first knot. Panics if `xp` is empty.
pub fn bracket(xp: &[f64], x: f64) -> Bracket {
    assert!(!xp.is_empty(), "knot vector must not be empty");
    let last = xp.len() - 1;
    if x.is_nan() || x <= xp[0] {
        return Bracket::At(0);
    }
    if x >= xp[last] {
        return Bracket::At(last);
    }
    // First knot >= x; 1 <= i <= last here.
    let i = xp.partition_point(|&k| k < x);
    if xp[i] == x {
        Bracket::At(i)
    } else {
        Bracket::Between(i - 1)
    }
}

/// Linear interpolation between `(x0, v0)` and `(x1, v1)`.
#[inline]
pub fn lerp(x0: f64, v0: f64, x1: f64, v1: f64, x: f64) -> f64 {
    v0 + (v1 - v0) * (x - x0) / (x1 - x0)
}

/// Index of the greatest knot ≤ `x`, clamped to the first knot.
pub fn step_index(xp: &[f64], x: f64) -> usize {
    assert!(!xp.is_empty(), "knot vector must not be empty");
    xp.partition_point(|&k| k <= x).saturating_sub(1)
}

/// Clamped linear interpolation of `(xp, fp)` at `x`.
///
/// Returns `fp[i]` bit-for-bit when `x == xp[i]`, and NaN for a NaN `x`.
pub fn interp1d(xp: &[f64], fp: &[f64], x: f64) -> f64 {
    debug_assert_eq!(xp.len(), fp.len());
    if x.is_nan() {
        return f64::NAN;
    }
    match bracket(xp, x) {
        Bracket::At(i) => fp[i],
        Bracket::Between(i) => lerp(xp[i], fp[i], xp[i + 1], fp[i + 1], x),
    }
}

/// Resample `(xp, fp)` onto every point of `xs`.
pub fn interp1d_onto(xp: &[f64], fp: &[f64], xs: &Array1<f64>) -> Array1<f64> {
    xs.mapv(|x| interp1d(xp, fp, x))
}

/// Sort `(x, f)` pairs by `x` and split them into knot and value vectors.
pub fn sorted_knots(pairs: &[(f64, f64)]) -> (Vec<f64>, Vec<f64>) {
    let mut sorted = pairs.to_vec();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));
    sorted.into_iter().unzip()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp1d_exact_knots() {
        let xp = [0.0, 1.5];
        let fp = [1.0, 100.0];
        assert_eq!(interp1d(&xp, &fp, 0.0), 1.0);
        assert_eq!(interp1d(&xp, &fp, 1.5), 100.0);
        assert_eq!(interp1d(&xp, &fp, 0.75), 50.5);
    }

    #[test]
    fn test_interp1d_clamps() {
        let xp = [0.0, 1.0, 2.0];
        let fp = [3.0, 5.0, 4.0];
        assert_eq!(interp1d(&xp, &fp, -10.0), 3.0);
        assert_eq!(interp1d(&xp, &fp, 10.0), 4.0);
        assert_eq!(interp1d(&xp, &fp, 1.0), 5.0);
    }

    #[test]
    fn test_interp1d_single_knot() {
        assert_eq!(interp1d(&[0.3], &[7.0], -1.0), 7.0);
        assert_eq!(interp1d(&[0.3], &[7.0], 0.3), 7.0);
        assert_eq!(interp1d(&[0.3], &[7.0], 9.0), 7.0);
    }

    #[test]
    fn test_interp1d_onto_cell_centers() {
        let xs = Array1::from(vec![0.125, 0.375, 0.625, 0.875]);
        let out = interp1d_onto(&[0.0, 1.0], &[1.0, 2.0], &xs);
        let expected = [1.125, 1.375, 1.625, 1.875];
        for (o, e) in out.iter().zip(expected) {
            assert!((o - e).abs() < 1e-14, "{o} != {e}");
        }
    }

    #[test]
    fn test_step_index() {
        let xp = [0.0, 0.1, 1.0];
        assert_eq!(step_index(&xp, -1.0), 0);
        assert_eq!(step_index(&xp, 0.0), 0);
        assert_eq!(step_index(&xp, 0.05), 0);
        assert_eq!(step_index(&xp, 0.1), 1);
        assert_eq!(step_index(&xp, 0.5), 1);
        assert_eq!(step_index(&xp, 3.0), 2);
    }

    #[test]
    fn test_bracket_between() {
        let xp = [0.0, 1.0, 2.0];
        assert_eq!(bracket(&xp, 0.5), Bracket::Between(0));
        assert_eq!(bracket(&xp, 1.5), Bracket::Between(1));
        assert_eq!(bracket(&xp, 2.0), Bracket::At(2));
    }

    #[test]
    fn test_nan_query_does_not_panic() {
        let xp = [0.0, 1.5];
        assert_eq!(bracket(&xp, f64::NAN), Bracket::At(0));
        assert_eq!(bracket(&[0.3], f64::NAN), Bracket::At(0));
        assert_eq!(step_index(&xp, f64::NAN), 0);
        assert!(interp1d(&xp, &[1.0, 100.0], f64::NAN).is_nan());
        assert_eq!(interp1d(&xp, &[1.0, 100.0], f64::INFINITY), 100.0);
        assert_eq!(interp1d(&xp, &[1.0, 100.0], f64::NEG_INFINITY), 1.0);
    }

    #[test]
    fn test_sorted_knots() {
        let (x, f) = sorted_knots(&[(1.0, 2.0), (0.0, 1.0)]);
        assert_eq!(x, vec![0.0, 1.0]);
        assert_eq!(f, vec![1.0, 2.0]);
    }
}
