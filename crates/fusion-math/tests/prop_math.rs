// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for fusion-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for fusion-math using proptest.
//!
//! Covers: 1D interpolation exactness at knots, clamping, linearity and
//! step lookup.

use fusion_math::interp::{interp1d, interp1d_onto, step_index};
use fusion_types::state::Mesh;
use proptest::prelude::*;

fn knots(n: usize) -> Vec<f64> {
    (0..n).map(|i| i as f64 * 0.37 - 1.0).collect()
}

proptest! {
    /// Querying exactly at a knot returns the stored value bit-for-bit.
    #[test]
    fn interp_exact_at_knots(values in prop::collection::vec(-1e6f64..1e6, 1..30)) {
        let xp = knots(values.len());
        for (i, &x) in xp.iter().enumerate() {
            prop_assert_eq!(interp1d(&xp, &values, x), values[i]);
        }
    }

    /// Queries outside the knot range hold the end values.
    #[test]
    fn interp_clamps_outside(
        values in prop::collection::vec(-1e6f64..1e6, 1..30),
        offset in 1e-6f64..1e3,
    ) {
        let xp = knots(values.len());
        let last = values.len() - 1;
        prop_assert_eq!(interp1d(&xp, &values, xp[0] - offset), values[0]);
        prop_assert_eq!(interp1d(&xp, &values, xp[last] + offset), values[last]);
    }

    /// Interpolated values stay within the bracketing knot values.
    #[test]
    fn interp_bounded_by_neighbours(
        values in prop::collection::vec(-1e3f64..1e3, 2..30),
        frac in 0.0f64..1.0,
    ) {
        let xp = knots(values.len());
        let x = xp[0] + frac * (xp[xp.len() - 1] - xp[0]);
        let v = interp1d(&xp, &values, x);
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(v >= lo - 1e-9 && v <= hi + 1e-9, "{} outside [{}, {}]", v, lo, hi);
    }

    /// A linear function is reproduced exactly on any mesh.
    #[test]
    fn interp_linear_on_mesh(n in 1usize..100, a in -10.0f64..10.0, b in -10.0f64..10.0) {
        let mesh = Mesh::uniform(n).unwrap();
        let out = interp1d_onto(&[0.0, 1.0], &[b, a + b], &mesh.cell_centers);
        for (i, &rho) in mesh.cell_centers.iter().enumerate() {
            prop_assert!((out[i] - (a * rho + b)).abs() < 1e-10);
        }
    }

    /// The step index points at a knot not after the query.
    #[test]
    fn step_index_not_after_query(n in 1usize..30, x in -5.0f64..15.0) {
        let xp = knots(n);
        let i = step_index(&xp, x);
        prop_assert!(i < n);
        if x >= xp[0] {
            prop_assert!(xp[i] <= x);
            if i + 1 < n {
                prop_assert!(xp[i + 1] > x);
            }
        } else {
            prop_assert_eq!(i, 0);
        }
    }
}
