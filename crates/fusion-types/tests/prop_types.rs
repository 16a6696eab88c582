// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Property-Based Tests (proptest) for fusion-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for fusion-types using proptest.
//!
//! Covers: Mesh construction invariants, circular Geometry elements,
//! profile key parsing and validation.

use fusion_types::config::{ProfileSpec, ProfileValue, QuantityKind};
use fusion_types::state::{Geometry, Mesh};
use proptest::prelude::*;

// ── Mesh Construction Invariants ─────────────────────────────────────

proptest! {
    /// Mesh sizes match the requested cell count.
    #[test]
    fn mesh_dimensions_match(n in 1usize..256) {
        let mesh = Mesh::uniform(n).unwrap();
        prop_assert_eq!(mesh.n_cells(), n);
        prop_assert_eq!(mesh.cell_centers.len(), n);
        prop_assert_eq!(mesh.face_centers.len(), n + 1);
        prop_assert!((mesh.face_centers[0]).abs() < 1e-15);
        prop_assert!((mesh.right_face() - 1.0).abs() < 1e-12);
    }

    /// Every cell center lies halfway between its two faces.
    #[test]
    fn mesh_cells_between_faces(n in 1usize..128) {
        let mesh = Mesh::uniform(n).unwrap();
        for i in 0..n {
            let mid = 0.5 * (mesh.face_centers[i] + mesh.face_centers[i + 1]);
            prop_assert!((mesh.cell_centers[i] - mid).abs() < 1e-12,
                "cell {} = {}, face midpoint = {}", i, mesh.cell_centers[i], mid);
        }
    }

    /// Area and volume elements are positive and increase outward.
    #[test]
    fn geometry_elements_monotone(n in 2usize..64, hires in 1usize..8) {
        let geo = Geometry::circular(n, 6.2, 2.0, hires).unwrap();
        prop_assert_eq!(geo.rho_hires_norm.len(), n * hires);
        for i in 1..n {
            prop_assert!(geo.spr_cell[i] > geo.spr_cell[i - 1]);
            prop_assert!(geo.vpr_cell[i] > geo.vpr_cell[i - 1]);
        }
        prop_assert!(geo.spr_cell[0] > 0.0);
    }
}

// ── Profile Parsing ──────────────────────────────────────────────────

proptest! {
    /// Keys written with Display parse back to the same f64.
    #[test]
    fn flat_map_keys_roundtrip(keys in prop::collection::btree_set(0u32..10_000, 1..20)) {
        let pairs: Vec<(f64, f64)> = keys
            .iter()
            .map(|&k| (k as f64 / 997.0, k as f64))
            .collect();
        let spec = ProfileValue::from_pairs(&pairs)
            .to_spec("Ip", QuantityKind::Scalar)
            .unwrap();
        prop_assert_eq!(spec, ProfileSpec::TimeSeries(pairs));
    }

    /// Any finite scalar is a valid spec for both quantity kinds.
    #[test]
    fn scalar_valid_for_any_kind(v in -1e12f64..1e12) {
        prop_assert!(ProfileSpec::Scalar(v).validate("x", QuantityKind::Scalar).is_ok());
        prop_assert!(ProfileSpec::Scalar(v).validate("x", QuantityKind::Radial).is_ok());
    }
}
