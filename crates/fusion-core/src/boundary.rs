// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Boundary Conditions
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Right-edge boundary value resolution.
//!
//! An explicit override always wins and is reported as an absolute value,
//! even when the interior profile is expressed as a fraction of a reference
//! density. Without an override the edge value comes from the interior
//! profile at the outer face and keeps the profile's normalization flag.

use crate::interpolant::Interpolant;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryValue {
    pub value: f64,
    pub is_absolute: bool,
    pub is_reference_normalized: bool,
}

/// Resolve the right boundary of a quantity at time `t`.
///
/// `profile_is_normalized` is the interior profile's own reference
/// normalization flag (e.g. `ne_is_fGW`).
pub fn resolve_boundary(
    profile: &Interpolant,
    explicit_override: Option<&Interpolant>,
    profile_is_normalized: bool,
    t: f64,
) -> BoundaryValue {
    match explicit_override {
        Some(bc) => BoundaryValue {
            value: bc.right_edge(t),
            is_absolute: true,
            is_reference_normalized: false,
        },
        None => BoundaryValue {
            value: profile.right_edge(t),
            is_absolute: false,
            is_reference_normalized: profile_is_normalized,
        },
    }
}
