// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — External Current Source
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Externally driven current density.
//!
//! j_ext(ρ) ∝ exp(-(ρ - rext)² / (2 wext²)), scaled so that ∫ j_ext dA
//! equals `Iext`. Feeds the poloidal flux equation only.

use super::formulas::{gaussian, renormalize};
use crate::provider::ParameterBundle;
use fusion_types::error::FusionResult;
use fusion_types::state::Geometry;
use ndarray::Array1;

/// Iext [MA], wext and rext in normalized radius.
pub const DEFAULT_PARAMS: &[(&str, f64)] = &[("Iext", 3.0), ("wext", 0.05), ("rext", 0.4)];

struct JextParams {
    i_ext_a: f64,
    wext: f64,
    rext: f64,
}

impl JextParams {
    fn from_bundle(params: &ParameterBundle) -> FusionResult<Self> {
        Ok(JextParams {
            i_ext_a: params.scalar("Iext")? * 1e6,
            wext: params.scalar("wext")?,
            rext: params.scalar("rext")?,
        })
    }
}

/// Current density [A/m²] on the cell grid.
pub fn jext_formula(params: &ParameterBundle, geo: &Geometry) -> FusionResult<Array1<f64>> {
    let p = JextParams::from_bundle(params)?;
    let shape = gaussian(&geo.mesh.cell_centers, p.rext, p.wext);
    renormalize(shape, &geo.spr_cell, geo.drho_norm(), p.i_ext_a, "jext")
}

/// Current density [A/m²] on the hi-res grid.
pub fn jext_hires(params: &ParameterBundle, geo: &Geometry) -> FusionResult<Array1<f64>> {
    let p = JextParams::from_bundle(params)?;
    let shape = gaussian(&geo.rho_hires_norm, p.rext, p.wext);
    renormalize(shape, &geo.spr_hires, geo.drho_hires_norm, p.i_ext_a, "jext_hires")
}
