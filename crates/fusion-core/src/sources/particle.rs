// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Particle Sources
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electron particle sources [m⁻³ s⁻¹]; volume integral = `S_tot`.

use super::formulas::{edge_exponential, gaussian, renormalize};
use super::profiles::SourceOutput;
use crate::provider::ParameterBundle;
use fusion_types::error::FusionResult;
use fusion_types::state::Geometry;

pub const GAS_PUFF_DEFAULT_PARAMS: &[(&str, f64)] = &[("decay_length", 0.05), ("S_tot", 1e22)];

pub const GENERIC_PARTICLE_DEFAULT_PARAMS: &[(&str, f64)] = &[
    ("deposition_location", 0.0),
    ("width", 0.25),
    ("S_tot", 2.05e20),
];

/// Edge fuelling decaying inward over `decay_length`.
pub fn gas_puff(params: &ParameterBundle, geo: &Geometry) -> FusionResult<SourceOutput> {
    let decay_length = params.scalar("decay_length")?;
    let s_tot = params.scalar("S_tot")?;
    let shape = edge_exponential(&geo.mesh.cell_centers, decay_length);
    let s = renormalize(shape, &geo.vpr_cell, geo.drho_norm(), s_tot, "gas puff")?;
    Ok(SourceOutput::new(vec![s]))
}

/// Gaussian deposition around `deposition_location`.
pub fn generic_particle(params: &ParameterBundle, geo: &Geometry) -> FusionResult<SourceOutput> {
    let location = params.scalar("deposition_location")?;
    let width = params.scalar("width")?;
    let s_tot = params.scalar("S_tot")?;
    let shape = gaussian(&geo.mesh.cell_centers, location, width);
    let s = renormalize(shape, &geo.vpr_cell, geo.drho_norm(), s_tot, "particle source")?;
    Ok(SourceOutput::new(vec![s]))
}
