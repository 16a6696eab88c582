// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Heat Sources
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Ion and electron heat sources.
//!
//! - Generic auxiliary heating: Gaussian in ρ, volume integral = `Ptot`,
//!   split between ions and electrons by `el_heat_fraction`.
//! - Fusion heating: D-T alpha power from Ti and ne (50/50 fuel mix).
//! - Bremsstrahlung: electron sink ∝ Zeff·ne²·√Te.
//!
//! All outputs are power densities in W/m³.

use super::formulas::{gaussian, renormalize};
use super::profiles::SourceOutput;
use crate::provider::ParameterBundle;
use crate::runtime_params::{absolute_density, IP, NE, TE, TI};
use fusion_types::constants::{ALPHA_FRACTION, BREMSSTRAHLUNG_COEFF, E_FUSION_DT};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Geometry;

/// rsource and w in normalized radius, Ptot [MW].
pub const GENERIC_HEAT_DEFAULT_PARAMS: &[(&str, f64)] = &[
    ("rsource", 0.0),
    ("w", 0.25),
    ("Ptot", 120.0),
    ("el_heat_fraction", 0.66),
];

pub const BREMSSTRAHLUNG_DEFAULT_PARAMS: &[(&str, f64)] = &[("Zeff", 1.0)];

/// Profile conditions read by the fusion heat model.
pub const FUSION_HEAT_INPUTS: &[&str] = &[TI, NE, IP];

/// Profile conditions read by the bremsstrahlung model.
pub const BREMSSTRAHLUNG_INPUTS: &[&str] = &[TE, NE, IP];

/// Minimum temperature in keV (below this σv is negligible).
const T_MIN_KEV: f64 = 0.1;

/// Share of the alpha power deposited on ions.
const ALPHA_ION_FRACTION: f64 = 0.3;

/// Bosch-Hale D-T fusion reaction rate ⟨σv⟩ in m³/s.
///
/// Uses NRL Plasma Formulary approximation:
///   σv = 3.68e-18 / T^(2/3) × exp(-19.94 / T^(1/3))
///
/// Valid for T < 100 keV. T is clamped to T_MIN_KEV.
pub fn bosch_hale_dt(t_kev: f64) -> f64 {
    let t = t_kev.max(T_MIN_KEV);
    3.68e-18 / t.powf(2.0 / 3.0) * (-19.94 / t.powf(1.0 / 3.0)).exp()
}

/// Gaussian auxiliary heating, slots `[ion, electron]`.
pub fn generic_ion_el_heat(params: &ParameterBundle, geo: &Geometry) -> FusionResult<SourceOutput> {
    let rsource = params.scalar("rsource")?;
    let width = params.scalar("w")?;
    let p_tot_w = params.scalar("Ptot")? * 1e6;
    let el_fraction = params.scalar("el_heat_fraction")?;
    if !(0.0..=1.0).contains(&el_fraction) {
        return Err(FusionError::PhysicsViolation(format!(
            "el_heat_fraction must lie in [0, 1], got {el_fraction}"
        )));
    }

    let shape = gaussian(&geo.mesh.cell_centers, rsource, width);
    let total = renormalize(shape, &geo.vpr_cell, geo.drho_norm(), p_tot_w, "generic heat")?;
    let ion = total.mapv(|p| p * (1.0 - el_fraction));
    let el = total.mapv(|p| p * el_fraction);
    Ok(SourceOutput::new(vec![ion, el]))
}

/// Alpha heating from D-T fusion, slots `[ion, electron]`.
///
/// P_fus = nD·nT·⟨σv⟩(Ti)·E_fus with nD = nT = ne/2;
/// P_alpha = 0.2·P_fus.
pub fn fusion_heat(core: &ParameterBundle, geo: &Geometry) -> FusionResult<SourceOutput> {
    let ti = core.profile(TI)?;
    let ne = absolute_density(core, geo)?;

    let mut p_alpha = ne.clone();
    p_alpha.zip_mut_with(ti, |n, &t| {
        let n_fuel = 0.5 * *n;
        *n = ALPHA_FRACTION * n_fuel * n_fuel * bosch_hale_dt(t) * E_FUSION_DT;
    });
    let ion = p_alpha.mapv(|p| p * ALPHA_ION_FRACTION);
    let el = p_alpha.mapv(|p| p * (1.0 - ALPHA_ION_FRACTION));
    Ok(SourceOutput::new(vec![ion, el]))
}

/// Bremsstrahlung radiation, single slot `[electron]`, non-positive.
pub fn bremsstrahlung(
    params: &ParameterBundle,
    core: &ParameterBundle,
    geo: &Geometry,
) -> FusionResult<SourceOutput> {
    let zeff = params.scalar("Zeff")?;
    if zeff < 1.0 {
        return Err(FusionError::PhysicsViolation(format!(
            "Zeff must be >= 1, got {zeff}"
        )));
    }
    let te = core.profile(TE)?;
    let mut p_rad = absolute_density(core, geo)?;
    p_rad.zip_mut_with(te, |n, &t| {
        *n = -BREMSSTRAHLUNG_COEFF * zeff * *n * *n * t.max(0.0).sqrt();
    });
    Ok(SourceOutput::new(vec![p_rad]))
}
