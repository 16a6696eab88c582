// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// D-T fusion energy release (J) - 17.6 MeV
pub const E_FUSION_DT: f64 = 17.6 * 1.602176634e-13;

/// Alpha particle energy fraction (3.5/17.6)
pub const ALPHA_FRACTION: f64 = 0.2;

/// Bremsstrahlung coefficient for P = C · Zeff · ne² · sqrt(Te[keV]) in W/m³ (ne in m⁻³).
pub const BREMSSTRAHLUNG_COEFF: f64 = 5.35e-37;
