// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Sources
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Source terms for the transport equations.
//!
//! Each source *type* ([`SourceKind`]) has a fixed set of supported modes,
//! a fixed ordered list of native outputs, and an explicit table mapping
//! each evolved field to the output slot that feeds it.

pub mod catalog;
pub mod external_current;
pub mod formulas;
pub mod heat;
pub mod particle;
pub mod profiles;

pub use catalog::{resolve, SourceCatalog, SourceSpec, ValidatedSourceConfig};
pub use profiles::{compute_contributions, compute_hires, SourceOutput, SourceProfiles};

use fusion_types::config::{AffectedCoreProfile, SourceMode};
use fusion_types::error::{FusionError, FusionResult};
use std::fmt;

use fusion_types::config::AffectedCoreProfile::{Ne, Psi, TempEl, TempIon};
use fusion_types::config::SourceMode::{Formula, ModelBased, Prescribed, Zero};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Externally driven current (e.g. ECCD/NBCD), Gaussian in ρ.
    ExternalCurrent,
    /// Gaussian auxiliary heating split between ions and electrons.
    GenericIonElHeat,
    /// Edge gas puff decaying inward.
    GasPuff,
    /// Gaussian particle deposition.
    GenericParticle,
    /// D-T alpha heating from the plasma profiles.
    FusionHeat,
    /// Electron radiation sink.
    Bremsstrahlung,
}

impl SourceKind {
    pub const ALL: [SourceKind; 6] = [
        SourceKind::ExternalCurrent,
        SourceKind::GenericIonElHeat,
        SourceKind::GasPuff,
        SourceKind::GenericParticle,
        SourceKind::FusionHeat,
        SourceKind::Bremsstrahlung,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            SourceKind::ExternalCurrent => "external_current",
            SourceKind::GenericIonElHeat => "generic_ion_el_heat",
            SourceKind::GasPuff => "gas_puff",
            SourceKind::GenericParticle => "generic_particle",
            SourceKind::FusionHeat => "fusion_heat",
            SourceKind::Bremsstrahlung => "bremsstrahlung",
        }
    }

    pub fn from_tag(tag: &str) -> FusionResult<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.tag() == tag)
            .ok_or_else(|| FusionError::ConfigError(format!("unknown source type '{tag}'")))
    }

    /// Modes this type can run in.
    pub fn supported_modes(&self) -> &'static [SourceMode] {
        match self {
            SourceKind::ExternalCurrent
            | SourceKind::GenericIonElHeat
            | SourceKind::GasPuff
            | SourceKind::GenericParticle => &[Zero, Formula, Prescribed],
            SourceKind::FusionHeat | SourceKind::Bremsstrahlung => &[Zero, ModelBased, Prescribed],
        }
    }

    pub fn supports(&self, mode: SourceMode) -> bool {
        self.supported_modes().contains(&mode)
    }

    /// Native outputs in slot order.
    pub fn outputs(&self) -> &'static [AffectedCoreProfile] {
        match self {
            SourceKind::ExternalCurrent => &[Psi],
            SourceKind::GenericIonElHeat | SourceKind::FusionHeat => &[TempIon, TempEl],
            SourceKind::GasPuff | SourceKind::GenericParticle => &[Ne],
            SourceKind::Bremsstrahlung => &[TempEl],
        }
    }

    pub fn n_outputs(&self) -> usize {
        self.outputs().len()
    }

    /// Output slot feeding `field`, or `None` if this type never produces it.
    pub fn slot_for(&self, field: AffectedCoreProfile) -> Option<usize> {
        match (self, field) {
            (SourceKind::ExternalCurrent, Psi) => Some(0),
            (SourceKind::GenericIonElHeat | SourceKind::FusionHeat, TempIon) => Some(0),
            (SourceKind::GenericIonElHeat | SourceKind::FusionHeat, TempEl) => Some(1),
            (SourceKind::GasPuff | SourceKind::GenericParticle, Ne) => Some(0),
            (SourceKind::Bremsstrahlung, TempEl) => Some(0),
            _ => None,
        }
    }

    /// Formula coefficients and their defaults.
    pub fn default_params(&self) -> &'static [(&'static str, f64)] {
        match self {
            SourceKind::ExternalCurrent => external_current::DEFAULT_PARAMS,
            SourceKind::GenericIonElHeat => heat::GENERIC_HEAT_DEFAULT_PARAMS,
            SourceKind::GasPuff => particle::GAS_PUFF_DEFAULT_PARAMS,
            SourceKind::GenericParticle => particle::GENERIC_PARTICLE_DEFAULT_PARAMS,
            SourceKind::FusionHeat => &[],
            SourceKind::Bremsstrahlung => heat::BREMSSTRAHLUNG_DEFAULT_PARAMS,
        }
    }

    /// Profile-condition quantities the model-based computation reads.
    pub fn required_quantities(&self) -> &'static [&'static str] {
        match self {
            SourceKind::FusionHeat => heat::FUSION_HEAT_INPUTS,
            SourceKind::Bremsstrahlung => heat::BREMSSTRAHLUNG_INPUTS,
            _ => &[],
        }
    }

    /// Whether a hi-res evaluation exists for this type.
    pub fn has_hires(&self) -> bool {
        matches!(self, SourceKind::ExternalCurrent)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Name of the prescribed-profile quantity feeding `field`.
pub fn prescribed_quantity(field: AffectedCoreProfile) -> String {
    format!("prescribed_{field}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_roundtrip() {
        for kind in SourceKind::ALL {
            assert_eq!(SourceKind::from_tag(kind.tag()).unwrap(), kind);
        }
        assert!(matches!(
            SourceKind::from_tag("ohmic"),
            Err(FusionError::ConfigError(_))
        ));
    }

    #[test]
    fn test_external_current_capabilities() {
        let kind = SourceKind::ExternalCurrent;
        assert!(kind.supports(Formula));
        assert!(kind.supports(Prescribed));
        assert!(kind.supports(Zero));
        assert!(!kind.supports(ModelBased));
        assert_eq!(kind.outputs(), &[Psi]);
    }

    #[test]
    fn test_slot_table_consistent_with_outputs() {
        for kind in SourceKind::ALL {
            for field in AffectedCoreProfile::ALL {
                let expected = kind.outputs().iter().position(|f| *f == field);
                assert_eq!(kind.slot_for(field), expected, "{kind} / {field}");
            }
        }
    }

    #[test]
    fn test_every_kind_can_be_disabled() {
        for kind in SourceKind::ALL {
            assert!(kind.supports(Zero), "{kind}");
        }
    }

    #[test]
    fn test_prescribed_quantity_name() {
        assert_eq!(prescribed_quantity(TempIon), "prescribed_temp_ion");
    }
}
