// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Source Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Summed per-field source contributions for one time step.
//!
//! Every source is mode-checked before any numeric work. Enabled sources
//! then produce their native outputs, which are masked through each
//! source's declared fields and added up in catalog order.

use super::catalog::{resolve, SourceCatalog, ValidatedSourceConfig};
use super::{external_current, heat, particle, prescribed_quantity, SourceKind};
use crate::provider::ParameterBundle;
use crate::runtime_params::DynamicRuntimeParams;
use fusion_math::interp::interp1d_onto;
use fusion_types::config::{AffectedCoreProfile, SourceMode};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Geometry;
use indexmap::IndexMap;
use ndarray::Array1;

/// Native output of one source: one array per output slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceOutput {
    slots: Vec<Array1<f64>>,
}

impl SourceOutput {
    pub fn new(slots: Vec<Array1<f64>>) -> Self {
        SourceOutput { slots }
    }

    pub fn zeros(kind: SourceKind, n_cells: usize) -> Self {
        SourceOutput::new(vec![Array1::zeros(n_cells); kind.n_outputs()])
    }

    pub fn slots(&self) -> &[Array1<f64>] {
        &self.slots
    }

    pub fn slot(&self, i: usize) -> Option<&Array1<f64>> {
        self.slots.get(i)
    }

    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }
}

/// Summed source term per evolved field, plus each source's share.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceProfiles {
    fields: IndexMap<AffectedCoreProfile, Array1<f64>>,
    per_source: IndexMap<String, IndexMap<AffectedCoreProfile, Array1<f64>>>,
}

impl SourceProfiles {
    fn zeros(n_cells: usize) -> Self {
        SourceProfiles {
            fields: AffectedCoreProfile::ALL
                .into_iter()
                .map(|f| (f, Array1::zeros(n_cells)))
                .collect(),
            per_source: IndexMap::new(),
        }
    }

    /// Total source for `field`; zeros if no source contributes.
    pub fn get(&self, field: AffectedCoreProfile) -> &Array1<f64> {
        &self.fields[&field]
    }

    pub fn fields(&self) -> impl Iterator<Item = (AffectedCoreProfile, &Array1<f64>)> {
        self.fields.iter().map(|(f, v)| (*f, v))
    }

    /// Masked contributions of one enabled source, by declared field.
    pub fn per_source(&self, name: &str) -> Option<&IndexMap<AffectedCoreProfile, Array1<f64>>> {
        self.per_source.get(name)
    }

    /// Names of the sources that contributed, in catalog order.
    pub fn contributors(&self) -> impl Iterator<Item = &str> {
        self.per_source.keys().map(String::as_str)
    }
}

/// Compute every field's total source term at the bundle's time.
pub fn compute_contributions(
    runtime_params: &DynamicRuntimeParams,
    geo: &Geometry,
    catalog: &SourceCatalog,
) -> FusionResult<SourceProfiles> {
    let validated = catalog.validate_all()?;
    let n = geo.n_cells();
    let mut profiles = SourceProfiles::zeros(n);
    log::debug!(
        "computing source contributions at t={} for {} sources",
        runtime_params.t(),
        validated.len()
    );

    for source in &validated {
        if source.mode == SourceMode::Zero {
            log::trace!("source {} disabled", source.name);
            continue;
        }
        let params = &runtime_params.source(&source.name)?.params;
        let output = native_output(source, params, runtime_params.profile_conditions(), geo)?;
        check_output(source, &output, n)?;

        let mut masked = IndexMap::with_capacity(source.affected.len());
        for field in AffectedCoreProfile::ALL {
            if !source.affects(field) {
                continue;
            }
            let contribution = source.extract(&output, field, n);
            if let Some(total) = profiles.fields.get_mut(&field) {
                *total += &contribution;
            }
            masked.insert(field, contribution);
        }
        log::trace!(
            "source {} ({}, {}) -> {:?}",
            source.name,
            source.kind,
            source.mode,
            source.affected
        );
        profiles.per_source.insert(source.name.clone(), masked);
    }
    Ok(profiles)
}

/// Evaluate a source on the geometry's hi-res grid.
///
/// Only types with a hi-res form (the external current) are accepted.
pub fn compute_hires(
    name: &str,
    runtime_params: &DynamicRuntimeParams,
    geo: &Geometry,
    catalog: &SourceCatalog,
) -> FusionResult<Array1<f64>> {
    let source = resolve(name, catalog.get(name)?)?;
    if !source.kind.has_hires() {
        return Err(FusionError::ConfigError(format!(
            "source '{name}' ({}) has no hi-res form",
            source.kind
        )));
    }
    let n_hires = geo.rho_hires_norm.len();
    if source.mode == SourceMode::Zero {
        return Ok(Array1::zeros(n_hires));
    }
    let params = &runtime_params.source(name)?.params;
    match source.mode {
        SourceMode::Formula => external_current::jext_hires(params, geo),
        SourceMode::Prescribed => {
            let cells = params.profile(&prescribed_quantity(AffectedCoreProfile::Psi))?;
            let xp = geo.mesh.cell_centers.to_vec();
            let fp = cells.to_vec();
            Ok(interp1d_onto(&xp, &fp, &geo.rho_hires_norm))
        }
        _ => Err(unsupported(&source)),
    }
}

fn native_output(
    source: &ValidatedSourceConfig,
    params: &ParameterBundle,
    core: &ParameterBundle,
    geo: &Geometry,
) -> FusionResult<SourceOutput> {
    use SourceKind::*;
    match (source.kind, source.mode) {
        (kind, SourceMode::Zero) => Ok(SourceOutput::zeros(kind, geo.n_cells())),
        (kind, SourceMode::Prescribed) => {
            let slots = kind
                .outputs()
                .iter()
                .map(|f| params.profile(&prescribed_quantity(*f)).cloned())
                .collect::<FusionResult<Vec<_>>>()?;
            Ok(SourceOutput::new(slots))
        }
        (ExternalCurrent, SourceMode::Formula) => Ok(SourceOutput::new(vec![
            external_current::jext_formula(params, geo)?,
        ])),
        (GenericIonElHeat, SourceMode::Formula) => heat::generic_ion_el_heat(params, geo),
        (GasPuff, SourceMode::Formula) => particle::gas_puff(params, geo),
        (GenericParticle, SourceMode::Formula) => particle::generic_particle(params, geo),
        (FusionHeat, SourceMode::ModelBased) => heat::fusion_heat(core, geo),
        (Bremsstrahlung, SourceMode::ModelBased) => heat::bremsstrahlung(params, core, geo),
        _ => Err(unsupported(source)),
    }
}

fn unsupported(source: &ValidatedSourceConfig) -> FusionError {
    FusionError::UnsupportedMode {
        source_name: source.name.clone(),
        mode: source.mode.to_string(),
    }
}

fn check_output(
    source: &ValidatedSourceConfig,
    output: &SourceOutput,
    n_cells: usize,
) -> FusionResult<()> {
    if output.n_slots() != source.kind.n_outputs() {
        return Err(FusionError::PhysicsViolation(format!(
            "source '{}' produced {} outputs, expected {}",
            source.name,
            output.n_slots(),
            source.kind.n_outputs()
        )));
    }
    for (slot, values) in output.slots().iter().enumerate() {
        if values.len() != n_cells {
            return Err(FusionError::PhysicsViolation(format!(
                "source '{}' slot {slot} has {} cells, mesh has {n_cells}",
                source.name,
                values.len()
            )));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(FusionError::PhysicsViolation(format!(
                "source '{}' slot {slot} is non-finite ({bad})",
                source.name
            )));
        }
    }
    Ok(())
}
