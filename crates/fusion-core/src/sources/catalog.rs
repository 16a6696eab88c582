// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Source Catalog
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Named source specifications and mode validation.

use super::profiles::SourceOutput;
use super::{prescribed_quantity, SourceKind};
use crate::provider::{ParameterSet, QuantityDecl};
use fusion_types::config::{
    AffectedCoreProfile, ProfileSpec, QuantityKind, SourceConfig, SourceMode,
};
use fusion_types::error::{FusionError, FusionResult};
use indexmap::IndexMap;
use ndarray::Array1;

/// One configured source: type, mode, declared fields and parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceSpec {
    pub kind: SourceKind,
    pub mode: SourceMode,
    pub affected: Vec<AffectedCoreProfile>,
    /// Formula coefficients plus, in prescribed mode, one radial
    /// `prescribed_<field>` quantity per output slot.
    pub params: ParameterSet,
}

impl SourceSpec {
    /// Source with default coefficients affecting all native outputs.
    pub fn new(kind: SourceKind, mode: SourceMode) -> Self {
        let params = kind
            .default_params()
            .iter()
            .fold(ParameterSet::new(), |set, (name, value)| {
                set.scalar(name, ProfileSpec::Scalar(*value))
            });
        SourceSpec {
            kind,
            mode,
            affected: kind.outputs().to_vec(),
            params,
        }
    }

    pub fn from_config(name: &str, config: &SourceConfig) -> FusionResult<Self> {
        let kind = SourceKind::from_tag(&config.source_type)?;
        let mut spec = SourceSpec::new(kind, config.mode);

        for (param, value) in &config.params {
            let qualified = format!("{name}.{param}");
            let profile = value.to_spec(&qualified, QuantityKind::Scalar)?;
            spec.params.set_spec(param, profile, value.interpolation())?;
        }

        if let Some(affected) = &config.affected {
            spec.affected = checked_affected(name, kind, affected)?;
        }

        let wants_prescribed = config.mode == SourceMode::Prescribed || !config.prescribed.is_empty();
        if wants_prescribed {
            if config.prescribed.len() != kind.n_outputs() {
                return Err(FusionError::ConfigError(format!(
                    "source '{name}' ({kind}) needs {} prescribed profiles, got {}",
                    kind.n_outputs(),
                    config.prescribed.len()
                )));
            }
            for (field, value) in kind.outputs().iter().zip(&config.prescribed) {
                let quantity = prescribed_quantity(*field);
                let profile = value.to_spec(&format!("{name}.{quantity}"), QuantityKind::Radial)?;
                spec.params = spec.params.quantity(
                    QuantityDecl::new(&quantity, QuantityKind::Radial, profile)
                        .with_interpolation(value.interpolation()),
                );
            }
        }
        Ok(spec)
    }

    /// Names this source reads from its own parameter set in its mode.
    pub fn required_params(&self) -> Vec<String> {
        match self.mode {
            SourceMode::Zero => Vec::new(),
            SourceMode::Prescribed => self
                .kind
                .outputs()
                .iter()
                .map(|field| prescribed_quantity(*field))
                .collect(),
            SourceMode::Formula | SourceMode::ModelBased => self
                .kind
                .default_params()
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
        }
    }
}

fn checked_affected(
    name: &str,
    kind: SourceKind,
    affected: &[AffectedCoreProfile],
) -> FusionResult<Vec<AffectedCoreProfile>> {
    let mut out: Vec<AffectedCoreProfile> = Vec::with_capacity(affected.len());
    for field in affected {
        if kind.slot_for(*field).is_none() {
            return Err(FusionError::ConfigError(format!(
                "source '{name}' ({kind}) cannot affect {field}"
            )));
        }
        if out.contains(field) {
            return Err(FusionError::ConfigError(format!(
                "source '{name}' lists {field} twice"
            )));
        }
        out.push(*field);
    }
    Ok(out)
}

/// A source whose mode has been checked against its type.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSourceConfig {
    pub name: String,
    pub kind: SourceKind,
    pub mode: SourceMode,
    pub affected: Vec<AffectedCoreProfile>,
}

impl ValidatedSourceConfig {
    pub fn affects(&self, field: AffectedCoreProfile) -> bool {
        self.affected.contains(&field)
    }

    /// The output slot feeding `target`, or zeros if `target` is not declared.
    pub fn extract(
        &self,
        output: &SourceOutput,
        target: AffectedCoreProfile,
        n_cells: usize,
    ) -> Array1<f64> {
        if !self.affects(target) {
            return Array1::zeros(n_cells);
        }
        match self.kind.slot_for(target).and_then(|i| output.slot(i)) {
            Some(values) => values.clone(),
            None => Array1::zeros(n_cells),
        }
    }
}

/// Check `spec.mode` against the type's supported modes.
pub fn resolve(name: &str, spec: &SourceSpec) -> FusionResult<ValidatedSourceConfig> {
    if !spec.kind.supports(spec.mode) {
        return Err(FusionError::UnsupportedMode {
            source_name: name.to_string(),
            mode: spec.mode.to_string(),
        });
    }
    Ok(ValidatedSourceConfig {
        name: name.to_string(),
        kind: spec.kind,
        mode: spec.mode,
        affected: spec.affected.clone(),
    })
}

/// Sources keyed by name, in configuration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceCatalog {
    sources: IndexMap<String, SourceSpec>,
}

impl SourceCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &IndexMap<String, SourceConfig>) -> FusionResult<Self> {
        let mut catalog = SourceCatalog::new();
        for (name, source) in config {
            catalog.insert(name, SourceSpec::from_config(name, source)?)?;
        }
        Ok(catalog)
    }

    pub fn insert(&mut self, name: &str, spec: SourceSpec) -> FusionResult<()> {
        if self.sources.contains_key(name) {
            return Err(FusionError::ConfigError(format!(
                "source '{name}' declared twice"
            )));
        }
        self.sources.insert(name.to_string(), spec);
        Ok(())
    }

    pub fn get(&self, name: &str) -> FusionResult<&SourceSpec> {
        self.sources.get(name).ok_or_else(|| FusionError::UnknownParameter {
            name: name.to_string(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceSpec)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolve every source; the first unsupported mode aborts.
    pub fn validate_all(&self) -> FusionResult<Vec<ValidatedSourceConfig>> {
        self.iter().map(|(name, spec)| resolve(name, spec)).collect()
    }
}
