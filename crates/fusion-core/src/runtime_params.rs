// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Runtime Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-time runtime parameters for a whole transport run.
//!
//! [`RuntimeParamsProvider`] owns one [`DynamicParamsProvider`] for the
//! plasma profile conditions and one per configured source, plus the
//! [`SourceCatalog`]. Each call to
//! [`RuntimeParamsProvider::build_dynamic_runtime_params`] mode-checks
//! every source and returns fresh bundles for time `t`.

use crate::provider::{DynamicParamsProvider, ParameterBundle, ParameterSet, QuantityDecl};
use crate::sources::{SourceCatalog, ValidatedSourceConfig};
use fusion_types::config::{
    InterpolationMode, ProfileConditions, ProfileSpec, ProfileValue, QuantityKind, RuntimeConfig,
    SourceMode,
};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::{Geometry, Mesh};
use indexmap::IndexMap;
use ndarray::Array1;
use std::f64::consts::PI;
use std::sync::Arc;

/// Plasma current [MA].
pub const IP: &str = "Ip";
/// Electron temperature [keV].
pub const TE: &str = "Te";
/// Ion temperature [keV].
pub const TI: &str = "Ti";
/// Electron density.
pub const NE: &str = "ne";
/// Initial poloidal flux.
pub const PSI: &str = "psi";
/// Line-averaged density target.
pub const NBAR: &str = "nbar";
pub const NE_IS_FGW: &str = "ne_is_fGW";
pub const NORMALIZE_TO_NBAR: &str = "normalize_to_nbar";

fn decl(name: &str, kind: QuantityKind, value: &ProfileValue) -> FusionResult<QuantityDecl> {
    let spec = value.to_spec(name, kind)?;
    Ok(QuantityDecl::new(name, kind, spec).with_interpolation(value.interpolation()))
}

fn bound_override(
    quantity: &str,
    value: Option<&ProfileValue>,
) -> FusionResult<Option<(ProfileSpec, InterpolationMode)>> {
    value
        .map(|v| {
            let spec = v.to_spec(&format!("{quantity}_bound_right"), QuantityKind::Scalar)?;
            Ok((spec, v.interpolation()))
        })
        .transpose()
}

/// Quantity declarations for the plasma profile conditions.
///
/// `Te`, `Ti` and `ne` carry right boundaries; `ne` is reference
/// normalized when `ne_is_fGW` is set.
pub fn profile_condition_params(pc: &ProfileConditions) -> FusionResult<ParameterSet> {
    let mut set = ParameterSet::new()
        .quantity(decl(IP, QuantityKind::Scalar, &pc.ip)?)
        .quantity(decl(TE, QuantityKind::Radial, &pc.te)?)
        .quantity(decl(TI, QuantityKind::Radial, &pc.ti)?)
        .quantity(decl(NE, QuantityKind::Radial, &pc.ne)?.reference_normalized(pc.ne_is_fgw))
        .quantity(decl(NBAR, QuantityKind::Scalar, &pc.nbar)?);
    if let Some(psi) = &pc.psi {
        set = set.quantity(decl(PSI, QuantityKind::Radial, psi)?);
    }
    Ok(set
        .boundary(TE, bound_override(TE, pc.te_bound_right.as_ref())?)
        .boundary(TI, bound_override(TI, pc.ti_bound_right.as_ref())?)
        .boundary(NE, bound_override(NE, pc.ne_bound_right.as_ref())?)
        .flag(NE_IS_FGW, pc.ne_is_fgw)
        .flag(NORMALIZE_TO_NBAR, pc.normalize_to_nbar))
}

/// Greenwald density limit [m⁻³] for plasma current `ip_ma` [MA].
pub fn greenwald_density(ip_ma: f64, a_minor: f64) -> f64 {
    ip_ma / (PI * a_minor * a_minor) * 1e20
}

/// Electron density in m⁻³ from a profile-condition bundle.
///
/// `ne` is a Greenwald fraction when `ne_is_fGW` is set, otherwise in
/// units of the geometry reference density.
pub fn absolute_density(core: &ParameterBundle, geo: &Geometry) -> FusionResult<Array1<f64>> {
    let ne = core.profile(NE)?;
    let scale = if core.flag(NE_IS_FGW)? {
        greenwald_density(core.scalar(IP)?, geo.a_minor)
    } else {
        geo.n_ref
    };
    Ok(ne.mapv(|v| v * scale))
}

/// Parameters of one source at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicSourceParams {
    pub config: ValidatedSourceConfig,
    pub params: ParameterBundle,
}

/// Every runtime parameter at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRuntimeParams {
    t: f64,
    profile_conditions: ParameterBundle,
    sources: IndexMap<String, DynamicSourceParams>,
}

impl DynamicRuntimeParams {
    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn profile_conditions(&self) -> &ParameterBundle {
        &self.profile_conditions
    }

    pub fn source(&self, name: &str) -> FusionResult<&DynamicSourceParams> {
        self.sources
            .get(name)
            .ok_or_else(|| FusionError::UnknownParameter {
                name: name.to_string(),
            })
    }

    pub fn sources(&self) -> impl Iterator<Item = (&str, &DynamicSourceParams)> {
        self.sources.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[derive(Debug)]
pub struct RuntimeParamsProvider {
    profile_conditions: DynamicParamsProvider,
    sources: IndexMap<String, DynamicParamsProvider>,
    catalog: SourceCatalog,
}

impl RuntimeParamsProvider {
    /// Validate every declaration. Each source must declare every
    /// parameter its mode reads, and model-based sources must find their
    /// inputs among the profile conditions.
    pub fn new(
        profile_conditions: &ProfileConditions,
        catalog: SourceCatalog,
        mesh: Arc<Mesh>,
    ) -> FusionResult<Self> {
        let profile_provider = DynamicParamsProvider::new(
            profile_condition_params(profile_conditions)?,
            Arc::clone(&mesh),
        )?;

        let mut sources = IndexMap::with_capacity(catalog.len());
        for (name, spec) in catalog.iter() {
            if spec.mode == SourceMode::ModelBased {
                profile_provider.require(spec.kind.required_quantities())?;
            }
            let provider = DynamicParamsProvider::new(spec.params.clone(), Arc::clone(&mesh))?;
            let own = spec.required_params();
            provider.require(&own.iter().map(String::as_str).collect::<Vec<_>>())?;
            sources.insert(name.to_string(), provider);
        }
        log::debug!(
            "runtime params provider with {} profile quantities and {} sources",
            profile_provider.quantity_names().count(),
            sources.len()
        );

        Ok(RuntimeParamsProvider {
            profile_conditions: profile_provider,
            sources,
            catalog,
        })
    }

    pub fn from_config(config: &RuntimeConfig, mesh: Arc<Mesh>) -> FusionResult<Self> {
        let catalog = SourceCatalog::from_config(&config.sources)?;
        Self::new(&config.profile_conditions, catalog, mesh)
    }

    pub fn catalog(&self) -> &SourceCatalog {
        &self.catalog
    }

    pub fn profile_provider(&self) -> &DynamicParamsProvider {
        &self.profile_conditions
    }

    pub fn source_provider(&self, name: &str) -> FusionResult<&DynamicParamsProvider> {
        self.sources
            .get(name)
            .ok_or_else(|| FusionError::UnknownParameter {
                name: name.to_string(),
            })
    }

    /// Mode-check every source, then evaluate everything at `t`.
    pub fn build_dynamic_runtime_params(&self, t: f64) -> FusionResult<DynamicRuntimeParams> {
        let validated = self.catalog.validate_all()?;
        let profile_conditions = self.profile_conditions.build_dynamic_params(t)?;

        let mut sources = IndexMap::with_capacity(validated.len());
        for config in validated {
            let params = self.source_provider(&config.name)?.build_dynamic_params(t)?;
            sources.insert(config.name.clone(), DynamicSourceParams { config, params });
        }

        Ok(DynamicRuntimeParams {
            t,
            profile_conditions,
            sources,
        })
    }
}
