// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Runtime configuration for a transport run.
//!
//! Profile-valued inputs arrive from JSON as scalars or string-keyed maps
//! ([`ProfileValue`]) and are turned into typed [`ProfileSpec`]s once the
//! kind of the quantity they configure is known.

use crate::error::{FusionError, FusionResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a quantity is evaluated: one number, or one number per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantityKind {
    Scalar,
    Radial,
}

/// Time interpolation between configured keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterpolationMode {
    #[default]
    PiecewiseLinear,
    /// Value of the greatest key ≤ t.
    Step,
}

/// One time slice of a space-time profile.
#[derive(Debug, Clone, PartialEq)]
pub enum TimeSlice {
    /// Same value at every radius.
    Uniform(f64),
    /// (ρ, value) pairs.
    Radial(Vec<(f64, f64)>),
}

/// Typed profile specification.
///
/// Keys are kept as ordered `(key, value)` pairs; [`ProfileSpec::validate`]
/// checks that they are finite, non-empty and unique.
#[derive(Debug, Clone, PartialEq)]
pub enum ProfileSpec {
    Scalar(f64),
    /// (ρ, value) pairs, constant in time.
    RadialProfile(Vec<(f64, f64)>),
    /// (t, value) pairs, constant in radius.
    TimeSeries(Vec<(f64, f64)>),
    /// (t, slice) pairs.
    SpaceTimeProfile(Vec<(f64, TimeSlice)>),
}

impl ProfileSpec {
    pub fn is_radius_dependent(&self) -> bool {
        match self {
            ProfileSpec::Scalar(_) | ProfileSpec::TimeSeries(_) => false,
            ProfileSpec::RadialProfile(_) => true,
            ProfileSpec::SpaceTimeProfile(slices) => slices
                .iter()
                .any(|(_, s)| matches!(s, TimeSlice::Radial(_))),
        }
    }

    /// Check key sets and compatibility with `kind`.
    pub fn validate(&self, name: &str, kind: QuantityKind) -> FusionResult<()> {
        if kind == QuantityKind::Scalar && self.is_radius_dependent() {
            return Err(FusionError::ConfigError(format!(
                "{name}: radius-dependent profile given for a scalar quantity"
            )));
        }
        match self {
            ProfileSpec::Scalar(v) => check_value(name, *v),
            ProfileSpec::RadialProfile(pairs) => check_pairs(name, "rho", pairs),
            ProfileSpec::TimeSeries(pairs) => check_pairs(name, "time", pairs),
            ProfileSpec::SpaceTimeProfile(slices) => {
                if slices.is_empty() {
                    return Err(FusionError::ConfigError(format!(
                        "{name}: empty time key set"
                    )));
                }
                check_unique_keys(name, "time", slices.iter().map(|(t, _)| *t))?;
                for (_, slice) in slices {
                    match slice {
                        TimeSlice::Uniform(v) => check_value(name, *v)?,
                        TimeSlice::Radial(pairs) => check_pairs(name, "rho", pairs)?,
                    }
                }
                Ok(())
            }
        }
    }
}

fn check_value(name: &str, v: f64) -> FusionResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(FusionError::ConfigError(format!(
            "{name}: non-finite value {v}"
        )))
    }
}

fn check_pairs(name: &str, axis: &str, pairs: &[(f64, f64)]) -> FusionResult<()> {
    if pairs.is_empty() {
        return Err(FusionError::ConfigError(format!(
            "{name}: empty {axis} key set"
        )));
    }
    check_unique_keys(name, axis, pairs.iter().map(|(k, _)| *k))?;
    for (_, v) in pairs {
        check_value(name, *v)?;
    }
    Ok(())
}

fn check_unique_keys(
    name: &str,
    axis: &str,
    keys: impl Iterator<Item = f64>,
) -> FusionResult<()> {
    let mut sorted: Vec<f64> = Vec::new();
    for k in keys {
        if !k.is_finite() {
            return Err(FusionError::ConfigError(format!(
                "{name}: non-finite {axis} key {k}"
            )));
        }
        sorted.push(k);
    }
    sorted.sort_by(f64::total_cmp);
    if let Some(w) = sorted.windows(2).find(|w| w[0] == w[1]) {
        return Err(FusionError::ConfigError(format!(
            "{name}: duplicate {axis} key {}",
            w[0]
        )));
    }
    Ok(())
}

fn parse_key(name: &str, key: &str) -> FusionResult<f64> {
    match key.trim().parse::<f64>() {
        Ok(k) if k.is_finite() => Ok(k),
        _ => Err(FusionError::ConfigError(format!(
            "{name}: non-numeric key '{key}'"
        ))),
    }
}

/// A time slice as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawSlice {
    Scalar(f64),
    Map(IndexMap<String, f64>),
}

/// Profile shape as written in configuration, before its kind is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawProfile {
    Scalar(f64),
    Map(IndexMap<String, RawSlice>),
}

/// Configured profile: a raw shape plus an optional interpolation mode.
///
/// JSON accepts either the bare shape (`3.0`, `{"0": 1.0, "1": 2.0}`,
/// `{"0": {"0": 1.0}}`) or `{"value": <shape>, "interpolation": "step"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfileValue {
    WithMode(ModalProfile),
    Plain(RawProfile),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModalProfile {
    pub value: RawProfile,
    #[serde(default)]
    pub interpolation: InterpolationMode,
}

impl From<f64> for ProfileValue {
    fn from(v: f64) -> Self {
        ProfileValue::Plain(RawProfile::Scalar(v))
    }
}

impl ProfileValue {
    /// Flat `{key: value}` map; read as ρ-keys for radial quantities and as
    /// time keys for scalar ones.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), RawSlice::Scalar(*v)))
            .collect();
        ProfileValue::Plain(RawProfile::Map(map))
    }

    /// `{t: {ρ: value}}` map.
    pub fn from_slices(slices: &[(f64, &[(f64, f64)])]) -> Self {
        let map = slices
            .iter()
            .map(|(t, pairs)| {
                let inner = pairs.iter().map(|(r, v)| (r.to_string(), *v)).collect();
                (t.to_string(), RawSlice::Map(inner))
            })
            .collect();
        ProfileValue::Plain(RawProfile::Map(map))
    }

    pub fn with_interpolation(self, interpolation: InterpolationMode) -> Self {
        let value = match self {
            ProfileValue::WithMode(m) => m.value,
            ProfileValue::Plain(raw) => raw,
        };
        ProfileValue::WithMode(ModalProfile {
            value,
            interpolation,
        })
    }

    pub fn interpolation(&self) -> InterpolationMode {
        match self {
            ProfileValue::WithMode(m) => m.interpolation,
            ProfileValue::Plain(_) => InterpolationMode::default(),
        }
    }

    fn raw(&self) -> &RawProfile {
        match self {
            ProfileValue::WithMode(m) => &m.value,
            ProfileValue::Plain(raw) => raw,
        }
    }

    /// Convert into a typed, validated [`ProfileSpec`] for a quantity of `kind`.
    pub fn to_spec(&self, name: &str, kind: QuantityKind) -> FusionResult<ProfileSpec> {
        let spec = match self.raw() {
            RawProfile::Scalar(v) => ProfileSpec::Scalar(*v),
            RawProfile::Map(map) => {
                let nested = map.values().any(|s| matches!(s, RawSlice::Map(_)));
                if nested {
                    let mut slices = Vec::with_capacity(map.len());
                    for (t, slice) in map {
                        let t = parse_key(name, t)?;
                        let slice = match slice {
                            RawSlice::Scalar(v) => TimeSlice::Uniform(*v),
                            RawSlice::Map(inner) => {
                                let mut pairs = Vec::with_capacity(inner.len());
                                for (r, v) in inner {
                                    pairs.push((parse_key(name, r)?, *v));
                                }
                                TimeSlice::Radial(pairs)
                            }
                        };
                        slices.push((t, slice));
                    }
                    ProfileSpec::SpaceTimeProfile(slices)
                } else {
                    let mut pairs = Vec::with_capacity(map.len());
                    for (k, slice) in map {
                        if let RawSlice::Scalar(v) = slice {
                            pairs.push((parse_key(name, k)?, *v));
                        }
                    }
                    match kind {
                        QuantityKind::Scalar => ProfileSpec::TimeSeries(pairs),
                        QuantityKind::Radial => ProfileSpec::RadialProfile(pairs),
                    }
                }
            }
        };
        spec.validate(name, kind)?;
        Ok(spec)
    }
}

/// Evolved fields a source may contribute to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffectedCoreProfile {
    Psi,
    TempIon,
    TempEl,
    Ne,
}

impl AffectedCoreProfile {
    pub const ALL: [AffectedCoreProfile; 4] = [
        AffectedCoreProfile::Psi,
        AffectedCoreProfile::TempIon,
        AffectedCoreProfile::TempEl,
        AffectedCoreProfile::Ne,
    ];
}

impl fmt::Display for AffectedCoreProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AffectedCoreProfile::Psi => "psi",
            AffectedCoreProfile::TempIon => "temp_ion",
            AffectedCoreProfile::TempEl => "temp_el",
            AffectedCoreProfile::Ne => "ne",
        };
        f.write_str(name)
    }
}

/// Computation mode of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceMode {
    /// Disabled; contributes zeros.
    #[default]
    Zero,
    /// Analytic prescribed formula.
    Formula,
    /// Computed from the plasma state.
    ModelBased,
    /// Explicit user-supplied profile.
    Prescribed,
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceMode::Zero => "ZERO",
            SourceMode::Formula => "FORMULA_BASED",
            SourceMode::ModelBased => "MODEL_BASED",
            SourceMode::Prescribed => "PRESCRIBED",
        };
        f.write_str(name)
    }
}

/// Configuration of one named source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source type tag, e.g. `"external_current"`.
    #[serde(rename = "type")]
    pub source_type: String,
    #[serde(default)]
    pub mode: SourceMode,
    /// Fields the source contributes to; the type's full output set when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected: Option<Vec<AffectedCoreProfile>>,
    /// Formula coefficients; scalar quantities, possibly time dependent.
    #[serde(default)]
    pub params: IndexMap<String, ProfileValue>,
    /// Explicit profiles for prescribed mode, one per output slot.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prescribed: Vec<ProfileValue>,
}

impl SourceConfig {
    pub fn new(source_type: &str, mode: SourceMode) -> Self {
        SourceConfig {
            source_type: source_type.to_string(),
            mode,
            affected: None,
            params: IndexMap::new(),
            prescribed: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: &str, value: impl Into<ProfileValue>) -> Self {
        self.params.insert(name.to_string(), value.into());
        self
    }

    pub fn with_affected(mut self, affected: &[AffectedCoreProfile]) -> Self {
        self.affected = Some(affected.to_vec());
        self
    }

    pub fn with_prescribed(mut self, prescribed: Vec<ProfileValue>) -> Self {
        self.prescribed = prescribed;
        self
    }
}

/// Plasma profile and boundary conditions.
///
/// Units: `Ip` [MA], temperatures [keV], densities in units of the
/// geometry reference density (or Greenwald fraction when `ne_is_fGW`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileConditions {
    #[serde(rename = "Ip", default = "default_ip")]
    pub ip: ProfileValue,
    #[serde(rename = "Te", default = "default_temperature")]
    pub te: ProfileValue,
    #[serde(rename = "Ti", default = "default_temperature")]
    pub ti: ProfileValue,
    #[serde(rename = "ne", default = "default_ne")]
    pub ne: ProfileValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub psi: Option<ProfileValue>,
    #[serde(rename = "Te_bound_right", default, skip_serializing_if = "Option::is_none")]
    pub te_bound_right: Option<ProfileValue>,
    #[serde(rename = "Ti_bound_right", default, skip_serializing_if = "Option::is_none")]
    pub ti_bound_right: Option<ProfileValue>,
    #[serde(rename = "ne_bound_right", default, skip_serializing_if = "Option::is_none")]
    pub ne_bound_right: Option<ProfileValue>,
    #[serde(rename = "ne_is_fGW", default = "default_true")]
    pub ne_is_fgw: bool,
    #[serde(default = "default_nbar")]
    pub nbar: ProfileValue,
    #[serde(default = "default_true")]
    pub normalize_to_nbar: bool,
}

fn default_ip() -> ProfileValue {
    ProfileValue::from(15.0)
}
fn default_temperature() -> ProfileValue {
    ProfileValue::from_pairs(&[(0.0, 15.0), (1.0, 1.0)])
}
fn default_ne() -> ProfileValue {
    ProfileValue::from_pairs(&[(0.0, 1.5), (1.0, 1.0)])
}
fn default_nbar() -> ProfileValue {
    ProfileValue::from(0.85)
}
fn default_true() -> bool {
    true
}

impl Default for ProfileConditions {
    fn default() -> Self {
        ProfileConditions {
            ip: default_ip(),
            te: default_temperature(),
            ti: default_temperature(),
            ne: default_ne(),
            psi: None,
            te_bound_right: None,
            ti_bound_right: None,
            ne_bound_right: None,
            ne_is_fgw: true,
            nbar: default_nbar(),
            normalize_to_nbar: true,
        }
    }
}

/// Top-level runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default)]
    pub profile_conditions: ProfileConditions,
    /// Sources keyed by name, in configuration order.
    #[serde(default)]
    pub sources: IndexMap<String, SourceConfig>,
}

impl RuntimeConfig {
    /// Load from a JSON file.
    pub fn from_file(path: &str) -> FusionResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> FusionResult<Self> {
        let config: Self = serde_json::from_str(contents)?;
        Ok(config)
    }
}
