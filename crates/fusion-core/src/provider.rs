// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Dynamic Parameter Provider
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Lazily built, cached interpolants and per-time parameter bundles.
//!
//! The provider owns one slot per configured quantity. A slot's
//! [`Interpolant`] is constructed on first access and kept for the
//! provider's lifetime, so every later call (at any time, in any order)
//! reads the same instance. Slots are [`OnceLock`]s: concurrent first
//! access still builds each interpolant at most once, and reads after
//! that do not lock.

use crate::boundary::{resolve_boundary, BoundaryValue};
use crate::interpolant::{InterpolatedValue, Interpolant};
use fusion_types::config::{InterpolationMode, ProfileSpec, QuantityKind};
use fusion_types::error::{FusionError, FusionResult};
use fusion_types::state::Mesh;
use indexmap::IndexMap;
use ndarray::Array1;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

/// Declaration of one configurable quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantityDecl {
    pub name: String,
    pub kind: QuantityKind,
    pub spec: ProfileSpec,
    pub interpolation: InterpolationMode,
    /// Profile expressed as a fraction of a reference value.
    pub reference_normalized: bool,
}

impl QuantityDecl {
    pub fn new(name: &str, kind: QuantityKind, spec: ProfileSpec) -> Self {
        QuantityDecl {
            name: name.to_string(),
            kind,
            spec,
            interpolation: InterpolationMode::default(),
            reference_normalized: false,
        }
    }

    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    pub fn reference_normalized(mut self, normalized: bool) -> Self {
        self.reference_normalized = normalized;
        self
    }
}

/// Right-boundary declaration for a configured quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryDecl {
    pub quantity: String,
    /// Explicit edge value; scalar or time series.
    pub explicit_override: Option<(ProfileSpec, InterpolationMode)>,
}

/// Everything a [`DynamicParamsProvider`] is configured with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSet {
    quantities: Vec<QuantityDecl>,
    boundaries: Vec<BoundaryDecl>,
    flags: IndexMap<String, bool>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(mut self, decl: QuantityDecl) -> Self {
        self.quantities.push(decl);
        self
    }

    pub fn scalar(self, name: &str, spec: ProfileSpec) -> Self {
        self.quantity(QuantityDecl::new(name, QuantityKind::Scalar, spec))
    }

    pub fn radial(self, name: &str, spec: ProfileSpec) -> Self {
        self.quantity(QuantityDecl::new(name, QuantityKind::Radial, spec))
    }

    /// Declare a right boundary for `quantity`, with an optional override.
    pub fn boundary(
        mut self,
        quantity: &str,
        explicit_override: Option<(ProfileSpec, InterpolationMode)>,
    ) -> Self {
        self.boundaries.push(BoundaryDecl {
            quantity: quantity.to_string(),
            explicit_override,
        });
        self
    }

    /// Static boolean copied verbatim into every bundle.
    pub fn flag(mut self, name: &str, value: bool) -> Self {
        self.flags.insert(name.to_string(), value);
        self
    }

    pub fn quantities(&self) -> &[QuantityDecl] {
        &self.quantities
    }

    pub fn contains(&self, name: &str) -> bool {
        self.quantities.iter().any(|q| q.name == name)
    }

    /// Replace the spec of an already declared quantity.
    pub(crate) fn set_spec(
        &mut self,
        name: &str,
        spec: ProfileSpec,
        interpolation: InterpolationMode,
    ) -> FusionResult<()> {
        let decl = self
            .quantities
            .iter_mut()
            .find(|q| q.name == name)
            .ok_or_else(|| FusionError::UnknownParameter {
                name: name.to_string(),
            })?;
        decl.spec = spec;
        decl.interpolation = interpolation;
        Ok(())
    }
}

#[derive(Debug)]
struct Slot {
    decl: QuantityDecl,
    cell: OnceLock<Interpolant>,
}

impl Slot {
    fn new(decl: QuantityDecl) -> Self {
        Slot {
            decl,
            cell: OnceLock::new(),
        }
    }
}

#[derive(Debug)]
struct BoundarySlot {
    quantity: String,
    explicit_override: Option<Slot>,
}

/// Immutable snapshot of every configured quantity at one time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterBundle {
    t: f64,
    values: IndexMap<String, InterpolatedValue>,
    boundaries: IndexMap<String, BoundaryValue>,
    flags: IndexMap<String, bool>,
}

impl ParameterBundle {
    pub fn t(&self) -> f64 {
        self.t
    }

    /// Quantity names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, name: &str) -> FusionResult<&InterpolatedValue> {
        self.values.get(name).ok_or_else(|| unknown(name))
    }

    pub fn scalar(&self, name: &str) -> FusionResult<f64> {
        self.get(name)?.as_scalar().ok_or_else(|| {
            FusionError::ConfigError(format!("{name} is a radial quantity, not a scalar"))
        })
    }

    pub fn profile(&self, name: &str) -> FusionResult<&Array1<f64>> {
        self.get(name)?.as_profile().ok_or_else(|| {
            FusionError::ConfigError(format!("{name} is a scalar quantity, not a profile"))
        })
    }

    pub fn boundary(&self, name: &str) -> FusionResult<&BoundaryValue> {
        self.boundaries.get(name).ok_or_else(|| unknown(name))
    }

    pub fn boundaries(&self) -> impl Iterator<Item = (&str, &BoundaryValue)> {
        self.boundaries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn flag(&self, name: &str) -> FusionResult<bool> {
        self.flags.get(name).copied().ok_or_else(|| unknown(name))
    }
}

fn unknown(name: &str) -> FusionError {
    FusionError::UnknownParameter {
        name: name.to_string(),
    }
}

/// Owns the interpolant arena for one [`ParameterSet`].
#[derive(Debug)]
pub struct DynamicParamsProvider {
    mesh: Arc<Mesh>,
    slots: IndexMap<String, Slot>,
    boundaries: Vec<BoundarySlot>,
    flags: IndexMap<String, bool>,
    builds: AtomicUsize,
}

impl DynamicParamsProvider {
    /// Validate every declaration; nothing is interpolated yet.
    pub fn new(set: ParameterSet, mesh: Arc<Mesh>) -> FusionResult<Self> {
        let mut slots = IndexMap::with_capacity(set.quantities.len());
        for decl in set.quantities {
            decl.spec.validate(&decl.name, decl.kind)?;
            if slots.contains_key(&decl.name) {
                return Err(FusionError::ConfigError(format!(
                    "quantity {} declared twice",
                    decl.name
                )));
            }
            slots.insert(decl.name.clone(), Slot::new(decl));
        }

        let mut boundaries: Vec<BoundarySlot> = Vec::with_capacity(set.boundaries.len());
        for bc in set.boundaries {
            if !slots.contains_key(&bc.quantity) {
                return Err(unknown(&bc.quantity));
            }
            if boundaries.iter().any(|b| b.quantity == bc.quantity) {
                return Err(FusionError::ConfigError(format!(
                    "boundary for {} declared twice",
                    bc.quantity
                )));
            }
            let explicit_override = match bc.explicit_override {
                Some((spec, interpolation)) => {
                    let name = format!("{}_bound_right", bc.quantity);
                    spec.validate(&name, QuantityKind::Scalar)?;
                    Some(Slot::new(
                        QuantityDecl::new(&name, QuantityKind::Scalar, spec)
                            .with_interpolation(interpolation),
                    ))
                }
                None => None,
            };
            boundaries.push(BoundarySlot {
                quantity: bc.quantity,
                explicit_override,
            });
        }

        Ok(DynamicParamsProvider {
            mesh,
            slots,
            boundaries,
            flags: set.flags,
            builds: AtomicUsize::new(0),
        })
    }

    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    pub fn quantity_names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }

    /// Fail with `UnknownParameter` unless every name is configured.
    pub fn require(&self, names: &[&str]) -> FusionResult<()> {
        match names.iter().find(|n| !self.slots.contains_key(**n)) {
            Some(missing) => Err(unknown(missing)),
            None => Ok(()),
        }
    }

    /// Cached interpolant for `name`, built on first access.
    pub fn interpolant(&self, name: &str) -> FusionResult<&Interpolant> {
        let slot = self.slots.get(name).ok_or_else(|| unknown(name))?;
        Ok(self.built(slot))
    }

    /// Whether `name`'s interpolant has been constructed yet.
    pub fn is_built(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .map(|s| s.cell.get().is_some())
            .unwrap_or(false)
    }

    /// Number of interpolants constructed so far, overrides included.
    pub fn build_count(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// Evaluate every quantity and boundary at time `t`.
    ///
    /// `t` must be finite. Out-of-range times clamp to the end keys.
    pub fn build_dynamic_params(&self, t: f64) -> FusionResult<ParameterBundle> {
        if !t.is_finite() {
            return Err(FusionError::ConfigError(format!(
                "evaluation time must be finite, got {t}"
            )));
        }
        let values = self
            .slots
            .iter()
            .map(|(name, slot)| (name.clone(), self.built(slot).evaluate(t)))
            .collect();

        let boundaries = self
            .boundaries
            .iter()
            .map(|bc| {
                let slot = &self.slots[&bc.quantity];
                let profile = self.built(slot);
                let explicit = bc.explicit_override.as_ref().map(|s| self.built(s));
                let value =
                    resolve_boundary(profile, explicit, slot.decl.reference_normalized, t);
                (bc.quantity.clone(), value)
            })
            .collect();

        Ok(ParameterBundle {
            t,
            values,
            boundaries,
            flags: self.flags.clone(),
        })
    }

    fn built<'a>(&'a self, slot: &'a Slot) -> &'a Interpolant {
        slot.cell.get_or_init(|| {
            self.builds.fetch_add(1, Ordering::Relaxed);
            log::debug!(
                "building interpolant for {} ({:?}, {:?})",
                slot.decl.name,
                slot.decl.kind,
                slot.decl.interpolation
            );
            Interpolant::from_validated(
                &slot.decl.spec,
                slot.decl.kind,
                slot.decl.interpolation,
                &self.mesh,
            )
        })
    }
}
