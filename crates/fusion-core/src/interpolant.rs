// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Interpolant
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Time-sampleable view of one [`ProfileSpec`].
//!
//! Every time slice is resampled onto the mesh cell centers (and the outer
//! face) once, at construction. `evaluate(t)` then only interpolates in time,
//! cell by cell. Both steps are linear, so for slices that share ρ-keys the
//! result equals interpolating each ρ-key in time first and in radius second.
//!
//! Outside the configured time range the first or last slice is held
//! (edge clamping); the same holds in radius at the mesh edges.

use fusion_math::interp::{bracket, interp1d, interp1d_onto, lerp, sorted_knots, step_index, Bracket};
use fusion_types::config::{InterpolationMode, ProfileSpec, QuantityKind, TimeSlice};
use fusion_types::error::FusionResult;
use fusion_types::state::Mesh;
use ndarray::{Array1, Zip};

/// Result of evaluating an [`Interpolant`].
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolatedValue {
    Scalar(f64),
    /// One value per mesh cell.
    Profile(Array1<f64>),
}

impl InterpolatedValue {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            InterpolatedValue::Scalar(v) => Some(*v),
            InterpolatedValue::Profile(_) => None,
        }
    }

    pub fn as_profile(&self) -> Option<&Array1<f64>> {
        match self {
            InterpolatedValue::Scalar(_) => None,
            InterpolatedValue::Profile(p) => Some(p),
        }
    }
}

#[derive(Debug, Clone)]
enum Samples {
    Scalar(Vec<f64>),
    /// Cell-center values per time key.
    Cells(Vec<Array1<f64>>),
}

#[derive(Debug, Clone)]
pub struct Interpolant {
    kind: QuantityKind,
    interpolation: InterpolationMode,
    times: Vec<f64>,
    samples: Samples,
    /// Value at the outer face per time key.
    right_edge: Vec<f64>,
}

impl Interpolant {
    /// Validate `spec` and build the interpolant.
    pub fn new(
        name: &str,
        spec: &ProfileSpec,
        kind: QuantityKind,
        interpolation: InterpolationMode,
        mesh: &Mesh,
    ) -> FusionResult<Self> {
        spec.validate(name, kind)?;
        Ok(Self::from_validated(spec, kind, interpolation, mesh))
    }

    /// Build from a spec that already passed [`ProfileSpec::validate`].
    pub(crate) fn from_validated(
        spec: &ProfileSpec,
        kind: QuantityKind,
        interpolation: InterpolationMode,
        mesh: &Mesh,
    ) -> Self {
        // (time, cell values, right edge value) per key.
        let mut keyed: Vec<(f64, Array1<f64>, f64)> = match spec {
            ProfileSpec::Scalar(v) => vec![(0.0, Array1::from_elem(mesh.n_rho, *v), *v)],
            ProfileSpec::TimeSeries(pairs) => pairs
                .iter()
                .map(|&(t, v)| (t, Array1::from_elem(mesh.n_rho, v), v))
                .collect(),
            ProfileSpec::RadialProfile(pairs) => {
                let (cells, edge) = resample(pairs, mesh);
                vec![(0.0, cells, edge)]
            }
            ProfileSpec::SpaceTimeProfile(slices) => slices
                .iter()
                .map(|(t, slice)| match slice {
                    TimeSlice::Uniform(v) => (*t, Array1::from_elem(mesh.n_rho, *v), *v),
                    TimeSlice::Radial(pairs) => {
                        let (cells, edge) = resample(pairs, mesh);
                        (*t, cells, edge)
                    }
                })
                .collect(),
        };
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));

        let times: Vec<f64> = keyed.iter().map(|k| k.0).collect();
        let right_edge: Vec<f64> = keyed.iter().map(|k| k.2).collect();
        let samples = match kind {
            QuantityKind::Scalar => Samples::Scalar(right_edge.clone()),
            QuantityKind::Radial => Samples::Cells(keyed.into_iter().map(|k| k.1).collect()),
        };

        Interpolant {
            kind,
            interpolation,
            times,
            samples,
            right_edge,
        }
    }

    pub fn kind(&self) -> QuantityKind {
        self.kind
    }

    pub fn interpolation(&self) -> InterpolationMode {
        self.interpolation
    }

    /// Configured time keys, ascending.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Evaluate at time `t`. Any `t` is accepted, in any order.
    pub fn evaluate(&self, t: f64) -> InterpolatedValue {
        match &self.samples {
            Samples::Scalar(values) => InterpolatedValue::Scalar(self.sample_scalar(values, t)),
            Samples::Cells(profiles) => {
                let profile = match self.locate(t) {
                    Bracket::At(i) => profiles[i].clone(),
                    Bracket::Between(i) => {
                        let (t0, t1) = (self.times[i], self.times[i + 1]);
                        let mut out = Array1::zeros(profiles[i].len());
                        Zip::from(&mut out)
                            .and(&profiles[i])
                            .and(&profiles[i + 1])
                            .for_each(|o, &v0, &v1| *o = lerp(t0, v0, t1, v1, t));
                        out
                    }
                };
                InterpolatedValue::Profile(profile)
            }
        }
    }

    /// Value at the outer mesh face (ρ = 1) at time `t`.
    ///
    /// For scalar quantities this is the scalar value itself.
    pub fn right_edge(&self, t: f64) -> f64 {
        self.sample_scalar(&self.right_edge, t)
    }

    fn sample_scalar(&self, values: &[f64], t: f64) -> f64 {
        match self.interpolation {
            InterpolationMode::PiecewiseLinear => interp1d(&self.times, values, t),
            InterpolationMode::Step => values[step_index(&self.times, t)],
        }
    }

    fn locate(&self, t: f64) -> Bracket {
        match self.interpolation {
            InterpolationMode::PiecewiseLinear => bracket(&self.times, t),
            InterpolationMode::Step => Bracket::At(step_index(&self.times, t)),
        }
    }
}

/// Resample ρ-keyed pairs onto the cell centers and the outer face.
fn resample(pairs: &[(f64, f64)], mesh: &Mesh) -> (Array1<f64>, f64) {
    let (rho, values) = sorted_knots(pairs);
    let cells = interp1d_onto(&rho, &values, &mesh.cell_centers);
    let edge = interp1d(&rho, &values, mesh.right_face());
    (cells, edge)
}
