// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{FusionError, FusionResult};
use ndarray::Array1;
use std::f64::consts::PI;
use std::sync::Arc;

/// Default hi-res refinement factor for the source grid.
const DEFAULT_HIRES_FAC: usize = 4;

/// ITER-like major radius [m].
const DEFAULT_R_MAJOR: f64 = 6.2;
/// ITER-like minor radius [m].
const DEFAULT_A_MINOR: f64 = 2.0;

/// 1D radial mesh on normalized toroidal flux coordinate ρ ∈ [0, 1].
///
/// `face_centers` has `n_rho + 1` entries (0 and 1 included),
/// `cell_centers` has `n_rho` entries at the midpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub n_rho: usize,
    pub drho_norm: f64,
    pub face_centers: Array1<f64>,
    pub cell_centers: Array1<f64>,
}

impl Mesh {
    /// Uniform mesh with `n_rho` cells.
    pub fn uniform(n_rho: usize) -> FusionResult<Self> {
        if n_rho == 0 {
            return Err(FusionError::ConfigError(
                "mesh must have at least one cell".into(),
            ));
        }
        let drho_norm = 1.0 / n_rho as f64;
        let face_centers = Array1::linspace(0.0, 1.0, n_rho + 1);
        let cell_centers = Array1::from_shape_fn(n_rho, |i| (i as f64 + 0.5) * drho_norm);
        Ok(Mesh {
            n_rho,
            drho_norm,
            face_centers,
            cell_centers,
        })
    }

    pub fn n_cells(&self) -> usize {
        self.n_rho
    }

    /// Outer edge coordinate (last face).
    pub fn right_face(&self) -> f64 {
        self.face_centers[self.n_rho]
    }
}

/// Circular-cross-section geometry wrapping a shared [`Mesh`].
///
/// Only the quantities the source formulas need are carried: the area and
/// volume elements per unit normalized radius, and a refined "hi-res" grid
/// for current profiles that need sub-cell resolution.
#[derive(Debug, Clone)]
pub struct Geometry {
    pub mesh: Arc<Mesh>,
    pub r_major: f64,
    pub a_minor: f64,
    /// Reference density [m⁻³]; density profiles are expressed in these units.
    pub n_ref: f64,
    /// dA/dρ_norm at cell centers [m²].
    pub spr_cell: Array1<f64>,
    /// dV/dρ_norm at cell centers [m³].
    pub vpr_cell: Array1<f64>,
    pub hires_fac: usize,
    pub rho_hires_norm: Array1<f64>,
    pub drho_hires_norm: f64,
    /// dA/dρ_norm on the hi-res grid [m²].
    pub spr_hires: Array1<f64>,
}

impl Geometry {
    pub fn circular(
        n_rho: usize,
        r_major: f64,
        a_minor: f64,
        hires_fac: usize,
    ) -> FusionResult<Self> {
        if !r_major.is_finite() || r_major <= 0.0 {
            return Err(FusionError::ConfigError(
                "r_major must be finite and > 0".into(),
            ));
        }
        if !a_minor.is_finite() || a_minor <= 0.0 || a_minor >= r_major {
            return Err(FusionError::ConfigError(
                "a_minor must be finite, > 0 and < r_major".into(),
            ));
        }
        if hires_fac == 0 {
            return Err(FusionError::ConfigError("hires_fac must be >= 1".into()));
        }

        let mesh = Mesh::uniform(n_rho)?;
        let spr_cell = mesh.cell_centers.mapv(|rho| 2.0 * PI * a_minor * a_minor * rho);
        let vpr_cell = mesh
            .cell_centers
            .mapv(|rho| 4.0 * PI * PI * r_major * a_minor * a_minor * rho);

        let n_hires = n_rho * hires_fac;
        let drho_hires_norm = 1.0 / n_hires as f64;
        let rho_hires_norm =
            Array1::from_shape_fn(n_hires, |i| (i as f64 + 0.5) * drho_hires_norm);
        let spr_hires = rho_hires_norm.mapv(|rho| 2.0 * PI * a_minor * a_minor * rho);

        Ok(Geometry {
            mesh: Arc::new(mesh),
            r_major,
            a_minor,
            n_ref: 1e20,
            spr_cell,
            vpr_cell,
            hires_fac,
            rho_hires_norm,
            drho_hires_norm,
            spr_hires,
        })
    }

    /// ITER-like circular geometry with `n_rho` cells.
    pub fn iter_like(n_rho: usize) -> FusionResult<Self> {
        Self::circular(
            n_rho,
            DEFAULT_R_MAJOR,
            DEFAULT_A_MINOR,
            DEFAULT_HIRES_FAC,
        )
    }

    pub fn n_cells(&self) -> usize {
        self.mesh.n_rho
    }

    pub fn drho_norm(&self) -> f64 {
        self.mesh.drho_norm
    }

    /// Plasma cross-section area [m²] from the cell area elements.
    pub fn area(&self) -> f64 {
        self.spr_cell.sum() * self.mesh.drho_norm
    }

    /// Plasma volume [m³] from the cell volume elements.
    pub fn volume(&self) -> f64 {
        self.vpr_cell.sum() * self.mesh.drho_norm
    }
}
