// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Runtime Configuration Integration Tests
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! JSON configuration through to summed source profiles.

use fusion_core::runtime_params::{RuntimeParamsProvider, NE, TE};
use fusion_core::sources::{compute_contributions, compute_hires};
use fusion_types::config::{AffectedCoreProfile, RuntimeConfig};
use fusion_types::error::FusionError;
use fusion_types::state::{Geometry, Mesh};
use std::sync::Arc;

fn provider(json: &str, mesh: Arc<Mesh>) -> RuntimeParamsProvider {
    let config = RuntimeConfig::from_json_str(json).unwrap();
    RuntimeParamsProvider::from_config(&config, mesh).unwrap()
}

#[test]
fn test_boundary_precedence_examples() {
    let te = r#"{"0": {"0": 1.0, "1": 2.0}, "1.5": {"0": 100.0, "1": 200.0}}"#;
    let mesh = Arc::new(Mesh::uniform(4).unwrap());

    let derived = provider(
        &format!(r#"{{"profile_conditions": {{"Te": {te}}}}}"#),
        Arc::clone(&mesh),
    );
    let at = |p: &RuntimeParamsProvider, t: f64| {
        *p.build_dynamic_runtime_params(t)
            .unwrap()
            .profile_conditions()
            .boundary(TE)
            .unwrap()
    };
    assert_eq!(at(&derived, 0.0).value, 2.0);
    assert_eq!(at(&derived, 1.5).value, 200.0);
    assert!(!at(&derived, 0.0).is_absolute);

    let fixed = provider(
        &format!(r#"{{"profile_conditions": {{"Te": {te}, "Te_bound_right": 3.0}}}}"#),
        mesh,
    );
    assert_eq!(at(&fixed, 0.0).value, 3.0);
    assert_eq!(at(&fixed, 1.5).value, 3.0);
    assert!(at(&fixed, 0.0).is_absolute);
}

#[test]
fn test_time_exactness_and_midpoint() {
    let p = provider(
        r#"{"profile_conditions": {"Ip": {"0": 1.0, "1.5": 100.0}}}"#,
        Arc::new(Mesh::uniform(4).unwrap()),
    );
    let ip = |t: f64| {
        p.build_dynamic_runtime_params(t)
            .unwrap()
            .profile_conditions()
            .scalar("Ip")
            .unwrap()
    };
    assert_eq!(ip(0.0), 1.0);
    assert_eq!(ip(1.5), 100.0);
    assert_eq!(ip(0.75), 50.5);
    assert_eq!(ip(-1.0), 1.0);
    assert_eq!(ip(9.0), 100.0);
}

#[test]
fn test_space_time_sampled_onto_four_cells() {
    let p = provider(
        r#"{"profile_conditions": {"Te": {"0": {"0": 1.0, "1": 2.0}, "1.5": {"0": 100.0, "1": 200.0}}}}"#,
        Arc::new(Mesh::uniform(4).unwrap()),
    );
    for (t, expected) in [
        (0.0, [1.125, 1.375, 1.625, 1.875]),
        (1.5, [112.5, 137.5, 162.5, 187.5]),
    ] {
        let params = p.build_dynamic_runtime_params(t).unwrap();
        let te = params.profile_conditions().profile(TE).unwrap();
        for (got, want) in te.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "t={t}: {got} vs {want}");
        }
    }
}

#[test]
fn test_step_ne_boundary_from_json() {
    let p = provider(
        r#"{"profile_conditions": {
            "ne_bound_right": {"value": {"0.0": 0.1, "0.1": 2.0}, "interpolation": "step"}
        }}"#,
        Arc::new(Mesh::uniform(10).unwrap()),
    );
    let bc = |t: f64| {
        *p.build_dynamic_runtime_params(t)
            .unwrap()
            .profile_conditions()
            .boundary(NE)
            .unwrap()
    };
    assert_eq!(bc(0.0).value, 0.1);
    assert_eq!(bc(0.09).value, 0.1);
    assert_eq!(bc(0.5).value, 2.0);
    assert!(bc(0.5).is_absolute);
    assert!(!bc(0.5).is_reference_normalized);
}

#[test]
fn test_external_current_model_based_fails_before_numerics() {
    let p = provider(
        r#"{"sources": {"jext": {"type": "external_current", "mode": "model_based"}}}"#,
        Arc::new(Mesh::uniform(4).unwrap()),
    );
    let err = p.build_dynamic_runtime_params(0.0).unwrap_err();
    assert!(
        matches!(&err, FusionError::UnsupportedMode { source_name, mode }
            if source_name == "jext" && mode == "MODEL_BASED"),
        "{err}"
    );
    assert_eq!(p.profile_provider().build_count(), 0);
}

#[test]
fn test_prescribed_external_current_extraction() {
    let geo = Geometry::iter_like(5).unwrap();
    let p = provider(
        r#"{"sources": {"jext": {"type": "external_current", "mode": "prescribed", "prescribed": [1.0]}}}"#,
        geo.mesh.clone(),
    );
    let params = p.build_dynamic_runtime_params(0.0).unwrap();
    let profiles = compute_contributions(&params, &geo, p.catalog()).unwrap();
    assert!(profiles.get(AffectedCoreProfile::Psi).iter().all(|v| *v == 1.0));
    assert!(profiles.get(AffectedCoreProfile::TempIon).iter().all(|v| *v == 0.0));
    let hires = compute_hires("jext", &params, &geo, p.catalog()).unwrap();
    assert_eq!(hires.len(), 5 * geo.hires_fac);
}

#[test]
fn test_full_source_set_contributes_to_every_field() {
    let geo = Geometry::iter_like(25).unwrap();
    let p = provider(
        r#"{
            "profile_conditions": {"Ip": {"0": 5.0, "10": 15.0}},
            "sources": {
                "jext": {"type": "external_current", "mode": "formula", "params": {"Iext": {"0": 1.0, "10": 3.0}}},
                "nbi": {"type": "generic_ion_el_heat", "mode": "formula", "params": {"Ptot": 50.0}},
                "puff": {"type": "gas_puff", "mode": "formula"},
                "pellet": {"type": "generic_particle", "mode": "zero"},
                "fusion": {"type": "fusion_heat", "mode": "model_based"},
                "brems": {"type": "bremsstrahlung", "mode": "model_based", "params": {"Zeff": 1.6}}
            }
        }"#,
        geo.mesh.clone(),
    );
    let params = p.build_dynamic_runtime_params(5.0).unwrap();
    assert_eq!(params.source("jext").unwrap().params.scalar("Iext").unwrap(), 2.0);

    let profiles = compute_contributions(&params, &geo, p.catalog()).unwrap();
    for (field, values) in profiles.fields() {
        assert_eq!(values.len(), 25, "{field}");
        assert!(values.iter().all(|v| v.is_finite()), "{field}");
        assert!(values.iter().any(|v| *v != 0.0), "{field} received nothing");
    }
    let contributors: Vec<&str> = profiles.contributors().collect();
    assert_eq!(contributors, ["jext", "nbi", "puff", "fusion", "brems"]);

    let jext = &profiles.per_source("jext").unwrap()[&AffectedCoreProfile::Psi];
    let total = (jext * &geo.spr_cell).sum() * geo.drho_norm();
    assert!((total - 2.0e6).abs() / 2.0e6 < 1e-10);
}

#[test]
fn test_model_based_inputs_available() {
    let p = provider(
        r#"{"sources": {"fusion": {"type": "fusion_heat", "mode": "model_based"}}}"#,
        Arc::new(Mesh::uniform(4).unwrap()),
    );
    assert!(p.profile_provider().require(&["Ti", "ne", "Ip"]).is_ok());
    assert!(matches!(
        p.profile_provider().require(&["Zeff"]),
        Err(FusionError::UnknownParameter { .. })
    ));
}

#[test]
fn test_malformed_profile_keys_rejected() {
    let config = RuntimeConfig::from_json_str(
        r#"{"profile_conditions": {"Te": {"core": 1.0}}}"#,
    )
    .unwrap();
    let err = RuntimeParamsProvider::from_config(&config, Arc::new(Mesh::uniform(4).unwrap()))
        .unwrap_err();
    assert!(matches!(err, FusionError::ConfigError(_)));
}

#[test]
fn test_unknown_source_param_rejected() {
    let config = RuntimeConfig::from_json_str(
        r#"{"sources": {"puff": {"type": "gas_puff", "mode": "formula", "params": {"S_total": 1.0}}}}"#,
    )
    .unwrap();
    let err = RuntimeParamsProvider::from_config(&config, Arc::new(Mesh::uniform(4).unwrap()))
        .unwrap_err();
    assert!(matches!(err, FusionError::UnknownParameter { name } if name == "S_total"));
}
