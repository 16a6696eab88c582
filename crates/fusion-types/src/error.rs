// ─────────────────────────────────────────────────────────────────────
// SCPN Fusion Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FusionError {
    /// Malformed profile specification or configuration value.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A quantity name that the provider was not configured with.
    #[error("Unknown parameter: {name}")]
    UnknownParameter { name: String },

    /// Source configured with a mode its type does not support.
    #[error("Source '{source_name}' does not support mode {mode}")]
    UnsupportedMode { source_name: String, mode: String },

    #[error("Physics constraint violated: {0}")]
    PhysicsViolation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type FusionResult<T> = Result<T, FusionError>;
