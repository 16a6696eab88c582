//! Dynamic runtime parameters and source profiles for 1-D core transport.
//!
//! - [`interpolant`]: time/radius sampling of configured profiles
//! - [`boundary`]: right-edge boundary precedence
//! - [`provider`]: lazily built, cached interpolants and per-time bundles
//! - [`runtime_params`]: profile conditions plus per-source parameters
//! - [`sources`]: source catalog, mode validation and summed contributions

pub mod boundary;
pub mod interpolant;
pub mod provider;
pub mod runtime_params;
pub mod sources;
