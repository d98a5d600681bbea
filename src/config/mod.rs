//! Analysis Configuration Module
//!
//! Column names, statistical cut-offs and output locations loaded from a
//! TOML file. Every field has a default, so an empty or missing file runs
//! the analysis with the standard DH-LCM schema.
//!
//! ## Loading Order
//!
//! 1. Explicit path passed by the caller (`--config`)
//! 2. `DHLCM_CONFIG` environment variable (path to TOML file)
//! 3. `analysis_config.toml` in the current working directory
//! 4. Built-in defaults
//!
//! The loaded config is owned by the analysis context and passed down to
//! each stage; there is no process-wide config global.

mod analysis_config;
pub mod validation;

pub use analysis_config::*;
