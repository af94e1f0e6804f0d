//! Config parsing and rule resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod error;
mod model;
mod resolve;

pub use error::SettingsError;
pub use model::PathlabelConfigV1;
pub use resolve::{ConfigFormat, ResolvedConfig};

/// Parse `pathlabel.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> Result<PathlabelConfigV1, SettingsError> {
    let cfg: PathlabelConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse a YAML config (`pathlabel.yml`) into a typed model.
pub fn parse_config_yaml(input: &str) -> Result<PathlabelConfigV1, SettingsError> {
    // serde_yaml rejects an empty document; treat it like an empty TOML file.
    if input.trim().is_empty() {
        return Ok(PathlabelConfigV1::default());
    }
    let cfg: PathlabelConfigV1 = serde_yaml::from_str(input)?;
    Ok(cfg)
}

pub fn parse_config(input: &str, format: ConfigFormat) -> Result<PathlabelConfigV1, SettingsError> {
    match format {
        ConfigFormat::Toml => parse_config_toml(input),
        ConfigFormat::Yaml => parse_config_yaml(input),
    }
}

/// Resolve the validated label rules used by the matcher.
pub fn resolve_config(cfg: PathlabelConfigV1) -> Result<ResolvedConfig, SettingsError> {
    resolve::resolve_config(cfg)
}

/// Parse and resolve in one step.
pub fn load_config(input: &str, format: ConfigFormat) -> Result<ResolvedConfig, SettingsError> {
    resolve_config(parse_config(input, format)?)
}
