use pathlabel_domain::ConfigurationError;
use thiserror::Error;

/// Anything that makes a configuration unusable. All variants are terminal.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unsupported config schema: {found} (expected {expected})")]
    UnsupportedSchema { found: String, expected: &'static str },

    #[error(transparent)]
    Invalid(#[from] ConfigurationError),
}
