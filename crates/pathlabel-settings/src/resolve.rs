use crate::{error::SettingsError, model::PathlabelConfigV1};
use pathlabel_domain::LabelRules;
use pathlabel_types::SCHEMA_CONFIG_V1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigFormat {
    #[default]
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// `.yml` / `.yaml` select YAML; everything else is TOML.
    pub fn from_path(path: &str) -> Self {
        let lower = path.to_ascii_lowercase();
        if lower.ends_with(".yml") || lower.ends_with(".yaml") {
            ConfigFormat::Yaml
        } else {
            ConfigFormat::Toml
        }
    }
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub rules: LabelRules,
}

pub fn resolve_config(cfg: PathlabelConfigV1) -> Result<ResolvedConfig, SettingsError> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        return Err(SettingsError::UnsupportedSchema {
            found: schema.to_string(),
            expected: SCHEMA_CONFIG_V1,
        });
    }

    let rules = LabelRules::new(cfg.labels)?;
    Ok(ResolvedConfig { rules })
}
