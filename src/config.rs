use crate::domain::FULL_LEASE_YEARS;
use crate::encoder::{FeatureSchema, InputBounds, SchemaDefinition};
use crate::model::SchemaError;
use crate::predictor::ModelKind;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown built-in schema '{0}'")]
    UnknownSchema(String),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("{field}: invalid bounds [{min}, {max}]")]
    InvalidBounds {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Either the name of a built-in schema or a full inline definition.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SchemaConfig {
    Builtin(String),
    Inline(SchemaDefinition),
}

impl Default for SchemaConfig {
    fn default() -> Self {
        SchemaConfig::Builtin("lease_age".into())
    }
}

impl SchemaConfig {
    pub fn resolve(&self) -> Result<FeatureSchema, ConfigError> {
        match self {
            SchemaConfig::Builtin(name) => FeatureSchema::builtin_by_name(name)
                .ok_or_else(|| ConfigError::UnknownSchema(name.clone())),
            SchemaConfig::Inline(def) => Ok(FeatureSchema::from_definition(def.clone())?),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    pub model_path: PathBuf,
    pub model_kind: ModelKind,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub bounds: InputBounds,
}

impl AppConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(json)?;
        let area = config.bounds.floor_area_sqm;
        // also rejects NaN limits
        if !(area.min <= area.max) {
            return Err(ConfigError::InvalidBounds {
                field: "floor_area_sqm",
                min: area.min,
                max: area.max,
            });
        }
        let lease = config.bounds.lease_remaining_years;
        // remaining years past the full lease have no lease age
        if lease.min > lease.max || lease.max > FULL_LEASE_YEARS {
            return Err(ConfigError::InvalidBounds {
                field: "lease_remaining_years",
                min: lease.min.into(),
                max: lease.max.into(),
            });
        }
        Ok(config)
    }
}

pub fn load_config(path: &str) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    AppConfig::from_json(&content)
}
