// Core structs: RawInputRecord, NormalizedRecord, Prediction, error types
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One user submission, exactly as collected from the form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawInputRecord {
    pub floor_area_sqm: f64,
    pub town: String,
    pub flat_type: String,
    pub flat_model: String,
    pub lease_remaining_years: u32,
    pub storey_category: String,
}

/// Raw record after the category lookups; every categorical field is a
/// member of the trained feature space.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub floor_area_sqm: f64,
    pub lease_remaining_years: u32,
    pub region: &'static str,
    pub flat_type: &'static str,
    pub flat_model_category: &'static str,
    pub storey_category: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub price: f64,
    pub schema: String,
    pub predicted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    Town,
    FlatType,
    FlatModel,
    StoreyCategory,
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CategoryKind::Town => "town",
            CategoryKind::FlatType => "flat_type",
            CategoryKind::FlatModel => "flat_model",
            CategoryKind::StoreyCategory => "storey_category",
        };
        f.write_str(name)
    }
}

/// Errors reported to the caller of a single prediction.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("unknown {kind} value '{value}'")]
    UnknownCategoryValue { kind: CategoryKind, value: String },
    #[error("slot '{slot}' does not exist in feature schema '{schema}'")]
    SchemaMismatch { slot: String, schema: String },
    #[error("{field} = {value} is outside [{min}, {max}]")]
    DomainBoundsViolation {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("prediction failed: {0}")]
    PredictionFailed(#[source] ModelError),
}

impl PredictError {
    /// Short machine-readable tag used in the host output.
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::UnknownCategoryValue { .. } => "unknown_category_value",
            PredictError::SchemaMismatch { .. } => "schema_mismatch",
            PredictError::DomainBoundsViolation { .. } => "domain_bounds_violation",
            PredictError::PredictionFailed(_) => "prediction_failed",
        }
    }
}

/// Invalid feature schema definition.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("schema '{schema}' lists slot '{slot}' more than once")]
    DuplicateSlot { schema: String, slot: String },
    #[error("schema '{schema}' is missing required slot '{slot}'")]
    MissingSlot { schema: String, slot: String },
    #[error("schema '{schema}' contains slot '{slot}' which is not allowed for its lease encoding")]
    ConflictingLeaseSlot { schema: String, slot: String },
    #[error("schema '{schema}' contains slot '{slot}' outside every known feature group")]
    UnknownSlot { schema: String, slot: String },
}

/// Model artifact loading or evaluation failure.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid model artifact: {0}")]
    InvalidArtifact(String),
    #[error("expected {expected} features, got {actual}")]
    FeatureCount { expected: usize, actual: usize },
    #[error("model returned a non-finite value: {0}")]
    NonFinite(f64),
}
