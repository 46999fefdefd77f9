use crate::encoder::FeatureVector;
use crate::model::ModelError;
use crate::predictor::traits::PriceModel;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Ordinary linear regression: intercept + Σ coefficient · feature.
#[derive(Debug, Clone, Deserialize)]
pub struct LinearModel {
    feature_names: Vec<String>,
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        if model.coefficients.len() != model.feature_names.len() {
            return Err(ModelError::InvalidArtifact(format!(
                "{} coefficients for {} features",
                model.coefficients.len(),
                model.feature_names.len()
            )));
        }
        if !model.intercept.is_finite() || model.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidArtifact(
                "non-finite weight in linear model".into(),
            ));
        }
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }
}

impl PriceModel for LinearModel {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, ModelError> {
        let x = features.as_slice();
        if x.len() != self.coefficients.len() {
            return Err(ModelError::FeatureCount {
                expected: self.coefficients.len(),
                actual: x.len(),
            });
        }
        let dot: f64 = self.coefficients.iter().zip(x).map(|(c, v)| c * v).sum();
        Ok(self.intercept + dot)
    }
}
