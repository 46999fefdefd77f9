// Predictor module: model artifacts and the single prediction entry point.

pub mod forest;
pub mod linear;
pub mod traits;

pub use forest::TreeEnsemble;
pub use linear::LinearModel;
pub use traits::PriceModel;

use crate::encoder::{FeatureSchema, InputBounds, build, prepare};
use crate::model::{ModelError, PredictError, Prediction, RawInputRecord};
use chrono::Utc;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelKind {
    Linear,
    TreeEnsemble,
}

pub fn load_model(kind: ModelKind, path: &Path) -> Result<Box<dyn PriceModel>, ModelError> {
    info!("Loading {:?} model from {}", kind, path.display());
    let model: Box<dyn PriceModel> = match kind {
        ModelKind::Linear => Box::new(LinearModel::load(path)?),
        ModelKind::TreeEnsemble => Box::new(TreeEnsemble::load(path)?),
    };
    Ok(model)
}

/// Raw record in, price out. Shared read-only across requests.
pub struct Predictor {
    schema: Arc<FeatureSchema>,
    bounds: InputBounds,
    model: Box<dyn PriceModel>,
}

impl Predictor {
    /// Pairs a schema with a model; the model must have been fit on exactly
    /// the schema's slots, in the same order.
    pub fn new(
        schema: Arc<FeatureSchema>,
        bounds: InputBounds,
        model: Box<dyn PriceModel>,
    ) -> Result<Self, PredictError> {
        if let Some(slot) = first_difference(schema.slots(), model.feature_names()) {
            return Err(PredictError::SchemaMismatch {
                slot,
                schema: schema.name().to_string(),
            });
        }
        info!(
            "Predictor ready: schema '{}' ({} slots)",
            schema.name(),
            schema.len()
        );
        Ok(Self {
            schema,
            bounds,
            model,
        })
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn predict(&self, raw: &RawInputRecord) -> Result<Prediction, PredictError> {
        let result = self.run(raw);
        if let Err(e) = &result {
            warn!("Prediction rejected: {}", e);
        }
        result
    }

    fn run(&self, raw: &RawInputRecord) -> Result<Prediction, PredictError> {
        let record = prepare(&self.bounds, raw)?;
        let features = build(&self.schema, &record)?;
        debug!("Feature vector: {:?}", features.as_slice());

        let price = self
            .model
            .predict(&features)
            .map_err(PredictError::PredictionFailed)?;
        if !price.is_finite() {
            return Err(PredictError::PredictionFailed(ModelError::NonFinite(price)));
        }

        info!("Predicted {:.2} for {} / {}", price, raw.town, raw.flat_type);
        Ok(Prediction {
            price,
            schema: self.schema.name().to_string(),
            predicted_at: Utc::now(),
        })
    }
}

/// First slot name on which the two orderings disagree.
fn first_difference(schema: &[String], model: &[String]) -> Option<String> {
    schema
        .iter()
        .zip(model)
        .find(|(a, b)| a != b)
        .map(|(a, _)| a.clone())
        .or_else(|| match schema.len().cmp(&model.len()) {
            std::cmp::Ordering::Less => Some(model[schema.len()].clone()),
            std::cmp::Ordering::Greater => Some(schema[model.len()].clone()),
            std::cmp::Ordering::Equal => None,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::FeatureVector;
    use serde_json::json;

    fn woodlands() -> RawInputRecord {
        RawInputRecord {
            floor_area_sqm: 95.0,
            town: "WOODLANDS".into(),
            flat_type: "4 ROOM".into(),
            flat_model: "MODEL A".into(),
            lease_remaining_years: 90,
            storey_category: "Mid Storey".into(),
        }
    }

    fn linear_for(schema: &FeatureSchema) -> Box<dyn PriceModel> {
        let coefficients: Vec<f64> = schema
            .slots()
            .iter()
            .map(|s| if s == "floor_area_sqm" { 5000.0 } else { 0.0 })
            .collect();
        let doc = json!({
            "feature_names": schema.slots(),
            "intercept": 10000.0,
            "coefficients": coefficients,
        });
        Box::new(LinearModel::from_json(&doc.to_string()).unwrap())
    }

    /// Model that always returns a fixed value or rejects the vector.
    struct Fixed(Vec<String>, Result<f64, ()>);

    impl PriceModel for Fixed {
        fn feature_names(&self) -> &[String] {
            &self.0
        }

        fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, ModelError> {
            self.1
                .map_err(|_| ModelError::FeatureCount {
                    expected: 0,
                    actual: features.len(),
                })
        }
    }

    fn fixed(value: Result<f64, ()>) -> Predictor {
        let schema = Arc::new(FeatureSchema::lease_age());
        let names = schema.slots().to_vec();
        Predictor::new(schema, InputBounds::default(), Box::new(Fixed(names, value))).unwrap()
    }

    #[test]
    fn predicts_for_valid_record() {
        let schema = Arc::new(FeatureSchema::lease_age());
        let model = linear_for(&schema);
        let predictor = Predictor::new(schema, InputBounds::default(), model).unwrap();
        let prediction = predictor.predict(&woodlands()).unwrap();
        assert_eq!(prediction.price, 10000.0 + 95.0 * 5000.0);
        assert_eq!(prediction.schema, "lease_age");
    }

    #[test]
    fn model_for_other_lease_encoding_is_refused() {
        let remaining = FeatureSchema::lease_remaining();
        let model = linear_for(&remaining);
        let err = Predictor::new(
            Arc::new(FeatureSchema::lease_age()),
            InputBounds::default(),
            model,
        )
        .err()
        .unwrap();
        match err {
            PredictError::SchemaMismatch { slot, schema } => {
                assert_eq!(slot, "lease_age_years");
                assert_eq!(schema, "lease_age");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn first_difference_handles_length() {
        let a: Vec<String> = vec!["x".into(), "y".into()];
        let b: Vec<String> = vec!["x".into()];
        assert_eq!(first_difference(&a, &b), Some("y".to_string()));
        assert_eq!(first_difference(&b, &a), Some("y".to_string()));
        assert_eq!(first_difference(&a, &a), None);
    }

    #[test]
    fn model_failure_is_prediction_failed() {
        let err = fixed(Err(())).predict(&woodlands()).unwrap_err();
        assert!(matches!(
            err,
            PredictError::PredictionFailed(ModelError::FeatureCount { actual: 21, .. })
        ));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn non_finite_output_is_prediction_failed() {
        for value in [f64::NAN, f64::INFINITY] {
            let err = fixed(Ok(value)).predict(&woodlands()).unwrap_err();
            assert!(matches!(
                err,
                PredictError::PredictionFailed(ModelError::NonFinite(_))
            ));
        }
    }

    #[test]
    fn invalid_input_never_reaches_model() {
        let predictor = fixed(Ok(1.0));
        let mut raw = woodlands();
        raw.town = "ATLANTIS".into();
        assert_eq!(
            predictor.predict(&raw).unwrap_err().kind(),
            "unknown_category_value"
        );
        raw = woodlands();
        raw.floor_area_sqm = 150.1;
        assert_eq!(
            predictor.predict(&raw).unwrap_err().kind(),
            "domain_bounds_violation"
        );
    }

    #[test]
    fn predictor_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Predictor>();
    }
}
