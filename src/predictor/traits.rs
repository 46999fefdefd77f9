use crate::encoder::FeatureVector;
use crate::model::ModelError;

/// A fitted regression model, treated as an opaque read-only capability.
pub trait PriceModel: Send + Sync {
    /// Column names the model was fit on, in order.
    fn feature_names(&self) -> &[String];

    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, ModelError>;
}
