//! Tree ensemble evaluation.
//!
//! Covers random forests (trees averaged) and gradient boosted trees
//! (`base_score` plus the sum of trees). Trees are stored as flat node lists
//! with the root at index 0:
//!
//! ```json
//! { "split": { "feature": 0, "threshold": 72.5, "left": 1, "right": 2 } }
//! { "leaf": 412000.0 }
//! ```
//!
//! A sample goes left when `x[feature] <= threshold`. Children always sit
//! after their parent, so every walk terminates.

use crate::encoder::FeatureVector;
use crate::model::ModelError;
use crate::predictor::traits::PriceModel;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    Mean,
    Sum,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf(f64),
}

#[derive(Debug, Clone, Deserialize)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn evaluate(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match self.nodes[idx] {
                Node::Leaf(value) => return value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => idx = if x[feature] <= threshold { left } else { right },
            }
        }
    }

    fn validate(&self, tree_id: usize, num_features: usize) -> Result<(), ModelError> {
        let invalid = |msg: String| ModelError::InvalidArtifact(format!("tree {tree_id}: {msg}"));
        if self.nodes.is_empty() {
            return Err(invalid("no nodes".into()));
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                Node::Leaf(value) if !value.is_finite() => {
                    return Err(invalid(format!("node {idx} has a non-finite leaf")));
                }
                Node::Leaf(_) => {}
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= num_features {
                        return Err(invalid(format!(
                            "node {idx} splits on feature {feature} of {num_features}"
                        )));
                    }
                    if threshold.is_nan() {
                        return Err(invalid(format!("node {idx} has a NaN threshold")));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(invalid(format!("node {idx} has bad child {child}")));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreeEnsemble {
    feature_names: Vec<String>,
    #[serde(default)]
    base_score: f64,
    aggregation: Aggregation,
    trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let model: Self = serde_json::from_str(json)?;
        if model.trees.is_empty() {
            return Err(ModelError::InvalidArtifact("ensemble has no trees".into()));
        }
        for (tree_id, tree) in model.trees.iter().enumerate() {
            tree.validate(tree_id, model.feature_names.len())?;
        }
        Ok(model)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

impl PriceModel for TreeEnsemble {
    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn predict(&self, features: &FeatureVector<'_>) -> Result<f64, ModelError> {
        let x = features.as_slice();
        if x.len() != self.feature_names.len() {
            return Err(ModelError::FeatureCount {
                expected: self.feature_names.len(),
                actual: x.len(),
            });
        }
        let total: f64 = self.trees.iter().map(|t| t.evaluate(x)).sum();
        let score = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + score)
    }
}
