use super::category::Category;
use super::features::FeatureVector;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    #[serde(rename = "prediction")]
    pub category: Category,
    pub confidence: f64,
    pub rules: Vec<String>,
    pub features: FeatureVector,
}

impl ClassificationResult {
    pub fn new(
        category: Category,
        confidence: f64,
        rules: &[&str],
        features: FeatureVector,
    ) -> Self {
        Self {
            category,
            confidence: confidence.clamp(0.0, 1.0),
            rules: rules.iter().map(|r| r.to_string()).collect(),
            features,
        }
    }

    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }
}
