use crate::models::{Category, ClassificationResult, FeatureVector};

/// A predictor that turns a feature vector into a classification.
pub trait Model: Send + Sync {
    /// Unique identifier for this model
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    fn predict(&self, features: &FeatureVector) -> ClassificationResult;
}

/// The rule table carries no probability; every answer gets this score.
pub const RULE_CONFIDENCE: f64 = 0.85;

const GOOD_TRACE: [&str; 4] = [
    "IF PM2.5 ≤ 25",
    "AND NO2 ≤ 50",
    "AND CO ≤ 2",
    "THEN Air Quality = Good",
];

const MODERATE_TRACE: [&str; 4] = [
    "IF PM2.5 ≤ 55",
    "AND NO2 ≤ 100",
    "AND CO ≤ 6",
    "THEN Air Quality = Moderate",
];

const UNHEALTHY_TRACE: [&str; 4] = [
    "IF PM2.5 ≤ 150",
    "OR NO2 ≤ 200",
    "OR CO ≤ 12",
    "THEN Air Quality = Unhealthy",
];

const HAZARDOUS_TRACE: [&str; 4] = [
    "IF PM2.5 > 150",
    "OR NO2 > 200",
    "OR CO > 12",
    "THEN Air Quality = Hazardous",
];

/// Threshold classifier mimicking a shallow decision tree.
///
/// Branches are tried top to bottom and the first match wins:
/// - Good: PM2.5 ≤ 25 and NO2 ≤ 50 and CO ≤ 2
/// - Moderate: PM2.5 ≤ 55 and NO2 ≤ 100 and CO ≤ 6
/// - Unhealthy: PM2.5 ≤ 150 or NO2 ≤ 200 or CO ≤ 12
/// - Hazardous: everything else
///
/// The third branch is a disjunction, so a single low pollutant keeps an
/// otherwise extreme sample out of Hazardous.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedClassifier;

impl Model for RuleBasedClassifier {
    fn id(&self) -> &'static str {
        "rule_based_v1"
    }

    fn name(&self) -> &'static str {
        "Rule-based threshold classifier"
    }

    fn predict(&self, features: &FeatureVector) -> ClassificationResult {
        classify(features)
    }
}

pub fn classify(features: &FeatureVector) -> ClassificationResult {
    let FeatureVector { pm2_5, no2, co, .. } = *features;

    let (category, trace) = if pm2_5 <= 25.0 && no2 <= 50.0 && co <= 2.0 {
        (Category::Good, &GOOD_TRACE)
    } else if pm2_5 <= 55.0 && no2 <= 100.0 && co <= 6.0 {
        (Category::Moderate, &MODERATE_TRACE)
    } else if pm2_5 <= 150.0 || no2 <= 200.0 || co <= 12.0 {
        (Category::Unhealthy, &UNHEALTHY_TRACE)
    } else {
        (Category::Hazardous, &HAZARDOUS_TRACE)
    };

    tracing::debug!(
        pm2_5,
        no2,
        co,
        category = %category,
        "Classified feature vector"
    );

    ClassificationResult::new(category, RULE_CONFIDENCE, trace, *features)
}
