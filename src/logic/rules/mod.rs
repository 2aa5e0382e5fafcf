pub mod catalog;
pub mod cold_warning;
pub mod engine;
pub mod heat_warning;
pub mod humidity_warning;

pub use engine::RecommendationEngine;

use crate::models::{AmbientConditions, Category, Recommendation, UserGroup};

/// Trait for weather-driven advisory rules
pub trait Rule: Send + Sync {
    /// Unique identifier for this rule, also used as the recommendation id
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Evaluate the rule and return a recommendation if conditions are met
    fn evaluate(
        &self,
        ambient: &AmbientConditions,
        category: Category,
        group: UserGroup,
    ) -> Option<Recommendation>;
}
