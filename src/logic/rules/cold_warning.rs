use super::Rule;
use crate::models::{
    AmbientConditions, Category, Priority, Recommendation, RecommendationCategory, UserGroup,
};

pub const COLD_THRESHOLD_C: f64 = 15.0;

/// Cold air advisory. Cold air aggravates respiratory symptoms, so this
/// fires below 15°C regardless of category.
pub struct ColdWarningRule;

impl Rule for ColdWarningRule {
    fn id(&self) -> &'static str {
        "cold-warning"
    }

    fn name(&self) -> &'static str {
        "Cold weather advisory"
    }

    fn evaluate(
        &self,
        ambient: &AmbientConditions,
        _category: Category,
        _group: UserGroup,
    ) -> Option<Recommendation> {
        let temp = ambient.temperature_c.filter(|t| *t < COLD_THRESHOLD_C)?;

        tracing::debug!(temperature_c = temp, "Cold advisory triggered");

        Some(Recommendation::new(
            self.id(),
            RecommendationCategory::Health,
            Priority::Medium,
            "Lưu ý thời tiết lạnh",
            "Không khí lạnh có thể làm trầm trọng triệu chứng hô hấp. Giữ ấm cơ thể.",
        ))
    }
}
