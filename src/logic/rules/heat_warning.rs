use super::Rule;
use crate::models::{
    AmbientConditions, Category, Priority, Recommendation, RecommendationCategory, UserGroup,
};

/// Above this air temperature (°C) heat compounds pollution exposure.
pub const HEAT_THRESHOLD_C: f64 = 35.0;

/// Heat warning rule
///
/// Conditions:
/// - Ambient temperature strictly above 35°C
pub struct HeatWarningRule;

impl Rule for HeatWarningRule {
    fn id(&self) -> &'static str {
        "heat-warning"
    }

    fn name(&self) -> &'static str {
        "Heat warning"
    }

    fn evaluate(
        &self,
        ambient: &AmbientConditions,
        _category: Category,
        _group: UserGroup,
    ) -> Option<Recommendation> {
        let temp = ambient
            .temperature_c
            .filter(|t| *t > HEAT_THRESHOLD_C)?;

        tracing::debug!(temperature_c = temp, "Heat warning triggered");

        Some(Recommendation::new(
            self.id(),
            RecommendationCategory::Health,
            Priority::High,
            "Cảnh báo nắng nóng",
            "Nhiệt độ cao kết hợp ô nhiễm tăng nguy cơ sức khỏe. Uống đủ nước, tránh nắng.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluate(temp: Option<f64>) -> Option<Recommendation> {
        HeatWarningRule.evaluate(
            &AmbientConditions::new(temp, None),
            Category::Moderate,
            UserGroup::Normal,
        )
    }

    #[test]
    fn fires_above_threshold() {
        let rec = evaluate(Some(40.0)).unwrap();
        assert_eq!(rec.id, "heat-warning");
        assert_eq!(rec.priority, Priority::High);
        assert_eq!(rec.category, RecommendationCategory::Health);
    }

    #[test]
    fn threshold_is_exclusive() {
        assert!(evaluate(Some(35.0)).is_none());
        assert!(evaluate(Some(35.1)).is_some());
    }

    #[test]
    fn silent_without_temperature() {
        assert!(evaluate(None).is_none());
        assert!(evaluate(Some(20.0)).is_none());
    }
}
