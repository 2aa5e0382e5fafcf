use super::Rule;
use crate::models::{
    AmbientConditions, Category, Priority, Recommendation, RecommendationCategory, UserGroup,
};

pub const HUMIDITY_THRESHOLD_PERCENT: f64 = 80.0;

/// High humidity advisory
///
/// Humid air keeps particulates suspended longer.
///
/// Conditions:
/// - Relative humidity strictly above 80%
pub struct HumidityWarningRule;

impl Rule for HumidityWarningRule {
    fn id(&self) -> &'static str {
        "humidity-warning"
    }

    fn name(&self) -> &'static str {
        "High humidity advisory"
    }

    fn evaluate(
        &self,
        ambient: &AmbientConditions,
        _category: Category,
        _group: UserGroup,
    ) -> Option<Recommendation> {
        let humidity = ambient
            .humidity_percent
            .filter(|h| *h > HUMIDITY_THRESHOLD_PERCENT)?;

        tracing::debug!(humidity_percent = humidity, "Humidity advisory triggered");

        Some(Recommendation::new(
            self.id(),
            RecommendationCategory::Health,
            Priority::Medium,
            "Độ ẩm cao",
            "Độ ẩm cao làm các hạt ô nhiễm lơ lửng lâu hơn. Hạn chế hoạt động ngoài trời.",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_only_above_threshold() {
        let rule = HumidityWarningRule;
        let eval = |h: Option<f64>| {
            rule.evaluate(
                &AmbientConditions::new(None, h),
                Category::Unhealthy,
                UserGroup::Children,
            )
        };

        assert_eq!(eval(Some(90.0)).map(|r| r.id), Some("humidity-warning".to_string()));
        assert!(eval(Some(80.0)).is_none());
        assert!(eval(None).is_none());
    }
}
