use super::{
    catalog, cold_warning::ColdWarningRule, heat_warning::HeatWarningRule,
    humidity_warning::HumidityWarningRule, Rule,
};
use crate::models::{AmbientConditions, Category, Recommendation, UserGroup};

pub struct RecommendationEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RecommendationEngine {
    pub fn new() -> Self {
        // Order matters: it is the tie-break within a priority.
        let rules: Vec<Box<dyn Rule>> = vec![
            Box::new(HeatWarningRule),
            Box::new(ColdWarningRule),
            Box::new(HumidityWarningRule),
        ];

        Self { rules }
    }

    /// Advice for a category given by label. English and Vietnamese labels
    /// are both accepted; anything else gets the Moderate row.
    pub fn generate(
        &self,
        category_label: &str,
        group: UserGroup,
        ambient: &AmbientConditions,
    ) -> Vec<Recommendation> {
        let category = Category::from_label(category_label).unwrap_or_else(|| {
            tracing::debug!(
                category = %category_label,
                "Unrecognized category label, using Moderate advice"
            );
            Category::Moderate
        });
        self.generate_for(category, group, ambient)
    }

    /// Table row for (category, group), then any triggered weather rules,
    /// stably sorted high priority first.
    pub fn generate_for(
        &self,
        category: Category,
        group: UserGroup,
        ambient: &AmbientConditions,
    ) -> Vec<Recommendation> {
        let mut recommendations = catalog::base_recommendations(category, group);

        recommendations.extend(
            self.rules
                .iter()
                .filter_map(|rule| rule.evaluate(ambient, category, group)),
        );

        recommendations.sort_by_key(|r| r.priority.rank());
        recommendations
    }

    pub fn list_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.rules.iter().map(|r| (r.id(), r.name())).collect()
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new()
    }
}
