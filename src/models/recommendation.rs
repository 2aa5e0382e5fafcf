use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationCategory {
    Health,
    Outdoor,
    Protection,
    Home,
    Transport,
}

impl RecommendationCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationCategory::Health => "health",
            RecommendationCategory::Outdoor => "outdoor",
            RecommendationCategory::Protection => "protection",
            RecommendationCategory::Home => "home",
            RecommendationCategory::Transport => "transport",
        }
    }
}

impl std::fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Sort rank: high first.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 0,
            Priority::Medium => 1,
            Priority::Low => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Priority::High => "!",
            Priority::Medium => "⚠",
            Priority::Low => "→",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserGroup {
    #[default]
    Normal,
    Sensitive,
    Children,
    Elderly,
    Athlete,
}

impl UserGroup {
    pub const ALL: [UserGroup; 5] = [
        UserGroup::Normal,
        UserGroup::Sensitive,
        UserGroup::Children,
        UserGroup::Elderly,
        UserGroup::Athlete,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UserGroup::Normal => "normal",
            UserGroup::Sensitive => "sensitive",
            UserGroup::Children => "children",
            UserGroup::Elderly => "elderly",
            UserGroup::Athlete => "athlete",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "normal" | "general" => Some(UserGroup::Normal),
            "sensitive" => Some(UserGroup::Sensitive),
            "children" | "child" | "kids" => Some(UserGroup::Children),
            "elderly" | "senior" | "seniors" => Some(UserGroup::Elderly),
            "athlete" | "athletes" => Some(UserGroup::Athlete),
            _ => None,
        }
    }

    /// Unknown groups get the general-population advice.
    pub fn from_str_or_default(s: &str) -> Self {
        Self::from_str(s).unwrap_or_else(|| {
            tracing::warn!(user_group = %s, "Unknown user group, defaulting to normal");
            UserGroup::Normal
        })
    }
}

impl std::fmt::Display for UserGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
}

impl Recommendation {
    pub fn new(
        id: impl Into<String>,
        category: RecommendationCategory,
        priority: Priority,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            priority,
            category,
        }
    }

    pub fn is_high_priority(&self) -> bool {
        self.priority == Priority::High
    }
}

/// Ambient readings that can add weather-driven advice on top of the table.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AmbientConditions {
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
}

impl AmbientConditions {
    pub fn new(temperature_c: Option<f64>, humidity_percent: Option<f64>) -> Self {
        Self {
            temperature_c,
            humidity_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_rank_order() {
        assert!(Priority::High.rank() < Priority::Medium.rank());
        assert!(Priority::Medium.rank() < Priority::Low.rank());
    }

    #[test]
    fn user_group_parsing() {
        for group in UserGroup::ALL {
            assert_eq!(UserGroup::from_str(group.as_str()), Some(group));
        }
        assert_eq!(UserGroup::from_str(" Elderly "), Some(UserGroup::Elderly));
        assert_eq!(UserGroup::from_str("astronaut"), None);
        assert_eq!(UserGroup::from_str_or_default("astronaut"), UserGroup::Normal);
    }

    #[test]
    fn recommendation_serializes_lowercase_enums() {
        let rec = Recommendation::new(
            "heat-warning",
            RecommendationCategory::Health,
            Priority::High,
            "Heat",
            "Hot",
        );
        let value = serde_json::to_value(&rec).unwrap();
        assert_eq!(value["priority"], "high");
        assert_eq!(value["category"], "health");
        assert_eq!(value["id"], "heat-warning");
        assert!(rec.is_high_priority());
    }
}
