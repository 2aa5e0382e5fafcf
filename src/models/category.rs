use serde::{Deserialize, Serialize};

/// Canonical air quality category produced by the classifier and used as the
/// recommendation table key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Good,
        Category::Moderate,
        Category::Unhealthy,
        Category::Hazardous,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Good => "Good",
            Category::Moderate => "Moderate",
            Category::Unhealthy => "Unhealthy",
            Category::Hazardous => "Hazardous",
        }
    }

    /// Vietnamese label, used for display and as the catalog key.
    pub fn vi_label(&self) -> &'static str {
        match self {
            Category::Good => "Tốt",
            Category::Moderate => "Trung bình",
            Category::Unhealthy => "Kém",
            Category::Hazardous => "Xấu",
        }
    }

    /// Accepts the English or the Vietnamese label, ignoring case and
    /// surrounding whitespace. Labels of the 5-level AQI scale are not
    /// accepted here; use [`AqiLevel::to_category`] for those.
    pub fn from_label(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().to_lowercase() == s || c.vi_label().to_lowercase() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Five-level display scale derived from a composite AQI number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AqiLevel {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    Hazardous,
}

impl AqiLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Good",
            AqiLevel::Moderate => "Moderate",
            AqiLevel::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiLevel::Unhealthy => "Unhealthy",
            AqiLevel::Hazardous => "Hazardous",
        }
    }

    pub fn vi_label(&self) -> &'static str {
        match self {
            AqiLevel::Good => "Tốt",
            AqiLevel::Moderate => "Trung bình",
            AqiLevel::UnhealthyForSensitiveGroups => "Không tốt cho nhóm nhạy cảm",
            AqiLevel::Unhealthy => "Không lành mạnh",
            AqiLevel::Hazardous => "Nguy hiểm",
        }
    }

    /// Total mapping onto the canonical category. Both unhealthy levels share
    /// the `Unhealthy` row.
    pub fn to_category(&self) -> Category {
        match self {
            AqiLevel::Good => Category::Good,
            AqiLevel::Moderate => Category::Moderate,
            AqiLevel::UnhealthyForSensitiveGroups | AqiLevel::Unhealthy => Category::Unhealthy,
            AqiLevel::Hazardous => Category::Hazardous,
        }
    }
}

impl std::fmt::Display for AqiLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_label_accepts_both_vocabularies() {
        for category in Category::ALL {
            assert_eq!(Category::from_label(category.as_str()), Some(category));
            assert_eq!(Category::from_label(category.vi_label()), Some(category));
        }
        assert_eq!(Category::from_label("  moderate "), Some(Category::Moderate));
        assert_eq!(Category::from_label("TRUNG BÌNH"), Some(Category::Moderate));
    }

    #[test]
    fn from_label_rejects_five_level_labels() {
        assert_eq!(Category::from_label("Không lành mạnh"), None);
        assert_eq!(Category::from_label("Unhealthy for Sensitive Groups"), None);
        assert_eq!(Category::from_label("Nguy hiểm"), None);
        assert_eq!(Category::from_label(""), None);
    }

    #[test]
    fn aqi_level_maps_every_level() {
        assert_eq!(AqiLevel::Good.to_category(), Category::Good);
        assert_eq!(AqiLevel::Moderate.to_category(), Category::Moderate);
        assert_eq!(
            AqiLevel::UnhealthyForSensitiveGroups.to_category(),
            Category::Unhealthy
        );
        assert_eq!(AqiLevel::Unhealthy.to_category(), Category::Unhealthy);
        assert_eq!(AqiLevel::Hazardous.to_category(), Category::Hazardous);
    }

    #[test]
    fn levels_are_ordered() {
        assert!(Category::Good < Category::Hazardous);
        assert!(AqiLevel::Moderate < AqiLevel::UnhealthyForSensitiveGroups);
    }
}
