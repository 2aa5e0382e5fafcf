use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One classifier input. Concentrations are in µg/m³, temperature in °C and
/// humidity in percent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    #[serde(rename = "TSP", default)]
    pub tsp: f64,
    #[serde(rename = "PM2_5", default)]
    pub pm2_5: f64,
    #[serde(rename = "O3", default)]
    pub o3: f64,
    #[serde(rename = "CO", default)]
    pub co: f64,
    #[serde(rename = "NO2", default)]
    pub no2: f64,
    #[serde(rename = "SO2", default)]
    pub so2: f64,
    #[serde(rename = "Temperature", default)]
    pub temperature: f64,
    #[serde(rename = "Humidity", default)]
    pub humidity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Tsp,
    Pm2_5,
    O3,
    Co,
    No2,
    So2,
    Temperature,
    Humidity,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Tsp,
        Feature::Pm2_5,
        Feature::O3,
        Feature::Co,
        Feature::No2,
        Feature::So2,
        Feature::Temperature,
        Feature::Humidity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Tsp => "TSP",
            Feature::Pm2_5 => "PM2_5",
            Feature::O3 => "O3",
            Feature::Co => "CO",
            Feature::No2 => "NO2",
            Feature::So2 => "SO2",
            Feature::Temperature => "Temperature",
            Feature::Humidity => "Humidity",
        }
    }

    /// Resolves an input key, ignoring case. PM2.5 is accepted under the
    /// spellings found in web payloads and CSV datasets.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "tsp" => Some(Feature::Tsp),
            "pm2_5" | "pm25" | "pm2.5" => Some(Feature::Pm2_5),
            "o3" => Some(Feature::O3),
            "co" => Some(Feature::Co),
            "no2" => Some(Feature::No2),
            "so2" => Some(Feature::So2),
            "temperature" | "temp" => Some(Feature::Temperature),
            "humidity" => Some(Feature::Humidity),
            _ => None,
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Tsp => self.tsp,
            Feature::Pm2_5 => self.pm2_5,
            Feature::O3 => self.o3,
            Feature::Co => self.co,
            Feature::No2 => self.no2,
            Feature::So2 => self.so2,
            Feature::Temperature => self.temperature,
            Feature::Humidity => self.humidity,
        }
    }

    pub fn set(&mut self, feature: Feature, value: f64) {
        let slot = match feature {
            Feature::Tsp => &mut self.tsp,
            Feature::Pm2_5 => &mut self.pm2_5,
            Feature::O3 => &mut self.o3,
            Feature::Co => &mut self.co,
            Feature::No2 => &mut self.no2,
            Feature::So2 => &mut self.so2,
            Feature::Temperature => &mut self.temperature,
            Feature::Humidity => &mut self.humidity,
        };
        *slot = value;
    }

    /// Builds a vector from an arbitrary JSON object. Never fails: anything
    /// that is not an object yields the zero vector, and every field that is
    /// absent or not numeric becomes 0.
    pub fn from_json(value: &Value) -> Self {
        let mut features = Self::default();
        let Some(object) = value.as_object() else {
            tracing::debug!("Feature payload is not an object, using zero vector");
            return features;
        };

        for (key, raw) in object {
            match Feature::from_key(key) {
                Some(feature) => features.set(feature, coerce_value(raw)),
                None => tracing::trace!(key = %key, "Ignoring unknown feature key"),
            }
        }
        features
    }

    /// Builds a vector from `KEY=VALUE` style pairs, with the same
    /// defaulting rules as [`FeatureVector::from_json`].
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut features = Self::default();
        for (key, raw) in pairs {
            if let Some(feature) = Feature::from_key(key) {
                features.set(feature, parse_leading_float(raw));
            }
        }
        features
    }
}

/// Non-finite values, including `"Infinity"` and overflowing exponents, are
/// treated as 0 rather than as an extreme reading.
fn coerce_value(raw: &Value) -> f64 {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0),
        Value::String(s) => parse_leading_float(s),
        _ => 0.0,
    }
}

/// Parses the longest decimal prefix of `s` after leading whitespace, so
/// `"12.5 µg/m³"` reads as 12.5. Returns 0 when no digits lead the string or
/// the result is not finite.
pub fn parse_leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    // Exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_leading_float_prefixes() {
        assert_eq!(parse_leading_float("42"), 42.0);
        assert_eq!(parse_leading_float("  12.5 µg/m³"), 12.5);
        assert_eq!(parse_leading_float("-3.25"), -3.25);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("7."), 7.0);
        assert_eq!(parse_leading_float("1e3x"), 1000.0);
        assert_eq!(parse_leading_float("2e"), 2.0);
    }

    #[test]
    fn parse_leading_float_garbage_is_zero() {
        assert_eq!(parse_leading_float(""), 0.0);
        assert_eq!(parse_leading_float("abc"), 0.0);
        assert_eq!(parse_leading_float("."), 0.0);
        assert_eq!(parse_leading_float("-"), 0.0);
        assert_eq!(parse_leading_float("1e999"), 0.0);
    }

    #[test]
    fn non_finite_inputs_read_as_zero() {
        let features = FeatureVector::from_json(&json!({
            "PM2_5": "Infinity",
            "TSP": "1e999",
            "NO2": "-Infinity"
        }));
        assert_eq!(features, FeatureVector::default());
    }

    #[test]
    fn from_json_mixed_values() {
        let features = FeatureVector::from_json(&json!({
            "PM2_5": "60",
            "NO2": 110,
            "CO": 7.0,
            "O3": null,
            "SO2": "n/a",
            "Temperature": true,
            "Humidity": "85%",
            "Station_No": "HN-01",
        }));

        assert_eq!(features.pm2_5, 60.0);
        assert_eq!(features.no2, 110.0);
        assert_eq!(features.co, 7.0);
        assert_eq!(features.o3, 0.0);
        assert_eq!(features.so2, 0.0);
        assert_eq!(features.temperature, 0.0);
        assert_eq!(features.humidity, 85.0);
        assert_eq!(features.tsp, 0.0);
    }

    #[test]
    fn from_json_accepts_pm25_aliases() {
        for key in ["PM2_5", "PM25", "PM2.5", "pm2_5", "pm25"] {
            let mut object = serde_json::Map::new();
            object.insert(key.to_string(), json!(33));
            let features = FeatureVector::from_json(&Value::Object(object));
            assert_eq!(features.pm2_5, 33.0, "alias {key}");
        }
    }

    #[test]
    fn from_json_non_object_is_zero() {
        assert_eq!(FeatureVector::from_json(&json!([1, 2, 3])), FeatureVector::default());
        assert_eq!(FeatureVector::from_json(&json!("PM2_5=10")), FeatureVector::default());
    }

    #[test]
    fn from_pairs_ignores_unknown_keys() {
        let features = FeatureVector::from_pairs([("pm25", "18"), ("co", "1.2"), ("foo", "9")]);
        assert_eq!(features.pm2_5, 18.0);
        assert_eq!(features.co, 1.2);
        assert_eq!(features.no2, 0.0);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let features = FeatureVector {
            pm2_5: 12.0,
            ..Default::default()
        };
        let value = serde_json::to_value(features).unwrap();
        assert_eq!(value["PM2_5"], json!(12.0));
        assert!(value.get("Temperature").is_some());
        assert!(value.get("pm2_5").is_none());
    }

    #[test]
    fn get_set_cover_every_feature() {
        let mut features = FeatureVector::default();
        for (i, feature) in Feature::ALL.iter().enumerate() {
            features.set(*feature, i as f64 + 1.0);
        }
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(features.get(*feature), i as f64 + 1.0);
            assert_eq!(Feature::from_key(feature.as_str()), Some(*feature));
        }
    }
}
