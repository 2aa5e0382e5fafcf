use super::category::AqiLevel;
use super::features::FeatureVector;
use super::recommendation::AmbientConditions;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    OpenWeatherMap,
    Waqi,
    Manual,
}

impl DataSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataSource::OpenWeatherMap => "OpenWeatherMap",
            DataSource::Waqi => "WAQI",
            DataSource::Manual => "Manual",
        }
    }
}

impl std::fmt::Display for DataSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Current pollutant and weather readings for one coordinate.
/// Concentrations in µg/m³.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReading {
    pub timestamp: DateTime<Utc>,
    pub source: DataSource,
    /// Provider index, 1 (good) to 5 (very poor) for OpenWeatherMap.
    pub aqi_index: u8,
    /// Index projected onto the 0-250 display scale.
    pub aqi: f64,
    pub pm2_5: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
    pub so2: f64,
    pub co: f64,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
}

/// TSP is not reported by the providers; it is estimated from PM10.
pub const TSP_PER_PM10: f64 = 1.5;

impl AirQualityReading {
    pub fn level(&self) -> AqiLevel {
        crate::logic::aqi::aqi_level(self.aqi)
    }

    pub fn to_features(&self) -> FeatureVector {
        FeatureVector {
            tsp: self.pm10 * TSP_PER_PM10,
            pm2_5: self.pm2_5,
            o3: self.o3,
            co: self.co,
            no2: self.no2,
            so2: self.so2,
            temperature: self.temperature_c.unwrap_or(0.0),
            humidity: self.humidity_percent.unwrap_or(0.0),
        }
    }

    pub fn ambient(&self) -> AmbientConditions {
        AmbientConditions::new(self.temperature_c, self.humidity_percent)
    }
}

/// Live station data from the WAQI feed. Pollutant values are the feed's
/// individual sub-indices, not concentrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub aqi: f64,
    pub level: AqiLevel,
    pub pm25: Option<f64>,
    pub pm10: Option<f64>,
    pub o3: Option<f64>,
    pub no2: Option<f64>,
    pub so2: Option<f64>,
    pub co: Option<f64>,
    pub temperature_c: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub pressure: Option<f64>,
    pub wind: Option<f64>,
    pub dominant_pollutant: Option<String>,
    pub observed_at: Option<String>,
}

impl StationReading {
    pub fn ambient(&self) -> AmbientConditions {
        AmbientConditions::new(self.temperature_c, self.humidity_percent)
    }
}
