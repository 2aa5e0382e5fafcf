use crate::models::AqiLevel;

/// Display-only categorization of a composite AQI number. Kept apart from the
/// pollutant classifier, which works on raw concentrations.
pub fn aqi_level(scaled_aqi: f64) -> AqiLevel {
    if scaled_aqi.is_nan() || scaled_aqi <= 50.0 {
        AqiLevel::Good
    } else if scaled_aqi <= 100.0 {
        AqiLevel::Moderate
    } else if scaled_aqi <= 150.0 {
        AqiLevel::UnhealthyForSensitiveGroups
    } else if scaled_aqi <= 200.0 {
        AqiLevel::Unhealthy
    } else {
        AqiLevel::Hazardous
    }
}

/// Projects the OpenWeatherMap 1..5 index onto the display scale.
pub fn scaled_aqi(owm_index: u8) -> f64 {
    f64::from(owm_index) * 50.0
}
