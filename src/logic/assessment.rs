use crate::config::Config;
use crate::datasources::{OpenWeatherMapClient, WaqiClient};
use crate::db::Repository;
use crate::error::{AirWatchError, Result};
use crate::logic::classifier::{Model, RuleBasedClassifier};
use crate::logic::rules::RecommendationEngine;
use crate::models::{
    AirQualityReading, AmbientConditions, AqiLevel, Category, ClassificationResult,
    FeatureVector, Location, PredictionRecord, Recommendation, StationReading, UserGroup,
};
use serde::Serialize;

/// Everything produced for one location at one point in time.
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub location: Location,
    pub reading: AirQualityReading,
    pub aqi_level: AqiLevel,
    pub classification: ClassificationResult,
    pub user_group: UserGroup,
    pub recommendations: Vec<Recommendation>,
}

impl Assessment {
    pub fn to_record(&self) -> PredictionRecord {
        PredictionRecord::new(
            self.location.name.clone(),
            self.classification.category,
            self.classification.confidence,
            self.reading.aqi,
            self.reading.pm2_5,
            self.reading.pm10,
        )
    }
}

/// A WAQI city reading with advice keyed on its AQI level.
#[derive(Debug, Clone, Serialize)]
pub struct CityOverview {
    pub reading: StationReading,
    pub category: Category,
    pub recommendations: Vec<Recommendation>,
}

pub struct AssessmentService {
    model: Box<dyn Model>,
    engine: RecommendationEngine,
    history: Box<dyn Repository<PredictionRecord>>,
    openweathermap_client: Option<OpenWeatherMapClient>,
    waqi_client: Option<WaqiClient>,
}

impl AssessmentService {
    pub fn new(config: &Config, history: Box<dyn Repository<PredictionRecord>>) -> Result<Self> {
        let openweathermap_client = match config.active_openweathermap() {
            Some(c) => {
                tracing::info!("OpenWeatherMap client configured for live readings");
                Some(OpenWeatherMapClient::new(c.clone(), config.http.clone())?)
            }
            None => {
                tracing::info!("OpenWeatherMap not configured - live assessments unavailable");
                None
            }
        };

        let waqi_client = match config.active_waqi() {
            Some(c) => Some(WaqiClient::new(c.clone(), config.http.clone())?),
            None => {
                tracing::info!("WAQI not configured - city overview unavailable");
                None
            }
        };

        Ok(Self {
            model: Box::new(RuleBasedClassifier),
            engine: RecommendationEngine::new(),
            history,
            openweathermap_client,
            waqi_client,
        })
    }

    /// Service with no network sources; only local operations succeed.
    pub fn offline(history: Box<dyn Repository<PredictionRecord>>) -> Self {
        Self {
            model: Box::new(RuleBasedClassifier),
            engine: RecommendationEngine::new(),
            history,
            openweathermap_client: None,
            waqi_client: None,
        }
    }

    pub fn model(&self) -> &dyn Model {
        self.model.as_ref()
    }

    pub fn engine(&self) -> &RecommendationEngine {
        &self.engine
    }

    #[cfg(test)]
    pub fn history(&self) -> &dyn Repository<PredictionRecord> {
        self.history.as_ref()
    }

    pub fn classify(&self, features: &FeatureVector) -> ClassificationResult {
        self.model.predict(features)
    }

    pub fn recommend(
        &self,
        category_label: &str,
        group: UserGroup,
        ambient: &AmbientConditions,
    ) -> Vec<Recommendation> {
        self.engine.generate(category_label, group, ambient)
    }

    /// Fetch a live reading for the location and evaluate it.
    pub async fn assess(
        &self,
        location: Location,
        group: UserGroup,
        save: bool,
    ) -> Result<Assessment> {
        let client = self.openweathermap_client.as_ref().ok_or_else(|| {
            AirWatchError::DataSourceUnavailable("OpenWeatherMap not configured".into())
        })?;

        let reading = client
            .fetch_current(location.latitude, location.longitude)
            .await?;

        let assessment = self.evaluate(location, reading, group);
        if save {
            self.record(&assessment);
        }
        Ok(assessment)
    }

    /// Classify a reading and build the advice for it.
    pub fn evaluate(
        &self,
        location: Location,
        reading: AirQualityReading,
        group: UserGroup,
    ) -> Assessment {
        let classification = self.model.predict(&reading.to_features());
        let recommendations =
            self.engine
                .generate_for(classification.category, group, &reading.ambient());

        tracing::debug!(
            location = %location.name,
            category = %classification.category,
            recommendations = recommendations.len(),
            "Assessment complete"
        );

        Assessment {
            aqi_level: reading.level(),
            location,
            reading,
            classification,
            user_group: group,
            recommendations,
        }
    }

    /// Save failures are logged; the assessment itself still stands.
    pub fn record(&self, assessment: &Assessment) -> Option<PredictionRecord> {
        let record = assessment.to_record();
        match self.history.put(record.clone()) {
            Ok(()) => Some(record),
            Err(e) => {
                tracing::warn!("Failed to save prediction history: {}", e);
                None
            }
        }
    }

    pub async fn major_cities(&self) -> Result<Vec<StationReading>> {
        let client = self
            .waqi_client
            .as_ref()
            .ok_or_else(|| AirWatchError::DataSourceUnavailable("WAQI not configured".into()))?;
        Ok(client.fetch_cities().await)
    }

    pub async fn city_feed(&self, feed_id: &str) -> Result<StationReading> {
        let client = self
            .waqi_client
            .as_ref()
            .ok_or_else(|| AirWatchError::DataSourceUnavailable("WAQI not configured".into()))?;
        client.fetch_feed(feed_id).await
    }

    /// Advice for a station that has no classifier prediction. The display
    /// level stands in for the category.
    pub fn advise_city(&self, reading: StationReading, group: UserGroup) -> CityOverview {
        let category = reading.level.to_category();
        let recommendations = self.engine.generate_for(category, group, &reading.ambient());
        CityOverview {
            reading,
            category,
            recommendations,
        }
    }

    pub async fn check_connections(&self, latitude: f64, longitude: f64) -> ConnectionStatus {
        let mut status = ConnectionStatus::default();

        if let Some(ref client) = self.openweathermap_client {
            status.openweathermap = client
                .test_connection(latitude, longitude)
                .await
                .unwrap_or(false);
        }

        if let Some(ref client) = self.waqi_client {
            status.waqi = client.test_connection().await.unwrap_or(false);
        }

        status.history = self.history.list().is_ok();

        status
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ConnectionStatus {
    pub openweathermap: bool,
    pub waqi: bool,
    pub history: bool,
}

impl ConnectionStatus {
    pub fn any_connected(&self) -> bool {
        self.openweathermap || self.waqi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{Database, InMemoryRepository};
    use crate::models::{DataSource, Priority};
    use chrono::Utc;

    fn reading(pm2_5: f64, temperature: Option<f64>, humidity: Option<f64>) -> AirQualityReading {
        AirQualityReading {
            timestamp: Utc::now(),
            source: DataSource::Manual,
            aqi_index: 4,
            aqi: 200.0,
            pm2_5,
            pm10: 90.0,
            no2: 40.0,
            o3: 20.0,
            so2: 10.0,
            co: 1.0,
            temperature_c: temperature,
            humidity_percent: humidity,
        }
    }

    fn service() -> AssessmentService {
        AssessmentService::offline(Box::new(InMemoryRepository::new()))
    }

    #[test]
    fn evaluate_classifies_and_recommends() {
        let svc = service();
        let assessment = svc.evaluate(
            Location::custom(21.0, 105.8),
            reading(160.0, Some(36.0), Some(85.0)),
            UserGroup::Sensitive,
        );

        assert_eq!(assessment.classification.category, Category::Hazardous);
        assert_eq!(assessment.aqi_level, AqiLevel::Unhealthy);
        // 5 base + heat + humidity
        assert_eq!(assessment.recommendations.len(), 7);
        assert_eq!(assessment.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn missing_weather_triggers_no_weather_rules() {
        let svc = service();
        let assessment = svc.evaluate(
            Location::custom(10.0, 106.0),
            reading(10.0, None, None),
            UserGroup::Normal,
        );
        // Temperature and humidity read as 0 for the classifier.
        assert_eq!(assessment.classification.features.temperature, 0.0);
        assert!(assessment
            .recommendations
            .iter()
            .all(|r| !r.id.ends_with("-warning")));
    }

    #[test]
    fn record_saves_to_history() {
        let svc = service();
        let assessment = svc.evaluate(
            Location::custom(16.0, 108.2),
            reading(30.0, Some(28.0), Some(70.0)),
            UserGroup::Normal,
        );

        let saved = svc.record(&assessment).unwrap();
        let stored = svc.history().list().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id, saved.id);
        assert_eq!(stored[0].category, assessment.classification.category);
        assert_eq!(stored[0].pm25, 30.0);
    }

    #[test]
    fn record_works_against_sqlite() {
        let svc = AssessmentService::offline(Box::new(Database::open_in_memory().unwrap()));
        let assessment = svc.evaluate(
            Location::custom(16.0, 108.2),
            reading(30.0, None, None),
            UserGroup::Children,
        );
        assert!(svc.record(&assessment).is_some());
        assert_eq!(svc.history().list().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn assess_without_source_is_unavailable() {
        let svc = service();
        let res = svc
            .assess(Location::custom(0.0, 0.0), UserGroup::Normal, true)
            .await;
        assert!(matches!(res, Err(AirWatchError::DataSourceUnavailable(_))));
        assert!(svc.history().list().unwrap().is_empty());
    }

    #[tokio::test]
    async fn offline_connections_report_history_only() {
        let svc = service();
        let status = svc.check_connections(0.0, 0.0).await;
        assert!(status.history);
        assert!(!status.any_connected());
    }

    fn station(aqi: f64, level: AqiLevel, temperature: Option<f64>) -> StationReading {
        StationReading {
            id: "hanoi".into(),
            name: "Hà Nội".into(),
            latitude: 21.0285,
            longitude: 105.8542,
            aqi,
            level,
            pm25: Some(aqi),
            pm10: None,
            o3: None,
            no2: None,
            so2: None,
            co: None,
            temperature_c: temperature,
            humidity_percent: None,
            pressure: None,
            wind: None,
            dominant_pollutant: Some("pm25".into()),
            observed_at: None,
        }
    }

    #[test]
    fn city_advice_follows_display_level() {
        let svc = service();
        let overview = svc.advise_city(
            station(120.0, AqiLevel::UnhealthyForSensitiveGroups, None),
            UserGroup::Sensitive,
        );
        assert_eq!(overview.category, Category::Unhealthy);
        assert_eq!(
            overview.recommendations,
            svc.engine().generate_for(
                Category::Unhealthy,
                UserGroup::Sensitive,
                &AmbientConditions::default()
            )
        );
    }

    #[test]
    fn city_advice_uses_station_weather() {
        let svc = service();
        let reading = station(30.0, AqiLevel::Good, Some(37.0));
        let overview = svc.advise_city(reading, UserGroup::Normal);
        assert_eq!(overview.category, Category::Good);
        assert_eq!(overview.recommendations[0].id, "heat-warning");
    }

    #[test]
    fn recommend_uses_label_fallback() {
        let svc = service();
        let recs = svc.recommend(
            "Very Unhealthy",
            UserGroup::Normal,
            &AmbientConditions::default(),
        );
        assert_eq!(
            recs,
            svc.engine()
                .generate_for(Category::Moderate, UserGroup::Normal, &AmbientConditions::default())
        );
    }
}
