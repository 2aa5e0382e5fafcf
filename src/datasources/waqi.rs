use crate::config::{HttpConfig, WaqiConfig};
use crate::error::{AirWatchError, Result};
use crate::logic::aqi::aqi_level;
use crate::models::station::WAQI_CITIES;
use crate::models::{StationReading, WaqiCity};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::task::JoinSet;

const API_BASE_URL: &str = "https://api.waqi.info";
const PROVIDER: &str = "WAQI";

#[derive(Clone)]
pub struct WaqiClient {
    client: reqwest::Client,
    config: WaqiConfig,
    http: HttpConfig,
}

// When status is not "ok", `data` carries an error message string.
#[derive(Debug, Deserialize)]
struct WaqiEnvelope {
    status: String,
    #[serde(default)]
    data: Value,
}

#[derive(Debug, Deserialize)]
struct WaqiFeed {
    aqi: Value,
    #[serde(default)]
    city: Option<WaqiFeedCity>,
    #[serde(default)]
    dominentpol: Option<String>,
    #[serde(default)]
    iaqi: HashMap<String, WaqiValue>,
    #[serde(default)]
    time: Option<WaqiTime>,
}

#[derive(Debug, Deserialize)]
struct WaqiFeedCity {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    geo: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct WaqiValue {
    v: f64,
}

#[derive(Debug, Deserialize)]
struct WaqiTime {
    s: Option<String>,
}

impl WaqiClient {
    pub fn new(config: WaqiConfig, http: HttpConfig) -> Result<Self> {
        Ok(Self {
            client: super::build_client(&http)?,
            config,
            http,
        })
    }

    /// Fetch one feed by WAQI id (city slug or `@station-idx`).
    pub async fn fetch_feed(&self, feed_id: &str) -> Result<StationReading> {
        self.fetch(feed_id, None).await
    }

    /// Fetch every major city concurrently. Cities that fail are dropped
    /// with a warning; the rest keep catalog order.
    pub async fn fetch_cities(&self) -> Vec<StationReading> {
        self.fetch_many(WAQI_CITIES).await
    }

    pub async fn fetch_many(&self, cities: &'static [WaqiCity]) -> Vec<StationReading> {
        let mut tasks = JoinSet::new();
        for (idx, city) in cities.iter().enumerate() {
            let client = self.clone();
            tasks.spawn(async move { (idx, client.fetch_city(city).await) });
        }

        let mut readings = Vec::with_capacity(cities.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, Ok(reading))) => readings.push((idx, reading)),
                Ok((idx, Err(e))) => {
                    tracing::warn!(city = cities[idx].name, "Failed to fetch WAQI feed: {}", e);
                }
                Err(e) => tracing::warn!("WAQI fetch task failed: {}", e),
            }
        }

        readings.sort_by_key(|(idx, _)| *idx);
        readings.into_iter().map(|(_, r)| r).collect()
    }

    async fn fetch_city(&self, city: &'static WaqiCity) -> Result<StationReading> {
        self.fetch(city.feed_id, Some(city)).await
    }

    async fn fetch(&self, feed_id: &str, city: Option<&WaqiCity>) -> Result<StationReading> {
        let url = format!(
            "{}/feed/{}/?token={}",
            API_BASE_URL, feed_id, self.config.token
        );
        let response = super::get_with_retry(&self.client, &url, &self.http, PROVIDER).await?;
        let envelope: WaqiEnvelope = super::read_json(response, PROVIDER).await?;

        convert_feed(feed_id, envelope, city)
    }

    /// Test connection to the WAQI API
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/feed/here/?token={}", API_BASE_URL, self.config.token);
        let response = self.client.get(&url).send().await.map_err(|e| {
            AirWatchError::DataSourceUnavailable(format!("{}: {}", PROVIDER, e.without_url()))
        })?;

        if !response.status().is_success() {
            return Ok(false);
        }
        let envelope: WaqiEnvelope = super::read_json(response, PROVIDER).await?;
        Ok(envelope.status == "ok")
    }
}

fn convert_feed(
    feed_id: &str,
    envelope: WaqiEnvelope,
    city: Option<&WaqiCity>,
) -> Result<StationReading> {
    if envelope.status != "ok" {
        let message = envelope.data.as_str().unwrap_or("unknown error");
        return Err(AirWatchError::NotFound(format!(
            "{} feed '{}': {}",
            PROVIDER, feed_id, message
        )));
    }

    let feed: WaqiFeed = serde_json::from_value(envelope.data)?;

    // Stations without a current reading report "-" instead of a number.
    let aqi = feed.aqi.as_f64().ok_or_else(|| {
        AirWatchError::InvalidData(format!("{} feed '{}' has no current AQI", PROVIDER, feed_id))
    })?;

    let iaqi = |key: &str| feed.iaqi.get(key).map(|v| v.v);
    let geo = feed.city.as_ref().map(|c| c.geo.as_slice()).unwrap_or(&[]);

    let (name, latitude, longitude) = match city {
        Some(c) => (c.name.to_string(), c.latitude, c.longitude),
        None => (
            feed.city
                .as_ref()
                .and_then(|c| c.name.clone())
                .unwrap_or_else(|| feed_id.to_string()),
            geo.first().copied().unwrap_or(0.0),
            geo.get(1).copied().unwrap_or(0.0),
        ),
    };

    Ok(StationReading {
        id: feed_id.to_string(),
        name,
        latitude,
        longitude,
        aqi,
        level: aqi_level(aqi),
        pm25: iaqi("pm25"),
        pm10: iaqi("pm10"),
        o3: iaqi("o3"),
        no2: iaqi("no2"),
        so2: iaqi("so2"),
        co: iaqi("co"),
        temperature_c: iaqi("t"),
        humidity_percent: iaqi("h"),
        pressure: iaqi("p"),
        wind: iaqi("w"),
        dominant_pollutant: feed.dominentpol.filter(|p| !p.is_empty()),
        observed_at: feed.time.and_then(|t| t.s),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AqiLevel;

    const FEED_JSON: &str = r#"{
        "status": "ok",
        "data": {
            "aqi": 158,
            "idx": 1583,
            "city": {"geo": [21.0285, 105.8542], "name": "Hanoi, Vietnam"},
            "dominentpol": "pm25",
            "iaqi": {
                "pm25": {"v": 158}, "pm10": {"v": 61}, "no2": {"v": 12.4},
                "t": {"v": 29.5}, "h": {"v": 84}, "p": {"v": 1011}, "w": {"v": 1.5}
            },
            "time": {"s": "2026-10-19 08:00:00", "tz": "+07:00"}
        }
    }"#;

    fn envelope(json: &str) -> WaqiEnvelope {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn converts_ok_feed_with_catalog_city() {
        let city = &WAQI_CITIES[0];
        let reading = convert_feed(city.feed_id, envelope(FEED_JSON), Some(city)).unwrap();

        assert_eq!(reading.name, city.name);
        assert_eq!(reading.aqi, 158.0);
        assert_eq!(reading.level, AqiLevel::Unhealthy);
        assert_eq!(reading.pm25, Some(158.0));
        assert_eq!(reading.so2, None);
        assert_eq!(reading.temperature_c, Some(29.5));
        assert_eq!(reading.humidity_percent, Some(84.0));
        assert_eq!(reading.dominant_pollutant.as_deref(), Some("pm25"));
        assert_eq!(reading.observed_at.as_deref(), Some("2026-10-19 08:00:00"));
    }

    #[test]
    fn uncatalogued_feed_uses_feed_city() {
        let reading = convert_feed("@1583", envelope(FEED_JSON), None).unwrap();
        assert_eq!(reading.name, "Hanoi, Vietnam");
        assert_eq!(reading.latitude, 21.0285);
        assert_eq!(reading.longitude, 105.8542);
    }

    #[test]
    fn error_status_is_not_found() {
        let res = convert_feed(
            "nowhere",
            envelope(r#"{"status": "error", "data": "Unknown station"}"#),
            None,
        );
        match res {
            Err(AirWatchError::NotFound(msg)) => assert!(msg.contains("Unknown station")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn dash_aqi_is_invalid() {
        let res = convert_feed(
            "hanoi",
            envelope(r#"{"status": "ok", "data": {"aqi": "-", "iaqi": {}}}"#),
            None,
        );
        assert!(matches!(res, Err(AirWatchError::InvalidData(_))));
    }

    #[test]
    fn very_unhealthy_range_reads_as_hazardous() {
        let reading = convert_feed(
            "hanoi",
            envelope(r#"{"status": "ok", "data": {"aqi": 250}}"#),
            None,
        )
        .unwrap();
        assert_eq!(reading.level, AqiLevel::Hazardous);
        assert_eq!(reading.level.to_category(), crate::models::Category::Hazardous);
    }
}
