use crate::config::{HttpConfig, OpenWeatherMapConfig};
use crate::error::{AirWatchError, Result};
use crate::logic::aqi::scaled_aqi;
use crate::models::{AirQualityReading, DataSource};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";
const PROVIDER: &str = "OpenWeatherMap";

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
    http: HttpConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmAirPollutionResponse {
    list: Vec<OwmAirItem>,
}

#[derive(Debug, Deserialize)]
struct OwmAirItem {
    dt: i64,
    main: OwmAirMain,
    components: OwmComponents,
}

#[derive(Debug, Deserialize)]
struct OwmAirMain {
    aqi: u8,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OwmComponents {
    co: f64,
    no2: f64,
    o3: f64,
    so2: f64,
    pm2_5: f64,
    pm10: f64,
}

#[derive(Debug, Deserialize)]
struct OwmWeatherResponse {
    main: OwmWeatherMain,
}

#[derive(Debug, Deserialize)]
struct OwmWeatherMain {
    temp: Option<f64>,
    humidity: Option<f64>,
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig, http: HttpConfig) -> Result<Self> {
        Ok(Self {
            client: super::build_client(&http)?,
            config,
            http,
        })
    }

    /// Fetch current air pollution and weather for a coordinate.
    /// Both requests run concurrently; either failing fails the reading.
    pub async fn fetch_current(&self, latitude: f64, longitude: f64) -> Result<AirQualityReading> {
        let air_url = format!(
            "{}/air_pollution?lat={}&lon={}&appid={}",
            API_BASE_URL, latitude, longitude, self.config.api_key
        );
        let weather_url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, latitude, longitude, self.config.api_key
        );

        let (air, weather) = tokio::try_join!(
            self.get_json::<OwmAirPollutionResponse>(&air_url),
            self.get_json::<OwmWeatherResponse>(&weather_url),
        )?;

        tracing::debug!(latitude, longitude, "Fetched OpenWeatherMap data");
        convert_response(air, weather)
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, latitude: f64, longitude: f64) -> Result<bool> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            API_BASE_URL, latitude, longitude, self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                AirWatchError::DataSourceUnavailable(format!("{}: {}", PROVIDER, e.without_url()))
            })?;

        Ok(response.status().is_success())
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = super::get_with_retry(&self.client, url, &self.http, PROVIDER).await?;
        super::read_json(response, PROVIDER).await
    }
}

fn convert_response(
    air: OwmAirPollutionResponse,
    weather: OwmWeatherResponse,
) -> Result<AirQualityReading> {
    let item = air.list.into_iter().next().ok_or_else(|| {
        AirWatchError::InvalidData(format!("{} returned no air pollution data", PROVIDER))
    })?;

    let timestamp = DateTime::from_timestamp(item.dt, 0).unwrap_or_else(Utc::now);
    let c = item.components;

    Ok(AirQualityReading {
        timestamp,
        source: DataSource::OpenWeatherMap,
        aqi_index: item.main.aqi,
        aqi: scaled_aqi(item.main.aqi),
        pm2_5: c.pm2_5,
        pm10: c.pm10,
        no2: c.no2,
        o3: c.o3,
        so2: c.so2,
        co: c.co,
        temperature_c: weather.main.temp,
        humidity_percent: weather.main.humidity,
    })
}
