pub mod openweathermap;
pub mod waqi;

pub use openweathermap::OpenWeatherMapClient;
pub use waqi::WaqiClient;

use crate::config::HttpConfig;
use crate::error::{AirWatchError, Result};
use std::time::Duration;

/// Builds a client with the configured request timeout.
pub(crate) fn build_client(http: &HttpConfig) -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(http.timeout_secs))
        .build()?)
}

/// GET with up to `max_retries` retries on transport errors and 5xx responses.
/// The wait grows linearly: `retry_backoff_ms * attempt`. Client errors are not retried.
pub(crate) async fn get_with_retry(
    client: &reqwest::Client,
    url: &str,
    http: &HttpConfig,
    provider: &str,
) -> Result<reqwest::Response> {
    let mut attempt = 0u32;
    loop {
        let outcome = client.get(url).send().await;

        let retryable = match &outcome {
            Ok(resp) => resp.status().is_server_error(),
            Err(_) => true,
        };

        if !retryable || attempt >= http.max_retries {
            return match outcome {
                Ok(resp) if resp.status().is_success() => Ok(resp),
                Ok(resp) => {
                    let status = resp.status();
                    let body = resp.text().await.unwrap_or_default();
                    Err(AirWatchError::DataSourceUnavailable(format!(
                        "{} returned {}: {}",
                        provider, status, body
                    )))
                }
                Err(e) => Err(AirWatchError::DataSourceUnavailable(format!(
                    "{}: {}",
                    provider,
                    e.without_url()
                ))),
            };
        }

        attempt += 1;
        let wait = Duration::from_millis(http.retry_backoff_ms.saturating_mul(attempt as u64));
        tracing::debug!(provider, attempt, ?wait, "Retrying request");
        tokio::time::sleep(wait).await;
    }
}

/// Decode a JSON body. The request URL carries credentials, so it is stripped
/// from the error.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    provider: &str,
) -> Result<T> {
    response.json().await.map_err(|e| {
        AirWatchError::DataSourceUnavailable(format!(
            "Failed to parse {} response: {}",
            provider,
            e.without_url()
        ))
    })
}
