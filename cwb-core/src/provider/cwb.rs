use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::{
    Config,
    error::WeatherError,
    extract::{extract_forecast, extract_observation},
    model::{ApiResponse, ForecastLocation, ForecastRecord, ObservationLocation, ObservationRecord},
};

use super::WeatherProvider;

/// Automatic weather station observations.
pub const OBSERVATION_DATASET: &str = "O-A0003-001";
/// 36-hour county forecast.
pub const FORECAST_DATASET: &str = "F-C0032-001";

/// Client for the CWB open data datastore.
#[derive(Clone)]
pub struct CwbProvider {
    api_key: String,
    location_name: String,
    forecast_location: Option<String>,
    observation_url: Url,
    forecast_url: Url,
    http: Client,
}

impl std::fmt::Debug for CwbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CwbProvider")
            .field("api_key", &"<redacted>")
            .field("location_name", &self.location_name)
            .field("forecast_location", &self.forecast_location)
            .field("observation_url", &self.observation_url.as_str())
            .field("forecast_url", &self.forecast_url.as_str())
            .finish()
    }
}

impl CwbProvider {
    pub fn new(api_key: String, config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            location_name: config.location_name.clone(),
            forecast_location: config.forecast_location.clone(),
            observation_url: dataset_url(&config.base_url, OBSERVATION_DATASET)?,
            forecast_url: dataset_url(&config.base_url, FORECAST_DATASET)?,
            http,
        })
    }

    #[instrument(skip(self), fields(location = %self.location_name))]
    pub async fn fetch_current_weather(&self) -> Result<ObservationRecord, WeatherError> {
        let query = [
            ("Authorization", self.api_key.as_str()),
            ("format", "JSON"),
            ("locationName", self.location_name.as_str()),
        ];

        let location: ObservationLocation = self
            .fetch_first_location(OBSERVATION_DATASET, &self.observation_url, &query)
            .await?;

        Ok(extract_observation(&location))
    }

    #[instrument(skip(self), fields(location = ?self.forecast_location))]
    pub async fn fetch_weather_forecast(&self) -> Result<ForecastRecord, WeatherError> {
        let mut query = vec![("Authorization", self.api_key.as_str()), ("format", "JSON")];
        if let Some(county) = self.forecast_location.as_deref() {
            query.push(("locationName", county));
        }

        let location: ForecastLocation = self
            .fetch_first_location(FORECAST_DATASET, &self.forecast_url, &query)
            .await?;

        Ok(extract_forecast(&location))
    }

    /// GET a datastore endpoint and return the first entry of
    /// `records.location`.
    async fn fetch_first_location<L: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        url: &Url,
        query: &[(&str, &str)],
    ) -> Result<L, WeatherError> {
        let res = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WeatherError::Network { endpoint, source })?;

        if !status.is_success() {
            warn!(%status, "{endpoint} request rejected");
            return Err(WeatherError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: ApiResponse<L> = serde_json::from_str(&body)
            .map_err(|source| WeatherError::MalformedResponse { endpoint, source })?;

        let count = parsed.records.location.len();
        debug!(count, "{endpoint} returned locations");

        parsed
            .records
            .location
            .into_iter()
            .next()
            .ok_or(WeatherError::EmptyLocation { endpoint })
    }
}

#[async_trait]
impl WeatherProvider for CwbProvider {
    async fn current_weather(&self) -> Result<ObservationRecord, WeatherError> {
        self.fetch_current_weather().await
    }

    async fn weather_forecast(&self) -> Result<ForecastRecord, WeatherError> {
        self.fetch_weather_forecast().await
    }
}

fn dataset_url(base_url: &str, dataset: &str) -> Result<Url, WeatherError> {
    let raw = format!("{}/{}", base_url.trim_end_matches('/'), dataset);
    Url::parse(&raw).map_err(|source| WeatherError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_url_tolerates_trailing_slash() {
        let a = dataset_url("https://example.test/api/", OBSERVATION_DATASET)
            .expect("valid url");
        let b = dataset_url("https://example.test/api", OBSERVATION_DATASET)
            .expect("valid url");

        assert_eq!(a, b);
        assert_eq!(a.path(), "/api/O-A0003-001");
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "錯".repeat(300);
        let truncated = truncate_body(&body);

        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn debug_output_hides_api_key() {
        let provider = CwbProvider::new("CWB-SECRET".into(), &Config::default())
            .expect("provider builds");
        assert!(!format!("{provider:?}").contains("CWB-SECRET"));
    }
}
