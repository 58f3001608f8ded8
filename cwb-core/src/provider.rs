use crate::{
    Config, ForecastRecord, ObservationRecord, error::WeatherError, provider::cwb::CwbProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod cwb;

/// Source of the two records the card is built from.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self) -> Result<ObservationRecord, WeatherError>;

    async fn weather_forecast(&self) -> Result<ForecastRecord, WeatherError>;
}

/// Construct the CWB provider from config, failing early without an API key.
pub fn provider_from_config(config: &Config) -> anyhow::Result<CwbProvider> {
    let api_key = config.require_api_key()?;
    CwbProvider::new(api_key.to_owned(), config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("No CWB API key configured"));
    }

    #[test]
    fn provider_from_config_works_when_key_set() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());

        assert!(provider_from_config(&cfg).is_ok());
    }

    #[test]
    fn provider_from_config_rejects_bad_base_url() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.base_url = "not a url".to_string();

        let err = provider_from_config(&cfg).unwrap_err();
        assert!(err.to_string().contains("invalid base URL"));
    }
}
