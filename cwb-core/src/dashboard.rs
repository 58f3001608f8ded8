use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{info, instrument, warn};

use crate::{
    provider::WeatherProvider,
    state::{DisplayState, FetchKind, StateUpdate, reduce},
};

/// Holds the card's state and drives the two fetches behind it.
#[derive(Debug)]
pub struct Dashboard<P> {
    provider: Arc<P>,
    state: DisplayState,
}

impl<P: WeatherProvider + 'static> Dashboard<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider: Arc::new(provider),
            state: DisplayState::default(),
        }
    }

    /// Fetch observation and forecast concurrently and fold each outcome
    /// into the state as soon as it lands. Used for both the initial load and
    /// manual refreshes.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self) -> &DisplayState {
        self.apply(StateUpdate::RefreshStarted);

        let (tx, mut rx) = mpsc::unbounded_channel();

        let provider = Arc::clone(&self.provider);
        let obs_tx = tx.clone();
        tokio::spawn(async move {
            let update = match provider.current_weather().await {
                Ok(record) => StateUpdate::Observation(record),
                Err(e) => failed(FetchKind::Observation, &e),
            };
            let _ = obs_tx.send(update);
        });

        let provider = Arc::clone(&self.provider);
        tokio::spawn(async move {
            let update = match provider.weather_forecast().await {
                Ok(record) => StateUpdate::Forecast(record),
                Err(e) => failed(FetchKind::Forecast, &e),
            };
            let _ = tx.send(update);
        });

        // Closes once both tasks have sent (or panicked and dropped their sender).
        while let Some(update) = rx.recv().await {
            self.apply(update);
        }

        if self.state.is_loading {
            warn!("observation fetch ended without an update");
            self.state.is_loading = false;
        }

        info!(
            location = %self.state.location_name,
            error = ?self.state.last_error,
            "refresh finished"
        );
        &self.state
    }

    fn apply(&mut self, update: StateUpdate) {
        self.state = reduce(std::mem::take(&mut self.state), update);
    }
}

fn failed(kind: FetchKind, err: &crate::WeatherError) -> StateUpdate {
    warn!(%kind, error = %err, "fetch failed");
    StateUpdate::FetchFailed {
        kind,
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ForecastRecord, ObservationRecord, WeatherError};
    use async_trait::async_trait;
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        time::Duration,
    };

    #[derive(Debug, Default)]
    struct FakeProvider {
        forecast_first: bool,
        fail_observation: bool,
        calls: AtomicUsize,
    }

    fn observation(n: usize) -> ObservationRecord {
        ObservationRecord {
            location_name: "臺北".into(),
            wind_speed: Some("3.50".into()),
            temperature: Some(format!("2{n}.0")),
            observation_time: "2022-12-12T14:00:00+08:00".into(),
        }
    }

    #[async_trait]
    impl WeatherProvider for FakeProvider {
        async fn current_weather(&self) -> Result<ObservationRecord, WeatherError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.forecast_first {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            if self.fail_observation {
                return Err(WeatherError::EmptyLocation {
                    endpoint: "O-A0003-001",
                });
            }
            Ok(observation(n))
        }

        async fn weather_forecast(&self) -> Result<ForecastRecord, WeatherError> {
            if !self.forecast_first {
                tokio::time::sleep(Duration::from_millis(20)).await;
            }
            Ok(ForecastRecord {
                description: Some("舒適".into()),
                rain_possibility: Some("48".into()),
                sky_condition: Some("多雲".into()),
                weather_code: Some("4".into()),
            })
        }
    }

    #[tokio::test]
    async fn refresh_merges_both_records() {
        let mut dash = Dashboard::new(FakeProvider::default());
        assert!(dash.state.is_loading);

        let state = dash.refresh().await;
        assert!(!state.is_loading);
        assert_eq!(state.location_name, "臺北");
        assert_eq!(state.temperature.as_deref(), Some("20.0"));
        assert_eq!(state.description.as_deref(), Some("舒適"));
        assert_eq!(state.rain_possibility.as_deref(), Some("48"));
        assert_eq!(state.last_error, None);
    }

    #[tokio::test]
    async fn completion_order_does_not_change_result() {
        let mut a = Dashboard::new(FakeProvider::default());
        let mut b = Dashboard::new(FakeProvider {
            forecast_first: true,
            ..Default::default()
        });

        assert_eq!(a.refresh().await, b.refresh().await);
    }

    #[tokio::test]
    async fn second_refresh_replaces_observation() {
        let mut dash = Dashboard::new(FakeProvider::default());
        dash.refresh().await;
        let state = dash.refresh().await;

        assert_eq!(state.temperature.as_deref(), Some("21.0"));
    }

    #[tokio::test]
    async fn failed_observation_keeps_forecast_and_reports_error() {
        let mut dash = Dashboard::new(FakeProvider {
            fail_observation: true,
            ..Default::default()
        });
        let state = dash.refresh().await;

        assert!(!state.is_loading);
        assert_eq!(state.temperature, None);
        assert_eq!(state.description.as_deref(), Some("舒適"));
        let err = state.last_error.as_deref().expect("error recorded");
        assert!(err.starts_with("observation:"));
    }
}
