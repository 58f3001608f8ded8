//! Display state of the weather card and the reducer that folds fetch
//! outcomes into it.

use serde::{Deserialize, Serialize};

use crate::{
    format::round_decimal,
    model::{ForecastRecord, ObservationRecord},
};

/// Which of the two fetches an update came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchKind {
    Observation,
    Forecast,
}

impl std::fmt::Display for FetchKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            FetchKind::Observation => "observation",
            FetchKind::Forecast => "forecast",
        })
    }
}

/// Everything the card shows.
///
/// Observation fields and forecast fields are disjoint; each fetch only ever
/// replaces its own subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayState {
    pub location_name: String,
    pub temperature: Option<String>,
    pub wind_speed: Option<String>,
    pub observation_time: Option<String>,

    pub description: Option<String>,
    pub rain_possibility: Option<String>,
    pub sky_condition: Option<String>,
    pub weather_code: Option<String>,

    pub is_loading: bool,
    pub last_error: Option<String>,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            location_name: String::new(),
            temperature: None,
            wind_speed: None,
            observation_time: None,
            description: None,
            rain_possibility: None,
            sky_condition: None,
            weather_code: None,
            is_loading: true,
            last_error: None,
        }
    }
}

impl DisplayState {
    /// Temperature as shown on the card; `None` when missing or non-numeric.
    pub fn rounded_temperature(&self) -> Option<i64> {
        self.temperature.as_deref().and_then(round_decimal)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    RefreshStarted,
    Observation(ObservationRecord),
    Forecast(ForecastRecord),
    FetchFailed {
        kind: FetchKind,
        message: String,
    },
}

/// Apply one update to the previous state and return the next full state.
pub fn reduce(prev: DisplayState, update: StateUpdate) -> DisplayState {
    match update {
        StateUpdate::RefreshStarted => DisplayState {
            is_loading: true,
            last_error: None,
            ..prev
        },
        StateUpdate::Observation(obs) => DisplayState {
            location_name: obs.location_name,
            temperature: obs.temperature,
            wind_speed: obs.wind_speed,
            observation_time: Some(obs.observation_time),
            is_loading: false,
            ..prev
        },
        StateUpdate::Forecast(fc) => DisplayState {
            description: fc.description,
            rain_possibility: fc.rain_possibility,
            sky_condition: fc.sky_condition,
            weather_code: fc.weather_code,
            ..prev
        },
        StateUpdate::FetchFailed { kind, message } => {
            // Errors are cleared on RefreshStarted, so any existing one
            // belongs to the same refresh.
            let error = match &prev.last_error {
                Some(earlier) => format!("{earlier}; {kind}: {message}"),
                None => format!("{kind}: {message}"),
            };
            DisplayState {
                is_loading: prev.is_loading && kind != FetchKind::Observation,
                last_error: Some(error),
                ..prev
            }
        }
    }
}
