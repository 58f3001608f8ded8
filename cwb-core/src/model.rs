use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope shared by both CWB datastore endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<L> {
    pub records: Records<L>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Records<L> {
    pub location: Vec<L>,
}

/// One station entry of the current-observation dataset (`O-A0003-001`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationLocation {
    pub location_name: String,
    pub time: ObservationTime,
    #[serde(default)]
    pub weather_element: Vec<ObservationElement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationTime {
    pub obs_time: String,
}

/// Elements vary wildly in shape between stations, so the value is kept raw
/// and only interpreted for the names the card actually reads.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationElement {
    #[serde(default)]
    pub element_name: String,
    #[serde(default)]
    pub element_value: Value,
}

impl ObservationElement {
    /// Textual form of a string or numeric value; `None` for anything else.
    pub fn value_text(&self) -> Option<String> {
        match &self.element_value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// One county entry of the 36-hour forecast dataset (`F-C0032-001`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastLocation {
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub weather_element: Vec<ForecastElement>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastElement {
    #[serde(default)]
    pub element_name: String,
    /// Raw `time` list; see [`ForecastElement::first_period`].
    #[serde(default)]
    pub time: Value,
}

impl ForecastElement {
    /// The first forecast period, if it has the `parameter` shape.
    pub fn first_period(&self) -> Option<ForecastPeriod> {
        let first = self.time.as_array()?.first()?;
        ForecastPeriod::deserialize(first).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    pub parameter: Parameter,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub parameter_name: String,
    #[serde(default)]
    pub parameter_value: Option<String>,
    #[serde(default)]
    pub parameter_unit: Option<String>,
}

/// Normalized current conditions for one station.
///
/// Numeric fields keep the string-encoded decimals the API delivered; a field
/// is `None` when the station did not report it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub location_name: String,
    pub wind_speed: Option<String>,
    pub temperature: Option<String>,
    pub observation_time: String,
}

/// Normalized forecast for the first forecast period.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastRecord {
    /// Comfort index (`CI`) description, e.g. "舒適".
    pub description: Option<String>,
    /// Probability of precipitation (`PoP`) in percent.
    pub rain_possibility: Option<String>,
    /// Sky condition (`Wx`) text, e.g. "多雲".
    pub sky_condition: Option<String>,
    /// Numeric `Wx` code used to pick an icon.
    pub weather_code: Option<String>,
}
