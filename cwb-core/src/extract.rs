//! Normalization of raw CWB locations into display records.
//!
//! Both extractors scan the heterogeneous `weatherElement` list and keep only
//! allow-listed names. Element order is irrelevant and unknown names are
//! dropped without looking at their values. A wanted element that is absent
//! or unreadable leaves its field `None`.

use std::collections::HashMap;

use crate::model::{
    ForecastLocation, ForecastRecord, ObservationLocation, ObservationRecord, Parameter,
};

pub const WIND_SPEED: &str = "WDSD";
pub const TEMPERATURE: &str = "TEMP";

pub const SKY_CONDITION: &str = "Wx";
pub const RAIN_POSSIBILITY: &str = "PoP";
pub const COMFORT_INDEX: &str = "CI";

const OBSERVATION_ELEMENTS: &[&str] = &[WIND_SPEED, TEMPERATURE];
const FORECAST_ELEMENTS: &[&str] = &[SKY_CONDITION, RAIN_POSSIBILITY, COMFORT_INDEX];

/// Current-conditions location -> [`ObservationRecord`].
pub fn extract_observation(location: &ObservationLocation) -> ObservationRecord {
    let mut elements = location.weather_element.iter().fold(
        HashMap::<&str, String>::new(),
        |mut wanted, el| {
            let name = el.element_name.as_str();
            if OBSERVATION_ELEMENTS.contains(&name) {
                if let Some(value) = el.value_text() {
                    wanted.insert(name, value);
                }
            }
            wanted
        },
    );

    ObservationRecord {
        location_name: location.location_name.clone(),
        wind_speed: elements.remove(WIND_SPEED),
        temperature: elements.remove(TEMPERATURE),
        observation_time: location.time.obs_time.clone(),
    }
}

/// Forecast location -> [`ForecastRecord`], reading the first forecast period
/// of each wanted element.
pub fn extract_forecast(location: &ForecastLocation) -> ForecastRecord {
    let mut elements = location.weather_element.iter().fold(
        HashMap::<&str, Parameter>::new(),
        |mut wanted, el| {
            let name = el.element_name.as_str();
            if FORECAST_ELEMENTS.contains(&name) {
                if let Some(period) = el.first_period() {
                    wanted.insert(name, period.parameter);
                }
            }
            wanted
        },
    );

    let sky = elements.remove(SKY_CONDITION);

    ForecastRecord {
        description: elements.remove(COMFORT_INDEX).map(|p| p.parameter_name),
        rain_possibility: elements.remove(RAIN_POSSIBILITY).map(|p| p.parameter_name),
        sky_condition: sky.as_ref().map(|p| p.parameter_name.clone()),
        weather_code: sky.and_then(|p| p.parameter_value),
    }
}
