use thiserror::Error;

/// Why a fetch produced no record.
///
/// A station that simply does not report a wanted element is not an error;
/// that shows up as a `None` field on the record instead.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("invalid base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("network error while fetching {endpoint}: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} request failed with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed {endpoint} response: {source}")]
    MalformedResponse {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{endpoint} response contained no location")]
    EmptyLocation { endpoint: &'static str },
}
