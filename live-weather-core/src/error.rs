use reqwest::StatusCode;
use thiserror::Error;

/// Reasons a fetch cycle can fail. Any single city failing fails the cycle.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {city} failed: {source}")]
    Network {
        city: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {city} timed out")]
    Timeout { city: String },

    #[error("request for {city} failed with status {status}: {body}")]
    Status { city: String, status: StatusCode, body: String },

    #[error("malformed response for {city}: {source}")]
    Parse {
        city: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("no cities configured")]
    EmptyCityList,

    #[error("fetch task failed: {0}")]
    Task(String),
}

impl FetchError {
    pub(crate) fn network(city: &str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FetchError::Timeout { city: city.to_string() }
        } else {
            FetchError::Network { city: city.to_string(), source }
        }
    }

    /// The city whose request failed, when the failure is tied to one.
    pub fn city(&self) -> Option<&str> {
        match self {
            FetchError::Network { city, .. }
            | FetchError::Timeout { city }
            | FetchError::Status { city, .. }
            | FetchError::Parse { city, .. } => Some(city),
            FetchError::EmptyCityList | FetchError::Task(_) => None,
        }
    }

    /// Message shown in place of the dashboard when nothing has loaded yet.
    pub fn user_message(&self) -> &'static str {
        "Failed to fetch weather data"
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
