//! Plumbing shared by the HTTP clients.

use std::time::Duration;

use planeco_core::{ProviderError, Waypoint};
use reqwest::Client;
use thiserror::Error;

/// Errors raised while constructing a routing client.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The configured base URL could not be parsed.
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        /// Offending URL.
        url: String,
        /// Parse failure.
        #[source]
        source: url::ParseError,
    },
}

/// Validate `base_url` and return it without a trailing slash.
pub(super) fn normalise_base_url(base_url: &str) -> Result<String, ProviderBuildError> {
    url::Url::parse(base_url).map_err(|source| ProviderBuildError::InvalidBaseUrl {
        url: base_url.to_owned(),
        source,
    })?;
    Ok(base_url.trim_end_matches('/').to_owned())
}

pub(super) fn build_client(user_agent: &str, timeout: Duration) -> Result<Client, ProviderBuildError> {
    Client::builder()
        .user_agent(user_agent)
        .connect_timeout(timeout)
        .timeout(timeout)
        .build()
        .map_err(ProviderBuildError::HttpClient)
}

/// Semicolon-separated `lon,lat` pairs, as OSRM expects in its path.
pub(super) fn coordinate_path(waypoints: &[Waypoint]) -> String {
    waypoints
        .iter()
        .map(|waypoint| format!("{},{}", waypoint.lon(), waypoint.lat()))
        .collect::<Vec<_>>()
        .join(";")
}

/// Map a reqwest failure onto the provider error taxonomy.
pub(super) fn convert_reqwest_error(
    error: &reqwest::Error,
    url: &str,
    timeout: Duration,
) -> ProviderError {
    if error.is_timeout() {
        return ProviderError::Timeout {
            url: url.to_owned(),
            timeout_secs: timeout.as_secs(),
        };
    }

    if let Some(status) = error.status() {
        return ProviderError::HttpError {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    if error.is_decode() {
        return ProviderError::ParseError {
            message: error.to_string(),
        };
    }

    ProviderError::NetworkError {
        url: url.to_owned(),
        message: error.to_string(),
    }
}

/// Seconds reported by a backend, or a parse error for negative or
/// non-finite values.
pub(super) fn seconds(value: f64) -> Result<Duration, ProviderError> {
    Duration::try_from_secs_f64(value).map_err(|err| ProviderError::ParseError {
        message: format!("invalid duration {value}: {err}"),
    })
}
