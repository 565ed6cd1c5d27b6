//! Directions backend client over OpenRouteService.

use std::time::Duration;

use async_trait::async_trait;
use planeco_core::metrics::total_duration;
use planeco_core::{
    BackendProfile, DurationProvider, ProviderError, RouteGeometryProvider, RouteSummary, Waypoint,
};
use reqwest::Client;
use reqwest::header::AUTHORIZATION;

use super::config::OrsConfig;
use super::http::{
    ProviderBuildError, build_client, convert_reqwest_error, normalise_base_url, seconds,
};
use super::ors::{DirectionsFeature, DirectionsRequest, DirectionsResponse, ErrorResponse};

/// OpenRouteService client serving route geometry and leg durations.
#[derive(Clone)]
pub struct OrsClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl std::fmt::Debug for OrsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrsClient")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl OrsClient {
    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the HTTP client fails to
    /// build.
    pub fn with_config(config: OrsConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.timeout)?,
            base_url: normalise_base_url(&config.base_url)?,
            api_key: config.api_key,
            timeout: config.timeout,
        })
    }

    /// `{base}/v2/directions/{profile}/geojson`
    fn directions_url(&self, profile: BackendProfile) -> String {
        format!("{}/v2/directions/{profile}/geojson", self.base_url)
    }

    /// POST the waypoints and return the first route feature.
    async fn directions(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<DirectionsFeature, ProviderError> {
        if waypoints.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let url = self.directions_url(profile);
        log::debug!("requesting {url} for {} waypoints", waypoints.len());

        let body = DirectionsRequest {
            coordinates: waypoints.iter().map(|w| [w.lon(), w.lat()]).collect(),
        };
        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, &url, self.timeout))?;

        let status = response.status();
        if !status.is_success() {
            // The error body explains quota and routability failures.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorResponse>(&text)
                .map_or(text, |body| body.error.describe());
            return Err(ProviderError::HttpError {
                url,
                status: status.as_u16(),
                message,
            });
        }

        let parsed: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| ProviderError::ParseError {
                    message: err.to_string(),
                })?;

        parsed
            .features
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::ParseError {
                message: "directions response contained no features".to_owned(),
            })
    }
}

/// Summarise a route feature.
///
/// Distance prefers the summary and falls back to the summed segments;
/// duration prefers the summed segment durations and falls back to the
/// summary when no segment carries one.
fn convert_feature(feature: DirectionsFeature) -> Result<RouteSummary, ProviderError> {
    let properties = feature.properties;
    let summary = properties.summary.unwrap_or_default();

    let distance_meters = summary.distance.unwrap_or_else(|| {
        properties
            .segments
            .iter()
            .filter_map(|segment| segment.distance)
            .sum()
    });

    let legs = leg_durations(&properties.segments)?;
    let duration = if legs.is_empty() {
        seconds(summary.duration.unwrap_or_default())?
    } else {
        total_duration(&legs).ok_or_else(|| ProviderError::ParseError {
            message: "segment durations overflow".to_owned(),
        })?
    };

    Ok(RouteSummary {
        distance_meters,
        duration,
        geometry: feature.geometry.into_line_string()?,
    })
}

/// Per-segment durations; empty when no segment reports one.
fn leg_durations(segments: &[super::ors::Segment]) -> Result<Vec<Duration>, ProviderError> {
    if segments.iter().all(|segment| segment.duration.is_none()) {
        return Ok(Vec::new());
    }
    segments
        .iter()
        .map(|segment| seconds(segment.duration.unwrap_or_default()))
        .collect()
}

#[async_trait]
impl RouteGeometryProvider for OrsClient {
    async fn route(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<RouteSummary, ProviderError> {
        convert_feature(self.directions(waypoints, profile).await?)
    }
}

#[async_trait]
impl DurationProvider for OrsClient {
    async fn leg_durations(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<Vec<Duration>, ProviderError> {
        let feature = self.directions(waypoints, profile).await?;
        leg_durations(&feature.properties.segments)
    }
}
