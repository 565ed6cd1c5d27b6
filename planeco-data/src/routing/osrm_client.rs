//! Matrix+shape backend client over OSRM's Table and Route services.

use std::time::Duration;

use async_trait::async_trait;
use planeco_core::{
    BackendProfile, DistanceMatrix, DistanceMatrixProvider, ProviderError,
    RouteGeometryProvider, RouteSummary, Waypoint,
};
use reqwest::Client;
use serde::de::DeserializeOwned;

use super::config::OsrmConfig;
use super::http::{
    ProviderBuildError, build_client, convert_reqwest_error, coordinate_path, normalise_base_url,
    seconds,
};
use super::osrm::{RouteResponse, TableResponse};

/// OSRM client serving distance matrices and route geometry.
///
/// The table is always requested under the generic `driving` profile; the
/// route profile comes from the caller.
#[derive(Debug, Clone)]
pub struct OsrmClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OsrmClient {
    /// Create a client for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the HTTP client fails to
    /// build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(OsrmConfig::new(base_url))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed or the HTTP client fails to
    /// build.
    pub fn with_config(config: OsrmConfig) -> Result<Self, ProviderBuildError> {
        Ok(Self {
            client: build_client(&config.user_agent, config.timeout)?,
            base_url: normalise_base_url(&config.base_url)?,
            timeout: config.timeout,
        })
    }

    /// `{base}/table/v1/driving/{coords}?annotations=distance`
    fn table_url(&self, waypoints: &[Waypoint]) -> String {
        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.base_url,
            BackendProfile::Driving,
            coordinate_path(waypoints)
        )
    }

    /// `{base}/route/v1/{profile}/{coords}?overview=full&geometries=geojson`
    fn route_url(&self, waypoints: &[Waypoint], profile: BackendProfile) -> String {
        format!(
            "{}/route/v1/{}/{}?overview=full&geometries=geojson",
            self.base_url,
            profile,
            coordinate_path(waypoints)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProviderError> {
        log::debug!("requesting {url}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(&err, url, self.timeout))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(&err, url, self.timeout))?;

        response
            .json()
            .await
            .map_err(|err| ProviderError::ParseError {
                message: err.to_string(),
            })
    }
}

/// Convert an OSRM table response into a square distance matrix.
///
/// `null`, negative and non-finite cells become `f64::INFINITY`.
fn convert_table(response: TableResponse, expected: usize) -> Result<DistanceMatrix, ProviderError> {
    if !response.is_ok() {
        return Err(ProviderError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let distances = response
        .distances
        .ok_or_else(|| ProviderError::ParseError {
            message: "OSRM response missing distances array".to_owned(),
        })?;

    if distances.len() != expected || distances.iter().any(|row| row.len() != expected) {
        return Err(ProviderError::ParseError {
            message: format!("OSRM distances are not a {expected}x{expected} matrix"),
        });
    }

    Ok(distances
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| {
                    cell.filter(|&v| v >= 0.0 && v.is_finite())
                        .unwrap_or(f64::INFINITY)
                })
                .collect()
        })
        .collect())
}

/// Convert the first OSRM route into a summary.
fn convert_route(response: RouteResponse) -> Result<RouteSummary, ProviderError> {
    if !response.is_ok() {
        return Err(ProviderError::ServiceError {
            code: response.code,
            message: response.message.unwrap_or_default(),
        });
    }

    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::ParseError {
            message: "OSRM response contained no routes".to_owned(),
        })?;

    Ok(RouteSummary {
        distance_meters: route.distance,
        duration: seconds(route.duration)?,
        geometry: route.geometry.into_line_string()?,
    })
}

#[async_trait]
impl DistanceMatrixProvider for OsrmClient {
    async fn distance_matrix(
        &self,
        waypoints: &[Waypoint],
    ) -> Result<DistanceMatrix, ProviderError> {
        if waypoints.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let url = self.table_url(waypoints);
        let response: TableResponse = self.get_json(&url).await?;
        convert_table(response, waypoints.len())
    }
}

#[async_trait]
impl RouteGeometryProvider for OsrmClient {
    async fn route(
        &self,
        waypoints: &[Waypoint],
        profile: BackendProfile,
    ) -> Result<RouteSummary, ProviderError> {
        if waypoints.is_empty() {
            return Err(ProviderError::EmptyInput);
        }
        let url = self.route_url(waypoints, profile);
        let response: RouteResponse = self.get_json(&url).await?;
        convert_route(response)
    }
}
