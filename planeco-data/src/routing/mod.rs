//! HTTP clients for the two routing backend families.
//!
//! - [`OsrmClient`] is the matrix+shape backend. It implements
//!   [`DistanceMatrixProvider`](planeco_core::DistanceMatrixProvider) over
//!   the OSRM Table service and
//!   [`RouteGeometryProvider`](planeco_core::RouteGeometryProvider) over the
//!   Route service.
//! - [`OrsClient`] is the directions backend. It implements
//!   [`RouteGeometryProvider`](planeco_core::RouteGeometryProvider) and
//!   [`DurationProvider`](planeco_core::DurationProvider) over the
//!   OpenRouteService Directions API.
//!
//! Neither client retries. Failures surface as
//! [`ProviderError`](planeco_core::ProviderError) and the planning cycle
//! decides what to do with them.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use planeco_core::{BackendProfile, DistanceMatrixProvider, RouteGeometryProvider, Waypoint};
//! use planeco_data::routing::{OrsClient, OrsConfig, OsrmClient, OsrmConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let osrm = OsrmClient::with_config(
//!     OsrmConfig::new("http://localhost:5000").with_timeout(Duration::from_secs(10)),
//! )?;
//! let ors = OrsClient::with_config(OrsConfig::default().with_api_key("my-key"))?;
//!
//! let waypoints = vec![
//!     Waypoint::new("Depot", 51.5, -0.1)?,
//!     Waypoint::new("Client", 51.6, -0.2)?,
//! ];
//! let matrix = osrm.distance_matrix(&waypoints).await?;
//! let walk = ors.route(&waypoints, BackendProfile::FootWalking).await?;
//! println!("{} m by table, {} m on foot", matrix[0][1], walk.distance_meters);
//! # Ok(())
//! # }
//! ```

mod config;
mod geojson;
mod http;
mod ors;
mod ors_client;
mod osrm;
mod osrm_client;

pub use config::{
    DEFAULT_ORS_BASE_URL, DEFAULT_OSRM_BASE_URL, DEFAULT_USER_AGENT, OrsConfig, OsrmConfig,
};
pub use http::ProviderBuildError;
pub use ors_client::OrsClient;
pub use osrm_client::OsrmClient;
