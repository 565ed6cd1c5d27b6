//! Provider routing: which backend serves a travel mode, and in which
//! vocabulary.
//!
//! Motorised modes take their geometry from the matrix+shape backend and
//! refine the travel time with a secondary directions lookup. Bike and foot
//! take geometry and time from the directions backend directly.
//!
//! # Examples
//! ```
//! use planeco_core::{Backend, BackendProfile, VehicleId, select_backend};
//!
//! let selection = select_backend(VehicleId::Bike)?;
//! assert_eq!(selection.backend, Backend::Directions);
//! assert_eq!(selection.profile.as_str(), "cycling-regular");
//! assert_eq!(selection.duration_profile, None);
//! # Ok::<(), planeco_core::ValidationError>(())
//! ```

use std::fmt;

use crate::{ValidationError, VehicleId};

/// Backend families able to produce route geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Table + route service (OSRM style).
    MatrixShape,
    /// Directions service with per-leg segments (OpenRouteService style).
    Directions,
}

/// Backend-specific routing profile tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendProfile {
    /// Generic motorised profile of the matrix+shape backend.
    Driving,
    /// Car profile of the directions backend.
    DrivingCar,
    /// Bicycle profile of the directions backend.
    CyclingRegular,
    /// Pedestrian profile of the directions backend.
    FootWalking,
}

impl BackendProfile {
    /// Token as it appears in backend URLs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Driving => "driving",
            Self::DrivingCar => "driving-car",
            Self::CyclingRegular => "cycling-regular",
            Self::FootWalking => "foot-walking",
        }
    }
}

impl fmt::Display for BackendProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of routing a travel mode to a backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendSelection {
    /// Backend that produces geometry and distance.
    pub backend: Backend,
    /// Profile token understood by [`Self::backend`].
    pub profile: BackendProfile,
    /// Directions profile for the secondary duration lookup, if one applies.
    pub duration_profile: Option<BackendProfile>,
}

/// Map a travel mode to its geometry backend.
///
/// The sentinel mode has no backend and yields
/// [`ValidationError::VehicleRequired`].
pub const fn select_backend(vehicle: VehicleId) -> Result<BackendSelection, ValidationError> {
    match vehicle {
        VehicleId::Car | VehicleId::ElectricCar | VehicleId::Utility | VehicleId::ElectricUtility => {
            Ok(BackendSelection {
                backend: Backend::MatrixShape,
                profile: BackendProfile::Driving,
                duration_profile: Some(BackendProfile::DrivingCar),
            })
        }
        VehicleId::Bike => Ok(BackendSelection {
            backend: Backend::Directions,
            profile: BackendProfile::CyclingRegular,
            duration_profile: None,
        }),
        VehicleId::ByFoot => Ok(BackendSelection {
            backend: Backend::Directions,
            profile: BackendProfile::FootWalking,
            duration_profile: None,
        }),
        VehicleId::ChooseYourVehicle => Err(ValidationError::VehicleRequired),
    }
}
