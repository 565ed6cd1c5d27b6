//! Vehicle profile registry.
//!
//! Maps each travel mode to the nominal speed used for fallback durations and
//! the emission factor used for the carbon footprint.
//!
//! # Examples
//! ```
//! use planeco_core::{VehicleId, VehicleProfile};
//!
//! let car = VehicleProfile::for_id(VehicleId::Car);
//! assert_eq!(car.nominal_speed_kmh, 60.0);
//! assert_eq!(car.emission_factor_g_per_km, 218.0);
//! assert_eq!("electricCar".parse::<VehicleId>(), Ok(VehicleId::ElectricCar));
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Travel mode identifiers accepted by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub enum VehicleId {
    /// Sentinel meaning "no mode selected".
    #[default]
    ChooseYourVehicle,
    /// Combustion car.
    Car,
    /// Battery electric car.
    ElectricCar,
    /// Combustion utility van.
    Utility,
    /// Battery electric utility van.
    ElectricUtility,
    /// Bicycle.
    Bike,
    /// Walking.
    ByFoot,
}

impl VehicleId {
    /// Every identifier, sentinel first.
    pub const ALL: [Self; 7] = [
        Self::ChooseYourVehicle,
        Self::Car,
        Self::ElectricCar,
        Self::Utility,
        Self::ElectricUtility,
        Self::Bike,
        Self::ByFoot,
    ];

    /// Camel-case identifier as exchanged with the presentation layer.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChooseYourVehicle => "chooseYourVehicle",
            Self::Car => "car",
            Self::ElectricCar => "electricCar",
            Self::Utility => "utility",
            Self::ElectricUtility => "electricUtility",
            Self::Bike => "bike",
            Self::ByFoot => "byFoot",
        }
    }

    /// Whether this is the "no mode selected" sentinel.
    pub const fn is_sentinel(self) -> bool {
        matches!(self, Self::ChooseYourVehicle)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unrecognised vehicle identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown vehicle '{0}'")]
pub struct UnknownVehicle(pub String);

impl FromStr for VehicleId {
    type Err = UnknownVehicle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownVehicle(s.to_owned()))
    }
}

/// Nominal characteristics of a travel mode.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(rename_all = "camelCase")
)]
pub struct VehicleProfile {
    /// Mode identifier.
    pub id: VehicleId,
    /// Speed used when no provider duration is available.
    pub nominal_speed_kmh: f64,
    /// Grams of CO₂ emitted per kilometre.
    pub emission_factor_g_per_km: f64,
}

const PROFILES: [VehicleProfile; 7] = [
    VehicleProfile::new(VehicleId::ChooseYourVehicle, 0.0, 0.0),
    VehicleProfile::new(VehicleId::Car, 60.0, 218.0),
    VehicleProfile::new(VehicleId::ElectricCar, 60.0, 103.0),
    VehicleProfile::new(VehicleId::Utility, 60.0, 218.0),
    VehicleProfile::new(VehicleId::ElectricUtility, 60.0, 103.0),
    VehicleProfile::new(VehicleId::Bike, 15.0, 6.0),
    VehicleProfile::new(VehicleId::ByFoot, 5.0, 0.0),
];

impl VehicleProfile {
    const fn new(id: VehicleId, nominal_speed_kmh: f64, emission_factor_g_per_km: f64) -> Self {
        Self {
            id,
            nominal_speed_kmh,
            emission_factor_g_per_km,
        }
    }

    /// Look up the registered profile for `id`.
    pub fn for_id(id: VehicleId) -> Self {
        PROFILES
            .into_iter()
            .find(|profile| profile.id == id)
            .unwrap_or(Self::new(id, 0.0, 0.0))
    }

    /// Every registered profile, in registry order.
    pub const fn all() -> &'static [Self] {
        &PROFILES
    }
}
