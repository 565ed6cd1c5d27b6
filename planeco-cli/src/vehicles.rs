//! `vehicles` command: print the travel mode registry.

use std::io::Write;

use planeco_core::{Backend, PlanError, VehicleProfile, select_backend};

use crate::CliError;

/// One line per selectable mode: id, nominal speed, emission factor and the
/// backend profile that routes it.
pub(super) fn write_vehicles(writer: &mut dyn Write) -> Result<(), CliError> {
    let selectable = VehicleProfile::all()
        .iter()
        .filter(|profile| !profile.id.is_sentinel());
    for profile in selectable {
        let selection = select_backend(profile.id).map_err(PlanError::from)?;
        let backend = match selection.backend {
            Backend::MatrixShape => "matrix+shape",
            Backend::Directions => "directions",
        };
        writeln!(
            writer,
            "{:<16} {:>4} km/h {:>6} g/km  {backend} ({})",
            profile.id.as_str(),
            profile.nominal_speed_kmh,
            profile.emission_factor_g_per_km,
            selection.profile,
        )
        .map_err(CliError::WriteOutput)?;
    }
    Ok(())
}
