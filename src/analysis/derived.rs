//! Kinematic viscosity and Reynolds number.

use crate::analysis::stage;
use crate::error::{AnalysisError, Result};

/// `ν = η̄ / ρ_fluid`, one scalar for the whole run.
pub fn kinematic_viscosity(mean_dynamic_viscosity: f64, fluid_density: f64) -> Result<f64> {
    if fluid_density == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::KINEMATIC_VISCOSITY,
            column: 0,
            denominator: "fluid density",
        });
    }
    Ok(mean_dynamic_viscosity / fluid_density)
}

/// `Re = ν · (d/2) · ρ_fluid / η`, per configuration, with the
/// configuration's own dynamic viscosity in the denominator.
pub fn reynolds_number(
    column: usize,
    kinematic_viscosity: f64,
    diameter: f64,
    fluid_density: f64,
    dynamic_viscosity: f64,
) -> Result<f64> {
    if dynamic_viscosity == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::REYNOLDS,
            column,
            denominator: "dynamic viscosity",
        });
    }
    Ok(kinematic_viscosity * (diameter / 2.0) * fluid_density / dynamic_viscosity)
}
