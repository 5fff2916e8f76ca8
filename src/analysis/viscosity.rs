//! Dynamic viscosity from Stokes' law, plain and Ladenburg-corrected.

use crate::analysis::stage;
use crate::error::{AnalysisError, Result};

/// Coefficient of the Ladenburg wall-correction term `2.1 · d / D`.
pub const WALL_CORRECTION_COEFFICIENT: f64 = 2.1;

/// Stokes' law: `η = (2/9) · (d/2)² · g · (ρ_globule − ρ_fluid) / v`.
pub fn stokes(
    column: usize,
    diameter: f64,
    gravity: f64,
    globule_density: f64,
    fluid_density: f64,
    mean_velocity: f64,
) -> Result<f64> {
    if mean_velocity == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::DYNAMIC_VISCOSITY,
            column,
            denominator: "mean velocity",
        });
    }
    let radius = diameter / 2.0;
    Ok(2.0 * radius * radius / 9.0 * gravity * (globule_density - fluid_density) / mean_velocity)
}

/// Stokes' law with the denominator scaled by the wall correction
/// `(1 + 2.1 · d / D)` for a sphere falling inside a finite cylinder.
pub fn ladenburg(
    column: usize,
    diameter: f64,
    cylinder_diameter: f64,
    gravity: f64,
    globule_density: f64,
    fluid_density: f64,
    mean_velocity: f64,
) -> Result<f64> {
    if cylinder_diameter == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::LADENBURG_VISCOSITY,
            column,
            denominator: "cylinder diameter",
        });
    }
    if mean_velocity == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::LADENBURG_VISCOSITY,
            column,
            denominator: "mean velocity",
        });
    }
    let radius = diameter / 2.0;
    let correction = 1.0 + WALL_CORRECTION_COEFFICIENT * diameter / cylinder_diameter;
    Ok(2.0 * radius * radius / 9.0 * gravity * (globule_density - fluid_density)
        / (mean_velocity * correction))
}
