//! Fall velocities from the cylinder mark distance and sinking times.

use crate::analysis::stage;
use crate::error::{AnalysisError, Result};
use crate::model::MeasurementTable;

/// Per-trial velocities: mark distance over every individual sinking time.
pub fn velocities(times: &MeasurementTable, length: f64) -> Result<MeasurementTable> {
    let mut rows = Vec::with_capacity(times.row_count());
    for row in times.rows() {
        let mut out = Vec::with_capacity(row.len());
        for (column, &time) in row.iter().enumerate() {
            if time == 0.0 {
                return Err(AnalysisError::DivisionByZero {
                    stage: stage::VELOCITIES,
                    column,
                    denominator: "sinking time",
                });
            }
            out.push(length / time);
        }
        rows.push(out);
    }
    MeasurementTable::from_rows(rows)
}

/// Mean velocities: mark distance over each configuration's mean time.
pub fn mean_velocities(mean_times: &[f64], length: f64) -> Result<Vec<f64>> {
    mean_times
        .iter()
        .enumerate()
        .map(|(column, &mean_time)| {
            if mean_time == 0.0 {
                return Err(AnalysisError::DivisionByZero {
                    stage: stage::MEAN_VELOCITIES,
                    column,
                    denominator: "mean sinking time",
                });
            }
            Ok(length / mean_time)
        })
        .collect()
}

/// First-order error of one mean velocity:
/// `sqrt( (Δlength/t̄)² + (Δt̄/t̄²)² )`.
///
/// The one place the pipeline uses first-order propagation instead of the
/// worst-case interval method.
pub fn mean_velocity_error(
    length_error: f64,
    mean_time: f64,
    mean_time_error: f64,
    column: usize,
) -> Result<f64> {
    if mean_time == 0.0 {
        return Err(AnalysisError::DivisionByZero {
            stage: stage::MEAN_VELOCITY_ERRORS,
            column,
            denominator: "mean sinking time",
        });
    }
    let length_term = length_error / mean_time;
    let time_term = mean_time_error / mean_time.powi(2);
    Ok((length_term.powi(2) + time_term.powi(2)).sqrt())
}
