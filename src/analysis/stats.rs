//! Column-wise aggregation over repeated trials.

use crate::error::{AnalysisError, Result};
use crate::model::MeasurementTable;

/// Mean and standard-error calculations, labeled with the pipeline stage
/// they feed so failures point at the right output.
#[derive(Debug, Clone, Copy)]
pub struct Aggregator {
    stage: &'static str,
}

impl Aggregator {
    pub fn new(stage: &'static str) -> Self {
        Self { stage }
    }

    /// Arithmetic mean of one column of values. Accepts a single value;
    /// an empty column is a division by zero.
    pub fn mean(&self, column: usize, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            return Err(AnalysisError::DivisionByZero {
                stage: self.stage,
                column,
                denominator: "value count",
            });
        }
        Ok(values.iter().sum::<f64>() / values.len() as f64)
    }

    /// Standard error of the mean: `sqrt( Σ(x−x̄)² / ((n−1)·n) )`, with the
    /// column mean computed internally. Needs at least two values.
    pub fn standard_error(&self, column: usize, values: &[f64]) -> Result<f64> {
        let n = self.at_least_two(column, values)?;
        let mean = self.mean(column, values)?;
        Ok((squared_deviations(values, mean) / ((n - 1.0) * n)).sqrt())
    }

    /// Standard error about a caller-supplied mean, divided again by `√n`.
    /// This doubly-normalized form is what the lab applies when averaging
    /// the per-configuration viscosities.
    pub fn sem(&self, column: usize, values: &[f64], mean: f64) -> Result<f64> {
        let n = self.at_least_two(column, values)?;
        let standard_error = (squared_deviations(values, mean) / ((n - 1.0) * n)).sqrt();
        Ok(standard_error / n.sqrt())
    }

    /// Column means over a whole table.
    pub fn column_means(&self, table: &MeasurementTable) -> Result<Vec<f64>> {
        (0..table.column_count())
            .map(|column| self.mean(column, &table.column(column)))
            .collect()
    }

    /// Column standard errors over a whole table.
    pub fn column_standard_errors(&self, table: &MeasurementTable) -> Result<Vec<f64>> {
        (0..table.column_count())
            .map(|column| self.standard_error(column, &table.column(column)))
            .collect()
    }

    fn at_least_two(&self, column: usize, values: &[f64]) -> Result<f64> {
        if values.len() < 2 {
            return Err(AnalysisError::InsufficientData {
                stage: self.stage,
                column,
                found: values.len(),
            });
        }
        Ok(values.len() as f64)
    }
}

fn squared_deviations(values: &[f64], mean: f64) -> f64 {
    values.iter().map(|&x| (x - mean).powi(2)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AGG: Aggregator = Aggregator { stage: "test" };

    #[test]
    fn test_mean_accepts_a_single_value() {
        assert_eq!(AGG.mean(0, &[3.5]).unwrap(), 3.5);
    }

    #[test]
    fn test_mean_of_empty_column_is_division_by_zero() {
        assert!(matches!(
            AGG.mean(0, &[]),
            Err(AnalysisError::DivisionByZero { column: 0, .. })
        ));
    }

    #[test]
    fn test_standard_error_needs_two_values() {
        assert!(matches!(
            AGG.standard_error(2, &[1.0]),
            Err(AnalysisError::InsufficientData {
                column: 2,
                found: 1,
                ..
            })
        ));
    }

    #[test]
    fn test_standard_error_of_stopwatch_errors() {
        // the pair of per-trial stopwatch errors for times [10, 12]
        let se = AGG.standard_error(0, &[0.015, 0.016]).unwrap();
        assert!((se - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn test_sem_of_identical_values_is_zero() {
        assert_eq!(AGG.sem(0, &[2.0, 2.0, 2.0, 2.0], 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_sem_is_nonnegative_and_carries_extra_root_n() {
        let values = [1.0, 2.0, 3.0, 4.0];
        let mean = AGG.mean(0, &values).unwrap();
        let se = AGG.standard_error(0, &values).unwrap();
        let sem = AGG.sem(0, &values, mean).unwrap();
        assert!(sem >= 0.0);
        assert!((sem - se / 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_column_means_over_table() {
        let table =
            MeasurementTable::from_rows(vec![vec![10.0, 8.0], vec![12.0, 9.0]]).unwrap();
        assert_eq!(AGG.column_means(&table).unwrap(), vec![11.0, 8.5]);
    }

    #[test]
    fn test_column_standard_errors_report_the_failing_column() {
        let table = MeasurementTable::from_row(vec![1.0, 2.0]).unwrap();
        assert!(matches!(
            AGG.column_standard_errors(&table),
            Err(AnalysisError::InsufficientData { column: 0, .. })
        ));
    }
}
