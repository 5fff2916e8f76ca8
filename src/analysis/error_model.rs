//! Reading error of the stopwatch used for the sinking times.

use crate::model::MeasurementTable;

/// Fixed offset of the stopwatch error, in seconds.
pub const TIME_ERROR_OFFSET: f64 = 0.01;

/// Drift of the stopwatch error per second measured.
pub const TIME_ERROR_DRIFT: f64 = 5e-4;

/// Reading error for a single raw time measurement: `offset + drift · t`.
pub fn time_error(time: f64) -> f64 {
    TIME_ERROR_OFFSET + TIME_ERROR_DRIFT * time
}

/// Reading errors for a whole sinking-time table, elementwise.
pub fn time_errors(times: &MeasurementTable) -> MeasurementTable {
    times.map(time_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_error_formula() {
        assert!((time_error(10.0) - 0.015).abs() < 1e-15);
        assert!((time_error(12.0) - 0.016).abs() < 1e-15);
        assert!((time_error(0.0) - 0.01).abs() < 1e-15);
    }

    #[test]
    fn test_time_error_is_strictly_increasing() {
        let mut previous = time_error(0.0);
        for step in 1..100 {
            let next = time_error(step as f64 * 0.5);
            assert!(next > previous);
            previous = next;
        }
    }

    #[test]
    fn test_time_errors_keep_the_table_shape() {
        let times =
            MeasurementTable::from_rows(vec![vec![10.0, 8.0], vec![12.0, 9.0]]).unwrap();
        let errors = time_errors(&times);
        assert_eq!(errors.row_count(), 2);
        assert_eq!(errors.column_count(), 2);
        assert_eq!(errors.rows()[0], vec![0.015, 0.014]);
        assert_eq!(errors.rows()[1], vec![0.016, 0.0145]);
    }
}
