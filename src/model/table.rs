//! Rectangular numeric tables: rows are repeated trials, columns are
//! globule/cylinder configurations.

use serde::Serialize;

use crate::error::{AnalysisError, Result};

/// An immutable rectangular table of measurements.
///
/// Always at least one row and one column; every row has the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MeasurementTable {
    rows: Vec<Vec<f64>>,
}

impl MeasurementTable {
    /// Builds a table from rows, rejecting empty or ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let width = match rows.first() {
            Some(row) => row.len(),
            None => return Err(AnalysisError::Shape("table has no rows".to_string())),
        };
        if width == 0 {
            return Err(AnalysisError::Shape("table has no columns".to_string()));
        }
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(AnalysisError::Shape(format!(
                    "row {} has {} column(s), expected {}",
                    index,
                    row.len(),
                    width
                )));
            }
        }
        Ok(Self { rows })
    }

    /// Builds a single-row table.
    pub fn from_row(values: Vec<f64>) -> Result<Self> {
        Self::from_rows(vec![values])
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows[0].len()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    /// The first row, the meaningful one in per-configuration scalar tables.
    pub fn first_row(&self) -> &[f64] {
        &self.rows[0]
    }

    /// Copies one column out, in trial order.
    pub fn column(&self, index: usize) -> Vec<f64> {
        self.rows.iter().map(|row| row[index]).collect()
    }

    /// Elementwise transformation; the shape is preserved.
    pub fn map<F>(&self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        Self {
            rows: self
                .rows
                .iter()
                .map(|row| row.iter().map(|&value| f(value)).collect())
                .collect(),
        }
    }
}
