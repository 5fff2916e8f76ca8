//! Loading of the headerless numeric input tables.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::RunConfig;
use crate::error::{AnalysisError, Result};
use crate::model::MeasurementTable;

/// Reads one headerless, comma-separated numeric table.
pub fn read_table(path: &Path) -> Result<MeasurementTable> {
    let file = File::open(path).map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(|source| AnalysisError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        let mut values = Vec::with_capacity(record.len());
        for (column, field) in record.iter().enumerate() {
            let value = field.parse::<f64>().map_err(|_| AnalysisError::Parse {
                path: path.to_path_buf(),
                row,
                column,
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows.push(values);
    }
    if rows.is_empty() {
        return Err(AnalysisError::EmptyTable(path.to_path_buf()));
    }
    MeasurementTable::from_rows(rows)
}

/// The four input tables of one run, column-aligned.
///
/// Immutable once built; the three scalar inputs keep only their meaningful
/// first row.
#[derive(Debug, Clone)]
pub struct Dataset {
    sinking_times: MeasurementTable,
    globule_diameters: Vec<f64>,
    globule_densities: Vec<f64>,
    globule_density_errors: Vec<f64>,
}

impl Dataset {
    /// Bundles already-loaded inputs, enforcing the one-column-per-
    /// configuration alignment.
    pub fn new(
        sinking_times: MeasurementTable,
        globule_diameters: Vec<f64>,
        globule_densities: Vec<f64>,
        globule_density_errors: Vec<f64>,
    ) -> Result<Self> {
        let columns = sinking_times.column_count();
        let aligned = |name: &'static str, found: usize| -> Result<()> {
            if found != columns {
                return Err(AnalysisError::ColumnMismatch {
                    left: "sinking times",
                    left_columns: columns,
                    right: name,
                    right_columns: found,
                });
            }
            Ok(())
        };
        aligned("globule diameters", globule_diameters.len())?;
        aligned("globule densities", globule_densities.len())?;
        aligned("globule density error ranges", globule_density_errors.len())?;
        Ok(Self {
            sinking_times,
            globule_diameters,
            globule_densities,
            globule_density_errors,
        })
    }

    /// Loads the four CSV files named by `config` from its input directory.
    pub fn load(config: &RunConfig) -> Result<Self> {
        let times = read_table(&config.input_path(&config.sinking_times_file))?;
        let diameters = read_table(&config.input_path(&config.diameters_file))?;
        let densities = read_table(&config.input_path(&config.densities_file))?;
        let density_errors = read_table(&config.input_path(&config.density_errors_file))?;
        Self::new(
            times,
            diameters.first_row().to_vec(),
            densities.first_row().to_vec(),
            density_errors.first_row().to_vec(),
        )
    }

    pub fn sinking_times(&self) -> &MeasurementTable {
        &self.sinking_times
    }

    pub fn globule_diameters(&self) -> &[f64] {
        &self.globule_diameters
    }

    pub fn globule_densities(&self) -> &[f64] {
        &self.globule_densities
    }

    pub fn globule_density_errors(&self) -> &[f64] {
        &self.globule_density_errors
    }

    pub fn configuration_count(&self) -> usize {
        self.sinking_times.column_count()
    }

    pub fn trial_count(&self) -> usize {
        self.sinking_times.row_count()
    }
}
