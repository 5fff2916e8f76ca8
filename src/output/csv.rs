//! CSV emission for finished analyses.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::analysis::Analysis;
use crate::error::{AnalysisError, Result};
use crate::model::{quantity, MeasurementTable};

/// Output file names, one per pipeline stage, in pipeline order.
pub mod files {
    pub const TIME_ERRORS: &str = "sinkingtimes_errorranges.csv";
    pub const MEAN_TIMES: &str = "mean_times.csv";
    pub const MEAN_TIME_ERRORS: &str = "mean_sinkingtimes_errorranges.csv";
    pub const VELOCITIES: &str = "velocities.csv";
    pub const MEAN_VELOCITIES: &str = "mean_velocities.csv";
    pub const MEAN_VELOCITY_ERRORS: &str = "mean_velocities_errorranges.csv";
    pub const DYNAMIC_VISCOSITY: &str = "dynamic_viscosity.csv";
    pub const LADENBURG_VISCOSITY: &str = "ladenburg_dynamic_viscosity.csv";
    pub const DYNAMIC_VISCOSITY_ERRORS: &str = "dynamic_viscosity_errorranges.csv";
    pub const LADENBURG_VISCOSITY_ERRORS: &str = "ladenburg_dynamic_viscosity_errorranges.csv";
    pub const MEAN_DYNAMIC_VISCOSITY: &str = "mean_dynamic_viscosity.csv";
    pub const MEAN_LADENBURG_VISCOSITY: &str = "mean_ladenburg_dynamic_viscosity.csv";
    pub const MEAN_DYNAMIC_VISCOSITY_ERROR: &str = "mean_dynamic_viscosity_errorrange.csv";
    pub const MEAN_LADENBURG_VISCOSITY_ERROR: &str = "mean_ladenburg_dynamic_viscosity_errorrange.csv";
    pub const KINEMATIC_VISCOSITY: &str = "kinematic_viscosity.csv";
    pub const KINEMATIC_VISCOSITY_ERROR: &str = "kinematic_viscosity_errorrange.csv";
    pub const REYNOLDS: &str = "reynolds_number.csv";
    pub const REYNOLDS_ERROR: &str = "reynolds_number_errorrange.csv";

    /// Every output file, in pipeline order.
    pub const ALL: [&str; 18] = [
        TIME_ERRORS,
        MEAN_TIMES,
        MEAN_TIME_ERRORS,
        VELOCITIES,
        MEAN_VELOCITIES,
        MEAN_VELOCITY_ERRORS,
        DYNAMIC_VISCOSITY,
        LADENBURG_VISCOSITY,
        DYNAMIC_VISCOSITY_ERRORS,
        LADENBURG_VISCOSITY_ERRORS,
        MEAN_DYNAMIC_VISCOSITY,
        MEAN_LADENBURG_VISCOSITY,
        MEAN_DYNAMIC_VISCOSITY_ERROR,
        MEAN_LADENBURG_VISCOSITY_ERROR,
        KINEMATIC_VISCOSITY,
        KINEMATIC_VISCOSITY_ERROR,
        REYNOLDS,
        REYNOLDS_ERROR,
    ];
}

/// Writes one rectangular table. Floats keep their shortest round-trip
/// form, so reading the file back reproduces the values exactly.
pub fn write_table(path: &Path, table: &MeasurementTable) -> Result<()> {
    let file = File::create(path).map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    for row in table.rows() {
        writer
            .write_record(row.iter().map(|value| value.to_string()))
            .map_err(|source| AnalysisError::Csv {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes one single-row table of per-configuration values.
pub fn write_row(path: &Path, values: &[f64]) -> Result<()> {
    let file = File::create(path).map_err(|source| AnalysisError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    writer
        .write_record(values.iter().map(|value| value.to_string()))
        .map_err(|source| AnalysisError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    writer.flush()?;
    Ok(())
}

/// Writes one scalar as a 1×1 table.
pub fn write_scalar(path: &Path, value: f64) -> Result<()> {
    write_row(path, &[value])
}

/// Writes every stage output into `dir`, creating it if needed.
///
/// Called only after the whole analysis has succeeded, so a failed run
/// leaves no files behind.
pub fn write_analysis(dir: &Path, analysis: &Analysis) -> Result<()> {
    std::fs::create_dir_all(dir)?;

    write_table(&dir.join(files::TIME_ERRORS), &analysis.time_errors)?;
    write_row(
        &dir.join(files::MEAN_TIMES),
        &quantity::values(&analysis.mean_times),
    )?;
    write_row(
        &dir.join(files::MEAN_TIME_ERRORS),
        &quantity::errors(&analysis.mean_times),
    )?;

    write_table(&dir.join(files::VELOCITIES), &analysis.velocities)?;
    write_row(
        &dir.join(files::MEAN_VELOCITIES),
        &quantity::values(&analysis.mean_velocities),
    )?;
    write_row(
        &dir.join(files::MEAN_VELOCITY_ERRORS),
        &quantity::errors(&analysis.mean_velocities),
    )?;

    write_row(
        &dir.join(files::DYNAMIC_VISCOSITY),
        &quantity::values(&analysis.dynamic_viscosity),
    )?;
    write_row(
        &dir.join(files::LADENBURG_VISCOSITY),
        &quantity::values(&analysis.ladenburg_viscosity),
    )?;
    write_row(
        &dir.join(files::DYNAMIC_VISCOSITY_ERRORS),
        &quantity::errors(&analysis.dynamic_viscosity),
    )?;
    write_row(
        &dir.join(files::LADENBURG_VISCOSITY_ERRORS),
        &quantity::errors(&analysis.ladenburg_viscosity),
    )?;

    write_scalar(
        &dir.join(files::MEAN_DYNAMIC_VISCOSITY),
        analysis.mean_dynamic_viscosity.value,
    )?;
    write_scalar(
        &dir.join(files::MEAN_LADENBURG_VISCOSITY),
        analysis.mean_ladenburg_viscosity.value,
    )?;
    write_scalar(
        &dir.join(files::MEAN_DYNAMIC_VISCOSITY_ERROR),
        analysis.mean_dynamic_viscosity.error,
    )?;
    write_scalar(
        &dir.join(files::MEAN_LADENBURG_VISCOSITY_ERROR),
        analysis.mean_ladenburg_viscosity.error,
    )?;

    write_scalar(
        &dir.join(files::KINEMATIC_VISCOSITY),
        analysis.kinematic_viscosity.value,
    )?;
    write_scalar(
        &dir.join(files::KINEMATIC_VISCOSITY_ERROR),
        analysis.kinematic_viscosity.error,
    )?;

    write_row(
        &dir.join(files::REYNOLDS),
        &quantity::values(&analysis.reynolds),
    )?;
    write_row(
        &dir.join(files::REYNOLDS_ERROR),
        &quantity::errors(&analysis.reynolds),
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::read_table;

    #[test]
    fn test_write_table_round_trips_exactly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("velocities.csv");
        let table = MeasurementTable::from_rows(vec![
            vec![0.018181818181818184, 0.023529411764705882],
            vec![0.016666666666666666, 0.022222222222222223],
        ])
        .unwrap();

        write_table(&path, &table).unwrap();
        let back = read_table(&path).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_write_scalar_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kinematic_viscosity.csv");
        write_scalar(&path, 0.0002105487331471287).unwrap();
        let back = read_table(&path).unwrap();
        assert_eq!(back.first_row(), &[0.0002105487331471287]);
    }

    #[test]
    fn test_write_row_keeps_column_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mean_times.csv");
        write_row(&path, &[11.0, 8.5]).unwrap();
        let back = read_table(&path).unwrap();
        assert_eq!(back.first_row(), &[11.0, 8.5]);
    }
}
