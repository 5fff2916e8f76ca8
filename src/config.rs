//! Configuration handling for viscolab

use std::path::PathBuf;

use serde::Serialize;

use crate::model::Quantity;

/// Default apparatus constants, shared by the CLI and [`Apparatus`].
pub mod defaults {
    /// Fall distance between the cylinder marks, metres.
    pub const CYLINDER_LENGTH: f64 = 0.20;
    pub const CYLINDER_LENGTH_ERROR: f64 = 0.0005;
    /// Inner cylinder diameter, metres.
    pub const CYLINDER_DIAMETER: f64 = 0.0635;
    pub const CYLINDER_DIAMETER_ERROR: f64 = 0.000005;
    /// Reading error of every globule-diameter measurement, metres.
    pub const GLOBULE_DIAMETER_ERROR: f64 = 0.000005;
    /// Local gravitational acceleration, m/s².
    pub const GRAVITY: f64 = 9.81235;
    pub const GRAVITY_ERROR: f64 = 0.0001;
    /// Fluid density, kg/m³.
    pub const FLUID_DENSITY: f64 = 965.0;
    pub const FLUID_DENSITY_ERROR: f64 = 0.5;
}

/// Report format for a finished analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "terminal" => Ok(ReportFormat::Terminal),
            "json" => Ok(ReportFormat::Json),
            _ => Err(format!("Unknown report format: {}", s)),
        }
    }
}

/// Apparatus constants and their uncertainties, fixed for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct Apparatus {
    /// Fall distance between the cylinder marks, metres
    pub cylinder_length: Quantity,
    /// Inner cylinder diameter, metres
    pub cylinder_diameter: Quantity,
    /// Reading error shared by every globule-diameter measurement, metres
    pub globule_diameter_error: f64,
    /// Local gravitational acceleration, m/s²
    pub gravity: Quantity,
    /// Fluid density, kg/m³
    pub fluid_density: Quantity,
}

impl Default for Apparatus {
    fn default() -> Self {
        Self {
            cylinder_length: Quantity::new(
                defaults::CYLINDER_LENGTH,
                defaults::CYLINDER_LENGTH_ERROR,
            ),
            cylinder_diameter: Quantity::new(
                defaults::CYLINDER_DIAMETER,
                defaults::CYLINDER_DIAMETER_ERROR,
            ),
            globule_diameter_error: defaults::GLOBULE_DIAMETER_ERROR,
            gravity: Quantity::new(defaults::GRAVITY, defaults::GRAVITY_ERROR),
            fluid_density: Quantity::new(
                defaults::FLUID_DENSITY,
                defaults::FLUID_DENSITY_ERROR,
            ),
        }
    }
}

/// Configuration for one analysis run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the four input tables
    pub input_dir: PathBuf,
    /// Directory the stage outputs are written to
    pub output_dir: PathBuf,
    /// Sinking-time table file name (rows = trials)
    pub sinking_times_file: String,
    /// Globule-diameter table file name (single row)
    pub diameters_file: String,
    /// Globule-density table file name (single row)
    pub densities_file: String,
    /// Globule-density uncertainty table file name (single row)
    pub density_errors_file: String,
    /// Apparatus constants
    pub apparatus: Apparatus,
    /// Report format
    pub format: ReportFormat,
    /// Suppress the report (output files are still written)
    pub quiet: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            sinking_times_file: "sinkingtimes.csv".to_string(),
            diameters_file: "globules_diameters.csv".to_string(),
            densities_file: "globules_density.csv".to_string(),
            density_errors_file: "globules_density_errorranges.csv".to_string(),
            apparatus: Apparatus::default(),
            format: ReportFormat::default(),
            quiet: false,
        }
    }
}

impl RunConfig {
    /// Create a new RunConfig with input and output directories
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Set the apparatus constants
    pub fn with_apparatus(mut self, apparatus: Apparatus) -> Self {
        self.apparatus = apparatus;
        self
    }

    /// Set the report format
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Suppress the report
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Set the four input file names at once
    pub fn with_input_files(
        mut self,
        sinking_times: String,
        diameters: String,
        densities: String,
        density_errors: String,
    ) -> Self {
        self.sinking_times_file = sinking_times;
        self.diameters_file = diameters;
        self.densities_file = densities;
        self.density_errors_file = density_errors;
        self
    }

    /// An input file name resolved against the input directory
    pub fn input_path(&self, file: &str) -> PathBuf {
        self.input_dir.join(file)
    }
}
