//! viscolab - Falling-sphere viscometry analysis

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use viscolab::config::{defaults, Apparatus, ReportFormat, RunConfig};
use viscolab::model::Quantity;
use viscolab::output::csv::write_analysis;
use viscolab::output::render_to_stdout;
use viscolab::parser::Dataset;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliReportFormat {
    Terminal,
    Json,
}

impl From<CliReportFormat> for ReportFormat {
    fn from(f: CliReportFormat) -> Self {
        match f {
            CliReportFormat::Terminal => ReportFormat::Terminal,
            CliReportFormat::Json => ReportFormat::Json,
        }
    }
}

/// Falling-sphere viscometry: Stokes/Ladenburg viscosity and error
/// propagation for lab measurement tables
#[derive(Parser, Debug)]
#[command(name = "viscolab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the input measurement tables
    input_dir: PathBuf,

    /// Directory the stage outputs are written to
    output_dir: PathBuf,

    /// Sinking time table, seconds (rows are trials, columns configurations)
    #[arg(long, default_value = "sinkingtimes.csv")]
    sinking_times: String,

    /// Globule diameter table, metres (one value per configuration)
    #[arg(long, default_value = "globules_diameters.csv")]
    diameters: String,

    /// Globule density table, kg/m³ (one value per configuration)
    #[arg(long, default_value = "globules_density.csv")]
    densities: String,

    /// Globule density uncertainty table, kg/m³
    #[arg(long, default_value = "globules_density_errorranges.csv")]
    density_errors: String,

    /// Fall length of the fluid column, metres
    #[arg(long, default_value_t = defaults::CYLINDER_LENGTH)]
    cylinder_length: f64,

    /// Uncertainty of the fall length, metres
    #[arg(long, default_value_t = defaults::CYLINDER_LENGTH_ERROR)]
    cylinder_length_error: f64,

    /// Inner diameter of the cylinder, metres
    #[arg(long, default_value_t = defaults::CYLINDER_DIAMETER)]
    cylinder_diameter: f64,

    /// Uncertainty of the cylinder diameter, metres
    #[arg(long, default_value_t = defaults::CYLINDER_DIAMETER_ERROR)]
    cylinder_diameter_error: f64,

    /// Uncertainty of every globule diameter, metres
    #[arg(long, default_value_t = defaults::GLOBULE_DIAMETER_ERROR)]
    globule_diameter_error: f64,

    /// Local gravitational acceleration, m/s²
    #[arg(long, default_value_t = defaults::GRAVITY)]
    gravity: f64,

    /// Uncertainty of the gravitational acceleration, m/s²
    #[arg(long, default_value_t = defaults::GRAVITY_ERROR)]
    gravity_error: f64,

    /// Density of the fluid column, kg/m³
    #[arg(long, default_value_t = defaults::FLUID_DENSITY)]
    fluid_density: f64,

    /// Uncertainty of the fluid density, kg/m³
    #[arg(long, default_value_t = defaults::FLUID_DENSITY_ERROR)]
    fluid_density_error: f64,

    /// Report format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: CliReportFormat,

    /// Skip the console report (output tables are still written)
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let apparatus = Apparatus {
        cylinder_length: Quantity::new(cli.cylinder_length, cli.cylinder_length_error),
        cylinder_diameter: Quantity::new(cli.cylinder_diameter, cli.cylinder_diameter_error),
        globule_diameter_error: cli.globule_diameter_error,
        gravity: Quantity::new(cli.gravity, cli.gravity_error),
        fluid_density: Quantity::new(cli.fluid_density, cli.fluid_density_error),
    };

    let config = RunConfig {
        input_dir: cli.input_dir,
        output_dir: cli.output_dir,
        sinking_times_file: cli.sinking_times,
        diameters_file: cli.diameters,
        densities_file: cli.densities,
        density_errors_file: cli.density_errors,
        apparatus,
        format: cli.format.into(),
        quiet: cli.quiet,
    };

    // Load all four tables up front; analysis never touches the filesystem.
    let dataset = Dataset::load(&config).with_context(|| {
        format!(
            "Failed to load input tables from: {}",
            config.input_dir.display()
        )
    })?;

    let analysis = viscolab::analyze(&dataset, &config.apparatus).context("Analysis failed")?;

    // Outputs are written only for a fully successful analysis.
    write_analysis(&config.output_dir, &analysis).with_context(|| {
        format!(
            "Failed to write output tables to: {}",
            config.output_dir.display()
        )
    })?;

    if !config.quiet {
        render_to_stdout(&analysis, &config)?;
    }

    Ok(())
}
