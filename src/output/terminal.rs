//! Plain-text console report

use std::io::Write;

use termcolor::ColorChoice;

use crate::analysis::Analysis;
use crate::config::RunConfig;
use crate::error::Result;
use crate::model::{MeasurementTable, Quantity};

use super::ReportFormatter;

/// Console report, one section per pipeline stage
pub struct TerminalOutput {
    #[allow(dead_code)]
    color_choice: ColorChoice,
}

impl TerminalOutput {
    pub fn new() -> Self {
        Self {
            color_choice: ColorChoice::Auto,
        }
    }

    pub fn with_color_choice(color_choice: ColorChoice) -> Self {
        Self { color_choice }
    }

    fn write_header(&self, writer: &mut dyn Write, config: &RunConfig) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            writer,
            " viscolab {}: {} → {}",
            crate::VERSION,
            config.input_dir.display(),
            config.output_dir.display()
        )?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(writer)?;
        Ok(())
    }

    fn write_summary(&self, analysis: &Analysis, writer: &mut dyn Write) -> Result<()> {
        writeln!(
            writer,
            "Summary: {} configurations, {} trials each",
            analysis.configuration_count(),
            analysis.trial_count()
        )?;
        writeln!(writer)?;
        Ok(())
    }

    /// One line per trial, columns in configuration order.
    fn write_table_section(
        &self,
        title: &str,
        table: &MeasurementTable,
        writer: &mut dyn Write,
    ) -> Result<()> {
        writeln!(writer, "{}:", title)?;
        for (trial, row) in table.rows().iter().enumerate() {
            let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            writeln!(writer, "  trial {}: {}", trial + 1, cells.join("  "))?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// One `value ± error` line per configuration.
    fn write_quantity_section(
        &self,
        title: &str,
        quantities: &[Quantity],
        writer: &mut dyn Write,
    ) -> Result<()> {
        writeln!(writer, "{}:", title)?;
        for (configuration, quantity) in quantities.iter().enumerate() {
            writeln!(
                writer,
                "  configuration {}: {} ± {}",
                configuration + 1,
                quantity.value,
                quantity.error
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }

    fn write_scalar_section(
        &self,
        title: &str,
        quantity: Quantity,
        writer: &mut dyn Write,
    ) -> Result<()> {
        writeln!(writer, "{}: {} ± {}", title, quantity.value, quantity.error)?;
        writeln!(writer)?;
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TerminalOutput {
    fn render(
        &self,
        analysis: &Analysis,
        config: &RunConfig,
        writer: &mut dyn Write,
    ) -> Result<()> {
        self.write_header(writer, config)?;
        self.write_summary(analysis, writer)?;

        self.write_table_section("Sinking time error ranges [s]", &analysis.time_errors, writer)?;
        self.write_quantity_section("Mean sinking times [s]", &analysis.mean_times, writer)?;
        self.write_table_section("Velocities [m/s]", &analysis.velocities, writer)?;
        self.write_quantity_section("Mean velocities [m/s]", &analysis.mean_velocities, writer)?;
        self.write_quantity_section(
            "Dynamic viscosity, Stokes [Pa·s]",
            &analysis.dynamic_viscosity,
            writer,
        )?;
        self.write_quantity_section(
            "Dynamic viscosity, Ladenburg [Pa·s]",
            &analysis.ladenburg_viscosity,
            writer,
        )?;
        self.write_scalar_section(
            "Mean dynamic viscosity, Stokes [Pa·s]",
            analysis.mean_dynamic_viscosity,
            writer,
        )?;
        self.write_scalar_section(
            "Mean dynamic viscosity, Ladenburg [Pa·s]",
            analysis.mean_ladenburg_viscosity,
            writer,
        )?;
        self.write_scalar_section(
            "Kinematic viscosity [m²/s]",
            analysis.kinematic_viscosity,
            writer,
        )?;
        self.write_quantity_section("Reynolds numbers", &analysis.reynolds, writer)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::Apparatus;
    use crate::parser::Dataset;

    fn rendered() -> String {
        let data = Dataset::new(
            MeasurementTable::from_rows(vec![vec![10.0, 8.0], vec![12.0, 9.0]]).unwrap(),
            vec![0.002, 0.0025],
            vec![2500.0, 2500.0],
            vec![10.0, 10.0],
        )
        .unwrap();
        let analysis = analyze(&data, &Apparatus::default()).unwrap();
        let config = RunConfig::new("data", "out");
        let mut buffer = Vec::new();
        TerminalOutput::new()
            .render(&analysis, &config, &mut buffer)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_render_includes_header_and_summary() {
        let report = rendered();
        assert!(report.contains("viscolab"));
        assert!(report.contains("data → out"));
        assert!(report.contains("Summary: 2 configurations, 2 trials each"));
    }

    #[test]
    fn test_render_lists_every_stage() {
        let report = rendered();
        for title in [
            "Sinking time error ranges [s]:",
            "Mean sinking times [s]:",
            "Velocities [m/s]:",
            "Mean velocities [m/s]:",
            "Dynamic viscosity, Stokes [Pa·s]:",
            "Dynamic viscosity, Ladenburg [Pa·s]:",
            "Mean dynamic viscosity, Stokes [Pa·s]:",
            "Mean dynamic viscosity, Ladenburg [Pa·s]:",
            "Kinematic viscosity [m²/s]:",
            "Reynolds numbers:",
        ] {
            assert!(report.contains(title), "missing section {}", title);
        }
    }

    #[test]
    fn test_render_shows_values_with_uncertainties() {
        let report = rendered();
        assert!(report.contains("  trial 1: 0.015  0.014"));
        assert!(report.contains("  trial 2: 0.016  0.0145"));
        assert!(report.contains("  configuration 1: 11 ± 0.0005"));
        assert!(report.contains("  configuration 2: 8.5 ± 0.00025"));
    }
}
