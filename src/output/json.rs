//! JSON report format

use std::io::Write;

use serde::Serialize;

use crate::analysis::Analysis;
use crate::config::{Apparatus, RunConfig};
use crate::error::Result;

use super::ReportFormatter;

/// JSON report formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable view of one run: provenance first, then every stage output.
#[derive(Serialize)]
struct JsonReport<'a> {
    version: &'static str,
    input_dir: String,
    output_dir: String,
    configurations: usize,
    trials: usize,
    apparatus: &'a Apparatus,
    analysis: &'a Analysis,
}

impl ReportFormatter for JsonOutput {
    fn render(
        &self,
        analysis: &Analysis,
        config: &RunConfig,
        writer: &mut dyn Write,
    ) -> Result<()> {
        let report = JsonReport {
            version: crate::VERSION,
            input_dir: config.input_dir.display().to_string(),
            output_dir: config.output_dir.display().to_string(),
            configurations: analysis.configuration_count(),
            trials: analysis.trial_count(),
            apparatus: &config.apparatus,
            analysis,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &report)?;
        } else {
            serde_json::to_writer(&mut *writer, &report)?;
        }
        writeln!(writer)?;

        Ok(())
    }
}
