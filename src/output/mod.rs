//! Report rendering and CSV emission for finished analyses

pub mod csv;
mod json;
mod terminal;

use std::io::Write;

use crate::analysis::Analysis;
use crate::config::{ReportFormat, RunConfig};
use crate::error::Result;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for report formatters
pub trait ReportFormatter {
    /// Render a finished analysis to a writer
    fn render(&self, analysis: &Analysis, config: &RunConfig, writer: &mut dyn Write)
        -> Result<()>;
}

/// Factory for creating report formatters
pub struct ReportFactory;

impl ReportFactory {
    /// Create a report formatter based on format type
    pub fn create(format: ReportFormat) -> Box<dyn ReportFormatter> {
        match format {
            ReportFormat::Terminal => Box::new(TerminalOutput::new()),
            ReportFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render an analysis report to stdout
pub fn render_to_stdout(analysis: &Analysis, config: &RunConfig) -> Result<()> {
    let formatter = ReportFactory::create(config.format);
    let mut stdout = std::io::stdout();
    formatter.render(analysis, config, &mut stdout)
}
