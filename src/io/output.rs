use crate::core::types::{AnalysisResult, Severity};
use crate::request::AnalysisResponse;
use colored::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Outcome of analysing one input (a file or stdin).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InputReport {
    pub input: String,
    pub language: String,
    #[serde(flatten)]
    pub response: AnalysisResponse,
}

impl InputReport {
    pub fn new(input: impl Into<String>, language: impl Into<String>, response: AnalysisResponse) -> Self {
        Self {
            input: input.into(),
            language: language.into(),
            response,
        }
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        match &self.response {
            AnalysisResponse::Success { analysis, .. } => Some(analysis),
            AnalysisResponse::Failure { .. } => None,
        }
    }
}

pub trait OutputWriter {
    fn write_reports(&mut self, reports: &[InputReport]) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    /// A single input is written as its own object, several as an array.
    fn write_reports(&mut self, reports: &[InputReport]) -> anyhow::Result<()> {
        let json = match reports {
            [single] => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(reports)?,
        };
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, report: &InputReport) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "{} {}",
            report.input.bold().blue(),
            format!("({})", report.language).dimmed()
        )?;
        writeln!(self.writer, "{}", "─".repeat(50))?;
        Ok(())
    }

    fn write_analysis(&mut self, analysis: &AnalysisResult) -> anyhow::Result<()> {
        if analysis.partial {
            writeln!(self.writer, "{}", "Partial result:".yellow())?;
            for damage in &analysis.malformed {
                writeln!(self.writer, "  {damage}")?;
            }
        }

        writeln!(self.writer, "{}", "Complexity".bold())?;
        writeln!(
            self.writer,
            "  Time:  {}",
            analysis.complexity.time_class.to_string().bold()
        )?;
        writeln!(
            self.writer,
            "  Space: {}",
            analysis.complexity.space_class.to_string().bold()
        )?;
        writeln!(self.writer, "  {}", analysis.complexity.explanation)?;

        let quality = &analysis.code_quality;
        writeln!(self.writer, "{}", "Code Quality".bold())?;
        writeln!(self.writer, "  Score:           {}", score_label(quality.score))?;
        writeln!(
            self.writer,
            "  Readability:     {}",
            score_label(quality.metrics.readability)
        )?;
        writeln!(
            self.writer,
            "  Efficiency:      {}",
            score_label(quality.metrics.efficiency)
        )?;
        writeln!(
            self.writer,
            "  Maintainability: {}",
            score_label(quality.metrics.maintainability)
        )?;

        if !analysis.data_structures.is_empty() {
            writeln!(self.writer, "{}", "Data Structures".bold())?;
            for summary in &analysis.data_structures {
                let lines: Vec<String> = summary.lines.iter().map(ToString::to_string).collect();
                writeln!(
                    self.writer,
                    "  {:<10} x{:<3} lines {}",
                    summary.name,
                    summary.occurrences,
                    lines.join(", ")
                )?;
            }
        }

        if analysis.suggestions.is_empty() {
            writeln!(self.writer, "{}", "No suggestions".green())?;
        } else {
            writeln!(self.writer, "{}", "Suggestions".bold())?;
            for suggestion in &analysis.suggestions {
                writeln!(
                    self.writer,
                    "  [{}] {}",
                    severity_label(suggestion.severity),
                    suggestion.message
                )?;
            }
        }
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_reports(&mut self, reports: &[InputReport]) -> anyhow::Result<()> {
        for (index, report) in reports.iter().enumerate() {
            if index > 0 {
                writeln!(self.writer)?;
            }
            self.write_header(report)?;
            match &report.response {
                AnalysisResponse::Success { analysis, .. } => self.write_analysis(analysis)?,
                AnalysisResponse::Failure { error, message } => {
                    writeln!(self.writer, "{} {}", "Error:".red().bold(), error)?;
                    if let Some(message) = message {
                        writeln!(self.writer, "  {message}")?;
                    }
                }
            }
        }
        Ok(())
    }
}

fn score_label(score: u8) -> ColoredString {
    let text = format!("{score:>3}/100");
    match score {
        80..=100 => text.green(),
        50..=79 => text.yellow(),
        _ => text.red(),
    }
}

fn severity_label(severity: Severity) -> ColoredString {
    let text = severity.to_string();
    match severity {
        Severity::Error => text.red().bold(),
        Severity::Warning => text.yellow(),
        Severity::Info => text.cyan(),
    }
}

pub fn create_writer(format: OutputFormat, writer: Box<dyn Write>) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer)),
    }
}
