//! Run summary formatters.

use std::io::Write;
use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::core::Result;
use crate::report::WrittenReport;
use crate::survey::SurveySummary;

/// Output format enum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    Json,
    Markdown,
    #[default]
    Text,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => Format::Json,
            OutputFormat::Markdown => Format::Markdown,
            OutputFormat::Text => Format::Text,
        }
    }
}

/// Everything printed after a run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary<'a> {
    pub reports_dir: &'a Path,
    #[serde(flatten)]
    pub survey: &'a SurveySummary,
    pub reports: &'a [WrittenReport],
}

impl Format {
    pub fn write_summary<W: Write>(&self, run: &RunSummary<'_>, writer: &mut W) -> Result<()> {
        match self {
            Format::Json => format_json(run, writer),
            Format::Markdown => format_markdown(run, writer),
            Format::Text => format_text(run, writer),
        }
    }
}

fn format_json<W: Write>(run: &RunSummary<'_>, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, run)?;
    writeln!(writer)?;
    Ok(())
}

fn format_markdown<W: Write>(run: &RunSummary<'_>, writer: &mut W) -> Result<()> {
    let survey = run.survey;
    writeln!(writer, "# README Survey\n")?;
    writeln!(writer, "**Repositories**: {}\n", survey.repositories)?;
    writeln!(writer, "**Analyzed**: {}\n", survey.documents_analyzed)?;
    writeln!(writer, "**Missed**: {}\n", survey.misses.len())?;
    writeln!(
        writer,
        "**Duration**: {:.2}s\n",
        survey.duration.as_secs_f64()
    )?;

    writeln!(writer, "## Reports\n")?;
    writeln!(writer, "| File | Rows |")?;
    writeln!(writer, "| --- | --- |")?;
    for report in run.reports {
        writeln!(writer, "| {} | {} |", report.kind.file_name(), report.rows)?;
    }
    writeln!(writer)?;

    if !survey.misses.is_empty() {
        writeln!(writer, "## Misses\n")?;
        writeln!(writer, "| Repository | Reason |")?;
        writeln!(writer, "| --- | --- |")?;
        for miss in &survey.misses {
            writeln!(writer, "| {} | {} |", miss.repository, miss.reason)?;
        }
        writeln!(writer)?;
    }
    Ok(())
}

fn format_text<W: Write>(run: &RunSummary<'_>, writer: &mut W) -> Result<()> {
    let survey = run.survey;
    writeln!(
        writer,
        "{} {} repositories in {:.2}s",
        "Surveyed".bold(),
        survey.repositories,
        survey.duration.as_secs_f64()
    )?;
    writeln!(writer, "  Analyzed: {}", survey.documents_analyzed)?;
    writeln!(writer, "  Missed: {}", survey.misses.len())?;
    for miss in &survey.misses {
        writeln!(
            writer,
            "    {} ({})",
            miss.repository.yellow(),
            miss.reason
        )?;
    }

    writeln!(
        writer,
        "{} {}",
        "Reports written to".bold(),
        run.reports_dir.display()
    )?;
    for report in run.reports {
        writeln!(
            writer,
            "  {:<28} {} rows",
            report.kind.file_name(),
            report.rows
        )?;
    }
    Ok(())
}
