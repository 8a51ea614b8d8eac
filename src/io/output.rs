use crate::core::AnalysisResults;
use colored::*;
use std::io::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

pub trait OutputWriter {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()>;
}

pub fn create_writer<W: Write + 'static>(writer: W, format: OutputFormat) -> Box<dyn OutputWriter> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new()),
    }
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
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(results)?;
        self.writer.write_all(json.as_bytes())?;
        Ok(())
    }
}

pub struct MarkdownWriter<W: Write> {
    writer: W,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_header(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "# Cohesion Analysis Report")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            results.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        writeln!(self.writer, "Project: {}", results.project_path.display())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        writeln!(self.writer, "## Summary")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|--------|-------|")?;
        writeln!(self.writer, "| Files analyzed | {} |", results.files_analyzed)?;
        writeln!(self.writer, "| Types examined | {} |", results.types_examined)?;
        writeln!(
            self.writer,
            "| Types below size guards | {} |",
            results.types_skipped
        )?;
        writeln!(
            self.writer,
            "| Low-cohesion types | {} |",
            results.findings.len()
        )?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_findings(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        if results.findings.is_empty() {
            writeln!(self.writer, "No low-cohesion types found.")?;
            return Ok(());
        }

        writeln!(self.writer, "## Low-Cohesion Types")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "| Type | Location | Score | Disjoint pairs | Fields | Methods |"
        )?;
        writeln!(
            self.writer,
            "|------|----------|-------|----------------|--------|---------|"
        )?;
        for finding in &results.findings {
            writeln!(
                self.writer,
                "| `{}` | {}:{} | {} | {}/{} | {} | {} |",
                finding.type_name,
                finding.file.display(),
                finding.line,
                finding.formatted_score(),
                finding.disjoint_pairs,
                finding.total_pairs,
                finding.field_count,
                finding.method_count,
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        self.write_header(results)?;
        self.write_summary(results)?;
        self.write_findings(results)?;
        Ok(())
    }
}

pub struct TerminalWriter;

impl Default for TerminalWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalWriter {
    pub fn new() -> Self {
        Self
    }
}

impl OutputWriter for TerminalWriter {
    fn write_results(&mut self, results: &AnalysisResults) -> anyhow::Result<()> {
        print_header();
        print_summary(results);
        print_findings(results);
        Ok(())
    }
}

fn print_header() {
    println!("{}", "Cohesionmap Analysis Report".bold().blue());
    println!("{}", "===========================".blue());
    println!();
}

fn print_summary(results: &AnalysisResults) {
    println!("{}", "Summary:".bold());
    println!("  Files analyzed: {}", results.files_analyzed);
    println!("  Types examined: {}", results.types_examined);
    println!("  Types below size guards: {}", results.types_skipped);

    let count_display = if results.findings.is_empty() {
        "0".green().to_string()
    } else {
        results.findings.len().to_string().red().to_string()
    };
    println!("  Low-cohesion types: {count_display}");
    println!();
}

fn print_findings(results: &AnalysisResults) {
    if results.findings.is_empty() {
        println!("{}", "No low-cohesion types found.".green());
        return;
    }

    println!("{}", "Low-cohesion types:".yellow().bold());
    for finding in &results.findings {
        let score = finding.formatted_score();
        let score_colored = if finding.score > 0.8 {
            score.red()
        } else {
            score.yellow()
        };
        println!(
            "  {} ({}:{}) score {} ({}/{} disjoint pairs, {} fields, {} methods)",
            finding.type_name.bold(),
            finding.file.display(),
            finding.line,
            score_colored,
            finding.disjoint_pairs,
            finding.total_pairs,
            finding.field_count,
            finding.method_count,
        );
    }
    println!();
}
