//! Output formatting and writing utilities
//!
//! This module provides utilities for formatting and writing output
//! in various formats (JSON, YAML, human-readable) for validation reports,
//! operation checks and persistence plans.

use crate::cli::OutputFormat;
use crate::error::Result;
use crate::logging::redaction;
use colored::Colorize;
use gallery_core::{
    GalleryBounds, ImageItem, ImageSource, Operation, ReconcilePlan, StatusLabel, ValidationResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::io::{self, IsTerminal, Write};
use tracing::{debug, trace};

/// Width of the text fill bar in human output
const FILL_BAR_WIDTH: usize = 20;

/// Real-time validation outcome for one document
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub file: String,
    pub bounds: GalleryBounds,
    pub status: StatusLabel,
    pub minimum_label: &'static str,
    pub maximum_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_message: Option<String>,
    pub result: ValidationResult,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageSummary>,
}

impl ValidationReport {
    pub fn new(file: impl Into<String>, bounds: GalleryBounds, result: ValidationResult) -> Self {
        Self {
            file: file.into(),
            bounds,
            status: result.status(&bounds),
            minimum_label: result.counts.minimum_label(&bounds),
            maximum_label: result.counts.maximum_label(&bounds),
            primary_message: result.primary_message().map(str::to_string),
            result,
            images: Vec::new(),
        }
    }

    /// Attach one row per image, visible ones first in display order
    pub fn with_images(mut self, items: &[ImageItem]) -> Self {
        let mut rows: Vec<&ImageItem> = items.iter().collect();
        rows.sort_by_key(|item| (item.is_deleted, item.order));
        self.images = rows.into_iter().map(ImageSummary::from).collect();
        self
    }
}

/// One image row in a detailed report
#[derive(Debug, Clone, Serialize)]
pub struct ImageSummary {
    pub identity_key: String,
    pub order: i64,
    pub state: &'static str,
    pub stage: String,
    pub location: String,
}

impl From<&ImageItem> for ImageSummary {
    fn from(item: &ImageItem) -> Self {
        let state = if item.is_deleted {
            "deleted"
        } else if item.is_existing {
            "existing"
        } else {
            "new"
        };
        let location = match &item.source {
            ImageSource::Remote { url } => redaction::redact_sensitive(url),
            ImageSource::Local(file) => file.name.clone(),
        };
        Self {
            identity_key: item.identity_key.clone(),
            order: item.order,
            state,
            stage: item.upload_stage.to_string(),
            location,
        }
    }
}

/// Guard verdict for one operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationReport {
    pub file: String,
    pub operation: Operation,
    pub allowed: bool,
    pub result: ValidationResult,
}

/// Persistence plan for one document
#[derive(Debug, Clone, Serialize)]
pub struct PlanReport {
    pub file: String,
    pub summary: String,
    pub plan: ReconcilePlan,
}

impl PlanReport {
    pub fn new(file: impl Into<String>, plan: ReconcilePlan) -> Self {
        Self {
            file: file.into(),
            summary: plan.summary(),
            plan,
        }
    }
}

/// Trait for formatting output with specialized support for gallery reports
pub trait OutputFormatter {
    /// Format a serializable value
    fn format<T: Serialize>(&self, value: &T) -> Result<String>;

    /// Format a validation report with counts and labels
    fn format_validation_report(&self, report: &ValidationReport) -> Result<String>;

    /// Format an operation guard verdict
    fn format_operation_report(&self, report: &OperationReport) -> Result<String>;

    /// Format a persistence plan
    fn format_plan_report(&self, report: &PlanReport) -> Result<String>;
}

impl OutputFormatter for OutputFormat {
    fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        match self {
            OutputFormat::Json => Ok(serde_json::to_string(value)?),
            OutputFormat::JsonPretty => Ok(serde_json::to_string_pretty(value)?),
            OutputFormat::Yaml => Ok(serde_yaml::to_string(value)?),
            // No dedicated human layout for arbitrary values
            OutputFormat::Human => Ok(serde_json::to_string_pretty(value)?),
        }
    }

    fn format_validation_report(&self, report: &ValidationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_validation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_operation_report(&self, report: &OperationReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_operation_report_human(report)),
            _ => self.format(report),
        }
    }

    fn format_plan_report(&self, report: &PlanReport) -> Result<String> {
        match self {
            OutputFormat::Human => Ok(format_plan_report_human(report)),
            _ => self.format(report),
        }
    }
}

/// Output writer that handles different output formats and colors
pub struct OutputWriter {
    format: OutputFormat,
    use_color: bool,
    show_progress: bool,
    quiet: bool,
    writer: Box<dyn Write>,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, use_color: bool, quiet: bool, show_progress: bool) -> Self {
        Self {
            format,
            use_color,
            show_progress: show_progress && !quiet && io::stdout().is_terminal(),
            quiet,
            writer: Box::new(io::stdout()),
        }
    }

    /// Create an output writer with a custom writer
    #[cfg(test)]
    pub fn with_writer(format: OutputFormat, use_color: bool, quiet: bool, writer: Box<dyn Write>) -> Self {
        Self {
            format,
            use_color,
            show_progress: false,
            quiet,
            writer,
        }
    }

    /// Get the output format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a line of output
    pub fn writeln(&mut self, content: &str) -> Result<()> {
        writeln!(self.writer, "{}", content)?;
        self.writer.flush()?;
        Ok(())
    }

    /// Write an info message
    pub fn info(&mut self, message: &str) -> Result<()> {
        debug!("Output info: {}", message);

        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&format!("{} {}", "ℹ".blue(), message))
        } else {
            self.writeln(&format!("INFO: {}", message))
        }
    }

    /// Write a success message
    pub fn success(&mut self, message: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.green().to_string())
        } else {
            self.writeln(message)
        }
    }

    /// Write a warning message
    pub fn warning(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.yellow().to_string())
        } else {
            self.writeln(&format!("WARNING: {}", message))
        }
    }

    /// Write an error message
    pub fn error(&mut self, message: &str) -> Result<()> {
        if self.format != OutputFormat::Human {
            return Ok(());
        }

        if self.use_color {
            self.writeln(&message.red().to_string())
        } else {
            self.writeln(&format!("ERROR: {}", message))
        }
    }

    /// Write a section header
    pub fn section(&mut self, title: &str) -> Result<()> {
        if self.quiet || self.format != OutputFormat::Human {
            return Ok(());
        }

        self.writeln("")?;
        if self.use_color {
            self.writeln(&format!("═══ {} ═══", title).bright_blue().to_string())
        } else {
            self.writeln(&format!("=== {} ===", title))
        }
    }

    /// Write data in the configured format
    pub fn data<T: Serialize>(&mut self, value: &T) -> Result<()> {
        let mut value_json = serde_json::to_value(value)?;
        redaction::redact_json_value(&mut value_json);
        trace!(
            "Outputting data: {}",
            serde_json::to_string(&value_json).unwrap_or_else(|_| "[failed to serialize]".to_string())
        );

        let formatted = self.format.format(value)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a validation report
    pub fn validation_report(&mut self, report: &ValidationReport) -> Result<()> {
        let formatted = self.format.format_validation_report(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Write several validation reports as one document in machine formats
    pub fn validation_reports(&mut self, reports: &[ValidationReport]) -> Result<()> {
        if self.format == OutputFormat::Human {
            for report in reports {
                self.section(&report.file)?;
                self.validation_report(report)?;
            }
            Ok(())
        } else if let [single] = reports {
            self.validation_report(single)
        } else {
            self.data(&reports)
        }
    }

    /// Write an operation guard verdict
    pub fn operation_report(&mut self, report: &OperationReport) -> Result<()> {
        let formatted = self.format.format_operation_report(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Write a persistence plan
    pub fn plan_report(&mut self, report: &PlanReport) -> Result<()> {
        let formatted = self.format.format_plan_report(report)?;
        self.writeln(formatted.trim_end())
    }

    /// Create a progress bar for multi-file runs
    pub fn progress_bar(&self, length: u64, message: &str) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .ok()?
            .progress_chars("#>-");
        let pb = ProgressBar::new(length);
        pb.set_style(style);
        pb.set_message(message.to_string());
        Some(pb)
    }
}

/// Text bar showing visible images against the maximum
fn fill_bar(ratio: f64) -> String {
    let filled = ((ratio * FILL_BAR_WIDTH as f64).round() as usize).min(FILL_BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(FILL_BAR_WIDTH - filled))
}

fn push_messages(output: &mut String, result: &ValidationResult) {
    for error in &result.errors {
        output.push_str(&format!("  ✗ {}\n", error));
    }
    for warning in &result.warnings {
        output.push_str(&format!("  ⚠ {}\n", warning));
    }
}

/// Format a validation report for human reading
fn format_validation_report_human(report: &ValidationReport) -> String {
    let counts = &report.result.counts;
    let mut output = String::new();

    output.push_str(&format!("Status: {}\n", report.status));
    output.push_str(&format!(
        "Images: {} visible ({} existing, {} new), {} deleted\n",
        counts.visible, counts.existing, counts.new, counts.deleted
    ));
    if counts.pending > 0 || counts.failed > 0 {
        output.push_str(&format!(
            "Uploads: {} in flight, {} failed\n",
            counts.pending, counts.failed
        ));
    }
    output.push_str(&format!(
        "Minimum {}: {}   Maximum {}: {}\n",
        report.bounds.min_images, report.minimum_label, report.bounds.max_images, report.maximum_label
    ));
    output.push_str(&format!(
        "{} {}/{}\n",
        fill_bar(counts.fill_ratio(&report.bounds)),
        counts.visible,
        report.bounds.max_images
    ));

    push_messages(&mut output, &report.result);

    if !report.images.is_empty() {
        output.push('\n');
        for image in &report.images {
            output.push_str(&format!(
                "  {:>3}  {:<8}  {:<16}  {}  ({})\n",
                image.order, image.state, image.stage, image.location, image.identity_key
            ));
        }
    }

    output
}

/// Format an operation verdict for human reading
fn format_operation_report_human(report: &OperationReport) -> String {
    let mut output = String::new();
    let verdict = if report.allowed { "allowed" } else { "not allowed" };

    output.push_str(&format!(
        "{} {}: {} ({} visible)\n",
        if report.allowed { "✓" } else { "✗" },
        report.operation,
        verdict,
        report.result.counts.visible
    ));
    push_messages(&mut output, &report.result);

    output
}

/// Format a persistence plan for human reading
fn format_plan_report_human(report: &PlanReport) -> String {
    let plan = &report.plan;
    let mut output = String::new();

    output.push_str(&format!("Plan: {}\n", report.summary));

    if !plan.to_create.is_empty() {
        output.push_str("Create:\n");
        for item in &plan.to_create {
            output.push_str(&format!(
                "  {:>3}  {}\n",
                item.order,
                item.source.url().map(redaction::redact_sensitive).unwrap_or_default()
            ));
        }
    }

    if !plan.to_update.is_empty() {
        output.push_str("Update:\n");
        for item in &plan.to_update {
            output.push_str(&format!(
                "  {:>3}  id {}\n",
                item.order,
                item.persisted_id.as_deref().unwrap_or("?")
            ));
        }
    }

    if !plan.to_delete.is_empty() {
        output.push_str(&format!("Delete: {}\n", plan.to_delete.join(", ")));
    }

    if plan.is_empty() {
        output.push_str("Nothing to persist\n");
    }

    output
}

/// In-memory sink that a test can read back after handing it to an `OutputWriter`
#[cfg(test)]
#[derive(Clone, Default)]
pub struct SharedBuffer(std::rc::Rc<std::cell::RefCell<Vec<u8>>>);

#[cfg(test)]
impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

#[cfg(test)]
impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
