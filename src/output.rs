//! Run output: buffered reporting and report formatting.
//!
//! There is no process-wide logger. The [`Reporter`] is an explicit value
//! owned by the caller; pipeline stages receive `&mut Reporter`, and tests
//! construct a silent one and read back the captured lines.
//!
//! Report rendering follows the format/print split: `format_*` functions
//! are pure and return lines, `print_*` wrappers write them to stdout.
//!
//! # Report format
//!
//! ```text
//! Errors
//! 001 messages/en/pages/index.json
//!     Path: sections[2].url
//!     URL: /video-effects/ai-kissingg
//!     Issue: Slug 'ai-kissingg' not found in tools registry
//!     Fix: Use slug 'ai-kissing' (confidence: 91%)
//!
//! Warnings
//! 001 messages/zh/pages/index.json
//!     File not found
//!
//! 6 files checked, 1 with errors; 1 error, 1 warning
//! ```

use crate::validate::ValidationResult;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Severity threshold for reporter output.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        })
    }
}

/// Level-filtered reporter that buffers every emitted line.
#[derive(Debug)]
pub struct Reporter {
    min_level: LogLevel,
    echo: bool,
    lines: Vec<String>,
}

impl Reporter {
    /// Reporter that echoes to stdout as it buffers.
    pub fn new(min_level: LogLevel) -> Self {
        Self {
            min_level,
            echo: true,
            lines: Vec::new(),
        }
    }

    /// Buffer-only reporter for tests and embedding callers.
    pub fn silent(min_level: LogLevel) -> Self {
        Self {
            min_level,
            echo: false,
            lines: Vec::new(),
        }
    }

    pub fn debug(&mut self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message.as_ref());
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.log(LogLevel::Warn, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message.as_ref());
    }

    fn log(&mut self, level: LogLevel, message: &str) {
        if level < self.min_level {
            return;
        }
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{timestamp}] {level}: {message}");
        if self.echo {
            println!("{line}");
        }
        self.lines.push(line);
    }

    /// Captured lines in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }
}

// ============================================================================
// Validation report rendering
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Render a validation result as display lines.
pub fn format_report(result: &ValidationResult) -> Vec<String> {
    let mut lines = Vec::new();

    if !result.errors.is_empty() {
        lines.push("Errors".to_string());
        for (pos, error) in result.errors.iter().enumerate() {
            lines.push(format!("{} {}", format_index(pos + 1), error.file));
            lines.push(format!("    Path: {}", error.path));
            lines.push(format!("    URL: {}", error.current_url));
            lines.push(format!("    Issue: {}", error.issue));
            if let Some(fix) = &error.suggested_fix {
                lines.push(format!("    Fix: {fix}"));
            }
        }
        lines.push(String::new());
    }

    if !result.warnings.is_empty() {
        lines.push("Warnings".to_string());
        for (pos, warning) in result.warnings.iter().enumerate() {
            lines.push(format!("{} {}", format_index(pos + 1), warning.file));
            lines.push(format!("    {}", warning.message));
        }
        lines.push(String::new());
    }

    let s = &result.summary;
    lines.push(format!(
        "{} files checked, {} with errors; {} {}, {} {}",
        s.total_files,
        s.files_with_errors,
        s.total_errors,
        if s.total_errors == 1 { "error" } else { "errors" },
        s.total_warnings,
        if s.total_warnings == 1 {
            "warning"
        } else {
            "warnings"
        },
    ));

    lines
}

/// Print a validation result to stdout.
pub fn print_report(result: &ValidationResult) {
    for line in format_report(result) {
        println!("{line}");
    }
}

/// Write a validation result as pretty JSON into `report_dir`.
///
/// The filename embeds a sortable timestamp, so successive runs coexist.
/// Returns the written path.
pub fn write_report(result: &ValidationResult, report_dir: &Path) -> io::Result<PathBuf> {
    let timestamp = Utc::now()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
        .replace([':', '.'], "-");
    let path = report_dir.join(format!("validation-report.{timestamp}.json"));
    fs::create_dir_all(report_dir)?;
    let json = serde_json::to_string_pretty(result)?;
    fs::write(&path, json)?;
    Ok(path)
}
