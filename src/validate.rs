//! Validation pipeline: files → documents → URLs → result.
//!
//! The pipeline is a straight line with no shared state: each configured
//! file is read, scanned for effect URLs, and every URL is checked against
//! the grammar and the registry. File-level failures (missing, unreadable,
//! unparsable) become warnings and the run continues with the next file —
//! malformed content is exactly what this tool exists to find, so nothing
//! short of a broken invocation terminates a run early.
//!
//! Result ordering is the encounter order: files in list order, URLs in
//! document order within each file.

use crate::config::LintConfig;
use crate::matcher::find_best_match;
use crate::output::Reporter;
use crate::registry::{Category, Registry, RegistryError};
use crate::scan;
use crate::urls::parse_effect_url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// One URL problem found in one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub file: String,
    /// Structural location within the document, e.g. `sections[2].url`.
    pub path: String,
    pub current_url: String,
    pub issue: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
}

/// A recoverable, non-content problem with a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationWarning {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub total_files: usize,
    pub files_with_errors: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
}

/// Outcome of a full validation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
    pub summary: ValidationSummary,
}

impl ValidationResult {
    /// True when no errors were found. Warnings alone do not fail a run.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validate one URL against the grammar and the registry.
///
/// Three classes of finding, first hit wins:
/// - grammar violations, reported with the parser's messages joined and no
///   suggested fix;
/// - unknown slug, with a fuzzy-match suggestion scoped to the category the
///   path prefix implies;
/// - known slug whose registry category disagrees with the path prefix,
///   with the corrected path as the suggestion.
pub fn validate_url(
    registry: &Registry,
    url: &str,
    file: &str,
    json_path: &str,
) -> Option<ValidationError> {
    let parsed = parse_effect_url(url);

    if !parsed.is_valid() {
        return Some(ValidationError {
            file: file.to_string(),
            path: json_path.to_string(),
            current_url: url.to_string(),
            issue: parsed.errors.join("; "),
            suggested_fix: None,
        });
    }

    let slug = parsed.slug.as_deref()?;

    if !registry.exists(slug) {
        let category = parsed.prefix.unwrap_or(Category::Photo);
        let suggestion = match find_best_match(registry, slug, Some(category)) {
            Some(m) => format!(
                "Use slug '{}' (confidence: {:.0}%)",
                m.slug,
                m.confidence * 100.0
            ),
            None => "No similar slug found".to_string(),
        };
        return Some(ValidationError {
            file: file.to_string(),
            path: json_path.to_string(),
            current_url: url.to_string(),
            issue: format!("Slug '{slug}' not found in tools registry"),
            suggested_fix: Some(suggestion),
        });
    }

    if let (Some(prefix), Some(tool)) = (parsed.prefix, registry.get(slug)) {
        if tool.category != prefix {
            return Some(ValidationError {
                file: file.to_string(),
                path: json_path.to_string(),
                current_url: url.to_string(),
                issue: format!(
                    "Tool type mismatch: '{slug}' is a {} tool but URL uses {}",
                    tool.category,
                    prefix.path_prefix()
                ),
                suggested_fix: Some(format!(
                    "Change path to {}/{slug}",
                    tool.category.path_prefix()
                )),
            });
        }
    }

    None
}

/// Validate one configuration file.
///
/// Missing, unreadable, and unparsable files become warnings; URL problems
/// become errors. A failure here never aborts the surrounding run.
pub fn validate_file(
    registry: &Registry,
    path: &Path,
    reporter: &mut Reporter,
) -> (Vec<ValidationError>, Vec<ValidationWarning>) {
    let file = path.display().to_string();
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if !path.exists() {
        warnings.push(ValidationWarning {
            file,
            message: "File not found".to_string(),
        });
        return (errors, warnings);
    }

    let parsed: Result<Value, String> = fs::read_to_string(path)
        .map_err(|e| e.to_string())
        .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
    let document = match parsed {
        Ok(document) => document,
        Err(err) => {
            warnings.push(ValidationWarning {
                file,
                message: format!("Failed to process file: {err}"),
            });
            return (errors, warnings);
        }
    };

    let occurrences = scan::find_effect_urls(&document);
    reporter.debug(format!(
        "Found {} effect URLs in {file}",
        occurrences.len()
    ));

    for occurrence in occurrences {
        if let Some(error) = validate_url(registry, &occurrence.url, &file, &occurrence.path) {
            errors.push(error);
        }
    }

    (errors, warnings)
}

/// Validate every file in list order, accumulating all findings.
pub fn validate_files(
    registry: &Registry,
    paths: &[PathBuf],
    reporter: &mut Reporter,
) -> ValidationResult {
    reporter.info("Starting validation...");

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut files_with_errors = BTreeSet::new();

    for path in paths {
        reporter.info(format!("Validating {}...", path.display()));
        let (file_errors, file_warnings) = validate_file(registry, path, reporter);

        if !file_errors.is_empty() {
            files_with_errors.insert(path.clone());
        }
        errors.extend(file_errors);
        warnings.extend(file_warnings);
    }

    let summary = ValidationSummary {
        total_files: paths.len(),
        files_with_errors: files_with_errors.len(),
        total_errors: errors.len(),
        total_warnings: warnings.len(),
    };
    reporter.info(format!(
        "Validation complete. Found {} errors in {} files.",
        summary.total_errors, summary.files_with_errors
    ));

    ValidationResult {
        errors,
        warnings,
        summary,
    }
}

/// Top-level entry: load the registry and validate the configured files.
pub fn run(config: &LintConfig, reporter: &mut Reporter) -> Result<ValidationResult, RegistryError> {
    let registry = Registry::load(&config.registry)?;
    Ok(validate_files(&registry, &config.files, reporter))
}
