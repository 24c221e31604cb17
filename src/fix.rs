//! Corrective rewriting of effect URLs, guarded by backups.
//!
//! The fixer only rewrites URLs with an unambiguous correction:
//!
//! - a known slug under the wrong category prefix is moved to its canonical
//!   prefix;
//! - an unknown slug is replaced by its best fuzzy match when the match
//!   clears [`FIX_CONFIDENCE_FLOOR`];
//! - a URL that fails the grammar outright is rewritten only when the
//!   recovered slug guess resolves to a registry entry (exactly, or by a
//!   match above the floor).
//!
//! Everything else is left for a human: the validator already reported it.
//!
//! Every mutated file gets a timestamped backup first; dry-run mode
//! computes and reports the same changes without touching disk. Rewritten
//! documents keep their key order (`preserve_order`) and are written
//! pretty-printed, matching how the locale files are maintained.

use crate::backup::{self, BackupError};
use crate::matcher::find_best_match;
use crate::output::Reporter;
use crate::registry::{Category, Registry};
use crate::scan;
use crate::urls::{construct_effect_url, extract_slug_from_malformed_url, parse_effect_url};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fuzzy matches below this confidence are reported but never auto-applied.
pub const FIX_CONFIDENCE_FLOOR: f64 = 0.8;

#[derive(Error, Debug)]
pub enum FixError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Backup error: {0}")]
    Backup(#[from] BackupError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One applied (or planned, under dry-run) URL substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixChange {
    pub file: String,
    pub path: String,
    pub old_url: String,
    pub new_url: String,
}

/// Outcome of a fix run.
#[derive(Debug, Default)]
pub struct FixReport {
    pub changes: Vec<FixChange>,
    /// Original path → backup path, one entry per mutated file.
    pub backups: Vec<(PathBuf, PathBuf)>,
    pub files_changed: usize,
    pub dry_run: bool,
}

/// Compute the unambiguous correction for one URL, if any.
fn corrected_url(registry: &Registry, url: &str) -> Option<String> {
    let parsed = parse_effect_url(url);
    let query_type = parsed.query_type().filter(|t| !t.is_empty());

    if parsed.is_valid() {
        let slug = parsed.slug.as_deref()?;

        if let Some(tool) = registry.get(slug) {
            let prefix = parsed.prefix?;
            if tool.category != prefix {
                return Some(construct_effect_url(tool.category, slug, query_type));
            }
            return None;
        }

        let category = parsed.prefix.unwrap_or(Category::Photo);
        let m = find_best_match(registry, slug, Some(category))?;
        if m.confidence < FIX_CONFIDENCE_FLOOR {
            return None;
        }
        return Some(construct_effect_url(m.tool.category, m.slug, query_type));
    }

    // Malformed URL: recover a slug guess and only rewrite when it resolves
    // confidently to a registry entry.
    let guess = extract_slug_from_malformed_url(url)?;
    if let Some(tool) = registry.get(&guess) {
        return Some(construct_effect_url(tool.category, &tool.slug, query_type));
    }
    let m = find_best_match(registry, &guess, parsed.prefix)?;
    if m.confidence < FIX_CONFIDENCE_FLOOR {
        return None;
    }
    Some(construct_effect_url(m.tool.category, m.slug, query_type))
}

/// Apply corrections to every file in list order.
///
/// Unreadable files are warned about and skipped, mirroring the validator's
/// isolation contract. Backup and write failures are hard errors.
pub fn fix_files(
    registry: &Registry,
    paths: &[PathBuf],
    backup_dir: &Path,
    dry_run: bool,
    reporter: &mut Reporter,
) -> Result<FixReport, FixError> {
    let mut report = FixReport {
        dry_run,
        ..Default::default()
    };

    for path in paths {
        let file = path.display().to_string();
        if !path.exists() {
            reporter.warn(format!("{file}: file not found, skipping"));
            continue;
        }

        let parsed: Result<Value, String> = fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| serde_json::from_str(&content).map_err(|e| e.to_string()));
        let mut document = match parsed {
            Ok(document) => document,
            Err(err) => {
                reporter.warn(format!("{file}: failed to process file: {err}"));
                continue;
            }
        };

        let mut changes = Vec::new();
        scan::rewrite_effect_urls(&mut document, &mut |json_path, url| {
            let replacement = corrected_url(registry, url)?;
            changes.push(FixChange {
                file: file.clone(),
                path: json_path.to_string(),
                old_url: url.to_string(),
                new_url: replacement.clone(),
            });
            Some(replacement)
        });

        if changes.is_empty() {
            reporter.debug(format!("{file}: nothing to fix"));
            continue;
        }

        for change in &changes {
            reporter.info(format!(
                "{file}: {} {} -> {}",
                change.path, change.old_url, change.new_url
            ));
        }

        if !dry_run {
            let backup_path = backup::create_backup(path, backup_dir)?;
            report.backups.push((path.clone(), backup_path));
            let json = serde_json::to_string_pretty(&document)?;
            fs::write(path, json)?;
        }

        report.files_changed += 1;
        report.changes.extend(changes);
    }

    Ok(report)
}

/// Render a fix report as display lines.
pub fn format_fix_report(report: &FixReport) -> Vec<String> {
    let mut lines = Vec::new();
    for (pos, change) in report.changes.iter().enumerate() {
        lines.push(format!("{:0>3} {}", pos + 1, change.file));
        lines.push(format!("    Path: {}", change.path));
        lines.push(format!("    {} -> {}", change.old_url, change.new_url));
    }
    if !report.changes.is_empty() {
        lines.push(String::new());
    }
    let verb = if report.dry_run { "Planned" } else { "Applied" };
    lines.push(format!(
        "{verb} {} {} in {} {}",
        report.changes.len(),
        if report.changes.len() == 1 {
            "change"
        } else {
            "changes"
        },
        report.files_changed,
        if report.files_changed == 1 {
            "file"
        } else {
            "files"
        },
    ));
    lines
}
