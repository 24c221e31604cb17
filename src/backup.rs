//! Timestamped file backups for safe corrective mutation.
//!
//! Backups are purely additive: every [`create_backup`] call copies the
//! source into the backup directory under a fresh
//! `<basename>.<timestamp>.backup` name, so multiple backups of the same
//! file coexist and sort chronologically. Nothing here ever deletes or
//! overwrites a backup; restoration is a separate, explicit operation.

use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Backup file not found: {0}")]
    MissingBackup(PathBuf),
}

/// Timestamp component of backup filenames: UTC RFC 3339 with `:` and `.`
/// replaced so the name is filesystem-safe everywhere. Microsecond
/// precision keeps rapid successive backups distinct and sortable.
fn backup_timestamp() -> String {
    Utc::now()
        .to_rfc3339_opts(SecondsFormat::Micros, true)
        .replace([':', '.'], "-")
}

/// Copy `file` into `backup_dir` under a timestamped name, creating the
/// directory if needed. Returns the backup path.
pub fn create_backup(file: &Path, backup_dir: &Path) -> Result<PathBuf, BackupError> {
    let base = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let backup_path = backup_dir.join(format!("{base}.{}.backup", backup_timestamp()));

    fs::create_dir_all(backup_dir)?;
    fs::copy(file, &backup_path)?;
    Ok(backup_path)
}

/// Back up every existing file in `files`; missing inputs are skipped.
/// Returns original → backup pairs in input order.
pub fn create_backups(
    files: &[PathBuf],
    backup_dir: &Path,
) -> Result<Vec<(PathBuf, PathBuf)>, BackupError> {
    let mut backups = Vec::new();
    for file in files {
        if file.exists() {
            let backup_path = create_backup(file, backup_dir)?;
            backups.push((file.clone(), backup_path));
        }
    }
    Ok(backups)
}

/// Overwrite `original` with the contents of `backup`.
///
/// Fails with [`BackupError::MissingBackup`] when the backup does not
/// exist.
pub fn restore_from_backup(backup: &Path, original: &Path) -> Result<(), BackupError> {
    if !backup.exists() {
        return Err(BackupError::MissingBackup(backup.to_path_buf()));
    }
    fs::copy(backup, original)?;
    Ok(())
}

/// All `.backup` files in `dir`, sorted by name (and therefore by
/// timestamp). A missing directory yields an empty list, not an error.
pub fn list_backups(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut backups: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map(|name| name.to_string_lossy().ends_with(".backup"))
                .unwrap_or(false)
        })
        .collect();
    backups.sort();
    backups
}
