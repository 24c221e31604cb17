//! # effects-lint
//!
//! Batch validator and fixer for AI-effect URLs embedded in locale
//! configuration files.
//!
//! The storefront's locale pages embed links like
//! `/video-effects/ai-kissing?type=...` throughout their JSON configuration.
//! Those URLs rot: slugs get typo'd, tools move between the video and photo
//! categories, Chinese titles leak into path segments. effects-lint walks
//! the configured documents, checks every embedded URL against a strict
//! grammar and the canonical tool registry, and either reports problems
//! with "did you mean" suggestions or rewrites the unambiguous ones —
//! after taking a timestamped backup.
//!
//! # Pipeline
//!
//! ```text
//! registry.json ─┐
//!                ├─ validate:  files → scan → parse → cross-check → result
//! *.json files ──┤
//!                └─ fix:       files → scan → correct → backup → rewrite
//! ```
//!
//! Each file is processed independently: a missing or unparsable file
//! becomes a warning and the run continues, because malformed content is
//! precisely what the tool exists to surface. A run always terminates with
//! a result; only a broken invocation (unloadable registry or config,
//! restoring from a missing backup) fails hard.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`registry`] | Canonical tool records and the case-insensitive slug index |
//! | [`urls`] | Effect-URL grammar: error-accumulating parser, slug recovery, construction |
//! | [`matcher`] | Levenshtein-based fuzzy slug suggestions |
//! | [`scan`] | Typed JSON tree visitor locating (and rewriting) URL-bearing fields |
//! | [`validate`] | Per-file and whole-run validation producing a `ValidationResult` |
//! | [`fix`] | Backup-guarded corrective rewriting of unambiguous problems |
//! | [`backup`] | Timestamped, additive file snapshots with explicit restore |
//! | [`config`] | `lint.toml` loading and the stock config generator |
//! | [`output`] | Explicit buffered reporter and report formatting/persistence |
//!
//! # Design Decisions
//!
//! ## Collect all problems, don't short-circuit
//!
//! The URL parser keeps checking after the first violation, so one pass
//! over a batch reports everything wrong with every URL. The tool's value
//! is exhaustive diagnosis; first-error-wins would turn a one-shot batch
//! run into a fix-rerun-fix loop.
//!
//! ## An explicit reporter instead of a global logger
//!
//! Pipeline functions take `&mut Reporter`. Tests construct a silent
//! reporter and assert on the captured lines; no process-wide state, no
//! log capture hacks.
//!
//! ## Backups before bytes
//!
//! The fixer never writes a file it hasn't first copied into the backup
//! directory under a timestamped name. Backups are additive and survive
//! until a human deletes them; `restore` is a separate explicit command.
//!
//! ## Document order in, document order out
//!
//! serde_json's `preserve_order` feature keeps scanner traversal and
//! rewritten output in source-document order, which makes result ordering
//! deterministic and diffs of fixed files minimal.

pub mod backup;
pub mod config;
pub mod fix;
pub mod matcher;
pub mod output;
pub mod registry;
pub mod scan;
pub mod urls;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
