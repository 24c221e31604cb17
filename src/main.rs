use clap::{Parser, Subcommand};
use effects_lint::{backup, config, fix, output, registry, validate};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "effects-lint")]
#[command(about = "Validate and fix effect URLs in locale configuration files")]
#[command(long_about = "\
Validate and fix effect URLs in locale configuration files

Every embedded URL of the form /video-effects/<slug> or
/photo-effects/<slug> is parsed against the strict grammar and
cross-checked against the tools registry. Unknown slugs get fuzzy-match
suggestions; slugs filed under the wrong category get the corrected path.

The fix command applies only unambiguous corrections, and copies every
file it touches into the backup directory first.

Run 'effects-lint gen-config' to generate a documented lint.toml.")]
#[command(version)]
struct Cli {
    /// Path to the run configuration
    #[arg(long, default_value = "lint.toml", global = true)]
    config: PathBuf,

    /// Show debug output regardless of the configured log level
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check configured files against the tools registry
    Validate {
        /// Files to check (overrides the configured list)
        files: Vec<PathBuf>,
        /// Write a JSON report into the configured report directory
        #[arg(long)]
        report: bool,
    },
    /// Rewrite URLs that have an unambiguous correction
    Fix {
        /// Files to fix (overrides the configured list)
        files: Vec<PathBuf>,
        /// Show what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// List backups in the configured backup directory
    Backups,
    /// Restore a file from a backup
    Restore {
        /// Backup file to restore from
        backup: PathBuf,
        /// Destination file to overwrite
        target: PathBuf,
    },
    /// Print a stock lint.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { files, report } => {
            let cfg = config::load_config(&cli.config)?;
            let mut reporter = make_reporter(&cfg, cli.verbose);
            let reg = registry::Registry::load(&cfg.registry)?;
            let paths = if files.is_empty() { cfg.files.clone() } else { files };

            let result = validate::validate_files(&reg, &paths, &mut reporter);
            output::print_report(&result);
            if report {
                let path = output::write_report(&result, &cfg.report_dir)?;
                println!("Report written to {}", path.display());
            }

            if result.is_valid() {
                println!("==> All URLs are valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("==> Validation failed");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Fix { files, dry_run } => {
            let cfg = config::load_config(&cli.config)?;
            let mut reporter = make_reporter(&cfg, cli.verbose);
            let reg = registry::Registry::load(&cfg.registry)?;
            let paths = if files.is_empty() { cfg.files.clone() } else { files };

            let fix_report =
                fix::fix_files(&reg, &paths, &cfg.backup_dir, dry_run, &mut reporter)?;
            for line in fix::format_fix_report(&fix_report) {
                println!("{line}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Backups => {
            let cfg = config::load_config(&cli.config)?;
            let backups = backup::list_backups(&cfg.backup_dir);
            if backups.is_empty() {
                println!("No backups in {}", cfg.backup_dir.display());
            }
            for path in backups {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Restore { backup: backup_path, target } => {
            backup::restore_from_backup(&backup_path, &target)?;
            println!("Restored {} from {}", target.display(), backup_path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn make_reporter(cfg: &config::LintConfig, verbose: bool) -> output::Reporter {
    let level = if verbose {
        output::LogLevel::Debug
    } else {
        cfg.log_level
    };
    output::Reporter::new(level)
}
