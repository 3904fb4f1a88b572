//! pkgbump - CLI entry point.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use semver::Version;
use tracing_subscriber::EnvFilter;

use pkgbump::bump::sink::{DEFAULT_FOLLOW_UP_LOG, DEFAULT_FOLLOW_UP_TOOL};
use pkgbump::bump::{BumpReport, ConsoleSink, FollowUpLog};
use pkgbump::deps::{DepsReport, SectionChange, DEFAULT_SCOPE_PREFIX};
use pkgbump::package::MANIFEST_FILE;
use pkgbump::{
    run_bump, run_update_deps, AllowList, BumpConfig, BumpType, IncrementSource, PackageOutcome,
    UpdateDepsConfig,
};

/// Bump package versions and prepend changelog entries across a monorepo.
#[derive(Parser, Debug)]
#[command(name = "pkgbump")]
#[command(about = "Bump package versions and prepend changelog entries across a monorepo")]
#[command(version)]
#[command(arg_required_else_help = true)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the run report as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Bump the patch version of every package and print what changed
    Patch {
        /// Directory containing the <scope>-<name> package directories
        package_dir: PathBuf,

        /// Changelog section header
        #[arg(allow_hyphen_values = true)]
        header: String,

        /// Changelog bullet message
        #[arg(allow_hyphen_values = true)]
        message: String,

        /// Only bump these packages (base names, e.g. `bitcoin` for `xchain-bitcoin`)
        packages: Vec<String>,
    },

    /// Bump major, minor or patch and write follow-up updateDeps commands to a file
    Release {
        /// Directory containing the <scope>-<name> package directories
        package_dir: PathBuf,

        /// One of: major, minor, patch
        version_type: String,

        /// Changelog section header
        #[arg(allow_hyphen_values = true)]
        header: String,

        /// Changelog bullet message
        #[arg(allow_hyphen_values = true)]
        message: String,

        /// Only bump these packages (base names, e.g. `bitcoin` for `xchain-bitcoin`)
        packages: Vec<String>,

        /// File receiving one follow-up command per bumped package
        #[arg(short = 'o', long, default_value = DEFAULT_FOLLOW_UP_LOG)]
        output: PathBuf,

        /// Tool named in the follow-up commands
        #[arg(long, default_value = DEFAULT_FOLLOW_UP_TOOL)]
        tool: String,
    },

    /// Point dev and peer dependency ranges of all packages at a released version
    UpdateDeps {
        /// Released package (base name unless --full-name is given)
        package_name: String,

        /// Released version; ranges become ^<VERSION>
        version: Version,

        /// Treat PACKAGE_NAME as the full npm package name
        #[arg(long)]
        full_name: bool,

        /// Root searched recursively for package.json files
        #[arg(long, default_value = "packages")]
        packages_dir: PathBuf,

        /// Prefix turning a base name into an npm package name
        #[arg(long, default_value = DEFAULT_SCOPE_PREFIX)]
        scope_prefix: String,
    },
}

fn main() -> Result<ExitCode> {
    // Usage errors exit with 1, help and version with 0
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            e.print().context("Failed to print usage")?;
            return Ok(if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            });
        }
    };

    init_tracing(cli.verbose);

    match cli.command {
        Command::Patch {
            package_dir,
            header,
            message,
            packages,
        } => {
            let config = BumpConfig {
                package_dir,
                increment: IncrementSource::Fixed(BumpType::Patch),
                header,
                message,
                allow_list: AllowList::new(packages),
                date: Utc::now().date_naive(),
            };

            // Keep stdout clean for the JSON report
            let result = if cli.json {
                run_bump(&config, &mut ConsoleSink::new(std::io::stderr()))
            } else {
                run_bump(&config, &mut ConsoleSink::new(std::io::stdout().lock()))
            };
            let report = result.context("Version bump failed")?;

            finish_bump(&report, cli.json, None)
        }
        Command::Release {
            package_dir,
            version_type,
            header,
            message,
            packages,
            output,
            tool,
        } => {
            let config = BumpConfig {
                package_dir,
                increment: IncrementSource::Requested(version_type),
                header,
                message,
                allow_list: AllowList::new(packages),
                date: Utc::now().date_naive(),
            };

            let mut sink = FollowUpLog::new(output, tool);
            let report = run_bump(&config, &mut sink)
                .context("Version bump failed")?;

            finish_bump(&report, cli.json, Some(&sink))
        }
        Command::UpdateDeps {
            package_name,
            version,
            full_name,
            packages_dir,
            scope_prefix,
        } => {
            let config = UpdateDepsConfig {
                packages_dir,
                package_name,
                version,
                full_name,
                scope_prefix,
            };

            let report = run_update_deps(&config).context("Dependency update failed")?;

            finish_update_deps(&config, &report, cli.json)
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Report failures and pick the exit code for a bump run.
fn finish_bump(report: &BumpReport, json: bool, log: Option<&FollowUpLog>) -> Result<ExitCode> {
    for outcome in &report.outcomes {
        if let PackageOutcome::Failed {
            dir,
            manifest_written,
            error,
        } = outcome
        {
            eprintln!("Error: {}: {}", dir.display(), error);
            if *manifest_written {
                eprintln!("  {} already carries the new version", MANIFEST_FILE);
            }
        }
    }

    if json {
        print_json(report)?;
    } else {
        println!("{}", report.summary());
        if let Some(log) = log {
            println!(
                "Wrote {} follow-up command(s) to {}",
                log.lines().len(),
                log.path().display()
            );
        }
    }

    Ok(exit_code(report.has_failures()))
}

/// Print per-manifest changes and pick the exit code for update-deps.
fn finish_update_deps(config: &UpdateDepsConfig, report: &DepsReport, json: bool) -> Result<ExitCode> {
    let dependency = config.dependency_name();

    for failure in &report.failures {
        eprintln!("Error: {}: {}", failure.manifest.display(), failure.error);
    }

    if json {
        print_json(report)?;
        return Ok(exit_code(report.has_failures()));
    }

    for update in &report.updates {
        for (section, change) in &update.sections {
            match change {
                SectionChange::Updated { from, to } => println!(
                    "Updating {} from {} to {} in {} ({})",
                    dependency,
                    from,
                    to,
                    update.manifest.display(),
                    section
                ),
                SectionChange::IncompatibleSpecifier { range } => eprintln!(
                    "Warning: {} in {} ({}) uses an incompatible version specifier: {}",
                    dependency,
                    update.manifest.display(),
                    section,
                    range
                ),
                SectionChange::UpToDate | SectionChange::NotPresent => {}
            }
        }
    }

    let written = report.written().count();
    let manifest_word = if written == 1 { "manifest" } else { "manifests" };
    println!("Updated {} {}", written, manifest_word);

    Ok(exit_code(report.has_failures()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", output).context("Failed to write report")?;
    Ok(())
}

fn exit_code(failed: bool) -> ExitCode {
    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
