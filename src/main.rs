//! colliderlint - finds prefab mesh colliders with negative or non-uniform scale.
//!
//! Usage:
//!   colliderlint [PATH]              Scan a project directory with defaults
//!   colliderlint scan [PATH] ...     Scan with explicit options
//!   colliderlint scan --format json  Emit the full report as JSON
//!   colliderlint --help              Show help

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Context, Result};

use colliderlint_scan::{ScanConfig, ScanDriver, StepOutcome};

#[derive(Parser)]
#[command(
    name = "colliderlint",
    version,
    about = "Finds prefab mesh colliders with negative or non-uniform scale",
    long_about = "colliderlint scans every prefab asset in a project, walks its \
                  transform hierarchy, and flags mesh colliders whose owning node \
                  has a negative or non-uniform local scale - a known source of \
                  inverted or distorted collision geometry.\n\n\
                  Findings are written to a tab-separated report file; Ctrl-C \
                  cancels the scan and flushes whatever was found so far."
)]
struct Cli {
    /// Project directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Scan a project and write the conflictive-collider report
    Scan {
        /// Project directory to scan
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Report file (default: ConflictiveMeshColliders.csv next to the project root)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Assets processed per scheduling tick (responsiveness knob, not a result knob)
        #[arg(short, long, default_value = "5")]
        batch_size: usize,

        /// File extension that classifies an asset as a prefab
        #[arg(short, long, default_value = "prefab")]
        extension: String,

        /// Summary output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Follow symbolic links while enumerating assets
        #[arg(long)]
        follow_symlinks: bool,

        /// Include hidden files (starting with .)
        #[arg(long)]
        hidden: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Everything `run_scan` needs, whether it came from the `scan` subcommand
/// or from the bare default action.
struct ScanArgs {
    path: PathBuf,
    output: Option<PathBuf>,
    batch_size: usize,
    extension: String,
    format: OutputFormat,
    follow_symlinks: bool,
    hidden: bool,
}

impl ScanArgs {
    fn defaults_for(path: PathBuf) -> Self {
        Self {
            path,
            output: None,
            batch_size: 5,
            extension: "prefab".to_string(),
            format: OutputFormat::Text,
            follow_symlinks: false,
            hidden: false,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Scan {
            path,
            output,
            batch_size,
            extension,
            format,
            follow_symlinks,
            hidden,
        }) => {
            run_scan(ScanArgs {
                path,
                output,
                batch_size,
                extension,
                format,
                follow_symlinks,
                hidden,
            })
            .await
        }
        None => run_scan(ScanArgs::defaults_for(cli.path)).await,
    }
}

/// Run a scan with live progress, print the summary, then surface any
/// report-write failure. A failed flush never hides the counters.
async fn run_scan(args: ScanArgs) -> Result<()> {
    let config = ScanConfig::builder()
        .root(args.path)
        .output(args.output)
        .batch_size(args.batch_size)
        .extension(args.extension)
        .follow_symlinks(args.follow_symlinks)
        .include_hidden(args.hidden)
        .build()
        .context("Invalid configuration")?;

    let mut driver = ScanDriver::new(config).context("Failed to start scan")?;

    eprintln!(
        "Scanning {} ({} assets)...",
        driver.root().display(),
        driver.assets_total()
    );

    let cancel = driver.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    loop {
        match driver.step() {
            StepOutcome::Pending => {
                let progress = driver.progress();
                eprint!(
                    "\r {}/{} ({:.0}%)",
                    progress.assets_processed,
                    progress.assets_total,
                    progress.percent()
                );
                tokio::task::yield_now().await;
            }
            StepOutcome::Finished => break,
            StepOutcome::Cancelled => {
                eprintln!();
                eprintln!("Cancelled; flushing partial results...");
                break;
            }
        }
    }
    eprintln!();

    let (report, write_result) = driver.finish();

    match args.format {
        OutputFormat::Text => {
            println!();
            println!("{}", "─".repeat(60));
            if report.cancelled {
                println!(" Scan cancelled - partial results below");
            }
            println!(
                " {} assets scanned, {} prefabs",
                report.summary.assets_scanned, report.summary.prefabs_found
            );
            println!(
                " Conflictive prefabs: {}",
                report.summary.conflictive_prefabs
            );
            println!(
                " Conflictive mesh colliders: {}",
                report.summary.conflictive_colliders
            );
            println!(" Report: {}", report.report_path.display());
            println!(" Scanned in {:.2}s", report.duration.as_secs_f64());
            println!("{}", "─".repeat(60));

            if report.has_warnings() {
                println!();
                println!(" {} warning(s) during scan:", report.warnings.len());
                for warning in &report.warnings {
                    println!("   {}: {}", warning.path.display(), warning.message);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    write_result.context("Failed to write report")?;
    Ok(())
}
