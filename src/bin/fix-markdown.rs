//! CLI binary for pdfmd-fix.
//!
//! A thin shim over the library crate: checks the input, calls `fix_file`,
//! prints progress and a line-count summary.

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use pdfmd_fix::{default_output_path, fix_file, FixConfig, FixError, FixReport};
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn paint(code: &str, s: &str) -> String {
    if io::stdout().is_terminal() {
        format!("\x1b[{code}m{s}\x1b[0m")
    } else {
        s.to_string()
    }
}
fn green(s: &str) -> String {
    paint("32", s)
}
fn dim(s: &str) -> String {
    paint("2", s)
}
fn bold(s: &str) -> String {
    paint("1", s)
}

// ── CLI definition ───────────────────────────────────────────────────────────

const AFTER_HELP: &str = r###"EXAMPLES:
  # Write docs/tutorial-fixed.md next to the input
  fix-markdown docs/tutorial.md

  # Explicit output path
  fix-markdown docs/tutorial.md docs/tutorial-clean.md

  # Machine-readable summary
  fix-markdown --json docs/tutorial.md

WHAT GETS FIXED:
  • code fences wrapping plain paragraphs
  • ####/##### headings collapsed to ###
  • page markers: "-- 3 of 364 --", "Page 7", "Página 12", "## 12", bare numbers
  • runs of blank lines, trailing whitespace
  • •/◦/▪ and –/— bullets rewritten as Markdown list items
  • lines broken mid-sentence by the PDF joined back together

ENVIRONMENT VARIABLES:
  RUST_LOG   Override the log filter (e.g. RUST_LOG=pdfmd_fix=trace)
"###;

/// Clean up Markdown produced by PDF-to-Markdown converters.
#[derive(Parser, Debug)]
#[command(
    name = "fix-markdown",
    version,
    about = "Clean up Markdown produced by PDF-to-Markdown converters",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown file to fix.
    input: PathBuf,

    /// Where to write the result. Default: <input-stem>-fixed<.ext> next to the input.
    output: Option<PathBuf>,

    /// Print the run summary as JSON.
    #[arg(long)]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            let _ = e.print();
            return ExitCode::FAILURE;
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = FixConfig::default();
    let human = !cli.quiet && !cli.json;

    if !cli.input.exists() {
        return Err(FixError::FileNotFound {
            path: cli.input.clone(),
        })
        .with_context(|| format!("Could not fix '{}'", cli.input.display()));
    }

    if human {
        let output_path = cli
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&cli.input, &config));
        println!("📄 Reading: {}", cli.input.display());
        println!("🔧 Fixing format…");
        println!("💾 Saving: {}", output_path.display());
    }

    let report = fix_file(&cli.input, cli.output.as_deref(), &config)
        .with_context(|| format!("Could not fix '{}'", cli.input.display()))?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise summary")?
        );
    } else if human {
        print_summary(&report);
    }

    Ok(())
}

fn print_summary(report: &FixReport) {
    let stats = &report.stats;
    println!("{} {}", green("✅"), bold("Done!"));
    println!("   Original lines: {}", stats.original_lines);
    println!("   Final lines:    {}", stats.final_lines);
    println!("   Lines removed:  {}", dim(&stats.lines_removed.to_string()));
}
