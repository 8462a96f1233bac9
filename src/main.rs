//! Command-line entrypoint: read a target and a patch, splice, write back.

use std::path::PathBuf;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use mend::{FailurePolicy, MatchMode, SessionConfig, apply_patch_file};

/// Apply a contextual diff: hunks are located by anchor text and content,
/// not line numbers, so patches survive drift in the target file.
#[derive(Parser)]
#[command(name = "mend", version)]
struct Args {
    /// File to patch
    #[arg(short, long)]
    target: PathBuf,
    /// Diff to apply
    #[arg(short, long)]
    patch: PathBuf,
    /// Where to write the result; defaults to overwriting the target
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Abort on the first hunk that fails to locate
    #[arg(long)]
    strict: bool,
    /// Match hunks by their first removal line only (old engine behavior)
    #[arg(long)]
    first_line_only: bool,
    /// Print the outcome as JSON instead of a status line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Skipped-hunk warnings go to stderr; stdout stays clean for the status
    // line or JSON. RUST_LOG overrides the default level.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SessionConfig {
        mode: if args.first_line_only {
            MatchMode::FirstLineOnly
        } else {
            MatchMode::FullRun
        },
        policy: if args.strict {
            FailurePolicy::Strict
        } else {
            FailurePolicy::Lenient
        },
    };

    let outcome = apply_patch_file(&args.target, &args.patch, args.out.as_deref(), config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "patched {}: {}",
            outcome.out_path.display(),
            outcome.report.summary()
        );
    }
    Ok(())
}
