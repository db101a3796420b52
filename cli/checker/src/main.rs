//! tc-check CLI
//!
//! Materializes project trees from S3 and type-checks them.

use clap::Parser;
use std::time::Instant;

mod args;
mod run;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    // Logs go to stderr; stdout carries only JSON responses
    tc_cli_common::init_logging(args.log_level)?;

    let started = Instant::now();
    let summary = run::execute(args).await?;

    eprintln!();
    eprintln!("Checking completed:");
    eprintln!("  Jobs:     {}", summary.jobs);
    eprintln!("  Passed:   {}", summary.passed);
    eprintln!("  Rejected: {}", summary.rejected);
    eprintln!("  Aborted:  {}", summary.aborted);
    eprintln!("  Duration: {:.2}s", started.elapsed().as_secs_f64());

    if !summary.all_passed() {
        std::process::exit(1);
    }

    Ok(())
}
