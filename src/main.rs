//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `structured_data_report` library that
//! handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Reading the URL list and writing the JSON report
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use structured_data_report::initialization::{init_client, init_logger_with};
use structured_data_report::{read_url_lines, run_report, Config, HttpFetcher, Opt, Report};

#[tokio::main]
async fn main() -> Result<()> {
    let opt = Opt::parse();
    let input = opt.file.clone();
    let output = opt.output.clone();
    let pretty = opt.pretty;
    let config = Config::from(opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run(&input, &config).await {
        Ok(report) => {
            let json = if pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("Failed to serialize report")?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    eprintln!(
                        "✅ Wrote {} result{} to {}",
                        report.count,
                        if report.count == 1 { "" } else { "s" },
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("structured_data_report error: {:#}", e);
            process::exit(1);
        }
    }
}

async fn run(input: &std::path::Path, config: &Config) -> Result<Report> {
    let urls = read_url_lines(input).await?;
    let client = init_client(config).context("Failed to initialize HTTP client")?;
    let fetcher = HttpFetcher::new(client, config.limits.timeout_ms);
    run_report(urls, config, std::sync::Arc::new(fetcher)).await
}
