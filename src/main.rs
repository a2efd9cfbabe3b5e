use std::path::Path;
use std::process;

use clap::Parser;
use commit_relay::config::RunConfig;
use commit_relay::{outputs, pipeline, Cli};

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with RUST_LOG environment variable support
    // Default to "warn" level if RUST_LOG is not set
    // Write to stderr so debug logs don't interfere with stdout output
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");

        // Print the full error chain if available
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("  Caused by: {err}");
            source = err.source();
        }

        process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = RunConfig::from_cli(cli)?;
    let run_outputs = pipeline::run(&config, Path::new(".")).await?;
    outputs::publish(&run_outputs, config.output_path.as_deref())?;
    Ok(())
}
