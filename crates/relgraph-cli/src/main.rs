//! relgraph - Main entry point

use clap::Parser;
use relgraph_cli::{commands, Cli};
use relgraph_common::logging::{init_logging, LogConfig, LogLevel};
use std::process;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Graph on stdout, diagnostics on stderr; quiet unless asked
    let level = if cli.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Warn
    };
    let log_config = LogConfig::builder()
        .level(level)
        .log_file_prefix("relgraph")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The graph is still useful without logging
    let _ = init_logging(&log_config);

    if let Err(e) = execute(&cli).await {
        error!(error = %e, "relgraph failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute(cli: &Cli) -> relgraph_cli::Result<()> {
    let config = cli.config()?;

    if cli.reload {
        commands::reload::run(&config).await?;
    }

    commands::graph::run(&config)
}
