mod boot;
mod cli;
mod commands;
mod repl;

use std::process::ExitCode;

use giga_common::GigaError;
use giga_config::LogLevel;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins, then the CLI flag, then the configured level.
fn log_filter(flag: Option<&str>, configured: Option<LogLevel>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = flag
        .or(configured.map(|l| l.as_str()))
        .unwrap_or("info");
    EnvFilter::try_new(format!("giga={level}")).unwrap_or_else(|_| EnvFilter::new("giga=info"))
}

async fn run(args: cli::Args) -> Result<(), GigaError> {
    let config = giga_config::load_config(args.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            args.log_level.as_deref(),
            config.as_ref().ok().map(|c| c.logging.level),
        ))
        .with_writer(std::io::stderr)
        .init();

    let config = config?;
    tracing::info!("giga v{} starting", env!("CARGO_PKG_VERSION"));

    let boot = boot::boot(&config).await?;
    repl::Shell::new(boot).run().await?;

    tracing::info!("shutdown complete");
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    giga_config::load_dotenv(&args.env_file);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
