//! giga-tools: HTTP tool server for the giga chat shell.
//!
//! Serves the datetime tool directly (`GET /datetime`) and through the
//! generic tool endpoints (`GET /tools/list`, `POST /tools/call`).

mod clock;
mod error;
mod routes;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use giga_config::LogLevel;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "giga-tools", version, about = "Tool server for the giga chat shell")]
struct Args {
    /// Config file path override.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides `server.port`.
    #[arg(short, long)]
    port: Option<u16>,

    /// Runtime worker threads, overrides `server.workers`.
    #[arg(long)]
    workers: Option<usize>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

fn log_filter(flag: Option<&str>, configured: Option<LogLevel>) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    let level = flag
        .or(configured.map(|l| l.as_str()))
        .unwrap_or("info");
    EnvFilter::try_new(format!("giga={level}")).unwrap_or_else(|_| EnvFilter::new("giga=info"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = giga_config::load_config(args.config.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            args.log_level.as_deref(),
            config.as_ref().ok().map(|c| c.logging.level),
        ))
        .init();

    let mut server = match config {
        Ok(config) => config.server,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    if let Some(host) = args.host {
        server.host = host;
    }
    if let Some(port) = args.port {
        server.port = port;
    }
    if let Some(workers) = args.workers {
        server.workers = workers.max(1);
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(server.workers)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let addr = server.bind_addr();
    let result = runtime.block_on(async {
        let listener = TcpListener::bind(addr.as_str()).await?;
        tracing::info!(workers = server.workers, "giga-tools listening on http://{addr}");
        routes::serve(listener).await
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("server error on {addr}: {e}");
            ExitCode::FAILURE
        }
    }
}
