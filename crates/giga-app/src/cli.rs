use std::path::PathBuf;

use clap::Parser;

/// giga: a command-line chat with GigaChat.
#[derive(Parser, Debug)]
#[command(name = "giga", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// KEY=VALUE file loaded into the environment before the config.
    #[arg(long, default_value = ".env")]
    pub env_file: PathBuf,
}

pub fn parse() -> Args {
    Args::parse()
}
