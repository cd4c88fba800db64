//! Web server command.

use anyhow::Result;
use brandkit_core::BrandkitConfig;
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

/// Log file used by `--log` when `--log-file` is not given.
const DEFAULT_LOG_FILE: &str = "logs/brandkit-serve.log";

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on (overrides the config file)
    #[arg(long)]
    pub port: Option<u16>,

    /// Host to bind to (overrides the config file)
    #[arg(long)]
    pub host: Option<String>,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file path used with --log
    #[arg(long, requires = "log")]
    pub log_file: Option<PathBuf>,
}

impl ServeArgs {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE))
    }
}

pub async fn execute(args: ServeArgs, mut config: BrandkitConfig) -> Result<()> {
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let base = format!("http://{}:{}", config.server.host, config.server.port);
    println!();
    println!("  {} {}", "Brandkit".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}      {}/api", "API".green(), base);
    println!("  {}   {}/health", "Health".green(), base);
    println!("  {}  {:?}", "Storage".green(), config.storage);
    println!(
        "  {}       {}",
        "AI".green(),
        if config.ai.api_key.is_some() { config.ai.model.as_str() } else { "disabled (keyword analysis)" }
    );
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    brandkit_web::run_server(config).await
}
