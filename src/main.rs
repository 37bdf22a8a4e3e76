use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use splitlog::config::{self, DelegateConfig};
use splitlog::logging::{LogDelegate, LoggerRegistry, Severity};

/// Copy stdin lines to stdout and a rotating log file
#[derive(Parser, Debug)]
#[command(name = "splitlog", version, about)]
struct Cli {
    /// TOML config file (defaults to <config dir>/splitlog/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Channel name
    #[arg(short, long)]
    name: Option<String>,

    /// Log file path
    #[arg(short, long)]
    file: Option<String>,

    /// Console threshold
    #[arg(long)]
    print_level: Option<Severity>,

    /// Log file threshold
    #[arg(long)]
    file_level: Option<Severity>,

    /// Severity each input line is emitted at
    #[arg(short, long, default_value = "info")]
    level: Severity,
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides
    fn delegate_config(&self) -> Result<DelegateConfig> {
        let config_path = match &self.config {
            Some(path) => Some(path.clone()),
            None => config::default_config_path().filter(|path| path.is_file()),
        };

        let mut config = match config_path {
            Some(path) => DelegateConfig::load(&path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?,
            None => DelegateConfig::new(String::new()),
        };

        if let Some(name) = &self.name {
            config.name = name.clone();
        }
        if let Some(file) = &self.file {
            config.file_path = file.clone();
        }
        if let Some(level) = self.print_level {
            config.print_level = level;
        }
        if let Some(level) = self.file_level {
            config.file_level = level;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics of splitlog itself go to stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "splitlog=warn".into()),
        )
        .init();

    let config = cli.delegate_config()?;
    let registry = LoggerRegistry::new();
    let delegate =
        LogDelegate::from_config(&registry, &config).context("Failed to set up logging")?;

    tracing::debug!(channel = %config.name, file = %config.file_path, "Logging stdin");

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read stdin")?;
        splitlog::log!(delegate, cli.level, "{}", line);
    }

    splitlog::Emit::flush(&delegate);
    Ok(())
}
