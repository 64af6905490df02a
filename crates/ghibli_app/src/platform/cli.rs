use std::path::PathBuf;

use clap::Parser;

use super::config::AppConfig;
use super::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(name = "ghibli", version, about = "Browse Studio Ghibli films from the terminal")]
pub struct Cli {
    /// RON config file (defaults to ./ghibli.ron when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// API base URL, overriding the config file
    #[arg(long)]
    pub base_url: Option<String>,
    /// Where log records go, overriding the config file
    #[arg(long, value_enum)]
    pub log: Option<LogDestination>,
}

impl Cli {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(log) = self.log {
            config.log = log;
        }
    }
}
