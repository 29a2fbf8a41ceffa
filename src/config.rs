use std::path::PathBuf;

use clap::Args;
use tracing_subscriber::EnvFilter;

use crate::api::{DEFAULT_API_BASE, DEFAULT_SPRITE_BASE};
use crate::error::ConfigError;
use crate::state::DEFAULT_PAGE_SIZE;

const APP_DIR: &str = "pokedex-cards";
const LOG_FILE: &str = "pokedex.log";

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// PokeAPI base url
    #[arg(long, env = "POKEDEX_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Base url for grid sprites, `{id}.png` is appended
    #[arg(long, env = "POKEDEX_SPRITE_BASE", default_value = DEFAULT_SPRITE_BASE)]
    pub sprite_base: String,

    /// Number of entries to load
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE as u16,
        value_parser = clap::value_parser!(u16).range(1..=2000)
    )]
    pub page_size: u16,

    /// Log file (the terminal belongs to the UI)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Tracing filter directive, e.g. `debug` or `pokedex_cards=trace`
    #[arg(long, env = "POKEDEX_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub sprite_base: String,
    pub page_size: usize,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl CatalogArgs {
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let log_level = self.log_level.trim().to_string();
        if log_level.is_empty() || EnvFilter::try_new(&log_level).is_err() {
            return Err(ConfigError::InvalidLogLevel(self.log_level));
        }
        Ok(Config {
            api_base: base_url("--api-base", &self.api_base)?,
            sprite_base: base_url("--sprite-base", &self.sprite_base)?,
            page_size: usize::from(self.page_size),
            log_file: self.log_file.unwrap_or_else(default_log_file),
            log_level,
        })
    }
}

fn base_url(name: &'static str, value: &str) -> Result<String, ConfigError> {
    let trimmed = value.trim().trim_end_matches('/');
    let scheme_ok = trimmed.starts_with("http://") || trimmed.starts_with("https://");
    let host_ok = trimmed.split("://").nth(1).is_some_and(|rest| !rest.is_empty());
    if !scheme_ok || !host_ok {
        return Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        });
    }
    Ok(trimmed.to_string())
}

fn default_log_file() -> PathBuf {
    let base = dirs_next::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join(APP_DIR).join(LOG_FILE)
}
