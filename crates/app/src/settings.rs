//! Configuration: `config/moneytrace.toml` (optional), then `MONEYTRACE_*`
//! environment variables, then command line flags.

use std::time::Duration;

use chrono_tz::Tz;
use clap::Parser;
use engine::Locale;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/moneytrace.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub timezone: String,
    pub locale: Locale,
    pub level: String,
    pub timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            timezone: "Asia/Shanghai".to_string(),
            locale: Locale::En,
            level: "info".to_string(),
            timeout_secs: None,
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Timezone(format!("{}: {err}", self.timezone)))
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Parser)]
#[command(name = "moneytrace", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the API root (e.g. http://127.0.0.1:8000/api).
    #[arg(long)]
    base_url: Option<String>,
    /// Override timezone (IANA name) used for date labels.
    #[arg(long)]
    timezone: Option<String>,
    /// Label language: en or zh.
    #[arg(long)]
    locale: Option<String>,
    /// Log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("MONEYTRACE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(locale) = args.locale {
        settings.locale = Locale::try_from(locale.as_str())
            .map_err(|err| config::ConfigError::Message(err.to_string()))?;
    }
    if let Some(level) = args.level {
        settings.level = level;
    }

    Ok(settings)
}
