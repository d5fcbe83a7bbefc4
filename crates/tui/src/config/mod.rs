use chrono_tz::Tz;
use clap::Parser;
use serde::Deserialize;

use crate::error::{AppError, Result};

const DEFAULT_CONFIG_PATH: &str = "config/messbook.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub data_dir: String,
    pub timezone: String,
    pub log_level: String,
    pub log_file: String,
    pub export_dir: String,
    /// Used only until prices are saved from the Settings screen.
    pub rice_price: f64,
    pub egg_price: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            timezone: "Asia/Dhaka".to_string(),
            log_level: "info".to_string(),
            log_file: "logs/messbook_tui.log".to_string(),
            export_dir: "exports".to_string(),
            rice_price: engine::DEFAULT_RICE_PRICE.value(),
            egg_price: engine::DEFAULT_EGG_PRICE.value(),
        }
    }
}

impl AppConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Timezone(format!("{}: {err}", self.timezone)))
    }
}

#[derive(Debug, Parser)]
#[command(name = "messbook_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the directory holding the ledger snapshot.
    #[arg(long)]
    data_dir: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    timezone: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
    /// Override log file path.
    #[arg(long)]
    log_file: Option<String>,
    /// Override the directory reports are exported to.
    #[arg(long)]
    export_dir: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("MESSBOOK").try_parsing(true));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(data_dir) = args.data_dir {
        settings.data_dir = data_dir;
    }
    if let Some(timezone) = args.timezone {
        settings.timezone = timezone;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = log_file;
    }
    if let Some(export_dir) = args.export_dir {
        settings.export_dir = export_dir;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_usable() {
        let config = AppConfig::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.timezone().unwrap(), chrono_tz::Asia::Dhaka);
        assert_eq!(config.rice_price, 20.0);
        assert_eq!(config.egg_price, 15.0);
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let config = AppConfig {
            timezone: "Mars/Olympus".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.timezone(), Err(AppError::Timezone(_))));
    }
}
