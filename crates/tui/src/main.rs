mod app;
mod config;
mod error;
mod ui;

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use engine::{FileStorage, Ledger, Money, Prices};

use crate::{config::AppConfig, error::Result};

fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let ledger = Ledger::builder()
        .storage(FileStorage::new(&config.data_dir))
        .timezone(config.timezone()?)
        .default_prices(Prices::new(
            Money::new(config.rice_price),
            Money::new(config.egg_price),
        ))
        .build()?;

    let mut app = app::App::new(config, ledger);
    app.run()
}

// The terminal owns stdout, so events go to a file instead.
fn init_tracing(config: &AppConfig) -> Result<()> {
    let path = Path::new(&config.log_file);
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "messbook_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
