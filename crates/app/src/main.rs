mod cli;
mod config;
mod html;
mod server;
mod telemetry;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use map_core::{CategoryPalette, ViewModel};
use tracing::{info, warn};

use crate::{cli::MapCliArgs, config::MapConfig};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Loaded before parsing so `STADIA_API_KEY` can come from `.env`.
    let dotenv = dotenvy::dotenv();
    let config = MapConfig::try_from(MapCliArgs::parse())?;
    telemetry::init(config.debug);
    if let Some(message) = dotenv_warning(&dotenv) {
        warn!("{message}");
    }

    let view = ViewModel::load(&config.data_path, CategoryPalette::mile_end()).with_context(|| {
        format!(
            "Failed to load businesses from {}",
            config.data_path.display()
        )
    })?;
    info!(
        "Loaded {} businesses ({} markers, {} categories)",
        view.records.len(),
        view.markers.len(),
        view.palette.len()
    );
    for record in view.unplaced() {
        warn!(
            "Row {} ({}) has no coordinates; skipping marker",
            record.index, record.name
        );
    }
    if config.page.tiles.url.ends_with("api_key=") {
        warn!("STADIA_API_KEY is not set; map tiles will fail to load");
    }
    if config.debug {
        info!("Debug mode enabled");
    }

    let page = html::page::compose_page(&view, &config.page)?;
    server::run(config.server, page)
}

/// A missing `.env` is normal; any other failure to read it is worth a warning.
fn dotenv_warning(result: &Result<PathBuf, dotenvy::Error>) -> Option<String> {
    match result {
        Err(err) if !err.not_found() => Some(format!("Failed to load .env: {err}")),
        _ => None,
    }
}
