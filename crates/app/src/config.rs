//! Runtime configuration derived from CLI flags and the environment.

use std::path::PathBuf;

use anyhow::{Result, bail};

use crate::{cli::MapCliArgs, html::page::PageConfig};

/// Validated startup configuration.
#[derive(Clone, Debug)]
pub struct MapConfig {
    /// Source table read once at startup.
    pub data_path: PathBuf,
    /// Debug mode raises the default log level.
    pub debug: bool,
    /// Listen address and static directories.
    pub server: ServerConfig,
    /// Tile layer, initial view and banner.
    pub page: PageConfig,
}

/// Listen address and the directories behind the static routes.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Interface to bind, `127.0.0.1` by default.
    pub host: String,
    /// Non-zero TCP port.
    pub port: u16,
    /// Served under `/business_photo/`.
    pub photo_dir: PathBuf,
    /// Served under `/assets/`.
    pub assets_dir: PathBuf,
}

impl TryFrom<MapCliArgs> for MapConfig {
    type Error = anyhow::Error;

    fn try_from(args: MapCliArgs) -> Result<Self> {
        if args.port == 0 {
            bail!("--port must be between 1 and 65535");
        }
        if !args.data.is_file() {
            bail!(
                "Business table not found at {}. Provide --data <path>.",
                args.data.display()
            );
        }

        Ok(Self {
            data_path: args.data,
            debug: !args.no_debug,
            server: ServerConfig {
                host: args.host,
                port: args.port,
                photo_dir: args.photos,
                assets_dir: args.assets,
            },
            page: PageConfig::new(&args.stadia_api_key),
        })
    }
}
