use std::path::PathBuf;

use clap::Parser;

/// Serve the Mile End business map.
#[derive(Debug, Parser)]
#[command(name = "mile-end-map", version, about)]
pub struct MapCliArgs {
    /// Source table with one business per row.
    #[arg(long = "data", value_name = "PATH", default_value = "data/mile_end_businesses.csv")]
    pub data: PathBuf,
    /// Directory served under `/business_photo`.
    #[arg(long = "photos", value_name = "DIR", default_value = "business_photo")]
    pub photos: PathBuf,
    /// Directory served under `/assets` (stylesheet, icons).
    #[arg(long = "assets", value_name = "DIR", default_value = "assets")]
    pub assets: PathBuf,
    /// Interface to bind.
    #[arg(long = "host", value_name = "ADDR", default_value = "127.0.0.1")]
    pub host: String,
    /// Port to listen on.
    #[arg(long = "port", value_name = "PORT", default_value_t = 8051)]
    pub port: u16,
    /// Disable debug mode (verbose logging).
    #[arg(long = "no-debug", action = clap::ArgAction::SetTrue)]
    pub no_debug: bool,
    /// Stadia Maps API key appended to tile requests.
    #[arg(
        long = "stadia-api-key",
        value_name = "KEY",
        env = "STADIA_API_KEY",
        default_value = "",
        hide_env_values = true
    )]
    pub stadia_api_key: String,
}
