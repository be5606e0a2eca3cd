use std::path::PathBuf;

use clap::Parser;
use url::Url;

/// Geo-locate place names and ZIP codes within the USA.
///
/// The OpenWeather API key is read from the OPEN_WEATHER_API_KEY
/// environment variable.
#[derive(Parser)]
#[command(
    name = "geo",
    version,
    about,
    after_help = "Example:\n  geo \"Henrico, VA\" 10001 \"Seattle, WA\""
)]
pub struct ProgramArgs {
    /// Place names ("Richmond, VA") or ZIP codes (23228) to look up.
    pub locations: Vec<String>,

    /// Output in JSON format.
    #[arg(short, long)]
    pub json: bool,

    #[arg(long, value_name = "URL")]
    /// Base URL of the geocoding service.
    pub endpoint: Option<Url>,

    #[arg(long, value_name = "SECONDS")]
    /// Abort a request that takes longer than this.
    pub timeout: Option<u64>,

    #[arg(long, value_name = "SECONDS", default_value_t = 30)]
    /// Give up connecting to the service after this long.
    pub connect_timeout: u64,

    #[arg(long)]
    /// Don't verify the service's TLS certificate.
    pub insecure: bool,

    #[arg(long, value_enum, default_value = "warn")]
    /// Verbosity of logging output.
    pub log_level: tracing::level_filters::LevelFilter,

    #[arg(long)]
    /// Write logging output to a file.
    pub log_file: Option<PathBuf>,

    #[arg(long)]
    /// Send logging output to Systemd's Journal service.
    pub log_journald: bool,
}
