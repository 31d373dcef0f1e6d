use std::path::PathBuf;

use anyhow::Result;
use pagecurl_engine::logging::{LoggingConfig, init_logging};
use pagecurl_engine::window::{Runtime, RuntimeConfig};

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let asset_dir = std::env::var_os("PAGECURL_ASSETS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));
    log::info!("assets from {}", asset_dir.display());

    let config = RuntimeConfig {
        title: "pagecurl studio".to_string(),
        asset_dir,
        ..RuntimeConfig::default()
    };

    Runtime::run(config)
}
