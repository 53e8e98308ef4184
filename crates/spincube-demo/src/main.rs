mod app;
mod geometry;
mod renderer;
mod texture;
mod transform;

use std::path::PathBuf;

use anyhow::Result;

use spincube_engine::device::GpuInit;
use spincube_engine::logging::{LoggingConfig, init_logging};
use spincube_engine::window::{Runtime, RuntimeConfig};

use crate::app::CubeApp;

const DEFAULT_TEXTURE: &str = "assets/awesomeface.png";

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let texture_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_TEXTURE));

    log::info!("texture: {}", texture_path.display());

    Runtime::run(
        RuntimeConfig::new("spincube", 800.0, 600.0),
        GpuInit::default(),
        CubeApp::new(texture_path),
    )
}
