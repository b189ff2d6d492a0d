mod app;
mod config;
mod controls;

use anyhow::Result;

use ember_engine::device::GpuInit;
use ember_engine::logging::{init_logging, LoggingConfig};
use ember_engine::window::Runtime;

use app::SandboxApp;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let config = config::runtime_config()?;
    log::info!("controls: {}", controls::HELP);

    let runtime = Runtime::new(config);
    runtime.run(GpuInit::default(), SandboxApp::new())
}
