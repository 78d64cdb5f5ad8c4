use anyhow::{anyhow, Result};
use logic_designer::{app::DesignerApp, config::Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // logging isn't up yet, so hold on to a config error until it is
    let (config, config_err) = match Config::load() {
        Ok(c) => (c, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Some(e) = config_err {
        log::warn!("using default settings: {:#}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width, config.window_height])
            .with_title("Logic Gate Designer"),
        ..Default::default()
    };
    eframe::run_native(
        "Logic Gate Designer",
        options,
        Box::new(|cc| Ok(Box::new(DesignerApp::new(cc, config)))),
    )
    .map_err(|e| anyhow!("event loop exited with an error: {}", e))
}
