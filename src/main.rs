mod app;
mod config;
mod persist;
mod render;
mod session;
mod store;
mod types;
mod util;

#[cfg(test)]
mod test_util;

use anyhow::Context as _;
use app::QuadmarkApp;
use config::AppConfig;
use session::Session;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

fn init_tracing() -> anyhow::Result<()> {
    let level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let mut config = AppConfig::load();
    if let Some(dir) = std::env::args_os().nth(1).map(PathBuf::from) {
        config.output_dir = dir;
    }
    let table_path = config.table_path();
    let session = Session::open(table_path.clone(), config.chart_path(), config.chart_spec())
        .with_context(|| format!("Failed to open point table {}", table_path.display()))?;

    let size = config.canvas_size();
    let title = format!("Quadmark: {}", config.item_stem());
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([size + 300.0, size + 60.0])
            .with_min_inner_size([size + 120.0, size + 40.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |_cc| Ok(Box::new(QuadmarkApp::new(config, session)))),
    )
    .map_err(|err| anyhow::anyhow!("{err}"))
}
