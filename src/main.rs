mod app;
mod callbacks;
mod color;
mod config;
mod data;
mod figure;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::LaunchDashboardApp;
use clap::Parser;
use config::DashboardConfig;
use eframe::egui;
use state::AppState;

#[derive(Parser)]
#[command(name = "launch-dashboard")]
#[command(version)]
#[command(about = "Interactive dashboard of rocket launch records")]
struct Cli {
    /// Dataset location (local .csv/.json/.parquet path or http(s) URL).
    /// Overrides `data_source` from the config file.
    #[arg(short, long)]
    data: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Debug logging and the egui inspection window
    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut config = DashboardConfig::load(cli.config.as_deref())?;
    if let Some(data) = cli.data {
        config.data_source = data;
    }

    // Nothing is shown until the whole dataset has loaded and validated.
    let dataset = data::loader::load_source(&config.data_source)
        .with_context(|| format!("loading launch records from {}", config.data_source))?;
    let summary = dataset.summary();
    log::info!(
        "Loaded {} launches from {} sites, payload {} – {} kg",
        dataset.len(),
        summary.sites.len(),
        summary.min_payload,
        summary.max_payload
    );

    let state = AppState::new(dataset, config.data_source.clone(), config.slider);
    let app = LaunchDashboardApp::new(state, config.title.clone(), cli.debug);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(&config.title, options, Box::new(move |_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("running dashboard window: {e}"))
}
