//! Application entry point for the dot grid viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use dotgrid_core::Config;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use viewer::Viewer;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "DOTGRID_CONFIG";

/// Reads the config named by [`CONFIG_ENV`], falling back to defaults.
///
/// Missing keys in the file take their default values.
fn load_config() -> Config {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return Config::default();
    };

    let parsed = std::fs::read_to_string(&path)
        .map_err(|err| err.to_string())
        .and_then(|text| serde_json::from_str::<Config>(&text).map_err(|err| err.to_string()));

    match parsed {
        Ok(cfg) => {
            info!(%path, "loaded config");
            cfg
        }
        Err(err) => {
            warn!(%path, %err, "could not load config, using defaults");
            Config::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if the config is invalid or eframe fails to create the window.
fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let cfg = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1200.0, 960.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Dynamic Dot Grid Simulation",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(cfg)?))),
    )
}
