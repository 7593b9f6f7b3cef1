//! Application entry point wiring configuration, logging and eframe to launch the manifest UI.

use anyhow::{Context, Result};
use eframe::egui;
use egui_phosphor::Variant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{HttpTransport, ManifestApi};
use crate::config::Config;
use crate::ui::RomaneiosApp;

/// Install the tracing subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Bootstrap the desktop application and run the main egui event loop.
pub fn run() -> Result<()> {
    init_tracing();

    let config = Config::load()?;
    tracing::info!(
        base_url = %config.base_url,
        timeout_secs = config.timeout_secs,
        workers = config.worker_threads,
        "Configuration loaded"
    );

    let transport = HttpTransport::new(config.base_url()?, config.timeout())
        .context("Failed to set up HTTP client")?;
    let api = ManifestApi::new(transport);
    let workers = config.worker_threads;

    // Register Phosphor icon font.
    let mut fonts = egui::FontDefinitions::default();
    egui_phosphor::add_to_fonts(&mut fonts, Variant::Regular);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Romaneios",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(RomaneiosApp::new(api, workers)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("UI event loop failed: {e}"))
}
