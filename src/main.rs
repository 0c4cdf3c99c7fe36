//! Voxpad - plain text editor with speech and PDF export
//!
//! A Rust-based notepad with dictation, read-aloud playback, and
//! single-page PDF export.

mod app;
mod core;
mod export;
mod speech;
mod ui;

use app::VoxpadApp;
use eframe::egui;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::INFO)
        .init();

    tracing::info!("Starting Voxpad...");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([800.0, 600.0])
            .with_min_inner_size([400.0, 300.0])
            .with_title("Voxpad"),
        ..Default::default()
    };

    eframe::run_native(
        "Voxpad",
        native_options,
        Box::new(|cc| Ok(Box::new(VoxpadApp::new(cc)))),
    )
}
