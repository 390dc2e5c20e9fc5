use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::{load_settings, load_settings_from};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use backend_bridge::{commands::BackendCommand, runtime};
use controller::events::UiEvent;
use ui::{SplitterApp, StartupConfig};

#[derive(Parser, Debug)]
#[command(name = "splitter-gui", about = "Desktop front end for the PDF page splitter")]
struct Args {
    /// Base URL of the split server
    #[arg(long)]
    server_url: Option<String>,

    /// Settings file (defaults to ./splitter.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => load_settings_from(path, |key| std::env::var(key).ok()),
        None => load_settings(),
    };
    if let Some(url) = args.server_url {
        settings.server_url = url;
    }
    tracing::info!(server_url = %settings.server_url, "starting splitter gui");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(64);
    // The worker exits once the app drops its command sender.
    let _backend = runtime::launch(settings.server_url.clone(), cmd_rx, ui_tx);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("PDF Page Splitter")
            .with_inner_size([1024.0, 720.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    eframe::run_native(
        "PDF Page Splitter",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(SplitterApp::new(
                StartupConfig { settings },
                cmd_tx,
                ui_rx,
            )))
        }),
    )
}
