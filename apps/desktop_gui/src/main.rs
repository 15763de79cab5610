mod backend_bridge;
mod controller;
mod ui;

use clap::Parser;
use client_core::config::{load_settings, ClientSettings};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{Route, StudentPortalApp};

#[derive(Debug, Parser)]
#[command(name = "desktop_gui", about = "Student directory desktop client")]
struct Args {
    /// Overrides the configured sqlite database url.
    #[arg(long)]
    database_url: Option<String>,
    /// Overrides the configured remote user list url.
    #[arg(long)]
    remote_url: Option<String>,
    /// Page to open on launch: "/", "/students" or "/add".
    #[arg(long, default_value = "/")]
    start: String,
}

impl Args {
    fn apply(&self, settings: &mut ClientSettings) {
        if let Some(url) = &self.database_url {
            settings.database_url = url.clone();
        }
        if let Some(url) = &self.remote_url {
            settings.remote_users_url = url.clone();
        }
    }
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let mut settings = load_settings();
    args.apply(&mut settings);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&settings.log_filter))
        .init();

    let start = Route::from_path(&args.start).unwrap_or_else(|| {
        tracing::warn!(path = %args.start, "unknown start page, opening dashboard");
        Route::Dashboard
    });

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Student Portal")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Student Portal",
        options,
        Box::new(move |_cc| Ok(Box::new(StudentPortalApp::new(cmd_tx, ui_rx, start)))),
    )
}
