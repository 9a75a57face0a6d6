mod app;
mod ui;
mod viewport;

// Re-export library modules so that `crate::state`, `crate::interaction`, etc.
// resolve to the lib crate types everywhere in the binary.
pub use marbles_lib::interaction;
pub use marbles_lib::physics;
pub use marbles_lib::render;
pub use marbles_lib::state;

use std::path::{Path, PathBuf};

use app::MarblesApp;
use state::EditorSettings;
use tracing_subscriber::prelude::*;

fn main() {
    let settings = EditorSettings::load();
    init_logging(&settings.files.log_file);

    // Parse --scene <path> argument
    let initial_scene = parse_scene_arg();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Marbles And Physics")
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([800.0, 500.0]),
        ..Default::default()
    };

    if let Err(e) = eframe::run_native(
        "marbles",
        native_options,
        Box::new(move |cc| Ok(Box::new(MarblesApp::new(cc, settings, initial_scene)))),
    ) {
        tracing::error!("Failed to start application: {e}");
        std::process::exit(1);
    }
}

/// Stderr plus a plain-text log file when it can be opened.
fn init_logging(log_file: &Path) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "marbles=info,marbles_lib=info".into());

    let file_layer = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .ok()
        .map(|file| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
        });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer)
        .init();
}

fn parse_scene_arg() -> Option<PathBuf> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--scene" {
            match args.get(i + 1) {
                Some(path) => return Some(PathBuf::from(path)),
                None => tracing::error!("--scene needs a path"),
            }
            break;
        }
        i += 1;
    }
    None
}
