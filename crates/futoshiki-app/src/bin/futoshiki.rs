//! Futoshiki desktop application using egui/eframe.
//!
//! # Usage
//!
//! ```sh
//! cargo run -- --levels-dir ./data
//! ```
//!
//! Start in the level editor with an empty board:
//!
//! ```sh
//! cargo run -- --editor
//! ```

use std::path::PathBuf;

use clap::Parser;
use futoshiki_app::{
    app::{FutoshikiApp, StartupOptions},
    session::StartMode,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory holding the `*.data` level files.
    #[arg(long, value_name = "DIR")]
    levels_dir: Option<PathBuf>,
    /// Open the level editor instead of the level menu.
    #[arg(long)]
    editor: bool,
    /// Stop the level menu selection at the ends of the list.
    #[arg(long)]
    no_wrap: bool,
}

impl Args {
    fn startup_options(self) -> StartupOptions {
        StartupOptions {
            levels_dir: self.levels_dir,
            start_mode: if self.editor {
                StartMode::Editor
            } else {
                StartMode::Auto
            },
            wrap_around: self.no_wrap.then_some(false),
        }
    }
}

fn main() -> eframe::Result<()> {
    const APP_ID: &str = "io.github.futoshiki";

    better_panic::install();
    env_logger::init();

    let options = Args::parse().startup_options();
    let native_options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_app_id(APP_ID)
            .with_resizable(true)
            .with_inner_size((800.0, 600.0))
            .with_min_inner_size((400.0, 300.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Futoshiki",
        native_options,
        Box::new(move |cc| Ok(Box::new(FutoshikiApp::new(cc, &options)))),
    )
}
