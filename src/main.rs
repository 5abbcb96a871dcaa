mod app;
mod error;
mod geom;
mod hud;
mod input;
mod player;
mod render;
mod scene;

use std::path::PathBuf;

fn main() {
    env_logger::init();
    log::info!("scarfy starting up");

    let sheet_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(app::DEFAULT_SHEET_PATH));

    if let Err(e) = app::run(sheet_path) {
        log::error!("Fatal error: {e}");
        std::process::exit(e.exit_code());
    }
}
