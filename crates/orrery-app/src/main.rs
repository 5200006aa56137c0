//! Sun, earth and moon demo.

use clap::Parser;
use orrery_app::PlatformDirs;
use orrery_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                std::process::exit(1);
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create {}: {e}", dirs.config_dir.display());
    }

    let file_config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    orrery_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    tracing::info!(
        stage = ?config.scene.stage,
        config_dir = %dirs.config_dir.display(),
        "Starting orrery"
    );

    if let Err(e) = orrery_app::run(file_config, args, dirs.config_dir) {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
}
