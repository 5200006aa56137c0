//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, Stage};

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "orrery", about = "Sun, earth and moon demo")]
pub struct CliArgs {
    #[arg(long)]
    pub width: Option<u32>,

    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub fullscreen: Option<bool>,

    /// Demo version to run.
    #[arg(long, value_enum)]
    pub stage: Option<Stage>,

    /// Sphere tessellation (used for both longitude and latitude).
    #[arg(long)]
    pub segments: Option<u32>,

    /// Directory holding sun/earth/moon/background textures.
    #[arg(long)]
    pub assets: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(fs) = args.fullscreen {
            self.window.fullscreen = fs;
        }
        if let Some(stage) = args.stage {
            self.scene.stage = stage;
        }
        if let Some(segments) = args.segments {
            self.render.sphere_x_segments = segments;
            self.render.sphere_y_segments = segments;
        }
        if let Some(ref dir) = args.assets {
            self.assets.dir = dir.clone();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            width: Some(1920),
            stage: Some(Stage::Textured),
            segments: Some(32),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.scene.stage, Stage::Textured);
        assert_eq!(config.render.sphere_x_segments, 32);
        assert_eq!(config.render.sphere_y_segments, 32);
        // Non-overridden fields retain defaults
        assert_eq!(config.window.height, 600);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_parse_stage_flag() {
        let args = CliArgs::parse_from(["orrery", "--stage", "free-camera", "--assets", "tex"]);
        assert_eq!(args.stage, Some(Stage::FreeCamera));
        assert_eq!(args.assets, Some(PathBuf::from("tex")));
    }
}
