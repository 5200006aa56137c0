//! Configuration structs with the demo's defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Which version of the demo to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
pub enum Stage {
    /// Textured bodies seen from the fixed orbit camera.
    Textured,
    /// Textured bodies lit by the sun.
    #[default]
    Lit,
    /// Lit bodies with a free-fly camera.
    FreeCamera,
}

impl Stage {
    pub fn lighting(self) -> bool {
        !matches!(self, Stage::Textured)
    }

    pub fn free_camera(self) -> bool {
        matches!(self, Stage::FreeCamera)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub scene: SceneConfig,
    pub camera: CameraConfig,
    pub assets: AssetConfig,
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    pub fullscreen: bool,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    pub title: String,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Linear RGBA clear colour, visible wherever the background quad is missing.
    pub clear_color: [f64; 4],
    /// Longitude segments of the shared sphere mesh.
    pub sphere_x_segments: u32,
    /// Latitude rings of the shared sphere mesh.
    pub sphere_y_segments: u32,
    /// Clip-space depth of the background quad in the source's
    /// forward-Z convention (0 = near, 1 = far).
    pub background_depth: f32,
}

/// Orbital layout and angular rates of the sun-earth-moon system.
///
/// Angles are in degrees, rates in degrees per second.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub stage: Stage,
    pub sun_radius: f32,
    pub earth_distance: f32,
    pub earth_scale: f32,
    pub moon_distance: f32,
    pub moon_scale: f32,
    /// Tilt of the earth's axis (and the moon's orbital plane) from the ecliptic normal.
    pub obliquity_degrees: f32,
    pub earth_orbit_start_degrees: f32,
    pub moon_orbit_start_degrees: f32,
    pub earth_orbit_rate: f32,
    pub earth_spin_rate: f32,
    pub moon_orbit_rate: f32,
    /// Multiplier applied to every rate; 0 freezes the system.
    pub time_scale: f32,
}

/// Camera control configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Distance of the orbit camera from the sun.
    pub orbit_distance: f32,
    /// Arrow-key turn rate of the orbit camera in degrees per second.
    pub orbit_turn_rate: f32,
    /// Free camera speed in units per second.
    pub move_speed: f32,
    /// Mouse look sensitivity multiplier.
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
}

/// Texture locations.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the textures; relative paths resolve against the
    /// working directory.
    pub dir: PathBuf,
    pub sun: String,
    pub earth: String,
    pub moon: String,
    pub background: String,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log a byte preview of every loaded image.
    pub dump_images: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fullscreen: false,
            vsync: true,
            title: "Sphere".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 60.0,
            near: 1.0,
            far: 500.0,
            clear_color: [1.0, 1.0, 1.0, 1.0],
            sphere_x_segments: 50,
            sphere_y_segments: 50,
            background_depth: 0.99,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            stage: Stage::default(),
            sun_radius: 1.0,
            earth_distance: 3.0,
            earth_scale: 0.3,
            moon_distance: 0.5,
            moon_scale: 0.1,
            obliquity_degrees: 23.5,
            earth_orbit_start_degrees: 20.0,
            moon_orbit_start_degrees: 20.0,
            earth_orbit_rate: 1.5,
            earth_spin_rate: 30.0,
            moon_orbit_rate: 10.5,
            time_scale: 1.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            orbit_distance: 5.0,
            orbit_turn_rate: 45.0,
            move_speed: 2.0,
            mouse_sensitivity: 1.0,
            invert_y: false,
        }
    }
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("res"),
            sun: "sun.jpg".to_string(),
            earth: "earth.jpg".to_string(),
            moon: "moon.jpg".to_string(),
            background: "background.jpg".to_string(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            dump_images: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(config_dir.join(CONFIG_FILE), serialized).map_err(ConfigError::WriteError)
    }

    /// Re-read `config.ron`; returns `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_demo_window() {
        let config = Config::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "Sphere");
        assert_eq!(config.render.clear_color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(config.render.sphere_x_segments, 50);
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("width: 800"));
        assert!(ron_str.contains("stage: Lit"));
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(window: (width: 1024), render: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_stage_parses_from_ron() {
        let config: Config = ron::from_str("(scene: (stage: FreeCamera))").unwrap();
        assert_eq!(config.scene.stage, Stage::FreeCamera);
        assert!(config.scene.stage.lighting());
        assert!(config.scene.stage.free_camera());
        assert!(!Stage::Textured.lighting());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.scene.earth_distance = 4.5;
        config.assets.dir = PathBuf::from("textures");

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.scene.moon_orbit_rate = 20.0;
        modified.save(dir.path()).unwrap();

        let reloaded = config.reload(dir.path()).unwrap();
        assert_eq!(reloaded.map(|c| c.scene.moon_orbit_rate), Some(20.0));
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();
        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let result = Config::load_or_create(dir.path());
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
