//! Configuration for the orrery demo.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line, and are checked for changes with [`Config::reload`].

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AssetConfig, CameraConfig, Config, DebugConfig, RenderConfig, SceneConfig, Stage,
    WindowConfig,
};
pub use error::ConfigError;
