//! The orrery application: window, event loop and the fixed-timestep cycle.

pub mod game_loop;
pub mod platform;
pub mod window;

pub use platform::{PlatformDirs, PlatformError};
pub use window::{AppError, AppState, run};
