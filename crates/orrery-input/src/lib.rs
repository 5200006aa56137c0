//! Keyboard and mouse state collected from winit events, and the per-tick
//! camera controls derived from them.

pub mod controls;
pub mod keyboard;
pub mod mouse;

pub use controls::{ControlFrame, Controls};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
