//! Mouse motion, buttons, wheel and cursor capture.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::window::{CursorGrabMode, Window};

/// Pixels of a touchpad scroll counted as one wheel notch.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    went_down: bool,
}

/// Mouse state accumulated between [`clear_transients`](Self::clear_transients) calls.
///
/// While captured, look deltas come from raw device motion; otherwise from
/// successive cursor positions.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    delta: Vec2,
    left: ButtonFrame,
    right: ButtonFrame,
    scroll: f32,
    captured: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if !self.captured
            && let Some(old) = self.position
        {
            self.delta += new_pos - old;
        }
        self.position = Some(new_pos);
    }

    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let frame = match button {
            MouseButton::Left => &mut self.left,
            MouseButton::Right => &mut self.right,
            _ => return,
        };
        frame.held = state.is_pressed();
        frame.went_down |= state.is_pressed();
    }

    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    pub fn on_cursor_left(&mut self) {
        self.position = None;
    }

    /// Grab and hide the cursor, or give it back.
    pub fn set_captured(&mut self, window: &Window, captured: bool) {
        if captured {
            if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                && let Err(err) = window.set_cursor_grab(CursorGrabMode::Confined)
            {
                tracing::warn!("cursor grab unavailable: {err}");
            }
            window.set_cursor_visible(false);
        } else {
            let _ = window.set_cursor_grab(CursorGrabMode::None);
            window.set_cursor_visible(true);
        }
        self.set_captured_flag(captured);
    }

    /// Flip the capture flag without touching a window.
    pub fn set_captured_flag(&mut self, captured: bool) {
        if self.captured != captured {
            tracing::debug!(captured, "cursor capture changed");
        }
        self.captured = captured;
        self.delta = Vec2::ZERO;
    }

    pub fn clear_transients(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
        self.left.went_down = false;
        self.right.went_down = false;
    }

    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel notches this frame, positive away from the user.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn left_held(&self) -> bool {
        self.left.held
    }

    #[must_use]
    pub fn left_clicked(&self) -> bool {
        self.left.went_down
    }

    #[must_use]
    pub fn right_held(&self) -> bool {
        self.right.held
    }

    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_first_move_has_no_delta() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_delta_accumulates_between_moves() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(100.0, 200.0);
        ms.on_cursor_moved(104.0, 199.0);
        ms.on_cursor_moved(110.0, 195.0);
        assert_eq!(ms.delta(), Vec2::new(10.0, -5.0));
        ms.clear_transients();
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_captured_uses_raw_motion_only() {
        let mut ms = MouseState::new();
        ms.set_captured_flag(true);
        ms.on_cursor_moved(10.0, 10.0);
        ms.on_cursor_moved(50.0, 50.0);
        ms.on_raw_motion(3.0, -2.0);
        assert_eq!(ms.delta(), Vec2::new(3.0, -2.0));
    }

    #[test]
    fn test_raw_motion_ignored_when_free() {
        let mut ms = MouseState::new();
        ms.on_raw_motion(3.0, -2.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_left_click_is_transient() {
        let mut ms = MouseState::new();
        ms.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(ms.left_clicked());
        assert!(ms.left_held());
        ms.clear_transients();
        assert!(!ms.left_clicked());
        assert!(ms.left_held());
        ms.on_button(MouseButton::Left, ElementState::Released);
        assert!(!ms.left_held());
    }

    #[test]
    fn test_scroll_lines_and_pixels() {
        let mut ms = MouseState::new();
        ms.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        ms.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 20.0)));
        assert!((ms.scroll() - 1.5).abs() < f32::EPSILON);
        ms.clear_transients();
        assert_eq!(ms.scroll(), 0.0);
    }

    #[test]
    fn test_cursor_left_resets_tracking() {
        let mut ms = MouseState::new();
        ms.on_cursor_moved(10.0, 10.0);
        ms.on_cursor_left();
        ms.on_cursor_moved(300.0, 300.0);
        assert_eq!(ms.delta(), Vec2::ZERO);
    }
}
