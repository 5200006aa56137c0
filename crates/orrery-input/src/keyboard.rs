//! Keyboard state keyed by physical key.
//!
//! Physical codes keep WASD in the same place on every layout.

use std::collections::HashSet;

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// The parts of a winit [`KeyEvent`] the tracker needs.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: PhysicalKey,
    pub state: ElementState,
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn code(code: KeyCode, state: ElementState) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state,
            repeat: false,
        }
    }
}

/// Held keys plus the keys that changed since the last
/// [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<PhysicalKey>,
    went_down: HashSet<PhysicalKey>,
    went_up: HashSet<PhysicalKey>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_event(&mut self, event: &KeyEvent) {
        self.process_raw(RawKeyEvent {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        });
    }

    /// Auto-repeat presses are dropped.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.went_down.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.key) {
                    self.went_up.insert(event.key);
                }
            }
        }
    }

    #[must_use]
    pub fn is_pressed(&self, code: KeyCode) -> bool {
        self.held.contains(&PhysicalKey::Code(code))
    }

    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.went_down.contains(&PhysicalKey::Code(code))
    }

    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.went_up.contains(&PhysicalKey::Code(code))
    }

    /// `+1` while only `positive` is held, `-1` while only `negative` is held.
    #[must_use]
    pub fn axis(&self, negative: KeyCode, positive: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.is_pressed(positive) {
            value += 1.0;
        }
        if self.is_pressed(negative) {
            value -= 1.0;
        }
        value
    }

    /// Forget every held key, e.g. after the window loses focus.
    pub fn release_all(&mut self) {
        self.went_up.extend(self.held.drain());
    }

    pub fn clear_transients(&mut self) {
        self.went_down.clear();
        self.went_up.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::code(code, ElementState::Pressed));
    }

    fn release(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::code(code, ElementState::Released));
    }

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for code in [KeyCode::KeyW, KeyCode::Space, KeyCode::Escape] {
            assert!(!kb.is_pressed(code));
            assert!(!kb.just_pressed(code));
            assert!(!kb.just_released(code));
        }
    }

    #[test]
    fn test_press_then_clear() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        assert!(kb.is_pressed(KeyCode::KeyW));
        assert!(kb.just_pressed(KeyCode::KeyW));
        kb.clear_transients();
        assert!(kb.is_pressed(KeyCode::KeyW));
        assert!(!kb.just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_release_is_reported_once() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::ArrowLeft);
        kb.clear_transients();
        release(&mut kb, KeyCode::ArrowLeft);
        assert!(!kb.is_pressed(KeyCode::ArrowLeft));
        assert!(kb.just_released(KeyCode::ArrowLeft));
        kb.clear_transients();
        assert!(!kb.just_released(KeyCode::ArrowLeft));
    }

    #[test]
    fn test_release_without_press_is_ignored() {
        let mut kb = KeyboardState::new();
        release(&mut kb, KeyCode::KeyS);
        assert!(!kb.just_released(KeyCode::KeyS));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyA);
        kb.clear_transients();
        kb.process_raw(RawKeyEvent {
            key: PhysicalKey::Code(KeyCode::KeyA),
            state: ElementState::Pressed,
            repeat: true,
        });
        assert!(!kb.just_pressed(KeyCode::KeyA));
        assert!(kb.is_pressed(KeyCode::KeyA));
    }

    #[test]
    fn test_axis_cancels_out() {
        let mut kb = KeyboardState::new();
        assert_eq!(kb.axis(KeyCode::KeyA, KeyCode::KeyD), 0.0);
        press(&mut kb, KeyCode::KeyD);
        assert_eq!(kb.axis(KeyCode::KeyA, KeyCode::KeyD), 1.0);
        press(&mut kb, KeyCode::KeyA);
        assert_eq!(kb.axis(KeyCode::KeyA, KeyCode::KeyD), 0.0);
        release(&mut kb, KeyCode::KeyD);
        assert_eq!(kb.axis(KeyCode::KeyA, KeyCode::KeyD), -1.0);
    }

    #[test]
    fn test_release_all() {
        let mut kb = KeyboardState::new();
        press(&mut kb, KeyCode::KeyW);
        press(&mut kb, KeyCode::Space);
        kb.clear_transients();
        kb.release_all();
        assert!(!kb.is_pressed(KeyCode::KeyW));
        assert!(kb.just_released(KeyCode::Space));
    }
}
