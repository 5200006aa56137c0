//! Demo bindings: raw keyboard and mouse state turned into camera intents.
//!
//! | Input            | Effect                                  |
//! |------------------|-----------------------------------------|
//! | W/S, A/D         | free camera forward/back, left/right    |
//! | Space / Ctrl     | free camera up / down                   |
//! | Mouse            | free camera look (captured or right-drag) |
//! | Wheel            | free camera speed                       |
//! | Arrow keys       | orbit camera yaw / pitch                |
//! | Left click       | capture cursor (free camera only)       |
//! | Escape           | release cursor, or quit when released   |
//! | R                | reset camera                            |
//! | F5               | reload `config.ron`                     |

use glam::{Vec2, Vec3};
use winit::keyboard::KeyCode;

use crate::{KeyboardState, MouseState};

/// Everything the app reacts to during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlFrame {
    /// Camera-local movement intent: `x` right, `y` up, `z` forward. Each in `-1..=1`.
    pub movement: Vec3,
    /// Look delta in pixels; `y` grows downward.
    pub look: Vec2,
    /// Orbit turn intent: `x` yaw, `y` pitch, each in `-1..=1`.
    pub orbit: Vec2,
    /// Wheel notches.
    pub speed_steps: f32,
    pub capture_cursor: bool,
    pub release_cursor: bool,
    pub quit: bool,
    pub reset_camera: bool,
    pub reload_config: bool,
}

/// Owns the input trackers and maps them to [`ControlFrame`]s.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl Controls {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current intents. Does not clear transients.
    ///
    /// `free_camera` is set while the mouse-look camera is active; only then
    /// does a left click capture the cursor.
    #[must_use]
    pub fn frame(&self, free_camera: bool) -> ControlFrame {
        let kb = &self.keyboard;
        let captured = self.mouse.is_captured();

        let look = if captured || self.mouse.right_held() {
            self.mouse.delta()
        } else {
            Vec2::ZERO
        };

        let escape = kb.just_pressed(KeyCode::Escape);

        ControlFrame {
            movement: Vec3::new(
                kb.axis(KeyCode::KeyA, KeyCode::KeyD),
                kb.axis(KeyCode::ControlLeft, KeyCode::Space),
                kb.axis(KeyCode::KeyS, KeyCode::KeyW),
            ),
            look,
            orbit: Vec2::new(
                kb.axis(KeyCode::ArrowLeft, KeyCode::ArrowRight),
                kb.axis(KeyCode::ArrowDown, KeyCode::ArrowUp),
            ),
            speed_steps: self.mouse.scroll(),
            capture_cursor: free_camera && !captured && self.mouse.left_clicked(),
            release_cursor: captured && escape,
            quit: !captured && escape,
            reset_camera: kb.just_pressed(KeyCode::KeyR),
            reload_config: kb.just_pressed(KeyCode::F5),
        }
    }

    /// Call once per rendered frame after the frame has been consumed.
    pub fn end_frame(&mut self) {
        self.keyboard.clear_transients();
        self.mouse.clear_transients();
    }
}
