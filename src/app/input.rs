//! Polled Input State
//!
//! Window events are folded into an [`Input`] value that update code reads
//! by polling; nothing is queued. Per-frame deltas (cursor movement,
//! scroll) are cleared at the end of every frame.

use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta};
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Currently held keys.
    keys: HashSet<KeyCode>,
    /// Currently held mouse buttons.
    mouse_buttons: HashSet<MouseButton>,
    /// Cursor position in window coordinates.
    pub cursor_position: Vec2,
    /// Cursor movement accumulated this frame.
    pub cursor_delta: Vec2,
    /// Scroll amount accumulated this frame.
    pub scroll_delta: Vec2,
    /// Window size in physical pixels.
    pub screen_size: Vec2,
    /// The first cursor event only establishes the reference position;
    /// without this latch the initial jump would produce a huge delta.
    saw_cursor: bool,
}

impl Input {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            screen_size: Vec2::new(width as f32, height as f32),
            ..Self::default()
        }
    }

    /// Clears per-frame deltas. Called once at the end of every frame.
    pub fn end_frame(&mut self) {
        self.cursor_delta = Vec2::ZERO;
        self.scroll_delta = Vec2::ZERO;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    pub fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        match event.state {
            ElementState::Pressed => {
                self.keys.insert(code);
            }
            ElementState::Released => {
                self.keys.remove(&code);
            }
        }
    }

    pub fn handle_cursor_move(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.saw_cursor {
            self.cursor_delta += new_pos - self.cursor_position;
        } else {
            self.saw_cursor = true;
        }
        self.cursor_position = new_pos;
    }

    pub fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.mouse_buttons.insert(button);
            }
            ElementState::Released => {
                self.mouse_buttons.remove(&button);
            }
        }
    }

    pub fn handle_mouse_wheel(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(x, y) => {
                self.scroll_delta += Vec2::new(x, y);
            }
            MouseScrollDelta::PixelDelta(pos) => {
                // Pixel deltas run much larger than line deltas.
                self.scroll_delta += Vec2::new(pos.x as f32, pos.y as f32) * 0.1;
            }
        }
    }

    #[must_use]
    pub fn is_key_pressed(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.contains(&button)
    }

    /// WASD forward axis in camera space. Forward is −Z, so W yields −1.
    #[must_use]
    pub fn forward_axis(&self) -> f32 {
        if self.is_key_pressed(KeyCode::KeyW) {
            -1.0
        } else if self.is_key_pressed(KeyCode::KeyS) {
            1.0
        } else {
            0.0
        }
    }

    /// WASD strafe axis in camera space: A yields −1, D yields +1.
    #[must_use]
    pub fn right_axis(&self) -> f32 {
        if self.is_key_pressed(KeyCode::KeyA) {
            -1.0
        } else if self.is_key_pressed(KeyCode::KeyD) {
            1.0
        } else {
            0.0
        }
    }
}
