/// Translation from `winit` window events to `InputEvent`.

use glam::Vec2;
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::PhysicalKey;
use super::InputEvent;

/// Pixel-precise scroll deltas (touchpads) are divided by this to get lines
pub const PIXELS_PER_SCROLL_LINE: f32 = 100.0;

/// Stateful translator: remembers the last cursor position so that button
/// events (which winit reports without a position) carry one.
#[derive(Debug, Default)]
pub struct InputTranslator {
    cursor: Vec2,
}

impl InputTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last known cursor position (pixels)
    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Translate a window event. Returns `None` for events cameras ignore.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.repeat {
                    return None;
                }
                self.key(event.physical_key, event.state)
            }
            WindowEvent::MouseInput { state, button, .. } => Some(self.mouse_button(*button, *state)),
            WindowEvent::CursorMoved { position, .. } => Some(self.cursor_moved(*position)),
            WindowEvent::MouseWheel { delta, .. } => Some(self.mouse_wheel(*delta)),
            WindowEvent::Resized(size) => Some(self.resized(*size)),
            _ => None,
        }
    }

    pub fn key(&mut self, key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        match key {
            PhysicalKey::Code(code) => Some(InputEvent::Key {
                code,
                pressed: state == ElementState::Pressed,
            }),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    pub fn mouse_button(&mut self, button: MouseButton, state: ElementState) -> InputEvent {
        InputEvent::MouseButton {
            button,
            pressed: state == ElementState::Pressed,
            position: self.cursor,
        }
    }

    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> InputEvent {
        self.cursor = Vec2::new(position.x as f32, position.y as f32);
        InputEvent::MouseMove { position: self.cursor }
    }

    pub fn mouse_wheel(&mut self, delta: MouseScrollDelta) -> InputEvent {
        let offset = match delta {
            MouseScrollDelta::LineDelta(x, y) => Vec2::new(x, y),
            MouseScrollDelta::PixelDelta(pos) => {
                Vec2::new(pos.x as f32, pos.y as f32) / PIXELS_PER_SCROLL_LINE
            }
        };
        InputEvent::Scroll { offset }
    }

    pub fn resized(&mut self, size: PhysicalSize<u32>) -> InputEvent {
        InputEvent::Resize { width: size.width, height: size.height }
    }
}

#[cfg(test)]
#[path = "input_translator_tests.rs"]
mod tests;
