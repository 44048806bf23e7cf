/// Discrete input events delivered to camera controllers.

use std::fmt;
use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Closed set of input events understood by camera controllers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key pressed or released (physical key code)
    Key { code: KeyCode, pressed: bool },
    /// Mouse button pressed or released at a cursor position (pixels)
    MouseButton { button: MouseButton, pressed: bool, position: Vec2 },
    /// Cursor moved to a new position (pixels, origin top-left)
    MouseMove { position: Vec2 },
    /// Scroll offset in lines (positive y = away from the user)
    Scroll { offset: Vec2 },
    /// Drawable surface resized (pixels)
    Resize { width: u32, height: u32 },
}

impl fmt::Display for InputEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputEvent::Key { code, pressed } => {
                let action = if *pressed { "pressed" } else { "released" };
                write!(f, "key {:?} {}", code, action)
            }
            InputEvent::MouseButton { button, pressed, position } => {
                let action = if *pressed { "pressed" } else { "released" };
                write!(f, "mouse {:?} {} at ({}, {})", button, action, position.x, position.y)
            }
            InputEvent::MouseMove { position } => {
                write!(f, "mouse move to ({}, {})", position.x, position.y)
            }
            InputEvent::Scroll { offset } => write!(f, "scroll ({}, {})", offset.x, offset.y),
            InputEvent::Resize { width, height } => write!(f, "resize {}x{}", width, height),
        }
    }
}
