//! Input events consumed by camera controllers.
//!
//! The engine never polls devices. The windowing layer forwards its
//! `winit` events through an `InputTranslator`, which produces the closed
//! `InputEvent` set that controllers match on.

mod input_event;
mod input_translator;

pub use input_event::InputEvent;
pub use input_translator::{InputTranslator, PIXELS_PER_SCROLL_LINE};
