/// A renderable borrowed from the scene for the duration of one frame.

use crate::scene::{Renderable, RenderableKey};

#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub key: RenderableKey,
    pub renderable: &'a Renderable,
}

impl<'a> RenderItem<'a> {
    pub fn new(key: RenderableKey, renderable: &'a Renderable) -> Self {
        Self { key, renderable }
    }
}
