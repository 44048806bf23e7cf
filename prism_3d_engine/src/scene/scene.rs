/// Scene: sole owner of renderables, lights and cameras.
///
/// Uses SlotMaps for O(1) insert/remove with stable keys. The renderer only
/// borrows the scene for the duration of a frame and refers to its contents
/// by key, so nothing it holds can dangle when the scene is mutated between
/// frames.

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use crate::camera::Camera;
use crate::input::InputEvent;
use crate::{engine_debug, engine_warn};
use super::light::Light;
use super::renderable::Renderable;

new_key_type! {
    /// Stable key for a Renderable in a Scene
    pub struct RenderableKey;
    /// Stable key for a Light in a Scene
    pub struct LightKey;
    /// Stable key for a Camera in a Scene
    pub struct CameraKey;
}

pub struct Scene {
    name: String,
    renderables: SlotMap<RenderableKey, Renderable>,
    lights: SlotMap<LightKey, Light>,
    cameras: SlotMap<CameraKey, Camera>,
    /// Camera names for lookup (last added wins on duplicates)
    camera_names: FxHashMap<String, CameraKey>,
    /// Camera driven by input and used for rendering
    current_camera: Option<CameraKey>,
    /// Light used for shading (first light added unless changed)
    main_light: Option<LightKey>,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            renderables: SlotMap::with_key(),
            lights: SlotMap::with_key(),
            cameras: SlotMap::with_key(),
            camera_names: FxHashMap::default(),
            current_camera: None,
            main_light: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ===== RENDERABLES =====

    pub fn add_renderable(&mut self, renderable: Renderable) -> RenderableKey {
        self.renderables.insert(renderable)
    }

    /// Remove a renderable. Returns None if the key is invalid.
    pub fn remove_renderable(&mut self, key: RenderableKey) -> Option<Renderable> {
        self.renderables.remove(key)
    }

    pub fn renderable(&self, key: RenderableKey) -> Option<&Renderable> {
        self.renderables.get(key)
    }

    pub fn renderable_mut(&mut self, key: RenderableKey) -> Option<&mut Renderable> {
        self.renderables.get_mut(key)
    }

    /// Iterate over all renderables in insertion order (until removals reuse slots)
    pub fn renderables(&self) -> impl Iterator<Item = (RenderableKey, &Renderable)> {
        self.renderables.iter()
    }

    pub fn renderable_count(&self) -> usize {
        self.renderables.len()
    }

    pub fn clear_renderables(&mut self) {
        self.renderables.clear();
    }

    // ===== LIGHTS =====

    /// Add a light. The first light added becomes the main light.
    pub fn add_light(&mut self, light: Light) -> LightKey {
        let key = self.lights.insert(light);
        if self.main_light.is_none() {
            self.main_light = Some(key);
        }
        key
    }

    pub fn remove_light(&mut self, key: LightKey) -> Option<Light> {
        let removed = self.lights.remove(key);
        if self.main_light == Some(key) {
            self.main_light = self.lights.keys().next();
        }
        removed
    }

    pub fn light(&self, key: LightKey) -> Option<&Light> {
        self.lights.get(key)
    }

    pub fn light_mut(&mut self, key: LightKey) -> Option<&mut Light> {
        self.lights.get_mut(key)
    }

    pub fn lights(&self) -> impl Iterator<Item = (LightKey, &Light)> {
        self.lights.iter()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Change the main light. Returns false if the key is invalid.
    pub fn set_main_light(&mut self, key: LightKey) -> bool {
        if !self.lights.contains_key(key) {
            engine_warn!("prism3d::Scene", "Light {:?} couldn't be found", key);
            return false;
        }
        self.main_light = Some(key);
        true
    }

    /// The main light if it is active, else the first active light
    pub fn primary_light(&self) -> Option<(LightKey, &Light)> {
        if let Some(key) = self.main_light {
            if let Some(light) = self.lights.get(key).filter(|l| l.is_active()) {
                return Some((key, light));
            }
        }
        self.lights.iter().find(|(_, light)| light.is_active())
    }

    /// Active directional light used for shadow mapping.
    ///
    /// The main light wins when it is directional; otherwise the first
    /// active directional light.
    pub fn directional_light(&self) -> Option<(LightKey, &Light)> {
        if let Some(key) = self.main_light {
            if let Some(light) = self.lights.get(key).filter(|l| l.is_active() && l.is_directional()) {
                return Some((key, light));
            }
        }
        self.lights
            .iter()
            .find(|(_, light)| light.is_active() && light.is_directional())
    }

    // ===== CAMERAS =====

    /// Add a camera. The first camera added becomes the current one.
    pub fn add_camera(&mut self, camera: Camera) -> CameraKey {
        let name = camera.name().to_string();
        let key = self.cameras.insert(camera);
        if let Some(previous) = self.camera_names.insert(name.clone(), key) {
            engine_warn!("prism3d::Scene",
                "Camera name '{}' already used by {:?}; lookup now resolves to the new camera",
                name, previous);
        }
        if self.current_camera.is_none() {
            self.current_camera = Some(key);
        }
        key
    }

    /// Remove a camera. If it was current, no camera is current afterwards.
    pub fn remove_camera(&mut self, key: CameraKey) -> Option<Camera> {
        let removed = self.cameras.remove(key)?;
        self.camera_names.retain(|_, k| *k != key);
        if self.current_camera == Some(key) {
            self.current_camera = None;
        }
        Some(removed)
    }

    pub fn camera(&self, key: CameraKey) -> Option<&Camera> {
        self.cameras.get(key)
    }

    pub fn camera_mut(&mut self, key: CameraKey) -> Option<&mut Camera> {
        self.cameras.get_mut(key)
    }

    pub fn camera_key(&self, name: &str) -> Option<CameraKey> {
        self.camera_names.get(name).copied()
    }

    pub fn cameras(&self) -> impl Iterator<Item = (CameraKey, &Camera)> {
        self.cameras.iter()
    }

    /// Make `key` the current camera. Returns false if the key is invalid.
    pub fn set_current_camera(&mut self, key: CameraKey) -> bool {
        if !self.cameras.contains_key(key) {
            engine_warn!("prism3d::Scene", "Camera {:?} couldn't be found", key);
            return false;
        }
        self.current_camera = Some(key);
        true
    }

    /// Make the camera called `name` current. Returns false if unknown.
    pub fn set_current_camera_by_name(&mut self, name: &str) -> bool {
        match self.camera_key(name) {
            Some(key) => self.set_current_camera(key),
            None => {
                engine_warn!("prism3d::Scene", "Camera with name '{}' couldn't be found", name);
                false
            }
        }
    }

    pub fn current_camera_key(&self) -> Option<CameraKey> {
        self.current_camera
    }

    pub fn current_camera(&self) -> Option<&Camera> {
        self.current_camera.and_then(|key| self.cameras.get(key))
    }

    pub fn current_camera_mut(&mut self) -> Option<&mut Camera> {
        self.current_camera.and_then(|key| self.cameras.get_mut(key))
    }

    // ===== FRAME =====

    /// Advance the current camera's controller
    pub fn update(&mut self, dt: f32) {
        if let Some(camera) = self.current_camera_mut() {
            camera.update(dt);
        }
    }

    /// Route an input event.
    ///
    /// Resize events reach every camera; everything else only the current one.
    pub fn handle_event(&mut self, event: &InputEvent) {
        if let InputEvent::Resize { width, height } = *event {
            engine_debug!("prism3d::Scene", "Resizing {} camera(s) to {}x{}",
                self.cameras.len(), width, height);
            for camera in self.cameras.values_mut() {
                camera.handle_event(event);
            }
            return;
        }
        if let Some(camera) = self.current_camera_mut() {
            camera.handle_event(event);
        }
    }
}

#[cfg(test)]
#[path = "scene_tests.rs"]
mod tests;
