use crate::events::{self, PendingKeys};
use crate::input::{EventLog, FrameDesires};
use glam::Vec3;
use instant::Instant;
use portal_core::{
    CameraController, ControllerParams, Intent, Multiverse, ResolvedScene, UniverseError,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;

fn to_js(err: UniverseError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Browser-facing session: one multiverse, one camera, one resolved scene.
///
/// The page owns rendering. Each animation frame it calls `tick()` and then
/// reads the camera back through `camera_uniform` / `position` / `fov`.
#[wasm_bindgen]
pub struct PortalSession {
    multiverse: Multiverse,
    controller: CameraController,
    scene: ResolvedScene,
    pending: Rc<RefCell<PendingKeys>>,
    desires: FrameDesires,
    sim_time: f32,
    last_instant: Instant,
    targeted: Option<String>,
    events: EventLog,
    impacts: u64,
    seed: u64,
}

#[wasm_bindgen]
impl PortalSession {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Result<PortalSession, JsValue> {
        let seed = seed as u64;
        let multiverse = Multiverse::generate(seed).map_err(to_js)?;
        let controller = CameraController::new(ControllerParams::default()).map_err(to_js)?;
        let scene = multiverse.resolve(0.0);
        let pending = Rc::new(RefCell::new(PendingKeys::default()));
        events::wire_keyboard(pending.clone());
        log::info!(
            "[session] seed={} entities={}",
            seed,
            multiverse.registry().len()
        );
        Ok(Self {
            multiverse,
            controller,
            scene,
            pending,
            desires: FrameDesires::default(),
            sim_time: 0.0,
            last_instant: Instant::now(),
            targeted: None,
            events: EventLog::default(),
            impacts: 0,
            seed,
        })
    }

    /// Advance by the wall-clock time since the previous tick.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_instant).as_secs_f32().min(0.1);
        self.last_instant = now;
        self.advance(dt);
    }

    /// Advance by an explicit `dt` in seconds.
    pub fn advance(&mut self, dt: f32) {
        let movement = {
            let mut p = self.pending.borrow_mut();
            if std::mem::take(&mut p.clear_focus) {
                self.desires.release();
            }
            if std::mem::take(&mut p.toggle_pointer_lock) {
                self.desires.toggle_pointer_lock();
            }
            if let Some(index) = p.slot.take() {
                self.desires.set_slot(Some(index));
            }
            // Keys are read after page calls made since the last frame, so a key warp wins
            if let Some(universe) = p.warp.take() {
                self.desires.request_warp(universe);
            }
            p.keys.axes()
        };

        self.sim_time += dt;
        self.multiverse.resolve_into(self.sim_time, &mut self.scene);

        let input = self.desires.snapshot(movement);
        let out = self.controller.advance(dt, &input, &self.scene);
        self.desires.after_frame(&out.state.intent, movement);
        self.targeted = out.targeted;
        for event in &out.events {
            self.events.push(event);
        }
    }

    pub fn set_focus(&mut self, id: Option<String>) {
        self.desires.set_focus(id);
    }

    pub fn set_slot(&mut self, index: Option<u32>) {
        self.desires.set_slot(index.map(|i| i as usize));
    }

    /// Queue a warp for the next frame, releasing any focus or slot lock.
    pub fn request_warp(&mut self, universe: u32) {
        self.desires.request_warp(universe);
    }

    /// Mouse-look direction from the page; a zero vector clears it.
    pub fn set_look_direction(&mut self, x: f32, y: f32, z: f32) {
        self.desires.set_look_direction(Vec3::new(x, y, z));
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.desires.set_pointer_locked(locked);
    }

    pub fn save_slot(&mut self, index: u32, label: String) -> Result<(), JsValue> {
        self.controller
            .save_current_view(index as usize, label)
            .map_err(to_js)
    }

    /// Record a meteor impact on `star_id`; returns the new planet's id.
    pub fn impact(&mut self, star_id: &str) -> Result<String, JsValue> {
        self.impacts += 1;
        let seed = portal_core::mix_seed(self.seed, self.impacts);
        let planet = self
            .multiverse
            .record_impact(star_id, seed)
            .map_err(to_js)?;
        Ok(planet.id.clone())
    }

    /// View-projection matrix followed by the eye position, as 20 floats.
    pub fn camera_uniform(&self, aspect: f32) -> js_sys::Float32Array {
        let uniform = self.controller.state().to_camera(aspect).uniform();
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&uniform));
        js_sys::Float32Array::from(floats)
    }

    pub fn position(&self) -> Vec<f32> {
        self.controller.state().position.to_array().to_vec()
    }

    pub fn look_target(&self) -> Vec<f32> {
        self.controller.state().look_target.to_array().to_vec()
    }

    pub fn fov(&self) -> f32 {
        self.controller.state().fov_degrees
    }

    pub fn intent(&self) -> String {
        match &self.controller.state().intent {
            Intent::FreeFly => "free-fly".to_string(),
            Intent::FocusEntity(id) => format!("focus:{id}"),
            Intent::PresetSlot(i) => format!("slot:{i}"),
            Intent::CinematicWarp {
                target_universe,
                progress,
            } => format!("warp:{target_universe}:{progress:.3}"),
        }
    }

    pub fn current_universe(&self) -> u32 {
        self.controller.current_universe()
    }

    pub fn targeted(&self) -> Option<String> {
        self.targeted.clone()
    }

    pub fn entity_position(&self, id: &str) -> Option<Vec<f32>> {
        self.scene.position(id).map(|p| p.to_array().to_vec())
    }

    /// Ids whose id or label contain `query`, case-insensitively.
    pub fn search(&self, query: &str) -> js_sys::Array {
        self.multiverse
            .registry()
            .search(query)
            .into_iter()
            .map(|r| JsValue::from_str(&r.id))
            .collect()
    }

    /// Controller events since the last call, as `kind:detail` strings.
    /// Only the most recent entries are kept between calls.
    pub fn drain_events(&mut self) -> js_sys::Array {
        self.events.drain().map(|e| JsValue::from_str(&e)).collect()
    }
}
