//! Unified camera navigation controller.
//!
//! One `advance` call per rendered frame reconciles every navigation desire
//! (manual flight, focus lock, preset slots, cinematic warps) into a single
//! `CameraState`. The controller never computes orbits itself; it reads
//! resolved world positions from a `ResolvedScene`.
//!
//! Precedence, evaluated every frame in this order:
//! 1. A warp in flight keeps flying. Movement is ignored unless
//!    `ControllerParams::warp_cancellable` is set, in which case it aborts the warp.
//!    Requests for another warp are dropped until it lands.
//! 2. A warp request starts a new warp to a known universe. This is checked
//!    before movement, so a request and movement on the same frame start the
//!    warp; a strict reading of rule 1 would let that movement win instead.
//! 3. Any non-zero movement switches to free flight.
//! 4. A focus id locks onto that entity; an unresolved id falls back to free
//!    flight for the frame and is retried on the next one.
//! 5. An in-range slot index glides to that preset; out of range is ignored.
//! 6. Otherwise the last intent holds. Focus and preset glides stop where
//!    they are; free flight keeps coasting on its damped velocity.

use crate::constants::*;
use crate::easing::{ease_in_out_cubic, warp_fov};
use crate::entity::EntityKind;
use crate::error::{Result, UniverseError};
use crate::scene::ResolvedScene;
use crate::state::{CameraState, Intent, PresetSlot, Viewpoint};
use crate::universe::UNIVERSES;
use fnv::FnvHashMap;
use glam::Vec3;
use smallvec::SmallVec;

/// Raw movement axes in camera-relative terms, each typically in `[-1, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveAxes {
    pub forward: f32,
    pub right: f32,
    pub up: f32,
}

impl MoveAxes {
    pub fn is_zero(&self) -> bool {
        self.forward == 0.0 && self.right == 0.0 && self.up == 0.0
    }
}

/// Everything the host gathered from input devices and UI state for one frame.
///
/// `warp_request` is one-shot: send it on the frame the user asks for a warp.
#[derive(Clone, Debug, Default)]
pub struct InputSnapshot {
    pub movement: MoveAxes,
    /// View direction from the host's own mouse-look, if it has one.
    pub look_direction: Option<Vec3>,
    pub focus_entity_id: Option<String>,
    pub active_slot_index: Option<usize>,
    pub warp_request: Option<u32>,
    /// First-person pointer lock; enables reticle targeting.
    pub pointer_locked: bool,
}

/// Tuning for the controller. Defaults come from `constants.rs`.
#[derive(Clone, Debug)]
pub struct ControllerParams {
    pub speed: f32,
    /// Per-frame velocity retention, strictly inside (0, 1).
    pub damping: f32,
    /// Exponential smoothing fraction per frame for focus and preset glides, in (0, 1].
    pub focus_lerp: f32,
    pub free_look_distance: f32,
    pub warp_duration_secs: f32,
    pub warp_fov_peak: f32,
    pub rest_fov: f32,
    /// Let movement input abort a warp in flight. Off by default: warps are a cinematic lock.
    pub warp_cancellable: bool,
}

impl Default for ControllerParams {
    fn default() -> Self {
        Self {
            speed: FREE_FLY_SPEED,
            damping: FREE_FLY_DAMPING,
            focus_lerp: FOCUS_LERP_FACTOR,
            free_look_distance: FREE_LOOK_DISTANCE,
            warp_duration_secs: WARP_DURATION_SECS,
            warp_fov_peak: WARP_FOV_PEAK_DEG,
            rest_fov: REST_FOV_DEG,
            warp_cancellable: false,
        }
    }
}

impl ControllerParams {
    fn validate(&self) -> Result<()> {
        if !(self.damping > 0.0 && self.damping < 1.0) {
            return Err(UniverseError::InvalidArgument(format!(
                "damping must be inside (0, 1), got {}",
                self.damping
            )));
        }
        if !(self.focus_lerp > 0.0 && self.focus_lerp <= 1.0) {
            return Err(UniverseError::InvalidArgument(format!(
                "focus lerp must be inside (0, 1], got {}",
                self.focus_lerp
            )));
        }
        if !(self.warp_duration_secs > 0.0) {
            return Err(UniverseError::InvalidArgument(format!(
                "warp duration must be positive, got {}",
                self.warp_duration_secs
            )));
        }
        Ok(())
    }
}

/// Notable things that happened during one `advance` call.
#[derive(Clone, Debug, PartialEq)]
pub enum ControllerEvent {
    WarpStarted { target_universe: u32 },
    WarpCompleted { target_universe: u32 },
    WarpCancelled { target_universe: u32, progress: f32 },
    WarpRejected { target_universe: u32 },
    FocusUnresolved(String),
    SlotIgnored(usize),
}

#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub state: CameraState,
    /// Entity under the screen-centre reticle while the pointer is locked.
    pub targeted: Option<String>,
    pub events: SmallVec<[ControllerEvent; 2]>,
}

#[derive(Clone, Debug)]
struct WarpFlight {
    target_universe: u32,
    from: Viewpoint,
    to: Viewpoint,
    start_fov: f32,
    elapsed: f32,
}

impl WarpFlight {
    fn progress(&self, duration: f32) -> f32 {
        let p = (self.elapsed / duration).clamp(0.0, 1.0);
        if p >= 1.0 - WARP_COMPLETE_EPSILON {
            1.0
        } else {
            p
        }
    }
}

/// Camera offset from a focused body, closer for smaller bodies.
pub fn framing_offset(kind: EntityKind) -> Vec3 {
    match kind {
        EntityKind::Star => STAR_FRAMING,
        EntityKind::Planet => PLANET_FRAMING,
        EntityKind::Satellite => SATELLITE_FRAMING,
        EntityKind::Relic => RELIC_FRAMING,
        EntityKind::Meteor => METEOR_FRAMING,
    }
}

fn default_slots() -> Vec<PresetSlot> {
    let slot = |position: Vec3, look_target: Vec3, label: &str| PresetSlot {
        position,
        look_target,
        label: label.to_string(),
    };
    let slots = vec![
        slot(START_POSITION, Vec3::ZERO, "Overview"),
        slot(Vec3::new(0.0, 40.0, 260.0), Vec3::ZERO, "Orbit Plane"),
        slot(Vec3::new(0.0, 700.0, 1.0), Vec3::ZERO, "Zenith"),
        slot(
            Vec3::new(1000.0, 900.0, 1800.0),
            Vec3::new(1000.0, 0.0, 500.0),
            "Multiverse",
        ),
    ];
    debug_assert_eq!(slots.len(), PRESET_SLOT_COUNT);
    slots
}

/// Frame-driven camera state machine. See the module docs for precedence.
pub struct CameraController {
    params: ControllerParams,
    state: CameraState,
    velocity: Vec3,
    slots: Vec<PresetSlot>,
    anchors: FnvHashMap<u32, Viewpoint>,
    warp: Option<WarpFlight>,
    current_universe: u32,
}

impl CameraController {
    /// Controller with warp anchors for every known universe.
    pub fn new(params: ControllerParams) -> Result<Self> {
        params.validate()?;
        let anchors = UNIVERSES.iter().map(|u| (u.id, u.anchor())).collect();
        Ok(Self {
            state: CameraState {
                fov_degrees: params.rest_fov,
                ..CameraState::default()
            },
            params,
            velocity: Vec3::ZERO,
            slots: default_slots(),
            anchors,
            warp: None,
            current_universe: 0,
        })
    }

    pub fn params(&self) -> &ControllerParams {
        &self.params
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn slots(&self) -> &[PresetSlot] {
        &self.slots
    }

    /// Universe the camera last warped to (0 at start).
    pub fn current_universe(&self) -> u32 {
        self.current_universe
    }

    /// Progress of the warp in flight, if any.
    pub fn warp_progress(&self) -> Option<f32> {
        self.warp
            .as_ref()
            .map(|w| w.progress(self.params.warp_duration_secs))
    }

    /// Place the camera directly, dropping any glide, warp and momentum.
    pub fn teleport(&mut self, view: Viewpoint) {
        self.state.position = view.position;
        self.state.look_target = view.look_target;
        self.state.fov_degrees = self.params.rest_fov;
        self.state.intent = Intent::FreeFly;
        self.velocity = Vec3::ZERO;
        self.warp = None;
    }

    /// Snapshot the current view into preset slot `index`.
    pub fn save_current_view(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        let count = self.slots.len();
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(UniverseError::OutOfRangeSlot { index, count })?;
        slot.position = self.state.position;
        slot.look_target = self.state.look_target;
        slot.label = label.into();
        log::debug!("[camera] saved view into slot {} ({})", index, slot.label);
        Ok(())
    }

    /// Advance one frame.
    pub fn advance(&mut self, dt: f32, input: &InputSnapshot, scene: &ResolvedScene) -> FrameOutput {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let mut events = SmallVec::new();
        let moving = !input.movement.is_zero();

        if self.warp.is_some() && moving && self.params.warp_cancellable {
            self.cancel_warp(&mut events);
        }
        if self.warp.is_none() {
            if let Some(target) = input.warp_request {
                self.start_warp(target, &mut events);
            }
        }

        if self.warp.is_some() {
            self.step_warp(dt, &mut events);
        } else if moving {
            self.enter_free_fly();
            self.step_free_fly(dt, input);
        } else if let Some(id) = input.focus_entity_id.as_deref() {
            self.step_focus(id, dt, input, scene, &mut events);
        } else if let Some(index) = input.active_slot_index {
            self.step_slot(index, dt, input, &mut events);
        } else {
            self.hold(dt, input);
        }

        let targeted = if input.pointer_locked {
            let dir = input
                .look_direction
                .and_then(|d| d.try_normalize())
                .unwrap_or_else(|| self.state.view_direction());
            scene.pick(self.state.position, dir).map(str::to_string)
        } else {
            None
        };

        FrameOutput {
            state: self.state.clone(),
            targeted,
            events,
        }
    }

    fn enter_free_fly(&mut self) {
        if self.state.intent != Intent::FreeFly {
            log::debug!("[camera] {:?} -> FreeFly", self.state.intent);
            self.state.intent = Intent::FreeFly;
        }
    }

    /// Leave free flight for a glide; residual momentum is dropped so the glide stays monotonic.
    fn enter_glide(&mut self, intent: Intent) {
        if self.state.intent != intent {
            log::debug!("[camera] {:?} -> {:?}", self.state.intent, intent);
            self.state.intent = intent;
        }
        self.velocity = Vec3::ZERO;
    }

    fn move_direction(&self, input: &InputSnapshot) -> Vec3 {
        let m = input.movement;
        if m.is_zero() {
            return Vec3::ZERO;
        }
        let look = input
            .look_direction
            .and_then(|d| d.try_normalize())
            .unwrap_or_else(|| self.state.view_direction());
        let front = Vec3::new(look.x, 0.0, look.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let side = front.cross(Vec3::Y);
        (front * m.forward + side * m.right + Vec3::Y * m.up).clamp_length_max(1.0)
    }

    fn step_free_fly(&mut self, dt: f32, input: &InputSnapshot) {
        let dir = self.move_direction(input);
        self.velocity = self.velocity * self.params.damping + dir * self.params.speed * dt;
        self.state.position += self.velocity;
        match input.look_direction.and_then(|d| d.try_normalize()) {
            Some(look) => {
                self.state.look_target =
                    self.state.position + look * self.params.free_look_distance;
            }
            None => self.state.look_target += self.velocity,
        }
    }

    fn glide_toward(&mut self, dest: Viewpoint) {
        let k = self.params.focus_lerp;
        self.state.position = self.state.position.lerp(dest.position, k);
        self.state.look_target = self.state.look_target.lerp(dest.look_target, k);
    }

    fn step_focus(
        &mut self,
        id: &str,
        dt: f32,
        input: &InputSnapshot,
        scene: &ResolvedScene,
        events: &mut SmallVec<[ControllerEvent; 2]>,
    ) {
        match scene.get(id) {
            Some(body) => {
                let dest = Viewpoint {
                    position: body.position + framing_offset(body.kind),
                    look_target: body.position,
                };
                self.enter_glide(Intent::FocusEntity(id.to_string()));
                self.glide_toward(dest);
            }
            None => {
                log::debug!("[camera] focus target '{}' not resolved yet", id);
                events.push(ControllerEvent::FocusUnresolved(id.to_string()));
                self.enter_free_fly();
                self.step_free_fly(dt, input);
            }
        }
    }

    fn step_slot(
        &mut self,
        index: usize,
        dt: f32,
        input: &InputSnapshot,
        events: &mut SmallVec<[ControllerEvent; 2]>,
    ) {
        match self.slots.get(index) {
            Some(slot) => {
                let dest = slot.viewpoint();
                self.enter_glide(Intent::PresetSlot(index));
                self.glide_toward(dest);
            }
            None => {
                log::debug!(
                    "[camera] slot {} ignored (slot count {})",
                    index,
                    self.slots.len()
                );
                events.push(ControllerEvent::SlotIgnored(index));
                self.hold(dt, input);
            }
        }
    }

    /// No new desire this frame: keep the active intent without retargeting.
    /// A released focus or preset glide holds position.
    fn hold(&mut self, dt: f32, input: &InputSnapshot) {
        let gliding = matches!(
            self.state.intent,
            Intent::FocusEntity(_) | Intent::PresetSlot(_)
        );
        if !gliding {
            self.step_free_fly(dt, input);
        }
    }

    fn start_warp(&mut self, target_universe: u32, events: &mut SmallVec<[ControllerEvent; 2]>) {
        let Some(to) = self.anchors.get(&target_universe).copied() else {
            log::warn!("[warp] unknown universe {}", target_universe);
            events.push(ControllerEvent::WarpRejected { target_universe });
            return;
        };
        log::info!(
            "[warp] {} -> {} over {:.2}s",
            self.current_universe,
            target_universe,
            self.params.warp_duration_secs
        );
        self.warp = Some(WarpFlight {
            target_universe,
            from: Viewpoint {
                position: self.state.position,
                look_target: self.state.look_target,
            },
            to,
            start_fov: self.state.fov_degrees,
            elapsed: 0.0,
        });
        self.velocity = Vec3::ZERO;
        self.state.intent = Intent::CinematicWarp {
            target_universe,
            progress: 0.0,
        };
        events.push(ControllerEvent::WarpStarted { target_universe });
    }

    fn step_warp(&mut self, dt: f32, events: &mut SmallVec<[ControllerEvent; 2]>) {
        let duration = self.params.warp_duration_secs;
        let Some(flight) = self.warp.as_mut() else {
            return;
        };
        flight.elapsed += dt;
        let progress = flight.progress(duration);

        if progress >= 1.0 {
            let target_universe = flight.target_universe;
            let to = flight.to;
            self.warp = None;
            self.state.position = to.position;
            self.state.look_target = to.look_target;
            self.state.fov_degrees = self.params.rest_fov;
            self.state.intent = Intent::FreeFly;
            self.current_universe = target_universe;
            log::info!("[warp] arrived in universe {}", target_universe);
            events.push(ControllerEvent::WarpCompleted { target_universe });
            return;
        }

        let eased = ease_in_out_cubic(progress);
        self.state.position = flight.from.position.lerp(flight.to.position, eased);
        self.state.look_target = flight.from.look_target.lerp(flight.to.look_target, eased);
        self.state.fov_degrees = warp_fov(
            progress,
            flight.start_fov,
            self.params.warp_fov_peak,
            self.params.rest_fov,
        );
        self.state.intent = Intent::CinematicWarp {
            target_universe: flight.target_universe,
            progress,
        };
    }

    fn cancel_warp(&mut self, events: &mut SmallVec<[ControllerEvent; 2]>) {
        if let Some(flight) = self.warp.take() {
            let progress = flight.progress(self.params.warp_duration_secs);
            log::info!(
                "[warp] cancelled toward {} at {:.2}",
                flight.target_universe,
                progress
            );
            self.state.fov_degrees = self.params.rest_fov;
            self.state.intent = Intent::FreeFly;
            events.push(ControllerEvent::WarpCancelled {
                target_universe: flight.target_universe,
                progress,
            });
        }
    }
}
