//! Headless tour through the portal universe.
//!
//! Usage: `portal-native [seed] [frames-per-leg]`. Logs go through env_logger;
//! set `RUST_LOG=debug` to see every intent transition.

use anyhow::Context;
use glam::Vec3;
use portal_core::{
    CameraController, ControllerEvent, ControllerParams, InputSnapshot, Intent, MoveAxes,
    Multiverse, ResolvedScene,
};

const DT: f32 = 1.0 / 60.0;

struct Tour {
    multiverse: Multiverse,
    controller: CameraController,
    scene: ResolvedScene,
    sim_time: f32,
}

impl Tour {
    fn new(seed: u64) -> anyhow::Result<Self> {
        let multiverse = Multiverse::generate(seed).context("generating multiverse")?;
        let controller = CameraController::new(ControllerParams::default())?;
        let scene = multiverse.resolve(0.0);
        Ok(Self {
            multiverse,
            controller,
            scene,
            sim_time: 0.0,
        })
    }

    /// Run `frames` frames with the same input; warp requests only fire on the first.
    fn fly(&mut self, leg: &str, frames: usize, input: &InputSnapshot) {
        let mut input = input.clone();
        for frame in 0..frames {
            self.sim_time += DT;
            self.multiverse.resolve_into(self.sim_time, &mut self.scene);
            let out = self.controller.advance(DT, &input, &self.scene);
            input.warp_request = None;
            for event in &out.events {
                match event {
                    ControllerEvent::WarpCompleted { target_universe } => {
                        log::info!("[{}] frame {}: arrived in universe {}", leg, frame, target_universe)
                    }
                    other => log::info!("[{}] frame {}: {:?}", leg, frame, other),
                }
            }
            if let Some(id) = out.targeted.as_deref() {
                log::debug!("[{}] reticle on {}", leg, id);
            }
        }
        let state = self.controller.state();
        log::info!(
            "[{}] pos=({:.1},{:.1},{:.1}) fov={:.1} intent={}",
            leg,
            state.position.x,
            state.position.y,
            state.position.z,
            state.fov_degrees,
            intent_label(&state.intent)
        );
    }
}

fn intent_label(intent: &Intent) -> String {
    match intent {
        Intent::FreeFly => "FreeFly".to_string(),
        Intent::FocusEntity(id) => format!("Focus({id})"),
        Intent::PresetSlot(i) => format!("Slot({i})"),
        Intent::CinematicWarp {
            target_universe,
            progress,
        } => format!("Warp({target_universe}, {progress:.2})"),
    }
}

fn parse_arg<T: std::str::FromStr>(arg: Option<String>, default: T, name: &str) -> anyhow::Result<T> {
    match arg {
        None => Ok(default),
        Some(s) => s
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid {name}: {s}")),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = parse_arg(args.next(), 42, "seed")?;
    let leg_frames: usize = parse_arg(args.next(), 180, "frames per leg")?;

    let mut tour = Tour::new(seed)?;
    log::info!(
        "portal-native seed={} entities={}",
        seed,
        tour.multiverse.registry().len()
    );

    let thrust = InputSnapshot {
        movement: MoveAxes {
            forward: 1.0,
            ..Default::default()
        },
        ..Default::default()
    };
    tour.fly("free-fly", leg_frames, &thrust);
    tour.fly("coast", leg_frames / 2, &InputSnapshot::default());

    let star = tour
        .multiverse
        .galaxy(0)
        .and_then(|g| g.stars.first())
        .map(|s| s.id.clone())
        .context("canon galaxy has no stars")?;
    let focus = InputSnapshot {
        focus_entity_id: Some(star.clone()),
        pointer_locked: true,
        ..Default::default()
    };
    tour.fly("focus", leg_frames, &focus);

    tour.controller.save_current_view(3, format!("Near {star}"))?;
    let slot = InputSnapshot {
        active_slot_index: Some(2),
        ..Default::default()
    };
    tour.fly("zenith", leg_frames, &slot);

    let warp = InputSnapshot {
        warp_request: Some(1),
        look_direction: Some(Vec3::NEG_Z),
        ..Default::default()
    };
    tour.fly("warp", leg_frames.max(130), &warp);

    let planet = tour.multiverse.record_impact(&star, seed)?.id.clone();
    log::info!("[impact] {} now carries {}", star, planet);
    let revisit = InputSnapshot {
        focus_entity_id: Some(planet),
        ..Default::default()
    };
    tour.fly("revisit", leg_frames, &revisit);

    let back = InputSnapshot {
        active_slot_index: Some(3),
        ..Default::default()
    };
    tour.fly("saved-view", leg_frames, &back);
    Ok(())
}
