// Host-side tests for frame input bookkeeping.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec3;
use input::*;
use portal_core::*;

const DT: f32 = 1.0 / 60.0;

fn still() -> MoveAxes {
    MoveAxes::default()
}

#[test]
fn warp_request_releases_focus_and_slot() {
    let mut desires = FrameDesires::default();
    desires.set_focus(Some("Kp.0001".to_string()));
    desires.request_warp(1);
    let input = desires.snapshot(still());
    assert_eq!(input.warp_request, Some(1));
    assert!(input.focus_entity_id.is_none());
    assert!(input.active_slot_index.is_none());

    desires.set_slot(Some(2));
    desires.request_warp(2);
    let input = desires.snapshot(still());
    assert_eq!(input.warp_request, Some(2));
    assert!(input.active_slot_index.is_none());
}

#[test]
fn warp_request_is_one_shot_and_latest_wins() {
    let mut desires = FrameDesires::default();
    desires.request_warp(1);
    desires.request_warp(2);
    assert_eq!(desires.snapshot(still()).warp_request, Some(2));
    assert_eq!(desires.snapshot(still()).warp_request, None);
}

#[test]
fn focus_and_slot_replace_each_other() {
    let mut desires = FrameDesires::default();
    desires.set_focus(Some("Kp.0002".to_string()));
    desires.set_slot(Some(1));
    let input = desires.snapshot(still());
    assert!(input.focus_entity_id.is_none());
    assert_eq!(input.active_slot_index, Some(1));

    desires.set_focus(Some("Kp.0002".to_string()));
    let input = desires.snapshot(still());
    assert_eq!(input.focus_entity_id.as_deref(), Some("Kp.0002"));
    assert!(input.active_slot_index.is_none());
}

#[test]
fn manual_flight_releases_locks() {
    let mut desires = FrameDesires::default();
    desires.set_focus(Some("Kp.0001".to_string()));
    let thrust = MoveAxes {
        forward: 1.0,
        ..Default::default()
    };
    desires.after_frame(&Intent::FocusEntity("Kp.0001".to_string()), still());
    assert!(desires.snapshot(still()).focus_entity_id.is_some());
    desires.after_frame(&Intent::FreeFly, thrust);
    assert!(desires.snapshot(still()).focus_entity_id.is_none());
}

#[test]
fn look_direction_is_normalized_or_cleared() {
    let mut desires = FrameDesires::default();
    desires.set_look_direction(Vec3::new(0.0, 0.0, -5.0));
    assert_eq!(desires.snapshot(still()).look_direction, Some(Vec3::NEG_Z));
    desires.set_look_direction(Vec3::ZERO);
    assert!(desires.snapshot(still()).look_direction.is_none());

    desires.toggle_pointer_lock();
    assert!(desires.snapshot(still()).pointer_locked);
}

#[test]
fn warp_out_of_a_focus_stays_in_the_new_universe() {
    let multiverse = Multiverse::generate(42).unwrap();
    let mut controller = CameraController::new(ControllerParams::default()).unwrap();
    let mut scene = ResolvedScene::new();
    let mut desires = FrameDesires::default();
    let mut t = 0.0;
    let mut frame = |desires: &mut FrameDesires, controller: &mut CameraController| {
        t += DT;
        multiverse.resolve_into(t, &mut scene);
        let input = desires.snapshot(still());
        let out = controller.advance(DT, &input, &scene);
        desires.after_frame(&out.state.intent, still());
        out
    };

    desires.set_focus(Some("Kp.0001".to_string()));
    for _ in 0..60 {
        frame(&mut desires, &mut controller);
    }
    assert_eq!(
        controller.state().intent,
        Intent::FocusEntity("Kp.0001".to_string())
    );

    desires.request_warp(1);
    for _ in 0..300 {
        frame(&mut desires, &mut controller);
    }
    let anchor = UNIVERSES[1].anchor();
    assert_eq!(controller.current_universe(), 1);
    assert_eq!(controller.state().intent, Intent::FreeFly);
    assert_eq!(controller.state().position, anchor.position);
}

#[test]
fn event_log_keeps_only_the_latest_entries() {
    let mut log = EventLog::default();
    for i in 0..100 {
        log.push(&ControllerEvent::SlotIgnored(i));
    }
    let drained: Vec<String> = log.drain().collect();
    assert_eq!(drained.len(), EVENT_LOG_CAPACITY);
    assert_eq!(drained[0], format!("slot-ignored:{}", 100 - EVENT_LOG_CAPACITY));
    assert_eq!(drained[EVENT_LOG_CAPACITY - 1], "slot-ignored:99");
    assert_eq!(log.drain().count(), 0);
}

#[test]
fn events_are_described_as_kind_and_detail() {
    assert_eq!(
        describe(&ControllerEvent::WarpStarted { target_universe: 2 }),
        "warp-started:2"
    );
    assert_eq!(
        describe(&ControllerEvent::WarpCancelled {
            target_universe: 1,
            progress: 0.25
        }),
        "warp-cancelled:1:0.250"
    );
    assert_eq!(
        describe(&ControllerEvent::FocusUnresolved("Mt.001".to_string())),
        "focus-unresolved:Mt.001"
    );
}
