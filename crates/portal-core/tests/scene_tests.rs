// Integration tests for orbit resolution, reticle picking and the entity registry.

use glam::Vec3;
use portal_core::easing::{ease_in_out_cubic, warp_fov};
use portal_core::*;
use std::f32::consts::TAU;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

#[test]
fn orbit_keeps_its_radius_and_period() {
    let orbit = Orbit {
        radius: 42.0,
        speed: 0.5,
        inclination: Vec3::new(0.3, 0.0, -0.2),
        phase: 1.0,
    };
    let period = TAU / orbit.speed;
    for i in 0..16 {
        let t = i as f32 * 0.7;
        let p = orbit.local_position(t);
        assert!(approx(p.length(), 42.0, 1e-3), "t={t}: |p|={}", p.length());
        let q = orbit.local_position(t + period);
        assert!(p.distance(q) < 1e-2);
    }
    // Phase places the body at t = 0
    let flat = Orbit {
        inclination: Vec3::ZERO,
        phase: 0.0,
        ..orbit
    };
    assert!(flat.local_position(0.0).distance(Vec3::new(42.0, 0.0, 0.0)) < 1e-4);
}

#[test]
fn resolved_children_orbit_their_parent() {
    let mv = Multiverse::generate(3).unwrap();
    for t in [0.0, 12.5, 300.0] {
        let scene = mv.resolve(t);
        assert_eq!(scene.len(), mv.registry().len());
        for galaxy in mv.galaxies() {
            for star in &galaxy.stars {
                let star_pos = scene.position(&star.id).unwrap();
                assert!(approx(
                    star_pos.distance(galaxy.origin),
                    star.orbit.radius,
                    1e-2
                ));
                for planet in &star.children {
                    let planet_pos = scene.position(&planet.id).unwrap();
                    assert!(approx(
                        planet_pos.distance(star_pos),
                        planet.orbit.radius,
                        1e-2
                    ));
                    for sat in &planet.children {
                        let sat_pos = scene.position(&sat.id).unwrap();
                        assert!(approx(sat_pos.distance(planet_pos), sat.orbit.radius, 1e-2));
                    }
                }
            }
        }
    }
}

#[test]
fn resolve_into_reuses_the_scene() {
    let mv = Multiverse::generate(3).unwrap();
    let mut scene = ResolvedScene::new();
    mv.resolve_into(1.0, &mut scene);
    let first = scene.position("Kp.0001").unwrap();
    mv.resolve_into(50.0, &mut scene);
    assert_eq!(scene.len(), mv.registry().len());
    assert_ne!(scene.position("Kp.0001").unwrap(), first);
    assert_eq!(scene.get("Mt.001").unwrap().kind, EntityKind::Meteor);
}

#[test]
fn ray_sphere_hits_misses_and_starts_inside() {
    let dir = Vec3::NEG_Z;
    assert!(approx(
        ray_sphere(Vec3::new(0.0, 0.0, 10.0), dir, Vec3::ZERO, 2.0).unwrap(),
        8.0,
        1e-5
    ));
    assert!(ray_sphere(Vec3::new(5.0, 0.0, 10.0), dir, Vec3::ZERO, 2.0).is_none());
    // Behind the origin
    assert!(ray_sphere(Vec3::new(0.0, 0.0, -10.0), dir, Vec3::ZERO, 2.0).is_none());
    // Inside: far side
    assert!(approx(
        ray_sphere(Vec3::ZERO, dir, Vec3::ZERO, 2.0).unwrap(),
        2.0,
        1e-5
    ));
}

#[test]
fn pick_prefers_the_nearest_hit() {
    let mut scene = ResolvedScene::new();
    let body = |z: f32| ResolvedBody {
        position: Vec3::new(0.0, 0.0, z),
        radius: 1.0,
        kind: EntityKind::Star,
    };
    scene.insert("far", body(-50.0));
    scene.insert("near", body(-20.0));
    scene.insert("behind", body(20.0));

    assert_eq!(scene.pick(Vec3::ZERO, Vec3::NEG_Z), Some("near"));
    assert_eq!(scene.pick(Vec3::ZERO, Vec3::Z), Some("behind"));
    assert_eq!(scene.pick(Vec3::ZERO, Vec3::X), None);
    assert_eq!(scene.pick(Vec3::ZERO, Vec3::ZERO), None);

    // Pick radius is wider than the visual radius
    let edge = Vec3::new(1.2, 0.0, 0.0);
    assert_eq!(scene.pick(edge, Vec3::NEG_Z), Some("near"));
}

#[test]
fn pick_breaks_ties_by_id() {
    let mut scene = ResolvedScene::new();
    let body = ResolvedBody {
        position: Vec3::new(0.0, 0.0, -10.0),
        radius: 1.0,
        kind: EntityKind::Relic,
    };
    scene.insert("b", body);
    scene.insert("a", body);
    scene.insert("c", body);
    assert_eq!(scene.pick(Vec3::ZERO, Vec3::NEG_Z), Some("a"));
}

#[test]
fn registry_rejects_duplicate_ids() {
    let a = generate(5, Vec3::ZERO, 0, 1).unwrap();
    let b = generate(5, Vec3::ZERO, 0, 2).unwrap();
    match EntityRegistry::build(&[a.clone(), b], &[]) {
        Err(UniverseError::InvalidArgument(msg)) => assert!(msg.contains("Kp.0001")),
        other => panic!("expected duplicate rejection, got {other:?}"),
    }
    assert!(EntityRegistry::build(&[a], &[]).is_ok());
}

#[test]
fn registry_records_hierarchy() {
    let galaxy = generate(3, Vec3::ZERO, 0, 1).unwrap();
    let registry = EntityRegistry::build(&[galaxy.clone()], &[]).unwrap();
    assert_eq!(registry.len(), galaxy.entity_count());

    // Insertion order: parents before children
    let ids: Vec<&str> = registry.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids[0], "Kp.0001");
    assert_eq!(ids[1], "Kp.0001-P1");

    let planet = registry.get("Kp.0001-P1").unwrap();
    assert_eq!(planet.depth, 1);
    assert_eq!(planet.parent.as_deref(), Some("Kp.0001"));
    let children: Vec<&str> = registry.children_of("Kp.0001").map(|r| r.id.as_str()).collect();
    assert_eq!(children, vec!["Kp.0001-P1"]);
    assert_eq!(registry.children_of("Kp.0002").count(), 0);
}

#[test]
fn registry_search_is_case_insensitive() {
    let mv = Multiverse::generate(9).unwrap();
    let hits = mv.registry().search("kp.000");
    assert_eq!(
        hits.iter().filter(|r| r.kind == EntityKind::Star).count(),
        9
    );
    // Relics are searchable by their question text
    let question = QUESTIONS[0].to_uppercase();
    let hits = mv.registry().search(&question);
    assert!(hits.iter().any(|r| r.id == "Shard-0"));
    assert!(mv.registry().search("no such body").is_empty());
}

#[test]
fn easing_curves_hit_their_endpoints() {
    assert_eq!(ease_in_out_cubic(0.0), 0.0);
    assert_eq!(ease_in_out_cubic(1.0), 1.0);
    assert!(approx(ease_in_out_cubic(0.5), 0.5, 1e-6));
    assert_eq!(ease_in_out_cubic(-3.0), 0.0);
    assert_eq!(ease_in_out_cubic(7.0), 1.0);
    let mut prev = 0.0;
    for i in 1..=100 {
        let v = ease_in_out_cubic(i as f32 / 100.0);
        assert!(v >= prev);
        prev = v;
    }

    assert_eq!(warp_fov(0.0, 60.0, 120.0, 60.0), 60.0);
    assert_eq!(warp_fov(0.5, 60.0, 120.0, 60.0), 120.0);
    assert_eq!(warp_fov(1.0, 60.0, 120.0, 60.0), 60.0);
}
