// Host-side tests for the orb and particle animation.

use glam::Vec3;
use liquid_orb::animation::{ease_toward, OrbState, Particle, ParticleField};
use liquid_orb::constants::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn orb_rotation_is_a_pure_function_of_elapsed_time() {
    let mut orb = OrbState::default();
    for &t in &[0.0_f32, 0.5, 3.0, 10.0, 123.25] {
        orb.advance(t);
        assert_eq!(orb.rotation.x, t * 0.2);
        assert_eq!(orb.rotation.y, t * 0.3);
        assert_eq!(orb.rotation.z, 0.0);
    }

    // Going back in time gives back the earlier pose
    orb.advance(0.5);
    assert_eq!(orb.rotation.x, 0.5 * 0.2);
}

#[test]
fn scale_eases_toward_active_target_without_overshoot() {
    let mut orb = OrbState::default();
    assert_eq!(orb.scale, Vec3::splat(1.0));
    assert!(orb.toggle_active());

    let mut prev = orb.scale.x;
    for step in 0..200 {
        orb.advance(step as f32 / 60.0);
        let s = orb.scale.x;
        if step < 50 {
            assert!(s > prev && s < 1.5, "step {step}: {s} not in ({prev}, 1.5)");
        }
        assert!(s >= prev, "step {step}: scale went backwards");
        assert!(s <= 1.5, "step {step}: overshoot {s}");
        assert_eq!(orb.scale.x, orb.scale.y);
        assert_eq!(orb.scale.y, orb.scale.z);
        prev = s;
    }
    assert!((orb.scale.x - 1.5).abs() < 1e-4);
}

#[test]
fn scale_eases_back_to_idle_after_deactivation() {
    let mut orb = OrbState {
        scale: Vec3::splat(1.5),
        active: false,
        ..OrbState::default()
    };
    let mut prev = orb.scale.x;
    for step in 0..120 {
        orb.advance(step as f32 / 60.0);
        assert!(orb.scale.x <= prev);
        assert!(orb.scale.x >= 1.0);
        prev = orb.scale.x;
    }
    assert!((orb.scale.x - 1.0).abs() < 1e-4);
}

#[test]
fn one_easing_step_covers_a_tenth_of_the_gap() {
    let next = ease_toward(Vec3::splat(1.0), Vec3::splat(1.5));
    assert!((next.x - 1.05).abs() < 1e-6);

    let unchanged = ease_toward(Vec3::splat(1.5), Vec3::splat(1.5));
    assert_eq!(unchanged, Vec3::splat(1.5));
}

#[test]
fn hover_and_active_flags_are_independent() {
    let mut orb = OrbState::default();
    assert!(!orb.hovered && !orb.active);

    orb.pointer_enter();
    assert!(orb.hovered);
    assert!(orb.toggle_active());
    orb.pointer_leave();
    assert!(!orb.hovered);
    assert!(orb.active);
    assert!(!orb.toggle_active());
    assert_eq!(orb.target_scale(), ORB_IDLE_SCALE);
}

#[test]
fn particle_position_matches_orbit_formula() {
    let p = Particle::new(100.0, 0.05, Vec3::new(10.0, 0.0, 5.0));
    let pos = p.position_at(10.0);
    // t * speed = 0.5, radius = factor / 10 = 10
    assert!((pos.x - 10.0 * 10.5_f32.cos()).abs() < 1e-4);
    assert!((pos.y - 10.0 * 0.5_f32.sin()).abs() < 1e-4);
    assert!((pos.z - 10.0 * 5.5_f32.cos()).abs() < 1e-4);

    assert!((pos.x - -4.755).abs() < 1e-3);
    assert!((pos.y - 4.794).abs() < 1e-3);
    assert!((pos.z - 7.087).abs() < 1e-3);
}

#[test]
fn particle_position_is_pure() {
    let mut p = Particle::new(64.0, 0.012, Vec3::new(-3.0, 17.5, 42.0));
    let a = p.position_at(7.25);
    p.advance(1.0);
    p.advance(99.0);
    let b = p.position_at(7.25);
    assert_eq!(a.x.to_bits(), b.x.to_bits());
    assert_eq!(a.y.to_bits(), b.y.to_bits());
    assert_eq!(a.z.to_bits(), b.z.to_bits());

    p.advance(7.25);
    assert_eq!(p.position, a);
}

#[test]
fn particle_spin_accumulates_per_advance() {
    let mut p = Particle::new(50.0, 0.01, Vec3::ZERO);
    for _ in 0..10 {
        p.advance(0.0);
    }
    assert!((p.rotation.x - 0.1).abs() < 1e-5);
    assert!((p.rotation.y - 0.1).abs() < 1e-5);
    assert_eq!(p.rotation.z, 0.0);
}

#[test]
fn seeded_field_is_reproducible_and_in_range() {
    let a = ParticleField::generate(PARTICLE_COUNT, &mut StdRng::seed_from_u64(7));
    let b = ParticleField::generate(PARTICLE_COUNT, &mut StdRng::seed_from_u64(7));
    assert_eq!(a, b);
    assert_eq!(a.len(), PARTICLE_COUNT);

    for p in &a.particles {
        assert!(p.factor >= PARTICLE_FACTOR_MIN && p.factor < PARTICLE_FACTOR_MAX);
        assert!(p.speed >= PARTICLE_SPEED_MIN && p.speed < PARTICLE_SPEED_MAX);
        for c in p.phase.to_array() {
            assert!((PARTICLE_PHASE_MIN..PARTICLE_PHASE_MAX).contains(&c));
        }
        let bound = p.factor / PARTICLE_RADIUS_DIVISOR + 1e-4;
        assert!(p.position.abs().max_element() <= bound);
    }
}

#[test]
fn empty_field_advances_without_work() {
    let mut field = ParticleField::generate(0, &mut StdRng::seed_from_u64(1));
    assert!(field.is_empty());
    field.advance(5.0);
    assert!(field.is_empty());
}
