// Host-side tests for constants and their relationships.

use liquid_orb::constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn animation_constants_are_sane() {
    // Easing must converge without overshoot
    assert!(SCALE_EASE_FACTOR > 0.0 && SCALE_EASE_FACTOR < 1.0);
    assert!(ORB_ACTIVE_SCALE > ORB_IDLE_SCALE);
    assert!(ORB_SPIN_X_PER_SEC > 0.0 && ORB_SPIN_Y_PER_SEC > 0.0);

    assert!(PARTICLE_FACTOR_MIN > 0.0 && PARTICLE_FACTOR_MIN < PARTICLE_FACTOR_MAX);
    assert!(PARTICLE_SPEED_MIN > 0.0 && PARTICLE_SPEED_MIN < PARTICLE_SPEED_MAX);
    assert!(PARTICLE_PHASE_MIN < PARTICLE_PHASE_MAX);
    assert!(PARTICLE_RADIUS_DIVISOR > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn material_constants_grow_when_active() {
    assert!(DISTORT_ACTIVE > DISTORT_IDLE);
    assert!(DISTORT_SPEED_ACTIVE > DISTORT_SPEED_IDLE);
    assert!(HOVER_COLOR.starts_with('#'));
    assert!(DEFAULT_BASE_COLOR.starts_with('#'));
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn ambient_patch_is_stable() {
    // Echo loop must decay
    assert!(ECHO_FEEDBACK > 0.0 && ECHO_FEEDBACK < 1.0);
    assert!(ECHO_DELAY_SEC > 0.0 && (ECHO_DELAY_SEC as f64) <= ECHO_MAX_DELAY_SEC);
    // Breathing never drives the drone gain negative
    assert!(BREATH_DEPTH <= DRONE_GAIN);
    // FM deviation stays well below the carrier
    assert!(MODULATION_DEPTH_HZ < CARRIER_HZ);
    assert!(MASTER_GAIN > 0.0 && MASTER_GAIN <= 1.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn click_envelope_is_exponential_safe() {
    // Exponential ramps cannot start or end at zero
    assert!(CLICK_START_HZ > 0.0 && CLICK_END_HZ > 0.0);
    assert!(CLICK_START_GAIN > 0.0 && CLICK_END_GAIN > 0.0);
    assert!(CLICK_START_HZ > CLICK_END_HZ);
    assert!(CLICK_START_GAIN > CLICK_END_GAIN);
    assert!(CLICK_DURATION_SEC > 0.0);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn camera_sees_the_whole_scene() {
    assert!(CAMERA_ZNEAR > 0.0 && CAMERA_ZNEAR < CAMERA_ZFAR);
    assert!(CAMERA_Z > ORB_RADIUS * ORB_ACTIVE_SCALE);
    assert!(CAMERA_ZFAR > STAR_RADIUS + STAR_DEPTH + CAMERA_Z);
    assert!(CAMERA_FOVY > 0.0 && CAMERA_FOVY < std::f32::consts::PI);
}
