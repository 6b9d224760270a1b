// Host-side tests for scene state, materials, meshes and the demo wiring.

use liquid_orb::constants::*;
use liquid_orb::material::{parse_hex_color, MaterialParams};
use liquid_orb::mesh::SphereMesh;
use liquid_orb::starfield::Starfield;
use liquid_orb::{AmbientStage, AudioError, Demo, GraphRecorder, Scene, SceneConfig, SynthEngine};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded(seed: u64) -> SceneConfig {
    SceneConfig {
        seed: Some(seed),
        star_count: 500,
        ..SceneConfig::default()
    }
}

fn demo() -> Demo<GraphRecorder> {
    Demo::new(&seeded(3), SynthEngine::new(|| Ok(GraphRecorder::new())))
}

#[test]
fn default_config_matches_constants() {
    let cfg = SceneConfig::default();
    assert_eq!(cfg.particle_count, 100);
    assert_eq!(cfg.star_count, 5000);
    assert_eq!(cfg.base_color, "#8352fd");
    assert!(cfg.seed.is_none());
}

#[test]
fn seeded_scenes_are_identical() {
    let a = Scene::new(&seeded(42));
    let b = Scene::new(&seeded(42));
    assert_eq!(a.particles, b.particles);
    assert_eq!(a.stars, b.stars);
    assert_eq!(a.particles.len(), PARTICLE_COUNT);
    assert_eq!(a.stars.len(), 500);

    let c = Scene::new(&seeded(43));
    assert_ne!(a.particles, c.particles);
}

#[test]
fn tick_updates_orb_and_particles() {
    let mut scene = Scene::new(&seeded(9));
    scene.tick(2.0);
    assert_eq!(scene.elapsed_sec(), 2.0);
    assert_eq!(scene.orb.rotation.x, 2.0 * ORB_SPIN_X_PER_SEC);
    for p in &scene.particles.particles {
        assert_eq!(p.position, p.position_at(2.0));
        assert!((p.rotation.x - PARTICLE_SPIN_PER_FRAME).abs() < 1e-7);
    }
}

#[test]
fn material_reflects_hover_and_active() {
    let base = "#123456";
    let idle = MaterialParams::from_state(false, false, base);
    assert_eq!(idle.color, base);
    assert_eq!(idle.distort, 0.4);
    assert_eq!(idle.speed, 1.5);

    let hover = MaterialParams::from_state(true, false, base);
    assert_eq!(hover.color, "#ffffff");
    assert_eq!(hover.distort, 0.4);

    let active = MaterialParams::from_state(false, true, base);
    assert_eq!(active.color, base);
    assert_eq!(active.distort, 0.9);
    assert_eq!(active.speed, 4.0);

    let both = MaterialParams::from_state(true, true, base);
    assert_eq!(both.color, "#ffffff");
    assert_eq!(both.distort, 0.9);
    assert_eq!(both.speed, 4.0);
}

#[test]
fn hex_colors_parse_in_both_lengths() {
    assert_eq!(parse_hex_color("#ffffff"), Some([1.0, 1.0, 1.0]));
    assert_eq!(parse_hex_color("#000"), Some([0.0, 0.0, 0.0]));
    assert_eq!(parse_hex_color("#f00"), Some([1.0, 0.0, 0.0]));
    let c = parse_hex_color("#8352fd").unwrap();
    assert!((c[0] - 131.0 / 255.0).abs() < 1e-6);
    assert!((c[1] - 82.0 / 255.0).abs() < 1e-6);
    assert!((c[2] - 253.0 / 255.0).abs() < 1e-6);

    assert_eq!(parse_hex_color("8352fd"), None);
    assert_eq!(parse_hex_color("#12345"), None);
    assert_eq!(parse_hex_color("#zzzzzz"), None);
    assert_eq!(parse_hex_color("rebeccapurple"), None);
}

#[test]
fn click_toggles_orb_and_plays_a_voice() {
    let mut d = demo();
    assert!(d.click().unwrap());
    assert!(d.scene.orb.active);
    assert_eq!(d.synth.clicks_triggered(), 1);
    assert_eq!(d.scene.material().distort, DISTORT_ACTIVE);

    assert!(!d.click().unwrap());
    assert_eq!(d.synth.clicks_triggered(), 2);
    assert_eq!(d.ambient_stage(), AmbientStage::Uninitialized);
}

#[test]
fn click_toggles_orb_even_when_audio_fails() {
    let synth: SynthEngine<GraphRecorder> = SynthEngine::new(|| Err(AudioError::DeviceClosed));
    let mut d = Demo::new(&seeded(1), synth);
    assert!(d.click().is_err());
    assert!(d.scene.orb.active);
}

#[test]
fn hover_and_color_flow_into_material() {
    let mut d = demo();
    assert_eq!(d.scene.material().color, DEFAULT_BASE_COLOR);
    d.set_color("#00ff88");
    assert_eq!(d.scene.material().color, "#00ff88");
    d.pointer_enter();
    assert_eq!(d.scene.material().color, HOVER_COLOR);
    d.pointer_leave();
    assert_eq!(d.scene.material().color, "#00ff88");
}

#[test]
fn ambient_toggle_passes_through_to_the_engine() {
    let mut d = demo();
    assert_eq!(d.toggle_ambient().unwrap(), AmbientStage::Running);
    assert_eq!(d.toggle_ambient().unwrap(), AmbientStage::Suspended);
    assert_eq!(d.ambient_stage(), AmbientStage::Suspended);

    // The scene keeps animating while audio is suspended
    d.tick(1.0);
    assert_eq!(d.scene.elapsed_sec(), 1.0);
}

#[test]
fn sphere_mesh_has_expected_topology() {
    let mesh = SphereMesh::uv(ORB_RADIUS, 16, 8);
    assert_eq!(mesh.vertices.len(), 17 * 9);
    assert_eq!(mesh.indices.len(), 16 * 8 * 6);
    let n = mesh.vertices.len() as u32;
    assert!(mesh.indices.iter().all(|&i| i < n));

    for v in &mesh.vertices {
        let len = glam::Vec3::from(v.normal).length();
        assert!((len - 1.0).abs() < 1e-5);
        let r = glam::Vec3::from(v.position).length();
        assert!((r - ORB_RADIUS).abs() < 1e-5);
    }
}

#[test]
fn sphere_mesh_clamps_degenerate_resolution() {
    let mesh = SphereMesh::uv(1.0, 0, 0);
    assert_eq!(mesh.vertices.len(), 4 * 3);
    assert_eq!(mesh.indices.len(), 3 * 2 * 6);
}

#[test]
fn stars_sit_in_the_shell() {
    let stars = Starfield::generate(2000, 100.0, 50.0, 4.0, &mut StdRng::seed_from_u64(5));
    assert_eq!(stars.len(), 2000);
    for s in &stars.stars {
        let d = s.position.length();
        assert!(d >= 100.0 - 1e-3 && d <= 150.0 + 1e-3, "distance {d}");
        assert!(s.size >= 2.0 && s.size <= 4.0);
        assert!(s.twinkle_phase >= 0.0 && s.twinkle_phase <= std::f32::consts::TAU);
    }
}

#[test]
fn default_scene_uses_star_constants() {
    let scene = Scene::new(&SceneConfig {
        seed: Some(11),
        ..SceneConfig::default()
    });
    assert_eq!(scene.stars.len(), STAR_COUNT);
    assert!(Starfield::generate(0, 1.0, 1.0, 1.0, &mut StdRng::seed_from_u64(0)).is_empty());
}
