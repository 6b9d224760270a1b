//! Scene state: the orb, its particles and the starfield.

use crate::animation::{OrbState, ParticleField};
use crate::constants::*;
use crate::material::MaterialParams;
use crate::starfield::Starfield;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub particle_count: usize,
    pub star_count: usize,
    pub star_radius: f32,
    pub star_depth: f32,
    pub star_size_factor: f32,
    pub base_color: String,
    /// Fixed seed for particle and star sampling; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            star_count: STAR_COUNT,
            star_radius: STAR_RADIUS,
            star_depth: STAR_DEPTH,
            star_size_factor: STAR_SIZE_FACTOR,
            base_color: DEFAULT_BASE_COLOR.to_string(),
            seed: None,
        }
    }
}

pub struct Scene {
    pub orb: OrbState,
    pub particles: ParticleField,
    pub stars: Starfield,
    base_color: String,
    elapsed_sec: f32,
}

impl Scene {
    pub fn new(config: &SceneConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let particles = ParticleField::generate(config.particle_count, &mut rng);
        let stars = Starfield::generate(
            config.star_count,
            config.star_radius,
            config.star_depth,
            config.star_size_factor,
            &mut rng,
        );
        log::info!(
            "[scene] particles={} stars={}",
            particles.len(),
            stars.len()
        );
        Self {
            orb: OrbState::default(),
            particles,
            stars,
            base_color: config.base_color.clone(),
            elapsed_sec: 0.0,
        }
    }

    /// Per-frame update from the scheduler's elapsed time.
    pub fn tick(&mut self, elapsed_sec: f32) {
        self.elapsed_sec = elapsed_sec;
        self.orb.advance(elapsed_sec);
        self.particles.advance(elapsed_sec);
    }

    pub fn elapsed_sec(&self) -> f32 {
        self.elapsed_sec
    }

    pub fn base_color(&self) -> &str {
        &self.base_color
    }

    pub fn set_base_color(&mut self, value: impl Into<String>) {
        self.base_color = value.into();
    }

    pub fn material(&self) -> MaterialParams {
        MaterialParams::from_state(self.orb.hovered, self.orb.active, &self.base_color)
    }
}
