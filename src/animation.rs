//! Procedural animation for the orb and its orbiting particles.
//!
//! Everything here is driven by sampled elapsed time rather than integrated
//! deltas, so dropped or uneven frames never accumulate drift. The two
//! exceptions are the orb's scale easing and the particle spin, which step a
//! fixed amount per call.

use crate::constants::*;
use glam::Vec3;
use rand::Rng;

/// Pose and interaction flags of the primary orb.
#[derive(Clone, Debug)]
pub struct OrbState {
    pub rotation: Vec3,
    pub scale: Vec3,
    pub hovered: bool,
    pub active: bool,
}

impl Default for OrbState {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            scale: Vec3::splat(ORB_IDLE_SCALE),
            hovered: false,
            active: false,
        }
    }
}

impl OrbState {
    pub fn target_scale(&self) -> f32 {
        if self.active {
            ORB_ACTIVE_SCALE
        } else {
            ORB_IDLE_SCALE
        }
    }

    /// Set rotation from elapsed time and ease scale one step toward the target.
    pub fn advance(&mut self, elapsed_sec: f32) {
        self.rotation.x = elapsed_sec * ORB_SPIN_X_PER_SEC;
        self.rotation.y = elapsed_sec * ORB_SPIN_Y_PER_SEC;
        self.scale = ease_toward(self.scale, Vec3::splat(self.target_scale()));
    }

    pub fn pointer_enter(&mut self) {
        self.hovered = true;
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = false;
    }

    /// Flip the active flag, returning the new value.
    pub fn toggle_active(&mut self) -> bool {
        self.active = !self.active;
        self.active
    }
}

/// One easing step: moves `current` a fixed fraction of the way to `target`.
#[inline]
pub fn ease_toward(current: Vec3, target: Vec3) -> Vec3 {
    current + (target - current) * SCALE_EASE_FACTOR
}

/// A background particle on a closed trigonometric orbit.
///
/// `factor`, `speed` and `phase` are fixed at creation; `position` and
/// `rotation` are the derived per-frame pose.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub factor: f32,
    pub speed: f32,
    pub phase: Vec3,
    pub position: Vec3,
    pub rotation: Vec3,
}

impl Particle {
    pub fn new(factor: f32, speed: f32, phase: Vec3) -> Self {
        let mut p = Self {
            factor,
            speed,
            phase,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
        };
        p.position = p.position_at(0.0);
        p
    }

    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        let factor = rng.gen_range(PARTICLE_FACTOR_MIN..PARTICLE_FACTOR_MAX);
        let speed = rng.gen_range(PARTICLE_SPEED_MIN..PARTICLE_SPEED_MAX);
        let phase = Vec3::new(
            rng.gen_range(PARTICLE_PHASE_MIN..PARTICLE_PHASE_MAX),
            rng.gen_range(PARTICLE_PHASE_MIN..PARTICLE_PHASE_MAX),
            rng.gen_range(PARTICLE_PHASE_MIN..PARTICLE_PHASE_MAX),
        );
        Self::new(factor, speed, phase)
    }

    #[inline]
    pub fn position_at(&self, elapsed_sec: f32) -> Vec3 {
        let t = elapsed_sec * self.speed;
        let r = self.factor / PARTICLE_RADIUS_DIVISOR;
        Vec3::new(
            (t + self.phase.x).cos() * r,
            (t + self.phase.y).sin() * r,
            (t + self.phase.z).cos() * r,
        )
    }

    pub fn advance(&mut self, elapsed_sec: f32) {
        self.position = self.position_at(elapsed_sec);
        self.rotation.x += PARTICLE_SPIN_PER_FRAME;
        self.rotation.y += PARTICLE_SPIN_PER_FRAME;
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParticleField {
    pub particles: Vec<Particle>,
}

impl ParticleField {
    pub fn generate<R: Rng>(count: usize, rng: &mut R) -> Self {
        let particles = (0..count).map(|_| Particle::sample(&mut *rng)).collect();
        Self { particles }
    }

    pub fn advance(&mut self, elapsed_sec: f32) {
        for p in &mut self.particles {
            p.advance(elapsed_sec);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
