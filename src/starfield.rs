use glam::Vec3;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    pub position: Vec3,
    pub size: f32,
    /// Per-star offset so the twinkle in the shader does not pulse in unison.
    pub twinkle_phase: f32,
}

/// Static background stars scattered through a spherical shell.
///
/// Stars are placed between `radius` and `radius + depth` from the origin,
/// biased toward the outer edge, with directions uniform over the sphere.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Starfield {
    pub stars: Vec<Star>,
}

impl Starfield {
    pub fn generate<R: Rng>(
        count: usize,
        radius: f32,
        depth: f32,
        size_factor: f32,
        rng: &mut R,
    ) -> Self {
        let mut r = radius + depth;
        let step = if count > 0 { depth / count as f32 } else { 0.0 };
        let mut stars = Vec::with_capacity(count);
        for _ in 0..count {
            r -= step * rng.gen::<f32>();
            let dist = r.max(radius);
            let cos_theta = 1.0 - 2.0 * rng.gen::<f32>();
            let theta = cos_theta.clamp(-1.0, 1.0).acos();
            let phi = rng.gen::<f32>() * std::f32::consts::TAU;
            let position = Vec3::new(
                dist * theta.sin() * phi.cos(),
                dist * theta.sin() * phi.sin(),
                dist * cos_theta,
            );
            stars.push(Star {
                position,
                size: (0.5 + 0.5 * rng.gen::<f32>()) * size_factor,
                twinkle_phase: rng.gen::<f32>() * std::f32::consts::TAU,
            });
        }
        Self { stars }
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
