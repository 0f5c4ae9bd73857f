use rand::Rng;

use crate::color::Rgb;

/// Particles spawned per explosion
pub const EXPLOSION_PARTICLES: usize = 8;
/// Frames a particle lives for
pub const PARTICLE_LIFE: u32 = 30;
/// Side length of a drawn particle
pub const PARTICLE_SIZE: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub velocity_x: f32,
    pub velocity_y: f32,
    pub life: u32,
    pub max_life: u32,
    pub alpha: f32,
    pub color: Rgb,
}

impl Particle {
    pub fn new(x: f32, y: f32, velocity_x: f32, velocity_y: f32, life: u32, color: Rgb) -> Self {
        Self {
            x,
            y,
            velocity_x,
            velocity_y,
            life,
            max_life: life,
            alpha: 1.0,
            color,
        }
    }

    pub fn update(&mut self) {
        self.x += self.velocity_x;
        self.y += self.velocity_y;
        self.life = self.life.saturating_sub(1);
        self.alpha = if self.max_life == 0 {
            0.0
        } else {
            self.life as f32 / self.max_life as f32
        };
    }

    pub fn is_dead(&self) -> bool {
        self.life == 0
    }
}

/// Creates a burst of fiery particles flying out from the given point
pub fn create_explosion_particles(center_x: f32, center_y: f32, rng: &mut impl Rng) -> Vec<Particle> {
    (0..EXPLOSION_PARTICLES)
        .map(|_| {
            let velocity_x = (rng.random::<f32>() - 0.5) * 6.0;
            let velocity_y = (rng.random::<f32>() - 0.5) * 6.0;
            // Reds through yellows
            let color = Rgb::from_hsl(15.0 + rng.random::<f32>() * 60.0, 1.0, 0.5);
            Particle::new(center_x, center_y, velocity_x, velocity_y, PARTICLE_LIFE, color)
        })
        .collect()
}
