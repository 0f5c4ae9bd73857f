mod bullet;
mod enemy;
mod particle;
mod player;
mod power_up;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use particle::{
    EXPLOSION_PARTICLES, PARTICLE_LIFE, PARTICLE_SIZE, Particle, create_explosion_particles,
};
pub use player::Player;
pub use power_up::PowerUp;

/// Axis-aligned bounding box shared by every rectangular entity
pub trait Bounds {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    fn center(&self) -> (f32, f32) {
        (self.x() + self.width() / 2.0, self.y() + self.height() / 2.0)
    }
}

/// Strict AABB overlap: rectangles that only touch at an edge do not collide
pub fn is_colliding(a: &impl Bounds, b: &impl Bounds) -> bool {
    a.x() < b.x() + b.width()
        && a.x() + a.width() > b.x()
        && a.y() < b.y() + b.height()
        && a.y() + a.height() > b.y()
}

macro_rules! impl_bounds {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Bounds for $ty {
                fn x(&self) -> f32 {
                    self.x
                }
                fn y(&self) -> f32 {
                    self.y
                }
                fn width(&self) -> f32 {
                    self.width
                }
                fn height(&self) -> f32 {
                    self.height
                }
            }
        )*
    };
}

impl_bounds!(Player, Bullet, Enemy, PowerUp);
