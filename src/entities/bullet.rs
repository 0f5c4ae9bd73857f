use crate::color::Rgb;

pub const BULLET_COLOR: Rgb = Rgb::new(0x00, 0xff, 0x00);

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl Bullet {
    pub const WIDTH: f32 = 4.0;
    pub const HEIGHT: f32 = 10.0;
    pub const SPEED: f32 = 8.0;

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: Self::WIDTH,
            height: Self::HEIGHT,
            speed: Self::SPEED,
            color: BULLET_COLOR,
        }
    }

    /// Bullets only ever travel up
    pub fn update(&mut self) {
        self.y -= self.speed;
    }

    /// True once the whole bullet has left through the top edge
    pub fn is_out_of_bounds(&self) -> bool {
        self.y <= -self.height
    }
}
