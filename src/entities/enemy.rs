use crate::color::Rgb;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
    /// Every enemy dies to a single hit
    pub health: u8,
}

impl Enemy {
    pub const WIDTH: f32 = 40.0;
    pub const HEIGHT: f32 = 30.0;
    pub const POINTS: u32 = 10;

    pub fn new(x: f32, y: f32, speed: f32, color: Rgb) -> Self {
        Self {
            x,
            y,
            width: Self::WIDTH,
            height: Self::HEIGHT,
            speed,
            color,
            health: 1,
        }
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    /// True once the top edge has passed below the bottom of the canvas
    pub fn has_escaped(&self, canvas_height: f32) -> bool {
        self.y > canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_new() {
        let enemy = Enemy::new(40.0, -30.0, 2.5, Rgb::new(1, 2, 3));
        assert_eq!(enemy.width, 40.0);
        assert_eq!(enemy.height, 30.0);
        assert_eq!(enemy.speed, 2.5);
        assert_eq!(enemy.health, 1);
    }

    #[test]
    fn test_enemy_moves_down_by_speed() {
        let mut enemy = Enemy::new(40.0, 0.0, 2.5, Rgb::new(1, 2, 3));
        enemy.update();
        enemy.update();
        assert_eq!(enemy.y, 5.0);
    }

    #[test]
    fn test_enemy_escape() {
        let mut enemy = Enemy::new(40.0, 600.0, 1.0, Rgb::new(1, 2, 3));
        // Top edge exactly on the bottom boundary is still on screen
        assert!(!enemy.has_escaped(600.0));
        enemy.update();
        assert!(enemy.has_escaped(600.0));
    }
}
