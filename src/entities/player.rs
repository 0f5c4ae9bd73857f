use super::bullet::Bullet;
use crate::color::Rgb;

pub const PLAYER_WIDTH: f32 = 50.0;
pub const PLAYER_HEIGHT: f32 = 40.0;
pub const PLAYER_SPEED: f32 = 5.0;
pub const PLAYER_COLOR: Rgb = Rgb::new(0x00, 0xff, 0xff);

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
    /// Session clock time of the last successful shot
    pub last_shot_ms: Option<u64>,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            width: PLAYER_WIDTH,
            height: PLAYER_HEIGHT,
            speed: PLAYER_SPEED,
            color: PLAYER_COLOR,
            last_shot_ms: None,
        }
    }

    /// Player centered horizontally, 80 units above the bottom edge
    pub fn spawn(canvas_width: f32, canvas_height: f32) -> Self {
        Self::new(
            canvas_width / 2.0 - PLAYER_WIDTH / 2.0,
            canvas_height - 80.0,
        )
    }

    pub fn move_left(&mut self, min_x: f32) {
        self.x = (self.x - self.speed).max(min_x);
    }

    pub fn move_right(&mut self, max_x: f32) {
        self.x = (self.x + self.speed).min(max_x);
    }

    pub fn can_fire(&self, now_ms: u64, cooldown_ms: u64) -> bool {
        self.last_shot_ms
            .is_none_or(|last| now_ms.saturating_sub(last) > cooldown_ms)
    }

    /// Fires a bullet from the ship's nose if the cooldown has elapsed
    pub fn try_fire(&mut self, now_ms: u64, cooldown_ms: u64) -> Option<Bullet> {
        if !self.can_fire(now_ms, cooldown_ms) {
            return None;
        }

        self.last_shot_ms = Some(now_ms);
        let bullet_x = self.x + self.width / 2.0 - Bullet::WIDTH / 2.0;
        Some(Bullet::new(bullet_x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_spawn() {
        let player = Player::spawn(800.0, 600.0);
        assert_eq!(player.x, 375.0);
        assert_eq!(player.y, 520.0);
        assert_eq!(player.width, 50.0);
        assert_eq!(player.height, 40.0);
        assert_eq!(player.last_shot_ms, None);
    }

    #[test]
    fn test_player_movement_left() {
        let mut player = Player::new(10.0, 10.0);
        player.move_left(0.0);
        assert_eq!(player.x, 5.0);

        // Clamped at the boundary instead of overshooting
        player.x = 3.0;
        player.move_left(0.0);
        assert_eq!(player.x, 0.0);
        player.move_left(0.0);
        assert_eq!(player.x, 0.0);
    }

    #[test]
    fn test_player_movement_right() {
        let mut player = Player::new(740.0, 10.0);
        player.move_right(750.0);
        assert_eq!(player.x, 745.0);

        player.move_right(750.0);
        assert_eq!(player.x, 750.0);
        player.move_right(750.0);
        assert_eq!(player.x, 750.0);
    }

    #[test]
    fn test_first_shot_is_always_allowed() {
        let mut player = Player::new(100.0, 500.0);
        let bullet = player.try_fire(0, 200).expect("first shot");
        assert_eq!(bullet.x, 123.0);
        assert_eq!(bullet.y, 500.0);
        assert_eq!(player.last_shot_ms, Some(0));
    }

    #[test]
    fn test_player_cooldown_prevents_firing() {
        let mut player = Player::new(100.0, 500.0);
        assert!(player.try_fire(1_000, 200).is_some());
        assert!(player.try_fire(1_100, 200).is_none());
        // Exactly the cooldown is not enough, it has to be exceeded
        assert!(player.try_fire(1_200, 200).is_none());
        assert!(player.try_fire(1_201, 200).is_some());
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds_x(
                initial_x in 0.0f32..750.0,
                moves in prop::collection::vec(prop::bool::ANY, 0..300)
            ) {
                let mut player = Player::new(initial_x, 520.0);
                for move_right in moves {
                    if move_right {
                        player.move_right(750.0);
                    } else {
                        player.move_left(0.0);
                    }
                }
                prop_assert!(player.x >= 0.0);
                prop_assert!(player.x <= 750.0);
            }
        }
    }
}
