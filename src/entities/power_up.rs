use crate::color::Rgb;

/// Falling bonus item. Fully simulated and drawn, but nothing spawns one yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    pub color: Rgb,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, speed: f32, color: Rgb) -> Self {
        Self {
            x,
            y,
            width: 20.0,
            height: 20.0,
            speed,
            color,
        }
    }

    pub fn update(&mut self) {
        self.y += self.speed;
    }

    pub fn is_out_of_bounds(&self, canvas_height: f32) -> bool {
        self.y >= canvas_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_power_up_falls_and_leaves() {
        let mut power_up = PowerUp::new(50.0, 595.0, 3.0, Rgb::new(255, 255, 0));
        power_up.update();
        assert_eq!(power_up.y, 598.0);
        assert!(!power_up.is_out_of_bounds(600.0));
        power_up.update();
        assert!(power_up.is_out_of_bounds(600.0));
    }
}
