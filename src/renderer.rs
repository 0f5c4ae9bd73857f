use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::color::Rgb;
use crate::entities::{Bounds, PARTICLE_SIZE};
use crate::sim::{GameConfig, GameState, Phase};

/// Deep space blue behind the play field
pub const BACKGROUND: Rgb = Rgb::new(0, 4, 40);
const ENEMY_EYE: Rgb = Rgb::new(0xff, 0x00, 0x00);

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub state: &'a GameState,
    pub area: Rect,
    pub fps: u32,
}

/// Maps canvas coordinates onto terminal cells
#[derive(Debug, Clone, Copy)]
struct Viewport {
    area: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(area: Rect, config: &GameConfig) -> Self {
        Self {
            area,
            scale_x: area.width as f32 / config.canvas_width.max(1.0),
            scale_y: area.height as f32 / config.canvas_height.max(1.0),
        }
    }

    /// Cells covered by a canvas rectangle, clipped to the viewport. Anything
    /// on screen covers at least one cell.
    fn cells(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
        let span = |start: f32, len: f32, scale: f32, limit: u16| -> Option<(u16, u16)> {
            let lo = (start * scale).floor();
            let hi = ((start + len) * scale).ceil().max(lo + 1.0);
            let lo = lo.max(0.0);
            let hi = hi.min(limit as f32);
            if hi <= lo {
                return None;
            }
            Some((lo as u16, (hi - lo) as u16))
        };

        let (cx, cw) = span(x, width, self.scale_x, self.area.width)?;
        let (cy, ch) = span(y, height, self.scale_y, self.area.height)?;
        Some(Rect {
            x: self.area.x + cx,
            y: self.area.y + cy,
            width: cw,
            height: ch,
        })
    }

    fn cells_of(&self, entity: &impl Bounds) -> Option<Rect> {
        self.cells(entity.x(), entity.y(), entity.width(), entity.height())
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

fn fill(buffer: &mut Buffer, cells: Rect, symbol: &str, style: Style) {
    let row = symbol.repeat(cells.width as usize);
    for y in cells.top()..cells.bottom() {
        buffer.set_string(cells.x, y, &row, style);
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    background: Color,
}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {
            background: to_color(BACKGROUND),
        }
    }

    /// Draws the play field, then the overlay for the current phase
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        match view.state.phase {
            Phase::Start => self.render_start(frame, view),
            Phase::Playing => {}
            Phase::Paused => self.render_paused(frame, view),
            Phase::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the HUD, the play field and every live entity
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let state = view.state;
        if area.height < 3 || area.width == 0 {
            return;
        }

        // HUD on the first row, controls on the last
        let field = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };
        let viewport = Viewport::new(field, &state.config);
        let buffer = frame.buffer_mut();
        buffer.set_style(field, Style::default().bg(self.background));

        let base = Style::default().bg(self.background);

        // Particles first so ships draw over them
        for particle in &state.particles {
            let half = PARTICLE_SIZE / 2.0;
            if let Some(cells) =
                viewport.cells(particle.x - half, particle.y - half, PARTICLE_SIZE, PARTICLE_SIZE)
            {
                let color = particle.color.blend_over(BACKGROUND, particle.alpha);
                fill(buffer, cells, "*", base.fg(to_color(color)));
            }
        }

        for power_up in &state.power_ups {
            if let Some(cells) = viewport.cells_of(power_up) {
                let style = base.fg(to_color(power_up.color)).add_modifier(Modifier::BOLD);
                fill(buffer, cells, "◆", style);
            }
        }

        for enemy in &state.enemies {
            if let Some(cells) = viewport.cells_of(enemy) {
                fill(buffer, cells, "█", base.fg(to_color(enemy.color)));
                // Eyes when there is room for them
                if cells.width >= 5 {
                    let eye = Style::default()
                        .fg(to_color(ENEMY_EYE))
                        .bg(to_color(enemy.color));
                    buffer.set_string(cells.x + 1, cells.y, "▀", eye);
                    buffer.set_string(cells.right() - 2, cells.y, "▀", eye);
                }
            }
        }

        for bullet in &state.bullets {
            if let Some(cells) = viewport.cells_of(bullet) {
                let style = base.fg(to_color(bullet.color)).add_modifier(Modifier::BOLD);
                fill(buffer, cells, "┃", style);
            }
        }

        if let Some(cells) = viewport.cells_of(&state.player) {
            let style = base
                .fg(to_color(state.player.color))
                .add_modifier(Modifier::BOLD);
            fill(buffer, cells, "█", style);
        }

        // Stats overlay at the top
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.lives),
                if state.lives > 1 {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
                },
            ),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", state.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Difficulty: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                state.difficulty.get_name(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  [M] ", Style::default().fg(Color::DarkGray)),
            Span::styled(state.mute_label(), Style::default().fg(Color::White)),
            Span::styled("  FPS: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.fps),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[←/→ A/D: Move] [Space: Fire] [P: Pause] [M: Mute] [1/2/3: Difficulty] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_start(&self, frame: &mut Frame, view: &RenderView) {
        let text = vec![
            Line::from(""),
            Line::from("SPACE DEFENDER").centered().bold().cyan(),
            Line::from(""),
            Line::from("Destroy the invaders before they slip past you.")
                .centered()
                .white(),
            Line::from(""),
            Line::from(format!(
                "Difficulty: {}  (1 Easy / 2 Normal / 3 Hard)",
                view.state.difficulty.get_name()
            ))
            .centered()
            .magenta(),
            Line::from(""),
            Line::from("Press ENTER to start").centered().yellow().bold(),
        ];

        self.render_overlay(frame, view.area, text, 56, 10, Color::Cyan);
    }

    /// Renders the pause screen with overlay
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        self.render_overlay(frame, view.area, text, 30, 6, Color::Yellow);
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let text = vec![
            Line::from(""),
            Line::from("GAME OVER!").centered().red().bold(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.state.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Level Reached: {}", view.state.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press ENTER or R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        self.render_overlay(frame, view.area, text, 36, 10, Color::Red);
    }

    fn render_overlay(
        &self,
        frame: &mut Frame,
        area: Rect,
        text: Vec<Line>,
        width: u16,
        height: u16,
        border: Color,
    ) {
        let width = width.min(area.width);
        let height = height.min(area.height);
        let overlay = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(border)),
                )
                .alignment(Alignment::Center),
            overlay,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Bullet, Enemy};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).expect("terminal");
        let renderer = GameRenderer::new();
        terminal
            .draw(|frame| {
                let view = RenderView {
                    state,
                    area: frame.area(),
                    fps: 60,
                };
                renderer.render(frame, &view);
            })
            .expect("draw");
        terminal.backend().buffer().clone()
    }

    fn text_of(buffer: &Buffer) -> String {
        let area = buffer.area;
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_viewport_scales_and_clips() {
        let config = GameConfig::default();
        let viewport = Viewport::new(Rect::new(0, 1, 80, 30), &config);

        // 800x600 onto 80x30: 10 units per column, 20 per row
        let cells = viewport.cells(100.0, 100.0, 40.0, 30.0).expect("visible");
        assert_eq!(cells, Rect::new(10, 6, 4, 2));

        // Tiny things still get one cell
        let cells = viewport.cells(100.0, 100.0, 4.0, 10.0).expect("visible");
        assert_eq!((cells.width, cells.height), (1, 1));

        // Partially above the top edge is clipped
        let cells = viewport.cells(100.0, -20.0, 40.0, 30.0).expect("visible");
        assert_eq!(cells.y, 1);
        assert_eq!(cells.height, 1);

        // Completely off screen
        assert!(viewport.cells(100.0, -50.0, 40.0, 30.0).is_none());
        assert!(viewport.cells(900.0, 100.0, 40.0, 30.0).is_none());
    }

    #[test]
    fn test_start_screen() {
        let state = GameState::new(GameConfig::default(), Some(1));
        let text = text_of(&draw(&state, 100, 30));
        assert!(text.contains("SPACE DEFENDER"));
        assert!(text.contains("Press ENTER to start"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Lives: 3"));
        assert!(text.contains("Level: 1"));
        assert!(text.contains("MUTE"));
    }

    #[test]
    fn test_entities_are_drawn() {
        let mut state = GameState::new(GameConfig::default(), Some(1));
        state.start();
        state
            .enemies
            .push(Enemy::new(100.0, 100.0, 1.0, Rgb::new(10, 200, 10)));
        state.bullets.push(Bullet::new(400.0, 300.0));

        let buffer = draw(&state, 80, 32);
        // Enemy at (100, 100) -> column 10, row 1 + 5
        let cell = &buffer[(11, 6)];
        assert_eq!(cell.symbol(), "█");
        assert_eq!(cell.fg, Color::Rgb(10, 200, 10));

        // Bullet at (400, 300) -> column 40, row 1 + 15
        assert_eq!(buffer[(40, 16)].symbol(), "┃");

        // Player at (375, 520) -> column 37, row 1 + 26
        assert_eq!(buffer[(38, 27)].fg, Color::Rgb(0, 255, 255));
    }

    #[test]
    fn test_pause_and_game_over_overlays() {
        let mut state = GameState::new(GameConfig::default(), Some(1));
        state.start();
        state.toggle_pause();
        assert!(text_of(&draw(&state, 80, 30)).contains("PAUSED"));

        state.toggle_pause();
        state.score = 120;
        state.lives = 1;
        state.lose_life(crate::sim::LifeLostCause::Collision);
        let text = text_of(&draw(&state, 80, 30));
        assert!(text.contains("GAME OVER!"));
        assert!(text.contains("Final Score: 120"));
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut state = GameState::new(GameConfig::default(), Some(1));
        draw(&state, 1, 1);
        draw(&state, 10, 3);
        state.start();
        draw(&state, 5, 5);
    }
}
