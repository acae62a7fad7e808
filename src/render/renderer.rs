use std::collections::HashMap;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::game::{Difficulty, GameEngine, Phase};
use crate::metrics::GameMetrics;

/// Round a fractional visual position to the terminal cell it occupies
fn visual_cell(position: (f32, f32)) -> (i32, i32) {
    (position.0.round() as i32, position.1.round() as i32)
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, engine: &GameEngine, metrics: &GameMetrics) {
        if engine.phase() == Phase::Menu {
            let menu = self.render_menu(engine, metrics);
            frame.render_widget(menu, frame.area());
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(engine, metrics);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match engine.phase() {
            Phase::GameOver => {
                let game_over = self.render_game_over(engine, metrics);
                frame.render_widget(game_over, game_area);
            }
            _ => {
                let grid = self.render_grid(engine);
                frame.render_widget(grid, game_area);

                if engine.phase() == Phase::Paused {
                    let overlay_area = centered_rect(game_area, 30, 5);
                    frame.render_widget(Clear, overlay_area);
                    frame.render_widget(self.render_pause_overlay(), overlay_area);
                }
            }
        }

        let controls = self.render_controls(engine.phase());
        frame.render_widget(controls, chunks[2]);
    }

    fn render_menu(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Select difficulty:"),
            Line::from(""),
        ];

        for difficulty in Difficulty::ALL {
            let selected = difficulty == engine.menu_selection();
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{}{:<8} best: {}",
                    marker,
                    difficulty.name(),
                    metrics.high_score(difficulty)
                ),
                style,
            )));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Up/Down select | Enter play | Q quit",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_stats(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let line = Line::from(vec![
            Span::styled(
                format!(" {} ", engine.difficulty().name()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(format!("| Score: {} ", engine.score)),
            Span::raw(format!(
                "| Best: {} ",
                metrics.high_score(engine.difficulty())
            )),
            Span::raw(format!("| Time: {} ", metrics.format_time())),
        ]);

        Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_grid(&self, engine: &GameEngine) -> Paragraph<'_> {
        let snake = &engine.snake;

        // First segment claiming a cell wins, so the head shadows the body
        // when the animation briefly overlaps them.
        let mut occupancy: HashMap<(i32, i32), usize> = HashMap::new();
        for (i, segment) in snake.visual_segments().iter().enumerate() {
            occupancy.entry(visual_cell(*segment)).or_insert(i);
        }

        let food_cell = (engine.food.position.x, engine.food.position.y);
        let mut lines = Vec::with_capacity(engine.config().grid_height);

        for y in 0..engine.config().grid_height as i32 {
            let mut spans = Vec::with_capacity(engine.config().grid_width);

            for x in 0..engine.config().grid_width as i32 {
                let span = if let Some(&index) = occupancy.get(&(x, y)) {
                    let (r, g, b) = if index == 0 {
                        snake.head_color()
                    } else {
                        snake.gradient_color(index)
                    };
                    let style = Style::default().fg(Color::Rgb(r, g, b));
                    if index == 0 {
                        Span::styled("■ ", style.add_modifier(Modifier::BOLD))
                    } else {
                        Span::styled("□ ", style)
                    }
                } else if (x, y) == food_cell {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };
                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_pause_overlay(&self) -> Paragraph<'_> {
        let lines = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from("Esc resume | Enter menu"),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
    }

    fn render_game_over(&self, engine: &GameEngine, metrics: &GameMetrics) -> Paragraph<'_> {
        let best = metrics.high_score(engine.difficulty());
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Score: {}", engine.score)),
            Line::from(format!("Best ({}): {}", engine.difficulty().name(), best)),
            Line::from(""),
            Line::from(Span::styled(
                "Enter restart | Esc menu",
                Style::default().fg(Color::DarkGray),
            )),
        ];

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_controls(&self, phase: Phase) -> Paragraph<'_> {
        let text = match phase {
            Phase::Paused => "Esc: resume | Enter: menu | Q: quit",
            Phase::GameOver => "Enter: restart | Esc: menu | Q: quit",
            _ => "Arrows/WASD: steer | Esc: pause | Q: quit",
        };

        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray),
        )))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centered inside `area`, clamped to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
