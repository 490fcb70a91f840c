use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState, RandomCellSource, Status};
use crate::game::Direction as Heading;
use crate::metrics::GameMetrics;

const DARK_GREEN: Color = Color::Rgb(43, 51, 24);
const GREEN: Color = Color::Rgb(173, 204, 96);

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<S: RandomCellSource>(
        &self,
        frame: &mut Frame,
        state: &GameState<S>,
        metrics: &GameMetrics,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(0),    // Board
                Constraint::Length(1), // Score line
                Constraint::Length(1), // Hint
            ])
            .split(frame.area());

        frame.render_widget(self.render_title(), chunks[0]);
        frame.render_widget(self.render_grid(state), chunks[1]);
        frame.render_widget(self.render_stats(state, metrics), chunks[2]);
        frame.render_widget(self.render_hint(state), chunks[3]);
    }

    fn render_title(&self) -> Paragraph<'_> {
        Paragraph::new(Line::from(Span::styled(
            "Retro Snake",
            Style::default().fg(GREEN).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
    }

    fn render_grid<S: RandomCellSource>(&self, state: &GameState<S>) -> Paragraph<'_> {
        let head = state.snake().head();
        let food = state.food_position();
        let occupancy = state.snake().occupancy();
        let mut lines = Vec::with_capacity(state.grid_size() as usize);

        for y in 0..state.grid_size() {
            let mut spans = Vec::with_capacity(state.grid_size() as usize);

            for x in 0..state.grid_size() {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled("██", Style::default().fg(GREEN).add_modifier(Modifier::BOLD))
                } else if occupancy.is_occupied(cell) {
                    Span::styled("▓▓", Style::default().fg(GREEN))
                } else if food == Some(cell) {
                    Span::styled("<>", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                } else {
                    Span::styled(" .", Style::default().fg(DARK_GREEN))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Thick)
                    .border_style(Style::default().fg(GREEN)),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats<S: RandomCellSource>(
        &self,
        state: &GameState<S>,
        metrics: &GameMetrics,
    ) -> Paragraph<'_> {
        let text = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.high_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Food: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.food_eaten.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.games_played.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_hint<S: RandomCellSource>(&self, state: &GameState<S>) -> Paragraph<'_> {
        let (banner, color) = match state.status() {
            Status::Running => {
                let text = Line::from(vec![
                    Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                    Span::raw(" or "),
                    Span::styled("WASD", Style::default().fg(Color::Cyan)),
                    Span::raw(" to move | "),
                    Span::styled("Q", Style::default().fg(Color::Red)),
                    Span::raw(" to quit"),
                ]);
                return Paragraph::new(text).alignment(Alignment::Center);
            }
            Status::Paused => ("Crashed! ", Color::Red),
            Status::Full => ("Board full! ", GREEN),
        };

        let text = Line::from(vec![
            Span::styled(banner, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw("Press "),
            Span::styled(
                resume_keys(state.snake().direction()),
                Style::default().fg(Color::Cyan),
            ),
            Span::raw(" to play again"),
        ]);

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

/// Arrow keys that resume play; the reverse of `heading` is refused
fn resume_keys(heading: Heading) -> String {
    Heading::ALL
        .into_iter()
        .filter(|d| !heading.is_opposite(*d))
        .map(|d| match d {
            Heading::Up => "↑",
            Heading::Down => "↓",
            Heading::Left => "←",
            Heading::Right => "→",
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig, GameEvent};
    use ratatui::{Terminal, backend::TestBackend};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn draw(state: &GameState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, state, &metrics))
            .unwrap();
        screen_text(&terminal)
    }

    #[test]
    fn test_running_screen() {
        let state = GameState::new(&GameConfig::small()).unwrap();
        let text = draw(&state);

        assert!(text.contains("Retro Snake"));
        assert!(text.contains("Score: 0"));
        assert!(text.contains("Food: 0"));
        assert!(text.contains("<>"));
        assert!(text.contains("to quit"));
    }

    #[test]
    fn test_paused_screen_shows_hint() {
        let mut config = GameConfig::small();
        config.initial_body = vec![Cell::new(0, 5), Cell::new(1, 5), Cell::new(2, 5)];
        config.initial_direction = Direction::Left;
        let mut state = GameState::new(&config).unwrap();
        let mut events: Vec<GameEvent> = Vec::new();
        state.advance(&mut events).unwrap();
        assert!(!state.is_running());

        let text = draw(&state);
        assert!(text.contains("Crashed!"));
        // Reset snake heads right, so left is not offered
        assert!(text.contains("Press ↑ ↓ → to play again"));

        state.set_pending_direction(Direction::Up);
        assert!(!draw(&state).contains("Crashed!"));
    }

    #[test]
    fn test_resume_keys_skip_reverse() {
        assert_eq!(resume_keys(Heading::Right), "↑ ↓ →");
        assert_eq!(resume_keys(Heading::Up), "↑ ← →");
    }
}
