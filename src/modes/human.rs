use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Instant;
use tokio::time::{MissedTickBehavior, interval};
use tracing::info;

use crate::audio::TerminalCues;
use crate::game::{GameConfig, GameError, GameState, RandomCellSource, RngCellSource, TickOutcome};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;
use crate::timing::TickGate;

pub struct HumanMode<S = RngCellSource<rand::rngs::StdRng>> {
    config: GameConfig,
    state: GameState<S>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    cues: TerminalCues,
    gate: TickGate,
    should_quit: bool,
}

impl<S: RandomCellSource> HumanMode<S> {
    pub fn new(config: GameConfig, source: S, muted: bool) -> Result<Self> {
        let state =
            GameState::with_source(&config, source).context("Failed to set up the board")?;

        Ok(Self {
            gate: TickGate::new(config.tick_interval()),
            config,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            cues: TerminalCues::new(muted),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            grid_size = self.config.grid_size,
            tick_ms = self.config.tick_interval_ms,
            fps = self.config.frame_rate,
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            food = self.cues.eaten(),
            crashes = self.cues.crashes(),
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut frame_timer = interval(self.config.frame_interval());
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        self.gate = TickGate::new(self.config.tick_interval());

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            return Err(anyhow::Error::new(err).context("Failed to read terminal event"));
                        }
                        None => self.should_quit = true,
                    }
                }

                // One frame; the game itself only moves when a tick is due
                _ = frame_timer.tick() => {
                    self.update_game();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                    self.cues.flush(terminal.backend_mut())?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.state.set_pending_direction(direction);
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }
    }

    fn update_game(&mut self) {
        self.metrics.update();

        if !self.gate.is_due(Instant::now()) {
            return;
        }

        match self.state.advance(&mut self.cues) {
            Ok(outcome) => self.metrics.record(outcome),
            // A full board is a finished game; the next direction key restarts
            Err(GameError::WorldFull { grid_size }) => {
                let score = self.state.score();
                info!(grid_size, score, "board filled");
                self.metrics.record(TickOutcome::Ate { score });
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
