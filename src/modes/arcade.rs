use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;

use crate::audio::{SoundBank, CUE_EAT, CUE_GAME_OVER, CUE_MOVE};
use crate::game::{
    Command, Difficulty, FixedTimestep, GameConfig, GameEngine, GameEvent, Phase, LOGIC_STEP,
};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::persistence::HighScoreStore;
use crate::render::Renderer;

/// Interactive play: terminal setup, the fixed-timestep loop and teardown
pub struct ArcadeMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    sounds: SoundBank,
    timestep: FixedTimestep,
    last_tick: Instant,
    should_quit: bool,
}

impl ArcadeMode {
    pub fn new(
        config: GameConfig,
        difficulty: Difficulty,
        store: HighScoreStore,
        sound_enabled: bool,
    ) -> Self {
        let mut sounds = SoundBank::new(sound_enabled);
        if sound_enabled {
            sounds.load(CUE_EAT, "assets/sounds/eat.wav");
            sounds.load(CUE_MOVE, "assets/sounds/move.wav");
            sounds.load(CUE_GAME_OVER, "assets/sounds/game_over.wav");
        }

        Self {
            engine: GameEngine::new(config, difficulty),
            metrics: GameMetrics::new(store),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            sounds,
            timestep: FixedTimestep::new(LOGIC_STEP),
            last_tick: Instant::now(),
            should_quit: false,
        }
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

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Logic polls at 120 Hz; real elapsed time still flows through the
        // capped accumulator, so a slow tick produces several fixed steps
        // instead of a long one.
        let mut logic_timer = interval(Duration::from_secs_f64(LOGIC_STEP));

        // Render at 30 FPS, independent of logic and move cadence
        let mut render_timer = interval(Duration::from_millis(33));

        self.last_tick = Instant::now();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Fixed-timestep logic
                _ = logic_timer.tick() => {
                    self.run_logic_steps();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.engine, &self.metrics);
                    }).context("Failed to draw frame")?;
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

    /// Feed real elapsed time into the accumulator and drain it in fixed steps
    fn run_logic_steps(&mut self) {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_tick).as_secs_f64();
        self.last_tick = now;

        self.timestep.accumulate(frame_time);
        while self.timestep.try_step() {
            let events = self.engine.update(self.timestep.step_size());
            self.dispatch_events(&events);
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    if self.engine.phase() == Phase::Playing {
                        self.sounds.play(CUE_MOVE);
                    }
                    self.apply_command(Command::Turn(direction));
                }
                KeyAction::Pause => self.apply_command(Command::Pause),
                KeyAction::Confirm => self.apply_command(Command::Confirm),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply_command(&mut self, command: Command) {
        if let Some(event) = self.engine.apply(command) {
            self.dispatch_events(&[event]);
        }
    }

    fn dispatch_events(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::Ate => self.sounds.play(CUE_EAT),
                GameEvent::GameOver { score } => {
                    self.sounds.play(CUE_GAME_OVER);
                    self.metrics.on_game_over(self.engine.difficulty(), *score);
                }
                GameEvent::Started => self.metrics.on_game_start(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn arcade_mode() -> (ArcadeMode, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("high_score.json"));
        let mode = ArcadeMode::new(GameConfig::default(), Difficulty::Medium, store, false);
        (mode, dir)
    }

    #[test]
    fn test_starts_in_menu() {
        let (mode, _dir) = arcade_mode();
        assert_eq!(mode.engine.phase(), Phase::Menu);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_game_over_event_records_high_score() {
        let (mut mode, _dir) = arcade_mode();
        mode.apply_command(Command::Start(Difficulty::Medium));
        mode.dispatch_events(&[GameEvent::GameOver { score: 6 }]);
        assert_eq!(mode.metrics.high_score(Difficulty::Medium), 6);
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_logic_steps_drain_accumulated_time() {
        let (mut mode, _dir) = arcade_mode();
        mode.apply_command(Command::Start(Difficulty::Medium));

        // Simulate half a second of backlog; the snake must have moved.
        let head = mode.engine.snake.head();
        mode.timestep.accumulate(0.5);
        while mode.timestep.try_step() {
            let step = mode.timestep.step_size();
            let events = mode.engine.update(step);
            mode.dispatch_events(&events);
        }
        assert_ne!(mode.engine.snake.head(), head);
    }
}
