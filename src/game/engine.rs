use rand::rngs::ThreadRng;
use tracing::debug;

use super::action::Direction;
use super::config::{Difficulty, DifficultyProfile, GameConfig};
use super::food::Food;
use super::scheduler::MoveTimer;
use super::state::{Position, Snake};

/// Which part of the simulation is allowed to run.
///
/// Only `Playing` advances the snake, the animation and the move-cadence
/// accumulator; every other phase freezes both the discrete and the
/// continuous simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

/// External input intents, mapped 1:1 onto direction changes and phase
/// transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Directional intent; also drives menu navigation
    Turn(Direction),
    /// Pause/resume key (also quits to menu from the game-over screen)
    Pause,
    /// Start/restart key (menu select, restart after game over)
    Confirm,
    /// Start a session at an explicit difficulty
    Start(Difficulty),
}

/// Something the outside world may want to react to (sound, metrics)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate the food this step
    Ate,
    /// The run ended; carries the final score
    GameOver { score: u32 },
    /// A fresh run began (from the menu or a restart)
    Started,
}

/// The session owner: snake, food, score, timers and the phase machine
pub struct GameEngine {
    config: GameConfig,
    difficulty: Difficulty,
    profile: DifficultyProfile,
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    phase: Phase,
    menu_selection: Difficulty,
    move_timer: MoveTimer,
    rng: ThreadRng,
}

impl GameEngine {
    pub fn new(config: GameConfig, difficulty: Difficulty) -> Self {
        let profile = difficulty.profile();
        let mut rng = rand::thread_rng();
        let snake = Self::initial_snake(&config, &profile);
        let food = Food::spawn(&mut rng, &config, &snake.body);

        Self {
            config,
            difficulty,
            profile,
            snake,
            food,
            score: 0,
            phase: Phase::Menu,
            menu_selection: difficulty,
            move_timer: MoveTimer::new(profile.move_interval),
            rng,
        }
    }

    fn initial_snake(config: &GameConfig, profile: &DifficultyProfile) -> Snake {
        let center = Position::new(
            (config.grid_width / 2) as i32,
            (config.grid_height / 2) as i32,
        );
        let mut snake = Snake::new(center, Direction::Right, config.initial_snake_length);
        snake.set_easing(profile.easing);
        snake
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn menu_selection(&self) -> Difficulty {
        self.menu_selection
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn profile(&self) -> &DifficultyProfile {
        &self.profile
    }

    /// Run one fixed logic step.
    ///
    /// Accumulates the move timer, drives the animation at the dynamically
    /// scaled speed, and commits a discrete move once the cadence fires *and*
    /// the previous animation has completed. Returns the events this step
    /// produced.
    pub fn update(&mut self, dt: f64) -> Vec<GameEvent> {
        let mut events = Vec::new();

        if self.phase != Phase::Playing {
            return events;
        }

        self.move_timer.advance(dt);

        let speed = self.move_timer.animation_speed(self.profile.animation_speed);
        let animation_complete = self.snake.update_animation(dt as f32, speed);

        if self.move_timer.ready() && animation_complete {
            self.move_timer.consume();
            self.snake.advance();

            if self.food.is_at(self.snake.head()) {
                self.snake.grow();
                self.score += 1;
                self.food.respawn(&mut self.rng, &self.config, &self.snake.body);
                events.push(GameEvent::Ate);
            }

            if self.snake.collides_with_self()
                || self
                    .snake
                    .collides_with_bounds(self.config.grid_width, self.config.grid_height)
            {
                self.phase = Phase::GameOver;
                debug!(score = self.score, "game over");
                events.push(GameEvent::GameOver { score: self.score });
            }
        }

        events
    }

    /// Apply an input intent; which intents do anything depends on the phase
    pub fn apply(&mut self, command: Command) -> Option<GameEvent> {
        match (self.phase, command) {
            (Phase::Playing, Command::Turn(direction)) => {
                self.snake.change_direction(direction);
                None
            }
            (Phase::Playing, Command::Pause) => {
                self.set_phase(Phase::Paused);
                None
            }
            (Phase::Paused, Command::Pause) => {
                self.set_phase(Phase::Playing);
                None
            }
            (Phase::Paused, Command::Confirm) => {
                self.set_phase(Phase::Menu);
                None
            }
            (Phase::GameOver, Command::Pause) => {
                self.set_phase(Phase::Menu);
                None
            }
            (Phase::GameOver, Command::Confirm) => {
                self.reset();
                Some(GameEvent::Started)
            }
            (Phase::Menu, Command::Turn(Direction::Up)) => {
                self.menu_selection = previous_difficulty(self.menu_selection);
                None
            }
            (Phase::Menu, Command::Turn(Direction::Down)) => {
                self.menu_selection = next_difficulty(self.menu_selection);
                None
            }
            (Phase::Menu, Command::Confirm) => {
                self.start(self.menu_selection);
                Some(GameEvent::Started)
            }
            (_, Command::Start(difficulty)) => {
                self.start(difficulty);
                Some(GameEvent::Started)
            }
            _ => None,
        }
    }

    /// Begin a session at `difficulty`: resolve its profile once, then reset
    pub fn start(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.menu_selection = difficulty;
        self.profile = difficulty.profile();
        self.reset();
    }

    /// Replace the snake and food wholesale and re-enter `Playing`
    pub fn reset(&mut self) {
        self.snake = Self::initial_snake(&self.config, &self.profile);
        self.food = Food::spawn(&mut self.rng, &self.config, &self.snake.body);
        self.score = 0;
        self.move_timer = MoveTimer::new(self.profile.move_interval);
        self.set_phase(Phase::Playing);
    }

    fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!(from = ?self.phase, to = ?phase, "phase transition");
            self.phase = phase;
        }
    }
}

fn next_difficulty(current: Difficulty) -> Difficulty {
    match current {
        Difficulty::Easy => Difficulty::Medium,
        Difficulty::Medium => Difficulty::Hard,
        Difficulty::Hard => Difficulty::Easy,
    }
}

fn previous_difficulty(current: Difficulty) -> Difficulty {
    match current {
        Difficulty::Easy => Difficulty::Hard,
        Difficulty::Medium => Difficulty::Easy,
        Difficulty::Hard => Difficulty::Medium,
    }
}
