//! Game state machine
//!
//! `Game` is the single owner of a session: entities, score/lives/level,
//! run-state, overlay message, RNG and pending deferred transitions. Input
//! commands and simulation events are the only ways any of it changes.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::level::{LayoutError, build_bricks, reflow_bricks, validate_layout};
use super::state::{Ball, Brick, Entities, Paddle, Playfield};
use super::tick::{GameEvent, TickInput, launch_angle, tick};
use super::timers::{DeferredAction, Scheduler};
use crate::tuning::Tuning;

/// Overlay shown after losing a life
pub const MSG_LIFE_LOST: &str = "Life -1";
/// Overlay shown between a stage clear and the next level
pub const MSG_STAGE_CLEAR: &str = "Stage Clear!";
/// Overlay shown once lives run out
pub const MSG_GAME_OVER: &str = "Game Over";
/// Overlay shown while paused by the player
pub const MSG_PAUSED: &str = "Paused";

/// Coarse mode of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    /// Built but waiting for `Start`
    NotStarted,
    /// Simulation advances every frame
    Running,
    /// Frozen, by the player or by a stage clear
    Paused,
    /// Lives exhausted
    GameOver,
}

/// Discrete player commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
    TogglePause,
}

/// Score, lives and level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub score: u64,
    pub lives: u8,
    /// 1-based
    pub level: u32,
}

/// Text drawn over the play area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overlay {
    pub text: String,
    /// Unique per shown message, so a delayed clear can tell if it was replaced
    pub id: u64,
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Snapshot<'a> {
    pub score: u64,
    pub lives: u8,
    pub level: u32,
    pub run_state: RunState,
    pub playfield: Playfield,
    pub paddle: &'a Paddle,
    pub ball: &'a Ball,
    pub bricks: &'a [Brick],
    pub message: Option<&'a str>,
}

/// One game session
#[derive(Debug, Clone)]
pub struct Game {
    pub tuning: Tuning,
    entities: Entities,
    progress: Progress,
    run_state: RunState,
    overlay: Option<Overlay>,
    /// Real time seen by the game, in seconds
    clock: f64,
    /// Bumped on start/restart to invalidate pending deferred actions
    epoch: u64,
    next_message_id: u64,
    /// A stage was cleared and the level-up is scheduled
    level_up_pending: bool,
    scheduler: Scheduler,
    seed: u64,
    rng: Pcg32,
}

impl Game {
    /// Build a session on `playfield`, waiting for `Start`
    pub fn new(playfield: Playfield, tuning: Tuning, seed: u64) -> Result<Self, LayoutError> {
        validate_layout(&playfield)?;
        let level = 1;
        let paddle = Paddle::new(&playfield, tuning.paddle_speed);
        let entities = Entities {
            playfield,
            paddle,
            ball: Ball::new(tuning.ball_radius),
            bricks: build_bricks(&playfield, level)?,
        };

        let mut game = Self {
            progress: Progress {
                score: 0,
                lives: tuning.starting_lives,
                level,
            },
            tuning,
            entities,
            run_state: RunState::NotStarted,
            overlay: None,
            clock: 0.0,
            epoch: 0,
            next_message_id: 0,
            level_up_pending: false,
            scheduler: Scheduler::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
        };
        game.reseed_ball();
        Ok(game)
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn is_running(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    pub fn entities(&self) -> &Entities {
        &self.entities
    }

    /// Direct entity access for tools and tests; gameplay goes through `step`
    pub fn entities_mut(&mut self) -> &mut Entities {
        &mut self.entities
    }

    pub fn message(&self) -> Option<&str> {
        self.overlay.as_ref().map(|o| o.text.as_str())
    }

    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn level_up_pending(&self) -> bool {
        self.level_up_pending
    }

    /// Apply a player command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start(),
            Command::Restart => self.restart(),
            Command::TogglePause => self.toggle_pause(),
        }
    }

    /// Begin a fresh game at level 1
    pub fn start(&mut self) {
        self.progress = Progress {
            score: 0,
            lives: self.tuning.starting_lives,
            level: 1,
        };
        self.begin_session();
        log::info!("Game started (seed {})", self.seed);
    }

    /// Replay the current level with full lives and a zeroed score
    pub fn restart(&mut self) {
        self.progress.score = 0;
        self.progress.lives = self.tuning.starting_lives;
        self.begin_session();
        log::info!("Game restarted at level {}", self.progress.level);
    }

    fn begin_session(&mut self) {
        self.epoch += 1;
        self.level_up_pending = false;
        self.overlay = None;
        self.load_level();
        self.run_state = RunState::Running;
    }

    /// Flip between Running and Paused
    ///
    /// Ignored before the first start, after game over, and while a stage-clear
    /// level-up is pending.
    pub fn toggle_pause(&mut self) {
        if self.level_up_pending {
            log::debug!("Pause toggle ignored during stage clear");
            return;
        }
        match self.run_state {
            RunState::Running => {
                self.run_state = RunState::Paused;
                self.show_message(MSG_PAUSED);
                log::debug!("Paused");
            }
            RunState::Paused => {
                self.run_state = RunState::Running;
                self.overlay = None;
                log::debug!("Resumed");
            }
            RunState::NotStarted | RunState::GameOver => {}
        }
    }

    /// Advance the game clock by `elapsed` real seconds and fire due transitions
    ///
    /// Runs in every run-state so overlays expire and level-ups happen while frozen.
    pub fn advance_clock(&mut self, elapsed: f64) {
        if elapsed.is_finite() && elapsed > 0.0 {
            self.clock += elapsed;
        }

        for deferred in self.scheduler.drain_due(self.clock) {
            if deferred.epoch != self.epoch {
                log::debug!(
                    "Discarding stale {:?} from epoch {} (now {})",
                    deferred.action,
                    deferred.epoch,
                    self.epoch
                );
                continue;
            }
            match deferred.action {
                DeferredAction::ClearMessage { message_id } => {
                    if self.overlay.as_ref().is_some_and(|o| o.id == message_id) {
                        self.overlay = None;
                    }
                }
                DeferredAction::LevelUp => {
                    if self.level_up_pending {
                        self.level_up();
                    }
                }
            }
        }
    }

    /// Run one simulation step if the game is running
    ///
    /// Returns the events the step produced (already applied).
    pub fn step(&mut self, dt: f32, input: &TickInput) -> Vec<GameEvent> {
        if self.run_state != RunState::Running {
            return Vec::new();
        }

        let events = tick(
            &mut self.entities,
            input,
            dt,
            self.progress.level,
            &self.tuning,
            &mut self.rng,
        );
        for event in &events {
            self.handle_event(*event);
        }
        events
    }

    fn handle_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::BrickDestroyed { index } => {
                self.progress.score = self
                    .progress
                    .score
                    .saturating_add(self.tuning.points_per_brick);
                log::debug!("Brick {} destroyed, score {}", index, self.progress.score);
            }
            GameEvent::BallLost => {
                if self.run_state != RunState::Running {
                    return;
                }
                self.progress.lives = self.progress.lives.saturating_sub(1);
                if self.progress.lives > 0 {
                    let secs = self.tuning.life_lost_message_secs();
                    self.flash_message(MSG_LIFE_LOST, secs);
                    log::debug!("Ball lost, {} lives left", self.progress.lives);
                } else {
                    self.run_state = RunState::GameOver;
                    self.show_message(MSG_GAME_OVER);
                    log::info!(
                        "Game over at level {} with score {}",
                        self.progress.level,
                        self.progress.score
                    );
                }
            }
            GameEvent::StageCleared => {
                if self.run_state != RunState::Running || self.level_up_pending {
                    return;
                }
                self.level_up_pending = true;
                self.run_state = RunState::Paused;
                self.show_message(MSG_STAGE_CLEAR);
                let due = self.clock + self.tuning.stage_clear_delay_secs();
                self.scheduler.schedule(due, self.epoch, DeferredAction::LevelUp);
                log::info!("Stage {} cleared", self.progress.level);
            }
        }
    }

    fn level_up(&mut self) {
        self.level_up_pending = false;
        self.progress.level += 1;
        self.load_level();
        self.overlay = None;
        self.run_state = RunState::Running;
        log::info!("Level {}", self.progress.level);
    }

    /// Fresh grid, paddle and ball for the current level
    fn load_level(&mut self) {
        let playfield = self.entities.playfield;
        match build_bricks(&playfield, self.progress.level) {
            Ok(bricks) => self.entities.bricks = bricks,
            Err(e) => log::warn!("Keeping previous grid: {}", e),
        }
        self.entities.paddle = Paddle::new(&playfield, self.tuning.paddle_speed);
        self.entities.ball = Ball::new(self.tuning.ball_radius);
        self.reseed_ball();
    }

    fn reseed_ball(&mut self) {
        let angle = launch_angle(&mut self.rng, &self.tuning);
        let speed = self.tuning.base_speed(self.progress.level);
        self.entities.ball.reseed(&self.entities.paddle, speed, angle);
    }

    /// Lay the session out on a new playfield
    ///
    /// Score, lives, level, run-state and brick damage are untouched. A
    /// playfield that cannot hold the grid is rejected and the old layout kept.
    pub fn resize(&mut self, playfield: Playfield) -> Result<(), LayoutError> {
        if let Err(e) = validate_layout(&playfield) {
            log::warn!(
                "Ignoring resize to {}x{}: {}",
                playfield.width,
                playfield.height,
                e
            );
            return Err(e);
        }

        let old = self.entities.playfield;
        let bricks = reflow_bricks(&playfield, self.progress.level, &self.entities.bricks)?;
        let relative_x = self.entities.paddle.center_x() / old.width;

        let mut paddle = Paddle::new(&playfield, self.tuning.paddle_speed);
        paddle.center_on(&playfield, relative_x * playfield.width);

        self.entities.playfield = playfield;
        self.entities.bricks = bricks;
        self.entities.paddle = paddle;
        self.reseed_ball();

        log::info!(
            "Resized {}x{} -> {}x{}",
            old.width,
            old.height,
            playfield.width,
            playfield.height
        );
        Ok(())
    }

    /// Show a message until something replaces or clears it
    fn show_message(&mut self, text: &str) -> u64 {
        self.next_message_id += 1;
        let id = self.next_message_id;
        self.overlay = Some(Overlay {
            text: text.to_string(),
            id,
        });
        id
    }

    /// Show a message that clears itself after `secs`
    fn flash_message(&mut self, text: &str, secs: f64) {
        let id = self.show_message(text);
        self.scheduler.schedule(
            self.clock + secs,
            self.epoch,
            DeferredAction::ClearMessage { message_id: id },
        );
    }

    /// Everything the renderer needs for one frame
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            score: self.progress.score,
            lives: self.progress.lives,
            level: self.progress.level,
            run_state: self.run_state,
            playfield: self.entities.playfield,
            paddle: &self.entities.paddle,
            ball: &self.entities.ball,
            bricks: &self.entities.bricks,
            message: self.message(),
        }
    }
}
