//! Brickfall headless runner
//!
//! Drives a game with an autopilot paddle on a simulated 60 Hz clock and logs
//! what happens. Usage: `brickfall [seed] [seconds]`.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use brickfall::sim::{Command, Game, Playfield, RunState, Snapshot, TickInput};
    use brickfall::{FrameDriver, Renderer, Tuning};

    /// Simulated display refresh
    const FRAME_SECS: f64 = 1.0 / 60.0;
    /// Paddle stops chasing inside this distance of the ball
    const AUTOPILOT_DEADZONE: f32 = 6.0;

    /// Logs overlay changes and a periodic HUD line
    #[derive(Default)]
    struct LogRenderer {
        last_message: Option<String>,
        frame: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, frame: &Snapshot<'_>) {
            let message = frame.message.map(str::to_string);
            if message != self.last_message {
                if let Some(text) = &message {
                    log::info!("[{}] {}", frame.level, text);
                }
                self.last_message = message;
            }

            if self.frame % 60 == 0 {
                let alive = frame.bricks.iter().filter(|b| b.alive).count();
                log::debug!(
                    "score={} lives={} level={} bricks={} ball=({:.0},{:.0})",
                    frame.score,
                    frame.lives,
                    frame.level,
                    alive,
                    frame.ball.pos.x,
                    frame.ball.pos.y
                );
            }
            self.frame += 1;
        }
    }

    /// Steer the paddle under the ball
    fn autopilot(game: &Game) -> TickInput {
        let entities = game.entities();
        let delta = entities.ball.pos.x - entities.paddle.center_x();
        TickInput {
            move_left: delta < -AUTOPILOT_DEADZONE,
            move_right: delta > AUTOPILOT_DEADZONE,
        }
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
        let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(120.0);

        let tuning = Tuning::load();
        let playfield = Playfield::fit_container(1080.0, 720.0);
        let mut game = match Game::new(playfield, tuning, seed) {
            Ok(game) => game,
            Err(e) => {
                log::error!("Cannot lay out playfield: {}", e);
                std::process::exit(1);
            }
        };

        let mut driver = FrameDriver::new();
        let mut renderer = LogRenderer::default();
        game.apply(Command::Start);

        let frames = (seconds / FRAME_SECS).ceil() as u64;
        for i in 0..frames {
            let input = autopilot(&game);
            driver.frame(i as f64 * FRAME_SECS, &mut game, &input, &mut renderer);
            if game.run_state() == RunState::GameOver {
                break;
            }
        }

        log::info!(
            "Finished after {} frames (seed {}): {:?}",
            driver.frames(),
            game.seed(),
            game.progress()
        );
        match serde_json::to_string_pretty(&game.progress()) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Could not serialize result: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation core is embedded by a host on the web; nothing to run here
}
