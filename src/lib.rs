//! Brickfall - a paddle-and-ball brick breaker
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, level grid, game state machine)
//! - `driver`: Per-frame orchestration and the renderer seam
//! - `tuning`: Data-driven game balance

pub mod driver;
pub mod sim;
pub mod tuning;

pub use driver::{FrameDriver, Renderer};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Largest time increment a single simulation step may integrate (seconds)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Playfield sizing (abstract units)
    pub const MIN_PLAYFIELD_WIDTH: f32 = 320.0;
    pub const MAX_PLAYFIELD_WIDTH: f32 = 900.0;
    /// Width / height
    pub const PLAYFIELD_ASPECT: f32 = 3.0 / 2.0;
    /// Gap kept clear on the left and right of the paddle track and brick grid
    pub const PLAYFIELD_MARGIN: f32 = 12.0;

    /// Paddle width is a fraction of the playfield width, clamped
    pub const PADDLE_WIDTH_FRACTION: f32 = 0.16;
    pub const PADDLE_MIN_WIDTH: f32 = 80.0;
    pub const PADDLE_MAX_WIDTH: f32 = 160.0;
    pub const PADDLE_HEIGHT: f32 = 12.0;
    /// Distance from the paddle's bottom edge to the playfield bottom
    pub const PADDLE_BOTTOM_GAP: f32 = 24.0;
    /// Extra depth below the paddle top where a falling ball still counts as caught
    pub const PADDLE_CATCH_BAND: f32 = 10.0;

    /// Brick grid
    pub const BRICK_COLS: u32 = 10;
    pub const BRICK_BASE_ROWS: u32 = 6;
    pub const BRICK_MAX_ROWS: u32 = 10;
    pub const BRICK_PADDING: f32 = 4.0;
    /// Top edge of the first brick row
    pub const BRICK_TOP: f32 = 40.0;
    /// Fraction of the playfield height the grid may reach down to
    pub const BRICK_AREA_FRACTION: f32 = 0.55;
    pub const MAX_ROW_HEIGHT: f32 = 24.0;

    /// Clearance left between the ball and the paddle top after a bounce or respawn
    pub const BALL_PADDLE_CLEARANCE: f32 = 1.0;
}
