//! Entity model: playfield bounds, paddle, ball and bricks
//!
//! Sizes are always derived from the playfield, never stored independently of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, clamp};
use crate::consts::*;

/// Playable area in abstract units (origin top-left, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    /// Create a playfield, clamping the width into the playable range
    ///
    /// Non-finite or non-positive dimensions fall back to the minimum playable size.
    pub fn new(width: f32, height: f32) -> Self {
        let min_height = MIN_PLAYFIELD_WIDTH / PLAYFIELD_ASPECT;
        let width = if width.is_finite() {
            clamp(width, MIN_PLAYFIELD_WIDTH, MAX_PLAYFIELD_WIDTH)
        } else {
            MIN_PLAYFIELD_WIDTH
        };
        let height = if height.is_finite() && height > 0.0 {
            height.max(min_height)
        } else {
            min_height
        };
        Self { width, height }
    }

    /// Fit a 3:2 playfield into a container of the given size
    pub fn fit_container(container_width: f32, container_height: f32) -> Self {
        let width = container_width.min(container_height * PLAYFIELD_ASPECT);
        let width = if width.is_finite() {
            clamp(width, MIN_PLAYFIELD_WIDTH, MAX_PLAYFIELD_WIDTH)
        } else {
            MIN_PLAYFIELD_WIDTH
        };
        Self {
            width,
            height: width / PLAYFIELD_ASPECT,
        }
    }

    /// Leftmost x the paddle may occupy
    #[inline]
    pub fn paddle_min_x(&self) -> f32 {
        PLAYFIELD_MARGIN
    }

    /// Rightmost x (top-left) the paddle may occupy for a given paddle width
    #[inline]
    pub fn paddle_max_x(&self, paddle_width: f32) -> f32 {
        self.width - paddle_width - PLAYFIELD_MARGIN
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new(720.0, 480.0)
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left x
    pub x: f32,
    /// Top y (fixed for a given playfield)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Horizontal speed in units per second
    pub speed: f32,
}

impl Paddle {
    /// Paddle centred horizontally near the bottom of the playfield
    pub fn new(playfield: &Playfield, speed: f32) -> Self {
        let width = clamp(
            PADDLE_WIDTH_FRACTION * playfield.width,
            PADDLE_MIN_WIDTH,
            PADDLE_MAX_WIDTH,
        );
        let mut paddle = Self {
            x: 0.0,
            y: playfield.height - PADDLE_BOTTOM_GAP - PADDLE_HEIGHT,
            width,
            height: PADDLE_HEIGHT,
            speed,
        };
        paddle.center_on(playfield, playfield.width / 2.0);
        paddle
    }

    /// Move so the paddle centre sits at `center_x`, respecting the margins
    pub fn center_on(&mut self, playfield: &Playfield, center_x: f32) {
        self.x = center_x - self.width / 2.0;
        self.clamp_to(playfield);
    }

    /// Keep `margin <= x <= W - width - margin`
    pub fn clamp_to(&mut self, playfield: &Playfield) {
        self.x = clamp(
            self.x,
            playfield.paddle_min_x(),
            playfield.paddle_max_x(self.width),
        );
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// The ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    /// Centre position
    pub pos: Vec2,
    /// Velocity in units per second
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius,
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Place the ball just above the paddle centre and launch it upward
    ///
    /// `angle` is measured from vertical in radians; positive leans right.
    pub fn reseed(&mut self, paddle: &Paddle, speed: f32, angle: f32) {
        self.pos = Vec2::new(
            paddle.center_x(),
            paddle.y - self.radius - BALL_PADDLE_CLEARANCE,
        );
        self.vel = Vec2::new(speed * angle.sin(), -(speed * angle.cos()).abs());
    }
}

/// A single brick. Geometry is fixed at creation; only `alive` and `hp` change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub alive: bool,
    pub hp: u8,
}

impl Brick {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            alive: true,
            hp: 1,
        }
    }
}

/// Every simulated entity for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entities {
    pub playfield: Playfield,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Scan order matters: the first overlapping brick wins each step
    pub bricks: Vec<Brick>,
}

impl Entities {
    /// True when every brick has been destroyed
    pub fn all_bricks_dead(&self) -> bool {
        self.bricks.iter().all(|b| !b.alive)
    }

    pub fn bricks_alive(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }
}
