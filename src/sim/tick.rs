//! Per-frame simulation step
//!
//! Advances paddle, ball and bricks by one time increment and reports what
//! happened. Lives, score and level are never touched here; the caller reacts
//! to the returned events.

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Axis, circle_rect_collision, reflect};
use super::state::Entities;
use crate::consts::*;
use crate::tuning::Tuning;

/// Paddle-direction intent for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub move_left: bool,
    pub move_right: bool,
}

/// Something the step observed that the state machine must react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Brick at this index in the grid went from alive to dead
    BrickDestroyed { index: usize },
    /// Ball fell out of the bottom of the playfield (already reseeded)
    BallLost,
    /// No brick is left alive
    StageCleared,
}

/// Turn a raw frame delta into one safe to integrate
///
/// Negative or non-finite deltas become zero; large ones are capped at
/// [`MAX_FRAME_DT`] to bound tunneling on slow frames.
#[inline]
pub fn sanitize_dt(dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_FRAME_DT)
    }
}

/// Random launch angle off vertical within the tuning's bounce cone
pub fn launch_angle(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let max = tuning.max_bounce_angle();
    if max > 0.0 {
        rng.random_range(-max..=max)
    } else {
        0.0
    }
}

/// Advance the entities by one frame of `dt` seconds
///
/// `level` only affects the launch speed of a respawned ball.
pub fn tick(
    entities: &mut Entities,
    input: &TickInput,
    dt: f32,
    level: u32,
    tuning: &Tuning,
    rng: &mut Pcg32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let dt = sanitize_dt(dt);
    if dt == 0.0 {
        return events;
    }

    let playfield = entities.playfield;

    // Paddle: both intents applied in sequence, so left+right cancels out
    let paddle = &mut entities.paddle;
    if input.move_left {
        paddle.x -= paddle.speed * dt;
    }
    if input.move_right {
        paddle.x += paddle.speed * dt;
    }
    paddle.clamp_to(&playfield);

    // Ball
    let ball = &mut entities.ball;
    ball.pos += ball.vel * dt;

    // Walls (bottom is open)
    let r = ball.radius;
    if ball.pos.x - r < 0.0 {
        ball.pos.x = r;
        if ball.vel.x < 0.0 {
            ball.vel = reflect(ball.vel, Axis::X);
        }
    } else if ball.pos.x + r > playfield.width {
        ball.pos.x = playfield.width - r;
        if ball.vel.x > 0.0 {
            ball.vel = reflect(ball.vel, Axis::X);
        }
    }
    if ball.pos.y - r < 0.0 {
        ball.pos.y = r;
        if ball.vel.y < 0.0 {
            ball.vel = reflect(ball.vel, Axis::Y);
        }
    }

    // Paddle bounce: the only place the ball speeds up
    let paddle = &entities.paddle;
    if ball.vel.y > 0.0 {
        let bottom = ball.pos.y + r;
        let in_band = bottom >= paddle.y && bottom <= paddle.y + paddle.height + PADDLE_CATCH_BAND;
        let in_span = ball.pos.x >= paddle.x - r && ball.pos.x <= paddle.x + paddle.width + r;
        if in_band && in_span {
            ball.pos.y = paddle.y - r - BALL_PADDLE_CLEARANCE;

            let half = paddle.width / 2.0;
            let offset = ((ball.pos.x - paddle.center_x()) / half).clamp(-1.0, 1.0);
            let speed = ball.speed() * tuning.bounce_speedup;
            let angle = offset * -tuning.max_bounce_angle();
            ball.vel.x = speed * angle.sin();
            ball.vel.y = -(speed * angle.cos()).abs();
        }
    }

    // Bricks: first hit in scan order only
    for (index, brick) in entities.bricks.iter_mut().enumerate() {
        if !brick.alive {
            continue;
        }
        let hit = circle_rect_collision(ball.pos, r, &brick.rect);
        if !hit.hit {
            continue;
        }

        ball.vel = reflect(ball.vel, hit.axis);
        brick.hp = brick.hp.saturating_sub(1);
        if brick.hp == 0 {
            brick.alive = false;
            events.push(GameEvent::BrickDestroyed { index });
        }
        break;
    }

    // Out of bounds
    if ball.pos.y - r > playfield.height {
        let angle = launch_angle(rng, tuning);
        ball.reseed(paddle, tuning.base_speed(level), angle);
        events.push(GameEvent::BallLost);
    }

    if entities.all_bricks_dead() {
        events.push(GameEvent::StageCleared);
    }

    events
}
