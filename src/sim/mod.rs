//! Simulation module
//!
//! All gameplay logic lives here. Nothing in this module renders, reads
//! devices or touches the filesystem:
//! - Seeded RNG only
//! - Stable iteration order (bricks scan in grid order)
//! - Time only arrives through `Game::advance_clock` and `Game::step`

pub mod collision;
pub mod game;
pub mod level;
pub mod state;
pub mod tick;
pub mod timers;

pub use collision::{Axis, Rect, RectHit, circle_rect_collision, clamp, reflect};
pub use game::{
    Command, Game, MSG_GAME_OVER, MSG_LIFE_LOST, MSG_PAUSED, MSG_STAGE_CLEAR, Overlay, Progress,
    RunState, Snapshot,
};
pub use level::{LayoutError, build_bricks, reflow_bricks, rows_for_level, validate_layout};
pub use state::{Ball, Brick, Entities, Paddle, Playfield};
pub use tick::{GameEvent, TickInput, sanitize_dt, tick};
pub use timers::{Deferred, DeferredAction, Scheduler};
