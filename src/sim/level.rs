//! Level grid generation
//!
//! The grid is a pure function of playfield size and level number. Rows grow
//! with the level (capped), columns are fixed.

use std::fmt;

use super::collision::Rect;
use super::state::{Brick, Playfield};
use crate::consts::*;

/// Layout that cannot hold a brick grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutError {
    /// Playfield dimensions are NaN or infinite
    NonFinite { width: f32, height: f32 },
    /// Playfield narrower than the minimum playable width
    TooNarrow { width: f32 },
    /// Computed brick size is zero or negative
    DegenerateBrick { width: f32, height: f32 },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutError::NonFinite { width, height } => {
                write!(f, "playfield size {width}x{height} is not finite")
            }
            LayoutError::TooNarrow { width } => write!(
                f,
                "playfield width {width} is below the playable minimum {MIN_PLAYFIELD_WIDTH}"
            ),
            LayoutError::DegenerateBrick { width, height } => {
                write!(f, "brick size {width}x{height} is not positive")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Number of brick rows for a level (1-based)
pub fn rows_for_level(level: u32) -> u32 {
    BRICK_BASE_ROWS
        .saturating_add(level.saturating_sub(1))
        .min(BRICK_MAX_ROWS)
}

/// Cell and brick sizes for a grid of `rows` rows
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridGeometry {
    rows: u32,
    cell_w: f32,
    row_h: f32,
    brick_w: f32,
    brick_h: f32,
}

fn grid_geometry(playfield: &Playfield, rows: u32) -> Result<GridGeometry, LayoutError> {
    let Playfield { width, height } = *playfield;
    if !width.is_finite() || !height.is_finite() {
        return Err(LayoutError::NonFinite { width, height });
    }
    if width < MIN_PLAYFIELD_WIDTH {
        return Err(LayoutError::TooNarrow { width });
    }

    let cell_w = (width - 2.0 * PLAYFIELD_MARGIN) / BRICK_COLS as f32;
    let row_h = ((height * BRICK_AREA_FRACTION - BRICK_TOP) / rows as f32).min(MAX_ROW_HEIGHT);
    let brick_w = cell_w - BRICK_PADDING;
    let brick_h = row_h - BRICK_PADDING;
    if brick_w <= 0.0 || brick_h <= 0.0 {
        return Err(LayoutError::DegenerateBrick {
            width: brick_w,
            height: brick_h,
        });
    }

    Ok(GridGeometry {
        rows,
        cell_w,
        row_h,
        brick_w,
        brick_h,
    })
}

/// Check that every level, up to the row cap, fits on `playfield`
pub fn validate_layout(playfield: &Playfield) -> Result<(), LayoutError> {
    grid_geometry(playfield, BRICK_MAX_ROWS).map(|_| ())
}

/// Build the brick grid for `level` on `playfield`
///
/// Bricks are laid out row-major starting at the top-left, all with `hp = 1`.
pub fn build_bricks(playfield: &Playfield, level: u32) -> Result<Vec<Brick>, LayoutError> {
    let GridGeometry {
        rows,
        cell_w,
        row_h,
        brick_w,
        brick_h,
    } = grid_geometry(playfield, rows_for_level(level))?;

    let mut bricks = Vec::with_capacity((rows * BRICK_COLS) as usize);
    for row in 0..rows {
        for col in 0..BRICK_COLS {
            let x = PLAYFIELD_MARGIN + col as f32 * cell_w + BRICK_PADDING / 2.0;
            let y = BRICK_TOP + row as f32 * row_h;
            bricks.push(Brick::new(Rect::new(x, y, brick_w, brick_h)));
        }
    }

    log::debug!(
        "Level {} grid: {}x{} bricks of {:.1}x{:.1} on {}x{}",
        level,
        rows,
        BRICK_COLS,
        brick_w,
        brick_h,
        playfield.width,
        playfield.height
    );

    Ok(bricks)
}

/// Rebuild the grid for a new playfield, keeping each brick's damage
///
/// Bricks are matched by index, so this is only meaningful for the same level.
pub fn reflow_bricks(
    playfield: &Playfield,
    level: u32,
    previous: &[Brick],
) -> Result<Vec<Brick>, LayoutError> {
    let mut bricks = build_bricks(playfield, level)?;
    for (brick, old) in bricks.iter_mut().zip(previous) {
        brick.alive = old.alive;
        brick.hp = old.hp;
    }
    Ok(bricks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_grow_with_level_and_cap() {
        assert_eq!(rows_for_level(1), 6);
        assert_eq!(rows_for_level(2), 7);
        assert_eq!(rows_for_level(5), 10);
        assert_eq!(rows_for_level(40), 10);
        // Level 0 is treated like level 1
        assert_eq!(rows_for_level(0), 6);
        assert_eq!(rows_for_level(u32::MAX), 10);
    }

    #[test]
    fn test_grid_shape() {
        let pf = Playfield::new(720.0, 480.0);
        let bricks = build_bricks(&pf, 1).unwrap();
        assert_eq!(bricks.len(), 60);
        assert!(bricks.iter().all(|b| b.alive && b.hp == 1));

        let bricks = build_bricks(&pf, 3).unwrap();
        assert_eq!(bricks.len(), 80);
    }

    #[test]
    fn test_grid_respects_margins() {
        for &(w, h) in &[(320.0, 213.4), (720.0, 480.0), (900.0, 600.0)] {
            let pf = Playfield::new(w, h);
            for level in 1..=12 {
                let bricks = build_bricks(&pf, level).unwrap();
                for b in &bricks {
                    assert!(b.rect.w > 0.0 && b.rect.h > 0.0);
                    assert!(b.rect.x >= PLAYFIELD_MARGIN);
                    assert!(b.rect.right() <= w - PLAYFIELD_MARGIN + 1e-3);
                    assert!(b.rect.bottom() <= h);
                }
            }
        }
    }

    #[test]
    fn test_grid_is_deterministic() {
        let pf = Playfield::new(640.0, 426.0);
        assert_eq!(build_bricks(&pf, 4).unwrap(), build_bricks(&pf, 4).unwrap());
    }

    #[test]
    fn test_rejects_degenerate_layout() {
        let narrow = Playfield {
            width: 100.0,
            height: 480.0,
        };
        assert_eq!(
            build_bricks(&narrow, 1),
            Err(LayoutError::TooNarrow { width: 100.0 })
        );

        let flat = Playfield {
            width: 720.0,
            height: 60.0,
        };
        assert!(matches!(
            build_bricks(&flat, 1),
            Err(LayoutError::DegenerateBrick { .. })
        ));

        let nan = Playfield {
            width: f32::NAN,
            height: 480.0,
        };
        assert!(matches!(
            build_bricks(&nan, 1),
            Err(LayoutError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_validate_layout_checks_tallest_grid() {
        assert!(validate_layout(&Playfield::new(720.0, 480.0)).is_ok());
        assert!(validate_layout(&Playfield::new(320.0, 213.4)).is_ok());

        // Fits six rows but not ten
        let short = Playfield {
            width: 720.0,
            height: 130.0,
        };
        assert!(build_bricks(&short, 1).is_ok());
        assert!(build_bricks(&short, 5).is_err());
        assert!(validate_layout(&short).is_err());
    }

    #[test]
    fn test_reflow_keeps_damage() {
        let pf = Playfield::new(720.0, 480.0);
        let mut bricks = build_bricks(&pf, 1).unwrap();
        bricks[3].alive = false;
        bricks[3].hp = 0;

        let wider = Playfield::new(900.0, 600.0);
        let reflowed = reflow_bricks(&wider, 1, &bricks).unwrap();
        assert_eq!(reflowed.len(), bricks.len());
        assert!(!reflowed[3].alive);
        assert_eq!(reflowed.iter().filter(|b| b.alive).count(), 59);
        assert!(reflowed[0].rect.w > bricks[0].rect.w);
    }
}
