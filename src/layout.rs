//! Standard roster
//!
//! Player centered near the bottom, a row of bricks above it and an 11x5
//! formation near the top. Coordinates are y-up with origins at the
//! top-left corner of each body.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;
use crate::settings::SimConfig;
use crate::sim::{Body, World};

/// Left offset that centers `width` inside `total_width`
#[inline]
pub fn margin_for_center(total_width: f32, width: f32) -> f32 {
    (total_width - width) / 2.0
}

/// Roster shape. Sizes come from `consts`; everything here is spacing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Layout {
    pub columns: usize,
    pub rows: usize,
    /// Gap between neighbouring columns
    pub enemy_gap_x: f32,
    /// Gap between neighbouring rows
    pub enemy_gap_y: f32,
    /// Distance from the container top down to the front row's top edge
    pub formation_drop: f32,

    pub bricks: usize,
    pub brick_gap: f32,
    /// Top edge of the brick row
    pub brick_y: f32,
    /// Initial brick health in (0, 1]
    pub brick_health: f64,

    /// Top edge of the player
    pub player_y: f32,
}

impl Default for Layout {
    fn default() -> Self {
        let (_, enemy_h) = ENEMY_SIZE;
        let (_, brick_h) = BRICK_SIZE;
        let (_, player_h) = PLAYER_SIZE;
        Self {
            columns: 11,
            rows: 5,
            enemy_gap_x: 15.0,
            enemy_gap_y: 25.0,
            // 100 of headroom plus four rows and three gaps
            formation_drop: 100.0 + 4.0 * enemy_h + 3.0 * 15.0,

            bricks: 4,
            brick_gap: 100.0,
            brick_y: 125.0 + brick_h,
            brick_health: 1.0,

            player_y: 25.0 + player_h,
        }
    }
}

impl Layout {
    /// Populate a fresh world for `config`
    pub fn build(&self, config: &SimConfig) -> Result<World, SetupError> {
        let mut world = World::new();
        let width = config.container_width;

        // === Player ===
        let (pw, ph) = PLAYER_SIZE;
        let player = Body::new(
            Vec2::new(margin_for_center(width, pw), self.player_y),
            pw,
            ph,
            PLAYER_DEPTH,
        );
        world.set_player(player)?;

        // === Formation ===
        let (ew, eh) = ENEMY_SIZE;
        let span =
            self.columns as f32 * ew + self.columns.saturating_sub(1) as f32 * self.enemy_gap_x;
        let x0 = margin_for_center(width, span);
        let y0 = config.container_height - self.formation_drop;
        let stacks: Vec<Vec<Body>> = (0..self.columns)
            .map(|i| {
                let x = x0 + i as f32 * (ew + self.enemy_gap_x);
                (0..self.rows)
                    .map(|j| {
                        let y = y0 + j as f32 * (eh + self.enemy_gap_y);
                        Body::new(Vec2::new(x, y), ew, eh, PLAYER_DEPTH)
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        world.set_formation(stacks)?;

        // === Bricks ===
        let (bw, bh) = BRICK_SIZE;
        let span = self.bricks as f32 * bw + self.bricks.saturating_sub(1) as f32 * self.brick_gap;
        let bx0 = margin_for_center(width, span);
        for i in 0..self.bricks {
            let x = bx0 + i as f32 * (bw + self.brick_gap);
            let body = Body::new(Vec2::new(x, self.brick_y), bw, bh, BACKGROUND_DEPTH);
            world.add_brick(body, self.brick_health)?;
        }

        log::debug!(
            "Built world: {} enemies in {} columns, {} bricks",
            world.formation().enemy_count(),
            self.columns,
            world.bricks().len()
        );
        Ok(world)
    }
}

/// The default roster for `config`
pub fn standard_world(config: &SimConfig) -> Result<World, SetupError> {
    Layout::default().build(config)
}
