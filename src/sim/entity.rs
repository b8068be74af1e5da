//! Entity model
//!
//! Every simulated object is a [`Body`]: a top-left origin in a y-up world,
//! a size and a render depth. A body spans
//! `[origin.x, origin.x + width] x [origin.y - height, origin.y]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::SetupError;

/// Stable identifier assigned when an entity enters the world
pub type EntityId = u32;

/// Positional/geometric state shared by everything that moves or draws
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// Top-left corner (y grows upward)
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    /// Layering only, never used by physics
    pub depth: f32,
}

impl Body {
    pub fn new(origin: Vec2, width: f32, height: f32, depth: f32) -> Self {
        Self {
            origin,
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.origin.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y - self.height
    }

    /// Geometric center
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.origin.x + self.width / 2.0, self.origin.y - self.height / 2.0)
    }

    /// Fail fast on geometry that would poison the movement math
    pub fn validate(&self, entity: &'static str) -> Result<(), SetupError> {
        let finite = self.origin.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.depth.is_finite();
        if !finite {
            return Err(SetupError::NonFiniteGeometry {
                entity,
                x: self.origin.x,
                y: self.origin.y,
                width: self.width,
                height: self.height,
            });
        }
        if self.width < 0.0 || self.height < 0.0 {
            return Err(SetupError::NegativeSize {
                entity,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Owner {
    /// Travels upward, hits enemies and bricks
    Player,
    /// Travels downward, hits the player and bricks
    Enemy,
    /// Owner never set; inert (no movement, no collisions)
    #[default]
    Unassigned,
}

/// A shot in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    pub body: Body,
    pub owner: Owner,
}

/// A formation member
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: EntityId,
    pub body: Body,
}

/// A defensive brick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub id: EntityId,
    pub body: Body,
    /// Remaining health in (0, 1]; also drives render alpha
    pub health: f64,
}

impl Brick {
    /// Absorb one hit. Returns true once the brick is at or below `threshold`.
    pub fn absorb(&mut self, damage: f64, threshold: f64) -> bool {
        self.health -= damage;
        self.health <= threshold
    }
}

/// Player movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Intent {
    Left,
    Right,
    #[default]
    None,
}

/// The player's ship
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: EntityId,
    pub body: Body,
    pub intent: Intent,
}
