//! Simulation tuning
//!
//! Speeds, margins and balance values. Loaded from JSON or built from
//! defaults, and validated once before any world is created.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SetupError;

/// Tuning for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Viewport ===
    /// Container width (world units)
    pub container_width: f32,
    /// Container height (world units)
    pub container_height: f32,
    /// Horizontal margin kept free on each side
    pub margin: f32,

    // === Speeds (units per millisecond) ===
    pub enemy_speed: f32,
    pub player_speed: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    /// Formation drop per descend frame
    pub descend_step: f32,

    // === Rules ===
    /// Health removed from a brick per absorbed hit
    pub brick_damage: f64,
    /// Brick breaks once health is at or below this value
    pub brick_destroy_threshold: f64,
    /// Milliseconds between enemy shots (0 disables enemy fire)
    pub enemy_fire_interval_ms: f32,
    /// Points per destroyed enemy
    pub enemy_hit_points: u64,
    /// Seed for the enemy shooter RNG
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            container_width: CONTAINER_WIDTH,
            container_height: CONTAINER_HEIGHT,
            margin: MARGIN,

            enemy_speed: ENEMY_SPEED,
            player_speed: PLAYER_SPEED,
            player_projectile_speed: PROJECTILE_SPEED,
            enemy_projectile_speed: PROJECTILE_SPEED,
            descend_step: DESCEND_STEP,

            brick_damage: BRICK_DAMAGE,
            brick_destroy_threshold: BRICK_DESTROY_THRESHOLD,
            enemy_fire_interval_ms: ENEMY_FIRE_INTERVAL_MS,
            enemy_hit_points: ENEMY_HIT_POINTS,
            seed: 0,
        }
    }
}

impl SimConfig {
    /// Defaults with a custom margin (the shipped game plays with 25)
    pub fn with_margin(margin: f32) -> Self {
        Self {
            margin,
            ..Self::default()
        }
    }

    /// Parse from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, SetupError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::info!(
            "Loaded simulation config ({}x{}, margin {})",
            config.container_width,
            config.container_height,
            config.margin
        );
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String, SetupError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the frame loop cannot work with
    pub fn validate(&self) -> Result<(), SetupError> {
        let positive = [
            ("container_width", self.container_width),
            ("container_height", self.container_height),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(field, value as f64, "must be finite and positive"));
            }
        }

        let non_negative = [
            ("margin", self.margin),
            ("enemy_speed", self.enemy_speed),
            ("player_speed", self.player_speed),
            ("player_projectile_speed", self.player_projectile_speed),
            ("enemy_projectile_speed", self.enemy_projectile_speed),
            ("descend_step", self.descend_step),
            ("enemy_fire_interval_ms", self.enemy_fire_interval_ms),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(field, value as f64, "must be finite and non-negative"));
            }
        }

        if self.margin * 2.0 >= self.container_width {
            return Err(invalid(
                "margin",
                self.margin as f64,
                "leaves no room inside the container",
            ));
        }
        if !self.brick_damage.is_finite() || self.brick_damage <= 0.0 {
            return Err(invalid("brick_damage", self.brick_damage, "must be finite and positive"));
        }
        if !(0.0..1.0).contains(&self.brick_destroy_threshold) {
            return Err(invalid(
                "brick_destroy_threshold",
                self.brick_destroy_threshold,
                "must lie in [0, 1)",
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> SetupError {
    SetupError::InvalidConfig {
        field,
        value,
        reason,
    }
}
