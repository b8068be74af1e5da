//! Sweep Invaders - frame-driven simulation core for a fixed-viewport shooter
//!
//! Core modules:
//! - `sim`: Entities, movement, sweep state machine, collisions, event dispatch
//! - `animator`: Frame loop lifecycle (start/stop/advance) over a render surface
//! - `rules`: Game-rules collaborator reacting to dispatched events
//! - `layout`: Standard player/formation/brick roster
//! - `game`: Session tying the frame loop to the rules
//! - `settings`: Data-driven tuning (`SimConfig`)

pub mod animator;
pub mod error;
pub mod game;
pub mod layout;
pub mod rules;
pub mod settings;
pub mod sim;

pub use animator::{
    Animator, FrameHandle, FrameScheduler, LoopState, ManualScheduler, RenderSurface,
};
pub use error::SetupError;
pub use game::Game;
pub use rules::{GameDelegate, GameRules};
pub use settings::SimConfig;

/// Game configuration constants
pub mod consts {
    /// Default container (viewport) size in world units
    pub const CONTAINER_WIDTH: f32 = 800.0;
    pub const CONTAINER_HEIGHT: f32 = 600.0;
    /// Margin kept free on both horizontal sides
    pub const MARGIN: f32 = 0.0;

    /// Speeds in world units per millisecond
    pub const ENEMY_SPEED: f32 = 0.07;
    pub const PLAYER_SPEED: f32 = 0.4;
    pub const PROJECTILE_SPEED: f32 = 0.3;

    /// Formation drop per descend frame (not time-scaled)
    pub const DESCEND_STEP: f32 = 10.0;

    /// Brick damage per absorbed hit and the health at which it breaks
    pub const BRICK_DAMAGE: f64 = 0.1;
    pub const BRICK_DESTROY_THRESHOLD: f64 = 0.1;

    /// Enemy fire cadence (milliseconds of simulated time)
    pub const ENEMY_FIRE_INTERVAL_MS: f32 = 1000.0;
    /// Maximum enemy shots per frame; a longer backlog is dropped
    pub const MAX_ENEMY_SHOTS_PER_FRAME: u32 = 2;
    /// Score per destroyed enemy
    pub const ENEMY_HIT_POINTS: u64 = 10_000;

    /// Entity sizes
    pub const PLAYER_SIZE: (f32, f32) = (50.0, 40.0);
    pub const ENEMY_SIZE: (f32, f32) = (50.0, 40.0);
    pub const BRICK_SIZE: (f32, f32) = (100.0, 80.0);
    pub const PROJECTILE_SIZE: (f32, f32) = (5.0, 20.0);

    /// Layering depths (render order only)
    pub const BACKGROUND_DEPTH: f32 = 1.0;
    pub const PLAYER_DEPTH: f32 = 0.0;
    pub const PROJECTILE_DEPTH: f32 = -1.0;
}
