//! Simulation core
//!
//! Everything that happens inside a frame lives here:
//! - Entity model and the `World` aggregate
//! - Movement engine and the formation sweep state machine
//! - Collision detection (report only) and event dispatch
//!
//! No rendering or platform dependencies.

pub mod collision;
pub mod entity;
pub mod events;
pub mod formation;
pub mod movement;
pub mod sweep;
pub mod world;

pub use collision::{Hit, overlaps, scan_projectile};
pub use entity::{Body, Brick, Enemy, EntityId, Intent, Owner, Player, Projectile};
pub use events::{Callbacks, EventSink, FrameContext, SimEvent, dispatch_collisions};
pub use formation::{Column, Extent, Formation};
pub use movement::{advance_enemies, advance_player, advance_projectiles};
pub use sweep::{Sweep, SweepDirection, next_direction};
pub use world::{Sprite, SpriteKind, World};
