//! Collision detection with ownership-aware routing
//!
//! Pure queries over the world: a projectile is tested against the targets
//! its owner may hit, in a fixed priority order, and the first overlap is
//! reported. Nothing here mutates state.

use super::entity::{Body, EntityId, Owner, Projectile};
use super::world::World;

/// First target a projectile overlaps this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// Front enemy of `column`
    Enemy { enemy: EntityId, column: usize },
    Player { player: EntityId },
    Brick { brick: EntityId },
}

/// Axis-aligned overlap with inclusive edges: touching counts
#[inline]
pub fn overlaps(a: &Body, b: &Body) -> bool {
    if a.left() > b.right() || b.left() > a.right() {
        return false;
    }
    if a.top() < b.bottom() || b.top() < a.bottom() {
        return false;
    }
    true
}

/// Route a projectile by owner and report the first overlap
///
/// - Player shots: front line of the formation in column order, then bricks
/// - Enemy shots: the player, then bricks
/// - Unassigned shots never hit anything
pub fn scan_projectile(world: &World, projectile: &Projectile) -> Option<Hit> {
    match projectile.owner {
        Owner::Player => front_line_hit(world, &projectile.body)
            .or_else(|| brick_hit(world, &projectile.body)),
        Owner::Enemy => {
            player_hit(world, &projectile.body).or_else(|| brick_hit(world, &projectile.body))
        }
        Owner::Unassigned => None,
    }
}

fn front_line_hit(world: &World, shot: &Body) -> Option<Hit> {
    world
        .formation()
        .front_line()
        .find(|(_, enemy)| overlaps(shot, &enemy.body))
        .map(|(column, enemy)| Hit::Enemy {
            enemy: enemy.id,
            column,
        })
}

fn player_hit(world: &World, shot: &Body) -> Option<Hit> {
    world
        .player()
        .filter(|player| overlaps(shot, &player.body))
        .map(|player| Hit::Player { player: player.id })
}

fn brick_hit(world: &World, shot: &Body) -> Option<Hit> {
    world
        .bricks()
        .iter()
        .find(|brick| overlaps(shot, &brick.body))
        .map(|brick| Hit::Brick { brick: brick.id })
}
