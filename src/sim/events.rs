//! Event dispatch protocol
//!
//! The simulation reports what happened; the game-rules collaborator decides
//! what it means. Every channel receives the world explicitly through a
//! [`FrameContext`], so a handler never needs hidden access to the animator.

use serde::{Deserialize, Serialize};

use super::collision::{Hit, scan_projectile};
use super::entity::{Brick, Enemy, EntityId, Player, Projectile};
use super::world::World;

/// Mutable view handed to every channel
pub struct FrameContext<'a> {
    pub world: &'a mut World,
    halted: bool,
}

impl<'a> FrameContext<'a> {
    pub fn new(world: &'a mut World) -> Self {
        Self {
            world,
            halted: false,
        }
    }

    /// Ask the loop to stop after this frame (loss or victory)
    pub fn halt(&mut self) {
        self.halted = true;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }
}

/// Outward notification channels
///
/// Channels run synchronously; whatever they change is visible before the
/// next frame moves anything.
pub trait EventSink {
    /// Front enemy of `column` was hit
    fn enemy_hit(&mut self, ctx: &mut FrameContext<'_>, enemy: Enemy, column: usize);
    /// The player was hit
    fn player_hit(&mut self, ctx: &mut FrameContext<'_>, player: Player);
    /// A brick absorbed a shot
    fn brick_hit(&mut self, ctx: &mut FrameContext<'_>, brick: Brick);
    /// A projectile hit something and must leave the live collection
    fn projectile_resolved(&mut self, ctx: &mut FrameContext<'_>, projectile: Projectile);
    /// Once per frame: lowest front-member y, `None` for a cleared formation
    fn formation_lowest_y(&mut self, ctx: &mut FrameContext<'_>, lowest_y: Option<f32>);
}

type EnemyHitFn<'a> = Box<dyn FnMut(&mut FrameContext<'_>, Enemy, usize) + 'a>;
type PlayerHitFn<'a> = Box<dyn FnMut(&mut FrameContext<'_>, Player) + 'a>;
type BrickHitFn<'a> = Box<dyn FnMut(&mut FrameContext<'_>, Brick) + 'a>;
type ProjectileFn<'a> = Box<dyn FnMut(&mut FrameContext<'_>, Projectile) + 'a>;
type LowestYFn<'a> = Box<dyn FnMut(&mut FrameContext<'_>, Option<f32>) + 'a>;

/// Channel bindings supplied as one record; unbound channels do nothing
pub struct Callbacks<'a> {
    pub enemy_hit: EnemyHitFn<'a>,
    pub player_hit: PlayerHitFn<'a>,
    pub brick_hit: BrickHitFn<'a>,
    pub projectile_resolved: ProjectileFn<'a>,
    pub formation_lowest_y: LowestYFn<'a>,
}

impl Default for Callbacks<'_> {
    fn default() -> Self {
        Self {
            enemy_hit: Box::new(|_: &mut FrameContext<'_>, _: Enemy, _: usize| {}),
            player_hit: Box::new(|_: &mut FrameContext<'_>, _: Player| {}),
            brick_hit: Box::new(|_: &mut FrameContext<'_>, _: Brick| {}),
            projectile_resolved: Box::new(|_: &mut FrameContext<'_>, _: Projectile| {}),
            formation_lowest_y: Box::new(|_: &mut FrameContext<'_>, _: Option<f32>| {}),
        }
    }
}

impl EventSink for Callbacks<'_> {
    fn enemy_hit(&mut self, ctx: &mut FrameContext<'_>, enemy: Enemy, column: usize) {
        (self.enemy_hit)(ctx, enemy, column)
    }

    fn player_hit(&mut self, ctx: &mut FrameContext<'_>, player: Player) {
        (self.player_hit)(ctx, player)
    }

    fn brick_hit(&mut self, ctx: &mut FrameContext<'_>, brick: Brick) {
        (self.brick_hit)(ctx, brick)
    }

    fn projectile_resolved(&mut self, ctx: &mut FrameContext<'_>, projectile: Projectile) {
        (self.projectile_resolved)(ctx, projectile)
    }

    fn formation_lowest_y(&mut self, ctx: &mut FrameContext<'_>, lowest_y: Option<f32>) {
        (self.formation_lowest_y)(ctx, lowest_y)
    }
}

/// A dispatched notification, by id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    EnemyHit { enemy: EntityId, column: usize },
    PlayerHit { player: EntityId },
    BrickHit { brick: EntityId },
    ProjectileResolved { projectile: EntityId },
    FormationLowestY { y: Option<f32> },
}

/// Recording sink: logs every notification, changes nothing
impl EventSink for Vec<SimEvent> {
    fn enemy_hit(&mut self, _ctx: &mut FrameContext<'_>, enemy: Enemy, column: usize) {
        self.push(SimEvent::EnemyHit {
            enemy: enemy.id,
            column,
        });
    }

    fn player_hit(&mut self, _ctx: &mut FrameContext<'_>, player: Player) {
        self.push(SimEvent::PlayerHit { player: player.id });
    }

    fn brick_hit(&mut self, _ctx: &mut FrameContext<'_>, brick: Brick) {
        self.push(SimEvent::BrickHit { brick: brick.id });
    }

    fn projectile_resolved(&mut self, _ctx: &mut FrameContext<'_>, projectile: Projectile) {
        self.push(SimEvent::ProjectileResolved {
            projectile: projectile.id,
        });
    }

    fn formation_lowest_y(&mut self, _ctx: &mut FrameContext<'_>, lowest_y: Option<f32>) {
        self.push(SimEvent::FormationLowestY { y: lowest_y });
    }
}

/// Scan every live projectile and dispatch its hit, if any.
///
/// Iterates a snapshot of projectile ids taken on entry; a projectile removed
/// by an earlier dispatch in the same pass is skipped, and each target is
/// re-read from the world so a promoted front member is the one tested.
/// A halt does not end the pass: every snapshot projectile is still settled.
/// Returns the number of hits.
pub fn dispatch_collisions(ctx: &mut FrameContext<'_>, sink: &mut dyn EventSink) -> usize {
    let snapshot: Vec<EntityId> = ctx.world.projectiles().iter().map(|p| p.id).collect();
    let mut hits = 0;

    for id in snapshot {
        let Some(projectile) = ctx.world.projectile(id).copied() else {
            continue;
        };
        let Some(hit) = scan_projectile(ctx.world, &projectile) else {
            continue;
        };

        match hit {
            Hit::Enemy { enemy, column } => {
                let target = ctx
                    .world
                    .formation()
                    .column(column)
                    .and_then(|c| c.front())
                    .filter(|e| e.id == enemy)
                    .copied();
                if let Some(target) = target {
                    log::debug!("Projectile {} hit enemy {} in column {}", id, enemy, column);
                    sink.enemy_hit(ctx, target, column);
                }
            }
            Hit::Player { .. } => {
                if let Some(player) = ctx.world.player().copied() {
                    log::debug!("Projectile {} hit the player", id);
                    sink.player_hit(ctx, player);
                }
            }
            Hit::Brick { brick } => {
                if let Some(target) = ctx.world.bricks().iter().find(|b| b.id == brick).copied() {
                    log::debug!(
                        "Projectile {} hit brick {} (health {:.2})",
                        id,
                        brick,
                        target.health
                    );
                    sink.brick_hit(ctx, target);
                }
            }
        }

        sink.projectile_resolved(ctx, projectile);
        hits += 1;
    }

    hits
}
