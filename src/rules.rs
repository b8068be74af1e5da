//! Game rules
//!
//! The collaborator on the other side of the event channels: it owns the
//! score, decides when bricks break and when the match is over, and spawns
//! projectiles for fire intents and the enemy fire timer.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_ENEMY_SHOTS_PER_FRAME, PROJECTILE_DEPTH, PROJECTILE_SIZE};
use crate::settings::SimConfig;
use crate::sim::{
    Body, Brick, Enemy, EntityId, EventSink, FrameContext, Owner, Player, Projectile, World,
};

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every enemy destroyed
    Victory,
    /// Player hit, or the formation reached the player's row
    Defeat,
}

/// UI-facing notifications (score display, game-over banner)
pub trait GameDelegate {
    fn score_changed(&mut self, _score: u64) {}
    fn game_over(&mut self, _outcome: Outcome) {}
}

/// Delegate that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullDelegate;

impl GameDelegate for NullDelegate {}

/// Score, outcome and enemy fire for one match
pub struct GameRules<D: GameDelegate = NullDelegate> {
    brick_damage: f64,
    brick_destroy_threshold: f64,
    enemy_hit_points: u64,
    enemy_fire_interval_ms: f32,
    seed: u64,

    score: u64,
    outcome: Option<Outcome>,
    /// Simulated time since the last enemy shot
    fire_timer_ms: f32,
    rng: Pcg32,
    delegate: D,
}

impl<D: GameDelegate> GameRules<D> {
    pub fn new(config: &SimConfig, delegate: D) -> Self {
        Self {
            brick_damage: config.brick_damage,
            brick_destroy_threshold: config.brick_destroy_threshold,
            enemy_hit_points: config.enemy_hit_points,
            enemy_fire_interval_ms: config.enemy_fire_interval_ms,
            seed: config.seed,
            score: 0,
            outcome: None,
            fire_timer_ms: 0.0,
            rng: Pcg32::seed_from_u64(config.seed),
            delegate,
        }
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn delegate(&self) -> &D {
        &self.delegate
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        &mut self.delegate
    }

    /// Back to a fresh match (score notifies the delegate)
    pub fn reset(&mut self) {
        self.outcome = None;
        self.fire_timer_ms = 0.0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.set_score(0);
    }

    fn set_score(&mut self, score: u64) {
        self.score = score;
        self.delegate.score_changed(score);
    }

    fn finish(&mut self, ctx: &mut FrameContext<'_>, outcome: Outcome) {
        ctx.halt();
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        log::info!("Game over: {:?} with {} points", outcome, self.score);
        self.delegate.game_over(outcome);
    }

    /// Spawn a projectile for `owner`.
    ///
    /// Player shots leave from the ship's center; enemy shots from the front
    /// member of a random non-empty column. Returns `None` when there is no
    /// shooter or the match is over.
    pub fn fire(&mut self, owner: Owner, world: &mut World) -> Option<EntityId> {
        if self.is_over() {
            return None;
        }
        let from = match owner {
            Owner::Player => world.player()?.body.center(),
            Owner::Enemy => {
                let fronts: Vec<&Enemy> =
                    world.formation().front_line().map(|(_, e)| e).collect();
                if fronts.is_empty() {
                    return None;
                }
                let pick = self.rng.random_range(0..fronts.len());
                fronts[pick].body.center()
            }
            Owner::Unassigned => return None,
        };

        let (w, h) = PROJECTILE_SIZE;
        match world.spawn_projectile(Body::new(from, w, h, PROJECTILE_DEPTH), owner) {
            Ok(id) => Some(id),
            Err(err) => {
                log::warn!("Dropped {:?} shot: {}", owner, err);
                None
            }
        }
    }

    /// Run the enemy fire timer for `dt_ms` of simulated time.
    /// Returns the number of shots fired, at most `MAX_ENEMY_SHOTS_PER_FRAME`.
    pub fn update_enemy_fire(&mut self, world: &mut World, dt_ms: f32) -> usize {
        let interval = self.enemy_fire_interval_ms;
        if interval <= 0.0 || self.is_over() || !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0;
        }
        self.fire_timer_ms += dt_ms;
        let mut shots = 0;
        let mut fired = 0;
        while self.fire_timer_ms >= interval && shots < MAX_ENEMY_SHOTS_PER_FRAME {
            self.fire_timer_ms -= interval;
            shots += 1;
            if self.fire(Owner::Enemy, world).is_some() {
                fired += 1;
            }
        }
        if self.fire_timer_ms >= interval {
            log::debug!("Dropping {:.0} ms of enemy fire backlog", self.fire_timer_ms);
            self.fire_timer_ms %= interval;
        }
        fired
    }
}

impl<D: GameDelegate> EventSink for GameRules<D> {
    fn enemy_hit(&mut self, ctx: &mut FrameContext<'_>, enemy: Enemy, column: usize) {
        if ctx.world.remove_enemy(column, enemy.id).is_none() {
            return;
        }
        self.set_score(self.score + self.enemy_hit_points);
        if ctx.world.formation().is_cleared() {
            log::info!("Formation cleared");
            self.finish(ctx, Outcome::Victory);
        }
    }

    fn player_hit(&mut self, ctx: &mut FrameContext<'_>, player: Player) {
        ctx.world.take_player();
        log::info!("Player {} destroyed", player.id);
        self.finish(ctx, Outcome::Defeat);
    }

    fn brick_hit(&mut self, ctx: &mut FrameContext<'_>, brick: Brick) {
        let Some(live) = ctx.world.brick_mut(brick.id) else {
            return;
        };
        if live.absorb(self.brick_damage, self.brick_destroy_threshold) {
            ctx.world.remove_brick(brick.id);
            log::debug!("Brick {} destroyed", brick.id);
        }
    }

    fn projectile_resolved(&mut self, ctx: &mut FrameContext<'_>, projectile: Projectile) {
        ctx.world.remove_projectile(projectile.id);
    }

    fn formation_lowest_y(&mut self, ctx: &mut FrameContext<'_>, lowest_y: Option<f32>) {
        let (Some(y), Some(player)) = (lowest_y, ctx.world.player()) else {
            return;
        };
        if y <= player.body.origin.y {
            log::info!("Formation reached the player (y {:.1})", y);
            ctx.world.take_player();
            self.finish(ctx, Outcome::Defeat);
        }
    }
}
