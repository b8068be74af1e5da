//! The entity aggregate
//!
//! `World` owns the four live collections (player, formation, projectiles,
//! bricks). Engines mutate positions; the game-rules collaborator changes
//! membership through the removal methods, all of which tolerate being
//! called twice for the same entity.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Body, Brick, Enemy, EntityId, Intent, Owner, Player, Projectile};
use super::formation::Formation;
use crate::error::SetupError;

/// What a sprite depicts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    Enemy,
    Brick,
    Projectile(Owner),
}

/// One visual entity handed to the render surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub id: EntityId,
    pub kind: SpriteKind,
    pub origin: Vec2,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Opacity; bricks fade with remaining health
    pub alpha: f32,
}

impl Sprite {
    fn from_body(id: EntityId, kind: SpriteKind, body: &Body, alpha: f32) -> Self {
        Self {
            id,
            kind,
            origin: body.origin,
            width: body.width,
            height: body.height,
            depth: body.depth,
            alpha,
        }
    }
}

/// Live entity collections for one match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    player: Option<Player>,
    formation: Formation,
    projectiles: Vec<Projectile>,
    bricks: Vec<Brick>,
    next_id: EntityId,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self {
            player: None,
            formation: Formation::default(),
            projectiles: Vec::new(),
            bricks: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    // === Seeding ===

    /// Place the player (replacing any existing one)
    pub fn set_player(&mut self, body: Body) -> Result<EntityId, SetupError> {
        body.validate("player")?;
        let id = self.next_entity_id();
        self.player = Some(Player {
            id,
            body,
            intent: Intent::None,
        });
        Ok(id)
    }

    /// Install the formation; `stacks[i][0]` is the front of column `i`
    pub fn set_formation(&mut self, stacks: Vec<Vec<Body>>) -> Result<(), SetupError> {
        for body in stacks.iter().flatten() {
            body.validate("enemy")?;
        }
        let stacks: Vec<Vec<Enemy>> = stacks
            .into_iter()
            .map(|stack| {
                stack
                    .into_iter()
                    .map(|body| Enemy {
                        id: self.next_entity_id(),
                        body,
                    })
                    .collect::<Vec<_>>()
            })
            .collect();
        self.formation = Formation::new(stacks);
        Ok(())
    }

    /// Append a brick with the given health in (0, 1]
    pub fn add_brick(&mut self, body: Body, health: f64) -> Result<EntityId, SetupError> {
        body.validate("brick")?;
        if !(health > 0.0 && health <= 1.0) {
            return Err(SetupError::BrickHealth(health));
        }
        let id = self.next_entity_id();
        self.bricks.push(Brick { id, body, health });
        Ok(id)
    }

    /// Append a projectile to the live collection
    pub fn spawn_projectile(&mut self, body: Body, owner: Owner) -> Result<EntityId, SetupError> {
        body.validate("projectile")?;
        let id = self.next_entity_id();
        self.projectiles.push(Projectile { id, body, owner });
        Ok(id)
    }

    // === Accessors ===

    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    pub fn player_mut(&mut self) -> Option<&mut Player> {
        self.player.as_mut()
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn formation_mut(&mut self) -> &mut Formation {
        &mut self.formation
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut Vec<Projectile> {
        &mut self.projectiles
    }

    pub fn projectile(&self, id: EntityId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    pub fn bricks(&self) -> &[Brick] {
        &self.bricks
    }

    pub fn bricks_mut(&mut self) -> &mut Vec<Brick> {
        &mut self.bricks
    }

    pub fn brick_mut(&mut self, id: EntityId) -> Option<&mut Brick> {
        self.bricks.iter_mut().find(|b| b.id == id)
    }

    // === Removal (idempotent) ===

    /// Remove the player; `None` if already gone
    pub fn take_player(&mut self) -> Option<Player> {
        self.player.take()
    }

    pub fn remove_enemy(&mut self, column: usize, id: EntityId) -> Option<Enemy> {
        self.formation.remove_enemy(column, id)
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> Option<Projectile> {
        let pos = self.projectiles.iter().position(|p| p.id == id)?;
        Some(self.projectiles.remove(pos))
    }

    pub fn remove_brick(&mut self, id: EntityId) -> Option<Brick> {
        let pos = self.bricks.iter().position(|b| b.id == id)?;
        Some(self.bricks.remove(pos))
    }

    // === Rendering ===

    /// Everything currently drawable, back to front (highest depth first)
    pub fn scene(&self) -> Vec<Sprite> {
        let mut sprites = Vec::with_capacity(
            1 + self.formation.enemy_count() + self.projectiles.len() + self.bricks.len(),
        );
        sprites.extend(
            self.bricks
                .iter()
                .map(|b| Sprite::from_body(b.id, SpriteKind::Brick, &b.body, b.health as f32)),
        );
        if let Some(player) = &self.player {
            sprites.push(Sprite::from_body(player.id, SpriteKind::Player, &player.body, 1.0));
        }
        sprites.extend(
            self.formation
                .enemies()
                .map(|e| Sprite::from_body(e.id, SpriteKind::Enemy, &e.body, 1.0)),
        );
        sprites.extend(self.projectiles.iter().map(|p| {
            Sprite::from_body(p.id, SpriteKind::Projectile(p.owner), &p.body, 1.0)
        }));
        sprites.sort_by(|a, b| b.depth.total_cmp(&a.depth));
        sprites
    }
}
