//! Movement engine
//!
//! Advances origins in place from an elapsed-time delta (milliseconds).
//! Never allocates, never removes.

use super::entity::{Intent, Owner, Player, Projectile};
use super::formation::Formation;
use super::sweep::Sweep;
use crate::settings::SimConfig;

/// Move the player along its intent. A step that would leave
/// `[margin, container_width - margin - width]` is rejected, not clamped.
pub fn advance_player(player: &mut Player, config: &SimConfig, dt_ms: f32) {
    let sign = match player.intent {
        Intent::Right => 1.0,
        Intent::Left => -1.0,
        Intent::None => return,
    };
    let new_x = player.body.origin.x + sign * config.player_speed * dt_ms;
    let max_x = config.container_width - config.margin - player.body.width;
    if new_x >= config.margin && new_x <= max_x {
        player.body.origin.x = new_x;
    }
}

/// Shift every enemy of every stack by the sweep's per-frame offset
pub fn advance_enemies(formation: &mut Formation, sweep: &Sweep, dt_ms: f32) {
    let offset = sweep.frame_offset(dt_ms);
    for enemy in formation.enemies_mut() {
        enemy.body.origin += offset;
    }
}

/// Player shots climb, enemy shots fall, unassigned shots stay put.
/// Off-screen cleanup is not done here.
pub fn advance_projectiles(projectiles: &mut [Projectile], config: &SimConfig, dt_ms: f32) {
    for projectile in projectiles {
        match projectile.owner {
            Owner::Player => projectile.body.origin.y += config.player_projectile_speed * dt_ms,
            Owner::Enemy => projectile.body.origin.y -= config.enemy_projectile_speed * dt_ms,
            Owner::Unassigned => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Body, Enemy};
    use crate::sim::sweep::SweepDirection;
    use glam::Vec2;

    fn player_at(x: f32, intent: Intent) -> Player {
        Player {
            id: 1,
            body: Body::new(Vec2::new(x, 65.0), 50.0, 40.0, 0.0),
            intent,
        }
    }

    fn config() -> SimConfig {
        SimConfig::with_margin(25.0)
    }

    #[test]
    fn test_player_moves_with_intent() {
        let mut player = player_at(375.0, Intent::Right);
        advance_player(&mut player, &config(), 10.0);
        assert!((player.body.origin.x - 379.0).abs() < 1e-4);

        player.intent = Intent::Left;
        advance_player(&mut player, &config(), 10.0);
        assert!((player.body.origin.x - 375.0).abs() < 1e-4);

        player.intent = Intent::None;
        advance_player(&mut player, &config(), 10.0);
        assert!((player.body.origin.x - 375.0).abs() < 1e-4);
    }

    #[test]
    fn test_player_rejects_step_past_right_bound() {
        // Bound is 800 - 25 - 50 = 725
        let mut player = player_at(724.0, Intent::Right);
        advance_player(&mut player, &config(), 10.0);
        assert_eq!(player.body.origin.x, 724.0, "not clamped to 725");
    }

    #[test]
    fn test_player_rejects_step_past_left_bound() {
        let mut player = player_at(26.0, Intent::Left);
        advance_player(&mut player, &config(), 10.0);
        assert_eq!(player.body.origin.x, 26.0);
    }

    #[test]
    fn test_player_may_land_exactly_on_bound() {
        let mut player = player_at(721.0, Intent::Right);
        advance_player(&mut player, &config(), 10.0);
        assert_eq!(player.body.origin.x, 725.0);
    }

    #[test]
    fn test_projectiles_by_owner() {
        let config = SimConfig {
            player_projectile_speed: 0.3,
            enemy_projectile_speed: 0.5,
            ..SimConfig::default()
        };
        let body = Body::new(Vec2::new(0.0, 100.0), 5.0, 20.0, -1.0);
        let mut shots = [
            Projectile { id: 1, body, owner: Owner::Player },
            Projectile { id: 2, body, owner: Owner::Enemy },
            Projectile { id: 3, body, owner: Owner::Unassigned },
        ];
        advance_projectiles(&mut shots, &config, 10.0);
        assert!((shots[0].body.origin.y - 103.0).abs() < 1e-4);
        assert!((shots[1].body.origin.y - 95.0).abs() < 1e-4);
        assert_eq!(shots[2].body.origin.y, 100.0);
    }

    #[test]
    fn test_enemies_share_offset() {
        let enemy = |id, x| Enemy {
            id,
            body: Body::new(Vec2::new(x, 300.0), 50.0, 40.0, 0.0),
        };
        let mut formation = Formation::new(vec![
            vec![enemy(1, 0.0), enemy(2, 0.0)],
            vec![enemy(3, 65.0)],
        ]);
        let mut sweep = Sweep::new(0.07, 10.0);
        advance_enemies(&mut formation, &sweep, 100.0);
        let xs: Vec<f32> = formation.enemies().map(|e| e.body.origin.x).collect();
        assert!((xs[0] - 7.0).abs() < 1e-4 && (xs[1] - 7.0).abs() < 1e-4);
        assert!((xs[2] - 72.0).abs() < 1e-4);

        sweep.direction = SweepDirection::Descend;
        advance_enemies(&mut formation, &sweep, 100.0);
        assert!(formation.enemies().all(|e| e.body.origin.y == 290.0));
    }
}
