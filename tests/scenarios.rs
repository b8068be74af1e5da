//! End-to-end frame scenarios over the public API

use glam::Vec2;
use proptest::prelude::*;

use sweep_invaders::animator::{HeadlessSurface, ManualScheduler};
use sweep_invaders::layout::{Layout, standard_world};
use sweep_invaders::rules::{GameRules, NullDelegate, Outcome};
use sweep_invaders::sim::{
    Body, Brick, Enemy, EventSink, FrameContext, Intent, Owner, Player, Projectile, SimEvent,
    SweepDirection, World, dispatch_collisions,
};
use sweep_invaders::{Animator, Game, SimConfig};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Body {
    Body::new(Vec2::new(x, y), w, h, 0.0)
}

/// Rules plus a count of resolved projectiles
struct Counting {
    rules: GameRules,
    resolved: usize,
}

impl EventSink for Counting {
    fn enemy_hit(&mut self, ctx: &mut FrameContext<'_>, enemy: Enemy, column: usize) {
        self.rules.enemy_hit(ctx, enemy, column);
    }

    fn player_hit(&mut self, ctx: &mut FrameContext<'_>, player: Player) {
        self.rules.player_hit(ctx, player);
    }

    fn brick_hit(&mut self, ctx: &mut FrameContext<'_>, brick: Brick) {
        self.rules.brick_hit(ctx, brick);
    }

    fn projectile_resolved(&mut self, ctx: &mut FrameContext<'_>, projectile: Projectile) {
        self.resolved += 1;
        self.rules.projectile_resolved(ctx, projectile);
    }

    fn formation_lowest_y(&mut self, ctx: &mut FrameContext<'_>, lowest_y: Option<f32>) {
        self.rules.formation_lowest_y(ctx, lowest_y);
    }
}

#[test]
fn standard_formation_descends_at_right_margin() {
    let config = SimConfig::with_margin(25.0);
    let world = standard_world(&config).unwrap();
    let mut animator = Animator::new(config, world, HeadlessSurface::default()).unwrap();
    let mut events: Vec<SimEvent> = Vec::new();

    let mut previous_max = 0.0;
    for _ in 0..100 {
        let report = animator.advance(16.0, &mut events);
        let max_x = animator.world().formation().horizontal_extent().unwrap().max_x;
        if report.sweep == SweepDirection::Descend {
            assert!(max_x >= 775.0);
            assert!(previous_max < 775.0);
            // The drop happens on the next frame
            let y = animator.world().formation().lowest_y().unwrap();
            animator.advance(16.0, &mut events);
            assert_eq!(animator.world().formation().lowest_y(), Some(y - 10.0));
            assert_eq!(animator.sweep().direction, SweepDirection::Left);
            return;
        }
        previous_max = max_x;
    }
    panic!("formation never reached the right margin");
}

#[test]
fn brick_breaks_on_tenth_absorbed_shot() {
    let mut world = World::new();
    let brick = world.add_brick(rect(50.0, 205.0, 100.0, 80.0), 1.0).unwrap();
    let mut sink = Counting {
        rules: GameRules::new(&SimConfig::default(), NullDelegate),
        resolved: 0,
    };

    for shot in 1..=10 {
        world.spawn_projectile(rect(60.0, 150.0, 5.0, 20.0), Owner::Enemy).unwrap();
        let mut ctx = FrameContext::new(&mut world);
        assert_eq!(dispatch_collisions(&mut ctx, &mut sink), 1);
        let alive = world.bricks().iter().any(|b| b.id == brick);
        assert_eq!(alive, shot < 10, "after shot {shot}");
    }
    assert_eq!(sink.resolved, 10);
    assert!(world.projectiles().is_empty());

    // Nothing left to absorb the next one
    world.spawn_projectile(rect(60.0, 150.0, 5.0, 20.0), Owner::Enemy).unwrap();
    let mut ctx = FrameContext::new(&mut world);
    assert_eq!(dispatch_collisions(&mut ctx, &mut sink), 0);
    assert_eq!(world.projectiles().len(), 1);
}

#[test]
fn player_shot_reports_enemy_over_brick() {
    let mut world = World::new();
    world.set_formation(vec![vec![rect(100.0, 300.0, 50.0, 40.0)]]).unwrap();
    world.add_brick(rect(90.0, 310.0, 100.0, 80.0), 1.0).unwrap();
    let shot = world
        .spawn_projectile(rect(110.0, 280.0, 5.0, 20.0), Owner::Player)
        .unwrap();
    let enemy = world.formation().column(0).unwrap().front().unwrap().id;

    let mut events: Vec<SimEvent> = Vec::new();
    let mut ctx = FrameContext::new(&mut world);
    assert_eq!(dispatch_collisions(&mut ctx, &mut events), 1);
    assert_eq!(
        events,
        vec![
            SimEvent::EnemyHit { enemy, column: 0 },
            SimEvent::ProjectileResolved { projectile: shot },
        ]
    );
}

#[test]
fn starting_twice_moves_once_per_frame() {
    let config = SimConfig {
        enemy_fire_interval_ms: 0.0,
        ..SimConfig::with_margin(25.0)
    };
    let mut game = Game::new(
        config,
        Layout::default(),
        HeadlessSurface::default(),
        NullDelegate,
    )
    .unwrap();
    let mut scheduler = ManualScheduler::new();
    game.start(0.0, &mut scheduler);
    game.start(0.0, &mut scheduler);
    assert_eq!(scheduler.pending().len(), 1);

    game.set_intent(Intent::Right);
    for handle in scheduler.take_pending() {
        game.frame(handle, 10.0, &mut scheduler);
    }
    // 0.4 units/ms for 10 ms
    assert_eq!(game.world().player().unwrap().body.origin.x, 379.0);
    assert_eq!(game.animator().frame_count(), 1);
}

#[test]
fn formation_reaching_player_row_loses() {
    let config = SimConfig {
        enemy_fire_interval_ms: 0.0,
        ..SimConfig::with_margin(25.0)
    };
    let layout = Layout {
        // Front row starts one descend above the player
        formation_drop: 600.0 - 75.0,
        ..Layout::default()
    };
    let mut game = Game::new(config, layout, HeadlessSurface::default(), NullDelegate).unwrap();
    let mut scheduler = ManualScheduler::new();
    game.start(0.0, &mut scheduler);

    let mut t = 0.0;
    while game.is_running() && t < 10_000.0 {
        t += 16.0;
        for handle in scheduler.take_pending() {
            game.frame(handle, t, &mut scheduler);
        }
    }
    assert_eq!(game.outcome(), Some(Outcome::Defeat));
    assert!(game.world().player().is_none());
    assert!(scheduler.pending().is_empty());
}

fn arb_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![Just(Intent::Left), Just(Intent::Right), Just(Intent::None)]
}

proptest! {
    #[test]
    fn player_stays_inside_margins(
        steps in prop::collection::vec((arb_intent(), 0.0f32..200.0), 1..200),
        margin in 0.0f32..100.0,
    ) {
        let config = SimConfig {
            enemy_fire_interval_ms: 0.0,
            ..SimConfig::with_margin(margin)
        };
        let layout = Layout { columns: 0, bricks: 0, ..Layout::default() };
        let mut game = Game::new(config, layout, HeadlessSurface::default(), NullDelegate).unwrap();
        for (intent, dt) in steps {
            game.set_intent(intent);
            game.step(dt);
            let body = game.world().player().unwrap().body;
            prop_assert!(body.origin.x >= margin);
            prop_assert!(body.origin.x <= 800.0 - margin - body.width);
        }
    }
}
