//! Sweep Invaders entry point
//!
//! Native builds run a headless match driven by a scripted pilot, which is
//! handy for soak-testing the frame loop. Pass a JSON tuning file as the
//! first argument to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use sweep_invaders::animator::{HeadlessSurface, ManualScheduler};
    use sweep_invaders::layout::Layout;
    use sweep_invaders::rules::{GameDelegate, Outcome};
    use sweep_invaders::sim::{Intent, World};
    use sweep_invaders::{Game, SetupError, SimConfig};

    /// Roughly 60 Hz
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Give up after ten simulated minutes
    const MAX_FRAMES: u64 = 36_000;
    /// Frames between player shots
    const FIRE_EVERY: u64 = 15;

    /// Logs what a real UI would display
    #[derive(Default)]
    struct LogDelegate;

    impl GameDelegate for LogDelegate {
        fn score_changed(&mut self, score: u64) {
            log::debug!("Score: {}", score);
        }

        fn game_over(&mut self, outcome: Outcome) {
            log::info!("Game over: {:?}", outcome);
        }
    }

    /// Steer under the nearest front-line enemy
    fn pilot(world: &World) -> Intent {
        let Some(player) = world.player() else {
            return Intent::None;
        };
        let x = player.body.center().x;
        let target = world
            .formation()
            .front_line()
            .map(|(_, enemy)| enemy.body.center().x)
            .min_by(|a, b| (a - x).abs().total_cmp(&(b - x).abs()));
        match target {
            Some(tx) if tx > x + 5.0 => Intent::Right,
            Some(tx) if tx < x - 5.0 => Intent::Left,
            _ => Intent::None,
        }
    }

    fn load_config() -> Result<SimConfig, SetupError> {
        match std::env::args().nth(1) {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| SetupError::Parse(format!("{}: {}", path, e)))?;
                SimConfig::from_json(&json)
            }
            None => Ok(SimConfig::with_margin(25.0)),
        }
    }

    pub fn run() -> Result<(), SetupError> {
        let config = load_config()?;
        let mut game = Game::new(
            config,
            Layout::default(),
            HeadlessSurface::default(),
            LogDelegate,
        )?;
        let mut scheduler = ManualScheduler::new();

        let mut now = 0.0;
        let mut frames = 0u64;
        game.start(now, &mut scheduler);

        while game.is_running() && frames < MAX_FRAMES {
            let intent = pilot(game.world());
            game.set_intent(intent);
            if frames % FIRE_EVERY == 0 {
                game.fire();
            }

            now += FRAME_MS;
            for handle in scheduler.take_pending() {
                game.frame(handle, now, &mut scheduler);
            }
            frames += 1;
        }
        game.stop(&mut scheduler);

        match game.outcome() {
            Some(outcome) => log::info!(
                "{:?} after {} frames ({:.1} s), score {}",
                outcome,
                frames,
                now / 1000.0,
                game.score()
            ),
            None => log::warn!(
                "No result after {} frames, {} enemies left, score {}",
                frames,
                game.world().formation().enemy_count(),
                game.score()
            ),
        }
        println!("score: {}", game.score());
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sweep Invaders (headless) starting...");

    if let Err(err) = headless::run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser embedder drives `Game` directly
}
