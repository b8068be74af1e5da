//! Game session
//!
//! Glue between the frame loop and the rules: builds the roster, forwards
//! each scheduler callback to the animator with the rules as event sink,
//! and runs the enemy fire timer on the same simulated clock.

use crate::animator::{Animator, FrameHandle, FrameReport, FrameScheduler, RenderSurface};
use crate::error::SetupError;
use crate::layout::Layout;
use crate::rules::{GameDelegate, GameRules, NullDelegate, Outcome};
use crate::settings::SimConfig;
use crate::sim::{EntityId, Intent, Owner, World};

/// One match at a time over a render surface
pub struct Game<R: RenderSurface, D: GameDelegate = NullDelegate> {
    animator: Animator<R>,
    rules: GameRules<D>,
    layout: Layout,
}

impl<R: RenderSurface, D: GameDelegate> Game<R, D> {
    /// Validate `config` and build the first roster. The loop is not started.
    pub fn new(
        config: SimConfig,
        layout: Layout,
        surface: R,
        delegate: D,
    ) -> Result<Self, SetupError> {
        config.validate()?;
        let world = layout.build(&config)?;
        let rules = GameRules::new(&config, delegate);
        let animator = Animator::new(config, world, surface)?;
        Ok(Self {
            animator,
            rules,
            layout,
        })
    }

    pub fn animator(&self) -> &Animator<R> {
        &self.animator
    }

    pub fn rules(&self) -> &GameRules<D> {
        &self.rules
    }

    pub fn world(&self) -> &World {
        self.animator.world()
    }

    pub fn score(&self) -> u64 {
        self.rules.score()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.rules.outcome()
    }

    pub fn is_running(&self) -> bool {
        self.animator.is_running()
    }

    pub fn start(&mut self, now: f64, scheduler: &mut dyn FrameScheduler) {
        self.animator.start(now, scheduler);
    }

    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        self.animator.stop(scheduler);
    }

    /// Stop whatever is running, rebuild the roster and start over
    pub fn new_game(
        &mut self,
        now: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Result<(), SetupError> {
        self.animator.stop(scheduler);
        let world = self.layout.build(self.animator.config())?;
        self.animator.reset(world);
        self.rules.reset();
        self.animator.start(now, scheduler);
        log::info!("New game");
        Ok(())
    }

    pub fn set_intent(&mut self, intent: Intent) {
        self.animator.set_intent(intent);
    }

    /// Player fire intent
    pub fn fire(&mut self) -> Option<EntityId> {
        self.rules.fire(Owner::Player, self.animator.world_mut())
    }

    /// Scheduler callback
    pub fn frame(
        &mut self,
        handle: FrameHandle,
        timestamp: f64,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<FrameReport> {
        let report = self.animator.on_frame(handle, timestamp, scheduler, &mut self.rules)?;
        self.after_frame(&report);
        Some(report)
    }

    /// Advance one frame by hand, whether or not the loop is running
    pub fn step(&mut self, delta_ms: f32) -> FrameReport {
        let report = self.animator.advance(delta_ms, &mut self.rules);
        self.after_frame(&report);
        report
    }

    fn after_frame(&mut self, report: &FrameReport) {
        if !report.halted {
            self.rules.update_enemy_fire(self.animator.world_mut(), report.delta_ms);
        }
    }
}
