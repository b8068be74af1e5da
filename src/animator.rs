//! Frame loop
//!
//! One `advance` per display-refresh callback, always in this order:
//! player, enemies + sweep, projectiles, redraw, formation-lowest-y,
//! collision dispatch. The loop itself is driven by an external
//! [`FrameScheduler`] (requestAnimationFrame on the web, a manual queue in
//! tests and headless runs).

use serde::{Deserialize, Serialize};

use crate::error::SetupError;
use crate::settings::SimConfig;
use crate::sim::{
    EventSink, FrameContext, Intent, Sprite, Sweep, SweepDirection, World, advance_enemies,
    advance_player, advance_projectiles, dispatch_collisions,
};

/// Opaque drawing target
pub trait RenderSurface {
    /// Redraw everything from scratch (sprites are back to front)
    fn redraw(&mut self, scene: &[Sprite]);
    /// Flush queued drawing work
    fn finish(&mut self) {}
}

/// Surface that draws nothing but remembers what it was asked to draw
#[derive(Debug, Default, Clone)]
pub struct HeadlessSurface {
    pub redraws: u64,
    pub finishes: u64,
    pub last_scene: Vec<Sprite>,
}

impl RenderSurface for HeadlessSurface {
    fn redraw(&mut self, scene: &[Sprite]) {
        self.redraws += 1;
        self.last_scene.clear();
        self.last_scene.extend_from_slice(scene);
    }

    fn finish(&mut self) {
        self.finishes += 1;
    }
}

/// Token for a pending frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameHandle(pub u64);

/// Source of display-refresh callbacks
pub trait FrameScheduler {
    /// Schedule one callback and return its handle
    fn request_frame(&mut self) -> FrameHandle;
    /// Cancel a pending callback; unknown handles are ignored
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler whose frames are delivered by hand (tests, headless runs)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_handle: u64,
    pending: Vec<FrameHandle>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Callbacks requested and not yet delivered or cancelled
    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }

    /// Take every pending callback for delivery
    pub fn take_pending(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_handle += 1;
        let handle = FrameHandle(self.next_handle);
        self.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|h| *h != handle);
    }
}

/// Loop bookkeeping, kept together instead of in captured variables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopState {
    /// Timestamp (ms) of the previous frame, or of `start`
    pub last_timestamp: f64,
    pub is_running: bool,
    /// The one callback currently scheduled
    pub frame_handle: Option<FrameHandle>,
}

/// What one frame did
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Delta actually applied (negative or non-finite input becomes 0)
    pub delta_ms: f32,
    /// Projectiles that hit something
    pub hits: usize,
    /// Sweep direction after this frame's evaluation
    pub sweep: SweepDirection,
    /// A handler ended the match
    pub halted: bool,
}

/// Drives the world one frame at a time
pub struct Animator<R: RenderSurface> {
    config: SimConfig,
    world: World,
    sweep: Sweep,
    loop_state: LoopState,
    surface: R,
    frame_count: u64,
}

impl<R: RenderSurface> Animator<R> {
    /// Validates `config` up front; the frame loop never fails afterwards
    pub fn new(config: SimConfig, world: World, surface: R) -> Result<Self, SetupError> {
        config.validate()?;
        let sweep = Sweep::new(config.enemy_speed, config.descend_step);
        Ok(Self {
            config,
            world,
            sweep,
            loop_state: LoopState::default(),
            surface,
            frame_count: 0,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn sweep(&self) -> &Sweep {
        &self.sweep
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn loop_state(&self) -> &LoopState {
        &self.loop_state
    }

    pub fn is_running(&self) -> bool {
        self.loop_state.is_running
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Set the player's movement intent (ignored once the player is gone)
    pub fn set_intent(&mut self, intent: Intent) {
        if let Some(player) = self.world.player_mut() {
            player.intent = intent;
        }
    }

    /// Swap in a fresh world and reset the sweep. The loop must be stopped.
    pub fn reset(&mut self, world: World) {
        self.world = world;
        self.sweep = Sweep::new(self.config.enemy_speed, self.config.descend_step);
        self.frame_count = 0;
    }

    /// Begin requesting frames. Does nothing if already running.
    pub fn start(&mut self, now: f64, scheduler: &mut dyn FrameScheduler) {
        if self.loop_state.is_running {
            log::warn!("Animator already running, start ignored");
            return;
        }
        self.loop_state = LoopState {
            last_timestamp: now,
            is_running: true,
            frame_handle: Some(scheduler.request_frame()),
        };
        log::info!("Animator started at {:.1} ms", now);
    }

    /// Cancel the pending frame and draw once more. Does nothing if stopped.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if !self.loop_state.is_running {
            return;
        }
        if let Some(handle) = self.loop_state.frame_handle.take() {
            scheduler.cancel_frame(handle);
        }
        self.loop_state.is_running = false;
        self.redraw();
        log::info!("Animator stopped after {} frames", self.frame_count);
    }

    /// Scheduler callback. Frames for stale handles or after `stop` are
    /// ignored, so a second chain of callbacks can never run.
    pub fn on_frame(
        &mut self,
        handle: FrameHandle,
        timestamp: f64,
        scheduler: &mut dyn FrameScheduler,
        sink: &mut dyn EventSink,
    ) -> Option<FrameReport> {
        if !self.loop_state.is_running || self.loop_state.frame_handle != Some(handle) {
            log::trace!("Ignoring stale frame {:?}", handle);
            return None;
        }
        self.loop_state.frame_handle = None;

        let delta = (timestamp - self.loop_state.last_timestamp) as f32;
        self.loop_state.last_timestamp = timestamp;

        let report = self.advance(delta, sink);
        if report.halted {
            self.stop(scheduler);
        } else {
            self.loop_state.frame_handle = Some(scheduler.request_frame());
        }
        Some(report)
    }

    /// One full frame without a scheduler (deterministic stepping)
    pub fn advance(&mut self, delta_ms: f32, sink: &mut dyn EventSink) -> FrameReport {
        let dt = if delta_ms.is_finite() && delta_ms > 0.0 {
            delta_ms
        } else {
            0.0
        };

        // 1. Player
        if let Some(player) = self.world.player_mut() {
            advance_player(player, &self.config, dt);
        }

        // 2. Enemies, then sweep re-evaluation
        advance_enemies(self.world.formation_mut(), &self.sweep, dt);
        self.sweep.evaluate(
            self.world.formation().horizontal_extent(),
            self.config.container_width,
            self.config.margin,
        );

        // 3. Projectiles
        advance_projectiles(self.world.projectiles_mut(), &self.config, dt);

        // 4. Redraw
        self.redraw();

        // 5. Formation position, 6. collisions
        let lowest_y = self.world.formation().lowest_y();
        let mut ctx = FrameContext::new(&mut self.world);
        sink.formation_lowest_y(&mut ctx, lowest_y);
        let hits = dispatch_collisions(&mut ctx, sink);
        let halted = ctx.is_halted();

        self.frame_count += 1;
        FrameReport {
            delta_ms: dt,
            hits,
            sweep: self.sweep.direction,
            halted,
        }
    }

    fn redraw(&mut self) {
        let scene = self.world.scene();
        self.surface.redraw(&scene);
        self.surface.finish();
    }
}
