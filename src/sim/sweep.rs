//! Formation sweep state machine
//!
//! The formation slides right until it touches the right margin, drops one
//! step, slides left until it touches the left margin, drops again, and so on.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::formation::Extent;

/// Current sweep mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SweepDirection {
    #[default]
    Right,
    Left,
    Descend,
}

/// Shared direction plus the speeds it applies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sweep {
    pub direction: SweepDirection,
    /// Horizontal speed (units per millisecond)
    pub speed: f32,
    /// Vertical drop per descend frame
    pub descend_step: f32,
}

impl Sweep {
    pub fn new(speed: f32, descend_step: f32) -> Self {
        Self {
            direction: SweepDirection::Right,
            speed,
            descend_step,
        }
    }

    /// Offset every enemy receives this frame.
    /// Descend is a fixed snap toward the player (y-up, so negative y).
    pub fn frame_offset(&self, dt_ms: f32) -> Vec2 {
        match self.direction {
            SweepDirection::Right => Vec2::new(self.speed * dt_ms, 0.0),
            SweepDirection::Left => Vec2::new(-self.speed * dt_ms, 0.0),
            SweepDirection::Descend => Vec2::new(0.0, -self.descend_step),
        }
    }

    /// Re-evaluate direction against the container margins.
    /// Returns the new direction when a transition fired.
    pub fn evaluate(
        &mut self,
        extent: Option<Extent>,
        container_width: f32,
        margin: f32,
    ) -> Option<SweepDirection> {
        let extent = extent?;
        let next = next_direction(self.direction, extent, container_width, margin);
        if next == self.direction {
            return None;
        }
        log::debug!(
            "Sweep {:?} -> {:?} (extent {:.1}..{:.1})",
            self.direction,
            next,
            extent.min_x,
            extent.max_x
        );
        self.direction = next;
        Some(next)
    }
}

/// Transition rule. The right edge is checked first; at most one rule fires.
pub fn next_direction(
    current: SweepDirection,
    extent: Extent,
    container_width: f32,
    margin: f32,
) -> SweepDirection {
    if extent.max_x >= container_width - margin {
        if current == SweepDirection::Descend {
            SweepDirection::Left
        } else {
            SweepDirection::Descend
        }
    } else if extent.min_x <= margin {
        if current == SweepDirection::Descend {
            SweepDirection::Right
        } else {
            SweepDirection::Descend
        }
    } else {
        current
    }
}
