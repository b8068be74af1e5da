//! Setup-time errors
//!
//! Everything that can go wrong is caught while a world or configuration is
//! being built. Frame stepping itself never fails.

use thiserror::Error;

/// Errors raised while seeding a world or validating configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SetupError {
    /// An entity was given a negative size
    #[error("{entity} has negative size {width}x{height}")]
    NegativeSize {
        entity: &'static str,
        width: f32,
        height: f32,
    },

    /// An entity was given a NaN or infinite coordinate or size
    #[error("{entity} has non-finite geometry (origin {x}, {y}; size {width}x{height})")]
    NonFiniteGeometry {
        entity: &'static str,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },

    /// Brick health must lie in (0, 1]
    #[error("brick health {0} is outside (0, 1]")]
    BrickHealth(f64),

    /// A configuration value is out of range
    #[error("invalid configuration: {field} = {value} ({reason})")]
    InvalidConfig {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// Configuration JSON could not be parsed
    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        SetupError::Parse(err.to_string())
    }
}
