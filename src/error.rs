// Arena setup errors: invalid configuration values rejected before a session starts

use thiserror::Error;

/// Errors raised while building an arena. A running tick never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArenaError {
    #[error("Requested {requested} autonomous vehicles, at most {max} are supported")]
    TooManyVehicles { requested: usize, max: usize },
    #[error("Hazard density must be within [0, 1], got {0}")]
    InvalidHazardDensity(f64),
    #[error("Arena extent must be a positive finite size, got {0}")]
    InvalidExtent(f32),
    #[error("Arena extent {requested} is too large, at most {max} is supported")]
    ExtentTooLarge { requested: f32, max: f32 },
}
