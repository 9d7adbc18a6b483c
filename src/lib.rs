//! Top-down vehicular combat arena: a deterministic, tick-driven simulation of one
//! player car and a crowd of autonomous cars that ram and shoot each other.
//!
//! Everything lives in an [`arena::Arena`]; front-ends feed it one
//! [`motion::ControlInput`] per tick and read state back through its accessors
//! and its event queue.

pub mod arena;
pub mod collision;
pub mod config;
pub mod error;
pub mod events;
pub mod hazard;
pub mod logging;
pub mod motion;
pub mod projectile;
pub mod utils;
pub mod vehicle;

pub use arena::Arena;
pub use config::ArenaConfig;
pub use error::ArenaError;
pub use events::ArenaEvent;
pub use motion::ControlInput;
