//! Turn and team rotation, independent of any particular game's rules.

pub mod engine;
pub mod teams;

pub use engine::{Direction, RotationEngine, RotationObserver, TurnInfo};
pub use teams::{TeamConfig, TeamId};
