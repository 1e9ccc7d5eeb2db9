//! Core engine types: seats, per-seat storage, deterministic RNG.
//!
//! These building blocks are game-agnostic; the rotation engine and the
//! truco rules engine are both built on top of them.

pub mod player;
pub mod rng;

pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
