//! # truco-core
//!
//! Authoritative rules and turn-coordination engine for Uruguayan truco.
//!
//! ## Design Principles
//!
//! 1. **Transport-Agnostic**: the engine never does I/O. Every action
//!    returns a structured result; events and announcements are drained by
//!    the caller and broadcast however the room layer likes.
//!
//! 2. **One Room, One Machine**: a `TrucoGame` is an owned aggregate with a
//!    single serialized entry point. The surrounding dispatch layer feeds
//!    it one action at a time; nothing inside needs synchronization.
//!
//! 3. **Deterministic**: all randomness flows through a seeded RNG, so a
//!    game can be re-dealt exactly from its seed.
//!
//! ## Architecture
//!
//! - **Action Gate**: the legal action set is a pure derived function of
//!   phase, rotation, and the three betting sub-protocol states, never
//!   scattered conditionals.
//!
//! - **Paced Settlements**: hand and game settlements queue through an
//!   explicit FIFO `Announcer`; mutations are rejected until the transport
//!   drains it.
//!
//! ## Modules
//!
//! - `core`: seat IDs, per-seat storage, deterministic RNG
//! - `rotation`: generic turn/team rotation, reusable by other games
//! - `cards`: Spanish deck, muestra-relative hierarchy, envido/flor
//!   evaluation
//! - `game`: round/hand state machine, envido/flor/truco protocols, action
//!   gate, events, snapshots

pub mod cards;
pub mod core;
pub mod game;
pub mod rotation;

// Re-export commonly used types
pub use crate::core::{GameRng, GameRngState, PlayerId, PlayerMap};

pub use crate::rotation::{
    Direction, RotationEngine, RotationObserver, TeamConfig, TeamId, TurnInfo,
};

pub use crate::cards::{
    compare, deal, detect_flor, envido_total, hierarchy_of, Card, Deal, Flor, FlorKind, Hand,
    Hierarchy, Rank, Suit, Tier,
};

pub use crate::game::{
    ActionError, ActionKind, Announcer, EnvidoCall, EnvidoState, FlorState, GameEvent,
    GameSummary, Phase, PlayerStats, PlayerView, PublicSnapshot, StatsRecorder, TrucoGame,
    TrucoLevel, TrucoState, FLOR_POINTS, GAME_TARGET,
};
