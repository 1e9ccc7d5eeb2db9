//! The truco rules engine: state machine, betting protocols, gate, events.

pub mod announcer;
pub mod engine;
pub mod envido;
pub mod error;
pub mod events;
pub mod flor;
pub mod gate;
pub mod snapshot;
pub mod stats;
pub mod truco;

pub use announcer::Announcer;
pub use engine::{Phase, TrucoGame};
pub use envido::{falta_points, EnvidoCall, EnvidoState, GAME_TARGET};
pub use error::ActionError;
pub use events::GameEvent;
pub use flor::{FlorDeclaration, FlorState, FLOR_POINTS};
pub use gate::ActionKind;
pub use snapshot::{PlayerView, PublicSnapshot};
pub use stats::{GameSummary, PlayerStats, StatsRecorder};
pub use truco::{points_at_level, TrucoLevel, TrucoState};
