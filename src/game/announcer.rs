//! Paced delivery of settlement announcements.
//!
//! Hand and game settlements are not broadcast in the same breath as the
//! action that caused them: the transport shows them one at a time with a
//! fixed delay so players can read each one. The engine models this as an
//! explicit FIFO queue — while it is non-empty every mutating operation is
//! rejected and the action gate is empty. The transport peeks the next
//! announcement, waits [`Announcer::DELAY`], then calls `deliver()` to pop
//! it and broadcast.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

use super::events::GameEvent;

/// FIFO queue of pending settlement announcements.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Announcer {
    queue: VecDeque<GameEvent>,
}

impl Announcer {
    /// How long the transport should show each announcement before
    /// delivering the next.
    pub const DELAY: Duration = Duration::from_millis(500);

    /// Whether nothing is waiting to be announced.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued announcements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// The announcement that would be delivered next.
    #[must_use]
    pub fn pending(&self) -> Option<&GameEvent> {
        self.queue.front()
    }

    /// Queue an announcement.
    pub fn enqueue(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Pop and return the next announcement.
    pub fn deliver(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }
}
