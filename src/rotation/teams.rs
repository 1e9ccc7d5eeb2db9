//! Team identity and membership configuration.
//!
//! The rotation engine tracks which team each participant belongs to so that
//! games can gate responses by side ("the opposing team may answer") without
//! caring about the concrete pairing scheme.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::hash::Hash;

/// Team identifier. Opaque to the rotation engine; games assign meaning
/// (truco always plays two teams, 0 and 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// Create a new team ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The other team in a strictly two-team game.
    #[must_use]
    pub const fn opposing(self) -> TeamId {
        TeamId(1 - self.0)
    }
}

impl std::fmt::Display for TeamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// How the rotation engine assigns participants to teams at initialization.
#[derive(Clone, Debug, Default)]
pub enum TeamConfig<P> {
    /// Every participant is its own team (default; 1v1 truco, uno).
    #[default]
    Solo,
    /// Alternating seats: even seats team 0, odd seats team 1 (2v2 truco).
    Pairs,
    /// Split the seating order into `teams` equal consecutive blocks.
    Split { teams: usize },
    /// Explicit participant → team assignments. Participants missing from
    /// the map are left without a team.
    Manual(FxHashMap<P, TeamId>),
}

/// Computed team membership: both directions of the participant↔team
/// relation, rebuilt on every `initialize`/`add`/`remove`.
#[derive(Clone, Debug)]
pub(crate) struct TeamTable<P> {
    by_participant: FxHashMap<P, TeamId>,
    members: FxHashMap<TeamId, Vec<P>>,
}

impl<P> Default for TeamTable<P> {
    fn default() -> Self {
        Self {
            by_participant: FxHashMap::default(),
            members: FxHashMap::default(),
        }
    }
}

impl<P: Clone + Eq + Hash> TeamTable<P> {
    pub(crate) fn assign(participants: &[P], config: &TeamConfig<P>) -> Self {
        let mut table = Self {
            by_participant: FxHashMap::default(),
            members: FxHashMap::default(),
        };

        match config {
            TeamConfig::Solo => {
                for (i, p) in participants.iter().enumerate() {
                    table.insert(p.clone(), TeamId(i as u8));
                }
            }
            TeamConfig::Pairs => {
                for (i, p) in participants.iter().enumerate() {
                    table.insert(p.clone(), TeamId((i % 2) as u8));
                }
            }
            TeamConfig::Split { teams } => {
                let teams = (*teams).max(1);
                let per_team = participants.len().div_ceil(teams);
                for (i, p) in participants.iter().enumerate() {
                    table.insert(p.clone(), TeamId((i / per_team) as u8));
                }
            }
            TeamConfig::Manual(assignments) => {
                for p in participants {
                    if let Some(team) = assignments.get(p) {
                        table.insert(p.clone(), *team);
                    }
                }
            }
        }

        table
    }

    pub(crate) fn insert(&mut self, participant: P, team: TeamId) {
        self.by_participant.insert(participant.clone(), team);
        self.members.entry(team).or_default().push(participant);
    }

    /// Next unused team id, for participants joining without an assignment.
    pub(crate) fn fresh_team(&self) -> TeamId {
        let next = self
            .members
            .keys()
            .map(|t| t.0 + 1)
            .max()
            .unwrap_or_default();
        TeamId(next)
    }

    pub(crate) fn remove(&mut self, participant: &P) {
        if let Some(team) = self.by_participant.remove(participant) {
            if let Some(members) = self.members.get_mut(&team) {
                members.retain(|p| p != participant);
                if members.is_empty() {
                    self.members.remove(&team);
                }
            }
        }
    }

    pub(crate) fn team_of(&self, participant: &P) -> Option<TeamId> {
        self.by_participant.get(participant).copied()
    }

    pub(crate) fn members_of(&self, team: TeamId) -> &[P] {
        self.members.get(&team).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn team_count(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn clear(&mut self) {
        self.by_participant.clear();
        self.members.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solo_assignment() {
        let table = TeamTable::assign(&["a", "b", "c"], &TeamConfig::Solo);

        assert_eq!(table.team_of(&"a"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"b"), Some(TeamId(1)));
        assert_eq!(table.team_of(&"c"), Some(TeamId(2)));
        assert_eq!(table.team_count(), 3);
    }

    #[test]
    fn test_pairs_assignment() {
        let table = TeamTable::assign(&["a", "b", "c", "d"], &TeamConfig::Pairs);

        assert_eq!(table.team_of(&"a"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"b"), Some(TeamId(1)));
        assert_eq!(table.team_of(&"c"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"d"), Some(TeamId(1)));
        assert_eq!(table.members_of(TeamId(0)), &["a", "c"]);
    }

    #[test]
    fn test_split_assignment() {
        let table = TeamTable::assign(&["a", "b", "c", "d"], &TeamConfig::Split { teams: 2 });

        assert_eq!(table.team_of(&"a"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"b"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"c"), Some(TeamId(1)));
        assert_eq!(table.team_of(&"d"), Some(TeamId(1)));
    }

    #[test]
    fn test_manual_assignment() {
        let mut assignments = FxHashMap::default();
        assignments.insert("a", TeamId(1));
        assignments.insert("b", TeamId(0));

        let table = TeamTable::assign(&["a", "b", "c"], &TeamConfig::Manual(assignments));

        assert_eq!(table.team_of(&"a"), Some(TeamId(1)));
        assert_eq!(table.team_of(&"b"), Some(TeamId(0)));
        assert_eq!(table.team_of(&"c"), None);
    }

    #[test]
    fn test_remove_drops_empty_team() {
        let mut table = TeamTable::assign(&["a", "b"], &TeamConfig::Solo);

        table.remove(&"a");
        assert_eq!(table.team_of(&"a"), None);
        assert_eq!(table.team_count(), 1);
        assert!(table.members_of(TeamId(0)).is_empty());
    }

    #[test]
    fn test_opposing_team() {
        assert_eq!(TeamId(0).opposing(), TeamId(1));
        assert_eq!(TeamId(1).opposing(), TeamId(0));
    }
}
