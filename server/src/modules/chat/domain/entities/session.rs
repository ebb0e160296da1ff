use super::super::value_objects::SessionId;
use super::{Turn, TurnRole};

/// Session entity - aggregate root
///
/// Owns the chronological turn sequence. Index 0 is always the persona
/// system turn and no operation on this type removes it.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    turns: Vec<Turn>,
}

impl Session {
    /// Create a session seeded with the persona instruction
    pub fn new(id: SessionId, persona: impl Into<String>) -> Self {
        Self {
            id,
            turns: vec![Turn::system(persona)],
        }
    }

    // Getters
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// The persona system turn
    pub fn seed(&self) -> &Turn {
        &self.turns[0]
    }

    /// Most recent turn
    pub fn last(&self) -> &Turn {
        // the seed guarantees at least one element
        &self.turns[self.turns.len() - 1]
    }

    // Business methods

    /// Append a user or assistant turn
    ///
    /// System turns are only valid as the seed; a later one is stored as a
    /// user turn with the same content.
    pub fn push(&mut self, turn: Turn) {
        let turn = match turn.role() {
            TurnRole::System => Turn::user(turn.content()),
            _ => turn,
        };
        self.turns.push(turn);
    }

    /// Drop up to `count` of the oldest non-seed turns, returning how many went
    pub fn evict_oldest(&mut self, count: usize) -> usize {
        let count = count.min(self.turns.len() - 1);
        if count > 0 {
            self.turns.drain(1..=count);
        }
        count
    }

    /// Discard everything after the seed turn
    pub fn reset_to_seed(&mut self) {
        self.turns.truncate(1);
    }
}
