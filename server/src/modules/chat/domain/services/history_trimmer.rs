use super::super::entities::Session;

/// Default maximum turns retained per session, seed included
pub const DEFAULT_MAX_HISTORY: usize = 40;

/// Smallest usable limit: the seed plus one turn
pub const MIN_MAX_HISTORY: usize = 2;

/// History trimmer
///
/// Domain service: keeps a session within its turn budget by dropping the
/// oldest turns after the seed.
#[derive(Debug, Clone, Copy)]
pub struct HistoryTrimmer {
    max_turns: usize,
}

impl Default for HistoryTrimmer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

impl HistoryTrimmer {
    /// Limits below `MIN_MAX_HISTORY` are raised to it
    pub fn new(max_turns: usize) -> Self {
        Self {
            max_turns: max_turns.max(MIN_MAX_HISTORY),
        }
    }

    pub fn max_turns(&self) -> usize {
        self.max_turns
    }

    /// Trim the session in place, returning the number of evicted turns
    pub fn trim(&self, session: &mut Session) -> usize {
        let overshoot = session.len().saturating_sub(self.max_turns);
        if overshoot == 0 {
            return 0;
        }
        session.evict_oldest(overshoot)
    }
}
