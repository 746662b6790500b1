//! Deferred transitions on the game clock
//!
//! Entries are tagged with the epoch that was current when they were
//! scheduled. The owner bumps its epoch on start/restart, so anything left
//! over from an earlier session is dropped when it comes due.

use serde::{Deserialize, Serialize};

/// What to do when a deferred entry fires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeferredAction {
    /// Clear the overlay, but only if it still shows message `message_id`
    ClearMessage { message_id: u64 },
    /// Advance to the next level after a stage clear
    LevelUp,
}

/// A scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Deferred {
    /// Game-clock time (seconds) at which the action fires
    pub due: f64,
    /// Session epoch at scheduling time
    pub epoch: u64,
    pub action: DeferredAction,
}

/// Pending deferred actions, fired in due order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    pending: Vec<Deferred>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to fire at `due`
    pub fn schedule(&mut self, due: f64, epoch: u64, action: DeferredAction) {
        self.pending.push(Deferred { due, epoch, action });
    }

    /// Remove and return every entry due at or before `now`, earliest first
    ///
    /// Entries with equal due times keep their scheduling order.
    pub fn drain_due(&mut self, now: f64) -> Vec<Deferred> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|d| d.due <= now);
        self.pending = pending;
        due.sort_by(|a, b| a.due.total_cmp(&b.due));
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_due_only_returns_elapsed() {
        let mut s = Scheduler::new();
        s.schedule(1.0, 0, DeferredAction::LevelUp);
        s.schedule(0.5, 0, DeferredAction::ClearMessage { message_id: 1 });

        assert!(s.drain_due(0.25).is_empty());
        assert_eq!(s.len(), 2);

        let fired = s.drain_due(0.75);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].action, DeferredAction::ClearMessage { message_id: 1 });
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn test_drain_due_is_ordered() {
        let mut s = Scheduler::new();
        s.schedule(0.8, 1, DeferredAction::LevelUp);
        s.schedule(0.7, 1, DeferredAction::ClearMessage { message_id: 3 });
        s.schedule(0.7, 1, DeferredAction::ClearMessage { message_id: 4 });

        let fired: Vec<_> = s.drain_due(10.0).into_iter().map(|d| d.action).collect();
        assert_eq!(
            fired,
            vec![
                DeferredAction::ClearMessage { message_id: 3 },
                DeferredAction::ClearMessage { message_id: 4 },
                DeferredAction::LevelUp,
            ]
        );
        assert!(s.is_empty());
    }
}
