use std::time::Instant;

/// Work scheduled to run later. Targets may be gone by then; firing must tolerate that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeferredAction {
    /// Toast reached its display duration; start the exit animation.
    ExpireToast(String),
    /// Exit animation finished; drop the node.
    DropToast(String),
    Navigate(String),
}

#[derive(Debug)]
struct Deferred {
    due: Instant,
    seq: u64,
    action: DeferredAction,
}

/// Independent one-shot timers with no cancellation, fired by an explicit `take_due`.
#[derive(Debug, Default)]
pub struct Timers {
    pending: Vec<Deferred>,
    next_seq: u64,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, due: Instant, action: DeferredAction) {
        self.next_seq += 1;
        self.pending.push(Deferred {
            due,
            seq: self.next_seq,
            action,
        });
    }

    /// Removes and returns every action due at `now`, earliest first, ties in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<DeferredAction> {
        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|entry| entry.due <= now);
        self.pending = rest;
        due.sort_by_key(|entry| (entry.due, entry.seq));
        due.into_iter().map(|entry| entry.action).collect()
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.pending.iter().map(|entry| entry.due).min()
    }

    /// When the earliest pending navigation fires, if any.
    pub fn navigation_due(&self) -> Option<Instant> {
        self.pending
            .iter()
            .filter(|entry| matches!(entry.action, DeferredAction::Navigate(_)))
            .map(|entry| entry.due)
            .min()
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
    use std::time::Duration;

    #[test]
    fn only_due_actions_fire_in_time_order() {
        let start = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(start + Duration::from_secs(3), DeferredAction::ExpireToast("b".into()));
        timers.schedule(start + Duration::from_secs(2), DeferredAction::Navigate("/login".into()));
        timers.schedule(start + Duration::from_secs(9), DeferredAction::DropToast("c".into()));

        assert!(timers.take_due(start).is_empty());
        assert_eq!(
            timers.take_due(start + Duration::from_secs(5)),
            vec![
                DeferredAction::Navigate("/login".into()),
                DeferredAction::ExpireToast("b".into()),
            ]
        );
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.next_due(), Some(start + Duration::from_secs(9)));
        assert_eq!(timers.navigation_due(), None);
    }

    #[test]
    fn same_deadline_keeps_scheduling_order() {
        let at = Instant::now();
        let mut timers = Timers::new();
        timers.schedule(at, DeferredAction::DropToast("1".into()));
        timers.schedule(at, DeferredAction::DropToast("2".into()));
        assert_eq!(
            timers.take_due(at),
            vec![
                DeferredAction::DropToast("1".into()),
                DeferredAction::DropToast("2".into()),
            ]
        );
        assert!(timers.is_empty());
    }
}
