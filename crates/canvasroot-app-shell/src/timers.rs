use web_time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Work the shell defers instead of doing inline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Full repaint that wipes the click indicator.
    ClearClickIndicator,
}

#[derive(Clone, Debug)]
struct PendingTimer {
    id: TimerId,
    deadline: Instant,
    task: DeferredTask,
}

/// Cancellable one-shot timers driven by an explicit clock.
#[derive(Debug, Default)]
pub struct TimerQueue {
    next_id: u64,
    pending: Vec<PendingTimer>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, task: DeferredTask, deadline: Instant) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(PendingTimer { id, deadline, task });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    /// Cancels every pending timer; returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let cancelled = self.pending.len();
        self.pending.clear();
        cancelled
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|timer| timer.id == id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.iter().map(|timer| timer.deadline).min()
    }

    /// Removes and returns every timer due at `now`, earliest first.
    pub fn take_due(&mut self, now: Instant) -> Vec<(TimerId, DeferredTask)> {
        let (mut due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending)
            .into_iter()
            .partition(|timer| timer.deadline <= now);
        self.pending = pending;
        due.sort_by_key(|timer| (timer.deadline, timer.id));
        due.into_iter().map(|timer| (timer.id, timer.task)).collect()
    }
}
