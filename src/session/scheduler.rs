//! Scheduled tasks with stale-callback protection.
//!
//! The engine's only apparent concurrency is fire-once delayed work: a
//! comparison's settlement and the win announcement. Both are modeled as
//! explicit scheduled tasks that the host pumps on its single logical
//! thread; nothing here spawns or blocks.
//!
//! Every task carries the generation of the session that scheduled it.
//! `reset()` bumps the generation and cancels outright, so a task scheduled
//! against a discarded session can never fire into its successor even if a
//! handle to it survived the reset.

use std::time::Instant;

/// Session identity tag. Bumped on every reset.
pub type Generation = u64;

/// Delayed work the controller can schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScheduledTask {
    /// Commit the pending comparison's outcome.
    SettleComparison,
    /// Transition the session to its terminal won state.
    AnnounceWin,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: Instant,
    generation: Generation,
    task: ScheduledTask,
}

/// Fire-once task queue for a single logical thread.
#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
}

impl Scheduler {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task to fire at `due`, tagged with `generation`.
    pub fn schedule(&mut self, due: Instant, generation: Generation, task: ScheduledTask) {
        self.entries.push(Entry {
            due,
            generation,
            task,
        });
    }

    /// Check whether any task is pending.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Drop every pending task.
    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    /// Remove and return the tasks due at `now`, in due order.
    ///
    /// Tasks whose generation no longer matches `current` are discarded
    /// silently; they belong to a session that has been replaced.
    pub fn pop_due(&mut self, now: Instant, current: Generation) -> Vec<ScheduledTask> {
        self.entries.retain(|e| e.generation == current);

        let mut due: Vec<Entry> = Vec::new();
        self.entries.retain(|e| {
            if e.due <= now {
                due.push(*e);
                false
            } else {
                true
            }
        });
        due.sort_by_key(|e| e.due);
        due.into_iter().map(|e| e.task).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ManualClock, TimeSource};
    use std::time::Duration;

    #[test]
    fn test_task_fires_only_once_due() {
        let time = ManualClock::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            time.now() + Duration::from_millis(300),
            0,
            ScheduledTask::SettleComparison,
        );

        assert!(scheduler.pop_due(time.now(), 0).is_empty());
        assert!(scheduler.has_pending());

        time.advance(Duration::from_millis(300));
        assert_eq!(
            scheduler.pop_due(time.now(), 0),
            vec![ScheduledTask::SettleComparison]
        );

        // Fire-once: nothing left.
        assert!(scheduler.pop_due(time.now(), 0).is_empty());
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_due_order() {
        let time = ManualClock::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            time.now() + Duration::from_millis(500),
            0,
            ScheduledTask::AnnounceWin,
        );
        scheduler.schedule(
            time.now() + Duration::from_millis(300),
            0,
            ScheduledTask::SettleComparison,
        );

        time.advance(Duration::from_millis(600));
        assert_eq!(
            scheduler.pop_due(time.now(), 0),
            vec![ScheduledTask::SettleComparison, ScheduledTask::AnnounceWin]
        );
    }

    #[test]
    fn test_stale_generation_discarded() {
        let time = ManualClock::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(
            time.now() + Duration::from_millis(100),
            0,
            ScheduledTask::SettleComparison,
        );

        time.advance(Duration::from_millis(200));
        // Session generation moved on; the stale task never fires.
        assert!(scheduler.pop_due(time.now(), 1).is_empty());
        assert!(!scheduler.has_pending());
    }

    #[test]
    fn test_cancel_all() {
        let time = ManualClock::new();
        let mut scheduler = Scheduler::new();
        scheduler.schedule(time.now(), 0, ScheduledTask::SettleComparison);

        scheduler.cancel_all();

        assert!(scheduler.pop_due(time.now(), 0).is_empty());
    }
}
