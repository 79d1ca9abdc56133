//! Deferred one-shot tasks keyed by simulated time.
//!
//! Replaces timers: the engine schedules a task for `now + delay` and pops
//! whatever is due at the start of each tick. Tasks fire in fire-time order,
//! ties broken by scheduling order.

use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Generate the next enemy.
    SpawnEnemy,
    /// Bring a defeated character back at full hp.
    Revive,
    /// A delayed lightning chain hop. Ignored if the encounter changed.
    ChainHit { encounter: u64, damage: u32, hop: u32 },
}

#[derive(Debug, Clone, Default)]
pub struct TaskQueue {
    tasks: BTreeMap<(u64, TaskId), DeferredTask>,
    next_id: u64,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, fire_at: u64, task: DeferredTask) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.insert((fire_at, id), task);
        id
    }

    /// Cancels a pending task. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let key = self.tasks.keys().find(|(_, task_id)| *task_id == id).copied();
        match key {
            Some(key) => self.tasks.remove(&key).is_some(),
            None => false,
        }
    }

    pub fn is_scheduled(&self, id: TaskId) -> bool {
        self.tasks.keys().any(|(_, task_id)| *task_id == id)
    }

    pub fn cancel_all(&mut self) {
        self.tasks.clear();
    }

    /// Removes and returns the earliest task due at `now`, if any.
    ///
    /// Popping one at a time lets a firing task schedule follow-ups that are
    /// themselves already due.
    pub fn pop_due(&mut self, now: u64) -> Option<(u64, DeferredTask)> {
        let (&(fire_at, id), _) = self.tasks.iter().next()?;
        if fire_at > now {
            return None;
        }
        self.tasks.remove(&(fire_at, id)).map(|task| (fire_at, task))
    }

    pub fn has_pending(&self, predicate: impl Fn(&DeferredTask) -> bool) -> bool {
        self.tasks.values().any(predicate)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pop_due_in_time_order() {
        let mut queue = TaskQueue::new();
        queue.schedule(5000, DeferredTask::Revive);
        queue.schedule(1000, DeferredTask::SpawnEnemy);

        assert_eq!(queue.pop_due(999), None);
        assert_eq!(queue.pop_due(6000), Some((1000, DeferredTask::SpawnEnemy)));
        assert_eq!(queue.pop_due(6000), Some((5000, DeferredTask::Revive)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_same_time_keeps_schedule_order() {
        let mut queue = TaskQueue::new();
        let first = DeferredTask::ChainHit {
            encounter: 1,
            damage: 30,
            hop: 1,
        };
        queue.schedule(300, first);
        queue.schedule(300, DeferredTask::SpawnEnemy);
        assert_eq!(queue.pop_due(300), Some((300, first)));
    }

    #[test]
    fn test_cancel() {
        let mut queue = TaskQueue::new();
        let id = queue.schedule(5000, DeferredTask::Revive);
        assert!(queue.has_pending(|t| *t == DeferredTask::Revive));
        assert!(queue.is_scheduled(id));
        assert!(queue.cancel(id));
        assert!(!queue.is_scheduled(id));
        assert!(!queue.cancel(id));
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_cancel_all() {
        let mut queue = TaskQueue::new();
        queue.schedule(1, DeferredTask::Revive);
        queue.schedule(2, DeferredTask::SpawnEnemy);
        queue.cancel_all();
        assert_eq!(queue.pop_due(u64::MAX), None);
    }
}
