//! Task control block and lifecycle state

use crate::signal::SignalState;
use crate::task::sched_lock::SchedLock;

/// Task ID type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(id: u64) -> Self {
        TaskId(id)
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Task state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Task is ready to run
    Ready,
    /// Task is currently running
    Running,
    /// Task is stopped or waiting
    Blocked,
    /// Task has terminated
    Terminated(i32), // exit code
}

/// The subset of the task control block the signal layer operates on.
///
/// `signals.blocked` is owned exclusively by the task and mutated only
/// through the task's own mask operations. `signals.pending` is fed by any
/// context, including interrupt handlers, which is why every read-modify-
/// write of signal state happens inside a critical section.
pub struct Task {
    /// Unique task identifier
    pub id: TaskId,

    /// Current state
    pub state: TaskState,

    /// Signal handling state (pending, blocked, dispositions)
    pub signals: SignalState,

    /// Preemption lock for this task
    pub sched_lock: SchedLock,
}

impl Task {
    /// Create a new task. The signal mask starts empty.
    pub fn new(id: TaskId) -> Self {
        Task {
            id,
            state: TaskState::Ready,
            signals: SignalState::default(),
            sched_lock: SchedLock::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_accepts_all_signals() {
        let task = Task::new(TaskId::new(1));
        assert!(task.signals.blocked.is_empty());
        assert!(task.signals.pending.is_empty());
        assert_eq!(task.state, TaskState::Ready);
        assert_eq!(task.sched_lock.lock_count(), 0);
    }
}
