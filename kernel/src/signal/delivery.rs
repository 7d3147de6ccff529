//! Pending-signal dispatch
//!
//! Walks a task's deliverable set (pending and not blocked, lowest signal
//! number first) and delivers each signal synchronously: the pending bit is
//! cleared, then the disposition runs to completion before the next signal
//! is considered. By the time the dispatcher returns, nothing the current
//! mask permits is still pending.
//!
//! Invoked from the mask-change path while the caller holds its scheduler
//! lock, and from the scheduling boundary when a task resumes.

use super::constants::signal_name;
use super::types::{default_action, SigAction, SignalDefaultAction, SignalState};
use crate::task::tcb::{TaskId, TaskState};

/// Deliver every deliverable pending signal for a task.
///
/// Stops early if a default action changes the task's lifecycle state
/// (termination or stop); anything still pending at that point is delivered
/// when and if the task runs again.
///
/// # Returns
/// * `true` if at least one signal was delivered
/// * `false` if nothing was deliverable
pub fn deliver_pending(tid: TaskId, signals: &mut SignalState, state: &mut TaskState) -> bool {
    let mut delivered = false;

    loop {
        let sig = match signals.next_deliverable_signal() {
            Some(s) => s,
            None => return delivered,
        };

        signals.clear_pending(sig);
        delivered = true;

        match signals.action(sig) {
            SigAction::Handler(handler) => {
                log::debug!(
                    "Delivering signal {} ({}) to task {} handler",
                    sig,
                    signal_name(sig),
                    tid.as_u64()
                );
                // Runs synchronously; it may block, take arbitrarily long,
                // or pend further signals, and it finishes before the next
                // deliverable signal is taken.
                handler(sig);
            }
            SigAction::Ignore => {
                log::debug!(
                    "Signal {} ({}) ignored by task {}",
                    sig,
                    signal_name(sig),
                    tid.as_u64()
                );
            }
            SigAction::Default => {
                if apply_default_action(tid, sig, state) {
                    return true;
                }
            }
        }
    }
}

/// Apply a signal's default action.
///
/// Returns `true` if the task's lifecycle state was modified.
fn apply_default_action(tid: TaskId, sig: u32, state: &mut TaskState) -> bool {
    match default_action(sig) {
        SignalDefaultAction::Terminate => {
            log::info!(
                "Task {} terminated by signal {} ({})",
                tid.as_u64(),
                sig,
                signal_name(sig)
            );
            // Negative signal number marks death-by-signal
            *state = TaskState::Terminated(-(sig as i32));
            true
        }
        SignalDefaultAction::CoreDump => {
            log::info!(
                "Task {} killed (core dumped) by signal {} ({})",
                tid.as_u64(),
                sig,
                signal_name(sig)
            );
            // Core dump not implemented; the 0x80 flag marks it
            *state = TaskState::Terminated(-((sig as i32) | 0x80));
            true
        }
        SignalDefaultAction::Stop => {
            log::info!(
                "Task {} stopped by signal {} ({})",
                tid.as_u64(),
                sig,
                signal_name(sig)
            );
            *state = TaskState::Blocked;
            true
        }
        SignalDefaultAction::Continue => {
            if matches!(*state, TaskState::Blocked) {
                log::info!(
                    "Task {} continued by signal {} ({})",
                    tid.as_u64(),
                    sig,
                    signal_name(sig)
                );
                *state = TaskState::Ready;
                true
            } else {
                false
            }
        }
        SignalDefaultAction::Ignore => {
            log::debug!(
                "Signal {} ({}) ignored (default) by task {}",
                sig,
                signal_name(sig),
                tid.as_u64()
            );
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::constants::*;
    use crate::task::tcb::{Task, TaskId};
    use std::sync::Mutex;

    fn task() -> Task {
        Task::new(TaskId::new(7))
    }

    fn deliver(task: &mut Task) -> bool {
        let Task {
            id,
            state,
            signals,
            ..
        } = task;
        deliver_pending(*id, signals, state)
    }

    #[test]
    fn nothing_deliverable_returns_false() {
        let mut task = task();
        assert!(!deliver(&mut task));

        task.signals.set_pending(SIGUSR1);
        task.signals.blocked.add(SIGUSR1);
        assert!(!deliver(&mut task));
        assert!(task.signals.is_pending(SIGUSR1));
    }

    #[test]
    fn delivers_lowest_signal_number_first() {
        static ORDER: Mutex<Vec<u32>> = Mutex::new(Vec::new());
        fn record(sig: u32) {
            ORDER.lock().unwrap().push(sig);
        }

        let mut task = task();
        for sig in [40, 12, 25] {
            task.signals.set_action(sig, SigAction::Handler(record));
            task.signals.set_pending(sig);
        }

        assert!(deliver(&mut task));
        assert_eq!(*ORDER.lock().unwrap(), vec![12, 25, 40]);
        assert!(task.signals.pending.is_empty());
    }

    #[test]
    fn ignored_signal_is_consumed_without_delivery() {
        let mut task = task();
        task.signals.set_action(SIGUSR2, SigAction::Ignore);
        task.signals.set_pending(SIGUSR2);

        assert!(deliver(&mut task));
        assert!(!task.signals.is_pending(SIGUSR2));
        assert_eq!(task.state, TaskState::Ready);
    }

    #[test]
    fn default_terminate_records_signal_death() {
        let mut task = task();
        task.signals.set_pending(SIGTERM);

        assert!(deliver(&mut task));
        assert_eq!(task.state, TaskState::Terminated(-(SIGTERM as i32)));
    }

    #[test]
    fn default_core_dump_sets_core_flag() {
        let mut task = task();
        task.signals.set_pending(SIGSEGV);

        assert!(deliver(&mut task));
        assert_eq!(
            task.state,
            TaskState::Terminated(-((SIGSEGV as i32) | 0x80))
        );
    }

    #[test]
    fn stop_then_continue_round_trips_task_state() {
        let mut task = task();
        task.signals.set_pending(SIGTSTP);
        assert!(deliver(&mut task));
        assert_eq!(task.state, TaskState::Blocked);

        task.signals.set_pending(SIGCONT);
        assert!(deliver(&mut task));
        assert_eq!(task.state, TaskState::Ready);
    }

    #[test]
    fn termination_stops_the_dispatch_loop() {
        static HITS: Mutex<Vec<u32>> = Mutex::new(Vec::new());
        fn record(sig: u32) {
            HITS.lock().unwrap().push(sig);
        }

        let mut task = task();
        // SIGTERM (15) terminates before the handler for 20 is reached
        task.signals.set_pending(SIGTERM);
        task.signals.set_action(SIGTSTP, SigAction::Handler(record));
        task.signals.set_pending(SIGTSTP);

        assert!(deliver(&mut task));
        assert_eq!(task.state, TaskState::Terminated(-(SIGTERM as i32)));
        assert!(HITS.lock().unwrap().is_empty());
        assert!(task.signals.is_pending(SIGTSTP));
    }

    #[test]
    fn default_ignore_keeps_draining() {
        static HITS: Mutex<Vec<u32>> = Mutex::new(Vec::new());
        fn record(sig: u32) {
            HITS.lock().unwrap().push(sig);
        }

        let mut task = task();
        // SIGCHLD (17) default-ignores, then SIGTTIN's handler still runs
        task.signals.set_pending(SIGCHLD);
        task.signals.set_action(SIGTTIN, SigAction::Handler(record));
        task.signals.set_pending(SIGTTIN);

        assert!(deliver(&mut task));
        assert_eq!(*HITS.lock().unwrap(), vec![SIGTTIN]);
        assert_eq!(task.state, TaskState::Ready);
        assert!(task.signals.pending.is_empty());
    }
}
