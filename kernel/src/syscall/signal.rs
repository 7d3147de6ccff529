//! Signal-related system calls
//!
//! - sigprocmask(how, set, oldset) - Examine/change the blocked signal set
//! - sigpending(set) - Signals raised while blocked and not yet delivered

use super::SyscallResult;
use crate::interrupts;
use crate::signal::mask::sig_procmask;
use crate::signal::types::SigSet;
use crate::task::tcb::Task;

/// sigprocmask(how, set, oldset) - Block/unblock signals
///
/// Task-facing form of the mask operation. Any rejection collapses to a
/// single EINVAL here; kernel-internal callers use `sig_procmask` directly
/// and see the structured error. On failure the task observes no change to
/// its mask.
///
/// Pending signals unblocked by this call are delivered before it returns.
///
/// # Arguments
/// * `how` - SIG_BLOCK (0), SIG_UNBLOCK (1), or SIG_SETMASK (2)
/// * `set` - Signals to combine into the mask, or `None` to not change it
/// * `old_set` - Where to store the old mask, or `None` to not store it
///
/// # Returns
/// * 0 on success
/// * -EINVAL (22) for an unrecognized `how`
pub fn sys_sigprocmask(
    task: &mut Task,
    how: i32,
    set: Option<&SigSet>,
    old_set: Option<&mut SigSet>,
) -> SyscallResult {
    match sig_procmask(task, how, set, old_set) {
        Ok(()) => SyscallResult::Ok(0),
        Err(err) => {
            log::warn!("sys_sigprocmask: rejected (how={}, {:?})", how, err);
            SyscallResult::Err(22) // EINVAL
        }
    }
}

/// sigpending(set) - Query raised-but-undelivered signals
///
/// # Returns
/// * 0, with the pending set written through `out`
pub fn sys_sigpending(task: &Task, out: &mut SigSet) -> SyscallResult {
    // Producers may pend at any instruction; snapshot under the guard
    let _irq = interrupts::disable();
    *out = task.signals.pending;
    SyscallResult::Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::constants::*;
    use crate::signal::send::post_signal;
    use crate::task::tcb::TaskId;

    #[test]
    fn invalid_how_collapses_to_einval() {
        let mut task = Task::new(TaskId::new(9));
        let set = SigSet::single(SIGHUP);
        sys_sigprocmask(&mut task, SIG_BLOCK, Some(&set), None);

        let result = sys_sigprocmask(&mut task, 99, Some(&set), None);
        assert_eq!(result, SyscallResult::Err(22));
        // Failure is invisible in the mask
        assert_eq!(task.signals.blocked, set);
    }

    #[test]
    fn setmask_reports_old_mask() {
        let mut task = Task::new(TaskId::new(9));
        let first = SigSet::single(SIGUSR1);
        let second = SigSet::single(SIGUSR2);

        assert_eq!(
            sys_sigprocmask(&mut task, SIG_SETMASK, Some(&first), None),
            SyscallResult::Ok(0)
        );

        let mut old = SigSet::empty();
        assert_eq!(
            sys_sigprocmask(&mut task, SIG_SETMASK, Some(&second), Some(&mut old)),
            SyscallResult::Ok(0)
        );
        assert_eq!(old, first);
        assert_eq!(task.signals.blocked, second);
    }

    #[test]
    fn sigpending_snapshots_blocked_raises() {
        let mut task = Task::new(TaskId::new(9));
        let blocked = SigSet::single(SIGALRM);
        sys_sigprocmask(&mut task, SIG_BLOCK, Some(&blocked), None);
        post_signal(&mut task, SIGALRM).unwrap();

        let mut pending = SigSet::empty();
        assert_eq!(sys_sigpending(&task, &mut pending), SyscallResult::Ok(0));
        assert_eq!(pending, blocked);
    }
}
