//! Signal mask examination and mutation
//!
//! The mask operation is the one place the blocked set changes, and it sits
//! on state shared with interrupt handlers (which may pend a signal between
//! any two instructions) and the scheduler (which may switch tasks unless
//! told not to). The protocol here is fixed:
//!
//! 1. take the task's scheduler lock, so no other task runs mid-sequence
//! 2. capture the old mask, always, before anything can fail
//! 3. mutate the mask inside an interrupt-masked critical section, so no
//!    interrupt handler observes it half-written
//! 4. leave the critical section, then dispatch: every signal that is
//!    pending and no longer blocked is delivered before this call returns
//! 5. drop the scheduler lock last

use super::constants::*;
use super::delivery;
use super::types::{SigError, SigSet};
use crate::interrupts;
use crate::task::tcb::Task;

/// Examine and/or change the calling task's signal mask.
///
/// This is the kernel-internal form: it reports failure as a structured
/// error and touches no task-visible error indicator. `sys_sigprocmask` is
/// the task-facing wrapper.
///
/// The old mask is written through `oset` (when supplied) unconditionally:
/// before any mutation, and regardless of whether the mutation is accepted.
/// With `set` absent nothing else happens; this is a pure query.
///
/// With `set` supplied, the mask is combined per `how` and the pending set
/// is then dispatched against the resulting mask. Dispatch runs even when
/// `how` was rejected; delivery depends only on the mask as it stands.
/// On failure the mask itself is left exactly as it was.
///
/// A delivered signal may run its handler synchronously inside this call,
/// so the call is a potential reentrancy point and is not guaranteed to
/// return quickly.
///
/// # Arguments
/// * `task` - The calling task's own control block
/// * `how`  - SIG_BLOCK (union), SIG_UNBLOCK (mask out), or SIG_SETMASK
///   (replace)
/// * `set`  - Signals to combine into the mask, or `None` to only query
/// * `oset` - Where to store the previous mask, or `None`
///
/// # Returns
/// * `Ok(())` on success
/// * `Err(SigError::InvalidHow)` if `how` is unrecognized; the mask is
///   unchanged
pub fn sig_procmask(
    task: &mut Task,
    how: i32,
    set: Option<&SigSet>,
    oset: Option<&mut SigSet>,
) -> Result<(), SigError> {
    let Task {
        id,
        state,
        signals,
        sched_lock,
    } = task;

    // No switch to another ready task until capture, mutation, and dispatch
    // have all happened; interrupts stay live except around the mutation.
    let _sched = sched_lock.lock();

    let old_mask = signals.blocked;
    if let Some(oset) = oset {
        *oset = old_mask;
    }

    let Some(set) = set else {
        // Query only
        return Ok(());
    };

    let ret = {
        // Interrupt handlers read mask and pending together when they pend
        // a signal; the mask update must never be observable half-done.
        let _irq = interrupts::disable();

        match how {
            SIG_BLOCK => {
                signals.blocked |= *set;
                Ok(())
            }
            SIG_UNBLOCK => {
                signals.blocked &= !*set;
                Ok(())
            }
            SIG_SETMASK => {
                signals.blocked = *set;
                Ok(())
            }
            _ => Err(SigError::InvalidHow),
        }
    };

    // Deliver whatever the mask no longer blocks. This runs whenever a set
    // was supplied, including the rejected-`how` case: the existing mask may
    // already leave pending signals deliverable.
    delivery::deliver_pending(*id, signals, state);

    ret
}
