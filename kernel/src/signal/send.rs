//! Signal generation toward a task's pending set
//!
//! Producers (interrupt handlers, timers, other tasks) only ever add to the
//! pending set; delivery happens at the next dispatch point, either a mask
//! change by the target or the scheduling boundary when it resumes.

use super::constants::{is_valid_signal, signal_name};
use super::types::SigError;
use crate::interrupts;
use crate::task::tcb::Task;

/// Mark a signal pending for a task.
///
/// # Returns
/// * `Ok(())` with the pending bit set
/// * `Err(SigError::InvalidSignal)` for signal numbers outside 1..=NSIG
pub fn post_signal(task: &mut Task, sig: u32) -> Result<(), SigError> {
    if !is_valid_signal(sig) {
        log::warn!("post_signal: invalid signal number {}", sig);
        return Err(SigError::InvalidSignal);
    }

    // Pending updates race with the target's own mask mutation; both sides
    // take the critical section.
    let _irq = interrupts::disable();
    task.signals.set_pending(sig);

    log::debug!(
        "Signal {} ({}) now pending for task {}",
        sig,
        signal_name(sig),
        task.id.as_u64()
    );
    Ok(())
}
