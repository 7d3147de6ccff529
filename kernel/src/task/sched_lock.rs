//! Per-task scheduler lock (preemption disable)
//!
//! Each task carries its own counted lock. While the count is non-zero the
//! scheduler must not switch away from the holding task to run another ready
//! task; interrupts still fire and may still mutate task state. The count is
//! task-local, so one task holding its lock never blocks another task from
//! locking its own.
//!
//! A context switch requested while the lock is held is latched and only
//! becomes actionable when the count returns to zero.

use core::sync::atomic::{compiler_fence, AtomicBool, AtomicU32, Ordering};

/// Counted, reentrant preemption lock embedded in the task control block.
pub struct SchedLock {
    count: AtomicU32,
    resched_pending: AtomicBool,
}

impl SchedLock {
    pub const fn new() -> Self {
        SchedLock {
            count: AtomicU32::new(0),
            resched_pending: AtomicBool::new(false),
        }
    }

    /// Disable preemption of the owning task.
    ///
    /// Reentrant: taking the lock while a guard from an enclosing scope is
    /// still live just deepens the count. Preemption is re-enabled when the
    /// last guard drops.
    pub fn lock(&self) -> SchedLockGuard<'_> {
        compiler_fence(Ordering::Acquire);
        let old = self.count.fetch_add(1, Ordering::Relaxed);
        debug_assert!(old < u32::MAX, "sched_lock: count overflow ({:#x})", old);
        compiler_fence(Ordering::Release);

        SchedLockGuard { lock: self }
    }

    /// Current nesting depth. Zero means the task is preemptible.
    pub fn lock_count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Record that a context switch is wanted but currently suppressed.
    ///
    /// The scheduler calls this when it would have switched away from the
    /// holding task; the request is consumed when the count reaches zero.
    pub fn request_resched(&self) {
        self.resched_pending.store(true, Ordering::Release);
    }

    /// Whether a suppressed context switch is still latched.
    pub fn resched_pending(&self) -> bool {
        self.resched_pending.load(Ordering::Acquire)
    }

    fn unlock(&self) {
        compiler_fence(Ordering::Acquire);
        let old = self.count.fetch_sub(1, Ordering::Relaxed);
        debug_assert!(old > 0, "sched_lock: count underflow");
        compiler_fence(Ordering::Release);

        if old == 1 && self.resched_pending.swap(false, Ordering::AcqRel) {
            // The run queue is the scheduler's; the deferred switch happens
            // at its next scheduling boundary.
            log::trace!("sched_lock: deferred reschedule now permitted");
        }
    }
}

impl Default for SchedLock {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard for the scheduler lock. Dropping it drops one nesting level.
pub struct SchedLockGuard<'a> {
    lock: &'a SchedLock,
}

impl Drop for SchedLockGuard<'_> {
    fn drop(&mut self) {
        self.lock.unlock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lock_is_reentrant() {
        let lock = SchedLock::new();
        assert_eq!(lock.lock_count(), 0);

        let outer = lock.lock();
        assert_eq!(lock.lock_count(), 1);
        {
            let _inner = lock.lock();
            assert_eq!(lock.lock_count(), 2);
        }
        assert_eq!(lock.lock_count(), 1);
        drop(outer);
        assert_eq!(lock.lock_count(), 0);
    }

    #[test]
    fn resched_request_survives_inner_unlock() {
        let lock = SchedLock::new();

        let outer = lock.lock();
        {
            let _inner = lock.lock();
            lock.request_resched();
        }
        // Still one level deep: the request must stay latched
        assert!(lock.resched_pending());
        drop(outer);
        // Count hit zero: the request was consumed
        assert!(!lock.resched_pending());
    }
}
