//! Interrupt-masking critical sections
//!
//! [`disable`] captures the prior interrupt-enable state, masks interrupts on
//! the calling core, and returns a guard. Dropping the guard restores exactly
//! the captured state, so critical sections nest: an inner guard dropped
//! inside an outer one leaves interrupts masked.
//!
//! On bare metal this drives the hardware interrupt flag. Hosted builds back
//! the same API with a software flag so the enter/leave protocol runs
//! off-target unchanged.

#[cfg(all(target_arch = "x86_64", target_os = "none"))]
mod backend {
    use x86_64::instructions::interrupts;

    pub fn are_enabled() -> bool {
        interrupts::are_enabled()
    }

    pub fn enable() {
        interrupts::enable();
    }

    pub fn disable() {
        interrupts::disable();
    }
}

#[cfg(not(all(target_arch = "x86_64", target_os = "none")))]
mod backend {
    // Software interrupt-enable flag. Thread-local under test so concurrent
    // test threads each see their own core's flag.

    #[cfg(test)]
    mod flag {
        use std::cell::Cell;

        std::thread_local! {
            static IF_ENABLED: Cell<bool> = const { Cell::new(true) };
        }

        pub fn load() -> bool {
            IF_ENABLED.with(|f| f.get())
        }

        pub fn store(enabled: bool) {
            IF_ENABLED.with(|f| f.set(enabled));
        }
    }

    #[cfg(not(test))]
    mod flag {
        use core::sync::atomic::{AtomicBool, Ordering};

        static IF_ENABLED: AtomicBool = AtomicBool::new(true);

        pub fn load() -> bool {
            IF_ENABLED.load(Ordering::Acquire)
        }

        pub fn store(enabled: bool) {
            IF_ENABLED.store(enabled, Ordering::Release);
        }
    }

    pub fn are_enabled() -> bool {
        flag::load()
    }

    pub fn enable() {
        flag::store(true);
    }

    pub fn disable() {
        flag::store(false);
    }
}

/// Whether interrupt delivery is currently enabled on this core.
#[inline]
pub fn are_enabled() -> bool {
    backend::are_enabled()
}

/// Guard for an interrupt-masked region.
///
/// Holds the interrupt-enable state captured when the region was entered and
/// restores it when dropped, on every exit path.
pub struct IrqGuard {
    was_enabled: bool,
}

/// Mask interrupt delivery on the calling core.
///
/// Returns the guard for the region. Nesting is fine; only the outermost
/// guard re-enables interrupts.
pub fn disable() -> IrqGuard {
    let was_enabled = backend::are_enabled();
    backend::disable();
    IrqGuard { was_enabled }
}

impl Drop for IrqGuard {
    fn drop(&mut self) {
        if self.was_enabled {
            backend::enable();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_enabled_state() {
        assert!(are_enabled());
        {
            let _guard = disable();
            assert!(!are_enabled());
        }
        assert!(are_enabled());
    }

    #[test]
    fn nested_guards_restore_the_outer_state() {
        let outer = disable();
        assert!(!are_enabled());
        {
            let _inner = disable();
            assert!(!are_enabled());
        }
        // Inner drop must not re-enable; the outer region is still masked
        assert!(!are_enabled());
        drop(outer);
        assert!(are_enabled());
    }
}
