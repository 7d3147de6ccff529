//! Signal-related data structures

use super::constants::*;
use alloc::boxed::Box;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

/// Fixed-width set of signal numbers.
///
/// Bit `n - 1` represents signal `n`. Signal numbers are 1-based; signal 0
/// is not representable, and out-of-range numbers are rejected by every
/// operation that takes one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SigSet(u64);

impl SigSet {
    /// The empty set.
    pub const EMPTY: SigSet = SigSet(0);

    pub const fn empty() -> Self {
        SigSet(0)
    }

    /// The set of every supported signal.
    pub const fn full() -> Self {
        SigSet(u64::MAX)
    }

    /// Set containing only `sig`, or the empty set if `sig` is out of range.
    pub fn single(sig: u32) -> Self {
        let mut set = SigSet::empty();
        set.add(sig);
        set
    }

    /// Add a signal. Returns `false` (and changes nothing) if `sig` is out
    /// of range.
    pub fn add(&mut self, sig: u32) -> bool {
        if !is_valid_signal(sig) {
            return false;
        }
        self.0 |= 1u64 << (sig - 1);
        true
    }

    /// Remove a signal. Returns `false` (and changes nothing) if `sig` is
    /// out of range.
    pub fn remove(&mut self, sig: u32) -> bool {
        if !is_valid_signal(sig) {
            return false;
        }
        self.0 &= !(1u64 << (sig - 1));
        true
    }

    /// Whether `sig` is a member. Out-of-range numbers are never members.
    pub fn contains(self, sig: u32) -> bool {
        is_valid_signal(sig) && (self.0 & (1u64 << (sig - 1))) != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Lowest signal number in the set, if any. Delivery walks signals in
    /// this order.
    pub fn lowest(self) -> Option<u32> {
        if self.0 == 0 {
            None
        } else {
            Some(self.0.trailing_zeros() + 1)
        }
    }

    /// Raw bit representation.
    pub const fn bits(self) -> u64 {
        self.0
    }

    pub const fn from_bits(bits: u64) -> Self {
        SigSet(bits)
    }
}

impl BitOr for SigSet {
    type Output = SigSet;

    fn bitor(self, rhs: SigSet) -> SigSet {
        SigSet(self.0 | rhs.0)
    }
}

impl BitOrAssign for SigSet {
    fn bitor_assign(&mut self, rhs: SigSet) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for SigSet {
    type Output = SigSet;

    fn bitand(self, rhs: SigSet) -> SigSet {
        SigSet(self.0 & rhs.0)
    }
}

impl BitAndAssign for SigSet {
    fn bitand_assign(&mut self, rhs: SigSet) {
        self.0 &= rhs.0;
    }
}

impl Not for SigSet {
    type Output = SigSet;

    fn not(self) -> SigSet {
        SigSet(!self.0)
    }
}

/// Errors from the task-facing signal operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigError {
    /// The `how` selector is none of SIG_BLOCK, SIG_UNBLOCK, SIG_SETMASK
    InvalidHow,
    /// Signal number outside 1..=NSIG
    InvalidSignal,
}

/// Kernel signal handler, invoked synchronously at delivery.
pub type SigHandler = fn(u32);

/// Disposition applied when a signal is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigAction {
    /// Apply the per-signal default action
    Default,
    /// Discard the signal on delivery
    Ignore,
    /// Run a kernel handler before delivery completes
    Handler(SigHandler),
}

/// Default action for a signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalDefaultAction {
    /// Terminate the task
    Terminate,
    /// Ignore the signal
    Ignore,
    /// Terminate with core dump
    CoreDump,
    /// Stop (pause) the task
    Stop,
    /// Continue a stopped task
    Continue,
}

/// Get the default action for a signal
pub fn default_action(sig: u32) -> SignalDefaultAction {
    match sig {
        // Terminate
        SIGHUP | SIGINT | SIGKILL | SIGPIPE | SIGALRM | SIGTERM | SIGUSR1 | SIGUSR2 | SIGIO
        | SIGPWR | SIGSTKFLT => SignalDefaultAction::Terminate,

        // Core dump
        SIGQUIT | SIGILL | SIGTRAP | SIGABRT | SIGBUS | SIGFPE | SIGSEGV | SIGXCPU | SIGXFSZ
        | SIGSYS => SignalDefaultAction::CoreDump,

        // Ignore
        SIGCHLD | SIGURG | SIGWINCH => SignalDefaultAction::Ignore,

        // Stop
        SIGSTOP | SIGTSTP | SIGTTIN | SIGTTOU => SignalDefaultAction::Stop,

        // Continue
        SIGCONT => SignalDefaultAction::Continue,

        // Default for unknown/realtime signals
        _ => SignalDefaultAction::Terminate,
    }
}

/// Per-task signal state
///
/// `blocked` starts empty at task creation and is owned by the task for its
/// lifetime. `pending` is fed by external producers (interrupt handlers,
/// other tasks) and drained one signal at a time by the dispatcher.
///
/// Note: the disposition table is boxed; 64 entries inline would bloat every
/// control block that embeds this state.
pub struct SignalState {
    /// Blocked signals (the task's signal mask)
    pub blocked: SigSet,
    /// Signals raised but not yet delivered
    pub pending: SigSet,
    /// Disposition per signal, indices 0-63 for signals 1-64
    actions: Box<[SigAction; NSIG as usize]>,
}

impl Default for SignalState {
    fn default() -> Self {
        SignalState {
            blocked: SigSet::empty(),
            pending: SigSet::empty(),
            actions: Box::new([SigAction::Default; NSIG as usize]),
        }
    }
}

impl SignalState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if any signals are pending and not blocked
    #[inline]
    pub fn has_deliverable_signals(&self) -> bool {
        !(self.pending & !self.blocked).is_empty()
    }

    /// Get the next deliverable signal (lowest number first)
    ///
    /// Returns None if no signals are pending and unblocked
    pub fn next_deliverable_signal(&self) -> Option<u32> {
        (self.pending & !self.blocked).lowest()
    }

    /// Mark a signal as pending
    #[inline]
    pub fn set_pending(&mut self, sig: u32) {
        self.pending.add(sig);
    }

    /// Clear a pending signal
    #[inline]
    pub fn clear_pending(&mut self, sig: u32) {
        self.pending.remove(sig);
    }

    /// Check if a signal is pending
    #[inline]
    pub fn is_pending(&self, sig: u32) -> bool {
        self.pending.contains(sig)
    }

    /// Check if a signal is blocked
    #[inline]
    pub fn is_blocked(&self, sig: u32) -> bool {
        self.blocked.contains(sig)
    }

    /// Get the disposition for a signal
    ///
    /// Returns the default disposition for invalid signal numbers
    pub fn action(&self, sig: u32) -> SigAction {
        if is_valid_signal(sig) {
            self.actions[(sig - 1) as usize]
        } else {
            SigAction::Default
        }
    }

    /// Set the disposition for a signal
    ///
    /// Does nothing for invalid signal numbers
    pub fn set_action(&mut self, sig: u32, action: SigAction) {
        if is_valid_signal(sig) {
            self.actions[(sig - 1) as usize] = action;
        }
    }
}
