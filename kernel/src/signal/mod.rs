//! Signal masking and dispatch for the task layer
//!
//! This module implements the mask side of signal handling:
//! - Signal constants (SIGKILL, SIGTERM, etc.)
//! - Per-task signal state (pending, blocked, dispositions)
//! - The examine/mutate operation over the blocked mask and its atomicity
//!   protocol
//! - Synchronous dispatch of pending, unblocked signals
//!
//! Dispatch runs inside the mask-change path itself: a signal left pending
//! and unblocked by a mask change is delivered before that change returns
//! to its caller.

pub mod constants;
pub mod delivery;
pub mod mask;
pub mod send;
pub mod types;

pub use mask::sig_procmask;
pub use types::*;
