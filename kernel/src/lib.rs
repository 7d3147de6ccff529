//! Task-layer signal masking and pending-signal dispatch for the Tern kernel.
//!
//! This crate owns the part of task management that decides which
//! asynchronous signals a task currently accepts and delivers the ones it no
//! longer refuses:
//! - per-task signal state (blocked mask, pending set, dispositions)
//! - the atomic examine/mutate protocol over the blocked mask
//! - synchronous dispatch of pending, unblocked signals
//! - the two primitives the protocol rests on: the interrupt-masking
//!   critical section and the per-task reentrant scheduler lock
//!
//! Every operation is self-directed: the caller passes its own task control
//! block explicitly. Resolving "the current task" is the syscall entry
//! layer's job, which also keeps this crate runnable without a scheduler.
//!
//! Boot, memory, and interrupt-controller bring-up belong to the embedding
//! kernel binary, as do the panic handler and the allocator.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod interrupts;
#[cfg(target_arch = "x86_64")]
pub mod logger;
#[cfg(target_arch = "x86_64")]
pub mod serial;
pub mod signal;
pub mod syscall;
pub mod task;
