//! Task management: control blocks and preemption control

pub mod sched_lock;
pub mod tcb;

pub use tcb::{Task, TaskId, TaskState};
