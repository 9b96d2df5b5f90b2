//! Deferred execution queue for interrupt-driven firmware.
//!
//! An interrupt handler [`put`](EvtQueue::put)s a caller-owned [`Evt`] with a
//! zero-argument handler; the main loop later calls
//! [`execute`](EvtQueue::execute), which runs every pending handler in FIFO
//! order outside the critical section. An event is pending at most once.
#![cfg_attr(target_os = "none", no_std)]

mod error;
mod event_queue;
mod evt;
mod macros;
mod port;

pub use error::{PutError, PutResult, RemoveError, RemoveResult};
pub use event_queue::EvtQueue;
pub use evt::Evt;
