//! Pull-based state published by the synchronous wrappers for the host.
//!
//! Device-lost reasons are process-wide (mutex-guarded); last-operation
//! diagnostics are per-thread and are overwritten by the next call of the same
//! kind on that thread.

mod device_lost;
pub mod last;
mod message;

pub use device_lost::*;
pub use message::*;
