//! Blocking wrappers over `wgpu-native`'s callback-based operations.
//!
//! Every wrapper follows the same shape: allocate a [`Completion`] record,
//! register a callback that fills it, start the native operation in
//! `AllowProcessEvents` mode, then [`pump`] `wgpuInstanceProcessEvents` until
//! the record is filled. Adapter/device requests, queue completion, error
//! scopes, and buffer maps wait without limit; async pipeline creation,
//! compilation info, and device-lost waits give up after
//! [`PollBudget::BOUNDED`] and report [`AsyncError::Timeout`].

mod compilation;
mod device;
mod pipeline;
mod queue;
mod request;

pub use compilation::*;

use std::ffi::c_void;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use thiserror::Error;

use crate::context::NativeContext;
use crate::ffi::WGPUInstance;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PollBudget {
    Unbounded,
    Bounded { iterations: u32, interval: Duration },
}

impl PollBudget {
    /// 2000 polls, 1 ms apart: roughly two seconds of wall clock.
    pub const BOUNDED: PollBudget = PollBudget::Bounded {
        iterations: 2000,
        interval: Duration::from_millis(1),
    };
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("polling budget exhausted")]
pub struct TimedOut;

/// Calls `poll` until `ready` yields a value or the budget runs out.
pub fn pump<T>(
    budget: PollBudget,
    mut ready: impl FnMut() -> Option<T>,
    mut poll: impl FnMut(),
) -> Result<T, TimedOut> {
    match budget {
        PollBudget::Unbounded => loop {
            if let Some(value) = ready() {
                return Ok(value);
            }
            poll();
        },
        PollBudget::Bounded {
            iterations,
            interval,
        } => {
            for _ in 0..iterations {
                if let Some(value) = ready() {
                    return Ok(value);
                }
                poll();
                thread::sleep(interval);
            }
            ready().ok_or(TimedOut)
        }
    }
}

/// Failure kinds of the strict async wrappers, as seen by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[cfg_attr(feature = "mbt-serde", derive(serde::Serialize))]
pub enum AsyncError {
    #[error("feature is disabled")]
    Disabled,
    #[error("native entry point is missing")]
    MissingSymbol,
    #[error("timed out waiting for the native callback")]
    Timeout,
    #[error("native operation failed with status {0}")]
    Failed(u32),
    #[error("null handle or descriptor")]
    InvalidInput,
}

/// Error-kind codes recorded in the thread-local slots.
pub mod error_kind {
    pub const NONE: u32 = 0;
    pub const DISABLED: u32 = 1;
    pub const MISSING_SYMBOL: u32 = 2;
    pub const TIMEOUT: u32 = 3;
    pub const FAILED: u32 = 4;
    pub const INVALID_INPUT: u32 = 5;
}

impl AsyncError {
    pub fn code(self) -> u32 {
        match self {
            AsyncError::Disabled => error_kind::DISABLED,
            AsyncError::MissingSymbol => error_kind::MISSING_SYMBOL,
            AsyncError::Timeout => error_kind::TIMEOUT,
            AsyncError::Failed(_) => error_kind::FAILED,
            AsyncError::InvalidInput => error_kind::INVALID_INPUT,
        }
    }

    /// Native status carried by the error, 0 if the native side never answered.
    pub fn status(self) -> u32 {
        match self {
            AsyncError::Failed(status) => status,
            _ => 0,
        }
    }
}

/// Result record shared between a blocking wrapper and its native callback.
///
/// The callback owns one strong reference (handed over as `userdata1`), so a
/// callback that fires after the wrapper timed out writes into a live record
/// instead of a dead stack frame.
pub(crate) struct Completion<T> {
    value: Mutex<Option<T>>,
}

impl<T> Completion<T> {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self {
            value: Mutex::new(None),
        })
    }

    /// Userdata for exactly one callback invocation.
    pub(crate) fn userdata(self: &Arc<Self>) -> *mut c_void {
        Arc::into_raw(Arc::clone(self)) as *mut c_void
    }

    /// # Safety
    /// `userdata` must come from [`Completion::userdata`] on a `Completion<T>`
    /// and must not be completed twice.
    pub(crate) unsafe fn complete(userdata: *mut c_void, value: T) {
        if userdata.is_null() {
            return;
        }
        let this = Arc::from_raw(userdata as *const Self);
        *this.value.lock() = Some(value);
    }

    pub(crate) fn take(&self) -> Option<T> {
        self.value.lock().take()
    }
}

impl NativeContext {
    /// Pumps `wgpuInstanceProcessEvents(instance)` until `ready` yields.
    pub(crate) fn pump_events<T>(
        &self,
        instance: WGPUInstance,
        budget: PollBudget,
        ready: impl FnMut() -> Option<T>,
    ) -> Result<T, TimedOut> {
        let process = self.procs().instance_process_events.required(self.resolver());
        pump(budget, ready, || unsafe { process(instance) })
    }
}
