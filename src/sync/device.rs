use std::ffi::c_void;
use std::ptr;

use super::{Completion, PollBudget};
use crate::context::NativeContext;
use crate::ffi::*;

struct ScopeOutcome {
    status: u32,
    error_type: u32,
}

unsafe extern "C" fn on_pop_error_scope(
    status: u32,
    kind: u32,
    message: WGPUStringView,
    userdata1: *mut c_void,
    _userdata2: *mut c_void,
) {
    if kind != error_type::NoError && status == pop_error_scope_status::Success {
        log::debug!(
            "error scope caught type {kind}: {}",
            String::from_utf8_lossy(message.as_bytes())
        );
    }
    Completion::complete(
        userdata1,
        ScopeOutcome {
            status,
            error_type: kind,
        },
    );
}

impl NativeContext {
    pub fn push_error_scope(&self, device: WGPUDevice, filter: u32) {
        if device.is_null() {
            return;
        }
        let push = self.procs().device_push_error_scope.required(self.resolver());
        unsafe { push(device, filter) }
    }

    /// Pops the innermost error scope and returns its native error type
    /// (`NoError` when nothing was caught), or 0 if the pop itself failed.
    pub fn pop_error_scope(&self, instance: WGPUInstance, device: WGPUDevice) -> u32 {
        if instance.is_null() || device.is_null() {
            return 0;
        }
        let pop = self.procs().device_pop_error_scope.required(self.resolver());
        let done = Completion::<ScopeOutcome>::new();
        let info = WGPUPopErrorScopeCallbackInfo::process_events(on_pop_error_scope, done.userdata());
        unsafe { pop(device, info) };
        match self.pump_events(instance, PollBudget::Unbounded, || done.take()) {
            Ok(outcome) if outcome.status == pop_error_scope_status::Success => outcome.error_type,
            Ok(outcome) => {
                log::debug!("pop error scope failed with status {}", outcome.status);
                0
            }
            Err(_) => 0,
        }
    }

    /// Removes and returns the recorded loss reason for `device`, or 0.
    pub fn take_device_lost(&self, device: WGPUDevice) -> u32 {
        self.device_lost().take(device)
    }

    /// Polls the device (and `instance`, if non-null) for up to the bounded
    /// budget until a loss reason is recorded, then consumes it. Returns 0 if
    /// none arrives in time.
    pub fn wait_device_lost(&self, instance: WGPUInstance, device: WGPUDevice) -> u32 {
        if device.is_null() {
            return 0;
        }
        let poll = self.procs().device_poll.required(self.resolver());
        let lost = super::pump(
            PollBudget::BOUNDED,
            || match self.device_lost().take(device) {
                0 => None,
                reason => Some(reason),
            },
            || {
                unsafe { poll(device, 0, ptr::null()) };
                self.process_events(instance);
            },
        );
        lost.unwrap_or(0)
    }

    /// Destroys `device` and records `Destroyed` for it, whether or not the
    /// native side also reports the loss.
    pub fn destroy_device(&self, device: WGPUDevice) {
        if device.is_null() {
            return;
        }
        let destroy = self.procs().device_destroy.required(self.resolver());
        unsafe { destroy(device) };
        self.device_lost()
            .record(device, device_lost_reason::Destroyed);
    }
}
